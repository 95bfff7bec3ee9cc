use std::path::Path;

use fragstate_codec::FragmentFormat;
use serde::{Deserialize, Serialize};

use crate::error::{RepoError, RepoResult};

/// Configuration for a [`HashRepository`](crate::HashRepository).
///
/// ```toml
/// format = "path_query"
/// managed_keys = ["lang", "page"]
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    /// Layout used when writing the fragment back.
    pub format: FragmentFormat,
    /// Keys the repository may write.
    pub managed_keys: Vec<String>,
}

impl RepositoryConfig {
    /// A path/query configuration managing `keys`.
    pub fn managing<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            managed_keys: keys.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Parse a TOML document.
    pub fn from_toml_str(s: &str) -> RepoResult<Self> {
        toml::from_str(s).map_err(|e| RepoError::Config(e.to_string()))
    }

    /// Load a TOML file.
    pub fn load(path: impl AsRef<Path>) -> RepoResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Render as TOML.
    pub fn to_toml_string(&self) -> RepoResult<String> {
        toml::to_string(self).map_err(|e| RepoError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config() {
        let c = RepositoryConfig::default();
        assert_eq!(c.format, FragmentFormat::PathQuery);
        assert!(c.managed_keys.is_empty());
    }

    #[test]
    fn parses_toml() {
        let c = RepositoryConfig::from_toml_str(
            "format = \"bare_query\"\nmanaged_keys = [\"lang\", \"page\"]\n",
        )
        .unwrap();
        assert_eq!(c.format, FragmentFormat::BareQuery);
        assert_eq!(c.managed_keys, vec!["lang", "page"]);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let c = RepositoryConfig::from_toml_str("managed_keys = [\"a\"]").unwrap();
        assert_eq!(c.format, FragmentFormat::PathQuery);
    }

    #[test]
    fn rejects_unknown_format() {
        let err = RepositoryConfig::from_toml_str("format = \"xml\"").unwrap_err();
        assert!(matches!(err, RepoError::Config(_)), "got: {err}");
    }

    #[test]
    fn toml_roundtrip() {
        let c = RepositoryConfig::managing(["count"]);
        let parsed = RepositoryConfig::from_toml_str(&c.to_toml_string().unwrap()).unwrap();
        assert_eq!(parsed, c);
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "managed_keys = [\"theme\"]").unwrap();
        let c = RepositoryConfig::load(file.path()).unwrap();
        assert_eq!(c.managed_keys, vec!["theme"]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = RepositoryConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, RepoError::Io(_)));
    }
}

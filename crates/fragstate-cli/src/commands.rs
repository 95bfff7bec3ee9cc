use anyhow::{bail, Context};
use colored::Colorize;
use fragstate_codec::{build_fragment, parse_fragment, Fragment, FragmentFormat, Query};
use fragstate_repo::{
    HashRepository, MemoryFragment, Patch, RepoError, Repository, RepositoryConfig,
};
use serde_json::json;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => RepositoryConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => RepositoryConfig::default(),
    };
    let out = match cli.command {
        Command::Parse(args) => cmd_parse(args, cli.format)?,
        Command::Build(args) => cmd_build(args, &config, cli.format)?,
        Command::Get(args) => cmd_get(args, cli.format)?,
        Command::Set(args) => cmd_set(args, &config, cli.format)?,
    };
    println!("{out}");
    Ok(())
}

/// Split `KEY=VALUE` on the first `=`.
fn parse_assignment(arg: &str) -> Result<(&str, &str), RepoError> {
    match arg.split_once('=') {
        Some((key, _)) if key.is_empty() => Err(RepoError::InvalidArgument(format!(
            "empty key in {arg:?}"
        ))),
        Some(pair) => Ok(pair),
        None => Err(RepoError::InvalidArgument(format!(
            "expected KEY=VALUE, got {arg:?}"
        ))),
    }
}

fn pick_format(bare: bool, config: &RepositoryConfig) -> FragmentFormat {
    if bare {
        FragmentFormat::BareQuery
    } else {
        config.format
    }
}

fn render_query(query: &Query) -> String {
    if query.is_empty() {
        return format!("  {}", "(no query)".dimmed());
    }
    query
        .iter()
        .map(|(k, v)| format!("  {} = {}", k.cyan(), v))
        .collect::<Vec<_>>()
        .join("\n")
}

fn cmd_parse(args: ParseArgs, format: OutputFormat) -> anyhow::Result<String> {
    let fragment = parse_fragment(&args.fragment);
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(&fragment)?,
        OutputFormat::Text => {
            let path = if fragment.path.is_empty() {
                "(none)".dimmed().to_string()
            } else {
                fragment.path.yellow().to_string()
            };
            format!("Path: {path}\nQuery:\n{}", render_query(&fragment.query))
        }
    })
}

fn cmd_build(
    args: BuildArgs,
    config: &RepositoryConfig,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let mut query = Query::new();
    for pair in &args.pairs {
        let (key, value) = parse_assignment(pair)?;
        query.insert(key, value);
    }
    let built = build_fragment(
        &Fragment::new(args.path, query),
        pick_format(args.bare, config),
    );
    Ok(match format {
        OutputFormat::Json => json!({ "fragment": built }).to_string(),
        OutputFormat::Text => built,
    })
}

fn cmd_get(args: GetArgs, format: OutputFormat) -> anyhow::Result<String> {
    let fragment = parse_fragment(&args.fragment);
    let Some(key) = args.key else {
        return Ok(match format {
            OutputFormat::Json => serde_json::to_string_pretty(&fragment.query)?,
            OutputFormat::Text => render_query(&fragment.query),
        });
    };
    let value = fragment.query.get(&key);
    Ok(match (format, value) {
        (OutputFormat::Json, _) => json!({ key: value }).to_string(),
        (OutputFormat::Text, Some(v)) => v.to_string(),
        (OutputFormat::Text, None) => format!("{} = {}", key.bold(), "(not set)".dimmed()),
    })
}

fn cmd_set(
    args: SetArgs,
    config: &RepositoryConfig,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let mut managed = config.managed_keys.clone();
    managed.extend(args.manage.iter().cloned());
    if managed.is_empty() {
        bail!("no managed keys: pass --manage or set managed_keys in the config file");
    }

    let mut patch = Patch::new();
    for assignment in &args.assignments {
        let (key, value) = parse_assignment(assignment)?;
        patch.insert(key, Some(value.to_string()));
    }
    for key in &args.delete {
        patch.insert(key.clone(), None);
    }

    let port = MemoryFragment::new(args.fragment);
    let repo_config = RepositoryConfig {
        format: pick_format(args.bare, config),
        managed_keys: managed,
    };
    let repo = HashRepository::from_config(port.clone(), repo_config);
    repo.set(&patch)?;
    repo.commit()?;

    let result = port.get();
    Ok(match format {
        OutputFormat::Json => json!({ "fragment": result, "written": patch.len() }).to_string(),
        OutputFormat::Text => result,
    })
}

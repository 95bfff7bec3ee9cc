//! Fragment codec for fragstate.
//!
//! Translates between a raw URL fragment string and a structured
//! [`Fragment`] value holding an opaque `path` and a decoded [`Query`], and
//! back again. Everything in this crate is pure: no state, no I/O.
//!
//! # Format
//!
//! ```text
//! #{path}?{key}={value}&{key}={value}
//! ```
//!
//! - The leading `#` is optional on input.
//! - A fragment without `?` is a bare path, unless it contains `=`, in which
//!   case it is read as a bare query string (the legacy layout).
//! - Values are percent-encoded on write and decoded on read. Keys and the
//!   path are carried verbatim.
//!
//! # Modules
//!
//! - [`fragment`] — [`Fragment`], [`FragmentFormat`], [`parse_fragment`], [`build_fragment`]
//! - [`query`] — [`Query`], [`parse_query_string`], value encoding

pub mod fragment;
pub mod query;

pub use fragment::{build_fragment, parse_fragment, Fragment, FragmentFormat};
pub use query::{decode_value, encode_value, parse_query_string, Query};

//! Hash repository for fragstate.
//!
//! A repository owns the read-modify-write cycle over a URL fragment: it
//! parses the current fragment, merges a [`Patch`] of serialized values into
//! the query, and writes the rebuilt fragment back. Only the keys it was
//! configured to manage may be written; every other key, and the path, is
//! carried through untouched.
//!
//! # Architecture
//!
//! - A [`FragmentPort`] is the raw I/O seam: read the fragment string, write
//!   it back. [`AmbientFragment`] is the process-wide location hash;
//!   [`MemoryFragment`] is a shared in-memory string.
//! - [`HashRepository`] implements [`Repository`] over any port, using the
//!   fragment codec for parsing and building.
//! - [`InMemoryRepository`] implements [`Repository`] over a plain map and
//!   never touches a fragment. It is the test double for store code.
//!
//! # Modules
//!
//! - [`error`] — [`RepoError`]
//! - [`port`] — [`FragmentPort`] and its two implementations
//! - [`patch`] — [`Patch`], a batch of writes and deletions
//! - [`config`] — [`RepositoryConfig`]
//! - [`traits`] — the [`Repository`] trait
//! - [`hash`] — [`HashRepository`]
//! - [`memory`] — [`InMemoryRepository`]

pub mod config;
pub mod error;
pub mod hash;
pub mod memory;
pub mod patch;
pub mod port;
pub mod traits;

pub use config::RepositoryConfig;
pub use error::{RepoError, RepoResult};
pub use hash::HashRepository;
pub use memory::InMemoryRepository;
pub use patch::Patch;
pub use port::{AmbientFragment, FragmentPort, MemoryFragment};
pub use traits::Repository;

pub use fragstate_codec::FragmentFormat;

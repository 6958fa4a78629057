//! # Blog Core
//!
//! The domain layer of the blog data-access demo.
//! Entity snapshots, write commands, typed ids, errors and the repository
//! ports. No database dependency lives here.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::{RepoError, WriteError, WriteFailure};

//! Ports - trait definitions for the storage the domain talks to.

mod repository;

pub use repository::{BlogRepository, PostWriter};

//! # EzDB Core
//!
//! Core types for the EzDB single-file key-value store: the error
//! taxonomy, the ordered hash-indexed map that backs every database, and
//! the named sort orders it supports.
//!
//! This crate performs no I/O.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod map;
pub mod sort;

pub use error::{Error, Result};
pub use map::{Entry, OrderedIndexedMap};
pub use sort::SortOrder;

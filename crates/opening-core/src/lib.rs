//! Core opening-book logic: SAN notation comparison, opening record parsing,
//! and catalog construction. Everything here is pure and synchronous; I/O and
//! session driving live in the `trainer` crate.

pub mod book;
pub mod catalog;
pub mod notation;
pub mod record;

pub use book::{Catalog, LineNames, OpeningBook};

//! Document Model - Canonical element sequence
//!
//! This crate provides the intermediate representation that sits between the
//! HTML front end and the format renderers. A parse produces an ordered,
//! immutable sequence of [`DocumentElement`]s which every renderer borrows.

mod element;
mod error;

pub use element::*;
pub use error::*;

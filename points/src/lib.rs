//! Shared point model for the areacheck server and its clients.
//!
//! This crate owns the area membership predicate, coordinate validation,
//! the check record wire shape, and the plot coordinate mapping. Server and
//! clients link the same crate, so preview and authoritative verdicts come
//! from a single compiled predicate and cannot drift apart.

pub mod check;
pub mod plot;
pub mod record;
pub mod validate;

pub use check::{Region, is_in_area};
pub use record::PointCheck;
pub use validate::{Coordinates, ValidateError};

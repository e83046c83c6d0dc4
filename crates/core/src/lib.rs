//! Domain records and form validation for the watch-over service front end.
//!
//! Everything here is pure: no I/O, no HTTP. The backend client and the web
//! crate share these types so request/response shapes stay in one place.

pub mod error;
pub mod hospital;
pub mod pagination;
pub mod settings;
pub mod types;
pub mod user;
pub mod validation;

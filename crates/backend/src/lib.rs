//! HTTP client for the watch-over service backend.
//!
//! Every call goes through [`BackendClient`], which unwraps the backend's
//! `{ success, message, data | users | hospitals, pagination }` envelope and
//! turns failures into a [`BackendError`].

pub mod client;
pub mod envelope;
pub mod error;

pub use client::{BackendClient, Forwarded, UserPage};
pub use error::BackendError;

//! Mimamori admin web front end.
//!
//! Server-rendered pages for managing watched users, their facilities and
//! alert thresholds, backed entirely by the remote backend API. Exposes the
//! building blocks (config, state, error handling, routes) so integration
//! tests and the binary entrypoint can both access them.

pub mod config;
pub mod error;
pub mod flash;
pub mod handlers;
pub mod query;
pub mod router;
pub mod routes;
pub mod state;
pub mod views;

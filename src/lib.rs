//! Client core of the employee-turnover management system (ETMS) console.
//!
//! Owns the authentication session lifecycle (token pair, silent refresh,
//! role-gated routing), the survey entity graph with its authoring and
//! response-collection engines, and typed bindings for the REST resources
//! the console consumes. Rendering is someone else's job.

pub mod auth;
pub mod client;
pub mod config;
pub mod console;
pub mod domain;
pub mod error;
pub mod resources;
pub mod surveys;

pub use config::Config;
pub use console::Console;
pub use error::Error;

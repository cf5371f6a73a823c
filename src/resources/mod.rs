//! Typed bindings for every REST resource the console consumes, one module
//! per API area. These stay thin: paths, payload shapes, and nothing else.

pub mod accounts;
pub mod analytics;
pub mod departments;
pub mod employees;
pub mod surveys;
pub mod trainings;

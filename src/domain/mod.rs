pub mod models;
pub mod survey;

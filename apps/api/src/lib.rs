pub mod analysis;
pub mod config;
pub mod errors;
pub mod models;
pub mod routes;
pub mod rubric;
pub mod state;

pub mod api_json;
pub mod config;
pub mod error;
pub mod import;
pub mod models;
pub mod progress;
pub mod schedule;
pub mod server;
pub mod store;

pub use server::{configure, run_server};

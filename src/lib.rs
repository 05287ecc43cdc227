pub mod advisor;
pub mod error;
pub mod forecast;
pub mod models;
pub mod reference;
pub mod routes;
pub mod scoring;
pub mod settings;
pub mod treatment;
pub mod utils;

pub use advisor::Advisor;
pub use error::{AdvisorError, Result};
pub use settings::{settings, Settings};

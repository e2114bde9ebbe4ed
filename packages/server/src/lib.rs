//! HTTP surface for the screening pipeline: health, PDF upload, and
//! pipeline-run acknowledgement.

pub mod app;
pub mod config;
pub mod routes;

pub use app::build_app;
pub use config::Config;

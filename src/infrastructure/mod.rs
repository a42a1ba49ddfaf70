// Infrastructure layer - configuration loading
pub mod config;

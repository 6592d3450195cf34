//! Configuration types and env-driven constructors.

pub mod default_config;
pub mod embed_model_config;

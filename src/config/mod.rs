mod env_vars;
mod triage_config;

pub use env_vars::expand_env_vars;

pub use triage_config::{load_or_create_config, TriageConfig};

pub mod environment;
pub mod load_config;

/// TOML configuration (`homehelp.toml`).
pub mod toml_config;

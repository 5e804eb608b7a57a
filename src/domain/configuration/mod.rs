pub mod loader;
pub mod run_config;
mod run_mode;

pub use loader::{
    ConfigOverrides, LoadedConfig, load_config, parse_config_content, read_config_file,
    resolve_config,
};
pub use run_config::{BatchingPolicy, ConfigFile, GitHubApiConfig, RunConfig};
pub use run_mode::RunMode;

/// Tool settings: schemas, loading and global access
///
/// ```no_run
/// use pooltools::config::{load_config_from_path, with_config};
///
/// load_config_from_path(std::path::Path::new("config.toml")).unwrap();
/// let gateway = with_config(|cfg| cfg.gateway.url.clone());
/// ```
pub mod macros;
pub mod schemas;
pub mod utils;

pub use schemas::{Config, GatewayConfig, NetworkConfig, DEFAULT_VERIFY_HELP_URL};
pub use utils::{
    apply_env_overrides, get_config_clone, load_config_from_path, parse_config, with_config,
    ENV_GATEWAY_TIMEOUT, ENV_GATEWAY_URL, ENV_NETWORK,
};

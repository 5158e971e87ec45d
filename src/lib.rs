pub mod arguments;
pub mod config;
pub mod deployments;
pub mod errors;
pub mod invoker;
pub mod logger;
pub mod paths;
pub mod pool_config;
pub mod protocol;

//! Application constants

pub const APP_NAME_LOWER: &str = "watchtower";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8870;

// Environment variable names
pub const ENV_HOST: &str = "WATCHTOWER_HOST";
pub const ENV_PORT: &str = "WATCHTOWER_PORT";
pub const ENV_CONFIG: &str = "WATCHTOWER_CONFIG";
pub const ENV_LOG: &str = "WATCHTOWER_LOG";

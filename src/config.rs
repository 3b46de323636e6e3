use std::{net::SocketAddr, path::PathBuf};

use crate::constants::{DEFAULT_ADDRESS, DEFAULT_CACHE_DIR, DEFAULT_CATALOG_PATH};

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub address: SocketAddr,
    pub catalog_path: PathBuf,
    pub cache_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: SocketAddr::from(DEFAULT_ADDRESS),
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
        }
    }
}

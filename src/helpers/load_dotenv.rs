use std::path::Path;

use crate::constants::envvars;

/// Load `.env` from the working directory, then `.env` next to the config
/// file named by `SOMOSE_CONFIG` if there is one.
///
/// Runs before the logger exists, so it reports on stderr.
pub fn load_dotenv() {
    if dotenv::dotenv().is_ok() {
        eprintln!("Loaded local .env")
    }
    if let Ok(config) = std::env::var(envvars::CONFIG_PATH) {
        let Some(dir) = Path::new(&config).parent() else {
            return;
        };
        let config_dotenv = dir.join(".env");
        if config_dotenv.is_file() && dotenv::from_path(&config_dotenv).is_ok() {
            eprintln!("Loaded {}", config_dotenv.display());
        }
    }
}

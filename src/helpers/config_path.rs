use std::env;
use std::path::PathBuf;

use crate::constants::{defaults, envvars};

/// Config file to use: the explicit argument, else `SOMOSE_CONFIG`, else
/// `somose.yaml` in the working directory
pub fn config_path(arg: Option<PathBuf>) -> PathBuf {
    arg.or_else(|| env::var_os(envvars::CONFIG_PATH).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(defaults::CONFIG_FILE))
}

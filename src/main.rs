mod command;

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use env_logger::Env;

use somose::constants::{defaults, envvars};
use somose::helpers;

const CMD_VALIDATE: &str = "validate";
const CMD_GENERATE: &str = "generate";
const CMD_DUMP: &str = "dump";

fn main() -> Result<()> {
    helpers::load_dotenv();
    env_logger::Builder::from_env(Env::default().filter_or(envvars::LOG_LEVEL, defaults::LOG_LEVEL))
        .init();

    let mut args = pico_args::Arguments::from_env();
    let subcommand = args.subcommand()?;
    let path = helpers::config_path(args.opt_free_from_str::<PathBuf>()?);
    match subcommand.as_deref() {
        Some(CMD_VALIDATE) => command::validate(&path),
        Some(CMD_GENERATE) => command::generate(&path),
        Some(CMD_DUMP) => command::dump(&path),
        _ => Err(anyhow!(
            "Subcommand must be one of 'validate', 'generate', 'dump'"
        )),
    }
}

mod config_path;
mod load_dotenv;

pub use config_path::config_path;
pub use load_dotenv::load_dotenv;

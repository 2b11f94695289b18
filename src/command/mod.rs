mod dump;
mod generate;
mod validate;

pub use dump::dump;
pub use generate::generate;
pub use validate::validate;

use std::path::Path;

use anyhow::{Context, Result};

use somose::config;
use somose::driver::SomoseDriver;
use somose::interfaces::MemoryHost;

/// Bind every record of the config file against a fresh in-memory host,
/// stopping at the first record that fails
fn bind_file(path: &Path) -> Result<(MemoryHost, Vec<SomoseDriver>)> {
    let document = config::load_file(path)?;
    let mut host = if document.buses.is_empty() {
        MemoryHost::new()
    } else {
        MemoryHost::with_buses(document.buses)
    };
    let mut drivers = Vec::with_capacity(document.records.len());
    for (n, record) in document.records.iter().enumerate() {
        let driver = somose::bind(record, &mut host)
            .with_context(|| format!("Failed to bind SOMOSE record #{}", n + 1))?;
        drivers.push(driver);
    }
    log::info!("Bound {} SOMOSE record(s) from {}", drivers.len(), path.display());
    Ok((host, drivers))
}

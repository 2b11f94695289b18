use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};

use somose::config;

pub fn validate(path: &Path) -> Result<()> {
    let document = config::load_file(path)?;
    let mut configs = Vec::with_capacity(document.records.len());
    let mut taken: HashSet<String> = document.buses.iter().cloned().collect();
    for (n, record) in document.records.iter().enumerate() {
        let config = config::validate_with(record, |id| taken.contains(id))
            .with_context(|| format!("Invalid SOMOSE record #{}", n + 1))?;
        taken.extend(config.declared_ids().into_iter().map(str::to_string));
        configs.push(config);
    }
    log::info!("{} SOMOSE record(s) in {} are valid", configs.len(), path.display());
    println!("{}", serde_json::to_string_pretty(&configs)?);
    Ok(())
}

use std::path::Path;

use anyhow::Result;
use serde_json::json;

use super::bind_file;

pub fn dump(path: &Path) -> Result<()> {
    let (host, drivers) = bind_file(path)?;
    for driver in &drivers {
        driver.dump_config();
    }
    let output = json!({
        "drivers": drivers,
        "components": host.components(),
        "i2c_devices": host.i2c_devices(),
        "sensors": host.sensors(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

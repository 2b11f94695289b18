use std::time::Duration;

pub const LOG_LEVEL: &str = "info";
pub const CONFIG_FILE: &str = "somose.yaml";

// Kept exactly as the firmware enum spells it
pub const ENERGY_MODE: &str = "continous";
pub const MOISTURE_DATA: &str = "average";

pub const UPDATE_INTERVAL: Duration = Duration::from_secs(20);
pub const I2C_ADDRESS: u8 = 0x55;
pub const I2C_BUS_ID: &str = "bus_i2c";

#![allow(dead_code)]
// Each test binary uses only some of these fixtures

pub const RECORD_A: &str = r#"
id: a
moisture_data: raw
"#;

pub const RECORD_B: &str = r#"
id: b
temperature: {}
moisture: {}
energy_mode: ENERGY_SAVING
"#;

pub const RECORD_C_BAD_ENERGY_MODE: &str = r#"
id: c
energy_mode: turbo
"#;

pub const RECORD_FULL: &str = r#"
id: greenhouse_probe
update_interval: 1min
setup_priority: 600
address: 0x56
energy_mode: "Energy Saving"
moisture_data: Last
temperature:
  name: "Greenhouse soil temperature"
  accuracy_decimals: 1
moisture:
  id: greenhouse_moisture
  name: "Greenhouse soil moisture"
  expire_after: 10min
  force_update: true
"#;

pub const GARDEN_DOCUMENT: &str = r#"
esphome:
  name: garden

i2c:
  sda: 21
  scl: 22

sensor:
  - platform: uptime
    name: Uptime
  - platform: somose
    id: bed_north
    moisture:
      name: "North bed moisture"
  - platform: somose
    id: bed_south
    address: 0x56
    energy_mode: energy_saving
    temperature:
      name: "South bed temperature"
"#;

pub const DUPLICATE_ID_DOCUMENT: &str = r#"
sensor:
  - platform: somose
    id: bed
  - platform: somose
    id: bed
"#;

pub const BAD_SUB_CONFIG_DOCUMENT: &str = r#"
sensor:
  - platform: somose
    id: bed
    temperature:
      accuracy_decimals: many
"#;

pub const NO_ID_DOCUMENT: &str = r#"
sensor:
  - platform: somose
    moisture:
      name: "Bed moisture"
  - platform: somose
    address: 0x56
    temperature:
"#;

pub const NULL_MODE_RECORD: &str = r#"
id: bed
energy_mode:
"#;

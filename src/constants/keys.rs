// Component record
pub const ID: &str = "id";
pub const TEMPERATURE: &str = "temperature";
pub const MOISTURE: &str = "moisture";
pub const ENERGY_MODE: &str = "energy_mode";
pub const MOISTURE_DATA: &str = "moisture_data";

// Inherited from the polling component and I2C device schemas
pub const UPDATE_INTERVAL: &str = "update_interval";
pub const SETUP_PRIORITY: &str = "setup_priority";
pub const ADDRESS: &str = "address";
pub const I2C_ID: &str = "i2c_id";

// Sensor sub-config
pub const NAME: &str = "name";
pub const INTERNAL: &str = "internal";
pub const DISABLED_BY_DEFAULT: &str = "disabled_by_default";
pub const FORCE_UPDATE: &str = "force_update";
pub const UNIT_OF_MEASUREMENT: &str = "unit_of_measurement";
pub const ICON: &str = "icon";
pub const ACCURACY_DECIMALS: &str = "accuracy_decimals";
pub const DEVICE_CLASS: &str = "device_class";
pub const STATE_CLASS: &str = "state_class";
pub const ENTITY_CATEGORY: &str = "entity_category";
pub const EXPIRE_AFTER: &str = "expire_after";

// Document level
pub const PLATFORM: &str = "platform";
pub const SENSOR: &str = "sensor";
pub const I2C: &str = "i2c";

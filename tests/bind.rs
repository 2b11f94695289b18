use serde_yml::Value;

use somose::config::{EnergyMode, MoistureData, TimePeriod};
use somose::interfaces::{ConstructionError, IdRegistry, MemoryHost};
use somose::BindError;

mod stubs;

fn yaml(s: &str) -> Value {
    serde_yml::from_str(s).unwrap()
}

#[test]
fn no_sub_configs_means_no_sensors() {
    let mut host = MemoryHost::new();
    for record in [
        "id: p1",
        "{id: p2, energy_mode: energy saving}",
        "{id: p3, moisture_data: LAST, update_interval: never}",
        "{id: p4, address: 0x20, update_interval: 5s}",
    ] {
        let driver = somose::bind(&yaml(record), &mut host).unwrap();
        assert!(driver.temperature_sensor().is_none(), "{record}");
        assert!(driver.moisture_sensor().is_none(), "{record}");
    }
    assert!(host.sensors().is_empty());
}

#[test]
fn exactly_one_sub_config_attaches_exactly_one_sensor() {
    let mut host = MemoryHost::new();

    let driver = somose::bind(&yaml("{id: t, temperature: {}}"), &mut host).unwrap();
    assert!(driver.temperature_sensor().is_some());
    assert!(driver.moisture_sensor().is_none());

    let driver = somose::bind(&yaml("{id: m, moisture: {}}"), &mut host).unwrap();
    assert!(driver.temperature_sensor().is_none());
    let handle = driver.moisture_sensor().unwrap();
    let sensor = host.sensor(handle).unwrap();
    assert_eq!(sensor.device_class, "moisture");
    assert_eq!(sensor.icon.as_deref(), Some("mdi:water-percent"));
}

#[test]
fn defaults_apply_when_keys_are_missing() {
    let mut host = MemoryHost::new();
    let driver = somose::bind(&yaml("id: d"), &mut host).unwrap();
    assert_eq!(driver.energy_mode(), EnergyMode::Continous);
    assert_eq!(driver.moisture_data(), MoistureData::Average);
    assert_eq!(driver.update_interval(), TimePeriod::Millis(20_000));
    assert_eq!(driver.address(), 0x55);
}

#[test]
fn scenario_a() {
    let mut host = MemoryHost::new();
    let driver = somose::bind(&yaml(stubs::config::RECORD_A), &mut host).unwrap();
    assert_eq!(driver.id(), "a");
    assert!(driver.temperature_sensor().is_none());
    assert!(driver.moisture_sensor().is_none());
    assert_eq!(driver.energy_mode(), EnergyMode::Continous);
    assert_eq!(driver.moisture_data(), MoistureData::Raw);
    assert_eq!(driver.address(), 0x55);
    assert_eq!(driver.update_interval(), TimePeriod::Millis(20_000));
    assert!(host.contains("a"));
}

#[test]
fn scenario_b() {
    let mut host = MemoryHost::new();
    let driver = somose::bind(&yaml(stubs::config::RECORD_B), &mut host).unwrap();
    assert_eq!(driver.id(), "b");
    assert!(driver.temperature_sensor().is_some());
    assert!(driver.moisture_sensor().is_some());
    assert_eq!(driver.energy_mode(), EnergyMode::EnergySaving);
    assert_eq!(driver.moisture_data(), MoistureData::Average);
    assert_eq!(host.sensors().len(), 2);
}

#[test]
fn scenario_c() {
    let mut host = MemoryHost::new();
    let err = somose::bind(&yaml(stubs::config::RECORD_C_BAD_ENERGY_MODE), &mut host).unwrap_err();
    let BindError::Schema(schema_error) = &err else {
        panic!("expected schema error, got {err:?}");
    };
    assert_eq!(schema_error.key(), Some("energy_mode"));
    assert!(err.to_string().contains("energy_mode"));
    assert!(!host.contains("c"));
    assert!(host.components().is_empty());
}

#[test]
fn binding_twice_fails_the_second_time() {
    let mut host = MemoryHost::new();
    somose::bind(&yaml("id: twice"), &mut host).unwrap();
    let err = somose::bind(&yaml("id: twice"), &mut host).unwrap_err();
    assert_eq!(
        err,
        BindError::Construction(ConstructionError::IdInUse("twice".into()))
    );
}

#[test]
fn registries_only_grow() {
    let mut host = MemoryHost::new();
    somose::bind(&yaml("{id: first, moisture: {}}"), &mut host).unwrap();
    let first_program = host.program().lines();
    somose::bind(&yaml("{id: second, temperature: {}}"), &mut host).unwrap();

    assert_eq!(host.program().lines()[..first_program.len()], first_program[..]);
    assert_eq!(
        host.declared_ids(),
        ["bus_i2c", "first", "first_moisture", "second", "second_temperature"]
    );
    let component_ids: Vec<&str> = host.components().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(component_ids, ["first", "second"]);
}

#[test]
fn records_without_id_are_numbered() {
    let document = somose::config::parse_document(stubs::config::NO_ID_DOCUMENT).unwrap();
    let mut host = MemoryHost::new();
    let ids: Vec<String> = document
        .records
        .iter()
        .map(|record| somose::bind(record, &mut host).unwrap().id().to_string())
        .collect();
    assert_eq!(ids, ["somose_id", "somose_id_2"]);
    assert_eq!(
        host.declared_ids(),
        ["bus_i2c", "somose_id", "somose_id_moisture", "somose_id_2", "somose_id_2_temperature"]
    );
}

#[test]
fn null_values_are_not_replaced_by_defaults() {
    let mut host = MemoryHost::new();
    let err = somose::bind(&yaml(stubs::config::NULL_MODE_RECORD), &mut host).unwrap_err();
    let BindError::Schema(schema_error) = &err else {
        panic!("expected schema error, got {err:?}");
    };
    assert_eq!(schema_error.key(), Some("energy_mode"));
    assert!(host.components().is_empty());
}

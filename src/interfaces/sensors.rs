use cppgen::{Expression, Program, Statement};

use crate::config::SensorConfig;

pub const SENSOR_CLASS: &str = "sensor::Sensor";

/// Code that constructs one sensor and applies its metadata
pub fn sensor_setup(config: &SensorConfig, out: &mut Program) {
    let id = config.id.as_str();
    let set = |method: &str, arg: Expression| Expression::method(id, method, vec![arg]);

    out.add(Statement::new_pvariable(SENSOR_CLASS, id));
    out.add(Expression::app("register_sensor", vec![Expression::id(id)]));
    if let Some(name) = &config.name {
        out.add(set("set_name", Expression::Str(name.clone())));
    }
    out.add(set("set_disabled_by_default", Expression::Bool(config.disabled_by_default)));
    if let Some(internal) = config.internal {
        out.add(set("set_internal", Expression::Bool(internal)));
    }
    if let Some(icon) = &config.icon {
        out.add(set("set_icon", Expression::Str(icon.clone())));
    }
    if let Some(category) = config.entity_category {
        out.add(set("set_entity_category", Expression::id(category.cpp_constant())));
    }
    out.add(set("set_device_class", Expression::Str(config.device_class.clone())));
    out.add(set("set_state_class", Expression::id(config.state_class.cpp_constant())));
    out.add(set(
        "set_unit_of_measurement",
        Expression::Str(config.unit_of_measurement.clone()),
    ));
    out.add(set(
        "set_accuracy_decimals",
        Expression::Int(i64::from(config.accuracy_decimals)),
    ));
    out.add(set("set_force_update", Expression::Bool(config.force_update)));
    if let Some(expire_after) = config.expire_after {
        out.add(set(
            "set_expire_after",
            Expression::Int(i64::from(expire_after.scheduler_millis())),
        ));
    }
}

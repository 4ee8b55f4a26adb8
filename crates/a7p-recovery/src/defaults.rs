//! # Payload Defaults
//!
//! The v1 recovery template for a profile payload. Values are plausible
//! stand-ins for a .338 rifle profile: they satisfy every field's type and
//! length expectation but are not tuned to any real load.
//!
//! The template is built once per process on first use and never mutated.

use std::sync::OnceLock;

use a7p_core::fields::{self, max_len};
use a7p_core::Value;

use crate::config::RecoveryConfig;
use crate::constraint::Constraint;
use crate::repair::Repair;
use crate::schema::{Literal, RecoverySchema, SchemaNode, SchemaRecord};

/// Version of the payload template built here.
pub const PAYLOAD_SCHEMA_VERSION: u32 = 1;

/// `device_uuid` fallback when repairs are on and the field holds no string.
pub const RESTORED_DEVICE_UUID: &str = "Warning: Restored profile";

/// Segments of the default distance ladder, hundredths of a metre:
/// `(first, last, step)`, both ends inclusive.
const DISTANCE_LADDER: [(i64, i64, usize); 5] = [
    (10_000, 20_000, 10_000),
    (25_000, 40_000, 5_000),
    (42_000, 60_000, 2_000),
    (61_000, 100_000, 1_000),
    (100_500, 170_000, 500),
];

/// The default distance ladder, 100 m to 1700 m.
pub fn default_distances() -> Vec<Value> {
    DISTANCE_LADDER
        .iter()
        .flat_map(|&(first, last, step)| (first..=last).step_by(step))
        .map(Value::Int)
        .collect()
}

fn switch(zoom: i64, distance: i64) -> Value {
    let record = [
        (fields::SW_C_IDX, Value::Int(255)),
        (fields::SW_ZOOM, Value::Int(zoom)),
        (fields::SW_DISTANCE, Value::Int(distance)),
        (fields::SW_RETICLE_IDX, Value::Int(0)),
        (fields::SW_DISTANCE_FROM, Value::symbol("VALUE")),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();
    Value::Record(record)
}

fn coef_row(bc_cd: i64, mv: i64) -> Value {
    let record = [(fields::ROW_BC_CD, Value::Int(bc_cd)), (fields::ROW_MV, Value::Int(mv))]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    Value::Record(record)
}

fn symbol(default: &str, symbols: &[&str]) -> Literal {
    let allowed = Constraint::one_of(symbols.iter().copied());
    Literal::new(Value::symbol(default)).with_constraint(allowed)
}

fn profile_v1() -> SchemaRecord {
    let mut profile = SchemaRecord::new()
        .with(fields::PROFILE_NAME, Value::str("nil"))
        .with(fields::CARTRIDGE_NAME, Value::str("nil"))
        .with(fields::BULLET_NAME, Value::str("nil"))
        .with(fields::SHORT_NAME_TOP, Value::str("nil"))
        .with(fields::SHORT_NAME_BOT, Value::str("nil"))
        .with(fields::USER_NOTE, Value::str("\n"))
        .with(fields::ZERO_X, Value::Int(0))
        .with(fields::ZERO_Y, Value::Int(0))
        .with(fields::SC_HEIGHT, Value::Int(90))
        .with(fields::R_TWIST, Value::Int(900))
        .with(fields::C_MUZZLE_VELOCITY, Value::Int(8000))
        .with(fields::C_ZERO_TEMPERATURE, Value::Int(15))
        .with(fields::C_T_COEFF, Value::Int(1000))
        .with(fields::C_ZERO_AIR_TEMPERATURE, Value::Int(15))
        .with(fields::C_ZERO_AIR_PRESSURE, Value::Int(10_000))
        .with(fields::C_ZERO_AIR_HUMIDITY, Value::Int(0))
        .with(fields::C_ZERO_P_TEMPERATURE, Value::Int(15))
        .with(fields::B_DIAMETER, Value::Int(338))
        .with(fields::B_WEIGHT, Value::Int(3000))
        .with(fields::B_LENGTH, Value::Int(1800))
        .with(fields::BC_TYPE, symbol("G7", &fields::BC_TYPE_SYMBOLS))
        .with(
            fields::SWITCHES,
            Literal::new(Value::Seq(vec![
                switch(1, 10_000),
                switch(2, 20_000),
                switch(3, 30_000),
                switch(4, 100_000),
            ]))
            .with_constraint(Constraint::member(
                fields::SW_DISTANCE_FROM,
                Constraint::one_of(fields::DISTANCE_FROM_SYMBOLS),
            )),
        )
        .with(fields::DISTANCES, Value::Seq(default_distances()))
        .with(fields::COEF_ROWS, Value::Seq(vec![coef_row(3820, 0)]))
        .with(fields::CALIBER, Value::str("nil"))
        .with(fields::C_ZERO_DISTANCE_IDX, Value::Int(0))
        .with(fields::C_ZERO_W_PITCH, Value::Int(0))
        .with(fields::TWIST_DIR, symbol("RIGHT", &fields::TWIST_DIR_SYMBOLS))
        .with(fields::DEVICE_UUID, Value::str(""));

    for (name, limit) in fields::STRING_FIELDS {
        if let Some(SchemaNode::Default(literal)) = profile.get_mut(name) {
            literal.constrain(Constraint::MaxChars(limit));
        }
    }
    profile
}

/// String repairs. Each cuts to one character under the field's validation
/// limit so the repaired value passes the length rule.
fn string_repairs() -> [(&'static str, Repair); 8] {
    [
        (fields::PROFILE_NAME, Repair::truncate(max_len::PROFILE_NAME - 1)),
        (fields::BULLET_NAME, Repair::truncate(max_len::BULLET_NAME - 1)),
        (fields::CARTRIDGE_NAME, Repair::truncate(max_len::CARTRIDGE_NAME - 1)),
        (fields::CALIBER, Repair::truncate(max_len::CALIBER - 1)),
        (
            fields::DEVICE_UUID,
            Repair::truncate_or(max_len::DEVICE_UUID - 1, RESTORED_DEVICE_UUID),
        ),
        (fields::SHORT_NAME_TOP, Repair::truncate(max_len::SHORT_NAME_TOP - 1)),
        (fields::SHORT_NAME_BOT, Repair::truncate(max_len::SHORT_NAME_BOT - 1)),
        (fields::USER_NOTE, Repair::truncate(max_len::USER_NOTE - 1)),
    ]
}

impl RecoverySchema {
    /// The v1 payload template, literal defaults only.
    pub fn payload_v1() -> Self {
        let root = SchemaRecord::new().with(fields::PROFILE, profile_v1());
        RecoverySchema::new(PAYLOAD_SCHEMA_VERSION, root)
    }

    /// The v1 payload template with string fields repaired in place.
    pub fn payload_v1_with_repairs() -> Self {
        let mut profile = profile_v1();
        for (name, repair) in string_repairs() {
            profile.insert(name, repair);
        }
        let root = SchemaRecord::new().with(fields::PROFILE, profile);
        RecoverySchema::new(PAYLOAD_SCHEMA_VERSION, root)
    }

    /// The shared template matching `config`.
    pub fn for_config(config: &RecoveryConfig) -> &'static RecoverySchema {
        if config.apply_repairs {
            payload_schema_with_repairs()
        } else {
            payload_schema()
        }
    }
}

/// Process-wide [`RecoverySchema::payload_v1`].
pub fn payload_schema() -> &'static RecoverySchema {
    static SCHEMA: OnceLock<RecoverySchema> = OnceLock::new();
    SCHEMA.get_or_init(RecoverySchema::payload_v1)
}

/// Process-wide [`RecoverySchema::payload_v1_with_repairs`].
pub fn payload_schema_with_repairs() -> &'static RecoverySchema {
    static SCHEMA: OnceLock<RecoverySchema> = OnceLock::new();
    SCHEMA.get_or_init(RecoverySchema::payload_v1_with_repairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaNode;

    fn profile(schema: &RecoverySchema) -> &SchemaRecord {
        match schema.root().get(fields::PROFILE) {
            Some(SchemaNode::Record(r)) => r,
            other => panic!("Expected profile template, got: {other:?}"),
        }
    }

    #[test]
    fn test_distance_ladder_shape() {
        let distances = default_distances();
        assert_eq!(distances.len(), 196);
        assert_eq!(distances.first(), Some(&Value::Int(10_000)));
        assert_eq!(distances.last(), Some(&Value::Int(170_000)));
        let raw: Vec<i64> = distances.iter().filter_map(Value::as_i64).collect();
        assert!(raw.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_v1_is_all_literals() {
        let schema = RecoverySchema::payload_v1();
        assert_eq!(schema.version(), PAYLOAD_SCHEMA_VERSION);
        let profile = profile(&schema);
        assert_eq!(profile.len(), 29);
        assert!(profile
            .iter()
            .all(|(_, node)| matches!(node, SchemaNode::Default(_))));
    }

    #[test]
    fn test_with_repairs_swaps_only_strings() {
        let schema = RecoverySchema::payload_v1_with_repairs();
        let profile = profile(&schema);
        assert_eq!(profile.len(), 29);
        let repaired = profile
            .iter()
            .filter(|(_, node)| matches!(node, SchemaNode::Repair(_)))
            .count();
        assert_eq!(repaired, fields::STRING_FIELDS.len());
    }

    #[test]
    fn test_literals_carry_field_constraints() {
        let schema = RecoverySchema::payload_v1();
        let profile = profile(&schema);
        let literal = |name: &str| match profile.get(name) {
            Some(SchemaNode::Default(literal)) => literal.clone(),
            other => panic!("Expected literal for {name}, got: {other:?}"),
        };

        for (name, limit) in fields::STRING_FIELDS {
            assert_eq!(literal(name).constraint(), Some(&Constraint::MaxChars(limit)));
            assert!(literal(name).admits(literal(name).value()), "{name}");
        }
        for name in [fields::BC_TYPE, fields::TWIST_DIR, fields::SWITCHES] {
            assert!(literal(name).admits(literal(name).value()), "{name}");
        }
        assert!(!literal(fields::BC_TYPE).admits(&Value::symbol("G9")));
        assert!(literal(fields::ZERO_X).constraint().is_none());
    }

    #[test]
    fn test_for_config_picks_shared_schema() {
        let plain = RecoverySchema::for_config(&RecoveryConfig::default());
        assert!(std::ptr::eq(plain, payload_schema()));
        let repairing = RecoverySchema::for_config(&RecoveryConfig {
            apply_repairs: true,
        });
        assert!(std::ptr::eq(repairing, payload_schema_with_repairs()));
    }
}

//! # Field Contract
//!
//! Field names and fixed-point scale factors of the profile payload.
//!
//! The validation rule table and the recovery schema both key on these
//! names. Renaming a field here renames it for both.
//!
//! Numeric fields are stored as integers in scaled units; divide by the
//! field's scale factor to get the physical value. For example `zero_x` holds
//! thousandths of a click, so a stored `-2000` is `-2.0`.

/// Top-level payload field holding the profile record.
pub const PROFILE: &str = "profile";

// ─── Descriptive strings ────────────────────────────────────────────

pub const PROFILE_NAME: &str = "profile_name";
pub const CARTRIDGE_NAME: &str = "cartridge_name";
pub const BULLET_NAME: &str = "bullet_name";
pub const SHORT_NAME_TOP: &str = "short_name_top";
pub const SHORT_NAME_BOT: &str = "short_name_bot";
pub const USER_NOTE: &str = "user_note";
pub const CALIBER: &str = "caliber";
pub const DEVICE_UUID: &str = "device_uuid";

// ─── Sight and rifle ────────────────────────────────────────────────

pub const ZERO_X: &str = "zero_x";
pub const ZERO_Y: &str = "zero_y";
pub const SC_HEIGHT: &str = "sc_height";
pub const R_TWIST: &str = "r_twist";
pub const TWIST_DIR: &str = "twist_dir";

// ─── Cartridge and zeroing conditions ───────────────────────────────

pub const C_MUZZLE_VELOCITY: &str = "c_muzzle_velocity";
pub const C_ZERO_TEMPERATURE: &str = "c_zero_temperature";
pub const C_T_COEFF: &str = "c_t_coeff";
pub const C_ZERO_AIR_TEMPERATURE: &str = "c_zero_air_temperature";
pub const C_ZERO_AIR_PRESSURE: &str = "c_zero_air_pressure";
pub const C_ZERO_AIR_HUMIDITY: &str = "c_zero_air_humidity";
pub const C_ZERO_P_TEMPERATURE: &str = "c_zero_p_temperature";
pub const C_ZERO_W_PITCH: &str = "c_zero_w_pitch";
pub const C_ZERO_DISTANCE_IDX: &str = "c_zero_distance_idx";

// ─── Bullet ─────────────────────────────────────────────────────────

pub const B_DIAMETER: &str = "b_diameter";
pub const B_WEIGHT: &str = "b_weight";
pub const B_LENGTH: &str = "b_length";
pub const BC_TYPE: &str = "bc_type";

// ─── Sequences ──────────────────────────────────────────────────────

/// Zoom/reticle switch positions.
pub const SWITCHES: &str = "switches";
/// Distance ladder, hundredths of a metre.
pub const DISTANCES: &str = "distances";
/// Ballistic-coefficient table rows.
pub const COEF_ROWS: &str = "coef_rows";

// Switch position members.
pub const SW_C_IDX: &str = "c_idx";
pub const SW_ZOOM: &str = "zoom";
pub const SW_DISTANCE: &str = "distance";
pub const SW_RETICLE_IDX: &str = "reticle_idx";
pub const SW_DISTANCE_FROM: &str = "distance_from";

// Coefficient row members.
pub const ROW_BC_CD: &str = "bc_cd";
pub const ROW_MV: &str = "mv";

/// Fixed-point scale factors (stored value / factor = physical value).
pub mod scale {
    /// Sight offsets, thousandths.
    pub const ZERO_X: f64 = 1000.0;
    pub const ZERO_Y: f64 = 1000.0;
    /// Sight height, thousandths.
    pub const SC_HEIGHT: f64 = 1000.0;
    /// Barrel twist rate, tenths.
    pub const R_TWIST: f64 = 10.0;
    /// Muzzle velocity, tenths of m/s.
    pub const C_MUZZLE_VELOCITY: f64 = 10.0;
    /// Temperature sensitivity coefficient, thousandths of a percent.
    pub const C_T_COEFF: f64 = 1000.0;
    /// Air pressure, tenths of hPa.
    pub const C_ZERO_AIR_PRESSURE: f64 = 10.0;
    /// Bullet diameter, thousandths of an inch.
    pub const B_DIAMETER: f64 = 1000.0;
    /// Bullet weight, tenths of a grain.
    pub const B_WEIGHT: f64 = 10.0;
    /// Bullet length, thousandths of an inch.
    pub const B_LENGTH: f64 = 1000.0;
    /// Distance ladder entries, hundredths of a metre.
    pub const DISTANCE: f64 = 100.0;
    /// Fields stored in physical units.
    pub const UNIT: f64 = 1.0;
}

/// Exclusive upper bounds on string length, in characters.
///
/// A value is acceptable when `chars().count() < limit`.
pub mod max_len {
    pub const PROFILE_NAME: usize = 50;
    pub const CARTRIDGE_NAME: usize = 50;
    pub const BULLET_NAME: usize = 50;
    pub const CALIBER: usize = 50;
    pub const DEVICE_UUID: usize = 50;
    pub const SHORT_NAME_TOP: usize = 8;
    pub const SHORT_NAME_BOT: usize = 8;
    pub const USER_NOTE: usize = 1024;
}

/// Every length-limited string field with its exclusive limit.
pub const STRING_FIELDS: [(&str, usize); 8] = [
    (PROFILE_NAME, max_len::PROFILE_NAME),
    (CARTRIDGE_NAME, max_len::CARTRIDGE_NAME),
    (CALIBER, max_len::CALIBER),
    (BULLET_NAME, max_len::BULLET_NAME),
    (DEVICE_UUID, max_len::DEVICE_UUID),
    (SHORT_NAME_TOP, max_len::SHORT_NAME_TOP),
    (SHORT_NAME_BOT, max_len::SHORT_NAME_BOT),
    (USER_NOTE, max_len::USER_NOTE),
];

/// Bullet drag model symbols.
pub const BC_TYPE_SYMBOLS: [&str; 3] = ["G7", "G1", "CUSTOM"];

/// Barrel twist direction symbols.
pub const TWIST_DIR_SYMBOLS: [&str; 2] = ["RIGHT", "LEFT"];

/// Switch `distance_from` symbols.
pub const DISTANCE_FROM_SYMBOLS: [&str; 2] = ["INDEX", "VALUE"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_field_names_are_unique() {
        let mut names: Vec<&str> = STRING_FIELDS.iter().map(|(n, _)| *n).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), STRING_FIELDS.len());
    }

    #[test]
    fn short_names_are_tighter_than_long_names() {
        assert!(max_len::SHORT_NAME_TOP < max_len::PROFILE_NAME);
        assert!(max_len::USER_NOTE > max_len::PROFILE_NAME);
    }
}

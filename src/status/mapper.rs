use super::codes::{
    Adapter, CarStatus, ChargingAllowed, ErrorCode, ForceCharging, Toggle, WifiState,
    access_from_raw, contactor_from_raw,
};
use super::raw::{RawStatus, as_float, as_int};
use super::types::{ChargingDuration, EnergyByToken, NormalizedStatus};
use serde_json::Value;

/// Slot positions inside the `pha` contactor array
pub mod pha {
    pub const PRE_L3: usize = 0;
    pub const PRE_L2: usize = 1;
    pub const PRE_L1: usize = 2;
    pub const POST_L3: usize = 3;
    pub const POST_L2: usize = 4;
    pub const POST_L1: usize = 5;
}

/// Slot positions inside the `nrg` sensor array
pub mod nrg {
    pub const U_L1: usize = 0;
    pub const U_L2: usize = 1;
    pub const U_L3: usize = 2;
    pub const U_N: usize = 3;
    pub const I_L1: usize = 4;
    pub const I_L2: usize = 5;
    pub const I_L3: usize = 6;
    pub const P_L1: usize = 7;
    pub const P_L2: usize = 8;
    pub const P_L3: usize = 9;
    pub const P_N: usize = 10;
    pub const P_ALL: usize = 11;
    pub const LF_L1: usize = 12;
    pub const LF_L2: usize = 13;
    pub const LF_L3: usize = 14;
    pub const LF_N: usize = 15;
}

/// Slot positions inside the `tma` temperature array
pub mod tma {
    pub const TEMP_0: usize = 0;
    pub const TEMP_1: usize = 1;
    pub const TEMP_2: usize = 2;
    pub const TEMP_3: usize = 3;
}

/// Raw `dws` units per kWh
const DWS_PER_KWH: f64 = 360_000.0;
/// `tof` value that corresponds to UTC
const TIMEZONE_BASE: i64 = 100;

/// Translate a raw status payload into a [`NormalizedStatus`]
///
/// Total: absent keys, short arrays and values of the wrong JSON type all
/// fall back to the field's default instead of failing.
pub fn map(raw: &RawStatus) -> NormalizedStatus {
    let int = |key: &str| raw.int(key).unwrap_or(0);
    let float = |key: &str| raw.float(key).unwrap_or(0.0);
    let nrg_int = |index: usize| raw.slot("nrg", index).and_then(as_int).unwrap_or(0);
    let nrg_scaled = |index: usize, divisor: f64| round_to(nrg_int(index) as f64 / divisor, 2);
    let temp = |index: usize| raw.slot("tma", index).and_then(as_float).unwrap_or(0.0);

    let temps = [
        temp(tma::TEMP_0),
        temp(tma::TEMP_1),
        temp(tma::TEMP_2),
        temp(tma::TEMP_3),
    ];
    let charger_temp = if raw.array_len("tma") > 0 {
        temps.iter().sum::<f64>() / temps.len() as f64
    } else {
        // Firmware without probe array reports a single sensor
        float("tmp")
    };

    NormalizedStatus {
        car_status: CarStatus::from_raw(raw.get("car")),
        charger_max_current: int("amp"),
        charger_force_charging: ForceCharging::from_raw(raw.get("frc")),
        min_charging_current_limit: int("mca"),
        max_charging_current_limit: int("ama"),
        charger_err: ErrorCode::from_raw(raw.get("err")),
        charger_access: access_from_raw(raw.get("acs")),
        charging_allowed: ChargingAllowed::from_raw(raw.get("alw")),
        cable_lock_mode: int("ust"),
        cable_max_current: int("cbl"),

        pre_contactor_l1: contactor_from_raw(raw.slot("pha", pha::PRE_L1)),
        pre_contactor_l2: contactor_from_raw(raw.slot("pha", pha::PRE_L2)),
        pre_contactor_l3: contactor_from_raw(raw.slot("pha", pha::PRE_L3)),
        post_contactor_l1: contactor_from_raw(raw.slot("pha", pha::POST_L1)),
        post_contactor_l2: contactor_from_raw(raw.slot("pha", pha::POST_L2)),
        post_contactor_l3: contactor_from_raw(raw.slot("pha", pha::POST_L3)),
        phase_switch_mode: int("psm"),
        phases_number_connected: int("pnp"),

        charger_temp: round_to(charger_temp, 2),
        charger_temp0: round_to(temps[tma::TEMP_0], 2),
        charger_temp1: round_to(temps[tma::TEMP_1], 2),
        charger_temp2: round_to(temps[tma::TEMP_2], 2),
        charger_temp3: round_to(temps[tma::TEMP_3], 2),

        current_session_charged_energy: round_to(int("dws") as f64 / DWS_PER_KWH, 5),
        charging_limit: int("dwo"),
        adapter: Adapter::from_raw(raw.get("adi")),
        unlocked_by_card: int("uby"),
        energy_total: int("eto"),
        energy_by_token: energy_by_token(raw),
        wifi: WifiState::from_raw(raw.get("wst")),

        u_l1: nrg_int(nrg::U_L1),
        u_l2: nrg_int(nrg::U_L2),
        u_l3: nrg_int(nrg::U_L3),
        u_n: nrg_int(nrg::U_N),
        i_l1: nrg_scaled(nrg::I_L1, 10.0),
        i_l2: nrg_scaled(nrg::I_L2, 10.0),
        i_l3: nrg_scaled(nrg::I_L3, 10.0),
        p_l1: nrg_scaled(nrg::P_L1, 10.0),
        p_l2: nrg_scaled(nrg::P_L2, 10.0),
        p_l3: nrg_scaled(nrg::P_L3, 10.0),
        p_n: nrg_scaled(nrg::P_N, 10.0),
        p_all: nrg_scaled(nrg::P_ALL, 100.0),
        lf_l1: nrg_int(nrg::LF_L1),
        lf_l2: nrg_int(nrg::LF_L2),
        lf_l3: nrg_int(nrg::LF_L3),
        lf_n: nrg_int(nrg::LF_N),

        firmware: raw.string("fwv").unwrap_or_else(|| "unknown".to_string()),
        serial_number: raw.string("sse").unwrap_or_else(|| "unknown".to_string()),
        wifi_enabled: Toggle::from_raw(raw.get("wen")),
        timezone_offset: int("tof").saturating_sub(TIMEZONE_BASE),
        timezone_dst_offset: int("tds"),
        allowed_ampere: raw.int("acu"),
        energy_since_car_connected: round_to(float("wh"), 2),
        charging_duration: charging_duration(raw.get("cdi")),
        min_charging_time: int("fmt"),
        car_consumption: round_to(float("cco"), 2),
        rssi_signal_strength: int("rssi"),
        transaction: raw.int("trx"),
    }
}

impl From<&RawStatus> for NormalizedStatus {
    fn from(raw: &RawStatus) -> Self {
        map(raw)
    }
}

/// Per-token counters: `eca` token_a, `ecr` token_r, `ecd` token_d,
/// `ec1`..`ec9` token_1..token_9 (no `ec2`/`ec3` in the firmware)
fn energy_by_token(raw: &RawStatus) -> EnergyByToken {
    let counter = |key: &str| raw.int(key).unwrap_or(0);
    EnergyByToken {
        token_a: counter("eca"),
        token_r: counter("ecr"),
        token_d: counter("ecd"),
        token_4: counter("ec4"),
        token_5: counter("ec5"),
        token_6: counter("ec6"),
        token_7: counter("ec7"),
        token_8: counter("ec8"),
        token_9: counter("ec9"),
        token_1: counter("ec1"),
    }
}

fn charging_duration(value: Option<&Value>) -> Option<ChargingDuration> {
    let obj = value?.as_object()?;
    Some(ChargingDuration {
        kind: obj.get("type").and_then(as_int).unwrap_or(0),
        value: obj.get("value").and_then(as_int).unwrap_or(0),
    })
}

/// Round half away from zero to `decimals` places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawStatus {
        RawStatus::from_value(value)
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(24.875, 2), 24.88);
        assert_eq!(round_to(9.28125, 2), 9.28);
        assert_eq!(round_to(1.0 / 3.0, 5), 0.33333);
        assert_eq!(round_to(f64::NAN, 2), 0.0);
    }

    #[test]
    fn test_scaled_values() {
        let status = map(&raw(json!({
            "dws": 720000,
            "tof": 160,
            "nrg": [230, 231, 229, 2, 160, 158, 161, 36, 37, 38, 0, 1110, 99, 98, 97, 0]
        })));
        assert_eq!(status.current_session_charged_energy, 2.0);
        assert_eq!(status.timezone_offset, 60);
        assert_eq!(status.u_l2, 231);
        assert_eq!(status.i_l1, 16.0);
        assert_eq!(status.i_l2, 15.8);
        assert_eq!(status.p_l3, 3.8);
        assert_eq!(status.p_all, 11.1);
        assert_eq!(status.lf_l3, 97);
    }

    #[test]
    fn test_session_energy_precision() {
        let status = map(&raw(json!({"dws": 1234})));
        assert_eq!(status.current_session_charged_energy, 0.00343);
    }

    #[test]
    fn test_temperature_fallback() {
        let legacy = map(&raw(json!({"tmp": 31})));
        assert_eq!(legacy.charger_temp, 31.0);

        let probes = map(&raw(json!({"tmp": 31, "tma": [20.0, 22.0, 24.0, 26.0]})));
        assert_eq!(probes.charger_temp, 23.0);

        let empty_probes = map(&raw(json!({"tmp": 31, "tma": []})));
        assert_eq!(empty_probes.charger_temp, 31.0);
    }

    #[test]
    fn test_contactor_slots_are_reversed() {
        let status = map(&raw(json!({"pha": [true, false, false, false, false, true]})));
        assert!(status.pre_contactor_l3);
        assert!(!status.pre_contactor_l1);
        assert!(status.post_contactor_l1);
        assert!(!status.post_contactor_l3);
    }

    #[test]
    fn test_token_counters() {
        let status = map(&raw(json!({"eca": 10, "ec1": "25", "ec9": 3.7})));
        assert_eq!(status.energy_by_token.token_a, 10);
        assert_eq!(status.energy_by_token.token_1, 25);
        assert_eq!(status.energy_by_token.token_9, 3);
        assert_eq!(status.energy_by_token.get("token_r"), Some(0));
        assert_eq!(status.energy_by_token.get("token_x"), None);
        assert_eq!(status.energy_by_token.total(), 38);
    }

    #[test]
    fn test_charging_duration() {
        let status = map(&raw(json!({"cdi": {"type": 1, "value": 5000}})));
        assert_eq!(
            status.charging_duration,
            Some(ChargingDuration { kind: 1, value: 5000 })
        );
        assert_eq!(map(&raw(json!({"cdi": null}))).charging_duration, None);
        assert_eq!(map(&raw(json!({"cdi": 4}))).charging_duration, None);
    }
}

use super::codes::{
    Adapter, CarStatus, ChargingAllowed, ErrorCode, ForceCharging, Toggle, WifiState,
};
use serde::Serialize;

/// Charger status with stable names and units
///
/// Currents are in amperes, powers in kilowatts as scaled by the firmware,
/// temperatures in degrees Celsius and energies in watt-hours unless the
/// field name says otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedStatus {
    pub car_status: CarStatus,
    pub charger_max_current: i64,
    pub charger_force_charging: ForceCharging,
    pub min_charging_current_limit: i64,
    pub max_charging_current_limit: i64,
    pub charger_err: ErrorCode,
    /// Literal firmware table: code 0 is `true`, code 1 is `false`
    pub charger_access: Option<bool>,
    pub charging_allowed: ChargingAllowed,
    pub cable_lock_mode: i64,
    pub cable_max_current: i64,

    pub pre_contactor_l1: bool,
    pub pre_contactor_l2: bool,
    pub pre_contactor_l3: bool,
    pub post_contactor_l1: bool,
    pub post_contactor_l2: bool,
    pub post_contactor_l3: bool,
    pub phase_switch_mode: i64,
    pub phases_number_connected: i64,

    /// Mean of the four probes, or the legacy single sensor
    pub charger_temp: f64,
    pub charger_temp0: f64,
    pub charger_temp1: f64,
    pub charger_temp2: f64,
    pub charger_temp3: f64,

    /// kWh, 5 decimals
    pub current_session_charged_energy: f64,
    pub charging_limit: i64,
    pub adapter: Adapter,
    pub unlocked_by_card: i64,
    pub energy_total: i64,
    pub energy_by_token: EnergyByToken,
    pub wifi: WifiState,

    pub u_l1: i64,
    pub u_l2: i64,
    pub u_l3: i64,
    pub u_n: i64,
    pub i_l1: f64,
    pub i_l2: f64,
    pub i_l3: f64,
    pub p_l1: f64,
    pub p_l2: f64,
    pub p_l3: f64,
    pub p_n: f64,
    pub p_all: f64,
    pub lf_l1: i64,
    pub lf_l2: i64,
    pub lf_l3: i64,
    pub lf_n: i64,

    pub firmware: String,
    pub serial_number: String,
    pub wifi_enabled: Toggle,
    /// Minutes relative to UTC
    pub timezone_offset: i64,
    pub timezone_dst_offset: i64,
    pub allowed_ampere: Option<i64>,
    pub energy_since_car_connected: f64,
    pub charging_duration: Option<ChargingDuration>,
    pub min_charging_time: i64,
    pub car_consumption: f64,
    pub rssi_signal_strength: i64,
    pub transaction: Option<i64>,
}

/// Energy counters per authorization token
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EnergyByToken {
    pub token_a: i64,
    pub token_r: i64,
    pub token_d: i64,
    pub token_4: i64,
    pub token_5: i64,
    pub token_6: i64,
    pub token_7: i64,
    pub token_8: i64,
    pub token_9: i64,
    pub token_1: i64,
}

impl EnergyByToken {
    /// Counter by token identifier (`token_a`, `token_1`, ...)
    pub fn get(&self, token: &str) -> Option<i64> {
        Some(match token {
            "token_a" => self.token_a,
            "token_r" => self.token_r,
            "token_d" => self.token_d,
            "token_4" => self.token_4,
            "token_5" => self.token_5,
            "token_6" => self.token_6,
            "token_7" => self.token_7,
            "token_8" => self.token_8,
            "token_9" => self.token_9,
            "token_1" => self.token_1,
            _ => return None,
        })
    }

    /// Sum over all tokens
    pub fn total(&self) -> i64 {
        [
            self.token_a,
            self.token_r,
            self.token_d,
            self.token_4,
            self.token_5,
            self.token_6,
            self.token_7,
            self.token_8,
            self.token_9,
            self.token_1,
        ]
        .iter()
        .fold(0i64, |acc, v| acc.saturating_add(*v))
    }
}

/// Charging duration counter (`cdi`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChargingDuration {
    /// Counter type as reported by the firmware
    #[serde(rename = "type")]
    pub kind: i64,
    /// Duration in milliseconds
    pub value: i64,
}

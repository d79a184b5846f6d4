//! Enumerated firmware codes and their human-readable labels
//!
//! Every enum carries an `Unknown` variant for codes the table does not
//! list, so unmapped firmware values are an explicit match arm rather than a
//! failed lookup.

use super::raw::{as_bool, as_int};
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Serialize a code enum as its label
macro_rules! serialize_as_label {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Serialize for $ty {
                fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    serializer.serialize_str(self.as_str())
                }
            }

            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )+
    };
}

const UNKNOWN: &str = "unknown";

/// Car connection state (`car`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarStatus {
    Idle,
    Charging,
    WaitingForAuth,
    Finished,
    Unknown,
}

impl CarStatus {
    pub fn from_raw(value: Option<&Value>) -> Self {
        match value.and_then(as_int) {
            Some(1) => Self::Idle,
            Some(2) => Self::Charging,
            Some(3) => Self::WaitingForAuth,
            Some(4) => Self::Finished,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "Charger ready, no car connected",
            Self::Charging => "Car is charging",
            Self::WaitingForAuth => "Car connected, authentication required",
            Self::Finished => "Charging finished, car can be disconnected",
            Self::Unknown => UNKNOWN,
        }
    }
}

/// Charger error state (`err`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Ok,
    Rccb,
    Phase,
    NoGround,
    Internal,
    Unknown,
}

impl ErrorCode {
    pub fn from_raw(value: Option<&Value>) -> Self {
        match value.and_then(as_int) {
            Some(0) => Self::Ok,
            Some(1) => Self::Rccb,
            Some(3) => Self::Phase,
            Some(8) => Self::NoGround,
            Some(10) => Self::Internal,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Rccb => "RCCB",
            Self::Phase => "PHASE",
            Self::NoGround => "NO_GROUND",
            Self::Internal => "INTERNAL",
            Self::Unknown => UNKNOWN,
        }
    }
}

/// Force-charging mode (`frc`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceCharging {
    Neutral,
    Off,
    On,
    Unknown,
}

impl ForceCharging {
    /// Device code written by `set_force_charging(false)`
    pub const CODE_OFF: i64 = 1;
    /// Device code written by `set_force_charging(true)`
    pub const CODE_ON: i64 = 2;

    /// An absent or null code counts as 0 (neutral)
    pub fn from_raw(value: Option<&Value>) -> Self {
        match value.filter(|v| !v.is_null()) {
            None => Self::Neutral,
            Some(v) => match as_int(v) {
                Some(0) => Self::Neutral,
                Some(Self::CODE_OFF) => Self::Off,
                Some(Self::CODE_ON) => Self::On,
                _ => Self::Unknown,
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Off => "off",
            Self::On => "on",
            Self::Unknown => UNKNOWN,
        }
    }
}

/// Adapter presence (`adi`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adapter {
    NoAdapter,
    Adapter16A,
    Unknown,
}

impl Adapter {
    pub fn from_raw(value: Option<&Value>) -> Self {
        let present = match value {
            Some(Value::Bool(b)) => Some(*b),
            Some(Value::Number(n)) => match n.as_i64() {
                Some(0) => Some(false),
                Some(1) => Some(true),
                _ => None,
            },
            Some(Value::String(s)) => match s.as_str() {
                "0" | "false" => Some(false),
                "1" | "true" => Some(true),
                _ => None,
            },
            _ => None,
        };
        match present {
            Some(false) => Self::NoAdapter,
            Some(true) => Self::Adapter16A,
            None => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoAdapter => "No Adapter",
            Self::Adapter16A => "16A-Adapter",
            Self::Unknown => UNKNOWN,
        }
    }
}

/// Whether the charger currently allows charging (`alw`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargingAllowed {
    On,
    Off,
    Unknown,
}

impl ChargingAllowed {
    pub fn from_raw(value: Option<&Value>) -> Self {
        let allowed = match value {
            Some(Value::Bool(b)) => Some(*b),
            Some(Value::Number(n)) => match n.as_i64() {
                Some(0) => Some(false),
                Some(1) => Some(true),
                _ => None,
            },
            Some(Value::String(s)) => match s.as_str() {
                "0" => Some(false),
                "1" => Some(true),
                _ => None,
            },
            _ => None,
        };
        match allowed {
            Some(true) => Self::On,
            Some(false) => Self::Off,
            None => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
            Self::Unknown => UNKNOWN,
        }
    }
}

/// Wifi connection state derived from the signal-status code (`wst`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WifiState {
    Connected,
    NotConnected,
    Unknown,
}

impl WifiState {
    /// Firmware code for an established station connection
    pub const CODE_CONNECTED: i64 = 3;

    pub fn from_raw(value: Option<&Value>) -> Self {
        match value.filter(|v| !v.is_null()) {
            None => Self::Unknown,
            Some(v) if as_int(v) == Some(Self::CODE_CONNECTED) => Self::Connected,
            Some(_) => Self::NotConnected,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Connected => "connected",
            Self::NotConnected => "not connected",
            Self::Unknown => UNKNOWN,
        }
    }
}

/// On/off flag that the firmware serializes as the strings "true"/"false"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    On,
    Off,
    Unknown,
}

impl Toggle {
    /// Exact string comparison; JSON booleans and other spellings are unknown
    pub fn from_raw(value: Option<&Value>) -> Self {
        match value.and_then(Value::as_str) {
            Some("true") => Self::On,
            Some("false") => Self::Off,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
            Self::Unknown => UNKNOWN,
        }
    }
}

serialize_as_label!(
    CarStatus,
    ErrorCode,
    ForceCharging,
    Adapter,
    ChargingAllowed,
    WifiState,
    Toggle
);

/// Access-control flag (`acs`)
///
/// The firmware table maps code 0 to `true` and code 1 to `false`; the
/// inversion is kept as-is. Any other value, or an absent one, is `None`.
pub fn access_from_raw(value: Option<&Value>) -> Option<bool> {
    match value.and_then(as_int) {
        Some(0) => Some(true),
        Some(1) => Some(false),
        _ => None,
    }
}

/// Contactor state from a `pha` slot
pub fn contactor_from_raw(value: Option<&Value>) -> bool {
    value.and_then(as_bool).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_car_status_numeric_and_string() {
        assert_eq!(CarStatus::from_raw(Some(&json!(2))), CarStatus::Charging);
        assert_eq!(CarStatus::from_raw(Some(&json!("4"))), CarStatus::Finished);
        assert_eq!(CarStatus::from_raw(Some(&json!(9))), CarStatus::Unknown);
        assert_eq!(CarStatus::from_raw(None).as_str(), "unknown");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(ErrorCode::from_raw(Some(&json!(0))).as_str(), "OK");
        assert_eq!(ErrorCode::from_raw(Some(&json!("10"))).as_str(), "INTERNAL");
        assert_eq!(ErrorCode::from_raw(Some(&json!(2))), ErrorCode::Unknown);
        assert_eq!(ErrorCode::from_raw(None), ErrorCode::Unknown);
    }

    #[test]
    fn test_force_charging_defaults_to_neutral() {
        assert_eq!(ForceCharging::from_raw(None), ForceCharging::Neutral);
        assert_eq!(ForceCharging::from_raw(Some(&json!(null))), ForceCharging::Neutral);
        assert_eq!(ForceCharging::from_raw(Some(&json!("2"))), ForceCharging::On);
        assert_eq!(ForceCharging::from_raw(Some(&json!(1))), ForceCharging::Off);
        assert_eq!(ForceCharging::from_raw(Some(&json!(7))), ForceCharging::Unknown);
    }

    #[test]
    fn test_adapter_forms() {
        assert_eq!(Adapter::from_raw(Some(&json!(true))), Adapter::Adapter16A);
        assert_eq!(Adapter::from_raw(Some(&json!("false"))), Adapter::NoAdapter);
        assert_eq!(Adapter::from_raw(Some(&json!(1))), Adapter::Adapter16A);
        assert_eq!(Adapter::from_raw(Some(&json!("0"))), Adapter::NoAdapter);
        assert_eq!(Adapter::from_raw(Some(&json!(2))), Adapter::Unknown);
    }

    #[test]
    fn test_charging_allowed_forms() {
        assert_eq!(ChargingAllowed::from_raw(Some(&json!(true))), ChargingAllowed::On);
        assert_eq!(ChargingAllowed::from_raw(Some(&json!("0"))), ChargingAllowed::Off);
        assert_eq!(ChargingAllowed::from_raw(Some(&json!(1))), ChargingAllowed::On);
        assert_eq!(
            ChargingAllowed::from_raw(Some(&json!("true"))),
            ChargingAllowed::Unknown
        );
    }

    #[test]
    fn test_wifi_tri_state() {
        assert_eq!(WifiState::from_raw(None), WifiState::Unknown);
        assert_eq!(WifiState::from_raw(Some(&json!(null))), WifiState::Unknown);
        assert_eq!(WifiState::from_raw(Some(&json!(3))), WifiState::Connected);
        assert_eq!(WifiState::from_raw(Some(&json!("3"))), WifiState::Connected);
        assert_eq!(WifiState::from_raw(Some(&json!(1))), WifiState::NotConnected);
        assert_eq!(WifiState::from_raw(Some(&json!("x"))), WifiState::NotConnected);
    }

    #[test]
    fn test_toggle_exact_strings() {
        assert_eq!(Toggle::from_raw(Some(&json!("true"))), Toggle::On);
        assert_eq!(Toggle::from_raw(Some(&json!("false"))), Toggle::Off);
        assert_eq!(Toggle::from_raw(Some(&json!(true))), Toggle::Unknown);
        assert_eq!(Toggle::from_raw(Some(&json!("TRUE"))), Toggle::Unknown);
    }

    #[test]
    fn test_access_table_is_inverted() {
        assert_eq!(access_from_raw(Some(&json!(0))), Some(true));
        assert_eq!(access_from_raw(Some(&json!(1))), Some(false));
        assert_eq!(access_from_raw(Some(&json!(2))), None);
        assert_eq!(access_from_raw(None), None);
    }

    #[test]
    fn test_labels_serialize_as_strings() {
        let v = serde_json::to_value(CarStatus::Idle).unwrap();
        assert_eq!(v, json!("Charger ready, no car connected"));
        assert_eq!(WifiState::NotConnected.to_string(), "not connected");
    }
}

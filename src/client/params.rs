use super::transport::DeviceRequest;
use crate::error::{ChargerError, Result};
use crate::status::ForceCharging;

/// Lowest current accepted by `set_max_current`
pub const MIN_CURRENT: i64 = 0;
/// Highest current accepted by `set_max_current`
pub const MAX_CURRENT: i64 = 32;

/// Writable charger parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parameter {
    /// `amp`, amperes
    MaxCurrent,
    /// `frc`, 0 neutral / 1 off / 2 on
    ForceCharging,
    /// `psm`, 0 auto / 1 single phase / 2 three phases
    PhaseSwitchMode,
    /// `acs`, 0 open / 1 wait for authentication
    AccessControl,
    /// `trx`, null no transaction / 0 authenticate all users
    Transaction,
}

impl Parameter {
    /// Firmware key of the parameter
    pub fn key(&self) -> &'static str {
        match self {
            Parameter::MaxCurrent => "amp",
            Parameter::ForceCharging => "frc",
            Parameter::PhaseSwitchMode => "psm",
            Parameter::AccessControl => "acs",
            Parameter::Transaction => "trx",
        }
    }
}

impl std::fmt::Display for Parameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// A validated parameter write; `None` is the firmware's `null`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterWrite {
    pub parameter: Parameter,
    pub value: Option<i64>,
}

impl ParameterWrite {
    /// Out-of-range currents are clamped, never rejected
    pub fn max_current(amps: i64) -> Self {
        Self {
            parameter: Parameter::MaxCurrent,
            value: Some(amps.clamp(MIN_CURRENT, MAX_CURRENT)),
        }
    }

    pub fn force_charging(enabled: bool) -> Self {
        let code = if enabled {
            ForceCharging::CODE_ON
        } else {
            ForceCharging::CODE_OFF
        };
        Self {
            parameter: Parameter::ForceCharging,
            value: Some(code),
        }
    }

    pub fn phase(phase: i64) -> Result<Self> {
        if !(0..=2).contains(&phase) {
            return Err(ChargerError::validation(
                "phase".to_string(),
                format!("phase={} is unsupported", phase),
            ));
        }
        Ok(Self {
            parameter: Parameter::PhaseSwitchMode,
            value: Some(phase),
        })
    }

    pub fn access_control(status: i64) -> Result<Self> {
        if !(0..=1).contains(&status) {
            return Err(ChargerError::validation(
                "access_control".to_string(),
                format!("access control status={} is unsupported", status),
            ));
        }
        Ok(Self {
            parameter: Parameter::AccessControl,
            value: Some(status),
        })
    }

    pub fn transaction(status: Option<i64>) -> Result<Self> {
        match status {
            None | Some(0) => Ok(Self {
                parameter: Parameter::Transaction,
                value: status,
            }),
            Some(other) => Err(ChargerError::validation(
                "transaction".to_string(),
                format!("transaction status={} is unsupported", other),
            )),
        }
    }

    /// Query value as sent on the wire
    pub fn wire_value(&self) -> String {
        match self.value {
            Some(v) => v.to_string(),
            None => "null".to_string(),
        }
    }

    pub fn to_request(&self) -> DeviceRequest {
        DeviceRequest::Set {
            key: self.parameter.key(),
            value: self.wire_value(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_current_clamps() {
        assert_eq!(ParameterWrite::max_current(-5).value, Some(0));
        assert_eq!(ParameterWrite::max_current(99).value, Some(32));
        assert_eq!(ParameterWrite::max_current(14).value, Some(14));
        assert_eq!(ParameterWrite::max_current(32).wire_value(), "32");
    }

    #[test]
    fn test_force_charging_codes() {
        assert_eq!(ParameterWrite::force_charging(true).value, Some(2));
        assert_eq!(ParameterWrite::force_charging(false).value, Some(1));
    }

    #[test]
    fn test_rejections() {
        let err = ParameterWrite::phase(5).unwrap_err();
        assert_eq!(err.to_string(), "Validation error: phase - phase=5 is unsupported");
        assert!(ParameterWrite::phase(-1).is_err());
        assert!(ParameterWrite::access_control(2).is_err());
        assert!(ParameterWrite::transaction(Some(1)).is_err());
    }

    #[test]
    fn test_transaction_null_on_wire() {
        let write = ParameterWrite::transaction(None).unwrap();
        assert_eq!(
            write.to_request(),
            DeviceRequest::Set {
                key: "trx",
                value: "null".to_string()
            }
        );
        assert_eq!(ParameterWrite::transaction(Some(0)).unwrap().wire_value(), "0");
    }
}

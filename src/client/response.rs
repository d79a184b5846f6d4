use crate::error::{ChargerError, Result};
use crate::status::{NormalizedStatus, RawStatus, map};
use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};
use serde_json::Value;

/// `reason` reported by the firmware when the cloud link is stale
pub const OUTDATED_REASON: &str = "Data is outdated";

/// Conditions reported to the caller as a value rather than an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentinel {
    /// Connection refused or timed out
    Unreachable,
    /// The charger answered but its data is outdated
    Offline,
}

impl Sentinel {
    pub fn msg(&self) -> &'static str {
        match self {
            Sentinel::Unreachable => "Request couldn't connect or timed out",
            Sentinel::Offline => "Wallbox is offline",
        }
    }
}

impl std::fmt::Display for Sentinel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.msg())
    }
}

// {"success": false, "msg": "..."}
impl Serialize for Sentinel {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Sentinel", 2)?;
        state.serialize_field("success", &false)?;
        state.serialize_field("msg", self.msg())?;
        state.end()
    }
}

/// Result of a status read or parameter write
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChargerResponse {
    Status(Box<NormalizedStatus>),
    Sentinel(Sentinel),
}

impl ChargerResponse {
    pub fn status(&self) -> Option<&NormalizedStatus> {
        match self {
            ChargerResponse::Status(status) => Some(status),
            ChargerResponse::Sentinel(_) => None,
        }
    }

    pub fn into_status(self) -> Option<NormalizedStatus> {
        match self {
            ChargerResponse::Status(status) => Some(*status),
            ChargerResponse::Sentinel(_) => None,
        }
    }

    pub fn sentinel(&self) -> Option<Sentinel> {
        match self {
            ChargerResponse::Status(_) => None,
            ChargerResponse::Sentinel(sentinel) => Some(*sentinel),
        }
    }

    pub fn is_status(&self) -> bool {
        matches!(self, ChargerResponse::Status(_))
    }
}

impl From<Sentinel> for ChargerResponse {
    fn from(sentinel: Sentinel) -> Self {
        ChargerResponse::Sentinel(sentinel)
    }
}

impl From<NormalizedStatus> for ChargerResponse {
    fn from(status: NormalizedStatus) -> Self {
        ChargerResponse::Status(Box::new(status))
    }
}

/// Parse a response body; `None` when it is not JSON
pub fn parse_body(body: &str) -> Option<Value> {
    serde_json::from_str(body).ok()
}

/// Classify a decoded body
///
/// Unparseable bodies (`None`) are mapped as the empty object. An explicit
/// `"success": false` is the offline sentinel when the reason is
/// [`OUTDATED_REASON`] and a device error otherwise. JSON `null` and
/// non-object payloads are device errors.
pub fn interpret(payload: Option<Value>) -> Result<ChargerResponse> {
    let value = match payload {
        None => return Ok(map(&RawStatus::empty()).into()),
        Some(value) => value,
    };

    let Value::Object(fields) = value else {
        return Err(ChargerError::device(value.to_string()));
    };

    if matches!(fields.get("success"), Some(Value::Bool(false))) {
        if fields.get("reason").and_then(Value::as_str) == Some(OUTDATED_REASON) {
            return Ok(Sentinel::Offline.into());
        }
        return Err(ChargerError::device(Value::Object(fields).to_string()));
    }

    Ok(map(&RawStatus::from(fields)).into())
}

use serde_json::{Map, Value};

/// Status payload as returned by the charger firmware
///
/// Keys are the firmware's short codes (`car`, `amp`, `nrg`, ...). The
/// accessors coerce values leniently because firmware versions disagree on
/// whether a field is sent as a number, a string or a boolean.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawStatus {
    fields: Map<String, Value>,
}

impl RawStatus {
    /// The empty status object
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wrap a parsed JSON value; anything but an object yields the empty status
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self { fields },
            _ => Self::default(),
        }
    }

    /// Raw value for `key`, `None` when absent
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Raw value for `key`, treating JSON `null` as absent
    pub fn present(&self, key: &str) -> Option<&Value> {
        self.get(key).filter(|v| !v.is_null())
    }

    /// Integer value of `key`
    pub fn int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(as_int)
    }

    /// Float value of `key`
    pub fn float(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(as_float)
    }

    /// String value of `key`; numbers are rendered, other types are absent
    pub fn string(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Element `index` of the array stored under `key`
    pub fn slot(&self, key: &str, index: usize) -> Option<&Value> {
        self.get(key)?.as_array()?.get(index)
    }

    /// Length of the array stored under `key`, 0 when absent or not an array
    pub fn array_len(&self, key: &str) -> usize {
        self.get(key)
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }

    /// Underlying JSON object
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl From<Map<String, Value>> for RawStatus {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

/// Integer reading of a JSON value: floats truncate toward zero, booleans
/// are 0/1, numeric strings are parsed
pub fn as_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|u| i64::try_from(u).unwrap_or(i64::MAX)))
            .or_else(|| n.as_f64().and_then(truncate)),
        Value::Bool(b) => Some(i64::from(*b)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(truncate))
        }
        _ => None,
    }
}

/// Float reading of a JSON value
pub fn as_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Boolean reading of a JSON value; numbers are true when non-zero
pub fn as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        _ => None,
    }
}

fn truncate(f: f64) -> Option<i64> {
    if f.is_finite() {
        // `as` saturates out-of-range values
        Some(f.trunc() as i64)
    } else {
        None
    }
}

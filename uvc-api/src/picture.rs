//! Picture (ISP) settings.
//!
//! Endpoints: `GET` + `PUT /api/2.0/camera/{uuid}`
//!
//! ISP settings live in `data[0].ispSettings` as a flat object of scalars:
//! ```json
//! {
//!   "brightness": 50,
//!   "contrast": 50,
//!   "wdr": 1,
//!   "irLedMode": "auto",
//!   ...
//! }
//! ```
//!
//! Key names vary by camera model and firmware, so the mapping is kept
//! untyped. Each value does have a fixed type on the NVR side; a write must
//! match it, and caller values are coerced to it where possible (string
//! `"44"` for an integer key becomes 44). Coercion happens entirely before
//! the PUT, so a bad key or value fails the operation without any write.

use crate::client::UvcClient;
use crate::error::{Result, UvcError};
use crate::types::SettingValue;
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;

impl UvcClient {
    /// Return the current ISP settings for a camera, unvalidated.
    pub fn get_picture_settings(&self, uuid: &str) -> Result<Map<String, Value>> {
        Ok(self.fetch_camera(uuid)?.isp_settings)
    }

    /// Update ISP settings for a camera.
    ///
    /// Every key in `settings` must already exist on the server-side record
    /// ([`UvcError::UnknownSetting`] otherwise), and every value must be
    /// coercible to the type the server stores for that key
    /// ([`UvcError::SettingType`] otherwise). Both checks run before the
    /// PUT is issued.
    ///
    /// Returns the ISP settings the NVR reports after the write; the NVR
    /// may clamp or adjust values, and no verification against the request
    /// is performed.
    pub fn set_picture_settings(
        &self,
        uuid: &str,
        settings: &BTreeMap<String, SettingValue>,
    ) -> Result<Map<String, Value>> {
        let mut record = self.fetch_camera(uuid)?;
        apply_isp_updates(&mut record.isp_settings, settings)?;
        let updated = self.put_camera(uuid, &record)?;
        Ok(updated.isp_settings)
    }
}

fn apply_isp_updates(
    existing: &mut Map<String, Value>,
    updates: &BTreeMap<String, SettingValue>,
) -> Result<()> {
    // Coerce everything first so one bad entry fails the whole batch.
    let mut coerced = Vec::with_capacity(updates.len());
    for (key, value) in updates {
        let current = existing
            .get(key)
            .ok_or_else(|| UvcError::UnknownSetting(key.clone()))?;
        coerced.push((key.clone(), coerce(key, current, value)?));
    }
    for (key, value) in coerced {
        existing.insert(key, value);
    }
    Ok(())
}

/// Coerce a caller value to the type of the stored one.
fn coerce(key: &str, current: &Value, value: &SettingValue) -> Result<Value> {
    let mismatch = |expected: &'static str| UvcError::SettingType {
        key: key.to_owned(),
        expected,
        given: value.kind(),
    };
    match current {
        Value::Bool(_) => value
            .as_boolean()
            .map(Value::Bool)
            .ok_or_else(|| mismatch("boolean")),
        Value::Number(n) if n.is_f64() => value
            .as_float()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| mismatch("float")),
        Value::Number(_) => value
            .as_integer()
            .map(Value::from)
            .ok_or_else(|| mismatch("integer")),
        Value::String(_) => Ok(Value::String(value.as_text())),
        // Stored null/array/object values have no coercion target.
        other => Err(mismatch(json_kind(other))),
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn isp() -> Map<String, Value> {
        json!({
            "brightness": 50,
            "sharpness": 0.5,
            "wdr": true,
            "irLedMode": "auto"
        })
        .as_object()
        .cloned()
        .unwrap()
    }

    #[test]
    fn matching_types_pass_through() {
        let mut existing = isp();
        let updates = BTreeMap::from([
            ("brightness".to_owned(), SettingValue::Integer(75)),
            ("irLedMode".to_owned(), SettingValue::from("on")),
        ]);
        apply_isp_updates(&mut existing, &updates).unwrap();
        assert_eq!(existing["brightness"], json!(75));
        assert_eq!(existing["irLedMode"], json!("on"));
    }

    #[test]
    fn string_coerces_to_integer() {
        let mut existing = isp();
        let updates = BTreeMap::from([("brightness".to_owned(), SettingValue::from("44"))]);
        apply_isp_updates(&mut existing, &updates).unwrap();
        assert_eq!(existing["brightness"], json!(44));
    }

    #[test]
    fn string_coerces_to_float_and_boolean() {
        let mut existing = isp();
        let updates = BTreeMap::from([
            ("sharpness".to_owned(), SettingValue::from("0.25")),
            ("wdr".to_owned(), SettingValue::from("false")),
        ]);
        apply_isp_updates(&mut existing, &updates).unwrap();
        assert_eq!(existing["sharpness"], json!(0.25));
        assert_eq!(existing["wdr"], json!(false));
    }

    #[test]
    fn integer_coerces_to_string_key() {
        let mut existing = isp();
        let updates = BTreeMap::from([("irLedMode".to_owned(), SettingValue::Integer(1))]);
        apply_isp_updates(&mut existing, &updates).unwrap();
        assert_eq!(existing["irLedMode"], json!("1"));
    }

    #[test]
    fn unconvertible_value_names_the_key() {
        let mut existing = isp();
        let updates = BTreeMap::from([("brightness".to_owned(), SettingValue::from("bright"))]);
        let err = apply_isp_updates(&mut existing, &updates).unwrap_err();
        match err {
            UvcError::SettingType {
                key,
                expected,
                given,
            } => {
                assert_eq!(key, "brightness");
                assert_eq!(expected, "integer");
                assert_eq!(given, "string");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unknown_key_fails_the_batch() {
        let mut existing = isp();
        let updates = BTreeMap::from([("gamma".to_owned(), SettingValue::Integer(1))]);
        let err = apply_isp_updates(&mut existing, &updates).unwrap_err();
        assert!(matches!(err, UvcError::UnknownSetting(k) if k == "gamma"));
    }

    #[test]
    fn bad_entry_leaves_valid_entries_unapplied() {
        let mut existing = isp();
        let updates = BTreeMap::from([
            ("brightness".to_owned(), SettingValue::Integer(75)),
            ("gamma".to_owned(), SettingValue::Integer(1)),
        ]);
        assert!(apply_isp_updates(&mut existing, &updates).is_err());
        // All-or-nothing: the valid brightness update must not stick.
        assert_eq!(existing["brightness"], json!(50));
    }
}

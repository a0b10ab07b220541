//! Claimed facility details: the editable record behind an approved claim.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{EnumIter, IntoStaticStr};

/// Replace every top-level `null` with `""`, leaving all other values as-is.
///
/// Form inputs bound to these fields must never receive `null`. Nested
/// objects are not traversed.
pub fn normalize_nulls(payload: Map<String, Value>) -> ClaimDetails {
    ClaimDetails(
        payload
            .into_iter()
            .map(|(key, value)| match value {
                Value::Null => (key, Value::String(String::new())),
                other => (key, other),
            })
            .collect(),
    )
}

/// Field-name → value record of an approved claim, in server order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimDetails(Map<String, Value>);

impl ClaimDetails {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn field(&self, field: ClaimField) -> Option<&Value> {
        self.0.get(field.key())
    }

    /// Overwrite (or add) one field.
    pub fn set(&mut self, field: ClaimField, value: Value) {
        self.0.insert(field.key().to_owned(), value);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// The editable fields of a claimed facility, one per field-level update event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ClaimField {
    FacilityName,
    FacilityAddress,
    FacilityPhoneNumber,
    FacilityPhoneNumberPubliclyVisible,
    FacilityWebsite,
    FacilityDescription,
    FacilityMinimumOrderQuantity,
    FacilityAverageLeadTime,
    PointOfContactPubliclyVisible,
    PointOfContactPersonName,
    PointOfContactEmail,
    OfficeInfoPubliclyVisible,
    OfficeOfficialName,
    OfficeAddress,
    OfficeCountryCode,
    OfficePhoneNumber,
}

impl ClaimField {
    /// JSON key of this field in the claim record.
    pub fn key(self) -> &'static str {
        self.into()
    }

    /// Label shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            Self::FacilityName => "Facility name",
            Self::FacilityAddress => "Address",
            Self::FacilityPhoneNumber => "Phone number",
            Self::FacilityPhoneNumberPubliclyVisible => "Phone number public",
            Self::FacilityWebsite => "Website",
            Self::FacilityDescription => "Description",
            Self::FacilityMinimumOrderQuantity => "Minimum order quantity",
            Self::FacilityAverageLeadTime => "Average lead time",
            Self::PointOfContactPubliclyVisible => "Contact public",
            Self::PointOfContactPersonName => "Contact person",
            Self::PointOfContactEmail => "Contact email",
            Self::OfficeInfoPubliclyVisible => "Office public",
            Self::OfficeOfficialName => "Office name",
            Self::OfficeAddress => "Office address",
            Self::OfficeCountryCode => "Office country",
            Self::OfficePhoneNumber => "Office phone",
        }
    }

    /// Visibility switches hold booleans; everything else is text.
    pub fn is_toggle(self) -> bool {
        matches!(
            self,
            Self::FacilityPhoneNumberPubliclyVisible
                | Self::PointOfContactPubliclyVisible
                | Self::OfficeInfoPubliclyVisible
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use strum::IntoEnumIterator;

    use super::*;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn nulls_become_empty_strings() {
        let details = normalize_nulls(map(json!({ "name": null, "phone": "555" })));
        assert_eq!(details.get("name"), Some(&json!("")));
        assert_eq!(details.get("phone"), Some(&json!("555")));
    }

    #[test]
    fn non_null_values_pass_through() {
        let payload = json!({
            "facility_name": "Mill",
            "office_info_publicly_visible": false,
            "facility_minimum_order_quantity": 0,
            "office_country_code": { "value": "BD", "label": "Bangladesh" },
            "tags": [null]
        });
        let details = normalize_nulls(map(payload.clone()));
        assert_eq!(serde_json::to_value(&details).unwrap(), payload);
    }

    #[test]
    fn nested_nulls_are_left_alone() {
        let details = normalize_nulls(map(json!({ "office": { "phone": null } })));
        assert_eq!(details.get("office"), Some(&json!({ "phone": null })));
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = normalize_nulls(map(json!({ "a": null, "b": "x", "c": true })));
        let twice = normalize_nulls(once.as_map().clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn normalization_keeps_field_order() {
        let details = normalize_nulls(map(json!({ "z": null, "a": 1, "m": null })));
        let keys: Vec<&str> = details.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn field_keys_are_snake_case() {
        assert_eq!(ClaimField::FacilityName.key(), "facility_name");
        assert_eq!(
            ClaimField::FacilityPhoneNumberPubliclyVisible.key(),
            "facility_phone_number_publicly_visible"
        );
        assert_eq!(ClaimField::OfficeCountryCode.key(), "office_country_code");
        assert_eq!(ClaimField::iter().count(), 16);
    }

    #[test]
    fn set_overwrites_a_field() {
        let mut details = normalize_nulls(map(json!({})));
        assert!(details.is_empty());
        details.set(ClaimField::FacilityName, json!("Old"));
        details.set(ClaimField::FacilityName, json!("New"));
        details.set(ClaimField::OfficeInfoPubliclyVisible, json!(true));
        assert_eq!(details.field(ClaimField::FacilityName), Some(&json!("New")));
        assert_eq!(details.len(), 2);
    }
}

//! Draft-to-wire filter serialization.

use std::str::FromStr;

use crate::catalog::{
    DeviceCategory, FieldSpec, Operator, ValueType, is_medical_speciality, normalize_option,
    operators_for,
};
use crate::filters::DraftFilter;
use crate::interfaces::queries::{
    BoolFilter, Condition, EnumFilter, IntegerFilter, SerializedFilter, StringFilter,
    TimestampFilter,
};
use crate::{Error, Result, utils};

/// Serialize a draft filter into its wire shape, validating the value
/// against the field's type.
///
/// Boolean and enum filters always compare with `EQUALS`, whatever operator
/// the draft carries. For the other types the draft's operator is used,
/// falling back to the field's default when unset.
///
/// # Errors
///
/// Fails with [`Error::IncompleteFilter`] when no field has been chosen,
/// [`Error::InvalidOperator`] when the operator is not offered for the
/// field's type, and the matching validation error when the value does not
/// parse as the field's type.
pub fn serialize(draft: &DraftFilter) -> Result<SerializedFilter> {
    let Some(field) = draft.field else {
        return Err(Error::IncompleteFilter);
    };
    let spec = field.spec();

    let condition = match spec.value_type {
        ValueType::String => Condition::StringFilter(StringFilter {
            value: draft.value.clone(),
            operator: chosen_operator(draft, &spec)?,
        }),
        ValueType::Integer => {
            let value = draft
                .value
                .trim()
                .parse::<i64>()
                .map_err(|_| Error::InvalidNumber(draft.value.clone()))?;
            Condition::IntegerFilter(IntegerFilter {
                value,
                operator: chosen_operator(draft, &spec)?,
            })
        }
        ValueType::Bool => {
            let value = match draft.value.trim() {
                "true" => true,
                "false" => false,
                other => return Err(Error::InvalidBool(other.to_string())),
            };
            Condition::BoolFilter(BoolFilter { value, operator: Operator::Equals })
        }
        ValueType::Timestamp => Condition::TimestampFilter(TimestampFilter {
            value: utils::parse_user_datetime(&draft.value)?,
            operator: chosen_operator(draft, &spec)?,
        }),
        ValueType::MedicalSpeciality => {
            let value = normalize_option(&draft.value);
            if !is_medical_speciality(&value) {
                return Err(Error::InvalidEnumValue {
                    value,
                    value_type: ValueType::MedicalSpeciality,
                });
            }
            Condition::EnumFilter(EnumFilter { value, operator: Some(Operator::Equals) })
        }
        ValueType::DeviceCategory => {
            let category = DeviceCategory::from_str(&draft.value)?;
            Condition::EnumFilter(EnumFilter {
                value: category.wire_value().to_string(),
                operator: Some(Operator::Equals),
            })
        }
    };

    Ok(SerializedFilter { field: field.wire_name(), condition })
}

/// The draft's operator or the field's default, checked against the
/// operators offered for the field's type.
fn chosen_operator(draft: &DraftFilter, spec: &FieldSpec) -> Result<Operator> {
    let operator = draft.operator.unwrap_or(spec.default_operator);
    if !operators_for(spec.value_type).contains(&operator) {
        return Err(Error::InvalidOperator { operator, value_type: spec.value_type });
    }
    Ok(operator)
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;
    use crate::catalog::Field;

    #[test]
    fn integer_filter_wire_shape() {
        let draft = DraftFilter::with(Field::UsageHours, Operator::Equals, "42");
        let filter = serialize(&draft).expect("should serialize");
        let value = serde_json::to_value(&filter).expect("should serialize");
        assert_eq!(
            value,
            json!({"field": "usage_hours", "integer_filter": {"value": 42, "operator": "EQUALS"}})
        );
    }

    // Boolean filters compare with EQUALS no matter what the draft says.
    #[test]
    fn bool_filter_forces_equals() {
        let draft = DraftFilter::with(Field::ActiveStatus, Operator::GreaterThan, "true");
        let filter = serialize(&draft).expect("should serialize");
        let value = serde_json::to_value(&filter).expect("should serialize");
        assert_eq!(
            value,
            json!({"field": "active_status", "bool_filter": {"value": true, "operator": "EQUALS"}})
        );
    }

    #[test]
    fn non_numeric_integer_rejected() {
        let draft = DraftFilter::with(Field::BatteryLevel, Operator::LessThan, "low");
        let err = serialize(&draft).expect_err("should reject");
        assert!(matches!(err, Error::InvalidNumber(value) if value == "low"));
    }

    #[test]
    fn operator_must_match_type() {
        let draft = DraftFilter::with(Field::BatteryLevel, Operator::Contains, "20");
        let err = serialize(&draft).expect_err("should reject");
        assert!(matches!(
            err,
            Error::InvalidOperator { operator: Operator::Contains, value_type: ValueType::Integer }
        ));
    }

    #[test]
    fn speciality_value_normalized_and_checked() {
        let draft = DraftFilter::with(Field::Speciality, Operator::Equals, "Sleep Medicine");
        let filter = serialize(&draft).expect("should serialize");
        let value = serde_json::to_value(&filter).expect("should serialize");
        assert_eq!(
            value,
            json!({
                "field": "speciality",
                "enum_filter": {"value": "SLEEP_MEDICINE", "operator": "EQUALS"}
            })
        );

        let bogus = DraftFilter::with(Field::Speciality, Operator::Equals, "Astrology");
        assert!(serialize(&bogus).is_err());
    }

    // Minute-precision timestamps pick up seconds and the UTC designator.
    #[test]
    fn timestamp_value_normalized() {
        let draft =
            DraftFilter::with(Field::LastSyncTime, Operator::After, "2024-03-01T08:30");
        let filter = serialize(&draft).expect("should serialize");
        let value = serde_json::to_value(&filter).expect("should serialize");
        assert_eq!(
            value,
            json!({
                "field": "last_sync_time",
                "timestamp_filter": {"value": "2024-03-01T08:30:00Z", "operator": "AFTER"}
            })
        );
    }

    #[test]
    fn fieldless_draft_rejected() {
        let err = serialize(&DraftFilter::new()).expect_err("should reject");
        assert!(matches!(err, Error::IncompleteFilter));
    }

    #[test]
    fn default_operator_used_when_unset() {
        let draft = DraftFilter {
            field: Some(Field::Manufacturer),
            value: "Acme".into(),
            operator: None,
        };
        let filter = serialize(&draft).expect("should serialize");
        let value = serde_json::to_value(&filter).expect("should serialize");
        assert_eq!(
            value,
            json!({"field": "manufacturer", "string_filter": {"value": "Acme", "operator": "EQUALS"}})
        );
    }
}

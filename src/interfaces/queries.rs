//! # Queries Interface
//!
//! The queries interface runs aggregates over device telemetry: `COUNT` and
//! `AVERAGE` are served by `POST /api/queries`, `GROUPED_COUNT` (histogram)
//! by `POST /api/queries/histogram`. A request carries the serialized filter
//! conditions, the time range, and, for aggregates over a field, the
//! target field. The category filter synthesized from the form's device
//! category selection is always the last element of the filter list; the
//! ordering only matters for log readability.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::QueryKind;
use crate::catalog::{DeviceCategory, Field, Operator};
use crate::serde::rfc3339_secs;

/// The request body expected by the query endpoints.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    /// The aggregate to compute.
    pub query_kind: QueryKind,

    /// The field aggregated over. Present for `AVERAGE` and `GROUPED_COUNT`,
    /// absent for `COUNT`.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub target_field: Option<Field>,

    /// Serialized filter conditions, category filter last.
    pub filters: Vec<SerializedFilter>,

    /// Start of the queried time range (inclusive).
    #[serde(rename = "start_time", serialize_with = "rfc3339_secs")]
    pub start_time: DateTime<Utc>,

    /// End of the queried time range (exclusive).
    #[serde(rename = "end_time", serialize_with = "rfc3339_secs")]
    pub end_time: DateTime<Utc>,
}

impl QueryRequest {
    /// The API path serving this request's query kind.
    #[must_use]
    pub const fn endpoint(&self) -> &'static str {
        match self.query_kind {
            QueryKind::Count | QueryKind::Average => "/api/queries",
            QueryKind::GroupedCount => "/api/queries/histogram",
        }
    }
}

/// One validated, wire-ready filter condition.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct SerializedFilter {
    /// The field's wire name, e.g. `battery_level`.
    pub field: String,

    /// The typed condition, keyed by value type on the wire.
    #[serde(flatten)]
    pub condition: Condition,
}

impl SerializedFilter {
    /// The category filter appended to every query's filter list.
    #[must_use]
    pub fn category(category: DeviceCategory) -> Self {
        Self {
            field: Field::Category.wire_name(),
            condition: Condition::EnumFilter(EnumFilter {
                value: category.wire_value().to_string(),
                operator: None,
            }),
        }
    }
}

/// A typed filter condition. The wire key carries the type tag
/// (`string_filter`, `integer_filter`, ...).
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// A text comparison.
    StringFilter(StringFilter),

    /// A whole-number comparison.
    IntegerFilter(IntegerFilter),

    /// A boolean equality check.
    BoolFilter(BoolFilter),

    /// A point-in-time comparison.
    TimestampFilter(TimestampFilter),

    /// An equality check against a closed option list.
    EnumFilter(EnumFilter),
}

/// Condition on a text field.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct StringFilter {
    /// The text compared against.
    pub value: String,

    /// How the comparison is made.
    pub operator: Operator,
}

/// Condition on a whole-number field.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct IntegerFilter {
    /// The number compared against.
    pub value: i64,

    /// How the comparison is made.
    pub operator: Operator,
}

/// Condition on a boolean field. The only supported comparison is equality.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct BoolFilter {
    /// The boolean compared against.
    pub value: bool,

    /// Always `EQUALS`.
    pub operator: Operator,
}

/// Condition on a timestamp field.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct TimestampFilter {
    /// The instant compared against, on the wire as RFC 3339 UTC with
    /// seconds precision.
    #[serde(serialize_with = "rfc3339_secs")]
    pub value: DateTime<Utc>,

    /// How the comparison is made.
    pub operator: Operator,
}

/// Condition on an enum field. The value is one of the closed option list in
/// normalized form.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct EnumFilter {
    /// The normalized option value, e.g. `SLEEP_MEDICINE`.
    pub value: String,

    /// Always `EQUALS` when present. The synthesized category filter omits
    /// it.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub operator: Option<Operator>,
}

/// Reply to a `COUNT` query.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct CountReply {
    /// The number of matching devices.
    pub result: u64,
}

/// Reply to an `AVERAGE` query.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct AverageReply {
    /// The average of the target field over matching devices.
    #[serde(rename = "averageResult")]
    pub average_result: f64,
}

/// Reply to a `GROUPED_COUNT` query.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct GroupedCountReply {
    /// Matching-device counts keyed by target-field value.
    pub groups: BTreeMap<String, u64>,
}

/// Any query reply, tagged by the query kind that produced it.
#[derive(Clone, Debug, PartialEq)]
pub enum QueryReply {
    /// Reply to a `COUNT` query.
    Count(CountReply),

    /// Reply to an `AVERAGE` query.
    Average(AverageReply),

    /// Reply to a `GROUPED_COUNT` query.
    GroupedCount(GroupedCountReply),
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    // The synthesized category filter serializes without an operator.
    #[test]
    fn category_filter_shape() {
        let filter = SerializedFilter::category(DeviceCategory::Wearable);
        let value = serde_json::to_value(&filter).expect("should serialize");
        assert_eq!(value, json!({"field": "category", "enum_filter": {"value": "WEARABLE"}}));
    }

    #[test]
    fn endpoint_by_kind() {
        let request = QueryRequest {
            query_kind: QueryKind::GroupedCount,
            target_field: Some(Field::FirmwareVersion),
            filters: vec![SerializedFilter::category(DeviceCategory::Portable)],
            start_time: DateTime::UNIX_EPOCH,
            end_time: DateTime::UNIX_EPOCH,
        };
        assert_eq!(request.endpoint(), "/api/queries/histogram");
    }

    #[test]
    fn average_reply_wire_name() {
        let reply: AverageReply =
            serde_json::from_value(json!({"averageResult": 12.5})).expect("should deserialize");
        assert!((reply.average_result - 12.5).abs() < f64::EPSILON);
    }
}

//! Query request builder.

use crate::catalog::{DeviceCategory, Field};
use crate::filters::{self, DraftFilter, FilterSet};
use crate::interfaces::queries::{QueryRequest, SerializedFilter};
use crate::{Error, QueryKind, Result, utils};

/// Builds a [`QueryRequest`] from form state: the device category, the draft
/// filters, the time range, and, for `AVERAGE` and `GROUPED_COUNT`, the
/// target field.
///
/// Nothing is validated until [`QueryBuilder::build`], which checks required
/// inputs, serializes every draft filter, and appends the synthesized
/// category filter as the last element.
#[derive(Clone, Debug)]
pub struct QueryBuilder {
    kind: QueryKind,
    category: Option<DeviceCategory>,
    target: Option<Field>,
    filters: FilterSet,
    start: Option<String>,
    end: Option<String>,
}

impl QueryBuilder {
    /// Returns a new [`QueryBuilder`] for the given query kind.
    #[must_use]
    pub const fn new(kind: QueryKind) -> Self {
        Self {
            kind,
            category: None,
            target: None,
            filters: FilterSet::new(),
            start: None,
            end: None,
        }
    }

    /// Specify the device category the query is scoped to. Required.
    #[must_use]
    pub const fn category(mut self, category: DeviceCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Specify the field the aggregate targets. Required for `AVERAGE` and
    /// `GROUPED_COUNT`; ignored for `COUNT`.
    #[must_use]
    pub const fn target_field(mut self, field: Field) -> Self {
        self.target = Some(field);
        self
    }

    /// Append one draft filter.
    #[must_use]
    pub fn filter(mut self, draft: DraftFilter) -> Self {
        self.filters.push(draft);
        self
    }

    /// Replace the draft filters with a form session's whole set.
    #[must_use]
    pub fn filters(mut self, filters: FilterSet) -> Self {
        self.filters = filters;
        self
    }

    /// Specify the start of the queried time range. Required. Accepts
    /// minute-precision form input (`2024-01-01T00:00`) or full RFC 3339.
    #[must_use]
    pub fn start_time(mut self, start: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self
    }

    /// Specify the end of the queried time range. Required.
    #[must_use]
    pub fn end_time(mut self, end: impl Into<String>) -> Self {
        self.end = Some(end.into());
        self
    }

    /// Assemble and validate the request.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::MissingRequiredFields`] naming every empty
    /// required input, or with the first filter's validation error. A failed
    /// build is reported once; the caller corrects the input and resubmits.
    pub fn build(self) -> Result<QueryRequest> {
        let start = self.start.as_deref().map(str::trim).filter(|s| !s.is_empty());
        let end = self.end.as_deref().map(str::trim).filter(|s| !s.is_empty());

        let mut missing = vec![];
        if self.category.is_none() {
            missing.push("device category");
        }
        if self.kind.requires_target() && self.target.is_none() {
            missing.push("target field");
        }
        if start.is_none() {
            missing.push("start time");
        }
        if end.is_none() {
            missing.push("end time");
        }
        if !missing.is_empty() {
            return Err(Error::MissingRequiredFields(missing));
        }

        // checked above
        let Some(category) = self.category else {
            return Err(Error::MissingRequiredFields(vec!["device category"]));
        };
        let (Some(start), Some(end)) = (start, end) else {
            return Err(Error::MissingRequiredFields(vec!["start time", "end time"]));
        };

        let mut serialized = Vec::with_capacity(self.filters.len() + 1);
        for draft in &self.filters {
            serialized.push(filters::serialize(draft)?);
        }
        serialized.push(SerializedFilter::category(category));

        let request = QueryRequest {
            query_kind: self.kind,
            target_field: if self.kind.requires_target() { self.target } else { None },
            filters: serialized,
            start_time: utils::parse_user_datetime(start)?,
            end_time: utils::parse_user_datetime(end)?,
        };

        #[cfg(debug_assertions)]
        crate::schema::validate(&request)?;

        Ok(request)
    }
}

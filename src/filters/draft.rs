//! Draft filter list management.

use serde::{Deserialize, Serialize};

use crate::catalog::{Field, Operator};
use crate::{Error, Result};

/// An in-progress filter edited by a query form. Unvalidated: the value is
/// whatever the user has typed so far, and field and operator are unset until
/// chosen. A draft with no field cannot be serialized.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct DraftFilter {
    /// The catalog field the filter applies to, once chosen.
    pub field: Option<Field>,

    /// The raw user input for the comparison value.
    pub value: String,

    /// The chosen comparison operator. When unset, serialization falls back
    /// to the field's default operator.
    pub operator: Option<Operator>,
}

impl DraftFilter {
    /// Create an empty draft, as a form's "Add Filter" action does.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fully specified draft in one step.
    #[must_use]
    pub fn with(field: Field, operator: Operator, value: impl Into<String>) -> Self {
        Self {
            field: Some(field),
            value: value.into(),
            operator: Some(operator),
        }
    }
}

/// A single edit to one component of a draft filter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DraftChange {
    /// Select the filter's field.
    Field(Field),

    /// Replace the filter's raw value.
    Value(String),

    /// Select the filter's operator.
    Operator(Operator),
}

/// The ordered draft filters of one form session.
///
/// Ownership is exclusive to the session that created the set; edits are
/// synchronous and strictly ordered by user interaction, so there is no
/// locking here and none is needed.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct FilterSet {
    filters: Vec<DraftFilter>,
}

impl FilterSet {
    /// Create an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self { filters: Vec::new() }
    }

    /// Append an empty draft and return its index.
    pub fn add(&mut self) -> usize {
        self.filters.push(DraftFilter::new());
        self.filters.len() - 1
    }

    /// Append an already-populated draft.
    pub fn push(&mut self, draft: DraftFilter) {
        self.filters.push(draft);
    }

    /// Apply one edit to the draft at `index`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::IndexOutOfRange`] when `index` does not refer to
    /// an entry. Indices come from rendering this same list, so treat this as
    /// a programming error.
    pub fn update(&mut self, index: usize, change: DraftChange) -> Result<()> {
        let len = self.filters.len();
        let draft =
            self.filters.get_mut(index).ok_or(Error::IndexOutOfRange { index, len })?;

        match change {
            DraftChange::Field(field) => draft.field = Some(field),
            DraftChange::Value(value) => draft.value = value,
            DraftChange::Operator(operator) => draft.operator = Some(operator),
        }

        Ok(())
    }

    /// Drop the draft at `index`, preserving the relative order of the rest.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::IndexOutOfRange`] when `index` does not refer to
    /// an entry.
    pub fn remove(&mut self, index: usize) -> Result<DraftFilter> {
        if index >= self.filters.len() {
            return Err(Error::IndexOutOfRange { index, len: self.filters.len() });
        }
        Ok(self.filters.remove(index))
    }

    /// The draft at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&DraftFilter> {
        self.filters.get(index)
    }

    /// Iterate the drafts in order.
    pub fn iter(&self) -> std::slice::Iter<'_, DraftFilter> {
        self.filters.iter()
    }

    /// The number of drafts in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Whether the set holds no drafts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl<'a> IntoIterator for &'a FilterSet {
    type IntoIter = std::slice::Iter<'a, DraftFilter>;
    type Item = &'a DraftFilter;

    fn into_iter(self) -> Self::IntoIter {
        self.filters.iter()
    }
}

impl FromIterator<DraftFilter> for FilterSet {
    fn from_iter<I: IntoIterator<Item = DraftFilter>>(iter: I) -> Self {
        Self { filters: iter.into_iter().collect() }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    // Adding then removing at the same index restores the previous state.
    #[test]
    fn add_then_remove_is_idempotent() {
        let mut set = FilterSet::new();
        set.push(DraftFilter::with(Field::Manufacturer, Operator::Equals, "Acme"));
        let before = set.clone();

        let index = set.add();
        assert_eq!(set.len(), 2);

        set.remove(index).expect("should remove");
        assert_eq!(set, before);
    }

    #[test]
    fn update_edits_one_component() {
        let mut set = FilterSet::new();
        let index = set.add();

        set.update(index, DraftChange::Field(Field::BatteryLevel)).expect("should update");
        set.update(index, DraftChange::Value("20".into())).expect("should update");
        set.update(index, DraftChange::Operator(Operator::LessThan)).expect("should update");

        let draft = set.get(index).expect("should exist");
        assert_eq!(draft.field, Some(Field::BatteryLevel));
        assert_eq!(draft.value, "20");
        assert_eq!(draft.operator, Some(Operator::LessThan));
    }

    #[test]
    fn update_out_of_range() {
        let mut set = FilterSet::new();
        let err = set
            .update(3, DraftChange::Value("x".into()))
            .expect_err("should be out of range");
        assert!(matches!(err, Error::IndexOutOfRange { index: 3, len: 0 }));
    }

    #[test]
    fn remove_preserves_order() {
        let mut set = FilterSet::new();
        set.push(DraftFilter::with(Field::Hospital, Operator::Equals, "a"));
        set.push(DraftFilter::with(Field::Model, Operator::Equals, "b"));
        set.push(DraftFilter::with(Field::DeviceType, Operator::Equals, "c"));

        set.remove(1).expect("should remove");

        let fields: Vec<_> = set.iter().filter_map(|draft| draft.field).collect();
        assert_eq!(fields, vec![Field::Hospital, Field::DeviceType]);
    }
}

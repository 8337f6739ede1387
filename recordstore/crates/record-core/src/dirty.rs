//! Field bag with change tracking.

use std::collections::BTreeMap;

/// String-valued fields keyed by `K`, remembering which ones were written.
///
/// The changed set holds the exact value last written for each field, not a
/// diff against the loaded state. Writing a field back to its original value
/// therefore still marks it as changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirtyTracked<K: Ord> {
    data: BTreeMap<K, String>,
    changed: BTreeMap<K, String>,
}

impl<K: Ord> Default for DirtyTracked<K> {
    fn default() -> Self {
        Self {
            data: BTreeMap::new(),
            changed: BTreeMap::new(),
        }
    }
}

impl<K: Ord + Copy> DirtyTracked<K> {
    /// Create an empty, clean field bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of `field`, or `""` when it was never set.
    #[must_use]
    pub fn get(&self, field: K) -> &str {
        self.data.get(&field).map_or("", String::as_str)
    }

    /// Store `value` under `field` and mark the field as changed.
    pub fn set(&mut self, field: K, value: impl Into<String>) {
        let stored: String = value.into();
        self.changed.insert(field, stored.clone());
        self.data.insert(field, stored);
    }

    /// Whether any field was written since the last checkpoint.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        !self.changed.is_empty()
    }

    /// Fields written since the last checkpoint with their latest values.
    #[must_use]
    pub const fn changed_fields(&self) -> &BTreeMap<K, String> {
        &self.changed
    }

    /// Every field currently held.
    #[must_use]
    pub const fn data(&self) -> &BTreeMap<K, String> {
        &self.data
    }

    /// Forget pending changes without touching the values.
    pub fn mark_clean(&mut self) {
        self.changed.clear();
    }

    /// Replace every field with `fields` and mark the bag clean.
    pub fn hydrate(&mut self, fields: impl IntoIterator<Item = (K, String)>) {
        self.data = fields.into_iter().collect();
        self.changed.clear();
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for change tracking.

    use super::*;
    use rstest::{fixture, rstest};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    enum Field {
        Name,
        Colour,
        Size,
    }

    #[fixture]
    fn clean_bag() -> DirtyTracked<Field> {
        let mut bag = DirtyTracked::new();
        bag.hydrate([
            (Field::Name, "widget".to_owned()),
            (Field::Colour, "red".to_owned()),
        ]);
        bag
    }

    #[rstest]
    fn unset_fields_read_as_empty(clean_bag: DirtyTracked<Field>) {
        assert_eq!(clean_bag.get(Field::Size), "");
        assert_eq!(clean_bag.get(Field::Name), "widget");
    }

    #[rstest]
    fn changed_set_tracks_latest_writes(mut clean_bag: DirtyTracked<Field>) {
        clean_bag.set(Field::Colour, "blue");
        clean_bag.set(Field::Size, "L");
        clean_bag.set(Field::Colour, "green");

        assert!(clean_bag.is_dirty());
        let expected = BTreeMap::from([
            (Field::Colour, "green".to_owned()),
            (Field::Size, "L".to_owned()),
        ]);
        assert_eq!(clean_bag.changed_fields(), &expected);
        assert_eq!(clean_bag.get(Field::Colour), "green");
    }

    #[rstest]
    fn rewriting_the_same_value_still_counts(mut clean_bag: DirtyTracked<Field>) {
        clean_bag.set(Field::Name, "widget");
        assert_eq!(
            clean_bag.changed_fields().get(&Field::Name).map(String::as_str),
            Some("widget")
        );
    }

    #[rstest]
    fn mark_clean_keeps_values(mut clean_bag: DirtyTracked<Field>) {
        clean_bag.set(Field::Size, "S");
        clean_bag.mark_clean();

        assert!(!clean_bag.is_dirty());
        assert!(clean_bag.changed_fields().is_empty());
        assert_eq!(clean_bag.get(Field::Size), "S");
    }

    #[rstest]
    fn hydrate_replaces_fields_and_clears_dirt(mut clean_bag: DirtyTracked<Field>) {
        clean_bag.set(Field::Size, "M");
        clean_bag.hydrate([(Field::Name, "gadget".to_owned())]);

        assert!(!clean_bag.is_dirty());
        assert_eq!(clean_bag.get(Field::Name), "gadget");
        assert_eq!(clean_bag.get(Field::Colour), "");
        assert_eq!(clean_bag.data().len(), 1);
    }
}

//! Recipient selection set.

use std::collections::BTreeSet;

/// The recipient ids chosen for one delivery.
///
/// Order of selection is irrelevant; ids are kept sorted so the serialised
/// form is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: BTreeSet<i64>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `id`. Returns whether `id` is selected afterwards.
    pub fn toggle(&mut self, id: i64) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn contains(&self, id: i64) -> bool {
        self.ids.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.ids.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<i64> {
        self.iter().collect()
    }

    /// Comma-joined ids, as used in the navigation query string.
    pub fn join(&self) -> String {
        self.iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl FromIterator<i64> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_twice_restores_the_set() {
        let mut set: SelectionSet = [1, 5].into_iter().collect();
        let before = set.clone();

        assert!(set.toggle(3));
        assert!(!set.toggle(3));
        assert_eq!(set, before);

        assert!(!set.toggle(5));
        assert!(set.toggle(5));
        assert_eq!(set, before);
    }

    #[test]
    fn joins_in_ascending_order() {
        let mut set = SelectionSet::new();
        set.toggle(12);
        set.toggle(3);
        set.toggle(7);
        assert_eq!(set.join(), "3,7,12");
        assert_eq!(set.len(), 3);
        assert_eq!(SelectionSet::new().join(), "");
    }
}

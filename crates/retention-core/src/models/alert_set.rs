use serde::Serialize;

use super::alert::AlertRecord;

/// A complete alert snapshot as delivered by either channel. Never a diff.
///
/// Order is the order the records were received in; duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AlertSet {
    records: Vec<AlertRecord>,
}

impl AlertSet {
    pub fn new(records: Vec<AlertRecord>) -> Self {
        Self { records }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[AlertRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AlertRecord> {
        self.records.iter()
    }
}

impl From<Vec<AlertRecord>> for AlertSet {
    fn from(records: Vec<AlertRecord>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<AlertRecord> for AlertSet {
    fn from_iter<T: IntoIterator<Item = AlertRecord>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a AlertSet {
    type Item = &'a AlertRecord;
    type IntoIter = std::slice::Iter<'a, AlertRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

use std::fmt;

/// An ordered `label -> value` mapping.
///
/// Entries iterate in first-seen order. Inserting a label that
/// is already present replaces the value in place -- the entry
/// keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataRecord {
    entries : Vec<(String, String)>,
}

impl MetadataRecord {
    pub fn new() -> Self {
        MetadataRecord::default()
    }

    /// Inserts `label -> value`, overwriting the value of an
    /// existing entry with the same label.
    pub fn insert<L : Into<String>, V : Into<String>>(&mut self, label : L, value : V) {
        let label = label.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == label) {
            Some((_, old)) => *old = value,
            None => self.entries.push((label, value)),
        }
    }

    /// Merges `other` into `self`. Values from `other` win on
    /// label collisions, new labels are appended in `other`'s order.
    ///
    /// ## Example
    ///
    /// ```
    /// use feimeta::MetadataRecord;
    ///
    /// let mut xml : MetadataRecord = [("A", "1"), ("B", "2")].into_iter().collect();
    /// let image : MetadataRecord = [("B", "3"), ("C", "4")].into_iter().collect();
    /// xml.merge(image);
    /// assert_eq!(xml.to_string(), "A: 1\nB: 3\nC: 4\n");
    /// ```
    pub fn merge(&mut self, other : MetadataRecord) {
        for (label, value) in other {
            self.insert(label, value);
        }
    }

    pub fn get(&self, label : &str) -> Option<&str> {
        self.entries.iter()
            .find(|(existing, _)| existing == label)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(label, value)| (label.as_str(), value.as_str()))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(label, _)| label.as_str())
    }
}

/// One `Label: Value` line per entry, each newline-terminated.
/// This is exactly what goes into the report files.
impl fmt::Display for MetadataRecord {
    fn fmt(&self, f : &mut fmt::Formatter) -> fmt::Result {
        for (label, value) in self.iter() {
            writeln!(f, "{}: {}", label, value)?;
        }
        Ok(())
    }
}

impl<L : Into<String>, V : Into<String>> FromIterator<(L, V)> for MetadataRecord {
    fn from_iter<I : IntoIterator<Item = (L, V)>>(iter : I) -> Self {
        let mut record = MetadataRecord::new();
        for (label, value) in iter {
            record.insert(label, value);
        }
        record
    }
}

impl IntoIterator for MetadataRecord {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

use std::collections::{BTreeMap, BTreeSet};

/// Discovered reverse names keyed by rendered address.
///
/// Both levels are ordered, so iteration already follows the report order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultMap {
    entries: BTreeMap<String, BTreeSet<String>>,
}

impl ResultMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Union `names` into the entry for `address`.
    pub fn insert<I, S>(&mut self, address: impl Into<String>, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries
            .entry(address.into())
            .or_default()
            .extend(names.into_iter().map(Into::into));
    }

    pub fn merge(&mut self, other: ResultMap) {
        for (address, names) in other.entries {
            self.entries.entry(address).or_default().extend(names);
        }
    }

    pub fn get(&self, address: &str) -> Option<&BTreeSet<String>> {
        self.entries.get(address)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<String>)> {
        self.entries.iter()
    }

    /// Report lines: `<address> <name> <name> ...`, sorted by address.
    pub fn report_lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(address, names)| {
                let joined: Vec<&str> = names.iter().map(String::as_str).collect();
                format!("{} {}", address, joined.join(" "))
            })
            .collect()
    }
}

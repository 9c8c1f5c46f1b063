use std::collections::BTreeMap;

/// E.164 caps a full number at 15 digits.
pub const MAX_PREFIX_DIGITS: usize = 15;

/// Digit-prefix table; lookups return the value of the longest matching prefix.
#[derive(Debug, Clone)]
pub struct PrefixMap<V> {
    entries: BTreeMap<String, V>,
    longest: usize,
}

impl<V> Default for PrefixMap<V> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            longest: 0,
        }
    }
}

impl<V> PrefixMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid_prefix(prefix: &str) -> bool {
        !prefix.is_empty()
            && prefix.len() <= MAX_PREFIX_DIGITS
            && prefix.bytes().all(|b| b.is_ascii_digit())
    }

    /// Returns the previous value when the prefix was already present.
    pub fn insert(&mut self, prefix: impl Into<String>, value: V) -> Option<V> {
        let prefix = prefix.into();
        self.longest = self.longest.max(prefix.len());
        self.entries.insert(prefix, value)
    }

    pub fn longest_match(&self, digits: &str) -> Option<&V> {
        let max_len = self.longest.min(digits.len());
        (1..=max_len)
            .rev()
            .filter_map(|len| digits.get(..len))
            .find_map(|prefix| self.entries.get(prefix))
    }

    pub fn extend(&mut self, other: PrefixMap<V>) {
        for (prefix, value) in other.entries {
            self.insert(prefix, value);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

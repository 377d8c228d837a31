use indexmap::IndexSet;

/// Character used both to split raw text into tags and to join tags into the field value
pub const DELIMITER: char = ',';

/// Parse tags from a delimiter-separated string
/// Returns trimmed, non-empty segments in the order they appear (duplicates included)
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(DELIMITER)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

/// Join tags with the delimiter, producing the serialized field value
pub fn join_tags<I, S>(tags: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for (i, tag) in tags.into_iter().enumerate() {
        if i > 0 {
            out.push(DELIMITER);
        }
        out.push_str(tag.as_ref());
    }
    out
}

/// Ordered collection of unique tags
///
/// Insertion order is kept for rendering and serialization. Every member is
/// trimmed, non-empty and free of the delimiter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: IndexSet<String>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from raw delimited text
    pub fn from_raw(raw: &str) -> Self {
        let mut set = Self::new();
        set.extend_from_raw(raw);
        set
    }

    /// Split `raw` and append every segment not already present
    /// Returns the number of tags actually inserted
    pub fn extend_from_raw(&mut self, raw: &str) -> usize {
        let mut inserted = 0;
        for tag in parse_tags(raw) {
            if self.tags.insert(tag) {
                inserted += 1;
            }
        }
        inserted
    }

    /// Remove a tag by exact match, keeping the order of the rest
    pub fn remove(&mut self, tag: &str) -> bool {
        self.tags.shift_remove(tag)
    }

    /// Remove and return the most recently inserted tag
    pub fn pop(&mut self) -> Option<String> {
        self.tags.pop()
    }

    pub fn clear(&mut self) {
        self.tags.clear();
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(|s| s.as_str())
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.tags.iter().cloned().collect()
    }

    /// The delimiter-joined form written to the form field
    pub fn serialize(&self) -> String {
        join_tags(self.tags.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_drops_empty_segments_and_whitespace() {
        assert_eq!(parse_tags(" x , y ,,z "), vec!["x", "y", "z"]);
        assert!(parse_tags("").is_empty());
        assert!(parse_tags(" , ,\t,").is_empty());
    }

    #[test]
    fn extend_is_idempotent() {
        let mut set = TagSet::new();
        assert_eq!(set.extend_from_raw("a,b"), 2);
        let snapshot = set.clone();
        assert_eq!(set.extend_from_raw("a,b"), 0);
        assert_eq!(set, snapshot);
    }

    #[test]
    fn duplicates_collapse_to_one() {
        let set = TagSet::from_raw("a,a,a");
        assert_eq!(set.to_vec(), vec!["a"]);
    }

    #[test]
    fn insertion_order_is_kept() {
        let set = TagSet::from_raw("b,a,c");
        assert_eq!(set.to_vec(), vec!["b", "a", "c"]);
        assert_eq!(set.serialize(), "b,a,c");
    }

    #[test]
    fn equality_is_case_sensitive() {
        let set = TagSet::from_raw("Rust,rust, rust ");
        assert_eq!(set.to_vec(), vec!["Rust", "rust"]);
    }

    #[test]
    fn remove_keeps_survivor_order() {
        let mut set = TagSet::from_raw("a,b,c");
        assert!(set.remove("b"));
        assert_eq!(set.to_vec(), vec!["a", "c"]);
        assert!(!set.remove("b"));
        assert!(!set.remove("nonexistent"));
    }

    #[test]
    fn pop_takes_last_inserted() {
        let mut set = TagSet::from_raw("a,b");
        set.extend_from_raw("c");
        set.remove("c");
        assert_eq!(set.pop().as_deref(), Some("b"));
        assert_eq!(set.to_vec(), vec!["a"]);
        assert_eq!(set.pop().as_deref(), Some("a"));
        assert_eq!(set.pop(), None);
    }

    #[test]
    fn join_handles_empty_and_single() {
        assert_eq!(join_tags(Vec::<String>::new()), "");
        assert_eq!(join_tags(["solo"]), "solo");
        assert_eq!(join_tags(["a", "b"]), "a,b");
    }
}

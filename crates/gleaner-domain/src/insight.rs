//! Per-document insight text

/// Insight text for one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInsight {
    /// Document name (unique within a [`FileInsights`] mapping)
    pub name: String,

    /// Ordered concatenation of the document's successful segment results
    pub text: String,
}

/// Ordered mapping of document name to insight text
///
/// Keys are unique and iteration follows first-insertion (upload) order.
/// Inserting an existing key replaces its text but keeps its position.
///
/// # Examples
///
/// ```
/// use gleaner_domain::FileInsights;
///
/// let mut insights = FileInsights::new();
/// insights.insert("b.txt", "Y");
/// insights.insert("a.txt", "X");
/// insights.insert("b.txt", "Z");
///
/// let names: Vec<_> = insights.iter().map(|i| i.name.as_str()).collect();
/// assert_eq!(names, vec!["b.txt", "a.txt"]);
/// assert_eq!(insights.get("b.txt"), Some("Z"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileInsights {
    entries: Vec<FileInsight>,
}

impl FileInsights {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the insight for `name`
    ///
    /// Returns the previous text when the key already existed.
    pub fn insert(&mut self, name: impl Into<String>, text: impl Into<String>) -> Option<String> {
        let name = name.into();
        let text = text.into();

        match self.entries.iter_mut().find(|entry| entry.name == name) {
            Some(entry) => Some(std::mem::replace(&mut entry.text, text)),
            None => {
                self.entries.push(FileInsight { name, text });
                None
            }
        }
    }

    /// Insight text for `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.text.as_str())
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &FileInsight> {
        self.entries.iter()
    }

    /// Insight texts in insertion order
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.text.as_str())
    }

    /// Number of documents
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no document has been recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a FileInsights {
    type Item = &'a FileInsight;
    type IntoIter = std::slice::Iter<'a, FileInsight>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for FileInsights
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut insights = FileInsights::new();
        for (name, text) in iter {
            insights.insert(name, text);
        }
        insights
    }
}

use anyhow::{Context, Result, bail};
use std::collections::HashMap;
use std::path::Path;

/// Teacher's comments keyed by student name.
///
/// Stored as a plain JSON object on disk:
/// ```json
/// {
///   "Ada Obi": "An excellent term. Keep it up.",
///   "Tunde Bello": "Needs to attend revision classes."
/// }
/// ```
///
/// Names that differ only in letter case are rejected so the
/// case-insensitive lookup always has a single answer.
#[derive(Debug, Default)]
pub struct CommentBook {
    entries: HashMap<String, String>,
    // lowercased name -> key in `entries`
    folded: HashMap<String, String>,
}

impl CommentBook {
    /// Loads the comments from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read comments file {}", path.display()))?;
        let entries: HashMap<String, String> = serde_json::from_str(&content)
            .with_context(|| format!("invalid comments file {}", path.display()))?;
        Self::from_entries(entries)
            .with_context(|| format!("invalid comments file {}", path.display()))
    }

    /// # Errors
    ///
    /// Fails when two names are equal ignoring case but not identical.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, String)>) -> Result<Self> {
        let mut book = Self::default();

        for (name, comment) in entries {
            let key = name.to_lowercase();
            match book.folded.get(&key) {
                Some(existing) if *existing != name => {
                    bail!("comment names {existing:?} and {name:?} differ only in case");
                }
                Some(_) => {}
                None => {
                    book.folded.insert(key, name.clone());
                }
            }
            book.entries.insert(name, comment);
        }

        Ok(book)
    }

    /// Returns the comment for `name`, preferring an exact match and
    /// falling back to a case-insensitive one.
    pub fn comment_for(&self, name: &str) -> Option<&str> {
        self.entries
            .get(name)
            .or_else(|| {
                self.folded
                    .get(&name.to_lowercase())
                    .and_then(|key| self.entries.get(key))
            })
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

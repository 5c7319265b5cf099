//! Diagnostic notes attached to a variant.

/// An ordered list of human-readable diagnostic notes.
///
/// Notes are stored oldest first. Renderings list them most recent first
/// (see [`Notes::recent_first`]).
///
/// # Examples
///
/// ```rust
/// use fonad::Notes;
///
/// let mut notes = Notes::new();
/// notes.add("opened connection");
/// notes.add("inserted document");
/// notes.prepend("started");
///
/// assert_eq!(notes.as_slice(), ["started", "opened connection", "inserted document"]);
/// assert_eq!(notes.recent_first().next().map(String::as_str), Some("inserted document"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Notes(Vec<String>);

impl Notes {
    /// Creates an empty list.
    #[inline]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a note.
    pub fn add(&mut self, note: impl Into<String>) {
        self.0.push(note.into());
    }

    /// Inserts a note at the front.
    pub fn prepend(&mut self, note: impl Into<String>) {
        self.0.insert(0, note.into());
    }

    /// Replaces every note.
    pub fn replace<I, S>(&mut self, notes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0 = notes.into_iter().map(Into::into).collect();
    }

    /// Places `older` in front of the current notes.
    pub fn inherit(&mut self, older: Self) {
        let newer = std::mem::replace(&mut self.0, older.0);
        self.0.extend(newer);
    }

    /// Removes and returns every note.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    /// The notes, oldest first.
    #[inline]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// The notes, most recent first.
    pub fn recent_first(&self) -> impl Iterator<Item = &String> {
        self.0.iter().rev()
    }

    /// The most recently added note.
    pub fn latest(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Returns `true` if there are no notes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The number of notes.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<S: Into<String>> FromIterator<S> for Notes {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>> Extend<S> for Notes {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(Into::into));
    }
}

impl IntoIterator for Notes {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

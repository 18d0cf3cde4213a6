//! HTTP Header types

use serde::{Deserialize, Serialize};

/// A single HTTP header with name and value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// The header name (e.g., "Content-Type")
    pub name: String,
    /// The header value (e.g., "application/json")
    pub value: String,
}

impl Header {
    /// Creates a new header.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Returns true if this header has the given name, ignoring ASCII case.
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// A flat name to value header mapping.
///
/// Names are unique ignoring ASCII case, except for `Set-Cookie` lines added
/// through [`append`](Self::append). Setting an existing name replaces the
/// stored entry. Insertion order is kept for stable output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Headers {
    items: Vec<Header>,
}

impl Headers {
    /// Creates an empty header collection.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Sets a header, replacing any entry with the same name.
    pub fn set(&mut self, header: Header) {
        match self.items.iter_mut().find(|h| h.is_named(&header.name)) {
            Some(existing) => *existing = header,
            None => self.items.push(header),
        }
    }

    /// Adds a received header, keeping earlier values for the same name.
    ///
    /// Repeated values are joined with `", "`. `Set-Cookie` cannot be joined
    /// that way, so each line is kept as its own entry.
    pub fn append(&mut self, header: Header) {
        if header.is_named("set-cookie") {
            self.items.push(header);
            return;
        }
        match self.items.iter_mut().find(|h| h.is_named(&header.name)) {
            Some(existing) => {
                existing.value.push_str(", ");
                existing.value.push_str(&header.value);
            }
            None => self.items.push(header),
        }
    }

    /// Every value stored under a name, in arrival order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.items
            .iter()
            .filter(move |h| h.is_named(name))
            .map(|h| h.value.as_str())
    }

    /// Looks up a header value by name, ignoring ASCII case.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|h| h.is_named(name))
            .map(|h| h.value.as_str())
    }

    /// Returns true if a header with the given name is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns a new mapping where entries of `self` win over `defaults`.
    #[must_use]
    pub fn merged_over(&self, defaults: &Self) -> Self {
        let mut merged = defaults.clone();
        for header in &self.items {
            merged.set(header.clone());
        }
        merged
    }

    /// Returns an iterator over the headers.
    pub fn iter(&self) -> impl Iterator<Item = &Header> {
        self.items.iter()
    }

    /// Returns the number of headers.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Vec::len is not const in stable
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there are no headers.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Vec::is_empty is not const in stable
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<Header> for Headers {
    fn from_iter<T: IntoIterator<Item = Header>>(iter: T) -> Self {
        let mut headers = Self::new();
        for header in iter {
            headers.set(header);
        }
        headers
    }
}

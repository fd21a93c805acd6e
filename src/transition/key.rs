// SPDX-License-Identifier: MPL-2.0
//! Transition key codec.
//!
//! A key binds a content identifier to its list position:
//!
//! ```text
//! <escaped identifier>#<position>
//! ```
//!
//! Inside the identifier `\` is written as `\\` and `#` as `\#`, so the
//! first unescaped `#` always separates the two halves and any identifier
//! round-trips.

use std::fmt;

const SEPARATOR: char = '#';
const ESCAPE: char = '\\';

/// Opaque name shared by the list and the viewer for one element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransitionKey(String);

impl TransitionKey {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for TransitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<TransitionKey> for String {
    fn from(key: TransitionKey) -> Self {
        key.0
    }
}

/// Position and content identifier recovered from a [`TransitionKey`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransitionBinding {
    pub position: usize,
    pub content_identifier: String,
}

impl TransitionBinding {
    #[must_use]
    pub fn new(position: usize, content_identifier: impl Into<String>) -> Self {
        Self {
            position,
            content_identifier: content_identifier.into(),
        }
    }

    #[must_use]
    pub fn key(&self) -> TransitionKey {
        encode(self.position, &self.content_identifier)
    }
}

/// A transition key that does not parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionKeyError {
    /// No unescaped separator in the key.
    MissingSeparator,
    /// The text after the separator is not a position.
    InvalidPosition(String),
    /// A backslash not followed by `\` or `#`.
    InvalidEscape,
}

impl fmt::Display for TransitionKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionKeyError::MissingSeparator => write!(f, "missing '#' separator"),
            TransitionKeyError::InvalidPosition(raw) => write!(f, "invalid position: {raw:?}"),
            TransitionKeyError::InvalidEscape => write!(f, "invalid escape sequence"),
        }
    }
}

impl std::error::Error for TransitionKeyError {}

/// Builds the key for the element at `position` showing `content_identifier`.
#[must_use]
pub fn encode(position: usize, content_identifier: &str) -> TransitionKey {
    let mut key = String::with_capacity(content_identifier.len() + 8);
    for ch in content_identifier.chars() {
        if ch == SEPARATOR || ch == ESCAPE {
            key.push(ESCAPE);
        }
        key.push(ch);
    }
    key.push(SEPARATOR);
    key.push_str(&position.to_string());
    TransitionKey(key)
}

/// Parses a key produced by [`encode`].
///
/// # Errors
///
/// Returns a [`TransitionKeyError`] if the key is not `identifier#position`.
pub fn decode(key: &str) -> Result<TransitionBinding, TransitionKeyError> {
    let mut identifier = String::with_capacity(key.len());
    let mut chars = key.char_indices();
    let position_start = loop {
        match chars.next() {
            None => return Err(TransitionKeyError::MissingSeparator),
            Some((_, ESCAPE)) => match chars.next() {
                Some((_, ch)) if ch == ESCAPE || ch == SEPARATOR => identifier.push(ch),
                _ => return Err(TransitionKeyError::InvalidEscape),
            },
            Some((index, SEPARATOR)) => break index + SEPARATOR.len_utf8(),
            Some((_, ch)) => identifier.push(ch),
        }
    };

    let raw = &key[position_start..];
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TransitionKeyError::InvalidPosition(raw.to_string()));
    }
    let position = raw
        .parse::<usize>()
        .map_err(|_| TransitionKeyError::InvalidPosition(raw.to_string()))?;

    Ok(TransitionBinding {
        position,
        content_identifier: identifier,
    })
}

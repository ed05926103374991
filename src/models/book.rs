//! Book (catalog record) model and related types

use std::fmt;

use serde::{
    de::{IgnoredAny, MapAccess, Visitor},
    Deserialize, Deserializer, Serialize,
};
use utoipa::{IntoParams, ToSchema};

/// Book identifier, assigned by the catalog starting at 1
pub type BookId = i64;

/// A catalog record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    /// Identifier assigned on creation; never changes
    #[schema(value_type = i64)]
    pub id: BookId,
    pub title: String,
    pub author: String,
    /// Publication year
    pub year: i64,
    /// Whether the book is currently borrowed
    #[serde(default)]
    pub borrowed: bool,
}

impl Book {
    pub fn new(id: BookId, input: BookInput) -> Self {
        Self {
            id,
            title: input.title,
            author: input.author,
            year: input.year,
            borrowed: false,
        }
    }

    /// Overwrite the bibliographic fields, keeping `id` and `borrowed`
    pub fn apply(&mut self, input: BookInput) {
        self.title = input.title;
        self.author = input.author;
        self.year = input.year;
    }
}

/// Body accepted by add and update.
///
/// Decoding is structural only: absent fields fall back to empty/zero and
/// any `id` or `borrowed` sent by the client is ignored. Field names match
/// case-insensitively, a repeated field keeps its last value and an explicit
/// `null` leaves the field at its default.
#[derive(Debug, Clone, Default, PartialEq, Eq, ToSchema)]
pub struct BookInput {
    pub title: String,
    pub author: String,
    pub year: i64,
}

impl<'de> Deserialize<'de> for BookInput {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(BookInputVisitor)
    }
}

struct BookInputVisitor;

impl<'de> Visitor<'de> for BookInputVisitor {
    type Value = BookInput;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a book object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<BookInput, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut input = BookInput::default();

        while let Some(key) = map.next_key::<String>()? {
            if key.eq_ignore_ascii_case("title") {
                if let Some(title) = map.next_value()? {
                    input.title = title;
                }
            } else if key.eq_ignore_ascii_case("author") {
                if let Some(author) = map.next_value()? {
                    input.author = author;
                }
            } else if key.eq_ignore_ascii_case("year") {
                if let Some(year) = map.next_value()? {
                    input.year = year;
                }
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }

        Ok(input)
    }
}

/// `?id=N` query parameter
#[derive(Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookIdQuery {
    /// Book ID
    pub id: Option<String>,
}

impl BookIdQuery {
    /// Keep the first `id` pair of a decoded query string; later ones are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            id: pairs
                .into_iter()
                .find(|(key, _)| key == "id")
                .map(|(_, value)| value),
        }
    }

    /// Parsed identifier. Missing or non-numeric values map to 0, which the
    /// catalog never assigns, so the lookup ends in a 404.
    pub fn book_id(&self) -> BookId {
        self.id
            .as_deref()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(0)
    }
}

/// Confirmation body for operations that return no record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

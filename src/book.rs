//! The book record and its request-body decoding.

use std::fmt;

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

/// A catalogue entry. `id` is the identity; the other fields are free text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Book {
    pub id: String,
    pub name: String,
    pub author: String,
}

impl Book {
    pub fn new(id: impl Into<String>, name: impl Into<String>, author: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into(), author: author.into() }
    }
}

/// Reads a book from a JSON object or `null`.
///
/// Keys match case-insensitively and a repeated key overwrites the earlier
/// value. Absent keys, `null` values and a `null` document leave fields
/// empty; unknown keys are skipped.
impl<'de> Deserialize<'de> for Book {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(BookVisitor)
    }
}

struct BookVisitor;

impl<'de> Visitor<'de> for BookVisitor {
    type Value = Book;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a book object")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Book, E> {
        Ok(Book::default())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Book, A::Error> {
        let mut book = Book::default();
        while let Some(key) = map.next_key::<String>()? {
            let slot = if key.eq_ignore_ascii_case("id") {
                &mut book.id
            } else if key.eq_ignore_ascii_case("name") {
                &mut book.name
            } else if key.eq_ignore_ascii_case("author") {
                &mut book.author
            } else {
                map.next_value::<IgnoredAny>()?;
                continue;
            };
            if let Some(value) = map.next_value::<Option<String>>()? {
                *slot = value;
            }
        }
        Ok(book)
    }
}

/// Why a request body could not be read as a [`Book`].
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("request body is empty")]
    Empty,

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("reading request body: {0}")]
    Body(#[from] hyper::Error),
}

/// Decodes the first JSON value in `body` as a [`Book`].
///
/// Absent fields become empty strings, unknown fields are skipped and
/// anything after the first value is left unread. See the [`Book`]
/// `Deserialize` impl for key matching.
pub fn decode(body: &[u8]) -> Result<Book, DecodeError> {
    serde_json::Deserializer::from_slice(body)
        .into_iter::<Book>()
        .next()
        .ok_or(DecodeError::Empty)?
        .map_err(DecodeError::from)
}

//! The uniform JSON response body.
//!
//! Every book route answers with
//!
//! ```json
//! {"Message": <payload or null>, "Error": "<message or empty>"}
//! ```
//!
//! Both keys are always written. Internally the two cases are distinct
//! variants so a handler cannot fill both.

use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;
use tracing::error;

use crate::book::Book;
use crate::response::{IntoResponse, Response};
use crate::status::Status;

/// What a successful response carries in `Message`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Text(String),
    Book(Book),
    Books(Vec<Book>),
}

impl From<String> for Payload {
    fn from(s: String) -> Self { Self::Text(s) }
}

impl From<Book> for Payload {
    fn from(b: Book) -> Self { Self::Book(b) }
}

impl From<Vec<Book>> for Payload {
    fn from(v: Vec<Book>) -> Self { Self::Books(v) }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Envelope {
    Message(Payload),
    Error(String),
}

impl Envelope {
    pub fn message(payload: impl Into<Payload>) -> Self {
        Self::Message(payload.into())
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self::Error(msg.into())
    }

    /// Serializes into a JSON response with the given status.
    pub fn respond(self, status: Status) -> Response {
        match serde_json::to_vec(&self) {
            Ok(body) => Response::builder().status(status).json(body),
            Err(e) => {
                error!("envelope serialization failed: {e}");
                Response::status(Status::InternalServerError)
            }
        }
    }
}

impl Serialize for Envelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Envelope", 2)?;
        match self {
            Self::Message(payload) => {
                s.serialize_field("Message", payload)?;
                s.serialize_field("Error", "")?;
            }
            Self::Error(msg) => {
                s.serialize_field("Message", &None::<Payload>)?;
                s.serialize_field("Error", msg)?;
            }
        }
        s.end()
    }
}

/// `200 OK` for messages. Errors need a status, so use [`Envelope::respond`].
impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        self.respond(Status::Ok)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn to_value(e: &Envelope) -> serde_json::Value {
        serde_json::to_value(e).unwrap()
    }

    #[test]
    fn text_message_has_empty_error() {
        let e = Envelope::message("hi".to_owned());
        assert_eq!(to_value(&e), json!({"Message": "hi", "Error": ""}));
    }

    #[test]
    fn error_has_null_message() {
        let e = Envelope::error("Book with Id:1 not found!");
        assert_eq!(
            to_value(&e),
            json!({"Message": null, "Error": "Book with Id:1 not found!"})
        );
    }

    #[test]
    fn book_and_list_payloads_serialize_inline() {
        let dune = Book::new("1", "Dune", "Herbert");
        assert_eq!(
            to_value(&Envelope::message(dune.clone()))["Message"],
            json!({"id": "1", "name": "Dune", "author": "Herbert"})
        );
        assert_eq!(
            to_value(&Envelope::message(Vec::<Book>::new())),
            json!({"Message": [], "Error": ""})
        );
        assert_eq!(
            to_value(&Envelope::message(vec![dune]))["Message"][0]["id"],
            "1"
        );
    }

    #[test]
    fn respond_sets_status_and_content_type() {
        let res = Envelope::error("nope").respond(Status::Conflict);
        assert_eq!(res.status_code(), Status::Conflict);
        assert_eq!(res.header("content-type"), Some("application/json"));
    }
}

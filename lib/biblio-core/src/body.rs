//! JSON body serialization utilities.

use bytes::Bytes;

use crate::Result;

/// Serialize a value to JSON bytes.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Example
///
/// ```
/// use biblio_core::to_json;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Draft { title: String }
///
/// let draft = Draft { title: "Dune".to_string() };
/// let bytes = to_json(&draft).expect("serialize");
/// assert_eq!(bytes.as_ref(), br#"{"title":"Dune"}"#);
/// ```
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<Bytes> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(Into::into)
}

/// Deserialize JSON bytes to a value with path-aware error messages.
///
/// Uses `serde_path_to_error` so failures name the exact field that refused
/// to deserialize (e.g. "0.author").
///
/// # Errors
///
/// Returns an error if JSON deserialization fails.
///
/// # Example
///
/// ```
/// use biblio_core::from_json;
/// use serde::Deserialize;
///
/// #[derive(Debug, PartialEq, Deserialize)]
/// struct Book { id: u64, title: String }
///
/// let bytes = br#"{"id":1,"title":"Dune"}"#;
/// let book: Book = from_json(bytes).expect("deserialize");
/// assert_eq!(book.id, 1);
/// ```
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        crate::Error::json_deserialization(e.path().to_string(), e.inner().to_string())
    })
}

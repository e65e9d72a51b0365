//! # olives-form
//!
//! Bidirectional mapping between typed object graphs and an ordered flat
//! `key -> value` representation, plus the multipart/form-data wire
//! format that carries it over HTTP.
//!
//! An object graph is flattened into dotted/indexed keys:
//!
//! ```text
//! Name             = "A"
//! Tags[0]          = "x"
//! Tags[1]          = "y"
//! Addresses[0].City = "Hanoi"
//! Photo            = <binary part>
//! ```
//!
//! Types participate through the [`FormField`] trait. Scalars and
//! containers are covered out of the box; domain structs opt in with
//! [`form_object!`] and unit enums with [`text_enum!`]:
//!
//! ```
//! use olives_form::{decode, encode, form_object};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Profile {
//!     name: String,
//!     tags: Vec<String>,
//! }
//!
//! form_object!(Profile {
//!     name => "Name",
//!     tags => "Tags",
//! });
//!
//! let profile = Profile { name: "A".into(), tags: vec!["x".into(), "y".into()] };
//! let form = encode(&profile).unwrap();
//! assert_eq!(form.get("Tags[1]").unwrap().as_text(), Some("y"));
//!
//! let back: Profile = decode(&form).unwrap();
//! assert_eq!(back, profile);
//! ```
//!
//! ## Sequence probing
//!
//! List and dictionary decoding probes indices `0, 1, 2, ...` and stops
//! at the first missing index. A gap in the key set silently truncates
//! the decoded sequence; sparse indices are deliberately not supported.
//!
//! ## Errors
//!
//! Every failure is a [`CodecError`] naming the offending field path or
//! type. A failed encode or decode produces no partial result.

pub mod error;
pub mod field;
pub mod flat;
pub mod multipart;
pub mod scalar;
pub mod value;

pub use error::CodecError;
pub use field::{decode_field, index_path, member_path, FormField};
pub use flat::FlatForm;
pub use multipart::{parse_multipart, write_multipart};
pub use value::{FileBlob, FormValue};

/// Encode a value into a flat form, keys in definition order.
pub fn encode<T: FormField>(value: &T) -> Result<FlatForm, CodecError> {
    let mut form = FlatForm::new();
    value.encode("", &mut form)?;
    Ok(form)
}

/// Decode a value of type `T` from a flat form.
pub fn decode<T: FormField>(form: &FlatForm) -> Result<T, CodecError> {
    T::decode(form, "")
}

/// Decode a value of type `T` from a flat form.
///
/// Alias for [`decode`], named to pair with [`from_multipart`].
pub fn from_form<T: FormField>(form: &FlatForm) -> Result<T, CodecError> {
    decode(form)
}

/// Encode a value straight to a multipart/form-data payload.
pub fn to_multipart<T: FormField>(value: &T, boundary: &str) -> Result<Vec<u8>, CodecError> {
    let form = encode(value)?;
    write_multipart(&form, boundary)
}

/// Decode a value of type `T` from a multipart/form-data payload.
pub fn from_multipart<T: FormField>(bytes: &[u8], boundary: &str) -> Result<T, CodecError> {
    let form = parse_multipart(bytes, boundary)?;
    decode(&form)
}

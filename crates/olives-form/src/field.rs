//! The [`FormField`] trait: how a type enters and leaves a flat form.
//!
//! This is the codec's dispatch seam. Each participating type carries
//! an explicit encode/decode pair; the set of implementations is the
//! conversion registry. Domain types join through [`form_object!`] and
//! [`text_enum!`] rather than any runtime inspection.

use std::collections::{BTreeMap, HashMap};

use indexmap::IndexMap;
use serde_json::Value as JsonValue;

use crate::error::CodecError;
use crate::flat::FlatForm;
use crate::value::{FileBlob, FormValue};

/// Build the key for a named member under `prefix` (`{prefix}.{name}`,
/// or bare `{name}` at the root).
pub fn member_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

/// Build the key for sequence element `i` under `prefix`.
pub fn index_path(prefix: &str, i: usize) -> String {
    format!("{prefix}[{i}]")
}

/// A type that can be written to and read from a flat form.
///
/// `encode` appends this value's leaves under `path`; `decode` rebuilds
/// the value from the leaves under `path`. Both fail fast with a
/// [`CodecError`] naming the offending path; neither leaves partial
/// state behind on failure.
pub trait FormField: Sized {
    /// Append this value's leaf entries to `form` under `path`.
    fn encode(&self, path: &str, form: &mut FlatForm) -> Result<(), CodecError>;

    /// Rebuild a value from the entries of `form` under `path`.
    fn decode(form: &FlatForm, path: &str) -> Result<Self, CodecError>;
}

/// Decode one struct field: an absent field yields `Ok(None)` so the
/// caller keeps the default, while conversion and kind errors
/// propagate.
pub fn decode_field<T: FormField>(
    form: &FlatForm,
    path: &str,
) -> Result<Option<T>, CodecError> {
    match T::decode(form, path) {
        Ok(value) => Ok(Some(value)),
        Err(CodecError::Missing { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

// =============================================================================
// OPTION
// =============================================================================

impl<T: FormField> FormField for Option<T> {
    /// `None` contributes nothing, like a null property.
    fn encode(&self, path: &str, form: &mut FlatForm) -> Result<(), CodecError> {
        if let Some(value) = self {
            value.encode(path, form)?;
        }
        Ok(())
    }

    fn decode(form: &FlatForm, path: &str) -> Result<Self, CodecError> {
        match T::decode(form, path) {
            Ok(value) => Ok(Some(value)),
            Err(CodecError::Missing { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

// =============================================================================
// SEQUENCES
// =============================================================================

impl<T: FormField> FormField for Vec<T> {
    fn encode(&self, path: &str, form: &mut FlatForm) -> Result<(), CodecError> {
        for (i, item) in self.iter().enumerate() {
            item.encode(&index_path(path, i), form)?;
        }
        Ok(())
    }

    /// Lazily bounded probe: indices are tried from 0 upward and the
    /// sequence ends at the first absent index. A gap in the key set
    /// truncates the result; sparse indices are not supported.
    fn decode(form: &FlatForm, path: &str) -> Result<Self, CodecError> {
        let mut items = Vec::new();
        let mut i = 0;
        loop {
            match T::decode(form, &index_path(path, i)) {
                Ok(item) => items.push(item),
                Err(CodecError::Missing { .. }) => break,
                Err(e) => return Err(e),
            }
            i += 1;
        }
        Ok(items)
    }
}

impl<T: FormField, const N: usize> FormField for [T; N] {
    fn encode(&self, path: &str, form: &mut FlatForm) -> Result<(), CodecError> {
        for (i, item) in self.iter().enumerate() {
            item.encode(&index_path(path, i), form)?;
        }
        Ok(())
    }

    fn decode(form: &FlatForm, path: &str) -> Result<Self, CodecError> {
        let items = Vec::<T>::decode(form, path)?;
        items.try_into().map_err(|items: Vec<T>| CodecError::Conversion {
            path: path.to_string(),
            target: std::any::type_name::<[T; N]>(),
            reason: format!("expected {N} elements, found {}", items.len()),
        })
    }
}

// =============================================================================
// DICTIONARIES
// =============================================================================

fn encode_entries<'a, K, V>(
    entries: impl Iterator<Item = (&'a K, &'a V)>,
    path: &str,
    form: &mut FlatForm,
) -> Result<(), CodecError>
where
    K: FormField + 'a,
    V: FormField + 'a,
{
    for (i, (key, value)) in entries.enumerate() {
        let entry = index_path(path, i);
        key.encode(&member_path(&entry, "Key"), form)?;
        value.encode(&member_path(&entry, "Value"), form)?;
    }
    Ok(())
}

/// Probe `{path}[i].Key` / `{path}[i].Value` for `i = 0, 1, ...`; the
/// sequence ends when either member of an index is absent. Same
/// truncation semantics as list decoding.
fn decode_entries<K: FormField, V: FormField>(
    form: &FlatForm,
    path: &str,
) -> Result<Vec<(K, V)>, CodecError> {
    let mut entries = Vec::new();
    let mut i = 0;
    loop {
        let entry = index_path(path, i);
        let key = match K::decode(form, &member_path(&entry, "Key")) {
            Ok(key) => key,
            Err(CodecError::Missing { .. }) => break,
            Err(e) => return Err(e),
        };
        let value = match V::decode(form, &member_path(&entry, "Value")) {
            Ok(value) => value,
            Err(CodecError::Missing { .. }) => break,
            Err(e) => return Err(e),
        };
        entries.push((key, value));
        i += 1;
    }
    Ok(entries)
}

impl<K, V> FormField for IndexMap<K, V>
where
    K: FormField + std::hash::Hash + Eq,
    V: FormField,
{
    fn encode(&self, path: &str, form: &mut FlatForm) -> Result<(), CodecError> {
        encode_entries(self.iter(), path, form)
    }

    fn decode(form: &FlatForm, path: &str) -> Result<Self, CodecError> {
        Ok(decode_entries(form, path)?.into_iter().collect())
    }
}

impl<K, V> FormField for BTreeMap<K, V>
where
    K: FormField + Ord,
    V: FormField,
{
    fn encode(&self, path: &str, form: &mut FlatForm) -> Result<(), CodecError> {
        encode_entries(self.iter(), path, form)
    }

    /// Entry order is only reproduced where the target preserves it;
    /// a `BTreeMap` reorders by key.
    fn decode(form: &FlatForm, path: &str) -> Result<Self, CodecError> {
        Ok(decode_entries(form, path)?.into_iter().collect())
    }
}

impl<K, V> FormField for HashMap<K, V>
where
    K: FormField + std::hash::Hash + Eq,
    V: FormField,
{
    fn encode(&self, path: &str, form: &mut FlatForm) -> Result<(), CodecError> {
        encode_entries(self.iter(), path, form)
    }

    fn decode(form: &FlatForm, path: &str) -> Result<Self, CodecError> {
        Ok(decode_entries(form, path)?.into_iter().collect())
    }
}

// =============================================================================
// FILES
// =============================================================================

impl FormField for FileBlob {
    fn encode(&self, path: &str, form: &mut FlatForm) -> Result<(), CodecError> {
        form.insert(path.to_string(), FormValue::File(self.clone()));
        Ok(())
    }

    /// Bare-key lookup: a file leaf is never decomposed.
    fn decode(form: &FlatForm, path: &str) -> Result<Self, CodecError> {
        form.file(path).cloned()
    }
}

// =============================================================================
// JSON PASS-THROUGH
// =============================================================================

impl FormField for JsonValue {
    /// A JSON tree flattens naturally: nulls contribute nothing,
    /// scalars become text leaves, arrays and objects recurse.
    fn encode(&self, path: &str, form: &mut FlatForm) -> Result<(), CodecError> {
        match self {
            JsonValue::Null => Ok(()),
            JsonValue::Bool(b) => b.encode(path, form),
            JsonValue::Number(n) => {
                form.insert(path.to_string(), FormValue::Text(n.to_string()));
                Ok(())
            }
            JsonValue::String(s) => s.encode(path, form),
            JsonValue::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    item.encode(&index_path(path, i), form)?;
                }
                Ok(())
            }
            JsonValue::Object(map) => {
                for (name, value) in map {
                    value.encode(&member_path(path, name), form)?;
                }
                Ok(())
            }
        }
    }

    /// The flat form erases JSON kinds (every leaf is text), so a
    /// generic JSON target is ambiguous and unsupported.
    fn decode(_form: &FlatForm, _path: &str) -> Result<Self, CodecError> {
        Err(CodecError::UnsupportedType {
            type_name: "serde_json::Value",
        })
    }
}

// =============================================================================
// MACROS FOR DOMAIN TYPES
// =============================================================================

/// Implement [`FormField`] for a struct by listing its fields and their
/// wire names, in the order they should appear on the wire.
///
/// Decoding constructs `Default::default()` and fills in every field
/// that is present; absent fields keep their defaults, conversion
/// errors propagate. A nested struct decodes only when at least one
/// key exists under its path, so a wholly absent struct field is
/// skipped rather than zero-filled.
#[macro_export]
macro_rules! form_object {
    ($ty:ty { $($field:ident => $name:literal),+ $(,)? }) => {
        impl $crate::FormField for $ty {
            fn encode(
                &self,
                path: &str,
                form: &mut $crate::FlatForm,
            ) -> ::std::result::Result<(), $crate::CodecError> {
                $(
                    $crate::FormField::encode(
                        &self.$field,
                        &$crate::member_path(path, $name),
                        form,
                    )?;
                )+
                Ok(())
            }

            fn decode(
                form: &$crate::FlatForm,
                path: &str,
            ) -> ::std::result::Result<Self, $crate::CodecError> {
                if !form.contains_member(path) {
                    return Err($crate::CodecError::Missing {
                        path: path.to_string(),
                    });
                }
                let mut value = <$ty as ::std::default::Default>::default();
                $(
                    if let Some(v) =
                        $crate::decode_field(form, &$crate::member_path(path, $name))?
                    {
                        value.$field = v;
                    }
                )+
                Ok(value)
            }
        }
    };
}

/// Implement [`FormField`] for a unit enum with an explicit
/// variant <-> text table.
#[macro_export]
macro_rules! text_enum {
    ($ty:ty { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $crate::FormField for $ty {
            fn encode(
                &self,
                path: &str,
                form: &mut $crate::FlatForm,
            ) -> ::std::result::Result<(), $crate::CodecError> {
                let text = match self { $(Self::$variant => $text),+ };
                form.insert(path.to_string(), $crate::FormValue::Text(text.to_string()));
                Ok(())
            }

            fn decode(
                form: &$crate::FlatForm,
                path: &str,
            ) -> ::std::result::Result<Self, $crate::CodecError> {
                match form.text(path)? {
                    $($text => Ok(Self::$variant),)+
                    other => Err($crate::CodecError::Conversion {
                        path: path.to_string(),
                        target: ::std::any::type_name::<$ty>(),
                        reason: format!("unknown variant `{other}`"),
                    }),
                }
            }
        }
    };
}

//! [`FormField`] implementations for scalar leaves.
//!
//! Every primitive converts through `Display`/`FromStr`; a parse
//! failure surfaces as [`CodecError::Conversion`] carrying the field
//! path and target type. Enums get the same treatment through the
//! [`text_enum!`](crate::text_enum) table macro.

use crate::error::CodecError;
use crate::field::FormField;
use crate::flat::FlatForm;
use crate::value::FormValue;

macro_rules! scalar_field {
    ($($ty:ty),+ $(,)?) => {$(
        impl FormField for $ty {
            fn encode(&self, path: &str, form: &mut FlatForm) -> Result<(), CodecError> {
                form.insert(path.to_string(), FormValue::Text(self.to_string()));
                Ok(())
            }

            fn decode(form: &FlatForm, path: &str) -> Result<Self, CodecError> {
                form.text(path)?
                    .parse::<$ty>()
                    .map_err(|e| CodecError::Conversion {
                        path: path.to_string(),
                        target: ::std::any::type_name::<$ty>(),
                        reason: e.to_string(),
                    })
            }
        }
    )+};
}

scalar_field!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, String,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{decode, encode, text_enum};

    #[derive(Debug, PartialEq)]
    enum BloodType {
        A,
        B,
        Ab,
        O,
    }

    text_enum!(BloodType {
        A => "A",
        B => "B",
        Ab => "AB",
        O => "O",
    });

    #[test]
    fn test_scalar_round_trips() {
        let form = encode(&42i32).unwrap();
        assert_eq!(form.text("").unwrap(), "42");
        assert_eq!(decode::<i32>(&form).unwrap(), 42);

        let form = encode(&true).unwrap();
        assert_eq!(decode::<bool>(&form).unwrap(), true);

        let form = encode(&1.5f64).unwrap();
        assert_eq!(decode::<f64>(&form).unwrap(), 1.5);

        let form = encode(&"hello world".to_string()).unwrap();
        assert_eq!(decode::<String>(&form).unwrap(), "hello world");
    }

    #[test]
    fn test_conversion_failure_names_path_and_type() {
        let mut form = FlatForm::new();
        form.insert("Age", "eleven");
        let err = i32::decode(&form, "Age").unwrap_err();
        match err {
            CodecError::Conversion { path, target, .. } => {
                assert_eq!(path, "Age");
                assert_eq!(target, "i32");
            }
            other => panic!("expected Conversion, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_scalar_reports_missing() {
        let form = FlatForm::new();
        assert!(i64::decode(&form, "Weight").unwrap_err().is_missing());
    }

    #[test]
    fn test_enum_table_round_trip() {
        let form = encode(&BloodType::Ab).unwrap();
        assert_eq!(form.text("").unwrap(), "AB");
        assert_eq!(decode::<BloodType>(&form).unwrap(), BloodType::Ab);
    }

    #[test]
    fn test_enum_unknown_variant_is_conversion_error() {
        let mut form = FlatForm::new();
        form.insert("", "Z");
        let err = decode::<BloodType>(&form).unwrap_err();
        assert!(matches!(err, CodecError::Conversion { .. }));
    }

    #[test]
    fn test_empty_string_survives() {
        let form = encode(&String::new()).unwrap();
        assert_eq!(decode::<String>(&form).unwrap(), "");
    }
}

//! Scalar implementations for primitives, `char` and `String`.

use crate::ops::{Scalar, ScalarParseError, ScalarValue};
use crate::reflection::Reflect;

/// Implements [`Reflect`] and [`Scalar`] for a leaf type.
///
/// Every scalar parses through [`str::parse`], so a type's text form and its
/// accepted input agree with the `FromStr` impl from the standard library.
macro_rules! impl_scalar_reflect {
    ($ty:ty, |$value:ident| $to_value:expr) => {
        impl Reflect for $ty {
            impl_reflect_methods!(Scalar);
        }

        impl Scalar for $ty {
            #[inline]
            fn to_value(&self) -> ScalarValue<'_> {
                let $value = self;
                $to_value
            }

            fn parse_text(&mut self, text: &str) -> Result<(), ScalarParseError> {
                *self = text
                    .parse::<$ty>()
                    .map_err(|_| ScalarParseError::new(stringify!($ty), text))?;
                Ok(())
            }
        }
    };
}

impl_scalar_reflect!(bool, |v| ScalarValue::Bool(*v));

impl_scalar_reflect!(i8, |v| ScalarValue::Int(i64::from(*v)));
impl_scalar_reflect!(i16, |v| ScalarValue::Int(i64::from(*v)));
impl_scalar_reflect!(i32, |v| ScalarValue::Int(i64::from(*v)));
impl_scalar_reflect!(i64, |v| ScalarValue::Int(*v));
impl_scalar_reflect!(isize, |v| ScalarValue::Int(*v as i64));

impl_scalar_reflect!(u8, |v| ScalarValue::UInt(u64::from(*v)));
impl_scalar_reflect!(u16, |v| ScalarValue::UInt(u64::from(*v)));
impl_scalar_reflect!(u32, |v| ScalarValue::UInt(u64::from(*v)));
impl_scalar_reflect!(u64, |v| ScalarValue::UInt(*v));
impl_scalar_reflect!(usize, |v| ScalarValue::UInt(*v as u64));

impl_scalar_reflect!(f32, |v| ScalarValue::F32(*v));
impl_scalar_reflect!(f64, |v| ScalarValue::F64(*v));

// `char` has no JSON-native form; it travels as a one-character string.
impl_scalar_reflect!(char, |v| ScalarValue::Text(v.to_string()));

impl_scalar_reflect!(String, |v| ScalarValue::Str(v.as_str()));

// -----------------------------------------------------------------------------
// Tests

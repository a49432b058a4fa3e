//! Sequence and map implementations for the standard collections.

use std::collections::{BTreeMap, HashMap, VecDeque};

use crate::ops::{Map, Scalar, ScalarParseError, Sequence};
use crate::reflection::Reflect;

// -----------------------------------------------------------------------------
// Growable sequences

/// Implements [`Reflect`] and [`Sequence`] for a growable, index-addressable
/// collection. `Default` on the element lets readers extend the target to the
/// incoming length before filling elements in place.
macro_rules! impl_sequence_reflect {
    ($ty:ident) => {
        impl<T: Reflect + Default> Reflect for $ty<T> {
            impl_reflect_methods!(Sequence);
        }

        impl<T: Reflect + Default> Sequence for $ty<T> {
            #[inline]
            fn element_len(&self) -> usize {
                self.len()
            }

            #[inline]
            fn element_at(&self, index: usize) -> Option<&dyn Reflect> {
                self.get(index).map(|element| element.as_reflect())
            }

            #[inline]
            fn element_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
                self.get_mut(index).map(|element| element.as_reflect_mut())
            }

            fn resize_default(&mut self, len: usize) -> bool {
                self.resize_with(len, T::default);
                true
            }
        }
    };
}

impl_sequence_reflect!(Vec);
impl_sequence_reflect!(VecDeque);

// -----------------------------------------------------------------------------
// Fixed-size arrays

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    impl_reflect_methods!(Sequence);
}

impl<T: Reflect, const N: usize> Sequence for [T; N] {
    #[inline]
    fn element_len(&self) -> usize {
        N
    }

    #[inline]
    fn element_at(&self, index: usize) -> Option<&dyn Reflect> {
        self.get(index).map(|element| element.as_reflect())
    }

    #[inline]
    fn element_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        self.get_mut(index).map(|element| element.as_reflect_mut())
    }

    /// Arrays refuse to change length; readers fill the slots that exist.
    fn resize_default(&mut self, _len: usize) -> bool {
        false
    }
}

// -----------------------------------------------------------------------------
// Maps

/// Implements [`Reflect`] and [`Map`] for a keyed collection. Keys are
/// scalars so entries can carry their lexical form as the wire-side label;
/// [`Map::entry_mut`] and [`Map::insert_default`] parse that label back.
macro_rules! impl_map_reflect {
    ($ty:ident, $($bound:path),+) => {
        impl<K, V> Reflect for $ty<K, V>
        where
            K: Scalar + Default $(+ $bound)+,
            V: Reflect + Default,
        {
            impl_reflect_methods!(Map);
        }

        impl<K, V> Map for $ty<K, V>
        where
            K: Scalar + Default $(+ $bound)+,
            V: Reflect + Default,
        {
            #[inline]
            fn entry_len(&self) -> usize {
                self.len()
            }

            fn entries(&self) -> Box<dyn Iterator<Item = (String, &dyn Reflect)> + '_> {
                Box::new(
                    self.iter()
                        .map(|(key, value)| (key.to_value().to_string(), value.as_reflect())),
                )
            }

            fn entry_mut(&mut self, key: &str) -> Option<&mut dyn Reflect> {
                let mut parsed = K::default();
                parsed.parse_text(key).ok()?;
                self.get_mut(&parsed).map(|value| value.as_reflect_mut())
            }

            fn insert_default(&mut self, key: &str) -> Result<(), ScalarParseError> {
                let mut parsed = K::default();
                parsed.parse_text(key)?;
                self.insert(parsed, V::default());
                Ok(())
            }
        }
    };
}

impl_map_reflect!(BTreeMap, Ord);
impl_map_reflect!(HashMap, Eq, std::hash::Hash);

// -----------------------------------------------------------------------------
// Tests

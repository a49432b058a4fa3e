//! Tuple implementations up to arity 12.

use crate::ops::Tuple;
use crate::reflection::Reflect;

macro_rules! impl_tuple_reflect {
    (@one $name:ident) => {
        1
    };
    ($($name:ident : $index:tt),*) => {
        impl<$($name: Reflect),*> Reflect for ($($name,)*) {
            impl_reflect_methods!(Tuple);
        }

        impl<$($name: Reflect),*> Tuple for ($($name,)*) {
            #[inline]
            fn slot_len(&self) -> usize {
                0 $(+ impl_tuple_reflect!(@one $name))*
            }

            fn slot_at(&self, index: usize) -> Option<&dyn Reflect> {
                match index {
                    $($index => Some(self.$index.as_reflect()),)*
                    _ => None,
                }
            }

            fn slot_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
                match index {
                    $($index => Some(self.$index.as_reflect_mut()),)*
                    _ => None,
                }
            }
        }
    };
}

impl_tuple_reflect!();
impl_tuple_reflect!(A: 0);
impl_tuple_reflect!(A: 0, B: 1);
impl_tuple_reflect!(A: 0, B: 1, C: 2);
impl_tuple_reflect!(A: 0, B: 1, C: 2, D: 3);
impl_tuple_reflect!(A: 0, B: 1, C: 2, D: 3, E: 4);
impl_tuple_reflect!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5);
impl_tuple_reflect!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6);
impl_tuple_reflect!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7);
impl_tuple_reflect!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7, I: 8);
impl_tuple_reflect!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7, I: 8, J: 9);
impl_tuple_reflect!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7, I: 8, J: 9, K: 10);
impl_tuple_reflect!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7, I: 8, J: 9, K: 10, L: 11);

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::{Kind, Reflect, Tuple};

    #[test]
    fn slots_keep_their_positions() {
        let mut row = (1u32, 2.0f64, String::from("ZZZ"));
        assert_eq!(row.kind(), Kind::Tuple);
        assert_eq!(row.slot_len(), 3);

        let text = row.slot_at(2).unwrap();
        assert_eq!(text.downcast_ref::<String>().map(String::as_str), Some("ZZZ"));
        assert!(row.slot_at(3).is_none());

        let middle = row.slot_mut(1).unwrap();
        *middle.downcast_mut::<f64>().unwrap() = 2.5;
        assert_eq!(row.1, 2.5);
    }

    #[test]
    fn unit_tuple_is_empty() {
        assert_eq!(().slot_len(), 0);
        assert!(().slot_at(0).is_none());
    }
}

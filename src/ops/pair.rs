use crate::impls::impl_reflect_methods;
use crate::ops::Scalar;
use crate::reflection::{Kind, Reflect, Shape, ShapeMut};

// -----------------------------------------------------------------------------
// Pair

/// A key/value pair with position-dependent traversal.
///
/// At labeled positions (a named struct field, a map entry, the root) a pair
/// traverses as a two-field struct `{first, second}`, keeping the
/// position's own label intact. At
/// unlabeled sequence positions it instead collapses to a single labeled
/// item: the stringified `first` becomes the label and `second` is visited
/// in its place, with no extra nesting level.
///
/// ```
/// use omniform::{Pair, to_json};
/// use std::collections::BTreeMap;
///
/// let mut scores: BTreeMap<String, Pair<String, u32>> = BTreeMap::new();
/// scores.insert("a".into(), Pair::new("max".into(), 17));
///
/// assert_eq!(
///     to_json(&scores).unwrap().to_string(),
///     r#"{"a":{"first":"max","second":17}}"#,
/// );
/// ```
///
/// Plain two-tuples are not pairs; `(A, B)` stays a positional
/// [`Tuple`](crate::Tuple).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Pair<F, S> {
    pub first: F,
    pub second: S,
}

impl<F, S> Pair<F, S> {
    pub fn new(first: F, second: S) -> Self {
        Self { first, second }
    }
}

impl<F, S> From<(F, S)> for Pair<F, S> {
    fn from((first, second): (F, S)) -> Self {
        Self { first, second }
    }
}

impl<F: Scalar, S: Reflect> Reflect for Pair<F, S> {
    impl_reflect_methods!(@common);

    #[inline]
    fn kind(&self) -> Kind {
        Kind::Pair
    }

    #[inline]
    fn shape(&self) -> Shape<'_> {
        Shape::Pair(PairRef {
            first: &self.first,
            second: self.second.as_reflect(),
        })
    }

    #[inline]
    fn shape_mut(&mut self) -> ShapeMut<'_> {
        ShapeMut::Pair(PairMut {
            first: &mut self.first,
            second: self.second.as_reflect_mut(),
        })
    }
}

// -----------------------------------------------------------------------------
// PairRef / PairMut

/// A read borrow of a [`Pair`]'s two parts.
pub struct PairRef<'a> {
    pub first: &'a dyn Scalar,
    pub second: &'a dyn Reflect,
}

impl PairRef<'_> {
    /// The stringified `first`, used as the label at unlabeled positions.
    pub fn key(&self) -> String {
        self.first.to_value().to_string()
    }
}

/// A write borrow of a [`Pair`]'s two parts.
pub struct PairMut<'a> {
    pub first: &'a mut dyn Scalar,
    pub second: &'a mut dyn Reflect,
}

impl PairMut<'_> {
    /// The stringified current `first`.
    pub fn key(&self) -> String {
        self.first.to_value().to_string()
    }
}

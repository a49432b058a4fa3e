use core::any::{Any, TypeId};

use crate::reflection::{Kind, Shape, ShapeMut};

// -----------------------------------------------------------------------------
// Reflect

/// The foundational trait for structural traversal in [`omniform`].
///
/// A `Reflect` value knows its structural [`Kind`] and can expose itself
/// through the matching category view ([`Shape`] for reads, [`ShapeMut`] for
/// writes). The traversal engine never sees concrete types; it dispatches on
/// the view and recurses through the category interfaces.
///
/// # Classification
///
/// Every implementation belongs to exactly one category, established by the
/// single [`shape`] body. Precedence questions (a `String` is iterable, a map
/// is iterable, a `Box` is a struct-shaped smart pointer) are settled here
/// once, at the type level:
///
/// ```
/// use omniform::{Kind, Reflect};
///
/// assert_eq!(Reflect::kind(&String::from("abc")), Kind::Scalar);
/// assert_eq!(Reflect::kind(&vec![1, 2, 3]), Kind::Sequence);
/// assert_eq!(Reflect::kind(&Some(1)), Kind::Optional);
/// assert_eq!(Reflect::kind(&Box::new(1)), Kind::Nullable);
/// ```
///
/// # Implementing
///
/// Use [the derive macro](omniform_derive::Reflect) for structs you own and
/// [`adapt_struct!`](crate::adapt_struct) for types reachable only through
/// accessors. Scalars, containers, tuples to arity 12 and the standard
/// wrappers are covered by the crate's own implementations; a manual
/// implementation is only ever needed for a new scalar representation, and
/// then [`Scalar`](crate::Scalar) is the interesting part; the `Reflect`
/// methods are mechanical.
///
/// [`omniform`]: crate
/// [`shape`]: Reflect::shape
pub trait Reflect: Any {
    /// The diagnostic name of the underlying type.
    fn type_name(&self) -> &'static str;

    /// Casts to [`Any`] for concrete-type recovery.
    fn as_any(&self) -> &dyn Any;

    /// Casts to [`Any`] mutably.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Consumes the box, yielding the value as [`Any`].
    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    /// Upcasts to [`Reflect`]. Handy where a concrete `&T` must become a
    /// trait object inside macro-generated code.
    fn as_reflect(&self) -> &dyn Reflect;

    /// Upcasts to [`Reflect`] mutably.
    fn as_reflect_mut(&mut self) -> &mut dyn Reflect;

    /// The structural category of this type.
    fn kind(&self) -> Kind;

    /// Borrows the value through its category interface.
    fn shape(&self) -> Shape<'_>;

    /// Mutably borrows the value through its category interface.
    fn shape_mut(&mut self) -> ShapeMut<'_>;
}

// -----------------------------------------------------------------------------
// dyn Reflect

impl dyn Reflect {
    /// Returns `true` if the underlying value is of type `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use omniform::Reflect;
    /// let x: &dyn Reflect = &10_i32;
    ///
    /// assert!(x.is::<i32>());
    /// assert!(!x.is::<u32>());
    /// ```
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.as_any().type_id() == TypeId::of::<T>()
    }

    /// Downcasts to a concrete `&T`, or `None` on type mismatch.
    ///
    /// # Examples
    ///
    /// ```
    /// # use omniform::Reflect;
    /// let x: &dyn Reflect = &10_i32;
    ///
    /// assert_eq!(x.downcast_ref::<i32>(), Some(&10));
    /// assert_eq!(x.downcast_ref::<String>(), None);
    /// ```
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Downcasts to a concrete `&mut T`, or `None` on type mismatch.
    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

impl core::fmt::Debug for dyn Reflect {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Reflect({}, {})", self.type_name(), self.kind())
    }
}

#[cfg(test)]
mod tests {
    use crate::Reflect;

    #[test]
    fn downcast_roundtrip() {
        let value: &dyn Reflect = &42_u16;
        assert!(value.is::<u16>());
        assert_eq!(value.downcast_ref::<u16>(), Some(&42));
        assert!(value.downcast_ref::<u32>().is_none());
    }

    #[test]
    fn boxed_into_any_keeps_value_type() {
        let boxed: Box<dyn Reflect> = Box::new(String::from("x"));
        let any = boxed.into_any();
        assert_eq!(*any.downcast::<String>().unwrap(), "x");
    }
}

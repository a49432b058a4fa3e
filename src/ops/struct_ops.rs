use crate::Reflect;
use crate::registry::FieldRegistry;

// -----------------------------------------------------------------------------
// FieldRef / FieldMut

/// A read borrow of one struct field.
///
/// Direct bindings hand out the field in place; accessor bindings have
/// nothing to borrow, so the getter's copy travels in a box. The traversal
/// engine treats both identically through [`as_reflect`](FieldRef::as_reflect).
pub enum FieldRef<'a> {
    /// The field itself (direct binding).
    Borrowed(&'a dyn Reflect),
    /// A getter snapshot (accessor binding).
    Computed(Box<dyn Reflect>),
}

impl FieldRef<'_> {
    #[inline]
    pub fn as_reflect(&self) -> &dyn Reflect {
        match self {
            FieldRef::Borrowed(value) => *value,
            FieldRef::Computed(value) => value.as_ref(),
        }
    }
}

/// A write borrow of one struct field.
///
/// Direct bindings are filled in place. Accessor bindings yield a snapshot
/// of the current value; the reader fills it and commits it back through
/// [`Struct::set_field`]. Starting from the current value (not a default)
/// keeps untouched parts of the field intact when the input omits them.
pub enum FieldMut<'a> {
    /// The field itself (direct binding).
    Place(&'a mut dyn Reflect),
    /// A getter snapshot to fill and commit (accessor binding).
    Virtual(Box<dyn Reflect>),
}

// -----------------------------------------------------------------------------
// Struct

/// Named-field access for registered structs.
///
/// Field order everywhere ([`registry`](Struct::registry) iteration,
/// traversal, serialized output) is exactly declaration order. Implemented
/// by [the derive macro](omniform_derive::Reflect) and
/// [`adapt_struct!`](crate::adapt_struct), not by hand.
pub trait Struct: Reflect {
    /// The static field registry of this type.
    fn registry(&self) -> &'static FieldRegistry;

    /// Borrows the field at `index` in declaration order.
    fn field_at(&self, index: usize) -> Option<FieldRef<'_>>;

    /// Mutably borrows the field at `index`.
    fn field_at_mut(&mut self, index: usize) -> Option<FieldMut<'_>>;

    /// Moves `value` into the field at `index`: a plain assignment for
    /// direct bindings, a setter call for accessor bindings.
    ///
    /// Rejects the box unchanged when the type does not match the field or
    /// the index is out of range.
    fn set_field(&mut self, index: usize, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;
}

impl dyn Struct {
    /// Looks up a field index by serialized name.
    #[inline]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.registry().index_of(name)
    }

    /// Borrows a field by serialized name.
    pub fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        self.field_at(self.index_of(name)?)
    }

    /// The number of registered fields.
    #[inline]
    pub fn field_len(&self) -> usize {
        self.registry().len()
    }
}

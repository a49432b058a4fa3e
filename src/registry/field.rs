use core::fmt;
use core::slice;

// -----------------------------------------------------------------------------
// FieldKind

/// How a field is bound to its containing struct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// The struct exposes the field itself; traversal borrows it in place.
    Direct,
    /// The struct exposes a getter (and usually a setter); traversal works
    /// on getter snapshots and commits through the setter.
    Accessor,
}

// -----------------------------------------------------------------------------
// FieldDescriptor

/// One registered field: its serialized name and binding style.
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub kind: FieldKind,
}

// -----------------------------------------------------------------------------
// FieldRegistry

/// The ordered, immutable field list of one registered struct type.
///
/// Lives in a `static` per type, so a registry is built exactly once and
/// shared by every traversal. Lookup by name is linear; field counts are
/// small and iteration order is the contract that matters.
pub struct FieldRegistry {
    type_name: &'static str,
    fields: &'static [FieldDescriptor],
}

impl FieldRegistry {
    pub const fn new(type_name: &'static str, fields: &'static [FieldDescriptor]) -> Self {
        Self { type_name, fields }
    }

    /// The registered type's diagnostic name.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[inline]
    pub fn descriptor_at(&self, index: usize) -> Option<&FieldDescriptor> {
        self.fields.get(index)
    }

    /// The serialized name at `index`, in declaration order.
    #[inline]
    pub fn name_at(&self, index: usize) -> Option<&'static str> {
        self.fields.get(index).map(|field| field.name)
    }

    /// The index of the field with the given serialized name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }

    /// Iterates descriptors in declaration order.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'static, FieldDescriptor> {
        self.fields.iter()
    }
}

impl fmt::Debug for FieldRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRegistry")
            .field("type_name", &self.type_name)
            .field("fields", &self.fields)
            .finish()
    }
}

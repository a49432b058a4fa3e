use crate::Reflect;

// -----------------------------------------------------------------------------
// Optional

/// Explicit optionality (`Option<T>`).
///
/// Writers omit absent values entirely (no key, no `null`); readers apply
/// the uniform presence policy: absent-or-null in the input means absent,
/// and an absent input leaves the target untouched.
pub trait Optional: Reflect {
    fn is_present(&self) -> bool;

    fn value(&self) -> Option<&dyn Reflect>;

    fn value_mut(&mut self) -> Option<&mut dyn Reflect>;

    /// Installs a default payload and returns it for filling.
    fn set_default(&mut self) -> &mut dyn Reflect;
}

// -----------------------------------------------------------------------------
// Nullable

/// A transparent owning indirection (`Box`, `Rc`, `Arc`).
///
/// Traversal passes straight through to the target without an extra nesting
/// level. Owning pointers always point at something, so the write side is
/// always present; the absent case exists on the read side (missing or null
/// input leaves the pointer as it was) and composes with [`Optional`] for
/// values that can genuinely be gone (`Option<Box<T>>`).
pub trait Nullable: Reflect {
    fn target(&self) -> Option<&dyn Reflect>;

    /// Replaces the payload with a freshly allocated default and returns it
    /// for filling. Shared pointers (`Rc`, `Arc`) allocate anew rather than
    /// mutating through sharing.
    fn reset_target(&mut self) -> &mut dyn Reflect;
}

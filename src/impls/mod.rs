//! [`Reflect`] and category implementations for the built-in type set.
//!
//! ## Menu
//!
//! - `scalars`: primitives, `char` and `String` (the [`Scalar`] set).
//! - `containers`: `Vec`, `VecDeque`, `[T; N]`, `BTreeMap`, `HashMap`.
//! - `wrappers`: `Option`, `Box`, `Rc`, `Arc`.
//! - `tuples`: tuples up to arity 12 (plus the unit tuple).
//!
//! [`Reflect`]: crate::Reflect
//! [`Scalar`]: crate::Scalar

// -----------------------------------------------------------------------------
// Shared impl machinery

/// Generates the mechanical [`Reflect`](crate::Reflect) methods.
///
/// The one-argument form fixes the whole classification (`Kind` variant and
/// matching `Shape`/`ShapeMut` constructor share the name); the `@common`
/// form leaves `kind`/`shape`/`shape_mut` to the caller for types whose
/// views are not `self` borrows.
macro_rules! impl_reflect_methods {
    (@common) => {
        #[inline]
        fn type_name(&self) -> &'static str {
            ::core::any::type_name::<Self>()
        }
        #[inline]
        fn as_any(&self) -> &dyn ::core::any::Any {
            self
        }
        #[inline]
        fn as_any_mut(&mut self) -> &mut dyn ::core::any::Any {
            self
        }
        #[inline]
        fn into_any(self: Box<Self>) -> Box<dyn ::core::any::Any> {
            self
        }
        #[inline]
        fn as_reflect(&self) -> &dyn $crate::Reflect {
            self
        }
        #[inline]
        fn as_reflect_mut(&mut self) -> &mut dyn $crate::Reflect {
            self
        }
    };
    ($kind:ident) => {
        $crate::impls::impl_reflect_methods!(@common);

        #[inline]
        fn kind(&self) -> $crate::Kind {
            $crate::Kind::$kind
        }
        #[inline]
        fn shape(&self) -> $crate::Shape<'_> {
            $crate::Shape::$kind(self)
        }
        #[inline]
        fn shape_mut(&mut self) -> $crate::ShapeMut<'_> {
            $crate::ShapeMut::$kind(self)
        }
    };
}

pub(crate) use impl_reflect_methods;

// -----------------------------------------------------------------------------
// Modules

mod containers;
mod scalars;
mod tuples;
mod wrappers;

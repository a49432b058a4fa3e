//! Optional and nullable implementations for the standard wrappers.
//!
//! `Option<T>` is the [`Optional`] category. The owning pointers `Box`, `Rc`
//! and `Arc` are [`Nullable`]: always present on the write side, and reset to
//! a fresh default before a reader fills them.

use std::rc::Rc;
use std::sync::Arc;

use crate::ops::{Nullable, Optional};
use crate::reflection::Reflect;

// -----------------------------------------------------------------------------
// Option

impl<T: Reflect + Default> Reflect for Option<T> {
    impl_reflect_methods!(Optional);
}

impl<T: Reflect + Default> Optional for Option<T> {
    #[inline]
    fn is_present(&self) -> bool {
        self.is_some()
    }

    #[inline]
    fn value(&self) -> Option<&dyn Reflect> {
        self.as_ref().map(|value| value.as_reflect())
    }

    #[inline]
    fn value_mut(&mut self) -> Option<&mut dyn Reflect> {
        self.as_mut().map(|value| value.as_reflect_mut())
    }

    #[inline]
    fn set_default(&mut self) -> &mut dyn Reflect {
        self.insert(T::default()).as_reflect_mut()
    }
}

// -----------------------------------------------------------------------------
// Box

impl<T: Reflect + Default> Reflect for Box<T> {
    impl_reflect_methods!(Nullable);
}

impl<T: Reflect + Default> Nullable for Box<T> {
    #[inline]
    fn target(&self) -> Option<&dyn Reflect> {
        Some((**self).as_reflect())
    }

    fn reset_target(&mut self) -> &mut dyn Reflect {
        **self = T::default();
        (**self).as_reflect_mut()
    }
}

// -----------------------------------------------------------------------------
// Rc and Arc

/// Shared pointers need `T: Clone` so [`Rc::make_mut`] can hand out a unique
/// borrow; resetting installs a fresh allocation, leaving old sharers on the
/// previous value.
macro_rules! impl_shared_reflect {
    ($ty:ident) => {
        impl<T: Reflect + Default + Clone> Reflect for $ty<T> {
            impl_reflect_methods!(Nullable);
        }

        impl<T: Reflect + Default + Clone> Nullable for $ty<T> {
            #[inline]
            fn target(&self) -> Option<&dyn Reflect> {
                Some((**self).as_reflect())
            }

            fn reset_target(&mut self) -> &mut dyn Reflect {
                *self = $ty::new(T::default());
                $ty::make_mut(self).as_reflect_mut()
            }
        }
    };
}

impl_shared_reflect!(Rc);
impl_shared_reflect!(Arc);

// -----------------------------------------------------------------------------
// Tests

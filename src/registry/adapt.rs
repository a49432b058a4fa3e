/// Registers a struct by explicit per-field bindings, without touching the
/// type definition.
///
/// Each entry is `label: Type { binding }` where the label is an identifier
/// or a string literal (the serialized name) and the binding is one of:
///
/// - `field: ident`: direct binding; traversal borrows the named field in
///   place. The label may differ from the field name (renaming).
/// - `get: closure, set: closure`: accessor binding; the getter
///   (`|value| -> Type`) copies the current value out, the setter
///   (`|value, new|`) writes the read result back.
/// - `get: closure`: read-only accessor; reads into a snapshot that is
///   then discarded, so the field serializes but never deserializes.
///
/// Binding styles mix freely within one struct. Declaration order here is
/// the serialization order.
///
/// ```
/// #[derive(Default)]
/// pub struct Counter {
///     hits: u64,
/// }
///
/// impl Counter {
///     pub fn hits(&self) -> u64 { self.hits }
///     pub fn set_hits(&mut self, v: u64) { self.hits = v; }
/// }
///
/// omniform::adapt_struct! {
///     Counter {
///         hits: u64 { get: |c: &Counter| c.hits(), set: |c: &mut Counter, v| c.set_hits(v) },
///     }
/// }
///
/// let json = omniform::to_json(&Counter { hits: 3 }).unwrap();
/// assert_eq!(json.to_string(), r#"{"hits":3}"#);
/// ```
#[macro_export]
macro_rules! adapt_struct {
    // --- internal: serialized name of one entry ---
    (@name $label:ident) => {
        ::core::stringify!($label)
    };
    (@name $label:literal) => {
        $label
    };

    // --- internal: binding kind of one entry ---
    (@kind field: $field:ident) => {
        $crate::FieldKind::Direct
    };
    (@kind get: $get:expr, set: $set:expr) => {
        $crate::FieldKind::Accessor
    };
    (@kind get: $get:expr) => {
        $crate::FieldKind::Accessor
    };

    // --- internal: read borrow of one entry ---
    (@field_ref $this:expr, $fty:ty, field: $field:ident) => {
        $crate::FieldRef::Borrowed($crate::Reflect::as_reflect(&$this.$field))
    };
    (@field_ref $this:expr, $fty:ty, get: $get:expr $(, set: $set:expr)?) => {{
        let snapshot: $fty = ($get)($this);
        $crate::FieldRef::Computed(::std::boxed::Box::new(snapshot))
    }};

    // --- internal: write borrow of one entry ---
    (@field_mut $this:expr, $fty:ty, field: $field:ident) => {
        $crate::FieldMut::Place($crate::Reflect::as_reflect_mut(&mut $this.$field))
    };
    (@field_mut $this:expr, $fty:ty, get: $get:expr $(, set: $set:expr)?) => {{
        let snapshot: $fty = ($get)(&*$this);
        $crate::FieldMut::Virtual(::std::boxed::Box::new(snapshot))
    }};

    // --- internal: commit a read value into one entry ---
    (@commit $this:expr, $value:expr, $fty:ty, field: $field:ident) => {
        $this.$field = $value
    };
    (@commit $this:expr, $value:expr, $fty:ty, get: $get:expr, set: $set:expr) => {
        ($set)($this, $value)
    };
    (@commit $this:expr, $value:expr, $fty:ty, get: $get:expr) => {
        // Read-only binding: the snapshot is dropped.
        ::core::mem::drop($value)
    };

    // --- public surface ---
    ($ty:ty { $( $label:tt : $fty:ty { $($binding:tt)+ } ),+ $(,)? }) => {
        const _: () = {
            static REGISTRY: $crate::FieldRegistry = $crate::FieldRegistry::new(
                ::core::stringify!($ty),
                &[
                    $(
                        $crate::FieldDescriptor {
                            name: $crate::adapt_struct!(@name $label),
                            kind: $crate::adapt_struct!(@kind $($binding)+),
                        },
                    )+
                ],
            );

            impl $crate::Reflect for $ty {
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
                fn into_any(self: ::std::boxed::Box<Self>) -> ::std::boxed::Box<dyn ::core::any::Any> {
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
                #[inline]
                fn kind(&self) -> $crate::Kind {
                    $crate::Kind::Struct
                }
                #[inline]
                fn shape(&self) -> $crate::Shape<'_> {
                    $crate::Shape::Struct(self)
                }
                #[inline]
                fn shape_mut(&mut self) -> $crate::ShapeMut<'_> {
                    $crate::ShapeMut::Struct(self)
                }
            }

            impl $crate::Struct for $ty {
                #[inline]
                fn registry(&self) -> &'static $crate::FieldRegistry {
                    &REGISTRY
                }

                fn field_at(&self, index: usize) -> ::core::option::Option<$crate::FieldRef<'_>> {
                    let mut i = index;
                    $(
                        if i == 0 {
                            return ::core::option::Option::Some(
                                $crate::adapt_struct!(@field_ref self, $fty, $($binding)+),
                            );
                        }
                        i -= 1;
                    )+
                    let _ = i;
                    ::core::option::Option::None
                }

                fn field_at_mut(&mut self, index: usize) -> ::core::option::Option<$crate::FieldMut<'_>> {
                    let mut i = index;
                    $(
                        if i == 0 {
                            return ::core::option::Option::Some(
                                $crate::adapt_struct!(@field_mut self, $fty, $($binding)+),
                            );
                        }
                        i -= 1;
                    )+
                    let _ = i;
                    ::core::option::Option::None
                }

                fn set_field(
                    &mut self,
                    index: usize,
                    value: ::std::boxed::Box<dyn $crate::Reflect>,
                ) -> ::core::result::Result<(), ::std::boxed::Box<dyn $crate::Reflect>> {
                    let mut i = index;
                    $(
                        if i == 0 {
                            if !value.is::<$fty>() {
                                return ::core::result::Result::Err(value);
                            }
                            // The type check above makes this downcast total.
                            if let ::core::result::Result::Ok(taken) =
                                value.into_any().downcast::<$fty>()
                            {
                                $crate::adapt_struct!(@commit self, *taken, $fty, $($binding)+);
                            }
                            return ::core::result::Result::Ok(());
                        }
                        i -= 1;
                    )+
                    let _ = i;
                    ::core::result::Result::Err(value)
                }
            }
        };
    };
}

//! Derive support for `omniform`. See [`Reflect`].
#![cfg_attr(docsrs, feature(doc_cfg))]

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Field, Fields, FieldsNamed, LitStr, parse_macro_input, parse_quote};

static REFLECT_ATTRIBUTE_NAME: &str = "reflect";

/// # Struct Registration
///
/// `#[derive(Reflect)]` registers a named-field struct for traversal:
/// it implements `Reflect` and `Struct`, with every field bound directly
/// and listed in declaration order.
///
/// ```rust, ignore
/// #[derive(Reflect, Default)]
/// struct Track {
///     title: String,
///     #[reflect(rename = "duration")]
///     seconds: u32,
/// }
/// ```
///
/// ## Field Attributes
///
/// - `#[reflect(rename = "...")]`: serialized name of the field, when it
///   differs from the Rust name.
///
/// Serialized names must be unique; a duplicate is a compile-time error.
///
/// ## Unsupported Shapes
///
/// Enums, unions, tuple structs and unit structs have no named fields to
/// register and are rejected with a spanned error. Types that expose state
/// through accessors instead of public fields go through
/// `omniform::adapt_struct!`.
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let fields = named_fields(input)?;
    let names = serialized_names(fields)?;

    let ident = &input.ident;
    let type_name = ident.to_string();
    let field_count = names.len();

    let mut generics = input.generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!(::omniform::Reflect));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let descriptors = names.iter().map(|name| {
        quote! {
            ::omniform::FieldDescriptor {
                name: #name,
                kind: ::omniform::FieldKind::Direct,
            }
        }
    });

    let read_arms = fields.named.iter().enumerate().map(|(index, field)| {
        let member = &field.ident;
        quote! {
            #index => ::core::option::Option::Some(::omniform::FieldRef::Borrowed(
                ::omniform::Reflect::as_reflect(&self.#member),
            )),
        }
    });

    let write_arms = fields.named.iter().enumerate().map(|(index, field)| {
        let member = &field.ident;
        quote! {
            #index => ::core::option::Option::Some(::omniform::FieldMut::Place(
                ::omniform::Reflect::as_reflect_mut(&mut self.#member),
            )),
        }
    });

    let set_arms = fields.named.iter().enumerate().map(|(index, field)| {
        let member = &field.ident;
        let ty = &field.ty;
        quote! {
            #index => {
                if !value.is::<#ty>() {
                    return ::core::result::Result::Err(value);
                }
                // The type check above makes this downcast total.
                if let ::core::result::Result::Ok(taken) = value.into_any().downcast::<#ty>() {
                    self.#member = *taken;
                }
                ::core::result::Result::Ok(())
            }
        }
    });

    Ok(quote! {
        const _: () = {
            static FIELDS: [::omniform::FieldDescriptor; #field_count] = [#(#descriptors),*];
            static REGISTRY: ::omniform::FieldRegistry =
                ::omniform::FieldRegistry::new(#type_name, &FIELDS);

            impl #impl_generics ::omniform::Reflect for #ident #ty_generics #where_clause {
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
                fn as_reflect(&self) -> &dyn ::omniform::Reflect {
                    self
                }
                #[inline]
                fn as_reflect_mut(&mut self) -> &mut dyn ::omniform::Reflect {
                    self
                }
                #[inline]
                fn kind(&self) -> ::omniform::Kind {
                    ::omniform::Kind::Struct
                }
                #[inline]
                fn shape(&self) -> ::omniform::Shape<'_> {
                    ::omniform::Shape::Struct(self)
                }
                #[inline]
                fn shape_mut(&mut self) -> ::omniform::ShapeMut<'_> {
                    ::omniform::ShapeMut::Struct(self)
                }
            }

            impl #impl_generics ::omniform::Struct for #ident #ty_generics #where_clause {
                #[inline]
                fn registry(&self) -> &'static ::omniform::FieldRegistry {
                    &REGISTRY
                }

                fn field_at(
                    &self,
                    index: usize,
                ) -> ::core::option::Option<::omniform::FieldRef<'_>> {
                    match index {
                        #(#read_arms)*
                        _ => ::core::option::Option::None,
                    }
                }

                fn field_at_mut(
                    &mut self,
                    index: usize,
                ) -> ::core::option::Option<::omniform::FieldMut<'_>> {
                    match index {
                        #(#write_arms)*
                        _ => ::core::option::Option::None,
                    }
                }

                fn set_field(
                    &mut self,
                    index: usize,
                    value: ::std::boxed::Box<dyn ::omniform::Reflect>,
                ) -> ::core::result::Result<(), ::std::boxed::Box<dyn ::omniform::Reflect>> {
                    match index {
                        #(#set_arms)*
                        _ => ::core::result::Result::Err(value),
                    }
                }
            }
        };
    })
}

fn named_fields(input: &DeriveInput) -> syn::Result<&FieldsNamed> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "`#[derive(Reflect)]` only supports structs with named fields",
        ));
    };
    match &data.fields {
        Fields::Named(fields) => Ok(fields),
        Fields::Unnamed(_) | Fields::Unit => Err(syn::Error::new_spanned(
            &input.ident,
            "`#[derive(Reflect)]` only supports structs with named fields",
        )),
    }
}

/// Serialized names in declaration order, renames applied, duplicates
/// rejected.
fn serialized_names(fields: &FieldsNamed) -> syn::Result<Vec<String>> {
    let mut names = Vec::with_capacity(fields.named.len());
    for field in &fields.named {
        let name = serialized_name(field)?;
        if names.contains(&name) {
            return Err(syn::Error::new_spanned(
                &field.ident,
                format!("duplicate serialized field name `{name}`"),
            ));
        }
        names.push(name);
    }
    Ok(names)
}

fn serialized_name(field: &Field) -> syn::Result<String> {
    let mut name = match &field.ident {
        Some(ident) => ident.unraw().to_string(),
        None => String::new(),
    };
    for attr in &field.attrs {
        if !attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                let value: LitStr = meta.value()?.parse()?;
                name = value.value();
                Ok(())
            } else {
                Err(meta.error("unknown reflect attribute, expected `rename`"))
            }
        })?;
    }
    Ok(name)
}

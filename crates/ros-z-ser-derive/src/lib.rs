//! Derive macro for ros-z-ser message serializers
//!
//! `#[derive(Message)]` declares a record's field traversal once and expands
//! it into the write, read and length directions, implementing both
//! `ros_z_ser::Message` and `ros_z_ser::Serializer`.

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Attribute, Data, DeriveInput, Fields, Ident, Index, Member, WherePredicate, parse_macro_input,
    parse_quote,
};

/// Derive `Message` and `Serializer` for a struct
///
/// Fields are serialized in declaration order.
///
/// Container attributes:
/// - `#[ros(fixed_size)]`: every value has the same serialized length.
/// - `#[ros(simple)]`: the struct is bit-copyable; it must also implement
///   `bytemuck::Pod`. Every field is on the wire, so the field attributes
///   below are rejected.
///
/// Field attributes:
/// - `#[ros(skip)]`: not on the wire, left untouched by reads.
/// - `#[ros(serialized_length)]`: not on the wire; a `usize` field that
///   receives the byte count consumed by the last read.
///
/// # Example
/// ```ignore
/// #[derive(Debug, Default, ros_z_ser::Message)]
/// pub struct Header {
///     pub seq: u32,
///     pub stamp: ros_z_ser::Time,
///     pub frame_id: String,
/// }
/// ```
#[proc_macro_derive(Message, attributes(ros))]
pub fn derive_message(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match impl_message(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

#[derive(Default)]
struct ContainerOptions {
    simple: bool,
    fixed_size: bool,
}

impl ContainerOptions {
    /// Simple wins over fixed-size, fixed-size over variable.
    fn strategy(&self) -> Ident {
        let name = if self.simple {
            "BulkCopy"
        } else if self.fixed_size {
            "FixedElementwise"
        } else {
            "VariableElementwise"
        };
        Ident::new(name, proc_macro2::Span::call_site())
    }
}

#[derive(Default)]
struct FieldOptions {
    skip: bool,
    serialized_length: bool,
}

fn parse_container_options(attrs: &[Attribute]) -> syn::Result<ContainerOptions> {
    let mut options = ContainerOptions::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("ros")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("simple") {
                options.simple = true;
                Ok(())
            } else if meta.path.is_ident("fixed_size") {
                options.fixed_size = true;
                Ok(())
            } else {
                Err(meta.error("expected `simple` or `fixed_size`"))
            }
        })?;
    }
    Ok(options)
}

fn parse_field_options(attrs: &[Attribute]) -> syn::Result<FieldOptions> {
    let mut options = FieldOptions::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("ros")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                options.skip = true;
                Ok(())
            } else if meta.path.is_ident("serialized_length") {
                options.serialized_length = true;
                Ok(())
            } else {
                Err(meta.error("expected `skip` or `serialized_length`"))
            }
        })?;
    }
    Ok(options)
}

fn impl_message(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;

    let Data::Struct(ref data) = input.data else {
        return Err(syn::Error::new_spanned(
            input,
            "Message can only be derived for structs",
        ));
    };

    let container = parse_container_options(&input.attrs)?;
    let strategy = container.strategy();

    let mut members: Vec<Member> = Vec::new();
    let mut wire_types = Vec::new();
    let mut length_member: Option<Member> = None;

    let fields: Vec<&syn::Field> = match &data.fields {
        Fields::Named(named) => named.named.iter().collect(),
        Fields::Unnamed(unnamed) => unnamed.unnamed.iter().collect(),
        Fields::Unit => Vec::new(),
    };

    for (index, field) in fields.into_iter().enumerate() {
        let member = match &field.ident {
            Some(ident) => Member::Named(ident.clone()),
            None => Member::Unnamed(Index::from(index)),
        };
        let options = parse_field_options(&field.attrs)?;

        // A simple struct is bulk-copied whole, off-wire fields included
        if container.simple && (options.skip || options.serialized_length) {
            return Err(syn::Error::new_spanned(
                field,
                "#[ros(simple)] structs cannot have #[ros(skip)] or #[ros(serialized_length)] fields",
            ));
        }

        if options.serialized_length {
            if length_member.is_some() {
                return Err(syn::Error::new_spanned(
                    field,
                    "only one field may be marked #[ros(serialized_length)]",
                ));
            }
            length_member = Some(member);
            continue;
        }
        if options.skip {
            continue;
        }
        members.push(member);
        wire_types.push(field.ty.clone());
    }

    let mut generics = input.generics.clone();
    if !generics.params.is_empty() {
        let where_clause = generics.make_where_clause();
        for ty in &wire_types {
            let predicate: WherePredicate = parse_quote!(#ty: ::ros_z_ser::Serializer);
            where_clause.predicates.push(predicate);
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let set_serialized_length = length_member.map(|member| {
        quote! {
            #[inline]
            fn set_serialized_length(&mut self, len: usize) {
                self.#member = len;
            }
        }
    });

    Ok(quote! {
        impl #impl_generics ::ros_z_ser::Message for #name #ty_generics #where_clause {
            #[inline]
            #[allow(unused_variables)]
            fn write_fields(
                &self,
                stream: &mut ::ros_z_ser::OStream<'_>,
            ) -> ::ros_z_ser::Result<()> {
                #( stream.next(&self.#members)?; )*
                ::core::result::Result::Ok(())
            }

            #[inline]
            #[allow(unused_variables)]
            fn read_fields(
                &mut self,
                stream: &mut ::ros_z_ser::IStream<'_>,
            ) -> ::ros_z_ser::Result<()> {
                #( stream.next(&mut self.#members)?; )*
                ::core::result::Result::Ok(())
            }

            #[inline]
            #[allow(unused_variables)]
            fn fields_length(&self, stream: &mut ::ros_z_ser::LStream) {
                #( stream.next(&self.#members); )*
            }

            #set_serialized_length
        }

        impl #impl_generics ::ros_z_ser::Serializer for #name #ty_generics #where_clause {
            type Strategy = ::ros_z_ser::strategy::#strategy;

            #[inline]
            fn write(&self, stream: &mut ::ros_z_ser::OStream<'_>) -> ::ros_z_ser::Result<()> {
                ::ros_z_ser::message::write_message(self, stream)
            }

            #[inline]
            fn read(&mut self, stream: &mut ::ros_z_ser::IStream<'_>) -> ::ros_z_ser::Result<()> {
                ::ros_z_ser::message::read_message(self, stream)
            }

            #[inline]
            fn serialized_length(&self, stream: &mut ::ros_z_ser::LStream) {
                ::ros_z_ser::message::message_length(self, stream)
            }
        }
    })
}

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{
    ext::IdentExt, parse_macro_input, punctuated::Punctuated, token::Comma, Data, DeriveInput,
    Field, Fields, GenericArgument, Ident, PathArguments, Type,
};

/// Generates chainable `with_*` setters for an apply configuration.
///
/// * `Option<T>` fields get `with_x(value)` storing `Some(value)`, last call wins
/// * `Option<BTreeMap<K, V>>` fields get `with_x(entries)` inserting entries, existing keys are overwritten
/// * `Vec<T>` fields get `with_x(values)` appending values; elements are anything convertible into
///   `Option<T>` and a `None` element panics with `nil value passed to with_x`
///
/// `#[apply(plain)]` on a `Vec<T>` field takes plain `Into<T>` values instead,
/// `#[apply(skip)]` omits the setter entirely.
#[proc_macro_derive(ApplyBuilder, attributes(apply))]
pub fn derive_apply_builder(input: TokenStream) -> TokenStream {
    let DeriveInput {
        ident: struct_ident,
        generics,
        data,
        ..
    } = parse_macro_input!(input as DeriveInput);
    let (impl_generics, type_generics, where_clause) = generics.split_for_impl();
    let fields = match data {
        Data::Struct(s) => match s.fields {
            Fields::Named(fields) => fields.named,
            _ => panic!("This derive macro is only applicable to named structs!"),
        },
        _ => panic!("This derive macro is only applicable to named structs!"),
    };
    let mut setters = Vec::new();

    for field in &fields {
        match parse_apply_flags(field) {
            Ok(flags) if flags.skip => (),
            Ok(flags) => setters.push(generate_setter(field, &flags)),
            Err(error) => return error.to_compile_error().into(),
        }
    }

    let output = quote! {
        impl #impl_generics #struct_ident #type_generics #where_clause {
            #(#setters)*
        }
    };

    output.into()
}

#[proc_macro_derive(TableOutputRow, attributes(name_column))]
pub fn derive_output_display(input: TokenStream) -> TokenStream {
    let parsed_input = parse_macro_input!(input as DeriveInput);
    let struct_ident = parsed_input.ident;
    let (impl_generics, type_generics, where_clause) = parsed_input.generics.split_for_impl();
    let parsed_struct = match parsed_input.data {
        Data::Struct(s) => s,
        _ => panic!("This derive macro is only applicable to named structs!"),
    };
    let fields = match parsed_struct.fields {
        Fields::Named(fields) => fields.named,
        _ => panic!("This derive macro is only applicable to named structs!"),
    };
    let name_field = get_name_column_field(&fields);
    let column_names = get_column_names(&fields);
    let field_names = fields
        .iter()
        .map(|f| f.ident.as_ref().unwrap())
        .collect::<Vec<_>>();
    let field_count = field_names.len();

    let output = quote! {
        impl #impl_generics crate::output::TableOutputRow for #struct_ident #type_generics #where_clause {
            fn get_name(&self) -> ::std::string::String {
                ::std::string::ToString::to_string(&self.#name_field)
            }

            fn get_column_names() -> ::std::vec::Vec<::std::string::String> {
                ::std::vec![#(#column_names.to_owned()),*]
            }

            fn get_column_count() -> usize {
                #field_count
            }

            fn get_row(&self) -> ::std::vec::Vec<::std::string::String> {
                ::std::vec![#(::std::string::ToString::to_string(&self.#field_names)),*]
            }
        }
    };

    output.into()
}

fn generate_setter(field: &Field, flags: &ApplyFlags) -> TokenStream2 {
    let field_ident = field.ident.as_ref().unwrap();
    let field_name = field_ident.unraw().to_string();
    let field_name = field_name.trim_end_matches('_');
    let setter_ident = format_ident!("with_{}", field_name);

    if let Some(inner) = unwrap_generic(&field.ty, "Vec") {
        if flags.plain {
            let doc = format!(
                "Appends the given values to the `{field_name}` field and returns the receiver."
            );

            return quote! {
                #[doc = #doc]
                pub fn #setter_ident<I, V>(mut self, values: I) -> Self
                where
                    I: ::std::iter::IntoIterator<Item = V>,
                    V: ::std::convert::Into<#inner>,
                {
                    for value in values {
                        self.#field_ident.push(value.into());
                    }

                    self
                }
            };
        }

        let doc = format!(
            "Appends the given values to the `{field_name}` field and returns the receiver.\n\n\
            Panics if any of the values is `None`."
        );
        let panic_message = format!("nil value passed to {setter_ident}");

        return quote! {
            #[doc = #doc]
            pub fn #setter_ident<I, V>(mut self, values: I) -> Self
            where
                I: ::std::iter::IntoIterator<Item = V>,
                V: ::std::convert::Into<::std::option::Option<#inner>>,
            {
                for value in values {
                    match value.into() {
                        ::std::option::Option::Some(value) => self.#field_ident.push(value),
                        ::std::option::Option::None => ::std::panic!("{}", #panic_message),
                    }
                }

                self
            }
        };
    }

    if let Some(inner) = unwrap_generic(&field.ty, "Option") {
        if let Some((key, value)) = map_arguments(inner) {
            let doc = format!(
                "Puts the given entries into the `{field_name}` field and returns the receiver.\n\n\
                Entries with an already present key overwrite the previous value."
            );

            return quote! {
                #[doc = #doc]
                pub fn #setter_ident<I, K, V>(mut self, entries: I) -> Self
                where
                    I: ::std::iter::IntoIterator<Item = (K, V)>,
                    K: ::std::convert::Into<#key>,
                    V: ::std::convert::Into<#value>,
                {
                    for (key, value) in entries {
                        self.#field_ident
                            .get_or_insert_with(::std::default::Default::default)
                            .insert(key.into(), value.into());
                    }

                    self
                }
            };
        }

        let doc = format!(
            "Sets the `{field_name}` field and returns the receiver.\n\n\
            If called multiple times, the field is set to the value of the last call."
        );

        return quote! {
            #[doc = #doc]
            pub fn #setter_ident(mut self, value: impl ::std::convert::Into<#inner>) -> Self {
                self.#field_ident = ::std::option::Option::Some(value.into());

                self
            }
        };
    }

    let ty = &field.ty;
    let doc = format!("Sets the `{field_name}` field and returns the receiver.");

    quote! {
        #[doc = #doc]
        pub fn #setter_ident(mut self, value: impl ::std::convert::Into<#ty>) -> Self {
            self.#field_ident = value.into();

            self
        }
    }
}

#[derive(Debug, Default, PartialEq)]
struct ApplyFlags {
    skip: bool,
    plain: bool,
}

fn parse_apply_flags(field: &Field) -> syn::Result<ApplyFlags> {
    let mut flags = ApplyFlags::default();

    for attr in field.attrs.iter().filter(|a| a.path().is_ident("apply")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                flags.skip = true;
            } else if meta.path.is_ident("plain") {
                flags.plain = true;
            } else {
                return Err(meta.error("unsupported apply attribute, expected `skip` or `plain`"));
            }

            Ok(())
        })?;
    }

    Ok(flags)
}

fn generic_arguments<'a>(ty: &'a Type, wrapper: &str) -> Option<Vec<&'a Type>> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;

    if segment.ident != wrapper {
        return None;
    }

    let PathArguments::AngleBracketed(arguments) = &segment.arguments else {
        return None;
    };

    Some(
        arguments
            .args
            .iter()
            .filter_map(|a| match a {
                GenericArgument::Type(ty) => Some(ty),
                _ => None,
            })
            .collect(),
    )
}

fn unwrap_generic<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    match generic_arguments(ty, wrapper)?.as_slice() {
        [inner] => Some(*inner),
        _ => None,
    }
}

fn map_arguments(ty: &Type) -> Option<(&Type, &Type)> {
    match generic_arguments(ty, "BTreeMap")?.as_slice() {
        [key, value] => Some((*key, *value)),
        _ => None,
    }
}

fn get_column_names(fields: &Punctuated<Field, Comma>) -> impl Iterator<Item = String> + '_ {
    fields
        .iter()
        .map(|f| f.ident.as_ref().unwrap().to_string().replace('_', " ").to_uppercase())
}

fn get_name_column_field(fields: &Punctuated<Field, Comma>) -> &Ident {
    fields
        .iter()
        .find(|f| {
            f.attrs
                .iter()
                .any(|a| a.meta.path().is_ident("name_column"))
        })
        .expect("This struct is missing a 'name_column' attribute!")
        .ident
        .as_ref()
        .unwrap()
}

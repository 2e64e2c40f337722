use fxhash::FxHashSet;
use proc_macro2::TokenStream;
use quote::{ToTokens, format_ident, quote};
use syn::{Attribute, Data, DeriveInput, Field, Fields, Ident, Type};

const CONTEXT_FORMS: &[&str] = &[
    "Option<Cow<'static,str>>",
    "Option<std::borrow::Cow<'static,str>>",
    "std::option::Option<std::borrow::Cow<'static,str>>",
];

struct SourceField<'a> {
    ident: &'a Ident,
    ty: &'a Type,
}

struct ErrorVariant<'a> {
    ident: &'a Ident,
    source: Option<SourceField<'a>>,
    has_context: bool,
    has_message: bool,
    cfg: Vec<&'a Attribute>,
}

struct ErrorEnum<'a> {
    name: &'a Ident,
    ext: Ident,
    variants: Vec<ErrorVariant<'a>>,
}

pub(crate) fn expand(input: DeriveInput) -> TokenStream {
    match ErrorEnum::analyze(&input) {
        Ok(error) => error.generate(&input),
        Err(err) => err.to_compile_error(),
    }
}

impl<'a> ErrorEnum<'a> {
    fn analyze(input: &'a DeriveInput) -> syn::Result<Self> {
        let Data::Enum(data) = &input.data else {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "dskit_error can only be applied to enums",
            ));
        };

        let variants =
            data.variants.iter().map(ErrorVariant::analyze).collect::<syn::Result<Vec<_>>>()?;

        Ok(Self { name: &input.ident, ext: format_ident!("{}Ext", input.ident), variants })
    }

    fn generate(&self, input: &DeriveInput) -> TokenStream {
        let derives = missing_derives(&input.attrs);
        let context_trait = self.context_trait();
        let conversions = self.variants.iter().filter_map(|v| self.source_conversion(v));
        let internal = self.internal_conversions();

        quote! {
            #[allow(non_shorthand_field_patterns)]
            #derives
            #input

            #context_trait
            #(#conversions)*
            #internal

            #[allow(dead_code)]
            fn format_context(
                context: &Option<std::borrow::Cow<'static, str>>,
            ) -> std::borrow::Cow<'static, str> {
                match context {
                    Some(c) => std::borrow::Cow::Owned(format!(" ({c})")),
                    None => std::borrow::Cow::Borrowed(""),
                }
            }
        }
    }

    fn context_trait(&self) -> TokenStream {
        let name = self.name;
        let ext = &self.ext;
        let arms = self.variants.iter().filter(|v| v.has_context).map(|v| {
            let ident = v.ident;
            let cfg = &v.cfg;
            quote! { #(#cfg)* #name::#ident { context: slot, .. } => *slot = Some(context.into()), }
        });

        quote! {
            pub trait #ext<T> {
                /// Attaches a human-readable context to the error.
                ///
                /// # Errors
                /// Returns the (possibly converted) error with the context attached.
                fn context(
                    self,
                    context: impl Into<std::borrow::Cow<'static, str>>,
                ) -> std::result::Result<T, #name>;
            }

            #[automatically_derived]
            impl<T> #ext<T> for std::result::Result<T, #name> {
                #[inline]
                fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> Self {
                    self.map_err(|mut err| {
                        match &mut err {
                            #(#arms)*
                            #[allow(unreachable_patterns)]
                            _ => {}
                        }
                        err
                    })
                }
            }
        }
    }

    fn source_conversion(&self, variant: &ErrorVariant<'_>) -> Option<TokenStream> {
        if variant.ident == "Internal" {
            return None;
        }
        let source = variant.source.as_ref()?;
        let name = self.name;
        let ext = &self.ext;
        let ident = variant.ident;
        let field = source.ident;
        let ty = source.ty;
        let cfg = &variant.cfg;

        Some(quote! {
            #(#cfg)*
            #[automatically_derived]
            impl From<#ty> for #name {
                #[inline]
                fn from(#field: #ty) -> Self {
                    Self::#ident { #field, context: None }
                }
            }

            #(#cfg)*
            #[automatically_derived]
            impl<T> #ext<T> for std::result::Result<T, #ty> {
                #[inline]
                fn context(
                    self,
                    context: impl Into<std::borrow::Cow<'static, str>>,
                ) -> std::result::Result<T, #name> {
                    self.map_err(|#field| #name::#ident { #field, context: Some(context.into()) })
                }
            }
        })
    }

    fn internal_conversions(&self) -> TokenStream {
        let Some(internal) = self
            .variants
            .iter()
            .find(|v| v.ident == "Internal" && v.has_message && v.has_context)
        else {
            return TokenStream::new();
        };
        let name = self.name;
        let cfg = &internal.cfg;

        quote! {
            #(#cfg)*
            #[automatically_derived]
            impl From<&'static str> for #name {
                #[inline]
                fn from(message: &'static str) -> Self {
                    Self::Internal { message: std::borrow::Cow::Borrowed(message), context: None }
                }
            }

            #(#cfg)*
            #[automatically_derived]
            impl From<String> for #name {
                #[inline]
                fn from(message: String) -> Self {
                    Self::Internal { message: std::borrow::Cow::Owned(message), context: None }
                }
            }
        }
    }
}

impl<'a> ErrorVariant<'a> {
    fn analyze(variant: &'a syn::Variant) -> syn::Result<Self> {
        let Fields::Named(fields) = &variant.fields else {
            return Err(syn::Error::new_spanned(
                variant,
                "dskit_error variants must use named fields",
            ));
        };

        let mut source = None;
        let mut has_context = false;
        let mut has_message = false;

        for field in &fields.named {
            let Some(ident) = &field.ident else { continue };
            if ident == "context" {
                if !is_context_type(&field.ty) {
                    return Err(syn::Error::new_spanned(
                        &field.ty,
                        "context field must be Option<Cow<'static, str>>",
                    ));
                }
                has_context = true;
            } else if ident == "message" {
                has_message = true;
            } else if ident == "source" || has_attr(field, "source") || has_attr(field, "from") {
                source = Some(SourceField { ident, ty: &field.ty });
            }
        }

        if source.is_some() && !has_context {
            return Err(syn::Error::new_spanned(
                &variant.ident,
                "variants with a source need `context: Option<Cow<'static, str>>`",
            ));
        }

        let cfg = variant.attrs.iter().filter(|attr| attr.path().is_ident("cfg")).collect();

        Ok(Self { ident: &variant.ident, source, has_context, has_message, cfg })
    }
}

fn has_attr(field: &Field, name: &str) -> bool {
    field.attrs.iter().any(|attr| attr.path().is_ident(name))
}

fn is_context_type(ty: &Type) -> bool {
    let rendered: String =
        ty.to_token_stream().to_string().chars().filter(|c| !c.is_whitespace()).collect();
    CONTEXT_FORMS.contains(&rendered.as_str())
}

fn missing_derives(attrs: &[Attribute]) -> TokenStream {
    let mut present = FxHashSet::default();
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("derive")) {
        let _ = attr.parse_nested_meta(|meta| {
            if let Some(segment) = meta.path.segments.last() {
                present.insert(segment.ident.to_string());
            }
            Ok(())
        });
    }

    let mut wanted = Vec::new();
    if !present.contains("Debug") {
        wanted.push(quote! { Debug });
    }
    if !present.contains("Error") {
        wanted.push(quote! { ::thiserror::Error });
    }

    if wanted.is_empty() { TokenStream::new() } else { quote! { #[derive(#(#wanted),*)] } }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn expand_str(input: DeriveInput) -> String {
        expand(input).to_string()
    }

    #[test]
    fn generates_conversions_for_source_variants() {
        let out = expand_str(parse_quote! {
            pub enum DemoError {
                #[error("io")]
                Io { source: std::io::Error, context: Option<Cow<'static, str>> },
            }
        });

        assert!(out.contains("impl From < std :: io :: Error > for DemoError"));
        assert!(out.contains("pub trait DemoErrorExt"));
    }

    #[test]
    fn generates_internal_string_conversions() {
        let out = expand_str(parse_quote! {
            pub enum DemoError {
                #[error("internal")]
                Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
            }
        });

        assert!(out.contains("impl From < & 'static str > for DemoError"));
        assert!(out.contains("impl From < String > for DemoError"));
    }

    #[test]
    fn rejects_source_without_context() {
        let out = expand_str(parse_quote! {
            pub enum DemoError {
                #[error("io")]
                Io { source: std::io::Error },
            }
        });

        assert!(out.contains("compile_error"));
    }

    #[test]
    fn rejects_tuple_variants_and_structs() {
        let tuple = expand_str(parse_quote! {
            pub enum DemoError {
                #[error("io")]
                Io(std::io::Error),
            }
        });
        assert!(tuple.contains("compile_error"));

        let strukt = expand_str(parse_quote! {
            pub struct NotAnEnum { message: String }
        });
        assert!(strukt.contains("compile_error"));
    }

    #[test]
    fn keeps_existing_derives() {
        let out = expand_str(parse_quote! {
            #[derive(Debug)]
            pub enum DemoError {
                #[error("internal")]
                Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
            }
        });

        assert_eq!(out.matches("Debug").count(), 1);
        assert!(out.contains(":: thiserror :: Error"));
    }

    #[test]
    fn context_type_is_checked() {
        assert!(is_context_type(&parse_quote!(Option<Cow<'static, str>>)));
        assert!(is_context_type(&parse_quote!(Option<std::borrow::Cow<'static, str>>)));
        assert!(!is_context_type(&parse_quote!(Option<String>)));
    }
}

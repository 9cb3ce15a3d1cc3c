use crate::derive_utils::{apply_derives, bool_literal};
use proc_macro::TokenStream;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Item, Result, Token, parse::Parse, parse::ParseStream, parse_macro_input};

/// #[value_object] 宏实现
/// - 支持结构体（具名或 tuple）与枚举
/// - 合并/追加派生：Default（可关闭）, Clone, Debug（可关闭）, Serialize, Deserialize, PartialEq, Eq
/// - 参数：`#[value_object(debug = .., default = .., validate = ..)]`，
///   `debug`/`default` 默认 true，`validate` 默认 false。
///   带校验规则的值对象（例如非空名称）应设置 `default = false, validate = true`：
///   反序列化经由生成的 `TryFrom<Inner>` 调用 `ValueObject::validate`，非法输入被拒绝。
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let cfg = parse_macro_input!(attr as ValueObjectAttrConfig);
    let mut input = parse_macro_input!(item as Item);

    let mut required: Vec<syn::Path> = vec![
        syn::parse_quote!(Clone),
        syn::parse_quote!(serde::Serialize),
        syn::parse_quote!(serde::Deserialize),
        syn::parse_quote!(PartialEq),
        syn::parse_quote!(Eq),
    ];
    if cfg.derive_default {
        required.insert(0, syn::parse_quote!(Default));
    }
    if cfg.derive_debug {
        required.insert(0, syn::parse_quote!(Debug));
    }

    match &mut input {
        Item::Struct(st) => {
            apply_derives(&mut st.attrs, required);
            if !cfg.validate {
                return TokenStream::from(quote! { #st });
            }

            let inner_ty = match &st.fields {
                syn::Fields::Unnamed(f) if f.unnamed.len() == 1 => f.unnamed[0].ty.clone(),
                _ => {
                    return syn::Error::new(
                        st.span(),
                        "`validate = true` requires a single-field tuple struct",
                    )
                    .to_compile_error()
                    .into();
                }
            };
            let inner_name = quote!(#inner_ty).to_string();
            st.attrs.push(syn::parse_quote!(#[serde(try_from = #inner_name)]));

            let ident = &st.ident;
            let (impl_generics, ty_generics, where_clause) = st.generics.split_for_impl();
            TokenStream::from(quote! {
                #st

                impl #impl_generics ::core::convert::TryFrom<#inner_ty> for #ident #ty_generics #where_clause {
                    type Error = <Self as ::libris_domain::value_object::ValueObject>::Error;

                    fn try_from(value: #inner_ty) -> ::core::result::Result<Self, Self::Error> {
                        let vo = Self(value);
                        ::libris_domain::value_object::ValueObject::validate(&vo)?;
                        Ok(vo)
                    }
                }
            })
        }
        Item::Enum(en) => {
            if cfg.validate {
                return syn::Error::new(en.span(), "`validate = true` is not supported on enums")
                    .to_compile_error()
                    .into();
            }
            apply_derives(&mut en.attrs, required);
            TokenStream::from(quote! { #en })
        }
        other => syn::Error::new(other.span(), "#[value_object] only supports struct or enum")
            .to_compile_error()
            .into(),
    }
}

// -------- parsing --------

struct ValueObjectAttrConfig {
    derive_debug: bool,
    derive_default: bool,
    validate: bool,
}

impl Parse for ValueObjectAttrConfig {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut derive_debug: Option<bool> = None;
        let mut derive_default: Option<bool> = None;
        let mut validate: Option<bool> = None;

        let pairs: Punctuated<syn::MetaNameValue, Token![,]> = Punctuated::parse_terminated(input)?;
        for pair in pairs {
            let (key, slot) = if pair.path.is_ident("debug") {
                ("debug", &mut derive_debug)
            } else if pair.path.is_ident("default") {
                ("default", &mut derive_default)
            } else if pair.path.is_ident("validate") {
                ("validate", &mut validate)
            } else {
                return Err(syn::Error::new(
                    pair.path.span(),
                    "unknown key in attribute; expected 'debug', 'default' or 'validate'",
                ));
            };
            if slot.is_some() {
                return Err(syn::Error::new(
                    pair.path.span(),
                    format!("duplicate key '{key}' in attribute"),
                ));
            }
            *slot = Some(bool_literal(pair.value, key)?);
        }

        Ok(Self {
            derive_debug: derive_debug.unwrap_or(true),
            derive_default: derive_default.unwrap_or(true),
            validate: validate.unwrap_or(false),
        })
    }
}

use quote::ToTokens;
use std::collections::HashSet;
use syn::punctuated::Punctuated;
use syn::{Attribute, Expr, ExprLit, Lit, Path, Token};

// 将 attrs 拆为（非 derive 属性, 已有 derive 路径）
fn split_derives(attrs: &[Attribute]) -> (Vec<Attribute>, Vec<Path>) {
    let mut retained = Vec::new();
    let mut existing = Vec::new();
    for attr in attrs {
        if !attr.path().is_ident("derive") {
            retained.push(attr.clone());
            continue;
        }
        if let Ok(list) = attr.parse_args_with(Punctuated::<Path, Token![,]>::parse_terminated) {
            existing.extend(list);
        }
    }
    (retained, existing)
}

// Serialize 与 serde::Serialize 视为同一派生
fn derive_key(p: &Path) -> String {
    match p.segments.last() {
        Some(last) => {
            let name = last.ident.to_string();
            if name == "Serialize" || name == "Deserialize" {
                format!("serde::{name}")
            } else {
                name
            }
        }
        None => p.to_token_stream().to_string(),
    }
}

/// 合并宏要求的派生与用户已写的派生，去重后写回为单个 `#[derive(..)]`
pub(crate) fn apply_derives(attrs: &mut Vec<Attribute>, required: Vec<Path>) {
    let (retained, existing) = split_derives(attrs);

    let mut seen = HashSet::new();
    let merged: Vec<Path> = required
        .into_iter()
        .chain(existing)
        .filter(|p| seen.insert(derive_key(p)))
        .collect();

    let derive: Attribute = syn::parse_quote!(#[derive(#(#merged),*)]);
    *attrs = std::iter::once(derive).chain(retained).collect();
}

/// 解析 `key = true|false` 中的布尔字面量
pub(crate) fn bool_literal(expr: Expr, key: &str) -> syn::Result<bool> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Bool(b), ..
        }) => Ok(b.value()),
        other => Err(syn::Error::new_spanned(
            other,
            format!("expected boolean literal for '{key}'"),
        )),
    }
}

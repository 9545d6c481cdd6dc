//! `#[derive(TraitAxis)]`: turns a fieldless enum into a fixed attribute table.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Ident, LitStr, spanned::Spanned};

/// Every trait axis carries exactly this many values.
const AXIS_LEN: usize = 10;

const AXES: &[&str] = &["Species", "Equipment", "Realm", "Curse"];

pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let enum_ident = &input.ident;

    let Data::Enum(data_enum) = &input.data else {
        return Err(syn::Error::new(
            enum_ident.span(),
            "TraitAxis can only be derived for enums",
        ));
    };

    let axis = axis_ident(input)?;

    if data_enum.variants.len() != AXIS_LEN {
        return Err(syn::Error::new(
            enum_ident.span(),
            format!(
                "TraitAxis enums must have exactly {AXIS_LEN} variants, found {}",
                data_enum.variants.len()
            ),
        ));
    }

    let mut entries = Vec::with_capacity(AXIS_LEN);
    let mut ordinal_arms = Vec::with_capacity(AXIS_LEN);

    for (ordinal, variant) in data_enum.variants.iter().enumerate() {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new(
                variant.span(),
                "TraitAxis only supports fieldless variants",
            ));
        }

        let (name, asset) = entry_attr(variant)?;
        let ident = &variant.ident;
        let ordinal = ordinal as u8;

        entries.push(quote! {
            monstergen::AttributeEntry {
                value: Self::#ident,
                ordinal: #ordinal,
                display_name: #name,
                asset_ref: #asset,
            }
        });
        ordinal_arms.push(quote! { Self::#ident => #ordinal });
    }

    Ok(quote! {
        impl monstergen::AxisValue for #enum_ident {
            const AXIS: monstergen::TraitAxis = monstergen::TraitAxis::#axis;
            const ENTRIES: &'static [monstergen::AttributeEntry<Self>] = &[
                #(#entries),*
            ];

            #[inline]
            fn ordinal(self) -> u8 {
                match self {
                    #(#ordinal_arms),*
                }
            }
        }

        impl ::core::fmt::Display for #enum_ident {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(<Self as monstergen::AxisValue>::display_name(*self))
            }
        }
    })
}

fn axis_ident(input: &DeriveInput) -> syn::Result<Ident> {
    let Some(attr) = input.attrs.iter().find(|a| a.path().is_ident("axis")) else {
        return Err(syn::Error::new(
            input.ident.span(),
            "missing #[axis(Species | Equipment | Realm | Curse)] on enum",
        ));
    };
    let ident: Ident = attr.parse_args()?;
    if !AXES.iter().any(|a| ident == *a) {
        return Err(syn::Error::new(
            ident.span(),
            format!("unknown axis `{ident}`, expected one of {}", AXES.join(", ")),
        ));
    }
    Ok(ident)
}

fn entry_attr(variant: &syn::Variant) -> syn::Result<(LitStr, LitStr)> {
    let Some(attr) = variant.attrs.iter().find(|a| a.path().is_ident("entry")) else {
        return Err(syn::Error::new(
            variant.span(),
            "missing #[entry(name = \"...\", asset = \"...\")] on variant",
        ));
    };

    let mut name = None;
    let mut asset = None;
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("name") {
            name = Some(meta.value()?.parse::<LitStr>()?);
            Ok(())
        } else if meta.path.is_ident("asset") {
            asset = Some(meta.value()?.parse::<LitStr>()?);
            Ok(())
        } else {
            Err(meta.error("expected `name` or `asset`"))
        }
    })?;

    match (name, asset) {
        (Some(name), Some(asset)) if !name.value().is_empty() => Ok((name, asset)),
        (Some(name), Some(_)) => Err(syn::Error::new(name.span(), "entry name must not be empty")),
        _ => Err(syn::Error::new(
            attr.span(),
            "#[entry] needs both `name` and `asset`",
        )),
    }
}

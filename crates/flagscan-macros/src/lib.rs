use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Data, DeriveInput, Expr, Field, Fields, Ident, LitStr, Result, Token,
    ext::IdentExt,
    parse::{Parse, ParseStream},
    parse_macro_input,
    spanned::Spanned,
};

/// Derive `flagscan::Flags` and `Default` for a struct with named fields.
///
/// Every field must carry a `#[flag(...)]` attribute:
///
/// ```ignore
/// #[derive(flagscan::Flags)]
/// struct ServerFlags {
///     #[flag("--port", alias = "-p", default = 8080)]
///     port: u16,
///     #[flag("--help", alias = "-h")]
///     help: bool,
///     #[flag("--tag")]
///     tags: Vec<String>,
/// }
/// ```
///
/// Names and aliases must start with `-` and must not be `--`; anything else
/// is rejected here, at compile time.
#[proc_macro_derive(Flags, attributes(flag))]
pub fn derive_flags(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand_flags(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

struct FlagAttr {
    name: LitStr,
    alias: Option<LitStr>,
    default: Option<Expr>,
}

impl Parse for FlagAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let name: LitStr = input.parse()?;
        let mut attr = Self {
            name,
            alias: None,
            default: None,
        };

        while !input.is_empty() {
            input.parse::<Token![,]>()?;
            if input.is_empty() {
                break;
            }
            // `default` is a contextual keyword, so accept any identifier here.
            let key = input.call(Ident::parse_any)?;
            input.parse::<Token![=]>()?;
            match key.to_string().as_str() {
                "alias" if attr.alias.is_none() => attr.alias = Some(input.parse()?),
                "default" if attr.default.is_none() => attr.default = Some(input.parse()?),
                "alias" | "default" => {
                    return Err(syn::Error::new(key.span(), format!("duplicate key: {key}")));
                }
                other => {
                    return Err(syn::Error::new(
                        key.span(),
                        format!("unknown flag key: {other} (expected `alias` or `default`)"),
                    ));
                }
            }
        }

        Ok(attr)
    }
}

struct FlagField<'a> {
    ident: &'a Ident,
    attr: FlagAttr,
}

fn expand_flags(input: DeriveInput) -> Result<proc_macro2::TokenStream> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new(
            input.ident.span(),
            "#[derive(Flags)] only supports structs",
        ));
    };
    let Fields::Named(named) = &data.fields else {
        return Err(syn::Error::new(
            data.fields.span(),
            "#[derive(Flags)] requires named fields",
        ));
    };

    let fields = named
        .named
        .iter()
        .map(flag_field)
        .collect::<Result<Vec<_>>>()?;

    let registrations = fields.iter().map(|f| {
        let ident = f.ident;
        let name = &f.attr.name;
        let alias = f.attr.alias.as_ref().unwrap_or(name);
        quote! { .aliased(#name, #alias, &mut self.#ident) }
    });

    let inits = fields.iter().map(|f| {
        let ident = f.ident;
        match &f.attr.default {
            Some(expr) => quote! { #ident: #expr },
            None => quote! { #ident: ::core::default::Default::default() },
        }
    });

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::flagscan::Flags for #ident #ty_generics #where_clause {
            fn schema(&mut self) -> ::flagscan::Schema<'_> {
                ::flagscan::Schema::builder()
                    #(#registrations)*
                    .build()
            }
        }

        impl #impl_generics ::core::default::Default for #ident #ty_generics #where_clause {
            fn default() -> Self {
                Self {
                    #(#inits),*
                }
            }
        }
    })
}

fn flag_field(field: &Field) -> Result<FlagField<'_>> {
    let Some(ident) = field.ident.as_ref() else {
        return Err(syn::Error::new(field.span(), "expected a named field"));
    };

    let mut attr: Option<FlagAttr> = None;
    for a in field.attrs.iter().filter(|a| a.path().is_ident("flag")) {
        if attr.is_some() {
            return Err(syn::Error::new(
                a.span(),
                "only one #[flag(...)] attribute per field",
            ));
        }
        attr = Some(a.parse_args()?);
    }
    let Some(attr) = attr else {
        return Err(syn::Error::new(
            ident.span(),
            format!("field `{ident}` is missing #[flag(\"--name\")]"),
        ));
    };

    validate_flag_name(&attr.name)?;
    if let Some(alias) = &attr.alias {
        validate_flag_name(alias)?;
    }

    Ok(FlagField { ident, attr })
}

// Same rule as `flagscan::FlagName::new`.
fn validate_flag_name(lit: &LitStr) -> Result<()> {
    let value = lit.value();
    if value.is_empty() {
        return Err(syn::Error::new(lit.span(), "flag name cannot be empty"));
    }
    if value == "--" {
        return Err(syn::Error::new(
            lit.span(),
            "flag name cannot be `--`, it terminates flag scanning",
        ));
    }
    if !value.starts_with('-') {
        return Err(syn::Error::new(
            lit.span(),
            format!("flag name `{value}` must start with `-`"),
        ));
    }
    Ok(())
}

use proc_macro2::TokenStream;
use quote::quote;
use relang_regular_expressions::{parse_regex, Regex};
use syn::parse::{Parse, ParseStream};
use syn::LitStr;

pub(crate) struct RegexInput {
    regex: Result<Regex<char>, syn::Error>,
}

impl Parse for RegexInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let source: LitStr = input.parse()?;
        let regex = parse_regex(source.value())
            .map_err(|e| syn::Error::new(source.span(), format!("invalid regex: {e}")));
        Ok(Self { regex })
    }
}

impl RegexInput {
    pub fn emit(&self) -> TokenStream {
        match &self.regex {
            Ok(regex) => {
                let expr = emit_regex(regex);
                quote!({
                    let regex: ::relang::Regex<char> = #expr;
                    regex
                })
            }
            Err(e) => e.to_compile_error(),
        }
    }
}

/// Rust code that constructs `regex`.
fn emit_regex(regex: &Regex<char>) -> TokenStream {
    match regex {
        Regex::Empty => quote!(::relang::Regex::Empty),
        Regex::Epsilon => quote!(::relang::Regex::Epsilon),
        Regex::Char(c) => quote!(::relang::Regex::Char(#c)),
        Regex::Concat(l, r) => {
            let l = emit_regex(l);
            let r = emit_regex(r);
            quote!(::relang::Regex::concat(#l, #r))
        }
        Regex::Union(l, r) => {
            let l = emit_regex(l);
            let r = emit_regex(r);
            quote!(::relang::Regex::union(#l, #r))
        }
        Regex::Star(inner) => {
            let inner = emit_regex(inner);
            quote!(::relang::Regex::star(#inner))
        }
    }
}

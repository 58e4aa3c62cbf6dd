use proc_macro::TokenStream;
use proc_macro2::{Literal, TokenStream as TokenStream2};
use quote::quote;
use std::collections::HashSet;
use syn::parse::{Parse, ParseStream};
use syn::{
    parse_macro_input, Attribute, FnArg, Ident, ImplItem, ItemImpl, LitStr, ReturnType, Type,
};

/// Mirrors `actionrouter::dispatcher::MAX_ACTION_ARGS`.
const MAX_ACTION_ARGS: usize = 10;

/// How a positional `String` argument is handed to the action method.
enum ArgBinding {
    /// `String`
    Owned,
    /// `&str`
    Str,
    /// `&String`
    StringRef,
}

struct ActionDef {
    ident: Ident,
    /// Dispatch name; the method name unless renamed with `#[action("...")]`
    name: LitStr,
    bindings: Vec<ArgBinding>,
}

/// Argument of the `#[action(...)]` helper attribute.
enum ActionAttr {
    Rename(LitStr),
    Skip,
}

impl Parse for ActionAttr {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.peek(LitStr) {
            return Ok(ActionAttr::Rename(input.parse()?));
        }
        let ident: Ident = input.parse()?;
        if ident == "skip" {
            Ok(ActionAttr::Skip)
        } else {
            Err(syn::Error::new(
                ident.span(),
                format!("unexpected `{ident}`, expected a string literal or `skip`"),
            ))
        }
    }
}

/// Remove the `#[action(...)]` helper attribute, which rustc would otherwise
/// reject, and return its parsed argument.
fn take_action_attr(attrs: &mut Vec<Attribute>) -> syn::Result<Option<ActionAttr>> {
    let Some(pos) = attrs.iter().position(|a| a.path().is_ident("action")) else {
        return Ok(None);
    };
    let attr = attrs.remove(pos);
    if attrs.iter().any(|a| a.path().is_ident("action")) {
        return Err(syn::Error::new_spanned(
            &attr,
            "at most one #[action(...)] attribute per method",
        ));
    }
    attr.parse_args::<ActionAttr>().map(Some)
}

fn is_path_ident(ty: &Type, name: &str) -> bool {
    if let Type::Path(p) = ty {
        if p.qself.is_none() {
            if let Some(seg) = p.path.segments.last() {
                return seg.ident == name && seg.arguments.is_empty();
            }
        }
    }
    false
}

/// `()`, `bool` or any `Result`, the return types `ActionOutcome` covers.
fn is_action_outcome(output: &ReturnType) -> bool {
    match output {
        ReturnType::Default => true,
        ReturnType::Type(_, ty) => is_outcome_type(ty),
    }
}

fn is_outcome_type(ty: &Type) -> bool {
    match ty {
        Type::Tuple(tuple) => tuple.elems.is_empty(),
        Type::Group(g) => is_outcome_type(&g.elem),
        Type::Paren(p) => is_outcome_type(&p.elem),
        Type::Path(p) if p.qself.is_none() => p
            .path
            .segments
            .last()
            .is_some_and(|seg| seg.ident == "bool" || seg.ident == "Result"),
        _ => false,
    }
}

fn binding_for(ty: &Type) -> Option<ArgBinding> {
    match ty {
        Type::Reference(r) if r.mutability.is_none() => {
            if is_path_ident(&r.elem, "str") {
                Some(ArgBinding::Str)
            } else if is_path_ident(&r.elem, "String") {
                Some(ArgBinding::StringRef)
            } else {
                None
            }
        }
        Type::Group(g) => binding_for(&g.elem),
        Type::Paren(p) => binding_for(&p.elem),
        _ if is_path_ident(ty, "String") => Some(ArgBinding::Owned),
        _ => None,
    }
}

/// Methods with a `&self`/`&mut self` receiver whose other parameters are all
/// strings. Anything else stays an ordinary helper method.
fn collect_actions(item: &mut ItemImpl) -> syn::Result<Vec<ActionDef>> {
    let mut actions = Vec::new();
    let mut seen = HashSet::new();
    for impl_item in &mut item.items {
        let ImplItem::Fn(method) = impl_item else {
            continue;
        };
        let rename = match take_action_attr(&mut method.attrs)? {
            Some(ActionAttr::Skip) => continue,
            Some(ActionAttr::Rename(name)) => Some(name),
            None => None,
        };
        let Some(receiver) = method.sig.receiver() else {
            continue;
        };
        if receiver.reference.is_none() || !method.sig.generics.params.is_empty() {
            continue;
        }
        if method.sig.asyncness.is_some() {
            continue;
        }

        let bindings: Option<Vec<ArgBinding>> = method
            .sig
            .inputs
            .iter()
            .filter_map(|arg| match arg {
                FnArg::Typed(pat) => Some(binding_for(&pat.ty)),
                FnArg::Receiver(_) => None,
            })
            .collect();
        let Some(bindings) = bindings else {
            continue;
        };

        if bindings.len() > MAX_ACTION_ARGS {
            return Err(syn::Error::new_spanned(
                &method.sig,
                format!(
                    "action `{}` takes {} string arguments; at most {MAX_ACTION_ARGS} are supported",
                    method.sig.ident,
                    bindings.len()
                ),
            ));
        }

        if !is_action_outcome(&method.sig.output) {
            return Err(syn::Error::new_spanned(
                &method.sig.output,
                format!(
                    "action `{}` must return `()`, `bool` or `Result`; \
                     mark helper methods with #[action(skip)]",
                    method.sig.ident
                ),
            ));
        }

        let ident = method.sig.ident.clone();
        let name = rename.unwrap_or_else(|| LitStr::new(&ident.to_string(), ident.span()));
        if !seen.insert((name.value(), bindings.len())) {
            return Err(syn::Error::new_spanned(
                &method.sig,
                format!(
                    "duplicate action `{}` taking {} argument(s)",
                    name.value(),
                    bindings.len()
                ),
            ));
        }

        actions.push(ActionDef {
            ident,
            name,
            bindings,
        });
    }
    Ok(actions)
}

fn expand(mut item: ItemImpl) -> syn::Result<TokenStream2> {
    if let Some((_, path, _)) = &item.trait_ {
        return Err(syn::Error::new_spanned(
            path,
            "#[actions] goes on an inherent impl block",
        ));
    }

    let actions = collect_actions(&mut item)?;
    let self_ty = &item.self_ty;
    let (impl_generics, _, where_clause) = item.generics.split_for_impl();

    let has_arms = actions.iter().map(|action| {
        let name = &action.name;
        let arity = Literal::usize_unsuffixed(action.bindings.len());
        quote! { (#name, #arity) => true, }
    });

    let invoke_arms = actions.iter().map(|action| {
        let ident = &action.ident;
        let name = &action.name;
        let arity = Literal::usize_unsuffixed(action.bindings.len());
        let args = action.bindings.iter().enumerate().map(|(idx, binding)| {
            let idx = Literal::usize_unsuffixed(idx);
            match binding {
                ArgBinding::Owned => quote! { ::std::clone::Clone::clone(&args[#idx]) },
                ArgBinding::Str => quote! { args[#idx].as_str() },
                ArgBinding::StringRef => quote! { &args[#idx] },
            }
        });
        quote! {
            (#name, #arity) => ::actionrouter::dispatcher::ActionOutcome::succeeded(
                self.#ident(#(#args),*)
            ),
        }
    });

    Ok(quote! {
        #item

        impl #impl_generics ::actionrouter::dispatcher::Dispatchable for #self_ty #where_clause {
            fn has_action(&self, name: &str, arity: usize) -> bool {
                match (name, arity) {
                    #(#has_arms)*
                    _ => false,
                }
            }

            #[allow(unused_variables)]
            fn invoke_action(&mut self, name: &str, args: &[::std::string::String]) -> bool {
                match (name, args.len()) {
                    #(#invoke_arms)*
                    _ => false,
                }
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
                self
            }
        }
    })
}

/// Generate the `Dispatchable` impl for a controller.
///
/// Every method of the annotated inherent `impl` block that takes `&self` or
/// `&mut self` and only `String`, `&str` or `&String` parameters becomes an
/// action keyed by `(method name, parameter count)`. The method's return value
/// goes through `ActionOutcome`: `()` is success, `bool` is itself, `Result`
/// is success when `Ok`; any other return type is a compile error.
///
/// Rust has no overloading, so arity overloads of one action are separate
/// methods sharing a dispatch name through `#[action("name")]`. Use
/// `#[action(skip)]` to keep a string-only method out of the table.
///
/// ```rust,ignore
/// #[actions]
/// impl BlogController {
///     pub fn index(&mut self) { /* ... */ }
///     pub fn show(&mut self, id: &str) { /* ... */ }
///     #[action("show")]
///     pub fn show_page(&mut self, id: String, page: String) -> bool { /* ... */ true }
///     #[action(skip)]
///     pub fn helper(&self, text: &str) -> String { text.to_uppercase() }
/// }
/// ```
#[proc_macro_attribute]
pub fn actions(attr: TokenStream, item: TokenStream) -> TokenStream {
    if !attr.is_empty() {
        return syn::Error::new(
            proc_macro2::Span::call_site(),
            "#[actions] takes no arguments",
        )
        .to_compile_error()
        .into();
    }
    let input = parse_macro_input!(item as ItemImpl);
    match expand(input) {
        Ok(tokens) => TokenStream::from(tokens),
        Err(err) => err.to_compile_error().into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn expand_err(item: ItemImpl) -> String {
        match expand(item) {
            Ok(tokens) => panic!("expected an error, got {tokens}"),
            Err(err) => err.to_string(),
        }
    }

    #[test]
    fn test_unsupported_return_type_suggests_skip() {
        let message = expand_err(parse_quote! {
            impl Blog {
                pub fn render(&self, template: &str) -> String {
                    template.to_string()
                }
            }
        });
        assert!(message.contains("action `render` must return"), "{message}");
        assert!(message.contains("#[action(skip)]"), "{message}");
    }

    #[test]
    fn test_skipped_helper_may_return_anything() {
        let tokens = expand(parse_quote! {
            impl Blog {
                #[action(skip)]
                pub fn render(&self, template: &str) -> String {
                    template.to_string()
                }

                pub fn index(&mut self) {}
            }
        })
        .unwrap()
        .to_string();
        assert!(!tokens.contains("\"render\""));
        assert!(tokens.contains("\"index\""));
        // helper attribute is consumed
        assert!(!tokens.contains("skip"));
    }

    #[test]
    fn test_supported_return_types() {
        let item: ItemImpl = parse_quote! {
            impl Blog {
                pub fn a(&mut self) {}
                pub fn b(&mut self, id: &str) -> () {}
                pub fn c(&mut self, id: String) -> bool { true }
                pub fn d(&mut self, id: &String) -> Result<(), String> { Ok(()) }
                pub fn e(&self) -> std::io::Result<u8> { Ok(1) }
            }
        };
        assert!(expand(item).is_ok());
    }

    #[test]
    fn test_non_string_methods_are_left_alone() {
        let item: ItemImpl = parse_quote! {
            impl Blog {
                pub fn jump(&mut self, page: usize) -> usize { page }
                pub fn new() -> Self { Blog }
            }
        };
        assert!(expand(item).is_ok());
    }

    #[test]
    fn test_duplicate_action_arity() {
        let message = expand_err(parse_quote! {
            impl Blog {
                pub fn show(&mut self, id: &str) {}
                #[action("show")]
                pub fn show_again(&mut self, id: String) {}
            }
        });
        assert!(message.contains("duplicate action `show`"), "{message}");
    }

    #[test]
    fn test_trait_impl_rejected() {
        let message = expand_err(parse_quote! {
            impl Default for Blog {
                fn default() -> Self { Blog }
            }
        });
        assert!(message.contains("inherent impl"), "{message}");
    }
}

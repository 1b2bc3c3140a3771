use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::spanned::Spanned;
use syn::{parse_macro_input, FnArg, ItemFn, Pat, PatType, Type};

/// Turns a function over named `f64` parameters into one callable from
/// expressions, taking its arguments as a slice.
///
/// ```ignore
/// #[calc_fn]
/// fn hypot(a: f64, b: f64) -> Result<f64, String> {
///     Ok(a.hypot(b))
/// }
///
/// context.register_function("hypot", 2, hypot)?;
/// ```
#[proc_macro_attribute]
pub fn calc_fn(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    match expand(&input) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(error) => TokenStream::from(error.to_compile_error()),
    }
}

fn expand(input: &ItemFn) -> syn::Result<TokenStream2> {
    let fn_vis = &input.vis;
    let fn_name = &input.sig.ident;
    let fn_body = &input.block;
    let fn_output = &input.sig.output;

    let mut arg_extractions = Vec::new();

    for (i, arg) in input.sig.inputs.iter().enumerate() {
        let PatType { pat, ty, .. } = match arg {
            FnArg::Typed(pat_type) => pat_type,
            FnArg::Receiver(receiver) => {
                return Err(syn::Error::new(
                    receiver.span(),
                    "calc_fn cannot be applied to methods",
                ))
            }
        };

        let arg_name = match **pat {
            Pat::Ident(ref ident) => &ident.ident,
            _ => return Err(syn::Error::new(pat.span(), "expected a plain argument name")),
        };

        if !is_f64(ty) {
            return Err(syn::Error::new(
                ty.span(),
                format!("argument {} ('{}') of {} must be f64", i, arg_name, fn_name),
            ));
        }

        arg_extractions.push(quote! {
            let #pat: f64 = args[#i];
        });
    }

    let args_len = arg_extractions.len();
    Ok(quote! {
        #fn_vis fn #fn_name(args: &[f64]) #fn_output {
            if args.len() != #args_len {
                return Err(format!(
                    "{} expects {} argument(s), got {}",
                    stringify!(#fn_name),
                    #args_len,
                    args.len()
                )
                .into());
            }

            #(#arg_extractions)*

            #fn_body
        }
    })
}

fn is_f64(ty: &Type) -> bool {
    match ty {
        Type::Path(type_path) => type_path.qself.is_none() && type_path.path.is_ident("f64"),
        _ => false,
    }
}

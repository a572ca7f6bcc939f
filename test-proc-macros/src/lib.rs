/// Expands to the literal itself if it is a valid username, otherwise fails compilation
/// with the validation messages.
#[cfg(feature = "username")]
#[proc_macro]
pub fn username(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    compiletime_check(input, |value| {
        validation::validate_username(Some(value.to_string())).map(|_| ())
    })
}

/// Expands to the literal itself if it is *not* a valid username.
/// Keeps fixtures for rejected input honest when the rule changes.
#[cfg(feature = "username")]
#[proc_macro]
pub fn invalid_username(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    compiletime_check(input, |value| {
        match validation::validate_username(Some(value.to_string())) {
            Ok(_) => Err(format!("`{value}` is a valid username")),
            Err(_) => Ok(()),
        }
    })
}

#[allow(dead_code)]
fn compiletime_check<E>(
    input: proc_macro::TokenStream,
    check: impl FnOnce(&str) -> Result<(), E>,
) -> proc_macro::TokenStream
where
    E: std::fmt::Display,
{
    let lit_str = syn::parse_macro_input!(input as syn::LitStr);
    let value = lit_str.value();

    if let Err(err) = check(&value) {
        return syn::Error::new(lit_str.span(), err)
            .to_compile_error()
            .into();
    }

    quote::quote! { #value }.into()
}

//! `#[derive(InSaveState)]` for plain structs.
//!
//! Every field is serialized in declaration order; deserialization reads
//! them back in the same order. Enums need a hand-written impl because
//! their stable wire encoding is a per-type decision.

use proc_macro::TokenStream;

fn members(fields: &syn::Fields) -> Vec<syn::Member> {
    fields
        .iter()
        .enumerate()
        .map(|(i, field)| match &field.ident {
            Some(ident) => syn::Member::Named(ident.clone()),
            None => syn::Member::Unnamed(syn::Index::from(i)),
        })
        .collect()
}

#[proc_macro_derive(InSaveState)]
pub fn derive_in_save_state(input: TokenStream) -> TokenStream {
    let derive_input = match syn::parse::<syn::DeriveInput>(input) {
        Ok(derive_input) => derive_input,
        Err(err) => return err.to_compile_error().into(),
    };
    let fields = match &derive_input.data {
        syn::Data::Struct(data) => members(&data.fields),
        _ => {
            let text = format!("expected struct, got `{}`", derive_input.ident);
            return syn::parse::Error::new_spanned(derive_input, text)
                .into_compile_error()
                .into();
        }
    };
    let (impl_generics, ty_generics, where_clause) = derive_input.generics.split_for_impl();
    let ty_name = &derive_input.ident;
    quote::quote!(
        impl #impl_generics save_state::InSaveState for #ty_name #ty_generics #where_clause {
            fn serialize(&self, state: &mut save_state::SaveStateSerializer) {
                #(save_state::InSaveState::serialize(&self.#fields, state);)*
            }

            fn deserialize(&mut self, state: &mut save_state::SaveStateDeserializer) {
                #(save_state::InSaveState::deserialize(&mut self.#fields, state);)*
            }
        }
    )
    .into()
}

use proc_macro2::TokenStream;
use quote::quote;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::{env, fs};
use walkdir::WalkDir;

const DATA_DIR: &str = "tests/data";

fn main() -> Result<(), Box<dyn Error>> {
    println!("cargo:rerun-if-changed={DATA_DIR}");
    generate_decode_tests()
}

fn generate_decode_tests() -> Result<(), Box<dyn Error>> {
    let test_cases = find_test_cases();
    let token_stream = quote! {
        use test_case::test_case;
        #(#test_cases)*
        fn test_decode(filename: &str) {
            crate::common::Fixture::load_from_file(filename).unwrap().assert_decodes();
        }
    };
    let syntax_tree = syn::parse2(token_stream)?;
    let pretty = prettyplease::unparse(&syntax_tree);

    let out_dir = env::var("OUT_DIR")?;
    let dest_path = Path::new(&out_dir).join("decode_tests.rs");
    fs::write(dest_path, pretty)?;

    Ok(())
}

fn find_data_files() -> impl Iterator<Item = PathBuf> {
    WalkDir::new(DATA_DIR)
        .sort_by_file_name()
        .into_iter()
        .flatten()
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .file_name()
                    .to_str()
                    .is_some_and(|s| s.ends_with(".json"))
        })
        .map(|e| e.into_path())
}

fn find_test_cases() -> impl Iterator<Item = TokenStream> {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap_or_default();
    find_data_files().filter_map(move |entry| {
        let path = Path::new(&manifest_dir).join(&entry);
        let path = path.to_str()?;
        let name = entry.file_stem()?.to_str()?.replace('-', "_");
        Some(quote! {
            #[test_case(#path ; #name)]
        })
    })
}

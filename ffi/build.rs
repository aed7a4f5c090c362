//! Generates `follower.h` for native hosts into `OUT_DIR`.
//!
//! On success the header path is exported to the crate as `FOLLOWER_HEADER`.

use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=src/lib.rs");
    println!("cargo:rerun-if-changed=src/types.rs");

    let (Ok(crate_dir), Ok(out_dir)) = (env::var("CARGO_MANIFEST_DIR"), env::var("OUT_DIR")) else {
        println!("cargo:warning=CARGO_MANIFEST_DIR or OUT_DIR unset, header not generated");
        return;
    };
    let header = PathBuf::from(out_dir).join("follower.h");

    let generated = cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_language(cbindgen::Language::C)
        .with_include_guard("FOLLOWER_FFI_H")
        .with_pragma_once(true)
        .generate();

    match generated {
        Ok(bindings) => {
            bindings.write_to_file(&header);
            println!("cargo:rustc-env=FOLLOWER_HEADER={}", header.display());
        }
        Err(err) => println!("cargo:warning=cbindgen failed, header not generated: {err}"),
    }
}

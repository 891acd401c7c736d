//! Generates `cyproto.h` for C firmware.
//!
//! The header is written to `OUT_DIR`, and also to `$CYPROTO_HEADER_DIR` when
//! that variable is set.

use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=src/lib.rs");
    println!("cargo:rerun-if-changed=cbindgen.toml");
    println!("cargo:rerun-if-env-changed=CYPROTO_HEADER_DIR");

    let manifest_dir = env::var_os("CARGO_MANIFEST_DIR");
    let (Some(crate_dir), Some(out_dir)) = (manifest_dir, env::var_os("OUT_DIR")) else {
        return;
    };
    let crate_dir = PathBuf::from(crate_dir);

    let config = match cbindgen::Config::from_file(crate_dir.join("cbindgen.toml")) {
        Ok(config) => config,
        Err(err) => {
            println!("cargo:warning=cbindgen.toml: {err}");
            return;
        }
    };

    let bindings = match cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_config(config)
        .generate()
    {
        Ok(bindings) => bindings,
        Err(err) => {
            println!("cargo:warning=header generation failed: {err}");
            return;
        }
    };

    bindings.write_to_file(PathBuf::from(out_dir).join("cyproto.h"));
    if let Some(dir) = env::var_os("CYPROTO_HEADER_DIR") {
        bindings.write_to_file(PathBuf::from(dir).join("cyproto.h"));
    }
}

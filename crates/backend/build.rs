use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Places the workspace config.toml next to the built binary,
/// where `shared::config::load_config` looks for it.
fn main() {
    println!("cargo:rerun-if-changed=../../config.toml");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let source = manifest_dir.join("../../config.toml");
    if !source.exists() {
        println!("cargo:warning=config.toml not found, the embedded defaults will be used");
        return;
    }

    // OUT_DIR looks like target/<profile>/build/backend-<hash>/out
    let out_dir = env::var("OUT_DIR").unwrap();
    let profile = env::var("PROFILE").unwrap();
    let Some(target_dir) = Path::new(&out_dir).ancestors().find(|p| p.ends_with(&profile)) else {
        println!("cargo:warning=target profile directory not found, config.toml not copied");
        return;
    };

    if let Err(e) = fs::copy(&source, target_dir.join("config.toml")) {
        panic!("Failed to copy config.toml: {}", e);
    }
}

//! Build script for llama-bridge.
//!
//! When the `llama` feature is enabled, this script emits link directives
//! for the llama.cpp / ggml shared libraries. All native code lives in
//! those libraries; nothing is compiled here.
//!
//! # GPU Backend Support
//!
//! The backend identity features (`cuda`, `metal`, `vulkan`) only select
//! the label the facade reports; the llama.cpp build pointed at by
//! `LLAMA_LIB_DIR` must itself have been compiled for that backend.
//!
//! # Environment Variables
//!
//! - `LLAMA_LIB_DIR`: Directory containing libllama / libggml (required
//!   for `llama` builds unless the libraries are on the default search
//!   path)
//! - `LLAMA_BRIDGE_SKIP_LINK`: Set to "1" to suppress link directives (for
//!   development on machines without the runtime)

use std::env;
use std::path::PathBuf;

/// Shared libraries the runtime boundary resolves against.
const RUNTIME_LIBS: &[&str] = &["llama", "ggml", "ggml-base"];

fn main() {
    println!("cargo:rerun-if-env-changed=LLAMA_LIB_DIR");
    println!("cargo:rerun-if-env-changed=LLAMA_BRIDGE_SKIP_LINK");

    // Android mirrors diagnostics to logcat via liblog, runtime or not.
    if env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("android") {
        println!("cargo:rustc-link-lib=dylib=log");
    }

    // Without the runtime feature the facade uses the stub registry and
    // there is nothing to link.
    if env::var("CARGO_FEATURE_LLAMA").is_err() {
        return;
    }

    if env::var("LLAMA_BRIDGE_SKIP_LINK").as_deref() == Ok("1") {
        println!("cargo:warning=LLAMA_BRIDGE_SKIP_LINK=1, not linking the llama.cpp runtime");
        return;
    }

    if let Ok(dir) = env::var("LLAMA_LIB_DIR") {
        let dir = PathBuf::from(dir);
        if !dir.is_dir() {
            println!(
                "cargo:warning=LLAMA_LIB_DIR does not exist: {}",
                dir.display()
            );
        }
        println!("cargo:rustc-link-search=native={}", dir.display());
        // Let the produced cdylib find the runtime next to itself and at
        // the build-time location.
        if cfg!(target_os = "linux") {
            println!("cargo:rustc-link-arg=-Wl,-rpath,$ORIGIN");
            println!("cargo:rustc-link-arg=-Wl,-rpath,{}", dir.display());
        } else if cfg!(target_os = "macos") {
            println!("cargo:rustc-link-arg=-Wl,-rpath,@loader_path");
            println!("cargo:rustc-link-arg=-Wl,-rpath,{}", dir.display());
        }
    }

    for lib in RUNTIME_LIBS {
        println!("cargo:rustc-link-lib=dylib={lib}");
    }
}

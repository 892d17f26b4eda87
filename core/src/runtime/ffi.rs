//! FFI declarations for the llama.cpp / ggml runtime boundary.
//!
//! This module contains the raw bindings. Use the safe wrappers in
//! [`crate::runtime::devices`] and [`crate::init`] instead of calling
//! these directly. Everything here is gated behind the `llama` feature;
//! without it the crate builds against the stub registry.

#![cfg(feature = "llama")]

use std::ffi::c_void;
use std::os::raw::{c_char, c_int};

/// Opaque handle to a ggml backend device. Owned by the runtime.
pub type GgmlBackendDev = *mut c_void;

/// ggml log severity, as passed to the log callback.
///
/// Mirrors `enum ggml_log_level` in ggml.h.
pub const GGML_LOG_LEVEL_NONE: c_int = 0;
pub const GGML_LOG_LEVEL_DEBUG: c_int = 1;
pub const GGML_LOG_LEVEL_INFO: c_int = 2;
pub const GGML_LOG_LEVEL_WARN: c_int = 3;
pub const GGML_LOG_LEVEL_ERROR: c_int = 4;
pub const GGML_LOG_LEVEL_CONT: c_int = 5;

/// Log callback signature expected by `llama_log_set`.
pub type GgmlLogCallback =
    unsafe extern "C" fn(level: c_int, text: *const c_char, user_data: *mut c_void);

extern "C" {
    // Runtime bring-up. Not guaranteed idempotent; call at most once per
    // process (enforced by the facade's init guard).
    pub fn llama_backend_init();

    // Log sink installation.
    pub fn llama_log_set(callback: GgmlLogCallback, user_data: *mut c_void);

    // Capability query.
    pub fn llama_supports_gpu_offload() -> bool;

    // Device registry. All returned pointers are owned by the runtime and
    // must never be freed by the caller.
    pub fn ggml_backend_dev_count() -> usize;
    pub fn ggml_backend_dev_get(index: usize) -> GgmlBackendDev;
    pub fn ggml_backend_dev_name(device: GgmlBackendDev) -> *const c_char;
    pub fn ggml_backend_dev_description(device: GgmlBackendDev) -> *const c_char;
}

//! Runtime boundary module.
//!
//! This module owns the raw FFI declarations for the llama.cpp / ggml
//! runtime and the safe device-enumeration layer built on top of them.

pub mod devices;
pub mod ffi;

pub use devices::{DeviceEnumerator, DeviceHandle, DeviceInfo, DeviceRegistry, NativeRegistry};

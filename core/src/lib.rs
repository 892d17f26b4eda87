//! llama-bridge: FFI facade over the llama.cpp backend/device registry.
//!
//! This crate is the boundary layer between a managed host application and
//! the llama.cpp tensor-compute runtime. It does not run inference itself;
//! it identifies the compiled-in compute backend, enumerates the runtime's
//! devices with fail-soft accessors, filters and routes the runtime's
//! diagnostic log output, and keeps a small set of C ABI entry points
//! resolvable under dynamic loading.
//!
//! # Features
//!
//! - **llama**: Link against the native llama.cpp / ggml libraries. Without
//!   it, a stub registry reports no devices so the crate builds and tests
//!   anywhere.
//! - **cuda** / **metal** / **vulkan**: Backend identity flags, mutually
//!   exclusive; none of them means CPU.
//!
//! # Example
//!
//! ```no_run
//! use llama_bridge::init;
//! use llama_bridge::runtime::{DeviceEnumerator, NativeRegistry};
//!
//! init::initialize();
//!
//! let devices = DeviceEnumerator::new(NativeRegistry::new());
//! println!("backend: {}", init::active_backend());
//! for dev in devices.iter() {
//!     println!("  [{}] {}", dev.index, dev.name.to_string_lossy());
//! }
//! ```
//!
//! # FFI consumption
//!
//! Build as a cdylib and load the `llama_bridge_*` symbols (see
//! [`crate::abi`]) from the host. Call `llama_bridge_init` exactly once
//! before anything else; every exported function is total and never
//! signals an error across the boundary.
//!
//! ```bash
//! # Stub registry, no native runtime needed
//! cargo build --release
//!
//! # Against a llama.cpp build, CUDA backend
//! LLAMA_LIB_DIR=/opt/llama.cpp/lib cargo build --release --features llama,cuda
//! ```

pub mod abi;
pub mod backend;
pub mod cli;
pub mod config;
pub mod error;
pub mod init;
pub mod logging;
pub mod runtime;

// Re-export commonly used types
pub use backend::Backend;
pub use error::{BridgeError, Result};
pub use logging::{Channel, LogLevel};
pub use runtime::{DeviceEnumerator, DeviceHandle, DeviceInfo, DeviceRegistry, NativeRegistry};

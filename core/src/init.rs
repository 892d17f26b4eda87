//! One-shot runtime bring-up and facade lifecycle.
//!
//! The underlying `llama_backend_init` is not documented as idempotent, so
//! the facade tracks its own lifecycle and guarantees bring-up runs exactly
//! once per process no matter how many times (or from how many threads)
//! `initialize` is called. Callers racing the first initialization block
//! until bring-up completes.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Once, OnceLock};

use crate::abi;
use crate::backend::Backend;
use crate::runtime::{DeviceEnumerator, NativeRegistry};

/// Facade lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninit,
    Initializing,
    Ready,
}

static INIT: Once = Once::new();
static PHASE: AtomicU8 = AtomicU8::new(0);
static ACTIVE_BACKEND: OnceLock<Backend> = OnceLock::new();

/// Current lifecycle phase, for observability.
pub fn phase() -> Phase {
    match PHASE.load(Ordering::Acquire) {
        2 => Phase::Ready,
        1 => Phase::Initializing,
        _ => Phase::Uninit,
    }
}

/// The backend identity injected at startup.
///
/// Falls back to the build configuration when queried before `initialize`,
/// so the label is constant for the whole process lifetime either way.
pub fn active_backend() -> Backend {
    *ACTIVE_BACKEND.get_or_init(Backend::from_build_config)
}

/// GPU backend feature state baked in at compile time, for diagnostics.
fn gpu_feature_state() -> &'static str {
    if cfg!(feature = "cuda") {
        "cuda"
    } else if cfg!(feature = "metal") {
        "metal"
    } else if cfg!(feature = "vulkan") {
        "vulkan"
    } else {
        "none"
    }
}

/// Bring up the runtime and install the log sink.
fn bring_up() {
    #[cfg(feature = "llama")]
    unsafe {
        crate::runtime::ffi::llama_backend_init();
        crate::runtime::ffi::llama_log_set(
            crate::logging::runtime_log_callback,
            std::ptr::null_mut(),
        );
    }
}

/// Fixed startup diagnostics: best-effort field-debugging breadcrumbs, not
/// a correctness requirement.
fn emit_diagnostics(backend: Backend) {
    let gpu = DeviceEnumerator::new(NativeRegistry::new()).supports_gpu_offload();

    eprintln!(
        "llama_bridge: initializing ({} entry points retained)",
        abi::retained_export_count()
    );
    eprintln!("llama_bridge: gpu build feature: {}", gpu_feature_state());
    eprintln!(
        "llama_bridge: backend {} (gpu offload directly: {})",
        backend, gpu as i32
    );
    println!(
        "llama_bridge: initializing with backend {} (gpu offload: {})",
        backend,
        if gpu { "YES" } else { "NO" }
    );

    #[cfg(target_os = "android")]
    {
        use crate::logging::android;
        android::log_write(android::ANDROID_LOG_INFO, "Initializing...");
        android::log_write(
            android::ANDROID_LOG_INFO,
            &format!("gpu build feature: {}", gpu_feature_state()),
        );
        android::log_write(
            android::ANDROID_LOG_INFO,
            &format!("Backend: {}, GPU: {}", backend, gpu as i32),
        );
    }
}

/// Initialize the facade, resolving the backend from the build
/// configuration. Safe to call repeatedly; only the first call does work.
pub fn initialize() {
    initialize_with_backend(Backend::from_build_config());
}

/// Initialize the facade with an explicitly injected backend identity.
///
/// The first caller to reach this wins the injection; later calls (and the
/// plain [`initialize`]) are no-ops. Exposed so the backend-dependent paths
/// can be exercised under every identity without rebuilding.
pub fn initialize_with_backend(backend: Backend) {
    INIT.call_once(|| {
        PHASE.store(1, Ordering::Release);
        let backend = *ACTIVE_BACKEND.get_or_init(|| backend);
        bring_up();
        emit_diagnostics(backend);
        PHASE.store(2, Ordering::Release);
    });
}

//! Exported C ABI surface.
//!
//! Every function here is independently callable by the host across the
//! FFI boundary and has a total, fail-soft contract: no panic, no error
//! code, no exception ever crosses. Out-of-range device indices yield an
//! empty string or null handle instead of failing, because the caller
//! lives across a serialization boundary where errors cannot propagate.
//!
//! String returns point at static or runtime-owned memory; the caller must
//! never free them, and device-derived pointers go stale if the runtime
//! reinitializes.

use std::ffi::{c_void, CStr};
use std::os::raw::{c_char, c_int};

use crate::init;
use crate::runtime::{DeviceEnumerator, NativeRegistry};

/// Empty-string sentinel for out-of-range lookups.
const EMPTY: &CStr = c"";

fn enumerator() -> DeviceEnumerator<NativeRegistry> {
    DeviceEnumerator::new(NativeRegistry::new())
}

/// One-shot runtime bring-up. See [`crate::init`].
#[no_mangle]
pub extern "C" fn llama_bridge_init() {
    init::initialize();
}

/// The fixed backend label: "CPU", "CUDA", "Metal", or "Vulkan".
#[no_mangle]
pub extern "C" fn llama_bridge_get_backend_name() -> *const c_char {
    init::active_backend().c_name().as_ptr()
}

/// Whether GPU offload is usable, jointly reflecting build-time and
/// run-time capability.
#[no_mangle]
pub extern "C" fn llama_bridge_gpu_supported() -> bool {
    enumerator().supports_gpu_offload()
}

/// Number of devices in the runtime registry, never negative.
#[no_mangle]
pub extern "C" fn llama_bridge_get_device_count() -> c_int {
    c_int::try_from(enumerator().count()).unwrap_or(c_int::MAX)
}

/// Short identifier of the device at `index`; empty when out of range.
#[no_mangle]
pub extern "C" fn llama_bridge_get_device_name(index: c_int) -> *const c_char {
    match enumerator().get(index) {
        Some(device) => device.name.as_ptr(),
        None => EMPTY.as_ptr(),
    }
}

/// Human-readable description of the device at `index`; empty when out of
/// range.
#[no_mangle]
pub extern "C" fn llama_bridge_get_device_description(index: c_int) -> *const c_char {
    match enumerator().get(index) {
        Some(device) => device.description.as_ptr(),
        None => EMPTY.as_ptr(),
    }
}

/// Opaque runtime-owned handle for the device at `index`; null when out of
/// range. Only an identifier to pass back into the runtime.
#[no_mangle]
pub extern "C" fn llama_bridge_get_device_pointer(index: c_int) -> *mut c_void {
    match enumerator().get(index) {
        Some(device) => device.handle.as_ptr(),
        None => std::ptr::null_mut(),
    }
}

/// Table of every exported entry point.
///
/// Dynamic loading resolves these symbols lazily, so an aggressive linker
/// may otherwise conclude they are unused and strip them. Keeping them
/// referenced from a `#[used]` static makes retention a data-driven
/// declaration instead of a side effect of calling each function.
#[repr(transparent)]
pub struct ExportTable([*const (); 7]);

// SAFETY: the table holds immutable function addresses and is never
// written after link time.
unsafe impl Sync for ExportTable {}

#[used]
pub static RETAINED_EXPORTS: ExportTable = ExportTable([
    llama_bridge_init as *const (),
    llama_bridge_get_backend_name as *const (),
    llama_bridge_gpu_supported as *const (),
    llama_bridge_get_device_count as *const (),
    llama_bridge_get_device_name as *const (),
    llama_bridge_get_device_description as *const (),
    llama_bridge_get_device_pointer as *const (),
]);

/// Number of entries in the retention table.
pub fn retained_export_count() -> usize {
    RETAINED_EXPORTS.0.len()
}

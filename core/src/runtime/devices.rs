//! Device enumeration over the runtime's backend device registry.
//!
//! The registry is the single source of truth: this layer adds only bounds
//! checking and borrowed, non-owning views of registry entries. Device
//! snapshots are valid for the duration of the call that produced them; the
//! underlying handles become stale if the runtime reinitializes.

use std::ffi::{c_void, CStr};
use std::os::raw::c_int;

#[cfg(feature = "llama")]
use super::ffi;

/// Non-owning reference to a runtime-internal device.
///
/// The pointed-to memory is owned by the runtime. The handle is only an
/// identifier to pass back across the boundary; it is never dereferenced
/// and never freed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceHandle(*mut c_void);

impl DeviceHandle {
    /// Wrap a runtime-owned device pointer.
    pub fn from_raw(ptr: *mut c_void) -> Self {
        Self(ptr)
    }

    /// The absent-device sentinel.
    pub fn null() -> Self {
        Self(std::ptr::null_mut())
    }

    /// The raw pointer, for handing back across the ABI.
    pub fn as_ptr(self) -> *mut c_void {
        self.0
    }

    pub fn is_null(self) -> bool {
        self.0.is_null()
    }
}

/// Borrowed snapshot of one registry entry.
///
/// The strings borrow runtime-owned memory and are valid only as long as
/// the registry itself.
#[derive(Debug, Clone, Copy)]
pub struct DeviceInfo<'reg> {
    /// 0-based, contiguous device index.
    pub index: usize,
    /// Short device identifier.
    pub name: &'reg CStr,
    /// Human-readable device description.
    pub description: &'reg CStr,
    /// Opaque runtime-owned handle.
    pub handle: DeviceHandle,
}

/// A source of device records.
///
/// Implementations do no bounds checking of their own: `device_at` is only
/// called with `index < device_count()`, which [`DeviceEnumerator`]
/// guarantees.
pub trait DeviceRegistry {
    /// Number of devices currently known to the registry.
    fn device_count(&self) -> usize;

    /// The device at `index`. Contract: `index < device_count()`.
    fn device_at(&self, index: usize) -> DeviceInfo<'_>;

    /// Whether GPU offload is usable, jointly reflecting build-time and
    /// run-time capability.
    fn supports_gpu_offload(&self) -> bool;
}

/// Bounds-checked accessor layer over a [`DeviceRegistry`].
///
/// Every index coming across the ABI goes through [`DeviceEnumerator::get`],
/// which rejects negative and out-of-range values before the registry is
/// consulted. Out-of-range lookups are not errors: the facade is fail-soft
/// and callers receive an absent sentinel instead.
pub struct DeviceEnumerator<R> {
    registry: R,
}

impl<R: DeviceRegistry> DeviceEnumerator<R> {
    pub fn new(registry: R) -> Self {
        Self { registry }
    }

    /// Device count as reported by the registry, never negative.
    pub fn count(&self) -> usize {
        self.registry.device_count()
    }

    /// Look up a device by a raw, possibly hostile index.
    ///
    /// Returns `None` for any index outside `[0, count)` without touching
    /// registry memory.
    pub fn get(&self, index: c_int) -> Option<DeviceInfo<'_>> {
        let index = usize::try_from(index).ok()?;
        if index >= self.registry.device_count() {
            return None;
        }
        Some(self.registry.device_at(index))
    }

    /// Iterate over all devices currently in the registry.
    pub fn iter(&self) -> impl Iterator<Item = DeviceInfo<'_>> {
        (0..self.registry.device_count()).map(|i| self.registry.device_at(i))
    }

    pub fn supports_gpu_offload(&self) -> bool {
        self.registry.supports_gpu_offload()
    }
}

/// Registry backed by the native llama.cpp / ggml runtime.
///
/// Without the `llama` feature this is a stub that reports no devices and
/// no GPU offload, keeping the facade buildable on machines without the
/// runtime libraries.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeRegistry;

impl NativeRegistry {
    pub fn new() -> Self {
        Self
    }
}

/// Borrow a runtime-owned C string, treating NULL as empty.
#[cfg(feature = "llama")]
fn cstr_or_empty<'a>(ptr: *const std::os::raw::c_char) -> &'a CStr {
    if ptr.is_null() {
        c""
    } else {
        // SAFETY: non-null registry strings are NUL-terminated and live as
        // long as the runtime.
        unsafe { CStr::from_ptr(ptr) }
    }
}

impl DeviceRegistry for NativeRegistry {
    #[cfg(feature = "llama")]
    fn device_count(&self) -> usize {
        unsafe { ffi::ggml_backend_dev_count() }
    }

    #[cfg(not(feature = "llama"))]
    fn device_count(&self) -> usize {
        0
    }

    #[cfg(feature = "llama")]
    fn device_at(&self, index: usize) -> DeviceInfo<'_> {
        // SAFETY: the enumerator has checked index < ggml_backend_dev_count.
        let dev = unsafe { ffi::ggml_backend_dev_get(index) };
        let name = cstr_or_empty(unsafe { ffi::ggml_backend_dev_name(dev) });
        let description = cstr_or_empty(unsafe { ffi::ggml_backend_dev_description(dev) });
        DeviceInfo {
            index,
            name,
            description,
            handle: DeviceHandle::from_raw(dev),
        }
    }

    #[cfg(not(feature = "llama"))]
    fn device_at(&self, _index: usize) -> DeviceInfo<'_> {
        // The stub registry reports zero devices, so the enumerator never
        // reaches this.
        unreachable!("stub registry has no devices")
    }

    #[cfg(feature = "llama")]
    fn supports_gpu_offload(&self) -> bool {
        unsafe { ffi::llama_supports_gpu_offload() }
    }

    #[cfg(not(feature = "llama"))]
    fn supports_gpu_offload(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    /// In-memory registry standing in for the runtime. Indexing past the
    /// stored devices panics, which is how the tests prove the enumerator
    /// never consults the registry for an out-of-range index.
    struct MockRegistry {
        devices: Vec<(CString, CString)>,
        gpu_offload: bool,
    }

    impl MockRegistry {
        fn with_devices(names: &[(&str, &str)]) -> Self {
            Self {
                devices: names
                    .iter()
                    .map(|(n, d)| (CString::new(*n).unwrap(), CString::new(*d).unwrap()))
                    .collect(),
                gpu_offload: false,
            }
        }
    }

    impl DeviceRegistry for MockRegistry {
        fn device_count(&self) -> usize {
            self.devices.len()
        }

        fn device_at(&self, index: usize) -> DeviceInfo<'_> {
            let (name, description) = &self.devices[index];
            DeviceInfo {
                index,
                name,
                description,
                handle: DeviceHandle::from_raw(index as *mut std::ffi::c_void),
            }
        }

        fn supports_gpu_offload(&self) -> bool {
            self.gpu_offload
        }
    }

    #[test]
    fn test_in_range_lookup_matches_registry() {
        let enumerator = DeviceEnumerator::new(MockRegistry::with_devices(&[
            ("cpu0", "Generic CPU"),
            ("gpu0", "Discrete GPU"),
        ]));

        assert_eq!(enumerator.count(), 2);
        let dev = enumerator.get(0).unwrap();
        assert_eq!(dev.name.to_str().unwrap(), "cpu0");
        assert_eq!(dev.description.to_str().unwrap(), "Generic CPU");
        assert_eq!(dev.index, 0);

        let dev = enumerator.get(1).unwrap();
        assert_eq!(dev.name.to_str().unwrap(), "gpu0");
    }

    #[test]
    fn test_out_of_range_returns_none_without_registry_access() {
        let enumerator = DeviceEnumerator::new(MockRegistry::with_devices(&[
            ("cpu0", "Generic CPU"),
            ("gpu0", "Discrete GPU"),
        ]));

        // MockRegistry::device_at would panic on these; None proves the
        // registry was never consulted.
        assert!(enumerator.get(2).is_none());
        assert!(enumerator.get(-1).is_none());
        assert!(enumerator.get(c_int::MAX).is_none());
        assert!(enumerator.get(c_int::MIN).is_none());
    }

    #[test]
    fn test_empty_registry() {
        let enumerator = DeviceEnumerator::new(MockRegistry::with_devices(&[]));
        assert_eq!(enumerator.count(), 0);
        assert!(enumerator.get(0).is_none());
        assert!(enumerator.iter().next().is_none());
    }

    #[test]
    fn test_iter_yields_contiguous_indices() {
        let enumerator = DeviceEnumerator::new(MockRegistry::with_devices(&[
            ("cpu0", "Generic CPU"),
            ("gpu0", "Discrete GPU"),
            ("gpu1", "Second GPU"),
        ]));

        let indices: Vec<usize> = enumerator.iter().map(|d| d.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_gpu_offload_delegates() {
        let mut registry = MockRegistry::with_devices(&[("gpu0", "Discrete GPU")]);
        registry.gpu_offload = true;
        let enumerator = DeviceEnumerator::new(registry);
        assert!(enumerator.supports_gpu_offload());
    }

    #[test]
    fn test_handle_sentinel() {
        assert!(DeviceHandle::null().is_null());
        assert!(DeviceHandle::null().as_ptr().is_null());
    }

    #[test]
    fn test_stub_native_registry_is_empty() {
        // Without the runtime linked in, the native registry reports an
        // empty device table rather than failing.
        #[cfg(not(feature = "llama"))]
        {
            let enumerator = DeviceEnumerator::new(NativeRegistry::new());
            assert_eq!(enumerator.count(), 0);
            assert!(!enumerator.supports_gpu_offload());
        }
    }
}

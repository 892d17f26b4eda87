//! Compute backend identity.
//!
//! Exactly one backend is active per binary. The cargo features `cuda`,
//! `metal`, and `vulkan` select a GPU backend at build time; absence of all
//! three means CPU. The build-time choice is resolved into a plain
//! [`Backend`] value once at startup (see [`crate::init`]), so every other
//! code path works with an ordinary enum and can be tested under any
//! backend without rebuilding.

use std::ffi::CStr;
use std::fmt;

/// Identifies the compute backend this binary was compiled against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    Cpu,
    Cuda,
    Metal,
    Vulkan,
}

/// All backend variants in declaration order.
pub const ALL_BACKENDS: &[Backend] = &[
    Backend::Cpu,
    Backend::Cuda,
    Backend::Metal,
    Backend::Vulkan,
];

impl Backend {
    /// Resolve the backend from the build configuration.
    ///
    /// The features are meant to be mutually exclusive; when more than one
    /// is enabled the precedence is CUDA, then Metal, then Vulkan.
    pub fn from_build_config() -> Self {
        if cfg!(feature = "cuda") {
            Self::Cuda
        } else if cfg!(feature = "metal") {
            Self::Metal
        } else if cfg!(feature = "vulkan") {
            Self::Vulkan
        } else {
            Self::Cpu
        }
    }

    /// The fixed backend label.
    pub fn name(self) -> &'static str {
        match self {
            Self::Cpu => "CPU",
            Self::Cuda => "CUDA",
            Self::Metal => "Metal",
            Self::Vulkan => "Vulkan",
        }
    }

    /// The fixed backend label as a NUL-terminated C string, for the ABI.
    pub fn c_name(self) -> &'static CStr {
        match self {
            Self::Cpu => c"CPU",
            Self::Cuda => c"CUDA",
            Self::Metal => c"Metal",
            Self::Vulkan => c"Vulkan",
        }
    }

    /// Whether this backend targets a GPU API.
    pub fn is_gpu(self) -> bool {
        !matches!(self, Self::Cpu)
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//! Log filtering and routing for runtime diagnostics.
//!
//! The runtime emits log lines asynchronously from its own threads, at any
//! point after bring-up. This module decides, per message, whether to drop
//! it as known noise or route it to a severity channel. The decision is a
//! pure function of `(level, text)`: no shared state, safe to invoke
//! concurrently without synchronization.
//!
//! Only warnings and errors are surfaced. Informational and debug output
//! from the runtime is dropped wholesale to keep host-visible output quiet.

use std::io::{self, Write};
use std::os::raw::c_int;

/// Severity of a runtime log message.
///
/// The discriminants mirror `enum ggml_log_level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    None,
    Debug,
    Info,
    Warn,
    Error,
    /// Continuation of the previous message.
    Cont,
}

impl LogLevel {
    /// Map a raw level from the runtime callback. Unknown values are
    /// treated as `None` and end up dropped by the router.
    pub fn from_raw(raw: c_int) -> Self {
        match raw {
            1 => Self::Debug,
            2 => Self::Info,
            3 => Self::Warn,
            4 => Self::Error,
            5 => Self::Cont,
            _ => Self::None,
        }
    }
}

/// Destination channel for a routed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Error stream, for ERROR-level messages.
    Stderr,
    /// Standard output, for WARN-level messages.
    Stdout,
}

/// Tag prepended to every routed error line.
pub const ERROR_TAG: &str = "LLAMA_ERR: ";
/// Tag prepended to every routed warning line.
pub const WARN_TAG: &str = "LLAMA_WARN: ";

// Tokenizer noise: some models (Gemma 3 among them) trip an end-of-generation
// token advisory on every load.
const EOG_ADVISORY: &str = "is not marked as EOG";

// Verbose model-load progress markers emitted once per tensor or parameter.
const NOISE_PREFIXES: &[&str] = &["print_info:", "load_tensors:", "create_tensor:", "load:"];

// GPU pipeline/kernel build progress.
const PIPELINE_PROGRESS: &[&str] = &["compiling pipeline", "loaded kernel"];

/// Whether `text` matches a known-noisy category. Rules are ordered and the
/// first match wins.
fn is_noise(text: &str) -> bool {
    if text.contains(EOG_ADVISORY) {
        return true;
    }
    if text.contains("unused") {
        return true;
    }
    if NOISE_PREFIXES.iter().any(|p| text.starts_with(p)) {
        return true;
    }
    PIPELINE_PROGRESS.iter().any(|s| text.contains(s))
}

/// Decide where a message goes, if anywhere.
///
/// Empty and noisy text is dropped regardless of level; surviving messages
/// route by severity, and anything below WARN is dropped.
pub fn route(level: LogLevel, text: &str) -> Option<Channel> {
    if text.is_empty() || is_noise(text) {
        return None;
    }
    match level {
        LogLevel::Error => Some(Channel::Stderr),
        LogLevel::Warn => Some(Channel::Stdout),
        _ => None,
    }
}

/// Route one message into the given sinks.
///
/// Text is emitted verbatim after the channel tag; the runtime supplies its
/// own newlines. Write failures are ignored: a log sink has nowhere to
/// report an error to.
pub fn dispatch<E: Write, O: Write>(level: LogLevel, text: &str, err: &mut E, out: &mut O) {
    match route(level, text) {
        Some(Channel::Stderr) => {
            let _ = write!(err, "{ERROR_TAG}{text}");
        }
        Some(Channel::Stdout) => {
            let _ = write!(out, "{WARN_TAG}{text}");
        }
        None => {}
    }
}

/// Log sink installed into the runtime via `llama_log_set`.
///
/// Invoked from runtime-owned threads. NULL text is dropped; nothing in
/// here may unwind across the C boundary.
pub unsafe extern "C" fn runtime_log_callback(
    level: c_int,
    text: *const std::os::raw::c_char,
    _user_data: *mut std::ffi::c_void,
) {
    if text.is_null() {
        return;
    }
    let text = std::ffi::CStr::from_ptr(text).to_string_lossy();
    let level = LogLevel::from_raw(level);
    dispatch(level, &text, &mut io::stderr(), &mut io::stdout());
    #[cfg(target_os = "android")]
    if let Some(channel) = route(level, &text) {
        android::mirror(channel, &text);
    }
}

/// Mirror to the Android system log, which is the only place diagnostics
/// are visible in an app context.
#[cfg(target_os = "android")]
pub(crate) mod android {
    use super::Channel;
    use std::ffi::CString;
    use std::os::raw::{c_char, c_int};

    pub const ANDROID_LOG_INFO: c_int = 4;
    pub const ANDROID_LOG_WARN: c_int = 5;
    pub const ANDROID_LOG_ERROR: c_int = 6;

    const TAG: &std::ffi::CStr = c"llama_bridge";

    extern "C" {
        fn __android_log_write(prio: c_int, tag: *const c_char, text: *const c_char) -> c_int;
    }

    /// Write one line to logcat. Messages with interior NULs are dropped.
    pub fn log_write(prio: c_int, text: &str) {
        if let Ok(text) = CString::new(text) {
            unsafe {
                __android_log_write(prio, TAG.as_ptr(), text.as_ptr());
            }
        }
    }

    pub fn mirror(channel: Channel, text: &str) {
        let prio = match channel {
            Channel::Stderr => ANDROID_LOG_ERROR,
            Channel::Stdout => ANDROID_LOG_WARN,
        };
        log_write(prio, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(level: LogLevel, text: &str) -> (String, String) {
        let mut err = Vec::new();
        let mut out = Vec::new();
        dispatch(level, text, &mut err, &mut out);
        (
            String::from_utf8(err).unwrap(),
            String::from_utf8(out).unwrap(),
        )
    }

    #[test]
    fn test_level_mapping() {
        assert_eq!(LogLevel::from_raw(2), LogLevel::Info);
        assert_eq!(LogLevel::from_raw(3), LogLevel::Warn);
        assert_eq!(LogLevel::from_raw(4), LogLevel::Error);
        assert_eq!(LogLevel::from_raw(0), LogLevel::None);
        assert_eq!(LogLevel::from_raw(-7), LogLevel::None);
        assert_eq!(LogLevel::from_raw(99), LogLevel::None);
    }

    #[test]
    fn test_error_routes_to_stderr_with_tag() {
        let (err, out) = capture(LogLevel::Error, "allocation failed");
        assert_eq!(err, "LLAMA_ERR: allocation failed");
        assert!(out.is_empty());
    }

    #[test]
    fn test_warn_routes_to_stdout_with_tag() {
        let (err, out) = capture(LogLevel::Warn, "context size is large");
        assert!(err.is_empty());
        assert_eq!(out, "LLAMA_WARN: context size is large");
    }

    #[test]
    fn test_info_and_debug_are_dropped() {
        for level in [LogLevel::Info, LogLevel::Debug, LogLevel::None, LogLevel::Cont] {
            let (err, out) = capture(level, "model loaded in 3.2s");
            assert!(err.is_empty());
            assert!(out.is_empty());
        }
    }

    #[test]
    fn test_empty_text_is_dropped() {
        let (err, out) = capture(LogLevel::Error, "");
        assert!(err.is_empty());
        assert!(out.is_empty());
    }

    #[test]
    fn test_eog_advisory_is_dropped() {
        let (err, out) = capture(
            LogLevel::Warn,
            "token 106 is not marked as EOG but acts like one",
        );
        assert!(err.is_empty());
        assert!(out.is_empty());
    }

    #[test]
    fn test_unused_filter_overrides_warn_level() {
        let (err, out) = capture(LogLevel::Warn, "unused tensor X");
        assert!(err.is_empty());
        assert!(out.is_empty());
    }

    #[test]
    fn test_load_progress_prefixes_are_dropped() {
        for text in [
            "print_info: n_ctx = 4096",
            "load_tensors: offloading 32 layers",
            "create_tensor: blk.0.attn_q.weight",
            "load: special tokens cache size = 3",
        ] {
            for level in [LogLevel::Warn, LogLevel::Error] {
                let (err, out) = capture(level, text);
                assert!(err.is_empty(), "{text:?} leaked to stderr");
                assert!(out.is_empty(), "{text:?} leaked to stdout");
            }
        }
    }

    #[test]
    fn test_pipeline_progress_is_dropped() {
        let (err, out) = capture(LogLevel::Warn, "ggml_vulkan: compiling pipeline matmul_f16");
        assert!(err.is_empty());
        assert!(out.is_empty());

        let (err, out) = capture(LogLevel::Warn, "metal: loaded kernel kernel_mul_mm");
        assert!(err.is_empty());
        assert!(out.is_empty());
    }

    #[test]
    fn test_prefix_rules_only_match_at_start() {
        // "load:" appearing mid-message is not a load-progress marker.
        let (err, _) = capture(LogLevel::Error, "failed during load: bad magic");
        assert_eq!(err, "LLAMA_ERR: failed during load: bad magic");
    }

    #[test]
    fn test_route_is_deterministic() {
        for _ in 0..3 {
            assert_eq!(
                route(LogLevel::Error, "allocation failed"),
                Some(Channel::Stderr)
            );
            assert_eq!(route(LogLevel::Warn, "unused tensor X"), None);
        }
    }

    #[test]
    fn test_text_emitted_verbatim_with_runtime_newline() {
        let (err, _) = capture(LogLevel::Error, "out of memory\n");
        assert_eq!(err, "LLAMA_ERR: out of memory\n");
    }
}

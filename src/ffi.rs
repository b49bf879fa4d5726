//! C ABI entry points called by the host engine.
//!
//! Every function returns a heap-allocated, NUL-terminated UTF-8 string that
//! the caller must release with [`stream_audio_free_string`].

use std::ffi::{c_char, CString};

use crate::audio::{self, AudioSessionConfigurator};
use crate::config::Config;

fn configurator() -> AudioSessionConfigurator<impl audio::AudioServiceProvider> {
    let config = Config::new().unwrap_or_default();
    crate::init_logging(&config);
    AudioSessionConfigurator::new(audio::platform_provider(&config), config)
}

fn into_c_string(s: String) -> *mut c_char {
    let bytes: Vec<u8> = s.into_bytes().into_iter().filter(|&b| b != 0).collect();
    // 已去掉所有 NUL，构造不会失败
    CString::new(bytes).unwrap_or_default().into_raw()
}

/// Puts the device into communication mode and applies call tuning.
///
/// Returns the applied-parameter summary, or `Error: <message>`.
#[unsafe(no_mangle)]
pub extern "C" fn stream_audio_setup_for_call() -> *mut c_char {
    into_c_string(configurator().configure_for_call())
}

/// Returns the `key=value|...` audio state, or `error=<message>`.
#[unsafe(no_mangle)]
pub extern "C" fn stream_audio_get_debug_info() -> *mut c_char {
    into_c_string(configurator().snapshot_debug_info())
}

/// Returns the audio state as a JSON object.
#[unsafe(no_mangle)]
pub extern "C" fn stream_audio_get_debug_info_json() -> *mut c_char {
    into_c_string(configurator().snapshot_debug_json())
}

/// Releases a string returned by this library. Null is ignored.
///
/// # Safety
///
/// `s` must come from one of the functions above and must not be freed twice.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn stream_audio_free_string(s: *mut c_char) {
    if s.is_null() {
        return;
    }
    drop(unsafe { CString::from_raw(s) });
}

#[cfg(all(test, not(target_os = "android")))]
mod tests {
    use super::*;
    use std::ffi::CStr;

    fn take(ptr: *mut c_char) -> String {
        let s = unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned();
        unsafe { stream_audio_free_string(ptr) };
        s
    }

    #[test]
    fn desktop_builds_report_unsupported_platform() {
        assert_eq!(
            take(stream_audio_setup_for_call()),
            "Error: Not running on Android platform"
        );
        assert_eq!(
            take(stream_audio_get_debug_info()),
            "error=Not running on Android platform"
        );
        assert_eq!(
            take(stream_audio_get_debug_info_json()),
            r#"{"error":"Not running on Android platform"}"#
        );
    }

    #[test]
    fn interior_nul_is_stripped() {
        assert_eq!(take(into_c_string("a\0b".to_string())), "ab");
    }

    #[test]
    fn freeing_null_is_a_no_op() {
        unsafe { stream_audio_free_string(std::ptr::null_mut()) };
    }
}

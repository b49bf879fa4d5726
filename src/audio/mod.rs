//! audio - Call audio setup and audio state snapshots
//!
//! Wraps the platform audio-management service behind [`AudioService`] so
//! the configurator logic is the same on every backend.

#[cfg(target_os = "android")]
pub mod android;
pub mod capability;
pub mod codes;
mod configurator;
pub mod service;
pub mod snapshot;
pub mod test_service;

pub use capability::Capability;
pub use configurator::{
    has_default_input, has_default_output, AudioSessionConfigurator, CallAudioConfigResult,
};
pub use service::{
    AudioService, AudioServiceProvider, AudioStream, DeviceDirection, PlatformInfo,
    UnsupportedPlatform,
};
pub use snapshot::{AudioDebugSnapshot, SnapshotField};

/// The provider for the platform this library was built for.
#[cfg(target_os = "android")]
pub fn platform_provider(config: &crate::config::Config) -> android::AndroidAudioProvider {
    android::AndroidAudioProvider::new(config)
}

/// The provider for the platform this library was built for.
#[cfg(not(target_os = "android"))]
pub fn platform_provider(_config: &crate::config::Config) -> UnsupportedPlatform {
    UnsupportedPlatform
}

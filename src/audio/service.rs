//! The platform audio-management service seam.

use anyhow::Result;

/// Volume streams included in the debug snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioStream {
    VoiceCall,
    System,
    Ring,
    Music,
}

impl AudioStream {
    /// Snapshot order.
    pub const ALL: [AudioStream; 4] = [
        AudioStream::VoiceCall,
        AudioStream::System,
        AudioStream::Ring,
        AudioStream::Music,
    ];

    /// `AudioManager.STREAM_*` value
    pub fn code(self) -> i32 {
        match self {
            AudioStream::VoiceCall => 0,
            AudioStream::System => 1,
            AudioStream::Ring => 2,
            AudioStream::Music => 3,
        }
    }

    pub fn volume_key(self) -> &'static str {
        match self {
            AudioStream::VoiceCall => "volumeVoiceCall",
            AudioStream::System => "volumeSystem",
            AudioStream::Ring => "volumeRing",
            AudioStream::Music => "volumeMusic",
        }
    }
}

/// Which devices to enumerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceDirection {
    Inputs,
    Outputs,
    All,
}

impl DeviceDirection {
    /// `AudioManager.GET_DEVICES_*` flag
    pub fn flags(self) -> i32 {
        match self {
            DeviceDirection::Inputs => 1,
            DeviceDirection::Outputs => 2,
            DeviceDirection::All => 3,
        }
    }
}

/// OS and hardware identification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformInfo {
    pub sdk_int: i32,
    pub release: String,
    pub model: String,
    pub manufacturer: String,
}

/// A borrowed handle to the platform audio service.
///
/// Every call may fail the way the platform API raises; implementations
/// surface that as an error carrying the platform's message.
pub trait AudioService {
    fn mode(&mut self) -> Result<i32>;
    /// Changes the audio mode only; output routing is left alone.
    fn set_mode(&mut self, mode: i32) -> Result<()>;

    fn is_speakerphone_on(&mut self) -> Result<bool>;
    fn is_microphone_mute(&mut self) -> Result<bool>;
    fn is_music_active(&mut self) -> Result<bool>;
    fn ringer_mode(&mut self) -> Result<i32>;
    fn is_bluetooth_sco_on(&mut self) -> Result<bool>;
    fn is_bluetooth_a2dp_on(&mut self) -> Result<bool>;
    fn is_wired_headset_on(&mut self) -> Result<bool>;

    fn stream_volume(&mut self, stream: AudioStream) -> Result<i32>;
    fn stream_max_volume(&mut self, stream: AudioStream) -> Result<i32>;

    /// Vendor key/value channel. Unsupported keys are usually ignored silently.
    fn set_parameters(&mut self, key_value: &str) -> Result<()>;
    /// Returns `None` when the platform hands back nothing (null).
    fn parameters(&mut self, key: &str) -> Result<Option<String>>;

    /// Device type codes for every device in `direction`.
    fn devices(&mut self, direction: DeviceDirection) -> Result<Vec<i32>>;

    fn platform_info(&mut self) -> Result<PlatformInfo>;
}

/// Lends out an [`AudioService`] for the duration of one operation.
///
/// The host owns the real service; providers never create or release it.
pub trait AudioServiceProvider {
    fn with_service<R>(&self, f: impl FnOnce(&mut dyn AudioService) -> R) -> Result<R>;
}

/// Provider for builds without a platform audio service.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedPlatform;

impl AudioServiceProvider for UnsupportedPlatform {
    fn with_service<R>(&self, _f: impl FnOnce(&mut dyn AudioService) -> R) -> Result<R> {
        anyhow::bail!("Not running on Android platform")
    }
}

/// Text for a platform exception: its message, else its description
/// (only asked for when the message is missing or empty).
pub fn exception_text(
    message: Option<String>,
    describe: impl FnOnce() -> Option<String>,
) -> String {
    message
        .filter(|m| !m.is_empty())
        .or_else(|| describe().filter(|d| !d.is_empty()))
        .unwrap_or_else(|| "Java exception".to_string())
}

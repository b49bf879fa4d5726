//! Call setup and state snapshot on top of an [`AudioServiceProvider`].
//!
//! Both operations always produce a string. Failures are reported inline:
//! - configure-for-call: `Error: ...` if the mode switch cannot happen,
//!   a trailing `Warning: ...` if only the vendor tuning failed
//! - snapshot: `error=...` for any failure outside the vendor echo phase,
//!   `vendorParamsError=...` as a field for failures inside it

use std::fmt;

use anyhow::{Context, Result};

use super::capability::Capability;
use super::codes::{self, MODE_IN_COMMUNICATION, TYPE_BUILTIN_MIC, TYPE_BUILTIN_SPEAKER};
use super::service::{AudioService, AudioServiceProvider, AudioStream, DeviceDirection};
use super::snapshot::AudioDebugSnapshot;
use crate::config::Config;

/// Vendor parameters applied before a call, in order.
const CALL_PARAMETERS: [&str; 4] = [
    "ec_enable=true",
    "ec_supported=true",
    "noise_suppression=true",
    "agc_enable=true",
];

const KEY_FLUENCE: &str = "fluence";
const KEY_EC_ENABLE: &str = "ec_enable";
const KEY_NOISE_SUPPRESSION: &str = "noise_suppression";

/// What the vendor parameter channel reported back after call setup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallAudioConfigResult {
    pub fluence: Option<String>,
    pub echo_cancellation: Option<String>,
    pub noise_suppression: Option<String>,
    pub warning: Option<String>,
}

impl fmt::Display for CallAudioConfigResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(v) = &self.fluence {
            write!(f, "Fluence: {}; ", v)?;
        }
        if let Some(v) = &self.echo_cancellation {
            write!(f, "EC: {}; ", v)?;
        }
        if let Some(v) = &self.noise_suppression {
            write!(f, "NS: {}; ", v)?;
        }
        if let Some(w) = &self.warning {
            write!(f, "Warning: Some audio parameters not supported: {}", w)?;
        }
        Ok(())
    }
}

/// Stateless façade over the platform audio service.
pub struct AudioSessionConfigurator<P> {
    provider: P,
    config: Config,
}

impl<P: AudioServiceProvider> AudioSessionConfigurator<P> {
    pub fn new(provider: P, config: Config) -> Self {
        Self { provider, config }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Switches to communication mode and applies echo/noise/gain tuning.
    pub fn configure_for_call(&self) -> String {
        let outcome = self
            .provider
            .with_service(|svc| self.apply_call_settings(svc))
            .and_then(|r| r);

        match outcome {
            Ok(result) => result.to_string(),
            Err(e) => {
                log::error!("Call audio setup failed: {:#}", e);
                format!("Error: {:#}", e)
            }
        }
    }

    fn apply_call_settings(&self, svc: &mut dyn AudioService) -> Result<CallAudioConfigResult> {
        svc.set_mode(MODE_IN_COMMUNICATION)?;
        log::info!("Audio mode set to IN_COMMUNICATION");

        let mut result = CallAudioConfigResult::default();
        if let Err(e) = self.tune_vendor_parameters(svc, &mut result) {
            log::warn!("Vendor audio tuning incomplete: {:#}", e);
            result.warning = Some(format!("{:#}", e));
        }
        Ok(result)
    }

    /// Fills `result` as readbacks arrive so a late failure keeps earlier ones.
    fn tune_vendor_parameters(
        &self,
        svc: &mut dyn AudioService,
        result: &mut CallAudioConfigResult,
    ) -> Result<()> {
        for kv in CALL_PARAMETERS {
            svc.set_parameters(kv)?;
        }

        let sdk_int = svc.platform_info()?.sdk_int;
        if Capability::Fluence.is_supported(sdk_int, &self.config) {
            for mode in &self.config.fluence_modes {
                svc.set_parameters(&format!("{}={}", KEY_FLUENCE, mode))?;
                if let Some(readback) = non_empty(svc.parameters(KEY_FLUENCE)?) {
                    log::debug!("Fluence candidate '{}' accepted: {}", mode, readback);
                    result.fluence = Some(readback);
                    break;
                }
            }
        }

        result.echo_cancellation = non_empty(svc.parameters(KEY_EC_ENABLE)?);
        result.noise_suppression = non_empty(svc.parameters(KEY_NOISE_SUPPRESSION)?);
        Ok(())
    }

    /// Rendered snapshot, or `error=<message>`.
    pub fn snapshot_debug_info(&self) -> String {
        match self.debug_snapshot() {
            Ok(snapshot) => snapshot.render(self.config.snapshot_delimiter),
            Err(e) => format!("error={:#}", e),
        }
    }

    /// Snapshot as a JSON object, or `{"error": "<message>"}`.
    pub fn snapshot_debug_json(&self) -> String {
        let value = match self.debug_snapshot() {
            Ok(snapshot) => serde_json::to_value(&snapshot),
            Err(e) => Ok(serde_json::json!({ "error": format!("{:#}", e) })),
        };
        match value {
            Ok(v) => v.to_string(),
            Err(e) => serde_json::json!({ "error": e.to_string() }).to_string(),
        }
    }

    pub fn debug_snapshot(&self) -> Result<AudioDebugSnapshot> {
        let snapshot = self
            .provider
            .with_service(|svc| self.collect_snapshot(svc))
            .and_then(|r| r);
        if let Err(e) = &snapshot {
            log::warn!("Audio debug snapshot failed: {:#}", e);
        }
        snapshot
    }

    fn collect_snapshot(&self, svc: &mut dyn AudioService) -> Result<AudioDebugSnapshot> {
        let mut snap = AudioDebugSnapshot::new();

        snap.push("audioMode", codes::audio_mode_name(svc.mode()?));
        snap.push("speakerphoneOn", svc.is_speakerphone_on()?);
        snap.push("microphoneMute", svc.is_microphone_mute()?);
        snap.push("musicActive", svc.is_music_active()?);
        snap.push("ringerMode", codes::ringer_mode_name(svc.ringer_mode()?));
        snap.push("bluetoothScoOn", svc.is_bluetooth_sco_on()?);
        snap.push("bluetoothA2dpOn", svc.is_bluetooth_a2dp_on()?);
        snap.push("wiredHeadsetOn", svc.is_wired_headset_on()?);

        for stream in AudioStream::ALL {
            let current = svc.stream_volume(stream)?;
            let max = svc.stream_max_volume(stream)?;
            snap.push(stream.volume_key(), format!("{}/{}", current, max));
        }

        let platform = svc.platform_info()?;
        snap.push("androidSDK", platform.sdk_int);
        snap.push("androidRelease", &platform.release);
        snap.push("deviceModel", &platform.model);
        snap.push("deviceManufacturer", &platform.manufacturer);

        if Capability::DeviceEnumeration.is_supported(platform.sdk_int, &self.config) {
            let devices = svc
                .devices(DeviceDirection::All)
                .context("Failed to enumerate audio devices")?;
            let names: Vec<String> = devices.iter().map(|&t| codes::device_type_name(t)).collect();
            snap.push("connectedAudioDevices", devices.len());
            snap.push("audioDeviceTypes", names.join(","));

            snap.push("hasDefaultMic", has_default_input(svc, platform.sdk_int, &self.config)?);
            snap.push("hasDefaultSpeaker", has_default_output(svc, platform.sdk_int, &self.config)?);
        }

        if let Err(e) = Self::echo_vendor_parameters(svc, &mut snap) {
            snap.push("vendorParamsError", format!("{:#}", e));
        }

        Ok(snap)
    }

    fn echo_vendor_parameters(svc: &mut dyn AudioService, snap: &mut AudioDebugSnapshot) -> Result<()> {
        snap.push_non_empty("noiseSuppression", svc.parameters(KEY_NOISE_SUPPRESSION)?);
        snap.push_non_empty("echoCancel", svc.parameters(KEY_EC_ENABLE)?);
        snap.push_non_empty("fluence", svc.parameters(KEY_FLUENCE)?);
        Ok(())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Whether a built-in microphone is among the input devices.
pub fn has_default_input(svc: &mut dyn AudioService, sdk_int: i32, config: &Config) -> Result<bool> {
    has_device_of_type(svc, DeviceDirection::Inputs, TYPE_BUILTIN_MIC, sdk_int, config)
}

/// Whether a built-in speaker is among the output devices.
pub fn has_default_output(svc: &mut dyn AudioService, sdk_int: i32, config: &Config) -> Result<bool> {
    has_device_of_type(svc, DeviceDirection::Outputs, TYPE_BUILTIN_SPEAKER, sdk_int, config)
}

fn has_device_of_type(
    svc: &mut dyn AudioService,
    direction: DeviceDirection,
    device_type: i32,
    sdk_int: i32,
    config: &Config,
) -> Result<bool> {
    if !Capability::DeviceEnumeration.is_supported(sdk_int, config) {
        return Ok(false);
    }
    Ok(svc.devices(direction)?.contains(&device_type))
}

//! In-memory audio service for exercising the configurator without a device.
//!
//! Records every call it receives and can be told to fail specific
//! operations or vendor keys, the way a real platform raises exceptions.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use anyhow::Result;

use super::codes;
use super::service::{
    AudioService, AudioServiceProvider, AudioStream, DeviceDirection, PlatformInfo,
};

/// A device known to the test service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestDevice {
    pub device_type: i32,
    pub is_source: bool,
    pub is_sink: bool,
}

impl TestDevice {
    pub fn input(device_type: i32) -> Self {
        Self { device_type, is_source: true, is_sink: false }
    }

    pub fn output(device_type: i32) -> Self {
        Self { device_type, is_source: false, is_sink: true }
    }
}

#[derive(Debug, Clone)]
pub struct TestAudioService {
    pub mode: i32,
    pub ringer_mode: i32,
    pub speakerphone_on: bool,
    pub microphone_mute: bool,
    pub music_active: bool,
    pub bluetooth_sco_on: bool,
    pub bluetooth_a2dp_on: bool,
    pub wired_headset_on: bool,
    /// (current, max) per stream; missing streams report 0/0
    pub volumes: HashMap<AudioStream, (i32, i32)>,
    pub platform: PlatformInfo,
    pub devices: Vec<TestDevice>,

    /// Stored vendor parameters, returned verbatim as `key=value`.
    pub parameters: HashMap<String, String>,
    /// `key=value` pairs the vendor layer silently drops.
    pub ignored_parameters: HashSet<String>,
    /// Vendor keys whose set or get raises.
    pub faulting_keys: HashSet<String>,
    /// Vendor keys whose get raises; sets still succeed.
    pub faulting_reads: HashSet<String>,
    /// Operation names (e.g. `"set_mode"`, `"devices"`) that raise.
    pub faulting_operations: HashSet<&'static str>,

    /// Every operation invoked, in order, e.g. `set_parameters(ec_enable=true)`.
    pub calls: Vec<String>,
}

impl Default for TestAudioService {
    fn default() -> Self {
        Self {
            mode: codes::MODE_NORMAL,
            ringer_mode: codes::RINGER_MODE_NORMAL,
            speakerphone_on: false,
            microphone_mute: false,
            music_active: false,
            bluetooth_sco_on: false,
            bluetooth_a2dp_on: false,
            wired_headset_on: false,
            volumes: HashMap::new(),
            platform: PlatformInfo {
                sdk_int: 34,
                release: "14".to_string(),
                model: "Pixel 8".to_string(),
                manufacturer: "Google".to_string(),
            },
            devices: Vec::new(),
            parameters: HashMap::new(),
            ignored_parameters: HashSet::new(),
            faulting_keys: HashSet::new(),
            faulting_reads: HashSet::new(),
            faulting_operations: HashSet::new(),
            calls: Vec::new(),
        }
    }
}

impl TestAudioService {
    pub fn new() -> Self {
        Self::default()
    }

    fn enter(&mut self, op: &'static str, arg: Option<&str>) -> Result<()> {
        match arg {
            Some(a) => self.calls.push(format!("{}({})", op, a)),
            None => self.calls.push(op.to_string()),
        }
        if self.faulting_operations.contains(op) {
            anyhow::bail!("{} raised", op);
        }
        Ok(())
    }

    fn check_key(&self, key: &str) -> Result<()> {
        if self.faulting_keys.contains(key) {
            anyhow::bail!("parameter '{}' raised", key);
        }
        Ok(())
    }
}

impl AudioService for TestAudioService {
    fn mode(&mut self) -> Result<i32> {
        self.enter("mode", None)?;
        Ok(self.mode)
    }

    fn set_mode(&mut self, mode: i32) -> Result<()> {
        self.enter("set_mode", Some(&mode.to_string()))?;
        self.mode = mode;
        Ok(())
    }

    fn is_speakerphone_on(&mut self) -> Result<bool> {
        self.enter("is_speakerphone_on", None)?;
        Ok(self.speakerphone_on)
    }

    fn is_microphone_mute(&mut self) -> Result<bool> {
        self.enter("is_microphone_mute", None)?;
        Ok(self.microphone_mute)
    }

    fn is_music_active(&mut self) -> Result<bool> {
        self.enter("is_music_active", None)?;
        Ok(self.music_active)
    }

    fn ringer_mode(&mut self) -> Result<i32> {
        self.enter("ringer_mode", None)?;
        Ok(self.ringer_mode)
    }

    fn is_bluetooth_sco_on(&mut self) -> Result<bool> {
        self.enter("is_bluetooth_sco_on", None)?;
        Ok(self.bluetooth_sco_on)
    }

    fn is_bluetooth_a2dp_on(&mut self) -> Result<bool> {
        self.enter("is_bluetooth_a2dp_on", None)?;
        Ok(self.bluetooth_a2dp_on)
    }

    fn is_wired_headset_on(&mut self) -> Result<bool> {
        self.enter("is_wired_headset_on", None)?;
        Ok(self.wired_headset_on)
    }

    fn stream_volume(&mut self, stream: AudioStream) -> Result<i32> {
        self.enter("stream_volume", None)?;
        Ok(self.volumes.get(&stream).map_or(0, |v| v.0))
    }

    fn stream_max_volume(&mut self, stream: AudioStream) -> Result<i32> {
        self.enter("stream_max_volume", None)?;
        Ok(self.volumes.get(&stream).map_or(0, |v| v.1))
    }

    fn set_parameters(&mut self, key_value: &str) -> Result<()> {
        self.enter("set_parameters", Some(key_value))?;
        let (key, value) = key_value.split_once('=').unwrap_or((key_value, ""));
        self.check_key(key)?;
        if !self.ignored_parameters.contains(key_value) {
            self.parameters.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }

    fn parameters(&mut self, key: &str) -> Result<Option<String>> {
        self.enter("parameters", Some(key))?;
        self.check_key(key)?;
        if self.faulting_reads.contains(key) {
            anyhow::bail!("reading '{}' raised", key);
        }
        Ok(self.parameters.get(key).map(|v| format!("{}={}", key, v)))
    }

    fn devices(&mut self, direction: DeviceDirection) -> Result<Vec<i32>> {
        self.enter("devices", Some(&format!("{:?}", direction)))?;
        Ok(self
            .devices
            .iter()
            .filter(|d| match direction {
                DeviceDirection::Inputs => d.is_source,
                DeviceDirection::Outputs => d.is_sink,
                DeviceDirection::All => true,
            })
            .map(|d| d.device_type)
            .collect())
    }

    fn platform_info(&mut self) -> Result<PlatformInfo> {
        self.enter("platform_info", None)?;
        Ok(self.platform.clone())
    }
}

/// Lends a [`TestAudioService`]; `unavailable` simulates a missing handle.
#[derive(Debug, Default)]
pub struct TestAudioProvider {
    pub service: RefCell<TestAudioService>,
    pub unavailable: Option<String>,
}

impl TestAudioProvider {
    pub fn new(service: TestAudioService) -> Self {
        Self {
            service: RefCell::new(service),
            unavailable: None,
        }
    }

    pub fn unavailable(message: &str) -> Self {
        Self {
            service: RefCell::default(),
            unavailable: Some(message.to_string()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.service.borrow().calls.clone()
    }
}

impl AudioServiceProvider for TestAudioProvider {
    fn with_service<R>(&self, f: impl FnOnce(&mut dyn AudioService) -> R) -> Result<R> {
        if let Some(message) = &self.unavailable {
            anyhow::bail!("{}", message);
        }
        let mut service = self.service.borrow_mut();
        Ok(f(&mut *service))
    }
}

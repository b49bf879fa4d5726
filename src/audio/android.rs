//! `android.media.AudioManager` reached through JNI.
//!
//! The host loads this library from Java, so `JNI_OnLoad` hands us the
//! `JavaVM`. Each operation attaches the calling thread, looks up the host
//! activity and borrows its `AudioManager` for the duration of the call.

use std::ffi::c_void;
use std::sync::OnceLock;

use anyhow::{anyhow, Context, Result};
use jni::errors::Error as JniError;
use jni::objects::{JObject, JObjectArray, JString, JValue, JValueOwned};
use jni::sys::{jint, JNI_VERSION_1_6};
use jni::{JNIEnv, JavaVM};

use super::service::{
    exception_text, AudioService, AudioServiceProvider, AudioStream, DeviceDirection,
    PlatformInfo,
};
use crate::config::Config;

const CONTEXT_AUDIO_SERVICE: &str = "audio";
const BUILD_CLASS: &str = "android/os/Build";
const BUILD_VERSION_CLASS: &str = "android/os/Build$VERSION";
const SIG_STRING: &str = "Ljava/lang/String;";
// Enough for one snapshot; the VM grows the frame if a device list needs more.
const LOCAL_FRAME_CAPACITY: i32 = 32;

static JAVA_VM: OnceLock<JavaVM> = OnceLock::new();

#[unsafe(no_mangle)]
pub extern "system" fn JNI_OnLoad(vm: JavaVM, _reserved: *mut c_void) -> jint {
    if JAVA_VM.set(vm).is_err() {
        log::warn!("JNI_OnLoad called twice, keeping the first JavaVM");
    }
    JNI_VERSION_1_6
}

/// Provider backed by the host activity's `AudioManager`.
#[derive(Debug, Clone)]
pub struct AndroidAudioProvider {
    activity_class: &'static str,
    activity_field: &'static str,
}

impl AndroidAudioProvider {
    pub fn new(config: &Config) -> Self {
        Self {
            activity_class: config.host_activity_class,
            activity_field: config.host_activity_field,
        }
    }

    fn audio_manager<'local>(&self, env: &mut JNIEnv<'local>) -> Result<JObject<'local>> {
        let sig = "Landroid/app/Activity;";
        let activity = match env.get_static_field(self.activity_class, self.activity_field, sig) {
            Ok(v) => v.l()?,
            Err(e) => return Err(jni_error(env, e)).with_context(|| {
                format!("Failed to read {}.{}", self.activity_class, self.activity_field)
            }),
        };
        if activity.is_null() {
            anyhow::bail!("No current activity");
        }

        let name = env.new_string(CONTEXT_AUDIO_SERVICE)?;
        let manager = match env.call_method(
            &activity,
            "getSystemService",
            "(Ljava/lang/String;)Ljava/lang/Object;",
            &[JValue::Object(&name)],
        ) {
            Ok(v) => v.l()?,
            Err(e) => return Err(jni_error(env, e)).context("getSystemService failed"),
        };
        if manager.is_null() {
            anyhow::bail!("AudioManager service unavailable");
        }
        Ok(manager)
    }
}

impl AudioServiceProvider for AndroidAudioProvider {
    fn with_service<R>(&self, f: impl FnOnce(&mut dyn AudioService) -> R) -> Result<R> {
        let vm = JAVA_VM
            .get()
            .context("JavaVM not available, JNI_OnLoad was not called")?;
        let mut guard = vm
            .attach_current_thread()
            .context("Failed to attach thread to JavaVM")?;
        let env: &mut JNIEnv = &mut guard;

        // Every local ref created below is released when the frame pops,
        // including those left behind on early `?` returns.
        env.with_local_frame(LOCAL_FRAME_CAPACITY, |env| -> Result<R> {
            let manager = self.audio_manager(env)?;
            let mut service = AndroidAudioService { env, manager };
            Ok(f(&mut service))
        })
    }
}

/// Converts a failed JNI call into an error, clearing any pending Java exception.
fn jni_error(env: &mut JNIEnv, err: JniError) -> anyhow::Error {
    if !matches!(err, JniError::JavaException) {
        return err.into();
    }
    let throwable = match env.exception_occurred() {
        Ok(t) => t,
        Err(e) => return e.into(),
    };
    if let Err(e) = env.exception_clear() {
        return e.into();
    }
    let message = throwable_string(env, &throwable, "getMessage");
    let text = exception_text(message, || throwable_string(env, &throwable, "toString"));
    let _ = env.delete_local_ref(throwable);
    anyhow!(text)
}

fn throwable_string(env: &mut JNIEnv, throwable: &JObject, method: &str) -> Option<String> {
    let value = env
        .call_method(throwable, method, "()Ljava/lang/String;", &[])
        .and_then(|v| v.l());
    match value {
        Ok(obj) => read_string(env, obj).ok().flatten(),
        Err(_) => {
            // a throwable that throws while describing itself
            let _ = env.exception_clear();
            None
        }
    }
}

fn read_string(env: &mut JNIEnv, obj: JObject) -> Result<Option<String>> {
    if obj.is_null() {
        return Ok(None);
    }
    let jstr = JString::from(obj);
    let value: String = env.get_string(&jstr)?.into();
    env.delete_local_ref(jstr)?;
    Ok(Some(value))
}

struct AndroidAudioService<'a, 'local> {
    env: &'a mut JNIEnv<'local>,
    manager: JObject<'local>,
}

impl<'a, 'local> AndroidAudioService<'a, 'local> {
    fn call(&mut self, name: &str, sig: &str, args: &[JValue]) -> Result<JValueOwned<'local>> {
        let result = self.env.call_method(&self.manager, name, sig, args);
        result.map_err(|e| {
            let err = jni_error(self.env, e);
            log::debug!("AudioManager.{} failed: {:#}", name, err);
            err
        })
    }

    fn call_bool(&mut self, name: &str) -> Result<bool> {
        Ok(self.call(name, "()Z", &[])?.z()?)
    }

    fn call_int(&mut self, name: &str, args: &[JValue]) -> Result<i32> {
        let sig = if args.is_empty() { "()I" } else { "(I)I" };
        Ok(self.call(name, sig, args)?.i()?)
    }

    fn static_string(&mut self, class: &str, field: &str) -> Result<String> {
        let value = match self.env.get_static_field(class, field, SIG_STRING) {
            Ok(v) => v.l()?,
            Err(e) => {
                let err = jni_error(self.env, e);
                log::debug!("Failed to read {}.{}: {:#}", class, field, err);
                return Err(err);
            }
        };
        Ok(read_string(self.env, value)?.unwrap_or_default())
    }

    fn device_type(&mut self, device: &JObject) -> Result<i32> {
        let result = self.env.call_method(device, "getType", "()I", &[]);
        let value = result.map_err(|e| jni_error(self.env, e))?;
        Ok(value.i()?)
    }
}

impl AudioService for AndroidAudioService<'_, '_> {
    fn mode(&mut self) -> Result<i32> {
        self.call_int("getMode", &[])
    }

    fn set_mode(&mut self, mode: i32) -> Result<()> {
        self.call("setMode", "(I)V", &[JValue::Int(mode)])?;
        Ok(())
    }

    fn is_speakerphone_on(&mut self) -> Result<bool> {
        self.call_bool("isSpeakerphoneOn")
    }

    fn is_microphone_mute(&mut self) -> Result<bool> {
        self.call_bool("isMicrophoneMute")
    }

    fn is_music_active(&mut self) -> Result<bool> {
        self.call_bool("isMusicActive")
    }

    fn ringer_mode(&mut self) -> Result<i32> {
        self.call_int("getRingerMode", &[])
    }

    fn is_bluetooth_sco_on(&mut self) -> Result<bool> {
        self.call_bool("isBluetoothScoOn")
    }

    fn is_bluetooth_a2dp_on(&mut self) -> Result<bool> {
        self.call_bool("isBluetoothA2dpOn")
    }

    fn is_wired_headset_on(&mut self) -> Result<bool> {
        self.call_bool("isWiredHeadsetOn")
    }

    fn stream_volume(&mut self, stream: AudioStream) -> Result<i32> {
        self.call_int("getStreamVolume", &[JValue::Int(stream.code())])
    }

    fn stream_max_volume(&mut self, stream: AudioStream) -> Result<i32> {
        self.call_int("getStreamMaxVolume", &[JValue::Int(stream.code())])
    }

    fn set_parameters(&mut self, key_value: &str) -> Result<()> {
        let arg = self.env.new_string(key_value)?;
        let arg = self.env.auto_local(arg);
        self.call("setParameters", "(Ljava/lang/String;)V", &[JValue::Object(&arg)])?;
        Ok(())
    }

    fn parameters(&mut self, key: &str) -> Result<Option<String>> {
        let arg = self.env.new_string(key)?;
        let arg = self.env.auto_local(arg);
        let value = self
            .call(
                "getParameters",
                "(Ljava/lang/String;)Ljava/lang/String;",
                &[JValue::Object(&arg)],
            )?
            .l()?;
        read_string(self.env, value)
    }

    fn devices(&mut self, direction: DeviceDirection) -> Result<Vec<i32>> {
        let array = self
            .call(
                "getDevices",
                "(I)[Landroid/media/AudioDeviceInfo;",
                &[JValue::Int(direction.flags())],
            )?
            .l()?;
        if array.is_null() {
            return Ok(Vec::new());
        }
        let array = self.env.auto_local(JObjectArray::from(array));

        let len = self.env.get_array_length(&*array)?;
        let mut types = Vec::with_capacity(len.max(0) as usize);
        for i in 0..len {
            let device = self.env.get_object_array_element(&*array, i)?;
            let device = self.env.auto_local(device);
            types.push(self.device_type(&device)?);
        }
        Ok(types)
    }

    fn platform_info(&mut self) -> Result<PlatformInfo> {
        let sdk_int = match self.env.get_static_field(BUILD_VERSION_CLASS, "SDK_INT", "I") {
            Ok(v) => v.i()?,
            Err(e) => {
                let err = jni_error(self.env, e);
                log::debug!("Failed to read Build.VERSION.SDK_INT: {:#}", err);
                return Err(err);
            }
        };
        Ok(PlatformInfo {
            sdk_int,
            release: self.static_string(BUILD_VERSION_CLASS, "RELEASE")?,
            model: self.static_string(BUILD_CLASS, "MODEL")?,
            manufacturer: self.static_string(BUILD_CLASS, "MANUFACTURER")?,
        })
    }
}

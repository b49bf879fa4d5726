//! stream_audio_utils - native audio helpers for a host game engine
//!
//! Two operations are exposed to the host through [`ffi`]:
//! switching the device into voice-call mode with vendor echo/noise tuning,
//! and dumping the current audio state as a `key=value|...` string.

pub mod audio;
pub mod config;
pub mod ffi;

pub use audio::{AudioDebugSnapshot, AudioSessionConfigurator, CallAudioConfigResult};
pub use config::Config;

use std::sync::Once;

use log::LevelFilter;

static LOGGER: Once = Once::new();

/// 初始化日志，只执行一次；RUST_LOG 优先于配置中的默认级别
pub fn init_logging(config: &Config) {
    LOGGER.call_once(|| {
        if install_logger(config) {
            log::info!("{} v{} loaded", config.app_name, config.app_version);
            log::debug!("config: {}", serde_json::to_string(config).unwrap_or_default());
        }
    });
}

#[cfg(not(target_os = "android"))]
fn install_logger(config: &Config) -> bool {
    env_logger::Builder::new()
        .filter_level(max_level(config))
        .parse_env(env_logger::Env::default())
        .try_init()
        .is_ok()
}

// 应用进程的 stderr 被丢弃，Android 上写 logcat
#[cfg(target_os = "android")]
fn install_logger(config: &Config) -> bool {
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(max_level(config))
            .with_tag(config.app_name),
    );
    true
}

fn max_level(config: &Config) -> LevelFilter {
    config.log_level.parse().unwrap_or(LevelFilter::Info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_level_becomes_the_max_level() {
        let mut config = Config::default();
        assert_eq!(max_level(&config), LevelFilter::Info);

        config.log_level = "debug";
        assert_eq!(max_level(&config), LevelFilter::Debug);

        config.log_level = "loud";
        assert_eq!(max_level(&config), LevelFilter::Info);
    }
}

use serde::Serialize;

/// 插件配置，全部在编译时从 config.toml 中读取
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Config {
    pub app_name: &'static str,
    pub app_version: &'static str,
    /// env_logger 默认过滤级别，可被 RUST_LOG 覆盖
    pub log_level: &'static str,

    // 宿主配置：持有当前 Activity 的 JNI 类名和静态字段
    pub host_activity_class: &'static str,
    pub host_activity_field: &'static str,

    // 平台能力门槛
    pub fluence_min_sdk: i32,
    pub device_query_min_sdk: i32,

    /// Fluence candidates, tried in order
    pub fluence_modes: Vec<&'static str>,

    pub snapshot_delimiter: char,
}

impl Config {
    /// 从编译时设置的环境变量创建配置
    pub fn new() -> Result<Self, &'static str> {
        let fluence_modes: Vec<&'static str> = env!("FLUENCE_MODES")
            .split(',')
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .collect();
        if fluence_modes.is_empty() {
            return Err("FLUENCE_MODES must list at least one mode");
        }

        Ok(Self {
            app_name: env!("APP_NAME"),
            app_version: env!("APP_VERSION"),
            log_level: env!("LOG_LEVEL"),

            host_activity_class: env!("HOST_ACTIVITY_CLASS"),
            host_activity_field: env!("HOST_ACTIVITY_FIELD"),

            fluence_min_sdk: env!("FLUENCE_MIN_SDK").parse()
                .map_err(|_| "Failed to parse FLUENCE_MIN_SDK")?,
            device_query_min_sdk: env!("DEVICE_QUERY_MIN_SDK").parse()
                .map_err(|_| "Failed to parse DEVICE_QUERY_MIN_SDK")?,

            fluence_modes,

            snapshot_delimiter: env!("SNAPSHOT_DELIMITER").parse()
                .map_err(|_| "Failed to parse SNAPSHOT_DELIMITER")?,
        })
    }
}

impl Default for Config {
    /// Built-in values matching the shipped config.toml.
    fn default() -> Self {
        Self {
            app_name: "stream_audio_utils",
            app_version: "0.1.0",
            log_level: "info",
            host_activity_class: "com/unity3d/player/UnityPlayer",
            host_activity_field: "currentActivity",
            fluence_min_sdk: 23,
            device_query_min_sdk: 23,
            fluence_modes: vec!["broadside", "endfire", "dualmic"],
            snapshot_delimiter: '|',
        }
    }
}

use std::fs;
use std::path::Path;
use serde::Deserialize;

#[derive(Deserialize)]
struct Config {
    application: Application,
    host: Host,
    capability: Capability,
    vendor: Vendor,
    snapshot: Snapshot,
}

#[derive(Deserialize)]
struct Application {
    name: String,
    version: String,
    log_level: String,
}

#[derive(Deserialize)]
struct Host {
    activity_class: String,
    activity_field: String,
}

#[derive(Deserialize)]
struct Capability {
    fluence_min_sdk: i32,
    device_query_min_sdk: i32,
}

#[derive(Deserialize)]
struct Vendor {
    fluence_modes: Vec<String>,
}

#[derive(Deserialize)]
struct Snapshot {
    delimiter: char,
}

// 在编译时读取 config.toml 并设置环境变量
fn main() {
    println!("cargo:rerun-if-changed=config.toml");

    let config_path = Path::new("config.toml");
    if !config_path.exists() {
        panic!("config.toml not found!");
    }

    let config_str = fs::read_to_string(config_path).expect("Failed to read config.toml");
    let config: Config = toml::from_str(&config_str).expect("Failed to parse config.toml");

    if config.vendor.fluence_modes.iter().any(|m| m.contains(',') || m.contains('=')) {
        panic!("vendor.fluence_modes entries must not contain ',' or '='");
    }

    // 应用信息
    println!("cargo:rustc-env=APP_NAME={}", config.application.name);
    println!("cargo:rustc-env=APP_VERSION={}", config.application.version);
    println!("cargo:rustc-env=LOG_LEVEL={}", config.application.log_level);

    // 宿主配置
    println!("cargo:rustc-env=HOST_ACTIVITY_CLASS={}", config.host.activity_class);
    println!("cargo:rustc-env=HOST_ACTIVITY_FIELD={}", config.host.activity_field);

    // 能力门槛
    println!("cargo:rustc-env=FLUENCE_MIN_SDK={}", config.capability.fluence_min_sdk);
    println!("cargo:rustc-env=DEVICE_QUERY_MIN_SDK={}", config.capability.device_query_min_sdk);

    // 厂商参数
    println!("cargo:rustc-env=FLUENCE_MODES={}", config.vendor.fluence_modes.join(","));

    println!("cargo:rustc-env=SNAPSHOT_DELIMITER={}", config.snapshot.delimiter);
}

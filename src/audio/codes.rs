//! Platform audio constants and their display names.
//!
//! Values follow `android.media.AudioManager` and `android.media.AudioDeviceInfo`.
//! Lookups are total: codes outside the known set get a deterministic
//! fallback label instead of an error.

// ======================== Audio modes ========================

pub const MODE_NORMAL: i32 = 0;
pub const MODE_RINGTONE: i32 = 1;
pub const MODE_IN_CALL: i32 = 2;
pub const MODE_IN_COMMUNICATION: i32 = 3;

// ======================== Ringer modes ========================

pub const RINGER_MODE_SILENT: i32 = 0;
pub const RINGER_MODE_VIBRATE: i32 = 1;
pub const RINGER_MODE_NORMAL: i32 = 2;

// ======================== Device types ========================

pub const TYPE_BUILTIN_EARPIECE: i32 = 1;
pub const TYPE_BUILTIN_SPEAKER: i32 = 2;
pub const TYPE_WIRED_HEADSET: i32 = 3;
pub const TYPE_WIRED_HEADPHONES: i32 = 4;
pub const TYPE_BLUETOOTH_SCO: i32 = 7;
pub const TYPE_BLUETOOTH_A2DP: i32 = 8;
pub const TYPE_USB_DEVICE: i32 = 11;
pub const TYPE_BUILTIN_MIC: i32 = 15;
pub const TYPE_USB_HEADSET: i32 = 22;

pub fn audio_mode_name(mode: i32) -> String {
    match mode {
        MODE_NORMAL => "NORMAL".to_string(),
        MODE_RINGTONE => "RINGTONE".to_string(),
        MODE_IN_CALL => "IN_CALL".to_string(),
        MODE_IN_COMMUNICATION => "IN_COMMUNICATION".to_string(),
        other => format!("UNKNOWN_{}", other),
    }
}

pub fn ringer_mode_name(mode: i32) -> String {
    match mode {
        RINGER_MODE_NORMAL => "NORMAL".to_string(),
        RINGER_MODE_SILENT => "SILENT".to_string(),
        RINGER_MODE_VIBRATE => "VIBRATE".to_string(),
        other => format!("UNKNOWN_{}", other),
    }
}

pub fn device_type_name(device_type: i32) -> String {
    let name = match device_type {
        TYPE_BUILTIN_EARPIECE => "EARPIECE",
        TYPE_BUILTIN_SPEAKER => "SPEAKER",
        TYPE_BUILTIN_MIC => "MIC",
        TYPE_BLUETOOTH_SCO => "BT_SCO",
        TYPE_BLUETOOTH_A2DP => "BT_A2DP",
        TYPE_WIRED_HEADSET => "HEADSET",
        TYPE_WIRED_HEADPHONES => "HEADPHONES",
        TYPE_USB_DEVICE => "USB",
        TYPE_USB_HEADSET => "USB_HEADSET",
        other => return format!("OTHER_{}", other),
    };
    name.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_modes_have_fixed_labels() {
        assert_eq!(audio_mode_name(MODE_NORMAL), "NORMAL");
        assert_eq!(audio_mode_name(MODE_RINGTONE), "RINGTONE");
        assert_eq!(audio_mode_name(MODE_IN_CALL), "IN_CALL");
        assert_eq!(audio_mode_name(MODE_IN_COMMUNICATION), "IN_COMMUNICATION");
    }

    #[test]
    fn unknown_modes_fall_back_to_code() {
        for code in [-2, -1, 4, 5, 42, i32::MAX] {
            assert_eq!(audio_mode_name(code), format!("UNKNOWN_{}", code));
        }
    }

    #[test]
    fn ringer_modes() {
        assert_eq!(ringer_mode_name(RINGER_MODE_SILENT), "SILENT");
        assert_eq!(ringer_mode_name(RINGER_MODE_VIBRATE), "VIBRATE");
        assert_eq!(ringer_mode_name(RINGER_MODE_NORMAL), "NORMAL");
        assert_eq!(ringer_mode_name(7), "UNKNOWN_7");
    }

    #[test]
    fn device_types() {
        let known = [
            (TYPE_BUILTIN_EARPIECE, "EARPIECE"),
            (TYPE_BUILTIN_SPEAKER, "SPEAKER"),
            (TYPE_BUILTIN_MIC, "MIC"),
            (TYPE_BLUETOOTH_SCO, "BT_SCO"),
            (TYPE_BLUETOOTH_A2DP, "BT_A2DP"),
            (TYPE_WIRED_HEADSET, "HEADSET"),
            (TYPE_WIRED_HEADPHONES, "HEADPHONES"),
            (TYPE_USB_DEVICE, "USB"),
            (TYPE_USB_HEADSET, "USB_HEADSET"),
        ];
        for (code, label) in known {
            assert_eq!(device_type_name(code), label);
        }
    }

    #[test]
    fn unknown_device_types_fall_back_to_code() {
        // 18 = TYPE_TELEPHONY, 26 = TYPE_BLE_HEADSET: real but unlabelled
        for code in [0, 18, 26, -3] {
            assert_eq!(device_type_name(code), format!("OTHER_{}", code));
        }
    }
}

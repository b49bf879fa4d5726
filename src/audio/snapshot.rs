//! Ordered `key=value` audio state snapshot.

use anyhow::Result;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// One snapshot entry. `value == None` means the platform gave nothing usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotField {
    pub key: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AudioDebugSnapshot {
    fields: Vec<SnapshotField>,
}

impl AudioDebugSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &str, value: impl ToString) {
        self.fields.push(SnapshotField {
            key: key.to_string(),
            value: Some(value.to_string()),
        });
    }

    /// Records `key` only as present when `value` is non-empty.
    pub fn push_non_empty(&mut self, key: &str, value: Option<String>) {
        self.fields.push(SnapshotField {
            key: key.to_string(),
            value: value.filter(|v| !v.is_empty()),
        });
    }

    pub fn fields(&self) -> &[SnapshotField] {
        &self.fields
    }

    /// Present fields, in insertion order.
    pub fn present(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .filter_map(|f| f.value.as_deref().map(|v| (f.key.as_str(), v)))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.present().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn render(&self, delimiter: char) -> String {
        let mut out = String::new();
        for (key, value) in self.present() {
            out.push_str(key);
            out.push('=');
            out.push_str(value);
            out.push(delimiter);
        }
        // 去掉末尾分隔符（包括厂商值自带的）
        out.trim_end_matches(delimiter).to_string()
    }

    /// Parses a rendered snapshot back into fields.
    ///
    /// Entries are split on the first `=`; entries without one are skipped.
    pub fn parse(text: &str, delimiter: char) -> Result<Self> {
        if text.is_empty() {
            anyhow::bail!("No debug info returned");
        }

        let mut snapshot = Self::new();
        for pair in text.split(delimiter) {
            if let Some((key, value)) = pair.split_once('=') {
                snapshot.push(key, value);
            }
        }
        Ok(snapshot)
    }
}

impl Serialize for AudioDebugSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (key, value) in self.present() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_are_not_rendered() {
        let mut snap = AudioDebugSnapshot::new();
        snap.push("audioMode", "NORMAL");
        snap.push_non_empty("fluence", Some(String::new()));
        snap.push_non_empty("echoCancel", None);
        snap.push("musicActive", false);
        assert_eq!(snap.render('|'), "audioMode=NORMAL|musicActive=false");
        assert_eq!(snap.fields().len(), 4);
    }

    #[test]
    fn render_never_ends_with_delimiter() {
        let mut snap = AudioDebugSnapshot::new();
        snap.push("fluence", "fluence=endfire|");
        let rendered = snap.render('|');
        assert!(!rendered.ends_with('|'));
        assert_eq!(AudioDebugSnapshot::new().render('|'), "");
    }

    #[test]
    fn empty_value_is_kept_when_pushed_explicitly() {
        let mut snap = AudioDebugSnapshot::new();
        snap.push("audioDeviceTypes", "");
        snap.push("hasDefaultMic", true);
        assert_eq!(snap.render('|'), "audioDeviceTypes=|hasDefaultMic=true");
    }

    #[test]
    fn parse_splits_on_first_equals() {
        let snap =
            AudioDebugSnapshot::parse("audioMode=NORMAL|fluence=fluence=endfire|junk", '|')
                .unwrap();
        assert_eq!(snap.get("audioMode"), Some("NORMAL"));
        assert_eq!(snap.get("fluence"), Some("fluence=endfire"));
        assert!(!snap.contains_key("junk"));
    }

    #[test]
    fn parse_rejects_empty_input() {
        let err = AudioDebugSnapshot::parse("", '|').unwrap_err();
        assert_eq!(err.to_string(), "No debug info returned");
    }

    #[test]
    fn json_keeps_field_order() {
        let mut snap = AudioDebugSnapshot::new();
        snap.push("volumeRing", "5/7");
        snap.push("audioMode", "IN_CALL");
        snap.push_non_empty("fluence", None);
        let json = serde_json::to_string(&snap).unwrap();
        assert_eq!(json, r#"{"volumeRing":"5/7","audioMode":"IN_CALL"}"#);
    }
}

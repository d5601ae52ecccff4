use serde::{Deserialize, Serialize};

/// Default filter service base URL.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000";

/// Default JPEG quality for camera stills.
pub const DEFAULT_JPEG_QUALITY: u8 = 85;

/// Persisted client settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsFile {
    /// Base URL of the filter service.
    pub endpoint: String,
    /// JPEG quality (1-100) used when encoding camera stills.
    pub jpeg_quality: u8,
}

impl Default for SettingsFile {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_local_service() {
        let settings = SettingsFile::default();
        assert_eq!(settings.endpoint, "http://127.0.0.1:5000");
        assert_eq!(settings.jpeg_quality, 85);
    }

    #[test]
    fn settings_serialise_camel_case() {
        let settings = SettingsFile::default();
        let json = serde_json::to_value(&settings).unwrap();
        assert_eq!(json["endpoint"], "http://127.0.0.1:5000");
        assert_eq!(json["jpegQuality"], 85);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings: SettingsFile = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, SettingsFile::default());

        let settings: SettingsFile =
            serde_json::from_str(r#"{"endpoint": "http://10.0.0.2:8000"}"#).unwrap();
        assert_eq!(settings.endpoint, "http://10.0.0.2:8000");
        assert_eq!(settings.jpeg_quality, DEFAULT_JPEG_QUALITY);
    }

    #[test]
    fn settings_round_trip_through_json() {
        let original = SettingsFile {
            endpoint: "http://filters.local".to_string(),
            jpeg_quality: 70,
        };
        let json = serde_json::to_string(&original).unwrap();
        let restored: SettingsFile = serde_json::from_str(&json).unwrap();
        assert_eq!(original, restored);
    }
}

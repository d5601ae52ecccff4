use base64::Engine;
use serde::{Deserialize, Serialize};

/// A still image encoded as a base64 data URI.
///
/// Immutable once produced; owned solely by the request that carries it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage(String);

impl EncodedImage {
    /// Wrap raw bytes as `data:<mime>;base64,<payload>`.
    pub fn from_bytes(mime: &str, bytes: &[u8]) -> Self {
        let b64 = base64::engine::general_purpose::STANDARD.encode(bytes);
        Self(format!("data:{mime};base64,{b64}"))
    }

    /// The full data-URI string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length of the data-URI string in characters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One of the six filter variants the service produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    Original,
    Grayscale,
    Binary,
    Negative,
    Sepia,
    Cartoon,
}

impl Variant {
    pub const ALL: [Variant; 6] = [
        Variant::Original,
        Variant::Grayscale,
        Variant::Binary,
        Variant::Negative,
        Variant::Sepia,
        Variant::Cartoon,
    ];

    /// Wire/slot name of the variant.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::Grayscale => "grayscale",
            Self::Binary => "binary",
            Self::Negative => "negative",
            Self::Sepia => "sepia",
            Self::Cartoon => "cartoon",
        }
    }
}

/// The full set of processed variants returned by the filter service.
///
/// Each field is a displayable source taken verbatim from the response —
/// a data URI or a URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSet {
    pub original: String,
    pub grayscale: String,
    pub binary: String,
    pub negative: String,
    pub sepia: String,
    pub cartoon: String,
}

impl FilterSet {
    /// Source string for one variant.
    pub fn get(&self, variant: Variant) -> &str {
        match variant {
            Variant::Original => &self.original,
            Variant::Grayscale => &self.grayscale,
            Variant::Binary => &self.binary,
            Variant::Negative => &self.negative,
            Variant::Sepia => &self.sepia,
            Variant::Cartoon => &self.cartoon,
        }
    }
}

/// Request body for `POST /process_image`.
#[derive(Debug, Serialize)]
pub struct ProcessRequest<'a> {
    pub image: &'a str,
}

/// Wire response from `POST /process_image`.
///
/// The failure arm is tried first: a body carrying an `error` field is a
/// handled failure even if other fields are present alongside it.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ProcessResponse {
    Failure { error: String },
    Success(FilterSet),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoded_image_wraps_bytes_as_data_uri() {
        let image = EncodedImage::from_bytes("image/jpeg", &[0xFF, 0xD8, 0xFF]);
        assert!(image.as_str().starts_with("data:image/jpeg;base64,"));
        assert!(!image.is_empty());
    }

    #[test]
    fn encoded_image_payload_round_trips() {
        let bytes = b"arbitrary bytes \x00\x01\x02";
        let image = EncodedImage::from_bytes("application/octet-stream", bytes);
        let b64 = image.as_str().split(',').nth(1).unwrap();
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(b64)
            .unwrap();
        assert_eq!(decoded, bytes);
    }

    #[test]
    fn variant_names_match_the_wire_keys() {
        let names: Vec<&str> = Variant::ALL.iter().map(|v| v.as_str()).collect();
        assert_eq!(
            names,
            ["original", "grayscale", "binary", "negative", "sepia", "cartoon"]
        );
    }

    #[test]
    fn filter_set_get_covers_all_variants() {
        let set = FilterSet {
            original: "a".to_string(),
            grayscale: "b".to_string(),
            binary: "c".to_string(),
            negative: "d".to_string(),
            sepia: "e".to_string(),
            cartoon: "f".to_string(),
        };
        let values: Vec<&str> = Variant::ALL.iter().map(|v| set.get(*v)).collect();
        assert_eq!(values, ["a", "b", "c", "d", "e", "f"]);
    }

    #[test]
    fn response_with_all_six_keys_is_success() {
        let json = r#"{
            "original": "a", "grayscale": "b", "binary": "c",
            "negative": "d", "sepia": "e", "cartoon": "f"
        }"#;
        let response: ProcessResponse = serde_json::from_str(json).unwrap();
        match response {
            ProcessResponse::Success(set) => {
                assert_eq!(set.original, "a");
                assert_eq!(set.cartoon, "f");
            }
            ProcessResponse::Failure { .. } => panic!("expected success"),
        }
    }

    #[test]
    fn response_with_error_field_is_failure() {
        let response: ProcessResponse =
            serde_json::from_str(r#"{"error": "bad image"}"#).unwrap();
        assert!(matches!(
            response,
            ProcessResponse::Failure { error } if error == "bad image"
        ));
    }

    #[test]
    fn error_field_takes_precedence_over_variant_fields() {
        let json = r#"{
            "error": "half-baked",
            "original": "a", "grayscale": "b", "binary": "c",
            "negative": "d", "sepia": "e", "cartoon": "f"
        }"#;
        let response: ProcessResponse = serde_json::from_str(json).unwrap();
        assert!(matches!(response, ProcessResponse::Failure { .. }));
    }

    #[test]
    fn response_missing_a_variant_does_not_parse() {
        let json = r#"{"original": "a", "grayscale": "b"}"#;
        assert!(serde_json::from_str::<ProcessResponse>(json).is_err());
    }

    #[test]
    fn request_serialises_to_the_image_field() {
        let request = ProcessRequest {
            image: "data:image/jpeg;base64,abc",
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["image"], "data:image/jpeg;base64,abc");
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! string_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_newtype!(ClipId);

/// Kind of media a sample points at.
///
/// Only used to route display; values the dashboard does not know about are kept
/// verbatim instead of being rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MediaType {
    Video,
    Image,
    Other(String),
}

impl MediaType {
    pub fn as_str(&self) -> &str {
        match self {
            MediaType::Video => "video",
            MediaType::Image => "image",
            MediaType::Other(raw) => raw,
        }
    }

    pub fn is_video(&self) -> bool {
        matches!(self, MediaType::Video)
    }
}

impl From<String> for MediaType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "video" => MediaType::Video,
            "image" => MediaType::Image,
            _ => MediaType::Other(value),
        }
    }
}

impl From<MediaType> for String {
    fn from(value: MediaType) -> Self {
        match value {
            MediaType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl Default for MediaType {
    fn default() -> Self {
        MediaType::Other(String::new())
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One dataset record as served by the validation endpoint.
///
/// The backend fills absent CSV columns with empty strings, so every text field
/// other than the id and path tolerates being missing from the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    pub clip_id: ClipId,
    #[serde(default)]
    pub media_type: MediaType,
    pub file_path: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub resolution: String,
    #[serde(default)]
    pub length: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub keyword: String,
}

//! Image handle value object

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Illustrative image attached to an itinerary day
///
/// Either inline JPEG data or the "no image" sentinel. Image generation
/// never fails a run; it degrades to [`ImageRef::Placeholder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    /// A `data:<mime>;base64,<bytes>` URI
    DataUri(String),
    /// No image could be produced for this day
    Placeholder,
}

impl ImageRef {
    /// Serialized form of the sentinel
    pub const PLACEHOLDER_NAME: &'static str = "placeholder.png";

    const JPEG_PREFIX: &'static str = "data:image/jpeg;base64,";

    /// Wrap base64-encoded JPEG bytes into a data URI
    pub fn from_jpeg_base64(encoded: &str) -> Self {
        ImageRef::DataUri(format!("{}{}", Self::JPEG_PREFIX, encoded))
    }

    /// Wrap base64-encoded bytes of any image type into a data URI
    pub fn from_base64(mime_type: &str, encoded: &str) -> Self {
        ImageRef::DataUri(format!("data:{mime_type};base64,{encoded}"))
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, ImageRef::Placeholder)
    }

    /// The data URI, or `None` for the sentinel
    pub fn data_uri(&self) -> Option<&str> {
        match self {
            ImageRef::DataUri(uri) => Some(uri),
            ImageRef::Placeholder => None,
        }
    }

    /// MIME type declared in the data URI
    pub fn mime_type(&self) -> Option<&str> {
        self.data_uri()?
            .strip_prefix("data:")?
            .split_once(';')
            .map(|(mime, _)| mime)
    }

    /// File extension matching the MIME type (`jpg` when unknown)
    pub fn file_extension(&self) -> &'static str {
        match self.mime_type() {
            Some("image/png") => "png",
            Some("image/webp") => "webp",
            _ => "jpg",
        }
    }

    /// Decode the raw image bytes. Returns `None` for the sentinel or a corrupt payload.
    pub fn decode_bytes(&self) -> Option<Vec<u8>> {
        let (_, payload) = self.data_uri()?.split_once(";base64,")?;
        STANDARD.decode(payload).ok()
    }
}

impl Serialize for ImageRef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            ImageRef::DataUri(uri) => serializer.serialize_str(uri),
            ImageRef::Placeholder => serializer.serialize_str(Self::PLACEHOLDER_NAME),
        }
    }
}

impl<'de> Deserialize<'de> for ImageRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if s.starts_with("data:") {
            Ok(ImageRef::DataUri(s))
        } else {
            Ok(ImageRef::Placeholder)
        }
    }
}

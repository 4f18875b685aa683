//! Icon payloads and the request/provenance types around them

use crate::core::error::Result;
use crate::core::types::DropId;
use crate::loot::table::ItemTier;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, RgbaImage};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// A decoded item icon, cheap to clone
#[derive(Clone)]
pub struct Icon(Arc<RgbaImage>);

impl Icon {
    pub fn from_image(image: RgbaImage) -> Self {
        Self(Arc::new(image))
    }

    /// Decode an encoded image (PNG, JPEG, ...) into an icon
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let image = image::load_from_memory(bytes)?;
        Ok(Self::from_image(image.to_rgba8()))
    }

    /// Decode a base64 string holding an encoded image
    pub fn decode_base64(b64: &str) -> Result<Self> {
        let bytes = BASE64.decode(b64.trim())?;
        Self::decode(&bytes)
    }

    pub fn width(&self) -> u32 {
        self.0.width()
    }

    pub fn height(&self) -> u32 {
        self.0.height()
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn image(&self) -> &RgbaImage {
        &self.0
    }

    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        PngEncoder::new(&mut bytes).write_image(
            self.0.as_raw(),
            self.width(),
            self.height(),
            ColorType::Rgba8,
        )?;
        Ok(bytes)
    }

    /// `data:image/png;base64,...` for direct display
    pub fn to_data_url(&self) -> Result<String> {
        Ok(format!(
            "data:image/png;base64,{}",
            BASE64.encode(self.encode_png()?)
        ))
    }
}

impl PartialEq for Icon {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
            || (self.0.dimensions() == other.0.dimensions() && self.0.as_raw() == other.0.as_raw())
    }
}

impl fmt::Debug for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Icon({}x{})", self.width(), self.height())
    }
}

/// How an icon was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Reused from an earlier request for the same item
    Cache,
    /// Produced by the remote image service
    Remote,
    /// Rendered locally because remote mode is off
    Local,
    /// Rendered locally after the remote service failed
    Fallback,
}

impl Provenance {
    pub fn as_str(self) -> &'static str {
        match self {
            Provenance::Cache => "cache",
            Provenance::Remote => "remote",
            Provenance::Local => "local",
            Provenance::Fallback => "fallback",
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cache key: icons are shared by every drop of the same item
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IconKey {
    pub tier: ItemTier,
    pub name: String,
}

impl fmt::Display for IconKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.tier, self.name)
    }
}

/// One queued icon job
#[derive(Debug, Clone, PartialEq)]
pub struct IconRequest {
    pub drop_id: DropId,
    pub tier: ItemTier,
    pub name: String,
}

impl IconRequest {
    pub fn key(&self) -> IconKey {
        IconKey {
            tier: self.tier,
            name: self.name.clone(),
        }
    }

    /// Prompt sent to the remote image service
    pub fn prompt(&self) -> String {
        format!(
            "Diablo-style game item icon, centered, dramatic fantasy lighting, dark background, \
             highly detailed digital painting of {} item named {}, game-ready square icon",
            self.tier, self.name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_round_trip_through_data_url() {
        let icon = Icon::from_image(RgbaImage::from_pixel(4, 3, image::Rgba([10, 20, 30, 255])));
        let url = icon.to_data_url().expect("encode");
        let b64 = url.strip_prefix("data:image/png;base64,").expect("prefix");
        let decoded = Icon::decode_base64(b64).expect("decode");
        assert_eq!(decoded, icon);
    }

    #[test]
    fn test_garbage_payload_is_an_error() {
        assert!(Icon::decode_base64("not base64 at all!").is_err());
        let not_an_image = BASE64.encode(b"hello");
        assert!(Icon::decode_base64(&not_an_image).is_err());
    }

    #[test]
    fn test_prompt_mentions_tier_and_name() {
        let request = IconRequest {
            drop_id: DropId::new(),
            tier: ItemTier::Rare,
            name: "Hellforged Band".into(),
        };
        let prompt = request.prompt();
        assert!(prompt.contains("rare item named Hellforged Band"));
        assert_eq!(request.key().to_string(), "rare:Hellforged Band");
    }
}

//! Decoded texture data ready for GPU upload

use super::{request::ChannelKind, AssetLoadError};

/// RGBA8 texels of one decoded texture
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedTexture {
    pub url: String,
    pub channel: ChannelKind,
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA8, 4 bytes per texel
    pub rgba: Vec<u8>,
}

impl DecodedTexture {
    /// Decodes an encoded image (PNG, JPEG) into RGBA8
    pub fn decode(url: &str, channel: ChannelKind, bytes: &[u8]) -> Result<Self, AssetLoadError> {
        let image = image::load_from_memory(bytes).map_err(|e| AssetLoadError::Decode {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();

        log::debug!("Decoded {} ({}x{}, {})", url, width, height, channel);

        Ok(Self {
            url: url.to_string(),
            channel,
            width,
            height,
            rgba: rgba.into_raw(),
        })
    }

    pub fn size_bytes(&self) -> usize {
        self.rgba.len()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_png_to_rgba() {
        let bytes = fixtures::png(3, 2, [10, 20, 30, 255]);
        let texture = DecodedTexture::decode("a.png", ChannelKind::Color, &bytes).unwrap();

        assert_eq!((texture.width, texture.height), (3, 2));
        assert_eq!(texture.size_bytes(), 3 * 2 * 4);
        assert_eq!(&texture.rgba[..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn test_garbage_is_a_decode_error() {
        let result = DecodedTexture::decode("bad.jpg", ChannelKind::Roughness, b"not an image");
        assert!(matches!(result, Err(AssetLoadError::Decode { url, .. }) if url == "bad.jpg"));
    }
}

//! Texture requests and bundles
//!
//! Textures follow the `textures/<category>/<material>_<resolution>_<channel>.<ext>`
//! naming used by the showcase's PBR texture sets.

use std::fmt;

use super::AssetLoadError;

/// One texture map type of a material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    Color,
    Displacement,
    NormalGl,
    Roughness,
    AmbientOcclusion,
}

impl ChannelKind {
    /// Channels wired into the showcase's surface materials
    pub const SURFACE: [ChannelKind; 4] = [
        ChannelKind::Color,
        ChannelKind::Displacement,
        ChannelKind::NormalGl,
        ChannelKind::Roughness,
    ];

    /// Name used in texture file names
    pub fn file_suffix(self) -> &'static str {
        match self {
            ChannelKind::Color => "Color",
            ChannelKind::Displacement => "Displacement",
            ChannelKind::NormalGl => "NormalGL",
            ChannelKind::Roughness => "Roughness",
            ChannelKind::AmbientOcclusion => "AmbientOcclusion",
        }
    }

    /// Whether texels hold colour (sRGB) rather than linear data
    pub fn is_color(self) -> bool {
        self == ChannelKind::Color
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_suffix())
    }
}

/// Naming of one material's texture set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialTextures {
    pub category: String,
    pub material: String,
    pub resolution: String,
    pub extension: String,
}

impl MaterialTextures {
    pub fn new(category: &str, material: &str, resolution: &str, extension: &str) -> Self {
        Self {
            category: category.to_string(),
            material: material.to_string(),
            resolution: resolution.to_string(),
            extension: extension.to_string(),
        }
    }

    /// Leather texture set wrapped around the showcase sphere
    pub fn leather(resolution: &str, extension: &str) -> Self {
        Self::new("leather", "Leather037", resolution, extension)
    }

    /// Marble texture set of the showcase floor
    pub fn marble(resolution: &str, extension: &str) -> Self {
        Self::new("marble", "Marble016", resolution, extension)
    }

    pub fn url(&self, channel: ChannelKind) -> String {
        format!(
            "textures/{}/{}_{}_{}.{}",
            self.category,
            self.material,
            self.resolution,
            channel.file_suffix(),
            self.extension
        )
    }

    pub fn request(&self, channel: ChannelKind) -> AssetRequest {
        AssetRequest {
            url: self.url(channel),
            channel,
        }
    }
}

/// A single texture to fetch and decode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRequest {
    pub url: String,
    pub channel: ChannelKind,
}

/// Set of requests resolved or failed as one unit; urls are unique
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetBundle {
    requests: Vec<AssetRequest>,
}

impl AssetBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a request, rejecting a url already in the bundle
    pub fn push(&mut self, request: AssetRequest) -> Result<(), AssetLoadError> {
        if self.contains(&request.url) {
            return Err(AssetLoadError::DuplicateUrl(request.url));
        }
        self.requests.push(request);
        Ok(())
    }

    /// Builder pattern: add `channels` of a material's texture set
    pub fn with_material(
        mut self,
        textures: &MaterialTextures,
        channels: &[ChannelKind],
    ) -> Result<Self, AssetLoadError> {
        for channel in channels {
            self.push(textures.request(*channel))?;
        }
        Ok(self)
    }

    pub fn contains(&self, url: &str) -> bool {
        self.requests.iter().any(|request| request.url == url)
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssetRequest> {
        self.requests.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texture_url_pattern() {
        let leather = MaterialTextures::leather("1K", "jpg");
        assert_eq!(
            leather.url(ChannelKind::Color),
            "textures/leather/Leather037_1K_Color.jpg"
        );
        assert_eq!(
            MaterialTextures::marble("2K", "png").url(ChannelKind::NormalGl),
            "textures/marble/Marble016_2K_NormalGL.png"
        );
    }

    #[test]
    fn test_bundle_rejects_duplicate_urls() {
        let leather = MaterialTextures::leather("1K", "jpg");
        let mut bundle = AssetBundle::new()
            .with_material(&leather, &ChannelKind::SURFACE)
            .unwrap();
        assert_eq!(bundle.len(), 4);

        let duplicate = bundle.push(leather.request(ChannelKind::Roughness));
        assert!(matches!(duplicate, Err(AssetLoadError::DuplicateUrl(url)) if url.ends_with("Roughness.jpg")));
        assert_eq!(bundle.len(), 4);
    }

    #[test]
    fn test_two_materials_share_a_bundle() {
        let bundle = AssetBundle::new()
            .with_material(&MaterialTextures::leather("1K", "jpg"), &ChannelKind::SURFACE)
            .and_then(|bundle| {
                bundle.with_material(&MaterialTextures::marble("1K", "jpg"), &ChannelKind::SURFACE)
            })
            .unwrap();
        assert_eq!(bundle.len(), 8);
        assert!(bundle.contains("textures/marble/Marble016_1K_Displacement.jpg"));
    }
}

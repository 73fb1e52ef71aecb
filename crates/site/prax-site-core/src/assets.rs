//! CDN asset URLs.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    #[default]
    Image,
    Video,
}

impl AssetKind {
    fn segment(self) -> &'static str {
        match self {
            AssetKind::Image => "image",
            AssetKind::Video => "video",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    pub cloud_name: String,
    pub folder: String,
    pub default_transform: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            cloud_name: "dpc0d4a7s".to_string(),
            folder: "home/prax".to_string(),
            default_transform: "f_auto,q_auto".to_string(),
        }
    }
}

const STRIPPED_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "mp4", "webp", "gif"];

fn strip_extension(identifier: &str) -> &str {
    if let Some((stem, ext)) = identifier.rsplit_once('.') {
        if STRIPPED_EXTENSIONS
            .iter()
            .any(|known| ext.eq_ignore_ascii_case(known))
        {
            return stem;
        }
    }
    identifier
}

/// Delivery URL for `identifier` (e.g. `"team/team_jack.jpg"`).
///
/// `transform` of `None` or an empty string uses the configured default.
pub fn resolve_asset_url(
    cfg: &AssetConfig,
    identifier: &str,
    kind: AssetKind,
    transform: Option<&str>,
) -> String {
    let transform = transform
        .filter(|t| !t.is_empty())
        .unwrap_or(&cfg.default_transform);
    format!(
        "https://res.cloudinary.com/{}/{}/upload/{}/{}/{}",
        cfg.cloud_name,
        kind.segment(),
        transform,
        cfg.folder,
        strip_extension(identifier)
    )
}

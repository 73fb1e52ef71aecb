//! Site-wide configuration, as the host passes it in JSON.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use prax_motion_core::MotionConfig;
use prax_scroll_core::SmoothScrollConfig;

use crate::assets::AssetConfig;
use crate::preloader::PreloaderConfig;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub motion: MotionConfig,
    pub scroll: SmoothScrollConfig,
    pub assets: AssetConfig,
    pub preloader: PreloaderConfig,
}

impl SiteConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let cfg: SiteConfig = serde_json::from_str(text).context("site config did not parse")?;
        cfg.scroll
            .validate()
            .context("site config: invalid smooth-scroll settings")?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_default_independently() {
        let cfg = SiteConfig::from_json(r#"{ "assets": { "cloud_name": "demo" }, "scroll": { "duration": 1.0 } }"#)
            .unwrap();
        assert_eq!(cfg.assets.cloud_name, "demo");
        assert_eq!(cfg.assets.folder, "home/prax");
        assert_eq!(cfg.scroll.duration, 1.0);
        assert_eq!(cfg.preloader, PreloaderConfig::default());
    }

    #[test]
    fn invalid_scroll_is_rejected() {
        let err = SiteConfig::from_json(r#"{ "scroll": { "duration": -1 } }"#).unwrap_err();
        assert!(format!("{err:#}").contains("duration"));
    }
}

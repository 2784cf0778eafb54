//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! serialized to a TOML table, the user's file is merged on top key by key,
//! and the result is deserialized and validated.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! title = "PINZORO"
//! description = "ONE SEAT, ONE LAUGH - ..."
//! url = "https://pinzoro.jp"
//! locale = "ja_JP"
//! lang = "ja"
//! copyright_holder = "PINZORO"
//! # copyright_year = 2025   # omit to use the build year
//!
//! [assets]
//! root = ""                 # URL prefix `public/` is served under
//! logo = "logo.png"
//! favicon = "favicon.ico"
//! apple_icon = "apple-icon.png"
//! share_image = "icon.jpg"
//! background = "back.jpg"
//!
//! [viewport]
//! compact_below = 640       # shop pager switches to compact pages below this
//! mobile_below = 768        # viewer and staff carousel switch to mobile below this
//!
//! [carousel]
//! interval_ms = 3000
//!
//! [pagination]
//! compact = 3
//! wide = 6
//!
//! [colors]
//! brand = "#f9d949"
//! accent = "#ffd800"
//! highlight = "#dc2626"
//! chrome = "#000000"
//! text = "#000000"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::assets::AssetRoot;
use crate::ui::home::HomeSettings;
use crate::ui::pager::PageSizes;
use crate::ui::viewport::Breakpoints;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Document metadata and footer.
    pub site: SiteMeta,
    /// Where static files live and which ones the layout uses.
    pub assets: AssetsConfig,
    /// Responsive breakpoints.
    pub viewport: Breakpoints,
    /// Autoplay timing.
    pub carousel: CarouselConfig,
    /// Shop listing page sizes.
    pub pagination: PageSizes,
    /// Theme colors.
    pub colors: ColorConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.title.trim().is_empty() {
            return Err(ConfigError::Validation("site.title must not be empty".into()));
        }
        if self.pagination.compact == 0 || self.pagination.wide == 0 {
            return Err(ConfigError::Validation(
                "pagination sizes must be non-zero".into(),
            ));
        }
        if self.carousel.interval_ms == 0 {
            return Err(ConfigError::Validation(
                "carousel.interval_ms must be non-zero".into(),
            ));
        }
        if self.viewport.compact_below >= self.viewport.mobile_below {
            return Err(ConfigError::Validation(
                "viewport.compact_below must be less than viewport.mobile_below".into(),
            ));
        }
        Ok(())
    }

    pub fn asset_root(&self) -> AssetRoot {
        AssetRoot::new(&self.assets.root)
    }

    /// The slice of config the home screen's state machines need.
    pub fn home_settings(&self) -> HomeSettings {
        HomeSettings {
            breakpoints: self.viewport,
            page_sizes: self.pagination,
            carousel_interval: self.carousel.interval(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteMeta {
    pub title: String,
    pub description: String,
    /// Canonical URL, used for Open Graph.
    pub url: String,
    /// Open Graph locale, e.g. `ja_JP`.
    pub locale: String,
    /// `<html lang>` value.
    pub lang: String,
    pub copyright_holder: String,
    /// Footer year. When absent the build year is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright_year: Option<u32>,
}

impl Default for SiteMeta {
    fn default() -> Self {
        Self {
            title: "PINZORO".to_string(),
            description: "ONE SEAT, ONE LAUGH - 美味しいお料理と笑顔のあるお店へ。お客様一人ひとりに笑顔をお届けします。".to_string(),
            url: "https://pinzoro.jp".to_string(),
            locale: "ja_JP".to_string(),
            lang: "ja".to_string(),
            copyright_holder: "PINZORO".to_string(),
            copyright_year: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetsConfig {
    /// URL prefix under which `public/` is served. Empty means the site root.
    pub root: String,
    pub logo: String,
    pub favicon: String,
    pub apple_icon: String,
    /// Open Graph / Twitter card image.
    pub share_image: String,
    /// Tiled section background.
    pub background: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            root: String::new(),
            logo: "logo.png".to_string(),
            favicon: "favicon.ico".to_string(),
            apple_icon: "apple-icon.png".to_string(),
            share_image: "icon.jpg".to_string(),
            background: "back.jpg".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselConfig {
    /// Milliseconds between automatic advances.
    pub interval_ms: u64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self { interval_ms: 3000 }
    }
}

impl CarouselConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Section background tint, blended over the tiled background image.
    pub brand: String,
    /// Flat background of the company page.
    pub accent: String,
    /// Buttons, active page dot, link hover.
    pub highlight: String,
    /// Header, footer and dark sections.
    pub chrome: String,
    pub text: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            brand: "#f9d949".to_string(),
            accent: "#ffd800".to_string(),
            highlight: "#dc2626".to_string(),
            chrome: "#000000".to_string(),
            text: "#000000".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# PINZORO site configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Document metadata
# ---------------------------------------------------------------------------
[site]
title = "PINZORO"
description = "ONE SEAT, ONE LAUGH - 美味しいお料理と笑顔のあるお店へ。お客様一人ひとりに笑顔をお届けします。"

# Canonical URL, used for Open Graph tags.
url = "https://pinzoro.jp"
locale = "ja_JP"
lang = "ja"

# Footer: "© {year} {holder} All Rights Reserved."
copyright_holder = "PINZORO"
# copyright_year = 2025

# ---------------------------------------------------------------------------
# Static assets (files under public/)
# ---------------------------------------------------------------------------
[assets]
# URL prefix public/ is served under. Empty = site root.
root = ""
logo = "logo.png"
favicon = "favicon.ico"
apple_icon = "apple-icon.png"
share_image = "icon.jpg"
background = "back.jpg"

# ---------------------------------------------------------------------------
# Responsive breakpoints (CSS pixels)
# ---------------------------------------------------------------------------
[viewport]
# Below this width the shop list shows compact pages.
compact_below = 640
# Below this width the image viewer and staff carousel use the mobile layout.
mobile_below = 768

# ---------------------------------------------------------------------------
# Carousels
# ---------------------------------------------------------------------------
[carousel]
# Milliseconds between automatic advances.
interval_ms = 3000

# ---------------------------------------------------------------------------
# Shop listing
# ---------------------------------------------------------------------------
[pagination]
# Shops per page on compact viewports.
compact = 3
# Shops per page everywhere else.
wide = 6

# ---------------------------------------------------------------------------
# Colors
# ---------------------------------------------------------------------------
[colors]
brand = "#f9d949"      # section tint over the tiled background
accent = "#ffd800"     # company page background
highlight = "#dc2626"  # buttons, active page, link hover
chrome = "#000000"     # header and footer
text = "#000000"
"##
}

/// Generate CSS custom properties from color and asset config.
pub fn generate_theme_css(config: &SiteConfig) -> String {
    let background = config.asset_root().file_url(&config.assets.background);
    format!(
        r#":root {{
    --color-brand: {brand};
    --color-accent: {accent};
    --color-highlight: {highlight};
    --color-chrome: {chrome};
    --color-text: {text};
    --background-tile: url("{background}");
}}"#,
        brand = config.colors.brand,
        accent = config.colors.accent,
        highlight = config.colors.highlight,
        chrome = config.colors.chrome,
        text = config.colors.text,
    )
}

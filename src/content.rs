//! Site content: every piece of copy and the shop table.
//!
//! Content is data, not markup. One `content.toml` describes both pages; the
//! generator turns it into HTML and the interaction model takes its image
//! counts and shop ids. A stock `content.toml` is compiled into the binary and
//! used when the source directory has none.
//!
//! ## Validation
//!
//! - At least one shop; shop ids strictly ascending (which also makes them unique)
//! - No shop with a blank name
//! - Both carousels have at least one image
//! - At least one navigation link

use crate::assets::{AssetRef, ImageFamily, ImageSet};
use crate::ui::home::{HomeScreen, HomeSettings};
use crate::ui::layout::NavLink;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

const STOCK_CONTENT: &str = include_str!("../site/content.toml");

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Content validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteContent {
    pub nav: Vec<NavLink>,
    pub hero: Hero,
    pub message: Message,
    pub business: Business,
    pub experience: Experience,
    pub environment: CarouselSection,
    pub staff: CarouselSection,
    pub shop_section: ShopSection,
    pub shops: Vec<ShopRecord>,
    pub recruit: Recruit,
    pub sponsors: Sponsors,
    pub company: Company,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Hero {
    pub tagline: String,
    /// Rendered one entry per line.
    pub headline: Vec<String>,
    pub lead: String,
    pub cta_label: String,
    pub cta_href: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Message {
    pub title: String,
    pub philosophy_title: String,
    pub motto: String,
    pub body: String,
    #[serde(default)]
    pub pillars: Vec<Pillar>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Pillar {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Business {
    pub title: String,
    pub heading: String,
    pub body: String,
    /// Files under `public/`.
    #[serde(default)]
    pub images: Vec<String>,
    pub company_link_label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Experience {
    pub title: String,
    #[serde(default)]
    pub videos: Vec<Video>,
    pub outro: String,
    pub channel_url: String,
    pub channel_label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Video {
    pub youtube_id: String,
    /// `<iframe title>`.
    pub title: String,
    pub tag: String,
    pub heading: String,
    pub caption: String,
}

impl Video {
    pub fn embed_url(&self) -> String {
        format!("https://www.youtube.com/embed/{}?rel=0", self.youtube_id)
    }
}

/// A text block paired with an autoplay carousel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CarouselSection {
    pub tag: String,
    pub heading: String,
    pub body: String,
    /// Images are numbered `1..=image_count`.
    pub image_count: u32,
}

impl CarouselSection {
    pub fn image_set(&self, family: ImageFamily) -> Option<ImageSet> {
        ImageSet::sequence(family, self.image_count)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShopSection {
    pub title: String,
    pub shop_link_label: String,
}

/// One restaurant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShopRecord {
    pub id: u32,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Recruit {
    pub title: String,
    pub heading: String,
    pub lead: String,
    #[serde(default)]
    pub blocks: Vec<RecruitBlock>,
    pub closing: String,
    pub shops_link_label: String,
    pub opening: Option<JobOpening>,
    pub contact: String,
}

/// A recruitment card: a bullet list, a paragraph, or both.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecruitBlock {
    pub heading: String,
    #[serde(default)]
    pub items: Vec<String>,
    pub body: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobOpening {
    pub title: String,
    pub duties_heading: String,
    pub duties: Vec<String>,
    pub location_heading: String,
    pub location: Vec<String>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Sponsors {
    pub title: String,
    pub lead: String,
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Company {
    pub title: String,
    pub heading: String,
    pub facts: Vec<CompanyFact>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompanyFact {
    pub label: String,
    pub value: String,
}

impl SiteContent {
    pub fn validate(&self) -> Result<(), ContentError> {
        if self.nav.is_empty() {
            return Err(ContentError::Validation(
                "at least one nav link is required".into(),
            ));
        }
        if self.shops.is_empty() {
            return Err(ContentError::Validation("no shops defined".into()));
        }
        for pair in self.shops.windows(2) {
            if pair[1].id <= pair[0].id {
                return Err(ContentError::Validation(format!(
                    "shop ids must be strictly ascending: {} follows {}",
                    pair[1].id, pair[0].id
                )));
            }
        }
        if let Some(shop) = self.shops.iter().find(|s| s.name.trim().is_empty()) {
            return Err(ContentError::Validation(format!(
                "shop {} has an empty name",
                shop.id
            )));
        }
        for (name, section) in [("environment", &self.environment), ("staff", &self.staff)] {
            if section.image_count == 0 {
                return Err(ContentError::Validation(format!(
                    "{name}.image_count must be at least 1"
                )));
            }
        }
        Ok(())
    }

    pub fn shop_ids(&self) -> Vec<u32> {
        self.shops.iter().map(|s| s.id).collect()
    }

    /// Every image the naming convention expects under `public/`.
    pub fn asset_refs(&self) -> Vec<AssetRef> {
        let carousels = [
            (ImageFamily::Fun, self.environment.image_count),
            (ImageFamily::Staff, self.staff.image_count),
        ];
        let carousel_refs = carousels
            .into_iter()
            .flat_map(|(family, count)| (1..=count).map(move |id| AssetRef { family, id }));
        let shop_refs = self.shops.iter().flat_map(|s| {
            [ImageFamily::ShopPhoto, ImageFamily::ShopQr]
                .into_iter()
                .map(move |family| AssetRef { family, id: s.id })
        });
        carousel_refs.chain(shop_refs).collect()
    }

    /// Build the home screen's state machines for this content.
    pub fn home_screen(&self, settings: HomeSettings) -> Result<HomeScreen, ContentError> {
        let fun = self
            .environment
            .image_set(ImageFamily::Fun)
            .ok_or_else(|| ContentError::Validation("environment carousel is empty".into()))?;
        let staff = self
            .staff
            .image_set(ImageFamily::Staff)
            .ok_or_else(|| ContentError::Validation("staff carousel is empty".into()))?;
        Ok(HomeScreen::new(settings, fun, staff, self.shop_ids()))
    }
}

pub fn stock_content_toml() -> &'static str {
    STOCK_CONTENT
}

pub fn parse_content(text: &str) -> Result<SiteContent, ContentError> {
    let content: SiteContent = toml::from_str(text)?;
    content.validate()?;
    Ok(content)
}

/// Load `content.toml` from `dir`, falling back to the stock content.
pub fn load_content(dir: &Path) -> Result<SiteContent, ContentError> {
    let path = dir.join("content.toml");
    if path.exists() {
        parse_content(&fs::read_to_string(&path)?)
    } else {
        parse_content(STOCK_CONTENT)
    }
}

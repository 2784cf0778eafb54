//! HTML site generation.
//!
//! Takes validated config and content and writes the finished static site.
//!
//! ## Generated Pages
//!
//! - **Home page** (`/index.html`): hero, message, business, videos, the two
//!   autoplay carousels, the paged shop list, recruitment and sponsors
//! - **Company page** (`/company/index.html`): company facts table
//!
//! ## First Paint
//!
//! The home page's interactive widgets are rendered in the state the
//! [`HomeScreen`] is in right after mounting: active carousel slides, the shop
//! cards on the first page, pager controls, closed overlays. The screen is
//! mounted on a [`RenderHost`] at a desktop width and torn down again before
//! the page is written; a host left holding resources is a build error.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── company/
//! │   └── index.html
//! ├── assets/
//! │   ├── style.{hash}.css       # theme variables + static/style.css
//! │   └── site.{hash}.js         # browser runtime
//! ├── staff/fun1.jpg …           # copied from public/
//! └── shop1.jpg, shop1_qr.png …
//! ```
//!
//! ## CSS and JavaScript
//!
//! Both are embedded at compile time and written under a content hash, so a
//! changed stylesheet never collides with a cached one. The runtime script
//! reads its tunables from a JSON blob in `<script id="site-settings">`.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping; markdown
//! fields go through pulldown-cmark.

use crate::assets::{self, AssetError, AssetRoot, ImageFamily};
use crate::config::{self, SiteConfig};
use crate::content::{CarouselSection, ContentError, ShopRecord, SiteContent};
use crate::ui::carousel::Carousel;
use crate::ui::home::{CarouselSlot, HomeScreen};
use crate::ui::layout::{MobileMenu, NavLink};
use crate::ui::modal::ModalLayout;
use crate::ui::pager::{PageSizes, Pager};
use crate::ui::port::RenderHost;
use crate::ui::viewport::{Breakpoints, LayoutClass};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Event, Parser, html as md_html};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error("home screen left {0} host resources held after teardown")]
    LeakedResources(usize),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/site.js");

/// Width the first paint is computed at when the configured breakpoints allow it.
const FIRST_PAINT_WIDTH: u32 = 1280;

/// What a build wrote, for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Pages relative to the output directory.
    pub pages: Vec<String>,
    pub stylesheet: String,
    pub script: String,
    pub public_files: usize,
    pub shops: usize,
    /// Shop ids on the first page of the initial render.
    pub first_page: Vec<u32>,
}

/// URLs of the fingerprinted stylesheet and script.
#[derive(Debug, Clone, PartialEq, Eq)]
struct StaticFiles {
    stylesheet: String,
    script: String,
}

/// Render both pages into `output_dir` and copy `public_dir` next to them.
///
/// A missing `public_dir` is not an error; the pages are still written.
pub fn build_site(
    config: &SiteConfig,
    content: &SiteContent,
    public_dir: &Path,
    output_dir: &Path,
) -> Result<BuildReport, GenerateError> {
    fs::create_dir_all(output_dir)?;

    let public_files = if public_dir.is_dir() {
        assets::copy_public(public_dir, output_dir)?
    } else {
        0
    };

    let css = format!("{}\n\n{}", config::generate_theme_css(config), CSS_STATIC);
    let files = StaticFiles {
        stylesheet: write_fingerprinted(output_dir, "style", "css", &css)?,
        script: write_fingerprinted(output_dir, "site", "js", JS)?,
    };

    let year = config.site.copyright_year.unwrap_or_else(current_year);

    let mut host = RenderHost::new(first_paint_width(&config.viewport));
    let mut screen = content.home_screen(config.home_settings())?;
    screen.mount(&mut host);
    let first_page = screen.visible_shop_ids().to_vec();
    let settings = settings_json(config, &screen)?;
    let home = render_home(config, content, &screen, &files, &settings, year);
    screen.unmount(&mut host);
    if host.live_resources() > 0 || host.is_scroll_locked() {
        return Err(GenerateError::LeakedResources(host.live_resources()));
    }

    fs::write(output_dir.join("index.html"), home.into_string())?;

    let company_dir = output_dir.join("company");
    fs::create_dir_all(&company_dir)?;
    let company = render_company(config, content, &files, year);
    fs::write(company_dir.join("index.html"), company.into_string())?;

    Ok(BuildReport {
        pages: vec!["index.html".to_string(), "company/index.html".to_string()],
        stylesheet: files.stylesheet,
        script: files.script,
        public_files,
        shops: content.shops.len(),
        first_page,
    })
}

/// Write `contents` to `assets/{stem}.{hash}.{ext}` and return its URL.
fn write_fingerprinted(
    output_dir: &Path,
    stem: &str,
    ext: &str,
    contents: &str,
) -> Result<String, GenerateError> {
    let name = format!("{stem}.{}.{ext}", fingerprint(contents));
    let dir = output_dir.join("assets");
    fs::create_dir_all(&dir)?;
    fs::write(dir.join(&name), contents)?;
    Ok(format!("/assets/{name}"))
}

/// First 10 hex digits of the SHA-256 of `contents`.
fn fingerprint(contents: &str) -> String {
    let digest = format!("{:x}", Sha256::digest(contents.as_bytes()));
    digest[..10].to_string()
}

fn first_paint_width(breakpoints: &Breakpoints) -> u32 {
    FIRST_PAINT_WIDTH.max(breakpoints.mobile_below)
}

fn current_year() -> u32 {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    year_from_unix_days((secs / 86_400) as i64) as u32
}

/// Proleptic Gregorian year of a day count since 1970-01-01.
fn year_from_unix_days(days: i64) -> i64 {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let year = yoe + era * 400;
    // March-based year: January and February belong to the next one.
    if mp >= 10 { year + 1 } else { year }
}

// ============================================================================
// Runtime settings
// ============================================================================

#[derive(Debug, Serialize)]
struct RuntimeSettings {
    breakpoints: Breakpoints,
    page_sizes: PageSizes,
    carousel_interval_ms: u64,
    galleries: BTreeMap<&'static str, GalleryRuntime>,
}

#[derive(Debug, Serialize)]
struct GalleryRuntime {
    urls: Vec<String>,
    mobile: ModalLayout,
    desktop: ModalLayout,
}

fn slot_key(slot: CarouselSlot) -> &'static str {
    match slot {
        CarouselSlot::Environment => "environment",
        CarouselSlot::Staff => "staff",
    }
}

/// The JSON blob the browser runtime boots from, safe to embed in `<script>`.
fn settings_json(config: &SiteConfig, screen: &HomeScreen) -> Result<String, GenerateError> {
    let root = config.asset_root();
    let galleries = [CarouselSlot::Environment, CarouselSlot::Staff]
        .into_iter()
        .map(|slot| {
            let images = screen.carousel(slot).images();
            let (family, len) = (images.family(), images.len());
            let runtime = GalleryRuntime {
                urls: images.urls(&root),
                mobile: ModalLayout::for_view(family, len, LayoutClass::Phone),
                desktop: ModalLayout::for_view(family, len, LayoutClass::Desktop),
            };
            (slot_key(slot), runtime)
        })
        .collect();
    let settings = RuntimeSettings {
        breakpoints: config.viewport,
        page_sizes: config.pagination,
        carousel_interval_ms: config.carousel.interval_ms,
        galleries,
    };
    Ok(serde_json::to_string(&settings)?.replace("</", "<\\/"))
}

// ============================================================================
// HTML Components
// ============================================================================

fn markdown(text: &str) -> Markup {
    // Raw HTML in content is shown as text, never passed through.
    let events = Parser::new(text).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });
    let mut out = String::new();
    md_html::push_html(&mut out, events);
    PreEscaped(out)
}

/// Renders the base HTML document structure
fn base_document(
    config: &SiteConfig,
    title: &str,
    path: &str,
    files: &StaticFiles,
    body_class: &str,
    content: Markup,
) -> Markup {
    let site = &config.site;
    let root = config.asset_root();
    let base_url = site.url.trim_end_matches('/');
    let share_image = format!("{base_url}{}", root.file_url(&config.assets.share_image));
    html! {
        (DOCTYPE)
        html lang=(site.lang) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                meta name="description" content=(site.description);
                link rel="canonical" href=(format!("{base_url}{path}"));
                link rel="icon" href=(root.file_url(&config.assets.favicon)) sizes="any";
                link rel="apple-touch-icon" href=(root.file_url(&config.assets.apple_icon));
                meta property="og:type" content="website";
                meta property="og:locale" content=(site.locale);
                meta property="og:url" content=(format!("{base_url}{path}"));
                meta property="og:title" content=(title);
                meta property="og:description" content=(site.description);
                meta property="og:site_name" content=(site.title);
                meta property="og:image" content=(share_image);
                meta property="og:image:width" content="1200";
                meta property="og:image:height" content="630";
                meta property="og:image:alt" content=(site.title);
                meta name="twitter:card" content="summary_large_image";
                meta name="twitter:title" content=(title);
                meta name="twitter:description" content=(site.description);
                meta name="twitter:image" content=(share_image);
                link rel="stylesheet" href=(files.stylesheet);
            }
            body class=(body_class) {
                (content)
                script src=(files.script) defer {}
            }
        }
    }
}

/// Renders the fixed header and the mobile menu it toggles
fn site_header(config: &SiteConfig, nav: &[NavLink], menu: MobileMenu) -> Markup {
    let root = config.asset_root();
    let expanded = if menu.is_open() { "true" } else { "false" };
    html! {
        header.site-header {
            div.header-inner {
                a.logo href="/" {
                    img src=(root.file_url(&config.assets.logo)) alt=(config.site.title) width="160" height="50";
                }
                nav.site-nav {
                    ul {
                        @for link in nav {
                            li { a href=(link.href) { (link.label) } }
                        }
                    }
                }
                button.menu-toggle type="button" data-action="toggle-menu"
                    aria-controls="mobile-menu" aria-expanded=(expanded) aria-label="メニュー" {
                    span.menu-icon {}
                }
            }
        }
        div #mobile-menu .mobile-menu hidden[!menu.is_open()] {
            nav {
                ul {
                    @for link in nav {
                        li { a href=(link.href) data-action="follow-menu-link" { (link.label) } }
                    }
                }
            }
        }
    }
}

fn site_footer(config: &SiteConfig, year: u32) -> Markup {
    html! {
        footer.site-footer {
            p { "© " (year) " " (config.site.copyright_holder) " All Rights Reserved." }
        }
    }
}

// ============================================================================
// Home page
// ============================================================================

fn render_home(
    config: &SiteConfig,
    content: &SiteContent,
    screen: &HomeScreen,
    files: &StaticFiles,
    settings: &str,
    year: u32,
) -> Markup {
    let root = config.asset_root();
    let body = html! {
        (site_header(config, &content.nav, screen.menu()))
        main {
            (render_hero(content))
            (render_message(content))
            (render_business(content, &root))
            (render_experience(content))
            (render_carousel_section(
                "environment",
                &content.environment,
                screen.carousel(CarouselSlot::Environment),
                &root,
            ))
            (render_carousel_section(
                "staff",
                &content.staff,
                screen.carousel(CarouselSlot::Staff),
                &root,
            ))
            (render_shops(content, screen, &root))
            (render_recruit(content))
            (render_sponsors(content, &root))
        }
        (site_footer(config, year))
        (render_gallery_overlay())
        (render_qr_overlay())
        script #site-settings type="application/json" { (PreEscaped(settings)) }
    };
    base_document(config, &config.site.title, "/", files, "home", body)
}

fn render_hero(content: &SiteContent) -> Markup {
    let hero = &content.hero;
    html! {
        section #top .hero {
            div.container {
                p.hero-tagline { (hero.tagline) }
                h1.hero-headline {
                    @for (i, line) in hero.headline.iter().enumerate() {
                        @if i > 0 { br; }
                        (line)
                    }
                }
                div.hero-lead { (markdown(&hero.lead)) }
                a.button.hero-cta href=(hero.cta_href) { (hero.cta_label) }
            }
        }
    }
}

fn render_message(content: &SiteContent) -> Markup {
    let message = &content.message;
    html! {
        section #message .dark-section {
            div.container {
                h2.section-title { (message.title) }
                h3.philosophy-title { (message.philosophy_title) }
                p.motto { (message.motto) }
                div.message-body { (markdown(&message.body)) }
                @if !message.pillars.is_empty() {
                    div.pillars {
                        @for pillar in &message.pillars {
                            article.pillar {
                                h4 { (pillar.title) }
                                (markdown(&pillar.body))
                            }
                        }
                    }
                }
            }
        }
    }
}

fn render_business(content: &SiteContent, root: &AssetRoot) -> Markup {
    let business = &content.business;
    html! {
        section #business .brand-section {
            div.container {
                h2.section-title { (business.title) }
                div.business-layout {
                    div.business-text {
                        h3 { (business.heading) }
                        (markdown(&business.body))
                        a.button href="/company" { (business.company_link_label) }
                    }
                    @if !business.images.is_empty() {
                        div.business-images {
                            @for file in &business.images {
                                img src=(root.file_url(file)) alt=(business.heading) loading="lazy";
                            }
                        }
                    }
                }
            }
        }
    }
}

fn render_experience(content: &SiteContent) -> Markup {
    let experience = &content.experience;
    html! {
        section #youtube .dark-section {
            div.container {
                h2.section-title { (experience.title) }
                div.videos {
                    @for video in &experience.videos {
                        article.video {
                            div.video-frame {
                                iframe src=(video.embed_url()) title=(video.title) loading="lazy"
                                    allow="accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture"
                                    allowfullscreen {}
                            }
                            span.tag { (video.tag) }
                            h3 { (video.heading) }
                            (markdown(&video.caption))
                        }
                    }
                }
                div.experience-outro { (markdown(&experience.outro)) }
                a.button href=(experience.channel_url) target="_blank" rel="noopener noreferrer" {
                    (experience.channel_label)
                }
            }
        }
    }
}

/// A text block beside an autoplay carousel. The active slide is the
/// carousel's current image.
fn render_carousel_section(
    key: &str,
    section: &CarouselSection,
    carousel: &Carousel,
    root: &AssetRoot,
) -> Markup {
    let images = carousel.images();
    html! {
        section id=(key) class="brand-section carousel-section" {
            div.container.carousel-layout {
                div.carousel-text {
                    span.tag { (section.tag) }
                    h3 { (section.heading) }
                    (markdown(&section.body))
                }
                div.carousel data-carousel=(key) data-action="open-gallery" role="button" tabindex="0"
                    aria-label=(section.heading) {
                    @for (i, id) in images.ids().iter().enumerate() {
                        div.slide.active[i == carousel.current_index()] {
                            img src=(root.url(images.family(), *id)) alt=(format!("{} {}", section.heading, id))
                                loading=(if i == 0 { "eager" } else { "lazy" });
                        }
                    }
                }
            }
        }
    }
}

fn render_shops(content: &SiteContent, screen: &HomeScreen, root: &AssetRoot) -> Markup {
    let visible = screen.visible_shop_ids();
    let label = &content.shop_section.shop_link_label;
    html! {
        section #shops .brand-section {
            div.container {
                h2.section-title { (content.shop_section.title) }
                div.shop-grid {
                    @for shop in &content.shops {
                        (render_shop_card(shop, visible.contains(&shop.id), label, root))
                    }
                }
                (render_pager(screen.pager()))
            }
        }
    }
}

fn render_shop_card(shop: &ShopRecord, visible: bool, link_label: &str, root: &AssetRoot) -> Markup {
    let qr = root.url(ImageFamily::ShopQr, shop.id);
    html! {
        article.shop-card data-shop-id=(shop.id) hidden[!visible] {
            div.shop-photo {
                img src=(root.url(ImageFamily::ShopPhoto, shop.id)) alt=(shop.name) loading="lazy";
            }
            div.shop-body {
                div.shop-info {
                    h3 { (shop.name) }
                    p { (shop.address) }
                    p { "TEL: " (shop.phone) }
                }
                button.shop-qr type="button" data-action="show-qr" data-qr-for=(shop.id) data-qr-src=(qr)
                    aria-label=(format!("{}のQRコード", shop.name)) {
                    img src=(qr) alt=(format!("{}のQRコード", shop.name)) loading="lazy";
                }
            }
            a.shop-link href=(shop.url) target="_blank" rel="noopener noreferrer" { (link_label) }
        }
    }
}

fn render_pager(pager: &Pager) -> Markup {
    html! {
        nav.pager aria-label="店舗ページ" {
            button.page-prev type="button" data-action="prev-page" aria-label="前のページへ"
                disabled[!pager.has_prev()] { "‹" }
            div.page-dots {
                @for page in 0..pager.total_pages() {
                    button.page-dot.active[page == pager.current_page()] type="button"
                        data-action="go-to-page" data-page=(page) { (page + 1) }
                }
            }
            button.page-next type="button" data-action="next-page" aria-label="次のページへ"
                disabled[!pager.has_next()] { "›" }
        }
    }
}

fn render_recruit(content: &SiteContent) -> Markup {
    let recruit = &content.recruit;
    html! {
        section #recruit .dark-section {
            div.container {
                h2.section-title { (recruit.title) }
                h3.recruit-heading { (recruit.heading) }
                p.recruit-lead { (recruit.lead) }
                div.recruit-blocks {
                    @for block in &recruit.blocks {
                        article.recruit-block {
                            h4 { (block.heading) }
                            @if !block.items.is_empty() {
                                ul { @for item in &block.items { li { (item) } } }
                            }
                            @if let Some(body) = &block.body {
                                p { (body) }
                            }
                        }
                    }
                }
                p.recruit-closing { (recruit.closing) }
                a.button href="#shops" { (recruit.shops_link_label) }
                @if let Some(opening) = &recruit.opening {
                    article.job-opening {
                        h4 { (opening.title) }
                        h5 { (opening.duties_heading) }
                        ul { @for duty in &opening.duties { li { (duty) } } }
                        h5 { (opening.location_heading) }
                        address {
                            @for (i, line) in opening.location.iter().enumerate() {
                                @if i > 0 { br; }
                                (line)
                            }
                        }
                        @if let Some(note) = &opening.note {
                            p.note { (note) }
                        }
                    }
                }
                div.recruit-contact { (markdown(&recruit.contact)) }
            }
        }
    }
}

fn render_sponsors(content: &SiteContent, root: &AssetRoot) -> Markup {
    let sponsors = &content.sponsors;
    html! {
        section #sponsor .brand-section {
            div.container {
                h2.section-title { (sponsors.title) }
                div.sponsor-lead { (markdown(&sponsors.lead)) }
                div.sponsor-logos {
                    @for file in &sponsors.images {
                        img src=(root.file_url(file)) alt=(sponsors.title) loading="lazy";
                    }
                }
            }
        }
    }
}

/// The gallery overlay, closed. The runtime fills in the image and applies
/// the panel geometry for the current layout class.
fn render_gallery_overlay() -> Markup {
    html! {
        div #gallery .modal-overlay data-modal="gallery" data-action="gallery-backdrop" hidden {
            div.modal-panel role="dialog" aria-modal="true" {
                button.modal-close type="button" data-action="gallery-close" aria-label="閉じる" { "×" }
                div.modal-stage {
                    button.modal-prev.nav-side type="button" data-action="gallery-prev" aria-label="前の画像" { "‹" }
                    div.modal-image-box {
                        img.modal-image alt="";
                    }
                    button.modal-next.nav-side type="button" data-action="gallery-next" aria-label="次の画像" { "›" }
                }
                div.modal-nav-bottom {
                    button.modal-prev type="button" data-action="gallery-prev" aria-label="前の画像" { "‹" }
                    span.modal-counter {}
                    button.modal-next type="button" data-action="gallery-next" aria-label="次の画像" { "›" }
                }
            }
        }
    }
}

fn render_qr_overlay() -> Markup {
    html! {
        div #qr-popup .modal-overlay.qr-overlay data-modal="qr" data-action="qr-backdrop" hidden {
            div.qr-panel role="dialog" aria-modal="true" {
                button.modal-close type="button" data-action="qr-close" aria-label="閉じる" { "×" }
                img.qr-image alt="";
            }
        }
    }
}

// ============================================================================
// Company page
// ============================================================================

fn render_company(
    config: &SiteConfig,
    content: &SiteContent,
    files: &StaticFiles,
    year: u32,
) -> Markup {
    let company = &content.company;
    let title = format!("{} | {}", company.title, config.site.title);
    let body = html! {
        (site_header(config, &content.nav, MobileMenu::default()))
        main {
            section.company-page {
                div.container {
                    h1.section-title { (company.title) }
                    h2 { (company.heading) }
                    table.company-facts {
                        tbody {
                            @for fact in &company.facts {
                                tr {
                                    th scope="row" { (fact.label) }
                                    td { (fact.value) }
                                }
                            }
                        }
                    }
                }
            }
        }
        (site_footer(config, year))
    };
    base_document(config, &title, "/company", files, "company", body)
}

// ============================================================================
// Tests
// ============================================================================

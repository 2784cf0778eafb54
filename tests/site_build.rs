//! End-to-end tests: run the binary against a temp source tree and inspect
//! what it writes.

use pinzoro_site::assets::ImageFamily;
use pinzoro_site::config::{self, SiteConfig};
use pinzoro_site::content::{self, SiteContent};
use pinzoro_site::ui::home::{Action, CarouselSlot};
use pinzoro_site::ui::port::RenderHost;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Setup helpers
// ---------------------------------------------------------------------------

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pinzoro-site"))
        .args(args)
        .output()
        .expect("failed to run pinzoro-site")
}

fn stock_content() -> SiteContent {
    content::parse_content(content::stock_content_toml()).unwrap()
}

/// Write a tiny decodable image for every file the stock content expects.
fn populate_public(public: &Path) {
    for asset in stock_content().asset_refs() {
        let path = public.join(asset.relative_path());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        image::RgbImage::new(8, 6).save(&path).unwrap();
    }
    fs::write(public.join("logo.png"), b"not checked").unwrap();
}

struct Site {
    tmp: TempDir,
}

impl Site {
    fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("site")).unwrap();
        fs::create_dir_all(tmp.path().join("public")).unwrap();
        Self { tmp }
    }

    fn path(&self, rel: &str) -> String {
        self.tmp.path().join(rel).to_str().unwrap().to_string()
    }

    fn run(&self, command: &str) -> Output {
        let (source, output, public) = (self.path("site"), self.path("dist"), self.path("public"));
        let mut args = vec![command, "--source", source.as_str(), "--output", output.as_str()];
        if command == "build" || command == "check" {
            args.extend(["--public", public.as_str()]);
        }
        run(&args)
    }

    fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.tmp.path().join(rel)).unwrap()
    }
}

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

#[test]
fn build_writes_both_pages_and_copies_public() {
    let site = Site::new();
    populate_public(&site.tmp.path().join("public"));

    let out = site.run("build");
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("==> Build complete"));
    assert!(stdout.contains("Generated 2 pages for 12 shops"));

    let home = site.read("dist/index.html");
    assert!(home.contains("PINZORO"));
    assert_eq!(home.matches("class=\"shop-card\"").count(), 12);
    assert!(site.tmp.path().join("dist/company/index.html").is_file());
    assert!(site.tmp.path().join("dist/staff/staff5.jpg").is_file());
    assert!(site.tmp.path().join("dist/shop12_qr.png").is_file());
}

#[test]
fn build_uses_custom_content_and_config() {
    let site = Site::new();
    let text = content::stock_content_toml()
        .replace("name = \"50円焼き鳥 絶好鳥 西葛西店\"", "name = \"テスト店\"");
    fs::write(site.tmp.path().join("site/content.toml"), text).unwrap();
    fs::write(
        site.tmp.path().join("site/config.toml"),
        "[site]\ntitle = \"PINZORO TEST\"\ncopyright_year = 2030\n\n[pagination]\nwide = 4\n",
    )
    .unwrap();

    let out = site.run("build");
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let home = site.read("dist/index.html");
    assert!(home.contains("テスト店"));
    assert!(home.contains("<title>PINZORO TEST</title>"));
    assert!(home.contains("© 2030"));
    assert_eq!(home.matches("data-action=\"go-to-page\"").count(), 3);
    assert!(home.contains("data-shop-id=\"5\" hidden"));
}

#[test]
fn invalid_config_fails_build() {
    let site = Site::new();
    fs::write(
        site.tmp.path().join("site/config.toml"),
        "[pagination]\ncompact = 0\n",
    )
    .unwrap();
    let out = site.run("build");
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("pagination sizes must be non-zero"));
}

#[test]
fn unknown_config_key_fails_check() {
    let site = Site::new();
    fs::write(site.tmp.path().join("site/config.toml"), "[carousel]\nspeed = 2\n").unwrap();
    let out = site.run("check");
    assert!(!out.status.success());
}

#[test]
fn check_passes_with_complete_public_dir() {
    let site = Site::new();
    populate_public(&site.tmp.path().join("public"));
    let out = site.run("check");
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(String::from_utf8_lossy(&out.stdout).contains("33 of 33 assets ok"));
}

#[test]
fn check_reports_missing_assets() {
    let site = Site::new();
    let public = site.tmp.path().join("public");
    populate_public(&public);
    fs::remove_file(public.join(ImageFamily::ShopPhoto.file_name(4))).unwrap();

    let out = site.run("check");
    assert!(!out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("MISSING  shop4.jpg"));
    assert!(stdout.contains("32 of 33 assets ok"));
}

#[test]
fn gen_config_round_trips_through_loader() {
    let out = run(&["gen-config"]);
    assert!(out.status.success());
    let value: toml::Value = toml::from_str(&String::from_utf8_lossy(&out.stdout)).unwrap();
    let resolved = config::resolve_config(config::stock_defaults_value(), Some(value)).unwrap();
    assert_eq!(resolved.carousel.interval_ms, SiteConfig::default().carousel.interval_ms);
}

#[test]
fn gen_content_prints_stock_content() {
    let out = run(&["gen-content"]);
    assert!(out.status.success());
    let parsed = content::parse_content(&String::from_utf8_lossy(&out.stdout)).unwrap();
    assert_eq!(parsed.shops.len(), 12);
}

// ---------------------------------------------------------------------------
// Library
// ---------------------------------------------------------------------------

#[test]
fn phone_width_first_paint_uses_compact_pages() {
    let settings = SiteConfig::default().home_settings();
    let mut screen = stock_content().home_screen(settings).unwrap();
    let mut host = RenderHost::new(375);
    screen.mount(&mut host);

    assert_eq!(screen.visible_shop_ids(), &[1, 2, 3]);
    assert!(screen.dispatch(Action::NextPage, &mut host));
    assert_eq!(screen.visible_shop_ids(), &[4, 5, 6]);

    screen.dispatch(Action::CarouselClick(CarouselSlot::Environment), &mut host);
    assert!(host.is_scroll_locked());

    screen.unmount(&mut host);
    assert_eq!(host.live_resources(), 0);
    assert!(!host.is_scroll_locked());
}

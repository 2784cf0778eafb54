//! CLI output formatting for `build` and `check`.
//!
//! # Information-First Display
//!
//! Output is organised around what the site shows, not around files. Each
//! shop is listed by its positional index and name, with its convention asset
//! paths as indented context lines. Counts and file paths come second.
//!
//! # Output Format
//!
//! ## Content
//!
//! ```text
//! Shops
//! 001 50円焼き鳥 絶好鳥 西葛西店
//!     Photo: shop1.jpg
//!     QR: shop1_qr.png
//! Carousels
//!     environment: 4 images
//!     staff: 5 images
//! ```
//!
//! ## Build
//!
//! ```text
//! Home → index.html
//!     First page: shops 1, 2, 3, 4, 5, 6
//! Company → company/index.html
//! Assets
//!     /assets/style.1a2b3c4d5e.css
//!     /assets/site.9f8e7d6c5b.js
//!     12 files copied from public/
//!
//! Generated 2 pages for 12 shops
//! ```
//!
//! ## Check
//!
//! ```text
//! Assets
//!     ok       staff/fun1.jpg (1200x800)
//!     MISSING  shop4.jpg
//!     BROKEN   shop5_qr.png: Format error decoding Png
//!
//! 31 of 33 assets ok
//! ```
//!
//! # Architecture
//!
//! Each report has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::assets::{AssetState, AssetStatus, ImageFamily};
use crate::content::SiteContent;
use crate::generate::BuildReport;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

fn join_ids(ids: &[u32]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// Content
// ============================================================================

/// Inventory of the content the site will render.
pub fn format_content_summary(content: &SiteContent) -> Vec<String> {
    let mut lines = vec!["Shops".to_string()];
    for (pos, shop) in content.shops.iter().enumerate() {
        lines.push(format!("{} {}", format_index(pos + 1), shop.name));
        lines.push(format!(
            "{}Photo: {}",
            indent(1),
            ImageFamily::ShopPhoto.file_name(shop.id)
        ));
        lines.push(format!(
            "{}QR: {}",
            indent(1),
            ImageFamily::ShopQr.file_name(shop.id)
        ));
    }
    lines.push("Carousels".to_string());
    for (name, count) in [
        ("environment", content.environment.image_count),
        ("staff", content.staff.image_count),
    ] {
        lines.push(format!(
            "{}{name}: {}",
            indent(1),
            plural(count as usize, "image", "images")
        ));
    }
    lines
}

pub fn print_content_summary(content: &SiteContent) {
    for line in format_content_summary(content) {
        println!("{}", line);
    }
}

// ============================================================================
// Build
// ============================================================================

pub fn format_build_output(report: &BuildReport) -> Vec<String> {
    let mut lines = vec![
        "Home → index.html".to_string(),
        format!("{}First page: shops {}", indent(1), join_ids(&report.first_page)),
        "Company → company/index.html".to_string(),
        "Assets".to_string(),
        format!("{}{}", indent(1), report.stylesheet),
        format!("{}{}", indent(1), report.script),
    ];
    if report.public_files == 0 {
        lines.push(format!("{}no public/ files copied", indent(1)));
    } else {
        lines.push(format!(
            "{}{} copied from public/",
            indent(1),
            plural(report.public_files, "file", "files")
        ));
    }
    lines.push(String::new());
    lines.push(format!(
        "Generated {} for {}",
        plural(report.pages.len(), "page", "pages"),
        plural(report.shops, "shop", "shops")
    ));
    lines
}

pub fn print_build_output(report: &BuildReport) {
    for line in format_build_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

fn asset_line(status: &AssetStatus) -> String {
    match &status.state {
        AssetState::Found { width, height } => {
            format!("{}ok       {} ({}x{})", indent(1), status.path, width, height)
        }
        AssetState::Missing => format!("{}MISSING  {}", indent(1), status.path),
        AssetState::Unreadable(err) => {
            format!("{}BROKEN   {}: {}", indent(1), status.path, err)
        }
    }
}

pub fn format_check_output(statuses: &[AssetStatus]) -> Vec<String> {
    let mut lines = vec!["Assets".to_string()];
    lines.extend(statuses.iter().map(asset_line));
    let ok = statuses.iter().filter(|s| s.is_ok()).count();
    lines.push(String::new());
    lines.push(format!("{} of {} assets ok", ok, statuses.len()));
    lines
}

pub fn print_check_output(statuses: &[AssetStatus]) {
    for line in format_check_output(statuses) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::stock_content;

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(12), "012");
    }

    #[test]
    fn plural_forms() {
        assert_eq!(plural(1, "page", "pages"), "1 page");
        assert_eq!(plural(0, "page", "pages"), "0 pages");
    }

    #[test]
    fn content_summary_lists_shops_with_assets() {
        let lines = format_content_summary(&stock_content());
        assert_eq!(lines[0], "Shops");
        assert_eq!(lines[1], "001 50円焼き鳥 絶好鳥 西葛西店");
        assert_eq!(lines[2], "    Photo: shop1.jpg");
        assert_eq!(lines[3], "    QR: shop1_qr.png");
        assert!(lines.contains(&"012 下町もんじゃ・お好み焼き 居酒屋 ぴんぞろ 瑞江店".to_string()));
        assert_eq!(lines[lines.len() - 2], "    environment: 4 images");
        assert_eq!(lines[lines.len() - 1], "    staff: 5 images");
    }

    fn report(public_files: usize) -> BuildReport {
        BuildReport {
            pages: vec!["index.html".into(), "company/index.html".into()],
            stylesheet: "/assets/style.abc.css".into(),
            script: "/assets/site.def.js".into(),
            public_files,
            shops: 12,
            first_page: vec![1, 2, 3, 4, 5, 6],
        }
    }

    #[test]
    fn build_output_shape() {
        let lines = format_build_output(&report(33));
        assert_eq!(lines[0], "Home → index.html");
        assert_eq!(lines[1], "    First page: shops 1, 2, 3, 4, 5, 6");
        assert!(lines.contains(&"    /assets/style.abc.css".to_string()));
        assert!(lines.contains(&"    33 files copied from public/".to_string()));
        assert_eq!(lines.last().unwrap(), "Generated 2 pages for 12 shops");
    }

    #[test]
    fn build_output_without_public() {
        let lines = format_build_output(&report(0));
        assert!(lines.contains(&"    no public/ files copied".to_string()));
    }

    #[test]
    fn check_output_marks_each_state() {
        let statuses = vec![
            AssetStatus {
                path: "staff/fun1.jpg".into(),
                state: AssetState::Found {
                    width: 1200,
                    height: 800,
                },
            },
            AssetStatus {
                path: "shop4.jpg".into(),
                state: AssetState::Missing,
            },
            AssetStatus {
                path: "shop5_qr.png".into(),
                state: AssetState::Unreadable("bad header".into()),
            },
        ];
        let lines = format_check_output(&statuses);
        assert_eq!(lines[1], "    ok       staff/fun1.jpg (1200x800)");
        assert_eq!(lines[2], "    MISSING  shop4.jpg");
        assert_eq!(lines[3], "    BROKEN   shop5_qr.png: bad header");
        assert_eq!(lines.last().unwrap(), "1 of 3 assets ok");
    }
}

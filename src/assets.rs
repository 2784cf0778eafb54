//! Asset naming convention, image sets, and the `public/` directory.
//!
//! Images are never referenced by hand-written paths. Every photo the site
//! shows belongs to an [`ImageFamily`] and is addressed by a 1-based integer id;
//! the family decides the filename:
//!
//! ```text
//! Fun        → staff/fun{id}.jpg       (environment carousel)
//! Staff      → staff/staff{id}.jpg     (staff carousel)
//! ShopPhoto  → shop{id}.jpg            (shop card photo)
//! ShopQr     → shop{id}_qr.png         (shop card QR code)
//! ```
//!
//! The relative filename is joined onto the configured asset root to form the
//! URL used in generated HTML, and onto the `public/` directory when checking
//! that the file exists.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Public directory not found: {0}")]
    MissingPublicDir(PathBuf),
}

/// Which naming rule an image id goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageFamily {
    Fun,
    Staff,
    ShopPhoto,
    ShopQr,
}

impl ImageFamily {
    /// Filename relative to the asset root.
    pub fn file_name(self, id: u32) -> String {
        match self {
            ImageFamily::Fun => format!("staff/fun{id}.jpg"),
            ImageFamily::Staff => format!("staff/staff{id}.jpg"),
            ImageFamily::ShopPhoto => format!("shop{id}.jpg"),
            ImageFamily::ShopQr => format!("shop{id}_qr.png"),
        }
    }
}

/// URL prefix under which `public/` is served.
///
/// An empty root means the site root, so `shop1.jpg` becomes `/shop1.jpg`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRoot(String);

impl AssetRoot {
    pub fn new(root: &str) -> Self {
        Self(root.trim_end_matches('/').to_string())
    }

    pub fn url(&self, family: ImageFamily, id: u32) -> String {
        self.file_url(&family.file_name(id))
    }

    /// URL for a file that does not follow an id convention (logo, backgrounds).
    pub fn file_url(&self, file: &str) -> String {
        format!("{}/{}", self.0, file.trim_start_matches('/'))
    }
}

impl Default for AssetRoot {
    fn default() -> Self {
        Self::new("")
    }
}

/// An ordered, non-empty list of image ids from one family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSet {
    family: ImageFamily,
    ids: Vec<u32>,
}

#[allow(clippy::len_without_is_empty)]
impl ImageSet {
    /// Returns `None` for an empty id list: a viewer over zero images has no
    /// meaningful current image.
    pub fn new(family: ImageFamily, ids: Vec<u32>) -> Option<Self> {
        if ids.is_empty() {
            None
        } else {
            Some(Self { family, ids })
        }
    }

    /// Ids `1..=count`.
    pub fn sequence(family: ImageFamily, count: u32) -> Option<Self> {
        Self::new(family, (1..=count).collect())
    }

    pub fn single(family: ImageFamily, id: u32) -> Self {
        Self {
            family,
            ids: vec![id],
        }
    }

    pub fn family(&self) -> ImageFamily {
        self.family
    }

    pub fn ids(&self) -> &[u32] {
        &self.ids
    }

    /// Always at least 1.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Id at `index`, wrapping out-of-range indices back into the set.
    pub fn id_at(&self, index: usize) -> u32 {
        self.ids[index % self.ids.len()]
    }

    /// URLs for every image, in order.
    pub fn urls(&self, root: &AssetRoot) -> Vec<String> {
        self.ids.iter().map(|&id| root.url(self.family, id)).collect()
    }
}

// ============================================================================
// Asset probing
// ============================================================================

/// One file the site expects to find in `public/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRef {
    pub family: ImageFamily,
    pub id: u32,
}

impl AssetRef {
    pub fn relative_path(&self) -> String {
        self.family.file_name(self.id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AssetState {
    Found { width: u32, height: u32 },
    Missing,
    Unreadable(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssetStatus {
    pub path: String,
    pub state: AssetState,
}

impl AssetStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self.state, AssetState::Found { .. })
    }
}

/// Check every expected asset under `public_dir`, decoding headers in parallel.
///
/// Results come back in the order of `refs`.
pub fn probe_assets(public_dir: &Path, refs: &[AssetRef]) -> Vec<AssetStatus> {
    refs.par_iter()
        .map(|r| {
            let path = r.relative_path();
            let full = public_dir.join(&path);
            let state = if !full.is_file() {
                AssetState::Missing
            } else {
                match image::image_dimensions(&full) {
                    Ok((width, height)) => AssetState::Found { width, height },
                    Err(e) => AssetState::Unreadable(e.to_string()),
                }
            };
            AssetStatus { path, state }
        })
        .collect()
}

/// Copy `public_dir` into `output_dir`, preserving the tree. Returns the
/// number of files copied.
pub fn copy_public(public_dir: &Path, output_dir: &Path) -> Result<usize, AssetError> {
    if !public_dir.is_dir() {
        return Err(AssetError::MissingPublicDir(public_dir.to_path_buf()));
    }
    let mut copied = 0;
    for entry in WalkDir::new(public_dir).min_depth(1) {
        let entry = entry?;
        let Ok(rel) = entry.path().strip_prefix(public_dir) else {
            continue;
        };
        let dst = output_dir.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&dst)?;
        } else {
            if let Some(parent) = dst.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &dst)?;
            copied += 1;
        }
    }
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn family_file_names_follow_convention() {
        assert_eq!(ImageFamily::Fun.file_name(3), "staff/fun3.jpg");
        assert_eq!(ImageFamily::Staff.file_name(5), "staff/staff5.jpg");
        assert_eq!(ImageFamily::ShopPhoto.file_name(12), "shop12.jpg");
        assert_eq!(ImageFamily::ShopQr.file_name(7), "shop7_qr.png");
    }

    #[test]
    fn empty_root_is_site_root() {
        let root = AssetRoot::default();
        assert_eq!(root.url(ImageFamily::ShopPhoto, 1), "/shop1.jpg");
        assert_eq!(root.file_url("/logo.png"), "/logo.png");
    }

    #[test]
    fn root_trailing_slash_is_normalized() {
        let root = AssetRoot::new("https://cdn.example.com/pinzoro/");
        assert_eq!(
            root.url(ImageFamily::Staff, 2),
            "https://cdn.example.com/pinzoro/staff/staff2.jpg"
        );
    }

    #[test]
    fn image_set_rejects_empty() {
        assert!(ImageSet::new(ImageFamily::Fun, vec![]).is_none());
        assert!(ImageSet::sequence(ImageFamily::Fun, 0).is_none());
    }

    #[test]
    fn image_set_sequence_is_one_based() {
        let set = ImageSet::sequence(ImageFamily::Fun, 4).unwrap();
        assert_eq!(set.ids(), &[1, 2, 3, 4]);
        assert_eq!(set.len(), 4);
        assert_eq!(set.id_at(0), 1);
        assert_eq!(set.id_at(5), 2);
    }

    #[test]
    fn image_set_urls() {
        let set = ImageSet::sequence(ImageFamily::Fun, 2).unwrap();
        assert_eq!(
            set.urls(&AssetRoot::default()),
            vec!["/staff/fun1.jpg", "/staff/fun2.jpg"]
        );
    }

    #[test]
    fn probe_reports_missing_and_unreadable() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("shop1.jpg"), b"not an image").unwrap();

        let refs = vec![
            AssetRef {
                family: ImageFamily::ShopPhoto,
                id: 1,
            },
            AssetRef {
                family: ImageFamily::ShopPhoto,
                id: 2,
            },
        ];
        let statuses = probe_assets(tmp.path(), &refs);
        assert_eq!(statuses[0].path, "shop1.jpg");
        assert!(matches!(statuses[0].state, AssetState::Unreadable(_)));
        assert_eq!(statuses[1].state, AssetState::Missing);
    }

    #[test]
    fn probe_reads_dimensions() {
        let tmp = TempDir::new().unwrap();
        let img = image::RgbImage::new(4, 3);
        img.save(tmp.path().join("shop3_qr.png")).unwrap();

        let statuses = probe_assets(
            tmp.path(),
            &[AssetRef {
                family: ImageFamily::ShopQr,
                id: 3,
            }],
        );
        assert_eq!(
            statuses[0].state,
            AssetState::Found {
                width: 4,
                height: 3
            }
        );
        assert!(statuses[0].is_ok());
    }

    #[test]
    fn copy_public_preserves_tree() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        fs::create_dir_all(src.path().join("staff")).unwrap();
        fs::write(src.path().join("staff/fun1.jpg"), b"x").unwrap();
        fs::write(src.path().join("logo.png"), b"y").unwrap();

        let copied = copy_public(src.path(), dst.path()).unwrap();
        assert_eq!(copied, 2);
        assert!(dst.path().join("staff/fun1.jpg").is_file());
        assert!(dst.path().join("logo.png").is_file());
    }

    #[test]
    fn copy_public_requires_directory() {
        let dst = TempDir::new().unwrap();
        let err = copy_public(Path::new("/nonexistent/public"), dst.path()).unwrap_err();
        assert!(matches!(err, AssetError::MissingPublicDir(_)));
    }
}

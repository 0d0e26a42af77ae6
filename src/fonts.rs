//! Font resource provider: resolves decorative font assets for the overlay.
//!
//! Assets load lazily on first use and stay cached for the life of the
//! process. A missing or unreadable file never fails a render; the affected
//! role simply resolves to its generic fallback family.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use resvg::usvg::fontdb;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Logical purpose of a decorative font asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontRole {
    /// Calligraphic face for the headline recipient name
    Display,
    /// Handwriting face for the recipient name inside the body text
    BodyScript,
    /// Script face for the signature line
    Signature,
}

impl FontRole {
    pub const ALL: [FontRole; 3] = [FontRole::Display, FontRole::BodyScript, FontRole::Signature];

    /// Generic family used when the role's asset is unavailable.
    pub fn fallback_family(&self) -> &'static str {
        match self {
            FontRole::Display | FontRole::Signature => "cursive",
            FontRole::BodyScript => "sans-serif",
        }
    }
}

/// Where to look for the decorative font files. Every entry is optional.
#[derive(Debug, Clone, Default)]
pub struct FontPaths {
    pub display: Option<PathBuf>,
    pub body_script: Option<PathBuf>,
    pub signature: Option<PathBuf>,
}

impl FontPaths {
    fn for_role(&self, role: FontRole) -> Option<&Path> {
        match role {
            FontRole::Display => self.display.as_deref(),
            FontRole::BodyScript => self.body_script.as_deref(),
            FontRole::Signature => self.signature.as_deref(),
        }
    }
}

struct LoadedFonts {
    db: Arc<fontdb::Database>,
    families: HashMap<FontRole, String>,
}

/// Process-lifetime font cache: loaded once, read-only afterwards, safe to
/// share across render threads.
pub struct FontLibrary {
    paths: FontPaths,
    load_system_fonts: bool,
    loaded: OnceLock<LoadedFonts>,
}

impl FontLibrary {
    pub fn new(paths: FontPaths, load_system_fonts: bool) -> Self {
        Self {
            paths,
            load_system_fonts,
            loaded: OnceLock::new(),
        }
    }

    /// The family `role` resolved to, if its asset loaded.
    pub fn family_for(&self, role: FontRole) -> Option<&str> {
        self.loaded().families.get(&role).map(String::as_str)
    }

    /// The shared font database handed to the rasterizer.
    pub fn database(&self) -> Arc<fontdb::Database> {
        self.loaded().db.clone()
    }

    fn loaded(&self) -> &LoadedFonts {
        self.loaded.get_or_init(|| self.read_assets())
    }

    fn read_assets(&self) -> LoadedFonts {
        let mut db = fontdb::Database::new();
        let mut families = HashMap::new();

        for role in FontRole::ALL {
            let Some(path) = self.paths.for_role(role) else {
                debug!(?role, "no font asset configured");
                continue;
            };
            match register_font(&mut db, path) {
                Ok(family) => {
                    debug!(?role, %family, "font asset registered");
                    families.insert(role, family);
                }
                Err(e) => {
                    warn!(?role, fallback = role.fallback_family(), "{}", e);
                }
            }
        }

        if self.load_system_fonts {
            db.load_system_fonts();
        }

        LoadedFonts {
            db: Arc::new(db),
            families,
        }
    }
}

/// Register one font file and report the family name it resolves to.
fn register_font(db: &mut fontdb::Database, path: &Path) -> Result<String> {
    let data =
        fs::read(path).map_err(|e| Error::FontLoad(format!("{}: {}", path.display(), e)))?;
    let before = db.len();
    db.load_font_data(data);
    db.faces()
        .nth(before)
        .and_then(|face| face.families.first().map(|(name, _)| name.clone()))
        .ok_or_else(|| Error::FontLoad(format!("{}: no usable face in font data", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn fallback_families_per_role() {
        assert_eq!(FontRole::Display.fallback_family(), "cursive");
        assert_eq!(FontRole::Signature.fallback_family(), "cursive");
        assert_eq!(FontRole::BodyScript.fallback_family(), "sans-serif");
    }

    #[test]
    fn unconfigured_roles_stay_unresolved() {
        let library = FontLibrary::new(FontPaths::default(), false);
        for role in FontRole::ALL {
            assert!(library.family_for(role).is_none());
        }
        assert_eq!(library.database().len(), 0);
    }

    #[test]
    fn unreadable_asset_is_absorbed() {
        let paths = FontPaths {
            display: Some(PathBuf::from("does/not/exist.ttf")),
            ..Default::default()
        };
        let library = FontLibrary::new(paths, false);
        assert!(library.family_for(FontRole::Display).is_none());
    }

    #[test]
    fn garbage_font_data_is_absorbed() {
        let mut file = tempfile::NamedTempFile::new().expect("temp font");
        file.write_all(b"definitely not a font").expect("write");
        let paths = FontPaths {
            signature: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        let library = FontLibrary::new(paths, false);
        assert!(library.family_for(FontRole::Signature).is_none());
    }

    #[test]
    fn repeated_loads_reuse_the_cache() {
        let library = FontLibrary::new(FontPaths::default(), false);
        let first = library.database();
        let second = library.database();
        assert!(Arc::ptr_eq(&first, &second));
    }
}

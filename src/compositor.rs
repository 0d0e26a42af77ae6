//! The certificate compositor: validate, build the overlay, rasterize.

use std::fs;

use tiny_skia::Pixmap;
use tokio::sync::Semaphore;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::fonts::FontLibrary;
use crate::rendering::{overlay, raster, CertificateImage};
use crate::{CertificateRequest, Compositor, CompositorConfig};

/// SVG-overlay compositor backed by resvg.
///
/// Owns the decoded template, the lazily-loaded font library, and the render
/// permit pool. Construction fails when the template is unreadable; font
/// problems degrade to fallback families instead of failing.
pub struct SvgCompositor {
    template: Pixmap,
    fonts: FontLibrary,
    permits: Semaphore,
}

impl SvgCompositor {
    pub fn new(config: CompositorConfig) -> Result<Self> {
        if config.max_concurrent_renders == 0 {
            return Err(Error::Config("max_concurrent_renders must be at least 1".into()));
        }

        let bytes = fs::read(&config.template_path).map_err(|e| {
            Error::TemplateMissing(format!("{}: {}", config.template_path.display(), e))
        })?;
        let template = raster::decode_template(&bytes)?;
        info!(
            template = %config.template_path.display(),
            width = template.width(),
            height = template.height(),
            "template loaded"
        );

        Ok(Self {
            template,
            fonts: FontLibrary::new(config.font_paths, config.load_system_fonts),
            permits: Semaphore::new(config.max_concurrent_renders),
        })
    }

    /// Pixel dimensions of the template, and therefore of every render.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.template.width(), self.template.height())
    }

    fn validate(request: &CertificateRequest) -> Result<()> {
        for (field, value) in [
            ("studentName", &request.student_name),
            ("ngoName", &request.ngo_name),
            ("contents", &request.contents),
            ("date", &request.date),
        ] {
            if value.trim().is_empty() {
                return Err(Error::Validation(field.to_string()));
            }
        }
        Ok(())
    }
}

impl Compositor for SvgCompositor {
    fn render(&self, request: &CertificateRequest) -> Result<CertificateImage> {
        Self::validate(request)?;

        // Permit count comes from config; one permit per in-flight rasterization.
        let _permit = futures::executor::block_on(self.permits.acquire())
            .map_err(|e| Error::Render(format!("render permit pool closed: {}", e)))?;

        let svg = overlay::build_overlay(
            request,
            &self.fonts,
            self.template.width(),
            self.template.height(),
        );
        debug!(bytes = svg.len(), "overlay built");

        raster::composite(self.template.clone(), &svg, self.fonts.database())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::FontPaths;
    use std::path::Path;

    fn write_template(dir: &Path) -> std::path::PathBuf {
        let mut pixmap = Pixmap::new(120, 80).expect("pixmap");
        pixmap.fill(tiny_skia::Color::from_rgba8(255, 255, 255, 255));
        let path = dir.join("template.png");
        fs::write(&path, pixmap.encode_png().expect("encode")).expect("write template");
        path
    }

    fn request() -> CertificateRequest {
        CertificateRequest {
            student_name: "Jane Doe".into(),
            ngo_name: "Helping Hands".into(),
            contents: "completed the volunteer program".into(),
            date: "2024-05-01".into(),
            ngo_signature: "J. Smith".into(),
        }
    }

    #[test]
    fn zero_permits_is_a_config_error() {
        let config = CompositorConfig {
            max_concurrent_renders: 0,
            ..Default::default()
        };
        assert!(matches!(SvgCompositor::new(config), Err(Error::Config(_))));
    }

    #[test]
    fn missing_template_is_reported() {
        let config = CompositorConfig {
            template_path: "definitely/missing.png".into(),
            ..Default::default()
        };
        assert!(matches!(
            SvgCompositor::new(config),
            Err(Error::TemplateMissing(_))
        ));
    }

    #[test]
    fn blank_required_field_names_the_field() {
        let mut bad = request();
        bad.date = "   ".into();
        match SvgCompositor::validate(&bad) {
            Err(Error::Validation(field)) => assert_eq!(field, "date"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn signature_is_never_validated() {
        let mut ok = request();
        ok.ngo_signature.clear();
        assert!(SvgCompositor::validate(&ok).is_ok());
    }

    #[test]
    fn renders_at_template_dimensions() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = CompositorConfig {
            template_path: write_template(dir.path()),
            font_paths: FontPaths::default(),
            load_system_fonts: false,
            max_concurrent_renders: 1,
        };
        let compositor = SvgCompositor::new(config).expect("compositor");
        assert_eq!(compositor.dimensions(), (120, 80));

        let image = compositor.render(&request()).expect("render");
        assert_eq!(image.width, 120);
        assert_eq!(image.height, 80);
    }
}

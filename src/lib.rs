//! Certpress
//!
//! Renders certificate images by compositing a fixed-layout SVG text overlay
//! onto a raster background template.
//!
//! # Features
//!
//! - **SVG Overlay Backend**: decodes the PNG template, merges the text
//!   overlay with resvg, re-encodes PNG bytes
//! - **Graceful Font Fallback**: missing decorative fonts degrade to generic
//!   families instead of failing the render
//! - **Bounded Renders**: peak memory is capped by a configurable permit pool
//!
//! # Example
//!
//! ```no_run
//! use certpress::{new_compositor, CertificateRequest, Compositor, CompositorConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let compositor = new_compositor(CompositorConfig::default())?;
//! let image = compositor.render(&CertificateRequest {
//!     student_name: "Jane Doe".to_string(),
//!     ngo_name: "Helping Hands".to_string(),
//!     contents: "completed the volunteer program".to_string(),
//!     date: "2024-05-01".to_string(),
//!     ngo_signature: "J. Smith".to_string(),
//! })?;
//! std::fs::write("certificate.png", &image.png_data)?;
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use serde::Deserialize;

pub mod error;
pub use error::{Error, Result};

pub mod fonts;
pub use fonts::{FontPaths, FontRole};

pub mod rendering;
pub use rendering::CertificateImage;

mod compositor;
pub use compositor::SvgCompositor;

// HTTP delivery surface (feature-gated)
#[cfg(feature = "server")]
pub mod server;

/// Configuration for the certificate compositor
///
/// Defaults point at the conventional asset layout and keep a single render
/// in flight at a time.
///
/// # Examples
///
/// ```
/// let config = certpress::CompositorConfig::default();
/// assert_eq!(config.max_concurrent_renders, 1);
/// assert!(config.load_system_fonts);
/// ```
#[derive(Debug, Clone)]
pub struct CompositorConfig {
    /// Background template PNG; its pixel size defines the output size
    pub template_path: PathBuf,
    /// Decorative font files, one per role
    pub font_paths: FontPaths,
    /// Whether system fonts back the generic fallback families
    pub load_system_fonts: bool,
    /// Upper bound on concurrent rasterizations (a memory cap, not a
    /// correctness requirement)
    pub max_concurrent_renders: usize,
}

impl Default for CompositorConfig {
    fn default() -> Self {
        Self {
            template_path: PathBuf::from("assets/template.png"),
            font_paths: FontPaths {
                display: Some(PathBuf::from("assets/fonts/PlaywriteRO-Regular.ttf")),
                body_script: Some(PathBuf::from("assets/fonts/DancingScript-Regular.ttf")),
                signature: Some(PathBuf::from("assets/fonts/GreatVibes-Regular.ttf")),
            },
            load_system_fonts: true,
            max_concurrent_renders: 1,
        }
    }
}

/// One certificate request. Field names mirror the JSON wire format, and
/// absent keys deserialize to empty strings so validation can name the
/// missing field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateRequest {
    /// Recipient name (required)
    #[serde(default)]
    pub student_name: String,
    /// Issuing organization name (required)
    #[serde(default)]
    pub ngo_name: String,
    /// Free-text body (required)
    #[serde(default)]
    pub contents: String,
    /// Displayable date text (required)
    #[serde(default)]
    pub date: String,
    /// Signature text; optional, renders empty when absent
    #[serde(default)]
    pub ngo_signature: String,
}

/// Core trait for certificate compositor implementations
pub trait Compositor: Send + Sync {
    /// Validate `request` and produce the encoded certificate image.
    fn render(&self, request: &CertificateRequest) -> Result<CertificateImage>;
}

/// Create a compositor with the default SVG overlay backend.
pub fn new_compositor(config: CompositorConfig) -> Result<impl Compositor> {
    SvgCompositor::new(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CompositorConfig::default();
        assert_eq!(config.max_concurrent_renders, 1);
        assert!(config.load_system_fonts);
        assert!(config.font_paths.display.is_some());
        assert!(config.font_paths.signature.is_some());
    }

    #[test]
    fn request_deserializes_from_camel_case() {
        let request: CertificateRequest = serde_json::from_str(
            r#"{"studentName":"Jane Doe","ngoName":"Helping Hands","contents":"completed the volunteer program","date":"2024-05-01","ngoSignature":"J. Smith"}"#,
        )
        .expect("deserialize");
        assert_eq!(request.student_name, "Jane Doe");
        assert_eq!(request.ngo_name, "Helping Hands");
        assert_eq!(request.ngo_signature, "J. Smith");
    }

    #[test]
    fn absent_fields_deserialize_empty() {
        let request: CertificateRequest =
            serde_json::from_str(r#"{"studentName":"Jane Doe"}"#).expect("deserialize");
        assert_eq!(request.student_name, "Jane Doe");
        assert!(request.ngo_signature.is_empty());
        assert!(request.date.is_empty());
    }
}

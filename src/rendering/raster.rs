//! Rasterization: merge the overlay onto the template and re-encode PNG.

use std::sync::Arc;

use resvg::usvg::{self, fontdb};
use tiny_skia::{Pixmap, Transform};

use crate::error::{Error, Result};
use crate::rendering::CertificateImage;

/// Decode the PNG template into the base-layer pixmap.
pub fn decode_template(png: &[u8]) -> Result<Pixmap> {
    Pixmap::decode_png(png)
        .map_err(|e| Error::TemplateMissing(format!("template PNG decode failed: {}", e)))
}

/// Render `overlay_svg` over `base` at the origin and encode the result.
///
/// The overlay is parsed with the shared font database so resolved families
/// and generic fallbacks are both honored.
pub fn composite(
    mut base: Pixmap,
    overlay_svg: &str,
    fontdb: Arc<fontdb::Database>,
) -> Result<CertificateImage> {
    let mut options = usvg::Options::default();
    options.fontdb = fontdb;

    let tree = usvg::Tree::from_str(overlay_svg, &options)
        .map_err(|e| Error::Render(format!("overlay parse failed: {}", e)))?;
    resvg::render(&tree, Transform::identity(), &mut base.as_mut());

    let png_data = base
        .encode_png()
        .map_err(|e| Error::Render(format!("PNG encoding failed: {}", e)))?;

    Ok(CertificateImage {
        width: base.width(),
        height: base.height(),
        png_data,
    })
}

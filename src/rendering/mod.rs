//! Overlay construction and rasterization

pub mod layout;
pub mod overlay;
pub mod raster;

/// A finished certificate render.
#[derive(Debug, Clone)]
pub struct CertificateImage {
    pub width: u32,
    pub height: u32,
    pub png_data: Vec<u8>,
}

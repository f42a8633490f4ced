//! Gazette PDF handling: download, keyword scan, page-image export.
//!
//! | Step | Module | Notes |
//! |------|--------|-------|
//! | Download | [`download`] | persists only confirmed `application/pdf` responses |
//! | Page scan + export | [`extract`] | text layer via `lopdf`, one rasterization pass |
//!
//! Rasterization sits behind the [`RenderPages`] seam so the page-window
//! logic is testable without a pdfium library on the machine. The
//! production implementation, [`PdfiumRenderer`], binds pdfium dynamically
//! (working directory first, then the system library path).

pub mod download;
pub mod extract;

pub use download::download_pdf;
pub use extract::extract_matching_pages;

use crate::error::PdfError;
use image::DynamicImage;
use pdfium_render::prelude::*;
use std::path::Path;
use tracing::debug;

/// One rasterization pass over a whole document.
///
/// Implementations render every page in order; the extractor then picks
/// the selected subset. Rendering the whole document once is deliberate:
/// partial rasterization is not portable across backends, and the pass is
/// skipped entirely when no page matched.
pub trait RenderPages {
    /// Render all pages of the document at `pdf_path`, in page order.
    fn render_all(&self, pdf_path: &Path) -> Result<Vec<DynamicImage>, PdfError>;
}

/// Renderer backed by a dynamically bound pdfium library.
#[derive(Debug)]
pub struct PdfiumRenderer {
    target_width: i32,
}

impl PdfiumRenderer {
    /// Renderer with a raster width suited for on-screen reading.
    pub fn new() -> Self {
        Self { target_width: 1240 }
    }
}

impl Default for PdfiumRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderPages for PdfiumRenderer {
    fn render_all(&self, pdf_path: &Path) -> Result<Vec<DynamicImage>, PdfError> {
        let bindings =
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
                .or_else(|_| Pdfium::bind_to_system_library())
                .map_err(|e| {
                    PdfError::Render(format!("failed to bind pdfium library: {e:?}"))
                })?;
        let pdfium = Pdfium::new(bindings);

        let document = pdfium
            .load_pdf_from_file(pdf_path, None)
            .map_err(|e| PdfError::Render(format!("{e:?}")))?;
        let render_config = PdfRenderConfig::new().set_target_width(self.target_width);

        let mut images = Vec::with_capacity(document.pages().len() as usize);
        for page in document.pages().iter() {
            let bitmap = page
                .render_with_config(&render_config)
                .map_err(|e| PdfError::Render(format!("{e:?}")))?;
            images.push(bitmap.as_image());
        }
        debug!(pages = images.len(), "Rasterized gazette document");
        Ok(images)
    }
}

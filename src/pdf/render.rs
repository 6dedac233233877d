//! Page rasterization with PDFium

use crate::error::{Error, Result};
use image::RgbImage;
use pdfium_render::prelude::*;
use std::io::Read;
use std::path::Path;

/// Bind a fresh PDFium instance (PDFium is not thread-safe, so each session owns one)
fn create_pdfium() -> Result<Pdfium> {
    let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| {
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(
                "/opt/pdfium/lib",
            ))
        })
        .or_else(|_| Pdfium::bind_to_system_library())
        .map_err(|e| Error::Pdfium {
            reason: format!("Failed to initialize PDFium: {}", e),
        })?;

    Ok(Pdfium::new(bindings))
}

fn map_pdfium_error(err: PdfiumError) -> Error {
    match err {
        PdfiumError::PdfiumLibraryInternalError(PdfiumInternalError::PasswordError) => {
            Error::PasswordRequired
        }
        _ => Error::Pdfium {
            reason: format!("{}", err),
        },
    }
}

/// Check that the path exists and starts with the `%PDF` magic
pub fn check_pdf_header<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(Error::PdfNotFound {
            path: path.display().to_string(),
        });
    }

    let mut header = [0u8; 4];
    let mut file = std::fs::File::open(path)?;
    let read = file.read(&mut header)?;
    if read < 4 || &header != b"%PDF" {
        return Err(Error::InvalidPdf {
            reason: format!("{} is not a valid PDF file", path.display()),
        });
    }

    Ok(())
}

/// Renders PDF pages to RGB bitmaps at a fixed scale factor
pub struct PageRenderer {
    pdfium: Pdfium,
    scale: f32,
}

impl PageRenderer {
    pub fn new(scale: f32) -> Result<Self> {
        Ok(Self {
            pdfium: create_pdfium()?,
            scale,
        })
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Render every page in order, handing each bitmap to `visit` with its
    /// 1-indexed page number. Stops at the first error.
    pub fn for_each_page<P, F>(&self, path: P, mut visit: F) -> Result<u32>
    where
        P: AsRef<Path>,
        F: FnMut(u32, &RgbImage) -> Result<()>,
    {
        let path = path.as_ref();
        check_pdf_header(path)?;

        let document = self
            .pdfium
            .load_pdf_from_file(path, None)
            .map_err(map_pdfium_error)?;

        let config = PdfRenderConfig::new().scale_page_by_factor(self.scale);
        let mut rendered = 0u32;

        for (index, page) in document.pages().iter().enumerate() {
            let page_num = index as u32 + 1;
            let bitmap = page
                .render_with_config(&config)
                .map_err(|e| Error::Pdfium {
                    reason: format!("Failed to render page {}: {}", page_num, e),
                })?;

            let image = bitmap.as_image().to_rgb8();
            tracing::trace!(
                page = page_num,
                width = image.width(),
                height = image.height(),
                "Rendered page"
            );

            visit(page_num, &image)?;
            rendered += 1;
        }

        Ok(rendered)
    }
}

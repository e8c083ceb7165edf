/// First-page PDF rasterization via pdfium.
///
/// Rasterization is CPU-bound, so it runs inside `spawn_blocking` and
/// never stalls the UI thread. Each call binds its own pdfium instance:
/// the bindings are not thread-safe, and thumbnails are rendered rarely
/// enough that reloading the library is not worth sharing state over.
use pdfium_render::prelude::*;

use super::Thumbnail;

/// Fixed scale factor for first-page thumbnails.
const THUMBNAIL_SCALE: f32 = 0.5;

#[derive(Debug, thiserror::Error)]
pub enum PdfError {
    #[error("pdfium library unavailable: {0}")]
    LibraryUnavailable(String),

    #[error("pdf rendering failed: {0:?}")]
    Render(PdfiumError),

    #[error("rasterizer task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl From<PdfiumError> for PdfError {
    fn from(err: PdfiumError) -> Self {
        Self::Render(err)
    }
}

/// Render page 1 of `bytes` at the fixed thumbnail scale.
///
/// The output surface takes the dimensions of the scaled page viewport,
/// whatever the page's aspect ratio.
pub async fn rasterize_first_page(bytes: Vec<u8>) -> Result<Thumbnail, PdfError> {
    tokio::task::spawn_blocking(move || rasterize_blocking(&bytes)).await?
}

fn rasterize_blocking(bytes: &[u8]) -> Result<Thumbnail, PdfError> {
    let pdfium = load_pdfium()?;

    let document = pdfium.load_pdf_from_byte_slice(bytes, None)?;
    let page = document.pages().first()?;

    let config = PdfRenderConfig::new().scale_page_by_factor(THUMBNAIL_SCALE);
    let rendered = page.render_with_config(&config)?.as_image().into_rgba8();

    Ok(Thumbnail {
        width: rendered.width(),
        height: rendered.height(),
        rgba: rendered.into_raw(),
    })
}

/// Bind to the pdfium dynamic library.
///
/// Search order: `lib/` in the working directory (development), `lib/`
/// next to the executable, then the system library.
fn load_pdfium() -> Result<Pdfium, PdfError> {
    for dir in library_search_dirs() {
        let name = Pdfium::pdfium_platform_library_name_at_path(&dir);
        if let Ok(bindings) = Pdfium::bind_to_library(&name) {
            return Ok(Pdfium::new(bindings));
        }
    }

    Pdfium::bind_to_system_library()
        .map(Pdfium::new)
        .map_err(|e| PdfError::LibraryUnavailable(format!("{e:?}")))
}

fn library_search_dirs() -> Vec<String> {
    let mut dirs = vec!["./lib/".to_owned()];

    if let Ok(exe) = std::env::current_exe() {
        if let Some(parent) = exe.parent() {
            dirs.push(format!("{}/lib/", parent.display()));
        }
    }

    dirs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn garbage_bytes_fail_without_panicking() {
        // Whether pdfium is installed or not, a nonsense document must
        // come back as an error, never a crash.
        let result = rasterize_first_page(b"not a pdf".to_vec()).await;
        assert!(result.is_err());
    }
}

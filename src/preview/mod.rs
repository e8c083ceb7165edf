/// Preview resolution and thumbnail generation
///
/// This module handles:
/// - Mapping a filename to a rendering strategy by extension (pure)
/// - Fetching image bytes and decoding them for inline previews
/// - Rasterizing the first page of PDFs into thumbnails (pdf.rs)
///
/// Resolution is deterministic and side-effect free; all network and
/// CPU work happens in `load_thumbnail`, one independent task per file.

pub mod pdf;

use crate::net::{self, NetError};

/// How a file should be previewed, derived from its extension.
/// Recomputed on every render, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewDescriptor {
    /// jpg/jpeg/png: fetch and show the image itself.
    Image { url: String },
    /// pdf: blank surface now, first-page thumbnail filled in later.
    PdfPlaceholder { url: String },
    /// Everything else (including no extension): a fixed document glyph.
    GenericIcon,
}

/// Decoded RGBA pixels ready to hand to the GUI layer.
#[derive(Debug, Clone)]
pub struct Thumbnail {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// `resolvePreview(subject, filename)`: extension matching is
/// case-insensitive on the substring after the last `.`; a filename
/// with no dot has no extension and falls through to the icon.
pub fn resolve_preview(base: &str, subject: &str, file_name: &str) -> PreviewDescriptor {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" | "png" => PreviewDescriptor::Image {
            url: net::file_url(base, subject, file_name),
        },
        "pdf" => PreviewDescriptor::PdfPlaceholder {
            url: net::file_url(base, subject, file_name),
        },
        _ => PreviewDescriptor::GenericIcon,
    }
}

/// Errors from materializing a single preview. Each failure is isolated
/// to its own file; siblings keep rendering.
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    #[error(transparent)]
    Net(#[from] NetError),

    #[error("image decoding failed: {0}")]
    Decode(#[from] image::ImageError),

    #[error(transparent)]
    Pdf(#[from] pdf::PdfError),
}

/// Materialize the thumbnail for one file, if its descriptor calls for
/// one. `GenericIcon` needs no work and resolves to `None` immediately.
pub async fn load_thumbnail(
    descriptor: PreviewDescriptor,
) -> Result<Option<Thumbnail>, PreviewError> {
    match descriptor {
        PreviewDescriptor::Image { url } => {
            let bytes = net::fetch_bytes(&url).await?;
            let decoded = image::load_from_memory(&bytes)?.into_rgba8();

            Ok(Some(Thumbnail {
                width: decoded.width(),
                height: decoded.height(),
                rgba: decoded.into_raw(),
            }))
        }
        PreviewDescriptor::PdfPlaceholder { url } => {
            let bytes = net::fetch_bytes(&url).await?;
            let thumbnail = pdf::rasterize_first_page(bytes).await?;

            Ok(Some(thumbnail))
        }
        PreviewDescriptor::GenericIcon => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://127.0.0.1:5000";

    fn resolve(file_name: &str) -> PreviewDescriptor {
        resolve_preview(BASE, "DS", file_name)
    }

    #[test]
    fn image_extensions_resolve_to_inline_images() {
        for name in ["a.JPG", "b.jpeg", "c.png"] {
            match resolve(name) {
                PreviewDescriptor::Image { url } => {
                    assert_eq!(url, net::file_url(BASE, "DS", name));
                }
                other => panic!("{name} resolved to {other:?}"),
            }
        }
    }

    #[test]
    fn pdf_resolves_to_placeholder_case_insensitively() {
        assert_eq!(
            resolve("d.PDF"),
            PreviewDescriptor::PdfPlaceholder {
                url: net::file_url(BASE, "DS", "d.PDF"),
            }
        );
    }

    #[test]
    fn unknown_extensions_fall_back_to_the_icon() {
        assert_eq!(resolve("e.txt"), PreviewDescriptor::GenericIcon);
        assert_eq!(resolve("report.docx"), PreviewDescriptor::GenericIcon);
    }

    #[test]
    fn no_extension_means_no_preview() {
        assert_eq!(resolve("noext"), PreviewDescriptor::GenericIcon);
    }

    #[test]
    fn only_the_last_extension_counts() {
        // .tar.gz has extension "gz", not "tar.gz".
        assert_eq!(resolve("f.tar.gz"), PreviewDescriptor::GenericIcon);
    }
}

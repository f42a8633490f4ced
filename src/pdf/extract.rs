//! Keyword scan over the gazette's text layer and page-image export.
//!
//! The scan walks the document page by page (0-indexed). The first keyword
//! found on a page wins for that page and expands the selection by the
//! page window {index − 1, index, index + 1}, clipped to the document
//! bounds. Windows from adjacent matches merge through the set, so
//! overlapping neighbors never produce duplicate files. Pages without an
//! extractable text layer (scanned pages) are skipped, not errors.
//!
//! Rasterization happens once for the whole document and only when at
//! least one page was selected; an empty selection returns before any
//! rendering cost is paid. Exported images are named `page_<n>.png` with
//! `n` the 1-based page number.

use crate::error::PdfError;
use crate::keywords::KeywordSet;
use crate::pdf::RenderPages;
use lopdf::Document;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// Scan the PDF for keyword pages and export the selected page window as
/// PNG images under `output_dir`.
///
/// Returns the paths of the written images, ascending by page number;
/// empty when no page matched. The output directory is only created when
/// there is something to write.
#[instrument(level = "info", skip(keywords, renderer), fields(pdf = %pdf_path.display()))]
pub fn extract_matching_pages(
    pdf_path: &Path,
    keywords: &KeywordSet,
    output_dir: &Path,
    renderer: &dyn RenderPages,
) -> Result<Vec<PathBuf>, PdfError> {
    let document = Document::load(pdf_path)?;
    let page_numbers: Vec<u32> = document.get_pages().keys().copied().collect();
    let page_count = page_numbers.len();

    let selection = select_pages(&document, &page_numbers, keywords);
    drop(document);

    if selection.is_empty() {
        info!(page_count, "No keyword matches in gazette; skipping rasterization");
        return Ok(Vec::new());
    }

    info!(
        page_count,
        selected = selection.len(),
        "Rasterizing gazette for matched pages"
    );
    let images = renderer.render_all(pdf_path)?;
    fs::create_dir_all(output_dir)?;

    let mut saved = Vec::new();
    for index in selection {
        let Some(image) = images.get(index) else {
            warn!(index, rendered = images.len(), "Selected page missing from raster pass");
            continue;
        };
        let image_path = output_dir.join(format!("page_{}.png", index + 1));
        image.save_with_format(&image_path, image::ImageFormat::Png)?;
        debug!(path = %image_path.display(), "Saved page image");
        saved.push(image_path);
    }

    info!(count = saved.len(), "Exported gazette page images");
    Ok(saved)
}

/// 0-based indices of pages to export: every keyword page plus its
/// immediate neighbors, clipped to `[0, page_count)`.
fn select_pages(
    document: &Document,
    page_numbers: &[u32],
    keywords: &KeywordSet,
) -> BTreeSet<usize> {
    let mut selected = BTreeSet::new();
    let last = page_numbers.len().saturating_sub(1);

    for (index, page_number) in page_numbers.iter().enumerate() {
        let text = match document.extract_text(&[*page_number]) {
            Ok(text) => text,
            Err(e) => {
                debug!(index, error = %e, "Page has no extractable text; skipping");
                continue;
            }
        };
        if text.trim().is_empty() {
            continue;
        }
        if let Some(keyword) = keywords.find_in_text(&text) {
            debug!(index, keyword, "Keyword found on page");
            for neighbor in index.saturating_sub(1)..=(index + 1).min(last) {
                selected.insert(neighbor);
            }
        }
    }

    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::DynamicImage;
    use lopdf::content::{Content, Operation};
    use lopdf::{Document, Object, Stream, dictionary};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    /// Minimal single-font PDF with one text line per page.
    fn build_pdf(pages: &[&str]) -> Document {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![50.into(), 700.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc
    }

    fn write_pdf(dir: &TempDir, pages: &[&str]) -> PathBuf {
        let path = dir.path().join("gazette.pdf");
        build_pdf(pages).save(&path).unwrap();
        path
    }

    /// Renderer producing one tiny blank image per requested page.
    struct StubRenderer {
        pages: usize,
    }

    impl RenderPages for StubRenderer {
        fn render_all(&self, _pdf_path: &Path) -> Result<Vec<DynamicImage>, PdfError> {
            Ok((0..self.pages).map(|_| DynamicImage::new_rgb8(8, 8)).collect())
        }
    }

    /// Renderer that fails the test if the raster pass is ever reached.
    struct ForbiddenRenderer;

    impl RenderPages for ForbiddenRenderer {
        fn render_all(&self, _pdf_path: &Path) -> Result<Vec<DynamicImage>, PdfError> {
            Err(PdfError::Render("rasterization must not run".to_string()))
        }
    }

    fn keywords() -> KeywordSet {
        KeywordSet::new(["Wegner"]).unwrap()
    }

    fn file_names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn match_in_document_middle_exports_page_window() {
        let dir = TempDir::new().unwrap();
        let mut pages = vec!["Bekanntmachung ohne Treffer"; 10];
        pages[5] = "Anordnung betreffend Wegner vom 3. Juni";
        let pdf = write_pdf(&dir, &pages);

        let out = dir.path().join("images");
        let saved =
            extract_matching_pages(&pdf, &keywords(), &out, &StubRenderer { pages: 10 }).unwrap();

        assert_eq!(
            file_names(&saved),
            vec!["page_5.png", "page_6.png", "page_7.png"]
        );
        for path in &saved {
            assert!(path.exists());
        }
        assert!(!out.join("page_4.png").exists());
        assert!(!out.join("page_8.png").exists());
    }

    #[test]
    fn match_on_first_page_clips_left_neighbor() {
        let dir = TempDir::new().unwrap();
        let pdf = write_pdf(&dir, &["Wegner eröffnet", "nichts", "nichts"]);

        let out = dir.path().join("images");
        let saved =
            extract_matching_pages(&pdf, &keywords(), &out, &StubRenderer { pages: 3 }).unwrap();

        assert_eq!(file_names(&saved), vec!["page_1.png", "page_2.png"]);
    }

    #[test]
    fn match_on_last_page_clips_right_neighbor() {
        let dir = TempDir::new().unwrap();
        let pdf = write_pdf(&dir, &["nichts", "nichts", "Termin mit Wegner"]);

        let out = dir.path().join("images");
        let saved =
            extract_matching_pages(&pdf, &keywords(), &out, &StubRenderer { pages: 3 }).unwrap();

        assert_eq!(file_names(&saved), vec!["page_2.png", "page_3.png"]);
    }

    #[test]
    fn adjacent_matches_merge_without_duplicates() {
        let dir = TempDir::new().unwrap();
        let pdf = write_pdf(
            &dir,
            &["nichts", "Wegner hier", "Wegner dort", "nichts", "nichts"],
        );

        let out = dir.path().join("images");
        let saved =
            extract_matching_pages(&pdf, &keywords(), &out, &StubRenderer { pages: 5 }).unwrap();

        assert_eq!(
            file_names(&saved),
            vec!["page_1.png", "page_2.png", "page_3.png", "page_4.png"]
        );
    }

    #[test]
    fn no_match_means_no_rasterization_and_no_files() {
        let dir = TempDir::new().unwrap();
        let pdf = write_pdf(&dir, &["nichts", "gar nichts", "immer noch nichts"]);

        let out = dir.path().join("images");
        // ForbiddenRenderer errors when called; Ok(empty) proves the early
        // return happened before the raster pass.
        let saved = extract_matching_pages(&pdf, &keywords(), &out, &ForbiddenRenderer).unwrap();

        assert!(saved.is_empty());
        assert!(!out.exists());
    }

    #[test]
    fn keyword_inside_compound_word_does_not_select_page() {
        let dir = TempDir::new().unwrap();
        let pdf = write_pdf(&dir, &["Umbau der Wegnerstra\u{df}e", "nichts"]);

        let out = dir.path().join("images");
        let saved = extract_matching_pages(&pdf, &keywords(), &out, &ForbiddenRenderer).unwrap();
        assert!(saved.is_empty());
    }
}

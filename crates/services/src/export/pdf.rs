use std::path::PathBuf;

use async_trait::async_trait;
use eco_core::scoring::category_color;
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Polygon, Rgb,
};

use super::{DocumentExporter, ExportDocument};
use crate::error::ExportError;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 20.0;
const BAR_MAX_WIDTH: f32 = 110.0;
const BAR_HEIGHT: f32 = 6.0;
const LABEL_WIDTH: f32 = 40.0;

fn render<E: core::fmt::Display>(e: E) -> ExportError {
    ExportError::Render(e.to_string())
}

/// Writes A4 PDFs into a fixed directory.
#[derive(Debug, Clone)]
pub struct PdfExporter {
    output_dir: PathBuf,
}

impl PdfExporter {
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }
}

#[async_trait]
impl DocumentExporter for PdfExporter {
    async fn export(
        &self,
        document: &ExportDocument,
        file_name: &str,
    ) -> Result<PathBuf, ExportError> {
        let bytes = render_pdf(document)?;
        tokio::fs::create_dir_all(&self.output_dir).await?;
        let path = self.output_dir.join(file_name);
        tokio::fs::write(&path, bytes).await?;
        Ok(path)
    }
}

/// Render the document to PDF bytes.
///
/// # Errors
///
/// Returns `ExportError::Render` if the PDF cannot be built.
pub fn render_pdf(document: &ExportDocument) -> Result<Vec<u8>, ExportError> {
    let (doc, page, layer) =
        PdfDocument::new(&document.title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Result");
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(render)?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(render)?;
    let layer = doc.get_page(page).get_layer(layer);

    let mut writer = PageWriter {
        doc: &doc,
        layer,
        regular,
        bold,
        y: PAGE_HEIGHT - MARGIN,
    };

    let report = &document.report;
    writer.text(&document.title, 20.0, true);
    writer.text(
        &format!(
            "Generated {}",
            document.generated_at.format("%Y-%m-%d %H:%M UTC")
        ),
        9.0,
        false,
    );
    writer.gap(4.0);
    writer.text(
        &format!("Your estimated footprint is {} kg of CO2 per month.", report.total),
        12.0,
        false,
    );
    writer.text(report.feedback, 12.0, true);
    writer.gap(4.0);

    writer.text("Score by category", 14.0, true);
    let max = report
        .categories
        .iter()
        .map(|c| c.score)
        .max()
        .unwrap_or(0);
    for (index, category) in report.categories.iter().enumerate() {
        writer.bar(&category.category, category.score, max, category_color(index));
    }
    writer.gap(4.0);

    if !report.tips.is_empty() {
        writer.text("Sustainability tips", 14.0, true);
        for tip in &report.tips {
            writer.text(&format!("- {tip}"), 11.0, false);
        }
        writer.gap(4.0);
    }

    if !document.history.is_empty() {
        writer.text("Result history", 14.0, true);
        for entry in &document.history {
            writer.text(
                &format!("{}: {} kg CO2", entry.display_timestamp(), entry.total()),
                11.0,
                false,
            );
        }
    }

    doc.save_to_bytes().map_err(render)
}

struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    y: f32,
}

impl PageWriter<'_> {
    fn ensure_room(&mut self, height: f32) {
        if self.y - height >= MARGIN {
            return;
        }
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Result (cont.)");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT - MARGIN;
    }

    fn gap(&mut self, height: f32) {
        self.y -= height;
    }

    fn text(&mut self, text: &str, size: f32, bold: bool) {
        // 1pt = 0.3528mm; leave half a line of leading.
        let line_height = size * 0.3528 * 1.5;
        self.ensure_room(line_height);
        self.y -= line_height;
        let font = if bold { &self.bold } else { &self.regular };
        self.layer.use_text(text, size, Mm(MARGIN), Mm(self.y), font);
    }

    fn bar(&mut self, label: &str, score: u32, max: u32, color: &str) {
        let row_height = BAR_HEIGHT + 3.0;
        self.ensure_room(row_height);
        self.y -= row_height;

        self.layer
            .use_text(label, 10.0, Mm(MARGIN), Mm(self.y + 1.5), &self.regular);

        let width = if max == 0 {
            0.0
        } else {
            BAR_MAX_WIDTH * (score as f32) / (max as f32)
        };
        let left = MARGIN + LABEL_WIDTH;
        if width > 0.0 {
            let (r, g, b) = hex_to_rgb(color);
            self.layer
                .set_fill_color(Color::Rgb(Rgb::new(r, g, b, None)));
            let corner = |x: f32, y: f32| (Point::new(Mm(x), Mm(y)), false);
            self.layer.add_polygon(Polygon {
                rings: vec![vec![
                    corner(left, self.y),
                    corner(left + width, self.y),
                    corner(left + width, self.y + BAR_HEIGHT),
                    corner(left, self.y + BAR_HEIGHT),
                ]],
                mode: PaintMode::Fill,
                winding_order: WindingOrder::NonZero,
            });
            self.layer
                .set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
        }

        self.layer.use_text(
            score.to_string(),
            10.0,
            Mm(left + width + 2.0),
            Mm(self.y + 1.5),
            &self.regular,
        );
    }
}

/// `#RRGGBB` to unit channels; anything else is black.
fn hex_to_rgb(hex: &str) -> (f32, f32, f32) {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return (0.0, 0.0, 0.0);
    }
    let channel = |range: std::ops::Range<usize>| {
        digits
            .get(range)
            .and_then(|part| u8::from_str_radix(part, 16).ok())
            .map_or(0.0, |value| f32::from(value) / 255.0)
    };
    (channel(0..2), channel(2..4), channel(4..6))
}

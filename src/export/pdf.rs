//! Single-record PDF report.
//!
//! Fixed layout: title band, id/risk/location lines, first staged image when
//! present and decodable, then the full analysis text reflowed over as many
//! pages as needed. Builtin Helvetica only, so text is limited to a
//! single-byte character set; anything outside it is replaced. A missing or
//! unreadable image degrades to a text-only report, never an error.

use crate::error::{ArborError, Result};
use crate::store::InspectionRecord;
use printpdf::*;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 15.0;
const LINE_HEIGHT_MM: f32 = 5.0;
const BODY_WRAP_CHARS: usize = 95;
const IMAGE_MAX_WIDTH_MM: f32 = 120.0;
const IMAGE_MAX_HEIGHT_MM: f32 = 90.0;
const IMAGE_DPI: f32 = 300.0;

/// Replace characters the builtin WinAnsi font cannot encode. Lossy for
/// non-Latin text.
fn to_latin1(text: &str) -> String {
    text.chars()
        .map(|c| match c as u32 {
            0x20..=0x7e | 0xa0..=0xff => c,
            _ => '?',
        })
        .collect()
}

fn wrap_line(line: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    for word in line.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            out.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        // an over-long word becomes its own line rather than overflowing
        current.push_str(word);
    }
    if !current.is_empty() {
        out.push(current);
    }
    if out.is_empty() {
        out.push(String::new());
    }
    out
}

fn reflow(text: &str, width: usize) -> Vec<String> {
    text.lines().flat_map(|line| wrap_line(line, width)).collect()
}

/// Try to load the record's first image for embedding. Any failure here is
/// tolerated: the report renders without the image.
fn load_first_image(record: &InspectionRecord) -> Option<Image> {
    let path = record.image_paths.first()?;
    let dyn_img = image_crate::open(Path::new(path)).ok()?;
    let rgb = image_crate::DynamicImage::ImageRgb8(dyn_img.to_rgb8());
    Some(Image::from_dynamic_image(&rgb))
}

fn px_to_mm(px: usize) -> f32 {
    px as f32 * 25.4 / IMAGE_DPI
}

pub fn generate_pdf(record: &InspectionRecord, output_path: &Path, title: &str) -> Result<()> {
    let (doc, page1, layer1) = PdfDocument::new(
        to_latin1(title),
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ArborError::PdfGeneration(format!("font: {:?}", e)))?;
    let font_bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ArborError::PdfGeneration(format!("font: {:?}", e)))?;

    let mut layer = doc.get_page(page1).get_layer(layer1);
    let mut y = PAGE_HEIGHT_MM - MARGIN_MM;

    // title band
    layer.use_text(to_latin1(title), 16.0, Mm(MARGIN_MM), Mm(y), &font_bold);
    y -= 10.0;

    let header = format!("Record #{}  |  Risk: {}", record.id, record.risk);
    layer.use_text(to_latin1(&header), 11.0, Mm(MARGIN_MM), Mm(y), &font_bold);
    y -= LINE_HEIGHT_MM + 2.0;
    layer.use_text(
        to_latin1(&format!("Location: {}", record.location)),
        10.0,
        Mm(MARGIN_MM),
        Mm(y),
        &font,
    );
    y -= LINE_HEIGHT_MM;
    layer.use_text(
        to_latin1(&format!("Date: {}", record.timestamp)),
        10.0,
        Mm(MARGIN_MM),
        Mm(y),
        &font,
    );
    y -= LINE_HEIGHT_MM + 3.0;

    if let Some(image) = load_first_image(record) {
        let native_w = px_to_mm(image.image.width.0);
        let native_h = px_to_mm(image.image.height.0);
        let scale = (IMAGE_MAX_WIDTH_MM / native_w)
            .min(IMAGE_MAX_HEIGHT_MM / native_h)
            .min(1.0);
        let height_mm = native_h * scale;
        y -= height_mm;
        image.add_to_layer(
            layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(MARGIN_MM)),
                translate_y: Some(Mm(y)),
                scale_x: Some(scale),
                scale_y: Some(scale),
                dpi: Some(IMAGE_DPI),
                ..Default::default()
            },
        );
        y -= 8.0;
    }

    // analysis body, reflowed across pages
    for line in reflow(&record.analysis, BODY_WRAP_CHARS) {
        if y < MARGIN_MM {
            let (page, new_layer) = doc.add_page(
                Mm(PAGE_WIDTH_MM),
                Mm(PAGE_HEIGHT_MM),
                "Layer 1",
            );
            layer = doc.get_page(page).get_layer(new_layer);
            y = PAGE_HEIGHT_MM - MARGIN_MM;
        }
        layer.use_text(to_latin1(&line), 10.0, Mm(MARGIN_MM), Mm(y), &font);
        y -= LINE_HEIGHT_MM;
    }

    let file = File::create(output_path)?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|e| ArborError::PdfGeneration(format!("save: {:?}", e)))?;

    Ok(())
}

/// Default output file name for a record's report.
pub fn report_file_name(record_id: i64) -> String {
    format!("informe_{}.pdf", record_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_latin1_replaces_unsupported() {
        assert_eq!(to_latin1("abc"), "abc");
        assert_eq!(to_latin1("café"), "café");
        assert_eq!(to_latin1("риск 高"), "???? ?");
    }

    #[test]
    fn test_wrap_respects_width() {
        let lines = wrap_line("one two three four five six seven", 12);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.chars().count() <= 13);
        }
    }

    #[test]
    fn test_reflow_keeps_paragraph_breaks() {
        let lines = reflow("first paragraph\n\nsecond", 80);
        assert_eq!(lines, vec!["first paragraph", "", "second"]);
    }

    #[test]
    fn test_report_file_name() {
        assert_eq!(report_file_name(7), "informe_7.pdf");
    }
}

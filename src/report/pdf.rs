use chrono::{DateTime, Local};
use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};

use crate::{error::ReportError, stock::aggregate::PairedDisplay};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 20.0;
const LAYER: &str = "Layer 1";

const TITLE_SIZE: f32 = 18.0;
const HEADING_SIZE: f32 = 13.0;
const TEXT_SIZE: f32 = 11.0;

struct PageWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    y: f32,
}

impl PageWriter {
    fn new(title: &str) -> Result<Self, ReportError> {
        let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER);
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
        let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;
        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            y: PAGE_HEIGHT - MARGIN,
        })
    }

    fn line(&mut self, text: &str, size: f32, bold: bool, indent: f32) {
        // pt -> mm plus some leading
        let advance = size * 0.3528 * 1.4;
        if self.y - advance < MARGIN {
            let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER);
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT - MARGIN;
        }

        self.y -= advance;
        let font = if bold { &self.bold } else { &self.regular };
        self.layer
            .use_text(text, size, Mm(MARGIN + indent), Mm(self.y), font);
    }

    fn gap(&mut self) {
        self.y -= TEXT_SIZE * 0.3528;
    }

    fn finish(self) -> Result<Vec<u8>, ReportError> {
        Ok(self.doc.save_to_bytes()?)
    }
}

/// Cellar run sheet: one block per section and backbar pair, one line
/// per spirit with the boxes and loose bottles to bring up.
pub fn render(paired: &PairedDisplay, generated: DateTime<Local>) -> Result<Vec<u8>, ReportError> {
    let mut writer = PageWriter::new("Cellar Run")?;

    writer.line("Cellar Run", TITLE_SIZE, true, 0.0);
    writer.line(
        &generated.format("%d/%m/%Y %H:%M").to_string(),
        TEXT_SIZE,
        false,
        0.0,
    );
    writer.gap();

    if paired.is_empty() {
        writer.line("Nothing counted.", TEXT_SIZE, false, 0.0);
    }

    for (pair, spirits) in paired {
        writer.line(
            &format!("{} - Backbars {}", pair.section, pair.label()),
            HEADING_SIZE,
            true,
            0.0,
        );

        for (spirit, quantity) in spirits {
            writer.line(&format!("{spirit}: {quantity}"), TEXT_SIZE, false, 5.0);
        }
        writer.gap();
    }

    writer.finish()
}

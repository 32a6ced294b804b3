use crate::domain::model::{Decoded, Part};
use crate::domain::ports::PartCodec;
use crate::utils::error::{Result, ShopError};
use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str};
use serde::{Deserialize, Serialize};

const REGULAR_FONT: Name<'static> = Name(b"F1");
const BOLD_FONT: Name<'static> = Name(b"F2");

/// Page geometry and typography for the printable export. Units are PDF
/// points; the defaults describe a US-Letter page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfLayout {
    pub title: String,
    pub font_size: f32,
    pub leading: f32,
    pub margin_left: f32,
    pub start_y: f32,
    pub bottom_margin: f32,
    pub page_width: f32,
    pub page_height: f32,
}

impl Default for PdfLayout {
    fn default() -> Self {
        Self {
            title: "Computer Parts List".to_string(),
            font_size: 12.0,
            leading: 14.5,
            margin_left: 25.0,
            start_y: 700.0,
            bottom_margin: 40.0,
            page_width: 612.0,
            page_height: 792.0,
        }
    }
}

impl PdfLayout {
    /// Number of text lines that fit between `start_y` and the bottom margin.
    pub fn lines_per_page(&self) -> usize {
        if self.leading <= 0.0 || self.start_y <= self.bottom_margin {
            return 1;
        }
        ((self.start_y - self.bottom_margin) / self.leading).floor() as usize + 1
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PdfLine {
    pub text: String,
    pub bold: bool,
}

impl PdfLine {
    fn regular(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
        }
    }

    fn blank() -> Self {
        Self::regular("")
    }
}

/// Splits the export into pages. The title opens the first page and a
/// record's three lines always stay on one page.
pub fn paginate(parts: &[Part], layout: &PdfLayout) -> Vec<Vec<PdfLine>> {
    let capacity = layout.lines_per_page().max(3);
    let mut pages = Vec::new();
    let mut page = vec![
        PdfLine {
            text: layout.title.clone(),
            bold: true,
        },
        PdfLine::blank(),
    ];

    for part in parts {
        if page.len() + 3 > capacity {
            pages.push(std::mem::take(&mut page));
        }
        page.push(PdfLine::regular(format!("Name: {}", part.name)));
        page.push(PdfLine::regular(format!("Price: ${}", part.price)));
        page.push(PdfLine::regular(format!("Quantity: {}", part.quantity)));
        page.push(PdfLine::blank());
    }

    pages.push(page);
    pages
}

/// Save-only printable listing built on the standard Helvetica fonts.
#[derive(Debug, Clone, Default)]
pub struct PdfCodec {
    layout: PdfLayout,
}

impl PdfCodec {
    pub fn new(layout: PdfLayout) -> Self {
        Self { layout }
    }

    fn render_page(&self, lines: &[PdfLine]) -> Vec<u8> {
        let mut content = Content::new();
        content.begin_text();
        content.set_leading(self.layout.leading);
        content.next_line(self.layout.margin_left, self.layout.start_y);

        let mut current_bold = None;
        for line in lines {
            if !line.text.is_empty() {
                if current_bold != Some(line.bold) {
                    let font = if line.bold { BOLD_FONT } else { REGULAR_FONT };
                    content.set_font(font, self.layout.font_size);
                    current_bold = Some(line.bold);
                }
                content.show(Str(&to_standard_encoding(&line.text)));
            }
            content.next_line_using_leading();
        }

        content.end_text();
        content.finish()
    }
}

impl PartCodec for PdfCodec {
    fn extension(&self) -> &'static str {
        "pdf"
    }

    fn can_load(&self) -> bool {
        false
    }

    fn decode(&self, _data: &[u8]) -> Result<Decoded> {
        Err(ShopError::LoadNotSupported {
            extension: self.extension().to_string(),
        })
    }

    fn encode(&self, parts: &[Part]) -> Result<Vec<u8>> {
        let pages = paginate(parts, &self.layout);

        let catalog_id = Ref::new(1);
        let page_tree_id = Ref::new(2);
        let regular_id = Ref::new(3);
        let bold_id = Ref::new(4);
        let page_ids: Vec<(Ref, Ref)> = (0..pages.len() as i32)
            .map(|i| (Ref::new(5 + 2 * i), Ref::new(6 + 2 * i)))
            .collect();

        let mut pdf = Pdf::new();
        pdf.catalog(catalog_id).pages(page_tree_id);
        pdf.pages(page_tree_id)
            .kids(page_ids.iter().map(|(page_id, _)| *page_id))
            .count(pages.len() as i32);

        pdf.type1_font(regular_id).base_font(Name(b"Helvetica"));
        pdf.type1_font(bold_id).base_font(Name(b"Helvetica-Bold"));

        let media_box = Rect::new(0.0, 0.0, self.layout.page_width, self.layout.page_height);
        for (lines, (page_id, content_id)) in pages.iter().zip(&page_ids) {
            let mut page = pdf.page(*page_id);
            page.media_box(media_box);
            page.parent(page_tree_id);
            page.contents(*content_id);
            page.resources()
                .fonts()
                .pair(REGULAR_FONT, regular_id)
                .pair(BOLD_FONT, bold_id);
            page.finish();

            let stream = self.render_page(lines);
            pdf.stream(*content_id, &stream);
        }

        tracing::debug!("Rendered {} record(s) on {} PDF page(s)", parts.len(), pages.len());
        Ok(pdf.finish())
    }
}

// The standard-14 fonts only cover single-byte text; anything outside
// printable ASCII becomes '?'.
fn to_standard_encoding(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| {
            if c == ' ' || c.is_ascii_graphic() {
                c as u8
            } else {
                b'?'
            }
        })
        .collect()
}

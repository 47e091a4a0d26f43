//! Printable PDF timetables (export only).
//!
//! The document is laid out as a fixed-width table on A4 pages using the
//! standard Courier font, which every PDF viewer carries, so no font data is
//! embedded. Object layout:
//!
//! | id        | object                      |
//! |-----------|-----------------------------|
//! | 1         | catalog                     |
//! | 2         | page tree                   |
//! | 3         | Courier, `WinAnsiEncoding`  |
//! | 4 + 2i    | page `i`                    |
//! | 5 + 2i    | content stream of page `i`  |

use std::io::Write;

use sched_core::{Codec, Lecture, ScheduleResult, weekday_name};

const PAGE_WIDTH: u32 = 595;
const PAGE_HEIGHT: u32 = 842;
const MARGIN: u32 = 50;
const TITLE: &str = "Lecture Information";
const TITLE_SIZE: u32 = 12;
const BODY_SIZE: u32 = 8;
const LEADING: u32 = 12;
const ROWS_PER_PAGE: usize = 55;

/// Column headings and their widths in characters.
const COLUMNS: [(&str, usize); 8] = [
    ("Subject", 22),
    ("Type", 8),
    ("Professor", 18),
    ("Groups", 14),
    ("Day", 10),
    ("Start", 5),
    ("End", 5),
    ("Classroom", 14),
];

/// Export-only codec for `.pdf` files.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfCodec;

impl Codec for PdfCodec {
    fn export(&self, lectures: &[Lecture], out: &mut dyn Write) -> ScheduleResult<()> {
        let pages: Vec<&[Lecture]> = if lectures.is_empty() {
            vec![lectures]
        } else {
            lectures.chunks(ROWS_PER_PAGE).collect()
        };
        let page_count = pages.len();

        let mut doc = PdfBuilder::new();
        doc.object(b"<< /Type /Catalog /Pages 2 0 R >>");
        let kids: Vec<String> = (0..page_count).map(|i| format!("{} 0 R", 4 + 2 * i)).collect();
        doc.object(
            format!("<< /Type /Pages /Kids [{}] /Count {page_count} >>", kids.join(" ")).as_bytes(),
        );
        doc.object(
            b"<< /Type /Font /Subtype /Type1 /BaseFont /Courier /Encoding /WinAnsiEncoding >>",
        );

        for (i, rows) in pages.iter().enumerate() {
            doc.object(
                format!(
                    "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {PAGE_WIDTH} {PAGE_HEIGHT}] \
                     /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
                    5 + 2 * i
                )
                .as_bytes(),
            );
            doc.stream(&page_content(rows, i + 1, page_count));
        }

        out.write_all(&doc.finish())?;
        Ok(())
    }

    fn supports_load(&self) -> bool {
        false
    }
}

fn page_content(rows: &[Lecture], page: usize, page_count: usize) -> Vec<u8> {
    let mut content = Vec::new();
    let mut line = |text: &str, size: u32, first: bool| {
        if first {
            let top = PAGE_HEIGHT - MARGIN;
            content.extend_from_slice(format!("/F1 {size} Tf\n{MARGIN} {top} Td\n").as_bytes());
        } else {
            content.extend_from_slice(format!("/F1 {size} Tf\n0 -{LEADING} Td\n").as_bytes());
        }
        content.push(b'(');
        content.extend_from_slice(&pdf_text(text));
        content.extend_from_slice(b") Tj\n");
    };

    line(&format!("{TITLE} ({page}/{page_count})"), TITLE_SIZE, true);
    line(&format_row(COLUMNS.map(|(heading, _)| heading.to_string())), BODY_SIZE, false);
    for lecture in rows {
        line(&format_row(cells(lecture)), BODY_SIZE, false);
    }

    let mut stream = b"BT\n".to_vec();
    stream.extend_from_slice(&content);
    stream.extend_from_slice(b"ET");
    stream
}

fn cells(lecture: &Lecture) -> [String; 8] {
    let groups: Vec<&str> = lecture.groups.iter().map(String::as_str).collect();
    [
        lecture.subject.clone(),
        lecture.kind.to_string(),
        lecture.professor.clone(),
        groups.join(", "),
        weekday_name(lecture.day).to_string(),
        lecture.start.format("%H:%M").to_string(),
        lecture.end.format("%H:%M").to_string(),
        lecture.classroom_name().unwrap_or("-").to_string(),
    ]
}

/// Pads or truncates each cell to its column width.
fn format_row(cells: [String; 8]) -> String {
    let row: Vec<String> = cells
        .iter()
        .zip(COLUMNS)
        .map(|(cell, (_, width))| {
            let cell: String = cell.chars().take(width).collect();
            format!("{cell:<width$}")
        })
        .collect();
    row.join(" ").trim_end().to_string()
}

/// Encodes text for a PDF string literal in `WinAnsiEncoding`.
///
/// Latin-1 maps directly; a few Central European letters outside it are
/// folded onto the nearest available glyph, anything else becomes `?`.
/// C1 controls become `?` too, since WinAnsi puts printable glyphs there.
fn pdf_text(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(text.len());
    for ch in text.chars() {
        let code = match ch {
            'Š' => 0x8A,
            'š' => 0x9A,
            'Ž' => 0x8E,
            'ž' => 0x9E,
            'Č' | 'Ć' => b'C',
            'č' | 'ć' => b'c',
            'Đ' => b'D',
            'đ' => b'd',
            '\u{80}'..='\u{9F}' => b'?',
            _ => u8::try_from(u32::from(ch)).unwrap_or(b'?'),
        };
        match code {
            b'(' | b')' | b'\\' => bytes.extend_from_slice(&[b'\\', code]),
            0x20..=0x7E => bytes.push(code),
            _ => bytes.extend_from_slice(format!("\\{code:03o}").as_bytes()),
        }
    }
    bytes
}

/// Accumulates numbered objects and writes the cross-reference table.
struct PdfBuilder {
    buf: Vec<u8>,
    offsets: Vec<usize>,
}

impl PdfBuilder {
    fn new() -> Self {
        Self {
            buf: b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n".to_vec(),
            offsets: Vec::new(),
        }
    }

    /// Appends the next object; ids are assigned in call order from 1.
    fn object(&mut self, body: &[u8]) {
        self.offsets.push(self.buf.len());
        self.buf
            .extend_from_slice(format!("{} 0 obj\n", self.offsets.len()).as_bytes());
        self.buf.extend_from_slice(body);
        self.buf.extend_from_slice(b"\nendobj\n");
    }

    fn stream(&mut self, content: &[u8]) {
        let mut body = format!("<< /Length {} >>\nstream\n", content.len()).into_bytes();
        body.extend_from_slice(content);
        body.extend_from_slice(b"\nendstream");
        self.object(&body);
    }

    fn finish(mut self) -> Vec<u8> {
        let xref_offset = self.buf.len();
        let size = self.offsets.len() + 1;
        self.buf
            .extend_from_slice(format!("xref\n0 {size}\n0000000000 65535 f \n").as_bytes());
        for offset in &self.offsets {
            self.buf
                .extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
        }
        self.buf.extend_from_slice(
            format!("trailer\n<< /Size {size} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n")
                .as_bytes(),
        );
        self.buf
    }
}

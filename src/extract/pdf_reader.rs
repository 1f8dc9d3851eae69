use std::path::PathBuf;

use anyhow::{Context, Result};
use lopdf::content::Content;
use lopdf::{Document, Object, ObjectId};

use crate::core::geometry::BBox;
use crate::core::model::{Token, TokenDocument, TokenPage};
use crate::extract::TokenSource;

/// Rough per-glyph advance as a fraction of the font size. The engine
/// anchors on left edges and fixed bands, so an estimated right edge is
/// sufficient for the text layer this template produces.
const GLYPH_ADVANCE: f32 = 0.5;

#[derive(Debug, Clone)]
pub struct PdfTokenReader {
    path: PathBuf,
}

impl PdfTokenReader {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn page_count(&self) -> Result<usize> {
        let doc = Document::load(&self.path)
            .with_context(|| format!("failed to open PDF: {}", self.path.display()))?;
        Ok(doc.get_pages().len())
    }
}

impl TokenSource for PdfTokenReader {
    fn extract(&self) -> Result<TokenDocument> {
        let doc = Document::load(&self.path)
            .with_context(|| format!("failed to open PDF: {}", self.path.display()))?;

        let mut pages = Vec::new();
        for (page_no, page_id) in doc.get_pages() {
            let (width, height) = page_box(&doc, page_id)
                .with_context(|| format!("no usable MediaBox on page {page_no}"))?;
            let data = doc
                .get_page_content(page_id)
                .with_context(|| format!("failed to read content of page {page_no}"))?;
            let content = Content::decode(&data)
                .with_context(|| format!("failed to decode content of page {page_no}"))?;
            let tokens = walk_text(&content, page_no);
            pages.push(TokenPage {
                page: page_no,
                width,
                height,
                tokens,
            });
        }

        Ok(TokenDocument { pages })
    }
}

fn page_box(doc: &Document, page_id: ObjectId) -> Result<(f32, f32)> {
    let mut id = page_id;
    loop {
        let dict = doc.get_dictionary(id).context("missing page dictionary")?;
        if let Ok(obj) = dict.get(b"MediaBox") {
            let obj = resolve(doc, obj);
            if let Ok(arr) = obj.as_array() {
                let nums: Vec<f32> = arr.iter().filter_map(number).collect();
                if nums.len() == 4 {
                    return Ok((nums[2] - nums[0], nums[3] - nums[1]));
                }
            }
        }
        // MediaBox may be inherited from the page tree
        match dict.get(b"Parent") {
            Ok(Object::Reference(parent)) => id = *parent,
            _ => anyhow::bail!("MediaBox absent from page tree"),
        }
    }
}

fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        other => other,
    }
}

fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// 2x3 text-space matrix in PDF row-vector convention.
#[derive(Debug, Clone, Copy)]
struct Mat {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Mat {
    fn identity() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }

    fn translation(tx: f32, ty: f32) -> Self {
        Self {
            e: tx,
            f: ty,
            ..Self::identity()
        }
    }

    fn mul(self, rhs: Mat) -> Mat {
        Mat {
            a: self.a * rhs.a + self.b * rhs.c,
            b: self.a * rhs.b + self.b * rhs.d,
            c: self.c * rhs.a + self.d * rhs.c,
            d: self.c * rhs.b + self.d * rhs.d,
            e: self.e * rhs.a + self.f * rhs.c + rhs.e,
            f: self.e * rhs.b + self.f * rhs.d + rhs.f,
        }
    }
}

/// Walk the text-showing operators of one page's content stream,
/// tracking the text and line matrices, and emit one token per shown
/// run. Strings decode as Latin-1; the fixed template's generator uses
/// simple single-byte fonts.
fn walk_text(content: &Content, page: u32) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut tm = Mat::identity();
    let mut tlm = Mat::identity();
    let mut font_size = 0.0_f32;
    let mut leading = 0.0_f32;

    for op in &content.operations {
        let operands = &op.operands;
        match op.operator.as_str() {
            "BT" => {
                tm = Mat::identity();
                tlm = Mat::identity();
            }
            "Tf" => {
                if let Some(size) = operands.get(1).and_then(number) {
                    font_size = size;
                }
            }
            "TL" => {
                if let Some(l) = operands.get(0).and_then(number) {
                    leading = l;
                }
            }
            "Tm" => {
                let n: Vec<f32> = operands.iter().filter_map(number).collect();
                if n.len() == 6 {
                    tm = Mat {
                        a: n[0],
                        b: n[1],
                        c: n[2],
                        d: n[3],
                        e: n[4],
                        f: n[5],
                    };
                    tlm = tm;
                }
            }
            "Td" | "TD" => {
                let tx = operands.get(0).and_then(number).unwrap_or(0.0);
                let ty = operands.get(1).and_then(number).unwrap_or(0.0);
                if op.operator == "TD" {
                    leading = -ty;
                }
                tlm = Mat::translation(tx, ty).mul(tlm);
                tm = tlm;
            }
            "T*" => {
                tlm = Mat::translation(0.0, -leading).mul(tlm);
                tm = tlm;
            }
            "Tj" | "'" | "\"" => {
                if op.operator != "Tj" {
                    tlm = Mat::translation(0.0, -leading).mul(tlm);
                    tm = tlm;
                }
                // the quoted forms carry spacing operands before the string
                if let Some(Object::String(bytes, _)) = operands.last() {
                    let text = decode_bytes(bytes);
                    tm = emit_run(&mut tokens, page, tm, font_size, text);
                }
            }
            "TJ" => {
                if let Some(Object::Array(items)) = operands.first() {
                    let mut text = String::new();
                    for item in items {
                        match item {
                            Object::String(bytes, _) => text.push_str(&decode_bytes(bytes)),
                            _ => {}
                        }
                    }
                    tm = emit_run(&mut tokens, page, tm, font_size, text);
                }
            }
            _ => {}
        }
    }

    tokens
}

fn emit_run(tokens: &mut Vec<Token>, page: u32, tm: Mat, font_size: f32, text: String) -> Mat {
    let advance = text.chars().count() as f32 * font_size * GLYPH_ADVANCE;
    if !text.trim().is_empty() {
        let x0 = tm.e;
        let y0 = tm.f;
        let x1 = x0 + advance * tm.a.abs().max(f32::EPSILON);
        let y1 = y0 + font_size * tm.d.abs().max(f32::EPSILON);
        tokens.push(Token {
            text,
            page,
            bbox: BBox::new(x0, y0, x1, y1),
        });
    }
    Mat::translation(advance, 0.0).mul(tm)
}

fn decode_bytes(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

use crate::core::error::StructuralMismatch;
use crate::core::geometry::BBox;
use crate::core::model::{Anchor, CourseRecord, FieldValue, SemesterSpan, Token, TokenDocument};
use crate::core::template::TranscriptTemplate;

/// Topology of a semester span relative to its end anchor: a closed
/// enumeration over the (page mismatch, column mismatch) booleans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanGeometry {
    /// Span starts and ends in the same column of the same page.
    SameColumn,
    /// Span starts in one column and ends in the other, same page.
    CrossColumn,
    /// Span starts on one page and ends on the following page.
    CrossPage,
}

pub fn classify(anchor: &Anchor, end: &Anchor) -> SpanGeometry {
    let page_mismatch = anchor.page < end.page;
    let column_mismatch = anchor.side != end.side;
    match (page_mismatch, column_mismatch) {
        (true, _) => SpanGeometry::CrossPage,
        (false, true) => SpanGeometry::CrossColumn,
        (false, false) => SpanGeometry::SameColumn,
    }
}

/// One rectangular scan area on one page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub page: u32,
    pub bbox: BBox,
}

/// Enumerate the course-id scan regions of a span, in reading order.
/// Region A is always the id column under the Course header on the
/// anchor page; a broken span adds Region B covering the continuation
/// rows above the end anchor, in the end anchor's column (cross-column)
/// or in the leftmost half-column band of the following page
/// (cross-page).
pub fn scan_regions(span: &SemesterSpan, template: &TranscriptTemplate) -> Vec<Region> {
    let tol = template.edge_tolerance;
    let anchor = &span.anchor;
    let end = &span.end;

    let id_column = |bottom: f32| {
        BBox::new(
            anchor.bbox.x0 - tol,
            bottom,
            span.desc_x0 + tol,
            anchor.bbox.y0 + tol,
        )
    };
    let continuation = |(x0, x1): (f32, f32), page: u32| Region {
        page,
        bbox: BBox::new(x0, end.bbox.y1 - tol, x1, template.top_margin),
    };

    match classify(anchor, end) {
        SpanGeometry::SameColumn => vec![Region {
            page: anchor.page,
            bbox: id_column(end.bbox.y1 - tol),
        }],
        SpanGeometry::CrossColumn => vec![
            Region {
                page: anchor.page,
                bbox: id_column(template.bottom_margin),
            },
            continuation(template.column_band(end.side), anchor.page),
        ],
        SpanGeometry::CrossPage => vec![
            Region {
                page: anchor.page,
                bbox: id_column(template.bottom_margin),
            },
            continuation(template.left_column_band, end.page),
        ],
    }
}

/// Scan a span's regions and extract its course rows. Within a region,
/// alphabetic-only tokens are department codes and tokens carrying a
/// digit are sequence numbers; the two lists pair positionally. Unequal
/// counts fail the semester rather than truncate the pairing.
pub fn resolve_courses(
    doc: &TokenDocument,
    span: &SemesterSpan,
    template: &TranscriptTemplate,
) -> Result<Vec<CourseRecord>, StructuralMismatch> {
    let mut records = Vec::new();
    for region in scan_regions(span, template) {
        let (depts, seqs) = scan_course_ids(doc, &region);
        if depts.len() != seqs.len() {
            return Err(StructuralMismatch::CourseIdPairing {
                page: region.page,
                depts: depts.len(),
                seqs: seqs.len(),
            });
        }
        for (dept, seq) in depts.into_iter().zip(seqs) {
            records.push(extract_record(doc, dept, seq, template));
        }
    }
    Ok(records)
}

fn scan_course_ids<'a>(
    doc: &'a TokenDocument,
    region: &Region,
) -> (Vec<&'a Token>, Vec<&'a Token>) {
    let mut depts = Vec::new();
    let mut seqs = Vec::new();
    if let Some(page) = doc.page(region.page) {
        for token in &page.tokens {
            if !region.bbox.contains(&token.bbox) {
                continue;
            }
            let text = token.text.trim();
            if text.is_empty() {
                continue;
            }
            if text.chars().all(|c| c.is_alphabetic()) {
                depts.push(token);
            } else if text.chars().any(|c| c.is_ascii_digit()) {
                seqs.push(token);
            }
        }
    }
    (depts, seqs)
}

/// Locate the five trailing fields of one course row through the fixed
/// horizontal band template. The band column follows the sequence
/// token's page side; the vertical extent is the sequence token's span.
/// An empty band leaves the field null; a crowded band keeps the last
/// token scanned.
fn extract_record(
    doc: &TokenDocument,
    dept: &Token,
    seq: &Token,
    template: &TranscriptTemplate,
) -> CourseRecord {
    let tol = template.edge_tolerance;
    let side = seq.page_side(template.half_width());
    let bands = template.field_bands(side);

    let mut fields: [Option<FieldValue>; 5] = Default::default();
    if let Some(page) = doc.page(seq.page) {
        for (slot, (low, high)) in fields.iter_mut().zip(bands) {
            let window = BBox::new(low, seq.bbox.y0, high, seq.bbox.y1).inflate(tol);
            *slot = page
                .tokens
                .iter()
                .filter(|t| window.contains(&t.bbox) && !t.text.trim().is_empty())
                .last()
                .map(FieldValue::of);
        }
    }

    let [description, attempted, earned, grade, points] = fields;
    CourseRecord {
        dept: Some(FieldValue::of(dept)),
        seq: Some(FieldValue::of(seq)),
        description,
        attempted,
        earned,
        grade,
        points,
    }
}

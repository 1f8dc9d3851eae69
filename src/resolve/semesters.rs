use crate::core::error::StructuralMismatch;
use crate::core::geometry::BBox;
use crate::core::model::{Anchor, LabelInstance, LabelKind, LabelScrape, SemesterSpan, TokenDocument};
use crate::core::template::TranscriptTemplate;

/// Build one college section's semester spans. Semester headers pair
/// 1:1 by index with the cleaned summary-line Points markers; each
/// semester also owns one Course header, one Description header and one
/// Plan label. Any count mismatch fails the section.
pub fn resolve_semesters(
    doc: &TokenDocument,
    labels: &LabelScrape,
    template: &TranscriptTemplate,
    section_page: u32,
) -> Result<Vec<SemesterSpan>, StructuralMismatch> {
    let expected = labels.semesters.len();
    for kind in [
        LabelKind::Points,
        LabelKind::Course,
        LabelKind::Description,
        LabelKind::Plan,
    ] {
        check_count(kind, labels.get(kind).len(), expected, section_page)?;
    }

    let mut spans = Vec::with_capacity(expected);
    for i in 0..expected {
        let header = &labels.semesters[i];
        spans.push(SemesterSpan {
            name: header.text.trim().to_string(),
            plan: scan_plan_target(doc, &labels.plans[i], template),
            anchor: Anchor::of(&labels.courses[i]),
            desc_x0: labels.descriptions[i].bbox.x0,
            end: Anchor::of(&labels.points[i]),
            courses: Vec::new(),
        });
    }
    Ok(spans)
}

fn check_count(
    kind: LabelKind,
    actual: usize,
    expected: usize,
    page: u32,
) -> Result<(), StructuralMismatch> {
    if actual == expected {
        Ok(())
    } else {
        Err(StructuralMismatch::LabelCount {
            label: kind.display_name(),
            page,
            expected,
            actual,
        })
    }
}

/// The plan name sits in a fixed window right of its Plan label. The
/// last token inside wins; an empty window is a null plan.
fn scan_plan_target(
    doc: &TokenDocument,
    plan: &LabelInstance,
    template: &TranscriptTemplate,
) -> Option<String> {
    let tol = template.edge_tolerance;
    let window = BBox::new(
        plan.bbox.x1 - tol,
        plan.bbox.y0 - tol,
        plan.bbox.x1 + template.plan_reach,
        plan.bbox.y1 + tol,
    );
    doc.page(plan.page)?
        .tokens
        .iter()
        .filter(|t| window.contains(&t.bbox) && !t.text.trim().is_empty())
        .last()
        .map(|t| t.text.trim().to_string())
}

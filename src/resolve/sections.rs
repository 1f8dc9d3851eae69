use crate::core::error::StructuralMismatch;
use crate::core::model::{CollegeSection, LabelInstance, LabelKind, LabelScrape};

/// Derive per-college page spans from the ordered section markers.
/// Each section runs to the page before the next marker; the last runs
/// to the end of the document.
pub fn resolve_sections(
    starts: &[LabelInstance],
    max_page: u32,
) -> Result<Vec<CollegeSection>, StructuralMismatch> {
    if starts.is_empty() {
        return Err(StructuralMismatch::LabelCount {
            label: LabelKind::SectionStart.display_name(),
            page: 1,
            expected: 1,
            actual: 0,
        });
    }

    let mut sections = Vec::with_capacity(starts.len());
    for (i, marker) in starts.iter().enumerate() {
        let end_page = match starts.get(i + 1) {
            Some(next) => next.page - 1,
            None => max_page,
        };
        sections.push(CollegeSection {
            name: college_name(&marker.text),
            start_page: marker.page,
            end_page,
            marker: marker.clone(),
            semesters: Vec::new(),
        });
    }
    Ok(sections)
}

/// College name: third whitespace-separated word of the marker text,
/// as in "----------Beginning of ARC Record----------".
fn college_name(text: &str) -> String {
    text.split_whitespace()
        .nth(2)
        .unwrap_or_default()
        .to_string()
}

/// A label belongs to a section when it lies inside the section's page
/// range and, on the start page itself, sits below the marker's top
/// edge or in the right column (which reads after the marker's column).
pub fn belongs_to(inst: &LabelInstance, section: &CollegeSection) -> bool {
    if inst.page < section.start_page || inst.page > section.end_page {
        return false;
    }
    inst.page > section.start_page || inst.bbox.y0 < section.marker.bbox.y1 || inst.side
}

/// Split every label list across the sections. For a well-formed
/// document the sections partition the label set exactly; any orphaned
/// or doubly-claimed instance fails resolution.
pub fn partition_labels(
    scrape: &LabelScrape,
    sections: &[CollegeSection],
) -> Result<Vec<LabelScrape>, StructuralMismatch> {
    let mut parts: Vec<LabelScrape> = vec![LabelScrape::default(); sections.len()];

    for kind in LabelKind::ALL {
        for inst in scrape.get(kind) {
            let mut owner = None;
            let mut matches = 0;
            for (i, section) in sections.iter().enumerate() {
                if belongs_to(inst, section) {
                    owner = Some(i);
                    matches += 1;
                }
            }
            match (owner, matches) {
                (Some(i), 1) => parts[i].get_mut(kind).push(inst.clone()),
                _ => {
                    return Err(StructuralMismatch::SectionAssignment {
                        text: inst.text.clone(),
                        page: inst.page,
                        matches,
                    })
                }
            }
        }
    }

    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::BBox;
    use pretty_assertions::assert_eq;

    fn marker(page: u32, y0: f32) -> LabelInstance {
        LabelInstance {
            text: format!("----------Beginning of C{page} Record----------"),
            page,
            side: false,
            bbox: BBox::new(36.0, y0, 300.0, y0 + 10.0),
        }
    }

    fn inst(page: u32, side: bool, y0: f32) -> LabelInstance {
        let x0 = if side { 420.0 } else { 36.0 };
        LabelInstance {
            text: "Course".to_string(),
            page,
            side,
            bbox: BBox::new(x0, y0, x0 + 22.0, y0 + 10.0),
        }
    }

    #[test]
    fn end_pages_chain_to_the_next_marker() {
        let sections = resolve_sections(&[marker(1, 560.0), marker(3, 560.0)], 5).unwrap();
        assert_eq!(sections.len(), 2);
        assert_eq!((sections[0].start_page, sections[0].end_page), (1, 2));
        assert_eq!((sections[1].start_page, sections[1].end_page), (3, 5));
        assert_eq!(sections[0].name, "C1");
    }

    #[test]
    fn start_page_assignment_respects_marker_edge_and_column() {
        let section = &resolve_sections(&[marker(1, 400.0)], 2).unwrap()[0];
        // below the marker top in the left column: in
        assert!(belongs_to(&inst(1, false, 380.0), section));
        // above the marker in the left column: out
        assert!(!belongs_to(&inst(1, false, 480.0), section));
        // above the marker but in the right column: in
        assert!(belongs_to(&inst(1, true, 480.0), section));
        // any later page in range: in
        assert!(belongs_to(&inst(2, false, 480.0), section));
    }

    #[test]
    fn orphaned_labels_fail_partition() {
        let sections = resolve_sections(&[marker(1, 400.0)], 2).unwrap();
        let mut scrape = LabelScrape::default();
        scrape.courses.push(inst(1, false, 480.0));
        let err = partition_labels(&scrape, &sections).unwrap_err();
        assert_eq!(
            err,
            StructuralMismatch::SectionAssignment {
                text: "Course".to_string(),
                page: 1,
                matches: 0,
            }
        );
    }

    #[test]
    fn well_formed_labels_partition_exactly() {
        let sections = resolve_sections(&[marker(1, 560.0), marker(2, 560.0)], 2).unwrap();
        let mut scrape = LabelScrape::default();
        scrape.courses.push(inst(1, false, 490.0));
        scrape.courses.push(inst(2, false, 490.0));
        let parts = partition_labels(&scrape, &sections).unwrap();
        assert_eq!(parts[0].courses.len(), 1);
        assert_eq!(parts[1].courses.len(), 1);
    }
}

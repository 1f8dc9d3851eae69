pub mod assemble;
pub mod cleaner;
pub mod courses;
pub mod scanner;
pub mod sections;
pub mod semesters;
pub mod validate;

pub use cleaner::{DedupPolicy, RetainRule, TriplicateDedup};
pub use courses::SpanGeometry;
pub use validate::is_valid_document;

use crate::core::error::MineError;
use crate::core::model::{TokenDocument, Transcript};
use crate::core::template::TranscriptTemplate;

/// Run the full resolution pipeline over a token document: validate,
/// scan, clean, then resolve sections, semesters and courses. Pure and
/// synchronous; the same document always resolves to the same tree.
pub fn resolve_transcript(
    doc: &TokenDocument,
    template: &TranscriptTemplate,
    policy: &dyn DedupPolicy,
) -> Result<Transcript, MineError> {
    validate::validate_document(doc, template)?;

    let scrape = scanner::scan_labels(doc, template);
    let scrape = cleaner::clean_labels(scrape, policy);

    let mut sections = sections::resolve_sections(&scrape.section_starts, doc.max_page())?;
    let parts = sections::partition_labels(&scrape, &sections)?;

    for (section, labels) in sections.iter_mut().zip(&parts) {
        let mut semesters =
            semesters::resolve_semesters(doc, labels, template, section.start_page)?;
        for span in &mut semesters {
            span.courses = courses::resolve_courses(doc, span, template)?;
        }
        section.semesters = semesters;
    }

    Ok(Transcript {
        student: assemble::scan_student_name(doc, template),
        colleges: sections,
    })
}

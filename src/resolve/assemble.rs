use crate::core::model::{FieldValue, RecordRow, TokenDocument, Transcript};
use crate::core::template::TranscriptTemplate;

/// Locate the document-level student name: the first token carrying the
/// name label, taking the trailing text.
pub fn scan_student_name(doc: &TokenDocument, template: &TranscriptTemplate) -> Option<String> {
    for page in &doc.pages {
        for token in &page.tokens {
            if let Some(idx) = token.text.find(&template.name_label) {
                let name = token.text[idx + template.name_label.len()..].trim();
                if !name.is_empty() {
                    return Some(name.to_string());
                }
            }
        }
    }
    None
}

/// Flatten the resolved tree into output rows, one per course, in
/// section/semester/course encounter order. Null fields propagate as
/// nulls; re-running over the same tree yields identical rows.
pub fn assemble_rows(transcript: &Transcript) -> Vec<RecordRow> {
    let mut rows = Vec::new();
    for college in &transcript.colleges {
        for semester in &college.semesters {
            for course in &semester.courses {
                rows.push(RecordRow {
                    college: college.name.clone(),
                    semester: semester.name.clone(),
                    plan: semester.plan.clone(),
                    dept: text_of(&course.dept),
                    seq: text_of(&course.seq),
                    description: text_of(&course.description),
                    attempted: text_of(&course.attempted),
                    earned: text_of(&course.earned),
                    grade: text_of(&course.grade),
                    points: text_of(&course.points),
                    name: transcript.student.clone(),
                });
            }
        }
    }
    rows
}

fn text_of(field: &Option<FieldValue>) -> Option<String> {
    field.as_ref().map(|f| f.text.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::BBox;
    use crate::core::model::{Token, TokenPage};

    #[test]
    fn student_name_is_the_trailing_text() {
        let doc = TokenDocument {
            pages: vec![TokenPage {
                page: 1,
                width: 792.0,
                height: 612.0,
                tokens: vec![Token {
                    text: "Name: Jane Doe".into(),
                    page: 1,
                    bbox: BBox::new(36.0, 580.0, 150.0, 590.0),
                }],
            }],
        };
        let template = TranscriptTemplate::default();
        assert_eq!(scan_student_name(&doc, &template), Some("Jane Doe".to_string()));
    }

    #[test]
    fn missing_name_line_is_null() {
        let doc = TokenDocument::default();
        let template = TranscriptTemplate::default();
        assert_eq!(scan_student_name(&doc, &template), None);
    }
}

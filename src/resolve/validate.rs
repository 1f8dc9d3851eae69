use crate::core::error::MineError;
use crate::core::model::TokenDocument;
use crate::core::template::TranscriptTemplate;

/// Template gate: every page carries the expected heading exactly once
/// and every page box rounds to the template's page size. Runs before
/// any resolution; a failure aborts with no partial output.
pub fn validate_document(
    doc: &TokenDocument,
    template: &TranscriptTemplate,
) -> Result<(), MineError> {
    if doc.pages.is_empty() {
        return Err(MineError::Validation("document has no pages".to_string()));
    }

    let expected = template.page_header.trim();
    for page in &doc.pages {
        let headings = page
            .tokens
            .iter()
            .filter(|t| t.text.trim() == expected)
            .count();
        if headings != 1 {
            return Err(MineError::Validation(format!(
                "page {} carries {} copies of the expected heading",
                page.page, headings
            )));
        }

        let (w, h) = (page.width.round(), page.height.round());
        if w != template.page_width || h != template.page_height {
            return Err(MineError::Validation(format!(
                "page {} box is {w}x{h}, expected {}x{}",
                page.page, template.page_width, template.page_height
            )));
        }
    }

    Ok(())
}

pub fn is_valid_document(doc: &TokenDocument, template: &TranscriptTemplate) -> bool {
    validate_document(doc, template).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::BBox;
    use crate::core::model::{Token, TokenPage};

    fn page_with_heading(text: &str, width: f32, height: f32) -> TokenPage {
        TokenPage {
            page: 1,
            width,
            height,
            tokens: vec![Token {
                text: text.to_string(),
                page: 1,
                bbox: BBox::new(200.0, 595.0, 500.0, 605.0),
            }],
        }
    }

    #[test]
    fn accepts_the_expected_template() {
        let template = TranscriptTemplate::default();
        let doc = TokenDocument {
            pages: vec![page_with_heading(&template.page_header, 792.2, 611.8)],
        };
        assert!(is_valid_document(&doc, &template));
    }

    #[test]
    fn rejects_a_wrong_heading() {
        let template = TranscriptTemplate::default();
        let doc = TokenDocument {
            pages: vec![page_with_heading("Some Other Transcript", 792.0, 612.0)],
        };
        assert!(!is_valid_document(&doc, &template));
    }

    #[test]
    fn rejects_a_wrong_page_box() {
        let template = TranscriptTemplate::default();
        let doc = TokenDocument {
            pages: vec![page_with_heading(&template.page_header, 612.0, 792.0)],
        };
        assert!(!is_valid_document(&doc, &template));
    }
}

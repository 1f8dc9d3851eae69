use crate::core::model::{LabelInstance, LabelKind, LabelScrape, Token, TokenDocument};
use crate::core::template::TranscriptTemplate;

/// Classify every token on every page into the template's label
/// categories. Pure; a token may land in more than one category and
/// each category's list keeps page-sequential scan order.
pub fn scan_labels(doc: &TokenDocument, template: &TranscriptTemplate) -> LabelScrape {
    let half = template.half_width();
    let mut scrape = LabelScrape::default();

    for page in &doc.pages {
        for token in &page.tokens {
            for kind in LabelKind::ALL {
                if matches_label(token, kind, template) {
                    scrape
                        .get_mut(kind)
                        .push(LabelInstance::from_token(token, half));
                }
            }
        }
    }

    scrape
}

/// Structural labels must equal the label word once surrounding spaces
/// and a trailing colon are stripped. Season headers match anywhere in
/// the token. The section marker needs the compound prefix so incidental
/// occurrences of "Beginning" elsewhere do not start a section.
fn matches_label(token: &Token, kind: LabelKind, template: &TranscriptTemplate) -> bool {
    if let Some(word) = kind.match_word() {
        let trimmed = token.text.trim();
        let trimmed = trimmed.strip_suffix(':').unwrap_or(trimmed);
        return trimmed == word;
    }
    match kind {
        LabelKind::SectionStart => token.text.contains(&template.section_marker),
        LabelKind::Semester => template.seasons.iter().any(|s| token.text.contains(s)),
        _ => false,
    }
}

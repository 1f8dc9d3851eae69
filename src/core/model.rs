use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::core::geometry::BBox;

/// A positioned fragment of extracted text, as handed over by the token
/// extractor. Coordinates are PDF units with Y increasing upward.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Token {
    pub text: String,
    pub page: u32,
    pub bbox: BBox,
}

impl Token {
    /// Right half-page column test; the column split is the page midline.
    pub fn page_side(&self, half_width: f32) -> bool {
        self.bbox.x0 > half_width
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPage {
    pub page: u32,
    pub width: f32,
    pub height: f32,
    pub tokens: Vec<Token>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenDocument {
    pub pages: Vec<TokenPage>,
}

impl TokenDocument {
    pub fn max_page(&self) -> u32 {
        self.pages.iter().map(|p| p.page).max().unwrap_or(0)
    }

    pub fn page(&self, id: u32) -> Option<&TokenPage> {
        self.pages.iter().find(|p| p.page == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LabelKind {
    SectionStart,
    Plan,
    Course,
    Description,
    Grade,
    Attempted,
    Earned,
    Points,
    Semester,
}

impl LabelKind {
    pub const ALL: [LabelKind; 9] = [
        LabelKind::SectionStart,
        LabelKind::Plan,
        LabelKind::Course,
        LabelKind::Description,
        LabelKind::Grade,
        LabelKind::Attempted,
        LabelKind::Earned,
        LabelKind::Points,
        LabelKind::Semester,
    ];

    /// Exact word a structural label must equal after trimming; the
    /// marker and season kinds match by substring instead.
    pub fn match_word(self) -> Option<&'static str> {
        match self {
            LabelKind::Plan => Some("Plan"),
            LabelKind::Course => Some("Course"),
            LabelKind::Description => Some("Description"),
            LabelKind::Grade => Some("Grade"),
            LabelKind::Attempted => Some("Attempted"),
            LabelKind::Earned => Some("Earned"),
            LabelKind::Points => Some("Points"),
            LabelKind::SectionStart | LabelKind::Semester => None,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            LabelKind::SectionStart => "section marker",
            LabelKind::Plan => "Plan",
            LabelKind::Course => "Course",
            LabelKind::Description => "Description",
            LabelKind::Grade => "Grade",
            LabelKind::Attempted => "Attempted",
            LabelKind::Earned => "Earned",
            LabelKind::Points => "Points",
            LabelKind::Semester => "semester header",
        }
    }
}

/// A token classified into a semantic label category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LabelInstance {
    pub text: String,
    pub page: u32,
    pub side: bool,
    pub bbox: BBox,
}

impl LabelInstance {
    pub fn from_token(token: &Token, half_width: f32) -> Self {
        Self {
            text: token.text.clone(),
            page: token.page,
            side: token.page_side(half_width),
            bbox: token.bbox,
        }
    }

    /// Document reading order: earlier pages first, left column before
    /// right, top before bottom. The `(page, side, -y0)` sort key.
    pub fn cmp_reading_order(&self, other: &Self) -> Ordering {
        self.page
            .cmp(&other.page)
            .then(self.side.cmp(&other.side))
            .then((-self.bbox.y0).total_cmp(&-other.bbox.y0))
    }
}

/// Per-kind ordered lists of matched label instances.
#[derive(Debug, Clone, Default)]
pub struct LabelScrape {
    pub section_starts: Vec<LabelInstance>,
    pub plans: Vec<LabelInstance>,
    pub courses: Vec<LabelInstance>,
    pub descriptions: Vec<LabelInstance>,
    pub grades: Vec<LabelInstance>,
    pub attempted: Vec<LabelInstance>,
    pub earned: Vec<LabelInstance>,
    pub points: Vec<LabelInstance>,
    pub semesters: Vec<LabelInstance>,
}

impl LabelScrape {
    pub fn get(&self, kind: LabelKind) -> &Vec<LabelInstance> {
        match kind {
            LabelKind::SectionStart => &self.section_starts,
            LabelKind::Plan => &self.plans,
            LabelKind::Course => &self.courses,
            LabelKind::Description => &self.descriptions,
            LabelKind::Grade => &self.grades,
            LabelKind::Attempted => &self.attempted,
            LabelKind::Earned => &self.earned,
            LabelKind::Points => &self.points,
            LabelKind::Semester => &self.semesters,
        }
    }

    pub fn get_mut(&mut self, kind: LabelKind) -> &mut Vec<LabelInstance> {
        match kind {
            LabelKind::SectionStart => &mut self.section_starts,
            LabelKind::Plan => &mut self.plans,
            LabelKind::Course => &mut self.courses,
            LabelKind::Description => &mut self.descriptions,
            LabelKind::Grade => &mut self.grades,
            LabelKind::Attempted => &mut self.attempted,
            LabelKind::Earned => &mut self.earned,
            LabelKind::Points => &mut self.points,
            LabelKind::Semester => &mut self.semesters,
        }
    }
}

/// A semester span boundary: the Course column header at the start, the
/// summary-line Points marker at the end.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Anchor {
    pub page: u32,
    pub side: bool,
    pub bbox: BBox,
}

impl Anchor {
    pub fn of(inst: &LabelInstance) -> Self {
        Self {
            page: inst.page,
            side: inst.side,
            bbox: inst.bbox,
        }
    }
}

/// A scraped course field with its provenance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldValue {
    pub text: String,
    pub page: u32,
    pub bbox: BBox,
}

impl FieldValue {
    pub fn of(token: &Token) -> Self {
        Self {
            text: token.text.trim().to_string(),
            page: token.page,
            bbox: token.bbox,
        }
    }
}

/// One course row. Every field is optional: an empty band is a scrape
/// miss, not an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CourseRecord {
    pub dept: Option<FieldValue>,
    pub seq: Option<FieldValue>,
    pub description: Option<FieldValue>,
    pub attempted: Option<FieldValue>,
    pub earned: Option<FieldValue>,
    pub grade: Option<FieldValue>,
    pub points: Option<FieldValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemesterSpan {
    pub name: String,
    pub plan: Option<String>,
    pub anchor: Anchor,
    /// Left edge of the Description column header; right bound of the
    /// course id column.
    pub desc_x0: f32,
    pub end: Anchor,
    pub courses: Vec<CourseRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollegeSection {
    pub name: String,
    pub start_page: u32,
    pub end_page: u32,
    pub marker: LabelInstance,
    pub semesters: Vec<SemesterSpan>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    pub student: Option<String>,
    pub colleges: Vec<CollegeSection>,
}

/// Flat output row. Field order is the output column order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecordRow {
    pub college: String,
    pub semester: String,
    pub plan: Option<String>,
    pub dept: Option<String>,
    pub seq: Option<String>,
    pub description: Option<String>,
    pub attempted: Option<String>,
    pub earned: Option<String>,
    pub grade: Option<String>,
    pub points: Option<String>,
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inst(page: u32, side: bool, y0: f32) -> LabelInstance {
        LabelInstance {
            text: String::new(),
            page,
            side,
            bbox: BBox::new(0.0, y0, 10.0, y0 + 10.0),
        }
    }

    #[test]
    fn reading_order_sorts_page_column_then_top_down() {
        let mut items = vec![
            inst(2, false, 500.0),
            inst(1, true, 400.0),
            inst(1, false, 100.0),
            inst(1, false, 480.0),
            inst(1, true, 90.0),
        ];
        items.sort_by(|a, b| a.cmp_reading_order(b));
        let key: Vec<(u32, bool, f32)> = items
            .iter()
            .map(|i| (i.page, i.side, i.bbox.y0))
            .collect();
        assert_eq!(
            key,
            vec![
                (1, false, 480.0),
                (1, false, 100.0),
                (1, true, 400.0),
                (1, true, 90.0),
                (2, false, 500.0),
            ]
        );
    }

    #[test]
    fn page_side_splits_on_midline() {
        let token = Token {
            text: "x".into(),
            page: 1,
            bbox: BBox::new(400.0, 0.0, 410.0, 10.0),
        };
        assert!(token.page_side(396.0));
        assert!(!token.page_side(420.0));
    }
}

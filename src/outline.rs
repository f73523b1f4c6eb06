//! Section locations and document outline

use serde::Serialize;

use crate::model::{DocumentBuilder, Property};
use crate::parser::{self, ParseHandler, PropertySpan};
use crate::problem::{Location, Problem};
use crate::properties::PropertyTypeRegistry;

/// Records the location of every section header while forwarding all
/// events to `inner`.
///
/// The locations land in a caller-owned vector, in parse order.
pub struct SectionLocations<'a, H> {
    inner: H,
    locations: &'a mut Vec<Location>,
}

impl<'a, H: ParseHandler> SectionLocations<'a, H> {
    pub fn new(inner: H, locations: &'a mut Vec<Location>) -> Self {
        Self { inner, locations }
    }

    pub fn into_inner(self) -> H {
        self.inner
    }
}

impl<H: ParseHandler> ParseHandler for SectionLocations<'_, H> {
    fn start_document(&mut self) {
        self.inner.start_document();
    }

    fn start_section(&mut self, pattern: &str, location: Location) {
        self.inner.start_section(pattern, location);
        self.locations.push(location);
    }

    fn end_section(&mut self) {
        self.inner.end_section();
    }

    fn property(&mut self, name: &str, value: &str, span: PropertySpan) {
        self.inner.property(name, value, span);
    }

    fn error(&mut self, problem: Problem) {
        self.inner.error(problem);
    }

    fn end_document(&mut self) {
        self.inner.end_document();
    }
}

/// Handler that ignores every event; pair with [`SectionLocations`] when
/// only the locations are wanted.
pub struct Ignore;

impl ParseHandler for Ignore {}

/// Header locations of all sections in `content`.
pub fn section_locations(content: &str) -> Vec<Location> {
    let mut locations = Vec::new();
    parser::parse(content, &mut SectionLocations::new(Ignore, &mut locations));
    locations
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineSection {
    pub pattern: String,
    pub location: Location,
    pub properties: Vec<Property>,
}

/// Tree view of a document: sections with their properties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Outline {
    pub root: Option<bool>,
    pub sections: Vec<OutlineSection>,
}

/// Build the outline of `content`.
///
/// Malformed lines are skipped, so an outline is available while the file
/// is still being edited.
pub fn outline(content: &str) -> Outline {
    let registry = PropertyTypeRegistry::default();
    let mut locations = Vec::new();
    let mut handler = SectionLocations::new(DocumentBuilder::new(&registry), &mut locations);
    parser::parse(content, &mut handler);
    let document = handler.into_inner().into_document();

    Outline {
        root: document.root,
        sections: document
            .sections
            .into_iter()
            .zip(locations)
            .map(|(section, location)| OutlineSection {
                pattern: section.pattern,
                location,
                properties: section.properties,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "root = true\n\n[*]\nindent_style = space\n\n  [*.md]\ntrim_trailing_whitespace = false\n";

    #[test]
    fn test_section_locations_in_parse_order() {
        let locations = section_locations(SAMPLE);
        assert_eq!(
            locations,
            vec![Location::new(3, 1, 13), Location::new(6, 3, 41)]
        );
    }

    #[test]
    fn test_no_sections() {
        assert!(section_locations("root = true\n").is_empty());
    }

    #[test]
    fn test_tracker_forwards_to_inner_handler() {
        let registry = PropertyTypeRegistry::default();
        let mut locations = Vec::new();
        let mut handler = SectionLocations::new(DocumentBuilder::new(&registry), &mut locations);
        parser::parse(SAMPLE, &mut handler);
        let document = handler.into_inner().finish().unwrap();

        assert_eq!(document.sections.len(), 2);
        assert_eq!(locations.len(), 2);
    }

    #[test]
    fn test_outline_sections_and_properties() {
        let outline = outline(SAMPLE);
        assert_eq!(outline.root, Some(true));
        assert_eq!(outline.sections.len(), 2);
        assert_eq!(outline.sections[0].pattern, "*");
        assert_eq!(outline.sections[0].location.line, 3);
        assert_eq!(
            outline.sections[0].properties,
            vec![Property::new("indent_style", "space")]
        );
        assert_eq!(outline.sections[1].pattern, "*.md");
        assert_eq!(outline.sections[1].location.line, 6);
    }

    #[test]
    fn test_outline_tolerates_malformed_lines() {
        let outline = outline("[*]\nnot valid\nindent_size = 2\n[*.rs\n[*.py]\n");
        let patterns: Vec<_> = outline.sections.iter().map(|s| s.pattern.as_str()).collect();
        assert_eq!(patterns, vec!["*", "*.py"]);
        assert_eq!(outline.sections[1].location.line, 5);
    }
}

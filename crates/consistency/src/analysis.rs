//! Structural analysis of an element sequence

use doc_model::{DocumentElement, ElementKind};
use serde::{Deserialize, Serialize};

/// A heading that is more than one level deeper than the one before it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchySkip {
    /// Position of the offending heading in the sequence
    pub position: usize,
    /// Level of the preceding heading (the title counts as level 1)
    pub from: u8,
    pub to: u8,
}

/// Counts and structural findings for one element sequence
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureAnalysis {
    pub has_title: bool,
    pub heading_count: usize,
    pub paragraph_count: usize,
    pub list_count: usize,
    pub list_item_count: usize,
    pub page_break_count: usize,
    pub image_count: usize,
    /// Characters of text across all elements
    pub total_content_length: usize,
    pub hierarchy_skips: Vec<HierarchySkip>,
    /// Lists without any items
    pub empty_lists: usize,
    /// No element besides the title
    pub is_empty: bool,
    pub warnings: Vec<String>,
}

/// Analyze the structure of an element sequence.
///
/// Findings are reported as warnings; the analysis never fails.
pub fn analyze_structure(elements: &[DocumentElement]) -> StructureAnalysis {
    let mut analysis = StructureAnalysis::default();
    let mut previous_level: Option<u8> = None;

    for (position, element) in elements.iter().enumerate() {
        analysis.total_content_length += element.text_len();

        match element.kind {
            ElementKind::Title => {
                analysis.has_title = true;
                previous_level = Some(1);
            }
            ElementKind::Heading => {
                analysis.heading_count += 1;
                if let Some(level) = element.level {
                    if let Some(from) =
                        previous_level.filter(|&from| level > from.saturating_add(1))
                    {
                        analysis.hierarchy_skips.push(HierarchySkip {
                            position,
                            from,
                            to: level,
                        });
                        analysis.warnings.push(format!(
                            "Heading hierarchy skip at element {}: H{} follows H{}",
                            position, level, from
                        ));
                    }
                    previous_level = Some(level);
                }
            }
            ElementKind::Paragraph | ElementKind::Text => analysis.paragraph_count += 1,
            ElementKind::List => {
                analysis.list_count += 1;
                analysis.list_item_count += element.children.len();
                if element.children.is_empty() {
                    analysis.empty_lists += 1;
                    analysis
                        .warnings
                        .push(format!("Empty list at element {}", position));
                }
            }
            ElementKind::ListItem => analysis.list_item_count += 1,
            ElementKind::PageBreak => analysis.page_break_count += 1,
            ElementKind::Image => analysis.image_count += 1,
        }
    }

    analysis.is_empty = elements.iter().all(|e| e.kind == ElementKind::Title);
    if analysis.is_empty {
        analysis.warnings.push("Document has no content".to_string());
    }

    tracing::trace!(
        "Analyzed {} element(s): {} warning(s)",
        elements.len(),
        analysis.warnings.len()
    );
    analysis
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::ListKind;
    use proptest::prelude::*;

    #[test]
    fn test_counts() {
        let analysis = analyze_structure(&[
            DocumentElement::title("Report"),
            DocumentElement::paragraph("Intro text."),
            DocumentElement::list(ListKind::Unordered, ["One", "Two"]),
            DocumentElement::page_break(),
            DocumentElement::heading(2, "Next"),
            DocumentElement::image("a.png", Some("A")),
        ]);

        assert!(analysis.has_title);
        assert_eq!(analysis.heading_count, 1);
        assert_eq!(analysis.paragraph_count, 1);
        assert_eq!(analysis.list_count, 1);
        assert_eq!(analysis.list_item_count, 2);
        assert_eq!(analysis.page_break_count, 1);
        assert_eq!(analysis.image_count, 1);
        assert_eq!(analysis.total_content_length, 6 + 11 + 6 + 4 + 1);
        assert!(analysis.hierarchy_skips.is_empty());
        assert!(analysis.warnings.is_empty());
        assert!(!analysis.is_empty);
    }

    #[test]
    fn test_single_hierarchy_skip() {
        let analysis = analyze_structure(&[
            DocumentElement::heading(1, "Top"),
            DocumentElement::heading(3, "Deep"),
        ]);
        assert_eq!(
            analysis.hierarchy_skips,
            vec![HierarchySkip {
                position: 1,
                from: 1,
                to: 3
            }]
        );
        assert_eq!(analysis.warnings.len(), 1);
    }

    #[test]
    fn test_out_of_range_levels_do_not_overflow() {
        let analysis = analyze_structure(&[
            DocumentElement::heading(255, "Huge"),
            DocumentElement::heading(255, "Huge again"),
            DocumentElement::heading(1, "Back"),
        ]);
        assert_eq!(analysis.heading_count, 3);
        assert!(analysis.hierarchy_skips.is_empty());
    }

    #[test]
    fn test_returning_to_shallower_level_is_fine() {
        let analysis = analyze_structure(&[
            DocumentElement::heading(1, "A"),
            DocumentElement::heading(2, "B"),
            DocumentElement::heading(3, "C"),
            DocumentElement::heading(1, "D"),
            DocumentElement::heading(2, "E"),
        ]);
        assert!(analysis.hierarchy_skips.is_empty());
    }

    #[test]
    fn test_title_counts_as_first_level() {
        let analysis = analyze_structure(&[
            DocumentElement::title("T"),
            DocumentElement::heading(3, "Deep"),
        ]);
        assert_eq!(analysis.hierarchy_skips.len(), 1);

        let analysis = analyze_structure(&[DocumentElement::heading(3, "Deep")]);
        assert!(analysis.hierarchy_skips.is_empty());
    }

    #[test]
    fn test_empty_list_and_document() {
        let mut list = DocumentElement::list(ListKind::Ordered, ["x"]);
        list.children.clear();
        let analysis = analyze_structure(&[list]);
        assert_eq!(analysis.empty_lists, 1);
        assert!(!analysis.is_empty);

        let analysis = analyze_structure(&[DocumentElement::title("Only")]);
        assert!(analysis.is_empty);
        assert_eq!(analysis.warnings, vec!["Document has no content".to_string()]);

        assert!(analyze_structure(&[]).is_empty);
    }

    proptest! {
        #[test]
        fn prop_skips_bounded_by_headings(levels in prop::collection::vec(1u8..=6, 0..20)) {
            let elements: Vec<_> = levels
                .iter()
                .map(|&l| DocumentElement::heading(l, "h"))
                .collect();
            let analysis = analyze_structure(&elements);

            prop_assert_eq!(analysis.heading_count, levels.len());
            prop_assert!(analysis.hierarchy_skips.len() < levels.len().max(1));
            let expected = levels.windows(2).filter(|w| w[1] > w[0] + 1).count();
            prop_assert_eq!(analysis.hierarchy_skips.len(), expected);
        }
    }
}

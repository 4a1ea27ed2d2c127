use serde_json::json;

use super::*;

fn scenario_a() -> Vec<Element> {
    vec![
        Element::new("1", Category::Title, "Introduction"),
        Element::new("2", Category::NarrativeText, "body").with_parent("1"),
        Element::new("3", Category::Title, "References"),
        Element::new("4", Category::NarrativeText, "ref body").with_parent("3"),
        Element::new("5", Category::Header, "Doc Header"),
    ]
}

#[test]
fn section_index_maps_title_ids_to_their_text() {
    let elements = scenario_a();
    let index = build_section_index(&elements, &Category::Title);

    assert_eq!(index.len(), 2);
    assert_eq!(index.get("1"), Some("Introduction"));
    assert_eq!(index.get("3"), Some("References"));
    assert!(!index.contains("2"));

    let order: Vec<&str> = index.iter().map(|(id, _)| id).collect();
    assert_eq!(order, vec!["1", "3"]);
}

#[test]
fn section_index_keeps_first_occurrence_of_duplicate_id() {
    let elements = vec![
        Element::new("t", Category::Title, "First"),
        Element::new("t", Category::Title, "Second"),
    ];

    let index = build_section_index(&elements, &Category::Title);
    assert_eq!(index.len(), 1);
    assert_eq!(index.get("t"), Some("First"));
}

#[test]
fn section_index_keeps_duplicate_titles_with_distinct_ids() {
    let elements = vec![
        Element::new("a", Category::Title, "Results"),
        Element::new("b", Category::Title, "Results"),
    ];

    let index = build_section_index(&elements, &Category::Title);
    assert_eq!(index.len(), 2);
    assert_eq!(index.get("a"), Some("Results"));
    assert_eq!(index.get("b"), Some("Results"));
}

#[test]
fn section_index_uses_configured_title_category() {
    let elements = scenario_a();
    let index = build_section_index(&elements, &Category::Header);
    assert_eq!(index.len(), 1);
    assert_eq!(index.get("5"), Some("Doc Header"));
}

#[test]
fn boundaries_resolve_header_and_references() {
    let elements = scenario_a();
    let index = build_section_index(&elements, &Category::Title);

    let boundaries = resolve_boundaries(&elements, &index, "References", &Category::Header)
        .expect("boundaries resolve");
    assert_eq!(boundaries.header_id, "5");
    assert_eq!(boundaries.reserved_section_id, "3");

    let lower = resolve_boundaries(&elements, &index, "references", &Category::Header)
        .expect("title match ignores case");
    assert_eq!(lower, boundaries);
}

#[test]
fn boundaries_report_missing_reserved_section() {
    let elements = scenario_a();
    let index = build_section_index(&elements, &Category::Title);

    let err = resolve_boundaries(&elements, &index, "Bibliography", &Category::Header)
        .expect_err("missing reserved section fails");
    assert!(matches!(err, StructureError::SectionNotFound(_)));
}

#[test]
fn boundaries_report_missing_header() {
    let elements: Vec<Element> = scenario_a()
        .into_iter()
        .filter(|element| element.category != Category::Header)
        .collect();
    let index = build_section_index(&elements, &Category::Title);

    let err = resolve_boundaries(&elements, &index, "References", &Category::Header)
        .expect_err("missing header fails");
    assert!(matches!(err, StructureError::SectionNotFound(_)));
}

#[test]
fn boundaries_pick_first_matching_section() {
    let elements = vec![
        Element::new("r1", Category::Title, "REFERENCES"),
        Element::new("r2", Category::Title, "References"),
        Element::new("h1", Category::Header, "Running head"),
        Element::new("h2", Category::Header, "Running head"),
    ];
    let index = build_section_index(&elements, &Category::Title);

    let boundaries = resolve_boundaries(&elements, &index, "references", &Category::Header)
        .expect("boundaries resolve");
    assert_eq!(boundaries.reserved_section_id, "r1");
    assert_eq!(boundaries.header_id, "h1");
}

#[test]
fn exclude_boundaries_drops_anchors_and_their_children() {
    let mut elements = scenario_a();
    elements.push(Element::new("6", Category::PageNumber, "7").with_parent("5"));
    let index = build_section_index(&elements, &Category::Title);
    let boundaries = resolve_boundaries(&elements, &index, "References", &Category::Header)
        .expect("boundaries resolve");

    let kept: Vec<String> = exclude_boundaries(&elements, &boundaries)
        .into_iter()
        .map(|element| element.id)
        .collect();
    assert_eq!(kept, vec!["1", "2"]);
}

#[test]
fn annotate_resolves_parent_sections() {
    let elements = scenario_a();
    let index = build_section_index(&elements, &Category::Title);

    let annotated = annotate(&elements, &index);
    let sections: Vec<&str> = annotated.iter().map(|item| item.section.as_str()).collect();
    assert_eq!(sections, vec!["", "Introduction", "", "References", ""]);
    assert_eq!(elements[1].metadata.get(SECTION_KEY), None);
}

#[test]
fn annotate_leaves_unresolved_parents_empty() {
    let elements = vec![
        Element::new("1", Category::Title, "Intro"),
        Element::new("2", Category::NarrativeText, "orphan").with_parent("missing"),
        Element::new("3", Category::NarrativeText, "no parent"),
    ];
    let index = build_section_index(&elements, &Category::Title);

    let annotated = annotate(&elements, &index);
    assert!(annotated.iter().all(|item| item.section.is_empty()));
    assert!(annotated.iter().all(|item| !item.has_section()));
}

#[test]
fn annotate_is_idempotent_under_fixed_index() {
    let elements = scenario_a();
    let index = build_section_index(&elements, &Category::Title);

    let first = annotate(&elements, &index);
    let records: Vec<Element> = first.iter().cloned().map(AnnotatedElement::into_record).collect();
    let second = annotate(&records, &index);

    assert_eq!(first, second);
}

#[test]
fn annotated_record_round_trips_section_through_metadata() {
    let elements = scenario_a();
    let index = build_section_index(&elements, &Category::Title);
    let annotated = annotate(&elements, &index);

    let value = serde_json::to_value(&annotated[1]).expect("annotated element serializes");
    assert_eq!(value["metadata"]["section"], json!("Introduction"));
    assert_eq!(value["metadata"]["parent_id"], json!("1"));

    let back: AnnotatedElement = serde_json::from_value(value).expect("annotated element parses");
    assert_eq!(back, annotated[1]);
}

#[test]
fn count_children_groups_by_parent_and_category() {
    let elements = vec![
        Element::new("t", Category::Title, "Intro"),
        Element::new("a", Category::NarrativeText, "a").with_parent("t"),
        Element::new("b", Category::NarrativeText, "b").with_parent("t"),
        Element::new("c", Category::Table, "c").with_parent("t"),
        Element::new("d", Category::ListItem, "d").with_parent(""),
        Element::new("e", Category::ListItem, "e"),
    ];

    let counts = count_children(&elements);
    assert_eq!(counts.get("t", &Category::NarrativeText), 2);
    assert_eq!(counts.get("t", &Category::Table), 1);
    assert_eq!(counts.get("t", &Category::ListItem), 0);
    assert_eq!(counts.get("unknown", &Category::Title), 0);
    assert_eq!(counts.len(), 2);
    assert_eq!(counts.total(), 3);

    let first = counts.iter().next().expect("first relation");
    assert_eq!(first.parent_id, "t");
    assert_eq!(first.child_category, Category::NarrativeText);
}

#[test]
fn count_children_of_empty_input_is_empty() {
    let counts = count_children(&Vec::<Element>::new());
    assert!(counts.is_empty());
    assert_eq!(counts.total(), 0);
}

#[test]
fn count_categories_sorts_by_count_then_first_seen() {
    let categories = ["title", "title", "title", "text", "text", "table"];
    let elements: Vec<Element> = categories
        .iter()
        .enumerate()
        .map(|(index, name)| Element::new(index.to_string(), Category::parse(name), "x"))
        .collect();

    let histogram = count_categories(&elements);
    assert_eq!(
        histogram,
        vec![
            (Category::Title, 3),
            (Category::Other("text".to_string()), 2),
            (Category::Table, 1),
        ]
    );
    assert_eq!(
        histogram.iter().map(|(_, count)| count).sum::<usize>(),
        elements.len()
    );
}

#[test]
fn count_categories_breaks_ties_by_first_appearance() {
    let elements = vec![
        Element::new("1", Category::Table, "x"),
        Element::new("2", Category::Header, "x"),
        Element::new("3", Category::Header, "x"),
        Element::new("4", Category::Table, "x"),
        Element::new("5", Category::Footer, "x"),
    ];

    let histogram = count_categories(&elements);
    assert_eq!(
        histogram,
        vec![(Category::Table, 2), (Category::Header, 2), (Category::Footer, 1)]
    );
}

#[test]
fn relation_report_joins_parent_details_and_flags_dangling() {
    let elements = vec![
        Element::new("t", Category::Title, "Intro"),
        Element::new("a", Category::NarrativeText, "a").with_parent("t"),
        Element::new("b", Category::NarrativeText, "b").with_parent("ghost"),
    ];
    let store = ElementStore::new(elements);
    let counts = count_children(&store);

    let rows = relation_report(&counts, &store);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].parent_category.as_deref(), Some("Title"));
    assert_eq!(rows[0].parent_text.as_deref(), Some("Intro"));
    assert_eq!(rows[0].num_children, 1);
    assert!(!rows[0].is_dangling());
    assert!(rows[1].is_dangling());
}

use super::*;

fn titles(nodes: &[HeadingNode]) -> Vec<&str> {
    nodes.iter().map(|n| n.text.as_str()).collect()
}

#[test]
fn nests_by_level() {
    let roots = extract_headings("# A\n## B\n## C\n# D");

    assert_eq!(titles(&roots), vec!["A", "D"]);
    assert_eq!(titles(&roots[0].children), vec!["B", "C"]);
    assert!(roots[1].children.is_empty());
    assert!(roots[0].children.iter().all(|c| c.children.is_empty()));
}

#[test]
fn skipped_levels_nest_under_nearest_shallower_heading() {
    let roots = extract_headings("# A\n### B\n## C\n#### D");

    assert_eq!(titles(&roots), vec!["A"]);
    assert_eq!(titles(&roots[0].children), vec!["B", "C"]);
    assert_eq!(titles(&roots[0].children[1].children), vec!["D"]);
}

#[test]
fn deeper_first_heading_is_a_root() {
    let roots = extract_headings("## A\n# B\n## C");

    assert_eq!(titles(&roots), vec!["A", "B"]);
    assert!(roots[0].children.is_empty());
    assert_eq!(titles(&roots[1].children), vec!["C"]);
}

#[test]
fn records_level_line_and_id() {
    let roots = extract_headings("intro\n\n##   Sub title  \n");

    assert_eq!(roots.len(), 1);
    let node = &roots[0];
    assert_eq!(node.level, 2);
    assert_eq!(node.text, "Sub title");
    assert_eq!(node.line, 3);
    assert_eq!(node.id, "2-Sub title-3");
}

#[test]
fn rejects_non_headings() {
    let text = "#NoSpace\n####### seven\n  # indented\n# \n#\t\n#\nplain # text";
    assert!(extract_headings(text).is_empty());
}

#[test]
fn whitespace_only_title_is_an_empty_heading() {
    let roots = extract_headings("#  \n# A\n##\t \r\n");

    assert_eq!(titles(&roots), vec!["", "A"]);
    assert_eq!(roots[0].id, "1--1");
    assert_eq!(roots[1].children.len(), 1);
    assert_eq!(roots[1].children[0].text, "");
    assert_eq!(roots[1].children[0].line, 3);
}

#[test]
fn accepts_all_six_levels_and_tabs() {
    let roots = extract_headings("#\tOne\n## Two\n### Three\n#### Four\n##### Five\n###### Six");

    let flat = flatten_headings(&roots);
    let levels: Vec<u8> = flat.iter().map(|(_, n)| n.level).collect();
    let depths: Vec<usize> = flat.iter().map(|(d, _)| *d).collect();
    assert_eq!(levels, vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(depths, vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(roots[0].text, "One");
}

#[test]
fn handles_crlf_line_endings() {
    let roots = extract_headings("# Title\r\n## Sub\r\n");

    assert_eq!(titles(&roots), vec!["Title"]);
    assert_eq!(titles(&roots[0].children), vec!["Sub"]);
    assert_eq!(roots[0].children[0].line, 2);
}

#[test]
fn empty_text_has_no_headings() {
    assert!(extract_headings("").is_empty());
}

#[test]
fn outline_state_collapse_hides_children() {
    let mut state = OutlineState::new();
    assert!(state.is_empty());
    assert!(state.refresh("# A\n## B\n### C\n# D"));
    assert!(!state.refresh("# A\n## B\n### C\n# D"));

    let rows = state.visible_rows();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[2].depth, 2);
    assert!(rows[0].has_children);

    let id = rows[1].id.clone();
    assert!(state.toggle_collapse(&id));
    assert!(state.is_collapsed(&id));

    let rows = state.visible_rows();
    let texts: Vec<&str> = rows.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(texts, vec!["A", "B", "D"]);
    assert!(rows[1].collapsed);

    assert!(state.toggle_collapse(&id));
    assert_eq!(state.visible_rows().len(), 4);

    assert!(!state.toggle_collapse("9-missing-1"));
}

#[test]
fn outline_state_drops_stale_collapsed_ids() {
    let mut state = OutlineState::new();
    state.refresh("# A\n## B");
    let id = state.visible_rows()[0].id.clone();
    state.toggle_collapse(&id);

    // heading moved to another line, so its id changed
    state.refresh("\n# A\n## B");
    assert!(!state.is_collapsed(&id));
    assert_eq!(state.visible_rows().len(), 2);
}

#[test]
fn outline_state_selection_wraps_and_maps_to_lines() {
    let mut state = OutlineState::new();
    state.refresh("# A\ntext\n## B\n# C");

    assert_eq!(state.selected_line(), Some(1));
    assert!(state.move_selection(1));
    assert_eq!(state.selected_line(), Some(3));
    assert!(state.move_selection(1));
    assert!(state.move_selection(1));
    assert_eq!(state.selected_index(), 0);
    assert!(state.move_selection(-1));
    assert_eq!(state.selected_line(), Some(4));

    assert_eq!(state.click_row(1), Some(3));
    assert_eq!(state.selected_index(), 1);
    assert_eq!(state.click_row(10), None);
}

#[test]
fn outline_state_clamps_selection_on_shrink() {
    let mut state = OutlineState::new();
    state.refresh("# A\n# B\n# C");
    state.click_row(2);

    state.refresh("# A");
    assert_eq!(state.selected_index(), 0);

    state.refresh("");
    assert!(state.selected_row().is_none());
    assert!(!state.move_selection(1));
}

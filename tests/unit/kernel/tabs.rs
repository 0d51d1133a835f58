use super::*;
use crate::kernel::search::SearchResult;

#[test]
fn create_tab_assigns_sequential_ids_and_activates() {
    let mut tabs = Tabs::new();
    let a = tabs.create_tab(None, None, "");
    let b = tabs.create_tab(Some("notes.md"), Some(PathBuf::from("/tmp/notes.md")), "# Notes");

    assert_eq!(a.to_string(), "tab-1");
    assert_eq!(b.to_string(), "tab-2");
    assert_eq!(tabs.active_id(), Some(b));
    assert_eq!(tabs.get(a).map(Tab::title), Some(DEFAULT_TAB_TITLE));
    assert_eq!(tabs.active().map(Tab::title), Some("notes.md"));
}

#[test]
fn search_sessions_are_per_tab() {
    let mut tabs = Tabs::new();
    let a = tabs.create_tab(None, None, "foo foo");
    let b = tabs.create_tab(None, None, "bar");

    let (session, buffer) = tabs.get_mut(a).unwrap().search_mut();
    assert_eq!(session.search(buffer, "foo", false, false).total, 2);

    let tab_b = tabs.get(b).unwrap();
    assert!(!tab_b.search().is_active());

    tabs.set_active(b);
    let (session, buffer) = tabs.active_mut().unwrap().search_mut();
    assert_eq!(session.search(buffer, "foo", false, false), SearchResult::EMPTY);

    assert_eq!(tabs.get(a).unwrap().search().result().total, 2);
}

#[test]
fn closing_modified_tab_needs_confirmation() {
    let mut tabs = Tabs::new();
    let id = tabs.create_tab(None, None, "text");
    assert!(!tabs.get(id).unwrap().is_modified());

    tabs.get_mut(id).unwrap().buffer_mut().insert_text("more ").unwrap();
    assert!(tabs.get(id).unwrap().is_modified());

    assert_eq!(tabs.close_tab(id, false), CloseOutcome::NeedsConfirmation);
    assert!(tabs.get(id).is_some());
    assert_eq!(tabs.close_tab(id, true), CloseOutcome::Closed);
    assert!(tabs.get(id).is_none());
}

#[test]
fn closing_active_tab_activates_last_remaining() {
    let mut tabs = Tabs::new();
    let a = tabs.create_tab(None, None, "");
    let b = tabs.create_tab(None, None, "");
    let c = tabs.create_tab(None, None, "");

    tabs.set_active(a);
    assert_eq!(tabs.close_tab(a, false), CloseOutcome::Closed);
    assert_eq!(tabs.active_id(), Some(c));

    tabs.set_active(b);
    assert_eq!(tabs.close_tab(c, false), CloseOutcome::Closed);
    assert_eq!(tabs.active_id(), Some(b));
}

#[test]
fn closing_last_tab_opens_fresh_one() {
    let mut tabs = Tabs::new();
    let id = tabs.create_tab(Some("a.md"), None, "content");

    assert_eq!(tabs.close_tab(id, false), CloseOutcome::Closed);
    assert_eq!(tabs.len(), 1);

    let fresh = tabs.active().unwrap();
    assert_ne!(fresh.id(), id);
    assert_eq!(fresh.title(), DEFAULT_TAB_TITLE);
    assert!(fresh.buffer().is_empty());
    assert_eq!(tabs.close_tab(id, false), CloseOutcome::NotFound);
}

#[test]
fn mark_saved_updates_path_and_title() {
    let mut tabs = Tabs::new();
    let id = tabs.create_tab(None, None, "");
    tabs.get_mut(id).unwrap().buffer_mut().insert_text("# Hi").unwrap();

    let path = PathBuf::from("/docs/hi.md");
    assert!(tabs.mark_saved(id, Some(path.clone()), Some("hi.md")));

    let tab = tabs.get(id).unwrap();
    assert!(!tab.is_modified());
    assert_eq!(tab.title(), "hi.md");
    assert_eq!(tab.path(), Some(path.as_path()));
    assert_eq!(tabs.find_by_path(&path).map(Tab::id), Some(id));
    assert!(tabs.find_by_path(Path::new("/other.md")).is_none());
}

#[test]
fn set_active_rejects_unknown_ids() {
    let mut tabs = Tabs::new();
    let a = tabs.create_tab(None, None, "");
    tabs.close_tab(a, false);
    assert!(!tabs.set_active(a));
}

#[test]
fn tab_outline_tracks_buffer() {
    let mut tabs = Tabs::new();
    let id = tabs.create_tab(None, None, "# A\n## B");
    assert_eq!(tabs.get(id).unwrap().outline()[0].children.len(), 1);

    tabs.get_mut(id).unwrap().buffer_mut().replace_line(2, "text").unwrap();
    assert!(tabs.get(id).unwrap().outline()[0].children.is_empty());
}

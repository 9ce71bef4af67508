use super::*;

fn cursor_at(x: f32) -> Cursor {
    Cursor { point: Point::new(x, x), brush: Brush::default() }
}

#[test]
fn defaults_match_a_fresh_session() {
    let presence = Presence::new();
    assert_eq!(presence.cursor(), None);
    assert_eq!(presence.brush(), &Brush::default());
    assert!(presence.zoom());
    assert!((presence.zoom_ratio() - 1.0).abs() < f64::EPSILON);
    assert_eq!(presence.selected_layer(), None);
    assert_eq!(presence.users().count(), 0);
}

#[test]
fn fit_uses_drawing_to_canvas_ratio() {
    let mut presence = Presence::new();
    presence.fit(Dimensions::new(960.0, 540.0), Dimensions::new(1920.0, 1080.0));
    assert!((presence.ratio() - 2.0).abs() < f64::EPSILON);
}

#[test]
fn join_then_cursor_updates_keep_insertion_order() {
    let mut presence = Presence::new();
    assert!(presence.add_user("ada"));
    assert!(presence.add_user("bob"));
    assert!(!presence.add_user("ada"));

    presence.update_cursor("ada", Some(cursor_at(3.0)));
    presence.update_cursor("cy", Some(cursor_at(4.0)));

    let names: Vec<&str> = presence.users().map(|(name, _)| name).collect();
    assert_eq!(names, ["ada", "bob", "cy"]);
    assert_eq!(presence.user_cursor("ada"), Some(&cursor_at(3.0)));
    assert_eq!(presence.user_cursor("bob"), None);

    presence.update_cursor("ada", None);
    assert!(presence.has_user("ada"));
    assert_eq!(presence.user_cursor("ada"), None);
}

#[test]
fn replace_users_drops_departed_and_local_user() {
    let mut presence = Presence::new();
    presence.update_cursor("ada", Some(cursor_at(1.0)));
    presence.add_user("gone");

    presence.replace_users(&["me".to_owned(), "ada".to_owned(), "new".to_owned()], "me");

    let names: Vec<&str> = presence.users().map(|(name, _)| name).collect();
    assert_eq!(names, ["ada", "new"]);
    assert_eq!(presence.user_cursor("ada"), Some(&cursor_at(1.0)));
}

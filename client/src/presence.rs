//! Local pointer, brush and viewport, plus what is known of other users.
//!
//! Remote users are only ever learned from inbound `Init`, `Join` and
//! `CursorOut` messages; there is no query for them.

#[cfg(test)]
#[path = "presence_test.rs"]
mod presence_test;

use drawing::{Brush, Dimensions, Point};
use frames::Cursor;
use indexmap::IndexMap;

#[derive(Clone, Debug)]
pub struct Presence {
    cursor: Option<Point>,
    brush: Brush,
    ratio: f64,
    zoom: bool,
    zoom_ratio: f64,
    selected_layer: Option<String>,
    users: IndexMap<String, Option<Cursor>>,
}

impl Default for Presence {
    fn default() -> Self {
        Self {
            cursor: None,
            brush: Brush::default(),
            ratio: 0.0,
            zoom: true,
            zoom_ratio: 1.0,
            selected_layer: None,
            users: IndexMap::new(),
        }
    }
}

impl Presence {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Local pointer in document space; `None` while off the canvas.
    #[must_use]
    pub fn cursor(&self) -> Option<Point> {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: Option<Point>) {
        self.cursor = cursor;
    }

    #[must_use]
    pub fn brush(&self) -> &Brush {
        &self.brush
    }

    pub fn set_brush(&mut self, brush: Brush) {
        self.brush = brush;
    }

    /// Screen-to-document scale last computed by [`Presence::fit`].
    #[must_use]
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Recompute the ratio for a canvas element showing a drawing.
    pub fn fit(&mut self, canvas: Dimensions, drawing: Dimensions) {
        self.ratio = Dimensions::ratio(canvas, drawing);
    }

    /// Whether the view fits the drawing to the canvas.
    #[must_use]
    pub fn zoom(&self) -> bool {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: bool) {
        self.zoom = zoom;
    }

    #[must_use]
    pub fn zoom_ratio(&self) -> f64 {
        self.zoom_ratio
    }

    pub fn set_zoom_ratio(&mut self, zoom_ratio: f64) {
        self.zoom_ratio = zoom_ratio;
    }

    #[must_use]
    pub fn selected_layer(&self) -> Option<&str> {
        self.selected_layer.as_deref()
    }

    pub fn select_layer(&mut self, layer: Option<String>) {
        self.selected_layer = layer;
    }

    /// Remote users in the order they became known, with their last cursor.
    pub fn users(&self) -> impl Iterator<Item = (&str, Option<&Cursor>)> {
        self.users.iter().map(|(name, cursor)| (name.as_str(), cursor.as_ref()))
    }

    #[must_use]
    pub fn user_cursor(&self, username: &str) -> Option<&Cursor> {
        self.users.get(username).and_then(Option::as_ref)
    }

    #[must_use]
    pub fn has_user(&self, username: &str) -> bool {
        self.users.contains_key(username)
    }

    /// Replace the user list from a snapshot. The local user is left out;
    /// cursors of users still present are kept.
    pub fn replace_users(&mut self, users: &[String], local: &str) {
        let mut next = IndexMap::with_capacity(users.len());
        for name in users.iter().filter(|name| name.as_str() != local) {
            let cursor = self.users.swap_remove(name).flatten();
            next.insert(name.clone(), cursor);
        }
        self.users = next;
    }

    /// Record a newly joined user. Returns `false` if already known.
    pub fn add_user(&mut self, username: &str) -> bool {
        if self.users.contains_key(username) {
            return false;
        }
        self.users.insert(username.to_owned(), None);
        true
    }

    /// Store a remote cursor, adding the user if this is the first sign of them.
    pub fn update_cursor(&mut self, username: &str, cursor: Option<Cursor>) {
        self.users.insert(username.to_owned(), cursor);
    }
}

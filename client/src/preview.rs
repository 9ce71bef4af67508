//! Live, uncommitted stroke previews.
//!
//! Each `TempDraw` segment is grouped under the uuid of the instruction it
//! will become. Previews never enter layer history: the group disappears when
//! the matching `Instruction` commits, and all of them go on resync.

#[cfg(test)]
#[path = "preview_test.rs"]
mod preview_test;

use drawing::{Brush, Point};
use frames::TempDraw;
use indexmap::IndexMap;

#[derive(Clone, Debug, PartialEq)]
pub struct Preview {
    pub layer: String,
    /// Brush of the most recent segment.
    pub brush: Brush,
    pub segments: Vec<(Point, Point)>,
}

#[derive(Clone, Debug, Default)]
pub struct Previews {
    live: IndexMap<String, Preview>,
}

impl Previews {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a segment to its preview, starting one if needed.
    pub fn push(&mut self, temp: &TempDraw) {
        let preview = self.live.entry(temp.uuid.clone()).or_insert_with(|| Preview {
            layer: temp.layer.clone(),
            brush: temp.brush.clone(),
            segments: Vec::new(),
        });
        preview.brush = temp.brush.clone();
        preview.segments.push((temp.start, temp.end));
    }

    /// Drop the preview for a committed instruction.
    pub fn remove(&mut self, uuid: &str) -> Option<Preview> {
        self.live.shift_remove(uuid)
    }

    pub fn clear(&mut self) {
        self.live.clear();
    }

    #[must_use]
    pub fn get(&self, uuid: &str) -> Option<&Preview> {
        self.live.get(uuid)
    }

    /// Previews drawn on one layer, oldest first.
    pub fn on_layer<'a>(&'a self, layer: &'a str) -> impl Iterator<Item = (&'a str, &'a Preview)> {
        self.live
            .iter()
            .filter(move |(_, preview)| preview.layer == layer)
            .map(|(uuid, preview)| (uuid.as_str(), preview))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

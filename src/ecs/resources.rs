use bracket_geometry::prelude::Rect;
use smallvec::SmallVec;

use crate::map::{FieldMap, overlaps};

use super::components::Heading;

/// Bounds and impassable terrain, as seen by the movement system.
#[derive(Clone, Debug)]
pub struct FieldContext {
    pub width: i32,
    pub height: i32,
    blocked: Vec<Rect>,
}

impl FieldContext {
    pub fn from_map(map: &FieldMap) -> Self {
        Self {
            width: map.width,
            height: map.height,
            blocked: map.grass.clone(),
        }
    }

    pub fn is_blocked(&self, area: &Rect) -> bool {
        self.blocked.iter().any(|tile| overlaps(tile, area))
    }
}

/// Directional keys held during the current tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub headings: SmallVec<[Heading; 4]>,
    pub run: bool,
}

impl HeldKeys {
    pub fn press(&mut self, heading: Heading) {
        if !self.headings.contains(&heading) {
            self.headings.push(heading);
        }
    }

    pub fn is_held(&self, heading: Heading) -> bool {
        self.headings.contains(&heading)
    }

    pub fn any_direction(&self) -> bool {
        !self.headings.is_empty()
    }

    pub fn release_all(&mut self) {
        self.headings.clear();
        self.run = false;
    }
}

/// What the avatar's last step did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    pub attempted: bool,
    pub blocked: bool,
    pub displacement: u32,
}

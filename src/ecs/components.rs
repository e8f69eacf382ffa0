use bracket_geometry::prelude::Point;
use specs::prelude::{Component, NullStorage, VecStorage};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Heading {
    Up,
    Down,
    Left,
    Right,
}

impl Heading {
    /// Order in which held directions are applied within one tick.
    pub const ALL: [Heading; 4] = [Heading::Up, Heading::Down, Heading::Left, Heading::Right];

    pub fn delta(self) -> Point {
        match self {
            Heading::Up => Point::new(0, -1),
            Heading::Down => Point::new(0, 1),
            Heading::Left => Point::new(-1, 0),
            Heading::Right => Point::new(1, 0),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub point: Point,
}

impl Component for Position {
    type Storage = VecStorage<Self>;
}

/// Square collision box anchored at `Position`.
#[derive(Clone, Debug)]
pub struct Footprint {
    pub size: i32,
}

impl Component for Footprint {
    type Storage = VecStorage<Self>;
}

#[derive(Clone, Debug)]
pub struct Facing {
    pub heading: Heading,
}

impl Component for Facing {
    type Storage = VecStorage<Self>;
}

#[derive(Clone, Debug)]
pub struct Stride {
    pub walk: i32,
    pub run: i32,
}

impl Component for Stride {
    type Storage = VecStorage<Self>;
}

#[derive(Clone, Debug)]
pub struct IntentStep {
    pub delta: Point,
}

impl Default for IntentStep {
    fn default() -> Self {
        Self {
            delta: Point::new(0, 0),
        }
    }
}

impl Component for IntentStep {
    type Storage = VecStorage<Self>;
}

#[derive(Default)]
pub struct AvatarTag;

impl Component for AvatarTag {
    type Storage = NullStorage<Self>;
}

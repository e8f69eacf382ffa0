pub mod components;
pub mod resources;
pub mod systems;

use bracket_geometry::prelude::Point;
use specs::prelude::{
    Builder, Dispatcher, DispatcherBuilder, Entity, World as SpecsWorld, WorldExt,
};

use crate::{config::FieldConfig, map::FieldMap};

use self::{
    components::{AvatarTag, Facing, Footprint, Heading, IntentStep, Position, Stride},
    resources::{FieldContext, HeldKeys, StepReport},
    systems::{MovementSystem, SteeringSystem},
};

/// The walkable overworld: one avatar entity moved by the steering and
/// movement systems against the field's collision context.
pub struct FieldWorld {
    specs_world: SpecsWorld,
    dispatcher: Dispatcher<'static, 'static>,
    avatar: Entity,
    pub ticks: u64,
}

impl FieldWorld {
    pub fn new(map: &FieldMap, config: &FieldConfig) -> Self {
        let mut specs_world = SpecsWorld::new();
        Self::register_components(&mut specs_world);
        specs_world.insert(FieldContext::from_map(map));
        specs_world.insert(HeldKeys::default());
        specs_world.insert(StepReport::default());
        let spawn = map.spawn_point(config.avatar_size);
        let avatar = Self::spawn_avatar(&mut specs_world, spawn, config);
        let dispatcher = DispatcherBuilder::new()
            .with(SteeringSystem, "steering", &[])
            .with(MovementSystem, "movement", &["steering"])
            .build();

        Self {
            specs_world,
            dispatcher,
            avatar,
            ticks: 0,
        }
    }

    fn register_components(world: &mut SpecsWorld) {
        world.register::<Position>();
        world.register::<Footprint>();
        world.register::<Facing>();
        world.register::<Stride>();
        world.register::<IntentStep>();
        world.register::<AvatarTag>();
    }

    fn spawn_avatar(world: &mut SpecsWorld, spawn: Point, config: &FieldConfig) -> Entity {
        world
            .create_entity()
            .with(Position { point: spawn })
            .with(Footprint {
                size: config.avatar_size,
            })
            .with(Facing {
                heading: Heading::Down,
            })
            .with(Stride {
                walk: config.walk_speed,
                run: config.run_speed,
            })
            .with(AvatarTag)
            .build()
    }

    /// Runs one movement tick with the given keys held.
    pub fn advance(&mut self, keys: &HeldKeys) -> StepReport {
        self.specs_world.insert(keys.clone());
        self.dispatcher.dispatch(&self.specs_world);
        self.specs_world.maintain();
        self.ticks = self.ticks.wrapping_add(1);
        *self.specs_world.read_resource::<StepReport>()
    }

    pub fn clear_avatar_intent(&mut self) {
        {
            let mut intents = self.specs_world.write_component::<IntentStep>();
            intents.remove(self.avatar);
        }
        self.specs_world.insert(HeldKeys::default());
    }

    pub fn avatar_point(&self) -> Point {
        let positions = self.specs_world.read_component::<Position>();
        positions
            .get(self.avatar)
            .map(|pos| pos.point)
            .unwrap_or(Point::new(0, 0))
    }

    pub fn avatar_heading(&self) -> Heading {
        let facings = self.specs_world.read_component::<Facing>();
        facings
            .get(self.avatar)
            .map(|facing| facing.heading)
            .unwrap_or(Heading::Down)
    }

    #[cfg(test)]
    pub fn set_avatar_point(&mut self, point: Point) {
        let mut positions = self.specs_world.write_component::<Position>();
        if let Some(pos) = positions.get_mut(self.avatar) {
            pos.point = point;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> FieldWorld {
        let config = FieldConfig::default();
        FieldWorld::new(&FieldMap::generate(&config), &config)
    }

    fn keys(headings: &[Heading], run: bool) -> HeldKeys {
        let mut held = HeldKeys::default();
        for heading in headings {
            held.press(*heading);
        }
        held.run = run;
        held
    }

    #[test]
    fn walking_and_running_speeds() {
        let mut field = world();
        let start = field.avatar_point();
        let report = field.advance(&keys(&[Heading::Down], false));
        assert_eq!(field.avatar_point(), Point::new(start.x, start.y + 2));
        assert_eq!(report.displacement, 2);
        assert_eq!(field.avatar_heading(), Heading::Down);

        let report = field.advance(&keys(&[Heading::Up], true));
        assert_eq!(field.avatar_point(), Point::new(start.x, start.y - 2));
        assert_eq!(report.displacement, 4);
        assert_eq!(field.avatar_heading(), Heading::Up);
    }

    #[test]
    fn diagonal_counts_as_one_stride() {
        let mut field = world();
        let report = field.advance(&keys(&[Heading::Down, Heading::Right], false));
        assert_eq!(report.displacement, 2);
        assert_eq!(field.avatar_heading(), Heading::Right);
    }

    #[test]
    fn grass_blocks_and_reverts() {
        let mut field = world();
        // Flush against the grass column left of the main road, between branches.
        field.set_avatar_point(Point::new(352, 290));
        let report = field.advance(&keys(&[Heading::Left], false));
        assert!(report.attempted);
        assert!(report.blocked);
        assert_eq!(report.displacement, 0);
        assert_eq!(field.avatar_point(), Point::new(352, 290));
    }

    #[test]
    fn field_edges_clamp() {
        let mut field = world();
        field.set_avatar_point(Point::new(380, 1));
        let report = field.advance(&keys(&[Heading::Up], true));
        assert_eq!(field.avatar_point(), Point::new(380, 0));
        assert_eq!(report.displacement, 1);
    }

    #[test]
    fn cleared_intent_leaves_the_avatar_parked() {
        let mut field = world();
        let start = field.avatar_point();
        field.advance(&keys(&[Heading::Down], false));
        field.clear_avatar_intent();
        assert_eq!(*field.specs_world.read_resource::<HeldKeys>(), HeldKeys::default());
        let report = field.advance(&HeldKeys::default());
        assert!(!report.attempted);
        assert_eq!(field.avatar_point(), Point::new(start.x, start.y + 2));
    }

    #[test]
    fn no_keys_no_step() {
        let mut field = world();
        let start = field.avatar_point();
        let report = field.advance(&HeldKeys::default());
        assert!(!report.attempted);
        assert_eq!(field.avatar_point(), start);
        field.clear_avatar_intent();
        assert_eq!(field.ticks, 1);
    }
}

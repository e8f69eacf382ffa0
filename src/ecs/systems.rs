use bracket_geometry::prelude::{Point, Rect};
use bracket_pathfinding::prelude::DistanceAlg;
use specs::prelude::*;

use super::{
    components::{AvatarTag, Facing, Footprint, Heading, IntentStep, Position, Stride},
    resources::{FieldContext, HeldKeys, StepReport},
};

/// Turns the held keys into an intent for the avatar.
#[derive(Default)]
pub struct SteeringSystem;

impl<'a> System<'a> for SteeringSystem {
    type SystemData = (
        Entities<'a>,
        ReadExpect<'a, HeldKeys>,
        ReadStorage<'a, AvatarTag>,
        ReadStorage<'a, Stride>,
        WriteStorage<'a, Facing>,
        WriteStorage<'a, IntentStep>,
    );

    fn run(
        &mut self,
        (entities, keys, avatars, strides, mut facings, mut intents): Self::SystemData,
    ) {
        for (entity, _, stride, facing) in (&entities, &avatars, &strides, &mut facings).join() {
            if !keys.any_direction() {
                intents.remove(entity);
                continue;
            }
            let speed = if keys.run { stride.run } else { stride.walk };
            let mut delta = Point::new(0, 0);
            for heading in Heading::ALL {
                if keys.is_held(heading) {
                    let step = heading.delta();
                    delta.x += step.x * speed;
                    delta.y += step.y * speed;
                    facing.heading = heading;
                }
            }
            let _ = intents.insert(entity, IntentStep { delta });
        }
    }
}

/// Applies intents: clamp to the field, then revert anything that would
/// overlap impassable terrain.
#[derive(Default)]
pub struct MovementSystem;

impl<'a> System<'a> for MovementSystem {
    type SystemData = (
        Entities<'a>,
        WriteStorage<'a, Position>,
        WriteStorage<'a, IntentStep>,
        ReadStorage<'a, Footprint>,
        ReadStorage<'a, AvatarTag>,
        ReadExpect<'a, FieldContext>,
        WriteExpect<'a, StepReport>,
    );

    fn run(
        &mut self,
        (
            entities,
            mut positions,
            mut intents,
            footprints,
            avatars,
            field,
            mut report,
        ): Self::SystemData,
    ) {
        *report = StepReport::default();
        let mut to_clear = Vec::new();

        for (entity, pos, intent, footprint) in
            (&entities, &mut positions, &intents, &footprints).join()
        {
            to_clear.push(entity);
            let previous = pos.point;
            let target = Point::new(
                (previous.x + intent.delta.x).clamp(0, field.width - footprint.size),
                (previous.y + intent.delta.y).clamp(0, field.height - footprint.size),
            );
            let area = Rect::with_size(target.x, target.y, footprint.size, footprint.size);
            let blocked = field.is_blocked(&area);
            if !blocked {
                pos.point = target;
            }

            if avatars.contains(entity) {
                report.attempted = true;
                report.blocked = blocked;
                report.displacement = if blocked {
                    0
                } else {
                    DistanceAlg::Chebyshev.distance2d(previous, target).round() as u32
                };
            }
        }

        for entity in to_clear {
            intents.remove(entity);
        }
    }
}

use bracket_terminal::prelude::{GRAY, RGB};

use crate::{
    party::{
        Monster,
        monster::{DEFAULT_AGE, DEFAULT_WEIGHT},
    },
    rng::Dice,
};

pub const STARTER_NAME: &str = "Doggin";
pub const BOSS_NAME: &str = "Mr. Foster";

/// Wild HP is drawn from `WILD_HP.0..WILD_HP.1` (upper bound exclusive).
pub const WILD_HP: (i32, i32) = (20, 30);
pub const WILD_ATTACK: (i32, i32) = (3, 8);

#[derive(Clone, Debug)]
pub struct SpeciesTemplate {
    pub name: &'static str,
    pub element: &'static str,
    pub glyph: char,
    pub color: RGB,
}

impl SpeciesTemplate {
    const fn new(name: &'static str, element: &'static str, glyph: char, color: RGB) -> Self {
        Self {
            name,
            element,
            glyph,
            color,
        }
    }

    pub fn wild_pool() -> Vec<Self> {
        vec![
            Self::new("Snorb", "Normal", 's', RGB::from_u8(150, 200, 255)),
            Self::new("Fluffin", "Normal", 'f', RGB::from_u8(255, 220, 235)),
            Self::new("Dirtbeast", "Normal", 'd', RGB::from_u8(170, 120, 70)),
            Self::new("Barkachu", "Normal", 'b', RGB::from_u8(250, 230, 90)),
        ]
    }

    pub fn starter() -> Self {
        Self::new(STARTER_NAME, "Normal", 'D', RGB::from_u8(230, 180, 120))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    pub glyph: char,
    pub color: RGB,
}

impl Sprite {
    pub fn placeholder() -> Self {
        Self {
            glyph: '?',
            color: RGB::named(GRAY),
        }
    }
}

/// Looks a sprite up by monster name; unknown names get the placeholder.
pub fn sprite_for(name: &str) -> Sprite {
    if name == BOSS_NAME {
        return boss_sprite(0);
    }
    std::iter::once(SpeciesTemplate::starter())
        .chain(SpeciesTemplate::wild_pool())
        .find(|template| template.name.eq_ignore_ascii_case(name))
        .map(|template| Sprite {
            glyph: template.glyph,
            color: template.color,
        })
        .unwrap_or_else(Sprite::placeholder)
}

/// The boss reddens as it powers up.
pub fn boss_sprite(stage: usize) -> Sprite {
    let heat = (stage.min(4) * 40) as u8;
    Sprite {
        glyph: 'F',
        color: RGB::from_u8(200u8.saturating_add(heat / 2), 200 - heat, 200 - heat),
    }
}

/// Species first, then HP, then attack.
pub fn roll_wild(dice: &mut dyn Dice) -> Monster {
    let pool = SpeciesTemplate::wild_pool();
    let idx = dice.range(0, pool.len() as i32) as usize;
    let template = &pool[idx.min(pool.len() - 1)];
    let hp = dice.range(WILD_HP.0, WILD_HP.1) as u32;
    let attack = dice.range(WILD_ATTACK.0, WILD_ATTACK.1) as u32;
    Monster::new(
        template.name,
        template.element,
        attack,
        DEFAULT_AGE,
        DEFAULT_WEIGHT,
        hp,
    )
}

pub fn boss(max_hp: u32, attack: u32) -> Monster {
    Monster::wild(BOSS_NAME, max_hp, attack)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedDice;

    #[test]
    fn roll_wild_uses_species_then_stats() {
        let mut dice = ScriptedDice::new(&[2, 27, 6], &[]);
        let wild = roll_wild(&mut dice);
        assert_eq!(wild.name(), "Dirtbeast");
        assert_eq!(wild.hp(), 27);
        assert_eq!(wild.max_hp(), 27);
        assert_eq!(wild.attack(), 6);
        assert_eq!(wild.element(), "Normal");
        assert_eq!((wild.age(), wild.weight()), (1, 50));
    }

    #[test]
    fn roll_wild_stays_in_bounds() {
        let mut dice = crate::rng::seeded_dice(Some(99));
        for _ in 0..100 {
            let wild = roll_wild(&mut dice);
            assert!((20..=29).contains(&wild.max_hp()));
            assert!((3..=7).contains(&wild.attack()));
        }
    }

    #[test]
    fn unknown_names_fall_back_to_placeholder() {
        assert_eq!(sprite_for("Missingno").glyph, '?');
        assert_eq!(sprite_for("snorb").glyph, 's');
        assert_eq!(sprite_for(BOSS_NAME).glyph, 'F');
    }
}

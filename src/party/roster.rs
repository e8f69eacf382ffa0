use crate::error::{GameError, GameResult};

use super::Monster;

/// Owned monsters in capture order. Slot 0 is the starter.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    monsters: Vec<Monster>,
}

/// A validated, priced heal waiting for the player to confirm.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HealQuote {
    pub slot: usize,
    pub amount: u32,
    pub cost: u32,
}

impl Roster {
    pub fn with_starter(starter: Monster) -> Self {
        Self {
            monsters: vec![starter],
        }
    }

    pub fn len(&self) -> usize {
        self.monsters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monsters.is_empty()
    }

    pub fn get(&self, slot: usize) -> Option<&Monster> {
        self.monsters.get(slot)
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut Monster> {
        self.monsters.get_mut(slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Monster> {
        self.monsters.iter()
    }

    pub fn push(&mut self, monster: Monster) -> usize {
        self.monsters.push(monster);
        self.monsters.len() - 1
    }

    pub fn first_conscious(&self) -> Option<usize> {
        self.iter().position(|m| !m.is_fainted())
    }

    /// First conscious slot in roster order other than `current`.
    pub fn next_conscious_excluding(&self, current: usize) -> Option<usize> {
        self.monsters
            .iter()
            .enumerate()
            .find(|(slot, m)| *slot != current && !m.is_fainted())
            .map(|(slot, _)| slot)
    }

    pub fn conscious_slots(&self) -> Vec<usize> {
        self.iter()
            .enumerate()
            .filter(|(_, m)| !m.is_fainted())
            .map(|(slot, _)| slot)
            .collect()
    }

    pub fn all_fainted(&self) -> bool {
        self.first_conscious().is_none()
    }

    pub fn heal_all(&mut self) {
        self.monsters.iter_mut().for_each(Monster::heal_to_full);
    }

    /// Slot lookup that also rejects fainted monsters.
    pub fn conscious(&self, slot: usize) -> GameResult<&Monster> {
        let monster = self
            .get(slot)
            .ok_or(GameError::NoSuchMonster { index: slot })?;
        if monster.is_fainted() {
            return Err(GameError::MonsterFainted {
                name: monster.name().to_string(),
            });
        }
        Ok(monster)
    }

    /// Validates the raw heal-amount text and prices it at
    /// `amount / hp_per_coin` coins, rounded down.
    pub fn quote_heal(&self, slot: usize, input: &str, hp_per_coin: u32) -> GameResult<HealQuote> {
        let monster = self
            .get(slot)
            .ok_or(GameError::NoSuchMonster { index: slot })?;
        if monster.missing_hp() == 0 {
            return Err(GameError::AlreadyFull {
                name: monster.name().to_string(),
            });
        }

        let trimmed = input.trim();
        let requested: i64 = trimmed.parse().map_err(|_| GameError::NotANumber {
            input: trimmed.to_string(),
        })?;
        if requested <= 0 {
            return Err(GameError::NonPositiveAmount);
        }
        if requested > i64::from(monster.missing_hp()) {
            return Err(GameError::BeyondMaxHealth {
                name: monster.name().to_string(),
                missing: monster.missing_hp(),
            });
        }

        let amount = requested as u32;
        let cost = amount / hp_per_coin.max(1);
        if cost < 1 {
            return Err(GameError::BelowMinimumPurchase { hp_per_coin });
        }
        Ok(HealQuote { slot, amount, cost })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wounded_roster() -> Roster {
        let mut roster = Roster::with_starter(Monster::starter());
        roster.push(Monster::wild("Snorb", 25, 4));
        roster.get_mut(0).unwrap().take_damage(40);
        roster
    }

    #[test]
    fn conscious_lookup_skips_fainted() {
        let mut roster = wounded_roster();
        roster.push(Monster::wild("Fluffin", 20, 3));
        roster.get_mut(1).unwrap().take_damage(99);
        assert_eq!(roster.first_conscious(), Some(0));
        assert_eq!(roster.next_conscious_excluding(0), Some(2));
        assert_eq!(roster.conscious_slots(), vec![0, 2]);
        assert!(matches!(
            roster.conscious(1),
            Err(GameError::MonsterFainted { .. })
        ));
        assert!(matches!(
            roster.conscious(9),
            Err(GameError::NoSuchMonster { index: 9 })
        ));
    }

    #[test]
    fn heal_all_restores_everyone() {
        let mut roster = wounded_roster();
        roster.get_mut(1).unwrap().take_damage(25);
        assert!(!roster.all_fainted());
        roster.heal_all();
        assert!(roster.iter().all(|m| m.hp() == m.max_hp()));
    }

    #[test]
    fn quote_prices_by_hp_per_coin() {
        let roster = wounded_roster();
        let quote = roster.quote_heal(0, " 23 ", 5).unwrap();
        assert_eq!(
            quote,
            HealQuote {
                slot: 0,
                amount: 23,
                cost: 4
            }
        );
    }

    #[test]
    fn quote_rejections() {
        let roster = wounded_roster();
        assert!(matches!(
            roster.quote_heal(0, "lots", 5),
            Err(GameError::NotANumber { .. })
        ));
        assert_eq!(
            roster.quote_heal(0, "-3", 5),
            Err(GameError::NonPositiveAmount)
        );
        assert_eq!(roster.quote_heal(0, "0", 5), Err(GameError::NonPositiveAmount));
        assert!(matches!(
            roster.quote_heal(0, "41", 5),
            Err(GameError::BeyondMaxHealth { missing: 40, .. })
        ));
        assert_eq!(
            roster.quote_heal(0, "4", 5),
            Err(GameError::BelowMinimumPurchase { hp_per_coin: 5 })
        );
        assert!(matches!(
            roster.quote_heal(1, "5", 5),
            Err(GameError::AlreadyFull { .. })
        ));
    }
}

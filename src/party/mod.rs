pub mod monster;
pub mod roster;

pub use monster::Monster;
pub use roster::{HealQuote, Roster};

use crate::{
    config::GameConfig,
    error::{GameError, GameResult},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Purse {
    coins: u32,
}

impl Purse {
    pub fn new(coins: u32) -> Self {
        Self { coins }
    }

    pub fn coins(&self) -> u32 {
        self.coins
    }

    pub fn add(&mut self, amount: u32) {
        self.coins = self.coins.saturating_add(amount);
    }

    /// All or nothing.
    pub fn spend(&mut self, amount: u32) -> GameResult<()> {
        if self.coins < amount {
            return Err(GameError::InsufficientCoins {
                needed: amount,
                available: self.coins,
            });
        }
        self.coins -= amount;
        Ok(())
    }
}

/// Everything that outlives a single battle: the roster, the purse and
/// the boss-unlock bookkeeping. Only one battle holds it mutably at a time.
#[derive(Clone, Debug)]
pub struct Expedition {
    pub roster: Roster,
    pub purse: Purse,
    battles_won: u32,
    boss_unlock_wins: u32,
    boss_eligible: bool,
    boss_prompt_due: bool,
}

impl Expedition {
    pub fn new(config: &GameConfig) -> Self {
        let mut expedition = Self {
            roster: Roster::with_starter(Monster::starter()),
            purse: Purse::new(config.economy.starting_coins),
            battles_won: 0,
            boss_unlock_wins: config.encounter.boss_unlock_wins,
            boss_eligible: false,
            boss_prompt_due: false,
        };
        for _ in 0..config.encounter.starting_battles_won {
            expedition.record_victory();
        }
        expedition
    }

    pub fn battles_won(&self) -> u32 {
        self.battles_won
    }

    pub fn boss_unlock_wins(&self) -> u32 {
        self.boss_unlock_wins
    }

    pub fn boss_eligible(&self) -> bool {
        self.boss_eligible
    }

    /// Counts a regular win. Returns true when this win unlocked the boss.
    pub fn record_victory(&mut self) -> bool {
        self.battles_won = self.battles_won.saturating_add(1);
        if self.battles_won >= self.boss_unlock_wins && !self.boss_eligible {
            self.boss_eligible = true;
            self.boss_prompt_due = true;
            return true;
        }
        false
    }

    /// Consumes the one-shot "show the boss prompt" request.
    pub fn take_boss_prompt_due(&mut self) -> bool {
        std::mem::take(&mut self.boss_prompt_due)
    }

    /// Any boss conclusion, win or loss, starts the count over.
    pub fn conclude_boss(&mut self) {
        self.battles_won = 0;
        self.boss_eligible = false;
        self.boss_prompt_due = false;
    }

    /// Spends first; the monster is only healed once payment succeeds.
    pub fn purchase_heal(&mut self, quote: HealQuote) -> GameResult<u32> {
        let monster = self
            .roster
            .get(quote.slot)
            .ok_or(GameError::NoSuchMonster { index: quote.slot })?;
        if quote.amount > monster.missing_hp() {
            return Err(GameError::BeyondMaxHealth {
                name: monster.name().to_string(),
                missing: monster.missing_hp(),
            });
        }
        self.purse.spend(quote.cost)?;
        let healed = self
            .roster
            .get_mut(quote.slot)
            .map(|m| m.heal(quote.amount))
            .unwrap_or(0);
        Ok(healed)
    }
}

use smallvec::SmallVec;

use crate::{
    config::BossConfig,
    data::monsters,
    error::{GameError, GameResult},
    party::{Expedition, Monster},
};

use super::{BattleLog, group_thousands};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BossOutcome {
    Victory,
    Defeat,
    Fled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BossPhase {
    Fighting,
    Over(BossOutcome),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StageChange {
    /// Zero-based stage just entered.
    pub stage: usize,
    pub attack: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BossTurn {
    pub stage_changes: SmallVec<[StageChange; 4]>,
}

/// Counter-attacks land at half the boss's attack, never below 1.
pub fn counter_damage(attack: u32) -> u32 {
    (attack / 2).max(1)
}

/// Number of thresholds at or above `percent`, i.e. the stage a boss with
/// that much HP left belongs in.
pub fn stage_for_percent(thresholds: &[u32], percent: u32) -> usize {
    thresholds.iter().filter(|t| percent <= **t).count()
}

/// The multi-stage boss fight. Every threshold the boss's HP percentage
/// drops through raises its attack by `attack_step`, once per stage.
#[derive(Clone, Debug)]
pub struct BossBattle {
    boss: Monster,
    stage: usize,
    thresholds: Vec<u32>,
    attack_step: u32,
    reward: u32,
    active: usize,
    phase: BossPhase,
    log: BattleLog,
}

impl BossBattle {
    /// Refuses when nobody can fight. Only after that check is the whole
    /// roster restored to full HP.
    pub fn start(expedition: &mut Expedition, rules: &BossConfig) -> GameResult<Self> {
        if expedition.roster.all_fainted() {
            return Err(GameError::NoConsciousMonsters);
        }
        expedition.roster.heal_all();
        let active = expedition
            .roster
            .first_conscious()
            .ok_or(GameError::NoConsciousMonsters)?;

        let boss = monsters::boss(rules.max_hp, rules.base_attack);
        let mut log = BattleLog::default();
        log.push("All your monsters were healed to full before the fight!");
        log.push(format!("{} has appeared! Prepare for battle!", boss.name()));
        Ok(Self {
            boss,
            stage: 0,
            thresholds: rules.stage_thresholds.clone(),
            attack_step: rules.attack_step,
            reward: rules.reward,
            active,
            phase: BossPhase::Fighting,
            log,
        })
    }

    pub fn boss(&self) -> &Monster {
        &self.boss
    }

    pub fn stage(&self) -> usize {
        self.stage
    }

    pub fn active_slot(&self) -> usize {
        self.active
    }

    pub fn phase(&self) -> BossPhase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, BossPhase::Over(_))
    }

    pub fn log(&self) -> &BattleLog {
        &self.log
    }

    /// Switches the fighter between turns. Fainted or unknown slots are
    /// rejected and the current fighter stays.
    pub fn select_active(&mut self, slot: usize, expedition: &Expedition) -> GameResult<()> {
        if self.is_over() || slot == self.active {
            return Ok(());
        }
        let monster = expedition.roster.conscious(slot)?;
        self.active = slot;
        self.log.push(format!("Go! {}!", monster.name()));
        Ok(())
    }

    pub fn attack(&mut self, expedition: &mut Expedition) -> BossTurn {
        let mut turn = BossTurn::default();
        if self.is_over() {
            return turn;
        }
        let Some(fighter) = expedition
            .roster
            .get(self.active)
            .filter(|m| !m.is_fainted())
        else {
            self.log.push("You must select an unfainted monster to attack!");
            return turn;
        };
        let (fighter_name, damage) = (fighter.name().to_string(), fighter.attack());
        let boss_name = self.boss.name().to_string();

        self.log.push(format!("{fighter_name} attacks {boss_name}!"));
        self.boss.take_damage(damage);
        self.log.push(format!("You dealt {damage} damage to {boss_name}!"));
        self.advance_stages(&mut turn);

        if self.boss.is_fainted() {
            self.log.push(format!("{boss_name} has been defeated!"));
            expedition.purse.add(self.reward);
            self.log.push(format!("CONGRATULATIONS! You defeated {boss_name}!"));
            self.log.push(format!(
                "You received {} coins!",
                group_thousands(self.reward)
            ));
            self.phase = BossPhase::Over(BossOutcome::Victory);
            return turn;
        }

        let counter = counter_damage(self.boss.attack());
        self.log.push(format!("{boss_name} attacks {fighter_name}!"));
        let fainted = match expedition.roster.get_mut(self.active) {
            Some(fighter) => {
                fighter.take_damage(counter);
                fighter.is_fainted()
            }
            None => true,
        };
        self.log.push(format!("You took {counter} damage from {boss_name}!"));

        if fainted {
            self.log.push(format!("{fighter_name} fainted!"));
            match expedition.roster.next_conscious_excluding(self.active) {
                Some(next) => {
                    self.active = next;
                    if let Some(monster) = expedition.roster.get(next) {
                        self.log.push(format!("Go! {}!", monster.name()));
                    }
                }
                None => {
                    self.log.push(format!(
                        "All your monsters have fainted! You blacked out against {boss_name}."
                    ));
                    self.log.push(format!("Game Over! {boss_name} remains dominant."));
                    self.phase = BossPhase::Over(BossOutcome::Defeat);
                }
            }
        }
        turn
    }

    pub fn flee(&mut self) -> BossPhase {
        if !self.is_over() {
            self.log.push(format!(
                "You fled the battle! {} remains undefeated.",
                self.boss.name()
            ));
            self.phase = BossPhase::Over(BossOutcome::Fled);
        }
        self.phase
    }

    pub fn acknowledge_close(&self) -> Option<BossOutcome> {
        match self.phase {
            BossPhase::Over(outcome) => Some(outcome),
            BossPhase::Fighting => None,
        }
    }

    /// Walks the thresholds one at a time from the current stage so a big
    /// hit through several of them still pays out one step per stage.
    fn advance_stages(&mut self, turn: &mut BossTurn) {
        let target = stage_for_percent(&self.thresholds, self.boss.hp_percent());
        while self.stage < target {
            self.stage += 1;
            let attack = self.boss.attack().saturating_add(self.attack_step);
            self.boss.set_attack(attack);
            self.log.push(format!(
                "{} powers up! His attack increased to {attack}!",
                self.boss.name()
            ));
            self.log.push(format!(
                "{} is now in Stage {}!",
                self.boss.name(),
                self.stage + 1
            ));
            turn.stage_changes.push(StageChange {
                stage: self.stage,
                attack,
            });
        }
    }
}

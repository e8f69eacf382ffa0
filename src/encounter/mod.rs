use bracket_geometry::prelude::Point;

use crate::{
    battle::{BossBattle, BossOutcome, BossTurn, CatchResult, WildBattle, WildOutcome},
    config::GameConfig,
    data::monsters::{self, BOSS_NAME},
    ecs::{FieldWorld, components::Heading, resources::HeldKeys},
    error::{GameError, GameResult},
    journal::Journal,
    map::FieldMap,
    party::{Expedition, HealQuote},
    rng::Dice,
};

/// What currently has the player's attention. Anything but `Idle` is modal
/// and suspends movement.
#[derive(Clone, Debug)]
pub enum Encounter {
    Idle,
    ChoosingLeader { options: Vec<usize> },
    BossPrompt,
    Wild(WildBattle),
    Boss(BossBattle),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateEvent {
    BossPromptOpened,
    LeaderChoiceOpened,
    WildBattleStarted,
    BossBattleStarted,
    Refused(GameError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClosedBattle {
    Wild(WildOutcome),
    Boss(BossOutcome),
}

/// The exploration session: owns the roster and counters, moves the avatar
/// each tick, and decides when a battle starts and when movement resumes.
pub struct EncounterGate {
    pub expedition: Expedition,
    config: GameConfig,
    map: FieldMap,
    field: FieldWorld,
    encounter: Encounter,
    held: HeldKeys,
    distance_since_battle: u32,
    awaiting_fresh_input: bool,
    inventory_open: bool,
    journal: Journal,
}

impl EncounterGate {
    pub fn new(config: GameConfig) -> Self {
        let map = FieldMap::generate(&config.field);
        let field = FieldWorld::new(&map, &config.field);
        Self {
            expedition: Expedition::new(&config),
            journal: Journal::new(config.journal_length),
            config,
            map,
            field,
            encounter: Encounter::Idle,
            held: HeldKeys::default(),
            distance_since_battle: 0,
            awaiting_fresh_input: false,
            inventory_open: false,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn map(&self) -> &FieldMap {
        &self.map
    }

    pub fn encounter(&self) -> &Encounter {
        &self.encounter
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    pub fn note<S: Into<String>>(&mut self, text: S) {
        self.journal.push(text);
    }

    pub fn note_all<I>(&mut self, lines: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.journal.extend(lines);
    }

    pub fn distance_since_battle(&self) -> u32 {
        self.distance_since_battle
    }

    #[cfg(test)]
    pub fn awaiting_fresh_input(&self) -> bool {
        self.awaiting_fresh_input
    }

    #[cfg(test)]
    pub fn held_keys(&self) -> &HeldKeys {
        &self.held
    }

    pub fn avatar_point(&self) -> Point {
        self.field.avatar_point()
    }

    pub fn avatar_heading(&self) -> Heading {
        self.field.avatar_heading()
    }

    pub fn in_battle(&self) -> bool {
        matches!(
            self.encounter,
            Encounter::ChoosingLeader { .. } | Encounter::Wild(_) | Encounter::Boss(_)
        )
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.encounter, Encounter::Idle)
    }

    pub fn boss_eligible(&self) -> bool {
        self.expedition.boss_eligible()
    }

    /// One simulation tick. While anything modal is open the avatar stays
    /// put and no roll is made.
    pub fn tick(&mut self, keys: HeldKeys, dice: &mut dyn Dice) -> Option<GateEvent> {
        self.held = keys;

        if self.is_idle() && self.expedition.take_boss_prompt_due() {
            return Some(self.open_boss_prompt());
        }
        if !self.is_idle() {
            return None;
        }
        if self.awaiting_fresh_input {
            if !self.held.any_direction() {
                return None;
            }
            self.awaiting_fresh_input = false;
        }

        let step = self.field.advance(&self.held);
        if step.blocked || step.displacement == 0 {
            return None;
        }
        self.distance_since_battle = self.distance_since_battle.saturating_add(step.displacement);
        if self.distance_since_battle < self.config.encounter.distance_threshold {
            return None;
        }
        if dice.chance() >= self.config.encounter.chance {
            return None;
        }

        self.distance_since_battle = 0;
        Some(self.begin_encounter(dice))
    }

    fn begin_encounter(&mut self, dice: &mut dyn Dice) -> GateEvent {
        if self.expedition.boss_eligible() {
            return self.open_boss_prompt();
        }

        let options = self.expedition.roster.conscious_slots();
        if options.is_empty() {
            self.journal.push("All your monsters have fainted! You ran away.");
            self.resume_after_modal();
            return GateEvent::Refused(GameError::NoConsciousMonsters);
        }
        if self.expedition.roster.len() > 1 {
            self.encounter = Encounter::ChoosingLeader { options };
            return GateEvent::LeaderChoiceOpened;
        }
        match self.start_wild(options[0], dice) {
            Ok(()) => GateEvent::WildBattleStarted,
            Err(err) => GateEvent::Refused(err),
        }
    }

    fn start_wild(&mut self, leader: usize, dice: &mut dyn Dice) -> GameResult<()> {
        let wild = monsters::roll_wild(dice);
        let battle = WildBattle::start(leader, wild, &self.expedition, &self.config.battle)?;
        self.journal.push(format!("A wild {} appeared!", battle.wild().name()));
        self.encounter = Encounter::Wild(battle);
        Ok(())
    }

    pub fn choose_leader(&mut self, slot: usize, dice: &mut dyn Dice) -> GameResult<()> {
        let Encounter::ChoosingLeader { options } = &self.encounter else {
            return Ok(());
        };
        if !options.contains(&slot) {
            self.expedition.roster.conscious(slot)?;
            return Err(GameError::NoSuchMonster { index: slot });
        }
        self.start_wild(slot, dice)
    }

    pub fn cancel_leader_choice(&mut self) {
        if matches!(self.encounter, Encounter::ChoosingLeader { .. }) {
            self.journal.push("You ran away safely!");
            self.resume_after_modal();
        }
    }

    fn open_boss_prompt(&mut self) -> GateEvent {
        self.encounter = Encounter::BossPrompt;
        self.journal.push(format!(
            "You have defeated {} monsters! Fight {BOSS_NAME}?",
            self.expedition.battles_won()
        ));
        GateEvent::BossPromptOpened
    }

    /// The X key. Only opens the prompt when the boss is unlocked and
    /// nothing else is on screen.
    pub fn request_boss_prompt(&mut self) -> Option<GateEvent> {
        if self.in_battle() {
            self.journal.push("Cannot trigger boss battle: currently in another battle.");
            return None;
        }
        if !self.expedition.boss_eligible() {
            self.journal.push(format!(
                "Boss battle not available yet (defeat {} monsters).",
                self.expedition.boss_unlock_wins()
            ));
            return None;
        }
        if !self.is_idle() {
            return None;
        }
        Some(self.open_boss_prompt())
    }

    /// Declining keeps the boss unlocked for later.
    pub fn answer_boss_prompt(&mut self, accept: bool) -> GameResult<Option<GateEvent>> {
        if !matches!(self.encounter, Encounter::BossPrompt) {
            return Ok(None);
        }
        self.encounter = Encounter::Idle;
        if !accept {
            self.journal.push(format!("{BOSS_NAME} can wait. Press X when you are ready."));
            return Ok(None);
        }
        match BossBattle::start(&mut self.expedition, &self.config.boss) {
            Ok(battle) => {
                self.journal.push(format!("{BOSS_NAME} has appeared!"));
                self.encounter = Encounter::Boss(battle);
                Ok(Some(GateEvent::BossBattleStarted))
            }
            Err(err) => {
                self.journal.push(err.to_string());
                Err(err)
            }
        }
    }

    /// Boss turns are handed back so the caller can react to stage changes.
    /// Each change is also journaled.
    pub fn battle_attack(&mut self) -> Option<BossTurn> {
        match &mut self.encounter {
            Encounter::Wild(battle) => {
                battle.attack(&mut self.expedition);
                None
            }
            Encounter::Boss(battle) => {
                let turn = battle.attack(&mut self.expedition);
                for change in &turn.stage_changes {
                    self.journal.push(format!(
                        "{BOSS_NAME} reached Stage {} (attack {})",
                        change.stage + 1,
                        change.attack
                    ));
                }
                Some(turn)
            }
            _ => None,
        }
    }

    pub fn battle_flee(&mut self) {
        match &mut self.encounter {
            Encounter::Wild(battle) => {
                battle.flee();
            }
            Encounter::Boss(battle) => {
                battle.flee();
            }
            _ => {}
        }
    }

    pub fn resolve_catch(&mut self, accept: bool, dice: &mut dyn Dice) {
        if let Encounter::Wild(battle) = &mut self.encounter {
            battle.resolve_catch(accept, &mut self.expedition, dice);
        }
    }

    pub fn select_boss_fighter(&mut self, slot: usize) -> GameResult<()> {
        match &mut self.encounter {
            Encounter::Boss(battle) => battle.select_active(slot, &self.expedition),
            _ => Ok(()),
        }
    }

    /// Closes a finished battle and hands control back to exploration.
    /// Unfinished battles stay open.
    pub fn close_battle(&mut self) -> Option<ClosedBattle> {
        let closed = match &self.encounter {
            Encounter::Wild(battle) => battle.acknowledge_close().map(ClosedBattle::Wild),
            Encounter::Boss(battle) => battle.acknowledge_close().map(ClosedBattle::Boss),
            _ => None,
        }?;

        let summary = match (&self.encounter, closed) {
            (Encounter::Wild(battle), ClosedBattle::Wild(outcome)) => {
                wild_summary(battle.wild().name(), outcome)
            }
            (_, ClosedBattle::Boss(outcome)) => {
                self.expedition.conclude_boss();
                boss_summary(outcome)
            }
            _ => String::new(),
        };
        self.journal.push(summary);
        self.resume_after_modal();
        Some(closed)
    }

    fn resume_after_modal(&mut self) {
        self.encounter = Encounter::Idle;
        self.awaiting_fresh_input = true;
        self.held.release_all();
        self.field.clear_avatar_intent();
    }

    pub fn inventory_open(&self) -> bool {
        self.inventory_open
    }

    pub fn toggle_inventory(&mut self) {
        self.inventory_open = !self.inventory_open;
    }

    pub fn quote_heal(&self, slot: usize, input: &str) -> GameResult<HealQuote> {
        self.expedition
            .roster
            .quote_heal(slot, input, self.config.economy.heal_hp_per_coin)
    }

    pub fn purchase_heal(&mut self, quote: HealQuote) -> GameResult<u32> {
        match self.expedition.purchase_heal(quote) {
            Ok(healed) => {
                self.journal.push(format!("Healed {healed} HP for {} coins!", quote.cost));
                Ok(healed)
            }
            Err(err) => {
                self.journal.push(err.to_string());
                Err(err)
            }
        }
    }
}

fn wild_summary(name: &str, outcome: WildOutcome) -> String {
    match outcome {
        WildOutcome::Victory(CatchResult::Caught { .. }) => {
            format!("Beat the wild {name} and caught it!")
        }
        WildOutcome::Victory(CatchResult::Escaped) => {
            format!("Beat the wild {name}, but it escaped.")
        }
        WildOutcome::Victory(CatchResult::Declined) => format!("Beat the wild {name}."),
        WildOutcome::Fled => format!("Ran from the wild {name}."),
        WildOutcome::Blackout => "You blacked out...".to_string(),
    }
}

fn boss_summary(outcome: BossOutcome) -> String {
    match outcome {
        BossOutcome::Victory => format!("{BOSS_NAME} is defeated! Victory is yours."),
        BossOutcome::Defeat => format!("{BOSS_NAME} has won this time."),
        BossOutcome::Fled => format!("You fled from {BOSS_NAME}."),
    }
}

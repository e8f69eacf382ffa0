use crate::{
    config::BattleConfig,
    error::GameResult,
    party::{Expedition, Monster},
    rng::Dice,
};

use super::BattleLog;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatchResult {
    Caught { slot: usize },
    Escaped,
    Declined,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WildOutcome {
    Victory(CatchResult),
    Fled,
    Blackout,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WildPhase {
    Fighting,
    /// The wild monster is down and the player must decide on a catch.
    CatchOffer,
    Over(WildOutcome),
}

/// One fight against one freshly rolled wild monster.
///
/// The wild monster never joins the roster itself; a successful catch adds
/// a full-health copy.
#[derive(Clone, Debug)]
pub struct WildBattle {
    wild: Monster,
    active: usize,
    phase: WildPhase,
    log: BattleLog,
    victory_coins: u32,
    catch_chance: f64,
}

impl WildBattle {
    pub fn start(
        leader: usize,
        wild: Monster,
        expedition: &Expedition,
        rules: &BattleConfig,
    ) -> GameResult<Self> {
        expedition.roster.conscious(leader)?;
        let mut log = BattleLog::default();
        log.push(format!("A wild {} appeared!", wild.name()));
        Ok(Self {
            wild,
            active: leader,
            phase: WildPhase::Fighting,
            log,
            victory_coins: rules.victory_coins,
            catch_chance: rules.catch_chance,
        })
    }

    pub fn wild(&self) -> &Monster {
        &self.wild
    }

    pub fn active_slot(&self) -> usize {
        self.active
    }

    pub fn phase(&self) -> WildPhase {
        self.phase
    }

    pub fn log(&self) -> &BattleLog {
        &self.log
    }

    /// One full exchange: the player hits, then the wild monster answers if
    /// it is still standing.
    pub fn attack(&mut self, expedition: &mut Expedition) -> WildPhase {
        if self.phase != WildPhase::Fighting {
            return self.phase;
        }
        let Some(fighter) = expedition.roster.get(self.active) else {
            return self.black_out();
        };
        let (fighter_name, damage) = (fighter.name().to_string(), fighter.attack());

        self.log.push(format!("{fighter_name} attacks!"));
        self.wild.take_damage(damage);
        self.log.push(format!("You dealt {damage} damage!"));

        if self.wild.is_fainted() {
            self.log.push(format!("Wild {} was defeated!", self.wild.name()));
            expedition.purse.add(self.victory_coins);
            if expedition.record_victory() {
                self.log.push(format!(
                    "That makes {} wins. Someone important has noticed you...",
                    expedition.battles_won()
                ));
            }
            self.log.push(format!("You earned {} coins!", self.victory_coins));
            self.log.push(format!(
                "Do you want to try to catch {}? (Y/N)",
                self.wild.name()
            ));
            self.phase = WildPhase::CatchOffer;
            return self.phase;
        }

        let counter = self.wild.attack();
        self.log.push(format!("Wild {} attacks!", self.wild.name()));
        let fainted = match expedition.roster.get_mut(self.active) {
            Some(fighter) => {
                fighter.take_damage(counter);
                fighter.is_fainted()
            }
            None => true,
        };
        self.log.push(format!("You took {counter} damage!"));

        if fainted {
            self.log.push(format!("Your {fighter_name} fainted!"));
            match expedition.roster.next_conscious_excluding(self.active) {
                Some(next) => {
                    self.active = next;
                    if let Some(monster) = expedition.roster.get(next) {
                        self.log.push(format!("Go! {}!", monster.name()));
                    }
                }
                None => return self.black_out(),
            }
        }
        self.phase
    }

    /// Only meaningful while a catch is on offer.
    pub fn resolve_catch(
        &mut self,
        accept: bool,
        expedition: &mut Expedition,
        dice: &mut dyn Dice,
    ) -> WildPhase {
        if self.phase != WildPhase::CatchOffer {
            return self.phase;
        }
        let name = self.wild.name().to_string();
        let result = if !accept {
            self.log.push(format!("You chose not to catch {name}."));
            CatchResult::Declined
        } else if dice.chance() < self.catch_chance {
            let slot = expedition.roster.push(Monster::captured_from(&self.wild));
            self.log.push(format!("{name} was caught!"));
            CatchResult::Caught { slot }
        } else {
            self.log.push(format!("{name} escaped!"));
            CatchResult::Escaped
        };
        self.phase = WildPhase::Over(WildOutcome::Victory(result));
        self.phase
    }

    pub fn flee(&mut self) -> WildPhase {
        if self.phase == WildPhase::Fighting {
            self.log.push("You ran away safely!");
            self.phase = WildPhase::Over(WildOutcome::Fled);
        }
        self.phase
    }

    /// The outcome, once there is one to hand back.
    pub fn acknowledge_close(&self) -> Option<WildOutcome> {
        match self.phase {
            WildPhase::Over(outcome) => Some(outcome),
            _ => None,
        }
    }

    fn black_out(&mut self) -> WildPhase {
        self.log.push("All your monsters have fainted! You blacked out.");
        self.phase = WildPhase::Over(WildOutcome::Blackout);
        self.phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::GameConfig, error::GameError, rng::ScriptedDice};

    fn expedition() -> Expedition {
        Expedition::new(&GameConfig::default())
    }

    fn battle(expedition: &Expedition, wild: Monster) -> WildBattle {
        WildBattle::start(0, wild, expedition, &BattleConfig::default()).unwrap()
    }

    #[test]
    fn victory_pays_out_then_offers_catch() {
        let mut exp = expedition();
        let mut fight = battle(&exp, Monster::wild("Snorb", 20, 5));

        assert_eq!(fight.attack(&mut exp), WildPhase::Fighting);
        assert_eq!(fight.wild().hp(), 10);
        assert_eq!(exp.roster.get(0).unwrap().hp(), 95);

        assert_eq!(fight.attack(&mut exp), WildPhase::CatchOffer);
        assert_eq!(exp.purse.coins(), 5);
        assert_eq!(exp.battles_won(), 1);
        assert_eq!(exp.roster.get(0).unwrap().hp(), 95);
        assert_eq!(fight.acknowledge_close(), None);

        let mut dice = ScriptedDice::new(&[], &[0.0]);
        let phase = fight.resolve_catch(true, &mut exp, &mut dice);
        assert_eq!(
            phase,
            WildPhase::Over(WildOutcome::Victory(CatchResult::Caught { slot: 1 }))
        );
        let caught = exp.roster.get(1).unwrap();
        assert_eq!(caught.name(), "Snorb");
        assert_eq!(caught.hp(), caught.max_hp());
        assert_eq!(caught.max_hp(), 20);
        assert!(fight.wild().is_fainted());
    }

    #[test]
    fn failed_and_declined_catches() {
        let mut exp = expedition();
        let mut fight = battle(&exp, Monster::wild("Fluffin", 10, 3));
        fight.attack(&mut exp);
        let mut dice = ScriptedDice::new(&[], &[0.75]);
        assert_eq!(
            fight.resolve_catch(true, &mut exp, &mut dice),
            WildPhase::Over(WildOutcome::Victory(CatchResult::Escaped))
        );
        assert_eq!(exp.roster.len(), 1);

        let mut fight = battle(&exp, Monster::wild("Fluffin", 10, 3));
        fight.attack(&mut exp);
        let mut dice = ScriptedDice::new(&[], &[]);
        assert_eq!(
            fight.resolve_catch(false, &mut exp, &mut dice),
            WildPhase::Over(WildOutcome::Victory(CatchResult::Declined))
        );
        assert_eq!(dice.chance_draws, 0);
        assert_eq!(fight.log().last(), Some("You chose not to catch Fluffin."));
    }

    #[test]
    fn fainted_fighter_hands_over_to_next_in_roster() {
        let mut exp = expedition();
        exp.roster.push(Monster::wild("Barkachu", 25, 4));
        exp.roster.get_mut(0).unwrap().take_damage(95);
        let mut fight = battle(&exp, Monster::wild("Dirtbeast", 200, 7));

        assert_eq!(fight.attack(&mut exp), WildPhase::Fighting);
        assert!(exp.roster.get(0).unwrap().is_fainted());
        assert_eq!(fight.active_slot(), 1);
        assert_eq!(fight.log().last(), Some("Go! Barkachu!"));

        // Barkachu: 25 -> 18 -> 11 -> 4 -> 0
        for _ in 0..4 {
            fight.attack(&mut exp);
        }
        assert!(exp.roster.get(1).unwrap().is_fainted());
        assert_eq!(fight.phase(), WildPhase::Over(WildOutcome::Blackout));
        assert_eq!(exp.purse.coins(), 0);
        assert_eq!(exp.battles_won(), 0);
    }

    #[test]
    fn flee_ends_fight_and_later_actions_are_inert() {
        let mut exp = expedition();
        let mut fight = battle(&exp, Monster::wild("Snorb", 29, 7));
        assert_eq!(fight.flee(), WildPhase::Over(WildOutcome::Fled));
        let log_len = fight.log().entries().len();

        assert_eq!(fight.attack(&mut exp), WildPhase::Over(WildOutcome::Fled));
        assert_eq!(fight.flee(), WildPhase::Over(WildOutcome::Fled));
        assert_eq!(fight.wild().hp(), 29);
        assert_eq!(fight.log().entries().len(), log_len);
        assert_eq!(fight.acknowledge_close(), Some(WildOutcome::Fled));
        assert_eq!(exp.purse.coins(), 0);
    }

    #[test]
    fn catch_offer_ignores_attack_and_flee() {
        let mut exp = expedition();
        let mut fight = battle(&exp, Monster::wild("Snorb", 5, 7));
        fight.attack(&mut exp);
        assert_eq!(fight.attack(&mut exp), WildPhase::CatchOffer);
        assert_eq!(fight.flee(), WildPhase::CatchOffer);
        assert_eq!(exp.purse.coins(), 5);
    }

    #[test]
    fn cannot_lead_with_a_fainted_monster() {
        let mut exp = expedition();
        exp.roster.get_mut(0).unwrap().take_damage(100);
        let err = WildBattle::start(
            0,
            Monster::wild("Snorb", 20, 3),
            &exp,
            &BattleConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, GameError::MonsterFainted { .. }));
    }

    #[test]
    fn tenth_win_unlocks_the_boss() {
        let mut config = GameConfig::default();
        config.encounter.starting_battles_won = 9;
        let mut exp = Expedition::new(&config);
        let mut fight = battle(&exp, Monster::wild("Snorb", 10, 3));
        fight.attack(&mut exp);
        assert!(exp.boss_eligible());
        assert!(fight.log().entries().iter().any(|l| l.contains("noticed")));
    }
}

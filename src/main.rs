mod battle;
mod config;
mod data;
mod ecs;
mod encounter;
mod error;
mod journal;
mod map;
mod party;
mod render;
mod rng;
mod scripted_input;

use battle::{BossPhase, WildPhase};
use bracket_geometry::prelude::Rect;
use bracket_random::prelude::RandomNumberGenerator;
use bracket_terminal::prelude::*;
use config::GameConfig;
use ecs::{components::Heading, resources::HeldKeys};
use encounter::{Encounter, EncounterGate};
use error::GameError;
use party::HealQuote;
use render::{
    Hud, draw_boss_battle, draw_boss_prompt, draw_field, draw_inventory, draw_leader_choice,
    draw_log, draw_wild_battle,
};
use scripted_input::{ScriptedInput, ScriptedKey};

const SCREEN_WIDTH: i32 = 80;
const SCREEN_HEIGHT: i32 = 50;
const FIELD_ORIGIN_Y: i32 = 5;
const LOG_PANEL_START: i32 = SCREEN_HEIGHT - 6;

/// Inventory heal flow: type an amount, then confirm the price.
enum HealDialog {
    Amount { slot: usize, input: String },
    Confirm(HealQuote),
}

/// Which key map applies this frame.
#[derive(Clone, Copy)]
enum Mode {
    Field,
    Leader,
    Prompt,
    Wild(WildPhase),
    Boss(BossPhase),
}

struct MonsterTrailState {
    gate: EncounterGate,
    dice: RandomNumberGenerator,
    script: Option<ScriptedInput>,
    hud: Hud,
    heal_dialog: Option<HealDialog>,
    frame: u64,
}

impl MonsterTrailState {
    fn new(config: GameConfig, script: Option<ScriptedInput>) -> Self {
        let dice = rng::seeded_dice(config.seed);
        let mut gate = EncounterGate::new(config);
        gate.note_all(
            data::builtin_hints()
                .into_iter()
                .map(|hint| format!("{}: {}", hint.keys, hint.notes)),
        );
        if let Some(script) = &script {
            gate.note(format!("Replaying {} scripted keys.", script.len()));
        }
        Self {
            gate,
            dice,
            script,
            hud: Hud::new(),
            heal_dialog: None,
            frame: 0,
        }
    }
}

impl GameState for MonsterTrailState {
    fn tick(&mut self, ctx: &mut BTerm) {
        let (key, shift) = self.next_input(ctx);
        let held = self.handle_input(ctx, key, shift);
        self.step_gate(held);
        self.frame = self.frame.wrapping_add(1);
        ctx.cls();
        self.draw_scene(ctx);
    }
}

impl MonsterTrailState {
    /// A heal prompt never outlives the field, so any modal the gate opens
    /// drops it.
    fn step_gate(&mut self, held: HeldKeys) {
        self.gate.tick(held, &mut self.dice);
        if !self.gate.is_idle() {
            self.heal_dialog = None;
        }
    }

    /// Scripted keys take over until the script runs dry.
    fn next_input(&mut self, ctx: &BTerm) -> (Option<VirtualKeyCode>, bool) {
        if let Some(ScriptedKey { key, shift }) =
            self.script.as_mut().and_then(ScriptedInput::next_key)
        {
            return (key, shift);
        }
        (ctx.key, ctx.shift)
    }

    fn mode(&self) -> Mode {
        match self.gate.encounter() {
            Encounter::Idle => Mode::Field,
            Encounter::ChoosingLeader { .. } => Mode::Leader,
            Encounter::BossPrompt => Mode::Prompt,
            Encounter::Wild(battle) => Mode::Wild(battle.phase()),
            Encounter::Boss(battle) => Mode::Boss(battle.phase()),
        }
    }

    fn handle_input(
        &mut self,
        ctx: &mut BTerm,
        key: Option<VirtualKeyCode>,
        shift: bool,
    ) -> HeldKeys {
        let mut held = HeldKeys::default();
        let Some(key) = key else {
            return held;
        };

        match self.mode() {
            Mode::Field => self.handle_field_key(ctx, key, shift, &mut held),
            Mode::Leader => match key {
                VirtualKeyCode::Escape => self.gate.cancel_leader_choice(),
                _ => {
                    if let Some(slot) = slot_for_key(key) {
                        if let Err(err) = self.gate.choose_leader(slot, &mut self.dice) {
                            self.gate.note(err.to_string());
                        }
                    }
                }
            },
            Mode::Prompt => match key {
                // Refusals are journaled by the gate.
                VirtualKeyCode::Y => {
                    let _ = self.gate.answer_boss_prompt(true);
                }
                VirtualKeyCode::N | VirtualKeyCode::Escape => {
                    let _ = self.gate.answer_boss_prompt(false);
                }
                _ => {}
            },
            Mode::Wild(WildPhase::Fighting) => match key {
                VirtualKeyCode::F => {
                    self.gate.battle_attack();
                }
                VirtualKeyCode::R => self.gate.battle_flee(),
                _ => {}
            },
            Mode::Wild(WildPhase::CatchOffer) => match key {
                VirtualKeyCode::Y => self.gate.resolve_catch(true, &mut self.dice),
                VirtualKeyCode::N => self.gate.resolve_catch(false, &mut self.dice),
                _ => {}
            },
            Mode::Boss(BossPhase::Fighting) => match key {
                // Stage changes are journaled by the gate.
                VirtualKeyCode::F => {
                    self.gate.battle_attack();
                }
                VirtualKeyCode::R => self.gate.battle_flee(),
                _ => {
                    if let Some(slot) = slot_for_key(key) {
                        if let Err(err) = self.gate.select_boss_fighter(slot) {
                            self.gate.note(err.to_string());
                        }
                    }
                }
            },
            Mode::Wild(WildPhase::Over(_)) | Mode::Boss(BossPhase::Over(_)) => {
                if matches!(
                    key,
                    VirtualKeyCode::C | VirtualKeyCode::Return | VirtualKeyCode::Escape
                ) {
                    self.gate.close_battle();
                }
            }
        }
        held
    }

    fn handle_field_key(
        &mut self,
        ctx: &mut BTerm,
        key: VirtualKeyCode,
        shift: bool,
        held: &mut HeldKeys,
    ) {
        if self.handle_heal_key(key) {
            return;
        }
        if let Some(heading) = heading_for_key(key) {
            held.press(heading);
            held.run = shift;
            return;
        }
        match key {
            VirtualKeyCode::E => {
                self.gate.toggle_inventory();
                self.heal_dialog = None;
            }
            VirtualKeyCode::X => {
                self.gate.request_boss_prompt();
            }
            VirtualKeyCode::Escape => {
                if self.gate.inventory_open() {
                    self.gate.toggle_inventory();
                } else {
                    ctx.quit();
                }
            }
            _ => {
                if !self.gate.inventory_open() {
                    return;
                }
                if let Some(slot) = slot_for_key(key) {
                    self.open_heal_dialog(slot);
                }
            }
        }
    }

    /// Full-health and unknown slots are refused before asking for an amount.
    fn open_heal_dialog(&mut self, slot: usize) {
        match self.gate.quote_heal(slot, "") {
            Err(err @ (GameError::AlreadyFull { .. } | GameError::NoSuchMonster { .. })) => {
                self.gate.note(err.to_string());
            }
            _ => {
                self.heal_dialog = Some(HealDialog::Amount {
                    slot,
                    input: String::new(),
                });
            }
        }
    }

    /// Returns true when the open heal dialog consumed the key.
    fn handle_heal_key(&mut self, key: VirtualKeyCode) -> bool {
        let Some(dialog) = self.heal_dialog.take() else {
            return false;
        };
        match dialog {
            HealDialog::Amount { slot, mut input } => match key {
                VirtualKeyCode::Return => match self.gate.quote_heal(slot, &input) {
                    Ok(quote) => self.heal_dialog = Some(HealDialog::Confirm(quote)),
                    Err(err) => self.gate.note(err.to_string()),
                },
                VirtualKeyCode::Escape => {}
                VirtualKeyCode::Back => {
                    input.pop();
                    self.heal_dialog = Some(HealDialog::Amount { slot, input });
                }
                _ => {
                    let consumed = digit_for_key(key).is_some();
                    if let Some(digit) = digit_for_key(key) {
                        input.push(digit);
                    }
                    self.heal_dialog = Some(HealDialog::Amount { slot, input });
                    return consumed;
                }
            },
            HealDialog::Confirm(quote) => match key {
                VirtualKeyCode::Y => {
                    let _ = self.gate.purchase_heal(quote);
                }
                VirtualKeyCode::N | VirtualKeyCode::Escape => {}
                _ => {
                    self.heal_dialog = Some(HealDialog::Confirm(quote));
                    return false;
                }
            },
        }
        true
    }

    fn heal_dialog_line(&self) -> Option<String> {
        match self.heal_dialog.as_ref()? {
            HealDialog::Amount { slot, input } => {
                let name = self
                    .gate
                    .expedition
                    .roster
                    .get(*slot)
                    .map(|m| m.name().to_string())
                    .unwrap_or_default();
                Some(format!(
                    "Heal {name} by how many HP? {input}_  (1 coin per {} HP)",
                    self.gate.config().economy.heal_hp_per_coin
                ))
            }
            HealDialog::Confirm(quote) => Some(format!(
                "Heal {} HP for {} coins? [Y/N]",
                quote.amount, quote.cost
            )),
        }
    }

    fn draw_scene(&self, ctx: &mut BTerm) {
        self.hud.draw(ctx, &self.gate, self.frame);
        let window = Rect::with_size(
            1,
            FIELD_ORIGIN_Y,
            SCREEN_WIDTH - 2,
            LOG_PANEL_START - 1 - FIELD_ORIGIN_Y,
        );
        draw_field(
            ctx,
            self.gate.map(),
            window,
            self.gate.avatar_point(),
            self.gate.avatar_heading(),
        );

        let roster = &self.gate.expedition.roster;
        match self.gate.encounter() {
            Encounter::Idle => {
                if self.gate.inventory_open() {
                    let line = self.heal_dialog_line();
                    draw_inventory(
                        ctx,
                        roster,
                        self.gate.expedition.purse.coins(),
                        line.as_deref(),
                    );
                }
            }
            Encounter::ChoosingLeader { options } => draw_leader_choice(ctx, roster, options),
            Encounter::BossPrompt => draw_boss_prompt(ctx, self.gate.expedition.battles_won()),
            Encounter::Wild(battle) => draw_wild_battle(ctx, battle, roster),
            Encounter::Boss(battle) => draw_boss_battle(ctx, battle, roster),
        }

        draw_log(ctx, &self.gate.journal().rendered(), LOG_PANEL_START);
    }
}

fn heading_for_key(key: VirtualKeyCode) -> Option<Heading> {
    match key {
        VirtualKeyCode::W | VirtualKeyCode::Up => Some(Heading::Up),
        VirtualKeyCode::S | VirtualKeyCode::Down => Some(Heading::Down),
        VirtualKeyCode::A | VirtualKeyCode::Left => Some(Heading::Left),
        VirtualKeyCode::D | VirtualKeyCode::Right => Some(Heading::Right),
        _ => None,
    }
}

fn digit_for_key(key: VirtualKeyCode) -> Option<char> {
    let digit = match key {
        VirtualKeyCode::Key0 | VirtualKeyCode::Numpad0 => '0',
        VirtualKeyCode::Key1 | VirtualKeyCode::Numpad1 => '1',
        VirtualKeyCode::Key2 | VirtualKeyCode::Numpad2 => '2',
        VirtualKeyCode::Key3 | VirtualKeyCode::Numpad3 => '3',
        VirtualKeyCode::Key4 | VirtualKeyCode::Numpad4 => '4',
        VirtualKeyCode::Key5 | VirtualKeyCode::Numpad5 => '5',
        VirtualKeyCode::Key6 | VirtualKeyCode::Numpad6 => '6',
        VirtualKeyCode::Key7 | VirtualKeyCode::Numpad7 => '7',
        VirtualKeyCode::Key8 | VirtualKeyCode::Numpad8 => '8',
        VirtualKeyCode::Key9 | VirtualKeyCode::Numpad9 => '9',
        _ => return None,
    };
    Some(digit)
}

/// Keys 1-9 pick roster slots 0-8.
fn slot_for_key(key: VirtualKeyCode) -> Option<usize> {
    digit_for_key(key)
        .and_then(|digit| digit.to_digit(10))
        .filter(|value| *value > 0)
        .map(|value| value as usize - 1)
}

#[derive(Debug, Default, PartialEq, Eq)]
struct LaunchOptions {
    config_path: Option<String>,
    script_path: Option<String>,
}

impl LaunchOptions {
    fn parse<I: IntoIterator<Item = String>>(args: I) -> Self {
        let mut options = Self::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            if arg == "--script" {
                options.script_path = args.next();
            } else if options.config_path.is_none() {
                options.config_path = Some(arg);
            } else {
                eprintln!("Warning: ignoring extra argument {arg}");
            }
        }
        options
    }
}

fn main() -> BError {
    let options = LaunchOptions::parse(std::env::args().skip(1));
    let config = match &options.config_path {
        Some(path) => GameConfig::load(path).unwrap_or_else(|err| {
            eprintln!("Warning: {err}. Falling back to defaults.");
            GameConfig::default()
        }),
        None => GameConfig::default(),
    };
    let script = options
        .script_path
        .and_then(|path| match ScriptedInput::from_file(&path) {
            Ok(script) => Some(script),
            Err(err) => {
                eprintln!("Warning: could not read script {path}: {err}");
                None
            }
        });

    let context = BTermBuilder::simple80x50()
        .with_title("Monster Trail")
        .build()?;
    let game_state = MonsterTrailState::new(config, script);
    main_loop(context, game_state)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn launch_options_accept_config_and_script_in_any_order() {
        let parsed = LaunchOptions::parse(args(&["--script", "demo.keys", "trail.json"]));
        assert_eq!(parsed.config_path.as_deref(), Some("trail.json"));
        assert_eq!(parsed.script_path.as_deref(), Some("demo.keys"));
        assert_eq!(LaunchOptions::parse(args(&[])), LaunchOptions::default());
    }

    #[test]
    fn key_helpers() {
        assert_eq!(slot_for_key(VirtualKeyCode::Key1), Some(0));
        assert_eq!(slot_for_key(VirtualKeyCode::Key9), Some(8));
        assert_eq!(slot_for_key(VirtualKeyCode::Key0), None);
        assert_eq!(digit_for_key(VirtualKeyCode::Numpad7), Some('7'));
        assert_eq!(heading_for_key(VirtualKeyCode::Left), Some(Heading::Left));
        assert_eq!(heading_for_key(VirtualKeyCode::F), None);
    }

    fn state() -> MonsterTrailState {
        let mut config = GameConfig::default();
        config.seed = Some(7);
        MonsterTrailState::new(config, None)
    }

    #[test]
    fn encounter_mid_heal_prompt_drops_the_prompt() {
        let mut config = GameConfig::default();
        config.seed = Some(7);
        config.encounter.distance_threshold = 2;
        config.encounter.chance = 1.0;
        let mut game = MonsterTrailState::new(config, None);
        game.gate.toggle_inventory();
        game.gate.expedition.roster.get_mut(0).unwrap().take_damage(30);
        game.heal_dialog = Some(HealDialog::Amount {
            slot: 0,
            input: "2".to_string(),
        });

        let mut held = HeldKeys::default();
        held.press(Heading::Down);
        game.step_gate(held);
        assert!(game.gate.in_battle());
        assert!(game.heal_dialog.is_none());
        assert_eq!(game.heal_dialog_line(), None);
    }

    #[test]
    fn idle_steps_keep_the_heal_prompt() {
        let mut game = state();
        game.gate.toggle_inventory();
        game.heal_dialog = Some(HealDialog::Amount {
            slot: 0,
            input: String::new(),
        });
        game.step_gate(HeldKeys::default());
        assert!(game.gate.is_idle());
        assert!(game.heal_dialog.is_some());
    }

    #[test]
    fn heal_dialog_collects_digits_then_confirms() {
        let mut game = state();
        game.gate.toggle_inventory();
        game.gate.expedition.roster.get_mut(0).unwrap().take_damage(30);
        game.gate.expedition.purse.add(10);

        game.heal_dialog = Some(HealDialog::Amount {
            slot: 0,
            input: String::new(),
        });
        for key in [VirtualKeyCode::Key2, VirtualKeyCode::Key0, VirtualKeyCode::Return] {
            assert!(game.handle_heal_key(key));
        }
        assert!(matches!(
            game.heal_dialog,
            Some(HealDialog::Confirm(HealQuote { amount: 20, cost: 4, .. }))
        ));
        assert!(game.handle_heal_key(VirtualKeyCode::Y));
        assert!(game.heal_dialog.is_none());
        assert_eq!(game.gate.expedition.roster.get(0).unwrap().hp(), 90);
        assert_eq!(game.gate.expedition.purse.coins(), 6);
    }

    #[test]
    fn movement_keys_pass_through_an_open_amount_prompt() {
        let mut game = state();
        game.heal_dialog = Some(HealDialog::Amount {
            slot: 0,
            input: "1".to_string(),
        });
        assert!(!game.handle_heal_key(VirtualKeyCode::W));
        assert!(matches!(
            &game.heal_dialog,
            Some(HealDialog::Amount { input, .. }) if input == "1"
        ));
    }

    #[test]
    fn picking_a_slot_checks_it_first() {
        let mut game = state();
        game.open_heal_dialog(0);
        assert!(game.heal_dialog.is_none());
        assert!(game.gate.journal().contains("Doggin is already at full health."));
        game.open_heal_dialog(4);
        assert!(game.heal_dialog.is_none());
        assert!(game.gate.journal().contains("No monster in slot 4."));

        game.gate.expedition.roster.get_mut(0).unwrap().take_damage(1);
        game.open_heal_dialog(0);
        assert!(matches!(
            game.heal_dialog,
            Some(HealDialog::Amount { slot: 0, .. })
        ));
    }

    #[test]
    fn rejected_quote_is_journaled() {
        let mut game = state();
        game.heal_dialog = Some(HealDialog::Amount {
            slot: 0,
            input: "5".to_string(),
        });
        assert!(game.handle_heal_key(VirtualKeyCode::Return));
        assert!(game.heal_dialog.is_none());
        assert!(game.gate.journal().contains("already at full health"));
    }
}

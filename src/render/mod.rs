use bracket_geometry::prelude::{Point, Rect};
use bracket_terminal::prelude::*;

use crate::{
    battle::{BattleLog, BossBattle, BossPhase, WildBattle, WildPhase},
    data::monsters::{BOSS_NAME, Sprite, boss_sprite, sprite_for},
    ecs::components::Heading,
    encounter::EncounterGate,
    map::FieldMap,
    party::{Monster, Roster},
};

const PANEL_X: i32 = 8;
const PANEL_Y: i32 = 8;
const PANEL_W: i32 = 63;
const PANEL_H: i32 = 30;

pub struct Hud;

impl Hud {
    pub const fn new() -> Self {
        Self
    }

    pub fn draw(&self, ctx: &mut BTerm, gate: &EncounterGate, frame: u64) {
        let (width, _) = ctx.get_char_size();
        ctx.draw_box(
            0,
            0,
            width as i32 - 1,
            4,
            RGB::named(GRAY),
            RGB::named(BLACK),
        );
        ctx.print_color(
            2,
            1,
            RGB::named(WHITE),
            RGB::named(BLACK),
            format!("Monster Trail · Frame {frame}"),
        );

        let encounter = &gate.config().encounter;
        let stats = format!(
            "Distance {}/{}   Coins {}   Wins {}/{}",
            gate.distance_since_battle(),
            encounter.distance_threshold,
            gate.expedition.purse.coins(),
            gate.expedition.battles_won(),
            gate.expedition.boss_unlock_wins(),
        );
        ctx.print_color(2, 2, RGB::named(LIGHT_BLUE), RGB::named(BLACK), stats);

        let (fg, status) = if gate.boss_eligible() {
            (
                RGB::named(ORANGE),
                format!("{BOSS_NAME} awaits. Press X to challenge."),
            )
        } else if gate.inventory_open() {
            (RGB::named(LIGHT_GREEN), "Inventory open (E to close)".to_string())
        } else {
            (RGB::named(DARK_GRAY), "WASD move · Shift run · E inventory".to_string())
        };
        ctx.print_color(2, 3, fg, RGB::named(BLACK), status);
    }
}

pub fn draw_log(ctx: &mut BTerm, log: &[String], start_y: i32) {
    let (width, _) = ctx.get_char_size();
    let height = (log.len() as i32).min(5) + 2;
    let top = (start_y - 1).max(0);
    ctx.draw_box(
        0,
        top,
        width as i32 - 1,
        height,
        RGB::named(DARK_GRAY),
        RGB::named(BLACK),
    );
    ctx.print_color(2, top + 1, RGB::named(WHITE), RGB::named(BLACK), "Journal");
    for (row, entry) in log.iter().take(5).enumerate() {
        ctx.print(2, top + 2 + row as i32, entry);
    }
}

/// Samples the field once per console cell inside `window`.
pub fn draw_field(ctx: &mut BTerm, map: &FieldMap, window: Rect, avatar: Point, heading: Heading) {
    let cols = window.width().max(1);
    let rows = window.height().max(1);
    for cy in 0..rows {
        for cx in 0..cols {
            let world = Point::new(cx * map.width / cols, cy * map.height / rows);
            let (fg, bg, glyph) = if map.is_road(world) {
                (RGB::from_u8(150, 120, 80), RGB::from_u8(60, 45, 25), '.')
            } else {
                (RGB::from_u8(90, 190, 90), RGB::from_u8(20, 60, 20), '"')
            };
            ctx.set(window.x1 + cx, window.y1 + cy, fg, bg, to_cp437(glyph));
        }
    }

    let centre = map.tile_size / 2;
    let ax = window.x1 + ((avatar.x + centre) * cols / map.width).clamp(0, cols - 1);
    let ay = window.y1 + ((avatar.y + centre) * rows / map.height).clamp(0, rows - 1);
    let glyph = match heading {
        Heading::Up => '^',
        Heading::Down => 'v',
        Heading::Left => '<',
        Heading::Right => '>',
    };
    ctx.set(
        ax,
        ay,
        RGB::named(YELLOW),
        RGB::from_u8(60, 45, 25),
        to_cp437(glyph),
    );
}

fn open_panel(ctx: &mut BTerm, title: &str) {
    ctx.draw_box(
        PANEL_X,
        PANEL_Y,
        PANEL_W,
        PANEL_H,
        RGB::named(WHITE),
        RGB::named(BLACK),
    );
    ctx.print_color(
        PANEL_X + 2,
        PANEL_Y,
        RGB::named(YELLOW),
        RGB::named(BLACK),
        format!(" {title} "),
    );
}

fn draw_combatant(ctx: &mut BTerm, x: i32, y: i32, monster: &Monster, sprite: Sprite) {
    ctx.set(x, y, sprite.color, RGB::named(BLACK), to_cp437(sprite.glyph));
    ctx.print(x + 2, y, monster.name());
    let ratio = monster.hp_percent();
    let hp_color = if ratio <= 30 {
        RGB::named(RED)
    } else if ratio <= 60 {
        RGB::named(ORANGE)
    } else {
        RGB::named(GREEN)
    };
    ctx.print_color(
        x + 2,
        y + 1,
        hp_color,
        RGB::named(BLACK),
        format!("HP {}/{}  ATK {}", monster.hp(), monster.max_hp(), monster.attack()),
    );
}

fn draw_battle_log(ctx: &mut BTerm, log: &BattleLog) {
    let top = PANEL_Y + 8;
    let lines = (PANEL_H - 12) as usize;
    for (row, entry) in log.tail(lines).iter().enumerate() {
        ctx.print(PANEL_X + 2, top + row as i32, entry);
    }
}

fn draw_hints(ctx: &mut BTerm, hints: &str) {
    ctx.print_color(
        PANEL_X + 2,
        PANEL_Y + PANEL_H - 2,
        RGB::named(LIGHT_CYAN),
        RGB::named(BLACK),
        hints,
    );
}

pub fn draw_wild_battle(ctx: &mut BTerm, battle: &WildBattle, roster: &Roster) {
    open_panel(ctx, "Wild Battle");
    let wild = battle.wild();
    draw_combatant(ctx, PANEL_X + 36, PANEL_Y + 2, wild, sprite_for(wild.name()));
    if let Some(fighter) = roster.get(battle.active_slot()) {
        draw_combatant(ctx, PANEL_X + 3, PANEL_Y + 5, fighter, sprite_for(fighter.name()));
    }
    draw_battle_log(ctx, battle.log());
    let hints = match battle.phase() {
        WildPhase::Fighting => "[F] Attack   [R] Run",
        WildPhase::CatchOffer => "[Y] Catch it   [N] Let it go",
        WildPhase::Over(_) => "[C] Close",
    };
    draw_hints(ctx, hints);
}

pub fn draw_boss_battle(ctx: &mut BTerm, battle: &BossBattle, roster: &Roster) {
    open_panel(ctx, &format!("{BOSS_NAME} · Stage {}", battle.stage() + 1));
    draw_combatant(
        ctx,
        PANEL_X + 36,
        PANEL_Y + 2,
        battle.boss(),
        boss_sprite(battle.stage()),
    );
    if let Some(fighter) = roster.get(battle.active_slot()) {
        draw_combatant(ctx, PANEL_X + 3, PANEL_Y + 5, fighter, sprite_for(fighter.name()));
    }
    draw_battle_log(ctx, battle.log());
    let hints = match battle.phase() {
        BossPhase::Fighting => "[F] Attack   [R] Run   [1-9] Switch monster",
        BossPhase::Over(_) => "[C] Close",
    };
    draw_hints(ctx, hints);
}

pub fn draw_boss_prompt(ctx: &mut BTerm, battles_won: u32) {
    open_panel(ctx, "A challenger approaches");
    let sprite = boss_sprite(0);
    ctx.set(
        PANEL_X + 3,
        PANEL_Y + 3,
        sprite.color,
        RGB::named(BLACK),
        to_cp437(sprite.glyph),
    );
    ctx.print(
        PANEL_X + 5,
        PANEL_Y + 3,
        format!("You have defeated {battles_won} monsters!"),
    );
    ctx.print(
        PANEL_X + 5,
        PANEL_Y + 4,
        format!("{BOSS_NAME} wants to battle. Your team will be fully healed."),
    );
    draw_hints(ctx, "[Y] Fight   [N] Not yet");
}

/// Rows are numbered from 1 to match the selection keys.
fn draw_roster_rows(ctx: &mut BTerm, roster: &Roster, slots: &[usize], top: i32) {
    for (row, slot) in slots.iter().enumerate() {
        let Some(monster) = roster.get(*slot) else {
            continue;
        };
        let y = top + row as i32;
        let fg = if monster.is_fainted() {
            RGB::named(DARK_GRAY)
        } else {
            RGB::named(WHITE)
        };
        let sprite = sprite_for(monster.name());
        ctx.set(PANEL_X + 3, y, sprite.color, RGB::named(BLACK), to_cp437(sprite.glyph));
        ctx.print_color(
            PANEL_X + 5,
            y,
            fg,
            RGB::named(BLACK),
            format!(
                "[{}] {:<10} HP {:>3}/{:<3} ATK {:>2}  {:<7} {}y {}kg",
                slot + 1,
                monster.name(),
                monster.hp(),
                monster.max_hp(),
                monster.attack(),
                monster.element(),
                monster.age(),
                monster.weight()
            ),
        );
    }
}

pub fn draw_leader_choice(ctx: &mut BTerm, roster: &Roster, options: &[usize]) {
    open_panel(ctx, "Choose your monster");
    draw_roster_rows(ctx, roster, options, PANEL_Y + 2);
    draw_hints(ctx, "[1-9] Send out   [Esc] Run away");
}

pub fn draw_inventory(ctx: &mut BTerm, roster: &Roster, coins: u32, dialog: Option<&str>) {
    open_panel(ctx, &format!("Monsters · {coins} coins"));
    if roster.is_empty() {
        ctx.print(PANEL_X + 3, PANEL_Y + 2, "You have no monsters.");
    }
    let slots: Vec<usize> = (0..roster.len()).collect();
    draw_roster_rows(ctx, roster, &slots, PANEL_Y + 2);
    if let Some(line) = dialog {
        ctx.print_color(
            PANEL_X + 2,
            PANEL_Y + PANEL_H - 4,
            RGB::named(YELLOW),
            RGB::named(BLACK),
            line,
        );
    }
    draw_hints(ctx, "[1-9] Heal a monster   [E] Close");
}

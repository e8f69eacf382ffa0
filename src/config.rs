use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};

/// Tunables for one play session. Every field has a default, so a config
/// file only needs to name the values it overrides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub field: FieldConfig,
    pub encounter: EncounterConfig,
    pub battle: BattleConfig,
    pub boss: BossConfig,
    pub economy: EconomyConfig,
    pub journal_length: usize,
    pub seed: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub width: i32,
    pub height: i32,
    pub tile_size: i32,
    pub road_width: i32,
    pub avatar_size: i32,
    pub walk_speed: i32,
    pub run_speed: i32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncounterConfig {
    /// Distance the avatar must cover before any roll is attempted.
    pub distance_threshold: u32,
    /// Per-tick probability of a battle once the threshold is met.
    pub chance: f64,
    pub boss_unlock_wins: u32,
    pub starting_battles_won: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    pub victory_coins: u32,
    pub catch_chance: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BossConfig {
    pub max_hp: u32,
    pub base_attack: u32,
    pub attack_step: u32,
    /// Remaining-HP percentages, strictly descending.
    pub stage_thresholds: Vec<u32>,
    pub reward: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    pub starting_coins: u32,
    pub heal_hp_per_coin: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field: FieldConfig::default(),
            encounter: EncounterConfig::default(),
            battle: BattleConfig::default(),
            boss: BossConfig::default(),
            economy: EconomyConfig::default(),
            journal_length: 8,
            seed: None,
        }
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            tile_size: 32,
            road_width: 48,
            avatar_size: 32,
            walk_speed: 2,
            run_speed: 4,
        }
    }
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self {
            distance_threshold: 500,
            chance: 0.01,
            boss_unlock_wins: 10,
            starting_battles_won: 0,
        }
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            victory_coins: 5,
            catch_chance: 0.75,
        }
    }
}

impl Default for BossConfig {
    fn default() -> Self {
        Self {
            max_hp: 200,
            base_attack: 10,
            attack_step: 10,
            stage_thresholds: vec![80, 60, 40, 20],
            reward: 999_999,
        }
    }
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            starting_coins: 0,
            heal_hp_per_coin: 5,
        }
    }
}

impl GameConfig {
    pub fn from_json(text: &str) -> GameResult<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|err| GameError::ConfigInvalid(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> GameResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|err| GameError::ConfigUnreadable {
            path: path.display().to_string(),
            reason: err.to_string(),
        })?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> GameResult<()> {
        let invalid = |msg: &str| Err(GameError::ConfigInvalid(msg.to_string()));

        let field = &self.field;
        if field.width <= field.avatar_size || field.height <= field.avatar_size {
            return invalid("field must be larger than the avatar");
        }
        if field.tile_size <= 0 || field.road_width <= 0 || field.avatar_size <= 0 {
            return invalid("tile, road and avatar sizes must be positive");
        }
        if field.walk_speed <= 0 || field.run_speed <= 0 {
            return invalid("speeds must be positive");
        }
        if !(0.0..=1.0).contains(&self.encounter.chance) {
            return invalid("encounter.chance must lie in [0, 1]");
        }
        if !(0.0..=1.0).contains(&self.battle.catch_chance) {
            return invalid("battle.catch_chance must lie in [0, 1]");
        }
        if self.encounter.boss_unlock_wins == 0 {
            return invalid("encounter.boss_unlock_wins must be at least 1");
        }
        if self.boss.max_hp == 0 {
            return invalid("boss.max_hp must be positive");
        }
        let thresholds = &self.boss.stage_thresholds;
        if thresholds.is_empty() {
            return invalid("boss.stage_thresholds must not be empty");
        }
        if thresholds.windows(2).any(|pair| pair[0] <= pair[1]) || thresholds[0] > 100 {
            return invalid("boss.stage_thresholds must descend strictly from at most 100");
        }
        if self.economy.heal_hp_per_coin == 0 {
            return invalid("economy.heal_hp_per_coin must be positive");
        }
        Ok(())
    }
}

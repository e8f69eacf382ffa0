use thiserror::Error;

/// Everything the game can refuse to do.
///
/// Errors are user-facing: the front end prints their `Display` text in
/// the journal or in the active dialog. No variant is fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid input '{input}'. Please enter a number.")]
    NotANumber { input: String },

    #[error("Enter a positive number.")]
    NonPositiveAmount,

    #[error("{name} is already at full health.")]
    AlreadyFull { name: String },

    #[error("Error: beyond max health ({name} can take at most {missing} HP).")]
    BeyondMaxHealth { name: String, missing: u32 },

    #[error("You must heal at least {hp_per_coin} HP (costs 1 coin).")]
    BelowMinimumPurchase { hp_per_coin: u32 },

    #[error("Broke! Not enough coins ({needed} needed, {available} held).")]
    InsufficientCoins { needed: u32, available: u32 },

    #[error("All your monsters have fainted! You cannot fight right now.")]
    NoConsciousMonsters,

    #[error("No monster in slot {index}.")]
    NoSuchMonster { index: usize },

    #[error("{name} has fainted and cannot fight.")]
    MonsterFainted { name: String },

    #[error("Could not read config '{path}': {reason}")]
    ConfigUnreadable { path: String, reason: String },

    #[error("Invalid config: {0}")]
    ConfigInvalid(String),
}

pub type GameResult<T> = Result<T, GameError>;

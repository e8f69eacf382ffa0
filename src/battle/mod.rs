pub mod boss;
pub mod wild;

pub use boss::{BossBattle, BossOutcome, BossPhase, BossTurn, StageChange};
pub use wild::{CatchResult, WildBattle, WildOutcome, WildPhase};

/// Ordered battle narration. The front end shows the tail of it.
#[derive(Clone, Debug, Default)]
pub struct BattleLog {
    entries: Vec<String>,
}

impl BattleLog {
    pub fn push<S: Into<String>>(&mut self, entry: S) {
        self.entries.push(entry.into());
    }

    #[cfg(test)]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn tail(&self, count: usize) -> &[String] {
        let start = self.entries.len().saturating_sub(count);
        &self.entries[start..]
    }

    #[cfg(test)]
    pub fn last(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }
}

/// `999999` -> `"999,999"`.
pub fn group_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

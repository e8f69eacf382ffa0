pub mod monsters;

#[derive(Clone, Debug)]
pub struct ControlHint {
    pub keys: &'static str,
    pub notes: &'static str,
}

/// Seeded into the journal at start-up.
pub fn builtin_hints() -> Vec<ControlHint> {
    vec![
        ControlHint {
            keys: "WASD",
            notes: "walk the road; hold Shift to run",
        },
        ControlHint {
            keys: "E",
            notes: "open your monsters and buy heals",
        },
        ControlHint {
            keys: "X",
            notes: "challenge the boss once unlocked",
        },
        ControlHint {
            keys: "F/R",
            notes: "fight or run during a battle",
        },
    ]
}

use crate::data::monsters::STARTER_NAME;

const DEFAULT_ELEMENT: &str = "Normal";
const DEFAULT_ATTACK: u32 = 10;
pub const DEFAULT_AGE: u32 = 1;
pub const DEFAULT_WEIGHT: u32 = 50;
const DEFAULT_HP: u32 = 100;

/// A collectible monster.
///
/// `hp` always stays within `0..=max_hp`; every mutation clamps. `element`,
/// `age` and `weight` are flavour and never enter battle arithmetic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Monster {
    name: String,
    element: String,
    attack: u32,
    age: u32,
    weight: u32,
    hp: u32,
    max_hp: u32,
}

impl Default for Monster {
    fn default() -> Self {
        Self::starter()
    }
}

impl Monster {
    /// `max_hp` is fixed to the starting `hp`, raised to 1 if zero.
    pub fn new(
        name: impl Into<String>,
        element: impl Into<String>,
        attack: u32,
        age: u32,
        weight: u32,
        hp: u32,
    ) -> Self {
        let max_hp = hp.max(1);
        Self {
            name: name.into(),
            element: element.into(),
            attack,
            age,
            weight,
            hp: max_hp,
            max_hp,
        }
    }

    pub fn starter() -> Self {
        Self::with_element(STARTER_NAME, DEFAULT_ELEMENT)
    }

    pub fn with_element(name: impl Into<String>, element: impl Into<String>) -> Self {
        Self::new(
            name,
            element,
            DEFAULT_ATTACK,
            DEFAULT_AGE,
            DEFAULT_WEIGHT,
            DEFAULT_HP,
        )
    }

    pub fn wild(name: impl Into<String>, hp: u32, attack: u32) -> Self {
        Self::new(
            name,
            DEFAULT_ELEMENT,
            attack,
            DEFAULT_AGE,
            DEFAULT_WEIGHT,
            hp,
        )
    }

    /// Fresh copy of `other` at full health. `other` is left untouched.
    pub fn captured_from(other: &Monster) -> Self {
        Self::new(
            other.name.clone(),
            other.element.clone(),
            other.attack,
            other.age,
            other.weight,
            other.max_hp,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn element(&self) -> &str {
        &self.element
    }

    pub fn attack(&self) -> u32 {
        self.attack
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn weight(&self) -> u32 {
        self.weight
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    /// HP still missing before the monster is full.
    pub fn missing_hp(&self) -> u32 {
        self.max_hp - self.hp
    }

    pub fn set_attack(&mut self, attack: u32) {
        self.attack = attack;
    }

    pub fn is_fainted(&self) -> bool {
        self.hp == 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
    }

    /// Returns the HP actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
        self.hp - before
    }

    pub fn heal_to_full(&mut self) {
        self.hp = self.max_hp;
    }

    /// Whole-percent HP remaining, truncated.
    pub fn hp_percent(&self) -> u32 {
        (u64::from(self.hp) * 100 / u64::from(self.max_hp)) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn constructors_share_defaults() {
        let starter = Monster::starter();
        assert_eq!(starter.name(), "Doggin");
        assert_eq!(starter.element(), "Normal");
        assert_eq!(starter.attack(), 10);
        assert_eq!(starter.age(), 1);
        assert_eq!(starter.weight(), 50);
        assert_eq!((starter.hp(), starter.max_hp()), (100, 100));

        let sparky = Monster::with_element("Sparky", "Electric");
        assert_eq!(sparky.element(), "Electric");
        assert_eq!(sparky.attack(), 10);

        let wild = Monster::wild("Snorb", 24, 5);
        assert_eq!(wild.element(), "Normal");
        assert_eq!((wild.hp(), wild.max_hp(), wild.attack()), (24, 24, 5));
    }

    #[test]
    fn fainting_and_full_heal() {
        let mut monster = Monster::wild("Fluffin", 20, 3);
        monster.take_damage(25);
        assert!(monster.is_fainted());
        assert_eq!(monster.hp(), 0);
        monster.heal_to_full();
        assert_eq!(monster.hp(), 20);
        assert!(!monster.is_fainted());
    }

    #[test]
    fn capture_copy_is_fresh() {
        let mut wild = Monster::wild("Barkachu", 22, 7);
        wild.take_damage(22);
        let caught = Monster::captured_from(&wild);
        assert_eq!(caught.hp(), caught.max_hp());
        assert_eq!(caught.max_hp(), 22);
        assert_eq!(caught.attack(), 7);
        assert!(wild.is_fainted());
    }

    #[test]
    fn percent_truncates() {
        let mut boss = Monster::wild("Mr. Foster", 200, 10);
        boss.take_damage(41);
        assert_eq!(boss.hp_percent(), 79);
    }

    proptest! {
        #[test]
        fn damage_clamps_at_zero(max in 1u32..500, dmg_before in 0u32..600, dmg in 0u32..1000) {
            let mut monster = Monster::wild("Snorb", max, 4);
            monster.take_damage(dmg_before);
            let old = monster.hp();
            monster.take_damage(dmg);
            prop_assert_eq!(monster.hp(), old.saturating_sub(dmg));
            prop_assert!(monster.hp() <= monster.max_hp());
        }

        #[test]
        fn heal_clamps_at_max(max in 1u32..500, dmg in 0u32..600, amount in 0u32..1000) {
            let mut monster = Monster::wild("Snorb", max, 4);
            monster.take_damage(dmg);
            let old = monster.hp();
            let healed = monster.heal(amount);
            prop_assert_eq!(monster.hp(), (old + amount).min(max));
            prop_assert_eq!(healed, monster.hp() - old);
        }
    }
}

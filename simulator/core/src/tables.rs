//! Static Care-Action Catalogs and Stat Arithmetic
//!
//! The simulator never hardcodes what food, games, or sleep options exist.
//! It receives an [`ActionTables`] at construction; `Default` provides the
//! standard catalog. Tests inject custom tables for deterministic behavior.
//!
//! Stats live in `[0, 100]` and weight has a hard floor; every mutation in
//! the crate goes through [`clamp_stat`] / [`clamp_weight`].

/// Lower bound of every stat (hunger, happiness, health, energy).
pub const STAT_MIN: i32 = 0;

/// Upper bound of every stat.
pub const STAT_MAX: i32 = 100;

/// A pet never weighs less than this many grams.
pub const MIN_WEIGHT: f64 = 10.0;

/// Clamp a stat value into `[STAT_MIN, STAT_MAX]`.
#[must_use]
pub fn clamp_stat(value: i32) -> i32 {
    value.clamp(STAT_MIN, STAT_MAX)
}

/// Clamp a weight to the floor. Weight has no ceiling.
#[must_use]
pub fn clamp_weight(grams: f64) -> f64 {
    grams.max(MIN_WEIGHT)
}

/// A food the pet can be fed.
#[derive(Clone, Debug, PartialEq)]
pub struct Food {
    /// Display name, including its icon.
    pub name: String,
    /// Hunger reduction when eaten.
    pub nutrition: i32,
    /// Happiness gain when eaten.
    pub happiness: i32,
    /// Energy gain when eaten.
    pub energy: i32,
    /// Weight gain in grams.
    pub weight_gain: f64,
}

/// A game the pet can play.
#[derive(Clone, Debug, PartialEq)]
pub struct Game {
    /// Display name, including its icon.
    pub name: String,
    /// Happiness gain from playing.
    pub happiness: i32,
    /// Energy delta, typically negative.
    pub energy_delta: i32,
    /// Health gain from the exercise.
    pub health: i32,
    /// Weight loss in grams.
    pub weight_loss: f64,
}

/// A way to put the pet to sleep.
///
/// The duration in the name is descriptive only; sleeping never advances
/// the simulation clock.
#[derive(Clone, Debug, PartialEq)]
pub struct SleepOption {
    /// Display name, including its icon and nominal duration.
    pub name: String,
    /// Energy restored.
    pub energy_gain: i32,
    /// Health restored.
    pub health_gain: i32,
    /// Happiness gained.
    pub happiness_gain: i32,
}

/// The complete set of care actions available to the simulator.
#[derive(Clone, Debug)]
pub struct ActionTables {
    /// Foods offered by the feed menu.
    pub foods: Vec<Food>,
    /// Games offered by the play menu.
    pub games: Vec<Game>,
    /// Sleep options offered by the sleep menu.
    pub sleeps: Vec<SleepOption>,
}

impl Default for ActionTables {
    fn default() -> Self {
        Self {
            foods: standard_foods(),
            games: standard_games(),
            sleeps: standard_sleeps(),
        }
    }
}

fn food(name: &str, nutrition: i32, happiness: i32, energy: i32, weight_gain: f64) -> Food {
    Food {
        name: name.to_string(),
        nutrition,
        happiness,
        energy,
        weight_gain,
    }
}

fn game(name: &str, happiness: i32, energy_delta: i32, health: i32, weight_loss: f64) -> Game {
    Game {
        name: name.to_string(),
        happiness,
        energy_delta,
        health,
        weight_loss,
    }
}

fn sleep(name: &str, energy_gain: i32, health_gain: i32, happiness_gain: i32) -> SleepOption {
    SleepOption {
        name: name.to_string(),
        energy_gain,
        health_gain,
        happiness_gain,
    }
}

/// The standard food catalog.
#[must_use]
pub fn standard_foods() -> Vec<Food> {
    vec![
        food("🍎 Apple", 20, 5, 10, 0.5),
        food("🍕 Pizza", 40, 15, 20, 2.0),
        food("🥗 Salad", 15, 3, 5, 0.2),
        food("🍔 Burger", 50, 20, 25, 3.0),
        food("🍦 Ice Cream", 10, 25, 15, 1.5),
        food("🥕 Carrot", 25, 8, 12, 0.3),
        food("🍫 Chocolate", 15, 30, 20, 1.0),
        food("🥩 Steak", 60, 10, 30, 4.0),
    ]
}

/// The standard game catalog.
#[must_use]
pub fn standard_games() -> Vec<Game> {
    vec![
        game("🎾 Play Ball", 20, -15, 5, 0.5),
        game("🏃‍♂️ Run Around", 15, -25, 10, 1.0),
        game("🎵 Sing Songs", 25, -5, 3, 0.1),
        game("🎨 Draw Pictures", 30, -10, 2, 0.2),
        game("🧩 Solve Puzzle", 35, -20, 8, 0.3),
        game("🎭 Dance Party", 40, -30, 12, 1.5),
        game("📚 Read Books", 15, -5, 5, 0.1),
        game("🎪 Play Hide & Seek", 25, -20, 7, 0.8),
    ]
}

/// The standard sleep catalog.
#[must_use]
pub fn standard_sleeps() -> Vec<SleepOption> {
    vec![
        sleep("😴 Short Nap (30 min)", 20, 5, 5),
        sleep("😪 Medium Sleep (2 hours)", 50, 15, 10),
        sleep("😴 Long Sleep (6 hours)", 80, 25, 15),
        sleep("😴 Full Night (8 hours)", 100, 30, 20),
    ]
}

//! Section Pages
//!
//! Builds the list content for each UI section from a pet snapshot and an
//! event copy. Pure functions of their inputs; no locks, no simulator
//! access, so everything here is unit-testable without a terminal.

use chrono::{DateTime, Local, Utc};
use ratatui::text::Line;
use ratatui::widgets::ListItem;

use simulator_core::{format_offline_gap, Food, Game, GameEvent, Pet, SleepOption};

use crate::theme;

/// Width of the stat progress bars, in cells.
const BAR_WIDTH: usize = 20;

/// One rendered section: its rows plus which rows trigger actions.
pub struct Page {
    /// List rows, top to bottom.
    pub items: Vec<ListItem<'static>>,
    /// `(first_row, len)` of the actionable rows, when the section has
    /// any. Row `first_row + i` maps to table index `i`.
    pub action_range: Option<(usize, usize)>,
}

impl Page {
    fn plain(lines: Vec<String>) -> Self {
        Self {
            items: lines.into_iter().map(text_item).collect(),
            action_range: None,
        }
    }

    /// Table index for a selected row, if the row is actionable.
    pub fn action_at(&self, row: usize) -> Option<usize> {
        let (first, len) = self.action_range?;
        if row >= first && row < first + len {
            Some(row - first)
        } else {
            None
        }
    }
}

fn text_item(line: String) -> ListItem<'static> {
    ListItem::new(Line::styled(line, theme::TEXT))
}

fn header_item(line: &str) -> ListItem<'static> {
    ListItem::new(Line::styled(line.to_string(), theme::HEADER))
}

fn local_hhmm(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%H:%M").to_string()
}

/// A 20-cell stat bar with a percentage prefix, e.g. `[55%] ███████████░...`.
pub fn progress_bar(current: i32) -> String {
    let filled = (current.clamp(0, 100) as usize * BAR_WIDTH) / 100;
    format!(
        "[{}%] {}{}",
        current,
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH - filled)
    )
}

/// The status section: identity, stats with bars, last actions.
pub fn status_page(pet: &Pet) -> Page {
    let status = if pet.alive { "🟢 Alive" } else { "🔴 Dead" };

    let hunger_icon = match pet.hunger {
        h if h > 80 => "🔴",
        h if h > 60 => "🟡",
        _ => "🟢",
    };
    let happiness_icon = match pet.happiness {
        h if h < 20 => "😢",
        h if h < 50 => "😐",
        _ => "😊",
    };
    let health_icon = match pet.health {
        h if h < 30 => "🔴",
        h if h < 70 => "🟡",
        _ => "🟢",
    };
    let energy_icon = match pet.energy {
        e if e < 20 => "😴",
        e if e < 50 => "😪",
        _ => "⚡",
    };

    let alive_for = (Utc::now() - pet.created_at)
        .to_std()
        .unwrap_or_default();

    Page::plain(vec![
        format!("Status: {status}"),
        format!("Name: {}", pet.name),
        format!("Age: {} days", pet.age_days),
        format!("Stage: {}", pet.stage),
        format!("Weight: {:.1} grams", pet.weight),
        String::new(),
        "=== STATS ===".to_string(),
        format!("Hunger: {} {}", hunger_icon, progress_bar(pet.hunger)),
        format!(
            "Happiness: {} {}",
            happiness_icon,
            progress_bar(pet.happiness)
        ),
        format!("Health: {} {}", health_icon, progress_bar(pet.health)),
        format!("Energy: {} {}", energy_icon, progress_bar(pet.energy)),
        String::new(),
        "=== LAST ACTIONS ===".to_string(),
        format!("Last Fed: {}", local_hhmm(pet.last_fed)),
        format!("Last Play: {}", local_hhmm(pet.last_played)),
        format!("Last Sleep: {}", local_hhmm(pet.last_slept)),
        String::new(),
        "=== INFO ===".to_string(),
        format!(
            "Created: {}",
            pet.created_at
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M")
        ),
        format!("Time Alive: {}", format_offline_gap(alive_for)),
    ])
}

fn dead_page(verb: &str) -> Page {
    Page::plain(vec![
        "Your tamagotchi has passed away... 💔".to_string(),
        format!("Cannot {verb} a dead tamagotchi"),
    ])
}

/// The feed section: the food catalog plus current feeding info.
pub fn feed_page(pet: &Pet, foods: &[Food]) -> Page {
    if !pet.alive {
        return dead_page("feed");
    }

    let mut items = vec![header_item("=== AVAILABLE FOOD ==="), text_item(String::new())];
    let first = items.len();
    for food in foods {
        items.push(text_item(format!(
            "{} (Nutrition: {}, Happiness: {}, Energy: {}, Weight: +{:.1}g)",
            food.name, food.nutrition, food.happiness, food.energy, food.weight_gain
        )));
    }
    items.push(text_item(String::new()));
    items.push(header_item("=== FEEDING INFO ==="));
    items.push(text_item(format!("Current Hunger: {}/100", pet.hunger)));
    items.push(text_item(format!("Current Weight: {:.1} grams", pet.weight)));
    items.push(text_item(format!("Last Fed: {}", local_hhmm(pet.last_fed))));

    Page {
        items,
        action_range: Some((first, foods.len())),
    }
}

/// The play section: the game catalog, a tired banner when energy is
/// low, plus current playing info.
pub fn play_page(pet: &Pet, games: &[Game]) -> Page {
    if !pet.alive {
        return dead_page("play with");
    }

    let mut items = Vec::new();
    if pet.energy < 10 {
        items.push(text_item("😴 Your tamagotchi is too tired to play!".to_string()));
        items.push(text_item("Try putting it to sleep first (Ctrl+L)".to_string()));
        items.push(text_item(String::new()));
    }

    items.push(header_item("=== AVAILABLE GAMES ==="));
    items.push(text_item(String::new()));
    let first = items.len();
    for game in games {
        let energy = if game.energy_delta < 0 {
            format!("Energy: {}", game.energy_delta)
        } else {
            format!("Energy: +{}", game.energy_delta)
        };
        items.push(text_item(format!(
            "{} (Happiness: +{}, {}, Health: +{}, Weight: -{:.1}g)",
            game.name, game.happiness, energy, game.health, game.weight_loss
        )));
    }
    items.push(text_item(String::new()));
    items.push(header_item("=== PLAYING INFO ==="));
    items.push(text_item(format!("Current Happiness: {}/100", pet.happiness)));
    items.push(text_item(format!("Current Energy: {}/100", pet.energy)));
    items.push(text_item(format!("Current Weight: {:.1} grams", pet.weight)));
    items.push(text_item(format!("Last Play: {}", local_hhmm(pet.last_played))));

    Page {
        items,
        action_range: Some((first, games.len())),
    }
}

/// The sleep section: the sleep catalog plus current rest info.
pub fn sleep_page(pet: &Pet, sleeps: &[SleepOption]) -> Page {
    if !pet.alive {
        return dead_page("put to sleep,");
    }

    let mut items = vec![header_item("=== SLEEP OPTIONS ==="), text_item(String::new())];
    let first = items.len();
    for option in sleeps {
        items.push(text_item(format!(
            "{} (Energy: +{}, Health: +{}, Happiness: +{})",
            option.name, option.energy_gain, option.health_gain, option.happiness_gain
        )));
    }
    items.push(text_item(String::new()));
    items.push(header_item("=== SLEEP INFO ==="));
    items.push(text_item(format!("Current Energy: {}/100", pet.energy)));
    items.push(text_item(format!("Current Health: {}/100", pet.health)));
    items.push(text_item(format!("Current Happiness: {}/100", pet.happiness)));
    items.push(text_item(format!("Last Sleep: {}", local_hhmm(pet.last_slept))));

    if pet.energy < 30 {
        items.push(text_item(String::new()));
        items.push(text_item("💡 Recommendation: Your tamagotchi is tired!".to_string()));
        items.push(text_item("   Consider a longer sleep to restore energy.".to_string()));
    }

    Page {
        items,
        action_range: Some((first, sleeps.len())),
    }
}

/// The events section, newest first.
pub fn events_page(events: &[GameEvent]) -> Page {
    if events.is_empty() {
        return Page::plain(vec![
            "No events yet!".to_string(),
            "Start interacting with your tamagotchi to see events.".to_string(),
        ]);
    }

    let mut items = vec![header_item("=== GAME EVENTS ==="), text_item(String::new())];
    for event in events.iter().rev() {
        items.push(text_item(format!(
            "{} [{}] {}",
            event.kind.icon(),
            local_hhmm(event.timestamp),
            event.message
        )));
    }

    Page {
        items,
        action_range: None,
    }
}

/// The help section.
pub fn help_page() -> Page {
    Page::plain(
        [
            "=== TERMAGOTCHI HELP ===",
            "",
            "🎮 GAME OVERVIEW",
            "Termagotchi is a terminal-based Tamagotchi simulation.",
            "Take care of your digital pet by feeding, playing, and sleeping.",
            "",
            "📊 STATS EXPLANATION",
            "Hunger: 0 = Full, 100 = Starving",
            "Happiness: 0 = Very Sad, 100 = Very Happy",
            "Health: 0 = Sick, 100 = Healthy",
            "Energy: 0 = Tired, 100 = Energetic",
            "",
            "🔄 STAGES OF LIFE",
            "Egg → Baby → Child → Teen → Adult",
            "Your tamagotchi evolves based on age.",
            "",
            "⚡ GAME MECHANICS",
            "• Stats change automatically over time",
            "• Keep hunger low and happiness high",
            "• Low health can lead to death",
            "• Energy is needed for playing",
            "",
            "⌨️  KEYBOARD CONTROLS",
            "Ctrl+S: Status - View tamagotchi stats",
            "Ctrl+F: Feed - Give food to tamagotchi",
            "Ctrl+P: Play - Play games with tamagotchi",
            "Ctrl+L: Sleep - Put tamagotchi to sleep",
            "Ctrl+E: Events - View game history",
            "Ctrl+H: Help - Show this help page",
            "Ctrl+R: Restart - Reset tamagotchi to new egg",
            "Ctrl+C: Quit - Exit the game",
            "",
            "💾 SAVE SYSTEM",
            "Your tamagotchi progress is automatically saved on exit.",
            "Offline time is replayed on the next launch.",
            "",
            "🔄 RESTART FEATURE",
            "• Ctrl+R asks for confirmation, then hatches a fresh egg",
            "• Useful if your tamagotchi dies or you want a fresh start",
        ]
        .into_iter()
        .map(str::to_string)
        .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use simulator_core::{ActionTables, EventKind};

    fn pet() -> Pet {
        Pet::hatch("Testy", Utc::now())
    }

    #[test]
    fn test_progress_bar_shape() {
        assert_eq!(progress_bar(0), format!("[0%] {}", "░".repeat(20)));
        assert_eq!(progress_bar(100), format!("[100%] {}", "█".repeat(20)));
        let half = progress_bar(50);
        assert!(half.starts_with("[50%] "));
        assert_eq!(half.matches('█').count(), 10);
        assert_eq!(half.matches('░').count(), 10);
    }

    #[test]
    fn test_feed_page_action_mapping() {
        let tables = ActionTables::default();
        let page = feed_page(&pet(), &tables.foods);

        // Header and blank line precede the catalog.
        assert_eq!(page.action_at(0), None);
        assert_eq!(page.action_at(1), None);
        assert_eq!(page.action_at(2), Some(0));
        assert_eq!(page.action_at(2 + 7), Some(7));
        // Footer rows are not actionable.
        assert_eq!(page.action_at(2 + 8), None);
    }

    #[test]
    fn test_play_page_banner_shifts_actions() {
        let tables = ActionTables::default();
        let mut tired = pet();
        tired.energy = 5;

        let rested = play_page(&pet(), &tables.games);
        let exhausted = play_page(&tired, &tables.games);

        assert_eq!(rested.action_range.map(|(f, _)| f), Some(2));
        assert_eq!(exhausted.action_range.map(|(f, _)| f), Some(5));
        assert_eq!(exhausted.action_at(5), Some(0));
    }

    #[test]
    fn test_dead_pet_pages_have_no_actions() {
        let tables = ActionTables::default();
        let mut dead = pet();
        dead.alive = false;

        assert!(feed_page(&dead, &tables.foods).action_range.is_none());
        assert!(play_page(&dead, &tables.games).action_range.is_none());
        assert!(sleep_page(&dead, &tables.sleeps).action_range.is_none());
    }

    #[test]
    fn test_events_page_empty_state() {
        let page = events_page(&[]);
        assert_eq!(page.items.len(), 2);
        assert!(page.action_range.is_none());
    }

    #[test]
    fn test_events_page_counts_rows() {
        let events = vec![
            GameEvent::now(EventKind::Feed, "first"),
            GameEvent::now(EventKind::Play, "second"),
        ];
        let page = events_page(&events);
        // Header, blank, then one row per event.
        assert_eq!(page.items.len(), 4);
    }

    #[test]
    fn test_status_page_reflects_liveness() {
        let page = status_page(&pet());
        assert!(!page.items.is_empty());
        assert!(page.action_range.is_none());
    }
}

//! Per-card time tracking with a single active card.

use std::collections::BTreeMap;

use crate::card::CardId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTransition {
    Started(CardId),
    Paused(CardId),
}

/// Elapsed seconds per card plus the one card currently accruing time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimerState {
    active: Option<CardId>,
    elapsed: BTreeMap<CardId, u64>,
}

impl TimerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(active: Option<CardId>, elapsed: BTreeMap<CardId, u64>) -> Self {
        Self { active, elapsed }
    }

    pub fn active(&self) -> Option<CardId> {
        self.active
    }

    pub fn is_running(&self, card_id: CardId) -> bool {
        self.active == Some(card_id)
    }

    pub fn elapsed(&self, card_id: CardId) -> u64 {
        self.elapsed.get(&card_id).copied().unwrap_or(0)
    }

    pub fn elapsed_map(&self) -> &BTreeMap<CardId, u64> {
        &self.elapsed
    }

    /// Starts, pauses or switches the active card.
    ///
    /// When another card is running it is paused first, so the returned
    /// transitions are always ordered pause-then-start.
    pub fn toggle(&mut self, card_id: CardId) -> Vec<TimerTransition> {
        match self.active {
            Some(active) if active == card_id => {
                self.active = None;
                vec![TimerTransition::Paused(card_id)]
            }
            Some(previous) => {
                self.active = Some(card_id);
                vec![
                    TimerTransition::Paused(previous),
                    TimerTransition::Started(card_id),
                ]
            }
            None => {
                self.active = Some(card_id);
                vec![TimerTransition::Started(card_id)]
            }
        }
    }

    /// Adds one second to `card_id` if it is still the active card.
    ///
    /// Ticks addressed to a card that is no longer active are dropped.
    pub fn tick(&mut self, card_id: CardId) -> bool {
        if self.active != Some(card_id) {
            return false;
        }
        *self.elapsed.entry(card_id).or_insert(0) += 1;
        true
    }
}

/// Renders seconds as `HH:MM:SS`.
pub fn format_elapsed(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_starts_and_pauses() {
        let mut timers = TimerState::new();
        assert_eq!(timers.toggle(5), vec![TimerTransition::Started(5)]);
        assert!(timers.is_running(5));
        assert_eq!(timers.toggle(5), vec![TimerTransition::Paused(5)]);
        assert_eq!(timers.active(), None);
    }

    #[test]
    fn test_switching_pauses_previous_first() {
        let mut timers = TimerState::new();
        timers.toggle(1);
        let transitions = timers.toggle(2);
        assert_eq!(
            transitions,
            vec![TimerTransition::Paused(1), TimerTransition::Started(2)]
        );
        assert_eq!(timers.active(), Some(2));
    }

    #[test]
    fn test_at_most_one_active_card() {
        let mut timers = TimerState::new();
        for id in [1, 2, 3, 2, 2, 1] {
            timers.toggle(id);
            let running = (1..=3).filter(|id| timers.is_running(*id)).count();
            assert!(running <= 1);
        }
    }

    #[test]
    fn test_tick_only_counts_active_card() {
        let mut timers = TimerState::from_parts(None, BTreeMap::from([(5, 10)]));
        assert!(!timers.tick(5));

        timers.toggle(5);
        for _ in 0..3 {
            assert!(timers.tick(5));
        }
        assert!(!timers.tick(6));
        timers.toggle(5);
        assert!(!timers.tick(5));

        assert_eq!(timers.elapsed(5), 13);
        assert_eq!(timers.elapsed(6), 0);
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0), "00:00:00");
        assert_eq!(format_elapsed(61), "00:01:01");
        assert_eq!(format_elapsed(3_725), "01:02:05");
        assert_eq!(format_elapsed(360_000), "100:00:00");
    }
}

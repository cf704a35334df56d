//! Background timer ticks.
//!
//! The ticker only reports that a second passed; the owner of the session
//! applies each tick, so state is never touched from the background task.

use std::time::Duration;

use taskboard_domain::CardId;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Emits the card id once per period until dropped.
pub struct Ticker {
    card_id: CardId,
    handle: JoinHandle<()>,
}

impl Ticker {
    pub fn spawn(card_id: CardId, period: Duration) -> (Self, mpsc::Receiver<CardId>) {
        let (tx, rx) = mpsc::channel(16);
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // First tick completes immediately
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(card_id).await.is_err() {
                    break;
                }
            }
        });
        tracing::debug!("Ticker started for card {}", card_id);
        (Self { card_id, handle }, rx)
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
        tracing::debug!("Ticker stopped for card {}", self.card_id);
    }
}

use std::collections::BTreeSet;
use std::time::Duration;

use serde::Serialize;
use taskboard_domain::commands::{TickTimer, ToggleTimer};
use taskboard_domain::{format_elapsed, BoardSession, CardId};

use crate::cli::TimerAction;
use crate::context::CliContext;
use crate::output;
use super::require_card;
use crate::ticker::Ticker;

#[derive(Serialize)]
struct TimerView {
    card_id: CardId,
    running: bool,
    elapsed_seconds: u64,
    elapsed: String,
}

impl TimerView {
    fn of(session: &BoardSession, card_id: CardId) -> Self {
        let elapsed_seconds = session.timers().elapsed(card_id);
        Self {
            card_id,
            running: session.timers().is_running(card_id),
            elapsed_seconds,
            elapsed: format_elapsed(elapsed_seconds),
        }
    }
}

pub async fn handle(ctx: &mut CliContext, action: TimerAction) -> anyhow::Result<()> {
    match action {
        TimerAction::Toggle { card } => {
            require_card(ctx, card);
            let events = ctx.execute(&ToggleTimer { card_id: card });
            ctx.save(&events).await;
            output::output_success(TimerView::of(&ctx.session, card));
        }
        TimerAction::Run {
            card,
            seconds,
            tick_ms,
        } => {
            require_card(ctx, card);
            run(ctx, card, seconds, Duration::from_millis(tick_ms.max(1))).await;
            output::output_success(TimerView::of(&ctx.session, card));
        }
        TimerAction::Show => {
            let timers = ctx.session.timers();
            let tracked: BTreeSet<CardId> = timers
                .elapsed_map()
                .keys()
                .copied()
                .chain(timers.active())
                .collect();
            let items = tracked
                .into_iter()
                .map(|card_id| TimerView::of(&ctx.session, card_id))
                .collect();
            output::output_list(items);
        }
    }
    Ok(())
}

/// Starts the card's timer if needed and applies `seconds` ticks, saving
/// after every one.
async fn run(ctx: &mut CliContext, card_id: CardId, seconds: u64, period: Duration) {
    if !ctx.session.timers().is_running(card_id) {
        let events = ctx.execute(&ToggleTimer { card_id });
        ctx.save(&events).await;
    }

    let (ticker, mut ticks) = Ticker::spawn(card_id, period);
    for _ in 0..seconds {
        let Some(tick) = ticks.recv().await else {
            break;
        };
        let events = ctx.execute(&TickTimer { card_id: tick });
        ctx.save(&events).await;
    }
    drop(ticker);
}

use chrono::Local;
use serde::Serialize;
use taskboard_domain::commands::{AddTag, RemoveTag, SetPriority};
use taskboard_domain::{BoardEvent, Card, CardDetail, CardId, ColumnKey, DragPayload};

use crate::cli::{CardAction, TagAction};
use crate::context::CliContext;
use crate::output;
use super::require_card;

#[derive(Serialize)]
struct MoveResult {
    moved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    card_id: Option<CardId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    column: Option<ColumnKey>,
    events: Vec<BoardEvent>,
}

#[derive(Serialize)]
struct DragResult {
    card_id: CardId,
    payload: String,
}

#[derive(Serialize)]
struct CardUpdateResult<'a> {
    changed: bool,
    card: &'a Card,
}

pub async fn handle(ctx: &mut CliContext, action: CardAction) -> anyhow::Result<()> {
    match action {
        CardAction::Get { id } => {
            let today = Local::now().date_naive();
            match CardDetail::build(&ctx.session, id, today) {
                Some(detail) => output::output_success(detail),
                None => return output::output_error(&format!("Card not found: {}", id)),
            }
        }
        CardAction::Move { id, from, to, yes } => {
            let prompt = ctx.completion_prompt(yes);
            let events = ctx.session.request_move(id, from, to, prompt.as_ref());
            finish_move(ctx, Some(id), events).await;
        }
        CardAction::Drag { id } => match ctx.session.board().column_of(id) {
            Some(column) => {
                let payload = DragPayload::new(id, column).to_json()?;
                output::output_success(DragResult {
                    card_id: id,
                    payload,
                });
            }
            None => return output::output_error(&format!("Card not found: {}", id)),
        },
        CardAction::Drop { payload, to, yes } => {
            let prompt = ctx.completion_prompt(yes);
            let events = ctx.session.drop_payload(&payload, &to, prompt.as_ref());
            let card_id = DragPayload::parse(&payload).ok().map(|p| p.card_id);
            finish_move(ctx, card_id, events).await;
        }
        CardAction::Tag(tag_cmd) => match tag_cmd.action {
            TagAction::Add { id, tag } => {
                require_card(ctx, id);
                let events = ctx.execute(&AddTag { card_id: id, tag });
                finish_update(ctx, id, events).await;
            }
            TagAction::Remove { id, tag } => {
                require_card(ctx, id);
                let events = ctx.execute(&RemoveTag { card_id: id, tag });
                finish_update(ctx, id, events).await;
            }
        },
        CardAction::Priority { id, set } => {
            require_card(ctx, id);
            let events = ctx.execute(&SetPriority {
                card_id: id,
                priority: set,
            });
            finish_update(ctx, id, events).await;
        }
    }
    Ok(())
}

/// Rejected and declined moves are reported as `moved: false`, never as errors.
async fn finish_move(ctx: &CliContext, card_id: Option<CardId>, events: Vec<BoardEvent>) {
    ctx.save(&events).await;
    let moved = events
        .iter()
        .any(|e| matches!(e, BoardEvent::CardMoved { .. }));
    output::output_success(MoveResult {
        moved,
        card_id,
        column: card_id.and_then(|id| ctx.session.board().column_of(id)),
        events,
    });
}

async fn finish_update(ctx: &CliContext, card_id: CardId, events: Vec<BoardEvent>) {
    ctx.save(&events).await;
    match ctx.session.board().find_card(card_id) {
        Some(card) => output::output_success(CardUpdateResult {
            changed: !events.is_empty(),
            card,
        }),
        None => output::output_error(&format!("Card not found: {}", card_id)),
    }
}

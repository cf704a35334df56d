use serde::Serialize;
use taskboard_domain::commands::{AddChecklistItem, ToggleChecklistItem};
use taskboard_domain::{completion_percent, default_checklist, CardId, ChecklistItem};

use crate::cli::ChecklistAction;
use crate::context::CliContext;
use crate::output;
use super::require_card;

#[derive(Serialize)]
struct ChecklistView {
    card_id: CardId,
    changed: bool,
    completion: u8,
    items: Vec<ChecklistItem>,
}

pub async fn handle(ctx: &mut CliContext, action: ChecklistAction) -> anyhow::Result<()> {
    require_card(ctx, action.card());
    let (card_id, events) = match action {
        ChecklistAction::Show { card } => (card, Vec::new()),
        ChecklistAction::Toggle { card, item } => {
            let events = ctx.execute(&ToggleChecklistItem {
                card_id: card,
                item_id: item,
            });
            (card, events)
        }
        ChecklistAction::Add { card, text } => {
            let events = ctx.execute(&AddChecklistItem { card_id: card, text });
            (card, events)
        }
    };
    ctx.save(&events).await;

    // Cards that were never opened show the items they would be seeded with
    let items = ctx
        .session
        .checklists()
        .get(card_id)
        .map(<[ChecklistItem]>::to_vec)
        .unwrap_or_else(default_checklist);
    output::output_success(ChecklistView {
        card_id,
        changed: !events.is_empty(),
        completion: completion_percent(&items),
        items,
    });
    Ok(())
}

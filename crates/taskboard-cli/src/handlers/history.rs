use taskboard_domain::CardId;

use crate::context::CliContext;
use crate::output;

pub async fn handle(ctx: &CliContext, card_id: CardId) -> anyhow::Result<()> {
    if !ctx.has_card(card_id) {
        return output::output_error(&format!("Card not found: {}", card_id));
    }
    let entries = ctx.session.history().newest_first(card_id);
    output::output_list(entries);
    Ok(())
}

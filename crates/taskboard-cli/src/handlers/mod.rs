pub mod board;
pub mod card;
pub mod checklist;
pub mod comment;
pub mod history;
pub mod timer;

use taskboard_domain::CardId;

use crate::context::CliContext;
use crate::output;

/// Exits with an error response when the card is not on the board.
fn require_card(ctx: &CliContext, card_id: CardId) {
    if !ctx.has_card(card_id) {
        output::output_error(&format!("Card not found: {}", card_id));
    }
}

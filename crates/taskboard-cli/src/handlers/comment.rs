use serde::Serialize;
use taskboard_domain::commands::{
    BeginCommentEdit, CancelCommentEdit, RemoveComment, SubmitComment,
};
use taskboard_domain::{BoardEvent, CardId, Comment};

use crate::cli::CommentAction;
use crate::context::CliContext;
use crate::output;
use super::require_card;

#[derive(Serialize)]
struct CommentsView<'a> {
    card_id: CardId,
    changed: bool,
    comments: &'a [Comment],
}

pub async fn handle(ctx: &mut CliContext, action: CommentAction) -> anyhow::Result<()> {
    require_card(ctx, action.card());
    let (card_id, events) = match action {
        CommentAction::List { card } => (card, Vec::new()),
        CommentAction::Add { card, text } => {
            let events = ctx.execute(&SubmitComment { card_id: card, text });
            (card, events)
        }
        CommentAction::Edit { card, id, text } => (card, edit(ctx, card, id, text)),
        CommentAction::Remove { card, id } => {
            let events = ctx.execute(&RemoveComment {
                card_id: card,
                comment_id: id,
            });
            (card, events)
        }
    };
    ctx.save(&events).await;

    output::output_success(CommentsView {
        card_id,
        changed: !events.is_empty(),
        comments: ctx.session.comments().comments(card_id),
    });
    Ok(())
}

/// Enters edit mode and submits the new text in one step. Blank text leaves
/// the comment untouched.
fn edit(
    ctx: &mut CliContext,
    card_id: CardId,
    comment_id: String,
    text: String,
) -> Vec<BoardEvent> {
    ctx.execute(&BeginCommentEdit {
        card_id,
        comment_id: comment_id.clone(),
    });
    let editing = ctx
        .session
        .comments()
        .thread(card_id)
        .and_then(|thread| thread.editing())
        == Some(comment_id.as_str());
    if !editing {
        return Vec::new();
    }

    let events = ctx.execute(&SubmitComment { card_id, text });
    if events.is_empty() {
        ctx.execute(&CancelCommentEdit { card_id });
    }
    events
}

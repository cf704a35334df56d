use std::future;
use std::time::{Duration, Instant};

use serde::Serialize;
use taskboard_domain::{
    visible_columns, Board, BoardFilters, ColumnKey, ColumnView, SearchDebounce,
};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::cli::{BoardAction, BoardFilterArgs};
use crate::context::CliContext;
use crate::output;

#[derive(Serialize)]
struct BoardView<'a> {
    filtered: bool,
    visible: usize,
    total: usize,
    columns: Vec<ColumnView<'a>>,
}

#[derive(Serialize)]
struct TransitionView {
    from: ColumnKey,
    to: Vec<ColumnKey>,
}

pub async fn handle(ctx: &mut CliContext, action: BoardAction) -> anyhow::Result<()> {
    match action {
        BoardAction::Show(args) => {
            let filters = build_filters(args);
            output::output_success(board_view(ctx.session.board(), &filters));
        }
        BoardAction::Search(args) => search(ctx, args).await?,
        BoardAction::Transitions => {
            let transitions = &ctx.session.board().transitions;
            let items = ColumnKey::ALL
                .into_iter()
                .map(|from| TransitionView {
                    from,
                    to: transitions.targets(from),
                })
                .collect();
            output::output_list(items);
        }
    }
    Ok(())
}

fn build_filters(args: BoardFilterArgs) -> BoardFilters {
    BoardFilters {
        query: args.search,
        priority: args.priority,
        tag: args.tag,
        assignee: args.assignee,
    }
}

fn board_view<'a>(board: &'a Board, filters: &BoardFilters) -> BoardView<'a> {
    let columns = visible_columns(board, filters);
    BoardView {
        filtered: filters.has_active_filters(),
        visible: columns.iter().map(|c| c.cards.len()).sum(),
        total: board.card_count(),
        columns,
    }
}

/// Treats each stdin line as the search box's new contents and prints the
/// filtered board only once input has been quiet for the debounce period.
async fn search(ctx: &CliContext, args: BoardFilterArgs) -> anyhow::Result<()> {
    let quiet_period = Duration::from_millis(ctx.config.effective_search_debounce_ms());
    let mut debounce = SearchDebounce::new(quiet_period);
    let mut filters = build_filters(args);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut input_open = true;

    loop {
        let wait = debounce.time_until_due(Instant::now());
        if !input_open && wait.is_none() {
            break;
        }

        tokio::select! {
            line = lines.next_line(), if input_open => match line? {
                Some(query) => debounce.input(query, Instant::now()),
                None => input_open = false,
            },
            _ = sleep_for(wait) => {
                if let Some(query) = debounce.poll(Instant::now()) {
                    filters.query = Some(query);
                    output::output_success(board_view(ctx.session.board(), &filters));
                }
            }
        }
    }
    Ok(())
}

async fn sleep_for(wait: Option<Duration>) {
    match wait {
        Some(duration) => tokio::time::sleep(duration).await,
        None => future::pending().await,
    }
}

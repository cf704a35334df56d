use clap::{Args, Parser, Subcommand};
use taskboard_domain::{CardId, CardPriority, ColumnKey};

#[derive(Parser)]
#[command(name = "taskboard")]
#[command(about = "A customer-success kanban board with timers, checklists and comments", long_about = None)]
#[command(
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_COMMIT_HASH"), ")")
)]
pub struct Cli {
    /// Path to board data file (or set TASKBOARD_FILE env var)
    #[arg(long, value_name = "FILE", env = "TASKBOARD_FILE", global = true)]
    pub file: Option<String>,

    /// Name that authors comments (or set TASKBOARD_USER env var)
    #[arg(long, value_name = "NAME", env = "TASKBOARD_USER", global = true)]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Board operations
    Board(BoardCommand),
    /// Card operations
    Card(CardCommand),
    /// Time tracking
    Timer(TimerCommand),
    /// Card checklists
    Checklist(ChecklistCommand),
    /// Card comments
    Comment(CommentCommand),
    /// Show a card's activity history, newest first
    History {
        #[arg(long)]
        card: CardId,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// Board commands
#[derive(Args)]
pub struct BoardCommand {
    #[command(subcommand)]
    pub action: BoardAction,
}

#[derive(Subcommand)]
pub enum BoardAction {
    /// Show columns and their cards
    Show(BoardFilterArgs),
    /// Read search queries from stdin, one per line, and print the board
    /// once typing pauses
    Search(BoardFilterArgs),
    /// List the allowed column-to-column moves
    Transitions,
}

#[derive(Args, Clone, Default)]
pub struct BoardFilterArgs {
    /// Text matched against title, description and tags
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long)]
    pub priority: Option<CardPriority>,
    #[arg(long)]
    pub tag: Option<String>,
    #[arg(long)]
    pub assignee: Option<String>,
}

// Card commands
#[derive(Args)]
pub struct CardCommand {
    #[command(subcommand)]
    pub action: CardAction,
}

#[derive(Subcommand)]
pub enum CardAction {
    /// Show a card with its timer, checklist, comments and history
    Get {
        #[arg(long)]
        id: CardId,
    },
    /// Move a card between columns
    Move {
        #[arg(long)]
        id: CardId,
        #[arg(long)]
        from: ColumnKey,
        #[arg(long)]
        to: ColumnKey,
        /// Confirm completion without prompting
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Print the drag payload that picks up a card from its column
    Drag {
        #[arg(long)]
        id: CardId,
    },
    /// Drop a drag payload such as {"cardId":1,"fromColumnKey":"todo"} on a column
    Drop {
        #[arg(long)]
        payload: String,
        /// Target column key
        #[arg(long)]
        to: String,
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Add or remove tags
    Tag(TagCommand),
    /// Set or clear a card's priority
    Priority {
        #[arg(long)]
        id: CardId,
        /// baixa, media, alta or urgente; omit to clear
        #[arg(long)]
        set: Option<CardPriority>,
    },
}

#[derive(Args)]
pub struct TagCommand {
    #[command(subcommand)]
    pub action: TagAction,
}

#[derive(Subcommand)]
pub enum TagAction {
    Add {
        #[arg(long)]
        id: CardId,
        #[arg(long)]
        tag: String,
    },
    Remove {
        #[arg(long)]
        id: CardId,
        #[arg(long)]
        tag: String,
    },
}

// Timer commands
#[derive(Args)]
pub struct TimerCommand {
    #[command(subcommand)]
    pub action: TimerAction,
}

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start, pause or switch the running timer
    Toggle {
        #[arg(long)]
        card: CardId,
    },
    /// Run the timer in the foreground, one tick per second
    Run {
        #[arg(long)]
        card: CardId,
        #[arg(long)]
        seconds: u64,
        #[arg(long, default_value_t = 1000, hide = true)]
        tick_ms: u64,
    },
    /// Show elapsed time for every tracked card
    Show,
}

// Checklist commands
#[derive(Args)]
pub struct ChecklistCommand {
    #[command(subcommand)]
    pub action: ChecklistAction,
}

#[derive(Subcommand)]
pub enum ChecklistAction {
    Show {
        #[arg(long)]
        card: CardId,
    },
    /// Flip one item between done and not done
    Toggle {
        #[arg(long)]
        card: CardId,
        #[arg(long)]
        item: u32,
    },
    Add {
        #[arg(long)]
        card: CardId,
        #[arg(long)]
        text: String,
    },
}

// Comment commands
#[derive(Args)]
pub struct CommentCommand {
    #[command(subcommand)]
    pub action: CommentAction,
}

#[derive(Subcommand)]
pub enum CommentAction {
    List {
        #[arg(long)]
        card: CardId,
    },
    Add {
        #[arg(long)]
        card: CardId,
        #[arg(long)]
        text: String,
    },
    /// Replace the text of one of your own comments
    Edit {
        #[arg(long)]
        card: CardId,
        #[arg(long)]
        id: String,
        #[arg(long)]
        text: String,
    },
    /// Delete one of your own comments
    Remove {
        #[arg(long)]
        card: CardId,
        #[arg(long)]
        id: String,
    },
}

impl ChecklistAction {
    pub fn card(&self) -> CardId {
        match self {
            Self::Show { card } | Self::Toggle { card, .. } | Self::Add { card, .. } => *card,
        }
    }
}

impl CommentAction {
    pub fn card(&self) -> CardId {
        match self {
            Self::List { card }
            | Self::Add { card, .. }
            | Self::Edit { card, .. }
            | Self::Remove { card, .. } => *card,
        }
    }
}

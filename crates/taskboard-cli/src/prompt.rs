use std::io::{BufRead, IsTerminal, Write};

use taskboard_domain::{Card, CompletionPrompt};

/// Asks on the terminal before a card enters the completion column.
/// Without an interactive stdin the answer is no.
pub struct TerminalPrompt;

impl CompletionPrompt for TerminalPrompt {
    fn confirm_completion(&self, card: &Card) -> bool {
        let stdin = std::io::stdin();
        if !stdin.is_terminal() {
            tracing::debug!("No terminal to confirm completion of card {}", card.id);
            return false;
        }

        eprint!("Marcar \"{}\" como concluído? [s/N] ", card.title);
        let _ = std::io::stderr().flush();

        let mut answer = String::new();
        match stdin.lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(e) => {
                tracing::debug!("Failed to read confirmation: {}", e);
                false
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "s" | "sim" | "y" | "yes"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_yes() {
        assert!(is_yes("s\n"));
        assert!(is_yes("  Sim "));
        assert!(is_yes("YES"));
        assert!(!is_yes(""));
        assert!(!is_yes("n"));
        assert!(!is_yes("talvez"));
    }
}

//! Initial board contents used when no saved board exists.

use chrono::NaiveDate;

use crate::{Board, Card, CardPriority, ColumnKey};

fn july_2025(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 7, day).unwrap_or_default()
}

fn seed_cards() -> Vec<(ColumnKey, Card)> {
    use CardPriority::*;
    use ColumnKey::*;

    vec![
        (
            Backlog,
            Card::new(1, "Mapear stakeholders da Acme")
                .with_description("Levantar decisores e usuários-chave antes da renovação")
                .with_assignee("Ana Souza")
                .with_priority(Medium)
                .with_tags(["renovação", "mapeamento"]),
        ),
        (
            Backlog,
            Card::new(2, "Revisar health score da carteira")
                .with_assignee("Bruno Lima")
                .with_priority(Low)
                .with_tags(["health-score"]),
        ),
        (
            Todo,
            Card::new(3, "Onboarding Globex")
                .with_description("Sessão de kickoff e configuração inicial")
                .with_assignee("Carla Mendes")
                .with_priority(High)
                .with_tags(["onboarding"])
                .with_deadline(july_2025(15))
                .with_watchers(["Ana Souza"]),
        ),
        (
            Todo,
            Card::new(4, "Preparar QBR Initech")
                .with_assignee("Ana Souza")
                .with_priority(Medium)
                .with_tags(["qbr"]),
        ),
        (
            Doing,
            Card::new(5, "Plano de ação para churn risk da Umbrella")
                .with_description("Cliente reportou queda de uso nas últimas 4 semanas")
                .with_assignee("Bruno Lima")
                .with_priority(Urgent)
                .with_tags(["churn", "escalação"])
                .with_deadline(july_2025(4))
                .with_watchers(["Carla Mendes", "Diego Rocha"]),
        ),
        (
            Doing,
            Card::new(6, "Treinamento avançado Stark")
                .with_assignee("Diego Rocha")
                .with_priority(Medium)
                .with_tags(["treinamento"]),
        ),
        (
            Waiting,
            Card::new(7, "Aguardando retorno jurídico Wayne")
                .with_description("Aditivo contratual enviado, aguardando assinatura")
                .with_assignee("Carla Mendes")
                .with_priority(High)
                .with_tags(["contrato"])
                .with_deadline(july_2025(30)),
        ),
        (
            Done,
            Card::new(8, "Pesquisa NPS trimestral")
                .with_assignee("Diego Rocha")
                .with_priority(Low)
                .with_tags(["nps"]),
        ),
        (
            Todo,
            Card::new(9, "Follow-up de suporte Hooli")
                .with_assignee("Ana Souza")
                .with_priority(Medium)
                .with_tags(["suporte"]),
        ),
    ]
}

/// The default customer-success board.
pub fn initial_board() -> Board {
    let mut board = Board::default();
    for (key, card) in seed_cards() {
        if let Err(e) = board.insert_card(key, card) {
            tracing::warn!("Skipping seed card: {}", e);
        }
    }
    board
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_ids_are_unique() {
        let cards = seed_cards();
        let ids: HashSet<_> = cards.iter().map(|(_, c)| c.id).collect();
        assert_eq!(ids.len(), cards.len());
        assert_eq!(initial_board().card_count(), cards.len());
    }

    #[test]
    fn test_seed_populates_every_column() {
        let board = initial_board();
        for key in ColumnKey::ALL {
            assert!(!board.column(key).unwrap().is_empty(), "{} is empty", key);
        }
    }

    #[test]
    fn test_seed_places_scenario_cards() {
        let board = initial_board();
        assert_eq!(board.column_of(1), Some(ColumnKey::Backlog));
        assert_eq!(board.column_of(5), Some(ColumnKey::Doing));
        assert_eq!(board.find_card(5).unwrap().deadline, Some(july_2025(4)));
        assert_eq!(board.find_card(7).unwrap().deadline, Some(july_2025(30)));
        assert!(board.find_card(1).unwrap().deadline.is_none());
    }
}

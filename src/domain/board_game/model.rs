//! Board game catalog entities

use crate::domain::{DomainError, DomainResult};

/// Board game category (used for grouping and display colour)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: i32,
    pub name: String,
    /// Display colour as a hex string without the leading `#`
    pub colour_hex: String,
}

/// Catalog entry for a physical board game the club owns or borrows.
///
/// Invariant: `0 <= unavailable <= in_stock`. `unavailable` counts copies
/// that are in stock but cannot be reserved (damaged, missing pieces).
#[derive(Debug, Clone)]
pub struct BoardGame {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub category_id: i32,
    pub players_min: Option<i32>,
    pub players_max: Option<i32>,
    pub note_internal: Option<String>,
    /// Member who lent the game to the club, if not club-owned
    pub owner_id: Option<i32>,
    pub in_stock: i32,
    pub unavailable: i32,
    pub visible: bool,
    /// Default reservation length applied when a copy is reserved
    pub default_reservation_days: i32,
}

impl BoardGame {
    /// Validate the stock invariant for a prospective stock update.
    pub fn validate_stock(in_stock: i32, unavailable: i32) -> DomainResult<()> {
        if in_stock < 0 || unavailable < 0 {
            return Err(DomainError::Validation(
                "Stock counts must be non-negative".to_string(),
            ));
        }
        if unavailable > in_stock {
            return Err(DomainError::Validation(format!(
                "Unavailable count ({unavailable}) exceeds stock ({in_stock})"
            )));
        }
        Ok(())
    }

    /// Copies currently reservable, given the number of copies held by
    /// running reservation items.
    pub fn available(&self, held: i64) -> i64 {
        i64::from(self.in_stock) - i64::from(self.unavailable) - held
    }
}

/// Data for creating a new board game
#[derive(Debug, Clone)]
pub struct NewBoardGame {
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub category_id: i32,
    pub players_min: Option<i32>,
    pub players_max: Option<i32>,
    pub note_internal: Option<String>,
    pub owner_id: Option<i32>,
    pub in_stock: i32,
    pub unavailable: i32,
    pub visible: bool,
    pub default_reservation_days: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_game() -> BoardGame {
        BoardGame {
            id: 1,
            name: "Carcassonne".to_string(),
            description: None,
            image_url: None,
            category_id: 1,
            players_min: Some(2),
            players_max: Some(5),
            note_internal: None,
            owner_id: None,
            in_stock: 3,
            unavailable: 1,
            visible: true,
            default_reservation_days: 14,
        }
    }

    #[test]
    fn stock_invariant_holds() {
        assert!(BoardGame::validate_stock(3, 1).is_ok());
        assert!(BoardGame::validate_stock(3, 3).is_ok());
        assert!(BoardGame::validate_stock(0, 0).is_ok());
    }

    #[test]
    fn unavailable_cannot_exceed_stock() {
        assert!(BoardGame::validate_stock(2, 3).is_err());
    }

    #[test]
    fn negative_counts_rejected() {
        assert!(BoardGame::validate_stock(-1, 0).is_err());
        assert!(BoardGame::validate_stock(3, -1).is_err());
    }

    #[test]
    fn availability_subtracts_unavailable_and_held() {
        let game = sample_game();
        assert_eq!(game.available(0), 2);
        assert_eq!(game.available(2), 0);
        assert_eq!(game.available(3), -1);
    }
}

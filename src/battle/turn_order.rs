use crate::battle::state::Side;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOrder {
    pub first: Side,
    pub second: Side,
    pub was_speed_tie: bool,
}

/// Decide who acts first between the player (`speed_a`) and the enemy
/// (`speed_b`). Faster acts first; on an exact tie a roll below 0.5 favours
/// the player. `tie_breaker` defaults to a fresh uniform draw and is only
/// consulted on a tie.
pub fn determine_turn_order(speed_a: u16, speed_b: u16, tie_breaker: Option<f64>) -> TurnOrder {
    let (first, was_speed_tie) = if speed_a > speed_b {
        (Side::Player, false)
    } else if speed_b > speed_a {
        (Side::Enemy, false)
    } else {
        let roll = tie_breaker.unwrap_or_else(rand::random::<f64>);
        let winner = if roll < 0.5 { Side::Player } else { Side::Enemy };
        (winner, true)
    };

    TurnOrder {
        first,
        second: first.opponent(),
        was_speed_tie,
    }
}

/// True when a combatant with `my_speed` acts before one with `opponent_speed`.
pub fn goes_first(my_speed: u16, opponent_speed: u16, tie_breaker: Option<f64>) -> bool {
    determine_turn_order(my_speed, opponent_speed, tie_breaker).first == Side::Player
}

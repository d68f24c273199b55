//! Dealing phases and showdown resolution for the outer game loop.

use crate::deck::{Deck, DeckError};
use crate::evaluator::evaluate;
use crate::hand::{Board, HoleCards};
use crate::rollout::Outcome;
use std::fmt;

/// The four dealing phases. The engine decides fold/stay once per phase,
/// after that phase's cards are on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    PreFlop,
    Flop,
    Turn,
    River,
}

impl Phase {
    pub const ALL: [Phase; 4] = [Phase::PreFlop, Phase::Flop, Phase::Turn, Phase::River];

    /// Reveal this phase's community cards. Dealing is guarded by the current
    /// board size, so calling a phase out of order reveals nothing.
    pub fn deal(self, deck: &mut Deck, board: &mut Board) -> Result<(), DeckError> {
        let n = match (self, board.len()) {
            (Phase::Flop, 0) => 3,
            (Phase::Turn, 3) => 1,
            (Phase::River, 4) => 1,
            _ => 0,
        };
        if n > 0 {
            board.extend(deck.draw_n(n)?);
        }
        Ok(())
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::PreFlop => "pre-flop",
            Phase::Flop => "flop",
            Phase::Turn => "turn",
            Phase::River => "river",
        };
        f.write_str(s)
    }
}

/// Resolve a full-board showdown from `hero`'s perspective.
pub fn showdown(hero: &HoleCards, villain: &HoleCards, board: &Board) -> Outcome {
    debug_assert_eq!(board.len(), 5, "showdown needs a complete board");
    let h = evaluate(hero.as_array(), board.as_slice());
    let v = evaluate(villain.as_array(), board.as_slice());
    Outcome::from_showdown(h.cmp(&v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    #[test]
    fn phases_deal_zero_three_one_one() {
        let mut deck = Deck::standard();
        deck.shuffle_seeded(1);
        let mut board = Board::default();
        let expected = [0usize, 3, 4, 5];
        for (phase, want) in Phase::ALL.into_iter().zip(expected) {
            phase.deal(&mut deck, &mut board).unwrap();
            assert_eq!(board.len(), want);
        }
        assert_eq!(deck.len(), 47);
    }

    #[test]
    fn out_of_order_phase_deals_nothing() {
        let mut deck = Deck::standard();
        let mut board = Board::default();
        Phase::River.deal(&mut deck, &mut board).unwrap();
        assert!(board.is_empty());
        assert_eq!(deck.len(), 52);
    }

    #[test]
    fn showdown_on_a_playing_board_is_a_tie() {
        let board = Board::new(parse_cards("As Ks Qs Js Ts").unwrap());
        let hero: HoleCards = "2c 3d".parse().unwrap();
        let villain: HoleCards = "4h 5h".parse().unwrap();
        assert_eq!(showdown(&hero, &villain, &board), Outcome::Tie);
    }

    #[test]
    fn showdown_prefers_the_stronger_hand() {
        let board = Board::new(parse_cards("Ah 7c 4s 2d 9h").unwrap());
        let hero: HoleCards = "As Ac".parse().unwrap();
        let villain: HoleCards = "Kd Qd".parse().unwrap();
        assert_eq!(showdown(&hero, &villain, &board), Outcome::Win);
        assert_eq!(showdown(&villain, &hero, &board), Outcome::Loss);
    }
}

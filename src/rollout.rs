//! Random playout of one showdown from a partial game state.

use crate::cards::Card;
use crate::evaluator::evaluate;
use rand::seq::SliceRandom;
use rand::Rng;
use std::cmp::Ordering;

/// Result of one rollout from the deciding player's perspective. The reward
/// is what backpropagation accumulates, so win rate equals mean reward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
    Tie,
}

impl Outcome {
    pub const fn reward(self) -> f64 {
        match self {
            Outcome::Win => 1.0,
            Outcome::Loss => 0.0,
            Outcome::Tie => 0.5,
        }
    }

    pub fn from_showdown(ord: Ordering) -> Self {
        match ord {
            Ordering::Greater => Outcome::Win,
            Ordering::Less => Outcome::Loss,
            Ordering::Equal => Outcome::Tie,
        }
    }
}

/// Play one random showdown: sample an opponent hand and the missing
/// community cards from the remaining deck, evaluate both hands, compare.
///
/// Inputs are untouched; the shuffle happens on a local copy of the deck.
pub fn simulate<R: Rng + ?Sized>(
    hole: [Card; 2],
    community: &[Card],
    deck: &[Card],
    rng: &mut R,
) -> Outcome {
    let mut scratch = Vec::with_capacity(deck.len());
    simulate_with(hole, community, deck, rng, &mut scratch)
}

/// Scratch-buffer variant for the search loop: the caller owns the working
/// deck copy so the loop body allocates nothing once warm.
pub fn simulate_with<R: Rng + ?Sized>(
    hole: [Card; 2],
    community: &[Card],
    deck: &[Card],
    rng: &mut R,
    scratch: &mut Vec<Card>,
) -> Outcome {
    scratch.clear();
    // known cards should already be out of the deck by construction; the
    // filter keeps a stale deck from double-dealing them
    scratch.extend(
        deck.iter()
            .filter(|c| !hole.contains(c) && !community.contains(c)),
    );
    scratch.shuffle(rng);
    debug_assert!(scratch.len() >= 2 + (5 - community.len()), "deck exhausted mid-rollout");

    let opponent = [scratch[0], scratch[1]];
    let mut board = [scratch[0]; 5];
    board[..community.len()].copy_from_slice(community);
    let missing = 5 - community.len();
    board[community.len()..].copy_from_slice(&scratch[2..2 + missing]);

    let mine = evaluate(hole, &board);
    let theirs = evaluate(opponent, &board);
    Outcome::from_showdown(mine.cmp(&theirs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;
    use crate::deck::Deck;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn board_plays_for_both_is_always_a_tie() {
        // royal flush on the board: neither hole hand can improve on it
        let board = parse_cards("As Ks Qs Js Ts").unwrap();
        let hole = parse_cards("2c 3d").unwrap();
        let mut known = board.clone();
        known.extend_from_slice(&hole);
        let deck = Deck::without(&known);
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let outcome = simulate([hole[0], hole[1]], &board, deck.as_slice(), &mut rng);
            assert_eq!(outcome, Outcome::Tie);
        }
    }

    #[test]
    fn nut_hand_on_full_board_always_wins() {
        // hero holds the only two remaining aces for top quads
        let board = parse_cards("Ah Ad 7c 4s 2d").unwrap();
        let hole = parse_cards("As Ac").unwrap();
        let mut known = board.clone();
        known.extend_from_slice(&hole);
        let deck = Deck::without(&known);
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..200 {
            let outcome = simulate([hole[0], hole[1]], &board, deck.as_slice(), &mut rng);
            assert_eq!(outcome, Outcome::Win);
        }
    }

    #[test]
    fn simulate_leaves_inputs_untouched() {
        let hole = parse_cards("As Ad").unwrap();
        let board = parse_cards("Kc Qh 2s").unwrap();
        let mut known = hole.clone();
        known.extend_from_slice(&board);
        let deck = Deck::without(&known);
        let before = deck.clone();
        let mut rng = StdRng::seed_from_u64(3);
        let _ = simulate([hole[0], hole[1]], &board, deck.as_slice(), &mut rng);
        assert_eq!(deck, before);
    }

    #[test]
    fn defensive_filter_drops_known_cards_from_a_stale_deck() {
        let hole = parse_cards("As Ad").unwrap();
        let board = parse_cards("Kc Qh 2s").unwrap();
        // deliberately stale: still contains every known card
        let deck = Deck::standard();
        let mut rng = StdRng::seed_from_u64(9);
        // would double-deal (and trip the evaluator's duplicate contract)
        // without the filter
        for _ in 0..50 {
            let _ = simulate([hole[0], hole[1]], &board, deck.as_slice(), &mut rng);
        }
    }

    #[test]
    fn rewards_encode_half_credit_ties() {
        assert_eq!(Outcome::Win.reward(), 1.0);
        assert_eq!(Outcome::Tie.reward(), 0.5);
        assert_eq!(Outcome::Loss.reward(), 0.0);
    }
}

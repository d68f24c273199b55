//! Five-card hand evaluation over a 5..=7 card pool.
//!
//! Detection is a single pass over the rank/suit groups of the sorted pool
//! rather than a scan of all C(n,5) subsets, so a rollout costs two cheap
//! evaluations and no per-card allocation.

use crate::cards::{Card, Rank};
use core::cmp::Ordering;

/// Poker hand category from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[non_exhaustive]
#[repr(u8)]
pub enum Category {
    HighCard = 1,
    Pair = 2,
    TwoPair = 3,
    ThreeOfAKind = 4,
    Straight = 5,
    Flush = 6,
    FullHouse = 7,
    FourOfAKind = 8,
    StraightFlush = 9,
    RoyalFlush = 10,
}

impl Category {
    pub const fn ordinal(self) -> u8 {
        self as u8
    }
}

/// Compact, comparable hand strength. Higher is better. Encodes the category
/// and the best-five ranks in descending order, so ordering two values is the
/// category-then-lexicographic comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct HandValue(u64);

impl HandValue {
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Pack a category and five descending rank values into a comparable
    /// value. 6 bits per rank; r0 is the most significant tiebreaker.
    fn from_parts(category: Category, ranks_desc: &[u8; 5]) -> Self {
        const CAT_SHIFT: u32 = 48;
        const RANK_STRIDE: u32 = 6;
        let mut v: u64 = (category as u64) << CAT_SHIFT;
        for (i, r) in ranks_desc.iter().enumerate() {
            let offset = CAT_SHIFT - RANK_STRIDE * (i as u32 + 1);
            v |= (*r as u64) << offset;
        }
        HandValue(v)
    }
}

/// The best five cards selected from the pool, with their category.
/// `best_five` is ordered by tiebreak significance (wheel ace last).
#[derive(Debug, Clone, Copy)]
pub struct EvaluatedHand {
    pub category: Category,
    pub best_five: [Card; 5],
    value: HandValue,
}

impl EvaluatedHand {
    pub const fn value(&self) -> HandValue {
        self.value
    }
}

impl Ord for EvaluatedHand {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl PartialOrd for EvaluatedHand {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for EvaluatedHand {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for EvaluatedHand {}

/// Evaluate the best five-card hand from two hole cards and 3..=5 community
/// cards.
///
/// Precondition (contract, not an error path): the cards are pairwise
/// distinct and total 5..=7. Callers hold this by construction; a violation
/// means the game state is corrupted.
///
/// ```
/// use holdem_mcts::cards::parse_cards;
/// use holdem_mcts::evaluator::{evaluate, Category};
///
/// let hole = parse_cards("As Ah").unwrap();
/// let community = parse_cards("Kc Qd Jh 3s 2c").unwrap();
/// let eval = evaluate([hole[0], hole[1]], &community);
/// assert_eq!(eval.category, Category::Pair);
/// ```
pub fn evaluate(hole: [Card; 2], community: &[Card]) -> EvaluatedHand {
    debug_assert!(
        (3..=5).contains(&community.len()),
        "community must hold 3..=5 cards, got {}",
        community.len()
    );
    let mut pool = [hole[0]; 7];
    pool[1] = hole[1];
    pool[2..2 + community.len()].copy_from_slice(community);
    let pool = &mut pool[..2 + community.len()];
    // ascending by rank; suit order keeps the sort total
    pool.sort_unstable();
    debug_assert!(pool.windows(2).all(|w| w[0] != w[1]), "duplicate card in pool");
    evaluate_pool(pool)
}

/// Core detection over an ascending-sorted, duplicate-free pool of 5..=7.
fn evaluate_pool(pool: &[Card]) -> EvaluatedHand {
    let mut rank_count = [0u8; 15];
    let mut suit_count = [0u8; 4];
    for c in pool {
        rank_count[c.rank().value() as usize] += 1;
        suit_count[c.suit().index()] += 1;
    }

    // Rank groups, highest first. A second three-of-a-kind rank is demoted to
    // the pair slots; a fourth card of the trips rank would have made quads.
    let mut quads: Option<u8> = None;
    let mut trips: Option<u8> = None;
    let mut pair_hi: Option<u8> = None;
    let mut pair_lo: Option<u8> = None;
    for v in (2..=14u8).rev() {
        match rank_count[v as usize] {
            4 => quads = quads.or(Some(v)),
            3 if trips.is_none() => trips = Some(v),
            3 | 2 => {
                if pair_hi.is_none() {
                    pair_hi = Some(v);
                } else if pair_lo.is_none() {
                    pair_lo = Some(v);
                }
            }
            _ => {}
        }
    }

    // At most one suit can reach 5 cards in a 7-card pool.
    let flush_suit = (0..4).find(|&s| suit_count[s] >= 5);

    // Straight: scan distinct ranks for the highest 5-run; the wheel only
    // counts when no natural run exists (any natural run outranks it).
    let mut distinct = [0u8; 7];
    let mut m = 0;
    for v in 2..=14u8 {
        if rank_count[v as usize] > 0 {
            distinct[m] = v;
            m += 1;
        }
    }
    let mut straight_top: Option<u8> = None;
    if m >= 5 {
        for i in 0..=m - 5 {
            if distinct[i + 4] == distinct[i] + 4 {
                straight_top = Some(distinct[i + 4]);
            }
        }
    }
    let wheel = straight_top.is_none()
        && [14u8, 2, 3, 4, 5].iter().all(|&v| rank_count[v as usize] > 0);
    if wheel {
        straight_top = Some(5);
    }

    // Straight flush / royal flush: a genuine 5-run inside the flush suit.
    if let Some(s) = flush_suit {
        if let Some((top, suited_wheel)) = suited_run(pool, s) {
            let five = suited_straight_cards(pool, s, top, suited_wheel);
            let category =
                if top == Rank::Ace.value() { Category::RoyalFlush } else { Category::StraightFlush };
            return finish(category, five, suited_wheel);
        }
    }

    if let Some(q) = quads {
        let mut five = [pool[0]; 5];
        collect_rank(pool, q, &mut five, 0, 4);
        fill_kickers(pool, &mut five, 4);
        return finish(Category::FourOfAKind, five, false);
    }

    if let (Some(t), Some(p)) = (trips, pair_hi) {
        let mut five = [pool[0]; 5];
        collect_rank(pool, t, &mut five, 0, 3);
        collect_rank(pool, p, &mut five, 3, 2);
        return finish(Category::FullHouse, five, false);
    }

    if let Some(s) = flush_suit {
        let mut five = [pool[0]; 5];
        let mut i = 0;
        for c in pool.iter().rev() {
            if c.suit().index() == s {
                five[i] = *c;
                i += 1;
                if i == 5 {
                    break;
                }
            }
        }
        return finish(Category::Flush, five, false);
    }

    if let Some(top) = straight_top {
        let five = straight_cards(pool, top, wheel);
        return finish(Category::Straight, five, wheel);
    }

    if let Some(t) = trips {
        let mut five = [pool[0]; 5];
        collect_rank(pool, t, &mut five, 0, 3);
        fill_kickers(pool, &mut five, 3);
        return finish(Category::ThreeOfAKind, five, false);
    }

    if let (Some(p1), Some(p2)) = (pair_hi, pair_lo) {
        let mut five = [pool[0]; 5];
        collect_rank(pool, p1, &mut five, 0, 2);
        collect_rank(pool, p2, &mut five, 2, 2);
        fill_kickers(pool, &mut five, 4);
        return finish(Category::TwoPair, five, false);
    }

    if let Some(p) = pair_hi {
        let mut five = [pool[0]; 5];
        collect_rank(pool, p, &mut five, 0, 2);
        fill_kickers(pool, &mut five, 2);
        return finish(Category::Pair, five, false);
    }

    let mut five = [pool[0]; 5];
    fill_kickers(pool, &mut five, 0);
    finish(Category::HighCard, five, false)
}

/// Highest 5-run among the ranks present in `suit`, or the in-suit wheel.
/// Returns (top rank value, is_wheel).
fn suited_run(pool: &[Card], suit: usize) -> Option<(u8, bool)> {
    let mut present = [false; 15];
    for c in pool {
        if c.suit().index() == suit {
            present[c.rank().value() as usize] = true;
        }
    }
    let mut top = None;
    for t in 6..=14u8 {
        if (t - 4..=t).all(|v| present[v as usize]) {
            top = Some(t);
        }
    }
    if let Some(t) = top {
        return Some((t, false));
    }
    if [14u8, 2, 3, 4, 5].iter().all(|&v| present[v as usize]) {
        return Some((5, true));
    }
    None
}

/// The run cards of the straight flush, all from `suit`.
fn suited_straight_cards(pool: &[Card], suit: usize, top: u8, wheel: bool) -> [Card; 5] {
    let mut five = [pool[0]; 5];
    let mut i = 0;
    let run: [u8; 5] =
        if wheel { [5, 4, 3, 2, 14] } else { [top, top - 1, top - 2, top - 3, top - 4] };
    for v in run {
        if let Some(c) =
            pool.iter().find(|c| c.suit().index() == suit && c.rank().value() == v)
        {
            five[i] = *c;
            i += 1;
        }
    }
    debug_assert_eq!(i, 5, "suited run missing a rank");
    five
}

/// One card per rank of the run, top five, any suit.
fn straight_cards(pool: &[Card], top: u8, wheel: bool) -> [Card; 5] {
    let mut five = [pool[0]; 5];
    let mut i = 0;
    let run: [u8; 5] = if wheel {
        [5, 4, 3, 2, 14]
    } else {
        [top, top - 1, top - 2, top - 3, top - 4]
    };
    for v in run {
        if let Some(c) = pool.iter().find(|c| c.rank().value() == v) {
            five[i] = *c;
            i += 1;
        }
    }
    debug_assert_eq!(i, 5, "straight run missing a rank");
    five
}

/// Copy `take` highest cards of `rank_value` into `five[start..]`.
fn collect_rank(pool: &[Card], rank_value: u8, five: &mut [Card; 5], start: usize, take: usize) {
    let mut i = start;
    for c in pool.iter().rev() {
        if c.rank().value() == rank_value {
            five[i] = *c;
            i += 1;
            if i == start + take {
                return;
            }
        }
    }
    debug_assert_eq!(i, start + take, "rank group shorter than expected");
}

/// Fill `five[used..]` with the highest remaining cards not already committed.
fn fill_kickers(pool: &[Card], five: &mut [Card; 5], used: usize) {
    let mut i = used;
    for c in pool.iter().rev() {
        if i == 5 {
            return;
        }
        if five[..used].contains(c) {
            continue;
        }
        five[i] = *c;
        i += 1;
    }
}

/// Order the five by tiebreak significance and pack the comparison value.
/// Inside a wheel the ace orders as 1, which makes A-5 the lowest straight.
fn finish(category: Category, five: [Card; 5], wheel: bool) -> EvaluatedHand {
    let mut keyed: [(u8, Card); 5] = five.map(|c| {
        let v = c.rank().value();
        let v = if wheel && v == Rank::Ace.value() { 1 } else { v };
        (v, c)
    });
    keyed.sort_unstable_by(|a, b| b.0.cmp(&a.0).then(b.1.suit().cmp(&a.1.suit())));
    let ranks = keyed.map(|(v, _)| v);
    let best_five = keyed.map(|(_, c)| c);
    EvaluatedHand { category, best_five, value: HandValue::from_parts(category, &ranks) }
}

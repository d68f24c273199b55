//! UCB1-guided Monte Carlo search for one fold/stay decision.
//!
//! One tree is built per decision point and discarded with the decision.
//! Children are resampling slots carrying the same state as their parent;
//! the search explores simulation variance, not a deeper game tree (the
//! reference behavior, preserved on purpose).

use crate::cards::Card;
use crate::hand::{validate_state, Board, HandError, HoleCards};
use crate::rollout::{simulate_with, Outcome};
use log::debug;
use rand::Rng;
use std::time::{Duration, Instant};

/// Fixed exploration constant of the reference search.
pub const DEFAULT_EXPLORATION: f64 = 1.41;

/// Tuning for one decision. Defaults match the reference: 10 s wall-clock
/// budget, c = 1.41.
#[derive(Debug, Clone, Copy)]
pub struct DecisionConfig {
    pub budget: Duration,
    pub exploration: f64,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self { budget: Duration::from_secs(10), exploration: DEFAULT_EXPLORATION }
    }
}

impl DecisionConfig {
    pub fn with_budget(budget: Duration) -> Self {
        Self { budget, ..Self::default() }
    }
}

/// The engine's answer at a decision point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Fold,
    Stay,
}

impl Decision {
    /// Stay at exactly 0.5 (>=, not >).
    pub fn from_probability(win_probability: f64) -> Self {
        if win_probability >= 0.5 {
            Decision::Stay
        } else {
            Decision::Fold
        }
    }
}

/// Decision plus the statistics behind it. `simulations == 0` means the
/// budget elapsed before a single rollout finished; the decision is then a
/// default fold with probability 0, surfaced as a normal result so callers
/// can tell it from a well-sampled fold.
#[derive(Debug, Clone, Copy)]
pub struct DecisionReport {
    pub decision: Decision,
    pub win_probability: f64,
    pub simulations: u64,
    pub wins: u64,
    pub ties: u64,
    pub losses: u64,
}

struct Node {
    community: Vec<Card>,
    deck: Vec<Card>,
    parent: Option<usize>,
    children: Vec<usize>,
    visits: u64,
    wins: f64,
}

/// Arena-backed search tree. Nodes live in one `Vec`; children are owned
/// index lists and the parent link is a plain back-index, so there is no
/// owning cycle to break.
pub struct SearchTree {
    hole: [Card; 2],
    nodes: Vec<Node>,
    exploration: f64,
}

impl SearchTree {
    pub fn new(hole: HoleCards, board: &Board, deck: &[Card], exploration: f64) -> Self {
        let root = Node {
            community: board.as_slice().to_vec(),
            deck: deck.to_vec(),
            parent: None,
            children: Vec::new(),
            visits: 0,
            wins: 0.0,
        };
        Self { hole: hole.as_array(), nodes: vec![root], exploration }
    }

    /// Total completed rollouts: every rollout backpropagates through the
    /// root exactly once.
    pub fn root_visits(&self) -> u64 {
        self.nodes[0].visits
    }

    pub fn root_wins(&self) -> f64 {
        self.nodes[0].wins
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// One full selection, expansion, rollout, backpropagation pass.
    pub fn run_iteration<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        scratch: &mut Vec<Card>,
    ) -> Outcome {
        let mut node = self.select();
        // only expand a node that has already been rolled out at least once;
        // a fresh node gets its first rollout directly
        if self.nodes[node].visits > 0 {
            node = self.expand(node);
        }
        let outcome = {
            let n = &self.nodes[node];
            simulate_with(self.hole, &n.community, &n.deck, rng, scratch)
        };
        self.backpropagate(node, outcome.reward());
        outcome
    }

    /// Descend from the root while the current node is internal and visited;
    /// stop at the first unvisited or childless node.
    fn select(&self) -> usize {
        let mut current = 0;
        while !self.nodes[current].children.is_empty() && self.nodes[current].visits > 0 {
            current = self.best_child(current);
        }
        current
    }

    /// UCB1 over the children. Unvisited children order strictly first (an
    /// explicit check rather than a float infinity sentinel), so every child
    /// is sampled once before exploitation starts.
    fn best_child(&self, parent: usize) -> usize {
        let children = &self.nodes[parent].children;
        if let Some(&fresh) = children.iter().find(|&&c| self.nodes[c].visits == 0) {
            return fresh;
        }
        let total = self.nodes[parent].visits as f64;
        let mut best = children[0];
        let mut best_score = f64::NEG_INFINITY;
        for &child in children {
            let node = &self.nodes[child];
            let exploit = node.wins / node.visits as f64;
            let explore = self.exploration * (total.ln() / node.visits as f64).sqrt();
            let score = exploit + explore;
            if score > best_score {
                best_score = score;
                best = child;
            }
        }
        best
    }

    /// Add one child carrying the same community and a copy of the remaining
    /// deck. The state does not advance; the child is an independent
    /// resampling slot for the same decision point.
    fn expand(&mut self, parent: usize) -> usize {
        let child = Node {
            community: self.nodes[parent].community.clone(),
            deck: self.nodes[parent].deck.clone(),
            parent: Some(parent),
            children: Vec::new(),
            visits: 0,
            wins: 0.0,
        };
        let idx = self.nodes.len();
        self.nodes.push(child);
        self.nodes[parent].children.push(idx);
        idx
    }

    /// Credit the rolled-out node and every ancestor up to and including the
    /// root.
    fn backpropagate(&mut self, mut node: usize, reward: f64) {
        loop {
            let n = &mut self.nodes[node];
            n.visits += 1;
            n.wins += reward;
            match n.parent {
                Some(p) => node = p,
                None => break,
            }
        }
    }
}

/// Run the search until the wall-clock budget elapses and emit the decision.
///
/// The state is validated up front (corrupted card sets fail fast); after
/// that the loop has no error path and no iteration cap. An in-flight rollout
/// always completes, so every started rollout is backpropagated exactly once.
pub fn decide<R: Rng + ?Sized>(
    hole: HoleCards,
    board: &Board,
    deck: &[Card],
    config: DecisionConfig,
    rng: &mut R,
) -> Result<DecisionReport, HandError> {
    validate_state(&hole, board, deck)?;

    let start = Instant::now();
    let mut tree = SearchTree::new(hole, board, deck, config.exploration);
    let mut scratch = Vec::with_capacity(deck.len());
    let (mut wins, mut ties, mut losses) = (0u64, 0u64, 0u64);

    while start.elapsed() < config.budget {
        match tree.run_iteration(rng, &mut scratch) {
            Outcome::Win => wins += 1,
            Outcome::Tie => ties += 1,
            Outcome::Loss => losses += 1,
        }
    }

    let simulations = wins + ties + losses;
    debug_assert_eq!(simulations, tree.root_visits());
    let win_probability = if simulations == 0 {
        0.0
    } else {
        (wins as f64 + 0.5 * ties as f64) / simulations as f64
    };
    let decision = Decision::from_probability(win_probability);
    debug!(
        "decision {:?} p={:.3} sims={} w/t/l={}/{}/{} nodes={} elapsed={:?}",
        decision,
        win_probability,
        simulations,
        wins,
        ties,
        losses,
        tree.node_count(),
        start.elapsed()
    );
    Ok(DecisionReport { decision, win_probability, simulations, wins, ties, losses })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;
    use crate::deck::Deck;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn preflop_tree(exploration: f64) -> SearchTree {
        let hole: HoleCards = "As Ad".parse().unwrap();
        let deck = Deck::without(&hole.as_array());
        SearchTree::new(hole, &Board::default(), deck.as_slice(), exploration)
    }

    #[test]
    fn first_iteration_rolls_out_the_root_without_expanding() {
        let mut tree = preflop_tree(DEFAULT_EXPLORATION);
        let mut rng = StdRng::seed_from_u64(1);
        let mut scratch = Vec::new();
        tree.run_iteration(&mut rng, &mut scratch);
        assert_eq!(tree.root_visits(), 1);
        assert_eq!(tree.node_count(), 1);
    }

    #[test]
    fn visited_nodes_expand_one_child_per_iteration() {
        let mut tree = preflop_tree(DEFAULT_EXPLORATION);
        let mut rng = StdRng::seed_from_u64(2);
        let mut scratch = Vec::new();
        tree.run_iteration(&mut rng, &mut scratch);
        tree.run_iteration(&mut rng, &mut scratch);
        // second pass selects the visited root and expands exactly one child
        assert_eq!(tree.node_count(), 2);
        assert_eq!(tree.root_visits(), 2);
        assert_eq!(tree.nodes[1].visits, 1);
        assert_eq!(tree.nodes[1].parent, Some(0));
    }

    #[test]
    fn expansion_copies_the_parent_state_verbatim() {
        let mut tree = preflop_tree(DEFAULT_EXPLORATION);
        let child = tree.expand(0);
        assert_eq!(tree.nodes[child].community, tree.nodes[0].community);
        assert_eq!(tree.nodes[child].deck, tree.nodes[0].deck);
    }

    #[test]
    fn unvisited_children_are_selected_before_any_scored_child() {
        let mut tree = preflop_tree(DEFAULT_EXPLORATION);
        tree.nodes[0].visits = 10;
        tree.nodes[0].wins = 7.0;
        let scored = tree.expand(0);
        tree.nodes[scored].visits = 10;
        tree.nodes[scored].wins = 10.0; // perfect record, huge UCB1 score
        let fresh = tree.expand(0);
        assert_eq!(tree.best_child(0), fresh);
    }

    #[test]
    fn backpropagation_reaches_the_root_inclusive() {
        let mut tree = preflop_tree(DEFAULT_EXPLORATION);
        let a = tree.expand(0);
        let b = tree.expand(a);
        tree.backpropagate(b, 0.5);
        for &idx in &[0, a, b] {
            assert_eq!(tree.nodes[idx].visits, 1);
            assert_eq!(tree.nodes[idx].wins, 0.5);
        }
    }

    #[test]
    fn root_statistics_track_all_iterations() {
        let mut tree = preflop_tree(DEFAULT_EXPLORATION);
        let mut rng = StdRng::seed_from_u64(3);
        let mut scratch = Vec::new();
        for _ in 0..50 {
            tree.run_iteration(&mut rng, &mut scratch);
        }
        assert_eq!(tree.root_visits(), 50);
        assert!(tree.root_wins() >= 0.0);
        assert!(tree.root_wins() <= tree.root_visits() as f64);
    }

    #[test]
    fn stay_boundary_is_inclusive() {
        assert_eq!(Decision::from_probability(0.5), Decision::Stay);
        assert_eq!(Decision::from_probability(0.499), Decision::Fold);
        assert_eq!(Decision::from_probability(0.0), Decision::Fold);
        assert_eq!(Decision::from_probability(1.0), Decision::Stay);
    }

    #[test]
    fn corrupted_state_is_rejected_before_searching() {
        let hole: HoleCards = "As Ad".parse().unwrap();
        let board = Board::default();
        // deck still contains the hole cards
        let deck = Deck::standard();
        let err = decide(
            hole,
            &board,
            deck.as_slice(),
            DecisionConfig::with_budget(Duration::from_millis(1)),
            &mut StdRng::seed_from_u64(4),
        )
        .unwrap_err();
        assert_eq!(err, HandError::DeckOverlap);
    }
}

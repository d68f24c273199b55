//! holdem-mcts: fold/stay decision engine for heads-up no-betting Hold'em
//!
//! At each dealing phase (pre-flop, flop, turn, river) the engine runs
//! UCB1-guided Monte Carlo rollouts against a uniform-random opponent until a
//! wall-clock budget elapses, then folds or stays on the estimated win
//! probability.
//!
//! ## Quick start: one decision
//! ```
//! use holdem_mcts::deck::Deck;
//! use holdem_mcts::hand::{Board, HoleCards};
//! use holdem_mcts::mcts::{decide, Decision, DecisionConfig};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use std::time::Duration;
//!
//! let hole: HoleCards = "As Ad".parse().unwrap();
//! let board = Board::default();
//! let deck = Deck::without(&hole.as_array());
//! let mut rng = StdRng::seed_from_u64(7);
//!
//! let report = decide(
//!     hole,
//!     &board,
//!     deck.as_slice(),
//!     DecisionConfig::with_budget(Duration::from_millis(50)),
//!     &mut rng,
//! )
//! .unwrap();
//! assert_eq!(report.decision, Decision::Stay);
//! ```
//!
//! ## CLI
//! Play a full four-phase hand against a hidden opponent:
//! ```sh
//! cargo run --release --bin holdem-mcts -- --budget-ms 10000
//! ```

pub mod cards;
pub mod deck;
pub mod evaluator;
pub mod game;
pub mod hand;
pub mod mcts;
pub mod rollout;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

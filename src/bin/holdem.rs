use clap::Parser;
use holdem_mcts::deck::Deck;
use holdem_mcts::game::{showdown, Phase};
use holdem_mcts::hand::{Board, HoleCards};
use holdem_mcts::mcts::{decide, Decision, DecisionConfig, DEFAULT_EXPLORATION};
use holdem_mcts::rollout::Outcome;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::time::Duration;

/// Play one heads-up no-betting hand. The engine decides fold or stay at
/// each dealing phase; folding ends the hand, staying through the river goes
/// to showdown against the hidden opponent.
#[derive(Parser, Debug)]
#[command(name = "holdem-mcts", version)]
struct Args {
    /// Wall-clock budget per decision, in milliseconds.
    #[arg(long, default_value_t = 10_000)]
    budget_ms: u64,

    /// UCB1 exploration constant.
    #[arg(long, default_value_t = DEFAULT_EXPLORATION)]
    exploration: f64,

    /// Seed for the deal and the rollouts; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(|| rand::rng().next_u64());
    log::info!("seed {seed}");
    let mut rng = StdRng::seed_from_u64(seed);

    let mut deck = Deck::standard();
    deck.shuffle_with(&mut rng);
    let hero = HoleCards::from_slice(&deck.draw_n(2)?)?;
    let villain = HoleCards::from_slice(&deck.draw_n(2)?)?;
    let mut board = Board::default();

    println!("your hole cards: {} {}", hero.first(), hero.second());

    let config = DecisionConfig {
        budget: Duration::from_millis(args.budget_ms),
        exploration: args.exploration,
    };

    for phase in Phase::ALL {
        phase.deal(&mut deck, &mut board)?;
        println!("\n--- {phase} ---");
        if !board.is_empty() {
            let cards: Vec<String> =
                board.as_slice().iter().map(|c| c.to_string()).collect();
            println!("board: {}", cards.join(" "));
        }

        // the opponent's hidden cards stay in the hero's sampling universe:
        // the engine only knows its own hole cards and the board
        let mut known = hero.as_array().to_vec();
        known.extend_from_slice(board.as_slice());
        let sampling = Deck::without(&known);

        let report = decide(hero, &board, sampling.as_slice(), config, &mut rng)?;
        println!(
            "win probability {:.2} over {} simulations ({} wins / {} ties / {} losses)",
            report.win_probability, report.simulations, report.wins, report.ties, report.losses
        );
        match report.decision {
            Decision::Fold => {
                println!("decision: fold");
                return Ok(());
            }
            Decision::Stay => println!("decision: stay"),
        }
    }

    println!("\nopponent shows: {} {}", villain.first(), villain.second());
    match showdown(&hero, &villain, &board) {
        Outcome::Win => println!("you win"),
        Outcome::Loss => println!("you lose"),
        Outcome::Tie => println!("split pot"),
    }
    Ok(())
}

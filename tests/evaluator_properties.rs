use holdem_mcts::cards::Card;
use holdem_mcts::deck::Deck;
use holdem_mcts::evaluator::{evaluate, EvaluatedHand};
use proptest::prelude::*;
use proptest::sample::subsequence;

/// Random duplicate-free pools drawn from the 52-card deck.
fn distinct_pool(size: impl Into<proptest::collection::SizeRange>) -> impl Strategy<Value = Vec<Card>> {
    subsequence(Deck::standard().as_slice().to_vec(), size).prop_shuffle()
}

fn eval_pool(pool: &[Card]) -> EvaluatedHand {
    evaluate([pool[0], pool[1]], &pool[2..])
}

/// Independent check: the best evaluation over every 5-card subset.
fn brute_force_best(pool: &[Card]) -> EvaluatedHand {
    let n = pool.len();
    let mut best: Option<EvaluatedHand> = None;
    for i in 0..n {
        for j in i + 1..n {
            for k in j + 1..n {
                for l in k + 1..n {
                    for m in l + 1..n {
                        let five = [pool[i], pool[j], pool[k], pool[l], pool[m]];
                        let e = evaluate([five[0], five[1]], &five[2..]);
                        if best.map_or(true, |b| e > b) {
                            best = Some(e);
                        }
                    }
                }
            }
        }
    }
    best.expect("pool has at least five cards")
}

proptest! {
    #[test]
    fn group_evaluation_agrees_with_brute_force(pool in distinct_pool(5..=7usize)) {
        let grouped = eval_pool(&pool);
        let brute = brute_force_best(&pool);
        prop_assert_eq!(grouped.category, brute.category);
        prop_assert_eq!(grouped.value(), brute.value());
    }

    #[test]
    fn best_five_is_a_distinct_subset_of_the_pool(pool in distinct_pool(5..=7usize)) {
        let e = eval_pool(&pool);
        for card in e.best_five {
            prop_assert!(pool.contains(&card));
        }
        for i in 0..5 {
            for j in i + 1..5 {
                prop_assert_ne!(e.best_five[i], e.best_five[j]);
            }
        }
    }

    #[test]
    fn ordering_is_antisymmetric_and_transitive(
        a in distinct_pool(7usize),
        b in distinct_pool(7usize),
        c in distinct_pool(7usize),
    ) {
        let ea = eval_pool(&a);
        let eb = eval_pool(&b);
        let ec = eval_pool(&c);

        // antisymmetric: if a >= b and b >= a then a == b
        if ea >= eb && eb >= ea { prop_assert_eq!(ea, eb); }

        // transitive: if a >= b and b >= c then a >= c
        if ea >= eb && eb >= ec { prop_assert!(ea >= ec); }
    }
}

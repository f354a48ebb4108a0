//! Statistics accumulator tests over seeded trial sequences.
//!
//! # Test Categories
//!
//! 1. **Counting**: bucket counts always sum to the number of trials
//! 2. **Determinism**: incremental and from-scratch statistics agree exactly
//! 3. **Convergence**: running statistics approach their expected values
//! 4. **Standard error**: closed-form values at known trial counts

use approx::{assert_abs_diff_eq, assert_relative_eq};
use proptest::prelude::*;
use sim_core::process::{estimate_pi, Outcome, PiPoint, Process, ProcessKind, SumDice};
use sim_core::rng::RandomSource;
use sim_core::stats::{Statistics, StatisticsAccumulator};
use sim_core::trial::TrialLog;
use std::time::Duration;

fn seeded_log(process: &Process, seed: u64, n: usize) -> TrialLog {
    let mut source = RandomSource::lattice(Some(seed));
    let mut log = TrialLog::new();
    for _ in 0..n {
        let outcome = process.run_trial(&mut source);
        log.append(process.id(), outcome, Duration::ZERO);
    }
    log
}

// ============================================================================
// Counting
// ============================================================================

#[test]
fn test_coin_heads_plus_tails_is_total() {
    let process = Process::from_kind(ProcessKind::CoinFlip);
    let log = seeded_log(&process, 42, 1000);

    let Statistics::CoinFlip(coin) = Statistics::compute(&process, log.entries()) else {
        panic!("expected coin statistics");
    };
    assert_eq!(coin.heads + coin.tails, 1000);
    assert_eq!(coin.total, 1000);
    let shares = coin.heads_percentage + coin.tails_percentage;
    assert_abs_diff_eq!(shares, 100.0, epsilon = 1e-9);
}

#[test]
fn test_foreign_trials_are_ignored() {
    let coin = Process::from_kind(ProcessKind::CoinFlip);
    let dice = Process::from_kind(ProcessKind::DiceRoll);

    let mut log = seeded_log(&coin, 1, 10);
    log.append(dice.id(), Outcome::Integer(4), Duration::ZERO);

    assert_eq!(Statistics::compute(&coin, log.entries()).total(), 10);
    assert_eq!(Statistics::compute(&dice, log.entries()).total(), 1);

    let acc = StatisticsAccumulator::from_trials(&dice, log.entries());
    assert_eq!(acc.len(), 1);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn prop_dice_counts_sum_to_n(seed in any::<u64>(), n in 0usize..500) {
        let process = Process::from_kind(ProcessKind::DiceRoll);
        let log = seeded_log(&process, seed, n);
        let Statistics::DiceRoll(dice) = Statistics::compute(&process, log.entries()) else {
            panic!("expected dice statistics");
        };
        prop_assert_eq!(dice.counts.iter().sum::<u64>(), n as u64);
        prop_assert_eq!(dice.convergence.len(), n);
    }

    #[test]
    fn prop_sum_dice_in_domain(seed in any::<u64>(), dice in 1usize..=20) {
        let process = Process::from(SumDice::new(dice));
        let log = seeded_log(&process, seed, 100);
        for trial in log.entries() {
            let Outcome::Integer(sum) = *trial.result() else {
                panic!("expected integer outcome");
            };
            prop_assert!(sum >= dice as u32 && sum <= 6 * dice as u32);
        }
    }
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_incremental_matches_recompute() {
    for kind in ProcessKind::ALL {
        let process = Process::from_kind(kind);
        let log = seeded_log(&process, 2024, 2000);

        let mut acc = StatisticsAccumulator::new(&process);
        for trial in log.entries() {
            acc.push(trial.result());
        }

        let expected = Statistics::compute(&process, log.entries());
        assert_eq!(acc.snapshot(), expected, "{kind}");
    }
}

#[test]
fn test_recompute_is_idempotent() {
    let process = Process::from(SumDice::new(7));
    let log = seeded_log(&process, 99, 500);

    let first = Statistics::compute(&process, log.entries());
    let second = Statistics::compute(&process, log.entries());
    assert_eq!(first, second);
}

// ============================================================================
// Convergence
// ============================================================================

#[test]
fn test_coin_proportion_converges() {
    let process = Process::from_kind(ProcessKind::CoinFlip);
    let log = seeded_log(&process, 42, 1000);
    let Statistics::CoinFlip(coin) = Statistics::compute(&process, log.entries()) else {
        panic!("expected coin statistics");
    };
    assert_eq!(coin.heads, 487);
    assert!(coin.proportion > 0.4 && coin.proportion < 0.6);
}

#[test]
fn test_dice_average_converges() {
    let process = Process::from_kind(ProcessKind::DiceRoll);
    let log = seeded_log(&process, 42, 1000);
    let Statistics::DiceRoll(dice) = Statistics::compute(&process, log.entries()) else {
        panic!("expected dice statistics");
    };
    assert!(dice.mean > 3.0 && dice.mean < 4.0);
    assert_relative_eq!(dice.std_dev, (35.0_f64 / 12.0).sqrt(), max_relative = 0.1);
}

#[test]
fn test_pi_estimate_matches_scatter() {
    let process = Process::from_kind(ProcessKind::PiSimulation);
    let log = seeded_log(&process, 7, 4000);
    let Statistics::PiSimulation(pi) = Statistics::compute(&process, log.entries()) else {
        panic!("expected pi statistics");
    };

    let points: Vec<PiPoint> = pi
        .inside_points
        .iter()
        .chain(pi.outside_points.iter())
        .copied()
        .collect();
    assert_eq!(pi.estimate, estimate_pi(&points));
    assert!(pi.error < 0.2);
}

#[test]
fn test_sum_dice_spread() {
    let process = Process::from(SumDice::new(5));
    let log = seeded_log(&process, 5, 3000);
    let Statistics::SumDice(sum) = Statistics::compute(&process, log.entries()) else {
        panic!("expected sum-dice statistics");
    };
    assert_eq!(sum.expected_value, 17.5);
    let expected_std_dev = (5.0_f64 * 35.0 / 12.0).sqrt();
    assert_relative_eq!(sum.expected_std_dev, expected_std_dev, epsilon = 1e-12);
    assert_relative_eq!(sum.std_dev, sum.expected_std_dev, max_relative = 0.1);
    assert!((sum.average - 17.5).abs() < 0.5);
}

// ============================================================================
// Standard error
// ============================================================================

#[test]
fn test_coin_standard_error_at_hundred() {
    let process = Process::from_kind(ProcessKind::CoinFlip);
    let log = seeded_log(&process, 3, 100);
    let stats = Statistics::compute(&process, log.entries());
    assert_relative_eq!(stats.standard_error(), 0.05, epsilon = 1e-12);
}

#[test]
fn test_standard_error_shrinks_with_root_n() {
    let process = Process::from_kind(ProcessKind::DiceRoll);
    let log = seeded_log(&process, 11, 400);
    let stats = Statistics::compute(&process, log.entries());

    let series = stats.convergence();
    let se = series.standard_errors();
    assert_relative_eq!(se[99] / se[399], 2.0, epsilon = 1e-12);

    let band = series.band(2.0);
    assert_relative_eq!(band[399].1 - band[399].0, 4.0 * se[399], epsilon = 1e-12);
}

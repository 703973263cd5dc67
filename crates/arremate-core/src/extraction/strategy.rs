//! Ordered parsing strategies with first-non-empty selection.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A parsing strategy shared by both document pipelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Line-oriented state machine tuned to the common layout.
    Primary,
    /// Block/regex parser for merged or split lines.
    Fallback,
}

impl Strategy {
    /// The order strategies are tried in.
    pub const ORDER: [Strategy; 2] = [Strategy::Primary, Strategy::Fallback];
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => write!(f, "primary"),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}

/// Records from the first strategy that produced any.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyOutcome<R> {
    /// Records produced by the winning strategy.
    pub records: Vec<R>,
    /// Strategy that produced them, `None` if all came back empty.
    pub strategy: Option<Strategy>,
    /// Strategies that were run, in order.
    pub attempted: Vec<Strategy>,
}

/// Run `strategies` in order, stopping at the first non-empty result.
pub fn first_non_empty<R>(
    strategies: &[Strategy],
    mut run: impl FnMut(Strategy) -> Vec<R>,
) -> StrategyOutcome<R> {
    let mut attempted = Vec::with_capacity(strategies.len());

    for &strategy in strategies {
        attempted.push(strategy);
        let records = run(strategy);
        debug!("{} strategy produced {} records", strategy, records.len());

        if !records.is_empty() {
            return StrategyOutcome {
                records,
                strategy: Some(strategy),
                attempted,
            };
        }
    }

    StrategyOutcome {
        records: Vec::new(),
        strategy: None,
        attempted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stops_at_first_non_empty() {
        let outcome = first_non_empty(&Strategy::ORDER, |s| match s {
            Strategy::Primary => vec![1, 2],
            Strategy::Fallback => panic!("fallback must not run"),
        });

        assert_eq!(outcome.records, vec![1, 2]);
        assert_eq!(outcome.strategy, Some(Strategy::Primary));
        assert_eq!(outcome.attempted, vec![Strategy::Primary]);
    }

    #[test]
    fn test_falls_back_when_primary_empty() {
        let outcome = first_non_empty(&Strategy::ORDER, |s| match s {
            Strategy::Primary => Vec::new(),
            Strategy::Fallback => vec!["x"],
        });

        assert_eq!(outcome.strategy, Some(Strategy::Fallback));
        assert_eq!(outcome.attempted, Strategy::ORDER.to_vec());
    }

    #[test]
    fn test_all_empty() {
        let outcome: StrategyOutcome<u8> = first_non_empty(&Strategy::ORDER, |_| Vec::new());
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.strategy, None);
        assert_eq!(outcome.attempted.len(), 2);
    }
}

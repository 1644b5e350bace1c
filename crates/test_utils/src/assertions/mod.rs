//! Assertion utilities for testing

/// Assert that a gate outcome was executed and return its `(round, next_round, tally)`.
#[macro_export]
macro_rules! assert_executed {
    ($outcome:expr) => {
        match $outcome {
            $crate::council_types::app::GateOutcome::Executed {
                round,
                next_round,
                tally,
            } => (round, next_round, tally),
            other => panic!("Expected Executed, got {:?}", other),
        }
    };
}

/// Assert that a gate outcome was rejected with a reason matching `$pattern`
/// and return its tally.
#[macro_export]
macro_rules! assert_rejected {
    ($outcome:expr, $pattern:pat) => {
        match $outcome {
            $crate::council_types::app::GateOutcome::Rejected { reason, tally } => {
                assert!(
                    matches!(reason, $pattern),
                    "unexpected rejection reason: {:?}",
                    reason
                );
                tally
            }
            other => panic!("Expected Rejected, got {:?}", other),
        }
    };
}

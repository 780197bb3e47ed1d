//! Batch evaluation of strategies.
//!
//! An [`Evaluation`] plays many games with one roster and folds every game
//! log into [`EvaluationResults`]: wins, the move at which each win
//! happened, and eliminations per reason. [`report`] renders the results as
//! a table and appends run logs to disk.

pub mod report;
pub mod results;
pub mod runner;

pub use report::{append_run_log, format_table, parent_dir_exists, run_log_block};
pub use results::{EvaluationResults, PlayerRecord};
pub use runner::{Evaluation, EvaluationConfig};

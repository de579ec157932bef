//! CSV loading and per-exercise record types.
//!
//! Every loader follows the same shape: read header-keyed raw rows, run a
//! single coercion pass, hand back typed records. Nothing is mutated after
//! that pass.

mod disasters;
mod leaders;
mod loader;
mod trials;

pub use disasters::{DisasterRecord, load_disasters, read_disasters};
pub use leaders::{LeaderRecord, load_leaders, read_leaders};
pub use loader::{RawRow, load_csv_rows, read_csv_rows};
pub use trials::{TrialRecord, load_trials, read_trials};

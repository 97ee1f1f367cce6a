//! The sampling core: path generation, timed fetches, round orchestration

mod fetch;
mod path;
mod round;

pub use fetch::{FetchOutcome, LeafFetcher};
pub use path::{render_path, PathSampler};
pub use round::{RoundReport, SamplingRound};

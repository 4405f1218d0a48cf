pub mod counter;

pub use counter::{CounterConfig, MatchCounter};

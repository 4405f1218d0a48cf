pub mod identity;
pub mod mode;
pub mod results;
pub mod window;

pub use identity::Identity;
pub use mode::{ActivityMode, DEFAULT_EXCLUDED_MODES};
pub use results::{DayCount, MatchResults};
pub use window::TimeWindow;

use serde::{Deserialize, Serialize};

/// Upstream classification of an activity's game type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityMode(pub i32);

impl ActivityMode {
    pub const TRIALS_OF_OSIRIS: Self = Self(14);
    pub const IRON_BANNER: Self = Self(19);
    pub const PRIVATE_MATCHES: Self = Self(32);
}

/// Ranked, event and private-match modes never count towards a day
pub const DEFAULT_EXCLUDED_MODES: [ActivityMode; 3] = [
    ActivityMode::TRIALS_OF_OSIRIS,
    ActivityMode::IRON_BANNER,
    ActivityMode::PRIVATE_MATCHES,
];

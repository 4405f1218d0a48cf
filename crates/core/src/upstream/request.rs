use crate::models::Identity;

/// Activity history endpoint of the statistics API
pub const DEFAULT_BASE_URL: &str = "https://www.bungie.net/Platform/Destiny/Stats/ActivityHistory";

/// Playlists requested from upstream, as its named mode filter
pub const DEFAULT_MODE_FILTER: &str =
    "Lockdown,ThreeVsThree,Control,FreeForAll,Doubles,Elimination,Rift,AllMayhem,ZoneControl,Supremacy";

/// Build the URL for one page of a character's activity history.
/// Pages are 1-based.
pub fn activity_history_url(
    base_url: &str,
    identity: &Identity,
    mode_filter: &str,
    page: u32,
) -> String {
    format!(
        "{}/{}/{}/{}/?mode={}&page={}",
        base_url.trim_end_matches('/'),
        identity.platform_type,
        identity.account_id,
        identity.character_id,
        mode_filter,
        page
    )
}

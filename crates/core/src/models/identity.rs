/// Who the activity history is fetched for. Values are passed through
/// verbatim into the upstream request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
    pub platform_type: String,
    pub account_id: String,
    pub character_id: String,
}

impl Identity {
    pub fn new(
        platform_type: impl Into<String>,
        account_id: impl Into<String>,
        character_id: impl Into<String>,
    ) -> Self {
        Self {
            platform_type: platform_type.into(),
            account_id: account_id.into(),
            character_id: character_id.into(),
        }
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.platform_type, self.account_id, self.character_id
        )
    }
}

use serde::{Deserialize, Serialize};

/// Fixed set of supply-chain actor roles.
///
/// Authorization decisions are pure functions of the role and the actor's
/// relation to a batch; no string comparison at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActorRole {
    Producer,
    Distributor,
    Retailer,
    Consumer,
    Admin,
}

impl ActorRole {
    /// Stable wire/storage code
    pub fn code(&self) -> &'static str {
        match self {
            ActorRole::Producer => "PRODUCER",
            ActorRole::Distributor => "DISTRIBUTOR",
            ActorRole::Retailer => "RETAILER",
            ActorRole::Consumer => "CONSUMER",
            ActorRole::Admin => "ADMIN",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ActorRole::Producer => "Producer",
            ActorRole::Distributor => "Distributor",
            ActorRole::Retailer => "Retailer",
            ActorRole::Consumer => "Consumer",
            ActorRole::Admin => "Administrator",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "PRODUCER" => Some(ActorRole::Producer),
            "DISTRIBUTOR" => Some(ActorRole::Distributor),
            "RETAILER" => Some(ActorRole::Retailer),
            "CONSUMER" => Some(ActorRole::Consumer),
            "ADMIN" => Some(ActorRole::Admin),
            _ => None,
        }
    }

    pub fn all() -> Vec<ActorRole> {
        vec![
            ActorRole::Producer,
            ActorRole::Distributor,
            ActorRole::Retailer,
            ActorRole::Consumer,
            ActorRole::Admin,
        ]
    }
}

impl std::fmt::Display for ActorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_roundtrip() {
        for role in ActorRole::all() {
            assert_eq!(ActorRole::from_code(role.code()), Some(role));
        }
        assert_eq!(ActorRole::from_code("FARMER"), None);
    }
}

use uuid::Uuid;

use crate::model::ids::UserId;

/// Display name used for results submitted without a signed-in user.
pub const ANONYMOUS_NICKNAME: &str = "익명";

/// Who is playing a session: a signed-in user or a uuid-tagged guest.
///
/// Guests keep a stable v4 uuid for the device so repeat plays can be grouped
/// client-side; result records see a `None` user id and the anonymous
/// nickname.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerIdentity {
    User { id: UserId, nickname: String },
    Guest { id: Uuid },
}

impl PlayerIdentity {
    #[must_use]
    pub fn user(id: UserId, nickname: impl Into<String>) -> Self {
        Self::User {
            id,
            nickname: nickname.into(),
        }
    }

    /// Mint a fresh guest identity.
    #[must_use]
    pub fn guest() -> Self {
        Self::Guest { id: Uuid::new_v4() }
    }

    /// Rebuild a guest identity from a previously stored uuid.
    #[must_use]
    pub fn guest_with_id(id: Uuid) -> Self {
        Self::Guest { id }
    }

    #[must_use]
    pub fn user_id(&self) -> Option<UserId> {
        match self {
            Self::User { id, .. } => Some(*id),
            Self::Guest { .. } => None,
        }
    }

    /// Nickname for result payloads; guests get the anonymous placeholder.
    #[must_use]
    pub fn nickname(&self) -> &str {
        match self {
            Self::User { nickname, .. } => nickname,
            Self::Guest { .. } => ANONYMOUS_NICKNAME,
        }
    }

    #[must_use]
    pub fn guest_id(&self) -> Option<Uuid> {
        match self {
            Self::User { .. } => None,
            Self::Guest { id } => Some(*id),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

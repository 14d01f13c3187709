use thiserror::Error;
use url::Url;

use crate::model::ids::{CandidateId, WorldcupId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WorldcupError {
    #[error("worldcup title cannot be empty")]
    EmptyTitle,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CandidateError {
    #[error("candidate name cannot be empty")]
    EmptyName,
}

//
// ─── WORLDCUP ──────────────────────────────────────────────────────────────────
//

/// Descriptor for a single-elimination bracket tournament.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Worldcup {
    id: WorldcupId,
    title: String,
    description: Option<String>,
}

impl Worldcup {
    /// Create a worldcup descriptor.
    ///
    /// # Errors
    ///
    /// Returns `WorldcupError::EmptyTitle` if the title is blank.
    pub fn new(
        id: WorldcupId,
        title: impl Into<String>,
        description: Option<String>,
    ) -> Result<Self, WorldcupError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(WorldcupError::EmptyTitle);
        }

        Ok(Self {
            id,
            title,
            description,
        })
    }

    #[must_use]
    pub fn id(&self) -> WorldcupId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

//
// ─── CANDIDATE ─────────────────────────────────────────────────────────────────
//

/// One bracket entrant with its cumulative tournament stats.
///
/// Stats are owned by the backend; a session holds a read-only copy and emits
/// full replacement counters after the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    id: CandidateId,
    worldcup_id: WorldcupId,
    name: String,
    image_url: Option<Url>,
    win_count: u32,
    final_count: u32,
    appear_count: u32,
}

impl Candidate {
    /// Create a brand-new candidate with zeroed stats.
    ///
    /// # Errors
    ///
    /// Returns `CandidateError::EmptyName` if the display name is blank.
    pub fn new(
        id: CandidateId,
        worldcup_id: WorldcupId,
        name: impl Into<String>,
        image_url: Option<Url>,
    ) -> Result<Self, CandidateError> {
        Self::from_persisted(id, worldcup_id, name, image_url, 0, 0, 0)
    }

    /// Rehydrate a candidate from persisted storage, stats included.
    ///
    /// # Errors
    ///
    /// Returns `CandidateError::EmptyName` if the display name is blank.
    pub fn from_persisted(
        id: CandidateId,
        worldcup_id: WorldcupId,
        name: impl Into<String>,
        image_url: Option<Url>,
        win_count: u32,
        final_count: u32,
        appear_count: u32,
    ) -> Result<Self, CandidateError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CandidateError::EmptyName);
        }

        Ok(Self {
            id,
            worldcup_id,
            name,
            image_url,
            win_count,
            final_count,
            appear_count,
        })
    }

    #[must_use]
    pub fn id(&self) -> CandidateId {
        self.id
    }

    #[must_use]
    pub fn worldcup_id(&self) -> WorldcupId {
        self.worldcup_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn image_url(&self) -> Option<&Url> {
        self.image_url.as_ref()
    }

    /// Tournaments won.
    #[must_use]
    pub fn win_count(&self) -> u32 {
        self.win_count
    }

    /// Final appearances.
    #[must_use]
    pub fn final_count(&self) -> u32 {
        self.final_count
    }

    /// Tournament appearances.
    #[must_use]
    pub fn appear_count(&self) -> u32 {
        self.appear_count
    }

    /// Win percentage with one decimal, 0 for candidates that never appeared.
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.appear_count == 0 {
            return 0.0;
        }
        let rate = f64::from(self.win_count) / f64::from(self.appear_count) * 100.0;
        (rate * 10.0).round() / 10.0
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

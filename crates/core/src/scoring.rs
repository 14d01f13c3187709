use serde::{Serialize, Serializer};
use std::fmt;

//
// ─── TIER ──────────────────────────────────────────────────────────────────────
//

/// Performance bucket derived from a final quiz score, lowest to highest.
///
/// Labels match the strings the backend stores and ranks by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    NeedsWork,
    Average,
    Diligent,
    Honors,
    Gifted,
    Mensa,
}

impl Tier {
    /// Backend label for this tier.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Tier::NeedsWork => "노력필요",
            Tier::Average => "평범",
            Tier::Diligent => "모범생",
            Tier::Honors => "우등생",
            Tier::Gifted => "수재",
            Tier::Mensa => "멘사",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Tier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

//
// ─── AWARD RULE ────────────────────────────────────────────────────────────────
//

/// How many points a correct answer earns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AwardRule {
    /// Fixed points regardless of answer speed.
    Flat { points: u32 },
    /// Base points plus a bonus per second left on the question countdown.
    TimeBonus { base: u32, per_second: u32 },
}

impl AwardRule {
    /// Points for a correct answer given the seconds remaining at check time.
    #[must_use]
    pub fn award(&self, seconds_remaining: u32) -> u32 {
        match *self {
            AwardRule::Flat { points } => points,
            AwardRule::TimeBonus { base, per_second } => {
                base + per_second.saturating_mul(seconds_remaining)
            }
        }
    }
}

//
// ─── SCORING ───────────────────────────────────────────────────────────────────
//

/// Award rule plus the ordered tier thresholds that fit it.
///
/// Thresholds are checked highest first; the first one the score meets or
/// exceeds wins, and a score below every band maps to [`Tier::NeedsWork`].
/// Keeping the table on the configuration (rather than hard-coded in the
/// session) lets the two historical schemes coexist: the flat award caps a
/// 10-question quiz at 100, the time-bonus award at well over 200, so each
/// needs its own bands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scoring {
    award: AwardRule,
    bands: [(u32, Tier); 5],
}

impl Scoring {
    /// Flat 10 points per correct answer. This is the default scheme.
    #[must_use]
    pub fn flat() -> Self {
        Self {
            award: AwardRule::Flat { points: 10 },
            bands: [
                (100, Tier::Mensa),
                (90, Tier::Gifted),
                (60, Tier::Honors),
                (40, Tier::Diligent),
                (20, Tier::Average),
            ],
        }
    }

    /// 10 points plus 2 per second left on the countdown.
    #[must_use]
    pub fn time_bonus() -> Self {
        Self {
            award: AwardRule::TimeBonus {
                base: 10,
                per_second: 2,
            },
            bands: [
                (180, Tier::Mensa),
                (140, Tier::Gifted),
                (100, Tier::Honors),
                (60, Tier::Diligent),
                (30, Tier::Average),
            ],
        }
    }

    /// Custom rule and threshold table; bands must be ordered highest first.
    #[must_use]
    pub fn custom(award: AwardRule, bands: [(u32, Tier); 5]) -> Self {
        Self { award, bands }
    }

    #[must_use]
    pub fn award_rule(&self) -> AwardRule {
        self.award
    }

    /// Points for a correct answer given the seconds remaining.
    #[must_use]
    pub fn award(&self, seconds_remaining: u32) -> u32 {
        self.award.award(seconds_remaining)
    }

    /// Tier for a final score. Pure: equal scores always map to equal tiers.
    #[must_use]
    pub fn tier_for(&self, score: u32) -> Tier {
        for (threshold, tier) in self.bands {
            if score >= threshold {
                return tier;
            }
        }
        Tier::NeedsWork
    }
}

impl Default for Scoring {
    fn default() -> Self {
        Self::flat()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_award_ignores_remaining_time() {
        let scoring = Scoring::flat();
        assert_eq!(scoring.award(0), 10);
        assert_eq!(scoring.award(9), 10);
    }

    #[test]
    fn time_bonus_award_scales_with_remaining_time() {
        let scoring = Scoring::time_bonus();
        assert_eq!(scoring.award(0), 10);
        assert_eq!(scoring.award(7), 24);
    }

    #[test]
    fn flat_tiers_cover_every_band() {
        let scoring = Scoring::flat();
        assert_eq!(scoring.tier_for(100), Tier::Mensa);
        assert_eq!(scoring.tier_for(95), Tier::Gifted);
        assert_eq!(scoring.tier_for(90), Tier::Gifted);
        assert_eq!(scoring.tier_for(60), Tier::Honors);
        assert_eq!(scoring.tier_for(40), Tier::Diligent);
        assert_eq!(scoring.tier_for(20), Tier::Average);
        assert_eq!(scoring.tier_for(19), Tier::NeedsWork);
        assert_eq!(scoring.tier_for(0), Tier::NeedsWork);
    }

    #[test]
    fn time_bonus_tiers_use_their_own_bands() {
        let scoring = Scoring::time_bonus();
        assert_eq!(scoring.tier_for(180), Tier::Mensa);
        assert_eq!(scoring.tier_for(100), Tier::Honors);
        assert_eq!(scoring.tier_for(29), Tier::NeedsWork);
    }

    #[test]
    fn tier_labels_match_backend_strings() {
        assert_eq!(Tier::Mensa.label(), "멘사");
        assert_eq!(Tier::NeedsWork.label(), "노력필요");
        assert_eq!(Tier::Honors.to_string(), "우등생");
    }
}

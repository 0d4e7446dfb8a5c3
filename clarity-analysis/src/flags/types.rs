//! Flag catalog, evidence payloads, and the option-value sentinels the
//! detectors key on.

use serde::Serialize;
use smallvec::SmallVec;
use std::fmt;
use xxhash_rust::xxh3::Xxh3;

use clarity_core::types::Severity;

/// Single-select option meaning "no clear owner" — triggers ownership
/// diffusion at CRITICAL regardless of how few distinct answers exist.
pub const NO_OWNER_SENTINEL: &str = "not_clearly_defined";

/// Single-select option claiming a trade-off costs nothing.
pub const NOTHING_IMPACTED_SENTINEL: &str = "nothing_will_be_impacted";

/// The contradiction group whose cross-role mismatch is CRITICAL rather
/// than WARN.
pub const DATA_READINESS_GROUP: &str = "data_readiness";

/// The fixed flag catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlagId {
    ReversedPairConflict,
    NarrativeInflationRisk,
    ProofGap,
    ConsequenceUnowned,
    ConfidenceWithoutEvidence,
    CrossRoleMismatch,
    OwnershipDiffusion,
    CapacityIllusionBusiness,
    CapacityIllusionTech,
    CapacityIllusionConfirmed,
    TimeInconsistency,
    BlindSpot,
}

impl FlagId {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ReversedPairConflict => "REVERSED_PAIR_CONFLICT",
            Self::NarrativeInflationRisk => "NARRATIVE_INFLATION_RISK",
            Self::ProofGap => "PROOF_GAP",
            Self::ConsequenceUnowned => "CONSEQUENCE_UNOWNED",
            Self::ConfidenceWithoutEvidence => "CONFIDENCE_WITHOUT_EVIDENCE",
            Self::CrossRoleMismatch => "CROSS_ROLE_MISMATCH",
            Self::OwnershipDiffusion => "OWNERSHIP_DIFFUSION",
            Self::CapacityIllusionBusiness => "CAPACITY_ILLUSION_BUSINESS",
            Self::CapacityIllusionTech => "CAPACITY_ILLUSION_TECH",
            Self::CapacityIllusionConfirmed => "CAPACITY_ILLUSION_CONFIRMED",
            Self::TimeInconsistency => "TIME_INCONSISTENCY",
            Self::BlindSpot => "BLIND_SPOT",
        }
    }
}

impl fmt::Display for FlagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Structured evidence behind one flag.
///
/// Holds identifiers and recorded option values, never free text from
/// other respondents — the surrounding system filters evidence per viewer
/// and must be able to do so without re-deriving scores.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FlagEvidence {
    pub question_ids: SmallVec<[String; 4]>,
    pub participant_ids: SmallVec<[String; 2]>,
    /// Recorded values, stringified (Likert raw values, select options).
    pub values: SmallVec<[String; 4]>,
    /// Human-readable description of the observed pattern.
    pub detail: String,
}

impl FlagEvidence {
    /// Stable hash over the identifying fields, for deduplication.
    pub fn key(&self) -> u64 {
        let mut hasher = Xxh3::new();
        for q in &self.question_ids {
            hasher.update(q.as_bytes());
            hasher.update(b"\x1f");
        }
        hasher.update(b"\x1e");
        for p in &self.participant_ids {
            hasher.update(p.as_bytes());
            hasher.update(b"\x1f");
        }
        hasher.update(b"\x1e");
        for v in &self.values {
            hasher.update(v.as_bytes());
            hasher.update(b"\x1f");
        }
        hasher.digest()
    }
}

/// One detected contradiction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Flag {
    pub id: FlagId,
    pub severity: Severity,
    pub evidence: FlagEvidence,
}

impl Flag {
    pub fn new(id: FlagId, severity: Severity, evidence: FlagEvidence) -> Self {
        Self {
            id,
            severity,
            evidence,
        }
    }

    /// Dedup key: flag id plus evidence identity.
    pub fn dedup_key(&self) -> (FlagId, u64) {
        (self.id, self.evidence.key())
    }
}

/// Flag counts per severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeverityCounts {
    pub critical: usize,
    pub warn: usize,
    pub info: usize,
}

impl SeverityCounts {
    pub fn from_flags(flags: &[Flag]) -> Self {
        let mut counts = Self::default();
        for flag in flags {
            match flag.severity {
                Severity::Critical => counts.critical += 1,
                Severity::Warn => counts.warn += 1,
                Severity::Info => counts.info += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.critical + self.warn + self.info
    }
}

/// Evidence-strength tiers parsed from designated single-select options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceStrength {
    /// Measured or documented evidence.
    Verified,
    /// Partial or informal indicators.
    Partial,
    /// Gut feeling or hearsay.
    Anecdotal,
}

impl EvidenceStrength {
    /// Map a select option to a tier. Unknown options yield `None`, which
    /// detectors treat as "strength not observed".
    pub fn from_option(option: &str) -> Option<Self> {
        match option {
            "measured_data" | "documented_analysis" | "external_audit" => Some(Self::Verified),
            "partial_indicators" | "informal_review" | "pilot_observation" => Some(Self::Partial),
            "gut_feeling" | "anecdotes" | "no_evidence" => Some(Self::Anecdotal),
            _ => None,
        }
    }

    /// Anything below the verified tier counts as weak support.
    pub fn is_weak(&self) -> bool {
        !matches!(self, Self::Verified)
    }
}

/// Closed category set for free-text blind-spot classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlindSpotCategory {
    KnownRisk,
    AvoidedTopic,
    RoleConflict,
    CulturalResistance,
    TechnicalUncertainty,
    ProcessInstability,
    DataQuality,
    /// Text matched no category. Never flagged.
    Unclassified,
}

impl BlindSpotCategory {
    /// The seven classifiable categories, in canonical order.
    pub const CLASSIFIABLE: [BlindSpotCategory; 7] = [
        Self::KnownRisk,
        Self::AvoidedTopic,
        Self::RoleConflict,
        Self::CulturalResistance,
        Self::TechnicalUncertainty,
        Self::ProcessInstability,
        Self::DataQuality,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::KnownRisk => "known_risk",
            Self::AvoidedTopic => "avoided_topic",
            Self::RoleConflict => "role_conflict",
            Self::CulturalResistance => "cultural_resistance",
            Self::TechnicalUncertainty => "technical_uncertainty",
            Self::ProcessInstability => "process_instability",
            Self::DataQuality => "data_quality",
            Self::Unclassified => "unclassified",
        }
    }
}

impl fmt::Display for BlindSpotCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::heirs::{IndividualHeir, KinshipCategory};

/// Juristic classification of a heir's final entitlement.
///
/// Assigned by the base-share engine from the same conditions that produced
/// the numeric share, so the stated reason and the number can never drift
/// apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JuristicStatus {
    /// Ashabul Furud: a fixed doctrinal fraction.
    FixedShare,
    /// Asabah bin Nafs: residue-taker in their own right.
    PrimaryResidue,
    /// Asabah bil Ghair: female converted to residue-taker by a male
    /// counterpart (2:1).
    ResidueWithMaleCounterpart,
    /// Asabah ma'al Ghair: full sister made residue-taker by a daughter.
    ResidueAlongsideDaughter,
    /// Mahjub: blocked by a nearer relative.
    Blocked,
    /// Dzawil Arham: distant kin, zero statutory entitlement.
    DistantKin,
    /// Wasiat Wajibah: mandatory bequest for an adopted child (Statutory).
    MandatoryBequest,
}

impl JuristicStatus {
    /// Traditional Arabic term, used in reports.
    pub fn term(&self) -> &'static str {
        match self {
            JuristicStatus::FixedShare => "Ashabul Furud",
            JuristicStatus::PrimaryResidue => "Asabah bin Nafs",
            JuristicStatus::ResidueWithMaleCounterpart => "Asabah bil Ghair",
            JuristicStatus::ResidueAlongsideDaughter => "Asabah ma'al Ghair",
            JuristicStatus::Blocked => "Mahjub",
            JuristicStatus::DistantKin => "Dzawil Arham",
            JuristicStatus::MandatoryBequest => "Wasiat Wajibah",
        }
    }
}

impl std::fmt::Display for JuristicStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.term())
    }
}

/// Intermediate per-heir share produced by the base-share engine and consumed
/// by the resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareRecord {
    pub heir_id: Uuid,
    pub name: String,
    pub category: KinshipCategory,
    /// Fixed fraction of the whole estate, 0..=1. Zero for pure
    /// residue-takers and blocked heirs.
    pub fraction: Decimal,
    /// Human-readable fraction ("1/6", "2/3 (shared)", "Residue", "0").
    pub fraction_label: String,
    pub status: JuristicStatus,
    /// Residue entitlement weight; 0 means not a residue-taker. Males in a
    /// 2:1 relation carry 2, their female counterparts 1.
    pub residue_weight: u32,
    /// When set, `fraction` is a collective entitlement shared per capita by
    /// `group_size` records; resolver step 1 performs the split.
    pub group_size: Option<u32>,
    /// Short justification naming the deciding condition.
    pub note: Option<String>,
}

impl ShareRecord {
    fn base(heir: &IndividualHeir, status: JuristicStatus) -> Self {
        Self {
            heir_id: heir.id,
            name: heir.name.clone(),
            category: heir.category,
            fraction: Decimal::ZERO,
            fraction_label: "0".to_string(),
            status,
            residue_weight: 0,
            group_size: None,
            note: None,
        }
    }

    /// A fixed individual fraction.
    pub fn fixed(
        heir: &IndividualHeir,
        fraction: Decimal,
        label: impl Into<String>,
        note: impl Into<String>,
    ) -> Self {
        Self {
            fraction,
            fraction_label: label.into(),
            note: Some(note.into()),
            ..Self::base(heir, JuristicStatus::FixedShare)
        }
    }

    /// A collective fraction split per capita among `group_size` members.
    pub fn collective(
        heir: &IndividualHeir,
        fraction: Decimal,
        group_size: u32,
        label: impl Into<String>,
        note: impl Into<String>,
    ) -> Self {
        Self {
            group_size: Some(group_size),
            ..Self::fixed(heir, fraction, label, note)
        }
    }

    /// A residue-taker with the given weight.
    pub fn residuary(
        heir: &IndividualHeir,
        weight: u32,
        status: JuristicStatus,
        note: impl Into<String>,
    ) -> Self {
        Self {
            fraction_label: "Residue".to_string(),
            residue_weight: weight,
            note: Some(note.into()),
            ..Self::base(heir, status)
        }
    }

    /// Blocked (Mahjub) by a nearer relative.
    pub fn blocked(heir: &IndividualHeir, blocker: &str) -> Self {
        Self {
            note: Some(format!("Blocked by {}", blocker)),
            ..Self::base(heir, JuristicStatus::Blocked)
        }
    }

    /// Distant kin with zero statutory entitlement.
    pub fn distant_kin(heir: &IndividualHeir, note: impl Into<String>) -> Self {
        Self {
            note: Some(note.into()),
            ..Self::base(heir, JuristicStatus::DistantKin)
        }
    }

    /// Mandatory-bequest share for an adopted child (Statutory mode).
    pub fn bequest(
        heir: &IndividualHeir,
        fraction: Decimal,
        group_size: u32,
        note: impl Into<String>,
    ) -> Self {
        Self {
            fraction,
            fraction_label: "1/3 (Wasiat Wajibah)".to_string(),
            group_size: Some(group_size),
            note: Some(note.into()),
            ..Self::base(heir, JuristicStatus::MandatoryBequest)
        }
    }

    /// True for a surviving husband or wife record.
    pub fn is_spouse(&self) -> bool {
        self.category.is_spouse()
    }
}

/// Aggregate condition of the distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistributionStatus {
    /// Shares and residue consume the estate exactly.
    Balanced,
    /// Aul: fixed shares exceeded the estate and were scaled down.
    Deficit,
    /// Radd: fixed shares left a remainder that was returned to blood heirs.
    Surplus,
}

impl std::fmt::Display for DistributionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DistributionStatus::Balanced => "Balanced",
            DistributionStatus::Deficit => "Deficit (Aul)",
            DistributionStatus::Surplus => "Surplus (Radd)",
        };
        write!(f, "{}", s)
    }
}

/// Outcome of the balance-sheet reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BalanceState {
    /// Fixed shares consume the estate to within one currency unit.
    Exact,
    /// Fixed shares left part of the estate unconsumed.
    Surplus,
    /// Fixed shares overdrew the estate.
    Deficit,
}

/// Balance sheet comparing the fixed shares against the estate before any
/// Aul/Radd adjustment, kept for audit display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reconciliation {
    /// Currency value of the raw fixed fractions.
    pub fixed_shares_total: Decimal,
    /// Estate minus `fixed_shares_total`. Positive when the fixed shares
    /// undershoot, negative when they overshoot.
    pub residual: Decimal,
    pub balance_state: BalanceState,
}

/// Final per-heir entry of a distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeirShare {
    pub heir_id: Uuid,
    pub name: String,
    pub category: KinshipCategory,
    /// Final fraction of the estate after Aul/Radd resolution.
    pub fraction: Decimal,
    pub fraction_label: String,
    /// Final amount in the smallest currency unit.
    pub amount: Decimal,
    pub status: JuristicStatus,
    pub note: Option<String>,
}

/// Complete result of a Faraid distribution.
///
/// Every input heir appears exactly once in `heirs`, including those with a
/// zero amount. Amounts sum to `total_estate` exactly (a single rounding
/// residual is folded into the last entitled heir), except when no heir holds
/// any entitlement or a capped mandatory bequest is the only share: the
/// undistributed remainder is then reported through the narrative and the
/// reconciliation instead of being forced onto an unentitled heir.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionResult {
    /// The net estate that was distributed.
    pub total_estate: Decimal,
    pub status: DistributionStatus,
    pub heirs: Vec<HeirShare>,
    /// One sentence per significant computation step, in the order the steps
    /// occurred. Presentation layers render this verbatim.
    pub narrative: Vec<String>,
    pub reconciliation: Reconciliation,
}

impl DistributionResult {
    /// Looks up a heir's final entry by id.
    pub fn find(&self, heir_id: Uuid) -> Option<&HeirShare> {
        self.heirs.iter().find(|h| h.heir_id == heir_id)
    }

    /// Sum of all final amounts. Equals `total_estate` for any valid result.
    pub fn amount_distributed(&self) -> Decimal {
        self.heirs.iter().map(|h| h.amount).sum()
    }

    /// Renders a human-readable report: the narrative followed by a per-heir
    /// table, in the style of a printed settlement sheet.
    pub fn explain(&self) -> String {
        use std::fmt::Write;
        let mut out = String::new();
        writeln!(&mut out, "Faraid distribution of {} ({})", self.total_estate, self.status).unwrap();
        writeln!(&mut out, "{:-<60}", "").unwrap();
        for line in &self.narrative {
            writeln!(&mut out, "  {}", line).unwrap();
        }
        writeln!(&mut out, "{:-<60}", "").unwrap();
        let name_width = self
            .heirs
            .iter()
            .map(|h| h.name.len())
            .max()
            .unwrap_or(10)
            .max(10);
        for heir in &self.heirs {
            writeln!(
                &mut out,
                "  {:<width$}  {:<28}  {:>16}  {}",
                heir.name,
                heir.category.label(),
                heir.amount,
                heir.status,
                width = name_width
            )
            .unwrap();
        }
        out
    }
}

impl std::fmt::Display for DistributionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} distributed among {} heirs ({})",
            self.total_estate,
            self.heirs.len(),
            self.status
        )
    }
}

/// Errors surfaced to the caller before or during computation.
///
/// Monetary clamps are *not* errors; they are recorded in note fields so a
/// batch of computations never aborts on one malformed figure.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum FaraidError {
    /// Contradictory relationship input; names the conflicting category.
    #[error("Conflicting heir input for {category}: {reason}")]
    ConflictingHeir {
        category: KinshipCategory,
        reason: String,
    },

    /// Malformed numeric input that cannot be clamped.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A resolver invariant failed. Indicates a defect, not bad input.
    #[error("Internal invariant violation: {0}")]
    InvariantViolation(String),
}

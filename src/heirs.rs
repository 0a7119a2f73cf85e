//! # Heir Catalog (Ahli Waris)
//!
//! The closed set of kinship categories recognised by the engine, plus the
//! flat heir record the caller assembles. Each heir is a standalone record of
//! "who they are relative to the deceased"; the engine never resolves a
//! family tree (see crate docs).

use serde::{Deserialize, Serialize};
use strum::EnumIter;
use uuid::Uuid;

use crate::config::{FaraidConfig, Gender};
use crate::types::FaraidError;

/// A relative category recognised by Faraid.
///
/// "Paternal" collaterals are related through the father's line, "maternal"
/// through the mother's. Grandchildren through a daughter are modelled because
/// they must appear in the output (as Dzawil Arham), not because they hold a
/// fixed share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum KinshipCategory {
    Son,
    Daughter,
    /// Grandson through a son.
    SonsSon,
    /// Granddaughter through a son.
    SonsDaughter,
    /// Grandson through a daughter (Dzawil Arham).
    DaughtersSon,
    /// Granddaughter through a daughter (Dzawil Arham).
    DaughtersDaughter,
    Father,
    Mother,
    /// Father's father. Nearer maternal-line grandfathers are not modelled.
    PaternalGrandfather,
    /// Mother's mother.
    MaternalGrandmother,
    /// Father's mother.
    PaternalGrandmother,
    Husband,
    Wife,
    FullBrother,
    FullSister,
    /// Half-brother through the father.
    PaternalBrother,
    /// Half-sister through the father.
    PaternalSister,
    /// Half-brother through the mother.
    MaternalBrother,
    /// Half-sister through the mother.
    MaternalSister,
    /// Son of a full brother.
    FullNephew,
    /// Son of a paternal half-brother.
    PaternalNephew,
    /// Father's full brother.
    FullUncle,
    /// Father's paternal half-brother.
    PaternalUncle,
    /// Son of a full uncle.
    FullCousin,
    /// Son of a paternal half-uncle.
    PaternalCousin,
    /// Adopted child. Receives Wasiat Wajibah in Statutory mode only.
    AdoptedChild,
}

impl KinshipCategory {
    /// Canonical display label.
    pub fn label(&self) -> &'static str {
        match self {
            KinshipCategory::Son => "Son",
            KinshipCategory::Daughter => "Daughter",
            KinshipCategory::SonsSon => "Son's Son",
            KinshipCategory::SonsDaughter => "Son's Daughter",
            KinshipCategory::DaughtersSon => "Daughter's Son",
            KinshipCategory::DaughtersDaughter => "Daughter's Daughter",
            KinshipCategory::Father => "Father",
            KinshipCategory::Mother => "Mother",
            KinshipCategory::PaternalGrandfather => "Paternal Grandfather",
            KinshipCategory::MaternalGrandmother => "Maternal Grandmother",
            KinshipCategory::PaternalGrandmother => "Paternal Grandmother",
            KinshipCategory::Husband => "Husband",
            KinshipCategory::Wife => "Wife",
            KinshipCategory::FullBrother => "Full Brother",
            KinshipCategory::FullSister => "Full Sister",
            KinshipCategory::PaternalBrother => "Paternal Half-Brother",
            KinshipCategory::PaternalSister => "Paternal Half-Sister",
            KinshipCategory::MaternalBrother => "Maternal Half-Brother",
            KinshipCategory::MaternalSister => "Maternal Half-Sister",
            KinshipCategory::FullNephew => "Nephew (Son of Full Brother)",
            KinshipCategory::PaternalNephew => "Nephew (Son of Paternal Half-Brother)",
            KinshipCategory::FullUncle => "Paternal Uncle (Full)",
            KinshipCategory::PaternalUncle => "Paternal Uncle (Half)",
            KinshipCategory::FullCousin => "Cousin (Son of Full Uncle)",
            KinshipCategory::PaternalCousin => "Cousin (Son of Half Uncle)",
            KinshipCategory::AdoptedChild => "Adopted Child",
        }
    }

    /// Surviving husband or wife.
    pub fn is_spouse(&self) -> bool {
        matches!(self, KinshipCategory::Husband | KinshipCategory::Wife)
    }

    /// Categories of which at most one heir may exist. The wife is the lone
    /// non-singleton "close" relative (up to four are doctrinally valid).
    pub fn is_singleton(&self) -> bool {
        matches!(
            self,
            KinshipCategory::Father
                | KinshipCategory::Mother
                | KinshipCategory::PaternalGrandfather
                | KinshipCategory::MaternalGrandmother
                | KinshipCategory::PaternalGrandmother
                | KinshipCategory::Husband
        )
    }

    /// Any of the six sibling categories.
    pub fn is_sibling(&self) -> bool {
        matches!(
            self,
            KinshipCategory::FullBrother
                | KinshipCategory::FullSister
                | KinshipCategory::PaternalBrother
                | KinshipCategory::PaternalSister
                | KinshipCategory::MaternalBrother
                | KinshipCategory::MaternalSister
        )
    }

    /// Siblings through the mother only (independent 1/6 - 1/3 rule).
    pub fn is_maternal_sibling(&self) -> bool {
        matches!(
            self,
            KinshipCategory::MaternalBrother | KinshipCategory::MaternalSister
        )
    }

    /// Nephews, paternal uncles and their sons.
    pub fn is_collateral(&self) -> bool {
        matches!(
            self,
            KinshipCategory::FullNephew
                | KinshipCategory::PaternalNephew
                | KinshipCategory::FullUncle
                | KinshipCategory::PaternalUncle
                | KinshipCategory::FullCousin
                | KinshipCategory::PaternalCousin
        )
    }

    /// Relatives connected through a female line: no fixed statutory share.
    pub fn is_distant_kin(&self) -> bool {
        matches!(
            self,
            KinshipCategory::DaughtersSon | KinshipCategory::DaughtersDaughter
        )
    }
}

impl std::fmt::Display for KinshipCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A single heir as supplied by the caller.
///
/// Immutable during computation; the engine never persists it. Multiple heirs
/// may share a category (three sons, two wives).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndividualHeir {
    /// Stable identifier. Generated if the caller does not supply one.
    pub id: Uuid,
    /// Display name, echoed verbatim into the result.
    pub name: String,
    pub category: KinshipCategory,
}

impl IndividualHeir {
    /// Creates a heir with a generated id.
    pub fn new(name: impl Into<String>, category: KinshipCategory) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category,
        }
    }

    /// Creates a heir with a caller-assigned id.
    pub fn with_id(id: Uuid, name: impl Into<String>, category: KinshipCategory) -> Self {
        Self {
            id,
            name: name.into(),
            category,
        }
    }
}

/// Borrowed view over the heir list with the counting helpers the rule
/// engine leans on. Lists are practically tens of records, so linear scans
/// are fine.
#[derive(Debug, Clone, Copy)]
pub struct HeirSet<'a> {
    heirs: &'a [IndividualHeir],
}

impl<'a> HeirSet<'a> {
    pub fn new(heirs: &'a [IndividualHeir]) -> Self {
        Self { heirs }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a IndividualHeir> {
        self.heirs.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.heirs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heirs.len()
    }

    /// All heirs of one category, in input order.
    pub fn of(&self, category: KinshipCategory) -> impl Iterator<Item = &'a IndividualHeir> {
        self.heirs.iter().filter(move |h| h.category == category)
    }

    pub fn count(&self, category: KinshipCategory) -> usize {
        self.of(category).count()
    }

    pub fn exists(&self, category: KinshipCategory) -> bool {
        self.heirs.iter().any(|h| h.category == category)
    }

    /// Total number of siblings of any kind, eligible or not. The mother's
    /// 1/6 threshold counts them literally, even siblings later blocked.
    pub fn sibling_count(&self) -> usize {
        self.heirs.iter().filter(|h| h.category.is_sibling()).count()
    }

    /// Rejects contradictory relationship input before any computation runs.
    ///
    /// Checks, in order: a spouse category impossible for the deceased's
    /// recorded gender, duplicate singleton relatives, and more than four
    /// wives. Out-of-range monetary values are *not* checked here; those are
    /// clamped with a note (see [`crate::estate::EstateInputs`]).
    pub fn validate(&self, config: &FaraidConfig) -> Result<(), FaraidError> {
        let impossible_spouse = match config.deceased_gender {
            Gender::Male => KinshipCategory::Husband,
            Gender::Female => KinshipCategory::Wife,
        };
        if self.exists(impossible_spouse) {
            return Err(FaraidError::ConflictingHeir {
                category: impossible_spouse,
                reason: format!(
                    "a {} cannot survive a {} deceased",
                    impossible_spouse.label(),
                    match config.deceased_gender {
                        Gender::Male => "male",
                        Gender::Female => "female",
                    }
                ),
            });
        }

        for heir in self.heirs {
            if heir.category.is_singleton() && self.count(heir.category) > 1 {
                return Err(FaraidError::ConflictingHeir {
                    category: heir.category,
                    reason: "at most one heir of this category may exist".to_string(),
                });
            }
        }

        if self.count(KinshipCategory::Wife) > 4 {
            return Err(FaraidError::ConflictingHeir {
                category: KinshipCategory::Wife,
                reason: "more than four wives recorded".to_string(),
            });
        }

        Ok(())
    }
}

use serde::{Deserialize, Serialize};

/// Recorded gender of the deceased.
///
/// Decides which spouse category may appear among the heirs and which fixed
/// fraction that spouse takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Gender {
    #[default]
    Male,
    Female,
}

/// Jurisprudential rule set applied by the engine.
///
/// Plays the role a Madhab selection plays in Zakat calculation: the same
/// pipeline with a handful of rule substitutions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum JurisdictionMode {
    /// Classical doctrinal shares (Fiqh Mawaris).
    #[default]
    Classical,
    /// Statutory civil-code variant: adds heir substitution for grandchildren
    /// of a pre-deceased son, the mandatory bequest (Wasiat Wajibah) for
    /// adopted children, and the joint-marital-property split.
    Statutory,
}

/// Computation context passed by reference into the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FaraidConfig {
    pub deceased_gender: Gender,
    pub mode: JurisdictionMode,
}

impl FaraidConfig {
    pub fn new(deceased_gender: Gender, mode: JurisdictionMode) -> Self {
        Self {
            deceased_gender,
            mode,
        }
    }

    /// Classical-mode config for a deceased of the given gender.
    pub fn classical(deceased_gender: Gender) -> Self {
        Self::new(deceased_gender, JurisdictionMode::Classical)
    }

    /// Statutory-mode config for a deceased of the given gender.
    pub fn statutory(deceased_gender: Gender) -> Self {
        Self::new(deceased_gender, JurisdictionMode::Statutory)
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.deceased_gender = gender;
        self
    }

    pub fn with_mode(mut self, mode: JurisdictionMode) -> Self {
        self.mode = mode;
        self
    }
}

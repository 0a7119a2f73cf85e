//! # Net Estate Calculator (Tirkah)
//!
//! Reduces the gross assets of the deceased to the distributable estate:
//! joint-marital-property split (Statutory mode), funeral cost, debt, and the
//! bequest capped at one third. All monetary clamps floor at zero and are
//! recorded as notes rather than raised as errors.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::config::JurisdictionMode;
use crate::inputs::IntoFaraidDecimal;
use crate::types::FaraidError;

/// Monetary inputs describing the estate, in the smallest currency unit.
///
/// All fields are expected to be non-negative; negative values are clamped to
/// zero during computation with a note, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EstateInputs {
    pub gross_assets: Decimal,
    /// Funeral and burial cost (Tajhiz).
    pub funeral_cost: Decimal,
    /// Outstanding debt of the deceased.
    pub debt: Decimal,
    /// Bequest (Wasiat) requested by the deceased, capped at 1/3.
    pub bequest: Decimal,
    /// Portion of `gross_assets` that is joint marital property (Gono-Gini).
    /// Only honoured in Statutory mode.
    pub joint_property: Option<Decimal>,
}

impl EstateInputs {
    /// Creates estate inputs from the gross asset value.
    pub fn new(gross_assets: impl IntoFaraidDecimal) -> Result<Self, FaraidError> {
        Ok(Self {
            gross_assets: gross_assets.into_faraid_decimal()?,
            ..Self::default()
        })
    }

    /// Sets the funeral cost. Unparseable values leave the field unchanged.
    pub fn funeral_cost(mut self, val: impl IntoFaraidDecimal) -> Self {
        if let Ok(v) = val.into_faraid_decimal() {
            self.funeral_cost = v;
        }
        self
    }

    /// Sets the outstanding debt.
    pub fn debt(mut self, val: impl IntoFaraidDecimal) -> Self {
        if let Ok(v) = val.into_faraid_decimal() {
            self.debt = v;
        }
        self
    }

    /// Sets the requested bequest.
    pub fn bequest(mut self, val: impl IntoFaraidDecimal) -> Self {
        if let Ok(v) = val.into_faraid_decimal() {
            self.bequest = v;
        }
        self
    }

    /// Marks part of the gross assets as joint marital property.
    pub fn joint_property(mut self, val: impl IntoFaraidDecimal) -> Self {
        if let Ok(v) = val.into_faraid_decimal() {
            self.joint_property = Some(v);
        }
        self
    }

    /// Runs the deduction pipeline and returns the distributable estate.
    ///
    /// Order is fixed by doctrine: joint-property split (Statutory only),
    /// then funeral cost and debt, then the bequest capped at one third of
    /// what remains.
    pub fn net_estate(&self, mode: JurisdictionMode) -> NetEstate {
        let mut notes = Vec::new();

        let gross = clamp_non_negative(self.gross_assets, "Gross assets", &mut notes);
        let funeral = clamp_non_negative(self.funeral_cost, "Funeral cost", &mut notes);
        let debt = clamp_non_negative(self.debt, "Debt", &mut notes);
        let bequest = clamp_non_negative(self.bequest, "Bequest", &mut notes);

        // Statutory joint-property split: the surviving spouse's half leaves
        // the pool before any other deduction and is not part of the estate.
        let mut spouse_joint_share = Decimal::ZERO;
        let mut pool = gross;
        if mode == JurisdictionMode::Statutory {
            if let Some(joint) = self.joint_property {
                let mut joint = clamp_non_negative(joint, "Joint property", &mut notes);
                if joint > gross {
                    notes.push(format!(
                        "Joint property ({}) exceeds gross assets; capped at {}.",
                        joint, gross
                    ));
                    joint = gross;
                }
                if joint > Decimal::ZERO {
                    spouse_joint_share = joint * dec!(0.5);
                    pool -= spouse_joint_share;
                    notes.push(format!(
                        "Half of the joint marital property ({}) set aside for the surviving spouse before distribution.",
                        spouse_joint_share
                    ));
                }
            }
        }

        let mut after_deductions = pool - funeral - debt;
        if after_deductions < Decimal::ZERO {
            notes.push(
                "Funeral cost and debt exceed the assets; the estate is exhausted.".to_string(),
            );
            after_deductions = Decimal::ZERO;
        }

        let cap = after_deductions / dec!(3);
        let bequest_applied = if bequest > cap {
            tracing::warn!(requested = %bequest, cap = %cap, "bequest exceeds the one-third cap");
            notes.push(format!(
                "Requested bequest ({}) exceeds one third of the estate; capped at {}.",
                bequest, cap
            ));
            cap
        } else {
            bequest
        };

        let mut net = after_deductions - bequest_applied;
        if net < Decimal::ZERO {
            net = Decimal::ZERO;
        }

        NetEstate {
            net,
            spouse_joint_share,
            bequest_applied,
            notes,
        }
    }
}

fn clamp_non_negative(value: Decimal, field: &str, notes: &mut Vec<String>) -> Decimal {
    if value < Decimal::ZERO {
        notes.push(format!("{} was negative; treated as zero.", field));
        Decimal::ZERO
    } else {
        value
    }
}

impl std::str::FromStr for EstateInputs {
    type Err = FaraidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s)
            .map_err(|e| FaraidError::InvalidInput(format!("Failed to parse estate JSON: {}", e)))
    }
}

/// Result of the net estate calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetEstate {
    /// The distributable estate.
    pub net: Decimal,
    /// The spouse's half of the joint property, outside the estate.
    pub spouse_joint_share: Decimal,
    /// The bequest actually honoured after the one-third cap.
    pub bequest_applied: Decimal,
    /// Clamp and cap conditions encountered, for caller visibility.
    pub notes: Vec<String>,
}

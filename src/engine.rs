//! # Distribution Engine
//!
//! The single logical entry point: validate the heir list, reduce the gross
//! assets to the net estate, run the base-share rule table, and resolve the
//! distribution. Pure and synchronous; concurrent invocations with
//! independent inputs need no coordination.

use crate::config::FaraidConfig;
use crate::estate::EstateInputs;
use crate::heirs::{HeirSet, IndividualHeir};
use crate::resolver::resolve_distribution;
use crate::shares::assign_base_shares;
use crate::types::{
    BalanceState, DistributionResult, DistributionStatus, FaraidError, Reconciliation,
};
use rust_decimal::Decimal;

/// Computes the full Faraid distribution of an estate.
///
/// Contradictory relationship input (an impossible spouse, duplicate
/// singleton relatives) is rejected up front; monetary clamps never fail and
/// are reported through the narrative. An empty heir list is not an error:
/// the result carries the computed net estate with no per-heir entries.
///
/// # Example
///
/// ```
/// use faraid::prelude::*;
///
/// let estate = EstateInputs::new(120_000_000u64).unwrap();
/// let heirs = vec![
///     IndividualHeir::new("Aisyah", KinshipCategory::Wife),
///     IndividualHeir::new("Umar", KinshipCategory::Son),
/// ];
/// let config = FaraidConfig::classical(Gender::Male);
///
/// let result = compute_distribution(&estate, &heirs, &config).unwrap();
/// assert_eq!(result.amount_distributed(), result.total_estate);
/// ```
pub fn compute_distribution(
    estate: &EstateInputs,
    heirs: &[IndividualHeir],
    config: &FaraidConfig,
) -> Result<DistributionResult, FaraidError> {
    let set = HeirSet::new(heirs);
    set.validate(config)?;

    tracing::debug!(
        heirs = heirs.len(),
        mode = ?config.mode,
        "starting faraid computation"
    );

    let net = estate.net_estate(config.mode);
    let mut narrative = net.notes.clone();
    if net.spouse_joint_share > Decimal::ZERO {
        narrative.push(format!(
            "Joint-property share of {} belongs to the surviving spouse outside the estate.",
            net.spouse_joint_share
        ));
    }
    narrative.push(format!("Net estate for distribution: {}.", net.net));

    if set.is_empty() {
        narrative.push("No eligible heirs were recorded; nothing to distribute.".to_string());
        return Ok(DistributionResult {
            total_estate: net.net,
            status: DistributionStatus::Balanced,
            heirs: Vec::new(),
            narrative,
            reconciliation: Reconciliation {
                fixed_shares_total: Decimal::ZERO,
                residual: net.net,
                balance_state: if net.net > Decimal::ONE {
                    BalanceState::Surplus
                } else {
                    BalanceState::Exact
                },
            },
        });
    }

    let records = assign_base_shares(&set, config, &mut narrative);
    resolve_distribution(records, net.net, narrative)
}

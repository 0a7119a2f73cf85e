//! # Distribution Resolver ('Aul / Radd)
//!
//! Takes the per-heir base shares, splits collective claims, compares the
//! fixed total against the whole estate, and resolves the three aggregate
//! conditions: balanced, deficit ('Aul, proportional reduction) and surplus
//! (Radd, proportional return to blood heirs). Finishes with the rounding
//! closure that makes the amounts sum to the estate exactly.
//!
//! The path through the resolver is fully determined by the fixed total and
//! residue presence; no step is retried or revisited.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::heirs::KinshipCategory;
use crate::types::{
    BalanceState, DistributionResult, DistributionStatus, FaraidError, HeirShare, JuristicStatus,
    Reconciliation, ShareRecord,
};

/// Tolerance for comparing a sum of repeating-decimal fractions (1/3, 1/6)
/// against the whole estate.
const EPSILON: Decimal = dec!(0.000001);

/// Resolves the base shares into the final distribution of `net_estate`.
///
/// `narrative` carries the explanation lines accumulated so far (estate
/// calculation, rule firings); the resolver appends its own steps and moves
/// the whole log into the result.
pub fn resolve_distribution(
    mut records: Vec<ShareRecord>,
    net_estate: Decimal,
    mut narrative: Vec<String>,
) -> Result<DistributionResult, FaraidError> {
    split_collective_shares(&mut records, &mut narrative);

    let total: Decimal = records.iter().map(|r| r.fraction).sum();
    let total_weight: u32 = records.iter().map(|r| r.residue_weight).sum();
    narrative.push(format!(
        "Fixed shares total {} of the estate.",
        display_fraction(total)
    ));

    let mut finals: Vec<Decimal> = records.iter().map(|r| r.fraction).collect();
    let mut labels: Vec<String> = records.iter().map(|r| r.fraction_label.clone()).collect();
    let status;

    if total_weight > 0 {
        if total > Decimal::ONE + EPSILON {
            status = apply_aul(&records, total, &mut finals, &mut labels, &mut narrative);
        } else {
            // Residue-takers split the remainder per their weights.
            let remainder = (Decimal::ONE - total).max(Decimal::ZERO);
            let unit = remainder / Decimal::from(total_weight);
            for (i, record) in records.iter().enumerate() {
                if record.residue_weight > 0 {
                    finals[i] += unit * Decimal::from(record.residue_weight);
                    if record.fraction > Decimal::ZERO {
                        labels[i] = format!("{} + Residue", record.fraction_label);
                    }
                }
            }
            narrative.push(format!(
                "Remainder {} passes to the residue-takers, weighted 2:1 male to female where applicable.",
                display_fraction(remainder)
            ));
            status = DistributionStatus::Balanced;
        }
    } else if (total - Decimal::ONE).abs() <= EPSILON {
        narrative.push("Fixed shares consume the estate exactly.".to_string());
        status = DistributionStatus::Balanced;
    } else if total > Decimal::ONE {
        status = apply_aul(&records, total, &mut finals, &mut labels, &mut narrative);
    } else if total.is_zero() {
        // Every heir is blocked or unentitled; nothing to distribute.
        narrative.push("No eligible heir holds a share; the estate is left undistributed.".to_string());
        status = DistributionStatus::Balanced;
    } else if let Some(i) = absorbing_ascendant(&records) {
        // Ta'sib: the father (or the grandfather in his place) absorbs the
        // remainder on top of his fixed 1/6.
        let remainder = Decimal::ONE - total;
        finals[i] += remainder;
        labels[i] = format!("{} + Residue", records[i].fraction_label);
        narrative.push(format!(
            "No residue-taker remains; the {} absorbs the remainder {} in addition to his fixed share.",
            records[i].category.label(),
            display_fraction(remainder)
        ));
        status = DistributionStatus::Balanced;
    } else {
        status = apply_radd(&records, total, &mut finals, &mut labels, &mut narrative);
    }

    // Rounding closure: convert to currency and fold any integer-rounding
    // residual into the last entitled heir. The target is the entitled
    // portion of the estate, which is the whole of it except when a capped
    // bequest or an all-unentitled heir list leaves a remainder undistributed.
    let mut amounts: Vec<Decimal> = finals
        .iter()
        .map(|f| (f * net_estate).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .collect();

    let entitled_total: Decimal = finals.iter().sum();
    let target = (entitled_total * net_estate)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let distributed: Decimal = amounts.iter().sum();
    let residual = target - distributed;
    let anyone_entitled = entitled_total > Decimal::ZERO;
    if !residual.is_zero() && anyone_entitled {
        if residual.abs() > Decimal::from(records.len().max(1)) {
            return Err(FaraidError::InvariantViolation(format!(
                "distributed {} differs from the entitled total {} beyond rounding",
                distributed, target
            )));
        }
        let last = (0..records.len())
            .rev()
            .find(|&i| finals[i] > Decimal::ZERO)
            .unwrap();
        amounts[last] += residual;
        narrative.push(format!(
            "Rounding residual of {} assigned to {} to reconcile the total.",
            residual, records[last].name
        ));
    }

    let reconciliation = reconcile(total, net_estate, &mut narrative);

    let heirs = records
        .into_iter()
        .zip(finals)
        .zip(labels)
        .zip(amounts)
        .map(|(((record, fraction), fraction_label), amount)| HeirShare {
            heir_id: record.heir_id,
            name: record.name,
            category: record.category,
            fraction,
            fraction_label,
            amount,
            status: record.status,
            note: record.note,
        })
        .collect();

    Ok(DistributionResult {
        total_estate: net_estate,
        status,
        heirs,
        narrative,
        reconciliation,
    })
}

/// Step 1: divide collective fractions (two-plus daughters, sisters, wives,
/// maternal siblings) evenly across their group members.
fn split_collective_shares(records: &mut [ShareRecord], narrative: &mut Vec<String>) {
    let mut narrated: Vec<(String, u32)> = Vec::new();
    for record in records.iter_mut() {
        let Some(group) = record.group_size.take() else {
            continue;
        };
        if group > 1 {
            record.fraction /= Decimal::from(group);
            let key = (record.fraction_label.clone(), group);
            if !narrated.contains(&key) {
                narrative.push(format!(
                    "Collective share {} split per capita among {} heirs ({} each).",
                    record.fraction_label,
                    group,
                    display_fraction(record.fraction)
                ));
                narrated.push(key);
            }
        }
    }
}

/// 'Aul: the fixed shares overdraw the estate. Every fixed share is scaled by
/// the reciprocal of the raw total, and residue-takers receive nothing.
fn apply_aul(
    records: &[ShareRecord],
    total: Decimal,
    finals: &mut [Decimal],
    labels: &mut [String],
    narrative: &mut Vec<String>,
) -> DistributionStatus {
    tracing::debug!(total = %total, "deficit (Aul) detected");
    narrative.push(format!(
        "Fixed shares total {} and exceed the estate; 'Aul applies, every share is scaled down by the factor 1/{}.",
        display_fraction(total),
        display_fraction(total)
    ));
    for (i, record) in records.iter().enumerate() {
        if record.residue_weight > 0 {
            finals[i] = Decimal::ZERO;
            labels[i] = "0 (exhausted)".to_string();
        } else if record.fraction > Decimal::ZERO {
            finals[i] = record.fraction / total;
            labels[i] = percent_label(finals[i]);
        }
    }
    if records.iter().any(|r| r.residue_weight > 0) {
        narrative.push("The residue-takers receive nothing under 'Aul.".to_string());
    }
    DistributionStatus::Deficit
}

/// Radd: the fixed shares undershoot and no residue-taker exists. The surplus
/// returns to blood heirs in proportion to their shares; the spouse's share
/// and the mandatory bequest (capped at 1/3) are frozen and never enlarged.
fn apply_radd(
    records: &[ShareRecord],
    total: Decimal,
    finals: &mut [Decimal],
    labels: &mut [String],
    narrative: &mut Vec<String>,
) -> DistributionStatus {
    tracing::debug!(total = %total, "surplus (Radd) detected");
    let surplus = Decimal::ONE - total;
    narrative.push(format!(
        "Fixed shares leave {} unconsumed and no residue-taker exists; Radd applies.",
        display_fraction(surplus)
    ));

    let is_frozen =
        |r: &ShareRecord| r.is_spouse() || r.status == JuristicStatus::MandatoryBequest;
    let spouse_total: Decimal = records
        .iter()
        .filter(|r| r.is_spouse())
        .map(|r| r.fraction)
        .sum();
    let bequest_total: Decimal = records
        .iter()
        .filter(|r| r.status == JuristicStatus::MandatoryBequest)
        .map(|r| r.fraction)
        .sum();
    let frozen_total = spouse_total + bequest_total;
    let blood_total = total - frozen_total;

    if blood_total > Decimal::ZERO {
        if frozen_total > Decimal::ZERO {
            let who = match (spouse_total > Decimal::ZERO, bequest_total > Decimal::ZERO) {
                (true, true) => "The spouse's share and the mandatory bequest are",
                (true, false) => "The spouse's share is",
                _ => "The mandatory bequest is",
            };
            narrative.push(format!(
                "{} frozen; the surplus is returned to the remaining heirs in proportion to their shares.",
                who
            ));
        } else {
            narrative.push(
                "The surplus is returned to all heirs in proportion to their shares.".to_string(),
            );
        }
        let scale = (Decimal::ONE - frozen_total) / blood_total;
        for (i, record) in records.iter().enumerate() {
            if !is_frozen(record) && record.fraction > Decimal::ZERO {
                finals[i] = record.fraction * scale;
                labels[i] = percent_label(finals[i]);
            }
        }
    } else if spouse_total > Decimal::ZERO {
        // No blood heir shares the estate; as a last resort the surplus
        // returns to the spouse rather than lapsing. The bequest keeps its
        // cap.
        narrative.push(
            "No other eligible heir exists; the surplus is returned to the spouse.".to_string(),
        );
        for (i, record) in records.iter().enumerate() {
            if record.is_spouse() && record.fraction > Decimal::ZERO {
                finals[i] = record.fraction * (Decimal::ONE - bequest_total) / spouse_total;
                labels[i] = percent_label(finals[i]);
            }
        }
    } else {
        narrative.push(
            "The mandatory bequest is capped at one third; the remainder is left undistributed."
                .to_string(),
        );
    }
    DistributionStatus::Surplus
}

/// The ascendant holding a fixed share who absorbs the remainder in step 7:
/// the father, or the paternal grandfather standing in his place.
fn absorbing_ascendant(records: &[ShareRecord]) -> Option<usize> {
    records
        .iter()
        .position(|r| r.category == KinshipCategory::Father && r.fraction > Decimal::ZERO)
        .or_else(|| {
            records.iter().position(|r| {
                r.category == KinshipCategory::PaternalGrandfather && r.fraction > Decimal::ZERO
            })
        })
}

/// Balance sheet comparing the raw fixed shares against the estate.
fn reconcile(total: Decimal, net_estate: Decimal, narrative: &mut Vec<String>) -> Reconciliation {
    let fixed_shares_total =
        (total * net_estate).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let residual = net_estate - fixed_shares_total;
    let balance_state = if residual.abs() <= Decimal::ONE {
        BalanceState::Exact
    } else if residual > Decimal::ZERO {
        BalanceState::Surplus
    } else {
        BalanceState::Deficit
    };
    narrative.push(format!(
        "Balance sheet: fixed shares account for {} of {}; residual {}.",
        fixed_shares_total, net_estate, residual
    ));
    Reconciliation {
        fixed_shares_total,
        residual,
        balance_state,
    }
}

fn percent_label(fraction: Decimal) -> String {
    format!("{}%", (fraction * dec!(100)).round_dp(2).normalize())
}

fn display_fraction(fraction: Decimal) -> String {
    fraction.round_dp(4).normalize().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heirs::{IndividualHeir, KinshipCategory};
    use crate::types::JuristicStatus;

    fn fixed(category: KinshipCategory, num: u64, den: u64) -> ShareRecord {
        let heir = IndividualHeir::new(category.label(), category);
        ShareRecord::fixed(
            &heir,
            Decimal::from(num) / Decimal::from(den),
            format!("{}/{}", num, den),
            "test",
        )
    }

    #[test]
    fn exact_total_needs_no_adjustment() {
        // Husband 1/2 + full sister 1/2 = 1 exactly.
        let records = vec![
            fixed(KinshipCategory::Husband, 1, 2),
            fixed(KinshipCategory::FullSister, 1, 2),
        ];
        let result = resolve_distribution(records, dec!(1000), Vec::new()).unwrap();
        assert_eq!(result.status, DistributionStatus::Balanced);
        assert_eq!(result.heirs[0].amount, dec!(500));
        assert_eq!(result.heirs[1].amount, dec!(500));
    }

    #[test]
    fn rounding_residual_lands_on_last_entitled_heir() {
        // Three heirs at 1/3 of 100: 33 + 33 + 33 leaves 1.
        let records = vec![
            fixed(KinshipCategory::Daughter, 1, 3),
            fixed(KinshipCategory::Daughter, 1, 3),
            fixed(KinshipCategory::Daughter, 1, 3),
        ];
        let result = resolve_distribution(records, dec!(100), Vec::new()).unwrap();
        assert_eq!(result.amount_distributed(), dec!(100));
        assert_eq!(result.heirs[2].amount, dec!(34));
    }

    #[test]
    fn residue_split_respects_weights() {
        let son = IndividualHeir::new("Son", KinshipCategory::Son);
        let daughter = IndividualHeir::new("Daughter", KinshipCategory::Daughter);
        let records = vec![
            ShareRecord::residuary(&son, 2, JuristicStatus::PrimaryResidue, "test"),
            ShareRecord::residuary(
                &daughter,
                1,
                JuristicStatus::ResidueWithMaleCounterpart,
                "test",
            ),
        ];
        let result = resolve_distribution(records, dec!(9000), Vec::new()).unwrap();
        assert_eq!(result.heirs[0].amount, dec!(6000));
        assert_eq!(result.heirs[1].amount, dec!(3000));
    }
}

//! # Base Share & Blocking Engine
//!
//! Assigns each heir a fixed doctrinal fraction, a residue entitlement, or a
//! blocked status (Hujub), in strict precedence order: mandatory bequest
//! (Statutory), spouse, ascendants, descendants, siblings under Kalalah,
//! collaterals, distant kin. A nearer relative in a line extinguishes
//! entitlement for more distant relatives in the same or a subordinate line.
//!
//! The rule table is an ordered sequence of predicate checks over the heir
//! collection, not a dispatch hierarchy; each assignment records a short
//! justification naming the deciding condition.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::config::{FaraidConfig, Gender, JurisdictionMode};
use crate::heirs::{HeirSet, KinshipCategory};
use crate::types::{JuristicStatus, ShareRecord};

fn frac(num: u64, den: u64) -> Decimal {
    Decimal::from(num) / Decimal::from(den)
}

/// Relative presence flags evaluated once per computation.
struct Presence {
    sons: usize,
    daughters: usize,
    sons_sons: usize,
    sons_daughters: usize,
    has_male_descendant: bool,
    has_descendant: bool,
    has_father: bool,
    has_grandfather: bool,
    has_mother: bool,
    full_brothers: usize,
    full_sisters: usize,
    paternal_brothers: usize,
    paternal_sisters: usize,
    maternal_siblings: usize,
    sibling_count: usize,
}

impl Presence {
    fn of(set: &HeirSet<'_>) -> Self {
        let sons = set.count(KinshipCategory::Son);
        let daughters = set.count(KinshipCategory::Daughter);
        let sons_sons = set.count(KinshipCategory::SonsSon);
        let sons_daughters = set.count(KinshipCategory::SonsDaughter);
        let has_male_descendant = sons > 0 || sons_sons > 0;
        let has_female_descendant = daughters > 0 || sons_daughters > 0;
        Self {
            sons,
            daughters,
            sons_sons,
            sons_daughters,
            has_male_descendant,
            has_descendant: has_male_descendant || has_female_descendant,
            has_father: set.exists(KinshipCategory::Father),
            has_grandfather: set.exists(KinshipCategory::PaternalGrandfather),
            has_mother: set.exists(KinshipCategory::Mother),
            full_brothers: set.count(KinshipCategory::FullBrother),
            full_sisters: set.count(KinshipCategory::FullSister),
            paternal_brothers: set.count(KinshipCategory::PaternalBrother),
            paternal_sisters: set.count(KinshipCategory::PaternalSister),
            maternal_siblings: set.count(KinshipCategory::MaternalBrother)
                + set.count(KinshipCategory::MaternalSister),
            sibling_count: set.sibling_count(),
        }
    }

    /// Kalalah gate for full and paternal siblings: no male descendant and no
    /// male ascendant.
    fn agnate_siblings_eligible(&self) -> bool {
        !self.has_male_descendant && !self.has_father && !self.has_grandfather
    }

    /// Maternal siblings are blocked by any descendant, the father, or the
    /// grandfather.
    fn maternal_siblings_eligible(&self) -> bool {
        !self.has_descendant && !self.has_father && !self.has_grandfather
    }
}

/// Runs the precedence-ordered rule table and returns one record per heir.
///
/// Residue entitlements are expressed as weights; the resolver turns them
/// into fractions once the fixed total is known.
pub fn assign_base_shares(
    set: &HeirSet<'_>,
    config: &FaraidConfig,
    narrative: &mut Vec<String>,
) -> Vec<ShareRecord> {
    let p = Presence::of(set);
    let mut records: Vec<ShareRecord> = Vec::with_capacity(set.len());

    assign_mandatory_bequest(set, config, narrative, &mut records);
    assign_spouse(set, config, &p, &mut records);
    assign_father_line(set, &p, &mut records);
    assign_mother_line(set, &p, &mut records);
    assign_descendants(set, config, &p, &mut records);
    assign_siblings(set, &p, &mut records);
    assign_collaterals(set, &p, &mut records);

    // Grandchildren through a daughter: lineage runs through a female, so no
    // statutory share in either mode.
    for cat in [
        KinshipCategory::DaughtersSon,
        KinshipCategory::DaughtersDaughter,
    ] {
        for heir in set.of(cat) {
            records.push(ShareRecord::distant_kin(
                heir,
                "Distant kin (Dzawil Arham): related through a daughter, no fixed share",
            ));
        }
    }

    // Catch-all: any heir the rules above did not reach holds no statutory
    // entitlement.
    for heir in set.iter() {
        if !records.iter().any(|r| r.heir_id == heir.id) {
            records.push(ShareRecord::distant_kin(
                heir,
                "No statutory share; superseded by nearer heirs",
            ));
        }
    }

    records
}

/// Statutory-only: the adopted child's Wasiat Wajibah, deducted before the
/// doctrinal rules run. Classical mode reports the adopted child as distant
/// kin instead.
fn assign_mandatory_bequest(
    set: &HeirSet<'_>,
    config: &FaraidConfig,
    narrative: &mut Vec<String>,
    records: &mut Vec<ShareRecord>,
) {
    let adopted = set.count(KinshipCategory::AdoptedChild);
    if adopted == 0 {
        return;
    }
    match config.mode {
        JurisdictionMode::Statutory => {
            narrative.push(format!(
                "Mandatory bequest (Wasiat Wajibah) of 1/3 reserved for {} adopted child(ren) before the fixed shares.",
                adopted
            ));
            for heir in set.of(KinshipCategory::AdoptedChild) {
                records.push(ShareRecord::bequest(
                    heir,
                    frac(1, 3),
                    adopted as u32,
                    "Mandatory bequest for an adopted child, capped at 1/3 of the estate",
                ));
            }
        }
        JurisdictionMode::Classical => {
            for heir in set.of(KinshipCategory::AdoptedChild) {
                records.push(ShareRecord::distant_kin(
                    heir,
                    "No statutory share under classical doctrine; a voluntary bequest may apply",
                ));
            }
        }
    }
}

fn assign_spouse(
    set: &HeirSet<'_>,
    config: &FaraidConfig,
    p: &Presence,
    records: &mut Vec<ShareRecord>,
) {
    match config.deceased_gender {
        Gender::Female => {
            if let Some(husband) = set.of(KinshipCategory::Husband).next() {
                let (fraction, label, why) = if p.has_descendant {
                    (frac(1, 4), "1/4", "1/4: a descendant is present")
                } else {
                    (frac(1, 2), "1/2", "1/2: no descendant")
                };
                records.push(ShareRecord::fixed(husband, fraction, label, why));
            }
        }
        Gender::Male => {
            let wives = set.count(KinshipCategory::Wife);
            if wives > 0 {
                let (fraction, label, why) = if p.has_descendant {
                    (frac(1, 8), "1/8", "1/8: a descendant is present")
                } else {
                    (frac(1, 4), "1/4", "1/4: no descendant")
                };
                for wife in set.of(KinshipCategory::Wife) {
                    if wives == 1 {
                        records.push(ShareRecord::fixed(wife, fraction, label, why));
                    } else {
                        records.push(ShareRecord::collective(
                            wife,
                            fraction,
                            wives as u32,
                            format!("{} (shared)", label),
                            format!("{}, split equally among {} wives", why, wives),
                        ));
                    }
                }
            }
        }
    }
}

/// Father, or the paternal grandfather standing in his place.
fn assign_father_line(set: &HeirSet<'_>, p: &Presence, records: &mut Vec<ShareRecord>) {
    let father = set.of(KinshipCategory::Father).next();
    let grandfather = set.of(KinshipCategory::PaternalGrandfather).next();

    let (ascendant, role) = match (father, grandfather) {
        (Some(f), g) => {
            if let Some(gf) = g {
                records.push(ShareRecord::blocked(gf, "Father"));
            }
            (Some(f), "Father")
        }
        (None, Some(gf)) => (Some(gf), "Grandfather in the father's place"),
        (None, None) => (None, ""),
    };

    let Some(heir) = ascendant else { return };

    if p.has_male_descendant {
        records.push(ShareRecord::fixed(
            heir,
            frac(1, 6),
            "1/6",
            format!("{}: 1/6, a male descendant is present", role),
        ));
    } else if p.has_descendant {
        // Fixed 1/6 now; the resolver hands him any unconsumed remainder
        // (Ta'sib) when no residue-taker exists.
        records.push(ShareRecord::fixed(
            heir,
            frac(1, 6),
            "1/6",
            format!("{}: 1/6 plus any remainder, only female descendants present", role),
        ));
    } else {
        records.push(ShareRecord::residuary(
            heir,
            1,
            JuristicStatus::PrimaryResidue,
            format!("{}: residue-taker, no descendant present", role),
        ));
    }
}

/// Mother, or the grandmothers when she is absent.
fn assign_mother_line(set: &HeirSet<'_>, p: &Presence, records: &mut Vec<ShareRecord>) {
    let maternal_gm = set.of(KinshipCategory::MaternalGrandmother).next();
    let paternal_gm = set.of(KinshipCategory::PaternalGrandmother).next();

    if let Some(mother) = set.of(KinshipCategory::Mother).next() {
        if p.has_descendant || p.sibling_count >= 2 {
            records.push(ShareRecord::fixed(
                mother,
                frac(1, 6),
                "1/6",
                "1/6: a descendant or two-plus siblings are present",
            ));
        } else {
            match spouse_no_descendant_fraction(set) {
                Some(spouse) if p.has_father => {
                    // Umariyyatayn: one third of what remains after the
                    // spouse, not one third of the whole estate.
                    let fraction = (Decimal::ONE - spouse) / dec!(3);
                    records.push(ShareRecord::fixed(
                        mother,
                        fraction,
                        "1/3 of residue",
                        "Umariyyatayn: one third of the residue after the spouse's share",
                    ));
                }
                _ => {
                    records.push(ShareRecord::fixed(
                        mother,
                        frac(1, 3),
                        "1/3",
                        "1/3: no descendant and fewer than two siblings",
                    ));
                }
            }
        }
        for gm in [maternal_gm, paternal_gm].into_iter().flatten() {
            records.push(ShareRecord::blocked(gm, "Mother"));
        }
        return;
    }

    // Father extinguishes his own mother's claim.
    let paternal_gm = match (paternal_gm, p.has_father) {
        (Some(gm), true) => {
            records.push(ShareRecord::blocked(gm, "Father"));
            None
        }
        (gm, _) => gm,
    };

    match (maternal_gm, paternal_gm) {
        (Some(a), Some(b)) => {
            for gm in [a, b] {
                records.push(ShareRecord::fixed(
                    gm,
                    frac(1, 12),
                    "1/6 (shared)",
                    "Two co-present grandmothers split the 1/6 equally",
                ));
            }
        }
        (Some(gm), None) | (None, Some(gm)) => {
            records.push(ShareRecord::fixed(
                gm,
                frac(1, 6),
                "1/6",
                "1/6: sole surviving grandmother, mother absent",
            ));
        }
        (None, None) => {}
    }
}

/// The fixed fraction the spouse would take with no descendants present, used
/// by the Umariyyatayn rule. `None` when no spouse survives.
fn spouse_no_descendant_fraction(set: &HeirSet<'_>) -> Option<Decimal> {
    if set.exists(KinshipCategory::Husband) {
        Some(frac(1, 2))
    } else if set.exists(KinshipCategory::Wife) {
        Some(frac(1, 4))
    } else {
        None
    }
}

fn assign_descendants(
    set: &HeirSet<'_>,
    config: &FaraidConfig,
    p: &Presence,
    records: &mut Vec<ShareRecord>,
) {
    if p.sons > 0 {
        let substitute = config.mode == JurisdictionMode::Statutory
            && (p.sons_sons > 0 || p.sons_daughters > 0);

        for son in set.of(KinshipCategory::Son) {
            records.push(ShareRecord::residuary(
                son,
                2,
                JuristicStatus::PrimaryResidue,
                "Nearest male heir; takes the residue (2 parts)",
            ));
        }
        for daughter in set.of(KinshipCategory::Daughter) {
            records.push(ShareRecord::residuary(
                daughter,
                1,
                JuristicStatus::ResidueWithMaleCounterpart,
                "Residue-taker alongside a son (2:1)",
            ));
        }

        if substitute {
            // Statutory heir substitution: grandchildren through a son stand
            // in their deceased parent's place with his weighted entitlement.
            for heir in set.of(KinshipCategory::SonsSon) {
                records.push(ShareRecord::residuary(
                    heir,
                    2,
                    JuristicStatus::PrimaryResidue,
                    "Substitute heir in the deceased son's place (2 parts)",
                ));
            }
            for heir in set.of(KinshipCategory::SonsDaughter) {
                records.push(ShareRecord::residuary(
                    heir,
                    1,
                    JuristicStatus::ResidueWithMaleCounterpart,
                    "Substitute heir in the deceased son's place (1 part)",
                ));
            }
        } else {
            for cat in [KinshipCategory::SonsSon, KinshipCategory::SonsDaughter] {
                for heir in set.of(cat) {
                    records.push(ShareRecord::blocked(heir, "Son"));
                }
            }
        }
        return;
    }

    // No son: daughters hold fixed shares.
    if p.daughters == 1 {
        let daughter = set.of(KinshipCategory::Daughter).next().unwrap();
        records.push(ShareRecord::fixed(
            daughter,
            frac(1, 2),
            "1/2",
            "1/2: only daughter, no son",
        ));
    } else if p.daughters >= 2 {
        for daughter in set.of(KinshipCategory::Daughter) {
            records.push(ShareRecord::collective(
                daughter,
                frac(2, 3),
                p.daughters as u32,
                "2/3 (shared)",
                format!("2/3 shared equally among {} daughters, no son", p.daughters),
            ));
        }
    }

    if p.sons_sons > 0 {
        // The son's son steps into the son's position.
        for heir in set.of(KinshipCategory::SonsSon) {
            records.push(ShareRecord::residuary(
                heir,
                2,
                JuristicStatus::PrimaryResidue,
                "Residue-taker in the son's position (2 parts)",
            ));
        }
        for heir in set.of(KinshipCategory::SonsDaughter) {
            records.push(ShareRecord::residuary(
                heir,
                1,
                JuristicStatus::ResidueWithMaleCounterpart,
                "Residue-taker alongside a son's son (2:1)",
            ));
        }
    } else if p.sons_daughters > 0 {
        if p.daughters >= 2 {
            for heir in set.of(KinshipCategory::SonsDaughter) {
                records.push(ShareRecord::blocked(heir, "two daughters (the 2/3 is exhausted)"));
            }
        } else if p.daughters == 1 {
            for heir in set.of(KinshipCategory::SonsDaughter) {
                records.push(ShareRecord::collective(
                    heir,
                    frac(1, 6),
                    p.sons_daughters as u32,
                    "1/6 (completion)",
                    "1/6 completing the 2/3 alongside one daughter",
                ));
            }
        } else if p.sons_daughters == 1 {
            let heir = set.of(KinshipCategory::SonsDaughter).next().unwrap();
            records.push(ShareRecord::fixed(
                heir,
                frac(1, 2),
                "1/2",
                "1/2: only granddaughter through a son, no nearer descendant",
            ));
        } else {
            for heir in set.of(KinshipCategory::SonsDaughter) {
                records.push(ShareRecord::collective(
                    heir,
                    frac(2, 3),
                    p.sons_daughters as u32,
                    "2/3 (shared)",
                    "2/3 shared equally, no nearer descendant",
                ));
            }
        }
    }
}

fn assign_siblings(set: &HeirSet<'_>, p: &Presence, records: &mut Vec<ShareRecord>) {
    let agnate_blocker = if p.sons > 0 {
        "Son"
    } else if p.has_father {
        "Father"
    } else if p.sons_sons > 0 {
        "Son's Son"
    } else {
        "Paternal Grandfather"
    };

    // Maternal siblings first: an independent rule, untouched by full
    // brothers, but blocked by any descendant or male ascendant.
    if p.maternal_siblings > 0 {
        if p.maternal_siblings_eligible() {
            let group = p.maternal_siblings as u32;
            for cat in [
                KinshipCategory::MaternalBrother,
                KinshipCategory::MaternalSister,
            ] {
                for heir in set.of(cat) {
                    if group == 1 {
                        records.push(ShareRecord::fixed(
                            heir,
                            frac(1, 6),
                            "1/6",
                            "1/6: solitary maternal sibling under Kalalah",
                        ));
                    } else {
                        records.push(ShareRecord::collective(
                            heir,
                            frac(1, 3),
                            group,
                            "1/3 (shared)",
                            "1/3 split equally among maternal siblings under Kalalah",
                        ));
                    }
                }
            }
        } else {
            let blocker = if p.has_descendant {
                "a descendant"
            } else {
                agnate_blocker
            };
            for cat in [
                KinshipCategory::MaternalBrother,
                KinshipCategory::MaternalSister,
            ] {
                for heir in set.of(cat) {
                    records.push(ShareRecord::blocked(heir, blocker));
                }
            }
        }
    }

    let agnates_present = p.full_brothers + p.full_sisters + p.paternal_brothers + p.paternal_sisters;
    if agnates_present == 0 {
        return;
    }

    if !p.agnate_siblings_eligible() {
        for cat in [
            KinshipCategory::FullBrother,
            KinshipCategory::FullSister,
            KinshipCategory::PaternalBrother,
            KinshipCategory::PaternalSister,
        ] {
            for heir in set.of(cat) {
                records.push(ShareRecord::blocked(heir, agnate_blocker));
            }
        }
        return;
    }

    // Full siblings.
    if p.full_brothers > 0 {
        for heir in set.of(KinshipCategory::FullBrother) {
            records.push(ShareRecord::residuary(
                heir,
                2,
                JuristicStatus::PrimaryResidue,
                "Residue-taker under Kalalah (2 parts)",
            ));
        }
        for heir in set.of(KinshipCategory::FullSister) {
            records.push(ShareRecord::residuary(
                heir,
                1,
                JuristicStatus::ResidueWithMaleCounterpart,
                "Residue-taker alongside a full brother (2:1)",
            ));
        }
    } else if p.full_sisters > 0 {
        if p.has_descendant {
            // A daughter converts the sister into a residue-taker.
            for heir in set.of(KinshipCategory::FullSister) {
                records.push(ShareRecord::residuary(
                    heir,
                    1,
                    JuristicStatus::ResidueAlongsideDaughter,
                    "Residue-taker alongside a daughter (Asabah ma'al Ghair)",
                ));
            }
        } else if p.full_sisters == 1 {
            let heir = set.of(KinshipCategory::FullSister).next().unwrap();
            records.push(ShareRecord::fixed(
                heir,
                frac(1, 2),
                "1/2",
                "1/2: sole full sister under Kalalah",
            ));
        } else {
            for heir in set.of(KinshipCategory::FullSister) {
                records.push(ShareRecord::collective(
                    heir,
                    frac(2, 3),
                    p.full_sisters as u32,
                    "2/3 (shared)",
                    format!("2/3 shared equally among {} full sisters under Kalalah", p.full_sisters),
                ));
            }
        }
    }

    // Paternal siblings substitute full siblings of the same role.
    if p.paternal_brothers > 0 {
        if p.full_brothers > 0 {
            for heir in set.of(KinshipCategory::PaternalBrother) {
                records.push(ShareRecord::blocked(heir, "Full Brother"));
            }
        } else {
            for heir in set.of(KinshipCategory::PaternalBrother) {
                records.push(ShareRecord::residuary(
                    heir,
                    2,
                    JuristicStatus::PrimaryResidue,
                    "Residue-taker in the full brother's position (2 parts)",
                ));
            }
        }
    }
    if p.paternal_sisters > 0 {
        if p.full_brothers > 0 {
            for heir in set.of(KinshipCategory::PaternalSister) {
                records.push(ShareRecord::blocked(heir, "Full Brother"));
            }
        } else if p.full_sisters > 0 {
            for heir in set.of(KinshipCategory::PaternalSister) {
                records.push(ShareRecord::blocked(heir, "Full Sister"));
            }
        } else if p.paternal_brothers > 0 {
            for heir in set.of(KinshipCategory::PaternalSister) {
                records.push(ShareRecord::residuary(
                    heir,
                    1,
                    JuristicStatus::ResidueWithMaleCounterpart,
                    "Residue-taker alongside a paternal brother (2:1)",
                ));
            }
        } else if p.has_descendant {
            for heir in set.of(KinshipCategory::PaternalSister) {
                records.push(ShareRecord::residuary(
                    heir,
                    1,
                    JuristicStatus::ResidueAlongsideDaughter,
                    "Residue-taker alongside a daughter (Asabah ma'al Ghair)",
                ));
            }
        } else if p.paternal_sisters == 1 {
            let heir = set.of(KinshipCategory::PaternalSister).next().unwrap();
            records.push(ShareRecord::fixed(
                heir,
                frac(1, 2),
                "1/2",
                "1/2: sole paternal sister, no full sibling",
            ));
        } else {
            for heir in set.of(KinshipCategory::PaternalSister) {
                records.push(ShareRecord::collective(
                    heir,
                    frac(2, 3),
                    p.paternal_sisters as u32,
                    "2/3 (shared)",
                    "2/3 shared equally among paternal sisters, no full sibling",
                ));
            }
        }
    }
}

/// Nephews, paternal uncles and their sons, in a fixed nearness chain. The
/// nearest surviving class takes the residue per capita; later classes are
/// blocked by it, and all are blocked by any nearer male heir.
fn assign_collaterals(set: &HeirSet<'_>, p: &Presence, records: &mut Vec<ShareRecord>) {
    const CHAIN: [KinshipCategory; 6] = [
        KinshipCategory::FullNephew,
        KinshipCategory::PaternalNephew,
        KinshipCategory::FullUncle,
        KinshipCategory::PaternalUncle,
        KinshipCategory::FullCousin,
        KinshipCategory::PaternalCousin,
    ];

    if !CHAIN.iter().any(|&cat| set.exists(cat)) {
        return;
    }

    let nearer_male = p.has_male_descendant
        || p.has_father
        || p.has_grandfather
        || p.full_brothers > 0
        || p.paternal_brothers > 0;
    let nearer_residuary = records.iter().any(|r| r.residue_weight > 0);

    if nearer_male || nearer_residuary {
        let blocker = if nearer_male {
            "a nearer male heir"
        } else {
            "a nearer residue-taker"
        };
        for cat in CHAIN {
            for heir in set.of(cat) {
                records.push(ShareRecord::blocked(heir, blocker));
            }
        }
        return;
    }

    let mut taken: Option<KinshipCategory> = None;
    for cat in CHAIN {
        if !set.exists(cat) {
            continue;
        }
        match taken {
            None => {
                for heir in set.of(cat) {
                    records.push(ShareRecord::residuary(
                        heir,
                        1,
                        JuristicStatus::PrimaryResidue,
                        "Nearest surviving collateral; takes the residue",
                    ));
                }
                taken = Some(cat);
            }
            Some(nearer) => {
                for heir in set.of(cat) {
                    records.push(ShareRecord::blocked(heir, nearer.label()));
                }
            }
        }
    }
}

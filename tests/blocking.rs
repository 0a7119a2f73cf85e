use faraid::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn share_of<'a>(result: &'a DistributionResult, category: KinshipCategory) -> &'a HeirShare {
    result
        .heirs
        .iter()
        .find(|h| h.category == category)
        .expect("heir category missing from result")
}

fn assert_blocked(result: &DistributionResult, category: KinshipCategory, blocker: &str) {
    let share = share_of(result, category);
    assert_eq!(share.status, JuristicStatus::Blocked);
    assert_eq!(share.fraction, Decimal::ZERO);
    assert_eq!(share.amount, Decimal::ZERO);
    let note = share.note.as_deref().unwrap_or_default();
    assert!(
        note.contains(blocker),
        "expected blocker {:?} in note {:?}",
        blocker,
        note
    );
}

fn run(gender: Gender, net: u64, heirs: &[IndividualHeir]) -> DistributionResult {
    let estate = EstateInputs::new(net).unwrap();
    compute_distribution(&estate, heirs, &FaraidConfig::classical(gender)).unwrap()
}

#[test]
fn full_brother_blocked_by_son() {
    let heirs = vec![
        IndividualHeir::new("Umar", KinshipCategory::Son),
        IndividualHeir::new("Ali", KinshipCategory::FullBrother),
    ];
    let result = run(Gender::Male, 60_000, &heirs);

    assert_blocked(&result, KinshipCategory::FullBrother, "Son");
    assert_eq!(share_of(&result, KinshipCategory::Son).amount, dec!(60_000));
}

#[test]
fn grandfather_blocked_by_father() {
    let heirs = vec![
        IndividualHeir::new("Yusuf", KinshipCategory::Father),
        IndividualHeir::new("Ibrahim", KinshipCategory::PaternalGrandfather),
    ];
    let result = run(Gender::Male, 60_000, &heirs);

    assert_blocked(&result, KinshipCategory::PaternalGrandfather, "Father");
    assert_eq!(share_of(&result, KinshipCategory::Father).amount, dec!(60_000));
}

#[test]
fn grandmothers_blocked_by_mother() {
    let heirs = vec![
        IndividualHeir::new("Halimah", KinshipCategory::Mother),
        IndividualHeir::new("Aminah", KinshipCategory::MaternalGrandmother),
        IndividualHeir::new("Safiyyah", KinshipCategory::PaternalGrandmother),
    ];
    let result = run(Gender::Male, 60_000, &heirs);

    assert_blocked(&result, KinshipCategory::MaternalGrandmother, "Mother");
    assert_blocked(&result, KinshipCategory::PaternalGrandmother, "Mother");
    assert_eq!(share_of(&result, KinshipCategory::Mother).amount, dec!(60_000));
}

#[test]
fn paternal_grandmother_blocked_by_father_alone() {
    let heirs = vec![
        IndividualHeir::new("Yusuf", KinshipCategory::Father),
        IndividualHeir::new("Aminah", KinshipCategory::MaternalGrandmother),
        IndividualHeir::new("Safiyyah", KinshipCategory::PaternalGrandmother),
    ];
    let result = run(Gender::Male, 60_000, &heirs);

    assert_blocked(&result, KinshipCategory::PaternalGrandmother, "Father");
    // The maternal grandmother is untouched by the father: sole 1/6.
    assert_eq!(
        share_of(&result, KinshipCategory::MaternalGrandmother).amount,
        dec!(10_000)
    );
}

#[test]
fn two_grandmothers_split_the_sixth() {
    let heirs = vec![
        IndividualHeir::new("Aminah", KinshipCategory::MaternalGrandmother),
        IndividualHeir::new("Safiyyah", KinshipCategory::PaternalGrandmother),
        IndividualHeir::new("Umar", KinshipCategory::Son),
    ];
    let result = run(Gender::Male, 120_000, &heirs);

    assert_eq!(
        share_of(&result, KinshipCategory::MaternalGrandmother).amount,
        dec!(10_000)
    );
    assert_eq!(
        share_of(&result, KinshipCategory::PaternalGrandmother).amount,
        dec!(10_000)
    );
    assert_eq!(share_of(&result, KinshipCategory::Son).amount, dec!(100_000));
}

#[test]
fn paternal_siblings_blocked_by_full_brother() {
    let heirs = vec![
        IndividualHeir::new("Ali", KinshipCategory::FullBrother),
        IndividualHeir::new("Zaid", KinshipCategory::PaternalBrother),
        IndividualHeir::new("Hafsah", KinshipCategory::PaternalSister),
    ];
    let result = run(Gender::Male, 60_000, &heirs);

    assert_blocked(&result, KinshipCategory::PaternalBrother, "Full Brother");
    assert_blocked(&result, KinshipCategory::PaternalSister, "Full Brother");
    assert_eq!(
        share_of(&result, KinshipCategory::FullBrother).amount,
        dec!(60_000)
    );
}

#[test]
fn maternal_sibling_blocked_by_any_descendant() {
    // Even a lone daughter extinguishes the maternal sibling's claim, unlike
    // full siblings, which survive a female descendant.
    let heirs = vec![
        IndividualHeir::new("Fatimah", KinshipCategory::Daughter),
        IndividualHeir::new("Zaid", KinshipCategory::MaternalBrother),
    ];
    let result = run(Gender::Male, 60_000, &heirs);

    assert_blocked(&result, KinshipCategory::MaternalBrother, "a descendant");
    // Radd: the daughter takes her 1/2 plus the whole surplus.
    assert_eq!(result.status, DistributionStatus::Surplus);
    assert_eq!(share_of(&result, KinshipCategory::Daughter).amount, dec!(60_000));
}

#[test]
fn uncle_blocked_by_nephew_in_the_chain() {
    let heirs = vec![
        IndividualHeir::new("Bilal", KinshipCategory::FullNephew),
        IndividualHeir::new("Hamzah", KinshipCategory::FullUncle),
    ];
    let result = run(Gender::Male, 60_000, &heirs);

    assert_blocked(
        &result,
        KinshipCategory::FullUncle,
        "Nephew (Son of Full Brother)",
    );
    assert_eq!(
        share_of(&result, KinshipCategory::FullNephew).amount,
        dec!(60_000)
    );
}

#[test]
fn collaterals_blocked_by_a_nearer_male_heir() {
    let heirs = vec![
        IndividualHeir::new("Ali", KinshipCategory::FullBrother),
        IndividualHeir::new("Hamzah", KinshipCategory::FullUncle),
        IndividualHeir::new("Bilal", KinshipCategory::PaternalCousin),
    ];
    let result = run(Gender::Male, 60_000, &heirs);

    assert_blocked(&result, KinshipCategory::FullUncle, "a nearer male heir");
    assert_blocked(&result, KinshipCategory::PaternalCousin, "a nearer male heir");
}

#[test]
fn daughters_children_are_distant_kin() {
    let heirs = vec![
        IndividualHeir::new("Umar", KinshipCategory::Son),
        IndividualHeir::new("Rafi", KinshipCategory::DaughtersSon),
        IndividualHeir::new("Lina", KinshipCategory::DaughtersDaughter),
    ];
    let result = run(Gender::Male, 60_000, &heirs);

    for cat in [KinshipCategory::DaughtersSon, KinshipCategory::DaughtersDaughter] {
        let share = share_of(&result, cat);
        assert_eq!(share.status, JuristicStatus::DistantKin);
        assert_eq!(share.amount, Decimal::ZERO);
    }
    assert_eq!(share_of(&result, KinshipCategory::Son).amount, dec!(60_000));
}

#[test]
fn grandchildren_through_son_blocked_by_a_living_son() {
    let heirs = vec![
        IndividualHeir::new("Umar", KinshipCategory::Son),
        IndividualHeir::new("Harun", KinshipCategory::SonsSon),
        IndividualHeir::new("Laila", KinshipCategory::SonsDaughter),
    ];
    let result = run(Gender::Male, 60_000, &heirs);

    assert_blocked(&result, KinshipCategory::SonsSon, "Son");
    assert_blocked(&result, KinshipCategory::SonsDaughter, "Son");
}

#[test]
fn sons_daughter_completes_the_two_thirds() {
    // One daughter 1/2, the son's daughter 1/6; the pair caps at 2/3.
    let heirs = vec![
        IndividualHeir::new("Fatimah", KinshipCategory::Daughter),
        IndividualHeir::new("Laila", KinshipCategory::SonsDaughter),
    ];
    let result = run(Gender::Male, 60_000, &heirs);

    let daughter = share_of(&result, KinshipCategory::Daughter);
    let granddaughter = share_of(&result, KinshipCategory::SonsDaughter);
    // Radd scales both up proportionally: 1/2 : 1/6 stays 3 : 1.
    assert_eq!(result.status, DistributionStatus::Surplus);
    assert_eq!(daughter.amount, dec!(45_000));
    assert_eq!(granddaughter.amount, dec!(15_000));
}

#[test]
fn sons_daughter_blocked_by_two_daughters() {
    let heirs = vec![
        IndividualHeir::new("Fatimah", KinshipCategory::Daughter),
        IndividualHeir::new("Zainab", KinshipCategory::Daughter),
        IndividualHeir::new("Laila", KinshipCategory::SonsDaughter),
    ];
    let result = run(Gender::Male, 60_000, &heirs);

    assert_blocked(&result, KinshipCategory::SonsDaughter, "two daughters");
}

#[test]
fn grandfather_inherits_like_the_father_when_absent() {
    // Daughter 1/2, grandfather 1/6 fixed plus the unconsumed remainder.
    let heirs = vec![
        IndividualHeir::new("Fatimah", KinshipCategory::Daughter),
        IndividualHeir::new("Ibrahim", KinshipCategory::PaternalGrandfather),
    ];
    let result = run(Gender::Male, 60_000, &heirs);

    assert_eq!(result.status, DistributionStatus::Balanced);
    assert_eq!(share_of(&result, KinshipCategory::Daughter).amount, dec!(30_000));
    assert_eq!(
        share_of(&result, KinshipCategory::PaternalGrandfather).amount,
        dec!(30_000)
    );
}

#[test]
fn mother_sixth_counts_blocked_siblings() {
    // The two sisters are themselves blocked by the father, but their mere
    // existence still drops the mother from 1/3 to 1/6.
    let heirs = vec![
        IndividualHeir::new("Yusuf", KinshipCategory::Father),
        IndividualHeir::new("Halimah", KinshipCategory::Mother),
        IndividualHeir::new("Ruqayyah", KinshipCategory::FullSister),
        IndividualHeir::new("Khadijah", KinshipCategory::FullSister),
    ];
    let result = run(Gender::Male, 60_000, &heirs);

    assert_eq!(share_of(&result, KinshipCategory::Mother).amount, dec!(10_000));
    assert_blocked(&result, KinshipCategory::FullSister, "Father");
    assert_eq!(share_of(&result, KinshipCategory::Father).amount, dec!(50_000));
}

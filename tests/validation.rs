use faraid::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::str::FromStr;

fn estate(net: u64) -> EstateInputs {
    EstateInputs::new(net).unwrap()
}

#[test]
fn duplicate_father_is_rejected() {
    let heirs = vec![
        IndividualHeir::new("Yusuf", KinshipCategory::Father),
        IndividualHeir::new("Imran", KinshipCategory::Father),
    ];
    let err = compute_distribution(&estate(60_000), &heirs, &FaraidConfig::classical(Gender::Male))
        .unwrap_err();

    assert!(matches!(
        err,
        FaraidError::ConflictingHeir {
            category: KinshipCategory::Father,
            ..
        }
    ));
}

#[test]
fn husband_of_a_male_deceased_is_rejected() {
    let heirs = vec![IndividualHeir::new("Hasan", KinshipCategory::Husband)];
    let err = compute_distribution(&estate(60_000), &heirs, &FaraidConfig::classical(Gender::Male))
        .unwrap_err();

    assert!(matches!(
        err,
        FaraidError::ConflictingHeir {
            category: KinshipCategory::Husband,
            ..
        }
    ));
}

#[test]
fn wife_of_a_female_deceased_is_rejected() {
    let heirs = vec![IndividualHeir::new("Salma", KinshipCategory::Wife)];
    let err = compute_distribution(
        &estate(60_000),
        &heirs,
        &FaraidConfig::classical(Gender::Female),
    )
    .unwrap_err();

    assert!(matches!(
        err,
        FaraidError::ConflictingHeir {
            category: KinshipCategory::Wife,
            ..
        }
    ));
}

#[test]
fn fifth_wife_is_rejected() {
    let heirs: Vec<IndividualHeir> = (0..5)
        .map(|i| IndividualHeir::new(format!("Wife {}", i + 1), KinshipCategory::Wife))
        .collect();
    let err = compute_distribution(&estate(60_000), &heirs, &FaraidConfig::classical(Gender::Male))
        .unwrap_err();

    assert!(matches!(
        err,
        FaraidError::ConflictingHeir {
            category: KinshipCategory::Wife,
            ..
        }
    ));
}

#[test]
fn two_wives_share_the_eighth() {
    let heirs = vec![
        IndividualHeir::new("Salma", KinshipCategory::Wife),
        IndividualHeir::new("Aisyah", KinshipCategory::Wife),
        IndividualHeir::new("Umar", KinshipCategory::Son),
    ];
    let result =
        compute_distribution(&estate(160_000), &heirs, &FaraidConfig::classical(Gender::Male))
            .unwrap();

    let wives: Vec<Decimal> = result
        .heirs
        .iter()
        .filter(|h| h.category == KinshipCategory::Wife)
        .map(|h| h.amount)
        .collect();
    assert_eq!(wives, vec![dec!(10_000), dec!(10_000)]);
}

#[test]
fn empty_heir_list_is_not_an_error() {
    let result = compute_distribution(
        &estate(60_000),
        &[],
        &FaraidConfig::classical(Gender::Male),
    )
    .unwrap();

    assert!(result.heirs.is_empty());
    assert_eq!(result.total_estate, dec!(60_000));
    assert_eq!(result.amount_distributed(), Decimal::ZERO);
    assert!(result.narrative.iter().any(|line| line.contains("No eligible heirs")));
}

#[test]
fn estate_inputs_parse_from_json() {
    let estate = EstateInputs::from_str(r#"{"gross_assets":"100000","debt":"20000"}"#).unwrap();
    assert_eq!(estate.gross_assets, dec!(100_000));
    assert_eq!(estate.debt, dec!(20_000));
    assert_eq!(estate.bequest, Decimal::ZERO);

    assert!(EstateInputs::from_str("not json").is_err());
}

#[test]
fn string_and_float_inputs_convert() {
    let estate = EstateInputs::new("120000.50").unwrap().debt(0.5f64);
    assert_eq!(estate.gross_assets, dec!(120000.50));
    assert_eq!(estate.debt, dec!(0.5));

    assert!(EstateInputs::new("twelve").is_err());
}

#[test]
fn unparseable_setter_value_leaves_field_unchanged() {
    let estate = EstateInputs::new(50_000u64).unwrap().debt("garbage");
    assert_eq!(estate.debt, Decimal::ZERO);
}

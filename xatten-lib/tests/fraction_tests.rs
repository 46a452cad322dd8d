use approx::assert_relative_eq;
use xatten::{Component, FractionType, XattenError, normalize_weight_fractions};

#[test]
fn test_fractions_sum_to_one_for_off_total_inputs() {
    for total in [97.0, 100.0, 103.0, 1.0e-3, 5.0e6] {
        let comps = [
            Component::new("SiO2", total * 0.6, 60.08),
            Component::new("Al2O3", total * 0.3, 101.96),
            Component::new("Fe2O3", total * 0.1, 159.69),
        ];
        for kind in [FractionType::Mole, FractionType::Weight] {
            let wf = normalize_weight_fractions(&comps, kind).unwrap();
            assert_relative_eq!(wf.total(), 1.0, epsilon = 1e-9);
            assert!(wf.iter().all(|(_, w)| w >= 0.0));
        }
    }
}

#[test]
fn test_weight_percentages_renormalized() {
    let comps = [Component::new("A", 48.5, 10.0), Component::new("B", 48.5, 99.0)];
    let wf = normalize_weight_fractions(&comps, FractionType::Weight).unwrap();
    assert_relative_eq!(wf.get("A").unwrap(), 0.5, epsilon = 1e-15);
    assert_relative_eq!(wf.get("B").unwrap(), 0.5, epsilon = 1e-15);
}

#[test]
fn test_equal_weight_equal_mass_is_exactly_half() {
    let comps = [Component::new("A", 50.0, 40.0), Component::new("B", 50.0, 40.0)];
    let wf = normalize_weight_fractions(&comps, FractionType::Weight).unwrap();
    assert_eq!(wf.get("A"), Some(0.5));
    assert_eq!(wf.get("B"), Some(0.5));

    let wf = normalize_weight_fractions(&comps, FractionType::Mole).unwrap();
    assert_eq!(wf.get("A"), Some(0.5));
    assert_eq!(wf.get("B"), Some(0.5));
}

#[test]
fn test_mole_and_weight_inputs_agree() {
    // 2 mol Fe : 3 mol O expressed both ways
    let (m_fe, m_o) = (55.845, 15.999);
    let mole = [Component::new("Fe", 40.0, m_fe), Component::new("O", 60.0, m_o)];

    let mass_fe = 2.0 * m_fe;
    let mass_o = 3.0 * m_o;
    let total = mass_fe + mass_o;
    let weight = [
        Component::new("Fe", 100.0 * mass_fe / total, m_fe),
        Component::new("O", 100.0 * mass_o / total, m_o),
    ];

    let from_mole = normalize_weight_fractions(&mole, FractionType::Mole).unwrap();
    let from_weight = normalize_weight_fractions(&weight, FractionType::Weight).unwrap();
    for name in ["Fe", "O"] {
        assert_relative_eq!(
            from_mole.get(name).unwrap(),
            from_weight.get(name).unwrap(),
            epsilon = 1e-12
        );
    }
}

#[test]
fn test_single_component_is_one() {
    let comps = [Component::new("Fe", 100.0, 55.85)];
    let wf = normalize_weight_fractions(&comps, FractionType::Mole).unwrap();
    assert_eq!(wf.get("Fe"), Some(1.0));
}

#[test]
fn test_zero_component_keeps_zero_fraction() {
    let comps = [Component::new("A", 0.0, 10.0), Component::new("B", 20.0, 30.0)];
    let wf = normalize_weight_fractions(&comps, FractionType::Mole).unwrap();
    assert_eq!(wf.get("A"), Some(0.0));
    assert_eq!(wf.get("B"), Some(1.0));
}

#[test]
fn test_all_zero_percentages_degenerate() {
    let comps = [Component::new("A", 0.0, 10.0), Component::new("B", 0.0, 30.0)];
    let err = normalize_weight_fractions(&comps, FractionType::Weight).unwrap_err();
    assert_eq!(err, XattenError::DegenerateMixture);
}

#[test]
fn test_unknown_fraction_tag() {
    let err = "atom%".parse::<FractionType>().unwrap_err();
    assert!(matches!(err, XattenError::InvalidFractionType(ref t) if t == "atom%"));
}

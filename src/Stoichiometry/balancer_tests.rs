/////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// TESTS
//////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use crate::Chemistry::equation::EquationSides;
    use crate::Examples::balance_examples::SAMPLE_EQUATIONS;
    use crate::Stoichiometry::balancer::{BalanceOutcome, BalanceResult, Balancer, balance};
    use crate::Utils::formatting::format_balanced;
    use crate::errors::BalanceError;
    use crate::settings::{ScalingMode, Settings};
    use approx::assert_relative_eq;
    use std::collections::HashMap;

    fn coefficients(equation: &str) -> Vec<u64> {
        balance(equation).unwrap().coefficients
    }

    fn largest_pivot() -> Balancer {
        Balancer::new(Settings {
            scaling: ScalingMode::LargestPivot,
            ..Settings::default()
        })
    }

    /// per-element totals of one side multiplied by the coefficients
    fn side_totals(formulae: &[String], coefficients: &[u64]) -> HashMap<String, u64> {
        let mut totals = HashMap::new();
        for (formula, &coefficient) in formulae.iter().zip(coefficients) {
            let composition = crate::Chemistry::formula_parser::parse_formula(formula).unwrap();
            for (element, &count) in composition.counts() {
                *totals.entry(element.clone()).or_insert(0) += count * coefficient;
            }
        }
        totals
    }

    #[test]
    fn test_water_synthesis() {
        let result = balance("H2 + O2 = H2O").unwrap();
        assert_eq!(result.reactants, vec!["H2", "O2"]);
        assert_eq!(result.products, vec!["H2O"]);
        assert_eq!(result.coefficients, vec![2, 1, 2]);
        assert_eq!(result.reactant_coefficients(), &[2, 1]);
        assert_eq!(result.product_coefficients(), &[2]);
    }

    #[test]
    fn test_peroxide_decomposition() {
        assert_eq!(coefficients("H2O2 = H2O + O2"), vec![2, 2, 1]);
    }

    #[test]
    fn test_more_elements_than_unknowns() {
        assert_eq!(coefficients("NaNO3 = NaNO2 + O2"), vec![2, 2, 1]);
        assert_eq!(coefficients("H3PO3 = H3PO4 + PH3"), vec![4, 3, 1]);
        assert_eq!(coefficients("Na2SO4 + H2SO4 = NaHSO4"), vec![1, 1, 2]);
        assert_eq!(coefficients("NaCl + KBr = NaBr + KCl"), vec![1, 1, 1, 1]);
    }

    #[test]
    fn test_combustion() {
        assert_eq!(coefficients("CH4 + O2 = CO2 + H2O"), vec![1, 2, 1, 2]);
        assert_eq!(coefficients("C3H8 + O2 = CO2 + H2O"), vec![1, 5, 3, 4]);
        assert_eq!(coefficients("C6H12O6 + O2 = CO2 + H2O"), vec![1, 6, 6, 6]);
    }

    #[test]
    fn test_groups_in_formulae() {
        assert_eq!(
            coefficients("Fe2(SO4)3 + NH3 + H2O = Fe(OH)3 + (NH4)2SO4"),
            vec![1, 6, 6, 2, 3]
        );
        assert_eq!(coefficients("Ca + H2O = Ca(OH)2 + H2"), vec![1, 2, 1, 1]);
        assert_eq!(coefficients("Cu + HNO3 = Cu(NO3)2 + H2O + NO"), vec![3, 8, 3, 4, 2]);
        assert_eq!(
            coefficients("Fe2SiO4 + Mg2SiO4 + H2O + CO2 = Mg6(Si4O10)(OH)8 + Fe2O3 + CH4"),
            vec![4, 12, 18, 1, 4, 4, 1]
        );
    }

    #[test]
    fn test_redox() {
        assert_eq!(
            coefficients("KMnO4 + HCl = KCl + MnCl2 + H2O + Cl2"),
            vec![2, 16, 2, 2, 8, 5]
        );
        assert_eq!(
            coefficients("K4Fe(CN)6 + KMnO4 + H2SO4 = KHSO4 + Fe2(SO4)3 + MnSO4 + HNO3 + CO2 + H2O"),
            vec![10, 122, 299, 162, 5, 122, 60, 60, 188]
        );
    }

    #[test]
    fn test_largest_pivot_scaling() {
        let balancer = largest_pivot();
        assert_eq!(
            balancer.balance("H2O2 = H2O + O2").unwrap().coefficients,
            vec![8, 8, 4]
        );
        assert_eq!(
            balancer.balance("C3H8 + O2 = CO2 + H2O").unwrap().coefficients,
            vec![4, 20, 12, 16]
        );
        assert_eq!(
            balancer
                .balance("Fe2(SO4)3 + NH3 + H2O = Fe(OH)3 + (NH4)2SO4")
                .unwrap()
                .coefficients,
            vec![12, 72, 72, 24, 36]
        );
        // already lowest
        assert_eq!(
            balancer.balance("H2 + O2 = H2O").unwrap().coefficients,
            vec![2, 1, 2]
        );
    }

    #[test]
    fn test_round_trip_of_samples() {
        for equation in SAMPLE_EQUATIONS {
            let result = balance(equation).unwrap();
            let reactants = side_totals(&result.reactants, result.reactant_coefficients());
            let products = side_totals(&result.products, result.product_coefficients());
            assert_eq!(reactants, products, "unbalanced: {}", equation);
            assert!(result.coefficients.iter().all(|&c| c > 0));
        }
    }

    #[test]
    fn test_mass_is_conserved() {
        for equation in SAMPLE_EQUATIONS {
            let result = balance(equation).unwrap();
            let (reactant_mass, product_mass) = result.mass_balance().unwrap();
            assert_relative_eq!(reactant_mass, product_mass, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_error_kinds() {
        assert!(matches!(balance("H2 O2"), Err(BalanceError::MissingProduct)));
        assert!(matches!(balance("H2 ="), Err(BalanceError::MissingProduct)));
        assert!(matches!(
            balance("H99999999999999999999 = H2"),
            Err(BalanceError::Overflow)
        ));
        assert!(matches!(balance("H2 = O2"), Err(BalanceError::Conservation { .. })));
        assert!(matches!(
            balance("Ca(OH2 = CaO + H2O"),
            Err(BalanceError::UnmatchedParenthesis(_))
        ));
        assert!(matches!(
            balance("H2 + O2 = H2O + H2O2"),
            Err(BalanceError::Dimension { .. })
        ));
        assert!(matches!(
            balance("NO2 + N2O4 = N3O6"),
            Err(BalanceError::SingularSystem)
        ));
        // the only solution gives H2 coefficient 0
        assert!(matches!(
            balance("HO + H2 = H2O2"),
            Err(BalanceError::InvalidSolution)
        ));
    }

    #[test]
    fn test_maximum_dimension_is_respected() {
        let balancer = Balancer::new(Settings {
            max_dimension: 4,
            ..Settings::default()
        });
        assert!(balancer.balance("Cu + HNO3 = Cu(NO3)2 + H2O + NO").is_ok());
        assert!(matches!(
            balancer.balance("KMnO4 + HCl = KCl + MnCl2 + H2O + Cl2"),
            Err(BalanceError::SystemTooLarge { dimension: 5, max: 4 })
        ));
    }

    #[test]
    fn test_arrow_and_phase_marks() {
        let result = balance("CH4(g) + O2(g) -> CO2(g) + H2O(l)").unwrap();
        assert_eq!(result.reactants, vec!["CH4", "O2"]);
        assert_eq!(result.coefficients, vec![1, 2, 1, 2]);
    }

    #[test]
    fn test_pairs() {
        let result = balance("Al + O2 = Al2O3").unwrap();
        let pairs: Vec<(u64, &str)> = result.pairs().collect();
        assert_eq!(pairs, vec![(4, "Al"), (3, "O2"), (2, "Al2O3")]);
    }

    #[test]
    fn test_outcome_carries_only_the_message() {
        let outcome = BalanceOutcome::from(balance("H2 O2"));
        assert_eq!(outcome.error(), Some("Equation does not have a product"));
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "Equation does not have a product" }));

        let outcome = BalanceOutcome::from(balance("Na + Cl2 = NaCl"));
        assert_eq!(outcome.error(), None);
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["coefficients"], serde_json::json!([2, 1, 2]));
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_deserialized_result_with_wrong_lengths() {
        let result: BalanceResult = serde_json::from_str(
            r#"{ "reactants": ["H2", "O2"], "products": ["H2O"], "coefficients": [2] }"#,
        )
        .unwrap();
        assert!(!result.is_consistent());
        assert!(result.reactant_coefficients().is_empty());
        assert!(result.product_coefficients().is_empty());
        assert!(matches!(result.mass_balance(), Err(BalanceError::InvalidSolution)));
        assert_eq!(format_balanced(&result), " = ");

        let balanced: BalanceResult = serde_json::from_str(
            r#"{ "reactants": ["H2", "O2"], "products": ["H2O"], "coefficients": [2, 1, 2] }"#,
        )
        .unwrap();
        assert!(balanced.is_consistent());
        assert_eq!(format_balanced(&balanced), "2H2 + O2 = 2H2O");
    }

    #[test]
    fn test_build_matrix_matches_sides() {
        let balancer = Balancer::default();
        let system = balancer.build_matrix("Ca + H2O = Ca(OH)2 + H2").unwrap();
        let sides = EquationSides::parse("Ca + H2O = Ca(OH)2 + H2", balancer.settings()).unwrap();
        assert_eq!(system.elements, sides.reactant_elements());
        assert_eq!(system.unknowns(), sides.species_count() - 1);
        assert_eq!(system.last_species, "H2");
    }
}

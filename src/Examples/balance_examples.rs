use crate::Chemistry::molmass::calculate_molar_mass;
use crate::Stoichiometry::balancer::{BalanceOutcome, Balancer, balance};
use crate::Utils::formatting::{format_balanced, format_balanced_pretty, print_result_table};
use crate::settings::{ScalingMode, Settings};

/// equations offered as samples in the interactive menu
pub const SAMPLE_EQUATIONS: [&str; 12] = [
    "Na2SO4 + H2SO4 = NaHSO4",
    "H2O2 = H2O + O2",
    "CH4 + O2 = CO2 + H2O",
    "C3H8 + O2 = CO2 + H2O",
    "H3PO3 = H3PO4 + PH3",
    "Fe2(SO4)3 + NH3 + H2O = Fe(OH)3 + (NH4)2SO4",
    "Ca + H2O = Ca(OH)2 + H2",
    "Na + Cl2 = NaCl",
    "H2 + O2 = H2O",
    "NaNO3 = NaNO2 + O2",
    "Cu + HNO3 = Cu(NO3)2 + H2O + NO",
    "Fe2SiO4 + Mg2SiO4 + H2O + CO2 = Mg6(Si4O10)(OH)8 + Fe2O3 + CH4",
];

/// picks a sample equation, any seed is wrapped around the list
pub fn sample_equation(seed: usize) -> &'static str {
    SAMPLE_EQUATIONS[seed % SAMPLE_EQUATIONS.len()]
}

pub fn balance_examples(task: usize) {
    match task {
        0 => {
            // all samples
            for equation in SAMPLE_EQUATIONS {
                match balance(equation) {
                    Ok(result) => println!("{}", format_balanced(&result)),
                    Err(e) => println!("{}: {}", equation, e),
                }
            }
        }
        1 => {
            // stoichiometric matrix and solution of one equation
            let balancer = Balancer::default();
            let equation = "Cu + HNO3 = Cu(NO3)2 + H2O + NO";
            match balancer.build_matrix(equation) {
                Ok(system) => system.pretty_print(),
                Err(e) => println!("{}", e),
            }
            if let Ok(result) = balancer.balance(equation) {
                assert_eq!(result.coefficients, vec![3, 8, 3, 4, 2]);
                print_result_table(&result);
                println!("{}", format_balanced_pretty(&result));
            }
        }
        2 => {
            // scaling of the coefficients
            let equation = "H2O2 = H2O + O2";
            for scaling in [ScalingMode::Lowest, ScalingMode::LargestPivot] {
                let balancer = Balancer::new(Settings {
                    scaling,
                    ..Settings::default()
                });
                match balancer.balance(equation) {
                    Ok(result) => println!("{:?}: {}", scaling, format_balanced(&result)),
                    Err(e) => println!("{:?}: {}", scaling, e),
                }
            }
        }
        3 => {
            // molar masses and mass balance
            let (molar_mass, composition) = match calculate_molar_mass("Fe2(SO4)3") {
                Ok(found) => found,
                Err(e) => {
                    println!("{}", e);
                    return;
                }
            };
            println!("Element counts: {:?}", composition.counts());
            println!("Molar mass: {:?} g/mol", molar_mass);
            if let Ok(result) = balance("Fe2(SO4)3 + NH3 + H2O = Fe(OH)3 + (NH4)2SO4") {
                match result.mass_balance() {
                    Ok((reactants, products)) => println!(
                        "mass of reactants {:.3} g, mass of products {:.3} g",
                        reactants, products
                    ),
                    Err(e) => println!("{}", e),
                }
            }
        }
        4 => {
            // errors are returned as messages
            for equation in ["H2 O2", "H2 = O2", "Ca(OH2 = CaO + H2O", "NO2 + N2O4 = N3O6"] {
                let outcome = BalanceOutcome::from(balance(equation));
                match serde_json::to_string(&outcome) {
                    Ok(json) => println!("{} -> {}", equation, json),
                    Err(e) => println!("{}", e),
                }
            }
        }
        _ => println!("no example with number {}", task),
    }
}

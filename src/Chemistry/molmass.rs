//! Module to calculate the molar mass of a chemical formula
//!
//!
use crate::Chemistry::formula_parser::{AtomicComposition, parse_formula};
use crate::errors::BalanceError;
use log::debug;

// Define a struct to hold element data
pub struct Element {
    name: &'static str,
    atomic_mass: f64,
}

// Define a list of elements and their atomic masses
const ELEMENTS: &[Element] = &[
    Element { name: "H", atomic_mass: 1.008 },
    Element { name: "He", atomic_mass: 4.0026 },
    Element { name: "Li", atomic_mass: 6.94 },
    Element { name: "Be", atomic_mass: 9.0122 },
    Element { name: "B", atomic_mass: 10.81 },
    Element { name: "C", atomic_mass: 12.011 },
    Element { name: "N", atomic_mass: 14.007 },
    Element { name: "O", atomic_mass: 15.999 },
    Element { name: "F", atomic_mass: 18.998 },
    Element { name: "Ne", atomic_mass: 20.18 },
    Element { name: "Na", atomic_mass: 22.99 },
    Element { name: "Mg", atomic_mass: 24.305 },
    Element { name: "Al", atomic_mass: 26.98 },
    Element { name: "Si", atomic_mass: 28.085 },
    Element { name: "P", atomic_mass: 30.974 },
    Element { name: "S", atomic_mass: 32.065 },
    Element { name: "Cl", atomic_mass: 35.45 },
    Element { name: "Ar", atomic_mass: 39.948 },
    Element { name: "K", atomic_mass: 39.102 },
    Element { name: "Ca", atomic_mass: 40.08 },
    Element { name: "Sc", atomic_mass: 44.9559 },
    Element { name: "Ti", atomic_mass: 47.867 },
    Element { name: "V", atomic_mass: 50.9415 },
    Element { name: "Cr", atomic_mass: 51.9961 },
    Element { name: "Mn", atomic_mass: 54.938 },
    Element { name: "Fe", atomic_mass: 55.845 },
    Element { name: "Co", atomic_mass: 58.933 },
    Element { name: "Ni", atomic_mass: 58.69 },
    Element { name: "Cu", atomic_mass: 63.546 },
    Element { name: "Zn", atomic_mass: 65.38 },
    Element { name: "Ga", atomic_mass: 69.723 },
    Element { name: "Ge", atomic_mass: 72.64 },
    Element { name: "As", atomic_mass: 74.9216 },
    Element { name: "Se", atomic_mass: 78.96 },
    Element { name: "Br", atomic_mass: 79.904 },
    Element { name: "Kr", atomic_mass: 83.798 },
    Element { name: "Rb", atomic_mass: 85.4678 },
    Element { name: "Sr", atomic_mass: 87.62 },
    Element { name: "Y", atomic_mass: 88.9059 },
    Element { name: "Zr", atomic_mass: 91.224 },
    Element { name: "Nb", atomic_mass: 92.9064 },
    Element { name: "Mo", atomic_mass: 95.94 },
    Element { name: "Tc", atomic_mass: 98.0 },
    Element { name: "Ru", atomic_mass: 101.07 },
    Element { name: "Rh", atomic_mass: 102.906 },
    Element { name: "Pd", atomic_mass: 106.42 },
    Element { name: "Ag", atomic_mass: 107.868 },
    Element { name: "Cd", atomic_mass: 112.414 },
    Element { name: "In", atomic_mass: 114.818 },
    Element { name: "Sn", atomic_mass: 118.71 },
    Element { name: "Sb", atomic_mass: 121.76 },
    Element { name: "Te", atomic_mass: 127.6 },
    Element { name: "I", atomic_mass: 126.904 },
    Element { name: "Xe", atomic_mass: 131.293 },
    Element { name: "Cs", atomic_mass: 132.905 },
    Element { name: "Ba", atomic_mass: 137.327 },
    Element { name: "La", atomic_mass: 138.905 },
    Element { name: "Ce", atomic_mass: 140.116 },
    Element { name: "W", atomic_mass: 183.84 },
    Element { name: "Pt", atomic_mass: 195.084 },
    Element { name: "Au", atomic_mass: 196.967 },
    Element { name: "Hg", atomic_mass: 200.59 },
    Element { name: "Pb", atomic_mass: 207.2 },
    Element { name: "Bi", atomic_mass: 208.98 },
    Element { name: "U", atomic_mass: 238.029 },
];

/// atomic mass of an element, None for unknown symbols
pub fn atomic_mass(symbol: &str) -> Option<f64> {
    ELEMENTS
        .iter()
        .find(|element| element.name == symbol)
        .map(|element| element.atomic_mass)
}

/// Molar mass of an already parsed composition
pub fn molar_mass_of_composition(composition: &AtomicComposition) -> Result<f64, BalanceError> {
    let mut molar_mass = 0.0;
    for element in composition.elements() {
        let mass = atomic_mass(element).ok_or_else(|| BalanceError::UnknownElement(element.clone()))?;
        let count = composition.get(element);
        debug!("found element: {}, number of atoms  {}", element, count);
        molar_mass += mass * count as f64;
    }
    Ok(molar_mass)
}

// Function to calculate the molar mass of a substance given its chemical formula
pub fn calculate_molar_mass(formula: &str) -> Result<(f64, AtomicComposition), BalanceError> {
    let composition = parse_formula(formula)?;
    let molar_mass = molar_mass_of_composition(&composition)?;
    Ok((molar_mass, composition))
}

// Function to calculate the molar mass of a vector of chemical formulas
pub fn calculate_molar_mass_of_vector_of_subs(
    vec_of_formulae: &[&str],
) -> Result<Vec<f64>, BalanceError> {
    vec_of_formulae
        .iter()
        .map(|formula| calculate_molar_mass(formula).map(|(molar_mass, _)| molar_mass))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_calculate_molar_mass() {
        let (molar_mass, _) = calculate_molar_mass("H2O").unwrap();
        assert_relative_eq!(molar_mass, 18.01528, epsilon = 1e-2);

        let (molar_mass, _) = calculate_molar_mass("NaCl").unwrap();
        assert_relative_eq!(molar_mass, 58.44, epsilon = 1e-2);

        let (molar_mass, _) = calculate_molar_mass("C6H8O6").unwrap();
        assert_relative_eq!(molar_mass, 176.12, epsilon = 1e-2);

        let (molar_mass, composition) = calculate_molar_mass("Ca(NO3)2").unwrap();
        assert_relative_eq!(molar_mass, 164.093, epsilon = 1e-2);
        assert_eq!(composition.get("O"), 6);
    }

    #[test]
    fn test_calculate_molar_mass_of_vector_of_substances() {
        let vec_of_formulae = vec!["H2O", "NaCl", "C6H8O6", "Ca(NO3)2", "Fe2(SO4)3"];
        let expected_molar_masses = vec![18.01528, 58.44316, 176.12, 164.093, 399.88];

        let calculated_molar_masses = calculate_molar_mass_of_vector_of_subs(&vec_of_formulae).unwrap();

        for (i, &expected_molar_mass) in expected_molar_masses.iter().enumerate() {
            assert_relative_eq!(calculated_molar_masses[i], expected_molar_mass, epsilon = 5e-2);
        }
    }

    #[test]
    fn test_unknown_element() {
        assert!(atomic_mass("Xx").is_none());
        assert!(matches!(
            calculate_molar_mass("Xx2O"),
            Err(BalanceError::UnknownElement(symbol)) if symbol == "Xx"
        ));
    }
}

//! Splitting of an equation text into reactants and products and parsing of every species.
use crate::Chemistry::formula_parser::{AtomicComposition, parse_formula};
use crate::errors::BalanceError;
use crate::settings::Settings;
use log::debug;
use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern"));
static ARROWS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"=>|->|→|⟶").expect("arrow pattern"));
static PHASE_MARKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((?:aq|g|l|s)\)").expect("phase pattern"));

/// Removes whitespace and, depending on settings, phase marks and arrow separators
/// (arrows become `=`).
pub fn normalize_equation(text: &str, settings: &Settings) -> String {
    let mut text = WHITESPACE.replace_all(text, "").into_owned();
    if settings.accept_arrows {
        text = ARROWS.replace_all(&text, "=").into_owned();
    }
    if settings.strip_phase_marks {
        text = PHASE_MARKS.replace_all(&text, "").into_owned();
    }
    text
}

/// Splits an equation into reactant and product formulae, keeping their order
/// # Examples
/// ```
/// use ChemEqBalance::Chemistry::equation::group_reactants_products;
/// use ChemEqBalance::settings::Settings;
/// let (reactants, products) = group_reactants_products("H2 + O2 = H2O", &Settings::default()).unwrap();
/// assert_eq!(reactants, vec!["H2", "O2"]);
/// assert_eq!(products, vec!["H2O"]);
/// ```
pub fn group_reactants_products(
    text: &str,
    settings: &Settings,
) -> Result<(Vec<String>, Vec<String>), BalanceError> {
    let normalized = normalize_equation(text, settings);
    let parts: Vec<&str> = normalized.split('=').collect();
    let (reactants, products) = match parts.as_slice() {
        [_] | [_, ""] => return Err(BalanceError::MissingProduct),
        [reactants, products] => (*reactants, *products),
        _ => return Err(BalanceError::MultipleSeparators),
    };
    let split_side = |side: &str| -> Result<Vec<String>, BalanceError> {
        side.split('+')
            .map(|species| {
                if species.is_empty() {
                    Err(BalanceError::EmptySpecies(text.to_string()))
                } else {
                    Ok(species.to_string())
                }
            })
            .collect()
    };
    Ok((split_side(reactants)?, split_side(products)?))
}

/// one reactant or product with its atomic composition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Species {
    pub formula: String,
    pub composition: AtomicComposition,
}

impl Species {
    pub fn parse(formula: &str) -> Result<Self, BalanceError> {
        let composition = parse_formula(formula)?;
        debug!("species {} parsed: {:?}", formula, composition.counts());
        Ok(Self {
            formula: formula.to_string(),
            composition,
        })
    }
}

/// Both sides of a chemical equation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquationSides {
    pub reactants: Vec<Species>,
    pub products: Vec<Species>,
}

impl EquationSides {
    pub fn parse(text: &str, settings: &Settings) -> Result<Self, BalanceError> {
        let (reactants, products) = group_reactants_products(text, settings)?;
        let parse_all = |formulae: Vec<String>| -> Result<Vec<Species>, BalanceError> {
            formulae.iter().map(|f| Species::parse(f)).collect()
        };
        Ok(Self {
            reactants: parse_all(reactants)?,
            products: parse_all(products)?,
        })
    }

    /// union of the elements of all reactants in first-seen order
    pub fn reactant_elements(&self) -> Vec<String> {
        side_elements(&self.reactants)
    }

    pub fn product_elements(&self) -> Vec<String> {
        side_elements(&self.products)
    }

    /// Checks that both sides contain the same elements and returns them in reactant order
    pub fn check_conservation(&self) -> Result<Vec<String>, BalanceError> {
        let reactant_elements = self.reactant_elements();
        let product_elements = self.product_elements();
        let reactants_only: Vec<String> = reactant_elements
            .iter()
            .filter(|e| !product_elements.contains(e))
            .cloned()
            .collect();
        let products_only: Vec<String> = product_elements
            .iter()
            .filter(|e| !reactant_elements.contains(e))
            .cloned()
            .collect();
        if reactants_only.is_empty() && products_only.is_empty() {
            Ok(reactant_elements)
        } else {
            Err(BalanceError::Conservation {
                reactants_only,
                products_only,
            })
        }
    }

    /// reactants followed by products
    pub fn all_species(&self) -> impl Iterator<Item = &Species> {
        self.reactants.iter().chain(self.products.iter())
    }

    pub fn species_count(&self) -> usize {
        self.reactants.len() + self.products.len()
    }

    pub fn is_product(&self, index: usize) -> bool {
        index >= self.reactants.len()
    }
}

fn side_elements(side: &[Species]) -> Vec<String> {
    let mut elements: Vec<String> = Vec::new();
    for species in side {
        for element in species.composition.elements() {
            if !elements.contains(element) {
                elements.push(element.clone());
            }
        }
    }
    elements
}

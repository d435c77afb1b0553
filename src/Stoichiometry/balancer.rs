//! Entry point of the balancing pipeline: text -> species -> atom maps -> matrix -> coefficients.
use crate::Chemistry::equation::EquationSides;
use crate::Chemistry::molmass::molar_mass_of_composition;
use crate::Chemistry::formula_parser::parse_formula;
use crate::Stoichiometry::linear_solver::LinearSolver;
use crate::Stoichiometry::stoich_matrix::StoichiometricMatrix;
use crate::errors::BalanceError;
use crate::settings::Settings;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Balanced equation: species in input order and one coefficient per species
/// (reactants first, then products).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceResult {
    pub reactants: Vec<String>,
    pub products: Vec<String>,
    pub coefficients: Vec<u64>,
}

impl BalanceResult {
    /// one coefficient per species; false for a value deserialized with mismatched lengths
    pub fn is_consistent(&self) -> bool {
        self.coefficients.len() == self.reactants.len() + self.products.len()
    }

    /// empty if there are fewer coefficients than reactants
    pub fn reactant_coefficients(&self) -> &[u64] {
        self.coefficients
            .get(..self.reactants.len())
            .unwrap_or(&[])
    }

    pub fn product_coefficients(&self) -> &[u64] {
        self.coefficients
            .get(self.reactants.len()..)
            .unwrap_or(&[])
    }

    /// (coefficient, formula) pairs of reactants and then of products
    pub fn pairs(&self) -> impl Iterator<Item = (u64, &str)> {
        self.coefficients
            .iter()
            .copied()
            .zip(self.reactants.iter().chain(self.products.iter()).map(|s| s.as_str()))
    }

    /// total molar mass of reactants and of products weighted by the coefficients, g/mol
    pub fn mass_balance(&self) -> Result<(f64, f64), BalanceError> {
        if !self.is_consistent() {
            return Err(BalanceError::InvalidSolution);
        }
        let side_mass = |formulae: &[String], coefficients: &[u64]| -> Result<f64, BalanceError> {
            let mut mass = 0.0;
            for (formula, &coefficient) in formulae.iter().zip(coefficients) {
                let composition = parse_formula(formula)?;
                mass += coefficient as f64 * molar_mass_of_composition(&composition)?;
            }
            Ok(mass)
        };
        Ok((
            side_mass(&self.reactants, self.reactant_coefficients())?,
            side_mass(&self.products, self.product_coefficients())?,
        ))
    }
}

/// Message-only form of a balance request for presentation code: either the balanced
/// equation or the error text, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BalanceOutcome {
    Balanced(BalanceResult),
    Failed { error: String },
}

impl From<Result<BalanceResult, BalanceError>> for BalanceOutcome {
    fn from(result: Result<BalanceResult, BalanceError>) -> Self {
        match result {
            Ok(balanced) => BalanceOutcome::Balanced(balanced),
            Err(error) => BalanceOutcome::Failed {
                error: error.to_string(),
            },
        }
    }
}

impl BalanceOutcome {
    pub fn error(&self) -> Option<&str> {
        match self {
            BalanceOutcome::Balanced(_) => None,
            BalanceOutcome::Failed { error } => Some(error.as_str()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Balancer {
    settings: Settings,
}

impl Balancer {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Parses the equation and assembles its stoichiometric matrix
    pub fn build_matrix(&self, equation: &str) -> Result<StoichiometricMatrix, BalanceError> {
        let sides = EquationSides::parse(equation, &self.settings)?;
        StoichiometricMatrix::build(&sides, self.settings.max_dimension)
    }

    pub fn balance(&self, equation: &str) -> Result<BalanceResult, BalanceError> {
        info!("balancing equation: {}", equation);
        let result = self.balance_inner(equation);
        if let Err(error) = &result {
            warn!("equation '{}' not balanced: {}", equation, error);
        }
        result
    }

    fn balance_inner(&self, equation: &str) -> Result<BalanceResult, BalanceError> {
        let sides = EquationSides::parse(equation, &self.settings)?;
        let system = StoichiometricMatrix::build(&sides, self.settings.max_dimension)?;
        let coefficients = LinearSolver::new(&system, self.settings.scaling).solve()?;
        verify(&sides, &coefficients)?;
        info!("coefficients found: {:?}", coefficients);
        Ok(BalanceResult {
            reactants: sides.reactants.iter().map(|s| s.formula.clone()).collect(),
            products: sides.products.iter().map(|s| s.formula.clone()).collect(),
            coefficients,
        })
    }
}

/// Balances an equation with default settings
pub fn balance(equation: &str) -> Result<BalanceResult, BalanceError> {
    Balancer::default().balance(equation)
}

/// Every coefficient must be positive and every element must have the same total on both sides
fn verify(sides: &EquationSides, coefficients: &[u64]) -> Result<(), BalanceError> {
    if coefficients.len() != sides.species_count() || coefficients.iter().any(|&c| c == 0) {
        return Err(BalanceError::InvalidSolution);
    }
    let mut totals: HashMap<&str, i128> = HashMap::new();
    for (index, (species, &coefficient)) in sides.all_species().zip(coefficients).enumerate() {
        let sign: i128 = if sides.is_product(index) { -1 } else { 1 };
        for (element, &count) in species.composition.counts() {
            let atoms = i128::from(count)
                .checked_mul(i128::from(coefficient))
                .ok_or(BalanceError::Overflow)?;
            *totals.entry(element.as_str()).or_insert(0) += sign * atoms;
        }
    }
    if totals.values().all(|&total| total == 0) {
        Ok(())
    } else {
        Err(BalanceError::InvalidSolution)
    }
}

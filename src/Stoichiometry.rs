/// Stoichiometric matrix of an equation: one row per element, one column per species except the last one,
/// whose atom counts form the right-hand side.
pub mod stoich_matrix;
/// Fraction-free Gaussian elimination over integers with pivot search, followed by
/// normalization of the rational solution to the smallest (or pivot-scaled) integer coefficients
pub mod linear_solver;
/// Full pipeline from the equation text to integer coefficients
///
///  # Examples
/// ```
/// use ChemEqBalance::Stoichiometry::balancer::balance;
/// let result = balance("H2 + O2 = H2O").unwrap();
/// assert_eq!(result.coefficients, vec![2, 1, 2]);
/// ```
pub mod balancer;
mod balancer_tests;

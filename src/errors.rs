//! Error types of the balancing pipeline.
//!
//! Every step (grouping, formula parsing, matrix assembly, elimination) returns
//! `Result<_, BalanceError>`; the message of the error is what the user sees.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BalanceError {
    /// no `=` separator between reactants and products
    #[error("Equation does not have a product")]
    MissingProduct,
    #[error("Equation must contain exactly one '=' separator")]
    MultipleSeparators,
    #[error("Empty species in equation '{0}'")]
    EmptySpecies(String),
    /// `)` without an open group, or a group that is never closed
    #[error("Unmatching parenthesis in formula '{0}'")]
    UnmatchedParenthesis(String),
    /// element sets of reactants and products differ
    #[error(
        "Law of conservation of matter violated: only in reactants {reactants_only:?}, only in products {products_only:?}"
    )]
    Conservation {
        reactants_only: Vec<String>,
        products_only: Vec<String>,
    },
    #[error("System is not square: {elements} elements for {unknowns} unknown coefficients")]
    Dimension { elements: usize, unknowns: usize },
    #[error("System of {dimension} unknowns exceeds the maximum dimension {max}")]
    SystemTooLarge { dimension: usize, max: usize },
    /// no row order gives a nonzero diagonal
    #[error("Multiple independent solution: the system is singular")]
    SingularSystem,
    #[error("Arithmetic overflow while solving the system")]
    Overflow,
    #[error("Solution was calculated, but is invalid")]
    InvalidSolution,
    #[error("Unknown element: {0}")]
    UnknownElement(String),
    #[error("{0}")]
    FileFormat(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

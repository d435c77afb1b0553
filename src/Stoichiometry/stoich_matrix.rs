//! Stoichiometric matrix of one equation: a row per element, a column per species except the last one.
//! The last species gets coefficient 1 and its atom counts are moved to the right-hand side.
use crate::Chemistry::equation::EquationSides;
use crate::errors::BalanceError;
use log::{debug, info};
use nalgebra::{DMatrix, DVector};
use prettytable::{Cell, Row, Table};

#[derive(Debug, Clone, PartialEq)]
pub struct StoichiometricMatrix {
    /// row labels, first-seen order on the reactant side
    pub elements: Vec<String>,
    /// column labels, all species but the last one
    pub species: Vec<String>,
    /// the species held out of the system
    pub last_species: String,
    pub matrix: DMatrix<i128>,
    /// atom counts of the last species
    pub rhs: DVector<i128>,
}

impl StoichiometricMatrix {
    /// Builds the system `reactants - products = 0` with the last species on the right-hand side.
    /// Product columns are negated.
    /// Both sides must contain the same elements, and the number of elements must be at least the number of
    /// unknown coefficients (surplus element rows must turn out to be dependent, this is checked by the solver).
    pub fn build(sides: &EquationSides, max_dimension: usize) -> Result<Self, BalanceError> {
        let elements = sides.check_conservation()?;
        let all_species: Vec<_> = sides.all_species().collect();
        let unknowns = all_species.len().saturating_sub(1);
        if elements.len() < unknowns || unknowns == 0 {
            return Err(BalanceError::Dimension {
                elements: elements.len(),
                unknowns,
            });
        }
        if unknowns > max_dimension {
            return Err(BalanceError::SystemTooLarge {
                dimension: unknowns,
                max: max_dimension,
            });
        }
        let last = all_species[unknowns];
        let matrix = DMatrix::from_fn(elements.len(), unknowns, |row, col| {
            let count = i128::from(all_species[col].composition.get(&elements[row]));
            if sides.is_product(col) { -count } else { count }
        });
        let rhs = DVector::from_fn(elements.len(), |row, _| {
            i128::from(last.composition.get(&elements[row]))
        });
        info!(
            "stoichiometric matrix {}x{} built for {} species",
            elements.len(),
            unknowns,
            all_species.len()
        );
        debug!("matrix {} rhs {}", matrix, rhs);
        Ok(Self {
            species: all_species[..unknowns]
                .iter()
                .map(|s| s.formula.clone())
                .collect(),
            last_species: last.formula.clone(),
            elements,
            matrix,
            rhs,
        })
    }

    /// number of unknown coefficients
    pub fn unknowns(&self) -> usize {
        self.matrix.ncols()
    }

    pub fn is_square(&self) -> bool {
        self.matrix.nrows() == self.matrix.ncols()
    }

    /// Table with elements as rows, species as columns and the held-out species as the last column
    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        let mut header = vec![Cell::new("")];
        header.extend(self.species.iter().map(|s| Cell::new(s)));
        header.push(Cell::new(&format!("| {}", self.last_species)));
        table.add_row(Row::new(header));
        for (i, element) in self.elements.iter().enumerate() {
            let mut row = vec![Cell::new(element)];
            row.extend(
                self.matrix
                    .row(i)
                    .iter()
                    .map(|value| Cell::new(&value.to_string())),
            );
            row.push(Cell::new(&format!("| {}", self.rhs[i])));
            table.add_row(Row::new(row));
        }
        table
    }

    pub fn pretty_print(&self) {
        self.to_table().printstd();
    }
}

//! Solver of the stoichiometric system.
//!
//! 1) Pivot search: if some diagonal entry is zero, rows are reordered so that the whole diagonal is nonzero.
//!    Row orders are tried in lexicographic order, a partial order is abandoned as soon as it puts a zero on
//!    the diagonal.
//! 2) Fraction-free elimination: for every column i and every other row r,
//!    `row_r := row_r * M[i][i] - row_i * M[r][i]` (right-hand side included), above and below the pivot,
//!    until the leading square block is diagonal. All arithmetic is exact and overflow-checked.
//! 3) Normalization: every unknown is `rhs_i / M[i][i]`; unknowns are scaled by the largest diagonal magnitude,
//!    which becomes the coefficient of the held-out species, and turned into integers.
//!
//! Rows below the leading square block (more elements than unknowns) must vanish after elimination.
use crate::Stoichiometry::stoich_matrix::StoichiometricMatrix;
use crate::errors::BalanceError;
use crate::settings::ScalingMode;
use log::{debug, warn};
use nalgebra::{DMatrix, DVector};
use num_integer::Integer;
use num_rational::Ratio;
use num_traits::{CheckedMul, Signed};

/// Finds a row order under which every diagonal entry of the leading square block is nonzero.
/// Returns the permutation as "new row i is old row perm[i]"; rows not used on the diagonal follow in
/// their original order. None if no such order exists.
pub fn find_nonzero_diagonal(matrix: &DMatrix<i128>) -> Option<Vec<usize>> {
    let rows = matrix.nrows();
    let columns = matrix.ncols().min(rows);
    let mut used = vec![false; rows];
    let mut permutation = Vec::with_capacity(rows);
    if !assign_pivot(matrix, 0, columns, &mut used, &mut permutation) {
        return None;
    }
    permutation.extend((0..rows).filter(|&r| !used[r]));
    Some(permutation)
}

fn assign_pivot(
    matrix: &DMatrix<i128>,
    column: usize,
    columns: usize,
    used: &mut [bool],
    permutation: &mut Vec<usize>,
) -> bool {
    if column == columns {
        return true;
    }
    for row in 0..matrix.nrows() {
        if used[row] || matrix[(row, column)] == 0 {
            continue;
        }
        used[row] = true;
        permutation.push(row);
        if assign_pivot(matrix, column + 1, columns, used, permutation) {
            return true;
        }
        used[row] = false;
        permutation.pop();
    }
    false
}

/// `a * pivot - b * factor` or an overflow error
fn cross_multiply(a: i128, pivot: i128, b: i128, factor: i128) -> Result<i128, BalanceError> {
    a.checked_mul(pivot)
        .zip(b.checked_mul(factor))
        .and_then(|(x, y)| x.checked_sub(y))
        .ok_or(BalanceError::Overflow)
}

#[derive(Debug, Clone)]
pub struct LinearSolver {
    matrix: DMatrix<i128>,
    rhs: DVector<i128>,
    scaling: ScalingMode,
}

impl LinearSolver {
    pub fn new(system: &StoichiometricMatrix, scaling: ScalingMode) -> Self {
        Self {
            matrix: system.matrix.clone(),
            rhs: system.rhs.clone(),
            scaling,
        }
    }

    pub fn from_parts(matrix: DMatrix<i128>, rhs: DVector<i128>, scaling: ScalingMode) -> Self {
        Self {
            matrix,
            rhs,
            scaling,
        }
    }

    fn unknowns(&self) -> usize {
        self.matrix.ncols()
    }

    fn has_nonzero_diagonal(&self) -> bool {
        (0..self.unknowns()).all(|i| self.matrix[(i, i)] != 0)
    }

    fn permute_rows(&mut self, permutation: &[usize]) {
        let old_matrix = self.matrix.clone();
        let old_rhs = self.rhs.clone();
        self.matrix = DMatrix::from_fn(old_matrix.nrows(), old_matrix.ncols(), |r, c| {
            old_matrix[(permutation[r], c)]
        });
        self.rhs = DVector::from_fn(old_rhs.len(), |r, _| old_rhs[permutation[r]]);
    }

    /// Reorders rows if any diagonal entry is zero
    pub fn ensure_pivots(&mut self) -> Result<(), BalanceError> {
        if self.has_nonzero_diagonal() {
            return Ok(());
        }
        match find_nonzero_diagonal(&self.matrix) {
            Some(permutation) => {
                debug!("rows reordered: {:?}", permutation);
                self.permute_rows(&permutation);
                Ok(())
            }
            None => {
                warn!("no row order gives a nonzero diagonal");
                Err(BalanceError::SingularSystem)
            }
        }
    }

    /// Clears column `column` in every row except the pivot row
    pub fn eliminate_column(&mut self, column: usize) -> Result<(), BalanceError> {
        let pivot = self.matrix[(column, column)];
        for row in 0..self.matrix.nrows() {
            let factor = self.matrix[(row, column)];
            if row == column || factor == 0 {
                continue;
            }
            for c in 0..self.matrix.ncols() {
                let updated = cross_multiply(
                    self.matrix[(row, c)],
                    pivot,
                    self.matrix[(column, c)],
                    factor,
                )?;
                self.matrix[(row, c)] = updated;
            }
            let updated = cross_multiply(self.rhs[row], pivot, self.rhs[column], factor)?;
            self.rhs[row] = updated;
            if self.scaling == ScalingMode::Lowest {
                self.reduce_row(row);
            }
        }
        Ok(())
    }

    /// Divides a row and its right-hand side by their common divisor
    fn reduce_row(&mut self, row: usize) {
        let divisor = self
            .matrix
            .row(row)
            .iter()
            .fold(self.rhs[row], |acc, value| acc.gcd(value));
        if divisor > 1 {
            for c in 0..self.matrix.ncols() {
                self.matrix[(row, c)] /= divisor;
            }
            self.rhs[row] /= divisor;
        }
    }

    /// rows below the square block must be all zeros, including the right-hand side
    fn check_surplus_rows(&self) -> Result<(), BalanceError> {
        let unknowns = self.unknowns();
        for row in unknowns..self.matrix.nrows() {
            if self.rhs[row] != 0 || self.matrix.row(row).iter().any(|&v| v != 0) {
                warn!("element row {} is inconsistent with the rest of the system", row);
                return Err(BalanceError::Dimension {
                    elements: self.matrix.nrows(),
                    unknowns,
                });
            }
        }
        Ok(())
    }

    /// Diagonalizes the system and returns the coefficient magnitudes: one per unknown plus the
    /// coefficient of the held-out species at the end.
    pub fn solve(mut self) -> Result<Vec<u64>, BalanceError> {
        let unknowns = self.unknowns();
        if self.matrix.nrows() < unknowns || unknowns == 0 {
            return Err(BalanceError::Dimension {
                elements: self.matrix.nrows(),
                unknowns,
            });
        }
        for column in 0..unknowns {
            self.ensure_pivots()?;
            self.eliminate_column(column)?;
        }
        self.check_surplus_rows()?;
        debug!("diagonal form: {} rhs {}", self.matrix, self.rhs);
        self.normalize()
    }

    fn normalize(&self) -> Result<Vec<u64>, BalanceError> {
        let unknowns = self.unknowns();
        let diagonal: Vec<i128> = (0..unknowns).map(|i| self.matrix[(i, i)]).collect();
        if diagonal.iter().any(|&d| d == 0) {
            return Err(BalanceError::SingularSystem);
        }
        let scale = diagonal.iter().map(|d| d.abs()).max().unwrap_or(1);
        let scale_ratio = Ratio::from_integer(scale);
        let mut values: Vec<Ratio<i128>> = Vec::with_capacity(unknowns + 1);
        for (i, &d) in diagonal.iter().enumerate() {
            let unknown = Ratio::new(self.rhs[i], d);
            let scaled = unknown
                .checked_mul(&scale_ratio)
                .ok_or(BalanceError::Overflow)?;
            values.push(scaled.abs());
        }
        values.push(scale_ratio);

        // scaling by the largest pivot can leave fractions behind
        let denominator = values
            .iter()
            .fold(1i128, |acc, value| acc.lcm(value.denom()));
        let denominator_ratio = Ratio::from_integer(denominator);
        let mut integers = values
            .iter()
            .map(|value| {
                value
                    .checked_mul(&denominator_ratio)
                    .map(|v| v.to_integer())
                    .ok_or(BalanceError::Overflow)
            })
            .collect::<Result<Vec<i128>, BalanceError>>()?;
        if self.scaling == ScalingMode::Lowest {
            let divisor = integers.iter().fold(0i128, |acc, value| acc.gcd(value));
            if divisor > 1 {
                integers.iter_mut().for_each(|value| *value /= divisor);
            }
        }
        integers
            .into_iter()
            .map(|value| u64::try_from(value).map_err(|_| BalanceError::Overflow))
            .collect()
    }
}

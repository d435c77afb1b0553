use crate::Stoichiometry::balancer::BalanceResult;
use prettytable::{Cell, Row, Table};

fn render(result: &BalanceResult, separator: &str, formula_text: fn(&str) -> String) -> String {
    let side = |formulae: &[String], coefficients: &[u64]| -> String {
        formulae
            .iter()
            .zip(coefficients)
            .map(|(formula, &coefficient)| {
                let formula = formula_text(formula);
                if coefficient == 1 {
                    formula
                } else {
                    format!("{}{}", coefficient, formula)
                }
            })
            .collect::<Vec<_>>()
            .join(" + ")
    };
    format!(
        "{} {} {}",
        side(&result.reactants, result.reactant_coefficients()),
        separator,
        side(&result.products, result.product_coefficients())
    )
}

/// Balanced equation as text, coefficient 1 omitted: `2H2 + O2 = 2H2O`
pub fn format_balanced(result: &BalanceResult) -> String {
    render(result, "=", |formula| formula.to_string())
}

/// Replaces the digits of a formula with unicode subscripts: `H2O` -> `H₂O`
pub fn subscript_digits(formula: &str) -> String {
    formula
        .chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => char::from_u32('₀' as u32 + d).unwrap_or(c),
            None => c,
        })
        .collect()
}

/// `format_balanced` with subscripts and an arrow
pub fn format_balanced_pretty(result: &BalanceResult) -> String {
    render(result, "→", subscript_digits)
}

/// Table of species, side and coefficient
pub fn result_table(result: &BalanceResult) -> Table {
    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("Species"),
        Cell::new("Side"),
        Cell::new("Coefficient"),
    ]));
    let n_reactants = result.reactants.len();
    for (i, (coefficient, formula)) in result.pairs().enumerate() {
        let side = if i < n_reactants { "reactant" } else { "product" };
        table.add_row(Row::new(vec![
            Cell::new(formula),
            Cell::new(side),
            Cell::new(&coefficient.to_string()),
        ]));
    }
    table
}

pub fn print_result_table(result: &BalanceResult) {
    result_table(result).printstd();
}

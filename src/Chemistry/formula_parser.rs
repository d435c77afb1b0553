//! Parser of chemical formulae with nested groups, e.g. `K4(Fe(CN)6)` or `Fe2(SO4)3`.
//!
//! Parsing goes in three steps:
//! 1) [`build_formula_tree`] scans the formula once and produces an arena of nodes: a "stack" node for every
//!    parenthesized group (with the digits after its closing bracket as subscript) and a "leaf" node for every
//!    bare run of atoms. Every node knows the index of its innermost enclosing group.
//! 2) [`extract_atoms`] turns the text of one node (no brackets inside) into `(symbol, count)` entries.
//! 3) [`aggregate_atoms`] multiplies the counts of every node by the subscripts of all groups enclosing it
//!    and sums entries of the same element.
use crate::errors::BalanceError;
use std::collections::HashMap;

/// index of a node in the arena of [`FormulaTree`]
pub type NodeId = usize;

/// One atom found in a flat piece of formula. The count is kept as the digits found in the text,
/// the caller decides the default. Charge is never filled by the parser and stays 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomEntry {
    pub symbol: String,
    pub count: String,
    pub charge: i64,
}

impl AtomEntry {
    fn new(first_letter: char) -> Self {
        Self {
            symbol: first_letter.to_string(),
            count: String::new(),
            charge: 0,
        }
    }
    /// number of atoms, 1 if no digits followed the symbol
    pub fn count_or_default(&self) -> Result<u64, BalanceError> {
        parse_subscript(&self.count)
    }
}

/// digits of a count or group subscript; empty means 1, a number beyond `u64` is an overflow
fn parse_subscript(digits: &str) -> Result<u64, BalanceError> {
    if digits.is_empty() {
        return Ok(1);
    }
    digits.parse().map_err(|_| BalanceError::Overflow)
}

/// Scans a formula fragment without brackets: an uppercase letter starts a new atom,
/// lowercase letters continue its symbol and digits go to its count.
/// Anything before the first uppercase letter is skipped.
pub fn extract_atoms(text: &str) -> Vec<AtomEntry> {
    let mut atoms: Vec<AtomEntry> = Vec::new();
    for ch in text.chars() {
        if ch.is_ascii_uppercase() {
            atoms.push(AtomEntry::new(ch));
            continue;
        }
        if let Some(current) = atoms.last_mut() {
            if ch.is_ascii_digit() {
                current.count.push(ch);
            } else if ch.is_ascii_lowercase() {
                current.symbol.push(ch);
            }
        }
    }
    atoms
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// parenthesized group
    Stack,
    /// bare run of atoms
    Leaf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenState {
    Opened,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormulaNode {
    pub kind: NodeKind,
    /// characters collected while the node was open, brackets excluded
    pub text: String,
    /// digits right after the closing bracket, empty for leaves and for groups without subscript
    pub subscript: String,
    pub state: OpenState,
    /// innermost enclosing group
    pub parent: Option<NodeId>,
}

impl FormulaNode {
    fn stack(parent: Option<NodeId>) -> Self {
        Self {
            kind: NodeKind::Stack,
            text: String::new(),
            subscript: String::new(),
            state: OpenState::Opened,
            parent,
        }
    }
    fn leaf() -> Self {
        Self {
            kind: NodeKind::Leaf,
            text: String::new(),
            subscript: String::new(),
            state: OpenState::Opened,
            parent: None,
        }
    }
    pub fn is_stack(&self) -> bool {
        self.kind == NodeKind::Stack
    }
    pub fn is_open(&self) -> bool {
        self.state == OpenState::Opened
    }
    fn is_open_stack(&self) -> bool {
        self.is_stack() && self.is_open()
    }
    /// own multiplier of the node: the subscript of a group, 1 for a leaf or an empty subscript
    pub fn multiplier(&self) -> Result<u64, BalanceError> {
        if self.is_stack() {
            parse_subscript(&self.subscript)
        } else {
            Ok(1)
        }
    }
}

/// Arena of formula nodes plus the order in which they were emitted:
/// leaves when they start, groups when they close.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormulaTree {
    pub nodes: Vec<FormulaNode>,
    pub order: Vec<NodeId>,
}

impl FormulaTree {
    fn push(&mut self, node: FormulaNode) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// nodes in emission order
    pub fn iter(&self) -> impl Iterator<Item = &FormulaNode> + '_ {
        self.order.iter().map(move |&id| &self.nodes[id])
    }

    /// product of the node's own subscript and the subscripts of all enclosing groups
    pub fn cumulative_multiplier(&self, id: NodeId) -> Result<u64, BalanceError> {
        let mut multiplier = self.nodes[id].multiplier()?;
        let mut current = self.nodes[id].parent;
        while let Some(parent) = current {
            multiplier = multiplier
                .checked_mul(self.nodes[parent].multiplier()?)
                .ok_or(BalanceError::Overflow)?;
            current = self.nodes[parent].parent;
        }
        Ok(multiplier)
    }

    /// atoms of one node with counts already multiplied by the cumulative multiplier
    pub fn node_atoms(&self, id: NodeId) -> Result<Vec<(String, u64)>, BalanceError> {
        let multiplier = self.cumulative_multiplier(id)?;
        extract_atoms(&self.nodes[id].text)
            .into_iter()
            .map(|atom| {
                let count = atom
                    .count_or_default()?
                    .checked_mul(multiplier)
                    .ok_or(BalanceError::Overflow)?;
                Ok((atom.symbol, count))
            })
            .collect()
    }
}

/// Builds the node arena of a formula in one left-to-right scan.
/// A `)` that does not close an open group, or a group left open at the end, is an error.
pub fn build_formula_tree(formula: &str) -> Result<FormulaTree, BalanceError> {
    let chars: Vec<char> = formula.chars().collect();
    let mut tree = FormulaTree::default();
    let mut stack: Vec<NodeId> = Vec::new();
    let mut current: Option<NodeId> = None;
    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];
        if ch == '(' {
            let parent = current.filter(|&id| tree.nodes[id].is_open_stack());
            let id = tree.push(FormulaNode::stack(parent));
            stack.push(id);
            current = Some(id);
        }
        if ch.is_ascii_uppercase() && !current.is_some_and(|id| tree.nodes[id].is_open_stack()) {
            let id = tree.push(FormulaNode::leaf());
            tree.order.push(id);
            current = Some(id);
        }
        if let Some(id) = current {
            if tree.nodes[id].is_open() && ch != '(' && ch != ')' {
                tree.nodes[id].text.push(ch);
            }
        }
        if ch == ')' {
            let id = match current {
                Some(id) if tree.nodes[id].is_open_stack() => id,
                _ => return Err(BalanceError::UnmatchedParenthesis(formula.to_string())),
            };
            // subscript of the group
            let mut end = i + 1;
            while end < chars.len() && chars[end].is_ascii_digit() {
                tree.nodes[id].subscript.push(chars[end]);
                end += 1;
            }
            i = end - 1;
            tree.nodes[id].state = OpenState::Closed;
            stack.pop();
            tree.order.push(id);
            current = stack.last().copied();
        }
        i += 1;
    }
    if !stack.is_empty() {
        return Err(BalanceError::UnmatchedParenthesis(formula.to_string()));
    }
    Ok(tree)
}

/// Element -> number of atoms for one species. Elements also keep the order in which they were met.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AtomicComposition {
    counts: HashMap<String, u64>,
    elements: Vec<String>,
}

impl AtomicComposition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, symbol: &str, count: u64) -> Result<(), BalanceError> {
        match self.counts.get_mut(symbol) {
            Some(total) => *total = total.checked_add(count).ok_or(BalanceError::Overflow)?,
            None => {
                self.counts.insert(symbol.to_string(), count);
                self.elements.push(symbol.to_string());
            }
        }
        Ok(())
    }

    /// number of atoms of the element, 0 if absent
    pub fn get(&self, symbol: &str) -> u64 {
        self.counts.get(symbol).copied().unwrap_or(0)
    }

    /// element symbols in first-seen order
    pub fn elements(&self) -> &[String] {
        &self.elements
    }

    pub fn counts(&self) -> &HashMap<String, u64> {
        &self.counts
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Sums the atoms of all nodes of the tree
pub fn aggregate_atoms(tree: &FormulaTree) -> Result<AtomicComposition, BalanceError> {
    let mut composition = AtomicComposition::new();
    for &id in tree.order.iter() {
        for (symbol, count) in tree.node_atoms(id)? {
            composition.add(&symbol, count)?;
        }
    }
    Ok(composition)
}

/// Atomic composition of a formula, e.g. `Fe2(SO4)3` -> {Fe: 2, S: 3, O: 12}
pub fn parse_formula(formula: &str) -> Result<AtomicComposition, BalanceError> {
    let tree = build_formula_tree(formula)?;
    aggregate_atoms(&tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_map(composition: &AtomicComposition) -> HashMap<String, u64> {
        composition.counts().clone()
    }

    fn expected(pairs: &[(&str, u64)]) -> HashMap<String, u64> {
        pairs.iter().map(|(s, c)| (s.to_string(), *c)).collect()
    }

    #[test]
    fn test_extract_atoms() {
        let atoms = extract_atoms("NaHCO3");
        let symbols: Vec<&str> = atoms.iter().map(|a| a.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["Na", "H", "C", "O"]);
        assert_eq!(atoms[3].count, "3");
        assert_eq!(atoms[0].count, "");
        assert_eq!(atoms[0].count_or_default().unwrap(), 1);
        assert!(atoms.iter().all(|a| a.charge == 0));

        let atoms = extract_atoms("C12H22O11");
        let counts: Vec<u64> = atoms.iter().map(|a| a.count_or_default().unwrap()).collect();
        assert_eq!(counts, vec![12, 22, 11]);
    }

    #[test]
    fn test_extract_atoms_skips_leading_garbage() {
        let atoms = extract_atoms("2xH2");
        assert_eq!(atoms.len(), 1);
        assert_eq!(atoms[0].symbol, "H");
        assert_eq!(atoms[0].count_or_default().unwrap(), 2);
        assert!(extract_atoms("").is_empty());
        assert!(extract_atoms("123").is_empty());
    }

    #[test]
    fn test_tree_of_simple_group() {
        let tree = build_formula_tree("Fe2(SO4)3").unwrap();
        let nodes: Vec<&FormulaNode> = tree.iter().collect();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].kind, NodeKind::Leaf);
        assert_eq!(nodes[0].text, "Fe2");
        assert_eq!(nodes[1].kind, NodeKind::Stack);
        assert_eq!(nodes[1].text, "SO4");
        assert_eq!(nodes[1].subscript, "3");
        assert_eq!(nodes[1].state, OpenState::Closed);
        assert_eq!(nodes[1].parent, None);
    }

    #[test]
    fn test_tree_nested_groups_keep_parent_index() {
        let tree = build_formula_tree("K4(Fe(CN)6)").unwrap();
        // leaf K4, inner group closes before the outer one
        let texts: Vec<&str> = tree.iter().map(|n| n.text.as_str()).collect();
        assert_eq!(texts, vec!["K4", "CN", "Fe"]);
        let inner = tree.order[1];
        let outer = tree.order[2];
        assert_eq!(tree.nodes[inner].parent, Some(outer));
        assert_eq!(tree.nodes[outer].parent, None);
        assert_eq!(tree.cumulative_multiplier(inner).unwrap(), 6);
        assert_eq!(tree.cumulative_multiplier(outer).unwrap(), 1);
    }

    #[test]
    fn test_cumulative_multiplier_through_two_levels() {
        let tree = build_formula_tree("((CH3)2N)3").unwrap();
        let methyl = tree.order[0];
        assert_eq!(tree.nodes[methyl].text, "CH3");
        assert_eq!(tree.cumulative_multiplier(methyl).unwrap(), 6);
        let composition = aggregate_atoms(&tree).unwrap();
        assert_eq!(
            as_map(&composition),
            expected(&[("C", 6), ("H", 18), ("N", 3)])
        );
    }

    #[test]
    fn test_every_atom_outside_groups_is_a_leaf() {
        let tree = build_formula_tree("(NH4)2SO4").unwrap();
        let texts: Vec<&str> = tree.iter().map(|n| n.text.as_str()).collect();
        assert_eq!(texts, vec!["NH4", "S", "O4"]);
        let composition = aggregate_atoms(&tree).unwrap();
        assert_eq!(
            as_map(&composition),
            expected(&[("N", 2), ("H", 8), ("S", 1), ("O", 4)])
        );
    }

    #[test]
    fn test_parse_formula() {
        let composition = parse_formula("Fe2(SO4)3").unwrap();
        assert_eq!(as_map(&composition), expected(&[("Fe", 2), ("S", 3), ("O", 12)]));
        assert_eq!(composition.elements(), &["Fe", "S", "O"]);

        let composition = parse_formula("Ca(OH)2").unwrap();
        assert_eq!(as_map(&composition), expected(&[("Ca", 1), ("O", 2), ("H", 2)]));

        let composition = parse_formula("C6H8O6").unwrap();
        assert_eq!(as_map(&composition), expected(&[("C", 6), ("H", 8), ("O", 6)]));
        assert_eq!(composition.get("N"), 0);
    }

    #[test]
    fn test_sibling_groups_are_not_nested() {
        // (Si4O10) has no subscript and no enclosing group, (OH)8 is its sibling
        let composition = parse_formula("Mg6(Si4O10)(OH)8").unwrap();
        assert_eq!(
            as_map(&composition),
            expected(&[("Mg", 6), ("Si", 4), ("O", 18), ("H", 8)])
        );
    }

    #[test]
    fn test_grouping_does_not_change_totals() {
        let flat = parse_formula("C2H6").unwrap();
        let repeated = parse_formula("CH3CH3").unwrap();
        let grouped = parse_formula("(CH3)2").unwrap();
        let nested = parse_formula("((C)(H3))2").unwrap();
        assert_eq!(as_map(&flat), as_map(&repeated));
        assert_eq!(as_map(&flat), as_map(&grouped));
        assert_eq!(as_map(&flat), as_map(&nested));
    }

    #[test]
    fn test_unmatched_parenthesis() {
        assert!(matches!(
            parse_formula("Ca(OH2"),
            Err(BalanceError::UnmatchedParenthesis(_))
        ));
        assert!(matches!(
            parse_formula("CaOH)2"),
            Err(BalanceError::UnmatchedParenthesis(_))
        ));
        assert!(matches!(
            parse_formula("(OH))"),
            Err(BalanceError::UnmatchedParenthesis(_))
        ));
    }

    #[test]
    fn test_subscript_beyond_u64_is_an_overflow() {
        assert!(matches!(
            parse_formula("H99999999999999999999"),
            Err(BalanceError::Overflow)
        ));
        assert!(matches!(
            parse_formula("(OH)99999999999999999999"),
            Err(BalanceError::Overflow)
        ));
        // the largest u64 count is still accepted
        let composition = parse_formula("H18446744073709551615").unwrap();
        assert_eq!(composition.get("H"), u64::MAX);
    }

    #[test]
    fn test_empty_formula() {
        let composition = parse_formula("").unwrap();
        assert!(composition.is_empty());
    }
}

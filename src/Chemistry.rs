/// Parser of chemical formulae with nested parenthesized groups.
/// The formula is scanned once into an arena of nodes (one per group, one per bare run of atoms),
/// every node refers to its enclosing group by index, and the atoms of every node are multiplied by
/// the subscripts of all groups around it.
///
///  # Examples
/// ```
/// use ChemEqBalance::Chemistry::formula_parser::parse_formula;
/// let composition = parse_formula("Fe2(SO4)3").unwrap();
/// assert_eq!(composition.get("Fe"), 2);
/// assert_eq!(composition.get("S"), 3);
/// assert_eq!(composition.get("O"), 12);
/// ```
pub mod formula_parser;
/// Splitting of the equation text into reactants and products, parsing of every species and
/// the check that both sides contain the same elements.
pub mod equation;
/// Module to calculate the molar mass of a chemical formula
///
///  # Examples
/// ```
/// use ChemEqBalance::Chemistry::molmass::calculate_molar_mass;
/// let formula = "C6H8O6";
/// let (molar_mass, element_composition) = calculate_molar_mass(formula).unwrap();
/// println!("Element counts: {:?}", element_composition);
/// println!("Molar mass: {:?} g/mol", molar_mass);
/// ```
///
pub mod molmass;

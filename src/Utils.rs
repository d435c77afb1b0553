/// Text and table rendering of balanced equations
pub mod formatting;
/// Loading lists of equations from text files with section headers
pub mod load_from_file;

use crate::errors::BalanceError;
use log::{info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub struct LoadData {
    pub file_name: String,
}

impl LoadData {
    pub fn new(file_name: String) -> Self {
        LoadData { file_name }
    }
    pub fn load_equations(&self) -> Result<Vec<String>, BalanceError> {
        load_equations_from_file(&self.file_name)
    }
}

/// true for lines like `EQUATIONS` or `END_OF_DATA` that open a new section
fn is_header(line: &str) -> bool {
    !line.is_empty() && line.chars().all(|c| c.is_uppercase() || c == '_')
}

/// Parses a text document for equations under the "EQUATIONS" or "REACTIONS" header,
/// one equation per line, up to the next header or the end of the file.
/// Blank lines are skipped.
pub fn load_equations_from_file(file_name: &str) -> Result<Vec<String>, BalanceError> {
    let path = Path::new(file_name);
    if !path.exists() {
        return Err(BalanceError::FileFormat(format!(
            "File '{}' does not exist",
            file_name
        )));
    }
    let reader = BufReader::new(File::open(path)?);
    let lines = reader.lines().collect::<Result<Vec<String>, _>>()?;
    parse_equations_section(&lines).map_err(|msg| {
        BalanceError::FileFormat(format!("{} in file '{}'", msg, file_name))
    })
}

fn parse_equations_section(lines: &[String]) -> Result<Vec<String>, String> {
    // Find the EQUATIONS or REACTIONS header
    let start_index = lines
        .iter()
        .position(|line| {
            let trimmed = line.trim().to_uppercase();
            trimmed == "EQUATIONS" || trimmed == "REACTIONS"
        })
        .map(|i| i + 1)
        .ok_or_else(|| "No 'EQUATIONS' or 'REACTIONS' header found".to_string())?;

    // the section ends at the next header
    let end_index = lines[start_index..]
        .iter()
        .position(|line| is_header(line.trim()))
        .map_or(lines.len(), |i| start_index + i);

    let equations: Vec<String> = lines[start_index..end_index]
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(|line| line.to_string())
        .collect();
    if equations.is_empty() {
        warn!("equations section is empty");
    } else {
        info!("{} equations loaded", equations.len());
    }
    Ok(equations)
}

/// Main interactive menu
pub mod cli_main;
/// Menu of sample equations and worked examples
pub mod cli_examples;

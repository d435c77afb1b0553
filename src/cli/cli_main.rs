use super::cli_examples::examples_menu;
use crate::Stoichiometry::balancer::Balancer;
use crate::Utils::formatting::{format_balanced, print_result_table};
use crate::Utils::load_from_file::LoadData;
use crate::settings::Settings;
use log::error;
use std::io::{self, Write};

pub fn run_interactive_menu(settings: Settings) {
    let balancer = Balancer::new(settings);
    loop {
        show_main_menu();
        let Some(choice) = get_user_input() else {
            break;
        };

        match choice.trim() {
            "1" => balance_menu(&balancer),
            "2" => examples_menu(&balancer),
            "3" => matrix_menu(&balancer),
            "4" => file_menu(&balancer),
            "0" => {
                println!("Goodbye!");
                break;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }
}
/* colors
Blue (\x1b[34m) - Welcome header text

Yellow (\x1b[33m) - Menu options (1, 2, 3, 4, 0)

Cyan (\x1b[36m) - "Enter your choice:" prompt

Red (\x1b[31m) - error messages

Reset (\x1b[0m) - Returns to normal color after each colored section
*/
fn show_main_menu() {
    println!("\x1b[34m\n Chemical equation balancer \n \x1b[0m");
    println!("\x1b[33m1. Balance an equation\x1b[0m");
    println!("\x1b[33m2. Sample equations\x1b[0m");
    println!("\x1b[33m3. Show stoichiometric matrix\x1b[0m");
    println!("\x1b[33m4. Balance equations from file\x1b[0m");
    println!("\x1b[33m0. Exit\x1b[0m");
    prompt("Enter your choice: ");
}

pub(super) fn prompt(text: &str) {
    print!("\x1b[36m{}\x1b[0m", text);
    // a failed flush only delays the prompt
    let _ = io::stdout().flush();
}

/// Reads one line from stdin, `None` on end of input or a read error
pub(super) fn get_user_input() -> Option<String> {
    let mut input = String::new();
    match io::stdin().read_line(&mut input) {
        Ok(0) => None,
        Ok(_) => Some(input),
        Err(e) => {
            error!("Failed to read input: {}", e);
            None
        }
    }
}

/// Balances one equation and prints the result or the error message
pub fn print_balanced(balancer: &Balancer, equation: &str) {
    match balancer.balance(equation) {
        Ok(result) => {
            println!("{}", format_balanced(&result));
            print_result_table(&result);
        }
        Err(e) => println!("\x1b[31m{}\x1b[0m", e),
    }
}

fn balance_menu(balancer: &Balancer) {
    prompt("Enter equation (e.g. H2 + O2 = H2O): ");
    if let Some(equation) = get_user_input() {
        print_balanced(balancer, equation.trim());
    }
}

fn matrix_menu(balancer: &Balancer) {
    prompt("Enter equation: ");
    if let Some(equation) = get_user_input() {
        match balancer.build_matrix(equation.trim()) {
            Ok(system) => system.pretty_print(),
            Err(e) => println!("\x1b[31m{}\x1b[0m", e),
        }
    }
}

fn file_menu(balancer: &Balancer) {
    prompt("Enter file name: ");
    let Some(file_name) = get_user_input() else {
        return;
    };
    let loader = LoadData::new(file_name.trim().to_string());
    match loader.load_equations() {
        Ok(equations) => {
            for equation in equations {
                print_balanced(balancer, &equation);
            }
        }
        Err(e) => println!("\x1b[31m{}\x1b[0m", e),
    }
}

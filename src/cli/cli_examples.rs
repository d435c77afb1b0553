use super::cli_main::{get_user_input, print_balanced, prompt};
use crate::Examples::balance_examples::{SAMPLE_EQUATIONS, balance_examples, sample_equation};
use crate::Stoichiometry::balancer::Balancer;
use std::time::{SystemTime, UNIX_EPOCH};

/// seed for the random sample, taken from the clock
fn clock_seed() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.subsec_nanos() as usize)
        .unwrap_or(0)
}

pub fn examples_menu(balancer: &Balancer) {
    loop {
        println!("\n=== Sample equations ===");
        for (i, equation) in SAMPLE_EQUATIONS.iter().enumerate() {
            println!("{}. {}", i + 1, equation);
        }
        println!("r. Random sample");
        println!("a. All worked examples");
        println!("0. Back to main menu");
        prompt("Enter your choice: ");

        let Some(choice) = get_user_input() else {
            break;
        };
        match choice.trim() {
            "0" => break,
            "r" => {
                let equation = sample_equation(clock_seed());
                println!("{}", equation);
                print_balanced(balancer, equation);
            }
            "a" => (0..5).for_each(balance_examples),
            other => match other.parse::<usize>() {
                Ok(n) if (1..=SAMPLE_EQUATIONS.len()).contains(&n) => {
                    print_balanced(balancer, SAMPLE_EQUATIONS[n - 1])
                }
                _ => println!("Invalid choice. Please try again."),
            },
        }
    }
}

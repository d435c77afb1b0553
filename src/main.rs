use ChemEqBalance::Utils::formatting::format_balanced;
use ChemEqBalance::cli::cli_main::run_interactive_menu;
use ChemEqBalance::settings::{SETTINGS_FILE, Settings};
use ChemEqBalance::Balancer;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::process::ExitCode;

fn main() -> ExitCode {
    let settings = match Settings::load(SETTINGS_FILE) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}, using default settings", e);
            Settings::default()
        }
    };
    if let Err(e) = TermLogger::init(
        settings.level_filter(),
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ) {
        eprintln!("logger not initialized: {}", e);
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        run_interactive_menu(settings);
        return ExitCode::SUCCESS;
    }
    // `ChemEqBalance H2 + O2 = H2O` arrives split on spaces
    let equation = args.join(" ");
    match Balancer::new(settings).balance(&equation) {
        Ok(result) => {
            println!("{}", format_balanced(&result));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

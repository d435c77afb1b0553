#[allow(non_snake_case)]
pub mod Chemistry;
#[allow(non_snake_case)]
pub mod Examples;
#[allow(non_snake_case)]
pub mod Stoichiometry;
#[allow(non_snake_case)]
pub mod Utils;
pub mod cli;
pub mod errors;
pub mod settings;

pub use Stoichiometry::balancer::{BalanceOutcome, BalanceResult, Balancer, balance};
pub use errors::BalanceError;
pub use settings::Settings;

/// Sample equations and worked examples of the balancer
pub mod balance_examples;

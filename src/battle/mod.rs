pub mod ai;
pub mod calculators;
pub mod catch;
pub mod engine;
pub mod escape;
pub mod state;
pub mod stats;
pub mod turn_order;

#[cfg(test)]
mod tests;

pub mod core;
pub mod main;
pub mod panel;
pub mod render;
pub mod run_effect;
pub mod ticket;

#[cfg(test)]
mod tests;

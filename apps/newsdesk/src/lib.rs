pub mod config;
pub mod context;
pub mod controller;
pub mod ui;

#[cfg(test)]
mod test_support;

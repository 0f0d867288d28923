pub mod battle;
pub mod catalog;
pub mod constants;
pub mod content;
pub mod error;
pub mod mapgen;
pub mod rng;
pub mod types;

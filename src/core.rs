//! Puzzle representation, search, generation, and the commands built on
//! them.

pub mod commands;
pub mod error;
pub mod generator;
pub mod models;
pub mod solver;

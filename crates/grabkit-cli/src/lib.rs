//! Command-line front ends for grabkit.

pub mod cli;

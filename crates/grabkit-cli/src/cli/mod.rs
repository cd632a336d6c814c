//! CLI for the grabkit tools: `grab` (download command builder) and `subs`
//! (newsboat subscription lister).

pub mod grab;
pub mod subs;

#[cfg(test)]
mod tests;

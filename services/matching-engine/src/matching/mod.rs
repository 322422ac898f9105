//! Matching logic: crossing predicates and ladder walkers

pub mod crossing;
mod walkers;

pub(crate) use walkers::{cross_ask, cross_bid};

//! Flight search server.
//!
//! Loads a flight dataset into an in-memory indexed catalog and answers
//! "how do I get from A to B on this date": direct flights, one-stop
//! connections, ranked by cost, time or a blend of both.

pub mod catalog;
pub mod config;
pub mod domain;
pub mod planner;
pub mod web;

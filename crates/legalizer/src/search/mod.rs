//! Search driver: depth-first branch-and-bound with a stall budget.
//!
//! Purpose
//! - Pop sub-problems from a LIFO stack, prune by the incumbent cost and by
//!   feasibility, record legal sub-problems as incumbents, and push the
//!   children of the rest so the cheapest child is explored first.
//! - Stop when the stack is empty (the incumbent is then optimal) or when no
//!   improvement happened within the stall budget. The clock is read only
//!   every `poll_interval` pops.
//!
//! Why this design
//! - Sub-problems are values, so the stack owns them outright and nothing is
//!   shared between siblings.
//! - The outcome is data (`Outcome`), never an error: running out of budget
//!   is a normal way to finish.

mod driver;
mod types;

pub use driver::solve;
pub use types::{Improvement, Outcome, SearchCfg, SearchReport, SearchStats};

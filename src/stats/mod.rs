// SPDX-License-Identifier: MIT
pub mod aggregate;
pub mod statistics;

pub use aggregate::{AggregateRun, aggregate};
pub use statistics::{RunStatistics, compute_statistics};

// SPDX-License-Identifier: MIT
pub mod format;
pub mod reader;
pub mod source;
pub mod store;
pub mod writer;

pub use source::{DirectorySource, ResultSource};
pub use store::{
    BenchmarkResultStore, ResultSet, RunSelector, Selected, Selection, SeriesStats,
    SeriesToRender, SkippedFile,
};

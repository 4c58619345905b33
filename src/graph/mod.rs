// SPDX-License-Identifier: MIT
pub mod projector;
pub mod render;

pub use projector::{PlotRect, Point};
pub use render::{DrawCommand, GraphOptions, LineKind, ValueRange, render};

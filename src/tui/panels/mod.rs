// SPDX-License-Identifier: MIT
pub mod graph;
pub mod header;
pub mod info;
pub mod summary;

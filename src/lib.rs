#![forbid(unsafe_code)]
//! ProjectMap: scan a directory subtree, mark folders as collapsed, and save a
//! deterministic ASCII-art listing of it.

pub mod browser;
pub mod cli;
pub mod error;
pub mod event_loop;
pub mod output;
pub mod render;
pub mod terminal;
pub mod tree;

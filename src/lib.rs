// Library root
// -----------
// The binary (`main.rs`) is a thin wrapper around these modules, which
// keeps everything below the argument parser testable without a terminal.
//
// Module responsibilities:
// - `config`: the YAML config file (token, workspace, aliases).
// - `model`: typed records decoded from API payloads, and request bodies.
// - `api`: blocking HTTP client and status-code mapping.
// - `alias`: `@name` resolution and alias table edits.
// - `parse`: time estimates, due dates and ids typed by the user.
// - `output` / `render`: output sink and table/detail formatting.
// - `ui`: interactive prompts and spinners.
// - `cli` / `commands`: clap definitions and command handlers.
pub mod alias;
pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod parse;
pub mod render;
pub mod ui;

pub use error::{Error, Result};

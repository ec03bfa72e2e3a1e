//! # ballotcount-cli
//!
//! CLI output, result presentation, generation spinner, and shell completion.

pub mod completion;
pub mod json;
pub mod output;
pub mod presenter;
pub mod spinner;
pub mod ui;

pub use json::JsonPresenter;
pub use presenter::CLIResultPresenter;

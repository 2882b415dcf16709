//! Shared helpers for the term-inspect demos.

use term_inspect::error::Result;
use term_inspect::logging::setup::{init_logging, LoggingConfig};
use tracing::Level;

const RULE_WIDTH: usize = 80;

/// Installs quiet logging; set `RUST_LOG=term_inspect=debug` to see sampling.
pub fn init_demo_logging() -> Result<()> {
    init_logging(&LoggingConfig::default().with_inspect_level(Level::WARN))
}

/// Prints a ruled title.
pub fn print_banner(title: &str) {
    let rule = "=".repeat(RULE_WIDTH);
    println!("{rule}");
    println!("{title}");
    println!("{rule}");
}

/// Prints a step heading.
pub fn print_step(heading: &str) {
    println!("\n{heading}");
}

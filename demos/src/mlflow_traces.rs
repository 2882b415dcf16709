//! Example: inspecting model-serving traces with nested request/response payloads.
//!
//! The response payloads are heterogeneous: `metadata.sources` is a list of
//! document names in one trace and a list of database records in the others.
//! The schemaless JSON table keeps both shapes, and key discovery reports their
//! union.

use std::error::Error;
use std::io;

use term_inspect::prelude::*;
use term_inspect::reporters::{print_column, print_overview};
use term_inspect::test_fixtures::trace_table_json;
use term_inspect_demos::{init_demo_logging, print_banner, print_step};

fn main() -> std::result::Result<(), Box<dyn Error>> {
    init_demo_logging()?;

    let traces = trace_table_json();
    let mut out = io::stdout();

    print_banner("Model Trace Inspection Example");

    print_step("📋 Step 1: Get an overview of the table");
    print_overview(&traces, &InspectConfig::default(), &mut out)?;

    print_step("🔍 Step 2: Deep dive into the 'request' column");
    let request = InspectConfig::default().with_discovery(DiscoveryConfig::new(2, 3));
    print_column(&traces, "request", &request, &mut out)?;

    print_step("🔍 Step 3: Deep dive into the 'response' column");
    let response = InspectConfig::default().with_discovery(DiscoveryConfig::new(2, 4));
    print_column(&traces, "response", &response, &mut out)?;

    print_step("🔍 Step 4: Ask for a column that does not exist");
    print_column(&traces, "feedback", &InspectConfig::default(), &mut out)?;

    println!();
    print_banner("Example complete!");
    Ok(())
}

//! Combine command implementation

use anyhow::{Context, Result};
use sp_test::combine_tests;

use crate::cli::{CombineArgs, GlobalArgs};
use crate::commands::common::verbose;

/// Execute the combine command
pub fn execute(args: &CombineArgs, global: &GlobalArgs) -> Result<()> {
    let count = combine_tests(&args.input, &args.out).with_context(|| {
        format!(
            "Failed to combine {} into {}",
            args.input.display(),
            args.out.display()
        )
    })?;
    verbose(global, format!("Combined {} test(s)", count));

    println!("combined: {}", args.out.display());
    Ok(())
}

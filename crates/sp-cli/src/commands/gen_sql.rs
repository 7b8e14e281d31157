//! Gen-sql command implementation

use anyhow::{Context, Result};
use sp_test::{combine_tests, generate_fixtures, GenerateOptions};

use crate::cli::{GenSqlArgs, GlobalArgs};
use crate::commands::common::verbose;

/// Execute the gen-sql command
pub fn execute(args: &GenSqlArgs, global: &GlobalArgs) -> Result<()> {
    let options = GenerateOptions {
        src_dir: args.src.clone(),
        out_dir: args.out.clone(),
        expected_dir: args.expected.clone(),
        overwrite: args.overwrite,
        auto_expected: args.auto_expected,
    };

    let report = generate_fixtures(&options)
        .with_context(|| format!("Failed to generate tests from {}", args.src.display()))?;
    verbose(
        global,
        format!("Found {} template(s) under {}", report.templates, args.src.display()),
    );

    for path in &report.generated {
        println!("generated: {}", path.display());
    }
    for path in &report.skipped {
        println!("skip (exists): {}", path.display());
    }

    match &args.combine {
        Some(out) => {
            let count = combine_tests(&args.out, out)
                .with_context(|| format!("Failed to combine into {}", out.display()))?;
            verbose(global, format!("Combined {} test(s)", count));
            println!("combined: {}", out.display());
            println!(
                "Done. You can now run:\n  sqlproof run --config {}",
                out.display()
            );
        }
        None => {
            println!(
                "Done. Combine and run with:\n  sqlproof combine --in {0} --out {0}/test.json\n  sqlproof run --config {0}/test.json",
                args.out.display()
            );
        }
    }

    Ok(())
}

//! Plain text output for `--print`.

use std::io::{self, Write};

use rrg_metrics::BatchOutput;

/// Write the newest point of every trail as a table.
pub fn write_report<W: Write>(
    out: &mut W,
    benchmark: &str,
    output: &BatchOutput,
) -> io::Result<()> {
    writeln!(out, "Benchmark: {}   Base date: {}", benchmark, output.base_date)?;
    writeln!(
        out,
        "{:<12} {:<16} {:<10} {:>9} {:>11}  {}",
        "Symbol", "Label", "Date", "RS-Ratio", "RS-Momentum", "Quadrant"
    )?;

    for trail in &output.trails {
        let Some(head) = trail.head() else { continue };
        writeln!(
            out,
            "{:<12} {:<16} {:<10} {:>9.2} {:>11.2}  {}",
            trail.symbol,
            trail.label,
            head.date,
            head.rs_ratio,
            head.rs_momentum,
            head.quadrant().label()
        )?;
    }

    for failure in &output.failures {
        writeln!(out, "{:<12} skipped: {}", failure.symbol, failure.error)?;
    }
    Ok(())
}

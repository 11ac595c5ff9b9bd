pub mod combine;
pub mod config;
pub mod extend;

use anyhow::Result;
use std::io::Write;

/// Print to stdout, treating a closed pipe as a normal end of output
pub(crate) fn print_output(output: &str) -> Result<()> {
    let mut stdout = std::io::stdout();
    if let Err(e) = writeln!(stdout, "{}", output) {
        if e.kind() != std::io::ErrorKind::BrokenPipe {
            return Err(e.into());
        }
    }
    Ok(())
}

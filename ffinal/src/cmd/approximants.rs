use std::io::{stdout, Write};

use libffinal::approximant::known_approximants;

/// Prints every approximant name with its domain, one per line.
pub fn run() -> eyre::Result<()> {
    let mut out = stdout().lock();
    for (name, domain) in known_approximants() {
        writeln!(out, "{name}\t{domain}")?;
    }
    Ok(())
}

//! Console progress output
//!
//! Prints one line per engine milestone: the power-of-two digit count that
//! has converged and the time taken so far.

use std::io::Write;
use superpi_engine::{Milestone, ProgressObserver};
use tracing::{debug, warn};

/// Writes milestone lines to `out` unless quiet.
pub struct ConsoleProgress<W: Write> {
    out: W,
    quiet: bool,
}

impl<W: Write> ConsoleProgress<W> {
    pub fn new(out: W, quiet: bool) -> Self {
        ConsoleProgress { out, quiet }
    }
}

impl<W: Write> ProgressObserver for ConsoleProgress<W> {
    fn on_milestone(&mut self, milestone: &Milestone) {
        debug!(
            digits = milestone.digits,
            iteration = milestone.iteration,
            elapsed_ms = milestone.elapsed.as_millis() as u64,
            "milestone"
        );
        if self.quiet {
            return;
        }
        let written = writeln!(
            self.out,
            "  {:>10} digits  {:>9.3}s  (iteration {})",
            milestone.digits,
            milestone.elapsed.as_secs_f64(),
            milestone.iteration
        )
        .and_then(|_| self.out.flush());
        if let Err(e) = written {
            // Progress is advisory; the computation carries on
            warn!("failed to print progress: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn milestone() -> Milestone {
        Milestone {
            digits: 1024,
            iteration: 7,
            elapsed: Duration::from_millis(1500),
        }
    }

    #[test]
    fn test_prints_milestone() {
        let mut out: Vec<u8> = Vec::new();
        ConsoleProgress::new(&mut out, false).on_milestone(&milestone());
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "        1024 digits      1.500s  (iteration 7)\n");
    }

    #[test]
    fn test_quiet_prints_nothing() {
        let mut out: Vec<u8> = Vec::new();
        ConsoleProgress::new(&mut out, true).on_milestone(&milestone());
        assert!(out.is_empty());
    }
}

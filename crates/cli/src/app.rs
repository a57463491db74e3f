//! Running computations
//!
//! Glue between the configuration, the engine and the outputs. Everything
//! user-facing goes to the writer the app was created with (stdout in the
//! binary), so runs can be captured in tests.

use crate::config::SuperPiConfig;
use crate::continuous::{self, CancelToken, RoundOutcome, Summary};
use crate::error::CliError;
use crate::output;
use crate::progress::ConsoleProgress;
use crate::report::{ReportFormat, RunReport};
use chrono::NaiveDate;
use std::io::Write;
use std::time::Instant;
use superpi_engine::{DigitString, PiEngine};

/// Today's date in local time, for result file trailers
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub struct App<W: Write> {
    config: SuperPiConfig,
    quiet: bool,
    out: W,
}

impl<W: Write> App<W> {
    pub fn new(config: SuperPiConfig, quiet: bool, out: W) -> Self {
        App { config, quiet, out }
    }

    pub fn config(&self) -> &SuperPiConfig {
        &self.config
    }

    /// Compute `digits` digits once, save them and emit the report.
    ///
    /// Invalid digit counts fail before anything is printed or computed.
    pub fn run_single(&mut self, digits: u64) -> Result<RunReport, CliError> {
        let plan = superpi_engine::plan(digits)?;
        // JSON output stays machine readable: no banner, no progress
        let chatty = self.config.report == ReportFormat::Human;

        if chatty {
            writeln!(self.out, "SuperPi - computing pi to {} digits...", digits)?;
        }

        let start = Instant::now();
        let computation = {
            let mut progress = ConsoleProgress::new(&mut self.out, self.quiet || !chatty);
            PiEngine::new(plan).run(&mut progress)?
        };
        let elapsed = start.elapsed();

        let mut report = RunReport::new(
            digits,
            computation.iterations,
            computation.precision_bits,
            elapsed,
        );
        if self.config.save {
            let path = output::write_result(
                &self.config.output_dir,
                &self.config.file_prefix,
                &computation.digits,
                today(),
            )?;
            report = report.with_file(path);
        }

        report.emit(self.config.report, &mut self.out)?;
        Ok(report)
    }

    /// Run continuous mode until the schedule ends or `token` is cancelled.
    ///
    /// Returns an error if any round disagreed with the one before it.
    pub fn run_continuous(&mut self, token: &CancelToken) -> Result<Summary, CliError> {
        let App { config, out, .. } = self;
        let settings = config.continuous;

        writeln!(
            out,
            "SuperPi - continuous mode from {} digits (Ctrl-C stops after the current round)",
            settings.start_digits
        )?;

        let summary = continuous::run(
            &settings,
            token,
            superpi_engine::compute,
            |outcome: &RoundOutcome, digits: &DigitString| {
                let status = if outcome.consistent { "ok" } else { "MISMATCH" };
                write!(
                    out,
                    "Round {}: {} digits in {:.2}s [{}]",
                    outcome.round,
                    outcome.digits,
                    outcome.elapsed.as_secs_f64(),
                    status
                )?;
                if config.save {
                    let path =
                        output::write_result(&config.output_dir, &config.file_prefix, digits, today())?;
                    write!(out, " -> {}", path.display())?;
                }
                writeln!(out)?;
                Ok(())
            },
        )?;

        writeln!(
            out,
            "Stopped after {} round(s){}, {} mismatch(es)",
            summary.rounds,
            if summary.cancelled { " on interrupt" } else { "" },
            summary.mismatches
        )?;
        summary.into_result()
    }
}

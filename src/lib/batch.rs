//! Evaluation of many candidate strings against one automaton.

use std::fmt::Display;

use colored::Colorize;
use rayon::prelude::*;
use serde::Serialize;

use crate::{
    automaton::{Language, Verdict},
    config::BatchConfig,
};

/// The verdict for one non-blank input line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BatchRecord {
    /// 1-based position among the non-blank lines.
    pub index: usize,
    pub text: String,
    pub verdict: Verdict,
}

impl Display for BatchRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let verdict = match &self.verdict {
            Verdict::Accepted => self.verdict.to_string().bright_green(),
            Verdict::Rejected => self.verdict.to_string().bright_red(),
            Verdict::Malformed(_) => self.verdict.to_string().yellow(),
        };
        write!(f, "{:>4}  {:<30}  {}", self.index, self.text, verdict)?;
        if let Some(fault) = self.verdict.fault() {
            write!(f, " ({})", fault)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub malformed: usize,
}

impl BatchSummary {
    pub fn from_records(records: &[BatchRecord]) -> Self {
        let mut summary = BatchSummary {
            total: records.len(),
            ..Default::default()
        };

        for record in records {
            match record.verdict {
                Verdict::Accepted => summary.accepted += 1,
                Verdict::Rejected => summary.rejected += 1,
                Verdict::Malformed(_) => summary.malformed += 1,
            }
        }

        summary
    }
}

impl Display for BatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} lines: {} accepted, {} rejected, {} malformed",
            self.total, self.accepted, self.rejected, self.malformed
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub records: Vec<BatchRecord>,
    pub summary: BatchSummary,
}

/// Applies one automaton to many lines. Holds no state between runs, so
/// running the same lines twice yields the same report.
pub struct BatchValidator<'a, L: Language + Sync + ?Sized> {
    language: &'a L,
    config: BatchConfig,
}

impl<'a, L: Language + Sync + ?Sized> BatchValidator<'a, L> {
    pub fn new(language: &'a L, config: BatchConfig) -> Self {
        BatchValidator { language, config }
    }

    /// Trims every line, drops the blank ones and numbers the rest from 1 in
    /// input order. Each line is evaluated on its own; no verdict can abort
    /// the batch.
    pub fn run<S: AsRef<str>>(&self, lines: &[S]) -> Vec<BatchRecord> {
        let lines: Vec<&str> = lines
            .iter()
            .map(|line| line.as_ref().trim())
            .filter(|line| !line.is_empty())
            .collect();

        let evaluate = |(i, text): (usize, &&str)| {
            let verdict = self.language.evaluate(text);
            if let Verdict::Malformed(fault) = &verdict {
                tracing::warn!("Line {} ({:?}) is malformed: {}", i + 1, text, fault);
            }
            BatchRecord {
                index: i + 1,
                text: text.to_string(),
                verdict,
            }
        };

        if self.config.use_parallel(lines.len()) {
            tracing::debug!("Validating {} lines in parallel", lines.len());
            // indexed parallel iterators keep input order when collecting
            lines.par_iter().enumerate().map(evaluate).collect()
        } else {
            lines.iter().enumerate().map(evaluate).collect()
        }
    }

    pub fn report<S: AsRef<str>>(&self, lines: &[S]) -> BatchReport {
        let records = self.run(lines);
        let summary = BatchSummary::from_records(&records);

        tracing::info!("Batch finished: {}", summary);

        BatchReport { records, summary }
    }
}

/// Shorthand for a sequential run with the default configuration.
pub fn run<L: Language + Sync + ?Sized, S: AsRef<str>>(
    language: &L,
    lines: &[S],
) -> Vec<BatchRecord> {
    BatchValidator::new(language, BatchConfig::sequential()).run(lines)
}

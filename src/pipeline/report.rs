use serde::Serialize;
use std::fmt;

#[cfg(feature = "colorized_output")]
use console::style;

use crate::classify::Propagation;

/// What happened to one acquisition
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Pair found, E-file parsed and assignments derived
    Classified(Propagation),
    /// No unclassified pair, or an ambiguous pair skipped by policy
    Skipped,
    /// Pairing, reading, parsing or classification failed
    Failed {
        /// Error message
        reason: String,
    },
}

/// Outcome of one acquisition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AcquisitionReport {
    /// Acquisition identifier
    pub acquisition_id: String,
    /// Outcome
    pub outcome: Outcome,
}

/// Outcomes of a classification run, in input order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClassificationReport {
    /// One entry per acquisition
    pub acquisitions: Vec<AcquisitionReport>,
}

impl ClassificationReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an acquisition outcome
    pub fn add(&mut self, acquisition_id: impl Into<String>, outcome: Outcome) {
        self.acquisitions.push(AcquisitionReport {
            acquisition_id: acquisition_id.into(),
            outcome,
        });
    }

    /// Derived assignments of every classified acquisition
    pub fn propagations(&self) -> impl Iterator<Item = &Propagation> {
        self.acquisitions.iter().filter_map(|entry| match &entry.outcome {
            Outcome::Classified(propagation) => Some(propagation),
            _ => None,
        })
    }

    /// Check if any acquisition failed
    pub fn has_failures(&self) -> bool {
        self.failure_count() > 0
    }

    /// Count the classified acquisitions
    pub fn classified_count(&self) -> usize {
        self.propagations().count()
    }

    /// Count the skipped acquisitions
    pub fn skipped_count(&self) -> usize {
        self.acquisitions
            .iter()
            .filter(|entry| matches!(entry.outcome, Outcome::Skipped))
            .count()
    }

    /// Count the failed acquisitions
    pub fn failure_count(&self) -> usize {
        self.acquisitions
            .iter()
            .filter(|entry| matches!(entry.outcome, Outcome::Failed { .. }))
            .count()
    }

    /// Format the report with colors (requires console feature)
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            use console::Emoji;

            static OK: Emoji<'_, '_> = Emoji("✓", "[OK]");
            static SKIP: Emoji<'_, '_> = Emoji("-", "[SKIP]");
            static FAIL: Emoji<'_, '_> = Emoji("✗", "[FAIL]");

            let mut output = String::new();

            output.push_str(&format!("{}\n", style("P-file Classification Report").bold().cyan()));
            output.push_str(&format!("{}\n\n", style("============================").cyan()));

            for entry in &self.acquisitions {
                match &entry.outcome {
                    Outcome::Classified(propagation) => {
                        output.push_str(&format!(
                            "[{}] {} - {} ({} files labeled)\n",
                            OK,
                            style(&entry.acquisition_id).green(),
                            style(&propagation.measurement).bold(),
                            propagation.labels.len()
                        ));
                    }
                    Outcome::Skipped => {
                        output.push_str(&format!(
                            "[{}] {}\n",
                            SKIP,
                            style(&entry.acquisition_id).dim()
                        ));
                    }
                    Outcome::Failed { reason } => {
                        output.push_str(&format!(
                            "[{}] {} - {}: {}\n",
                            FAIL,
                            style(&entry.acquisition_id).red(),
                            style("FAILED").red().bold(),
                            reason
                        ));
                    }
                }
            }

            output.push('\n');
            output.push_str(&format!(
                "{}: {} classified, {} skipped, {} failed\n",
                style("Summary").bold(),
                style(self.classified_count()).green(),
                style(self.skipped_count()).dim(),
                style(self.failure_count()).red()
            ));

            output
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            format!("{}", self)
        }
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "P-file Classification Report")?;
        writeln!(f, "============================")?;
        writeln!(f)?;

        for entry in &self.acquisitions {
            match &entry.outcome {
                Outcome::Classified(propagation) => writeln!(
                    f,
                    "[✓] {} - {} ({} files labeled)",
                    entry.acquisition_id,
                    propagation.measurement,
                    propagation.labels.len()
                )?,
                Outcome::Skipped => writeln!(f, "[-] {}", entry.acquisition_id)?,
                Outcome::Failed { reason } => {
                    writeln!(f, "[✗] {} - FAILED: {}", entry.acquisition_id, reason)?
                }
            }
        }

        writeln!(f)?;
        writeln!(
            f,
            "Summary: {} classified, {} skipped, {} failed",
            self.classified_count(),
            self.skipped_count(),
            self.failure_count()
        )
    }
}

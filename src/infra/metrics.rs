// ============================================================
// Layer 6 - Metrics Logger
// ============================================================
// Writes the per-epoch training history of a fit to a CSV file
// in the model directory.
//
// Output file: <model_dir>/<mode>/metrics.csv
//
// Example CSV output:
//   epoch,train_loss,val_loss
//   1,1.098612,1.071530
//   2,1.032470,1.040118
//   ...
//
// Loss is cross-entropy for the classifier and mean squared error
// for the regressor. If val_loss climbs while train_loss keeps
// falling the estimator is overfitting the corpus.
//
// Reference: Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

/// One row of metrics data for a single training epoch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochMetrics {
    /// The epoch number (starts at 1)
    pub epoch: usize,

    /// Mean loss over all training batches
    pub train_loss: f64,

    /// Mean loss over the validation batches
    pub val_loss: f64,
}

impl EpochMetrics {
    pub fn new(epoch: usize, train_loss: f64, val_loss: f64) -> Self {
        Self { epoch, train_loss, val_loss }
    }

    /// Returns true if this epoch improved over the previous best val_loss
    pub fn is_improvement(&self, best_val_loss: f64) -> bool {
        self.val_loss < best_val_loss
    }
}

/// Epoch with the lowest validation loss, if any.
pub fn best_epoch(history: &[EpochMetrics]) -> Option<&EpochMetrics> {
    let mut best: Option<&EpochMetrics> = None;
    for m in history {
        match best {
            Some(b) if !m.is_improvement(b.val_loss) => {}
            _ => best = Some(m),
        }
    }
    best
}

pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create the logger, truncating any earlier metrics.csv in `dir`.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)
            .with_context(|| format!("Cannot create metrics directory '{}'", dir.display()))?;

        let csv_path = dir.join("metrics.csv");
        let mut f = fs::File::create(&csv_path)
            .with_context(|| format!("Cannot create '{}'", csv_path.display()))?;
        writeln!(f, "epoch,train_loss,val_loss")?;
        tracing::debug!("Created metrics CSV: '{}'", csv_path.display());

        Ok(Self { csv_path })
    }

    /// Append one epoch's metrics as a new row in the CSV.
    pub fn log(&self, m: &EpochMetrics) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)?;

        writeln!(f, "{},{:.6},{:.6}", m.epoch, m.train_loss, m.val_loss)?;
        Ok(())
    }

    pub fn log_all(&self, history: &[EpochMetrics]) -> Result<()> {
        for m in history {
            self.log(m)?;
        }
        tracing::debug!("Logged {} epochs to '{}'", history.len(), self.csv_path.display());
        Ok(())
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}

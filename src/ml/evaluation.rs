// ============================================================
// Layer 5 - Evaluation
// ============================================================
// Scores predictions against held-out labels.
//
//   Classification → accuracy, confusion matrix, per-label
//                    precision and recall
//   Regression     → mean absolute error against the label
//                    read as a number (-1, 0, 1)

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::labeled_example::Sentiment;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelScores {
    pub label:     Sentiment,
    pub precision: f64,
    pub recall:    f64,
    pub support:   usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Evaluation {
    Classification {
        count:     usize,
        accuracy:  f64,
        /// confusion[actual][predicted], indexed by Sentiment::class_index
        confusion: [[usize; 3]; 3],
        per_label: Vec<LabelScores>,
    },
    Regression {
        count: usize,
        mae:   f64,
    },
}

impl Evaluation {
    /// Headline metric: accuracy or MAE
    pub fn metric(&self) -> f64 {
        match self {
            Evaluation::Classification { accuracy, .. } => *accuracy,
            Evaluation::Regression { mae, .. }          => *mae,
        }
    }

    pub fn metric_name(&self) -> &'static str {
        match self {
            Evaluation::Classification { .. } => "accuracy",
            Evaluation::Regression { .. }     => "mae",
        }
    }

    pub fn count(&self) -> usize {
        match self {
            Evaluation::Classification { count, .. } | Evaluation::Regression { count, .. } => *count,
        }
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={:.4} over {} examples", self.metric_name(), self.metric(), self.count())?;
        if let Evaluation::Classification { confusion, per_label, .. } = self {
            writeln!(f)?;
            writeln!(f, "{:>10} | {:>6} {:>6} {:>6}", "actual", "-1", "0", "1")?;
            for label in Sentiment::ALL {
                let row = confusion[label.class_index()];
                writeln!(f, "{:>10} | {:>6} {:>6} {:>6}", label.value(), row[0], row[1], row[2])?;
            }
            for s in per_label {
                writeln!(
                    f,
                    "{:>10} : precision={:.4} recall={:.4} support={}",
                    s.label.label_word(), s.precision, s.recall, s.support
                )?;
            }
        }
        Ok(())
    }
}

/// Compare predicted labels with actual ones, position by position.
pub fn classification_report(predicted: &[Sentiment], actual: &[Sentiment]) -> Evaluation {
    let mut confusion = [[0usize; 3]; 3];
    for (p, a) in predicted.iter().zip(actual) {
        confusion[a.class_index()][p.class_index()] += 1;
    }

    let count   = predicted.len().min(actual.len());
    let correct = (0..3).map(|i| confusion[i][i]).sum::<usize>();

    let per_label = Sentiment::ALL
        .iter()
        .map(|&label| {
            let i         = label.class_index();
            let hits      = confusion[i][i];
            let predicted = (0..3).map(|r| confusion[r][i]).sum::<usize>();
            let support   = confusion[i].iter().sum::<usize>();
            LabelScores {
                label,
                precision: ratio(hits, predicted),
                recall:    ratio(hits, support),
                support,
            }
        })
        .collect();

    Evaluation::Classification {
        count,
        accuracy: ratio(correct, count),
        confusion,
        per_label,
    }
}

/// Mean absolute distance between scores and numeric labels.
pub fn regression_report(scores: &[f32], actual: &[Sentiment]) -> Evaluation {
    let count = scores.len().min(actual.len());
    let total: f64 = scores
        .iter()
        .zip(actual)
        .map(|(s, a)| (f64::from(*s) - f64::from(a.value())).abs())
        .sum();

    Evaluation::Regression {
        count,
        mae: if count == 0 { 0.0 } else { total / count as f64 },
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}

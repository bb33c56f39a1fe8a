// ============================================================
// Layer 1 - CLI Commands and Arguments
// ============================================================
// Defines the four subcommands and their flags:
//   train    - fit models on the corpus and save them
//   evaluate - score saved models on a labeled file
//   segment  - print the paragraphs of a report
//   run      - score every paragraph of a report
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand, ValueEnum};

use crate::application::{
    evaluate_use_case::EvaluateConfig,
    run_use_case::RunConfig,
    train_use_case::{ModeSelection, TrainConfig},
};
use crate::ml::pipeline::PipelineConfig;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fit sentiment models on a labeled phrase corpus
    Train(TrainArgs),

    /// Evaluate saved models on a labeled corpus file
    Evaluate(EvaluateArgs),

    /// Split a report into addressed paragraphs
    Segment(SegmentArgs),

    /// Score every paragraph of a report
    Run(RunArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ModeArg {
    Classification,
    Regression,
    Both,
}

impl From<ModeArg> for ModeSelection {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::Classification => ModeSelection::Classification,
            ModeArg::Regression     => ModeSelection::Regression,
            ModeArg::Both           => ModeSelection::Both,
        }
    }
}

/// Hyperparameters shared by every command that fits a model.
#[derive(Args, Debug, Clone)]
pub struct PipelineArgs {
    /// Share of the corpus used for training; the rest validates
    #[arg(long, default_value_t = 0.7)]
    pub train_fraction: f64,

    /// Seed for the split and batch shuffling
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Number of full passes through the training split
    #[arg(long, default_value_t = 30)]
    pub epochs: usize,

    #[arg(long, default_value_t = 64)]
    pub batch_size: usize,

    /// Adam step size
    #[arg(long, default_value_t = 0.05)]
    pub lr: f64,

    /// Longest n-gram in the vocabulary (1 = unigrams)
    #[arg(long, default_value_t = 1)]
    pub ngram_max: usize,
}

impl From<PipelineArgs> for PipelineConfig {
    fn from(a: PipelineArgs) -> Self {
        PipelineConfig {
            train_fraction: a.train_fraction,
            seed:           a.seed,
            epochs:         a.epochs,
            batch_size:     a.batch_size,
            learning_rate:  a.lr,
            ngram_max:      a.ngram_max,
        }
    }
}

#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Corpus file, one `sentence@label` per line
    #[arg(long, default_value = "data/Sentences_AllAgree.txt")]
    pub corpus: String,

    /// Directory to save the fitted models in
    #[arg(long, default_value = "models")]
    pub model_dir: String,

    #[arg(long, value_enum, default_value_t = ModeArg::Both)]
    pub mode: ModeArg,

    #[command(flatten)]
    pub pipeline: PipelineArgs,
}

impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            corpus_path: a.corpus,
            model_dir:   a.model_dir,
            modes:       a.mode.into(),
            pipeline:    a.pipeline.into(),
        }
    }
}

#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Held-out corpus file in the training format
    #[arg(long)]
    pub corpus: String,

    #[arg(long, default_value = "models")]
    pub model_dir: String,

    #[arg(long, value_enum, default_value_t = ModeArg::Both)]
    pub mode: ModeArg,
}

impl From<EvaluateArgs> for EvaluateConfig {
    fn from(a: EvaluateArgs) -> Self {
        EvaluateConfig {
            corpus_path: a.corpus,
            model_dir:   a.model_dir,
            modes:       a.mode.into(),
        }
    }
}

#[derive(Args, Debug)]
pub struct SegmentArgs {
    /// Report to split (.pdf, or text with form-feed page breaks)
    #[arg(long)]
    pub document: String,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Report to score (.pdf, or text with form-feed page breaks)
    #[arg(long)]
    pub document: String,

    /// Fit fresh models on this corpus
    #[arg(long, required_unless_present = "model_dir")]
    pub corpus: Option<String>,

    /// Use models saved by `train` instead of fitting
    #[arg(long)]
    pub model_dir: Option<String>,

    /// Write the CSV report here instead of stdout
    #[arg(long)]
    pub output: Option<String>,

    #[command(flatten)]
    pub pipeline: PipelineArgs,
}

impl From<RunArgs> for RunConfig {
    fn from(a: RunArgs) -> Self {
        RunConfig {
            document_path: a.document,
            corpus_path:   a.corpus,
            model_dir:     a.model_dir,
            output_path:   a.output,
            pipeline:      a.pipeline.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    #[test]
    fn test_train_defaults_match_pipeline_defaults() {
        let cli = Cli::parse_from(["finsent", "train"]);
        match cli.command {
            Commands::Train(args) => {
                let cfg: TrainConfig = args.into();
                assert_eq!(cfg.pipeline, PipelineConfig::default());
                assert_eq!(cfg.modes, ModeSelection::Both);
            }
            _ => panic!("expected train"),
        }
    }

    #[test]
    fn test_run_requires_a_model_source() {
        assert!(Cli::try_parse_from(["finsent", "run", "--document", "r.pdf"]).is_err());
        let cli = Cli::try_parse_from(["finsent", "run", "--document", "r.pdf", "--model-dir", "m"]);
        assert!(cli.is_ok());
    }

    #[test]
    fn test_mode_flag() {
        let cli = Cli::parse_from(["finsent", "evaluate", "--corpus", "c.txt", "--mode", "regression"]);
        match cli.command {
            Commands::Evaluate(args) => {
                let cfg: EvaluateConfig = args.into();
                assert_eq!(cfg.modes, ModeSelection::Regression);
            }
            _ => panic!("expected evaluate"),
        }
    }
}

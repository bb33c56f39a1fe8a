// ============================================================
// Layer 1 - CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and hands each subcommand to its
// use case in Layer 2. Printing happens here; computing does not.
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use std::path::Path;

use commands::{Commands, EvaluateArgs, RunArgs, SegmentArgs, TrainArgs};

#[derive(Parser, Debug)]
#[command(
    name = "finsent",
    version = "0.1.0",
    about = "Segment financial reports into paragraphs and score their sentiment."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args)    => run_train(args),
            Commands::Evaluate(args) => run_evaluate(args),
            Commands::Segment(args)  => run_segment(args),
            Commands::Run(args)      => run_score(args),
        }
    }
}

fn run_train(args: TrainArgs) -> Result<()> {
    use crate::application::train_use_case::TrainUseCase;

    tracing::info!("Training on corpus: {}", args.corpus);
    let model_dir = args.model_dir.clone();
    let models    = TrainUseCase::new(args.into()).execute()?;

    for model in &models {
        println!("{} model: validation {}", model.mode(), model.report().validation);
    }
    println!("Models saved under '{model_dir}'.");
    Ok(())
}

fn run_evaluate(args: EvaluateArgs) -> Result<()> {
    use crate::application::evaluate_use_case::EvaluateUseCase;

    for (mode, eval) in EvaluateUseCase::new(args.into()).execute()? {
        println!("{mode}: {eval}");
    }
    Ok(())
}

fn run_segment(args: SegmentArgs) -> Result<()> {
    use crate::application::run_use_case::segment_document;
    use crate::data::loader::page_source_for;

    let source = page_source_for(Path::new(&args.document));
    println!("{}: {} pages", args.document, source.page_count()?);
    for p in segment_document(&*source)? {
        let (page, number) = p.address();
        println!("[{page}:{number}] {}", p.text.replace('\n', " "));
    }
    Ok(())
}

fn run_score(args: RunArgs) -> Result<()> {
    use crate::application::run_use_case::RunUseCase;

    let to_file = args.output.clone();
    let scored  = RunUseCase::new(args.into()).execute()?;
    if let Some(path) = to_file {
        println!("Scored {} paragraphs → '{}'", scored.len(), path);
    }
    Ok(())
}

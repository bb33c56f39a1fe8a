// ============================================================
// Layer 6 - Checkpoint Manager
// ============================================================
// Saves and restores a fitted SentimentModel as one directory.
//
// What gets saved:
//   1. pipeline_config.json - the PipelineConfig of the fit
//   2. model_meta.json      - mode, dimensions, vocabulary and
//                             training report
//   3. weights.mpk          - estimator parameters
//
// The vocabulary and the weights are always written and read
// together. Loading rebuilds the linear layer from the saved
// dimensions, loads the weights into it and re-checks that the
// vocabulary length matches the weight matrix.
//
// NamedMpkFileRecorder with FullPrecisionSettings keeps f32
// weights bit-exact, so a reloaded model predicts identically.
//
// Reference: Burn Book §5 (Records and Checkpointing)

use anyhow::{bail, Context, Result};
use burn::{
    prelude::*,
    record::{FullPrecisionSettings, NamedMpkFileRecorder},
};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::data::vectorizer::Vocabulary;
use crate::domain::traits::Persistable;
use crate::ml::estimator::{Estimator, Mode};
use crate::ml::model::LinearSentimentConfig;
use crate::ml::pipeline::{PipelineConfig, SentimentModel, TrainingReport};
use crate::ml::trainer::InferBackend;

const CONFIG_FILE:  &str = "pipeline_config.json";
const META_FILE:    &str = "model_meta.json";
const WEIGHTS_FILE: &str = "weights";

/// Everything except the weights.
#[derive(Debug, Serialize, Deserialize)]
struct ModelMeta {
    mode:         Mode,
    num_features: usize,
    num_outputs:  usize,
    vocabulary:   Vocabulary,
    report:       TrainingReport,
}

type WeightsRecorder = NamedMpkFileRecorder<FullPrecisionSettings>;

pub struct CheckpointManager {
    dir: PathBuf,
}

impl CheckpointManager {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn exists(&self) -> bool {
        self.dir.join(META_FILE).is_file()
    }

    pub fn save(&self, model: &SentimentModel) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create model directory '{}'", self.dir.display()))?;

        self.write_json(CONFIG_FILE, model.config())?;

        let linear = model.estimator().model();
        let meta = ModelMeta {
            mode:         model.mode(),
            num_features: linear.num_features(),
            num_outputs:  linear.num_outputs(),
            vocabulary:   model.vocabulary().clone(),
            report:       model.report().clone(),
        };
        self.write_json(META_FILE, &meta)?;

        // The recorder appends the .mpk extension itself
        let path = self.dir.join(WEIGHTS_FILE);
        linear
            .clone()
            .save_file(path.clone(), &WeightsRecorder::new())
            .with_context(|| format!("Failed to save weights to '{}'", path.display()))?;

        tracing::info!("Saved {} model to '{}'", meta.mode, self.dir.display());
        Ok(())
    }

    pub fn load(&self) -> Result<SentimentModel> {
        if !self.exists() {
            bail!("No saved model in '{}'. Make sure you have run 'train' first.", self.dir.display());
        }
        let config: PipelineConfig = self.read_json(CONFIG_FILE)?;
        let meta:   ModelMeta      = self.read_json(META_FILE)?;

        if meta.vocabulary.is_empty() {
            bail!("'{}' holds an empty vocabulary", self.dir.display());
        }
        if meta.num_outputs != meta.mode.num_outputs() {
            bail!(
                "'{}' declares {} outputs, a {} model has {}",
                self.dir.display(), meta.num_outputs, meta.mode, meta.mode.num_outputs()
            );
        }

        let device = Default::default();
        let model  = LinearSentimentConfig::new(meta.num_features, meta.num_outputs)
            .init::<InferBackend>(&device);

        let path  = self.dir.join(WEIGHTS_FILE);
        let model = model
            .load_file(path.clone(), &WeightsRecorder::new(), &device)
            .with_context(|| {
                format!("Cannot load weights '{}'. Have you trained the model first?", path.display())
            })?;

        let estimator = Estimator::from_model(meta.mode, model);
        let loaded    = SentimentModel::from_parts(config, meta.vocabulary, estimator, meta.report)
            .with_context(|| format!("Inconsistent model directory '{}'", self.dir.display()))?;

        tracing::info!(
            "Loaded {} model from '{}' ({} vocabulary columns)",
            loaded.mode(), self.dir.display(), loaded.vocabulary().len()
        );
        Ok(loaded)
    }

    fn write_json<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        let path = self.dir.join(name);
        let json = serde_json::to_string_pretty(value)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write '{}'", path.display()))?;
        tracing::debug!("Wrote '{}'", path.display());
        Ok(())
    }

    fn read_json<T: for<'de> Deserialize<'de>>(&self, name: &str) -> Result<T> {
        let path = self.dir.join(name);
        let json = fs::read_to_string(&path).with_context(|| {
            format!("Cannot read '{}'. Make sure you have run 'train' first.", path.display())
        })?;
        serde_json::from_str(&json).with_context(|| format!("Malformed '{}'", path.display()))
    }
}

impl Persistable for SentimentModel {
    fn save(&self, path: &Path) -> Result<()> {
        CheckpointManager::new(path).save(self)
    }

    fn load(path: &Path) -> Result<Self> {
        CheckpointManager::new(path).load()
    }
}

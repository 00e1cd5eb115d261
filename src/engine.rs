//! Engine facade: top-level API for the augur system.
//!
//! The `Engine` owns the knowledge base and the fixpoint configuration and
//! provides the public entry point for running inference sessions. Evidence
//! stays caller-owned: the engine can serve any number of concurrent sessions
//! against the same immutable rule set.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AugurResult, EngineError};
use crate::evidence::EvidenceStore;
use crate::infer::{InferEngine, Inference};
use crate::kb::KnowledgeBase;

/// Configuration for the inference fixpoint loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum full evaluation passes before giving up on convergence.
    pub max_passes: usize,
    /// Largest per-hypothesis movement still counted as "no change" when
    /// checking for a fixpoint.
    pub tolerance: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_passes: 50,
            tolerance: 1e-9,
        }
    }
}

impl EngineConfig {
    /// Load a configuration from a TOML file. Missing keys take their
    /// defaults.
    pub fn load(path: &Path) -> AugurResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| EngineError::ConfigIo {
            path: path.display().to_string(),
            source,
        })?;
        let config = toml::from_str(&text).map_err(|e| EngineError::ConfigParse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(config)
    }
}

/// The augur certainty-factor inference engine.
pub struct Engine {
    config: EngineConfig,
    kb: KnowledgeBase,
}

impl Engine {
    /// Create an engine over a loaded knowledge base.
    pub fn new(kb: KnowledgeBase, config: EngineConfig) -> AugurResult<Self> {
        if config.max_passes == 0 {
            return Err(EngineError::InvalidConfig {
                message: "max_passes must be > 0".into(),
            }
            .into());
        }
        if !(config.tolerance >= 0.0) {
            return Err(EngineError::InvalidConfig {
                message: "tolerance must be a non-negative number".into(),
            }
            .into());
        }

        tracing::info!(
            rules = kb.len(),
            hypotheses = kb.hypotheses().len(),
            max_passes = config.max_passes,
            "initializing augur engine"
        );

        Ok(Self { config, kb })
    }

    /// Run one inference session over an evidence snapshot.
    ///
    /// Pure with respect to (knowledge base, evidence); call again after any
    /// evidence mutation — derived certainties are never cached across runs.
    pub fn infer(&self, evidence: &EvidenceStore) -> Inference {
        InferEngine::new(&self.kb, self.config.max_passes, self.config.tolerance).run(evidence)
    }

    /// The knowledge base handle.
    pub fn kb(&self) -> &KnowledgeBase {
        &self.kb
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Summary statistics for display.
    pub fn info(&self) -> EngineInfo {
        EngineInfo {
            rules: self.kb.len(),
            hypotheses: self.kb.hypotheses().len(),
            evidence_conditions: self.kb.antecedent_conditions().len(),
            max_passes: self.config.max_passes,
            tolerance: self.config.tolerance,
        }
    }
}

/// Summary information about the engine state.
#[derive(Debug, Clone)]
pub struct EngineInfo {
    pub rules: usize,
    pub hypotheses: usize,
    pub evidence_conditions: usize,
    pub max_passes: usize,
    pub tolerance: f64,
}

impl std::fmt::Display for EngineInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "augur engine info")?;
        writeln!(f, "  rules:       {}", self.rules)?;
        writeln!(f, "  hypotheses:  {}", self.hypotheses)?;
        writeln!(f, "  evidence:    {}", self.evidence_conditions)?;
        writeln!(f, "  max passes:  {}", self.max_passes)?;
        writeln!(f, "  tolerance:   {}", self.tolerance)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Condition;

    const SAMPLE: &str = "\
today is rain AND rainfall is low then tomorrow is dry \\cf 0.6
today is dry AND temperature is warm then tomorrow is rain \\cf 0.65
";

    #[test]
    fn default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.max_passes, 50);
        assert_eq!(config.tolerance, 1e-9);
    }

    #[test]
    fn zero_pass_bound_rejected() {
        let kb = KnowledgeBase::parse(SAMPLE).unwrap();
        let result = Engine::new(
            kb,
            EngineConfig {
                max_passes: 0,
                ..Default::default()
            },
        );
        assert!(result.is_err());
    }

    #[test]
    fn negative_tolerance_rejected() {
        let kb = KnowledgeBase::parse(SAMPLE).unwrap();
        let result = Engine::new(
            kb,
            EngineConfig {
                tolerance: -1.0,
                ..Default::default()
            },
        );
        assert!(result.is_err());
    }

    #[test]
    fn info_counts_the_knowledge_base() {
        let kb = KnowledgeBase::parse(SAMPLE).unwrap();
        let engine = Engine::new(kb, EngineConfig::default()).unwrap();
        let info = engine.info();
        assert_eq!(info.rules, 2);
        assert_eq!(info.hypotheses, 2);
        assert_eq!(info.evidence_conditions, 4);
    }

    #[test]
    fn infer_end_to_end() {
        let kb = KnowledgeBase::parse(SAMPLE).unwrap();
        let engine = Engine::new(kb, EngineConfig::default()).unwrap();

        let mut evidence = EvidenceStore::new();
        evidence.insert_value("today", "rain", 1.0).unwrap();
        evidence.insert_value("rainfall", "low", 1.0).unwrap();

        let inference = engine.infer(&evidence);
        assert_eq!(
            inference
                .certainty(&Condition::new("tomorrow", "dry"))
                .unwrap()
                .get(),
            0.6
        );
        assert_eq!(
            inference
                .certainty(&Condition::new("tomorrow", "rain"))
                .unwrap()
                .get(),
            0.0
        );
    }

    #[test]
    fn config_loads_from_toml_with_partial_keys() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("augur.toml");
        std::fs::write(&path, "max_passes = 10\n").unwrap();

        let config = EngineConfig::load(&path).unwrap();
        assert_eq!(config.max_passes, 10);
        assert_eq!(config.tolerance, 1e-9);
    }

    #[test]
    fn config_load_reports_parse_errors() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("augur.toml");
        std::fs::write(&path, "max_passes = \"many\"\n").unwrap();

        assert!(EngineConfig::load(&path).is_err());
    }
}

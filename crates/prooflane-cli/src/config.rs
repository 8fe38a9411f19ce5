//! # Client Configuration
//!
//! YAML file passed with `--config`. Every field is optional:
//!
//! ```yaml
//! backend: groth16        # groth16 | mock
//! keys:
//!   source: file          # or: source: setup, seed: 7
//!   path: keys/rsa.pk     # relative to the config file
//! circuit:
//!   name: rsa-2048
//!   signals:
//!     - { name: signature, arity: 32 }
//!     - { name: modulus, arity: 32, visibility: public }
//!     - { name: base_message, arity: 32 }
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use prooflane_core::CircuitLayout;
use prooflane_zkp::{Groth16Backend, KeySource, MockBackend, ProofBackend};

/// Which proving backend to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    #[default]
    Groth16,
    /// Transparent, not zero-knowledge. Development only.
    Mock,
}

/// Parsed configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    pub backend: BackendKind,
    pub keys: KeySource,
    pub circuit: CircuitLayout,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            keys: KeySource::default(),
            circuit: CircuitLayout::rsa_2048(),
        }
    }
}

impl ClientConfig {
    /// Load from `path`, or defaults when no path is given.
    ///
    /// A relative key file path is resolved against the config file's
    /// directory.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            tracing::debug!("no config file given, using defaults");
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        let mut config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config: {}", path.display()))?;

        if let KeySource::File { path: key_path } = &mut config.keys {
            if key_path.is_relative() {
                if let Some(dir) = path.parent() {
                    *key_path = dir.join(&*key_path);
                }
            }
        }
        tracing::debug!(
            config = %path.display(),
            backend = ?config.backend,
            layout = config.circuit.name(),
            "loaded config"
        );
        Ok(config)
    }

    /// Instantiate the configured backend (not yet initialized).
    pub fn backend(&self) -> Box<dyn ProofBackend> {
        match self.backend {
            BackendKind::Groth16 => {
                Box::new(Groth16Backend::new(self.circuit.clone(), self.keys.clone()))
            }
            BackendKind::Mock => Box::new(MockBackend::new(self.circuit.clone())),
        }
    }
}

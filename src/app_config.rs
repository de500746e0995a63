// Copyright (c) 2021 Tangram Robotics Inc. - All Rights Reserved
// Unauthorized copying of this file, via any medium is strictly prohibited
// Proprietary and confidential
// ----------------------------

use anyhow::Result;
use serde::{Deserialize, Serialize};
use strum_macros::{EnumString, EnumVariantNames, IntoStaticStr};

use crate::core::generator::GeneratorOptions;
use crate::core::solver::SolverOptions;

/// Default config file location, before tilde expansion.
pub const DEFAULT_CONFIG_PATH: &str = "~/.config/watersort/watersort.toml";

/// Prefix of environment variable overrides, e.g.
/// `WATERSORT__SOLVER__MAX_STATES=5000`.
pub const ENV_PREFIX: &str = "WATERSORT";

/// Output format of `solve` reports
#[derive(Clone, Copy, Debug, PartialEq, EnumVariantNames, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Text
    }
}

/// File format of generated puzzles
#[derive(Clone, Copy, Debug, PartialEq, EnumVariantNames, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum PuzzleFormat {
    Toml,
    Json,
}

impl Default for PuzzleFormat {
    fn default() -> Self {
        PuzzleFormat::Toml
    }
}

/// All configuration, with defaults filled in for anything the config file
/// and environment leave unset.
#[derive(Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CompleteAppConfig {
    pub solver: SolverOptions,
    pub generator: GeneratorOptions,
}

impl CompleteAppConfig {
    /// Deserializes merged config sources.
    pub fn from_config(config: config::Config) -> Result<Self> {
        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use config::{Config, File, FileFormat};

    use super::*;
    use crate::core::models::PourMode;
    use crate::core::solver::Strategy;

    fn from_toml(contents: &str) -> Result<CompleteAppConfig> {
        let config = Config::builder()
            .add_source(File::from_str(contents, FileFormat::Toml))
            .build()?;
        CompleteAppConfig::from_config(config)
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = from_toml("").unwrap();
        assert_eq!(CompleteAppConfig::default(), config);
        assert_eq!(Strategy::AStar, config.solver.strategy);
        assert_eq!(PourMode::Unit, config.solver.pour);
        assert_eq!(4, config.generator.colors);
    }

    #[test]
    fn test_partial_config() {
        let config = from_toml(
            r#"
            [solver]
            strategy = "bfs"
            pour = "stream"

            [generator]
            empty_tubes = 1
            seed = 9
            "#,
        )
        .unwrap();
        assert_eq!(Strategy::Bfs, config.solver.strategy);
        assert_eq!(PourMode::Stream, config.solver.pour);
        assert_eq!(SolverOptions::default().max_states, config.solver.max_states);
        assert_eq!(1, config.generator.empty_tubes);
        assert_eq!(Some(9), config.generator.seed);
        assert_eq!(4, config.generator.capacity);
    }

    #[test]
    fn test_unknown_strategy() {
        let error = from_toml("[solver]\nstrategy = \"greedy\"\n")
            .expect_err("Expected error due to unknown strategy");
        assert!(error.to_string().contains("greedy"));
    }

    // Environment overrides are covered by the CLI tests, which set variables
    // on the child process only.
}

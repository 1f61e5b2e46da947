//! Configuration for the inference engine.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable enabling or disabling optimized queries.
pub const ENV_OPTIMIZED: &str = "AINGLE_INFERENCE_OPTIMIZED";
/// Environment variable enabling or disabling compressed source statements.
pub const ENV_COMPRESSED: &str = "AINGLE_INFERENCE_COMPRESSED";
/// Environment variable naming the graph that receives derived statements.
pub const ENV_GRAPH: &str = "AINGLE_INFERENCE_GRAPH";
/// Environment variable pointing at a directory of standard rule files.
pub const ENV_RULES_DIR: &str = "AINGLE_INFERENCE_RULES_DIR";

/// Where the standard rule sets are loaded from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleSource {
    /// The rule files compiled into the crate.
    #[default]
    Embedded,
    /// A directory holding `rdfs.rules` and `nrl.rules`.
    Directory(PathBuf),
}

/// Settings of an [`InferenceModel`](crate::InferenceModel).
///
/// # Examples
///
/// ```
/// use aingle_inference::InferenceConfig;
///
/// let config = InferenceConfig::default();
/// assert!(config.optimized_queries);
/// assert!(!config.compressed_source_statements);
///
/// let bulk = InferenceConfig::bulk_load();
/// assert!(bulk.compressed_source_statements);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Build rule queries from the triggering statement instead of
    /// evaluating every rule against the whole store.
    pub optimized_queries: bool,
    /// Process new statements in generations and run each distinct query
    /// once per generation.
    pub compressed_source_statements: bool,
    /// Named graph that receives derived statements. `None` uses the
    /// default graph.
    pub inference_graph: Option<String>,
    /// Origin of the standard rule sets.
    pub rule_source: RuleSource,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            optimized_queries: true,
            compressed_source_statements: false,
            inference_graph: None,
            rule_source: RuleSource::Embedded,
        }
    }
}

impl InferenceConfig {
    /// Returns a configuration for loading many statements at once.
    ///
    /// Statements derived from one insertion are handled in batches, so
    /// queries shared by several triggers run only once per batch.
    pub fn bulk_load() -> Self {
        Self {
            compressed_source_statements: true,
            ..Self::default()
        }
    }

    /// Returns the default configuration with overrides from the environment.
    ///
    /// Boolean variables accept `1`/`0`, `true`/`false` and `yes`/`no`;
    /// unparsable values are ignored.
    ///
    /// ```
    /// # use aingle_inference::InferenceConfig;
    /// std::env::set_var("AINGLE_INFERENCE_COMPRESSED", "true");
    /// let config = InferenceConfig::from_env();
    /// assert!(config.compressed_source_statements);
    /// # std::env::remove_var("AINGLE_INFERENCE_COMPRESSED");
    /// ```
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(optimized) = env_flag(ENV_OPTIMIZED) {
            config.optimized_queries = optimized;
        }

        if let Some(compressed) = env_flag(ENV_COMPRESSED) {
            config.compressed_source_statements = compressed;
        }

        if let Ok(graph) = std::env::var(ENV_GRAPH) {
            if !graph.is_empty() {
                config.inference_graph = Some(graph);
            }
        }

        if let Ok(dir) = std::env::var(ENV_RULES_DIR) {
            if !dir.is_empty() {
                config.rule_source = RuleSource::Directory(PathBuf::from(dir));
            }
        }

        config
    }

    /// Sets the graph that receives derived statements.
    pub fn with_inference_graph(mut self, graph: impl Into<String>) -> Self {
        self.inference_graph = Some(graph.into());
        self
    }

    /// Sets where standard rule sets are loaded from.
    pub fn with_rule_source(mut self, source: RuleSource) -> Self {
        self.rule_source = source;
        self
    }
}

fn env_flag(name: &str) -> Option<bool> {
    let value = std::env::var(name).ok()?;
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = InferenceConfig::default();
        assert!(config.optimized_queries);
        assert!(!config.compressed_source_statements);
        assert_eq!(config.inference_graph, None);
        assert_eq!(config.rule_source, RuleSource::Embedded);
    }

    #[test]
    fn test_builders() {
        let config = InferenceConfig::bulk_load()
            .with_inference_graph("urn:graph:inferred")
            .with_rule_source(RuleSource::Directory(PathBuf::from("/etc/aingle/rules")));

        assert!(config.compressed_source_statements);
        assert_eq!(config.inference_graph.as_deref(), Some("urn:graph:inferred"));
        assert!(matches!(config.rule_source, RuleSource::Directory(_)));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = InferenceConfig::default().with_inference_graph("urn:g");
        let json = serde_json::to_string(&config).unwrap();
        let back: InferenceConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: InferenceConfig =
            serde_json::from_str(r#"{"compressed_source_statements": true}"#).unwrap();
        assert!(config.optimized_queries);
        assert!(config.compressed_source_statements);
    }

    #[test]
    fn test_env_flag_values() {
        std::env::set_var("AINGLE_INFERENCE_TEST_FLAG_ON", "Yes");
        std::env::set_var("AINGLE_INFERENCE_TEST_FLAG_OFF", "0");
        std::env::set_var("AINGLE_INFERENCE_TEST_FLAG_BAD", "maybe");

        assert_eq!(env_flag("AINGLE_INFERENCE_TEST_FLAG_ON"), Some(true));
        assert_eq!(env_flag("AINGLE_INFERENCE_TEST_FLAG_OFF"), Some(false));
        assert_eq!(env_flag("AINGLE_INFERENCE_TEST_FLAG_BAD"), None);
        assert_eq!(env_flag("AINGLE_INFERENCE_TEST_FLAG_UNSET"), None);

        std::env::remove_var("AINGLE_INFERENCE_TEST_FLAG_ON");
        std::env::remove_var("AINGLE_INFERENCE_TEST_FLAG_OFF");
        std::env::remove_var("AINGLE_INFERENCE_TEST_FLAG_BAD");
    }
}

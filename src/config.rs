// ⚙️ Run configuration from the environment (`.env` honoured)

use crate::error::{Error, Result};
use crate::graph::Namespace;
use crate::loader::{PublishOptions, SparqlStoreConfig};
use crate::ontology::DEFAULT_BASE;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub namespace: Namespace,
    pub snapshot_path: PathBuf,
    pub output_path: PathBuf,
    pub store_endpoint: Option<String>,
    pub query_endpoint: Option<String>,
    pub graph_uri: String,
    pub store_user: Option<String>,
    pub store_password: Option<String>,
    pub batch_size: usize,
    pub parallelism: usize,
    pub batch_timeout: Duration,
}

impl Config {
    /// Read process environment after loading `.env` if there is one
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let namespace = Namespace::new(
            &get("HERITAGE_ONTOLOGY_BASE").unwrap_or_else(|| DEFAULT_BASE.to_string()),
        );
        let graph_uri = get("HERITAGE_GRAPH_URI")
            .unwrap_or_else(|| format!("{}graph", namespace.base()));
        let store_endpoint = get("HERITAGE_STORE_ENDPOINT");

        let batch_size = positive(&get, "HERITAGE_BATCH_SIZE", 1000)?;
        let parallelism = positive(&get, "HERITAGE_PARALLELISM", 4)?;
        let timeout_secs = positive(&get, "HERITAGE_BATCH_TIMEOUT_SECS", 60)?;

        Ok(Config {
            namespace,
            snapshot_path: PathBuf::from(
                get("HERITAGE_SNAPSHOT_PATH").unwrap_or_else(|| "snapshot.db".to_string()),
            ),
            output_path: PathBuf::from(
                get("HERITAGE_OUTPUT_PATH").unwrap_or_else(|| "heritage-graph.nt".to_string()),
            ),
            query_endpoint: get("HERITAGE_QUERY_ENDPOINT").or_else(|| store_endpoint.clone()),
            store_endpoint,
            graph_uri,
            store_user: get("HERITAGE_STORE_USER"),
            store_password: get("HERITAGE_STORE_PASSWORD"),
            batch_size,
            parallelism,
            batch_timeout: Duration::from_secs(timeout_secs as u64),
        })
    }

    pub fn publish_options(&self) -> PublishOptions {
        PublishOptions {
            batch_size: self.batch_size,
            parallelism: self.parallelism,
        }
    }

    /// Store client settings; publishing without an endpoint is a config error
    pub fn sparql_config(&self) -> Result<SparqlStoreConfig> {
        let update_endpoint = self
            .store_endpoint
            .clone()
            .ok_or_else(|| Error::Config("HERITAGE_STORE_ENDPOINT is not set".to_string()))?;

        Ok(SparqlStoreConfig {
            query_endpoint: self
                .query_endpoint
                .clone()
                .unwrap_or_else(|| update_endpoint.clone()),
            update_endpoint,
            user: self.store_user.clone(),
            password: self.store_password.clone(),
            timeout: self.batch_timeout,
        })
    }

    /// Where the JSON run report goes, next to the artifact
    pub fn report_path(&self) -> PathBuf {
        let mut name = self.output_path.clone().into_os_string();
        name.push(".report.json");
        PathBuf::from(name)
    }
}

fn positive<G>(get: &G, key: &str, default: usize) -> Result<usize>
where
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        None => Ok(default),
        Some(raw) => match usize::from_str(&raw) {
            Ok(0) | Err(_) => Err(Error::Config(format!(
                "{} must be a positive integer, got {:?}",
                key, raw
            ))),
            Ok(value) => Ok(value),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<Config> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = config(&[]).unwrap();

        assert_eq!(cfg.namespace.base(), "https://w3id.org/heritage-graph/");
        assert_eq!(cfg.graph_uri, "https://w3id.org/heritage-graph/graph");
        assert_eq!(cfg.snapshot_path, PathBuf::from("snapshot.db"));
        assert_eq!(cfg.batch_size, 1000);
        assert_eq!(cfg.parallelism, 4);
        assert_eq!(cfg.batch_timeout, Duration::from_secs(60));
        assert!(cfg.store_endpoint.is_none());
        assert_eq!(cfg.report_path(), PathBuf::from("heritage-graph.nt.report.json"));
    }

    #[test]
    fn test_base_is_normalised() {
        let cfg = config(&[("HERITAGE_ONTOLOGY_BASE", "https://example.org/hg")]).unwrap();
        assert_eq!(cfg.namespace.base(), "https://example.org/hg/");
        assert_eq!(cfg.graph_uri, "https://example.org/hg/graph");
    }

    #[test]
    fn test_query_endpoint_falls_back_to_store() {
        let cfg = config(&[("HERITAGE_STORE_ENDPOINT", "http://localhost:3030/ds")]).unwrap();
        let sparql = cfg.sparql_config().unwrap();
        assert_eq!(sparql.update_endpoint, "http://localhost:3030/ds");
        assert_eq!(sparql.query_endpoint, "http://localhost:3030/ds");
    }

    #[test]
    fn test_invalid_numbers_are_fatal() {
        assert!(matches!(
            config(&[("HERITAGE_BATCH_SIZE", "0")]),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            config(&[("HERITAGE_PARALLELISM", "many")]),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_publishing_needs_endpoint() {
        let cfg = config(&[]).unwrap();
        assert!(matches!(cfg.sparql_config(), Err(Error::Config(_))));
    }
}

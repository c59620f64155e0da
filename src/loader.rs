// 🚚 Graph Loader - artifact writer + triple store publication
//
// publish():
//   1. CLEAR the named graph            (failure aborts)
//   2. INSERT DATA in fixed-size batches, up to `parallelism` in flight
//      (a failed batch is recorded, the rest keep going)
//   3. COUNT the graph and compare with what was sent
//
// Nothing is retried. A run with any failed batch or a count mismatch is
// reported as failed.

use crate::error::{Error, Result};
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{info, warn};

// ============================================================================
// ARTIFACT
// ============================================================================

/// Write sorted N-Triples lines, one statement per line
pub fn write_ntriples(path: &Path, lines: &[String]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for line in lines {
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    info!(path = %path.display(), triples = lines.len(), "N-Triples written");
    Ok(())
}

// ============================================================================
// STORES
// ============================================================================

#[async_trait]
pub trait TripleStore: Send + Sync {
    /// Remove every triple of the named graph
    async fn clear(&self, graph: &str) -> Result<()>;

    /// Add N-Triples statements to the named graph
    async fn insert(&self, graph: &str, lines: &[String]) -> Result<()>;

    /// Number of triples in the named graph
    async fn count(&self, graph: &str) -> Result<u64>;
}

#[derive(Debug, Clone)]
pub struct SparqlStoreConfig {
    pub update_endpoint: String,
    pub query_endpoint: String,
    pub user: Option<String>,
    pub password: Option<String>,
    /// Per request, not per run
    pub timeout: Duration,
}

/// SPARQL 1.1 Protocol client (form-encoded update/query)
pub struct SparqlStore {
    client: reqwest::Client,
    config: SparqlStoreConfig,
}

#[derive(Deserialize)]
struct SparqlResults {
    results: SparqlBindings,
}

#[derive(Deserialize)]
struct SparqlBindings {
    bindings: Vec<HashMap<String, SparqlValue>>,
}

#[derive(Deserialize)]
struct SparqlValue {
    value: String,
}

impl SparqlStore {
    pub fn new(config: SparqlStoreConfig) -> Result<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(SparqlStore { client, config })
    }

    async fn post(&self, endpoint: &str, field: &str, body: String, accept: Option<&str>) -> Result<String> {
        let mut request = self
            .client
            .post(endpoint)
            .timeout(self.config.timeout)
            .form(&[(field, body)]);

        if let Some(user) = &self.config.user {
            request = request.basic_auth(user, self.config.password.as_ref());
        }
        if let Some(accept) = accept {
            request = request.header(reqwest::header::ACCEPT, accept);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(Error::Store(format!(
                "{} returned {}: {}",
                endpoint,
                status,
                text.chars().take(200).collect::<String>()
            )));
        }
        Ok(text)
    }

    async fn update(&self, statement: String) -> Result<()> {
        self.post(&self.config.update_endpoint, "update", statement, None)
            .await
            .map(|_| ())
    }
}

#[async_trait]
impl TripleStore for SparqlStore {
    async fn clear(&self, graph: &str) -> Result<()> {
        self.update(format!("CLEAR SILENT GRAPH <{}>", graph)).await
    }

    async fn insert(&self, graph: &str, lines: &[String]) -> Result<()> {
        let statement = format!(
            "INSERT DATA {{ GRAPH <{}> {{\n{}\n}} }}",
            graph,
            lines.join("\n")
        );
        self.update(statement).await
    }

    async fn count(&self, graph: &str) -> Result<u64> {
        let query = format!(
            "SELECT (COUNT(*) AS ?count) WHERE {{ GRAPH <{}> {{ ?s ?p ?o }} }}",
            graph
        );
        let body = self
            .post(
                &self.config.query_endpoint,
                "query",
                query,
                Some("application/sparql-results+json"),
            )
            .await?;

        parse_count(&body)
    }
}

fn parse_count(body: &str) -> Result<u64> {
    let results: SparqlResults = serde_json::from_str(body)?;
    let value = results
        .results
        .bindings
        .first()
        .and_then(|b| b.get("count"))
        .ok_or_else(|| Error::Store("count query returned no binding".to_string()))?;

    value
        .value
        .parse()
        .map_err(|_| Error::Store(format!("count is not a number: {}", value.value)))
}

/// In-process store with set semantics (dry runs, tests)
#[derive(Debug, Default)]
pub struct MemoryStore {
    graphs: Mutex<HashMap<String, BTreeSet<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TripleStore for MemoryStore {
    async fn clear(&self, graph: &str) -> Result<()> {
        self.graphs.lock().await.remove(graph);
        Ok(())
    }

    async fn insert(&self, graph: &str, lines: &[String]) -> Result<()> {
        let mut graphs = self.graphs.lock().await;
        graphs
            .entry(graph.to_string())
            .or_default()
            .extend(lines.iter().cloned());
        Ok(())
    }

    async fn count(&self, graph: &str) -> Result<u64> {
        let graphs = self.graphs.lock().await;
        Ok(graphs.get(graph).map_or(0, |g| g.len() as u64))
    }
}

// ============================================================================
// PUBLICATION
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct PublishOptions {
    pub batch_size: usize,
    pub parallelism: usize,
}

impl Default for PublishOptions {
    fn default() -> Self {
        PublishOptions {
            batch_size: 1000,
            parallelism: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchFailure {
    /// Zero-based batch number in submission order
    pub ordinal: usize,
    pub size: usize,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishReport {
    pub graph_uri: String,
    pub expected: u64,
    /// None when the count query itself failed
    pub actual: Option<u64>,
    pub batches: usize,
    pub failures: Vec<BatchFailure>,
    pub count_error: Option<String>,
}

impl PublishReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty() && self.actual == Some(self.expected)
    }
}

/// Replace the named graph's content with `lines`
pub async fn publish<S>(
    store: &S,
    graph_uri: &str,
    lines: &[String],
    options: PublishOptions,
) -> Result<PublishReport>
where
    S: TripleStore + ?Sized,
{
    if options.batch_size == 0 || options.parallelism == 0 {
        return Err(Error::Config(
            "batch size and parallelism must be greater than zero".to_string(),
        ));
    }

    store.clear(graph_uri).await?;
    info!(graph = graph_uri, "Target graph cleared");

    let batches: Vec<&[String]> = lines.chunks(options.batch_size).collect();
    let batch_count = batches.len();

    let mut failures: Vec<BatchFailure> = stream::iter(batches.into_iter().enumerate())
        .map(|(ordinal, batch)| async move {
            store
                .insert(graph_uri, batch)
                .await
                .err()
                .map(|e| BatchFailure {
                    ordinal,
                    size: batch.len(),
                    message: e.to_string(),
                })
        })
        .buffer_unordered(options.parallelism)
        .filter_map(|failure| async move { failure })
        .collect()
        .await;
    failures.sort_by_key(|f| f.ordinal);

    for failure in &failures {
        warn!(
            ordinal = failure.ordinal,
            size = failure.size,
            error = %failure.message,
            "Batch insert failed"
        );
    }

    let expected = lines.len() as u64;
    let (actual, count_error) = match store.count(graph_uri).await {
        Ok(count) => (Some(count), None),
        Err(e) => {
            warn!(error = %e, "Count verification failed");
            (None, Some(e.to_string()))
        }
    };

    if let Some(actual) = actual {
        if actual != expected {
            warn!(expected, actual, "Store count does not match graph size");
        }
    }

    let report = PublishReport {
        graph_uri: graph_uri.to_string(),
        expected,
        actual,
        batches: batch_count,
        failures,
        count_error,
    };

    info!(
        batches = report.batches,
        failed = report.failures.len(),
        expected = report.expected,
        success = report.is_success(),
        "Publication finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn lines(n: usize) -> Vec<String> {
        (0..n)
            .map(|i| format!("<urn:s{}> <urn:p> \"{}\" .", i, i))
            .collect()
    }

    /// Fails every insert whose first line is listed
    struct FlakyStore {
        inner: MemoryStore,
        poisoned: Vec<String>,
    }

    #[async_trait]
    impl TripleStore for FlakyStore {
        async fn clear(&self, graph: &str) -> Result<()> {
            self.inner.clear(graph).await
        }

        async fn insert(&self, graph: &str, lines: &[String]) -> Result<()> {
            if self.poisoned.contains(&lines[0]) {
                return Err(Error::Store("503 Service Unavailable".to_string()));
            }
            self.inner.insert(graph, lines).await
        }

        async fn count(&self, graph: &str) -> Result<u64> {
            self.inner.count(graph).await
        }
    }

    #[tokio::test]
    async fn test_publish_twice_is_idempotent() {
        let store = MemoryStore::new();
        let data = lines(25);
        let options = PublishOptions {
            batch_size: 10,
            parallelism: 3,
        };

        let first = publish(&store, "urn:g", &data, options).await.unwrap();
        let second = publish(&store, "urn:g", &data, options).await.unwrap();

        assert_eq!(first.batches, 3);
        assert!(first.is_success());
        assert!(second.is_success());
        assert_eq!(store.count("urn:g").await.unwrap(), 25);
    }

    #[tokio::test]
    async fn test_failed_batch_is_recorded_and_rest_continue() {
        let data = lines(30);
        let store = FlakyStore {
            inner: MemoryStore::new(),
            poisoned: vec![data[10].clone()],
        };

        let report = publish(
            &store,
            "urn:g",
            &data,
            PublishOptions {
                batch_size: 10,
                parallelism: 2,
            },
        )
        .await
        .unwrap();

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].ordinal, 1);
        assert_eq!(report.failures[0].size, 10);
        assert_eq!(report.actual, Some(20));
        assert!(!report.is_success());
    }

    #[tokio::test]
    async fn test_zero_batch_size_is_config_error() {
        let store = MemoryStore::new();
        let result = publish(
            &store,
            "urn:g",
            &lines(1),
            PublishOptions {
                batch_size: 0,
                parallelism: 1,
            },
        )
        .await;
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_parse_count() {
        let body = r#"{"head":{"vars":["count"]},"results":{"bindings":[{"count":{"type":"literal","datatype":"http://www.w3.org/2001/XMLSchema#integer","value":"42"}}]}}"#;
        assert_eq!(parse_count(body).unwrap(), 42);
        assert!(parse_count(r#"{"results":{"bindings":[]}}"#).is_err());
    }

    #[test]
    fn test_write_ntriples() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.nt");
        write_ntriples(&path, &lines(2)).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written.lines().count(), 2);
        assert!(written.ends_with(" .\n"));
    }

    fn sparql_config(server: &MockServer) -> SparqlStoreConfig {
        SparqlStoreConfig {
            update_endpoint: format!("{}/update", server.uri()),
            query_endpoint: format!("{}/query", server.uri()),
            user: Some("loader".to_string()),
            password: Some("secret".to_string()),
            timeout: Duration::from_secs(5),
        }
    }

    #[tokio::test]
    async fn test_sparql_store_round() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/update"))
            .and(body_string_contains("CLEAR+SILENT+GRAPH"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/update"))
            .and(body_string_contains("INSERT+DATA"))
            .respond_with(ResponseTemplate::new(200))
            .expect(2)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/query"))
            .and(header("accept", "application/sparql-results+json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "head": { "vars": ["count"] },
                "results": { "bindings": [ { "count": { "type": "literal", "value": "3" } } ] }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let store = SparqlStore::new(sparql_config(&server)).unwrap();
        let report = publish(
            &store,
            "https://example.org/graph",
            &lines(3),
            PublishOptions {
                batch_size: 2,
                parallelism: 2,
            },
        )
        .await
        .unwrap();

        assert_eq!(report.batches, 2);
        assert!(report.is_success(), "{:?}", report);
    }

    #[tokio::test]
    async fn test_sparql_clear_failure_is_fatal() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/update"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let store = SparqlStore::new(sparql_config(&server)).unwrap();
        let result = publish(&store, "urn:g", &lines(1), PublishOptions::default()).await;

        assert!(matches!(result, Err(Error::Store(msg)) if msg.contains("500")));
    }
}

// 📋 Run Report - what one invocation did, as JSON next to the artifact

use crate::assembler::AssemblyReport;
use crate::error::Result;
use crate::loader::PublishReport;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub version: String,
    pub command: String,
    pub snapshot: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub assembly: AssemblyReport,
    pub publish: Option<PublishReport>,
}

impl RunReport {
    pub fn start(command: &str, snapshot: &str) -> Self {
        RunReport {
            run_id: Uuid::new_v4(),
            version: crate::VERSION.to_string(),
            command: command.to_string(),
            snapshot: snapshot.to_string(),
            started_at: Utc::now(),
            finished_at: None,
            assembly: AssemblyReport::default(),
            publish: None,
        }
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Transform-only runs succeed once they get here
    pub fn is_success(&self) -> bool {
        self.publish.as_ref().map_or(true, PublishReport::is_success)
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_round_trips_through_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.report.json");

        let mut report = RunReport::start("transform", "snapshot.db");
        report.assembly.triples = 12;
        report.finish();
        report.write(&path).unwrap();

        let read: RunReport =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(read.run_id, report.run_id);
        assert_eq!(read.assembly.triples, 12);
        assert!(read.finished_at.is_some());
        assert!(read.is_success());
    }

    #[test]
    fn test_failed_publish_fails_run() {
        let mut report = RunReport::start("publish", "snapshot.db");
        report.publish = Some(PublishReport {
            graph_uri: "urn:g".to_string(),
            expected: 10,
            actual: Some(9),
            batches: 1,
            failures: Vec::new(),
            count_error: None,
        });
        assert!(!report.is_success());
    }
}

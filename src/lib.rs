// Heritage Graph - Core Library
// Relational cultural-heritage snapshot → deterministic RDF knowledge graph

pub mod error;
pub mod normalize;      // Name/date/coordinate canonical forms
pub mod identity;       // Content-addressed entity ids
pub mod ontology;       // Classes, properties, datatypes
pub mod class_map;      // Free-text type labels → classes
pub mod temporal;       // Dates → exact/approximate time nodes
pub mod places;         // "settlement; region; country" → territorial entities
pub mod graph;          // Triple set + N-Triples rendering
pub mod reify;          // Roles, events, mediators as nodes
pub mod snapshot;       // SQLite / CSV input tables
pub mod entities;       // Per-family records and relationship tables
pub mod assembler;      // Pass plan + graph assembly
pub mod loader;         // Artifact writer + triple store publication
pub mod config;         // Environment configuration
pub mod report;         // JSON run report

// Re-export commonly used types
pub use assembler::{Assembler, AssemblyReport, Pass, PassPlan, PassStats};
pub use config::Config;
pub use error::{Error, Result};
pub use graph::{GraphBuilder, Namespace};
pub use identity::{resolve, Discriminator, EntityId};
pub use loader::{
    publish, write_ntriples, BatchFailure, MemoryStore, PublishOptions, PublishReport,
    SparqlStore, SparqlStoreConfig, TripleStore,
};
pub use report::RunReport;
pub use snapshot::{Snapshot, SnapshotSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

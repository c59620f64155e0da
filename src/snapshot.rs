// 🗄️ Relational snapshot - read-only input tables
//
// Two sources share one trait:
//   SqliteSnapshot → a SQLite database file (tables by name)
//   CsvSnapshot    → a directory holding `{table}.csv`
//
// Everything is read into memory up front. A missing table is fatal;
// a missing column simply reads as null.

use crate::error::{Error, Result};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

// ============================================================================
// SCHEMA
// ============================================================================

/// Every table the engine reads, with the columns it understands
pub const TABLES: &[(&str, &[&str])] = &[
    (
        "persons",
        &[
            "id", "name", "kind", "gender", "nationality", "activity", "birth_date",
            "birth_place", "death_date", "death_place", "uri",
        ],
    ),
    (
        "institutions",
        &[
            "id", "name", "type", "address", "place", "coordinates", "founded", "dissolved",
            "parent_id", "website",
        ],
    ),
    (
        "companies",
        &["id", "name", "type", "place", "founded", "dissolved", "website"],
    ),
    (
        "catalogs",
        &["id", "name", "type", "publication_date", "publication_place", "isbn", "uri"],
    ),
    (
        "exhibitions",
        &["id", "name", "type", "opening_date", "closing_date", "place", "venue_id", "uri"],
    ),
    (
        "artworks",
        &[
            "id", "name", "type", "production_date", "production_place", "technique",
            "dimensions", "uri",
        ],
    ),
    ("person_memberships", &["person_id", "group_id"]),
    ("institution_affiliations", &["person_id", "institution_id"]),
    ("institution_executives", &["person_id", "institution_id", "position"]),
    ("company_executives", &["person_id", "company_id", "position"]),
    ("catalog_authors", &["catalog_id", "person_id"]),
    ("catalog_publishers", &["catalog_id", "actor_type", "actor_id"]),
    ("exhibition_curators", &["exhibition_id", "person_id"]),
    ("exhibition_organizers", &["exhibition_id", "actor_type", "actor_id"]),
    ("exhibition_funders", &["exhibition_id", "actor_type", "actor_id"]),
    ("exhibition_lenders", &["exhibition_id", "actor_type", "actor_id"]),
    ("exhibition_exhibitors", &["exhibition_id", "actor_type", "actor_id"]),
    ("exhibition_museographers", &["exhibition_id", "person_id"]),
    ("exhibition_catalogs", &["exhibition_id", "catalog_id"]),
    ("exhibition_artworks", &["exhibition_id", "artwork_id"]),
    ("artwork_authors", &["artwork_id", "person_id"]),
    ("artwork_producers", &["artwork_id", "actor_type", "actor_id"]),
    ("artwork_owners", &["artwork_id", "actor_type", "actor_id"]),
];

/// Create every snapshot table (all columns TEXT). Used to prepare fixtures
/// and empty snapshots; the engine itself never writes to a snapshot.
pub fn create_schema(conn: &Connection) -> Result<()> {
    for (table, columns) in TABLES {
        let column_list = columns
            .iter()
            .map(|c| format!("{} TEXT", c))
            .collect::<Vec<_>>()
            .join(", ");
        conn.execute(
            &format!("CREATE TABLE IF NOT EXISTS {} ({})", table, column_list),
            [],
        )?;
    }
    Ok(())
}

// ============================================================================
// CELLS & ROWS
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    /// Binary data or text that is not valid UTF-8
    Blob(Vec<u8>),
}

/// Primary/foreign key as it appears in the source (integer or text)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceKey(String);

impl SourceKey {
    pub fn new(key: impl Into<String>) -> Self {
        SourceKey(key.into())
    }
}

impl fmt::Display for SourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone)]
pub struct Row {
    table: Arc<str>,
    cells: BTreeMap<String, Cell>,
}

impl Row {
    pub fn new(table: Arc<str>, cells: BTreeMap<String, Cell>) -> Self {
        Row { table, cells }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    fn non_text(&self, column: &str) -> Error {
        Error::NonText {
            table: self.table.to_string(),
            column: column.to_string(),
        }
    }

    /// Text value of a column. Numbers are rendered as text; binary is fatal.
    pub fn text(&self, column: &str) -> Result<Option<String>> {
        match self.cells.get(column) {
            None | Some(Cell::Null) => Ok(None),
            Some(Cell::Text(s)) => Ok(Some(s.clone())),
            Some(Cell::Integer(i)) => Ok(Some(i.to_string())),
            Some(Cell::Real(r)) => Ok(Some(r.to_string())),
            Some(Cell::Blob(_)) => Err(self.non_text(column)),
        }
    }

    /// Key value of a column; blank keys read as absent
    pub fn key(&self, column: &str) -> Result<Option<SourceKey>> {
        let key = match self.cells.get(column) {
            None | Some(Cell::Null) => None,
            Some(Cell::Integer(i)) => Some(i.to_string()),
            Some(Cell::Real(r)) => Some(match whole_number(*r) {
                Some(i) => i.to_string(),
                None => r.to_string(),
            }),
            Some(Cell::Text(s)) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else if trimmed.contains('.') {
                    // "10.0" from a spreadsheet export names the same row as 10
                    match trimmed.parse::<f64>().ok().and_then(whole_number) {
                        Some(i) => Some(i.to_string()),
                        None => Some(trimmed.to_string()),
                    }
                } else {
                    Some(trimmed.to_string())
                }
            }
            Some(Cell::Blob(_)) => return Err(self.non_text(column)),
        };
        Ok(key.map(SourceKey))
    }
}

/// Integral value of a float key, if it has one that fits exactly
fn whole_number(r: f64) -> Option<i64> {
    const EXACT: f64 = 9_007_199_254_740_992.0;
    (r.is_finite() && r.fract() == 0.0 && r.abs() <= EXACT).then_some(r as i64)
}

#[derive(Debug, Clone, Default)]
pub struct Table {
    pub name: String,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ============================================================================
// SOURCES
// ============================================================================

/// Anything that can hand over a full table by name
pub trait SnapshotSource {
    /// Read every row. `Error::MissingTable` when the table does not exist.
    fn read_table(&self, table: &str) -> Result<Table>;

    /// Short description for logs
    fn describe(&self) -> String;
}

pub struct SqliteSnapshot {
    conn: Connection,
    label: String,
}

impl SqliteSnapshot {
    /// Open a database file read-only
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::Snapshot(format!(
                "snapshot not found: {}",
                path.display()
            )));
        }
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(SqliteSnapshot {
            conn,
            label: format!("sqlite:{}", path.display()),
        })
    }

    /// Wrap an existing connection (in-memory fixtures)
    pub fn from_connection(conn: Connection) -> Self {
        SqliteSnapshot {
            conn,
            label: "sqlite:memory".to_string(),
        }
    }

    fn table_exists(&self, table: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type IN ('table', 'view') AND name = ?1",
            [table],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}

impl SnapshotSource for SqliteSnapshot {
    fn read_table(&self, table: &str) -> Result<Table> {
        if !self.table_exists(table)? {
            return Err(Error::MissingTable(table.to_string()));
        }

        let mut stmt = self.conn.prepare(&format!("SELECT * FROM \"{}\"", table))?;
        let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();
        let table_name: Arc<str> = Arc::from(table);

        let rows = stmt
            .query_map([], |row| {
                let mut cells = BTreeMap::new();
                for (i, column) in columns.iter().enumerate() {
                    let cell = match row.get_ref(i)? {
                        ValueRef::Null => Cell::Null,
                        ValueRef::Integer(v) => Cell::Integer(v),
                        ValueRef::Real(v) => Cell::Real(v),
                        ValueRef::Text(bytes) => match std::str::from_utf8(bytes) {
                            Ok(s) => Cell::Text(s.to_string()),
                            Err(_) => Cell::Blob(bytes.to_vec()),
                        },
                        ValueRef::Blob(bytes) => Cell::Blob(bytes.to_vec()),
                    };
                    cells.insert(column.clone(), cell);
                }
                Ok(Row::new(table_name.clone(), cells))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Table {
            name: table.to_string(),
            rows,
        })
    }

    fn describe(&self) -> String {
        self.label.clone()
    }
}

pub struct CsvSnapshot {
    dir: PathBuf,
}

impl CsvSnapshot {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        CsvSnapshot { dir: dir.into() }
    }
}

impl SnapshotSource for CsvSnapshot {
    fn read_table(&self, table: &str) -> Result<Table> {
        let path = self.dir.join(format!("{}.csv", table));
        if !path.is_file() {
            return Err(Error::MissingTable(table.to_string()));
        }

        let mut rdr = csv::Reader::from_path(&path)?;
        let headers: Vec<String> = rdr
            .byte_headers()?
            .iter()
            .map(|h| String::from_utf8_lossy(h).trim().to_string())
            .collect();
        let table_name: Arc<str> = Arc::from(table);

        let mut rows = Vec::new();
        for record in rdr.byte_records() {
            let record = record?;
            let mut cells = BTreeMap::new();
            for (column, field) in headers.iter().zip(record.iter()) {
                let cell = match std::str::from_utf8(field) {
                    Ok(s) if s.is_empty() => Cell::Null,
                    Ok(s) => Cell::Text(s.to_string()),
                    Err(_) => Cell::Blob(field.to_vec()),
                };
                cells.insert(column.clone(), cell);
            }
            rows.push(Row::new(table_name.clone(), cells));
        }

        Ok(Table {
            name: table.to_string(),
            rows,
        })
    }

    fn describe(&self) -> String {
        format!("csv:{}", self.dir.display())
    }
}

/// Directory → CSV snapshot, anything else → SQLite file
pub fn open(path: &Path) -> Result<Box<dyn SnapshotSource>> {
    if path.is_dir() {
        Ok(Box::new(CsvSnapshot::new(path)))
    } else {
        Ok(Box::new(SqliteSnapshot::open(path)?))
    }
}

// ============================================================================
// SNAPSHOT
// ============================================================================

/// All tables, fully loaded
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    tables: HashMap<String, Table>,
}

impl Snapshot {
    pub fn load(source: &dyn SnapshotSource) -> Result<Self> {
        info!(source = %source.describe(), "Loading relational snapshot");

        let mut tables = HashMap::new();
        for (name, _) in TABLES {
            let table = source.read_table(name)?;
            debug!(table = %name, rows = table.len(), "Table loaded");
            tables.insert(name.to_string(), table);
        }

        Ok(Snapshot { tables })
    }

    pub fn table(&self, name: &str) -> Result<&Table> {
        self.tables
            .get(name)
            .ok_or_else(|| Error::MissingTable(name.to_string()))
    }

    pub fn row_count(&self) -> usize {
        self.tables.values().map(Table::len).sum()
    }
}

//! GPU catalog database
//!
//! Uses SQLite for the read-only GPU catalog:
//! - listing the catalog for the API and the calculator
//! - seeding from the power-draw CSV
//! - summary statistics

use crate::core::{Error, Gpu, Result};
use crate::feeds::parse;
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Database manager
pub struct Database {
    conn: Connection,
}

/// Outcome of a seed run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedReport {
    pub inserted: usize,
    pub skipped: usize,
}

/// Catalog summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogStats {
    pub total: i64,
    pub highest_tdp: Option<Gpu>,
    pub manufacturers: Vec<String>,
    /// Rounded to whole watts
    pub average_tdp: Option<i64>,
}

/// A seed row before insertion
struct NewGpu {
    manufacturer: String,
    name: String,
    tdp: u32,
}

impl Database {
    /// Open (or create) the catalog at `path`
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        let db = Self { conn };
        db.init_schema()?;

        Ok(db)
    }

    /// In-memory catalog, used by tests and dry runs
    pub fn open_in_memory() -> Result<Self> {
        let db = Self {
            conn: Connection::open_in_memory()?,
        };
        db.init_schema()?;
        Ok(db)
    }

    /// Initialize database schema
    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS gpus (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                manufacturer TEXT NOT NULL,
                name TEXT NOT NULL,
                tdp INTEGER
            );
            "#,
        )?;

        Ok(())
    }

    /// All GPUs, ordered by id
    pub fn list_gpus(&self) -> Result<Vec<Gpu>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, manufacturer, name, tdp FROM gpus ORDER BY id ASC")?;

        let gpus = stmt
            .query_map([], |row| {
                Ok(Gpu {
                    id: row.get(0)?,
                    manufacturer: row.get(1)?,
                    name: row.get(2)?,
                    tdp: row.get(3)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(gpus)
    }

    /// Insert a single GPU, returning its id
    pub fn insert_gpu(&self, manufacturer: &str, name: &str, tdp: Option<u32>) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO gpus (manufacturer, name, tdp) VALUES (?1, ?2, ?3)",
            params![manufacturer, name, tdp],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Replace the catalog with the contents of a power-draw CSV file
    pub fn seed_from_csv(&mut self, path: &Path) -> Result<SeedReport> {
        if !path.exists() {
            return Err(Error::Config(format!("CSV file not found at: {}", path.display())));
        }
        let text = std::fs::read_to_string(path)?;
        self.seed_from_str(&text)
    }

    /// Replace the catalog with rows from `Manufacturer,Card Name,TDP` text
    ///
    /// Rows missing any of the three, or with a non-integer TDP, are skipped.
    pub fn seed_from_str(&mut self, text: &str) -> Result<SeedReport> {
        let mut valid = Vec::new();
        let mut skipped = 0;

        for row in parse(text)? {
            let manufacturer = row.get("manufacturer").unwrap_or_default();
            let name = row.get("card name").unwrap_or_default();
            let tdp = row.get("tdp").and_then(|t| t.parse::<u32>().ok());

            match tdp {
                Some(tdp) if tdp > 0 && !manufacturer.is_empty() && !name.is_empty() => valid.push(NewGpu {
                    manufacturer: manufacturer.to_string(),
                    name: name.to_string(),
                    tdp,
                }),
                _ => {
                    log::debug!("Skipped invalid GPU row at line {}", row.line());
                    skipped += 1;
                }
            }
        }

        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM gpus", [])?;
        {
            let mut stmt = tx.prepare("INSERT INTO gpus (manufacturer, name, tdp) VALUES (?1, ?2, ?3)")?;
            for gpu in &valid {
                stmt.execute(params![gpu.manufacturer, gpu.name, gpu.tdp])?;
            }
        }
        tx.commit()?;

        log::info!("Seeded {} GPUs, skipped {} rows", valid.len(), skipped);

        Ok(SeedReport {
            inserted: valid.len(),
            skipped,
        })
    }

    /// Summary of the catalog contents
    pub fn stats(&self) -> Result<CatalogStats> {
        let total: i64 = self.conn.query_row("SELECT COUNT(*) FROM gpus", [], |row| row.get(0))?;

        let highest_tdp = self
            .conn
            .query_row(
                "SELECT id, manufacturer, name, tdp FROM gpus
                 WHERE tdp IS NOT NULL
                 ORDER BY tdp DESC, id ASC LIMIT 1",
                [],
                |row| {
                    Ok(Gpu {
                        id: row.get(0)?,
                        manufacturer: row.get(1)?,
                        name: row.get(2)?,
                        tdp: row.get(3)?,
                    })
                },
            )
            .optional()?;

        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT manufacturer FROM gpus ORDER BY manufacturer ASC")?;
        let manufacturers = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;

        let average: Option<f64> = self.conn.query_row("SELECT AVG(tdp) FROM gpus", [], |row| row.get(0))?;

        Ok(CatalogStats {
            total,
            highest_tdp,
            manufacturers,
            average_tdp: average.map(|avg| avg.round() as i64),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED_CSV: &str = "Manufacturer,Card Name,TDP\n\
        Nvidia, GeForce RTX 4090 ,450\n\
        Nvidia,GeForce RTX 4070,200\n\
        AMD,Radeon RX 7900 XTX,355\n\
        Intel,Arc A770,\n\
        ,Mystery Card,100\n\
        Intel,Arc A750,lots\n";

    fn create_test_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    #[test]
    fn test_insert_and_list() {
        let db = create_test_db();
        let id = db.insert_gpu("Nvidia", "A100", Some(400)).unwrap();
        db.insert_gpu("Intel", "Unknown", None).unwrap();

        let gpus = db.list_gpus().unwrap();
        assert_eq!(gpus.len(), 2);
        assert_eq!(gpus[0].id, id);
        assert_eq!(gpus[0].tdp, Some(400));
        assert_eq!(gpus[1].tdp, None);
    }

    #[test]
    fn test_seed_skips_invalid_rows() {
        let mut db = create_test_db();
        let report = db.seed_from_str(SEED_CSV).unwrap();

        assert_eq!(report, SeedReport { inserted: 3, skipped: 3 });

        let gpus = db.list_gpus().unwrap();
        assert_eq!(gpus[0].name, "GeForce RTX 4090");
        assert_eq!(gpus[2].manufacturer, "AMD");
    }

    #[test]
    fn test_seed_replaces_existing_rows() {
        let mut db = create_test_db();
        db.insert_gpu("Old", "Card", Some(10)).unwrap();

        db.seed_from_str(SEED_CSV).unwrap();
        assert!(db.list_gpus().unwrap().iter().all(|g| g.manufacturer != "Old"));
    }

    #[test]
    fn test_seed_from_missing_file() {
        let mut db = create_test_db();
        let result = db.seed_from_csv(Path::new("/nonexistent/GPU_power_draw.csv"));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_seed_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gpus.csv");
        std::fs::write(&path, SEED_CSV).unwrap();

        let mut db = create_test_db();
        assert_eq!(db.seed_from_csv(&path).unwrap().inserted, 3);
    }

    #[test]
    fn test_stats() {
        let mut db = create_test_db();
        db.seed_from_str(SEED_CSV).unwrap();

        let stats = db.stats().unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.highest_tdp.unwrap().name, "GeForce RTX 4090");
        assert_eq!(stats.manufacturers, vec!["AMD".to_string(), "Nvidia".to_string()]);
        assert_eq!(stats.average_tdp, Some(335));
    }

    #[test]
    fn test_stats_empty_catalog() {
        let stats = create_test_db().stats().unwrap();
        assert_eq!(stats.total, 0);
        assert!(stats.highest_tdp.is_none());
        assert!(stats.average_tdp.is_none());
    }
}

use std::path::Path;

use rusqlite::Connection;
use tracing;

use super::DatabaseError;

/// Table name and column names are part of the externally visible persisted
/// format — renaming any of them requires a migration path.
const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS procedimientos (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        timestamp TEXT,
        nombre_paciente TEXT,
        documento TEXT,
        fecha_nacimiento TEXT,
        anio_residencia TEXT,
        hospital TEXT,
        rol_residente TEXT,
        instructor TEXT,
        procedimiento_codigo TEXT,
        procedimiento_nombre TEXT,
        metodo_registro TEXT
    );
";

/// Open a SQLite connection to the given path and ensure the schema exists
pub fn open_database(path: &Path) -> Result<Connection, DatabaseError> {
    let conn = Connection::open(path)?;
    configure_pragmas(&conn)?;
    init_schema(&conn)?;
    Ok(conn)
}

/// Open an in-memory database (for testing)
pub fn open_memory_database() -> Result<Connection, DatabaseError> {
    let conn = Connection::open_in_memory()?;
    configure_pragmas(&conn)?;
    init_schema(&conn)?;
    Ok(conn)
}

fn configure_pragmas(conn: &Connection) -> Result<(), DatabaseError> {
    conn.execute_batch(
        "PRAGMA journal_mode=DELETE;
         PRAGMA foreign_keys=ON;",
    )?;
    Ok(())
}

/// Idempotently ensure the registration table exists.
///
/// Safe on every process start; never alters existing rows.
pub fn init_schema(conn: &Connection) -> Result<(), DatabaseError> {
    conn.execute_batch(SCHEMA)?;
    tracing::debug!("Schema ensured for table procedimientos");
    Ok(())
}

/// Count tables in the database (for verification)
pub fn count_tables(conn: &Connection) -> Result<i64, DatabaseError> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        [],
        |row| row.get::<_, i64>(0),
    )?;
    Ok(count)
}

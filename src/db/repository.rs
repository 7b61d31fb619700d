//! Repository functions for the registration table.
//!
//! Append-only by design: records are immutable once persisted, so there are
//! no update or delete functions. All functions take the connection
//! explicitly — the store handle is owned by the caller, never a global.

use chrono::NaiveDateTime;
use rusqlite::{params, Connection, Row};

use super::DatabaseError;
use crate::models::{CaptureMethod, NewRecord, Record, ResidencyYear, ResidentRole};

/// Stored timestamp format, part of the persisted format.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Column order shared by queries and the exporter.
pub const COLUMNS: [&str; 12] = [
    "id",
    "timestamp",
    "nombre_paciente",
    "documento",
    "fecha_nacimiento",
    "anio_residencia",
    "hospital",
    "rol_residente",
    "instructor",
    "procedimiento_codigo",
    "procedimiento_nombre",
    "metodo_registro",
];

const SELECT_COLUMNS: &str = "id, timestamp, nombre_paciente, documento, fecha_nacimiento,
     anio_residencia, hospital, rol_residente, instructor,
     procedimiento_codigo, procedimiento_nombre, metodo_registro";

/// Append one registration and return its store-assigned id.
///
/// A single INSERT statement is atomic in SQLite: on any failure the table is
/// left exactly as it was, with no partial row.
pub fn insert_record(conn: &Connection, record: &NewRecord) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO procedimientos (
            timestamp, nombre_paciente, documento, fecha_nacimiento, anio_residencia,
            hospital, rol_residente, instructor, procedimiento_codigo,
            procedimiento_nombre, metodo_registro
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            record.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            record.patient_name,
            record.document_id,
            record.birth_date_or_age,
            record.residency_year.as_str(),
            record.hospital,
            record.resident_role.as_str(),
            record.instructor,
            record.procedure_code,
            record.procedure_name,
            record.capture_method.as_str(),
        ],
    )?;
    let id = conn.last_insert_rowid();
    tracing::info!(id, procedure = %record.procedure_code, "Registration persisted");
    Ok(id)
}

/// Most recently inserted registration, for the confirmation display.
pub fn fetch_latest(conn: &Connection) -> Result<Option<Record>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {SELECT_COLUMNS} FROM procedimientos ORDER BY id DESC LIMIT 1"
    ))?;
    let mut rows = stmt.query([])?;
    match rows.next()? {
        Some(row) => Ok(Some(record_from_row(row)?)),
        None => Ok(None),
    }
}

/// Full history, newest first, for export.
pub fn fetch_all(conn: &Connection) -> Result<Vec<Record>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {SELECT_COLUMNS} FROM procedimientos ORDER BY id DESC"
    ))?;
    let mut rows = stmt.query([])?;
    let mut records = Vec::new();
    while let Some(row) = rows.next()? {
        records.push(record_from_row(row)?);
    }
    Ok(records)
}

pub fn count_records(conn: &Connection) -> Result<i64, DatabaseError> {
    let count = conn.query_row("SELECT COUNT(*) FROM procedimientos", [], |row| {
        row.get::<_, i64>(0)
    })?;
    Ok(count)
}

fn record_from_row(row: &Row<'_>) -> Result<Record, DatabaseError> {
    let timestamp: String = row.get(1)?;
    let residency_year: String = row.get(5)?;
    let resident_role: String = row.get(7)?;
    let capture_method: String = row.get(11)?;

    Ok(Record {
        id: row.get(0)?,
        timestamp: NaiveDateTime::parse_from_str(&timestamp, TIMESTAMP_FORMAT)
            .map_err(|e| DatabaseError::CorruptRow(format!("timestamp '{timestamp}': {e}")))?,
        patient_name: row.get(2)?,
        document_id: row.get(3)?,
        birth_date_or_age: row.get(4)?,
        residency_year: residency_year.parse::<ResidencyYear>()?,
        hospital: row.get(6)?,
        resident_role: resident_role.parse::<ResidentRole>()?,
        instructor: row.get(8)?,
        procedure_code: row.get(9)?,
        procedure_name: row.get(10)?,
        capture_method: capture_method.parse::<CaptureMethod>()?,
    })
}

use std::path::{Path, PathBuf};

/// Application-level constants
pub const APP_NAME: &str = "Bitacora";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Durable store file, resolved relative to the working directory.
pub const DB_FILE: &str = "procedimientos.db";

/// Procedure catalog source (allow-listed code/name table).
pub const CATALOG_FILE: &str = "codigos_procedimientos.csv";

/// Export artifact, regenerated wholesale after each registration.
pub const EXPORT_FILE: &str = "procedimientos_exportados.csv";

/// Path of the durable store in the working directory.
pub fn db_path() -> PathBuf {
    PathBuf::from(DB_FILE)
}

/// Path of the catalog source in the working directory.
pub fn catalog_path() -> PathBuf {
    PathBuf::from(CATALOG_FILE)
}

/// Path of the export artifact in the working directory.
pub fn export_path() -> PathBuf {
    PathBuf::from(EXPORT_FILE)
}

/// Path of the durable store under an explicit directory.
pub fn db_path_in(dir: &Path) -> PathBuf {
    dir.join(DB_FILE)
}

/// Path of the catalog source under an explicit directory.
pub fn catalog_path_in(dir: &Path) -> PathBuf {
    dir.join(CATALOG_FILE)
}

/// Path of the export artifact under an explicit directory.
pub fn export_path_in(dir: &Path) -> PathBuf {
    dir.join(EXPORT_FILE)
}

//! Bitácora — resident procedure logbook.
//!
//! Captures one medical-procedure registration per user action: raw text is
//! recognized from a scanned document or a voice note, patient fields are
//! heuristically extracted from the (user-corrected) text, merged with the
//! form inputs, persisted to SQLite, and the full history is re-exported as a
//! spreadsheet. The presentation layer (form rendering, uploads, buttons) is
//! an external collaborator that calls into [`workflow::Registry`].

pub mod builder;
pub mod catalog;
pub mod config;
pub mod db;
pub mod export;
pub mod extract;
pub mod models;
pub mod recognize;
pub mod workflow;

use tracing_subscriber::EnvFilter;

/// Initialize tracing for the embedding shell.
///
/// Honors `RUST_LOG` when set, otherwise defaults to info-level output for
/// this crate only.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bitacora=info")),
        )
        .init();

    tracing::info!("Bitacora starting v{}", config::APP_VERSION);
}

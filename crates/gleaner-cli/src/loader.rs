//! Loading input files into documents.

use gleaner_domain::{Diagnostic, DiagnosticKind, Document, Scope};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Extract every file in order; failures become diagnostics.
///
/// An unsupported type is skipped with an `unsupported-type` diagnostic. A
/// malformed or unreadable file is reported as `extraction`, so its text is
/// absent rather than silently empty.
pub fn load_documents(paths: &[PathBuf]) -> (Vec<Document>, Vec<Diagnostic>) {
    let mut documents = Vec::with_capacity(paths.len());
    let mut diagnostics = Vec::new();

    for path in paths {
        match gleaner_extract::load_path(path) {
            Ok(document) => {
                debug!(document = document.name(), kind = %document.kind(), "Loaded document");
                documents.push(document);
            }
            Err(error) => {
                warn!(path = %path.display(), error = %error, "Skipping file");
                let kind = if error.is_unsupported() {
                    DiagnosticKind::UnsupportedType
                } else {
                    DiagnosticKind::Extraction
                };
                diagnostics.push(Diagnostic::new(
                    Scope::Document(display_name(path)),
                    kind,
                    error.to_string(),
                ));
            }
        }
    }

    (documents, diagnostics)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

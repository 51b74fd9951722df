use std::path::Path;

use crate::ConfigError;

/// Input file extensions the loader accepts.
const ALLOWED_EXTENSIONS: [&str; 3] = ["txt", "csv", "dat"];

/// Load the domain list from a plain-text input file, one domain per line.
///
/// Lines are trimmed and blank lines dropped; ordering is preserved. The
/// extension check runs before any I/O so a mistyped path fails fast.
///
/// # Errors
///
/// Returns [`ConfigError::UnsupportedExtension`] unless the file ends in
/// `txt`, `csv`, or `dat`, and [`ConfigError::DomainsFileIo`] if it cannot
/// be read.
pub fn load_domains(path: &Path) -> Result<Vec<String>, ConfigError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(ConfigError::UnsupportedExtension {
            path: path.display().to_string(),
            extension,
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::DomainsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let domains: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect();

    tracing::debug!(path = %path.display(), count = domains.len(), "loaded domain list");
    Ok(domains)
}

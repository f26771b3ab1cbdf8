//! Catalog validation command implementation.

use super::{CatalogFormat, CliError};
use geoquiz::Catalog;
use std::fmt::Write;
use std::path::Path;

/// Execute the catalog command.
///
/// Validates the given catalog file (or the bundled one) and lists its cities.
///
/// # Errors
///
/// Returns an error if the catalog cannot be read or fails validation.
pub(crate) fn execute(path: Option<&Path>, format: CatalogFormat) -> Result<(), CliError> {
    print!("{}", render(path, format)?);
    Ok(())
}

/// Load the catalog and format it for output.
fn render(path: Option<&Path>, format: CatalogFormat) -> Result<String, CliError> {
    let (catalog, source) = match path {
        Some(path) => {
            let catalog = Catalog::load(path).map_err(|e| {
                CliError::new(format!("Invalid catalog {}: {e}", path.display()))
            })?;
            (catalog, path.display().to_string())
        }
        None => (Catalog::builtin()?, "bundled catalog".to_string()),
    };

    let mut output = String::new();
    match format {
        CatalogFormat::Text => {
            let _ = writeln!(output, "Validating: {source}");
            let _ = writeln!(
                output,
                "  ✓ {} cities, names and positions valid\n",
                catalog.len()
            );
            for city in catalog.cities() {
                let _ = writeln!(output, "  {:<24} {}", city.name, city.position);
            }
        }
        CatalogFormat::Json => {
            output = catalog.to_json_string()?;
            output.push('\n');
        }
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_catalog_text() {
        let text = render(None, CatalogFormat::Text).unwrap();
        assert!(text.starts_with("Validating: bundled catalog"));
        assert!(text.contains("Ljubljana"));
    }

    #[test]
    fn test_json_reloads() {
        let json = render(None, CatalogFormat::Json).unwrap();
        assert!(json.contains("\"lng\""));
        assert_eq!(Catalog::from_json_str(&json).unwrap(), Catalog::builtin().unwrap());
    }

    #[test]
    fn test_invalid_file_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cities.json");
        std::fs::write(&path, r#"{"cities":[]}"#).unwrap();

        let err = render(Some(path.as_path()), CatalogFormat::Text).unwrap_err();
        assert!(err.to_string().starts_with("Invalid catalog"), "{err}");
        assert!(execute(Some(path.as_path()), CatalogFormat::Json).is_err());
    }
}

use super::build::{compile_routes, CompiledRoutes};
use super::error::RoutesLoadError;
use std::path::Path;
use tracing::{error, info};

/// Read and compile a routing configuration file.
///
/// An unreadable file fails as a whole; callers that want to keep running use
/// [`CompiledRoutes::empty`]. Malformed lines do not fail the load, they are
/// returned in [`CompiledRoutes::diagnostics`].
pub fn load_routes<P: AsRef<Path>>(path: P) -> Result<CompiledRoutes, RoutesLoadError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| {
        let err = RoutesLoadError {
            path: path.to_path_buf(),
            source,
        };
        error!(error = %err.source, "{err}");
        err
    })?;

    let compiled = compile_routes(&content);
    info!(
        file = %path.display(),
        routes_count = compiled.table.len(),
        diagnostics = compiled.diagnostics.len(),
        "Routing table compiled"
    );
    Ok(compiled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file() {
        let err = load_routes("/definitely/not/here/routes.cfg").unwrap_err();
        assert_eq!(err.source.kind(), std::io::ErrorKind::NotFound);
        assert!(err.to_string().contains("routes.cfg"));
    }
}

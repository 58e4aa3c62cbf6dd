use super::error::{ConfigParseError, ConfigParseErrorKind};
use super::types::{RouteEntry, RouteMethod, RouteTable};
use std::sync::Arc;
use tracing::{debug, error};

/// Suffix marking a path as a literal prefix followed by positional params.
pub const PARAMS_SUFFIX: &str = ":params";

/// Suffix appended to the lowercased controller base name.
pub const CONTROLLER_SUFFIX: &str = "controller";

/// Output of [`compile_routes`]: a frozen table plus the diagnostics collected
/// for every line that was skipped.
#[derive(Debug, Clone, Default)]
pub struct CompiledRoutes {
    pub table: RouteTable,
    pub diagnostics: Vec<ConfigParseError>,
}

impl CompiledRoutes {
    /// Table used when the configuration could not be read at all.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Compile routing configuration text into a [`RouteTable`].
///
/// Parsing is best effort: a malformed line is recorded as a
/// [`ConfigParseError`] and skipped, it never aborts compilation.
#[must_use]
pub fn compile_routes(text: &str) -> CompiledRoutes {
    let mut entries = Vec::new();
    let mut diagnostics = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        match parse_directive(raw) {
            Ok(None) => {}
            Ok(Some(entry)) => {
                debug!(
                    line = line_no,
                    method = %entry.method,
                    path = %entry.path_pattern,
                    controller = %entry.controller,
                    action = %entry.action,
                    params = entry.has_params,
                    "route"
                );
                let twin = if entry.has_params {
                    None
                } else {
                    entry.slash_toggled()
                };
                entries.push(entry);
                if let Some(twin) = twin {
                    debug!(
                        line = line_no,
                        method = %twin.method,
                        path = %twin.path_pattern,
                        controller = %twin.controller,
                        action = %twin.action,
                        params = twin.has_params,
                        "route"
                    );
                    entries.push(twin);
                }
            }
            Err(kind) => {
                let err = ConfigParseError {
                    line: line_no,
                    raw: raw.to_string(),
                    kind,
                };
                error!(line = line_no, "{err}");
                diagnostics.push(err);
            }
        }
    }

    CompiledRoutes {
        table: RouteTable::new(entries),
        diagnostics,
    }
}

/// Parse one physical line. `Ok(None)` for blank and comment lines.
fn parse_directive(raw: &str) -> Result<Option<RouteEntry>, ConfigParseErrorKind> {
    let line = simplified(raw);
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let items: Vec<&str> = line.split(' ').collect();
    let [method, path, target] = items.as_slice() else {
        return Err(ConfigParseErrorKind::TokenCount { found: items.len() });
    };
    let path = trimmed_quotes(path);
    let target = trimmed_quotes(target);

    let method = RouteMethod::from_directive(method)
        .ok_or_else(|| ConfigParseErrorKind::UnknownMethod((*method).to_string()))?;

    let (path_pattern, has_params) = match path.strip_suffix(PARAMS_SUFFIX) {
        Some(prefix) => (prefix.to_string(), true),
        None => (path.to_string(), false),
    };

    let parts: Vec<&str> = target.split('#').collect();
    let [controller_base, action] = parts.as_slice() else {
        return Err(ConfigParseErrorKind::InvalidAction(target.to_string()));
    };

    Ok(Some(RouteEntry {
        method,
        path_pattern,
        has_params,
        controller: Arc::from(format!(
            "{}{CONTROLLER_SUFFIX}",
            controller_base.to_lowercase()
        )),
        action: Arc::from(*action),
    }))
}

/// Trim the line and collapse every internal whitespace run to one space.
fn simplified(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strip one layer of matching surrounding quotes (`"` or `'`).
fn trimmed_quotes(token: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = token
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    token
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simplified_collapses_whitespace() {
        assert_eq!(simplified("  get\t/a   b#c  "), "get /a b#c");
        assert_eq!(simplified("   "), "");
    }

    #[test]
    fn test_trimmed_quotes() {
        assert_eq!(trimmed_quotes("\"/about\""), "/about");
        assert_eq!(trimmed_quotes("'home#about'"), "home#about");
        assert_eq!(trimmed_quotes("\"\"/x\"\""), "\"/x\"");
        assert_eq!(trimmed_quotes("\"/mixed'"), "\"/mixed'");
        assert_eq!(trimmed_quotes("\""), "\"");
    }

    #[test]
    fn test_parse_directive_skips_comments_and_blanks() {
        assert_eq!(parse_directive(""), Ok(None));
        assert_eq!(parse_directive("   # get /x a#b"), Ok(None));
    }

    #[test]
    fn test_parse_directive_params_suffix() {
        let entry = parse_directive("GET /users:params User#show")
            .unwrap()
            .unwrap();
        assert_eq!(entry.method, RouteMethod::Get);
        assert_eq!(entry.path_pattern, "/users");
        assert!(entry.has_params);
        assert_eq!(&*entry.controller, "usercontroller");
        assert_eq!(&*entry.action, "show");
    }

    #[test]
    fn test_parse_directive_errors() {
        assert_eq!(
            parse_directive("weird /x"),
            Err(ConfigParseErrorKind::TokenCount { found: 2 })
        );
        assert_eq!(
            parse_directive("put /x a#b"),
            Err(ConfigParseErrorKind::UnknownMethod("put".to_string()))
        );
        assert_eq!(
            parse_directive("get /x a#b#c"),
            Err(ConfigParseErrorKind::InvalidAction("a#b#c".to_string()))
        );
        assert_eq!(
            parse_directive("get /x home"),
            Err(ConfigParseErrorKind::InvalidAction("home".to_string()))
        );
    }

    #[test]
    fn test_compile_counts_twins() {
        let compiled = compile_routes(
            "get /about home#about\n\
             match / home#index\n\
             post /users:params user#update\n",
        );
        assert!(compiled.is_clean());
        let paths: Vec<&str> = compiled
            .table
            .iter()
            .map(|e| e.path_pattern.as_str())
            .collect();
        // "/" toggles to an empty path, which is dropped
        assert_eq!(paths, vec!["/about", "/about/", "/", "/users"]);
    }
}

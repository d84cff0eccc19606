use http::Method;

use crate::context::ProcessingContext;
use crate::error::{BuildError, BuildResult};
use crate::model::MappingDefinition;
use crate::symbols::annotations::resolve_annotation;
use crate::symbols::{markers, Annotation};

/// Parse a mapping verb; accepts `GET` as well as `RequestMethod.GET`
pub fn parse_verb(raw: &str) -> Option<Method> {
    let name = raw.rsplit('.').next().unwrap_or(raw).trim().to_ascii_uppercase();
    match name.as_str() {
        "GET" => Some(Method::GET),
        "HEAD" => Some(Method::HEAD),
        "POST" => Some(Method::POST),
        "PUT" => Some(Method::PUT),
        "PATCH" => Some(Method::PATCH),
        "DELETE" => Some(Method::DELETE),
        "OPTIONS" => Some(Method::OPTIONS),
        "TRACE" => Some(Method::TRACE),
        _ => None,
    }
}

impl ProcessingContext<'_> {
    /// HTTP mapping of a controller or method, following mapping aliases
    ///
    /// `path` and `method` are logically single-valued; when several values
    /// are given the first is taken and a warning is reported.
    pub fn resolve_mapping(
        &self,
        annotations: &[Annotation],
        location: &str,
    ) -> BuildResult<Option<MappingDefinition>> {
        let Some(resolved) = resolve_annotation(self.provider, annotations, markers::REQUEST_MAPPING)
        else {
            return Ok(None);
        };

        let paths = resolved.strings("path");
        if paths.len() > 1 {
            self.diagnostics.warning(
                location,
                format!(
                    "Mapping declares {} paths, only the first ('{}') is used",
                    paths.len(),
                    paths[0]
                ),
            );
        }
        let url_template = paths.into_iter().next();

        let verbs = resolved.strings("method");
        if verbs.len() > 1 {
            self.diagnostics.warning(
                location,
                format!(
                    "Mapping declares {} methods, only the first ('{}') is used",
                    verbs.len(),
                    verbs[0]
                ),
            );
        }
        let verb = match verbs.first() {
            Some(raw) => Some(parse_verb(raw).ok_or_else(|| BuildError::InvalidVerb {
                location: location.to_string(),
                verb: raw.clone(),
            })?),
            None => None,
        };

        Ok(Some(MappingDefinition::new(url_template, verb)))
    }
}

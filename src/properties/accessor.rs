use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use crate::context::ProcessingContext;
use crate::symbols::{DeclaredType, MethodSymbol};

use super::{is_ignored, PropertyCandidate, PropertyLocator};

/// `get`/`is` followed by an upper-case letter
static ACCESSOR_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:get|is)(\p{Lu}.*)$").expect("accessor name regex should be valid")
});

/// Property name exposed by an accessor method, if it is one
pub fn accessor_property_name(method_name: &str) -> Option<String> {
    let captures = ACCESSOR_NAME.captures(method_name)?;
    let rest = captures.get(1)?.as_str();
    let mut chars = rest.chars();
    let first = chars.next()?;
    if rest.chars().count() == 1 {
        return Some(rest.to_lowercase());
    }
    Some(first.to_lowercase().chain(chars).collect())
}

/// Public, non-static, zero-argument `getX()`/`isX()` methods declared on the type
///
/// A method is skipped when it carries the ignore marker or when an
/// ignored instance field has the same property name.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessorLocator;

impl AccessorLocator {
    fn is_accessor(method: &MethodSymbol) -> bool {
        method.has_modifier("public")
            && !method.has_modifier("static")
            && method.parameters.is_empty()
            && method.return_type.is_some()
    }
}

impl PropertyLocator for AccessorLocator {
    fn name(&self) -> &'static str {
        "accessor"
    }

    fn locate<'t>(
        &self,
        ctx: &ProcessingContext<'_>,
        declared: &'t DeclaredType,
    ) -> Vec<PropertyCandidate<'t>> {
        let ignored_fields: HashSet<&str> = declared
            .fields
            .iter()
            .filter(|f| !f.has_modifier("static") && !f.has_modifier("transient"))
            .filter(|f| is_ignored(ctx.provider, &f.annotations))
            .map(|f| f.name.as_str())
            .collect();

        declared
            .methods
            .iter()
            .filter(|m| Self::is_accessor(m))
            .filter(|m| !is_ignored(ctx.provider, &m.annotations))
            .filter_map(|m| {
                let name = accessor_property_name(&m.name)?;
                if ignored_fields.contains(name.as_str()) {
                    return None;
                }
                Some(PropertyCandidate {
                    name,
                    ty: m.return_type.as_ref()?,
                    annotations: &m.annotations,
                    source: self.name(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessor_property_name() {
        assert_eq!(accessor_property_name("getName").as_deref(), Some("name"));
        assert_eq!(accessor_property_name("isActive").as_deref(), Some("active"));
        assert_eq!(accessor_property_name("getX").as_deref(), Some("x"));
        assert_eq!(accessor_property_name("getURL").as_deref(), Some("uRL"));
        assert_eq!(accessor_property_name("get"), None);
        assert_eq!(accessor_property_name("getter"), None);
        assert_eq!(accessor_property_name("island"), None);
        assert_eq!(accessor_property_name("name"), None);
    }
}

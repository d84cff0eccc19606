use crate::config::GenConfig;
use crate::model::{TypeDefinition, TypeKind};
use crate::symbols::markers;

use super::TypeGraph;

/// Generated name of the escape type
pub const ANY: &str = "any";
/// Full, short and generated name of the synthetic collection marker
pub const COLLECTION: &str = "[]";

const NUMBER: &str = "number";
const STRING: &str = "string";
const BOOLEAN: &str = "boolean";

const PRIMITIVES: &[(&str, &str)] = &[
    ("long", NUMBER),
    ("int", NUMBER),
    ("short", NUMBER),
    ("byte", NUMBER),
    ("double", NUMBER),
    ("float", NUMBER),
    ("char", STRING),
    ("boolean", BOOLEAN),
    ("void", "void"),
];

const BOXED: &[(&str, &str)] = &[
    ("java.lang.String", STRING),
    ("java.lang.Character", STRING),
    ("java.lang.Long", NUMBER),
    ("java.lang.Integer", NUMBER),
    ("java.lang.Short", NUMBER),
    ("java.lang.Byte", NUMBER),
    ("java.lang.Double", NUMBER),
    ("java.lang.Float", NUMBER),
    ("java.lang.Number", NUMBER),
    ("java.math.BigDecimal", NUMBER),
    ("java.math.BigInteger", NUMBER),
    ("java.lang.Boolean", BOOLEAN),
    ("java.lang.Void", "void"),
];

fn short_name(full_name: &str) -> &str {
    full_name.rsplit('.').next().unwrap_or(full_name)
}

/// Register every predefined type; returns how many definitions were offered
pub(super) fn seed(graph: &TypeGraph, config: &GenConfig) -> usize {
    let mut offered = 0;
    let mut add = |full_name: &str, ts_name: &str, kind: TypeKind| {
        graph.register(TypeDefinition::predefined(
            full_name,
            short_name(full_name),
            ts_name,
            kind,
        ));
        offered += 1;
    };

    add(markers::OBJECT, ANY, TypeKind::Primitive);
    for (name, ts) in PRIMITIVES.iter().chain(BOXED.iter()) {
        add(name, ts, TypeKind::Primitive);
    }
    add(markers::MAP_ROOT, "Map", TypeKind::Map);
    add(COLLECTION, COLLECTION, TypeKind::Collection);

    if config.enable_time_integration {
        add("java.time.ZonedDateTime", &config.time.zoned_date_time, TypeKind::Primitive);
        add("java.time.LocalDateTime", &config.time.local_date_time, TypeKind::Primitive);
        add("java.time.LocalTime", &config.time.local_time, TypeKind::Primitive);
        add("java.time.LocalDate", &config.time.local_date, TypeKind::Primitive);
    }

    // overrides may carry generic arguments at use sites, hence Interface
    for (name, ts) in &config.type_overrides {
        add(name, ts, TypeKind::Interface);
    }
    offered
}

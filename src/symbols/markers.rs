//! Qualified names of the metadata markers the builders look for.

/// Marks a controller type; attributes `name` and `module_name`
pub const ENDPOINT: &str = "tsgen.Endpoint";
/// Excludes a member from property discovery
pub const IGNORE: &str = "tsgen.Ignore";
/// Overrides the display name of a type, member or method (`value`)
pub const NAME: &str = "tsgen.Name";

pub const REQUEST_MAPPING: &str = "org.springframework.web.bind.annotation.RequestMapping";
pub const GET_MAPPING: &str = "org.springframework.web.bind.annotation.GetMapping";
pub const POST_MAPPING: &str = "org.springframework.web.bind.annotation.PostMapping";
pub const PUT_MAPPING: &str = "org.springframework.web.bind.annotation.PutMapping";
pub const DELETE_MAPPING: &str = "org.springframework.web.bind.annotation.DeleteMapping";
pub const PATCH_MAPPING: &str = "org.springframework.web.bind.annotation.PatchMapping";

pub const REQUEST_PARAM: &str = "org.springframework.web.bind.annotation.RequestParam";
pub const PATH_VARIABLE: &str = "org.springframework.web.bind.annotation.PathVariable";
pub const REQUEST_BODY: &str = "org.springframework.web.bind.annotation.RequestBody";

pub const LOMBOK_DATA: &str = "lombok.Data";
pub const LOMBOK_VALUE: &str = "lombok.Value";
pub const LOMBOK_GETTER: &str = "lombok.Getter";

pub const NOT_NULL: &str = "jakarta.validation.constraints.NotNull";
pub const NOT_EMPTY: &str = "jakarta.validation.constraints.NotEmpty";

/// Namespace of the host language's own meta-annotations, never traversed
pub const META_ANNOTATION_NAMESPACE: &str = "java.lang.annotation.";

pub const OBJECT: &str = "java.lang.Object";
pub const COLLECTION_ROOT: &str = "java.util.Collection";
pub const MAP_ROOT: &str = "java.util.Map";

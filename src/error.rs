use std::fmt;

/// Failure while building a type definition or an endpoint
///
/// `NotAController` is scoped to a single type and does not abort the
/// round; every other variant is treated as round-aborting by the
/// [`Processor`](crate::processor::Processor).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// An endpoint build was requested for a type without the endpoint marker
    NotAController {
        /// Qualified name of the offending type
        type_name: String,
    },
    /// A type variable names an owner the symbol provider does not know
    UnknownGenericOwner {
        /// Type variable name as written (`T`)
        variable: String,
        /// Qualified owner name (type, or `Type#method`)
        owner: String,
    },
    /// A type referenced by the build is missing from the symbol provider
    MissingType {
        /// Qualified name that could not be found
        type_name: String,
    },
    /// A mapping annotation carried a verb that is not a valid HTTP method
    InvalidVerb {
        /// Where the mapping was found
        location: String,
        /// Raw verb value
        verb: String,
    },
}

impl BuildError {
    /// `true` when the error only affects the type being built
    pub fn is_type_scoped(&self) -> bool {
        matches!(self, BuildError::NotAController { .. })
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::NotAController { type_name } => {
                write!(
                    f,
                    "Cannot build endpoint for '{}': type is not marked as an endpoint",
                    type_name
                )
            }
            BuildError::UnknownGenericOwner { variable, owner } => {
                write!(
                    f,
                    "Type variable '{}' refers to unknown generic owner '{}'",
                    variable, owner
                )
            }
            BuildError::MissingType { type_name } => {
                write!(f, "Type '{}' is not known to the symbol provider", type_name)
            }
            BuildError::InvalidVerb { location, verb } => {
                write!(f, "Invalid HTTP verb '{}' at {}", verb, location)
            }
        }
    }
}

impl std::error::Error for BuildError {}

/// Result alias used by the builders
pub type BuildResult<T> = Result<T, BuildError>;

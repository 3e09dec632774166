use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("ref pointer has too few chunks after stripping 'io.k8s.': {pointer} -> {chunks:?}")]
    RefTooFewChunks { pointer: String, chunks: Vec<String> },

    #[error("definition id has too few chunks after stripping 'io.k8s.': {id} -> {chunks:?}")]
    DefinitionTooFewChunks { id: String, chunks: Vec<String> },

    #[error("cannot compute dependencies of definition {package}/{type_name}: {source}")]
    DependencyComputation {
        package: String,
        type_name: String,
        #[source]
        source: Box<CoreError>,
    },

    #[error("cannot patch definition {package}/{type_name}: {source}")]
    PatchDefinition {
        package: String,
        type_name: String,
        #[source]
        source: Box<CoreError>,
    },

    #[error("cannot render swagger file for package {package}: {source}")]
    RenderPackage {
        package: String,
        #[source]
        source: Box<CoreError>,
    },

    #[error("cannot serialize swagger document for package {package}: {source}")]
    Serialize {
        package: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(
        "unresolved dependency: package {dependency} is not known to the plan (required by {dependent})"
    )]
    UnresolvedDependency { dependency: String, dependent: String },

    #[error("circular dependency detected among packages: {0:?}")]
    CircularDependency(Vec<String>),

    #[error(
        "package {group} has inconsistent group/version across its GroupVersionKind entries: {previous:?} vs {found:?}"
    )]
    InconsistentGroupVersion {
        group: String,
        previous: (String, String),
        found: (String, String),
    },
}

pub type Result<T> = std::result::Result<T, CoreError>;

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("`--file` and `--kube-version` cannot be used at the same time")]
    ConflictingInputFlags,

    #[error("one of `--file` or `--kube-version` must be specified")]
    MissingInputFlag,

    #[error("cannot parse kubernetes version '{version}': {source}")]
    InvalidVersion {
        version: String,
        #[source]
        source: semver::Error,
    },

    #[error("cannot download swagger file from {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("download from {url} failed with status {status}")]
    DownloadStatus { url: String, status: u16 },

    #[error("cannot read swagger file {path}: {source}")]
    ReadSwaggerFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse swagger document {path}: {source}")]
    ParseSwagger {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write file {path}: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("package name '{0}' doesn't have enough path chunks")]
    PackageNameTooShort(String),

    #[error("subprocess `{command}` failed for package {package}: {detail}")]
    SubprocessFailed {
        command: String,
        package: String,
        detail: String,
    },

    #[error("cannot find rendered swagger text for package {0}")]
    MissingRenderedPackage(String),

    #[error(transparent)]
    Core(#[from] ksplit_core::CoreError),
}

pub type Result<T> = std::result::Result<T, CliError>;

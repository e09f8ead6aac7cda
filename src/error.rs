use std::fmt;
use std::num::ParseIntError;

use thiserror::Error;

/// Validation failures for a convert form submission.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("missing input file")]
    MissingFile,

    #[error("please provide {0}")]
    MissingField(&'static str),

    #[error("failed parsing {label} {value}: {source}")]
    MalformedInteger {
        label: &'static str,
        value: String,
        source: ParseIntError,
    },

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Failure to render the convert form at startup.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("catalog has no {0}")]
    MissingOption(&'static str),

    #[error("template placeholder {0} was not substituted")]
    UnresolvedPlaceholder(String),

    #[error(transparent)]
    Fmt(#[from] fmt::Error),
}

// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors produced by the attribute parsers.
//!
//! The resolution entry point never surfaces these; they are mapped onto fallback values at the
//! boundary. They are public so the document layer can reuse the parsers directly.

use thiserror::Error;

/// Errors that can occur while parsing a length value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LengthError {
    /// The value was empty or only whitespace.
    #[error("Empty length value")]
    Empty,
    /// The value does not start with a numeric literal.
    #[error("Length '{0}' does not start with a number")]
    MissingNumber(String),
    /// The value has a unit suffix that is not a known length unit.
    #[error("Unknown length unit '{unit}' in '{value}'")]
    UnknownUnit {
        /// The full value that was parsed.
        value: String,
        /// The unrecognized unit token.
        unit: String,
    },
}

/// Errors that can occur while parsing a `transform` attribute.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TransformError {
    /// The transform function name is not one of the SVG transform functions.
    #[error("Unknown transform function '{0}'")]
    UnknownFunction(String),
    /// A transform function is missing its closing parenthesis, or has no argument list.
    #[error("Malformed transform function '{0}'")]
    Malformed(String),
    /// A transform function was called with an unsupported number of arguments.
    #[error("Transform function '{name}' does not take {count} arguments")]
    ArgumentCount {
        /// The transform function.
        name: String,
        /// The number of arguments that were given.
        count: usize,
    },
    /// An argument could not be parsed as a number.
    #[error("Invalid number '{0}' in transform")]
    InvalidNumber(String),
}

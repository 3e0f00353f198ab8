//! This module contains all configuration-relevant code: the full daemon
//! configuration structure as well as everything needed to locate and
//! parse the configuration file.
//!
//! Your starting point should probably be [`load_configuration`]
//! (or [`ConfigurationLoader::load_into`] if you already own a [`Configuration`]).
//!
//! # File format
//! The configuration file is line-oriented. Each line is one of:
//! - a comment (the very first character is `#`),
//! - an empty line,
//! - a directive of the form `keyword = value`.
//!
//! There is no quoting, escaping or line continuation. A value ends at the
//! first whitespace character.
//!
//! # Internals
//! Loading happens in four steps:
//! - [`PathResolver`] opens the file (either a literal path or the first
//!   readable candidate of a fixed search list),
//! - [`ConfigurationLines`] streams normalized lines out of it,
//! - [`FieldRegistry`] finds the first keyword occurring in each line,
//! - [`match_and_apply`] converts the value and stores it in the field the
//!   keyword points to.
//!
//! Anything that goes wrong inside an opened file becomes a
//! [`ConfigurationDiagnostic`] and loading carries on, so the daemon can
//! still start with default values for the broken fields.

mod bounded;
mod diagnostics;
mod dispatch;
mod error;
mod loader;
mod reader;
mod registry;
mod resolver;
mod structure;

pub use bounded::*;
pub use diagnostics::*;
pub use dispatch::*;
pub use error::*;
pub use loader::*;
pub use reader::*;
pub use registry::*;
pub use resolver::*;
pub use structure::*;

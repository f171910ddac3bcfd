//! Intlx - react-intl message extraction
//!
//! Intlx is a CLI tool and library for extracting text fragments into
//! react-intl message catalogs. An extraction appends a structured entry to
//! the component's `<Component>.messages.<ext>` definitions file, merges the
//! id→text mapping into the shared locale dictionary JSON, and composes the
//! reference expression that replaces the original selection.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (user-facing commands)
//! - `config`: Configuration file loading and parsing
//! - `catalog`: Catalog documents (definitions file, locale dictionary, commit)
//! - `extract`: The extraction orchestrator

pub mod catalog;
pub mod cli;
pub mod config;
pub mod extract;

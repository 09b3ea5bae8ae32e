//! In-memory program and host service.
//!
//! The analysis only ever talks to [`Program`](crate::hir::Program) and
//! [`LanguageService`](crate::ide::LanguageService). This module provides
//! implementations of both that need no type-checker: [`ProgramBuilder`]
//! writes TypeScript text and binds symbols as it goes, [`MemoryProgram`]
//! answers the oracle queries, and [`MemoryService`] plays the host whose
//! results get decorated.

mod builder;
mod program;
mod service;

pub use builder::{Decl, DeclKind, ProgramBuilder};
pub use program::MemoryProgram;
pub use service::MemoryService;

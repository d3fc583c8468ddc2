//! Static analysis for KeeperFX-style level scripts, built for editors:
//! per-line parsing with aggressive error recovery, a whole-script
//! analysis pass over a static command registry, and position queries
//! (completion, signature help, hover) on top of the same tree.
//!
//! The entry point is a [`Document`] over a shared [`LanguageDef`]:
//!
//! ```
//! use std::sync::Arc;
//! use keeperscript_analysis::{Document, LanguageDef};
//!
//! let lang = Arc::new(LanguageDef::new());
//! let doc = Document::new(lang, "LEVEL_VERSION(1)\nWIN_GAEM");
//! assert!(doc
//!     .diagnostics()
//!     .iter()
//!     .any(|d| d.message.contains("unknown command")));
//! ```

pub mod analysis;
pub mod diagnostics;
pub mod document;
pub mod entities;
pub mod grammar;
pub mod queries;
pub mod registry;

pub use analysis::state::{ScriptState, Site};
pub use analysis::types::{Candidate, TypeCheck};
pub use analysis::{analyze, Analysis};
pub use diagnostics::{Diagnostic, Severity};
pub use document::{Document, EditDelta, Line};
pub use entities::{CustomEntities, CustomEntity, EntityClass};
pub use queries::{
    completions, hover, outline, references, signature_help, OutlineNode, SignatureInfo,
};
pub use registry::{CommandDescriptor, LanguageDef, ParamKind, ParamSpec};

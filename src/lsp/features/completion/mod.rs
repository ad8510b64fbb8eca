//! Context-sensitive completion for MyST markdown
//!
//! This module provides:
//! - Classification of the cursor line into one completion context
//! - Reference-definition label completion with usage counts
//! - Heading anchor completion that respects an existing closing paren
//! - Image and link path completion relative to the document or project root
//! - MyST directive/role catalogs and KaTeX commands inside math

pub mod catalog;
pub mod context;
pub mod engine;
pub mod heading;
pub mod item;
pub mod katex;
pub mod math_env;
pub mod paths;
pub mod ranking;
pub mod reference;

pub use catalog::{directive_candidates, role_candidates, MathCatalog};
pub use context::{classify_context, classify_with_gates, ContextGates, ContextResult, Guard};
pub use engine::CompletionEngine;
pub use heading::{heading_link_edit, HeadingEdit};
pub use item::{CandidateDoc, CandidateItem, CandidateKind, InsertTemplate};
pub use math_env::{math_environment, MathEnvironment};
pub use paths::PathQuery;
pub use reference::{reference_candidates, ReferenceDefinition, ReferenceIndex};

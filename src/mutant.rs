//! Mutation-site data model.

use serde::{Deserialize, Serialize};

/// Concrete code transform belonging to a [`Mutant`].
///
/// Produced by the generation phase; this core only reads it. The `file`
/// path is the grouping key for the per-file cache index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mutation {
    /// Path of the file the transform applies to.
    pub file: String,
    /// Original source snippet at the mutation site.
    pub original: String,
    /// Replacement snippet.
    pub replacement: String,
}

/// One mutation site: where a mutation operator was applied and the
/// transform it produced.
///
/// Created once by the generation phase and immutable thereafter. Each
/// mutant reaches the collector exactly once, either through an executed
/// [`MutantResult`](crate::outcome::MutantResult) or directly as an
/// uncovered shadow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mutant {
    /// Source file containing the mutation site.
    pub file: String,
    /// Enclosing class or type name, when there is one.
    #[serde(default)]
    pub class: Option<String>,
    /// Enclosing method or function name, when there is one.
    #[serde(default)]
    pub method: Option<String>,
    /// Line number of the mutation site.
    pub line: u32,
    /// Identifier of the mutation operator that produced this mutant.
    pub mutator: String,
    /// The applied transform.
    pub mutation: Mutation,
}

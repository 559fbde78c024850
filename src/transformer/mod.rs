//! # Transformer Component
//!
//! The transformer rewrites identifiers in an analyzed AST to make every declaration in
//! a module textually unique, or to undo that rewrite. It operates in one of three modes:
//!
//! 1. **Contextual renaming** - suffix only the declarations that would otherwise collide
//! 2. **Inline renaming** - suffix every declaration unconditionally, for inlining-safe output
//! 3. **Inversion** - strip suffixes a uniquifying pass added, wherever that is safe
//!
//! ## Safety Guarantees
//!
//! All three modes preserve JavaScript semantics:
//! - Execution order maintained
//! - Side effects preserved
//! - Scope integrity preserved
//! - `arguments` is never renamed or treated as shadowable

use crate::parser::ast_types::Program;
use std::collections::HashMap;
use thiserror::Error;

pub mod inverter;
pub mod renamer;

#[cfg(test)]
mod tests;

pub use inverter::InvertResult;
pub use renamer::{RenameMode, RenameResult, RenamerConfig};

/// Which direction the transformer runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformMode {
    /// Suffix only declarations that would otherwise collide with an earlier one.
    Contextual,
    /// Suffix every declaration unconditionally.
    Inline,
    /// Strip suffixes added by a prior uniquifying pass, where safe.
    Invert,
}

/// Configuration for the transformer component.
#[derive(Debug, Clone)]
pub struct TransformerConfig {
    /// Which direction to run in.
    pub mode: TransformMode,
    /// In `Inline` mode, downgrade `const` declarations to `let` once their names are
    /// no longer textually significant.
    pub remove_const: bool,
    /// Prefix inserted into generated `$jscomp$<prefix><n>` suffixes (Inline mode only).
    pub local_name_prefix: String,
    /// Enable verbose progress output for debugging.
    pub verbose: bool,
}

impl Default for TransformerConfig {
    fn default() -> Self {
        Self {
            mode: TransformMode::Contextual,
            remove_const: false,
            local_name_prefix: String::new(),
            verbose: false,
        }
    }
}

/// Errors that can occur during transformation.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("identifier renaming failed: {0}")]
    RenameError(String),

    #[error("identifier inversion failed: {0}")]
    InvertError(String),

    #[error("invalid transformation state: {0}")]
    InvalidState(String),
}

/// Result type for transformer operations.
pub type TransformResult<T> = Result<T, TransformError>;

/// Statistics about the transformation process.
#[derive(Debug, Clone, Default)]
pub struct TransformationStats {
    /// Number of identifiers that received a new name (either suffixed or stripped).
    pub identifiers_renamed: u32,
    /// Total time spent on transformation (in milliseconds).
    pub transformation_time_ms: u64,
}

/// Result of the transformation process.
#[derive(Debug, Clone)]
pub struct TransformationResult {
    /// The transformed AST.
    pub transformed_ast: Program,
    /// Statistics about the transformation performed.
    pub stats: TransformationStats,
    /// Mapping from original identifiers to their replacements.
    pub identifier_mapping: HashMap<String, String>,
    /// Any warnings generated during transformation.
    pub warnings: Vec<String>,
}

/// Orchestrates the renamer or inverter according to `TransformerConfig`.
#[derive(Debug)]
pub struct Transformer {
    config: TransformerConfig,
}

impl Transformer {
    /// Creates a new transformer with the given configuration.
    pub fn new(config: TransformerConfig) -> Self {
        Self { config }
    }

    /// Transforms the given AST in the configured direction.
    pub fn transform(&mut self, mut ast: Program) -> TransformResult<TransformationResult> {
        let start_time = std::time::Instant::now();

        if self.config.verbose {
            println!("🔄 Starting transformation in {:?} mode", self.config.mode);
        }

        let (identifiers_renamed, identifier_mapping, warnings) = match self.config.mode {
            TransformMode::Contextual | TransformMode::Inline => {
                let rename_mode = match self.config.mode {
                    TransformMode::Contextual => RenameMode::Contextual,
                    TransformMode::Inline => RenameMode::Inline,
                    TransformMode::Invert => unreachable!(),
                };
                let renamer_config = RenamerConfig {
                    mode: rename_mode,
                    remove_const: self.config.remove_const,
                    local_name_prefix: self.config.local_name_prefix.clone(),
                };
                let result: RenameResult = renamer::rename_program(&mut ast, &renamer_config)
                    .map_err(|e| TransformError::RenameError(e.to_string()))?;
                (result.renamed_count, result.mapping, result.warnings)
            }
            TransformMode::Invert => {
                let result: InvertResult = inverter::invert_program(&mut ast)
                    .map_err(|e| TransformError::InvertError(e.to_string()))?;
                (result.stripped_count, result.mapping, Vec::new())
            }
        };

        let stats = TransformationStats {
            identifiers_renamed,
            transformation_time_ms: start_time.elapsed().as_millis() as u64,
        };

        if self.config.verbose {
            println!(
                "✅ Transformation completed in {}ms ({} identifiers touched)",
                stats.transformation_time_ms, stats.identifiers_renamed
            );
        }

        Ok(TransformationResult {
            transformed_ast: ast,
            stats,
            identifier_mapping,
            warnings,
        })
    }
}

/// Convenience function to transform an AST with default (Contextual) configuration.
pub fn transform_ast(ast: Program) -> TransformResult<TransformationResult> {
    let config = TransformerConfig::default();
    let mut transformer = Transformer::new(config);
    transformer.transform(ast)
}

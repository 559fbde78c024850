//! # {{module_name}}
//!
//! Brief description of what this module does and its purpose within the application.
//! Explain the main functionality and how it fits into the overall architecture.
//!
//! ## Key Components
//!
//! - **Component 1**: Description of first major component
//! - **Component 2**: Description of second major component
//! - **Component 3**: Description of third major component
//!
//! ## Usage
//!
//! ```rust
//! use crate::{{module_path}}::{MainStruct, important_function};
//!
//! let instance = MainStruct::new();
//! let result = important_function(&instance);
//! ```
//!
//! ## Architecture
//!
//! This module follows a standard Rust design pattern:
//! 1. **Configuration**: Handle configuration options
//! 2. **Processing**: Apply core logic
//! 3. **Result generation**: Produce results

use std::collections::HashMap;

/// Main structure for this module.
///
/// This structure represents the core functionality of the module and provides
/// methods for the primary operations.
///
/// # Examples
///
/// ```rust
/// use crate::{{module_path}}::MainStruct;
///
/// let instance = MainStruct::new();
/// assert!(instance.is_ready());
/// ```
#[derive(Debug, Clone)]
pub struct MainStruct {
    /// Internal state or configuration
    config: ModuleConfig,
    /// Cache for performance optimization
    cache: HashMap<String, CachedResult>,
}

/// Configuration structure for the module.
///
/// Contains all configuration options and settings that control
/// the behavior of this module.
#[derive(Debug, Clone)]
pub struct ModuleConfig {
    /// Enable verbose output
    pub verbose: bool,
    /// Maximum processing limit
    pub max_items: usize,
    /// Optional feature flag
    pub enable_optimization: bool,
}

/// Result type for cached operations.
///
/// Represents the result of expensive operations that can be cached
/// for performance improvements.
#[derive(Debug, Clone)]
struct CachedResult {
    /// Cached data
    data: Vec<u8>,
    /// Timestamp of when this was cached
    timestamp: u64,
}

/// Custom error types specific to this module.
///
/// These errors provide detailed information about failures
/// that can occur during module operations.
#[derive(Debug, thiserror::Error)]
pub enum ModuleError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

/// Result type alias for module operations.
pub type ModuleResult<T> = Result<T, ModuleError>;

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            max_items: 1000,
            enable_optimization: true,
        }
    }
}

impl MainStruct {
    /// Creates a new instance with default configuration.
    ///
    /// # Examples
    ///
    /// ```rust
    /// let instance = MainStruct::new();
    /// ```
    pub fn new() -> Self {
        Self::with_config(ModuleConfig::default())
    }

    /// Creates a new instance with custom configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Configuration options for the module
    ///
    /// # Examples
    ///
    /// ```rust
    /// let config = ModuleConfig {
    ///     verbose: true,
    ///     max_items: 500,
    ///     enable_optimization: false,
    /// };
    /// let instance = MainStruct::with_config(config);
    /// ```
    pub fn with_config(config: ModuleConfig) -> Self {
        Self {
            config,
            cache: HashMap::new(),
        }
    }

    /// Processes input data according to module logic.
    ///
    /// # Arguments
    ///
    /// * `input` - Input data to process
    ///
    /// # Returns
    ///
    /// Returns the processed result or an error if processing fails.
    ///
    /// # Errors
    ///
    /// Returns `ModuleError::InvalidInput` if the input is malformed.
    /// Returns `ModuleError::ProcessingFailed` if processing encounters an error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// let instance = MainStruct::new();
    /// let result = instance.process("input data")?;
    /// ```
    pub fn process(&mut self, input: &str) -> ModuleResult<String> {
        if input.is_empty() {
            return Err(ModuleError::InvalidInput("Empty input".to_string()));
        }

        if self.config.verbose {
            println!("Processing input: {}", input);
        }

        // Check cache first
        if let Some(cached) = self.cache.get(input) {
            if self.config.verbose {
                println!("Using cached result");
            }
            return Ok(String::from_utf8_lossy(&cached.data).to_string());
        }

        // Perform actual processing
        let result = self.perform_processing(input)?;

        // Cache the result if optimization is enabled
        if self.config.enable_optimization {
            self.cache.insert(
                input.to_string(),
                CachedResult {
                    data: result.as_bytes().to_vec(),
                    timestamp: std::time::SystemTime::now()
                        .duration_since(std::time::UNIX_EPOCH)
                        .unwrap()
                        .as_secs(),
                },
            );
        }

        Ok(result)
    }

    /// Performs the core processing logic.
    ///
    /// This is a private method that contains the main algorithm
    /// implementation for the module.
    ///
    /// # Arguments
    ///
    /// * `input` - Validated input data
    ///
    /// # Returns
    ///
    /// Returns the processed string or an error.
    fn perform_processing(&self, input: &str) -> ModuleResult<String> {
        // TODO: Implement actual processing logic
        // This is where the core algorithm would be implemented
        
        if input.len() > self.config.max_items {
            return Err(ModuleError::ProcessingFailed(
                "Input exceeds maximum size".to_string(),
            ));
        }

        // Placeholder processing - replace with actual logic
        let processed = format!("processed: {}", input.to_uppercase());
        
        Ok(processed)
    }

    /// Checks if the module is ready for processing.
    ///
    /// # Returns
    ///
    /// Returns `true` if the module is properly configured and ready.
    pub fn is_ready(&self) -> bool {
        self.config.max_items > 0
    }

    /// Clears the internal cache.
    ///
    /// This method can be useful for memory management or when
    /// configuration changes require cache invalidation.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
        if self.config.verbose {
            println!("Cache cleared");
        }
    }

    /// Gets current cache statistics.
    ///
    /// # Returns
    ///
    /// Returns a tuple of (cache_size, total_entries).
    pub fn cache_stats(&self) -> (usize, usize) {
        let total_size = self.cache.values()
            .map(|result| result.data.len())
            .sum();
        (total_size, self.cache.len())
    }
}

/// Helper function for common operations.
///
/// This function provides utility functionality that can be used
/// by other parts of the system.
///
/// # Arguments
///
/// * `input` - Input parameter
/// * `config` - Configuration parameter
///
/// # Returns
///
/// Returns the processed result or an error.
///
/// # Examples
///
/// ```rust
/// use crate::{{module_path}}::{helper_function, ModuleConfig};
///
/// let config = ModuleConfig::default();
/// let result = helper_function("test", &config)?;
/// ```
pub fn helper_function(input: &str, config: &ModuleConfig) -> ModuleResult<String> {
    if input.is_empty() {
        return Err(ModuleError::InvalidInput("Empty input".to_string()));
    }

    if config.verbose {
        println!("Helper processing: {}", input);
    }

    // TODO: Implement helper logic
    Ok(format!("helper result: {}", input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_struct_creation() {
        let instance = MainStruct::new();
        assert!(instance.is_ready());
    }

    #[test]
    fn test_processing_valid_input() {
        let mut instance = MainStruct::new();
        let result = instance.process("test input");
        assert!(result.is_ok());
    }

    #[test]
    fn test_processing_empty_input() {
        let mut instance = MainStruct::new();
        let result = instance.process("");
        assert!(matches!(result, Err(ModuleError::InvalidInput(_))));
    }

    #[test]
    fn test_cache_functionality() {
        let mut instance = MainStruct::with_config(ModuleConfig {
            enable_optimization: true,
            ..Default::default()
        });
        
        // Process same input twice
        let _ = instance.process("test").unwrap();
        let _ = instance.process("test").unwrap();
        
        let (_, entries) = instance.cache_stats();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_helper_function() {
        let config = ModuleConfig::default();
        let result = helper_function("test", &config);
        assert!(result.is_ok());
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn test_full_workflow() {
        let mut instance = MainStruct::with_config(ModuleConfig {
            verbose: true,
            max_items: 100,
            enable_optimization: true,
        });

        // Test complete workflow
        let inputs = vec!["input1", "input2", "input3"];
        
        for input in inputs {
            let result = instance.process(input);
            assert!(result.is_ok());
        }

        // Verify cache was used
        let (_, entries) = instance.cache_stats();
        assert_eq!(entries, 3);
    }

    #[test] 
    fn test_error_conditions() {
        let mut instance = MainStruct::with_config(ModuleConfig {
            max_items: 5,
            ..Default::default()
        });

        // Test input that exceeds max_items
        let long_input = "a".repeat(10);
        let result = instance.process(&long_input);
        assert!(matches!(result, Err(ModuleError::ProcessingFailed(_))));
    }
}
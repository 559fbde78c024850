//! # RJS Compiler
//!
//! Scope-aware identifier uniquifier for JavaScript: reads a source file, builds a scope
//! model over it, and either suffixes colliding declarations so every name in the module
//! is textually unique, or strips suffixes a prior run of this tool added, wherever that
//! is safe.
//!
//! ## Usage
//!
//! ```bash
//! rjs-compiler [OPTIONS] <FILE>
//! ```
//!
//! For more information, run `rjs-compiler --help`.

use std::path::PathBuf;
use std::process;

use clap::{Arg, Command, ValueEnum};

mod analyzer;
mod generator;
mod parser;
mod transformer;

use generator::{Generator, GeneratorConfig, OutputFormat, SemicolonStrategy};
use transformer::{TransformMode, Transformer, TransformerConfig};

/// Application version constant.
const VERSION: &str = "0.1.0";

/// Application name constant.
const APP_NAME: &str = "rjs-compiler";

/// Which renaming direction to run, as exposed on the CLI.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliMode {
    Contextual,
    Inline,
    Invert,
}

impl From<CliMode> for TransformMode {
    fn from(mode: CliMode) -> Self {
        match mode {
            CliMode::Contextual => TransformMode::Contextual,
            CliMode::Inline => TransformMode::Inline,
            CliMode::Invert => TransformMode::Invert,
        }
    }
}

/// Configuration structure for the compiler.
#[derive(Debug, Clone)]
struct CompilerConfig {
    /// Input file path to compile.
    input_file: Option<PathBuf>,
    /// Enable verbose output.
    verbose: bool,
    /// Which direction to run the uniquifier in.
    mode: CliMode,
    /// Downgrade `const` to `let` once a name is no longer significant (Inline mode only).
    remove_const: bool,
    /// Prefix inserted into generated `$jscomp$<prefix><n>` suffixes (Inline mode only).
    local_name_prefix: String,
}

/// Custom error types for the compiler.
#[derive(Debug, thiserror::Error)]
enum CompilerError {
    #[error("input file not specified")]
    MissingInputFile,
    #[error("file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("parse error: {0}")]
    ParseError(String),
    #[error("analysis error: {0}")]
    AnalysisError(String),
    #[error("transformation error: {0}")]
    TransformError(String),
    #[error("code generation error: {0}")]
    GenerationError(String),
}

/// Result type alias for compiler operations.
type CompilerResult<T> = Result<T, CompilerError>;

fn main() {
    if let Err(error) = run_compiler() {
        eprintln!("Error: {}", error);
        process::exit(1);
    }
}

fn run_compiler() -> CompilerResult<()> {
    let config = parse_command_line_arguments()?;

    if config.verbose {
        display_verbose_info(&config);
    }

    match config.input_file {
        Some(ref file_path) => compile_file(file_path, &config),
        None => {
            display_usage_information();
            Err(CompilerError::MissingInputFile)
        }
    }
}

fn parse_command_line_arguments() -> CompilerResult<CompilerConfig> {
    let matches = Command::new(APP_NAME)
        .version(VERSION)
        .author("RJS Compiler Team <team@rjscompiler.dev>")
        .about("RJS Compiler - scope-aware identifier uniquifier for JavaScript")
        .long_about(
            "Builds a scope model over a JavaScript source file and either suffixes \n\
             colliding declarations so every name in the module is unique, or strips \n\
             suffixes a prior run added, wherever that is safe.",
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(clap::ArgAction::SetTrue)
                .help("Enable verbose output for debugging"),
        )
        .arg(
            Arg::new("mode")
                .short('m')
                .long("mode")
                .value_parser(clap::value_parser!(CliMode))
                .default_value("contextual")
                .help("Renaming direction: contextual, inline, or invert"),
        )
        .arg(
            Arg::new("remove-const")
                .long("remove-const")
                .action(clap::ArgAction::SetTrue)
                .help("Downgrade const to let once its name is no longer significant (inline mode only)"),
        )
        .arg(
            Arg::new("local-name-prefix")
                .long("local-name-prefix")
                .default_value("")
                .help("Prefix inserted into generated $jscomp$<prefix><n> suffixes (inline mode only)"),
        )
        .arg(
            Arg::new("input")
                .help("Input JavaScript file to compile")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .index(1),
        )
        .get_matches();

    let input_file = matches.get_one::<PathBuf>("input").cloned();
    let verbose = matches.get_flag("verbose");
    let mode = *matches.get_one::<CliMode>("mode").unwrap();
    let remove_const = matches.get_flag("remove-const");
    let local_name_prefix = matches
        .get_one::<String>("local-name-prefix")
        .cloned()
        .unwrap_or_default();

    Ok(CompilerConfig {
        input_file,
        verbose,
        mode,
        remove_const,
        local_name_prefix,
    })
}

fn display_verbose_info(config: &CompilerConfig) {
    println!("🔍 Verbose mode enabled");
    println!("📋 Configuration:");

    if let Some(ref input_path) = config.input_file {
        println!("   📁 Input file: {}", input_path.display());
    }
    println!("   🔧 Mode: {:?}", config.mode);
}

fn display_usage_information() {
    println!("💡 Usage: {} [OPTIONS] <FILE>", APP_NAME);
    println!("   Use --help for more information");
    println!("   Example: {} --mode inline my_script.js", APP_NAME);
}

fn compile_file(file_path: &PathBuf, config: &CompilerConfig) -> CompilerResult<()> {
    if config.verbose {
        println!("📂 Processing input file: {}", file_path.display());
    }

    if !file_path.exists() {
        return Err(CompilerError::FileNotFound(file_path.clone()));
    }

    let source_code = std::fs::read_to_string(file_path)
        .map_err(|_| CompilerError::FileNotFound(file_path.clone()))?;

    if config.verbose {
        println!("📄 Read {} bytes from file", source_code.len());
    }

    // Phase 1: Parsing
    let parser_config = parser::ParserConfig {
        preserve_trivia: config.verbose,
        ..parser::ParserConfig::default()
    };
    let parse_result = parser::parse_js(&source_code, &file_path.to_string_lossy(), &parser_config);

    if config.verbose {
        println!("🔄 Phase 1: Parsing");
    }

    if !parse_result.errors.is_empty() {
        eprintln!("❌ Parsing errors found:");
        for error in &parse_result.errors {
            eprintln!("   {}", error);
        }
        return Err(CompilerError::ParseError(format!(
            "found {} parsing errors",
            parse_result.errors.len()
        )));
    }

    let ast = parse_result
        .ast
        .ok_or_else(|| CompilerError::ParseError("no AST generated despite no errors".to_string()))?;

    if config.verbose {
        println!("   📋 Statements: {}", ast.body.len());
    }

    // Phase 2: Semantic analysis (scope model + symbol table; diagnostic only — the
    // transformer builds its own lightweight scope stack during renaming/inversion).
    if config.verbose {
        println!("🔄 Phase 2: Semantic analysis");
    }
    let analyzer_config = analyzer::AnalyzerConfig {
        verbose: config.verbose,
        ..analyzer::AnalyzerConfig::default()
    };
    let analysis = analyzer::analyze_ast(&ast, &analyzer_config)
        .map_err(|e| CompilerError::AnalysisError(e.to_string()))?;
    if config.verbose {
        println!(
            "   🔎 {} scopes, {} symbols",
            analysis.metadata.scope_count, analysis.metadata.symbol_count
        );
    }

    // Phase 3: Transformation (contextual/inline renaming, or inversion)
    if config.verbose {
        println!("🔄 Phase 3: Transformation");
    }
    let transformer_config = TransformerConfig {
        mode: config.mode.into(),
        remove_const: config.remove_const,
        local_name_prefix: config.local_name_prefix.clone(),
        verbose: config.verbose,
    };
    let mut transformer = Transformer::new(transformer_config);
    let transform_result = transformer
        .transform(ast)
        .map_err(|e| CompilerError::TransformError(e.to_string()))?;

    for warning in &transform_result.warnings {
        eprintln!("⚠️  {}", warning);
    }

    // Phase 4: Code generation
    if config.verbose {
        println!("🔄 Phase 4: Code generation");
    }
    let generator_config = GeneratorConfig {
        format: if config.verbose {
            OutputFormat::Readable
        } else {
            OutputFormat::Compact
        },
        semicolon: SemicolonStrategy::Auto,
        ..GeneratorConfig::default()
    };
    let generator = Generator::new(generator_config);
    let generation_result = generator
        .generate(&transform_result.transformed_ast, Some(&source_code))
        .map_err(|e| CompilerError::GenerationError(e.to_string()))?;

    println!("{}", generation_result.code);

    if config.verbose {
        println!("📊 Compilation statistics:");
        println!("   🏷️  Identifiers touched: {}", transform_result.stats.identifiers_renamed);
        println!("   ⏱️  Transform time: {}ms", transform_result.stats.transformation_time_ms);
    }

    Ok(())
}

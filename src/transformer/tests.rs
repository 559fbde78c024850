//! # Transformer Integration Tests
//!
//! Exercises `Transformer` end-to-end across all three modes, using the printer to
//! assert on rendered output rather than poking at AST internals.

use super::*;
use crate::generator::printer::Printer;
use crate::generator::{GeneratorConfig, OutputFormat, SemicolonStrategy};
use crate::parser::ast_types::{Program, ProgramSourceType};
use crate::parser::{parse_js, ParserConfig};

fn render(ast: &Program) -> String {
    let config = GeneratorConfig {
        format: OutputFormat::Compact,
        semicolon: SemicolonStrategy::Always,
        ..GeneratorConfig::default()
    };
    let mut printer = Printer::new(&config);
    printer.print_program(ast).expect("printable AST")
}

fn parse(src: &str) -> Program {
    parse_js(src, "test.js", &ParserConfig::default())
        .ast
        .expect("valid JS")
}

#[test]
fn empty_program_transforms_to_itself() {
    let config = TransformerConfig::default();
    let mut transformer = Transformer::new(config);
    let ast = Program {
        body: vec![],
        source_type: ProgramSourceType::Script,
    };

    let result = transformer.transform(ast).unwrap();
    assert_eq!(result.transformed_ast.body.len(), 0);
    assert_eq!(result.stats.identifiers_renamed, 0);
}

#[test]
fn contextual_mode_suffixes_only_the_colliding_declaration() {
    let config = TransformerConfig {
        mode: TransformMode::Contextual,
        ..TransformerConfig::default()
    };
    let mut transformer = Transformer::new(config);
    let ast = parse("var a;function foo(a){return a;}foo(1);");

    let result = transformer.transform(ast).unwrap();
    assert_eq!(result.stats.identifiers_renamed, 1);
    assert_eq!(
        render(&result.transformed_ast),
        "var a;function foo(a$jscomp$1){return a$jscomp$1;}foo(1);"
    );
}

#[test]
fn inline_mode_suffixes_every_declaration() {
    let config = TransformerConfig {
        mode: TransformMode::Inline,
        ..TransformerConfig::default()
    };
    let mut transformer = Transformer::new(config);
    let ast = parse("var x;");

    let result = transformer.transform(ast).unwrap();
    assert_eq!(result.stats.identifiers_renamed, 1);
    assert_eq!(render(&result.transformed_ast), "var x$jscomp$0;");
}

#[test]
fn invert_mode_strips_a_solitary_suffix() {
    let config = TransformerConfig {
        mode: TransformMode::Invert,
        ..TransformerConfig::default()
    };
    let mut transformer = Transformer::new(config);
    let ast = parse("function foo(a$jscomp$1){return a$jscomp$1;}");

    let result = transformer.transform(ast).unwrap();
    assert_eq!(result.stats.identifiers_renamed, 1);
    assert_eq!(render(&result.transformed_ast), "function foo(a){return a;}");
}

#[test]
fn contextual_then_invert_round_trips_a_collision_free_program() {
    let forward_config = TransformerConfig {
        mode: TransformMode::Contextual,
        ..TransformerConfig::default()
    };
    let mut forward = Transformer::new(forward_config);
    let ast = parse("function foo(){var b;}function boo(){var b;}");
    let forward_result = forward.transform(ast).unwrap();
    assert_eq!(
        render(&forward_result.transformed_ast),
        "function foo(){var b;}function boo(){var b$jscomp$1;}"
    );

    let invert_config = TransformerConfig {
        mode: TransformMode::Invert,
        ..TransformerConfig::default()
    };
    let mut invert = Transformer::new(invert_config);
    let invert_result = invert.transform(forward_result.transformed_ast).unwrap();

    assert_eq!(
        render(&invert_result.transformed_ast),
        "function foo(){var b;}function boo(){var b;}"
    );
}

#[test]
fn identifier_mapping_reflects_the_renamed_pair() {
    let config = TransformerConfig {
        mode: TransformMode::Contextual,
        ..TransformerConfig::default()
    };
    let mut transformer = Transformer::new(config);
    let ast = parse("var a;function foo(a){return a;}");

    let result = transformer.transform(ast).unwrap();
    assert_eq!(
        result.identifier_mapping.get("a").map(String::as_str),
        Some("a$jscomp$1")
    );
}

#[test]
fn verbose_mode_does_not_change_the_result() {
    let config = TransformerConfig {
        mode: TransformMode::Contextual,
        verbose: true,
        ..TransformerConfig::default()
    };
    let mut transformer = Transformer::new(config);
    let ast = parse("var a;");

    let result = transformer.transform(ast).unwrap();
    assert_eq!(render(&result.transformed_ast), "var a;");
}

#[test]
fn convenience_transform_function_uses_contextual_defaults() {
    let ast = parse("var a;");
    let result = transform_ast(ast).unwrap();
    assert_eq!(render(&result.transformed_ast), "var a;");
    assert_eq!(result.stats.identifiers_renamed, 0);
}

//! # Semantic Analysis Module
//!
//! This module performs semantic analysis to detect constructs that affect
//! optimization safety, including eval usage, with statements, this binding,
//! and other dynamic features that prevent safe variable renaming.
//!
//! ## Key Responsibilities
//!
//! - Detect eval() calls and mark containing scopes as unsafe
//! - Detect with statements and mark scope resolution as dynamic
//! - Classify this usage as lexical (arrow functions) or dynamic (regular functions)
//! - Propagate unsafe flags upward through the scope chain
//! - Mark scope safety classification for optimization decisions

use crate::analyzer::{
    AnalysisResult, AnalyzerConfig, ScopeId, ScopeTree, ScopeType, SemanticFlags,
    SymbolTable, UnsafeReason,
};
use crate::parser::ast_types::{
    ArrowFunctionBody, BlockStatement, CatchClause, ClassElement, Expression, ForInit, Program,
    Statement, SwitchCase, UnaryOperator,
};
use std::collections::HashMap;

/// Context for semantic analysis traversal
pub struct SemanticAnalysisContext<'a> {
    /// Current scope being analyzed
    pub current_scope:  ScopeId,
    /// Reference to the scope tree
    pub scope_tree:     &'a mut ScopeTree,
    /// Reference to the symbol table
    pub symbol_table:   &'a mut SymbolTable,
    /// Reference to semantic flags being collected
    pub semantic_flags: &'a mut SemanticFlags,
    /// Analysis configuration
    pub config:         &'a AnalyzerConfig,
    /// Whether we're currently in strict mode
    #[allow(dead_code)]
    pub strict_mode:    bool,
    /// Whether we're inside an arrow function (affects this binding)
    pub in_arrow_function: bool,
    /// Per-scope cursor into `children`, so re-entering a scope the builder already
    /// created consumes child scopes in the same left-to-right order the builder
    /// produced them in, rather than always finding the first child of a given type.
    pub next_child_cursor: HashMap<ScopeId, usize>,
}

/// Performs semantic analysis to detect unsafe constructs
///
/// # Arguments
///
/// * `ast` - The JavaScript AST to analyze
/// * `scope_tree` - Mutable reference to the scope tree
/// * `symbol_table` - Mutable reference to the symbol table
/// * `semantic_flags` - Mutable reference to semantic flags being collected
/// * `config` - Analysis configuration
///
/// # Returns
///
/// Returns `Ok(())` if analysis succeeds, or an `AnalysisError` if it fails.
pub fn analyze_semantics(
    ast: &Program,
    scope_tree: &mut ScopeTree,
    symbol_table: &mut SymbolTable,
    semantic_flags: &mut SemanticFlags,
    config: &AnalyzerConfig,
) -> AnalysisResult<()> {
    if config.verbose {
        println!("Performing semantic analysis...");
    }

    let mut context = SemanticAnalysisContext {
        current_scope:     scope_tree.root_scope_id,
        scope_tree,
        symbol_table,
        semantic_flags,
        config,
        strict_mode:       config.strict_mode,
        in_arrow_function: false,
        next_child_cursor: HashMap::new(),
    };

    // Analyze program body for semantic issues
    for statement in &ast.body {
        analyze_statement_semantics(statement, &mut context)?;
    }

    // Propagate unsafe flags upward through scope chain
    propagate_unsafe_flags(&mut context)?;

    if config.verbose {
        let unsafe_scope_count = context.semantic_flags.unsafe_scopes.len();
        let unsafe_symbol_count = context.semantic_flags.unsafe_symbols.len();
        println!(
            "Semantic analysis completed: {} unsafe scopes, {} unsafe symbols",
            unsafe_scope_count, unsafe_symbol_count
        );
    }

    Ok(())
}

/// Analyzes a statement for semantic issues
fn analyze_statement_semantics(
    statement: &Statement,
    context: &mut SemanticAnalysisContext,
) -> AnalysisResult<()> {
    match statement {
        Statement::VariableDeclaration { declarations, .. } => {
            for declarator in declarations {
                if let Some(init) = &declarator.init {
                    analyze_expression_semantics(init, context)?;
                }
            }
            Ok(())
        }
        Statement::FunctionDeclaration { params: _, body, .. } => {
            enter_function_scope_semantics(body, false, context)
        }
        Statement::ClassDeclaration { body, super_class, .. } => {
            if let Some(super_expr) = super_class {
                analyze_expression_semantics(super_expr, context)?;
            }

            // Enter class scope
            with_child_scope(ScopeType::ClassBody, context, |context| {
                for element in &body.body {
                    analyze_class_element_semantics(element, context)?;
                }
                Ok(())
            })
        }
        Statement::ExpressionStatement { expression } => {
            analyze_expression_semantics(expression, context)
        }
        Statement::BlockStatement { body } => analyze_block_scope_semantics(body, context),
        Statement::ReturnStatement { argument } => {
            if let Some(expr) = argument {
                analyze_expression_semantics(expr, context)?;
            }
            Ok(())
        }
        Statement::IfStatement {
            test,
            consequent,
            alternate,
        } => {
            analyze_expression_semantics(test, context)?;
            analyze_statement_semantics(consequent, context)?;
            if let Some(alt) = alternate {
                analyze_statement_semantics(alt, context)?;
            }
            Ok(())
        }
        Statement::WhileStatement { test, body } => {
            analyze_expression_semantics(test, context)?;
            analyze_statement_semantics(body, context)
        }
        Statement::ForStatement {
            init,
            test,
            update,
            body,
        } => {
            with_child_scope(crate::analyzer::ScopeType::For, context, |context| {
                if let Some(for_init) = init {
                    analyze_for_init_semantics(for_init, context)?;
                }
                if let Some(test_expr) = test {
                    analyze_expression_semantics(test_expr, context)?;
                }
                if let Some(update_expr) = update {
                    analyze_expression_semantics(update_expr, context)?;
                }
                analyze_statement_semantics(body, context)
            })
        }
        Statement::ForInStatement { left, right, body } => {
            with_child_scope(crate::analyzer::ScopeType::For, context, |context| {
                analyze_for_init_semantics(left, context)?;
                analyze_expression_semantics(right, context)?;
                analyze_statement_semantics(body, context)
            })
        }
        Statement::ForOfStatement { left, right, body, is_await: _ } => {
            with_child_scope(crate::analyzer::ScopeType::For, context, |context| {
                analyze_for_init_semantics(left, context)?;
                analyze_expression_semantics(right, context)?;
                analyze_statement_semantics(body, context)
            })
        }
        Statement::SwitchStatement { discriminant, cases } => {
            analyze_expression_semantics(discriminant, context)?;
            with_child_scope(crate::analyzer::ScopeType::Block, context, |context| {
                analyze_switch_cases_semantics(cases, context)
            })
        }
        Statement::TryStatement { block, handler, finalizer } => {
            analyze_try_statement_semantics(block, handler, finalizer, context)
        }
        Statement::ImportDeclaration { .. } => Ok(()), // Imports don't affect semantics
        Statement::ExportNamedDeclaration { declaration, .. } => {
            if let Some(decl) = declaration {
                analyze_statement_semantics(decl, context)?;
            }
            Ok(())
        }
    }
}

/// Analyzes class elements for semantic issues
fn analyze_class_element_semantics(
    element: &ClassElement,
    context: &mut SemanticAnalysisContext,
) -> AnalysisResult<()> {
    match element {
        ClassElement::PropertyDefinition { value, .. } => {
            if let Some(expr) = value {
                analyze_expression_semantics(expr, context)?;
            }
            Ok(())
        }
        ClassElement::MethodDefinition { value, .. } => {
            analyze_function_expression_semantics(value, context)
        }
    }
}

/// Analyzes for loop initialization for semantic issues
fn analyze_for_init_semantics(
    init: &ForInit,
    context: &mut SemanticAnalysisContext,
) -> AnalysisResult<()> {
    match init {
        ForInit::VariableDeclaration { declarations, .. } => {
            for declarator in declarations {
                if let Some(init_expr) = &declarator.init {
                    analyze_expression_semantics(init_expr, context)?;
                }
            }
            Ok(())
        }
        ForInit::Expression(expr) => analyze_expression_semantics(expr, context),
    }
}

/// Analyzes expressions for semantic issues
fn analyze_expression_semantics(
    expression: &Expression,
    context: &mut SemanticAnalysisContext,
) -> AnalysisResult<()> {
    match expression {
        Expression::Identifier(id) => {
            // Check for special identifiers that affect safety
            match id.name.as_str() {
                "eval" => {
                    mark_scope_unsafe(context.current_scope, UnsafeReason::EvalUsage, context);
                    if context.config.verbose {
                        println!("Detected eval usage in scope {}", context.current_scope);
                    }
                }
                "arguments" => {
                    // arguments object usage can affect optimization
                    if context.config.verbose {
                        println!("Detected arguments usage in scope {}", context.current_scope);
                    }
                }
                _ => {}
            }
            Ok(())
        }
        Expression::CallExpression { callee, arguments } => {
            // Check for eval() calls
            if let Expression::Identifier(id) = callee.as_ref()
                && id.name == "eval" {
                    mark_scope_unsafe(context.current_scope, UnsafeReason::EvalUsage, context);
                    if context.config.verbose {
                        println!("Detected eval() call in scope {}", context.current_scope);
                    }
                }

            analyze_expression_semantics(callee, context)?;
            for arg in arguments {
                analyze_expression_semantics(arg, context)?;
            }
            Ok(())
        }
        Expression::ThisExpression => {
            // this usage classification
            if context.in_arrow_function {
                // Arrow functions have lexical this binding
                if context.config.verbose {
                    println!("Detected lexical this usage in scope {}", context.current_scope);
                }
            } else {
                // Regular functions have dynamic this binding
                mark_scope_unsafe(context.current_scope, UnsafeReason::DynamicThis, context);
                if context.config.verbose {
                    println!("Detected dynamic this usage in scope {}", context.current_scope);
                }
            }
            Ok(())
        }
        Expression::BinaryExpression { left, right, .. } => {
            analyze_expression_semantics(left, context)?;
            analyze_expression_semantics(right, context)
        }
        Expression::UnaryExpression { argument, operator, prefix: _ } => {
            // Check for typeof operator which might indicate dynamic access
            if matches!(operator, UnaryOperator::Typeof)
                && let Expression::Identifier(_) = argument.as_ref() {
                    // typeof identifier - might be checking for undefined globals
                    if context.config.verbose {
                        println!("Detected typeof usage in scope {}", context.current_scope);
                    }
                }
            analyze_expression_semantics(argument, context)
        }
        Expression::AssignmentExpression { left, right, .. } => {
            analyze_expression_semantics(left, context)?;
            analyze_expression_semantics(right, context)
        }
        Expression::MemberExpression {
            object,
            property,
            computed,
        } => {
            analyze_expression_semantics(object, context)?;
            
            if *computed {
                // Computed property access obj[prop] - potentially unsafe
                analyze_expression_semantics(property, context)?;
                
                // Check for window['property'] pattern
                if let Expression::Identifier(obj_id) = object.as_ref()
                    && (obj_id.name == "window" || obj_id.name == "global") {
                        mark_scope_unsafe(
                            context.current_scope,
                            UnsafeReason::IndirectAccess,
                            context,
                        );
                        if context.config.verbose {
                            println!(
                                "Detected indirect global access in scope {}",
                                context.current_scope
                            );
                        }
                    }
            } else if let Expression::Identifier(_) = property.as_ref() {
                // Static property access obj.prop - generally safe
            } else {
                analyze_expression_semantics(property, context)?;
            }
            Ok(())
        }
        Expression::FunctionExpression(func_expr) => {
            analyze_function_expression_semantics(func_expr, context)
        }
        Expression::ArrowFunctionExpression { params: _, body, .. } => {
            enter_arrow_function_scope_semantics(body, context)
        }
        Expression::ConditionalExpression {
            test,
            consequent,
            alternate,
        } => {
            analyze_expression_semantics(test, context)?;
            analyze_expression_semantics(consequent, context)?;
            analyze_expression_semantics(alternate, context)
        }
        Expression::Literal(_) => Ok(()), // Literals are safe
        _ => Ok(()), // Handle other expression types as needed
    }
}

/// Analyzes function expressions for semantic issues. Mirrors the builder's
/// Function/FunctionBlock split: re-enters the Function scope for the (optional)
/// bleeding name and parameters, then the nested FunctionBlock scope for the body.
fn analyze_function_expression_semantics(
    func_expr: &crate::parser::ast_types::FunctionExpression,
    context: &mut SemanticAnalysisContext,
) -> AnalysisResult<()> {
    with_child_scope(ScopeType::Function, context, |context| {
        let previous_arrow_state = context.in_arrow_function;
        context.in_arrow_function = false;
        with_child_scope(ScopeType::FunctionBlock, context, |context| {
            for stmt in &func_expr.body.body {
                analyze_statement_semantics(stmt, context)?;
            }
            Ok(())
        })?;
        context.in_arrow_function = previous_arrow_state;
        Ok(())
    })
}

/// Re-enters a function declaration's Function scope, then its nested FunctionBlock
/// scope, for the body's statements. `is_arrow` is reserved for call sites that need
/// to distinguish lexical-`this` functions; ordinary declarations always pass `false`.
fn enter_function_scope_semantics(
    body: &BlockStatement,
    is_arrow: bool,
    context: &mut SemanticAnalysisContext,
) -> AnalysisResult<()> {
    with_child_scope(ScopeType::Function, context, |context| {
        let previous_arrow_state = context.in_arrow_function;
        context.in_arrow_function = is_arrow;
        with_child_scope(ScopeType::FunctionBlock, context, |context| {
            for stmt in &body.body {
                analyze_statement_semantics(stmt, context)?;
            }
            Ok(())
        })?;
        context.in_arrow_function = previous_arrow_state;
        Ok(())
    })
}

/// Re-enters an arrow function's Function scope. An expression body is analyzed
/// directly inside it; a block body gets its own nested FunctionBlock scope, same
/// as an ordinary function.
fn enter_arrow_function_scope_semantics(
    body: &ArrowFunctionBody,
    context: &mut SemanticAnalysisContext,
) -> AnalysisResult<()> {
    with_child_scope(ScopeType::Function, context, |context| {
        let previous_arrow_state = context.in_arrow_function;
        context.in_arrow_function = true;
        match body {
            ArrowFunctionBody::Expression(expr) => {
                analyze_expression_semantics(expr, context)?;
            }
            ArrowFunctionBody::BlockStatement(block) => {
                with_child_scope(ScopeType::FunctionBlock, context, |context| {
                    for stmt in &block.body {
                        analyze_statement_semantics(stmt, context)?;
                    }
                    Ok(())
                })?;
            }
        }
        context.in_arrow_function = previous_arrow_state;
        Ok(())
    })
}

/// Re-enters a block's own scope and analyzes its statements within it.
fn analyze_block_scope_semantics(
    body: &[Statement],
    context: &mut SemanticAnalysisContext,
) -> AnalysisResult<()> {
    with_child_scope(ScopeType::Block, context, |context| {
        for stmt in body {
            analyze_statement_semantics(stmt, context)?;
        }
        Ok(())
    })
}

/// Analyzes `switch` cases within the switch's already-entered scope.
fn analyze_switch_cases_semantics(
    cases: &[SwitchCase],
    context: &mut SemanticAnalysisContext,
) -> AnalysisResult<()> {
    for case in cases {
        if let Some(test) = &case.test {
            analyze_expression_semantics(test, context)?;
        }
        for stmt in &case.consequent {
            analyze_statement_semantics(stmt, context)?;
        }
    }
    Ok(())
}

/// Re-enters `try`/`catch`/`finally` scopes. The try block and finalizer are plain
/// Block scopes; the catch clause gets a Catch scope (wrapping its own Block scope
/// for the body) only when it binds a parameter, matching the builder.
fn analyze_try_statement_semantics(
    block: &BlockStatement,
    handler: &Option<CatchClause>,
    finalizer: &Option<BlockStatement>,
    context: &mut SemanticAnalysisContext,
) -> AnalysisResult<()> {
    analyze_block_scope_semantics(&block.body, context)?;

    if let Some(catch_clause) = handler {
        if catch_clause.param.is_some() {
            with_child_scope(ScopeType::Catch, context, |context| {
                analyze_block_scope_semantics(&catch_clause.body.body, context)
            })?;
        } else {
            analyze_block_scope_semantics(&catch_clause.body.body, context)?;
        }
    }

    if let Some(finalizer_block) = finalizer {
        analyze_block_scope_semantics(&finalizer_block.body, context)?;
    }

    Ok(())
}

/// Re-enters the next not-yet-visited child of the current scope (regardless of its
/// type) and runs `f` with it made current, then restores the previous scope. Relies
/// on this pass walking the AST in the exact same order the scope builder did, so the
/// Nth child scope consumed here is the Nth child scope that pass created.
fn with_child_scope<F>(
    _expected_type: ScopeType,
    context: &mut SemanticAnalysisContext,
    f: F,
) -> AnalysisResult<()>
where
    F: FnOnce(&mut SemanticAnalysisContext) -> AnalysisResult<()>,
{
    if let Some(child_id) = enter_next_child_scope(context) {
        let previous_scope = context.current_scope;
        context.current_scope = child_id;
        f(context)?;
        context.current_scope = previous_scope;
    }
    Ok(())
}

/// Consumes and returns the current scope's next not-yet-visited child, advancing
/// the per-parent cursor so a later call returns the following sibling instead of
/// the same one again.
fn enter_next_child_scope(context: &mut SemanticAnalysisContext) -> Option<ScopeId> {
    let parent = context.current_scope;
    let idx = *context.next_child_cursor.entry(parent).or_insert(0);
    let child_id = context
        .scope_tree
        .get_scope(parent)
        .and_then(|scope| scope.children.get(idx).copied());
    if child_id.is_some() {
        *context.next_child_cursor.get_mut(&parent).unwrap() += 1;
    }
    child_id
}

/// Marks a scope as unsafe for optimization
fn mark_scope_unsafe(
    scope_id: ScopeId,
    reason: UnsafeReason,
    context: &mut SemanticAnalysisContext,
) {
    context.semantic_flags.unsafe_scopes.insert(scope_id, reason.clone());
    
    // Mark the scope itself as unsafe
    if let Some(scope) = context.scope_tree.get_scope_mut(scope_id) {
        scope.is_safe = false;
    }

    // Mark all symbols in this scope as unsafe for renaming
    if let Some(scope_bindings) = context.symbol_table.scope_bindings.get(&scope_id) {
        for &symbol_id in scope_bindings.values() {
            context.semantic_flags.unsafe_symbols.insert(symbol_id, reason.clone());
            if let Some(symbol) = context.symbol_table.symbols.get_mut(&symbol_id) {
                symbol.is_renamable = false;
            }
        }
    }
}

/// Propagates unsafe flags upward through the scope chain
fn propagate_unsafe_flags(context: &mut SemanticAnalysisContext) -> AnalysisResult<()> {
    let unsafe_scopes: Vec<_> = context.semantic_flags.unsafe_scopes.keys().copied().collect();

    for scope_id in unsafe_scopes {
        propagate_unsafe_flag_upward(scope_id, context);
    }

    Ok(())
}

/// Propagates unsafe flag from a scope to its ancestors
fn propagate_unsafe_flag_upward(scope_id: ScopeId, context: &mut SemanticAnalysisContext) {
    let mut current_scope = scope_id;

    while let Some(scope) = context.scope_tree.get_scope(current_scope) {
        if let Some(parent_id) = scope.parent_id {
            // Check if parent should be marked unsafe based on child's unsafe reason
            if let Some(reason) = context.semantic_flags.unsafe_scopes.get(&current_scope) {
                match reason {
                    UnsafeReason::EvalUsage => {
                        // eval affects all ancestor scopes
                        if !context.semantic_flags.unsafe_scopes.contains_key(&parent_id) {
                            mark_scope_unsafe(parent_id, UnsafeReason::EvalUsage, context);
                        }
                        current_scope = parent_id;
                    }
                    UnsafeReason::WithStatement => {
                        // with affects parent scope
                        if !context.semantic_flags.unsafe_scopes.contains_key(&parent_id) {
                            mark_scope_unsafe(parent_id, UnsafeReason::WithStatement, context);
                        }
                        current_scope = parent_id;
                    }
                    UnsafeReason::DynamicThis | UnsafeReason::IndirectAccess => {
                        // These don't necessarily propagate upward
                        break;
                    }
                    UnsafeReason::ExternalDependency | UnsafeReason::Unknown => {
                        // Conservative: propagate upward
                        if !context.semantic_flags.unsafe_scopes.contains_key(&parent_id) {
                            mark_scope_unsafe(parent_id, reason.clone(), context);
                        }
                        current_scope = parent_id;
                    }
                }
            } else {
                break;
            }
        } else {
            break; // Reached root scope
        }
    }
}


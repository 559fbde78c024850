//! # Scope Builder Module
//!
//! This module is responsible for constructing the hierarchical scope tree and
//! tracking symbol bindings throughout the JavaScript AST. It handles all types
//! of scopes including global, function, block, class, and module scopes.
//!
//! ## Key Responsibilities
//!
//! - Construct scope tree with unique scope IDs and parent-child relationships
//! - Enter new scope at functions, blocks, catch clauses, classes, modules
//! - Maintain symbol bindings for variables, functions, classes, parameters
//! - Track references to identifiers (read/write/declare)
//! - Resolve shadowing and redeclarations correctly
//! - Detect captures: mark when an inner scope closes over an outer variable


use crate::analyzer::{
    AnalysisResult, AnalyzerConfig, ReferenceType, Scope, ScopeId, ScopeTree,
    ScopeType, SemanticFlags, SourceLocation, Symbol, SymbolId, SymbolReference, SymbolTable,
    SymbolType, VariableKind,
};
use crate::parser::ast_types::{
    ArrowFunctionBody, BlockStatement, CatchClause, ClassElement, Expression, ForInit, Identifier,
    ImportSpecifier, ObjectPatternProperty, Pattern, Program, Statement, SwitchCase,
    VariableDeclarationKind,
};

/// Context for scope analysis traversal
pub struct ScopeAnalysisContext<'a> {
    /// Current scope being analyzed
    pub current_scope:  ScopeId,
    /// Reference to the scope tree
    pub scope_tree:     &'a mut ScopeTree,
    /// Reference to the symbol table
    pub symbol_table:   &'a mut SymbolTable,
    /// Reference to semantic flags
    #[allow(dead_code)]
    pub semantic_flags: &'a mut SemanticFlags,
    /// Analysis configuration
    pub config:         &'a AnalyzerConfig,
    /// Current source location (for error reporting)
    pub current_location: SourceLocation,
}

/// Analyzes scopes throughout the AST and builds the scope tree
///
/// # Arguments
///
/// * `ast` - The JavaScript AST to analyze
/// * `scope_tree` - Mutable reference to the scope tree being built
/// * `symbol_table` - Mutable reference to the symbol table being populated
/// * `semantic_flags` - Mutable reference to semantic flags being collected
/// * `config` - Analysis configuration
///
/// # Returns
///
/// Returns `Ok(())` if analysis succeeds, or an `AnalysisError` if it fails.
pub fn analyze_scopes(
    ast: &Program,
    scope_tree: &mut ScopeTree,
    symbol_table: &mut SymbolTable,
    semantic_flags: &mut SemanticFlags,
    config: &AnalyzerConfig,
) -> AnalysisResult<()> {
    if config.verbose {
        println!("Building scope tree...");
    }

    let mut context = ScopeAnalysisContext {
        current_scope:    scope_tree.root_scope_id,
        scope_tree,
        symbol_table,
        semantic_flags,
        config,
        current_location: SourceLocation {
            line:   1,
            column: 0,
            offset: 0,
        },
    };

    // PHASE 1: hoist top-level var declarations and function declarations into the
    // global/module scope. Function declarations hoist only where they are directly
    // written; var declarations hoist through any nesting of control structures.
    for statement in &ast.body {
        hoist_top_level_declaration(statement, &mut context)?;
    }

    // PHASE 2: analyze program body normally
    for statement in &ast.body {
        analyze_statement(statement, &mut context)?;
    }

    if config.verbose {
        println!(
            "Scope tree built: {} scopes, {} symbols",
            context.scope_tree.next_scope_id,
            context.symbol_table.next_symbol_id
        );
    }

    Ok(())
}

/// Hoists a statement written directly in a function/global/module body: function
/// declarations are bound by name here (their own bodies are not descended into for
/// hoisting purposes — only var declarations cross block boundaries), and any var
/// declarations the statement introduces are hoisted alongside.
fn hoist_top_level_declaration(
    statement: &Statement,
    context: &mut ScopeAnalysisContext,
) -> AnalysisResult<()> {
    if let Statement::FunctionDeclaration { id: Some(function_id), .. } = statement {
        declare_symbol(
            &function_id.name,
            SymbolType::Function,
            context.current_scope,
            context,
        )?;
    }
    hoist_var_declarations(statement, context)
}

/// Hoists `var` declarations reachable from `statement` without crossing a function
/// boundary. Block-scoped function declarations are handled separately, at the point
/// where their containing block's own scope is built (see `hoist_local_function_declarations`),
/// since they belong to that block's scope rather than the enclosing function scope.
fn hoist_var_declarations(
    statement: &Statement,
    context: &mut ScopeAnalysisContext,
) -> AnalysisResult<()> {
    match statement {
        Statement::VariableDeclaration { declarations, kind } => {
            if matches!(kind, VariableDeclarationKind::Var) {
                for declarator in declarations {
                    hoist_pattern_declaration(&declarator.id, context)?;
                }
            }
        }
        Statement::BlockStatement { body } => {
            for stmt in body {
                hoist_var_declarations(stmt, context)?;
            }
        }
        Statement::IfStatement { consequent, alternate, .. } => {
            hoist_var_declarations(consequent, context)?;
            if let Some(alt) = alternate {
                hoist_var_declarations(alt, context)?;
            }
        }
        Statement::WhileStatement { body, .. } => {
            hoist_var_declarations(body, context)?;
        }
        Statement::ForStatement { init, body, .. } => {
            if let Some(for_init) = init {
                hoist_for_init_var_declarations(for_init, context)?;
            }
            hoist_var_declarations(body, context)?;
        }
        Statement::ForInStatement { left, body, .. }
        | Statement::ForOfStatement { left, body, .. } => {
            hoist_for_init_var_declarations(left, context)?;
            hoist_var_declarations(body, context)?;
        }
        Statement::SwitchStatement { cases, .. } => {
            for case in cases {
                for stmt in &case.consequent {
                    hoist_var_declarations(stmt, context)?;
                }
            }
        }
        Statement::TryStatement { block, handler, finalizer } => {
            for stmt in &block.body {
                hoist_var_declarations(stmt, context)?;
            }
            if let Some(catch_clause) = handler {
                for stmt in &catch_clause.body.body {
                    hoist_var_declarations(stmt, context)?;
                }
            }
            if let Some(finalizer_block) = finalizer {
                for stmt in &finalizer_block.body {
                    hoist_var_declarations(stmt, context)?;
                }
            }
        }
        _ => {
            // Function/class declarations, expression statements, imports/exports
            // and the like don't carry var declarations that escape into the
            // enclosing scope.
        }
    }
    Ok(())
}

/// Hoists the `var` declarations of a `for`/`for-in`/`for-of` head, if any.
fn hoist_for_init_var_declarations(
    init: &ForInit,
    context: &mut ScopeAnalysisContext,
) -> AnalysisResult<()> {
    if let ForInit::VariableDeclaration { declarations, kind } = init
        && matches!(kind, VariableDeclarationKind::Var) {
            for declarator in declarations {
                hoist_pattern_declaration(&declarator.id, context)?;
            }
        }
    Ok(())
}

/// Declares any function declarations written directly in `body` into the current
/// scope, without descending into nested blocks. Used when a block/function-body/
/// switch scope is created, so block-scoped function declarations land in the block
/// that textually contains them rather than bubbling up to the function scope.
fn hoist_local_function_declarations(
    body: &[Statement],
    context: &mut ScopeAnalysisContext,
) -> AnalysisResult<()> {
    for statement in body {
        if let Statement::FunctionDeclaration { id: Some(function_id), .. } = statement {
            declare_symbol(
                &function_id.name,
                SymbolType::Function,
                context.current_scope,
                context,
            )?;
        }
    }
    Ok(())
}

/// Hoists pattern declarations (for destructuring `var`s) into the current scope.
/// Initializer/default-value expressions are not analyzed here — they aren't
/// evaluated at hoist time.
fn hoist_pattern_declaration(
    pattern: &Pattern,
    context: &mut ScopeAnalysisContext,
) -> AnalysisResult<()> {
    match pattern {
        Pattern::Identifier(id) => {
            declare_symbol(
                &id.name,
                SymbolType::Variable { kind: VariableKind::Var },
                context.current_scope,
                context,
            )?;
        }
        Pattern::ArrayPattern { elements } => {
            for element in elements.iter().flatten() {
                hoist_pattern_declaration(element, context)?;
            }
        }
        Pattern::ObjectPattern { properties } => {
            for property in properties {
                match property {
                    ObjectPatternProperty::Property { value, .. } => {
                        hoist_pattern_declaration(value, context)?;
                    }
                    ObjectPatternProperty::RestElement { argument } => {
                        hoist_pattern_declaration(argument, context)?;
                    }
                }
            }
        }
        Pattern::AssignmentPattern { left, .. } => {
            hoist_pattern_declaration(left, context)?;
        }
        Pattern::RestElement { argument } => {
            hoist_pattern_declaration(argument, context)?;
        }
    }
    Ok(())
}

/// Analyzes a statement and updates scope information
fn analyze_statement(
    statement: &Statement,
    context: &mut ScopeAnalysisContext,
) -> AnalysisResult<()> {
    match statement {
        Statement::VariableDeclaration { declarations, kind } => {
            analyze_variable_declaration(declarations, kind, context)
        }
        Statement::FunctionDeclaration {
            id,
            params,
            body,
            is_async: _,
            is_generator: _,
        } => analyze_function_declaration(id, params, body, context),
        Statement::ClassDeclaration {
            id,
            super_class,
            body,
        } => analyze_class_declaration(id, super_class, body, context),
        Statement::ExpressionStatement { expression } => {
            analyze_expression(expression, context)
        }
        Statement::BlockStatement { body } => analyze_block_statement(body, context),
        Statement::ReturnStatement { argument } => {
            if let Some(expr) = argument {
                analyze_expression(expr, context)?;
            }
            Ok(())
        }
        Statement::IfStatement {
            test,
            consequent,
            alternate,
        } => {
            analyze_expression(test, context)?;
            analyze_statement(consequent, context)?;
            if let Some(alt) = alternate {
                analyze_statement(alt, context)?;
            }
            Ok(())
        }
        Statement::WhileStatement { test, body } => {
            analyze_expression(test, context)?;
            analyze_statement(body, context)
        }
        Statement::ForStatement {
            init,
            test,
            update,
            body,
        } => analyze_for_statement(init, test, update, body, context),
        Statement::ForInStatement { left, right, body } => {
            analyze_for_in_of_statement(left, right, body, context)
        }
        Statement::ForOfStatement { left, right, body, is_await: _ } => {
            analyze_for_in_of_statement(left, right, body, context)
        }
        Statement::SwitchStatement { discriminant, cases } => {
            analyze_switch_statement(discriminant, cases, context)
        }
        Statement::TryStatement { block, handler, finalizer } => {
            analyze_try_statement(block, handler, finalizer, context)
        }
        Statement::ImportDeclaration { specifiers, source: _ } => {
            analyze_import_declaration(specifiers, context)
        }
        Statement::ExportNamedDeclaration {
            declaration,
            specifiers: _,
            source: _,
        } => {
            if let Some(decl) = declaration {
                analyze_statement(decl, context)?;
                // Mark exported symbols
                mark_last_declaration_as_exported(context);
            }
            Ok(())
        }
    }
}

/// Analyzes variable declarations and adds symbols to current scope
fn analyze_variable_declaration(
    declarations: &[crate::parser::ast_types::VariableDeclarator],
    kind: &VariableDeclarationKind,
    context: &mut ScopeAnalysisContext,
) -> AnalysisResult<()> {
    let var_kind = match kind {
        VariableDeclarationKind::Var => VariableKind::Var,
        VariableDeclarationKind::Let => VariableKind::Let,
        VariableDeclarationKind::Const => VariableKind::Const,
    };

    for declarator in declarations {
        // For var declarations, the symbol was already hoisted
        // For let/const, we need to declare it now
        if !matches!(kind, VariableDeclarationKind::Var) {
            analyze_pattern_binding(&declarator.id, var_kind.clone(), context)?;
        }

        // Analyze initialization expression if present
        if let Some(init) = &declarator.init {
            analyze_expression(init, context)?;
        }
    }

    Ok(())
}

/// Analyzes function declarations: builds the Function scope (parameters, `arguments`)
/// and its FunctionBlock child (the body's own declarations).
fn analyze_function_declaration(
    _id: &Option<Identifier>,
    params: &[Pattern],
    body: &BlockStatement,
    context: &mut ScopeAnalysisContext,
) -> AnalysisResult<()> {
    // Function name was already hoisted, so no need to re-declare

    let function_scope_id = create_scope(ScopeType::Function, Some(context.current_scope), context);
    let previous_scope = context.current_scope;
    context.current_scope = function_scope_id;

    declare_arguments_symbol(function_scope_id, context);

    // var declarations anywhere in the body hoist into the Function scope
    for statement in &body.body {
        hoist_var_declarations(statement, context)?;
    }

    // Bind parameters in function scope
    for param in params {
        analyze_parameter_binding(param, context)?;
    }

    // The body is its own FunctionBlock scope, nested under the Function scope
    let function_block_scope_id =
        create_scope(ScopeType::FunctionBlock, Some(function_scope_id), context);
    context.current_scope = function_block_scope_id;

    hoist_local_function_declarations(&body.body, context)?;

    for statement in &body.body {
        analyze_statement(statement, context)?;
    }

    context.current_scope = previous_scope;

    Ok(())
}

/// Analyzes class declarations and creates new class scope
fn analyze_class_declaration(
    id: &Option<Identifier>,
    super_class: &Option<Box<Expression>>,
    body: &crate::parser::ast_types::ClassBody,
    context: &mut ScopeAnalysisContext,
) -> AnalysisResult<()> {
    // Bind class name in current scope
    if let Some(class_id) = id {
        declare_symbol(
            &class_id.name,
            SymbolType::Class,
            context.current_scope,
            context,
        )?;
    }

    // Analyze super class expression
    if let Some(super_expr) = super_class {
        analyze_expression(super_expr, context)?;
    }

    // Create new class scope
    let class_scope_id = create_scope(ScopeType::ClassBody, Some(context.current_scope), context);

    // Enter class scope
    let previous_scope = context.current_scope;
    context.current_scope = class_scope_id;

    // Analyze class body
    for element in &body.body {
        analyze_class_element(element, context)?;
    }

    // Restore previous scope
    context.current_scope = previous_scope;

    Ok(())
}

/// Analyzes class elements (methods, properties)
fn analyze_class_element(
    element: &ClassElement,
    context: &mut ScopeAnalysisContext,
) -> AnalysisResult<()> {
    match element {
        ClassElement::PropertyDefinition {
            key: _,
            value,
            is_static: _,
            is_private: _,
        } => {
            if let Some(expr) = value {
                analyze_expression(expr, context)?;
            }
            Ok(())
        }
        ClassElement::MethodDefinition {
            key: _,
            value,
            kind: _,
            is_static: _,
            is_private: _,
        } => {
            // Analyze method as function
            analyze_function_expression(value, context)
        }
    }
}

/// Analyzes block statements. Every block that isn't a function body gets its own
/// scope (`createsBlockScope`), even if it declares nothing — this keeps the
/// invariant that every non-global scope has a parent trivially true for blocks
/// nested inside it.
fn analyze_block_statement(
    body: &[Statement],
    context: &mut ScopeAnalysisContext,
) -> AnalysisResult<()> {
    let block_scope_id = create_scope(ScopeType::Block, Some(context.current_scope), context);
    let previous_scope = context.current_scope;
    context.current_scope = block_scope_id;

    hoist_local_function_declarations(body, context)?;

    for statement in body {
        analyze_statement(statement, context)?;
    }

    context.current_scope = previous_scope;

    Ok(())
}

/// Analyzes `for (;;)` statements. The loop head always gets its own For scope,
/// whether or not it declares anything, matching `createsBlockScope` for `FOR` nodes.
fn analyze_for_statement(
    init: &Option<ForInit>,
    test: &Option<Expression>,
    update: &Option<Expression>,
    body: &Statement,
    context: &mut ScopeAnalysisContext,
) -> AnalysisResult<()> {
    let loop_scope_id = create_scope(ScopeType::For, Some(context.current_scope), context);
    let previous_scope = context.current_scope;
    context.current_scope = loop_scope_id;

    if let Some(for_init) = init {
        analyze_for_init(for_init, context)?;
    }
    if let Some(test_expr) = test {
        analyze_expression(test_expr, context)?;
    }
    if let Some(update_expr) = update {
        analyze_expression(update_expr, context)?;
    }
    analyze_statement(body, context)?;

    context.current_scope = previous_scope;

    Ok(())
}

/// Analyzes `for-in`/`for-of` statements; both share a For scope for the loop variable.
fn analyze_for_in_of_statement(
    left: &ForInit,
    right: &Expression,
    body: &Statement,
    context: &mut ScopeAnalysisContext,
) -> AnalysisResult<()> {
    let loop_scope_id = create_scope(ScopeType::For, Some(context.current_scope), context);
    let previous_scope = context.current_scope;
    context.current_scope = loop_scope_id;

    analyze_for_init(left, context)?;
    analyze_expression(right, context)?;
    analyze_statement(body, context)?;

    context.current_scope = previous_scope;

    Ok(())
}

/// Analyzes `switch` statements. Every case shares one Block-like scope for its
/// `let`/`const`/`class` declarations and block-scoped function declarations.
fn analyze_switch_statement(
    discriminant: &Expression,
    cases: &[SwitchCase],
    context: &mut ScopeAnalysisContext,
) -> AnalysisResult<()> {
    analyze_expression(discriminant, context)?;

    let switch_scope_id = create_scope(ScopeType::Block, Some(context.current_scope), context);
    let previous_scope = context.current_scope;
    context.current_scope = switch_scope_id;

    for case in cases {
        hoist_local_function_declarations(&case.consequent, context)?;
    }

    for case in cases {
        if let Some(test) = &case.test {
            analyze_expression(test, context)?;
        }
        for statement in &case.consequent {
            analyze_statement(statement, context)?;
        }
    }

    context.current_scope = previous_scope;

    Ok(())
}

/// Analyzes `try`/`catch`/`finally`. The catch parameter (if bound) gets its own
/// Catch scope, distinct from the surrounding try-block's scope; a parameter-less
/// `catch {}` declares nothing and so opens no Catch scope.
fn analyze_try_statement(
    block: &BlockStatement,
    handler: &Option<CatchClause>,
    finalizer: &Option<BlockStatement>,
    context: &mut ScopeAnalysisContext,
) -> AnalysisResult<()> {
    analyze_block_statement(&block.body, context)?;

    if let Some(catch_clause) = handler {
        if let Some(param) = &catch_clause.param {
            let catch_scope_id = create_scope(ScopeType::Catch, Some(context.current_scope), context);
            let previous_scope = context.current_scope;
            context.current_scope = catch_scope_id;

            analyze_pattern_binding(param, VariableKind::Let, context)?;
            analyze_block_statement(&catch_clause.body.body, context)?;

            context.current_scope = previous_scope;
        } else {
            analyze_block_statement(&catch_clause.body.body, context)?;
        }
    }

    if let Some(finalizer_block) = finalizer {
        analyze_block_statement(&finalizer_block.body, context)?;
    }

    Ok(())
}

/// Analyzes for loop initialization
fn analyze_for_init(init: &ForInit, context: &mut ScopeAnalysisContext) -> AnalysisResult<()> {
    match init {
        ForInit::VariableDeclaration { declarations, kind } => {
            analyze_variable_declaration(declarations, kind, context)
        }
        ForInit::Expression(expr) => analyze_expression(expr, context),
    }
}

/// Analyzes import declarations and creates import symbols
fn analyze_import_declaration(
    specifiers: &[ImportSpecifier],
    context: &mut ScopeAnalysisContext,
) -> AnalysisResult<()> {
    for specifier in specifiers {
        match specifier {
            ImportSpecifier::ImportDefaultSpecifier { local } => {
                declare_symbol(&local.name, SymbolType::Import, context.current_scope, context)?;
            }
            ImportSpecifier::ImportNamespaceSpecifier { local } => {
                declare_symbol(&local.name, SymbolType::Import, context.current_scope, context)?;
            }
            ImportSpecifier::ImportSpecifier { imported: _, local } => {
                declare_symbol(&local.name, SymbolType::Import, context.current_scope, context)?;
            }
        }
    }
    Ok(())
}

/// Analyzes expressions and tracks identifier references
fn analyze_expression(expression: &Expression, context: &mut ScopeAnalysisContext) -> AnalysisResult<()> {
    match expression {
        Expression::Identifier(id) => {
            reference_symbol(&id.name, ReferenceType::Read, context);
            Ok(())
        }
        Expression::BinaryExpression { left, right, .. } => {
            analyze_expression(left, context)?;
            analyze_expression(right, context)
        }
        Expression::UnaryExpression { argument, .. } => analyze_expression(argument, context),
        Expression::AssignmentExpression {
            left,
            right,
            operator: _,
        } => {
            // Left side is a write reference
            if let Expression::Identifier(id) = left.as_ref() {
                reference_symbol(&id.name, ReferenceType::Write, context);
            } else {
                analyze_expression(left, context)?;
            }
            analyze_expression(right, context)
        }
        Expression::CallExpression { callee, arguments } => {
            if let Expression::Identifier(id) = callee.as_ref() {
                reference_symbol(&id.name, ReferenceType::Call, context);
            } else {
                analyze_expression(callee, context)?;
            }
            for arg in arguments {
                analyze_expression(arg, context)?;
            }
            Ok(())
        }
        Expression::FunctionExpression(func_expr) => analyze_function_expression(func_expr, context),
        Expression::ArrowFunctionExpression { params, body, .. } => {
            analyze_arrow_function(params, body, context)
        }
        Expression::MemberExpression { object, property, .. } => {
            analyze_expression(object, context)?;
            if let Expression::Identifier(id) = property.as_ref() {
                reference_symbol(&id.name, ReferenceType::PropertyAccess, context);
            } else {
                analyze_expression(property, context)?;
            }
            Ok(())
        }
        Expression::Literal(_) => Ok(()), // Literals don't affect scope
        Expression::ThisExpression => Ok(()), // `this` binds no identifier
        _ => Ok(()), // Handle other expression types as needed
    }
}

/// Analyzes function expressions. A named function expression's own name "bleeds"
/// into its Function scope (available to the body for self-recursion) before
/// parameters are bound.
fn analyze_function_expression(
    func_expr: &crate::parser::ast_types::FunctionExpression,
    context: &mut ScopeAnalysisContext,
) -> AnalysisResult<()> {
    let function_scope_id = create_scope(ScopeType::Function, Some(context.current_scope), context);
    let previous_scope = context.current_scope;
    context.current_scope = function_scope_id;

    if let Some(name_id) = &func_expr.id {
        declare_symbol(&name_id.name, SymbolType::Function, function_scope_id, context)?;
    }

    declare_arguments_symbol(function_scope_id, context);

    for statement in &func_expr.body.body {
        hoist_var_declarations(statement, context)?;
    }

    for param in &func_expr.params {
        analyze_parameter_binding(param, context)?;
    }

    let function_block_scope_id =
        create_scope(ScopeType::FunctionBlock, Some(function_scope_id), context);
    context.current_scope = function_block_scope_id;

    hoist_local_function_declarations(&func_expr.body.body, context)?;

    for statement in &func_expr.body.body {
        analyze_statement(statement, context)?;
    }

    context.current_scope = previous_scope;

    Ok(())
}

/// Analyzes arrow function expressions. Arrow functions have no `arguments` of
/// their own — an `arguments` reference inside one resolves to the nearest
/// enclosing ordinary function — so, unlike `analyze_function_declaration`/
/// `analyze_function_expression`, no synthetic `arguments` symbol is declared here.
fn analyze_arrow_function(
    params: &[Pattern],
    body: &ArrowFunctionBody,
    context: &mut ScopeAnalysisContext,
) -> AnalysisResult<()> {
    let function_scope_id = create_scope(ScopeType::Function, Some(context.current_scope), context);
    let previous_scope = context.current_scope;
    context.current_scope = function_scope_id;

    if let ArrowFunctionBody::BlockStatement(block) = body {
        for statement in &block.body {
            hoist_var_declarations(statement, context)?;
        }
    }

    for param in params {
        analyze_parameter_binding(param, context)?;
    }

    match body {
        ArrowFunctionBody::Expression(expr) => {
            analyze_expression(expr, context)?;
        }
        ArrowFunctionBody::BlockStatement(block) => {
            let function_block_scope_id =
                create_scope(ScopeType::FunctionBlock, Some(function_scope_id), context);
            context.current_scope = function_block_scope_id;

            hoist_local_function_declarations(&block.body, context)?;

            for statement in &block.body {
                analyze_statement(statement, context)?;
            }
        }
    }

    context.current_scope = previous_scope;

    Ok(())
}

/// Recursively binds every identifier in `pattern` to a symbol, using `make_symbol_type`
/// to decide what kind of symbol each leaf identifier becomes (`Parameter` for
/// function/arrow parameters, `Variable { kind }` for declarations). Default-value
/// expressions in `AssignmentPattern`s are analyzed for references along the way.
fn bind_pattern(
    pattern: &Pattern,
    make_symbol_type: &dyn Fn() -> SymbolType,
    context: &mut ScopeAnalysisContext,
) -> AnalysisResult<()> {
    match pattern {
        Pattern::Identifier(id) => {
            declare_symbol(&id.name, make_symbol_type(), context.current_scope, context)?;
            Ok(())
        }
        Pattern::ArrayPattern { elements } => {
            for element in elements.iter().flatten() {
                bind_pattern(element, make_symbol_type, context)?;
            }
            Ok(())
        }
        Pattern::ObjectPattern { properties } => {
            for property in properties {
                match property {
                    ObjectPatternProperty::Property { value, .. } => {
                        bind_pattern(value, make_symbol_type, context)?;
                    }
                    ObjectPatternProperty::RestElement { argument } => {
                        bind_pattern(argument, make_symbol_type, context)?;
                    }
                }
            }
            Ok(())
        }
        Pattern::AssignmentPattern { left, right } => {
            bind_pattern(left, make_symbol_type, context)?;
            analyze_expression(right, context)
        }
        Pattern::RestElement { argument } => bind_pattern(argument, make_symbol_type, context),
    }
}

/// Analyzes pattern bindings for `let`/`const`/catch-parameter declarations
/// (destructuring included).
fn analyze_pattern_binding(
    pattern: &Pattern,
    var_kind: VariableKind,
    context: &mut ScopeAnalysisContext,
) -> AnalysisResult<()> {
    bind_pattern(pattern, &|| SymbolType::Variable { kind: var_kind.clone() }, context)
}

/// Analyzes a function/arrow parameter binding (destructuring included), declaring
/// each bound name as `SymbolType::Parameter`.
fn analyze_parameter_binding(
    pattern: &Pattern,
    context: &mut ScopeAnalysisContext,
) -> AnalysisResult<()> {
    bind_pattern(pattern, &|| SymbolType::Parameter, context)
}

/// Creates a new scope and adds it to the scope tree
fn create_scope(
    scope_type: ScopeType,
    parent_id: Option<ScopeId>,
    context: &mut ScopeAnalysisContext,
) -> ScopeId {
    let scope_id = context.scope_tree.next_id();

    let scope = Scope {
        id: scope_id,
        scope_type,
        parent_id,
        children: Vec::new(),
        bindings: Vec::new(),
        is_safe: true,
    };

    context.scope_tree.scopes.insert(scope_id, scope);

    // Add as child to parent scope
    if let Some(parent) = parent_id
        && let Some(parent_scope) = context.scope_tree.get_scope_mut(parent) {
            parent_scope.children.push(scope_id);
        }

    scope_id
}

/// Declares a new symbol in the specified scope
fn declare_symbol(
    name: &str,
    symbol_type: SymbolType,
    scope_id: ScopeId,
    context: &mut ScopeAnalysisContext,
) -> AnalysisResult<SymbolId> {
    // Check if symbol already exists in this scope (for hoisting)
    if let Some(scope_bindings) = context.symbol_table.scope_bindings.get(&scope_id)
        && let Some(&existing_symbol_id) = scope_bindings.get(name) {
            // Symbol already exists (hoisted), return existing ID
            if context.config.verbose {
                println!("Symbol '{}' already declared in scope {} (hoisted)", name, scope_id);
            }
            return Ok(existing_symbol_id);
        }

    let symbol_id = context.symbol_table.next_id();

    let symbol = Symbol {
        id: symbol_id,
        name: name.to_string(),
        symbol_type,
        scope_id,
        references: Vec::new(),
        is_captured: false,
        is_exported: false,
        is_renamable: true,
    };

    context.symbol_table.symbols.insert(symbol_id, symbol);

    // Add to scope bindings
    context
        .symbol_table
        .scope_bindings
        .entry(scope_id)
        .or_default()
        .insert(name.to_string(), symbol_id);

    // Add to scope's bindings list
    if let Some(scope) = context.scope_tree.get_scope_mut(scope_id) {
        scope.bindings.push(symbol_id);
    }

    if context.config.verbose {
        println!("Declared symbol '{}' in scope {}", name, scope_id);
    }

    Ok(symbol_id)
}

/// Pre-declares the synthetic, non-renamable `arguments` binding every ordinary
/// function (declaration, expression, or method) implicitly has. If the function
/// body itself declares a parameter or `var` called `arguments`, `declare_symbol`'s
/// hoisting merge reuses this same symbol, so the name stays un-renamable either way.
fn declare_arguments_symbol(scope_id: ScopeId, context: &mut ScopeAnalysisContext) {
    let symbol_id = context.symbol_table.next_id();

    let symbol = Symbol {
        id: symbol_id,
        name: "arguments".to_string(),
        symbol_type: SymbolType::Variable { kind: VariableKind::Var },
        scope_id,
        references: Vec::new(),
        is_captured: false,
        is_exported: false,
        is_renamable: false,
    };

    context.symbol_table.symbols.insert(symbol_id, symbol);
    context
        .symbol_table
        .scope_bindings
        .entry(scope_id)
        .or_default()
        .insert("arguments".to_string(), symbol_id);

    if let Some(scope) = context.scope_tree.get_scope_mut(scope_id) {
        scope.bindings.push(symbol_id);
    }
}

/// Records a reference to a symbol
fn reference_symbol(
    name: &str,
    reference_type: ReferenceType,
    context: &mut ScopeAnalysisContext,
) {
    if context.config.verbose {
        println!("[DEBUG] Recording reference to symbol '{}' of type {:?}", name, reference_type);
    }

    // Find the symbol by resolving through scope chain
    if let Some(symbol_id) = resolve_symbol(name, context.current_scope, context) {
        let reference = SymbolReference {
            location: context.current_location.clone(),
            reference_type,
            scope_id: context.current_scope,
        };

        if let Some(symbol) = context.symbol_table.symbols.get_mut(&symbol_id) {
            symbol.references.push(reference);

            if context.config.verbose {
                println!("[DEBUG] Added reference to symbol '{}' (id: {}), total references: {}", name, symbol_id, symbol.references.len());
            }

            // Check for closure capture
            if symbol.scope_id != context.current_scope {
                symbol.is_captured = true;
                if context.config.verbose {
                    println!("Symbol '{}' captured by closure", name);
                }
            }
        }
    } else if context.config.verbose {
        println!("Unresolved symbol reference: '{}'", name);
    }
}

/// Resolves a symbol name through the scope chain
fn resolve_symbol(
    name: &str,
    current_scope: ScopeId,
    context: &ScopeAnalysisContext,
) -> Option<SymbolId> {
    let mut scope_id = current_scope;

    loop {
        // Check if symbol exists in current scope
        if let Some(scope_bindings) = context.symbol_table.scope_bindings.get(&scope_id)
            && let Some(&symbol_id) = scope_bindings.get(name) {
                return Some(symbol_id);
            }

        // Move to parent scope
        if let Some(scope) = context.scope_tree.get_scope(scope_id) {
            if let Some(parent_id) = scope.parent_id {
                scope_id = parent_id;
            } else {
                break; // Reached root scope
            }
        } else {
            break;
        }
    }

    None
}

/// Marks the last declared symbol as exported
fn mark_last_declaration_as_exported(context: &mut ScopeAnalysisContext) {
    if let Some(scope) = context.scope_tree.get_scope(context.current_scope)
        && let Some(&last_symbol_id) = scope.bindings.last()
            && let Some(symbol) = context.symbol_table.symbols.get_mut(&last_symbol_id) {
                symbol.is_exported = true;
                symbol.is_renamable = false; // Exported symbols shouldn't be renamed
                if context.config.verbose {
                    println!("Marked symbol '{}' as exported", symbol.name);
                }
            }
}

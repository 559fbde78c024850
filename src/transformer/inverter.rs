//! # Identifier Un-suffixer ("Inverter")
//!
//! Strips `$jscomp$N`-style suffixes a prior uniquifying pass (see `renamer`) added,
//! wherever removal does not introduce a collision. No teacher file does anything like
//! this — it is grounded on the same scope-building discipline `scope_builder.rs` and
//! `renamer.rs` use, run in the opposite direction.
//!
//! The decision of *which* binding in a same-named family gets to keep the bare name is
//! made bottom-up (innermost scope first): a scope may only reclaim a bare name if no
//! ancestor scope already declares that exact name, and no scope it enclosed already
//! claimed it for itself. That second rule is what makes `function x1(){var a$jscomp$1;
//! function x2(){var a$jscomp$2}function x3(){var a$jscomp$3}}` invert to `x2`/`x3` getting
//! bare `a` while `x1`'s own binding is merely renumbered to `a$jscomp$0` — `x1` encloses
//! both, and by the time it is considered, `a` is already spoken for underneath it.

use crate::parser::ast_types::{
    ArrowFunctionBody, ClassBody, ClassElement, Expression, ForInit, Identifier, ImportSpecifier,
    ObjectPatternProperty, ObjectProperty, Pattern, Program, PropertyKey, Statement,
    VariableDeclarationKind,
};
use crate::transformer::renamer::{
    pattern_declared_names, sync_shorthand_expression_key, sync_shorthand_pattern_key,
};
use crate::transformer::TransformResult;
use std::collections::{HashMap, HashSet};

const ARGUMENTS: &str = "arguments";

/// A single lexical scope as discovered by the collection pass: its bindings in
/// declaration order (original, still-suffixed names) and its child scopes.
#[derive(Debug, Default)]
struct ScopeRecord {
    parent: Option<usize>,
    children: Vec<usize>,
    bindings: Vec<String>,
}

/// Outcome of an inversion pass.
#[derive(Debug, Clone, Default)]
pub struct InvertResult {
    pub stripped_count: u32,
    pub mapping: HashMap<String, String>,
}

/// Strips uniqueness suffixes from `ast` in place wherever doing so is safe.
pub fn invert_program(ast: &mut Program) -> TransformResult<InvertResult> {
    let mut collector = Collector::new();
    collector.walk_program(ast);
    let arena = collector.arena;

    let mut decider = Decider::new(arena);
    decider.decide(0);

    let mut rewriter = Rewriter::new(decider.arena, decider.final_names);
    rewriter.walk_program(ast);

    Ok(rewriter.result)
}

/// Returns the portion of `name` before its first `$jscomp$...` suffix, or `None` if
/// `name` carries no such suffix (it is already bare).
fn base_name(name: &str) -> Option<&str> {
    name.find("$jscomp$").map(|idx| &name[..idx])
}

// ---------------------------------------------------------------------------
// Phase 1: collection — builds the scope tree without touching the AST.
// ---------------------------------------------------------------------------

struct Collector {
    arena: Vec<ScopeRecord>,
    stack: Vec<usize>,
}

impl Collector {
    fn new() -> Self {
        Self {
            arena: vec![ScopeRecord::default()],
            stack: vec![0],
        }
    }

    fn current(&self) -> usize {
        *self.stack.last().unwrap()
    }

    fn push_scope(&mut self) -> usize {
        let parent = self.current();
        let id = self.arena.len();
        self.arena.push(ScopeRecord {
            parent: Some(parent),
            children: Vec::new(),
            bindings: Vec::new(),
        });
        self.arena[parent].children.push(id);
        self.stack.push(id);
        id
    }

    fn pop_scope(&mut self) {
        self.stack.pop();
    }

    fn declare(&mut self, name: &str) {
        if name == ARGUMENTS {
            return;
        }
        let cur = self.current();
        if !self.arena[cur].bindings.iter().any(|n| n == name) {
            self.arena[cur].bindings.push(name.to_string());
        }
    }

    fn walk_program(&mut self, ast: &Program) {
        // Same interleaved declare order as `renamer::rename_program`: Global scope is
        // both hoistScope and blockScope, so `var` and `let`/`const`/`function`/`class`
        // must be recorded in one left-to-right pass, not two separate sweeps — the
        // binding order here feeds the Decider's "sort members by traversal order" step.
        for stmt in &ast.body {
            self.collect_direct_decl(stmt);
            self.collect_hoisted_vars(stmt);
        }
        for stmt in &ast.body {
            self.walk_statement(stmt);
        }
    }

    fn collect_hoisted_vars(&mut self, stmt: &Statement) {
        match stmt {
            Statement::VariableDeclaration {
                declarations,
                kind: VariableDeclarationKind::Var,
            } => {
                for d in declarations {
                    let mut names = Vec::new();
                    pattern_declared_names(&d.id, &mut names);
                    for n in names {
                        self.declare(&n);
                    }
                }
            }
            Statement::BlockStatement { body } => {
                for s in body {
                    self.collect_hoisted_vars(s);
                }
            }
            Statement::IfStatement { consequent, alternate, .. } => {
                self.collect_hoisted_vars(consequent);
                if let Some(a) = alternate {
                    self.collect_hoisted_vars(a);
                }
            }
            Statement::WhileStatement { body, .. } => self.collect_hoisted_vars(body),
            Statement::ForStatement { init, body, .. } => {
                if let Some(i) = init {
                    self.collect_for_init_hoisted_vars(i);
                }
                self.collect_hoisted_vars(body);
            }
            Statement::ForInStatement { left, body, .. }
            | Statement::ForOfStatement { left, body, .. } => {
                self.collect_for_init_hoisted_vars(left);
                self.collect_hoisted_vars(body);
            }
            Statement::SwitchStatement { cases, .. } => {
                for c in cases {
                    for s in &c.consequent {
                        self.collect_hoisted_vars(s);
                    }
                }
            }
            Statement::TryStatement { block, handler, finalizer } => {
                for s in &block.body {
                    self.collect_hoisted_vars(s);
                }
                if let Some(h) = handler {
                    for s in &h.body.body {
                        self.collect_hoisted_vars(s);
                    }
                }
                if let Some(f) = finalizer {
                    for s in &f.body {
                        self.collect_hoisted_vars(s);
                    }
                }
            }
            Statement::ExportNamedDeclaration { declaration: Some(inner), .. } => {
                self.collect_hoisted_vars(inner)
            }
            _ => {}
        }
    }

    fn collect_for_init_hoisted_vars(&mut self, init: &ForInit) {
        if let ForInit::VariableDeclaration {
            declarations,
            kind: VariableDeclarationKind::Var,
        } = init
        {
            for d in declarations {
                let mut names = Vec::new();
                pattern_declared_names(&d.id, &mut names);
                for n in names {
                    self.declare(&n);
                }
            }
        }
    }

    fn collect_direct_block_decls(&mut self, body: &[Statement]) {
        for stmt in body {
            self.collect_direct_decl(stmt);
        }
    }

    fn collect_direct_decl(&mut self, stmt: &Statement) {
        match stmt {
            Statement::FunctionDeclaration { id: Some(fid), .. } => self.declare(&fid.name),
            Statement::ClassDeclaration { id: Some(cid), .. } => self.declare(&cid.name),
            Statement::VariableDeclaration { declarations, kind }
                if !matches!(kind, VariableDeclarationKind::Var) =>
            {
                for d in declarations {
                    let mut names = Vec::new();
                    pattern_declared_names(&d.id, &mut names);
                    for n in names {
                        self.declare(&n);
                    }
                }
            }
            Statement::ImportDeclaration { specifiers, .. } => {
                for spec in specifiers {
                    match spec {
                        ImportSpecifier::ImportDefaultSpecifier { local }
                        | ImportSpecifier::ImportNamespaceSpecifier { local }
                        | ImportSpecifier::ImportSpecifier { local, .. } => self.declare(&local.name),
                    }
                }
            }
            Statement::ExportNamedDeclaration { declaration: Some(inner), .. } => {
                self.collect_direct_decl(inner)
            }
            _ => {}
        }
    }

    fn walk_statement(&mut self, stmt: &Statement) {
        match stmt {
            Statement::VariableDeclaration { declarations, .. } => {
                for d in declarations {
                    if let Some(init) = &d.init {
                        self.walk_expression(init);
                    }
                }
            }
            Statement::FunctionDeclaration { params, body, .. } => {
                self.walk_function(None, params, &body.body)
            }
            Statement::ClassDeclaration { super_class, body, .. } => {
                if let Some(sc) = super_class {
                    self.walk_expression(sc);
                }
                self.walk_class_body(body);
            }
            Statement::ExpressionStatement { expression } => self.walk_expression(expression),
            Statement::BlockStatement { body } => self.walk_block(body),
            Statement::ReturnStatement { argument } => {
                if let Some(e) = argument {
                    self.walk_expression(e);
                }
            }
            Statement::IfStatement { test, consequent, alternate } => {
                self.walk_expression(test);
                self.walk_statement(consequent);
                if let Some(a) = alternate {
                    self.walk_statement(a);
                }
            }
            Statement::WhileStatement { test, body } => {
                self.walk_expression(test);
                self.walk_statement(body);
            }
            _ => self.walk_statement_rest(stmt),
        }
    }

    fn walk_statement_rest(&mut self, stmt: &Statement) {
        match stmt {
            Statement::ForStatement { init, test, update, body } => {
                self.push_scope();
                if let Some(i) = init {
                    self.collect_for_init_block_decl(i);
                    self.walk_for_init(i);
                }
                if let Some(t) = test {
                    self.walk_expression(t);
                }
                if let Some(u) = update {
                    self.walk_expression(u);
                }
                self.walk_statement(body);
                self.pop_scope();
            }
            Statement::ForInStatement { left, right, body } => {
                self.push_scope();
                self.collect_for_init_block_decl(left);
                self.walk_for_init(left);
                self.walk_expression(right);
                self.walk_statement(body);
                self.pop_scope();
            }
            Statement::ForOfStatement { left, right, body, .. } => {
                self.push_scope();
                self.collect_for_init_block_decl(left);
                self.walk_for_init(left);
                self.walk_expression(right);
                self.walk_statement(body);
                self.pop_scope();
            }
            Statement::SwitchStatement { discriminant, cases } => {
                self.walk_expression(discriminant);
                self.push_scope();
                for c in cases {
                    self.collect_direct_block_decls(&c.consequent);
                }
                for c in cases {
                    if let Some(t) = &c.test {
                        self.walk_expression(t);
                    }
                    for s in &c.consequent {
                        self.walk_statement(s);
                    }
                }
                self.pop_scope();
            }
            Statement::TryStatement { block, handler, finalizer } => {
                self.walk_block(&block.body);
                if let Some(h) = handler {
                    if let Some(param) = &h.param {
                        self.push_scope();
                        let mut names = Vec::new();
                        pattern_declared_names(param, &mut names);
                        for n in names {
                            self.declare(&n);
                        }
                        self.walk_block(&h.body.body);
                        self.pop_scope();
                    } else {
                        self.walk_block(&h.body.body);
                    }
                }
                if let Some(f) = finalizer {
                    self.walk_block(&f.body);
                }
            }
            Statement::ImportDeclaration { .. } => {}
            Statement::ExportNamedDeclaration { declaration, .. } => {
                if let Some(decl) = declaration {
                    self.walk_statement(decl);
                }
            }
            _ => {}
        }
    }

    fn collect_for_init_block_decl(&mut self, init: &ForInit) {
        if let ForInit::VariableDeclaration { declarations, kind } = init {
            if !matches!(kind, VariableDeclarationKind::Var) {
                for d in declarations {
                    let mut names = Vec::new();
                    pattern_declared_names(&d.id, &mut names);
                    for n in names {
                        self.declare(&n);
                    }
                }
            }
        }
    }

    fn walk_for_init(&mut self, init: &ForInit) {
        match init {
            ForInit::VariableDeclaration { declarations, .. } => {
                for d in declarations {
                    if let Some(init) = &d.init {
                        self.walk_expression(init);
                    }
                }
            }
            ForInit::Expression(e) => self.walk_expression(e),
        }
    }

    fn walk_block(&mut self, body: &[Statement]) {
        self.push_scope();
        self.collect_direct_block_decls(body);
        for s in body {
            self.walk_statement(s);
        }
        self.pop_scope();
    }

    fn walk_function(&mut self, self_name: Option<&Identifier>, params: &[Pattern], body: &[Statement]) {
        self.push_scope();
        if let Some(name) = self_name {
            self.declare(&name.name);
        }
        let mut param_names = Vec::new();
        for p in params {
            pattern_declared_names(p, &mut param_names);
        }
        for n in param_names {
            self.declare(&n);
        }
        for s in body {
            self.collect_hoisted_vars(s);
        }
        for p in params {
            self.walk_pattern_defaults(p);
        }
        self.walk_function_block(body);
        self.pop_scope();
    }

    fn walk_function_block(&mut self, body: &[Statement]) {
        self.push_scope();
        self.collect_direct_block_decls(body);
        for s in body {
            self.walk_statement(s);
        }
        self.pop_scope();
    }

    /// Walks the default-value expressions embedded in a parameter pattern
    /// (the only expressions a parameter list can itself contain).
    fn walk_pattern_defaults(&mut self, pattern: &Pattern) {
        match pattern {
            Pattern::Identifier(_) => {}
            Pattern::ArrayPattern { elements } => {
                for el in elements.iter().flatten() {
                    self.walk_pattern_defaults(el);
                }
            }
            Pattern::ObjectPattern { properties } => {
                for p in properties {
                    match p {
                        ObjectPatternProperty::Property { value, .. } => self.walk_pattern_defaults(value),
                        ObjectPatternProperty::RestElement { argument } => {
                            self.walk_pattern_defaults(argument)
                        }
                    }
                }
            }
            Pattern::AssignmentPattern { left, right } => {
                self.walk_pattern_defaults(left);
                self.walk_expression(right);
            }
            Pattern::RestElement { argument } => self.walk_pattern_defaults(argument),
        }
    }

    fn walk_arrow(&mut self, params: &[Pattern], body: &ArrowFunctionBody) {
        self.push_scope();
        let mut names = Vec::new();
        for p in params {
            pattern_declared_names(p, &mut names);
        }
        for n in names {
            self.declare(&n);
        }
        if let ArrowFunctionBody::BlockStatement(block) = body {
            for s in &block.body {
                self.collect_hoisted_vars(s);
            }
        }
        for p in params {
            self.walk_pattern_defaults(p);
        }
        match body {
            ArrowFunctionBody::Expression(e) => self.walk_expression(e),
            ArrowFunctionBody::BlockStatement(block) => self.walk_function_block(&block.body),
        }
        self.pop_scope();
    }

    fn walk_class_body(&mut self, body: &ClassBody) {
        self.push_scope();
        for el in &body.body {
            match el {
                ClassElement::PropertyDefinition { value, .. } => {
                    if let Some(v) = value {
                        self.walk_expression(v);
                    }
                }
                ClassElement::MethodDefinition { value, .. } => {
                    self.walk_function(value.id.as_ref(), &value.params, &value.body.body)
                }
            }
        }
        self.pop_scope();
    }

    fn walk_expression(&mut self, expr: &Expression) {
        match expr {
            Expression::Identifier(_) | Expression::Literal(_) | Expression::ThisExpression => {}
            Expression::BinaryExpression { left, right, .. } => {
                self.walk_expression(left);
                self.walk_expression(right);
            }
            Expression::UnaryExpression { argument, .. } => self.walk_expression(argument),
            Expression::AssignmentExpression { left, right, .. } => {
                self.walk_expression(left);
                self.walk_expression(right);
            }
            Expression::UpdateExpression { argument, .. } => self.walk_expression(argument),
            Expression::CallExpression { callee, arguments } => {
                self.walk_expression(callee);
                for a in arguments {
                    self.walk_expression(a);
                }
            }
            Expression::MemberExpression { object, property, computed } => {
                self.walk_expression(object);
                if *computed {
                    self.walk_expression(property);
                }
            }
            Expression::FunctionExpression(func) => {
                self.walk_function(func.id.as_ref(), &func.params, &func.body.body)
            }
            Expression::ArrowFunctionExpression { params, body, .. } => self.walk_arrow(params, body),
            Expression::ObjectExpression { properties } => {
                for p in properties {
                    match p {
                        ObjectProperty::Property { value, .. } => self.walk_expression(value),
                        ObjectProperty::SpreadElement { argument } => self.walk_expression(argument),
                    }
                }
            }
            Expression::ArrayExpression { elements } => {
                for el in elements.iter().flatten() {
                    self.walk_expression(el);
                }
            }
            Expression::TemplateLiteral { expressions, .. } => {
                for e in expressions {
                    self.walk_expression(e);
                }
            }
            Expression::ConditionalExpression { test, consequent, alternate } => {
                self.walk_expression(test);
                self.walk_expression(consequent);
                self.walk_expression(alternate);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Phase 2: decision — bottom-up, decides the final name for every binding.
// ---------------------------------------------------------------------------

struct Decider {
    arena: Vec<ScopeRecord>,
    final_names: HashMap<usize, HashMap<String, String>>,
    renumber_counters: HashMap<String, u32>,
}

impl Decider {
    fn new(arena: Vec<ScopeRecord>) -> Self {
        Self {
            arena,
            final_names: HashMap::new(),
            renumber_counters: HashMap::new(),
        }
    }

    /// Processes `scope_id`'s subtree bottom-up; returns the set of bare names this
    /// subtree (this scope plus every descendant) ends up claiming.
    fn decide(&mut self, scope_id: usize) -> HashSet<String> {
        let children = self.arena[scope_id].children.clone();
        let mut descendant_claims = HashSet::new();
        for child in children {
            descendant_claims.extend(self.decide(child));
        }

        let ancestor_names = self.ancestor_names(scope_id);
        let bindings = self.arena[scope_id].bindings.clone();
        let mut own_claims: HashSet<String> = HashSet::new();
        let mut names = HashMap::new();

        for original in &bindings {
            let base = base_name(original).unwrap_or(original.as_str());
            let blocked = ancestor_names.contains(base)
                || descendant_claims.contains(base)
                || own_claims.contains(base);

            let final_name = if !blocked {
                own_claims.insert(base.to_string());
                base.to_string()
            } else {
                let k = self.renumber_counters.entry(base.to_string()).or_insert(0);
                let name = format!("{base}$jscomp${k}");
                *k += 1;
                name
            };

            names.insert(original.clone(), final_name);
        }

        self.final_names.insert(scope_id, names);
        descendant_claims.extend(own_claims);
        descendant_claims
    }

    fn ancestor_names(&self, scope_id: usize) -> HashSet<&str> {
        let mut set = HashSet::new();
        let mut cur = self.arena[scope_id].parent;
        while let Some(id) = cur {
            for b in &self.arena[id].bindings {
                set.insert(b.as_str());
            }
            cur = self.arena[id].parent;
        }
        set
    }
}

// ---------------------------------------------------------------------------
// Phase 3: rewrite — reapplies the same traversal, mutating the AST.
// ---------------------------------------------------------------------------

struct Rewriter {
    arena: Vec<ScopeRecord>,
    final_names: HashMap<usize, HashMap<String, String>>,
    stack: Vec<usize>,
    next_child_cursor: HashMap<usize, usize>,
    result: InvertResult,
}

impl Rewriter {
    fn new(arena: Vec<ScopeRecord>, final_names: HashMap<usize, HashMap<String, String>>) -> Self {
        let mut result = InvertResult::default();
        for (original, renamed) in final_names.values().flatten() {
            if original != renamed {
                result.stripped_count += 1;
                result.mapping.insert(original.clone(), renamed.clone());
            }
        }
        Self {
            arena,
            final_names,
            stack: vec![0],
            next_child_cursor: HashMap::new(),
            result,
        }
    }

    fn current(&self) -> usize {
        *self.stack.last().unwrap()
    }

    /// Enters the next not-yet-visited child of the current scope, in the exact order
    /// the collector created them — the collector and rewriter walk the identical AST
    /// with identical traversal code, so the Nth child created is always the Nth child
    /// entered here.
    fn push_scope(&mut self) {
        let parent = self.current();
        let cursor = self.next_child_cursor.entry(parent).or_insert(0);
        let id = self.arena[parent].children[*cursor];
        *cursor += 1;
        self.stack.push(id);
    }

    fn pop_scope(&mut self) {
        self.stack.pop();
    }

    fn resolve(&self, name: &str) -> Option<&str> {
        if name == ARGUMENTS {
            return None;
        }
        let mut cur = Some(self.current());
        while let Some(id) = cur {
            if let Some(new_name) = self.final_names.get(&id).and_then(|m| m.get(name)) {
                return Some(new_name.as_str());
            }
            cur = self.arena[id].parent;
        }
        None
    }

    fn rename_identifier_reference(&self, id: &mut Identifier) {
        if let Some(new_name) = self.resolve(&id.name) {
            id.name = new_name.to_string();
        }
    }

    /// A declaration's binding may live in an ancestor scope relative to where it is
    /// physically written (a hoisted `var` is recorded in its enclosing Function scope
    /// but the `var` statement itself sits inside a nested Block/FunctionBlock scope), so
    /// this walks the chain exactly like `rename_identifier_reference` rather than
    /// consulting only the current scope.
    fn rename_declared_identifier(&self, id: &mut Identifier) {
        if let Some(new_name) = self.resolve(&id.name) {
            id.name = new_name.to_string();
        }
    }

    fn walk_program(&mut self, ast: &mut Program) {
        for stmt in ast.body.iter_mut() {
            self.rewrite_statement(stmt);
        }
    }

    fn rewrite_statement(&mut self, stmt: &mut Statement) {
        match stmt {
            Statement::VariableDeclaration { declarations, .. } => {
                for d in declarations.iter_mut() {
                    self.rewrite_pattern(&mut d.id);
                    if let Some(init) = d.init.as_mut() {
                        self.rewrite_expression(init);
                    }
                }
            }
            Statement::FunctionDeclaration { id, params, body, .. } => {
                if let Some(fid) = id {
                    self.rename_declared_identifier(fid);
                }
                self.rewrite_function(None, params, &mut body.body);
            }
            Statement::ClassDeclaration { id, super_class, body } => {
                if let Some(cid) = id {
                    self.rename_declared_identifier(cid);
                }
                if let Some(sc) = super_class.as_mut() {
                    self.rewrite_expression(sc);
                }
                self.rewrite_class_body(body);
            }
            Statement::ExpressionStatement { expression } => self.rewrite_expression(expression),
            Statement::BlockStatement { body } => self.rewrite_block(body),
            Statement::ReturnStatement { argument } => {
                if let Some(e) = argument {
                    self.rewrite_expression(e);
                }
            }
            Statement::IfStatement { test, consequent, alternate } => {
                self.rewrite_expression(test);
                self.rewrite_statement(consequent);
                if let Some(a) = alternate {
                    self.rewrite_statement(a);
                }
            }
            Statement::WhileStatement { test, body } => {
                self.rewrite_expression(test);
                self.rewrite_statement(body);
            }
            Statement::ForStatement { init, test, update, body } => {
                self.push_scope();
                if let Some(i) = init.as_mut() {
                    self.rewrite_for_init(i);
                }
                if let Some(t) = test {
                    self.rewrite_expression(t);
                }
                if let Some(u) = update {
                    self.rewrite_expression(u);
                }
                self.rewrite_statement(body);
                self.pop_scope();
            }
            Statement::ForInStatement { left, right, body } => {
                self.push_scope();
                self.rewrite_for_init(left);
                self.rewrite_expression(right);
                self.rewrite_statement(body);
                self.pop_scope();
            }
            Statement::ForOfStatement { left, right, body, .. } => {
                self.push_scope();
                self.rewrite_for_init(left);
                self.rewrite_expression(right);
                self.rewrite_statement(body);
                self.pop_scope();
            }
            Statement::SwitchStatement { discriminant, cases } => {
                self.rewrite_expression(discriminant);
                self.push_scope();
                for c in cases.iter_mut() {
                    if let Some(t) = c.test.as_mut() {
                        self.rewrite_expression(t);
                    }
                    for s in c.consequent.iter_mut() {
                        self.rewrite_statement(s);
                    }
                }
                self.pop_scope();
            }
            Statement::TryStatement { block, handler, finalizer } => {
                self.rewrite_block(&mut block.body);
                if let Some(h) = handler {
                    if let Some(param) = h.param.as_mut() {
                        self.push_scope();
                        self.rewrite_pattern(param);
                        self.rewrite_block(&mut h.body.body);
                        self.pop_scope();
                    } else {
                        self.rewrite_block(&mut h.body.body);
                    }
                }
                if let Some(f) = finalizer {
                    self.rewrite_block(&mut f.body);
                }
            }
            Statement::ImportDeclaration { specifiers, .. } => {
                for spec in specifiers.iter_mut() {
                    match spec {
                        ImportSpecifier::ImportDefaultSpecifier { local }
                        | ImportSpecifier::ImportNamespaceSpecifier { local } => {
                            self.rename_declared_identifier(local)
                        }
                        ImportSpecifier::ImportSpecifier { local, .. } => {
                            self.rename_declared_identifier(local)
                        }
                    }
                }
            }
            Statement::ExportNamedDeclaration { declaration, specifiers, .. } => {
                if let Some(decl) = declaration.as_mut() {
                    self.rewrite_statement(decl);
                }
                for spec in specifiers.iter_mut() {
                    match spec {
                        crate::parser::ast_types::ExportSpecifier::ExportSpecifier { local, .. } => {
                            self.rename_identifier_reference(local)
                        }
                    }
                }
            }
        }
    }

    fn rewrite_for_init(&mut self, init: &mut ForInit) {
        match init {
            ForInit::VariableDeclaration { declarations, .. } => {
                for d in declarations.iter_mut() {
                    self.rewrite_pattern(&mut d.id);
                    if let Some(init) = d.init.as_mut() {
                        self.rewrite_expression(init);
                    }
                }
            }
            ForInit::Expression(e) => self.rewrite_expression(e),
        }
    }

    fn rewrite_block(&mut self, body: &mut Vec<Statement>) {
        self.push_scope();
        for s in body.iter_mut() {
            self.rewrite_statement(s);
        }
        self.pop_scope();
    }

    fn rewrite_function(
        &mut self,
        self_name: Option<&mut Identifier>,
        params: &mut Vec<Pattern>,
        body: &mut Vec<Statement>,
    ) {
        self.push_scope();
        if let Some(name_id) = self_name {
            self.rename_declared_identifier(name_id);
        }
        for p in params.iter_mut() {
            self.rewrite_pattern(p);
        }
        self.rewrite_function_block(body);
        self.pop_scope();
    }

    fn rewrite_function_block(&mut self, body: &mut Vec<Statement>) {
        self.push_scope();
        for s in body.iter_mut() {
            self.rewrite_statement(s);
        }
        self.pop_scope();
    }

    fn rewrite_arrow(&mut self, params: &mut Vec<Pattern>, body: &mut ArrowFunctionBody) {
        self.push_scope();
        for p in params.iter_mut() {
            self.rewrite_pattern(p);
        }
        match body {
            ArrowFunctionBody::Expression(e) => self.rewrite_expression(e),
            ArrowFunctionBody::BlockStatement(block) => self.rewrite_function_block(&mut block.body),
        }
        self.pop_scope();
    }

    fn rewrite_class_body(&mut self, body: &mut ClassBody) {
        self.push_scope();
        for el in body.body.iter_mut() {
            match el {
                ClassElement::PropertyDefinition { value, .. } => {
                    if let Some(v) = value {
                        self.rewrite_expression(v);
                    }
                }
                ClassElement::MethodDefinition { value, .. } => {
                    self.rewrite_function(value.id.as_mut(), &mut value.params, &mut value.body.body)
                }
            }
        }
        self.pop_scope();
    }

    fn rewrite_pattern(&mut self, pattern: &mut Pattern) {
        match pattern {
            Pattern::Identifier(id) => self.rename_declared_identifier(id),
            Pattern::ArrayPattern { elements } => {
                for el in elements.iter_mut().flatten() {
                    self.rewrite_pattern(el);
                }
            }
            Pattern::ObjectPattern { properties } => {
                for p in properties.iter_mut() {
                    match p {
                        ObjectPatternProperty::Property { key, value, computed, shorthand } => {
                            if *computed {
                                if let PropertyKey::Identifier(id) = key {
                                    self.rename_identifier_reference(id);
                                }
                            }
                            self.rewrite_pattern(value);
                            if *shorthand {
                                sync_shorthand_pattern_key(key, value);
                            }
                        }
                        ObjectPatternProperty::RestElement { argument } => self.rewrite_pattern(argument),
                    }
                }
            }
            Pattern::AssignmentPattern { left, right } => {
                self.rewrite_pattern(left);
                self.rewrite_expression(right);
            }
            Pattern::RestElement { argument } => self.rewrite_pattern(argument),
        }
    }

    fn rewrite_expression(&mut self, expr: &mut Expression) {
        match expr {
            Expression::Identifier(id) => self.rename_identifier_reference(id),
            Expression::Literal(_) | Expression::ThisExpression => {}
            Expression::BinaryExpression { left, right, .. } => {
                self.rewrite_expression(left);
                self.rewrite_expression(right);
            }
            Expression::UnaryExpression { argument, .. } => self.rewrite_expression(argument),
            Expression::AssignmentExpression { left, right, .. } => {
                self.rewrite_expression(left);
                self.rewrite_expression(right);
            }
            Expression::UpdateExpression { argument, .. } => self.rewrite_expression(argument),
            Expression::CallExpression { callee, arguments } => {
                self.rewrite_expression(callee);
                for a in arguments.iter_mut() {
                    self.rewrite_expression(a);
                }
            }
            Expression::MemberExpression { object, property, computed } => {
                self.rewrite_expression(object);
                if *computed {
                    self.rewrite_expression(property);
                }
            }
            Expression::FunctionExpression(func) => {
                self.rewrite_function(func.id.as_mut(), &mut func.params, &mut func.body.body)
            }
            Expression::ArrowFunctionExpression { params, body, .. } => self.rewrite_arrow(params, body),
            Expression::ObjectExpression { properties } => {
                for p in properties.iter_mut() {
                    match p {
                        ObjectProperty::Property { key, value, computed, shorthand, .. } => {
                            if *computed {
                                if let PropertyKey::Identifier(id) = key {
                                    self.rename_identifier_reference(id);
                                }
                            }
                            self.rewrite_expression(value);
                            if *shorthand {
                                sync_shorthand_expression_key(key, value);
                            }
                        }
                        ObjectProperty::SpreadElement { argument } => self.rewrite_expression(argument),
                    }
                }
            }
            Expression::ArrayExpression { elements } => {
                for el in elements.iter_mut().flatten() {
                    self.rewrite_expression(el);
                }
            }
            Expression::TemplateLiteral { expressions, .. } => {
                for e in expressions.iter_mut() {
                    self.rewrite_expression(e);
                }
            }
            Expression::ConditionalExpression { test, consequent, alternate } => {
                self.rewrite_expression(test);
                self.rewrite_expression(consequent);
                self.rewrite_expression(alternate);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::printer::Printer;
    use crate::generator::{GeneratorConfig, OutputFormat, SemicolonStrategy};
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
    fn strips_a_solitary_suffix_with_no_collision() {
        let mut ast = parse("function foo(a$jscomp$1){return a$jscomp$1;}");
        invert_program(&mut ast).unwrap();
        assert_eq!(render(&ast), "function foo(a){return a;}");
    }

    #[test]
    fn nested_scopes_reclaim_the_bare_name_before_their_enclosing_scope_can() {
        let mut ast = parse(
            "function x1(){var a$jscomp$1;function x2(){var a$jscomp$2}function x3(){var a$jscomp$3}}",
        );
        invert_program(&mut ast).unwrap();
        assert_eq!(
            render(&ast),
            "function x1(){var a$jscomp$0;function x2(){var a;}function x3(){var a;}}"
        );
    }

    #[test]
    fn does_not_strip_when_it_would_shadow_an_ancestor() {
        let mut ast = parse("var a;function foo(){var a$jscomp$1;return a$jscomp$1;}");
        invert_program(&mut ast).unwrap();
        assert_eq!(render(&ast), "var a;function foo(){var a$jscomp$0;return a$jscomp$0;}");
    }

    #[test]
    fn sibling_catch_parameters_both_collapse_to_the_bare_name() {
        let mut ast = parse("try{}catch(e$jscomp$1){e$jscomp$1}try{}catch(e$jscomp$2){e$jscomp$2}");
        invert_program(&mut ast).unwrap();
        assert_eq!(render(&ast), "try{}catch(e){e}try{}catch(e){e}");
    }

    #[test]
    fn jscompiler_prefix_is_left_alone() {
        let mut ast = parse("var JSCompiler__a$jscomp$unique_0;");
        invert_program(&mut ast).unwrap();
        assert_eq!(render(&ast), "var JSCompiler__a;");
    }

    #[test]
    fn already_bare_names_are_untouched() {
        let mut ast = parse("var a;function f(){return a;}");
        let result = invert_program(&mut ast).unwrap();
        assert_eq!(result.stripped_count, 0);
        assert_eq!(render(&ast), "var a;function f(){return a;}");
    }

    #[test]
    fn hoisted_var_declaration_and_reference_both_strip_to_the_same_name() {
        // `a$jscomp$1` is recorded in `f`'s Function scope (where hoisting lands it) but
        // the `var` statement itself is traversed inside `f`'s FunctionBlock scope; the
        // declaration must not be left behind while the reference is rewritten.
        let mut ast = parse("function f(){var a$jscomp$1;return a$jscomp$1;}");
        invert_program(&mut ast).unwrap();
        assert_eq!(render(&ast), "function f(){var a;return a;}");
    }

    #[test]
    fn shorthand_object_property_key_follows_stripped_reference() {
        let mut ast = parse("function f(a$jscomp$1){return {a$jscomp$1};}");
        invert_program(&mut ast).unwrap();
        assert_eq!(render(&ast), "function f(a){return {a};}");
    }
}

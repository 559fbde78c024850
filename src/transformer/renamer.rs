//! # Identifier Renamer
//!
//! Rewrites every locally-declared name in a `Program` so that no two distinct
//! declarations share a textual name (Contextual mode), or so that every declared
//! local is unconditionally replaced by a fresh synthetic name (Inline mode).
//!
//! Both modes share one traversal skeleton: a self-contained scope-building walk
//! that mirrors `analyzer::scope_builder`'s rules (Function/FunctionBlock split,
//! synthetic `arguments`, function-expression self-name bleeding, per-block
//! scopes) but, unlike the analyzer, mutates the AST in place as it goes. The
//! analyzer's `SymbolTable`/`ScopeTree` carry no per-node position information
//! (`SourceLocation` is never populated past a single dummy value), so they
//! cannot drive an in-place rename; this module keeps its own lightweight scope
//! stack instead.

use crate::parser::ast_types::{
    ArrowFunctionBody, BlockStatement, CatchClause, ClassBody, ClassElement, ExportSpecifier,
    Expression, ForInit, FunctionExpression, Identifier, ImportSpecifier, ObjectPatternProperty,
    ObjectProperty, Pattern, Program, PropertyKey, Statement, SwitchCase,
    VariableDeclarationKind,
};
use crate::transformer::TransformResult;
use std::collections::HashMap;

/// A name that is never renamed, regardless of mode: the implicit `arguments`
/// binding every (non-arrow) function body sees.
const ARGUMENTS: &str = "arguments";

/// Which of SPEC_FULL.md's two renaming strategies a run applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameMode {
    /// Collision-avoiding: a name keeps its original spelling the first time it
    /// is declared anywhere in the program; every later declaration of the same
    /// base name is suffixed `$jscomp$N` from a global, never-reset counter.
    Contextual,
    /// Unconditional: every declared local, anywhere, is suffixed
    /// `$jscomp$<prefix><k>` from a single monotonic counter. Names starting
    /// with `_` are mangled to `JSCompiler_<name>` first.
    Inline,
}

/// Configuration for a single renaming pass.
#[derive(Debug, Clone)]
pub struct RenamerConfig {
    pub mode: RenameMode,
    /// Inline mode only: downgrade `const` declarations touched by the pass to
    /// `let`, since this simplified AST has no separate naming-convention
    /// marker for "logically constant" the way Closure's `isConstantName` does.
    pub remove_const: bool,
    /// Inline mode only: text inserted between `$jscomp$` and the counter digits.
    pub local_name_prefix: String,
}

impl Default for RenamerConfig {
    fn default() -> Self {
        Self {
            mode: RenameMode::Contextual,
            remove_const: false,
            local_name_prefix: String::new(),
        }
    }
}

/// Outcome of a renaming pass.
#[derive(Debug, Clone, Default)]
pub struct RenameResult {
    pub renamed_count: u32,
    pub mapping: HashMap<String, String>,
    pub warnings: Vec<String>,
}

/// Runs a renaming pass over `ast` in place, per `config`.
pub fn rename_program(ast: &mut Program, config: &RenamerConfig) -> TransformResult<RenameResult> {
    let mut renamer = Renamer::new(config.clone());
    renamer.push_frame(FrameKind::Global);

    // Global/Script scope is its own hoistScope *and* blockScope (§4.B), so `var` and
    // `let`/`const`/`function`/`class`/`import` must be declared in one interleaved,
    // left-to-right pass over top-level statements, not two separate full sweeps — the
    // latter would declare every hoisted `var` (however deeply nested) ahead of any
    // sibling block-scoped declaration that textually precedes it, breaking the
    // pre-order determinism the Inline counter depends on (§3, §8 invariant 7/8).
    for stmt in ast.body.iter() {
        renamer.collect_direct_decl(stmt);
        renamer.collect_hoisted_vars(stmt);
    }
    for stmt in ast.body.iter_mut() {
        renamer.rename_statement(stmt);
    }

    renamer.pop_frame();
    Ok(renamer.result)
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum FrameKind {
    Global,
    Local,
}

struct Frame {
    kind: FrameKind,
    bindings: HashMap<String, String>,
}

/// Hands out the `k` in `$jscomp$<prefix>k` for Inline mode. A single shared
/// sequence across the whole pass, mirroring SPEC_FULL.md §6's
/// `getUniqueNameIdSupplier`.
struct UniqueIdSource(u32);

impl UniqueIdSource {
    fn next(&mut self) -> u32 {
        let id = self.0;
        self.0 += 1;
        id
    }
}

struct Renamer {
    config: RenamerConfig,
    scopes: Vec<Frame>,
    contextual_counters: HashMap<String, u32>,
    unique_id: UniqueIdSource,
    result: RenameResult,
}

impl Renamer {
    fn new(config: RenamerConfig) -> Self {
        Self {
            config,
            scopes: Vec::new(),
            contextual_counters: HashMap::new(),
            unique_id: UniqueIdSource(0),
            result: RenameResult::default(),
        }
    }

    fn push_frame(&mut self, kind: FrameKind) {
        self.scopes.push(Frame {
            kind,
            bindings: HashMap::new(),
        });
    }

    fn pop_frame(&mut self) {
        self.scopes.pop();
    }

    fn resolve(&self, name: &str) -> Option<&str> {
        if name == ARGUMENTS {
            return None;
        }
        for frame in self.scopes.iter().rev() {
            if let Some(new_name) = frame.bindings.get(name) {
                return Some(new_name.as_str());
            }
        }
        None
    }

    /// Declares `name` in the current (topmost) scope, deciding its renamed
    /// form, unless it is already declared there (hoist-merge: `var a; var a;`
    /// is one binding).
    fn declare(&mut self, name: &str) {
        if name == ARGUMENTS {
            return;
        }
        if self.scopes.last().unwrap().bindings.contains_key(name) {
            return;
        }
        let new_name = match self.config.mode {
            RenameMode::Contextual => self.choose_name_contextual(name),
            RenameMode::Inline => self.choose_name_inline(name),
        };
        if new_name != name {
            self.result.renamed_count += 1;
            self.result.mapping.insert(name.to_string(), new_name.clone());
        }
        self.scopes
            .last_mut()
            .unwrap()
            .bindings
            .insert(name.to_string(), new_name);
    }

    fn choose_name_contextual(&mut self, name: &str) -> String {
        let is_global = matches!(self.scopes.last().unwrap().kind, FrameKind::Global);
        if is_global {
            self.contextual_counters.entry(name.to_string()).or_insert(1);
            return name.to_string();
        }
        match self.contextual_counters.get(name).copied() {
            None => {
                self.contextual_counters.insert(name.to_string(), 1);
                name.to_string()
            }
            Some(k) => {
                self.contextual_counters.insert(name.to_string(), k + 1);
                format!("{name}$jscomp${k}")
            }
        }
    }

    fn choose_name_inline(&mut self, name: &str) -> String {
        let mangled = if name.starts_with('_') {
            format!("JSCompiler_{name}")
        } else {
            name.to_string()
        };
        let k = self.unique_id.next();
        format!("{mangled}$jscomp${}{k}", self.config.local_name_prefix)
    }

    fn rename_identifier(&self, id: &mut Identifier) {
        if let Some(new_name) = self.resolve(&id.name) {
            id.name = new_name.to_string();
        }
    }

    // ---- declaration collection (read-only; runs before a scope's mutate pass) ----

    /// Recursively hoists `var` (and, through `export`, re-exported `var`)
    /// declarations into the current frame, stopping at function boundaries —
    /// functions, arrow functions, and function expressions never appear
    /// directly as a `Statement`, so the recursion naturally stops there.
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
            Statement::IfStatement {
                consequent,
                alternate,
                ..
            } => {
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
            Statement::TryStatement {
                block,
                handler,
                finalizer,
            } => {
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
            Statement::ExportNamedDeclaration {
                declaration: Some(inner),
                ..
            } => self.collect_hoisted_vars(inner),
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

    /// Declares the `let`/`const`/`function`/`class`/`import` names declared
    /// directly (non-recursively) in `body`, in source order — the
    /// block-scoped half of a scope's bindings.
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
            Statement::ExportNamedDeclaration {
                declaration: Some(inner),
                ..
            } => self.collect_direct_decl(inner),
            _ => {}
        }
    }

    // ---- mutate pass ----

    fn rename_statement(&mut self, stmt: &mut Statement) {
        match stmt {
            Statement::VariableDeclaration { declarations, kind } => {
                self.maybe_remove_const(kind);
                for d in declarations.iter_mut() {
                    self.rename_pattern(&mut d.id);
                    if let Some(init) = d.init.as_mut() {
                        self.rename_expression(init);
                    }
                }
            }
            Statement::FunctionDeclaration { id, params, body, .. } => {
                if let Some(fid) = id {
                    self.rename_identifier(fid);
                }
                self.rename_function(None, params, &mut body.body);
            }
            Statement::ClassDeclaration {
                id,
                super_class,
                body,
            } => {
                if let Some(cid) = id {
                    self.rename_identifier(cid);
                }
                if let Some(sc) = super_class.as_mut() {
                    self.rename_expression(sc);
                }
                self.rename_class_body(body);
            }
            Statement::ExpressionStatement { expression } => self.rename_expression(expression),
            Statement::BlockStatement { body } => self.rename_block(body),
            Statement::ReturnStatement { argument } => {
                if let Some(e) = argument {
                    self.rename_expression(e);
                }
            }
            Statement::IfStatement {
                test,
                consequent,
                alternate,
            } => {
                self.rename_expression(test);
                self.rename_statement(consequent);
                if let Some(a) = alternate {
                    self.rename_statement(a);
                }
            }
            Statement::WhileStatement { test, body } => {
                self.rename_expression(test);
                self.rename_statement(body);
            }
            Statement::ForStatement {
                init,
                test,
                update,
                body,
            } => self.rename_for_statement(init, test, update, body),
            Statement::ForInStatement { left, right, body } => {
                self.rename_for_in_of(left, right, body)
            }
            Statement::ForOfStatement {
                left, right, body, ..
            } => self.rename_for_in_of(left, right, body),
            Statement::SwitchStatement {
                discriminant,
                cases,
            } => self.rename_switch(discriminant, cases),
            Statement::TryStatement {
                block,
                handler,
                finalizer,
            } => self.rename_try(block, handler, finalizer),
            Statement::ImportDeclaration { specifiers, .. } => {
                for spec in specifiers.iter_mut() {
                    match spec {
                        ImportSpecifier::ImportDefaultSpecifier { local }
                        | ImportSpecifier::ImportNamespaceSpecifier { local } => {
                            self.rename_identifier(local)
                        }
                        // `imported` is the external module-facing name and is never
                        // touched; only `local` (how this module refers to it) changes.
                        ImportSpecifier::ImportSpecifier { local, .. } => self.rename_identifier(local),
                    }
                }
            }
            Statement::ExportNamedDeclaration {
                declaration,
                specifiers,
                ..
            } => {
                if let Some(decl) = declaration.as_mut() {
                    self.rename_statement(decl);
                }
                for spec in specifiers.iter_mut() {
                    match spec {
                        // `exported` is the external name (`export { x as y }`); only
                        // the local binding `x` is subject to renaming.
                        ExportSpecifier::ExportSpecifier { local, .. } => self.rename_identifier(local),
                    }
                }
            }
        }
    }

    fn maybe_remove_const(&self, kind: &mut VariableDeclarationKind) {
        if self.config.remove_const
            && self.config.mode == RenameMode::Inline
            && matches!(kind, VariableDeclarationKind::Const)
        {
            *kind = VariableDeclarationKind::Let;
        }
    }

    fn rename_block(&mut self, body: &mut Vec<Statement>) {
        self.push_frame(FrameKind::Local);
        {
            let body_ref: &[Statement] = body;
            self.collect_direct_block_decls(body_ref);
        }
        for s in body.iter_mut() {
            self.rename_statement(s);
        }
        self.pop_frame();
    }

    /// Opens a Function scope: the self-name (function expressions only),
    /// then parameters, then every `var` hoisted from the body — all share one
    /// scope, distinct from the FunctionBlock scope opened around the body.
    fn rename_function(
        &mut self,
        self_name: Option<&mut Identifier>,
        params: &mut Vec<Pattern>,
        body: &mut Vec<Statement>,
    ) {
        self.push_frame(FrameKind::Local);

        if let Some(name_id) = self_name.as_ref() {
            self.declare(&name_id.name);
        }
        {
            let mut param_names = Vec::new();
            for p in params.iter() {
                pattern_declared_names(p, &mut param_names);
            }
            for n in param_names {
                self.declare(&n);
            }
        }
        for s in body.iter() {
            self.collect_hoisted_vars(s);
        }

        if let Some(name_id) = self_name {
            self.rename_identifier(name_id);
        }
        for p in params.iter_mut() {
            self.rename_pattern(p);
        }

        self.rename_function_block(body);

        self.pop_frame();
    }

    fn rename_function_block(&mut self, body: &mut Vec<Statement>) {
        self.push_frame(FrameKind::Local);
        {
            let body_ref: &[Statement] = body;
            self.collect_direct_block_decls(body_ref);
        }
        for s in body.iter_mut() {
            self.rename_statement(s);
        }
        self.pop_frame();
    }

    fn rename_function_expression(&mut self, func: &mut FunctionExpression) {
        self.rename_function(func.id.as_mut(), &mut func.params, &mut func.body.body);
    }

    fn rename_arrow(&mut self, params: &mut Vec<Pattern>, body: &mut ArrowFunctionBody) {
        self.push_frame(FrameKind::Local);
        {
            let mut names = Vec::new();
            for p in params.iter() {
                pattern_declared_names(p, &mut names);
            }
            for n in names {
                self.declare(&n);
            }
        }
        if let ArrowFunctionBody::BlockStatement(block) = &*body {
            for s in block.body.iter() {
                self.collect_hoisted_vars(s);
            }
        }
        for p in params.iter_mut() {
            self.rename_pattern(p);
        }
        match body {
            ArrowFunctionBody::Expression(e) => self.rename_expression(e),
            ArrowFunctionBody::BlockStatement(block) => self.rename_function_block(&mut block.body),
        }
        self.pop_frame();
    }

    fn rename_for_statement(
        &mut self,
        init: &mut Option<ForInit>,
        test: &mut Option<Expression>,
        update: &mut Option<Expression>,
        body: &mut Statement,
    ) {
        self.push_frame(FrameKind::Local);
        if let Some(i) = init.as_ref() {
            self.collect_for_init_block_decl(i);
        }
        if let Some(i) = init.as_mut() {
            self.rename_for_init(i);
        }
        if let Some(t) = test {
            self.rename_expression(t);
        }
        if let Some(u) = update {
            self.rename_expression(u);
        }
        self.rename_statement(body);
        self.pop_frame();
    }

    fn rename_for_in_of(&mut self, left: &mut ForInit, right: &mut Expression, body: &mut Statement) {
        self.push_frame(FrameKind::Local);
        self.collect_for_init_block_decl(left);
        self.rename_for_init(left);
        self.rename_expression(right);
        self.rename_statement(body);
        self.pop_frame();
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

    fn rename_for_init(&mut self, init: &mut ForInit) {
        match init {
            ForInit::VariableDeclaration { declarations, kind } => {
                self.maybe_remove_const(kind);
                for d in declarations.iter_mut() {
                    self.rename_pattern(&mut d.id);
                    if let Some(init) = d.init.as_mut() {
                        self.rename_expression(init);
                    }
                }
            }
            ForInit::Expression(e) => self.rename_expression(e),
        }
    }

    fn rename_switch(&mut self, discriminant: &mut Expression, cases: &mut Vec<SwitchCase>) {
        self.rename_expression(discriminant);
        self.push_frame(FrameKind::Local);
        {
            let cases_ref: &[SwitchCase] = cases;
            for c in cases_ref {
                self.collect_direct_block_decls(&c.consequent);
            }
        }
        for c in cases.iter_mut() {
            if let Some(t) = c.test.as_mut() {
                self.rename_expression(t);
            }
            for s in c.consequent.iter_mut() {
                self.rename_statement(s);
            }
        }
        self.pop_frame();
    }

    fn rename_try(
        &mut self,
        block: &mut BlockStatement,
        handler: &mut Option<CatchClause>,
        finalizer: &mut Option<BlockStatement>,
    ) {
        self.rename_block(&mut block.body);
        if let Some(h) = handler {
            if let Some(param) = h.param.as_mut() {
                self.push_frame(FrameKind::Local);
                {
                    let mut names = Vec::new();
                    pattern_declared_names(param, &mut names);
                    for n in names {
                        self.declare(&n);
                    }
                }
                self.rename_pattern(param);
                self.rename_block(&mut h.body.body);
                self.pop_frame();
            } else {
                self.rename_block(&mut h.body.body);
            }
        }
        if let Some(f) = finalizer {
            self.rename_block(&mut f.body);
        }
    }

    fn rename_class_body(&mut self, body: &mut ClassBody) {
        self.push_frame(FrameKind::Local);
        for el in body.body.iter_mut() {
            match el {
                ClassElement::PropertyDefinition { value, .. } => {
                    if let Some(v) = value {
                        self.rename_expression(v);
                    }
                }
                ClassElement::MethodDefinition { value, .. } => {
                    self.rename_function(value.id.as_mut(), &mut value.params, &mut value.body.body)
                }
            }
        }
        self.pop_frame();
    }

    fn rename_pattern(&mut self, pattern: &mut Pattern) {
        match pattern {
            Pattern::Identifier(id) => self.rename_identifier(id),
            Pattern::ArrayPattern { elements } => {
                for el in elements.iter_mut().flatten() {
                    self.rename_pattern(el);
                }
            }
            Pattern::ObjectPattern { properties } => {
                for p in properties.iter_mut() {
                    match p {
                        ObjectPatternProperty::Property {
                            key,
                            value,
                            computed,
                            shorthand,
                        } => {
                            if *computed {
                                if let PropertyKey::Identifier(id) = key {
                                    self.rename_identifier(id);
                                }
                            }
                            self.rename_pattern(value);
                            // `{x}`/`{x = default}` printed shorthand: the key is the only
                            // half the printer emits, so it must track the renamed binding.
                            if *shorthand {
                                sync_shorthand_pattern_key(key, value);
                            }
                        }
                        ObjectPatternProperty::RestElement { argument } => self.rename_pattern(argument),
                    }
                }
            }
            Pattern::AssignmentPattern { left, right } => {
                self.rename_pattern(left);
                self.rename_expression(right);
            }
            Pattern::RestElement { argument } => self.rename_pattern(argument),
        }
    }

    fn rename_expression(&mut self, expr: &mut Expression) {
        match expr {
            Expression::Identifier(id) => self.rename_identifier(id),
            Expression::Literal(_) | Expression::ThisExpression => {}
            Expression::BinaryExpression { left, right, .. } => {
                self.rename_expression(left);
                self.rename_expression(right);
            }
            Expression::UnaryExpression { argument, .. } => self.rename_expression(argument),
            Expression::AssignmentExpression { left, right, .. } => {
                self.rename_expression(left);
                self.rename_expression(right);
            }
            Expression::UpdateExpression { argument, .. } => self.rename_expression(argument),
            Expression::CallExpression { callee, arguments } => {
                self.rename_expression(callee);
                for a in arguments.iter_mut() {
                    self.rename_expression(a);
                }
            }
            Expression::MemberExpression {
                object,
                property,
                computed,
            } => {
                self.rename_expression(object);
                if *computed {
                    // `obj[x]`: `x` is a variable reference.
                    self.rename_expression(property);
                }
                // `obj.x`: `x` is a property name, never a binding — left as-is.
            }
            Expression::FunctionExpression(func) => self.rename_function_expression(func),
            Expression::ArrowFunctionExpression { params, body, .. } => self.rename_arrow(params, body),
            Expression::ObjectExpression { properties } => {
                for p in properties.iter_mut() {
                    match p {
                        ObjectProperty::Property {
                            key,
                            value,
                            computed,
                            shorthand,
                            ..
                        } => {
                            if *computed {
                                if let PropertyKey::Identifier(id) = key {
                                    self.rename_identifier(id);
                                }
                            }
                            self.rename_expression(value);
                            // Same shorthand-key mirroring as the object-pattern case above.
                            if *shorthand {
                                sync_shorthand_expression_key(key, value);
                            }
                        }
                        ObjectProperty::SpreadElement { argument } => self.rename_expression(argument),
                    }
                }
            }
            Expression::ArrayExpression { elements } => {
                for el in elements.iter_mut().flatten() {
                    self.rename_expression(el);
                }
            }
            Expression::TemplateLiteral { expressions, .. } => {
                for e in expressions.iter_mut() {
                    self.rename_expression(e);
                }
            }
            Expression::ConditionalExpression {
                test,
                consequent,
                alternate,
            } => {
                self.rename_expression(test);
                self.rename_expression(consequent);
                self.rename_expression(alternate);
            }
        }
    }
}

/// Collects every name a pattern declares, in left-to-right order, recursing
/// through destructuring. Shared by both the renamer and inverter.
pub(crate) fn pattern_declared_names(pattern: &Pattern, out: &mut Vec<String>) {
    match pattern {
        Pattern::Identifier(id) => out.push(id.name.clone()),
        Pattern::ArrayPattern { elements } => {
            for el in elements.iter().flatten() {
                pattern_declared_names(el, out);
            }
        }
        Pattern::ObjectPattern { properties } => {
            for p in properties {
                match p {
                    ObjectPatternProperty::Property { value, .. } => pattern_declared_names(value, out),
                    ObjectPatternProperty::RestElement { argument } => {
                        pattern_declared_names(argument, out)
                    }
                }
            }
        }
        Pattern::AssignmentPattern { left, .. } => pattern_declared_names(left, out),
        Pattern::RestElement { argument } => pattern_declared_names(argument, out),
    }
}

/// The printer emits only the key for a shorthand object-pattern property (`{x}`,
/// `{x = default}`), so once `value`'s bound identifier has been renamed the key must be
/// updated to match or the rename is silently lost on output. Shared by the renamer and
/// inverter, which both rewrite shorthand properties the same way.
pub(crate) fn sync_shorthand_pattern_key(key: &mut PropertyKey, value: &Pattern) {
    if let PropertyKey::Identifier(key_id) = key {
        if let Some(name) = shorthand_pattern_binding_name(value) {
            key_id.name = name.to_string();
        }
    }
}

fn shorthand_pattern_binding_name(pattern: &Pattern) -> Option<&str> {
    match pattern {
        Pattern::Identifier(id) => Some(id.name.as_str()),
        Pattern::AssignmentPattern { left, .. } => shorthand_pattern_binding_name(left),
        _ => None,
    }
}

/// Same mirroring as `sync_shorthand_pattern_key`, for a shorthand object-*expression*
/// property (`{x}`), whose value is always a bare identifier reference.
pub(crate) fn sync_shorthand_expression_key(key: &mut PropertyKey, value: &Expression) {
    if let (PropertyKey::Identifier(key_id), Expression::Identifier(val_id)) = (key, value) {
        key_id.name = val_id.name.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse_js, ParserConfig};
    use crate::generator::printer::Printer;
    use crate::generator::{GeneratorConfig, OutputFormat, SemicolonStrategy};

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
    fn contextual_renames_only_the_shadowing_parameter() {
        let mut ast = parse("var a; function foo(a) { return a; } foo(1);");
        let config = RenamerConfig {
            mode: RenameMode::Contextual,
            ..RenamerConfig::default()
        };
        let result = rename_program(&mut ast, &config).unwrap();
        assert_eq!(result.renamed_count, 1);
        assert_eq!(render(&ast), "var a;function foo(a$jscomp$1){return a$jscomp$1;}foo(1);");
    }

    #[test]
    fn contextual_leaves_globals_untouched_across_sibling_scopes() {
        let mut ast = parse(
            "var a; function foo(){ var b; return a; } function boo(){ var b; return a; }",
        );
        let config = RenamerConfig {
            mode: RenameMode::Contextual,
            ..RenamerConfig::default()
        };
        rename_program(&mut ast, &config).unwrap();
        assert_eq!(
            render(&ast),
            "var a;function foo(){var b;return a;}function boo(){var b$jscomp$1;return a;}"
        );
    }

    #[test]
    fn contextual_sibling_catch_parameters_collide() {
        let mut ast = parse("try{}catch(e){e} try{}catch(e){e}");
        let config = RenamerConfig {
            mode: RenameMode::Contextual,
            ..RenamerConfig::default()
        };
        rename_program(&mut ast, &config).unwrap();
        assert_eq!(render(&ast), "try{}catch(e){e}try{}catch(e$jscomp$1){e$jscomp$1}");
    }

    #[test]
    fn contextual_never_renames_arguments() {
        let mut ast = parse("function f(){ return arguments.length; }");
        let config = RenamerConfig {
            mode: RenameMode::Contextual,
            ..RenamerConfig::default()
        };
        rename_program(&mut ast, &config).unwrap();
        assert_eq!(render(&ast), "function f(){return arguments.length;}");
    }

    #[test]
    fn inline_suffixes_every_declaration_and_mangles_underscore_names() {
        let mut ast = parse("var _a = function _b(_c) { var _d; };");
        let config = RenamerConfig {
            mode: RenameMode::Inline,
            remove_const: false,
            local_name_prefix: "unique_".to_string(),
        };
        rename_program(&mut ast, &config).unwrap();
        assert_eq!(
            render(&ast),
            "var JSCompiler__a$jscomp$unique_0=function JSCompiler__b$jscomp$unique_1(JSCompiler__c$jscomp$unique_2){var JSCompiler__d$jscomp$unique_3;};"
        );
    }

    #[test]
    fn inline_renames_globals_too() {
        let mut ast = parse("var x;");
        let config = RenamerConfig {
            mode: RenameMode::Inline,
            remove_const: false,
            local_name_prefix: String::new(),
        };
        rename_program(&mut ast, &config).unwrap();
        assert_eq!(render(&ast), "var x$jscomp$0;");
    }

    #[test]
    fn object_property_names_are_never_rewritten() {
        let mut ast = parse("function f(a){ return { a: a, b: a.a }; }");
        let config = RenamerConfig {
            mode: RenameMode::Contextual,
            ..RenamerConfig::default()
        };
        rename_program(&mut ast, &config).unwrap();
        // `a` the parameter may be renamed; `a:`/`.a` property names never are.
        assert!(render(&ast).contains("a:"));
    }

    #[test]
    fn shorthand_object_property_key_follows_renamed_reference() {
        let mut ast = parse("var a; function f(a){ return {a}; }");
        let config = RenamerConfig {
            mode: RenameMode::Contextual,
            ..RenamerConfig::default()
        };
        rename_program(&mut ast, &config).unwrap();
        assert_eq!(
            render(&ast),
            "var a;function f(a$jscomp$1){return {a$jscomp$1};}"
        );
    }

    #[test]
    fn shorthand_destructuring_parameter_preserves_shorthand_after_rename() {
        let mut ast = parse("var a; function f({a}){ return a; }");
        let config = RenamerConfig {
            mode: RenameMode::Contextual,
            ..RenamerConfig::default()
        };
        rename_program(&mut ast, &config).unwrap();
        assert_eq!(
            render(&ast),
            "var a;function f({a$jscomp$1}){return a$jscomp$1;}"
        );
    }

    #[test]
    fn global_scope_declares_in_strict_source_order() {
        // `y` is textually first; `x` only hoists up from inside the nested block that
        // follows it, so Inline's monotonic counter must number `y` before `x`.
        let mut ast = parse("let y; { var x }");
        let config = RenamerConfig {
            mode: RenameMode::Inline,
            remove_const: false,
            local_name_prefix: String::new(),
        };
        rename_program(&mut ast, &config).unwrap();
        assert_eq!(render(&ast), "let y$jscomp$0;{var x$jscomp$1;}");
    }
}

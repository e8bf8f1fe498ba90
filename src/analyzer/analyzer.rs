use std::collections::HashSet;

use crate::{
    ast::{
        ast::{Expr, NodeId, Stmt},
        expressions::{CallExpr, LiteralExpr, LiteralKind, SymbolExpr},
        statements::{
            AssignmentStmt, BlockStmt, ExpressionStmt, FnDeclStmt, ForLoopStmt, IfStmt, SwitchStmt,
            VarDeclStmt,
        },
        types::{TypeName, TypedName},
    },
    dialect::dialect::Dialect,
    errors::{
        errors::{Error, ErrorImpl, Severity},
        reporter::ErrorReporter,
    },
    Position,
};

use super::{
    literals::U256,
    scope::{AnalysisInfo, FunctionSignature, Identifier, Scope},
};

/// Longest string literal, in bytes.
pub const MAX_STRING_LITERAL_LENGTH: usize = 32;

/// What a name in call position refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Callee {
    Function {
        parameters: usize,
        returns: usize,
        literal_arguments: bool,
    },
    Variable,
    Unknown,
}

/// Value of a switch case, compared by value rather than by spelling.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum CaseValue {
    Number(U256),
    Boolean(bool),
    String(Vec<u8>),
}

pub struct Analyzer<'a> {
    dialect: &'a Dialect,
    reporter: &'a mut ErrorReporter,
    /// Innermost scope last
    scopes: Vec<Scope>,
    info: AnalysisInfo,
    error_count: usize,
}

impl<'a> Analyzer<'a> {
    pub fn new(dialect: &'a Dialect, reporter: &'a mut ErrorReporter) -> Self {
        Analyzer {
            dialect,
            reporter,
            scopes: vec![],
            info: AnalysisInfo::default(),
            error_count: 0,
        }
    }

    pub fn report(&mut self, error_impl: ErrorImpl, position: Position) {
        self.report_error(Error::new(error_impl, position));
    }

    fn report_error(&mut self, error: Error) {
        if error.severity() == Severity::Error {
            self.error_count += 1;
        }
        self.reporter.report(error);
    }

    pub fn push_scope(&mut self, id: NodeId) {
        let parent = self.scopes.last().map(|x| x.id);
        tracing::trace!(id, ?parent, depth = self.scopes.len(), "entering scope");
        self.scopes.push(Scope::new(id, parent));
    }

    pub fn pop_scope(&mut self) {
        if let Some(scope) = self.scopes.pop() {
            tracing::trace!(id = scope.id, names = scope.identifier_lookup.len(), "leaving scope");
            self.info.scopes.insert(scope.id, scope);
        }
    }

    pub fn declare_variable(&mut self, name: &str, ty: Option<TypeName>, position: Position) {
        let result = match self.scopes.last_mut() {
            Some(scope) => scope.declare_variable(name, ty, position),
            None => Ok(()),
        };
        if let Err(error) = result {
            self.report_error(error);
        }
    }

    pub fn declare_function(&mut self, signature: FunctionSignature, position: Position) {
        let result = match self.scopes.last_mut() {
            Some(scope) => scope.declare_function(signature, position),
            None => Ok(()),
        };
        if let Err(error) = result {
            self.report_error(error);
        }
    }

    /// Looks a name up, innermost scope first.
    pub fn fetch_identifier(&self, name: &str) -> Option<&Identifier> {
        self.scopes.iter().rev().find_map(|x| x.get_identifier(name))
    }

    /// Resolves a name against the scopes and then the dialect's builtins.
    pub fn resolve_callee(&self, name: &str) -> Callee {
        match self.fetch_identifier(name) {
            Some(Identifier::Function(signature)) => Callee::Function {
                parameters: signature.parameter_count(),
                returns: signature.return_count(),
                literal_arguments: false,
            },
            Some(Identifier::Variable { .. }) => Callee::Variable,
            None => match self.dialect.builtin(name) {
                Some(builtin) => Callee::Function {
                    parameters: builtin.parameter_count(),
                    returns: builtin.return_count(),
                    literal_arguments: builtin.literal_arguments,
                },
                None => Callee::Unknown,
            },
        }
    }
}

/// Number of values an expression produces; `None` once it failed to
/// resolve, so enclosing checks stay quiet.
pub fn analyze_expr(analyzer: &mut Analyzer, expr: &Expr) -> Option<usize> {
    match expr {
        Expr::Literal(literal) => analyze_literal(analyzer, literal),
        Expr::Symbol(symbol) => analyze_symbol(analyzer, symbol),
        Expr::Call(call) => analyze_call(analyzer, call),
    }
}

pub fn analyze_literal(analyzer: &mut Analyzer, literal: &LiteralExpr) -> Option<usize> {
    check_type(analyzer, &literal.ty);

    match literal.kind {
        LiteralKind::Number => {
            if U256::from_literal(&literal.value).is_none() {
                analyzer.report(ErrorImpl::NumberLiteralTooLarge, literal.span.start.clone());
            }
        }
        LiteralKind::String => {
            let length = literal.string_bytes().len();
            if length > MAX_STRING_LITERAL_LENGTH {
                analyzer.report(
                    ErrorImpl::StringLiteralTooLong { length },
                    literal.span.start.clone(),
                );
            }
        }
        LiteralKind::Boolean => {}
    }

    Some(1)
}

pub fn analyze_symbol(analyzer: &mut Analyzer, symbol: &SymbolExpr) -> Option<usize> {
    match analyzer.resolve_callee(&symbol.value) {
        Callee::Variable => Some(1),
        Callee::Function { .. } => {
            analyzer.report(
                ErrorImpl::FunctionUsedAsValue {
                    name: symbol.value.clone(),
                },
                symbol.span.start.clone(),
            );
            None
        }
        Callee::Unknown => {
            analyzer.report(
                ErrorImpl::IdentifierNotFound {
                    name: symbol.value.clone(),
                },
                symbol.span.start.clone(),
            );
            None
        }
    }
}

pub fn analyze_call(analyzer: &mut Analyzer, call: &CallExpr) -> Option<usize> {
    let position = call.callee.span.start.clone();

    let (returns, literal_arguments) = match analyzer.resolve_callee(&call.callee.value) {
        Callee::Function {
            parameters,
            returns,
            literal_arguments,
        } => {
            if parameters != call.arguments.len() {
                analyzer.report(
                    ErrorImpl::ArgumentCountMismatch {
                        expected: parameters,
                        received: call.arguments.len(),
                    },
                    position,
                );
            }
            (Some(returns), literal_arguments)
        }
        Callee::Variable => {
            analyzer.report(
                ErrorImpl::CallToVariable {
                    name: call.callee.value.clone(),
                },
                position,
            );
            (None, false)
        }
        Callee::Unknown => {
            analyzer.report(
                ErrorImpl::FunctionNotFound {
                    name: call.callee.value.clone(),
                },
                position,
            );
            (None, false)
        }
    };

    for argument in call.arguments.iter() {
        if literal_arguments && !matches!(argument, Expr::Literal(_)) {
            analyzer.report(ErrorImpl::LiteralArgumentsExpected, argument.get_span().start.clone());
        }
        expect_single_value(analyzer, argument);
    }

    returns
}

/// Analyzes `expr` and reports unless it yields exactly one value.
pub fn expect_single_value(analyzer: &mut Analyzer, expr: &Expr) {
    if let Some(count) = analyze_expr(analyzer, expr) {
        if count != 1 {
            analyzer.report(ErrorImpl::ExpectedSingleValue { count }, expr.get_span().start.clone());
        }
    }
}

fn check_type(analyzer: &mut Analyzer, ty: &Option<TypeName>) {
    if let Some(TypeName::Symbol(symbol)) = ty {
        analyzer.report(
            ErrorImpl::InvalidType {
                name: symbol.name.clone(),
            },
            symbol.get_position(),
        );
    }
}

fn signature_of(function: &FnDeclStmt) -> FunctionSignature {
    let types = |names: &[TypedName]| -> Vec<Option<TypeName>> {
        names.iter().map(|x| x.ty.clone()).collect()
    };

    FunctionSignature {
        name: function.identifier.clone(),
        parameters: types(&function.parameters),
        returns: types(&function.returns),
    }
}

/// Registers every function defined directly in `block`, so calls may
/// precede the definition.
fn register_functions(analyzer: &mut Analyzer, block: &BlockStmt) {
    for stmt in block.iter() {
        if let Stmt::FnDecl(function) = stmt {
            let signature = signature_of(function);
            analyzer.info.function_signatures.insert(function.id, signature.clone());
            analyzer.declare_function(signature, function.span.start.clone());
        }
    }
}

pub fn analyze_block(analyzer: &mut Analyzer, block: &BlockStmt) {
    analyzer.push_scope(block.id);
    analyze_block_body(analyzer, block);
    analyzer.pop_scope();
}

/// Walks the statements of `block` inside the current scope.
fn analyze_block_body(analyzer: &mut Analyzer, block: &BlockStmt) {
    register_functions(analyzer, block);

    for stmt in block.iter() {
        analyze_stmt(analyzer, stmt);
    }
}

pub fn analyze_stmt(analyzer: &mut Analyzer, stmt: &Stmt) {
    match stmt {
        Stmt::Expression(stmt) => analyze_expression_stmt(analyzer, stmt),
        Stmt::Block(block) => analyze_block(analyzer, block),
        Stmt::VarDecl(stmt) => analyze_var_decl_stmt(analyzer, stmt),
        Stmt::Assignment(stmt) => analyze_assignment_stmt(analyzer, stmt),
        Stmt::If(stmt) => analyze_if_stmt(analyzer, stmt),
        Stmt::Switch(stmt) => analyze_switch_stmt(analyzer, stmt),
        Stmt::ForLoop(stmt) => analyze_for_loop_stmt(analyzer, stmt),
        Stmt::Break(_) | Stmt::Continue(_) => {}
        Stmt::FnDecl(stmt) => analyze_fn_decl_stmt(analyzer, stmt),
    }
}

fn analyze_expression_stmt(analyzer: &mut Analyzer, stmt: &ExpressionStmt) {
    if let Some(count) = analyze_call(analyzer, &stmt.expression) {
        if count > 0 {
            analyzer.report(ErrorImpl::ValuesNotConsumed { count }, stmt.span.start.clone());
        }
    }
}

fn analyze_var_decl_stmt(analyzer: &mut Analyzer, stmt: &VarDeclStmt) {
    for variable in stmt.variables.iter() {
        check_type(analyzer, &variable.ty);
    }

    if let Some(value) = &stmt.assigned_value {
        if let Some(count) = analyze_expr(analyzer, value) {
            if count != stmt.variables.len() {
                analyzer.report(
                    ErrorImpl::VariableCountMismatch {
                        variables: stmt.variables.len(),
                        values: count,
                    },
                    stmt.span.start.clone(),
                );
            }
        }
    }

    // Visible only from here on, so initializers cannot refer to them.
    for variable in stmt.variables.iter() {
        analyzer.declare_variable(&variable.name, variable.ty.clone(), variable.span.start.clone());
    }
}

fn analyze_assignment_stmt(analyzer: &mut Analyzer, stmt: &AssignmentStmt) {
    for target in stmt.targets.iter() {
        if analyzer.resolve_callee(&target.value) != Callee::Variable {
            analyzer.report(
                ErrorImpl::VariableNotLvalue {
                    name: target.value.clone(),
                },
                target.span.start.clone(),
            );
        }
    }

    if let Some(count) = analyze_expr(analyzer, &stmt.value) {
        if count != stmt.targets.len() {
            analyzer.report(
                ErrorImpl::VariableCountMismatch {
                    variables: stmt.targets.len(),
                    values: count,
                },
                stmt.span.start.clone(),
            );
        }
    }
}

fn analyze_if_stmt(analyzer: &mut Analyzer, stmt: &IfStmt) {
    // Any single value is accepted as a condition.
    expect_single_value(analyzer, &stmt.condition);
    analyze_block(analyzer, &stmt.body);
}

fn case_value(literal: &LiteralExpr) -> Option<CaseValue> {
    match literal.kind {
        LiteralKind::Number => U256::from_literal(&literal.value).map(CaseValue::Number),
        LiteralKind::Boolean => Some(CaseValue::Boolean(literal.value == "true")),
        LiteralKind::String => Some(CaseValue::String(literal.string_bytes())),
    }
}

fn analyze_switch_stmt(analyzer: &mut Analyzer, stmt: &SwitchStmt) {
    expect_single_value(analyzer, &stmt.expression);

    if stmt.cases.len() == 1 && stmt.cases[0].is_default() {
        analyzer.report(ErrorImpl::SwitchOnlyDefault, stmt.span.start.clone());
    }

    let mut seen = HashSet::new();
    for case in stmt.cases.iter() {
        if let Some(literal) = &case.value {
            analyze_literal(analyzer, literal);

            if let Some(value) = case_value(literal) {
                if !seen.insert(value.clone()) {
                    tracing::debug!(?value, "duplicate case");
                    analyzer.report(ErrorImpl::DuplicateCase, literal.span.start.clone());
                }
            }
        }
        analyze_block(analyzer, &case.body);
    }
}

fn analyze_for_loop_stmt(analyzer: &mut Analyzer, stmt: &ForLoopStmt) {
    // The scope of the init block stays open for the rest of the loop.
    analyzer.push_scope(stmt.pre.id);
    analyze_block_body(analyzer, &stmt.pre);

    expect_single_value(analyzer, &stmt.condition);
    analyze_block(analyzer, &stmt.post);
    analyze_block(analyzer, &stmt.body);

    analyzer.pop_scope();
}

fn analyze_fn_decl_stmt(analyzer: &mut Analyzer, stmt: &FnDeclStmt) {
    for name in stmt.parameters.iter().chain(stmt.returns.iter()) {
        check_type(analyzer, &name.ty);
    }

    analyzer.push_scope(stmt.body.id);
    for name in stmt.parameters.iter().chain(stmt.returns.iter()) {
        analyzer.declare_variable(&name.name, name.ty.clone(), name.span.start.clone());
    }
    analyze_block_body(analyzer, &stmt.body);
    analyzer.pop_scope();
}

/// Runs the semantic checks over a parsed program.
///
/// Returns true iff no error-severity diagnostic was produced; warnings are
/// reported but do not fail the analysis.
pub fn analyze(ast: &BlockStmt, dialect: &Dialect, reporter: &mut ErrorReporter) -> bool {
    analyze_with_info(ast, dialect, reporter).0
}

/// Like [`analyze`], additionally returning the scope side table.
#[tracing::instrument(skip_all, fields(root = ast.id))]
pub fn analyze_with_info(
    ast: &BlockStmt,
    dialect: &Dialect,
    reporter: &mut ErrorReporter,
) -> (bool, AnalysisInfo) {
    let mut analyzer = Analyzer::new(dialect, reporter);
    analyze_block(&mut analyzer, ast);

    tracing::debug!(errors = analyzer.error_count, "analysis finished");
    (analyzer.error_count == 0, analyzer.info)
}

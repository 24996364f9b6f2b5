use crate::{
    ast::{
        ast::{Function, Module},
        expressions::{BinaryOp, Expr, ExprKind, UnaryOp},
        statements::{Stmt, StmtKind, VarDecl},
        types::DataType,
    },
    errors::errors::{Diagnostics, Error, ErrorImpl},
    Position,
};

use super::scope::{ScopeChain, ScopeKind, Symbol, SymbolKind};

/// Walks a parsed module, resolving names against the scope chain and
/// recording the type of every expression in its resolved-type slot.
pub struct TypeChecker<'a> {
    scopes: ScopeChain<'a>,
    diagnostics: &'a mut Diagnostics,
    /// The function whose body is being checked
    function: Option<&'a Function>,
    loop_depth: usize,
}

impl<'a> TypeChecker<'a> {
    pub fn new(diagnostics: &'a mut Diagnostics) -> Self {
        TypeChecker {
            scopes: ScopeChain::new(),
            diagnostics,
            function: None,
            loop_depth: 0,
        }
    }

    pub fn scopes(&self) -> &ScopeChain<'a> {
        &self.scopes
    }

    fn error(&mut self, error: ErrorImpl, position: &Position) {
        self.diagnostics.report(Error::new(error, position.clone()));
    }

    /// Type of `expr`, derived on first request and memoized on the node.
    /// A node whose type cannot be derived is reported once and then reads
    /// as `unknown`.
    pub fn data_type(&mut self, expr: &'a Expr) -> &'a DataType {
        if let Some(data_type) = expr.resolved_type() {
            return data_type;
        }

        let derived = self.derive_type(expr);
        expr.resolve_type(derived)
    }

    fn derive_type(&mut self, expr: &'a Expr) -> DataType {
        match &expr.kind {
            ExprKind::Number(_) | ExprKind::SizeofType(_) => DataType::int(),
            ExprKind::Float(_) => DataType::float(),
            ExprKind::Char(_) => DataType::char(),
            ExprKind::Str(_) => DataType::pointer(DataType::char()),
            ExprKind::Bool(_) => DataType::bool(),
            ExprKind::Symbol(name) => match self.scopes.lookup(name) {
                Some(symbol) => symbol.data_type.clone(),
                None => {
                    self.error(
                        ErrorImpl::SymbolNotDeclared {
                            symbol: name.clone(),
                        },
                        &expr.position,
                    );
                    DataType::unknown()
                }
            },
            ExprKind::Call { callee, .. } => match self.lookup_function(callee) {
                Ok(function) => function.return_type.clone(),
                Err(error) => {
                    self.error(error, &callee.position);
                    DataType::unknown()
                }
            },
            ExprKind::Unary { op, operand } => {
                let operand_type = self.data_type(operand);
                match op {
                    UnaryOp::Dereference => self.nested_type(op.symbol(), operand_type, &expr.position),
                    UnaryOp::AddressOf if operand_type.is_unknown() => DataType::unknown(),
                    UnaryOp::AddressOf => DataType::pointer(operand_type.clone()),
                    UnaryOp::LogicalNot => DataType::bool(),
                    UnaryOp::Sizeof => DataType::int(),
                    _ => operand_type.clone(),
                }
            }
            ExprKind::Cast { target, .. } => target.clone(),
            ExprKind::Binary { op, left, right } => {
                let left_type = self.data_type(left);
                match op {
                    BinaryOp::Subscript => self.nested_type(op.symbol(), left_type, &expr.position),
                    BinaryOp::Member | BinaryOp::PointerMember => {
                        if !left_type.is_unknown() {
                            self.error(
                                ErrorImpl::MemberAccessUnsupported {
                                    operator: op.symbol().to_string(),
                                    type_: left_type.name().to_string(),
                                },
                                &expr.position,
                            );
                        }
                        DataType::unknown()
                    }
                    BinaryOp::Less
                    | BinaryOp::LessEquals
                    | BinaryOp::Greater
                    | BinaryOp::GreaterEquals
                    | BinaryOp::Equals
                    | BinaryOp::NotEquals
                    | BinaryOp::LogicalAnd
                    | BinaryOp::LogicalOr => DataType::bool(),
                    BinaryOp::Comma => self.data_type(right).clone(),
                    _ => left_type.clone(),
                }
            }
            ExprKind::Conditional { then_expr, .. } => self.data_type(then_expr).clone(),
        }
    }

    /// Element or pointee type, for `*` and `[]`.
    fn nested_type(&mut self, operator: &str, data_type: &DataType, position: &Position) -> DataType {
        if data_type.is_unknown() {
            return DataType::unknown();
        }

        match data_type.nested() {
            Some(nested) => nested.clone(),
            None => {
                self.error(
                    ErrorImpl::NoNestedType {
                        operator: operator.to_string(),
                        type_: data_type.name().to_string(),
                    },
                    position,
                );
                DataType::unknown()
            }
        }
    }

    /// Resolves a callee to the function declaration it names, without
    /// reporting anything.
    fn lookup_function(&self, callee: &Expr) -> Result<&'a Function, ErrorImpl> {
        let Some(name) = callee.as_symbol() else {
            return Err(ErrorImpl::NotAFunction {
                symbol: callee.to_string(),
            });
        };

        match self.scopes.lookup(name) {
            Some(Symbol {
                kind: SymbolKind::Function,
                function: Some(function),
                ..
            }) => Ok(*function),
            Some(_) => Err(ErrorImpl::NotAFunction {
                symbol: name.to_string(),
            }),
            None => Err(ErrorImpl::FunctionNotFound {
                function: name.to_string(),
            }),
        }
    }

    /// Post-order walk: children first, then the node's own type and
    /// operator rules.
    pub fn check_expr(&mut self, expr: &'a Expr) {
        match &expr.kind {
            ExprKind::Unary { operand, .. } | ExprKind::Cast { operand, .. } => {
                self.check_expr(operand)
            }
            // the right-hand side names a member, not a variable
            ExprKind::Binary {
                op: BinaryOp::Member | BinaryOp::PointerMember,
                left,
                ..
            } => self.check_expr(left),
            ExprKind::Binary { left, right, .. } => {
                self.check_expr(left);
                self.check_expr(right);
            }
            ExprKind::Call { callee, args } => {
                if callee.as_symbol().is_none() {
                    self.check_expr(callee);
                }
                if let Some(args) = args {
                    self.check_expr(args);
                }
            }
            ExprKind::Conditional {
                condition,
                then_expr,
                else_expr,
            } => {
                self.check_expr(condition);
                self.check_expr(then_expr);
                self.check_expr(else_expr);
            }
            _ => {}
        }

        self.data_type(expr);
        self.check_rules(expr);
    }

    fn check_rules(&mut self, expr: &'a Expr) {
        match &expr.kind {
            ExprKind::Unary { op, operand } => {
                let operand_type = self.data_type(operand);
                match op {
                    UnaryOp::BitwiseNot
                    | UnaryOp::PreIncrement
                    | UnaryOp::PreDecrement
                    | UnaryOp::PostIncrement
                    | UnaryOp::PostDecrement => self.require(
                        op.symbol(),
                        "integer",
                        operand_type,
                        DataType::is_integer,
                        &expr.position,
                    ),
                    UnaryOp::LogicalNot => self.require(
                        op.symbol(),
                        "bool",
                        operand_type,
                        DataType::is_bool,
                        &expr.position,
                    ),
                    _ => {}
                }
            }
            ExprKind::Binary { op, left, right } => self.check_binary(expr, *op, left, right),
            ExprKind::Call { callee, .. } => self.check_call(expr, callee),
            ExprKind::Conditional {
                condition,
                then_expr,
                else_expr,
            } => {
                let condition_type = self.data_type(condition);
                self.require("?:", "bool", condition_type, DataType::is_bool, &expr.position);

                let then_type = self.data_type(then_expr);
                let else_type = self.data_type(else_expr);
                self.require_same("?:", then_type, else_type, &expr.position);
            }
            _ => {}
        }
    }

    fn check_binary(&mut self, expr: &'a Expr, op: BinaryOp, left: &'a Expr, right: &'a Expr) {
        let left_type = self.data_type(left);
        let operator = op.symbol();

        match op {
            BinaryOp::Add | BinaryOp::Subtract => {
                let right_type = self.data_type(right);
                for operand_type in [left_type, right_type] {
                    self.require(
                        operator,
                        "integer or pointer",
                        operand_type,
                        |t| t.is_integer() || t.is_pointer(),
                        &expr.position,
                    );
                }
            }
            BinaryOp::Multiply
            | BinaryOp::Divide
            | BinaryOp::Modulo
            | BinaryOp::ShiftLeft
            | BinaryOp::ShiftRight
            | BinaryOp::Less
            | BinaryOp::LessEquals
            | BinaryOp::Greater
            | BinaryOp::GreaterEquals
            | BinaryOp::BitwiseAnd
            | BinaryOp::BitwiseOr
            | BinaryOp::BitwiseXor => {
                let right_type = self.data_type(right);
                for operand_type in [left_type, right_type] {
                    self.require(operator, "integer", operand_type, DataType::is_integer, &expr.position);
                }
            }
            BinaryOp::LogicalAnd | BinaryOp::LogicalOr => {
                let right_type = self.data_type(right);
                for operand_type in [left_type, right_type] {
                    self.require(operator, "bool", operand_type, DataType::is_bool, &expr.position);
                }
            }
            BinaryOp::Equals | BinaryOp::NotEquals => {
                let right_type = self.data_type(right);
                self.require_same(operator, left_type, right_type, &expr.position);
            }
            op if op.is_assignment() => {
                let right_type = self.data_type(right);
                self.require_same(operator, left_type, right_type, &expr.position);
            }
            BinaryOp::Subscript => {
                let right_type = self.data_type(right);
                self.require(operator, "integer", right_type, DataType::is_integer, &right.position);
            }
            _ => {}
        }
    }

    /// Argument count and per-argument types against the callee's parameters.
    /// Surplus arguments are accepted.
    fn check_call(&mut self, expr: &'a Expr, callee: &'a Expr) {
        let Ok(function) = self.lookup_function(callee) else {
            return;
        };

        let args = expr.call_arguments();
        if args.len() < function.parameters.len() {
            self.error(
                ErrorImpl::MissingArguments {
                    function: function.name.clone(),
                    expected: function.parameters.len(),
                    received: args.len(),
                },
                &expr.position,
            );
        }

        for (index, (parameter, arg)) in function.parameters.iter().zip(args).enumerate() {
            let arg_type = self.data_type(arg);
            if arg_type.is_unknown() || *arg_type == parameter.data_type {
                continue;
            }

            self.error(
                ErrorImpl::ArgumentTypeMatchError {
                    function: function.name.clone(),
                    index: index + 1,
                    expected: parameter.data_type.name().to_string(),
                    received: arg_type.name().to_string(),
                },
                &arg.position,
            );
        }
    }

    fn require(
        &mut self,
        operator: &str,
        requirement: &str,
        data_type: &DataType,
        accepts: fn(&DataType) -> bool,
        position: &Position,
    ) {
        if data_type.is_unknown() || accepts(data_type) {
            return;
        }

        self.error(
            ErrorImpl::OperandTypeError {
                operator: operator.to_string(),
                requirement: requirement.to_string(),
                received: data_type.name().to_string(),
            },
            position,
        );
    }

    fn require_same(&mut self, operator: &str, left: &DataType, right: &DataType, position: &Position) {
        if left.is_unknown() || right.is_unknown() || left == right {
            return;
        }

        self.error(
            ErrorImpl::TypeMatchError {
                operator: operator.to_string(),
                left: left.name().to_string(),
                right: right.name().to_string(),
            },
            position,
        );
    }

    pub fn check_stmt(&mut self, stmt: &'a Stmt) {
        match &stmt.kind {
            StmtKind::Block(body) => self.check_scoped_body(body),
            StmtKind::VarDecl(decl) => {
                self.check_initializer(decl);
                self.declare(Symbol::variable(
                    &decl.name,
                    decl.data_type.clone(),
                    decl.position.clone(),
                ));
            }
            StmtKind::If {
                condition,
                body,
                else_body,
            } => {
                self.check_expr(condition);
                self.check_scoped_body(body);
                if let Some(else_body) = else_body {
                    self.check_scoped_body(else_body);
                }
            }
            StmtKind::While { condition, body } => {
                self.check_expr(condition);
                self.loop_depth += 1;
                self.check_scoped_body(body);
                self.loop_depth -= 1;
            }
            StmtKind::Continue => self.check_jump("continue", &stmt.position),
            StmtKind::Break => self.check_jump("break", &stmt.position),
            StmtKind::Return(value) => self.check_return(value.as_ref(), &stmt.position),
            StmtKind::Expression(expr) => self.check_expr(expr),
        }
    }

    fn check_scoped_body(&mut self, body: &'a [Stmt]) {
        self.scopes.push(ScopeKind::Block);
        for stmt in body {
            self.check_stmt(stmt);
        }
        self.scopes.pop();
    }

    fn check_jump(&mut self, statement: &str, position: &Position) {
        if self.loop_depth == 0 {
            self.error(
                ErrorImpl::JumpOutsideLoop {
                    statement: statement.to_string(),
                },
                position,
            );
        }
    }

    fn check_return(&mut self, value: Option<&'a Expr>, position: &Position) {
        let Some(function) = self.function else {
            return;
        };
        let expected = &function.return_type;

        let received = match value {
            Some(value) => {
                self.check_expr(value);
                let value_type = self.data_type(value);
                if value_type.is_unknown() || (!expected.is_void() && value_type == expected) {
                    return;
                }
                value_type.name().to_string()
            }
            None if expected.is_void() => return,
            None => String::from("void"),
        };

        self.error(
            ErrorImpl::ReturnTypeMatchError {
                function: function.name.clone(),
                expected: expected.name().to_string(),
                received,
            },
            position,
        );
    }

    fn check_initializer(&mut self, decl: &'a VarDecl) {
        let Some(initializer) = &decl.initializer else {
            return;
        };

        self.check_expr(initializer);
        let received = self.data_type(initializer);
        if received.is_unknown() || *received == decl.data_type {
            return;
        }

        self.error(
            ErrorImpl::InitializerTypeMatchError {
                variable: decl.name.clone(),
                expected: decl.data_type.name().to_string(),
                received: received.name().to_string(),
            },
            &initializer.position,
        );
    }

    fn declare(&mut self, symbol: Symbol<'a>) {
        if let Err(error) = self.scopes.declare(symbol) {
            self.diagnostics.report(error);
        }
    }

    /// Adds a function to the module scope. A prototype may be followed by
    /// a definition with the same signature; the symbol then refers to the
    /// definition.
    fn declare_function(&mut self, function: &'a Function) {
        let previous = self
            .scopes
            .module()
            .get(&function.name)
            .map(|symbol| (symbol.kind, symbol.function));

        match previous {
            None => self.declare(Symbol::function(function)),
            Some((SymbolKind::Function, Some(previous))) => {
                if !previous.same_signature(function) {
                    self.error(
                        ErrorImpl::ConflictingDeclaration {
                            symbol: function.name.clone(),
                            previous: previous.signature(),
                            current: function.signature(),
                        },
                        &function.position,
                    );
                } else if previous.is_definition() && function.is_definition() {
                    self.error(
                        ErrorImpl::SymbolAlreadyDeclared {
                            symbol: function.name.clone(),
                        },
                        &function.position,
                    );
                } else if function.is_definition() {
                    if let Some(symbol) = self.scopes.module_mut().get_mut(&function.name) {
                        symbol.function = Some(function);
                    }
                }
            }
            Some(_) => self.error(
                ErrorImpl::SymbolAlreadyDeclared {
                    symbol: function.name.clone(),
                },
                &function.position,
            ),
        }
    }

    fn check_function(&mut self, function: &'a Function) {
        let Some(body) = &function.body else {
            return;
        };

        self.function = Some(function);
        self.loop_depth = 0;
        self.scopes.push(ScopeKind::Function);

        for (index, parameter) in function.parameters.iter().enumerate() {
            self.declare(Symbol::argument(
                &parameter.name,
                parameter.data_type.clone(),
                index,
                parameter.position.clone(),
            ));
        }

        // parameters and the outermost locals share one scope
        for stmt in body {
            self.check_stmt(stmt);
        }

        self.scopes.pop();
        self.function = None;
    }

    /// Checks a whole module. Every global and function is declared before
    /// any body is looked at, so module-level names may be used before the
    /// point where they are declared.
    pub fn check_module(&mut self, module: &'a Module) {
        for global in &module.globals {
            self.declare(Symbol::variable(
                &global.name,
                global.data_type.clone(),
                global.position.clone(),
            ));
        }

        for function in &module.functions {
            self.declare_function(function);
        }

        for global in &module.globals {
            self.check_initializer(global);
        }

        for function in &module.functions {
            self.check_function(function);
        }
    }
}

/// Runs semantic analysis over `module`, reporting into `diagnostics`.
///
/// The walk never stops early; every function body is checked even after
/// errors.
pub fn type_check(module: &Module, diagnostics: &mut Diagnostics) {
    let mut type_checker = TypeChecker::new(diagnostics);
    type_checker.check_module(module);
}

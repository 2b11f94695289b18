//! Minimal C++ expression and statement model
//!
//! Components describe the code they want emitted as a list of [`Statement`]s.
//! Rendering turns each statement into exactly one line of C++ that the
//! firmware build compiles into its `setup()` function.

use std::fmt;

use itertools::Itertools;
use serde::{Serialize, Serializer};

/// Global application object that owns every registered component
pub const APP: &str = "App";

#[derive(Clone, Debug, PartialEq)]
pub enum Expression {
    /// Identifier or any pre-rendered fragment (e.g. `somose::continous`)
    Raw(String),
    Int(i64),
    Hex(u64),
    Float(f64),
    Bool(bool),
    Str(String),
    /// `new T()`
    New(String),
    /// Method call through a pointer (`obj->m(args)`) or a value (`obj.m(args)`)
    MethodCall {
        receiver: String,
        pointer: bool,
        method: String,
        args: Vec<Expression>,
    },
}

impl Expression {
    pub fn id(name: impl Into<String>) -> Self {
        Expression::Raw(name.into())
    }

    /// Constant of a C++ enum declared inside `namespace`
    pub fn enum_value(namespace: &str, name: &str) -> Self {
        Expression::Raw(format!("{namespace}::{name}"))
    }

    pub fn method(receiver: impl Into<String>, method: impl Into<String>, args: Vec<Expression>) -> Self {
        Expression::MethodCall {
            receiver: receiver.into(),
            pointer: true,
            method: method.into(),
            args,
        }
    }

    /// Call on the global application object
    pub fn app(method: impl Into<String>, args: Vec<Expression>) -> Self {
        Expression::MethodCall {
            receiver: APP.to_string(),
            pointer: false,
            method: method.into(),
            args,
        }
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}

fn render_args(args: &[Expression]) -> String {
    args.iter().map(ToString::to_string).join(", ")
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Raw(s) => write!(f, "{s}"),
            Expression::Int(i) => write!(f, "{i}"),
            Expression::Hex(h) => write!(f, "0x{h:02X}"),
            // Always keep a decimal point so the literal stays a float
            Expression::Float(x) if x.fract() == 0.0 && x.is_finite() => write!(f, "{x:.1}f"),
            Expression::Float(x) => write!(f, "{x}f"),
            Expression::Bool(b) => write!(f, "{b}"),
            Expression::Str(s) => write!(f, "\"{}\"", escape(s)),
            Expression::New(t) => write!(f, "new {t}()"),
            Expression::MethodCall {
                receiver,
                pointer,
                method,
                args,
            } => {
                let op = if *pointer { "->" } else { "." };
                write!(f, "{receiver}{op}{method}({})", render_args(args))
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Statement {
    /// `T *id = value;`
    Declare {
        type_name: String,
        id: String,
        value: Expression,
    },
    Expr(Expression),
}

impl Statement {
    /// Declare a pointer variable holding a freshly allocated `type_name`
    pub fn new_pvariable(type_name: impl Into<String>, id: impl Into<String>) -> Self {
        let type_name = type_name.into();
        Statement::Declare {
            value: Expression::New(type_name.clone()),
            type_name,
            id: id.into(),
        }
    }
}

impl From<Expression> for Statement {
    fn from(expression: Expression) -> Self {
        Statement::Expr(expression)
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Declare {
                type_name,
                id,
                value,
            } => write!(f, "{type_name} *{id} = {value};"),
            Statement::Expr(e) => write!(f, "{e};"),
        }
    }
}

/// Ordered list of statements, rendered one per line
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Program(Vec<Statement>);

impl Program {
    pub fn new() -> Self {
        Program(Vec::new())
    }

    pub fn add(&mut self, statement: impl Into<Statement>) {
        self.0.push(statement.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_statements(self) -> Vec<Statement> {
        self.0
    }

    pub fn lines(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }

    pub fn render(&self) -> String {
        self.0.iter().map(|s| format!("{s}\n")).collect()
    }
}

impl Serialize for Program {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(ToString::to_string))
    }
}

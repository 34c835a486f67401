//! Function values: closures over a captured scope.
//!
//! The scope and the expression tree belong to the evaluator. This module
//! only bundles them and prints them; it never looks inside a scope or runs
//! a body.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use crate::heap::Heap;

/// A node of the evaluator's expression tree.
///
/// `Display` must print source text; it is how function values show their
/// body and parameter defaults.
pub trait Expression: fmt::Display + fmt::Debug {
    /// Recover the evaluator's concrete node type.
    fn as_any(&self) -> &dyn Any;
}

/// The lexical scope a function value captured at creation.
pub trait Scope: fmt::Debug {
    /// Recover the evaluator's concrete scope type.
    fn as_any(&self) -> &dyn Any;
}

/// One formal parameter, with its default expression if any.
#[derive(Clone, Debug)]
pub struct Parameter {
    pub name: String,
    pub default: Option<Rc<dyn Expression>>,
}

impl Parameter {
    pub fn new(name: impl Into<String>) -> Self {
        Parameter {
            name: name.into(),
            default: None,
        }
    }

    pub fn with_default(name: impl Into<String>, default: Rc<dyn Expression>) -> Self {
        Parameter {
            name: name.into(),
            default: Some(default),
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(default) = &self.default {
            write!(f, " = {default}")?;
        }
        Ok(())
    }
}

/// Closure payload of [`Value::Function`](crate::Value::Function).
#[derive(Clone, Debug)]
pub struct FunctionType {
    scope: Rc<dyn Scope>,
    body: Rc<dyn Expression>,
    params: Rc<[Parameter]>,
}

impl FunctionType {
    pub fn new(
        scope: Rc<dyn Scope>,
        body: Rc<dyn Expression>,
        params: impl Into<Rc<[Parameter]>>,
    ) -> Self {
        FunctionType {
            scope,
            body,
            params: params.into(),
        }
    }

    pub fn scope(&self) -> &Rc<dyn Scope> {
        &self.scope
    }

    pub fn body(&self) -> &Rc<dyn Expression> {
        &self.body
    }

    pub fn params(&self) -> &[Parameter] {
        &self.params
    }
}

/// `function(a = 1, b) body`
impl fmt::Display for FunctionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("function(")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{param}")?;
        }
        write!(f, ") {}", self.body)
    }
}

/// Shared handle to a closure.
pub type FunctionHandle = Heap<FunctionType>;

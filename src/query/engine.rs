//! Compiled jq expressions.

use crate::convert::Error;
use crate::value::Canonical;
use jaq_core::load::{Arena, File, Loader};
use jaq_core::{Compiler, Ctx, Filter, Native, RcIter};
use jaq_json::Val;
use num_bigint::BigInt;
use std::fmt;
use std::rc::Rc;

/// Query is a parsed and compiled jq expression.
pub struct Query {
    expression: String,
    filter: Filter<Native<Val>>,
}

impl Query {
    /// Parses an expression with the jq standard library in scope.
    pub fn parse(expression: &str) -> Result<Query, Error> {
        let program = File {
            code: expression,
            path: (),
        };

        let loader = Loader::new(jaq_std::defs().chain(jaq_json::defs()));
        let arena = Arena::default();
        let modules = loader.load(&arena, program).map_err(|errs| {
            tracing::debug!(expression, "expression failed to parse");
            Error::parse(expression, describe(&errs))
        })?;

        let filter = Compiler::default()
            .with_funs(jaq_std::funs().chain(jaq_json::funs()))
            .compile(modules)
            .map_err(|errs| {
                tracing::debug!(expression, "expression failed to compile");
                Error::parse(expression, describe(&errs))
            })?;

        Ok(Query {
            expression: expression.to_string(),
            filter,
        })
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Runs the query and returns its first result, if it produced any.
    pub fn first(&self, input: &Canonical) -> Option<Result<Canonical, Error>> {
        let inputs = RcIter::new(core::iter::empty());
        let mut out = self.filter.run((Ctx::new([], &inputs), to_val(input)));

        out.next().map(|result| {
            result
                .map(|v| from_val(&v))
                .map_err(|e| Error::Query(e.to_string()))
        })
    }

    /// Runs the query and collects every result, stopping at the first error.
    pub fn all(&self, input: &Canonical) -> Result<Vec<Canonical>, Error> {
        let inputs = RcIter::new(core::iter::empty());
        let out = self.filter.run((Ctx::new([], &inputs), to_val(input)));

        out.map(|result| {
            result
                .map(|v| from_val(&v))
                .map_err(|e| Error::Query(e.to_string()))
        })
        .collect()
    }
}

impl fmt::Debug for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("expression", &self.expression)
            .finish()
    }
}

fn describe<F, E: fmt::Debug>(errors: &[(F, E)]) -> String {
    errors
        .iter()
        .map(|(_, e)| format!("{:?}", e))
        .collect::<Vec<_>>()
        .join("; ")
}

fn to_val(value: &Canonical) -> Val {
    match value {
        Canonical::Null => Val::Null,
        Canonical::Bool(b) => Val::Bool(*b),
        Canonical::Int(i) => Val::Int(*i),
        Canonical::Float(f) => Val::Float(*f),
        Canonical::BigInt(n) => Val::Num(Rc::new(n.to_string())),
        Canonical::String(s) => Val::Str(Rc::new(s.clone())),
        Canonical::List(items) => Val::Arr(Rc::new(items.iter().map(to_val).collect())),
        Canonical::Map(fields) => Val::Obj(Rc::new(
            fields
                .iter()
                .map(|(k, v)| (Rc::new(k.clone()), to_val(v)))
                .collect(),
        )),
    }
}

fn from_val(value: &Val) -> Canonical {
    match value {
        Val::Null => Canonical::Null,
        Val::Bool(b) => Canonical::Bool(*b),
        Val::Int(i) => Canonical::Int(*i),
        Val::Float(f) => Canonical::Float(*f),
        Val::Num(n) => parse_number(n),
        Val::Str(s) => Canonical::String(s.to_string()),
        Val::Arr(items) => Canonical::List(items.iter().map(from_val).collect()),
        Val::Obj(fields) => Canonical::Map(
            fields
                .iter()
                .map(|(k, v)| (k.to_string(), from_val(v)))
                .collect(),
        ),
    }
}

// Numbers too large for the machine integer travel through the engine as
// decimal literals.
fn parse_number(literal: &str) -> Canonical {
    if let Ok(i) = literal.parse::<isize>() {
        return Canonical::Int(i);
    }
    if let Ok(n) = literal.parse::<BigInt>() {
        return Canonical::BigInt(n);
    }
    match literal.parse::<f64>() {
        Ok(f) => Canonical::Float(f),
        Err(_) => Canonical::String(literal.to_string()),
    }
}

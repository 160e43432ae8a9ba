//! # Collection Queries
//!
//! A [`Query`] is a conjunction of [`Filter`]s over dotted document paths, an optional ordering
//! and an optional limit. The actor evaluates it against the serialized form of each document.
//!
//! Evaluation rules:
//! - A filter on a path the document lacks, or holds `null` at, never matches (this includes `!=`).
//! - Numbers compare numerically regardless of integer/float representation.
//! - Ordering drops documents that lack the order path; ties fall back to the document id.
//! - Without an ordering, results come back in document-id order.

use crate::error::StoreError;
use serde_json::Value;
use std::cmp::Ordering;

/// Upper bound on the number of values an `in` filter may carry.
pub const MAX_IN_VALUES: usize = 30;

/// Comparison operator of a [`Filter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    NotEq,
    Lt,
    Lte,
    Gt,
    Gte,
    In,
    ArrayContains,
}

/// A single predicate: `<path> <op> <value>`.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub path: String,
    pub op: FilterOp,
    pub value: Value,
}

impl Filter {
    pub fn new(path: impl Into<String>, op: FilterOp, value: impl Into<Value>) -> Self {
        Self {
            path: path.into(),
            op,
            value: value.into(),
        }
    }

    pub fn eq(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(path, FilterOp::Eq, value)
    }

    pub fn not_eq(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(path, FilterOp::NotEq, value)
    }

    pub fn lt(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(path, FilterOp::Lt, value)
    }

    pub fn lte(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(path, FilterOp::Lte, value)
    }

    pub fn gt(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(path, FilterOp::Gt, value)
    }

    pub fn gte(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(path, FilterOp::Gte, value)
    }

    /// Matches when the field equals any of `values`.
    pub fn is_in<V: Into<Value>>(path: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        Self::new(path, FilterOp::In, Value::Array(values))
    }

    /// Matches when the field is an array holding `value`.
    pub fn array_contains(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(path, FilterOp::ArrayContains, value)
    }

    fn validate(&self) -> Result<(), StoreError> {
        if self.path.is_empty() {
            return Err(StoreError::InvalidQuery("filter path is empty".to_string()));
        }
        if self.op == FilterOp::In {
            match &self.value {
                Value::Array(values) if values.is_empty() => {
                    return Err(StoreError::InvalidQuery(format!(
                        "'in' filter on {} has no values",
                        self.path
                    )));
                }
                Value::Array(values) if values.len() > MAX_IN_VALUES => {
                    return Err(StoreError::InvalidQuery(format!(
                        "'in' filter on {} has {} values, at most {} allowed",
                        self.path,
                        values.len(),
                        MAX_IN_VALUES
                    )));
                }
                Value::Array(_) => {}
                _ => {
                    return Err(StoreError::InvalidQuery(format!(
                        "'in' filter on {} needs an array of values",
                        self.path
                    )));
                }
            }
        }
        Ok(())
    }

    /// Evaluates the predicate against a serialized document.
    pub fn matches(&self, document: &Value) -> bool {
        let Some(field) = lookup(document, &self.path) else {
            return false;
        };
        match self.op {
            FilterOp::Eq => values_equal(field, &self.value),
            FilterOp::NotEq => !values_equal(field, &self.value),
            FilterOp::Lt => compare_values(field, &self.value) == Some(Ordering::Less),
            FilterOp::Lte => matches!(
                compare_values(field, &self.value),
                Some(Ordering::Less | Ordering::Equal)
            ),
            FilterOp::Gt => compare_values(field, &self.value) == Some(Ordering::Greater),
            FilterOp::Gte => matches!(
                compare_values(field, &self.value),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            FilterOp::In => match &self.value {
                Value::Array(candidates) => candidates.iter().any(|c| values_equal(field, c)),
                _ => false,
            },
            FilterOp::ArrayContains => match field {
                Value::Array(items) => items.iter().any(|item| values_equal(item, &self.value)),
                _ => false,
            },
        }
    }
}

/// Sort direction of an ordered query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub path: String,
    pub direction: Direction,
}

/// A composite query over one collection.
///
/// ```rust
/// use resource_store::{Direction, Filter, Query};
///
/// let query = Query::new()
///     .filter(Filter::eq("status", "published"))
///     .filter(Filter::gte("rating", 4))
///     .order_by("rating", Direction::Descending)
///     .limit(50);
/// assert_eq!(query.filters().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    filters: Vec<Filter>,
    order_by: Option<OrderBy>,
    limit: Option<usize>,
}

impl Query {
    /// An unfiltered, unordered, unlimited query: the whole collection.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn order_by(mut self, path: impl Into<String>, direction: Direction) -> Self {
        self.order_by = Some(OrderBy {
            path: path.into(),
            direction,
        });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn ordering(&self) -> Option<&OrderBy> {
        self.order_by.as_ref()
    }

    pub fn max_results(&self) -> Option<usize> {
        self.limit
    }

    /// Rejects malformed queries before any document is scanned.
    pub fn validate(&self) -> Result<(), StoreError> {
        for filter in &self.filters {
            filter.validate()?;
        }
        if let Some(order) = &self.order_by {
            if order.path.is_empty() {
                return Err(StoreError::InvalidQuery("order path is empty".to_string()));
            }
        }
        Ok(())
    }

    pub fn matches(&self, document: &Value) -> bool {
        self.filters.iter().all(|filter| filter.matches(document))
    }
}

/// Resolves a dotted path (`address.country`) inside a serialized document.
///
/// An explicit `null` counts as missing.
pub fn lookup<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(document, |node, key| node.get(key))
        .filter(|value| !value.is_null())
}

fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => a == b,
        },
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| values_equal(x, y))
        }
        _ => left == right,
    }
}

/// Orders two field values of the same kind; mixed kinds are unordered.
pub(crate) fn compare_values(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// Total order used for sorting: same-kind values compare by value, mixed kinds by kind.
pub(crate) fn sort_order(left: &Value, right: &Value) -> Ordering {
    fn rank(value: &Value) -> u8 {
        match value {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Array(_) => 4,
            Value::Object(_) => 5,
        }
    }
    compare_values(left, right).unwrap_or_else(|| rank(left).cmp(&rank(right)))
}

use std::{cmp::Ordering, fmt, sync::Arc};

use rust_decimal::Decimal;

use crate::{
    ast::{CompareOp, Expr, Literal},
    value::{self, Document, Scalar},
};

/// A compiled filter: a pure boolean function over records.
///
/// Cloning is cheap and a predicate can be shared across threads; it only
/// holds the immutable expression tree.
///
/// # Examples
///
/// ```
/// use sift_lang::{compile_filter, Value};
///
/// let predicate = compile_filter("config.lr < 0.1 & info.status == 'COMPLETE'").unwrap();
///
/// let run = Value::object([
///     ("config", Value::object([("lr", Value::Float(0.01))])),
///     ("info", Value::object([("status", Value::String("COMPLETE".into()))])),
/// ]);
/// assert!(predicate.matches(&run));
/// assert!(!predicate.matches(&Value::Object(Default::default())));
/// ```
#[derive(Debug, Clone)]
pub struct Predicate {
    root: Option<Arc<Expr>>,
}

/// Turns an expression tree into a predicate. Never fails.
pub fn compile(expr: Expr) -> Predicate {
    Predicate {
        root: Some(Arc::new(expr)),
    }
}

impl Predicate {
    /// A predicate accepting every record.
    pub fn always() -> Self {
        Predicate { root: None }
    }

    /// The compiled expression, `None` for [`Predicate::always`].
    pub fn expr(&self) -> Option<&Expr> {
        self.root.as_deref()
    }

    /// Evaluates the predicate against one record.
    pub fn matches<D: Document + ?Sized>(&self, record: &D) -> bool {
        match &self.root {
            Some(expr) => eval(expr, record),
            None => true,
        }
    }

    /// Lazily keeps the records this predicate accepts.
    pub fn select<'p, I>(&'p self, records: I) -> impl Iterator<Item = I::Item> + 'p
    where
        I: IntoIterator,
        I::IntoIter: 'p,
        I::Item: AsDocument,
    {
        records
            .into_iter()
            .filter(move |record| self.matches(AsDocument::as_document(record)))
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.root {
            Some(expr) => write!(f, "{expr}"),
            None => Ok(()),
        }
    }
}

/// Items [`Predicate::select`] can filter: records held by value or by reference.
pub trait AsDocument {
    type Doc: Document + ?Sized;

    fn as_document(&self) -> &Self::Doc;
}

impl<D: Document> AsDocument for &D {
    type Doc = D;

    fn as_document(&self) -> &D {
        self
    }
}

impl AsDocument for crate::Value {
    type Doc = crate::Value;

    fn as_document(&self) -> &crate::Value {
        self
    }
}

impl AsDocument for serde_json::Value {
    type Doc = serde_json::Value;

    fn as_document(&self) -> &serde_json::Value {
        self
    }
}

fn eval<D: Document + ?Sized>(expr: &Expr, record: &D) -> bool {
    match expr {
        Expr::Comparison {
            field,
            op,
            value: literal,
        } => {
            match value::resolve(record, field.segments()) {
                Some(found) => compare(found.as_scalar(), *op, literal),
                None => false,
            }
        }
        Expr::Membership { field, values } => match value::resolve(record, field.segments()) {
            Some(found) => {
                let found = found.as_scalar();
                values.iter().any(|v| scalars_equal(found, v.as_scalar()))
            }
            None => false,
        },
        Expr::And { left, right } => eval(left, record) && eval(right, record),
        Expr::Or { left, right } => eval(left, record) || eval(right, record),
        Expr::Not { operand } => !eval(operand, record),
    }
}

/// Applies `op` to a present field value. `found` is `None` for null, lists
/// and mappings, which equal nothing and order against nothing.
fn compare(found: Option<Scalar<'_>>, op: CompareOp, literal: &Literal) -> bool {
    let literal = literal.as_scalar();
    if !op.is_ordering() {
        let equal = scalars_equal(found, literal);
        return if op == CompareOp::Equal { equal } else { !equal };
    }
    let Some(ordering) = found.and_then(|f| order(f, literal)) else {
        return false;
    };
    match op {
        CompareOp::LessThan => ordering == Ordering::Less,
        CompareOp::GreaterThan => ordering == Ordering::Greater,
        CompareOp::LessEqual => ordering != Ordering::Greater,
        CompareOp::GreaterEqual => ordering != Ordering::Less,
        CompareOp::Equal | CompareOp::NotEqual => false,
    }
}

fn scalars_equal(found: Option<Scalar<'_>>, literal: Scalar<'_>) -> bool {
    match (found, literal) {
        (Some(Scalar::Boolean(a)), Scalar::Boolean(b)) => a == b,
        (Some(Scalar::String(a)), Scalar::String(b)) => a == b,
        (Some(a), b) => numeric_order(a, b) == Some(Ordering::Equal),
        (None, _) => false,
    }
}

/// Ordering is defined for number/number and string/string pairs only.
fn order(a: Scalar<'_>, b: Scalar<'_>) -> Option<Ordering> {
    match (a, b) {
        (Scalar::String(a), Scalar::String(b)) => Some(a.cmp(b)),
        _ => numeric_order(a, b),
    }
}

/// Integers and floats form one numeric kind; mixed pairs compare exactly.
fn numeric_order(a: Scalar<'_>, b: Scalar<'_>) -> Option<Ordering> {
    match (a, b) {
        (Scalar::Integer(a), Scalar::Integer(b)) => Some(a.cmp(&b)),
        (Scalar::Float(a), Scalar::Float(b)) => a.partial_cmp(&b),
        (Scalar::Integer(a), Scalar::Float(b)) => mixed_order(a, b),
        (Scalar::Float(a), Scalar::Integer(b)) => mixed_order(b, a).map(Ordering::reverse),
        _ => None,
    }
}

fn mixed_order(int: i64, float: f64) -> Option<Ordering> {
    // Rounding an i64 to f64 is monotone, so a strict float ordering is exact.
    match (int as f64).partial_cmp(&float)? {
        Ordering::Equal => {
            // `float` is integral and within i64 range here; both decimals are exact.
            let float = Decimal::from_f64_retain(float)?;
            Some(Decimal::from(int).cmp(&float))
        }
        ordering => Some(ordering),
    }
}

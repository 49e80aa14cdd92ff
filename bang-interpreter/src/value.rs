//! Runtime value representation for the Bang interpreter.
//!
//! A value is an integer, a string, or an error. Operators never fail with a
//! Rust error for ordinary type mismatches: they return an [`Value::Error`]
//! carrying the message, and it is up to the consuming node to decide
//! whether that error is fatal.

use std::fmt;

/// Runtime values in the Bang interpreter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// 64-bit signed integer
    Integer(i64),
    /// UTF-8 string
    String(String),
    /// Failed computation. An empty message is the silent unwind signal.
    Error(String),
}

impl Value {
    pub fn error(message: impl Into<String>) -> Self {
        Value::Error(message.into())
    }

    /// The message-less error used to unwind without reporting anything
    pub fn silent() -> Self {
        Value::Error(String::new())
    }

    pub fn is_silent(&self) -> bool {
        matches!(self, Value::Error(message) if message.is_empty())
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// Get the type name of this value
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "Integer",
            Value::String(_) => "String",
            Value::Error(_) => "Error",
        }
    }

    // Arithmetic operations

    /// Addition: integer sum or string concatenation
    pub fn add(&self, other: &Value) -> Value {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => checked(a.checked_add(*b), "+"),
            (Value::String(a), Value::String(b)) => Value::String(format!("{a}{b}")),
            _ => type_mismatch("+"),
        }
    }

    /// Subtraction (integers only)
    pub fn sub(&self, other: &Value) -> Value {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => checked(a.checked_sub(*b), "-"),
            _ => type_mismatch("-"),
        }
    }

    /// Multiplication: integer product, or string repetition in either operand order
    pub fn mul(&self, other: &Value) -> Value {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => checked(a.checked_mul(*b), "*"),
            (Value::String(s), Value::Integer(n)) | (Value::Integer(n), Value::String(s)) => {
                repeat(s, *n)
            }
            _ => type_mismatch("*"),
        }
    }

    /// Truncating integer division. A zero divisor is reported before any type check.
    pub fn div(&self, other: &Value) -> Value {
        if matches!(other, Value::Integer(0)) {
            return Value::error("Divide by zero error");
        }
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => checked(a.checked_div(*b), "/"),
            _ => type_mismatch("/"),
        }
    }

    /// The `!` operator: reverse the decimal digits of an integer
    /// (keeping its sign) or the characters of a string
    pub fn reverse(&self) -> Value {
        match self {
            Value::Integer(n) => checked(reverse_digits(*n), "!"),
            Value::String(s) => Value::String(s.chars().rev().collect()),
            Value::Error(_) => Value::error("Invalid type, only string an integers allowed"),
        }
    }
}

/// Largest string a repetition may build
pub const MAX_STRING_BYTES: usize = 1 << 30;

const REPETITION_TOO_LARGE: &str = "String repetition is too large";

fn type_mismatch(operator: &str) -> Value {
    Value::error(format!("Type mismatch on operands of {operator}"))
}

fn checked(result: Option<i64>, operator: &str) -> Value {
    match result {
        Some(n) => Value::Integer(n),
        None => Value::error(format!("Integer overflow on operands of {operator}")),
    }
}

fn repeat(s: &str, count: i64) -> Value {
    if count < 0 {
        return Value::error("Cannot multiply string by negative int");
    }
    let total = usize::try_from(count)
        .ok()
        .and_then(|count| s.len().checked_mul(count))
        .filter(|total| *total <= MAX_STRING_BYTES);
    let Some(total) = total else {
        return Value::error(REPETITION_TOO_LARGE);
    };

    let mut repeated = String::new();
    if repeated.try_reserve_exact(total).is_err() {
        return Value::error(REPETITION_TOO_LARGE);
    }
    // An empty `s` would spin through `count` no-op pushes
    if !s.is_empty() {
        for _ in 0..count {
            repeated.push_str(s);
        }
    }
    Value::String(repeated)
}

/// `120 -> 21`, `-45 -> -54`. `None` when the result does not fit.
fn reverse_digits(n: i64) -> Option<i64> {
    let mut magnitude = n.unsigned_abs();
    let mut reversed: u64 = 0;
    while magnitude > 0 {
        reversed = reversed.checked_mul(10)?.checked_add(magnitude % 10)?;
        magnitude /= 10;
    }
    let reversed = i64::try_from(reversed).ok()?;
    Some(if n < 0 { -reversed } else { reversed })
}

/// Printed form: integers in decimal, strings raw, errors as nothing
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{n}"),
            Value::String(s) => f.write_str(s),
            Value::Error(_) => Ok(()),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

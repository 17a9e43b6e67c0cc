// src/query/quantity.rs

//! Comparison mini-language for the quantity column: `>10`, `<= 5`, `=3`.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{AppError, Result};

/// Comparison operator of a quantity condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
}

impl Operator {
    fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "<" => Some(Operator::Lt),
            "<=" => Some(Operator::Le),
            ">" => Some(Operator::Gt),
            ">=" => Some(Operator::Ge),
            "=" => Some(Operator::Eq),
            _ => None,
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            Operator::Lt => "<",
            Operator::Le => "<=",
            Operator::Gt => ">",
            Operator::Ge => ">=",
            Operator::Eq => "=",
        }
    }
}

/// A parsed `<operator><integer>` condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityCondition {
    pub operator: Operator,
    pub value: i64,
}

fn pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // Two-character operators come first so `<=` is not read as `<` then `=5`.
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*(<=|>=|<|>|=)\s*([+-]?\d+)").expect("quantity pattern is valid")
    })
}

impl QuantityCondition {
    /// Parse a condition; trailing text after the integer is ignored.
    pub fn parse(input: &str) -> Result<Self> {
        let caps = pattern()
            .captures(input)
            .ok_or_else(|| AppError::malformed(input, "expected <op><integer>"))?;

        let operator = Operator::from_symbol(&caps[1])
            .ok_or_else(|| AppError::malformed(input, "unknown operator"))?;
        let value = caps[2]
            .parse()
            .map_err(|e| AppError::malformed(input, e))?;

        Ok(Self { operator, value })
    }

    /// Whether `quantity` satisfies the condition.
    pub fn accepts(&self, quantity: i64) -> bool {
        match self.operator {
            Operator::Gt => quantity > self.value,
            Operator::Ge => quantity >= self.value,
            Operator::Lt => quantity < self.value,
            Operator::Le => quantity <= self.value,
            Operator::Eq => quantity == self.value,
        }
    }
}

impl FromStr for QuantityCondition {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for QuantityCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.operator.symbol(), self.value)
    }
}

//! Tree-walking evaluator
//!
//! Each node evaluates to a [`Value`] against a shared [`SymbolTable`].
//! Printing goes to the evaluator's output sink. An error value becomes a
//! [`RuntimeFault`] only when consumed by `print`, `if`, `loop`, an
//! operator, or `!`; the fault then unwinds the whole run through `?`.

use crate::error::{Result, RuntimeFault};
use crate::symbols::SymbolTable;
use crate::value::Value;
use bang_parser::{BinaryOperator, Node, NodeKind};
use std::io::Write;
use tracing::{debug, trace};

const NOT_AN_INTEGER: &str = "Expression is not an integer";
const UNINITIALIZED: &str = "Uninitialized identifier";

/// Expression evaluator writing printed values to `W`
pub struct Evaluator<W: Write> {
    output: W,
}

impl<W: Write> Evaluator<W> {
    pub fn new(output: W) -> Self {
        Self { output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn flush(&mut self) -> Result<()> {
        self.output.flush()?;
        Ok(())
    }

    /// Evaluate `node`. A fault leaves earlier bindings and printed output in place.
    pub fn evaluate(&mut self, node: &Node, symbols: &mut SymbolTable) -> Result<Value> {
        match &node.kind {
            NodeKind::StatementList { .. } => self.evaluate_statement_list(node, symbols),

            NodeKind::Let {
                identifier,
                expression,
            } => {
                let value = self.evaluate(expression, symbols)?;
                trace!(identifier = %identifier, value = %value.type_name(), line = node.line, "bind");
                symbols.bind(identifier, value.clone());
                Ok(value)
            }

            NodeKind::Print(expression) => {
                let value = fatal_on_error(self.evaluate(expression, symbols)?, node)?;
                write!(self.output, "{value}")?;
                Ok(value)
            }

            NodeKind::If { condition, body } => {
                if self.evaluate_condition(condition, node, symbols)? != 0 {
                    self.evaluate(body, symbols)?;
                }
                Ok(Value::Integer(0))
            }

            NodeKind::Loop { condition, body } => self.evaluate_loop(condition, body, node, symbols),

            NodeKind::Binary {
                operator,
                left,
                right,
            } => {
                let left = fatal_on_error(self.evaluate(left, symbols)?, node)?;
                let right = fatal_on_error(self.evaluate(right, symbols)?, node)?;
                let result = match operator {
                    BinaryOperator::Plus => left.add(&right),
                    BinaryOperator::Minus => left.sub(&right),
                    BinaryOperator::Times => left.mul(&right),
                    BinaryOperator::Divide => left.div(&right),
                };
                fatal_on_error(result, node)
            }

            NodeKind::Bang(operand) => {
                let operand = fatal_on_error(self.evaluate(operand, symbols)?, node)?;
                fatal_on_error(operand.reverse(), node)
            }

            NodeKind::IntLiteral(n) => Ok(Value::Integer(*n)),
            NodeKind::StringLiteral(s) => Ok(Value::String(s.clone())),

            NodeKind::Identifier(name) => Ok(symbols
                .lookup(name)
                .cloned()
                .unwrap_or_else(|| Value::error(UNINITIALIZED))),
        }
    }

    // Walks the right spine iteratively so long programs do not deepen the stack
    fn evaluate_statement_list(&mut self, node: &Node, symbols: &mut SymbolTable) -> Result<Value> {
        for statement in node.statements() {
            self.evaluate(statement, symbols)?;
        }
        Ok(Value::silent())
    }

    fn evaluate_condition(
        &mut self,
        condition: &Node,
        owner: &Node,
        symbols: &mut SymbolTable,
    ) -> Result<i64> {
        match self.evaluate(condition, symbols)? {
            Value::Integer(n) => Ok(n),
            _ => Err(RuntimeFault::at(owner, NOT_AN_INTEGER)),
        }
    }

    /// Do/while: the body runs only if the condition is initially nonzero,
    /// then repeats while the freshly re-evaluated condition stays nonzero.
    fn evaluate_loop(
        &mut self,
        condition: &Node,
        body: &Node,
        node: &Node,
        symbols: &mut SymbolTable,
    ) -> Result<Value> {
        if self.evaluate_condition(condition, node, symbols)? == 0 {
            return Ok(Value::Integer(0));
        }

        let mut iterations: u64 = 0;
        loop {
            let result = self.evaluate(body, symbols)?;
            iterations += 1;
            if self.evaluate_condition(condition, node, symbols)? == 0 {
                debug!(line = node.line, iterations, "loop finished");
                return Ok(result);
            }
        }
    }
}

fn fatal_on_error(value: Value, node: &Node) -> Result<Value> {
    match value {
        Value::Error(message) => {
            let fault = RuntimeFault::at(node, message);
            debug!(line = node.line, %fault, "runtime fault");
            Err(fault)
        }
        value => Ok(value),
    }
}

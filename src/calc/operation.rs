//! The arithmetic itself.

/// Multiply two operands.
pub fn multiply(operand1: f64, operand2: f64) -> f64 {
    operand1 * operand2
}

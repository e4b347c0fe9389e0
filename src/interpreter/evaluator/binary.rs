use crate::{ast::BinaryOperator, error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Applies a binary operator to two already evaluated operands.
///
/// Arithmetic is checked: a result outside the `i64` range is
/// [`RuntimeError::Overflow`] instead of wrapping. Division and remainder
/// truncate toward zero. Comparisons and equality produce `1` for true and
/// `0` for false.
///
/// # Errors
/// - [`RuntimeError::DivisionByZero`] for `/` or `%` with a zero right
///   operand.
/// - [`RuntimeError::Overflow`] when `+`, `-`, `*` or `/` leaves the `i64`
///   range.
///
/// # Example
/// ```
/// use sprola::{ast::BinaryOperator, interpreter::evaluator::binary::eval_binary};
///
/// assert_eq!(eval_binary(BinaryOperator::Div, -7, 2).unwrap(), -3);
/// assert_eq!(eval_binary(BinaryOperator::Mod, -7, 2).unwrap(), -1);
/// assert_eq!(eval_binary(BinaryOperator::LessEqual, 2, 2).unwrap(), 1);
/// assert!(eval_binary(BinaryOperator::Div, 1, 0).is_err());
/// ```
pub fn eval_binary(op: BinaryOperator, left: i64, right: i64) -> EvalResult<i64> {
    use BinaryOperator::{
        Add, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod, Mul, NotEqual, Sub,
    };

    let overflow = || RuntimeError::Overflow { left,
                                               op: op.symbol(),
                                               right };

    match op {
        Add => left.checked_add(right).ok_or_else(overflow),
        Sub => left.checked_sub(right).ok_or_else(overflow),
        Mul => left.checked_mul(right).ok_or_else(overflow),
        Div => {
            if right == 0 {
                return Err(RuntimeError::DivisionByZero);
            }
            left.checked_div(right).ok_or_else(overflow)
        },
        Mod => {
            if right == 0 {
                return Err(RuntimeError::DivisionByZero);
            }
            // `i64::MIN % -1` is mathematically 0; only the quotient overflows.
            Ok(left.wrapping_rem(right))
        },
        Less => Ok(i64::from(left < right)),
        LessEqual => Ok(i64::from(left <= right)),
        Greater => Ok(i64::from(left > right)),
        GreaterEqual => Ok(i64::from(left >= right)),
        Equal => Ok(i64::from(left == right)),
        NotEqual => Ok(i64::from(left != right)),
    }
}

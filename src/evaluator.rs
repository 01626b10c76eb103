use tracing::{debug, trace};

use crate::{config::Limits, error::EvalError, lexer::Lexer};

/// Evaluates `expression` with the default limits.
///
/// Values are computed during descent; no tree is kept. The first error
/// aborts the whole evaluation.
pub fn evaluate(expression: &str) -> Result<f64, EvalError> {
    Evaluator::new(expression).eval()
}

/// Single-pass recursive descent evaluator.
///
/// ```text
/// expression := term (('+' | '-') term)*
/// term       := factor (('*' | '/' | '%') factor)*
/// factor     := '-' factor | '(' expression ')' | number
/// number     := digit+ ('.' digit*)? | '.' digit+
/// ```
///
/// A leading `+` in factor position is always rejected.
pub struct Evaluator<'a> {
    lexer: Lexer<'a>,
    limits: Limits,
    depth: usize,
}

impl<'a> Evaluator<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::with_limits(input, Limits::default())
    }

    pub fn with_limits(input: &'a str, limits: Limits) -> Self {
        Self {
            lexer: Lexer::new(input),
            limits,
            depth: 0,
        }
    }

    /// Runs the evaluation. The evaluator is consumed since its cursor
    /// cannot be rewound.
    pub fn eval(mut self) -> Result<f64, EvalError> {
        let source = self.lexer.source();
        let result = self.parse_all();
        match &result {
            Ok(value) => debug!(input = source, value = *value, "evaluated expression"),
            Err(err) => debug!(input = source, error = %err, "rejected expression"),
        }
        result
    }

    fn parse_all(&mut self) -> Result<f64, EvalError> {
        let value = self.expression()?;

        if let Some(found) = self.lexer.peek_token() {
            return Err(EvalError::UnexpectedToken {
                found,
                at: (self.lexer.offset(), found.len_utf8()).into(),
            });
        }

        if !value.is_finite() {
            return Err(EvalError::DivisionByZero {
                at: (0, self.lexer.source().len()).into(),
            });
        }

        Ok(value)
    }

    fn expression(&mut self) -> Result<f64, EvalError> {
        let mut x = self.term()?;
        loop {
            if self.lexer.eat('+') {
                x += self.term()?;
            } else if self.lexer.eat('-') {
                x -= self.term()?;
            } else {
                return Ok(x);
            }
        }
    }

    fn term(&mut self) -> Result<f64, EvalError> {
        let mut x = self.factor()?;
        loop {
            self.lexer.skip_whitespace();
            let op_at = self.lexer.offset();

            if self.lexer.eat('*') {
                x *= self.factor()?;
            } else if self.lexer.eat('/') {
                let divisor = self.factor()?;
                if divisor == 0.0 {
                    return Err(EvalError::DivisionByZero {
                        at: (op_at, 1).into(),
                    });
                }
                x /= divisor;
            } else if self.lexer.eat('%') {
                x = self.modulo(x, op_at)?;
            } else {
                return Ok(x);
            }
            trace!(offset = op_at, value = x, "applied operator");
        }
    }

    /// Integer-only modulo. A `%` directly following the result at the
    /// same level is rejected so chains need explicit grouping.
    fn modulo(&mut self, x: f64, op_at: usize) -> Result<f64, EvalError> {
        let divisor = self.factor()?;

        if x.fract() != 0.0 || divisor.fract() != 0.0 {
            return Err(EvalError::IntegerModuloOnly {
                at: (op_at, 1).into(),
            });
        }
        if divisor == 0.0 {
            return Err(EvalError::DivisionByZero {
                at: (op_at, 1).into(),
            });
        }

        let rem = x % divisor;

        if self.lexer.peek_token() == Some('%') {
            return Err(EvalError::AmbiguousModulo {
                at: (self.lexer.offset(), 1).into(),
            });
        }

        Ok(rem)
    }

    fn factor(&mut self) -> Result<f64, EvalError> {
        self.lexer.skip_whitespace();
        let start = self.lexer.offset();

        if self.lexer.eat('+') {
            return Err(EvalError::UnexpectedToken {
                found: '+',
                at: (start, 1).into(),
            });
        }

        if self.lexer.eat('-') {
            return self.nested(start, |this| this.factor()).map(|x| -x);
        }

        if self.lexer.eat('(') {
            let x = self.nested(start, |this| this.expression())?;
            if !self.lexer.eat(')') {
                return Err(EvalError::UnmatchedParenthesis {
                    open: (start, 1).into(),
                });
            }
            return Ok(x);
        }

        if let Some(token) = self.lexer.number() {
            return token
                .slice
                .parse::<f64>()
                .map_err(|_| EvalError::InvalidNumber {
                    literal: token.slice.to_string(),
                    at: token.span().into(),
                });
        }

        match self.lexer.peek() {
            None => Err(EvalError::Incomplete {
                at: (start, 0).into(),
            }),
            Some(found) => Err(EvalError::UnexpectedToken {
                found,
                at: (start, found.len_utf8()).into(),
            }),
        }
    }

    /// Runs `f` one nesting level deeper, failing once the configured
    /// depth is reached.
    fn nested<F>(&mut self, at: usize, f: F) -> Result<f64, EvalError>
    where
        F: FnOnce(&mut Self) -> Result<f64, EvalError>,
    {
        if self.depth >= self.limits.max_depth {
            return Err(EvalError::TooDeep {
                limit: self.limits.max_depth,
                at: (at, 1).into(),
            });
        }

        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }
}

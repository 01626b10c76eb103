use std::borrow::Cow;

use tracing::debug;

use crate::{config::Limits, error::EvalError, evaluator::Evaluator};

/// Maps keypad glyphs to the operator characters the evaluator knows.
///
/// Borrows the input when there is nothing to replace.
pub fn normalize(input: &str) -> Cow<'_, str> {
    if !input.contains(['x', '×', '÷', '−']) {
        return Cow::Borrowed(input);
    }

    Cow::Owned(
        input
            .chars()
            .map(|c| match c {
                'x' | '×' => '*',
                '÷' => '/',
                '−' => '-',
                c => c,
            })
            .collect(),
    )
}

const EXPONENT_THRESHOLD: f64 = 1e21;

/// Formats a result for display.
///
/// Whole numbers print without a fraction, switching to exponent form
/// (`1e+21`) from 1e21 upwards. Everything else is rounded to six decimals
/// with trailing zeros removed.
pub fn format_result(value: f64) -> String {
    if value.abs() >= EXPONENT_THRESHOLD {
        return format!("{value:e}").replacen('e', "e+", 1);
    }

    if value.fract() == 0.0 {
        return if value == 0.0 {
            "0".to_string()
        } else {
            format!("{value}")
        };
    }

    let fixed = format!("{value:.6}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        s => s.to_string(),
    }
}

/// Front end turning raw display text into display text.
#[derive(Debug, Clone, Copy, Default)]
pub struct Calculator {
    limits: Limits,
}

impl Calculator {
    pub fn new(limits: Limits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Evaluates `input` to a numeric value after normalizing glyphs and
    /// checking the length ceiling.
    pub fn evaluate(&self, input: &str) -> Result<f64, EvalError> {
        let len = input.chars().count();
        if len > self.limits.max_input_len {
            debug!(len, limit = self.limits.max_input_len, "input too long");
            return Err(EvalError::TooLong {
                limit: self.limits.max_input_len,
                len,
            });
        }

        let clean = normalize(input);
        Evaluator::with_limits(&clean, self.limits).eval()
    }

    /// Evaluates `input` and formats the result for display.
    pub fn calculate(&self, input: &str) -> Result<String, EvalError> {
        self.evaluate(input).map(format_result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_normalize_borrows_canonical_input() {
        assert!(matches!(normalize("2*3/4"), Cow::Borrowed("2*3/4")));
    }

    #[test]
    fn test_normalize_glyphs() {
        assert_eq!(normalize("2x3÷4"), "2*3/4");
        assert_eq!(normalize("2×3−1"), "2*3-1");
    }

    #[test]
    fn test_format_whole_numbers() {
        assert_eq!(format_result(4.0), "4");
        assert_eq!(format_result(-12.0), "-12");
        assert_eq!(format_result(-0.0), "0");
    }

    #[test]
    fn test_format_large_values() {
        assert_eq!(format_result(1e20), "100000000000000000000");
        assert_eq!(format_result(1e21), "1e+21");
        assert_eq!(format_result(1e300), "1e+300");
        assert_eq!(format_result(-2.5e22), "-2.5e+22");
    }

    #[test]
    fn test_format_fractions() {
        assert_eq!(format_result(0.5), "0.5");
        assert_eq!(format_result(1.0 / 3.0), "0.333333");
        assert_eq!(format_result(2.0 / 3.0), "0.666667");
        assert_eq!(format_result(-2.25), "-2.25");
        assert_eq!(format_result(0.1 + 0.2), "0.3");
    }

    #[test]
    fn test_format_tiny_values() {
        assert_eq!(format_result(1e-9), "0");
        assert_eq!(format_result(-1e-9), "0");
    }

    #[test]
    fn test_calculate() {
        let calc = Calculator::default();
        assert_eq!(Ok("4".to_string()), calc.calculate("2+2"));
        assert_eq!(Ok("6".to_string()), calc.calculate("2x3"));
        assert_eq!(Ok("2.5".to_string()), calc.calculate("5÷2"));
        assert_eq!(Ok("0.5".to_string()), calc.calculate("-.5+1"));
    }

    #[test]
    fn test_calculate_errors() {
        let calc = Calculator::default();
        assert_eq!(calc.calculate("5÷0").unwrap_err().to_string(), "Div by Zero");
        assert_eq!(calc.calculate("10%3%2").unwrap_err().to_string(), "Ambiguous");
        assert_eq!(calc.calculate("5.5%2").unwrap_err().to_string(), "Int Mod Only");
        assert_eq!(calc.calculate("2x(3+2").unwrap_err().to_string(), "Missing ')'");
        assert_eq!(calc.calculate("+").unwrap_err().to_string(), "Unexpected: +");
        assert_eq!(calc.calculate("5+").unwrap_err().to_string(), "Incomplete");
        assert_eq!(calc.calculate(".").unwrap_err().to_string(), "Invalid Number");
    }

    #[test]
    fn test_input_length_ceiling() {
        let calc = Calculator::new(Limits::new(16, 5));
        assert_eq!(Ok("6".to_string()), calc.calculate("1+2+3"));
        assert_eq!(
            calc.calculate("10+200"),
            Err(EvalError::TooLong { limit: 5, len: 6 })
        );
        // counted in characters, not bytes
        assert_eq!(Ok("1".to_string()), calc.calculate("1÷1÷1"));
    }

    #[test]
    fn test_depth_from_limits() {
        let calc = Calculator::new(Limits::new(2, 100));
        assert_eq!(calc.limits().max_depth, 2);
        assert_eq!(calc.calculate("((1))"), Ok("1".to_string()));
        assert_eq!(calc.evaluate("(((1)))").unwrap_err().kind(), ErrorKind::TooDeep);
    }
}

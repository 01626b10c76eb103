/// Bounds applied before and during evaluation.
///
/// Recursion depth follows the nesting of parentheses and unary minus
/// chains in the input, so both values keep untrusted input from
/// exhausting the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum number of nested groups and unary minus applications.
    pub max_depth: usize,
    /// Maximum input length, in characters, accepted by `Calculator`.
    pub max_input_len: usize,
}

impl Limits {
    pub const DEFAULT_MAX_DEPTH: usize = 256;
    pub const DEFAULT_MAX_INPUT_LEN: usize = 4096;

    pub fn new(max_depth: usize, max_input_len: usize) -> Self {
        Self {
            max_depth,
            max_input_len,
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_DEPTH, Self::DEFAULT_MAX_INPUT_LEN)
    }
}

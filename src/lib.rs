pub mod lexer;
pub mod error;
pub mod config;
pub mod evaluator;
pub mod calc;

pub use lexer::*;
pub use error::*;
pub use config::Limits;
pub use evaluator::{evaluate, Evaluator};
pub use calc::*;

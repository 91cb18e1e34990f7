pub mod calc_engine;
pub mod config;
#[cfg(feature = "line")]
pub mod line_mode;
#[cfg(feature = "tui")]
mod render_help;
pub mod sanitize;
pub mod session;
#[cfg(feature = "tui")]
pub mod tui_mode;

pub use calc_engine::{
    Answer, AppError, Calculator, EvaluationTrace, FlatParser, Node, OperatorTable, Parse,
    ParseError, ScopeParser, ValidationError, Validator,
};

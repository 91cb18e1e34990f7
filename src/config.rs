use clap::Parser;
use log::LevelFilter;

pub const DEFAULT_MAX_INPUT_LEN: usize = 1024;

#[derive(Parser, Debug, Clone)]
#[command(name = "exprcalc")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Arithmetic expression calculator")]
#[command(long_about = None)]
pub struct Config {
    /// Expression to evaluate once; starts the interactive mode when omitted
    #[arg(trailing_var_arg = true, allow_negative_numbers = true)]
    pub expression: Vec<String>,

    /// Print the parsed tree and every evaluation step
    #[arg(short, long)]
    pub details: bool,

    /// Use the raw line editor instead of the full-screen interface
    #[arg(long)]
    pub line: bool,

    /// Longest expression accepted, in characters
    #[arg(long, env = "EXPRCALC_MAX_INPUT_LEN", default_value_t = DEFAULT_MAX_INPUT_LEN)]
    pub max_input_len: usize,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Config {
    /// The one-shot expression, if any, with the words joined back by spaces.
    pub fn expression(&self) -> Option<String> {
        if self.expression.is_empty() {
            None
        } else {
            Some(self.expression.join(" "))
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

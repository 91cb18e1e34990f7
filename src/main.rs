use std::process;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use log::error;

use exprcalc::calc_engine::{Calculator, OperatorTable};
use exprcalc::config::Config;
use exprcalc::sanitize::RequestSanitizer;
use exprcalc::session;

fn main() {
    let config = Config::parse();

    env_logger::Builder::new()
        .filter_level(config.log_level())
        .parse_default_env()
        .init();

    let calculator = Calculator::new(Arc::new(OperatorTable::arithmetic()));

    let code = match config.expression() {
        Some(expression) => run_once(&calculator, &config, &expression),
        None => match run_interactive(calculator, &config) {
            Ok(()) => 0,
            Err(e) => {
                error!("{:#}", e);
                eprintln!("Error: {:#}", e);
                1
            }
        },
    };
    process::exit(code);
}

fn run_once(calculator: &Calculator, config: &Config, expression: &str) -> i32 {
    let expression = RequestSanitizer::default().sanitize(expression);
    let evaluation = session::evaluate(calculator, &expression, config.details, config.max_input_len);

    match &evaluation.result {
        Ok(answer) => {
            println!("{} = {}", answer.equation, answer.result);
            if config.details {
                println!("  Tree: {}", answer.tree);
                for (i, step) in evaluation.detailed_steps.iter().enumerate() {
                    println!("  Step {}: {} = {}", i + 1, step.operation, step.result);
                }
                println!("  Time: {:.6} ms", evaluation.duration.as_secs_f64() * 1000.0);
            }
            0
        }
        Err(e) => {
            eprintln!("{} = Error: {}", expression.trim(), e);
            1
        }
    }
}

#[cfg(feature = "line")]
fn run_line(calculator: Calculator, config: &Config) -> Result<()> {
    exprcalc::line_mode::run_line(calculator, config)
}

#[cfg(not(feature = "line"))]
fn run_line(_calculator: Calculator, _config: &Config) -> Result<()> {
    anyhow::bail!("line mode is not available: rebuild with `--features line`")
}

#[cfg(feature = "tui")]
fn run_interactive(calculator: Calculator, config: &Config) -> Result<()> {
    if config.line {
        return run_line(calculator, config);
    }
    exprcalc::tui_mode::run_tui(calculator, config)
}

#[cfg(not(feature = "tui"))]
fn run_interactive(calculator: Calculator, config: &Config) -> Result<()> {
    run_line(calculator, config)
}

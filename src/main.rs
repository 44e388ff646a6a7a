use colored::Colorize;
use std::{
  env,
  io::{BufRead, Write},
  process,
};

use crate::fraction::{Fraction, FractionError};

mod fraction;
mod parser;
mod tokenizer;

fn main() -> Result<(), Box<dyn std::error::Error>> {
  env_logger::init();
  let args: Vec<String> = env::args().skip(1).collect();
  match Mode::from_args(&args) {
    Mode::Interactive => interactive()?,
    Mode::SelfTest => {
      let report = self_test::run(&self_test::Settings::from_env());
      if !report.is_success() {
        process::exit(1);
      }
    }
    Mode::Direct(left, right) => match add_texts(&left, &right) {
      Ok((left, right, sum)) => println!("{} + {} = {}", left, right, sum.to_string().bold()),
      Err(err) => {
        log::error!("Couldn't add '{}' and '{}': {}", left, right, err);
        println!("error: {}", err);
        print_help();
        process::exit(1);
      }
    },
    Mode::Help => print_help(),
  }
  Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum Mode {
  Interactive,
  SelfTest,
  Direct(String, String),
  Help,
}

impl Mode {
  fn from_args(args: &[String]) -> Mode {
    match args {
      [] => Mode::Interactive,
      [command] if command.eq_ignore_ascii_case("test") => Mode::SelfTest,
      [left, right] => Mode::Direct(left.clone(), right.clone()),
      _ => Mode::Help,
    }
  }
}

fn print_help() {
  println!("Usage:");
  println!("  fraction-calc                  -> interactive mode");
  println!("  fraction-calc test             -> run the self-test");
  println!("  fraction-calc \"1/2\" \"1/4\"      -> prints the sum (3/4)");
  println!("  fraction-calc \"1 1/2\" \"2 1/2\"  -> prints the sum (4)");
}

fn add_texts(left: &str, right: &str) -> Result<(Fraction, Fraction, Fraction), FractionError> {
  let left: Fraction = left.parse()?;
  let right: Fraction = right.parse()?;
  let sum = left.checked_add(right)?;
  Ok((left, right, sum))
}

fn interactive() -> Result<(), Box<dyn std::error::Error>> {
  println!("Welcome to the fraction calculator!");
  println!("Accepted formats: whole number (3), fraction (5/7), mixed number (2 3/8)");
  println!("To exit, type 'exit' or 'quit'.\n");

  let stdin = std::io::stdin();
  let mut input = stdin.lock();
  let mut output = std::io::stdout();
  let Some(left) = read_fraction(&mut input, &mut output, "first fraction: ")? else {
    println!("Goodbye!");
    return Ok(());
  };
  let Some(right) = read_fraction(&mut input, &mut output, "second fraction: ")? else {
    println!("Goodbye!");
    return Ok(());
  };

  match left.checked_add(right) {
    Ok(sum) => println!("\n{} + {} = {}", left, right, sum.to_string().bold()),
    Err(err) => {
      log::error!("Couldn't add {} and {}: {}", left, right, err);
      println!("\nerror: {}", err);
    }
  }
  Ok(())
}

/// Prompts until a line parses as a fraction. `None` means the user asked to quit.
fn read_fraction<R: BufRead, W: Write>(
  input: &mut R,
  output: &mut W,
  prompt: &str,
) -> Result<Option<Fraction>, Box<dyn std::error::Error>> {
  loop {
    write!(output, "{}", prompt)?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
      return Err("unexpected end of input".into());
    }
    let line = line.trim();
    if line == "exit" || line == "quit" {
      return Ok(None);
    }
    match line.parse::<Fraction>() {
      Ok(fraction) => return Ok(Some(fraction)),
      Err(err) => {
        log::warn!("Rejected input {:?}: {}", line, err);
        writeln!(output, "{}. Please try again.", err)?;
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::io::Cursor;

  fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
  }

  #[test]
  fn dispatches_on_argument_count() {
    assert_eq!(Mode::from_args(&args(&[])), Mode::Interactive);
    assert_eq!(Mode::from_args(&args(&["test"])), Mode::SelfTest);
    assert_eq!(Mode::from_args(&args(&["TEST"])), Mode::SelfTest);
    assert_eq!(
      Mode::from_args(&args(&["1/2", "1/4"])),
      Mode::Direct("1/2".to_string(), "1/4".to_string())
    );
    assert_eq!(Mode::from_args(&args(&["1/2"])), Mode::Help);
    assert_eq!(Mode::from_args(&args(&["1", "2", "3"])), Mode::Help);
  }

  #[test]
  fn adds_texts() {
    let (left, right, sum) = add_texts("1 1/2", "2 1/2").unwrap();
    assert_eq!(
      format!("{} + {} = {}", left, right, sum),
      "1 1/2 + 2 1/2 = 4"
    );
    let (_, _, sum) = add_texts("1/2", "1/4").unwrap();
    assert_eq!(sum.to_string(), "3/4");
  }

  #[test]
  fn add_texts_reports_errors() {
    assert!(matches!(
      add_texts("abc", "1"),
      Err(FractionError::Format(_))
    ));
    assert!(matches!(
      add_texts("9223372036854775807", "1"),
      Err(FractionError::Overflow(_))
    ));
  }

  #[test]
  fn read_fraction_prompts_again_on_bad_input() {
    let mut input = Cursor::new("hello\n\n  -2 3/8 \n");
    let mut output = Vec::new();
    let fraction = read_fraction(&mut input, &mut output, "> ").unwrap();
    assert_eq!(fraction.unwrap().to_string(), "-2 3/8");
    let output = String::from_utf8(output).unwrap();
    assert_eq!(output.matches("> ").count(), 3);
    assert_eq!(output.matches("Please try again.").count(), 2);
  }

  #[test]
  fn read_fraction_stops_on_quit() {
    let mut input = Cursor::new("quit\n1/2\n");
    let mut output = Vec::new();
    assert_eq!(read_fraction(&mut input, &mut output, "> ").unwrap(), None);
  }

  #[test]
  fn read_fraction_fails_at_end_of_input() {
    let mut input = Cursor::new("nope\n");
    let mut output = Vec::new();
    assert!(read_fraction(&mut input, &mut output, "> ").is_err());
  }
}

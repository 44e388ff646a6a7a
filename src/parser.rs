use std::num::IntErrorKind;

use crate::{
  fraction::{Fraction, FractionError},
  tokenizer::{tokenize, Sign, Token},
};

/// Parses a whole number (`3`), a fraction (`5/7`) or a mixed number (`2 3/8`).
pub fn parse(text: &str) -> Result<Fraction, FractionError> {
  let text = text.trim();
  if text.is_empty() {
    return Err(FractionError::Format("empty expression".to_string()));
  }
  let token_stream = tokenize(text)?;
  let tokens = absorb_slash_spaces(&token_stream);

  let (sign, rest) = match tokens.as_slice() {
    [Token::Sign(sign), rest @ ..] => (*sign, rest),
    rest => (Sign::Plus, rest),
  };
  let fraction = match rest {
    [Token::Digits(whole), Token::Space, Token::Digits(numerator), Token::Slash, Token::Digits(denominator)] => {
      log::debug!("parsing \"{}\" as a mixed number", text);
      Fraction::from_mixed(
        component(sign, whole)?,
        component(Sign::Plus, numerator)?,
        component(Sign::Plus, denominator)?,
      )?
    }
    [Token::Digits(numerator), Token::Slash, Token::Digits(denominator)] => {
      log::debug!("parsing \"{}\" as a simple fraction", text);
      Fraction::new(
        component(sign, numerator)?,
        component(Sign::Plus, denominator)?,
      )?
    }
    [Token::Digits(whole)] => {
      log::debug!("parsing \"{}\" as a whole number", text);
      Fraction::new(component(sign, whole)?, 1)?
    }
    _ => return Err(FractionError::Format(format!("\"{}\"", text))),
  };
  Ok(fraction)
}

/// Drops the whitespace on either side of a `/`, so `1 / 2` and `1/2` share a shape.
/// Whitespace anywhere else is kept, it separates the whole part of a mixed number.
pub fn absorb_slash_spaces(tokens: &[Token]) -> Vec<Token> {
  let mut new_tokens: Vec<Token> = vec![];
  for (index, token) in tokens.iter().enumerate() {
    if let Token::Space = token {
      let before_slash = matches!(tokens.get(index + 1), Some(Token::Slash));
      let after_slash = matches!(new_tokens.last(), Some(Token::Slash));
      if before_slash || after_slash {
        continue;
      }
    }
    new_tokens.push(token.clone());
  }
  new_tokens
}

fn component(sign: Sign, digits: &str) -> Result<i64, FractionError> {
  let literal = format!("{}{}", sign, digits);
  literal.parse::<i64>().map_err(|err| match err.kind() {
    IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
      FractionError::Overflow(format!("{} doesn't fit into 64 bits", literal))
    }
    _ => FractionError::Format(format!("invalid number \"{}\"", literal)),
  })
}

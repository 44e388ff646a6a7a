use crate::fraction::FractionError;

pub fn tokenize(text: &str) -> Result<Vec<Token>, FractionError> {
  let mut char_iter = text.chars().peekable();
  let mut token_stream: Vec<Token> = Vec::new();
  while let Some(char) = char_iter.next() {
    let token = match char {
      '+' => Token::Sign(Sign::Plus),
      '-' => Token::Sign(Sign::Minus),
      '/' => Token::Slash,
      '0'..='9' => {
        let mut digits = String::new();
        digits.push(char);
        while let Some(digit) = char_iter.next_if(|next| next.is_ascii_digit()) {
          digits.push(digit);
        }
        Token::Digits(digits)
      }
      _ if char.is_whitespace() => {
        while char_iter.next_if(|next| next.is_whitespace()).is_some() {}
        Token::Space
      }
      _ => {
        return Err(FractionError::Format(format!(
          "unexpected character '{}' in \"{}\"",
          char, text
        )))
      }
    };
    token_stream.push(token)
  }
  Ok(token_stream)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
  Sign(Sign),
  Digits(String),
  /// A run of one or more whitespace characters.
  Space,
  Slash,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
  Plus,
  Minus,
}

impl std::fmt::Display for Sign {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Sign::Plus => write!(f, "+"),
      Sign::Minus => write!(f, "-"),
    }
  }
}

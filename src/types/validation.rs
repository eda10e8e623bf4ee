use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::Display;

pub const PASSWORD_MIN: usize = 8;
pub const PASSWORD_MAX: usize = 72;

/// bcrypt ignores everything past this many bytes of input.
pub const PASSWORD_MAX_BYTES: usize = 72;

static HAS_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]").expect("compile digit regex"));
static HAS_UPPERCASE: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"[A-Z]").expect("compile uppercase regex"));
static HAS_LOWERCASE: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"[a-z]").expect("compile lowercase regex"));

/// A password policy rule, in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordRule {
  TooShort,
  TooLong,
  SurroundingWhitespace,
  MissingCharacterClass,
}

impl Display for PasswordRule {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::TooShort => write!(f, "Password must be longer than {PASSWORD_MIN} characters"),
      Self::TooLong => write!(f, "Password must be less than {PASSWORD_MAX} characters"),
      Self::SurroundingWhitespace => f.write_str("Password must not start or end with empty spaces"),
      Self::MissingCharacterClass => {
        f.write_str("Password must contain 1 upper case, lower case and number")
      }
    }
  }
}

/// Returns the first password rule the password violates.
pub fn validate_password(password: &str) -> Result<(), PasswordRule> {
  let len = password.chars().count();
  if len < PASSWORD_MIN {
    return Err(PasswordRule::TooShort);
  }

  if len > PASSWORD_MAX || password.len() > PASSWORD_MAX_BYTES {
    return Err(PasswordRule::TooLong);
  }

  if password.trim() != password {
    return Err(PasswordRule::SurroundingWhitespace);
  }

  let has_all_classes = HAS_DIGIT.is_match(password)
    && HAS_UPPERCASE.is_match(password)
    && HAS_LOWERCASE.is_match(password);

  if !has_all_classes {
    return Err(PasswordRule::MissingCharacterClass);
  }

  Ok(())
}

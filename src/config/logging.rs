use serde::Deserialize;
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Logging {
  /// How log lines are laid out in the console.
  ///
  /// **Environment variables**:
  /// - `QUILL_LOGGING_STYLE`
  pub style: LoggingStyle,
  /// Directives passed to [`tracing_subscriber::EnvFilter`].
  /// `RUST_LOG` overrides this value if it is set.
  ///
  /// **Environment variables**:
  /// - `QUILL_LOGGING_FILTER`
  pub filter: String,
}

impl Default for Logging {
  fn default() -> Self {
    Self {
      style: LoggingStyle::default(),
      filter: "info".into(),
    }
  }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoggingStyle {
  Compact,
  #[default]
  Full,
  Pretty,
  Json,
}

impl Display for LoggingStyle {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Compact => f.write_str("compact"),
      Self::Full => f.write_str("full"),
      Self::Pretty => f.write_str("pretty"),
      Self::Json => f.write_str("json"),
    }
  }
}

#[derive(Debug, Error)]
#[error("unknown {0:?} logging style")]
pub struct InvalidLoggingStyle(String);

impl FromStr for LoggingStyle {
  type Err = InvalidLoggingStyle;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "compact" => Ok(Self::Compact),
      "full" => Ok(Self::Full),
      "pretty" => Ok(Self::Pretty),
      "json" => Ok(Self::Json),
      _ => Err(InvalidLoggingStyle(s.to_string())),
    }
  }
}

impl<'de> Deserialize<'de> for LoggingStyle {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: serde::Deserializer<'de>,
  {
    struct Visitor;

    impl serde::de::Visitor<'_> for Visitor {
      type Value = LoggingStyle;

      fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("logging style")
      }

      fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
      where
        E: serde::de::Error,
      {
        LoggingStyle::from_str(v).map_err(serde::de::Error::custom)
      }
    }

    deserializer.deserialize_str(Visitor)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_test::Token;

  #[test]
  fn test_from_str_is_case_insensitive() {
    assert_eq!(LoggingStyle::from_str("PRETTY").unwrap(), LoggingStyle::Pretty);
    assert_eq!(LoggingStyle::from_str("json").unwrap(), LoggingStyle::Json);
    assert!(LoggingStyle::from_str("fancy").is_err());
  }

  #[test]
  fn test_deserialize() {
    serde_test::assert_de_tokens(&LoggingStyle::Compact, &[Token::Str("compact")]);
  }
}

use super::Error;

pub mod auth;
pub mod comments;
pub mod users;

/// Absent means missing, `null` or an empty string.
fn required<T: AsRef<str>>(field: &'static str, value: Option<T>) -> Result<T, Error> {
  value
    .filter(|v| !v.as_ref().is_empty())
    .ok_or(Error::MissingField(field))
}

//! Secret references for the calendar API key.
//!
//! The `api_key` value in `config.toml` may point at a secret kept outside
//! the file:
//!
//! - `env::VAR_NAME` reads `$VAR_NAME` from the environment
//! - `pass::path/in/store` runs `pass show path/in/store` and keeps the first line
//! - anything else is the key itself

use std::fmt;

/// A parsed secret value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretRef<'a> {
    /// Read from an environment variable.
    Env(&'a str),
    /// Read from the `pass` password store.
    Pass(&'a str),
    /// Used as written.
    Literal(&'a str),
}

impl<'a> SecretRef<'a> {
    /// Parses a configured value into a reference.
    pub fn parse(value: &'a str) -> Self {
        if let Some(var) = value.strip_prefix("env::") {
            Self::Env(var)
        } else if let Some(path) = value.strip_prefix("pass::") {
            Self::Pass(path)
        } else {
            Self::Literal(value)
        }
    }

    /// Resolves the reference into the secret value.
    pub fn resolve(&self) -> Result<String, String> {
        match self {
            Self::Env(var) => resolve_env(var),
            Self::Pass(path) => resolve_pass(path),
            Self::Literal(value) => Ok((*value).to_string()),
        }
    }
}

/// Literal values are never displayed.
impl fmt::Display for SecretRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Env(var) => write!(f, "env::{}", var),
            Self::Pass(path) => write!(f, "pass::{}", path),
            Self::Literal(_) => write!(f, "<literal>"),
        }
    }
}

/// Resolves a value that may contain a secret reference prefix.
pub fn resolve(value: &str) -> Result<String, String> {
    SecretRef::parse(value).resolve()
}

fn resolve_env(var: &str) -> Result<String, String> {
    std::env::var(var).map_err(|_| format!("environment variable `{}` is not set", var))
}

/// Runs `pass show <path>` and returns the first line of stdout.
fn resolve_pass(path: &str) -> Result<String, String> {
    let output = std::process::Command::new("pass")
        .arg("show")
        .arg(path)
        .output()
        .map_err(|e| format!("failed to run `pass show {}`: {}", path, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!(
            "`pass show {}` failed ({}): {}",
            path,
            output.status,
            stderr.trim()
        ));
    }

    String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()
        .map(str::to_string)
        .ok_or_else(|| format!("`pass show {}` produced no output", path))
}

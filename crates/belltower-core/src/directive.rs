//! Tab-file directive grammar.
//!
//! One rule per line:
//!
//! ```text
//! <moment> <command-and-args...>
//! ```
//!
//! The moment is the first whitespace-delimited token, or a double-quoted
//! string when the moment itself contains spaces (six-field cron patterns
//! do). Blank lines and `#` comments are skipped. Command tokens are
//! re-joined with single spaces and handed verbatim to the shell — no
//! escaping happens at this layer.

use belltower_schedule::{parse_moment, Moment};

use crate::error::{ConfigError, Result};

/// One parsed tab rule: a validated moment plus the command it runs.
#[derive(Debug, Clone)]
pub struct Directive {
    pub moment: Moment,
    pub command: String,
}

/// Parse a whole tab file.
///
/// Registration is all-or-nothing: the first bad line aborts with a
/// line-numbered error and nothing is returned.
pub fn parse_tab(input: &str) -> Result<Vec<Directive>> {
    let mut directives = Vec::new();

    for (idx, raw) in input.lines().enumerate() {
        let line = idx + 1;
        let text = raw.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }
        directives.push(parse_line(text, line)?);
    }

    Ok(directives)
}

/// Parse a single non-empty, non-comment directive line.
pub fn parse_line(text: &str, line: usize) -> Result<Directive> {
    let (moment_text, rest) = split_moment(text, line)?;

    let command = rest.split_whitespace().collect::<Vec<_>>().join(" ");
    if command.is_empty() {
        return Err(ConfigError::MissingCommand {
            line,
            moment: moment_text,
        });
    }

    let moment =
        parse_moment(&moment_text).map_err(|source| ConfigError::Schedule { line, source })?;

    Ok(Directive { moment, command })
}

/// Split the leading moment token off a directive line.
fn split_moment(text: &str, line: usize) -> Result<(String, &str)> {
    if let Some(rest) = text.strip_prefix('"') {
        let Some(end) = rest.find('"') else {
            return Err(ConfigError::MalformedDirective {
                line,
                reason: "unterminated quote in moment".to_string(),
            });
        };
        return Ok((rest[..end].to_string(), &rest[end + 1..]));
    }

    match text.split_once(char::is_whitespace) {
        Some((moment, rest)) => Ok((moment.to_string(), rest)),
        // A lone moment token; the missing command is reported by the caller.
        None => Ok((text.to_string(), "")),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

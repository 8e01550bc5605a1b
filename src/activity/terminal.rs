//! Terminal session idle probing
//!
//! Shells out to the system session listers and extracts the idle column
//! for the current user. Idle values arrive in several shapes depending on
//! the utility and platform; [`parse_idle_field`] normalizes them to
//! minutes. An unparsable field means "unknown", which callers must treat
//! as not-idle.

use crate::probe;
use std::process::Command;
use std::time::Duration;
use tracing::debug;

/// Shared timeout for the session probes. These are local utilities; a few
/// seconds is already generous.
pub const SESSION_PROBE_TIMEOUT: Duration = Duration::from_secs(3);

struct SessionProbe {
    program: &'static str,
    args: &'static [&'static str],
    /// Whitespace-separated column holding the idle value.
    idle_field: usize,
}

/// Candidates in preference order; the first one that yields a parsable
/// idle value for the current user wins.
const SESSION_PROBES: &[SessionProbe] = &[
    SessionProbe {
        program: "w",
        args: &["-h"],
        idle_field: 4,
    },
    SessionProbe {
        program: "who",
        args: &["-u"],
        idle_field: 4,
    },
];

/// Idle minutes of the current user's most active session, when any probe
/// answers. Multiple sessions collapse to the minimum: any live terminal
/// counts as activity.
pub fn terminal_idle_minutes(timeout: Duration) -> Option<f64> {
    let user = current_user()?;

    for candidate in SESSION_PROBES {
        let output = match probe::run_command(
            Command::new(candidate.program).args(candidate.args),
            timeout,
        ) {
            Ok(output) if output.succeeded() => output,
            Ok(_) => {
                debug!("session probe `{}` had no usable signal", candidate.program);
                continue;
            }
            Err(err) => {
                debug!("session probe `{}` failed to spawn: {}", candidate.program, err);
                continue;
            }
        };

        let idle = output
            .stdout
            .lines()
            .filter(|line| line.split_whitespace().next() == Some(user.as_str()))
            .filter_map(|line| line.split_whitespace().nth(candidate.idle_field))
            .filter_map(parse_idle_field)
            .reduce(f64::min);

        if let Some(minutes) = idle {
            debug!("session probe `{}` reports {:.2}m idle", candidate.program, minutes);
            return Some(minutes);
        }
    }
    None
}

fn current_user() -> Option<String> {
    std::env::var("USER")
        .or_else(|_| std::env::var("LOGNAME"))
        .ok()
}

/// Normalize a session lister's idle field to minutes.
///
/// Shapes handled: empty, `.` and `?` (active, 0), the literal `old`
/// (a day or more), `45s`, `2m`, `A:B` (minutes:seconds when `A < 10`,
/// hours:minutes otherwise), and a bare number of minutes. Anything else is
/// `None`.
pub fn parse_idle_field(field: &str) -> Option<f64> {
    let field = field.trim();
    match field {
        "" | "." | "?" => return Some(0.0),
        "old" => return Some(24.0 * 60.0),
        _ => {}
    }

    if let Some(secs) = field.strip_suffix('s') {
        return secs.parse::<f64>().ok().map(|s| s / 60.0);
    }
    if let Some(mins) = field.strip_suffix('m') {
        return mins.parse::<f64>().ok();
    }
    if let Some((a, b)) = field.split_once(':') {
        let a: f64 = a.parse().ok()?;
        let b: f64 = b.parse().ok()?;
        return Some(if a < 10.0 { a + b / 60.0 } else { a * 60.0 + b });
    }
    field.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_markers() {
        assert_eq!(parse_idle_field(""), Some(0.0));
        assert_eq!(parse_idle_field("."), Some(0.0));
        assert_eq!(parse_idle_field("?"), Some(0.0));
    }

    #[test]
    fn test_old_is_a_day() {
        assert_eq!(parse_idle_field("old"), Some(1440.0));
    }

    #[test]
    fn test_seconds_suffix() {
        assert_eq!(parse_idle_field("45s"), Some(0.75));
    }

    #[test]
    fn test_minutes_suffix() {
        assert_eq!(parse_idle_field("2m"), Some(2.0));
    }

    #[test]
    fn test_colon_minutes_seconds() {
        assert_eq!(parse_idle_field("3:45"), Some(3.75));
    }

    #[test]
    fn test_colon_hours_minutes() {
        assert_eq!(parse_idle_field("12:30"), Some(750.0));
    }

    #[test]
    fn test_bare_number() {
        assert_eq!(parse_idle_field("20"), Some(20.0));
    }

    #[test]
    fn test_unknown_shapes() {
        assert_eq!(parse_idle_field("10days"), None);
        assert_eq!(parse_idle_field("n/a"), None);
        assert_eq!(parse_idle_field("1:2:3"), None);
    }
}

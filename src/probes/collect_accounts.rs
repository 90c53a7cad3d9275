use crate::exec::run_with_timeout;
use crate::probes::types::AccountEntry;
use chrono::{Local, NaiveDateTime};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Entry point: collect login sessions plus a synthetic entry identifying
/// the collector process itself.
pub fn collect_accounts_info(timeout: Duration) -> BTreeMap<String, AccountEntry> {
    let mut accounts = collect_sessions(timeout);

    let user = resolve_current_user();
    let term = resolve_own_terminal();
    accounts.insert(
        format!("{user}@{term}"),
        AccountEntry::Process {
            pid: std::process::id(),
        },
    );

    accounts
}

fn collect_sessions(timeout: Duration) -> BTreeMap<String, AccountEntry> {
    let mut sessions = BTreeMap::new();

    let output = match run_with_timeout("who", &[], timeout) {
        Ok(out) if out.status.success() => out,
        Ok(_) | Err(_) => {
            debug!("session listing unavailable");
            return sessions;
        }
    };

    let text = String::from_utf8_lossy(&output.stdout);
    for line in text.lines() {
        if let Some((key, entry)) = parse_who_line(line) {
            sessions.insert(key, entry);
        }
    }

    sessions
}

/// Parse one `who` line, e.g.
/// `alice    pts/0        2026-08-07 09:15 (192.168.1.50)`.
fn parse_who_line(line: &str) -> Option<(String, AccountEntry)> {
    let mut parts = line.split_whitespace();
    let name = parts.next()?;
    let term = parts.next()?;
    let date = parts.next()?;
    let time = parts.next()?;
    let host = parts
        .next()
        .and_then(|v| v.strip_prefix('('))
        .and_then(|v| v.strip_suffix(')'))
        .unwrap_or("");

    let started = NaiveDateTime::parse_from_str(&format!("{date} {time}"), "%Y-%m-%d %H:%M")
        .ok()
        .and_then(|dt| dt.and_local_timezone(Local).single())
        .map(|dt| dt.timestamp())
        .unwrap_or(0);

    Some((
        format!("{name}@{host}"),
        AccountEntry::Session {
            started,
            term: term.to_string(),
        },
    ))
}

/// `SUDO_USER` wins over `USER`, and a home directory of `/root` always
/// identifies the superuser regardless of what the environment claims.
fn resolve_current_user() -> String {
    if dirs::home_dir().is_some_and(|home| home == Path::new("/root")) {
        return "root".to_string();
    }
    std::env::var("SUDO_USER")
        .or_else(|_| std::env::var("USER"))
        .unwrap_or_default()
}

#[cfg(unix)]
fn resolve_own_terminal() -> String {
    std::fs::read_link("/proc/self/fd/0")
        .ok()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(not(unix))]
fn resolve_own_terminal() -> String {
    "win".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_remote_session_line() {
        let (key, entry) =
            parse_who_line("alice    pts/0        2026-08-07 09:15 (192.168.1.50)").unwrap();
        assert_eq!(key, "alice@192.168.1.50");
        match entry {
            AccountEntry::Session { started, term } => {
                assert!(started > 0);
                assert_eq!(term, "pts/0");
            }
            _ => panic!("expected a session entry"),
        }
    }

    #[test]
    fn parses_a_local_session_without_host() {
        let (key, entry) = parse_who_line("root     tty1         2026-08-07 08:02").unwrap();
        assert_eq!(key, "root@");
        match entry {
            AccountEntry::Session { term, .. } => assert_eq!(term, "tty1"),
            _ => panic!("expected a session entry"),
        }
    }

    #[test]
    fn rejects_short_lines() {
        assert!(parse_who_line("").is_none());
        assert!(parse_who_line("alice pts/0").is_none());
    }

    #[test]
    fn always_reports_the_collector_itself() {
        let accounts = collect_accounts_info(Duration::from_secs(5));
        assert!(accounts
            .values()
            .any(|e| matches!(e, AccountEntry::Process { .. })));
    }

    #[test]
    fn self_entry_serializes_with_pid_only() {
        let entry = AccountEntry::Process { pid: 4242 };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value, serde_json::json!({ "pid": 4242 }));
    }
}

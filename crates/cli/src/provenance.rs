use serde_json::{json, Value};
use std::panic::Location;
use std::process::Command;

/// Metadata stamped around every result printed by the CLI.
pub struct Payload {
    pub command: &'static str,
    pub params: Value,
}

impl Payload {
    pub fn new(command: &'static str, params: Value) -> Self {
        Self { command, params }
    }
}

/// Wrap `result` with the git commit, callsite, crate version, and params.
#[track_caller]
pub fn envelope(payload: Payload, result: Value) -> Value {
    let callsite = Location::caller();
    json!({
        "code_rev": current_git_rev(),
        "version": sfc_orient::VERSION,
        "callsite": {
            "file": callsite.file(),
            "line": callsite.line()
        },
        "command": payload.command,
        "params": payload.params,
        "result": result
    })
}

pub fn current_git_rev() -> String {
    if let Some(from_env) = option_env!("GIT_COMMIT") {
        if !from_env.is_empty() {
            return from_env.to_string();
        }
    }
    if let Ok(env_override) = std::env::var("GIT_COMMIT") {
        if !env_override.is_empty() {
            return env_override;
        }
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                String::from_utf8(output.stdout)
                    .ok()
                    .map(|s| s.trim().to_string())
            } else {
                None
            }
        })
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_carries_params_and_result() {
        let payload = Payload::new("traverse", json!({"dim": 3}));
        let doc = envelope(payload, json!({"total_solutions": 5}));
        assert_eq!(doc["command"], "traverse");
        assert_eq!(doc["params"]["dim"], 3);
        assert_eq!(doc["result"]["total_solutions"], 5);
        assert_eq!(doc["version"], sfc_orient::VERSION);
        assert!(doc["callsite"]["file"]
            .as_str()
            .is_some_and(|f| f.ends_with("provenance.rs")));
    }

    #[test]
    fn git_rev_is_never_empty() {
        assert!(!current_git_rev().is_empty());
    }
}

//! Auth command - replay account requests against an in-memory service
//!
//! Script format, one request per line:
//!
//! ```text
//! {"route":"register","body":{"username":"...","phoneNumber":"...","email":"...","password":"..."}}
//! {"route":"login","body":{"username":"...","password":"..."}}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::Deserialize;

use aviator_core::auth::{AuthOutcome, AuthRoute, AuthService};

/// Arguments for the auth command
#[derive(Args)]
pub struct AuthArgs {
    /// JSON-lines script of requests
    pub script: PathBuf,
}

#[derive(Debug, Deserialize)]
struct ScriptLine {
    route: String,
    #[serde(default)]
    body: serde_json::Value,
}

/// Execute the auth command
pub fn execute(args: AuthArgs, config_path: Option<&Path>) -> Result<()> {
    let config = crate::config::load(config_path)?;
    let mut service = AuthService::new(&config.auth)?;

    let file = std::fs::File::open(&args.script)
        .with_context(|| format!("Failed to open {}", args.script.display()))?;
    for outcome in run_script(&mut service, std::io::BufReader::new(file))? {
        println!("{} {}", outcome.status, serde_json::to_string(&outcome.body)?);
    }
    Ok(())
}

/// Run every request in `reader` and collect the outcomes in order.
pub fn run_script(service: &mut AuthService, reader: impl BufRead) -> Result<Vec<AuthOutcome>> {
    let mut outcomes = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.with_context(|| format!("Failed to read line {line_no}"))?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let entry: ScriptLine =
            serde_json::from_str(line).with_context(|| format!("Line {line_no}: not a script entry"))?;
        let route: AuthRoute = entry.route.parse().with_context(|| format!("Line {line_no}"))?;
        outcomes.push(service.handle(route, &entry.body));
    }
    Ok(outcomes)
}

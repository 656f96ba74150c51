// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Startup diagnostics, collected while a session is assembled and reported
//! in one block.

use std::fmt;

/// How serious a startup finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Informational, e.g. stream parameters.
    Info,
    /// Degraded but usable, e.g. a missing heightmap.
    Warning,
    /// The session cannot start.
    Error,
}

/// One finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// How serious it is.
    pub severity: Severity,
    /// What happened.
    pub message: String,
}

/// The ordered findings of one startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartupDiagnostics {
    entries: Vec<Diagnostic>,
}

impl StartupDiagnostics {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an informational entry.
    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Severity::Info, message);
    }

    /// Records a warning.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.push(Severity::Warning, message);
    }

    /// Records a fatal error.
    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Severity::Error, message);
    }

    fn push(&mut self, severity: Severity, message: impl Into<String>) {
        self.entries.push(Diagnostic {
            severity,
            message: message.into(),
        });
    }

    /// All entries in the order they were recorded.
    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Returns `true` if any entry is an error.
    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(|d| d.severity == Severity::Error)
    }

    /// Writes every entry to the log at its own level.
    pub fn log(&self) {
        log::info!("--- Startup Diagnostics ---");
        for entry in &self.entries {
            match entry.severity {
                Severity::Info => log::info!("  {}", entry.message),
                Severity::Warning => log::warn!("  {}", entry.message),
                Severity::Error => log::error!("  {}", entry.message),
            }
        }
        log::info!("---------------------------");
    }
}

impl fmt::Display for StartupDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let errors: Vec<&str> = self
            .entries
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .map(|d| d.message.as_str())
            .collect();
        write!(f, "{}", errors.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_in_order_and_reports_errors() {
        let mut diag = StartupDiagnostics::new();
        diag.info("audio: 44100 Hz");
        diag.warn("heightmap missing");
        assert!(!diag.has_errors());
        diag.error("cannot open audio");
        diag.error("no output device");

        assert!(diag.has_errors());
        assert_eq!(diag.entries().len(), 4);
        assert_eq!(diag.entries()[1].severity, Severity::Warning);
        assert_eq!(diag.to_string(), "cannot open audio; no output device");
    }
}

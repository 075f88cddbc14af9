/*
 * ==========================================================================
 * LUNA - Scripting Language Front End
 * ==========================================================================
 * 
 * License:
 * This file is part of the LUNA scripting language project.
 * 
 * LUNA is dual-licensed under the terms of:
 *   - The MIT license
 *   - The Apache License, Version 2.0
 * 
 * You may choose either license to govern your use of this software.
 * 
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * 
 * ==========================================================================
 */

use crate::error::LunaError;
use crate::span::Span;

/// Renders [`LunaError`]s as compiler-style diagnostics.
///
/// The printer:
/// - Writes a header with the stable error code and message
/// - Points at `file:line:column` when the error carries a span
/// - Echoes the offending source line with a caret (`^`) under the column
/// - Appends the optional help text
///
/// Output stays readable without color, in the spirit of `rustc`.
pub struct DiagnosticPrinter {
    /// Full text of the script, split into lines on demand.
    source: String,

    /// Display name of the script (e.g. `main.luna`).
    file_name: String,
}

impl DiagnosticPrinter {
    /// Creates a printer for one script.
    ///
    /// # Arguments
    /// - `file_name` → The name shown in the location line
    /// - `source` → The full text of that script
    pub fn new(file_name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            source: source.into(),
        }
    }

    /// Formats `error` as a multi-line diagnostic.
    ///
    /// # Output Example
    /// ```text
    /// error[E_PARSE]: expecting a terminator: [END]
    ///   --> example.luna:1:6
    ///    |
    ///  1 | x = 5
    ///    |      ^
    /// help: Terminate the statement with ';'.
    /// ```
    pub fn render(&self, error: &LunaError) -> String {
        let mut out = format!("{error}");

        match error.span {
            Some(Span { line, column }) => {
                let src_line = self
                    .source
                    .lines()
                    .nth(line.saturating_sub(1))
                    .unwrap_or("");

                out.push_str(&format!("\n  --> {}:{}:{}", self.file_name, line, column + 1));
                out.push_str("\n   |");
                out.push_str(&format!("\n{:>3} | {}", line, src_line));
                out.push_str(&format!("\n   | {}^", " ".repeat(column)));
            }
            None => {
                out.push_str(&format!("\n  --> {}", self.file_name));
            }
        }

        if let Some(help) = &error.help {
            out.push_str(&format!("\nhelp: {help}"));
        }

        out
    }

    /// Prints the rendered diagnostic to stderr.
    pub fn print(&self, error: &LunaError) {
        eprintln!("{}", self.render(error));
    }
}

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

use std::fs;
use std::path::Path;

use crate::error::SourceError;

/// Script text handed to the lexer, plus the name it was loaded from.
///
/// Sources are either literal in-memory strings (no name) or the full
/// contents of a file (named by its path). The character cursor appends
/// its own sentinel, so the text here is exactly what the user wrote.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Source {
    name: Option<String>,
    text: String,
}

impl Source {
    /// Wraps a literal script string.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            name: None,
            text: text.into(),
        }
    }

    /// Reads an entire script file into memory.
    ///
    /// # Errors
    /// [`SourceError::FileNotFound`] when the file cannot be opened or read.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|err| SourceError::FileNotFound {
            path: path.display().to_string(),
            reason: err.to_string(),
        })?;

        tracing::debug!(path = %path.display(), bytes = text.len(), "loaded source file");
        Ok(Self {
            name: Some(path.display().to_string()),
            text,
        })
    }

    /// The file path this source was read from, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

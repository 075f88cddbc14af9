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

//! Character-level cursor over LUNA source text.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{LexError, LexErrorKind};
use crate::source::Source;
use crate::span::Span;

/// Terminates every cursor buffer so lookahead never runs past the text.
pub const SENTINEL: char = '\0';

/// Coarse character classification driving token dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    Alpha,
    Digit,
    Symbol,
    Whitespace,
}

impl CharClass {
    /// Classifies `ch` without regard to locale.
    ///
    /// Only ASCII letters and digits count as alpha/digit. Everything that is
    /// not whitespace falls through to `Symbol`, including the sentinel.
    pub fn of(ch: char) -> Self {
        if ch.is_ascii_alphabetic() {
            Self::Alpha
        } else if ch.is_ascii_digit() {
            Self::Digit
        } else if matches!(ch, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c') {
            Self::Whitespace
        } else {
            Self::Symbol
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Alpha => "ALPHA",
            Self::Digit => "DIGIT",
            Self::Symbol => "SYMBOL",
            Self::Whitespace => "WHITESPACE",
        }
    }
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bidirectional cursor over source characters.
///
/// Tracks the absolute position plus a 0-based row and column. Moving
/// forward over a `'\n'` records the column the row ended at, so moving
/// backward across the same newline can restore it.
#[derive(Debug, Clone)]
pub struct CharCursor {
    source_name: Option<String>,

    /// Source characters followed by [`SENTINEL`].
    chars: Vec<char>,

    position: usize,
    row: usize,
    column: usize,

    /// Column at which each completed row ended.
    row_ends: BTreeMap<usize, usize>,

    class: CharClass,
}

impl CharCursor {
    pub fn new(source: &Source) -> Self {
        let mut chars: Vec<char> = source.text().chars().collect();
        chars.push(SENTINEL);
        let class = CharClass::of(chars[0]);

        Self {
            source_name: source.name().map(str::to_string),
            chars,
            position: 0,
            row: 0,
            column: 0,
            row_ends: BTreeMap::new(),
            class,
        }
    }

    /// Returns the cursor to the first character.
    pub fn reset(&mut self) {
        self.position = 0;
        self.row = 0;
        self.column = 0;
        self.row_ends.clear();
        self.class = CharClass::of(self.chars[0]);
    }

    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    /// Number of source characters, not counting the sentinel.
    pub fn len(&self) -> usize {
        self.chars.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn current(&self) -> char {
        self.chars[self.position]
    }

    pub fn class(&self) -> CharClass {
        self.class
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// The cursor location as a 1-based line / 0-based column span.
    pub fn span(&self) -> Span {
        Span::new(self.row + 1, self.column)
    }

    /// True while the cursor sits on a real character (not the sentinel).
    pub fn has_next(&self) -> bool {
        self.chars.len() > 1 && self.position + 2 <= self.chars.len()
    }

    pub fn has_previous(&self) -> bool {
        self.position > 0
    }

    /// Returns the character at `position`.
    ///
    /// # Errors
    /// `InvalidCharacterPosition` when `position` is past the sentinel.
    pub fn char_at(&self, position: usize) -> Result<char, LexError> {
        self.chars.get(position).copied().ok_or_else(|| {
            LexError::new(
                LexErrorKind::InvalidCharacterPosition,
                format!("{}/{}", position, self.chars.len().saturating_sub(1)),
                self.span(),
            )
        })
    }

    /// Moves one character forward and returns the new current character.
    ///
    /// `expect` selects the error raised when no character follows:
    /// `ExpectingNextCharacter` when the move was mandatory, otherwise
    /// `NoNextCharacter`.
    pub fn advance(&mut self, expect: bool) -> Result<char, LexError> {
        if !self.has_next() {
            let kind = if expect {
                LexErrorKind::ExpectingNextCharacter
            } else {
                LexErrorKind::NoNextCharacter
            };
            return Err(self.error(kind));
        }

        if self.current() == '\n' {
            // The first crossing records where the row ended. Later crossings
            // (after a retreat) only confirm it and leave the map unchanged.
            match self.row_ends.get(&self.row) {
                Some(&end) if end != self.column => {
                    return Err(self.error(LexErrorKind::InvalidCharacterRow));
                }
                Some(_) => {}
                None => {
                    self.row_ends.insert(self.row, self.column);
                }
            }
            self.column = 0;
            self.row += 1;
        } else {
            self.column += 1;
        }

        self.position += 1;
        self.class = CharClass::of(self.current());
        Ok(self.current())
    }

    /// Moves one character backward and returns the new current character.
    pub fn retreat(&mut self, expect: bool) -> Result<char, LexError> {
        if !self.has_previous() {
            let kind = if expect {
                LexErrorKind::ExpectingPreviousCharacter
            } else {
                LexErrorKind::NoPreviousCharacter
            };
            return Err(self.error(kind));
        }

        let ch = self.chars[self.position - 1];
        if ch == '\n' {
            let previous_row = self.row.saturating_sub(1);
            let end = self
                .row_ends
                .get(&previous_row)
                .copied()
                .ok_or_else(|| self.error(LexErrorKind::InvalidCharacterRow))?;
            self.row = previous_row;
            self.column = end;
        } else {
            self.column = self.column.saturating_sub(1);
        }

        self.position -= 1;
        self.class = CharClass::of(self.current());
        Ok(self.current())
    }

    /// Renders the current character, with position details when `verbose`.
    pub fn render(&self, verbose: bool) -> String {
        let ch = self.current();
        let shown = if ch.is_ascii_graphic() || ch == ' ' { ch } else { ' ' };

        if verbose {
            format!(
                "(0x{:02x}, row/col/pos: {}/{}/{}) [{}] '{}'",
                ch as u32, self.row, self.column, self.position, self.class, shown
            )
        } else {
            format!("'{}' (ln. {})", shown, self.row + 1)
        }
    }

    pub(crate) fn error(&self, kind: LexErrorKind) -> LexError {
        LexError::new(kind, self.render(false), self.span())
    }
}

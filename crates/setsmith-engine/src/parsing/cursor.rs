/// A line-oriented cursor over setfile text with absolute position tracking.
///
/// Wraps the full text of one setfile and tracks the current byte offset.
/// Lines are peeked or consumed whole, including their `\n` terminator; a
/// final line without a terminator is still yielded. Carriage returns are
/// not terminators and stay part of the line content.
pub struct TextCursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> TextCursor<'a> {
    /// Creates a cursor at the start of `text`.
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    /// Returns the current absolute byte position.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Moves the cursor to an absolute byte position.
    ///
    /// Only 0 and values previously returned by [`pos`](Self::pos) are
    /// meaningful; other values may land mid-line or mid-character.
    pub fn set_pos(&mut self, pos: usize) {
        self.pos = pos;
    }

    /// Returns true if no lines remain.
    pub fn eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// Returns the next line without consuming it, or `None` at end of text.
    pub fn peek_line(&self) -> Option<&'a str> {
        if self.eof() {
            return None;
        }
        let rest = &self.text[self.pos..];
        match rest.find('\n') {
            Some(i) => Some(&rest[..=i]),
            None => Some(rest),
        }
    }

    /// Consumes and returns the next line, or `None` at end of text.
    pub fn next_line(&mut self) -> Option<&'a str> {
        let line = self.peek_line()?;
        self.pos += line.len();
        Some(line)
    }

    /// Runs a parse attempt, rewinding to the entry position if it fails.
    ///
    /// A successful attempt leaves the cursor wherever the closure moved it;
    /// a failed one propagates the error with the cursor back at the
    /// position it had when this was called.
    pub fn with_rewind<T, E>(
        &mut self,
        attempt: impl FnOnce(&mut Self) -> Result<T, E>,
    ) -> Result<T, E> {
        let start = self.pos;
        match attempt(self) {
            Ok(value) => Ok(value),
            Err(err) => {
                self.pos = start;
                Err(err)
            }
        }
    }
}

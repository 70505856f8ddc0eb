use ropey::Rope;

/// Cursor position in the raw markdown buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based column, counted in chars.
    pub col: usize,
    /// Column to return to when moving through shorter lines.
    sticky_col: usize,
}

impl Cursor {
    pub const fn at(line: usize, col: usize) -> Self {
        Self {
            line,
            col,
            sticky_col: col,
        }
    }

    const fn set_col(&mut self, col: usize) {
        self.col = col;
        self.sticky_col = col;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Rope-backed text of the markdown document while it is edited raw.
///
/// The buffer knows nothing about sync state; the caller hands the full text
/// to the sync controller after each edit.
#[derive(Clone, Default, PartialEq)]
pub struct EditorBuffer {
    rope: Rope,
    cursor: Cursor,
}

impl EditorBuffer {
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: Cursor::default(),
        }
    }

    /// Swap in new text, keeping the cursor as close as the text allows.
    pub fn replace_text(&mut self, text: &str) {
        let Cursor { line, col, .. } = self.cursor;
        self.rope = Rope::from_str(text);
        self.move_to(line, col);
    }

    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Line content without its line ending.
    pub fn line_at(&self, line_idx: usize) -> Option<String> {
        (line_idx < self.rope.len_lines()).then(|| {
            self.rope
                .line(line_idx)
                .to_string()
                .trim_end_matches(['\n', '\r'])
                .to_string()
        })
    }

    /// Line length in chars, excluding the line ending.
    pub fn line_len(&self, line_idx: usize) -> usize {
        if line_idx >= self.rope.len_lines() {
            return 0;
        }
        let line = self.rope.line(line_idx);
        let mut len = line.len_chars();
        for ending in ['\n', '\r'] {
            if len > 0 && line.char(len - 1) == ending {
                len -= 1;
            }
        }
        len
    }

    /// Chars taken by the line ending: 2 for `\r\n`, 1 for `\n`, 0 on the last line.
    fn ending_len(&self, line_idx: usize) -> usize {
        self.rope.line(line_idx).len_chars() - self.line_len(line_idx)
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn insert_char(&mut self, ch: char) {
        let idx = self.cursor_char_idx();
        self.rope.insert_char(idx, ch);
        if ch == '\n' {
            self.cursor.line += 1;
            self.cursor.set_col(0);
        } else {
            self.cursor.set_col(self.cursor.col + 1);
        }
    }

    /// Backspace. Returns `true` if anything was removed.
    pub fn delete_back(&mut self) -> bool {
        let idx = self.cursor_char_idx();
        if idx == 0 {
            return false;
        }
        if self.cursor.col == 0 {
            let prev_len = self.line_len(self.cursor.line - 1);
            let ending = self.ending_len(self.cursor.line - 1);
            self.rope.remove(idx - ending..idx);
            self.cursor.line -= 1;
            self.cursor.set_col(prev_len);
        } else {
            self.rope.remove(idx - 1..idx);
            self.cursor.set_col(self.cursor.col - 1);
        }
        true
    }

    /// Delete key. Returns `true` if anything was removed.
    pub fn delete_forward(&mut self) -> bool {
        let idx = self.cursor_char_idx();
        if idx >= self.rope.len_chars() {
            return false;
        }
        let line = self.cursor.line;
        let width = if self.cursor.col >= self.line_len(line) {
            self.ending_len(line).max(1)
        } else {
            1
        };
        self.rope.remove(idx..idx + width);
        true
    }

    pub fn move_cursor(&mut self, direction: Direction) {
        let Cursor {
            line,
            col,
            sticky_col,
        } = self.cursor;
        match direction {
            Direction::Left if col > 0 => self.cursor.set_col(col - 1),
            Direction::Left if line > 0 => {
                self.cursor.line -= 1;
                self.cursor.set_col(self.line_len(line - 1));
            }
            Direction::Right if col < self.line_len(line) => self.cursor.set_col(col + 1),
            Direction::Right if line + 1 < self.line_count() => {
                self.cursor.line += 1;
                self.cursor.set_col(0);
            }
            Direction::Up if line > 0 => {
                self.cursor.line -= 1;
                self.cursor.col = sticky_col.min(self.line_len(line - 1));
            }
            Direction::Down if line + 1 < self.line_count() => {
                self.cursor.line += 1;
                self.cursor.col = sticky_col.min(self.line_len(line + 1));
            }
            _ => {}
        }
    }

    pub const fn move_home(&mut self) {
        self.cursor.set_col(0);
    }

    pub fn move_end(&mut self) {
        self.cursor.set_col(self.line_len(self.cursor.line));
    }

    /// Move to a position, clamped to the text.
    pub fn move_to(&mut self, line: usize, col: usize) {
        self.cursor.line = line.min(self.line_count().saturating_sub(1));
        self.cursor.set_col(col.min(self.line_len(self.cursor.line)));
    }

    fn cursor_char_idx(&self) -> usize {
        self.rope.line_to_char(self.cursor.line) + self.cursor.col.min(self.line_len(self.cursor.line))
    }
}

impl std::fmt::Debug for EditorBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorBuffer")
            .field("lines", &self.rope.len_lines())
            .field("cursor", &self.cursor)
            .finish()
    }
}

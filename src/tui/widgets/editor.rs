use std::cmp;

/// Single-line editor holding the draft text of the input surface
#[derive(Debug, Clone, Default)]
pub struct DraftEditor {
    chars: Vec<char>,
    pub cursor_col: usize,
    pub scroll_col: usize,         // Horizontal scroll (column offset)
    pub max_length: Option<usize>,
}

impl DraftEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_length(max_length: Option<usize>) -> Self {
        Self {
            max_length,
            ..Self::default()
        }
    }

    fn has_room(&self) -> bool {
        match self.max_length {
            Some(max) => self.chars.len() < max,
            None => true,
        }
    }

    /// Insert a character at the cursor. Returns false when maxlength is reached.
    pub fn insert_char(&mut self, ch: char) -> bool {
        if !self.has_room() {
            return false;
        }
        let col = cmp::min(self.cursor_col, self.chars.len());
        self.chars.insert(col, ch);
        self.cursor_col = col + 1;
        true
    }

    /// Insert pasted text at the cursor. Line breaks are dropped, as in a single-line field,
    /// and anything past maxlength is cut off. Returns the number of characters inserted.
    pub fn insert_str(&mut self, text: &str) -> usize {
        let mut inserted = 0;
        for ch in text.chars().filter(|c| *c != '\n' && *c != '\r') {
            if !self.insert_char(ch) {
                break;
            }
            inserted += 1;
        }
        inserted
    }

    /// Delete the character before the cursor
    pub fn delete_char(&mut self) -> bool {
        let col = cmp::min(self.cursor_col, self.chars.len());
        if col == 0 {
            return false;
        }
        self.chars.remove(col - 1);
        self.cursor_col = col - 1;
        true
    }

    /// Delete the character under the cursor
    pub fn delete_forward(&mut self) -> bool {
        if self.cursor_col >= self.chars.len() {
            return false;
        }
        self.chars.remove(self.cursor_col);
        true
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_col = self.cursor_col.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_col < self.chars.len() {
            self.cursor_col += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_col = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_col = self.chars.len();
    }

    pub fn move_cursor_word_left(&mut self) {
        let mut pos = cmp::min(self.cursor_col, self.chars.len());

        // Skip whitespace to the left
        while pos > 0 && self.chars[pos - 1].is_whitespace() {
            pos -= 1;
        }

        // Skip word characters to the left
        while pos > 0 && is_word_char(self.chars[pos - 1]) {
            pos -= 1;
        }

        // Punctuation counts as a word of its own
        if pos == self.cursor_col && pos > 0 {
            pos -= 1;
        }

        self.cursor_col = pos;
    }

    pub fn move_cursor_word_right(&mut self) {
        let mut pos = self.cursor_col;

        // Skip word characters to the right
        while pos < self.chars.len() && is_word_char(self.chars[pos]) {
            pos += 1;
        }

        // Skip whitespace to the right
        while pos < self.chars.len() && self.chars[pos].is_whitespace() {
            pos += 1;
        }

        if pos == self.cursor_col && pos < self.chars.len() {
            pos += 1;
        }

        self.cursor_col = pos;
    }

    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// True when the draft holds something other than whitespace
    pub fn has_content(&self) -> bool {
        self.chars.iter().any(|c| !c.is_whitespace())
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn clear(&mut self) {
        self.chars.clear();
        self.cursor_col = 0;
        self.scroll_col = 0;
    }

    /// Return the draft and leave the editor empty
    pub fn take(&mut self) -> String {
        let text = self.text();
        self.clear();
        text
    }

    pub fn update_horizontal_scroll(&mut self, viewport_width: usize) {
        // Keep one cell for the cursor past the last character
        let effective_width = viewport_width.max(1);

        if self.cursor_col < self.scroll_col {
            self.scroll_col = self.cursor_col;
        } else if self.cursor_col >= self.scroll_col + effective_width {
            self.scroll_col = self.cursor_col + 1 - effective_width;
        }
    }

    /// Text visible in a viewport of `viewport_width` cells after horizontal scrolling
    pub fn visible_text(&self, viewport_width: usize) -> String {
        if self.scroll_col >= self.chars.len() {
            return String::new();
        }
        let end = cmp::min(self.scroll_col + viewport_width, self.chars.len());
        self.chars[self.scroll_col..end].iter().collect()
    }

    /// Cursor column relative to the start of the viewport
    pub fn visible_cursor_col(&self) -> usize {
        self.cursor_col.saturating_sub(self.scroll_col)
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

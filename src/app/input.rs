//! Text-input editing helpers (cursor movement, insertion, deletion).
//!
//! `cursor` counts characters, not bytes.

use super::App;

impl App {
    fn byte_index(&self, cursor: usize) -> usize {
        self.input
            .char_indices()
            .nth(cursor)
            .map(|(index, _)| index)
            .unwrap_or(self.input.len())
    }

    fn input_len(&self) -> usize {
        self.input.chars().count()
    }

    /// Insert a character at the current cursor position.
    pub(crate) fn insert_char(&mut self, ch: char) {
        if ch.is_control() {
            return;
        }
        let at = self.byte_index(self.cursor);
        self.input.insert(at, ch);
        self.cursor += 1;
    }

    /// Delete the character before the cursor.
    pub(crate) fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.input.remove(at);
    }

    /// Delete the character at the cursor.
    pub(crate) fn delete(&mut self) {
        if self.cursor >= self.input_len() {
            return;
        }
        let at = self.byte_index(self.cursor);
        self.input.remove(at);
    }

    pub(crate) fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub(crate) fn move_cursor_right(&mut self) {
        if self.cursor < self.input_len() {
            self.cursor += 1;
        }
    }

    pub(crate) fn move_cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub(crate) fn move_cursor_end(&mut self) {
        self.cursor = self.input_len();
    }

    /// Empty the input line and reset the cursor.
    pub(crate) fn take_input(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.input)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::test_app;

    #[test]
    fn edits_multibyte_input_by_character() {
        let mut app = test_app();
        for ch in "héllo".chars() {
            app.insert_char(ch);
        }
        app.move_cursor_left();
        app.move_cursor_left();
        app.backspace();
        assert_eq!(app.input, "hélo");
        app.move_cursor_home();
        app.delete();
        assert_eq!(app.input, "élo");
        app.move_cursor_end();
        app.insert_char('!');
        assert_eq!(app.input, "élo!");
        assert_eq!(app.take_input(), "élo!");
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn control_characters_are_ignored() {
        let mut app = test_app();
        app.insert_char('\t');
        app.insert_char('\u{7}');
        assert!(app.input.is_empty());
    }
}

use unicode_segmentation::UnicodeSegmentation;

use crate::calc_engine::Calculator;
use crate::session::{self, Command, Evaluation};

pub struct App {
    pub calculator: Calculator,
    pub max_input_len: usize,
    pub input: String,
    pub cursor_position: usize,
    pub input_scroll: usize,
    pub history: Vec<Evaluation>,
    pub cursor_history: usize,
    pub should_quit: bool,
    pub show_help: bool,
    pub help_scroll: usize,
    pub list_height: usize,
    pub item_start_indices: Vec<usize>,
    pub history_scroll: usize,
    pub scroll_to_bottom: bool,
}

impl App {
    pub fn new(calculator: Calculator, max_input_len: usize) -> Self {
        App {
            calculator,
            max_input_len,
            input: String::new(),
            cursor_position: 0,
            input_scroll: 0,
            history: Vec::new(),
            cursor_history: 0,
            should_quit: false,
            show_help: false,
            help_scroll: 0,
            list_height: 5,
            item_start_indices: Vec::new(),
            history_scroll: 0,
            scroll_to_bottom: false,
        }
    }

    /// Number of grapheme clusters in the input; the cursor moves in these units.
    pub fn input_len(&self) -> usize {
        self.input.graphemes(true).count()
    }

    pub fn adjust_input_scroll(&mut self, visible_width: usize) {
        let total = self.input_len();
        let cursor_pos = self.cursor_position;

        if cursor_pos < self.input_scroll {
            self.input_scroll = cursor_pos;
        }
        else if cursor_pos >= self.input_scroll + visible_width {
            self.input_scroll = cursor_pos - visible_width + 1;
        }

        if self.input_scroll > total.saturating_sub(visible_width) {
            self.input_scroll = total.saturating_sub(visible_width);
        }
    }

    pub fn submit(&mut self) {
        let input = self.input.clone();
        let command = match Command::parse(&input) {
            Some(command) => command,
            None => return,
        };

        match command {
            Command::Quit => {
                self.should_quit = true;
                return;
            }
            Command::Clear => {
                self.history.clear();
                self.cursor_history = 0;
                self.history_scroll = 0;
                self.clear_input();
                return;
            }
            Command::Help => {
                self.show_help = true;
                self.clear_input();
                return;
            }
            Command::Evaluate { expression, detailed } => {
                let evaluation =
                    session::evaluate(&self.calculator, expression, detailed, self.max_input_len);
                self.history.push(evaluation);
            }
        }

        self.cursor_history = self.history.len().saturating_sub(1);
        self.clear_input();
        self.scroll_to_bottom = true;
    }

    pub fn insert_char(&mut self, c: char) {
        let byte_idx = Self::char_index_to_byte_index(&self.input, self.cursor_position);
        self.input.insert(byte_idx, c);
        self.cursor_position = (self.cursor_position + 1).min(self.input_len());
    }

    pub fn delete_backward(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            self.delete_forward();
        }
    }

    pub fn delete_forward(&mut self) {
        let start = Self::char_index_to_byte_index(&self.input, self.cursor_position);
        let end = Self::char_index_to_byte_index(&self.input, self.cursor_position + 1);
        if start < end {
            self.input.drain(start..end);
        }
    }

    pub fn move_cursor(&mut self, direction: i32) {
        match direction {
            -1 => self.cursor_position = self.cursor_position.saturating_sub(1),
            1 => self.cursor_position = (self.cursor_position + 1).min(self.input_len()),
            _ => {}
        }
    }

    pub fn move_cursor_by_words(&mut self, direction: i32) {
        let graphemes: Vec<&str> = self.input.graphemes(true).collect();
        let is_space = |g: &str| g.chars().all(char::is_whitespace);
        let mut pos = self.cursor_position.min(graphemes.len());

        if direction < 0 {
            while pos > 0 && is_space(graphemes[pos - 1]) {
                pos -= 1;
            }

            while pos > 0 && !is_space(graphemes[pos - 1]) {
                pos -= 1;
            }
        } else {
            let len = graphemes.len();

            while pos < len && !is_space(graphemes[pos]) {
                pos += 1;
            }

            while pos < len && is_space(graphemes[pos]) {
                pos += 1;
            }
        }

        self.cursor_position = pos;
    }

    pub fn navigate_history(&mut self, direction: i32) {
        if direction < 0 && self.cursor_history > 0 {
            self.cursor_history -= 1;
        } else if direction > 0 && self.cursor_history < self.history.len().saturating_sub(1) {
            self.cursor_history += 1;
        }

        if self.cursor_history < self.history.len() {
            self.input = self.history[self.cursor_history].input.clone();
        } else {
            self.input.clear();
        }
        self.cursor_position = self.input_len();
        self.input_scroll = 0;
        self.scroll_to_bottom = false;
    }

    pub fn scroll_history(&mut self, direction: i32) {
        let step = self.list_height.saturating_sub(1);
        if direction < 0 {
            self.cursor_history = self.cursor_history.saturating_sub(step);
        } else {
            self.cursor_history = self.cursor_history.saturating_add(step)
                .min(self.history.len().saturating_sub(1));
        }

        if self.cursor_history < self.history.len() {
            self.input = self.history[self.cursor_history].input.clone();
        }
        self.cursor_position = self.input_len();
        self.input_scroll = 0;
        self.scroll_to_bottom = false;
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
        self.cursor_position = 0;
        self.input_scroll = 0;
    }

    /// Byte offset of the grapheme at `index`, or the end of `s`.
    pub fn char_index_to_byte_index(s: &str, index: usize) -> usize {
        s.grapheme_indices(true)
            .nth(index)
            .map(|(i, _)| i)
            .unwrap_or_else(|| s.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(Calculator::default(), 64)
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            app.insert_char(c);
        }
    }

    #[test]
    fn submit_records_history() {
        let mut app = app();
        type_str(&mut app, "details 2 ^ 10");
        app.submit();

        assert_eq!(app.history.len(), 1);
        let entry = &app.history[0];
        assert_eq!(entry.input, "2 ^ 10");
        assert!(entry.detailed_mode);
        assert_eq!(entry.result.as_ref().map(|a| a.result), Ok(1024.0));
        assert!(app.input.is_empty());
        assert!(app.scroll_to_bottom);
    }

    #[test]
    fn commands_do_not_enter_history() {
        let mut app = app();
        type_str(&mut app, "help");
        app.submit();
        assert!(app.show_help);
        assert!(app.history.is_empty());

        type_str(&mut app, "1 + 1");
        app.submit();
        type_str(&mut app, "clear");
        app.submit();
        assert!(app.history.is_empty());

        type_str(&mut app, "quit");
        app.submit();
        assert!(app.should_quit);
    }

    #[test]
    fn editing_moves_by_grapheme() {
        let mut app = app();
        type_str(&mut app, "12 + 3");
        app.move_cursor_by_words(-1);
        assert_eq!(app.cursor_position, 5);
        app.delete_backward();
        assert_eq!(app.input, "12 +3");
        app.cursor_position = 0;
        app.delete_forward();
        assert_eq!(app.input, "2 +3");
        app.move_cursor_by_words(1);
        assert_eq!(app.cursor_position, 2);
    }

    #[test]
    fn history_navigation_recalls_input() {
        let mut app = app();
        type_str(&mut app, "1 + 1");
        app.submit();
        type_str(&mut app, "2 * 2");
        app.submit();

        app.navigate_history(-1);
        assert_eq!(app.input, "1 + 1");
        app.navigate_history(1);
        assert_eq!(app.input, "2 * 2");
        assert_eq!(app.cursor_position, 5);
    }
}

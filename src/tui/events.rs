use crossterm::event::{
    self, DisableBracketedPaste, DisableFocusChange, DisableMouseCapture, EnableBracketedPaste,
    EnableFocusChange, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    MouseButton, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, size as terminal_size};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::time::Duration;
use tracing::{debug, info};

use crate::tui::App;
use crate::tui::app::Mode;
use crate::tui::error::TuiError;
use crate::tui::layout::Layout;
use crate::tags::DELIMITER;
use crate::utils::{has_primary_modifier, matches_key_event, parse_key_binding};

/// Guard that ensures terminal state is restored even on panic
/// If the terminal is left in raw mode or alternate screen, the user's terminal is unusable.
struct TerminalGuard {
    /// Track if we successfully entered raw mode
    raw_mode_enabled: bool,
    /// Track if we successfully entered alternate screen and enabled event reporting
    alternate_screen_enabled: bool,
}

impl TerminalGuard {
    /// Initialize terminal state and return a guard
    /// The guard will restore terminal state when dropped (even on panic)
    fn new() -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut guard = Self {
            raw_mode_enabled: true,
            alternate_screen_enabled: false,
        };
        execute!(
            io::stdout(),
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste,
            EnableFocusChange
        )?;
        guard.alternate_screen_enabled = true;
        Ok(guard)
    }

    /// Manually restore terminal state (called on normal exit)
    /// After calling this, the guard will do nothing on drop
    fn restore(&mut self) -> Result<(), TuiError> {
        if self.alternate_screen_enabled {
            execute!(
                io::stdout(),
                DisableFocusChange,
                DisableBracketedPaste,
                DisableMouseCapture,
                LeaveAlternateScreen
            )?;
            self.alternate_screen_enabled = false;
        }
        if self.raw_mode_enabled {
            disable_raw_mode()?;
            self.raw_mode_enabled = false;
        }
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Ignore errors in drop - we're already in a cleanup path
        if self.alternate_screen_enabled {
            let _ = execute!(
                io::stdout(),
                DisableFocusChange,
                DisableBracketedPaste,
                DisableMouseCapture,
                LeaveAlternateScreen
            );
        }
        if self.raw_mode_enabled {
            let _ = disable_raw_mode();
        }
    }
}

/// Run the editor until the quit binding is pressed; returns the app so the caller can read the field
pub fn run_event_loop(mut app: App) -> Result<App, TuiError> {
    // Check terminal size before entering alternate screen
    // This allows us to show a helpful error message in the normal terminal
    let (width, height) = terminal_size()?;
    let min_width_with_border = Layout::MIN_WIDTH + 2;
    let min_height_with_border = Layout::MIN_HEIGHT + 2;

    if width < min_width_with_border || height < min_height_with_border {
        return Err(TuiError::RenderError(format!(
            "Terminal size too small. Current: {}x{}, Minimum required: {}x{}. Please resize your terminal window.",
            width, height, min_width_with_border, min_height_with_border
        )));
    }

    // Setup terminal with guard to ensure restoration on panic
    let mut guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    info!("event loop started");

    loop {
        // Paste checks queued by the previous event run before anything else
        app.run_deferred();

        app.check_status_message_timeout();

        terminal.draw(|f| {
            let layout = Layout::calculate(f.area());
            crate::tui::render::render(f, &mut app, &layout);
        })?;

        if event::poll(Duration::from_millis(16))? {
            match event::read()? {
                Event::Key(key_event) => {
                    // Only process Press events (ignore Release events to prevent double-processing on Windows)
                    if key_event.kind == KeyEventKind::Press && handle_key_event(&mut app, key_event)? {
                        break; // Quit requested
                    }
                }
                Event::Paste(text) => {
                    debug!(chars = text.chars().count(), "bracketed paste");
                    app.paste(&text);
                }
                Event::Mouse(mouse) => {
                    if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                        app.click(mouse.column, mouse.row);
                    }
                }
                Event::FocusLost => app.blur(),
                Event::FocusGained | Event::Resize(_, _) => {
                    // The next draw picks up the new size
                }
            }
        }
    }

    // Restore terminal state explicitly (guard will also restore on drop, but this is cleaner)
    guard.restore()?;
    info!(value = %app.controller.field().value(), "event loop finished");

    Ok(app)
}

/// Handle one key press. Returns true when the app should quit.
pub fn handle_key_event(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    let keys = &app.config.key_bindings;
    let quit_binding = parse_key_binding(&keys.quit).map_err(TuiError::KeyBindingError)?;
    let help_binding = parse_key_binding(&keys.help).map_err(TuiError::KeyBindingError)?;
    let paste_binding = parse_key_binding(&keys.paste).map_err(TuiError::KeyBindingError)?;
    let clear_binding = parse_key_binding(&keys.clear).map_err(TuiError::KeyBindingError)?;

    if matches_key_event(key_event, &quit_binding) {
        app.submit();
        return Ok(true);
    }

    if matches_key_event(key_event, &help_binding) {
        app.toggle_help();
        return Ok(false);
    }

    if app.mode == Mode::Help {
        if key_event.code == KeyCode::Esc {
            app.toggle_help();
        }
        // Ignore all other keys while help is shown
        return Ok(false);
    }

    // Accelerator key focuses the surface from anywhere
    if let Some(access_key) = app.controller.surface().access_key() {
        if key_event.modifiers.contains(KeyModifiers::ALT)
            && key_event.code == KeyCode::Char(access_key)
        {
            app.focus_surface();
            return Ok(false);
        }
    }

    if !app.is_focused() {
        // The surface is the only stop in the tab order
        if matches!(key_event.code, KeyCode::Tab | KeyCode::BackTab) {
            app.focus_surface();
        }
        return Ok(false);
    }

    if matches_key_event(key_event, &paste_binding) {
        app.paste_from_clipboard();
        return Ok(false);
    }

    if matches_key_event(key_event, &clear_binding) {
        app.clear_tags();
        return Ok(false);
    }

    let word_motion = has_primary_modifier(key_event.modifiers);
    match key_event.code {
        // Commit keys are consumed: Tab and Shift+Tab keep focus, the delimiter is never typed
        KeyCode::Enter | KeyCode::Tab | KeyCode::BackTab => app.handle_commit_key(),
        KeyCode::Char(c) if c == DELIMITER => app.handle_commit_key(),
        KeyCode::Backspace => app.handle_backspace(),
        KeyCode::Delete => {
            app.draft.delete_forward();
        }
        KeyCode::Esc => app.blur(),
        KeyCode::Left if word_motion => app.draft.move_cursor_word_left(),
        KeyCode::Right if word_motion => app.draft.move_cursor_word_right(),
        KeyCode::Left => app.draft.move_cursor_left(),
        KeyCode::Right => app.draft.move_cursor_right(),
        KeyCode::Home => app.draft.move_cursor_home(),
        KeyCode::End => app.draft.move_cursor_end(),
        KeyCode::Char(c) if !key_event.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            if !app.draft.insert_char(c) {
                app.set_status_message("Input is at maxlength".to_string());
            }
        }
        _ => {}
    }

    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FormField;
    use crate::Config;

    fn focused_app(value: &str) -> App {
        let field = FormField::new("tags")
            .with_value(value)
            .with_attribute("autofocus", "")
            .with_attribute("accesskey", "g");
        App::new(Config::default(), field, "tags")
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE)).unwrap()
    }

    fn type_keys(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn delimiter_enter_and_tab_commit() {
        let mut app = focused_app("");
        type_keys(&mut app, "one,");
        type_keys(&mut app, "two");
        press(&mut app, KeyCode::Enter);
        type_keys(&mut app, "three");
        press(&mut app, KeyCode::Tab);
        type_keys(&mut app, "four");
        handle_key_event(&mut app, KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT)).unwrap();

        assert_eq!(app.controller.value(), vec!["one", "two", "three", "four"]);
        assert!(app.draft.is_empty());
        assert!(app.is_focused());
    }

    #[test]
    fn backspace_walks_back_through_tags() {
        let mut app = focused_app("a,b");
        type_keys(&mut app, "x");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.controller.value(), vec!["a", "b"]);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.controller.value(), vec!["a"]);
    }

    #[test]
    fn esc_blurs_and_keys_stop_reaching_draft() {
        let mut app = focused_app("");
        type_keys(&mut app, "kept");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.controller.value(), vec!["kept"]);

        type_keys(&mut app, "lost");
        assert!(app.draft.is_empty());

        press(&mut app, KeyCode::Tab);
        assert!(app.is_focused());
    }

    #[test]
    fn access_key_refocuses() {
        let mut app = focused_app("");
        app.blur();
        handle_key_event(&mut app, KeyEvent::new(KeyCode::Char('g'), KeyModifiers::ALT)).unwrap();
        assert!(app.is_focused());
        assert!(app.draft.is_empty());
    }

    #[test]
    fn quit_submits_pending_draft() {
        let mut app = focused_app("red");
        type_keys(&mut app, "blue");
        let quit = handle_key_event(&mut app, KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL)).unwrap();
        assert!(quit);
        assert_eq!(app.controller.field().value(), "red,blue");
    }

    #[test]
    fn help_mode_swallows_keys() {
        let mut app = focused_app("");
        press(&mut app, KeyCode::F(1));
        assert_eq!(app.mode, Mode::Help);
        type_keys(&mut app, "abc");
        assert!(app.draft.is_empty());
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Edit);
    }

    #[test]
    fn clear_binding_empties_tags() {
        let mut app = focused_app("a,b");
        handle_key_event(&mut app, KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL)).unwrap();
        assert!(app.controller.is_empty());
        assert_eq!(app.controller.field().value(), "");
    }
}

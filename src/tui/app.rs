use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::controller::TagController;
use crate::field::{FieldEvent, FormField};
use crate::tui::widgets::editor::DraftEditor;
use crate::tui::widgets::tag_input::{ControlHitMap, Hit};
use crate::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Edit,
    Help,
}

/// Whether keystrokes go to the input surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Surface,
    Outside,
}

/// Work postponed to the next turn of the event loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredTask {
    /// Commit the draft once pasted text has landed in it
    CommitPaste,
}

/// Notifications observed on the hidden form field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldActivity {
    pub inputs: usize,
    pub changes: usize,
}

#[derive(Debug, Default)]
pub struct StatusState {
    pub message: Option<String>,
    pub message_time: Option<Instant>,
}

pub struct App {
    pub config: Config,
    pub controller: TagController,
    pub draft: DraftEditor,
    pub focus: Focus,
    pub mode: Mode,
    pub deferred: VecDeque<DeferredTask>,
    /// Chip and control positions from the last frame
    pub hit_map: ControlHitMap,
    pub status: StatusState,
    activity: Rc<RefCell<FieldActivity>>,
}

impl App {
    /// Attach a tag controller to `field` and set up the draft editor from its mirrored attributes
    pub fn new(config: Config, mut field: FormField, control_id: &str) -> Self {
        let activity = Rc::new(RefCell::new(FieldActivity::default()));
        let observer = Rc::clone(&activity);
        field.subscribe(move |event, value| {
            let mut activity = observer.borrow_mut();
            match event {
                FieldEvent::Input => activity.inputs += 1,
                FieldEvent::Change => activity.changes += 1,
            }
            debug!(%event, value, "field notified");
        });

        let controller = TagController::new(field, control_id);
        let surface = controller.surface();
        let draft = DraftEditor::with_max_length(surface.max_length());
        let focus = if surface.autofocus() { Focus::Surface } else { Focus::Outside };
        info!(
            control = control_id,
            tags = controller.len(),
            surface = surface.id(),
            "tag editor attached"
        );

        Self {
            config,
            controller,
            draft,
            focus,
            mode: Mode::Edit,
            deferred: VecDeque::new(),
            hit_map: ControlHitMap::default(),
            status: StatusState::default(),
            activity,
        }
    }

    pub fn activity(&self) -> FieldActivity {
        *self.activity.borrow()
    }

    pub fn is_focused(&self) -> bool {
        self.focus == Focus::Surface
    }

    /// Turn the draft into tags if it holds anything besides whitespace, then clear it
    pub fn commit_draft(&mut self) -> bool {
        if !self.draft.has_content() {
            return false;
        }
        let text = self.draft.take();
        self.controller.add(&text);
        true
    }

    /// Enter, Tab or the delimiter key
    pub fn handle_commit_key(&mut self) {
        self.commit_draft();
    }

    /// Backspace deletes draft text, or the last tag once the draft is empty
    pub fn handle_backspace(&mut self) {
        if self.draft.is_empty() {
            if let Some(tag) = self.controller.remove_last() {
                self.set_status_message(format!("Removed \"{}\"", tag));
            }
        } else {
            self.draft.delete_char();
        }
    }

    pub fn focus_surface(&mut self) {
        self.focus = Focus::Surface;
    }

    /// The surface lost focus: pending text is committed
    pub fn blur(&mut self) {
        if self.focus == Focus::Surface {
            self.commit_draft();
        }
        self.focus = Focus::Outside;
    }

    /// Pasted text lands in the draft now; the commit check runs on the next tick
    pub fn paste(&mut self, text: &str) {
        if self.mode != Mode::Edit || !self.is_focused() {
            return;
        }
        let inserted = self.draft.insert_str(text);
        if inserted < text.chars().filter(|c| *c != '\n' && *c != '\r').count() {
            self.set_status_message("Paste truncated to maxlength".to_string());
        }
        self.deferred.push_back(DeferredTask::CommitPaste);
    }

    /// Paste from the system clipboard
    pub fn paste_from_clipboard(&mut self) {
        match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.get_text()) {
            Ok(text) => self.paste(&text),
            Err(e) => {
                warn!(error = %e, "clipboard unavailable");
                self.set_status_message(format!("Clipboard unavailable: {}", e));
            }
        }
    }

    /// Run everything deferred by the previous tick
    pub fn run_deferred(&mut self) {
        while let Some(task) = self.deferred.pop_front() {
            match task {
                DeferredTask::CommitPaste => {
                    if self.commit_draft() {
                        debug!("pasted text committed");
                    }
                }
            }
        }
    }

    /// Mouse click: chips remove their tag, the rest of the control focuses the input,
    /// anything outside blurs it
    pub fn click(&mut self, column: u16, row: u16) {
        // The help popup covers the control
        if self.mode != Mode::Edit {
            return;
        }
        match self.hit_map.hit(column, row) {
            Hit::Chip(tag) => {
                if self.controller.remove(&tag) {
                    self.set_status_message(format!("Removed \"{}\"", tag));
                }
            }
            Hit::Control => self.focus_surface(),
            Hit::Outside => self.blur(),
        }
    }

    /// Drop every tag
    pub fn clear_tags(&mut self) {
        self.controller.set_value("");
        self.set_status_message("All tags removed".to_string());
    }

    /// Commit pending text before the form value is read on exit
    pub fn submit(&mut self) -> String {
        self.commit_draft();
        self.controller.field().value().to_string()
    }

    pub fn toggle_help(&mut self) {
        self.mode = match self.mode {
            Mode::Help => Mode::Edit,
            Mode::Edit => Mode::Help,
        };
    }

    pub fn set_status_message(&mut self, message: String) {
        self.status.message = Some(message);
        self.status.message_time = Some(Instant::now());
    }

    pub fn clear_status_message(&mut self) {
        self.status.message = None;
        self.status.message_time = None;
    }

    /// Check if status message should be auto-cleared (after 3 seconds)
    pub fn check_status_message_timeout(&mut self) {
        const STATUS_MESSAGE_TIMEOUT_SECS: u64 = 3;
        if let Some(time) = self.status.message_time {
            if time.elapsed().as_secs() >= STATUS_MESSAGE_TIMEOUT_SECS {
                self.clear_status_message();
            }
        }
    }

    /// Key hints for the status bar
    pub fn key_hints(&self) -> Vec<String> {
        use crate::utils::format_key_binding_for_display as display;
        let keys = &self.config.key_bindings;
        let mut hints = Vec::new();
        if self.is_focused() {
            hints.push("Enter/Tab/,: add".to_string());
            hints.push("Backspace: remove last".to_string());
        } else {
            hints.push("Click or Tab: focus".to_string());
        }
        hints.push("Click tag: remove".to_string());
        hints.push(format!("{}: paste", display(&keys.paste)));
        hints.push(format!("{}: help", display(&keys.help)));
        hints.push(format!("{}: quit", display(&keys.quit)));
        hints
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Rect;
    use crate::tui::widgets::tag_input::layout_chips;

    fn app_with(value: &str) -> App {
        let field = FormField::new("tags")
            .with_value(value)
            .with_attribute("autofocus", "");
        App::new(Config::default(), field, "tags")
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.draft.insert_char(ch);
        }
    }

    #[test]
    fn commit_key_adds_and_clears_draft() {
        let mut app = app_with("");
        type_text(&mut app, " rust , tui ");
        app.handle_commit_key();
        assert_eq!(app.controller.value(), vec!["rust", "tui"]);
        assert!(app.draft.is_empty());
        assert_eq!(app.activity(), FieldActivity { inputs: 1, changes: 1 });
    }

    #[test]
    fn whitespace_draft_is_left_alone() {
        let mut app = app_with("");
        type_text(&mut app, "   ");
        app.handle_commit_key();
        assert!(app.controller.is_empty());
        assert_eq!(app.draft.text(), "   ");
        assert_eq!(app.activity(), FieldActivity::default());
    }

    #[test]
    fn backspace_on_empty_draft_removes_last_tag() {
        let mut app = app_with("a,b");
        app.handle_backspace();
        assert_eq!(app.controller.value(), vec!["a"]);
        assert_eq!(app.controller.field().value(), "a");
    }

    #[test]
    fn backspace_with_draft_edits_text_only() {
        let mut app = app_with("a,b");
        type_text(&mut app, "cd");
        app.handle_backspace();
        assert_eq!(app.draft.text(), "c");
        assert_eq!(app.controller.value(), vec!["a", "b"]);
    }

    #[test]
    fn blur_commits_pending_text() {
        let mut app = app_with("");
        assert!(app.is_focused());
        type_text(&mut app, "draft");
        app.blur();
        assert_eq!(app.controller.value(), vec!["draft"]);
        assert!(!app.is_focused());
    }

    #[test]
    fn paste_commits_on_next_tick() {
        let mut app = app_with("a");
        app.paste("b, c,a");
        assert_eq!(app.controller.value(), vec!["a"]);
        assert_eq!(app.draft.text(), "b, c,a");
        assert_eq!(app.deferred.len(), 1);

        app.run_deferred();
        assert_eq!(app.controller.value(), vec!["a", "b", "c"]);
        assert!(app.draft.is_empty());
        assert!(app.deferred.is_empty());
    }

    #[test]
    fn paste_is_ignored_without_focus() {
        let mut app = App::new(Config::default(), FormField::new("tags"), "tags");
        assert!(!app.is_focused());
        app.paste("x");
        assert!(app.deferred.is_empty());
        assert!(app.draft.is_empty());
    }

    #[test]
    fn clicks_remove_chips_and_move_focus() {
        let mut app = app_with("red,blue");
        let inner = Rect::new(1, 1, 30, 1);
        let (chip_areas, draft_area) = layout_chips(app.controller.chips(), inner);
        app.hit_map = ControlHitMap {
            control_area: Rect::new(0, 0, 32, 3),
            chip_areas,
            draft_area,
        };

        app.click(8, 1);
        assert_eq!(app.controller.value(), vec!["red"]);

        type_text(&mut app, "green");
        app.click(50, 20);
        assert!(!app.is_focused());
        assert_eq!(app.controller.value(), vec!["red", "green"]);

        app.click(20, 1);
        assert!(app.is_focused());
    }

    #[test]
    fn help_popup_blocks_clicks_and_paste() {
        let mut app = app_with("red,blue");
        let inner = Rect::new(1, 1, 30, 1);
        let (chip_areas, draft_area) = layout_chips(app.controller.chips(), inner);
        app.hit_map = ControlHitMap {
            control_area: Rect::new(0, 0, 32, 3),
            chip_areas,
            draft_area,
        };
        app.toggle_help();

        app.click(8, 1);
        app.paste("green");
        app.run_deferred();
        assert_eq!(app.controller.value(), vec!["red", "blue"]);
        assert!(app.draft.is_empty());
        assert_eq!(app.activity(), FieldActivity::default());

        app.toggle_help();
        app.click(8, 1);
        assert_eq!(app.controller.value(), vec!["red"]);
    }

    #[test]
    fn clear_always_notifies() {
        let mut app = app_with("");
        app.clear_tags();
        assert_eq!(app.activity(), FieldActivity { inputs: 1, changes: 1 });
        assert_eq!(app.controller.field().value(), "");
    }

    #[test]
    fn max_length_is_mirrored_to_draft() {
        let field = FormField::new("tags").with_attribute("maxlength", "3");
        let mut app = App::new(Config::default(), field, "tags");
        app.focus_surface();
        app.paste("abcdef");
        assert_eq!(app.draft.text(), "abc");
        assert!(app.status.message.is_some());
    }

    #[test]
    fn submit_commits_draft_first() {
        let mut app = app_with("red");
        type_text(&mut app, "blue");
        assert_eq!(app.submit(), "red,blue");
    }
}

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;

use kinetic_core::controller::{destination, PageChange};
use kinetic_core::{AppConfig, ScrollInteractionController, ScrollMode};

use crate::input::{Action, PointerInput};
use crate::theme::Theme;

/// Application state
pub struct App {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Active theme
    pub theme: Theme,
    /// Scroll engine for the pager
    pub controller: ScrollInteractionController,
    /// Number of pages in the pager
    pub pages: u32,
    /// Pager width in terminal columns
    pub viewport_cols: u16,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Status message
    pub status_message: Option<String>,
    /// Most recent page change reported by the engine
    last_page_change: Rc<Cell<Option<PageChange>>>,
}

impl App {
    pub fn new(config: Arc<AppConfig>, theme: Theme) -> Self {
        let mut scroll = config.scroll.clone();
        // Pages are always one viewport wide here
        scroll.page_size = 0.0;

        let mut controller = ScrollInteractionController::new(scroll);
        let last_page_change = Rc::new(Cell::new(None));
        let sink = Rc::clone(&last_page_change);
        controller.on_page_changed(move |change| sink.set(Some(*change)));

        Self {
            pages: config.tui.pages.max(1),
            config,
            theme,
            controller,
            viewport_cols: 0,
            should_quit: false,
            status_message: None,
            last_page_change,
        }
    }

    /// Offset units per terminal column
    pub fn cell_scale(&self) -> f64 {
        self.config.tui.cell_scale.max(f64::EPSILON)
    }

    /// Lay the pager out for a width of `cols` columns
    pub fn resize(&mut self, cols: u16) {
        if cols == self.viewport_cols {
            return;
        }
        let first_layout = self.viewport_cols == 0;
        let page = self.nearest_page();
        self.viewport_cols = cols;

        let viewport = f64::from(cols) * self.cell_scale();
        let content = viewport * f64::from(self.pages);
        self.controller.set_layout(viewport, content);

        // The first layout places the configured default page instead
        if first_layout {
            return;
        }

        // Keep the same page in view at the new width
        if !self.controller.is_dragging() && self.controller.viewport_size() > 0.0 {
            self.controller.scroll_to_page(page, false);
        }
    }

    /// Page under the viewport, or the one an animation is heading to
    pub fn nearest_page(&self) -> i64 {
        let offset = self
            .controller
            .animation_target()
            .unwrap_or_else(|| self.controller.rendered_offset());
        destination::page_index(offset, self.controller.page_size())
    }

    pub fn page_count(&self) -> i64 {
        i64::from(self.pages)
    }

    /// Rendered offset in columns
    pub fn offset_cells(&self) -> f64 {
        self.controller.rendered_offset() / self.cell_scale()
    }

    pub fn last_page_change(&self) -> Option<PageChange> {
        self.last_page_change.get()
    }

    /// Whether the next frame must come at the animation rate
    pub fn needs_fast_update(&self) -> bool {
        self.controller.is_animating() || self.controller.is_dragging()
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::NextPage => {
                let page = (self.nearest_page() + 1).min(self.page_count() - 1);
                self.controller.scroll_to_page(page, true);
            }
            Action::PrevPage => {
                let page = self.nearest_page() - 1;
                self.controller.scroll_to_page(page, true);
            }
            Action::FirstPage => self.controller.scroll_to_first_page(true),
            Action::LastPage => self.controller.scroll_to_last_page(true),
            Action::ToggleMode => self.toggle_mode(),
            Action::None => {}
        }
    }

    pub fn handle_pointer(&mut self, input: PointerInput, now: Instant) {
        match input {
            PointerInput::Down(point) => self.controller.pointer_down(point, now),
            PointerInput::Move(point) => self.controller.pointer_move(point, now),
            PointerInput::Up => self.controller.pointer_up(now),
            PointerInput::Cancel => self.controller.pointer_cancel(now),
            PointerInput::Wheel(delta) => self.controller.wheel_at(delta, now),
        }
    }

    /// Advance the engine one frame
    pub fn tick(&mut self, now: Instant) -> bool {
        self.controller.tick(now)
    }

    /// Switch between free scrolling and paging
    pub fn toggle_mode(&mut self) {
        let mut config = self.controller.config().clone();
        config.mode = match config.mode {
            ScrollMode::Free => ScrollMode::Paging,
            ScrollMode::Paging => ScrollMode::Free,
        };
        let mode = config.mode;
        self.controller.set_config(config);

        if mode == ScrollMode::Paging && !self.controller.is_dragging() {
            let page = self.nearest_page();
            self.controller.scroll_to_page(page, true);
        }

        tracing::debug!(?mode, "Scroll mode toggled");
        self.set_status(match mode {
            ScrollMode::Free => "Free scrolling",
            ScrollMode::Paging => "Paging",
        });
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinetic_core::{DefaultPage, InteractionState, Point};
    use std::time::Duration;

    fn app() -> App {
        let mut app = App::new(Arc::new(AppConfig::default()), Theme::default());
        app.resize(80);
        app
    }

    fn settle(app: &mut App, from: Instant) {
        let mut now = from;
        for _ in 0..200 {
            now += Duration::from_millis(16);
            if !app.tick(now) {
                break;
            }
        }
    }

    #[test]
    fn test_layout_from_columns() {
        let app = app();
        // 80 columns at 8 units each, 6 pages
        assert_eq!(app.controller.viewport_size(), 640.0);
        assert_eq!(app.controller.content_size(), 3840.0);
        assert_eq!(app.controller.bounds().min, -3200.0);
        assert_eq!(app.controller.page_size(), 640.0);
    }

    #[test]
    fn test_configured_page_size_is_ignored() {
        let mut config = AppConfig::default();
        config.scroll.page_size = 100.0;
        let mut app = App::new(Arc::new(config), Theme::default());
        app.resize(80);
        assert_eq!(app.controller.page_size(), 640.0);
    }

    #[test]
    fn test_next_and_prev_page() {
        let mut app = app();
        app.handle_action(Action::NextPage);
        assert_eq!(app.controller.animation_target(), Some(-640.0));

        // A second press while moving stacks on the target
        app.handle_action(Action::NextPage);
        assert_eq!(app.controller.animation_target(), Some(-1280.0));

        app.handle_action(Action::PrevPage);
        assert_eq!(app.controller.animation_target(), Some(-640.0));
    }

    #[test]
    fn test_prev_page_stops_at_first() {
        let mut app = app();
        app.handle_action(Action::PrevPage);
        assert_eq!(app.controller.animation_target(), Some(0.0));
    }

    #[test]
    fn test_last_page_reports_change() {
        let mut app = app();
        app.handle_action(Action::LastPage);
        settle(&mut app, Instant::now());
        assert_eq!(app.controller.current_page(), 5);
        assert_eq!(app.nearest_page(), 5);
        let change = app.last_page_change().unwrap();
        assert_eq!(change.new, 5);
    }

    #[test]
    fn test_resize_keeps_page() {
        let mut app = app();
        app.controller.scroll_to_page(2, false);
        app.resize(100);
        assert_eq!(app.controller.rendered_offset(), -1600.0);
        assert!((app.offset_cells() + 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_first_layout_opens_default_page() {
        let mut config = AppConfig::default();
        config.scroll.default_page = DefaultPage::Last;
        let mut app = App::new(Arc::new(config), Theme::default());
        app.resize(80);
        assert_eq!(app.controller.current_page(), 5);
        assert_eq!(app.controller.rendered_offset(), -3200.0);

        // Later resizes keep that page
        app.resize(100);
        assert_eq!(app.controller.current_page(), 5);
        assert_eq!(app.controller.rendered_offset(), -4000.0);
    }

    #[test]
    fn test_custom_default_page() {
        let mut config = AppConfig::default();
        config.scroll.default_page = DefaultPage::Custom(2);
        let mut app = App::new(Arc::new(config), Theme::default());
        app.resize(80);
        assert_eq!(app.nearest_page(), 2);
    }

    #[test]
    fn test_pointer_cancel_ends_drag() {
        let mut app = app();
        let base = Instant::now();
        app.handle_pointer(PointerInput::Down(Point::new(400.0, 80.0)), base);
        app.handle_pointer(
            PointerInput::Move(Point::new(300.0, 80.0)),
            base + Duration::from_millis(10),
        );
        app.handle_pointer(
            PointerInput::Move(Point::new(290.0, 80.0)),
            base + Duration::from_millis(20),
        );
        assert!(app.controller.is_dragging());

        app.handle_pointer(PointerInput::Cancel, base + Duration::from_millis(500));
        assert!(!app.controller.is_dragging());
        settle(&mut app, base + Duration::from_millis(500));
        assert_eq!(app.controller.state(), InteractionState::Idle);
        assert!(!app.needs_fast_update());
    }

    #[test]
    fn test_toggle_mode() {
        let mut app = app();
        app.toggle_mode();
        assert_eq!(app.controller.config().mode, ScrollMode::Free);
        assert_eq!(app.status_message.as_deref(), Some("Free scrolling"));

        app.controller.scroll_to_offset(-700.0, false);
        app.toggle_mode();
        assert_eq!(app.controller.config().mode, ScrollMode::Paging);
        // Back in paging, the view snaps to the nearest page
        assert_eq!(app.controller.animation_target(), Some(-640.0));
    }

    #[test]
    fn test_mouse_flick_and_quit() {
        let mut app = app();
        let base = Instant::now();
        app.handle_pointer(PointerInput::Down(Point::new(400.0, 80.0)), base);
        for i in 1..=6u64 {
            let x = 400.0 - 24.0 * i as f64;
            app.handle_pointer(
                PointerInput::Move(Point::new(x, 80.0)),
                base + Duration::from_millis(i * 10),
            );
        }
        assert!(app.needs_fast_update());
        app.handle_pointer(PointerInput::Up, base + Duration::from_millis(60));
        assert_eq!(app.controller.state(), InteractionState::Flinging);
        assert_eq!(app.controller.animation_target(), Some(-640.0));

        app.handle_action(Action::Quit);
        assert!(app.should_quit);
    }
}

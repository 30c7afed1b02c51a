//! Operator notifications for `provcheck watch`.
//!
//! With the `tui` feature a verdict is shown as a centered panel in the
//! terminal's alternate screen, closed by any key or after
//! `POPUP_TIMEOUT`. Ctrl+C while the panel is up stops the watcher.
//! `--headless` (or a terminal that cannot host the panel) only logs the
//! verdict.

use provcheck_core::{Dismissal, NotificationRequest, Notifier};

pub enum OperatorNotifier {
    Log(LogNotifier),
    #[cfg(feature = "tui")]
    Popup(popup::PopupNotifier),
}

impl OperatorNotifier {
    #[cfg(feature = "tui")]
    pub fn new(headless: bool) -> Self {
        if headless {
            Self::Log(LogNotifier)
        } else {
            Self::Popup(popup::PopupNotifier::new(
                provcheck_core::notification::POPUP_TIMEOUT,
            ))
        }
    }

    #[cfg(not(feature = "tui"))]
    pub fn new(_headless: bool) -> Self {
        Self::Log(LogNotifier)
    }

    /// Replace a failing popup with plain logging.
    pub fn degrade(&mut self) {
        *self = Self::Log(LogNotifier);
    }

    pub fn is_headless(&self) -> bool {
        matches!(self, Self::Log(_))
    }
}

impl Notifier for OperatorNotifier {
    type Error = anyhow::Error;

    fn show(&mut self, request: &NotificationRequest) -> anyhow::Result<Dismissal> {
        match self {
            Self::Log(n) => n.show(request),
            #[cfg(feature = "tui")]
            Self::Popup(n) => n.show(request),
        }
    }
}

pub struct LogNotifier;

impl Notifier for LogNotifier {
    type Error = anyhow::Error;

    fn show(&mut self, request: &NotificationRequest) -> anyhow::Result<Dismissal> {
        tracing::info!(status = %request.status, "{}", request.message);
        Ok(Dismissal::Closed)
    }
}

#[cfg(feature = "tui")]
pub mod popup {
    use std::io::stdout;
    use std::time::{Duration, Instant};

    use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
    use crossterm::terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
    };
    use crossterm::ExecutableCommand;
    use ratatui::backend::CrosstermBackend;
    use ratatui::layout::Rect;
    use ratatui::style::{Color, Modifier, Style};
    use ratatui::text::{Line, Span};
    use ratatui::widgets::{Block, Clear, Paragraph};
    use ratatui::Terminal;

    use provcheck_core::{Dismissal, NotificationRequest, Notifier, StatusColor};

    use crate::log_gate;

    /// Roughly a 400x200 px window in terminal cells.
    pub const POPUP_WIDTH: u16 = 40;
    pub const POPUP_HEIGHT: u16 = 9;

    pub struct PopupNotifier {
        timeout: Duration,
    }

    impl PopupNotifier {
        pub fn new(timeout: Duration) -> Self {
            Self { timeout }
        }

        fn show_inner(&self, request: &NotificationRequest) -> anyhow::Result<Dismissal> {
            let backend = CrosstermBackend::new(stdout());
            let mut terminal = Terminal::new(backend)?;
            terminal.draw(|f| draw_popup(f, request))?;

            let deadline = Instant::now() + self.timeout;
            loop {
                let remaining = deadline.saturating_duration_since(Instant::now());
                if remaining.is_zero() {
                    return Ok(Dismissal::Closed);
                }
                if event::poll(remaining)? {
                    match event::read()? {
                        Event::Key(key) => {
                            if let Some(dismissal) = dismissal_for(&key) {
                                return Ok(dismissal);
                            }
                        }
                        Event::Resize(..) => {
                            terminal.draw(|f| draw_popup(f, request))?;
                        }
                        _ => {}
                    }
                }
            }
        }
    }

    impl Notifier for PopupNotifier {
        type Error = anyhow::Error;

        fn show(&mut self, request: &NotificationRequest) -> anyhow::Result<Dismissal> {
            let held_logs = log_gate::hold();
            enable_raw_mode()?;
            stdout().execute(EnterAlternateScreen)?;

            let result = self.show_inner(request);

            // Always restore terminal state, even if drawing failed.
            let _ = disable_raw_mode();
            let _ = stdout().execute(LeaveAlternateScreen);
            drop(held_logs);

            result
        }
    }

    /// Raw mode turns Ctrl+C into an ordinary key event.
    fn dismissal_for(key: &KeyEvent) -> Option<Dismissal> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            Some(Dismissal::Interrupted)
        } else {
            Some(Dismissal::Closed)
        }
    }

    fn draw_popup(f: &mut ratatui::Frame<'_>, request: &NotificationRequest) {
        let panel = centered_rect(f.area(), POPUP_WIDTH, POPUP_HEIGHT);
        f.render_widget(Clear, panel);
        f.render_widget(
            Block::default().style(Style::default().bg(Color::Black)),
            panel,
        );

        let style = Style::default()
            .fg(status_color(request.color))
            .add_modifier(Modifier::BOLD);
        let text = Paragraph::new(Line::from(Span::styled(request.message.as_str(), style)))
            .centered();
        f.render_widget(text, centered_rect(panel, panel.width, 1));
    }

    fn status_color(color: StatusColor) -> Color {
        match color {
            StatusColor::Green => Color::Green,
            StatusColor::Red => Color::Red,
        }
    }

    /// `width` x `height` rectangle centered in `area`, clamped to fit.
    pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
        let width = width.min(area.width);
        let height = height.min(area.height);
        Rect::new(
            area.x + (area.width - width) / 2,
            area.y + (area.height - height) / 2,
            width,
            height,
        )
    }

}

use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    style::Style,
    text::Line,
    widgets::Paragraph,
};
use std::io;
use std::time::Duration;

use crate::console::controller::NavigationController;
use crate::console::error::ConsoleError;
use crate::console::menu::{self, MenuHits, MenuTarget};
use crate::console::registry::ids;
use crate::console::theme::Theme;

const STARTUP_ATTEMPTS: u32 = 5;
const STARTUP_BACKOFF: Duration = Duration::from_millis(50);

const HEADER_HEIGHT: u16 = 2;
const HINT: &str = "←/→ tracker · Tab panel · 1-5 panel · l keys · q quit";

/// Owns the event loop: dispatches keys and mouse clicks to the navigation
/// controller and redraws the menu header plus the active panel.
pub struct Shell {
    controller: NavigationController,
    theme: Theme,
    hits: MenuHits,
    status_line: Option<String>,
}

impl Shell {
    pub fn new(controller: NavigationController, theme: Theme) -> Self {
        Self {
            controller,
            theme,
            hits: MenuHits::default(),
            status_line: None,
        }
    }

    /// Perform the initial activation, set up the terminal and run the loop
    /// until the operator quits.
    pub async fn run(mut self) -> Result<()> {
        // The first activation may race the store becoming usable, so retry
        // with backoff instead of assuming a fixed warm-up delay.
        self.activate_with_backoff(ids::KEY_SETUP).await?;

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal).await;

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    async fn activate_with_backoff(&mut self, id: &str) -> Result<()> {
        let mut delay = STARTUP_BACKOFF;
        for attempt in 1..=STARTUP_ATTEMPTS {
            match self.controller.activate(id).await {
                Ok(()) => return Ok(()),
                Err(err) if attempt == STARTUP_ATTEMPTS => {
                    return Err(err).with_context(|| {
                        format!("startup activation of {id} failed after {attempt} attempts")
                    });
                }
                Err(err) => {
                    log::warn!("startup activation attempt {attempt} failed: {err}");
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
            }
        }
        unreachable!("loop returns on the final attempt")
    }

    async fn event_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            let frame_start = std::time::Instant::now();

            // Drain all pending events first for minimal input latency.
            let mut should_quit = false;
            while event::poll(Duration::from_millis(0))? {
                match event::read()? {
                    Event::Key(key) => {
                        if !self.handle_key(key).await? {
                            should_quit = true;
                            break;
                        }
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse).await?,
                    _ => {}
                }
            }
            if should_quit {
                break;
            }

            terminal.draw(|frame| self.render(frame))?;

            // Sleep for the remainder of a 16ms frame (60 FPS)
            let elapsed = frame_start.elapsed();
            if let Some(remaining) = Duration::from_millis(16).checked_sub(elapsed) {
                tokio::time::sleep(remaining).await;
            }
        }
        Ok(())
    }

    /// Returns false when the operator asked to quit.
    async fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        if key.kind != KeyEventKind::Press {
            return Ok(true);
        }
        if key.code == KeyCode::Char('q') {
            if key.modifiers.contains(KeyModifiers::CONTROL) || key.modifiers.is_empty() {
                return Ok(false);
            }
        }

        match key.code {
            KeyCode::Left => {
                let result = self.controller.prev();
                self.report(result);
            }
            KeyCode::Right => {
                let result = self.controller.next();
                self.report(result);
            }
            KeyCode::Tab => self.cycle_panel(1).await,
            KeyCode::BackTab => self.cycle_panel(-1).await,
            KeyCode::Char('l') => self.activate(ids::KEY_SETUP).await,
            KeyCode::Char(c @ '1'..='5') => {
                let index = c as usize - '1' as usize;
                let (id, _) = ids::PANELS[index];
                self.activate(id).await;
            }
            _ => {}
        }
        Ok(true)
    }

    async fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<()> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Ok(());
        }
        match self.hits.hit(mouse.column, mouse.row) {
            Some(MenuTarget::Lock) => self.activate(ids::KEY_SETUP).await,
            Some(MenuTarget::PrevTracker) => {
                let result = self.controller.prev();
                self.report(result);
            }
            Some(MenuTarget::NextTracker) => {
                let result = self.controller.next();
                self.report(result);
            }
            Some(MenuTarget::Panel(id)) => self.activate(id).await,
            None => {}
        }
        Ok(())
    }

    async fn activate(&mut self, id: &str) {
        let result = self.controller.activate(id).await;
        self.report(result);
    }

    /// Tab order over all panels, key setup included.
    async fn cycle_panel(&mut self, step: isize) {
        let ring: Vec<&str> = std::iter::once(ids::KEY_SETUP)
            .chain(ids::PANELS.iter().map(|&(id, _)| id))
            .collect();
        let len = ring.len() as isize;
        let current = self
            .controller
            .active_id()
            .and_then(|active| ring.iter().position(|&id| id == active))
            .map(|pos| pos as isize)
            .unwrap_or(-step);
        let next = (current + step).rem_euclid(len) as usize;
        self.activate(ring[next]).await;
    }

    /// Runtime navigation errors are non-fatal: show them on the status line
    /// and leave the controller state as it was.
    fn report(&mut self, result: Result<(), ConsoleError>) {
        match result {
            Ok(()) => self.status_line = None,
            Err(err) => {
                log::warn!("navigation error: {err}");
                self.status_line = Some(err.to_string());
            }
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let full = frame.area();
        let menu_area = Rect {
            height: full.height.min(1),
            ..full
        };
        let status_area = Rect {
            y: full.y + 1,
            height: full.height.saturating_sub(1).min(1),
            ..full
        };
        let content_area = Rect {
            y: full.y + HEADER_HEIGHT,
            height: full.height.saturating_sub(HEADER_HEIGHT),
            ..full
        };

        let view = menu::menu_view(
            self.controller.active_id(),
            self.controller.is_unlocked(),
            &self.controller.selected_label(),
        );
        menu::render_menu(&view, frame, menu_area, &self.theme, &mut self.hits);

        let status = match &self.status_line {
            Some(message) => {
                Line::styled(message.clone(), Style::default().fg(self.theme.peach))
            }
            None => Line::styled(HINT, Style::default().fg(self.theme.overlay1)),
        };
        frame.render_widget(Paragraph::new(status), status_area);

        match self.controller.active_id() {
            Some(id) => {
                if let Ok(widget) = self.controller.registry().get(id) {
                    widget.render(frame, content_area, &self.theme);
                }
            }
            None => {
                let placeholder =
                    Paragraph::new(Line::styled("starting…", Style::default().fg(self.theme.overlay1)));
                frame.render_widget(placeholder, content_area);
            }
        }
    }
}

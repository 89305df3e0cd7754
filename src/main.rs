mod config;
mod error;
mod games;
mod input;
mod menu;
mod rng;
mod time;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};
use tracing::{error, info};

use config::Config;
use games::{create_game, AppState};
use input::{pixel_to_cell, ClickState, InputEvent};
use menu::MenuAction;
use rng::Rng;
use time::{GameTime, TICKS_PER_SEC};

struct App {
    state: AppState,
    config: Config,
    /// Shown on the menu, e.g. when a run failed to start.
    notice: Option<String>,
}

impl App {
    fn new(config: Config) -> Self {
        Self {
            state: AppState::Menu,
            config,
            notice: None,
        }
    }

    fn handle_input(&mut self, event: &InputEvent) {
        match &mut self.state {
            AppState::Menu => match menu::handle_input(&mut self.config, event) {
                MenuAction::Changed => config::save(&self.config),
                MenuAction::Start => self.start(),
                MenuAction::None => {}
            },
            AppState::Playing { game } => {
                game.handle_input(event);
            }
        }
        self.return_if_finished();
    }

    fn start(&mut self) {
        let mut rng = match self.config.seed {
            Some(seed) => Rng::new(seed),
            None => Rng::from_clock(),
        };
        match create_game(&self.config, &mut rng) {
            Ok(game) => {
                info!(config = ?self.config, "run started");
                self.notice = None;
                self.state = AppState::Playing { game };
            }
            Err(e) => {
                error!(error = %e, "could not start a run");
                self.notice = Some(format!("Could not start: {}", e));
            }
        }
    }

    fn tick(&mut self, ticks: u32) {
        if let AppState::Playing { game } = &mut self.state {
            game.tick(ticks);
        }
    }

    fn return_if_finished(&mut self) {
        if let AppState::Playing { game } = &self.state {
            if game.is_finished() {
                self.state = AppState::Menu;
            }
        }
    }
}

/// Map a mouse position to a terminal cell via the grid container's rect.
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let window = web_sys::window()?;
    let document = window.document()?;

    // DomBackend renders the grid as a <div> inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let col = pixel_to_cell(mouse_x as f64 - rect.left(), rect.width(), cs.terminal_cols)?;
    let row = pixel_to_cell(mouse_y as f64 - rect.top(), rect.height(), cs.terminal_rows)?;
    Some((col, row))
}

fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();
    #[cfg(target_arch = "wasm32")]
    tracing_wasm::set_as_global_default();

    let app = Rc::new(RefCell::new(App::new(config::load())));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    // Mouse/touch click handler
    terminal.on_mouse_event({
        let app = app.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }

            let cs = click_state.borrow();
            if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                return;
            }
            let Some((col, row)) = dom_pixel_to_cell(mouse_event.x, mouse_event.y, &cs) else {
                return;
            };
            let hit = cs.hit_test(col, row);
            drop(cs);

            if let Some(action_id) = hit {
                app.borrow_mut().handle_input(&InputEvent::Click(action_id));
            }
        }
    });

    // Keyboard handler
    terminal.on_key_event({
        let app = app.clone();
        move |key_event| {
            let event = match key_event.code {
                KeyCode::Char(c) => InputEvent::Key(c),
                KeyCode::Enter => InputEvent::Enter,
                KeyCode::Backspace => InputEvent::Backspace,
                KeyCode::Esc => InputEvent::Escape,
                _ => return,
            };
            app.borrow_mut().handle_input(&event);
        }
    });

    let game_time = RefCell::new(GameTime::new(TICKS_PER_SEC));
    terminal.draw_web({
        let click_state = click_state.clone();
        move |f| {
            let ticks = game_time.borrow_mut().update(now_ms());
            if ticks > 0 {
                app.borrow_mut().tick(ticks);
            }

            let size = f.area();
            {
                let mut cs = click_state.borrow_mut();
                cs.terminal_cols = size.width;
                cs.terminal_rows = size.height;
                cs.clear_targets();
            }

            let app = app.borrow();
            match &app.state {
                AppState::Menu => {
                    menu::render(&app.config, app.notice.as_deref(), f, size, &click_state)
                }
                AppState::Playing { game } => game.render(f, size, &click_state),
            }
        }
    });

    Ok(())
}

//! Beck's Math Safari entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    use wasm_bindgen::prelude::*;
    use web_sys::{Element, MouseEvent};

    use math_safari::Game;
    use math_safari::speech::WebSpeaker;
    use math_safari::ui::{Screen, html, parse_action};

    /// Browser-side state around the game
    struct App {
        game: Game,
        root: Element,
        last_time: f64,
        rendered_revision: Option<u64>,
    }

    impl App {
        /// Advance the virtual clock by real elapsed time
        fn update(&mut self, time: f64) {
            let dt_ms = if self.last_time > 0.0 {
                (time - self.last_time).max(0.0)
            } else {
                0.0
            };
            self.last_time = time;
            // Cap long gaps (background tab) so a single frame can't burn every try
            let dt = Duration::from_secs_f64((dt_ms / 1000.0).min(1.0));
            self.game.advance(dt);
        }

        fn render(&mut self) {
            let revision = self.game.revision();
            if self.rendered_revision == Some(revision) {
                return;
            }
            let screen = Screen::build(self.game.session(), self.game.settings());
            self.root.set_inner_html(&html::render(&screen));
            self.rendered_revision = Some(revision);
        }

        fn on_action(&mut self, action: &str) {
            match parse_action(action, self.game.session()) {
                Some(intent) => {
                    self.game.dispatch(intent);
                    self.render();
                }
                None => log::warn!("Unknown action: {}", action),
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Beck's Math Safari starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");
        let root = document.get_element_by_id("app").expect("no #app element");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let seed = js_sys::Date::now() as u64;
        let game = Game::with_seed(seed, Box::new(WebSpeaker::new()));
        log::info!("Game initialized with seed: {}", seed);

        let app = Rc::new(RefCell::new(App {
            game,
            root,
            last_time: 0.0,
            rendered_revision: None,
        }));
        app.borrow_mut().render();

        setup_click_handler(app.clone());
        request_animation_frame(app);

        log::info!("Beck's Math Safari running!");
    }

    /// One delegated listener for every `data-action` element
    fn setup_click_handler(app: Rc<RefCell<App>>) {
        let root = app.borrow().root.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            let Ok(Some(el)) = target.closest("[data-action]") else { return };
            let Some(action) = el.get_attribute("data-action") else { return };
            if el.has_attribute("disabled") {
                return;
            }
            app.borrow_mut().on_action(&action);
        });
        let _ = root.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            a.update(time);
            a.render();
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod native_game {
    use std::io::{self, BufRead, Write};
    use std::sync::mpsc::{self, RecvTimeoutError};
    use std::thread;
    use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

    use math_safari::Game;
    use math_safari::speech::LogSpeaker;
    use math_safari::ui::{Screen, parse_action, text};

    /// Poll interval for stdin and the clock
    const POLL: Duration = Duration::from_millis(100);

    pub fn run() {
        let seed = std::env::args()
            .nth(1)
            .and_then(|arg| arg.parse().ok())
            .unwrap_or_else(|| {
                SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_nanos() as u64)
                    .unwrap_or(0)
            });
        log::info!("Game initialized with seed: {}", seed);

        let mut game = Game::with_seed(seed, Box::new(LogSpeaker));

        // stdin blocks, so read it on its own thread
        let (tx, rx) = mpsc::channel::<String>();
        thread::spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        });

        let mut last = Instant::now();
        let mut shown: Option<(Screen, u8)> = None;
        loop {
            let now = Instant::now();
            game.advance(now - last);
            last = now;

            // Redraw on changes, but show the countdown only at a few checkpoints
            let key = (quiet_screen(&game), countdown_mark(game.session().time_left));
            if shown.as_ref() != Some(&key) {
                draw(&game);
                shown = Some(key);
            }

            match rx.recv_timeout(POLL) {
                Ok(line) => {
                    let line = line.trim();
                    if matches!(line, "q" | "quit" | "exit") {
                        break;
                    }
                    let screen = Screen::build(game.session(), game.settings());
                    let action = match line.parse::<usize>() {
                        Ok(n) if n >= 1 => screen.actions().get(n - 1).map(|a| a.to_string()),
                        _ => Some(line.to_string()),
                    };
                    match action.and_then(|a| parse_action(&a, game.session())) {
                        Some(intent) => game.dispatch(intent),
                        None => {
                            log::warn!("Unknown command: {}", line);
                            shown = None;
                        }
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        game.teardown();
        log::info!("Goodbye!");
    }

    /// The current screen without its timer line
    fn quiet_screen(game: &Game) -> Screen {
        let mut screen = Screen::build(game.session(), game.settings());
        if let Screen::Playing(view) = &mut screen {
            view.timer = None;
        }
        screen
    }

    /// Same value for every second between checkpoints
    fn countdown_mark(time_left: u8) -> u8 {
        if time_left <= 5 { time_left } else { 6 + time_left / 10 }
    }

    fn draw(game: &Game) {
        let screen = Screen::build(game.session(), game.settings());
        let mut stdout = io::stdout().lock();
        let _ = writeln!(stdout, "\n{}", text::render(&screen));
        let _ = write!(stdout, "> ");
        let _ = stdout.flush();
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Beck's Math Safari (terminal) starting...");
    log::info!("Type a number to choose, or q to quit. Build for wasm32 for the browser version.");

    native_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

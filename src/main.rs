//! Retro Rush entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent,
        TouchEvent,
    };

    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use retro_rush::assets::Assets;
    use retro_rush::messages::MessageTicker;
    use retro_rush::renderer::Renderer;
    use retro_rush::sim::{GamePhase, GameState, TickInput, tick};
    use retro_rush::vehicles::CATALOG;
    use retro_rush::{Profile, Settings};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: Renderer,
        profile: Profile,
        settings: Settings,
        messages: MessageTicker,
        /// Shared direction flag, overwritten by input handlers between
        /// ticks (last write wins) and sampled once per tick
        input_dir: i8,
        /// UI-side RNG so flavor messages never disturb sim determinism
        ui_rng: Pcg32,
        /// Invalidates countdown timeouts from an abandoned pause/restart
        countdown_gen: u32,
    }

    impl Game {
        fn new(seed: u64, renderer: Renderer) -> Self {
            Self {
                state: GameState::new(seed, 0),
                renderer,
                profile: Profile::load(),
                settings: Settings::load(),
                messages: MessageTicker::new(),
                input_dir: 0,
                ui_rng: Pcg32::seed_from_u64(seed ^ 0x5eed_cafe),
                countdown_gen: 0,
            }
        }

        /// Run one frame: tick if running, then draw and refresh the HUD
        fn frame(&mut self) -> bool {
            let mut ended = false;
            if self.state.phase == GamePhase::Running {
                let input = TickInput {
                    steer: self.input_dir,
                };
                let outcome = tick(&mut self.state, &input);
                if self.settings.messages_enabled {
                    self.messages.update(
                        self.state.score,
                        self.profile.high_score,
                        &mut self.ui_rng,
                    );
                }
                ended = outcome.terminal;
            }
            self.renderer
                .render(&self.state, &self.messages, self.settings.show_speed);
            ended
        }

        /// Session ended by a collision: persist and show the overlay
        fn on_game_over(&mut self) {
            let score = self.state.score;
            let record = self.profile.record_session(score);
            self.profile.save();
            self.messages.clear();
            if record {
                log::info!("session over with a new record: {score}");
            } else {
                log::info!("session over: {score}");
            }

            set_text("finalScore", &score.to_string());
            set_display("gameOverBox", "flex");
            set_display("pauseBtn", "none");
            set_display("bgPauseIndicator", "none");
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Retro Rush starting...");

        let canvas: HtmlCanvasElement = document()
            .get_element_by_id("game")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .expect("no 2d context")
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let assets = Assets::load().expect("failed to create image elements");
        let renderer = Renderer::new(ctx, assets);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, renderer)));
        log::info!("Initialized with seed: {seed}");

        {
            let g = game.borrow();
            set_text(
                "bestText",
                &format!("Top Record: {}", g.profile.high_score),
            );
            set_text(
                "musicToggle",
                music_label(g.settings.music_enabled),
            );
        }

        setup_input_handlers(&canvas, game.clone());
        setup_menu_buttons(game.clone());
        setup_auto_pause(game.clone());

        set_display("startBox", "flex");
        request_animation_frame(game);

        log::info!("Retro Rush running!");
    }

    // ---- frame loop -------------------------------------------------------

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let ended = {
            let mut g = game.borrow_mut();
            let ended = g.frame();
            if ended {
                g.on_game_over();
            }
            ended
        };
        if !ended {
            update_hud(&game.borrow());
        }
        request_animation_frame(game);
    }

    fn update_hud(g: &Game) {
        set_text("scoreText", &g.state.score.to_string());

        // Power bar: drains while active, refills as the cooldown clears
        match g.state.power.gauge() {
            Some((fraction, charging)) => {
                set_style("powerFill", "width", &format!("{:.1}%", fraction * 100.0));
                set_style(
                    "powerFill",
                    "background",
                    if charging { "#666" } else { "var(--neon-blue)" },
                );
            }
            None => set_style("powerFill", "width", "0%"),
        }

        let label = match g.state.power.active {
            Some(kind) if kind == retro_rush::sim::PowerUpKind::Shield && !g.state.player.shield => {
                "POWER: SHIELD (USED)".to_string()
            }
            Some(kind) => format!("POWER: {}", kind.label()),
            None => String::new(),
        };
        set_text("powerText", &label);
    }

    // ---- session flow -----------------------------------------------------

    fn start_session(game: &Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            let vehicle = g.state.vehicle;
            if !g.profile.is_unlocked(vehicle) {
                // The grid never offers locked cars; keep the guard anyway
                log::warn!("rejected locked vehicle {vehicle}");
                return;
            }
            g.input_dir = 0;
            g.messages.clear();
            g.state.start();
        }
        set_display("startBox", "none");
        set_display("gameOverBox", "none");
        set_display("carSelectBox", "none");
        set_display("pauseMenu", "none");
        set_display("bgPauseIndicator", "none");
        set_display("pauseBtn", "flex");
        run_countdown(game.clone());
    }

    /// 3-2-1-GO gate before every Running entry, on wall-clock timers
    fn run_countdown(game: Rc<RefCell<Game>>) {
        let generation = {
            let mut g = game.borrow_mut();
            g.countdown_gen += 1;
            g.countdown_gen
        };

        set_display("countdownOverlay", "flex");
        for (step, label) in ["3", "2", "1", "GO!"].iter().enumerate() {
            let game = game.clone();
            set_timeout((step as i32) * 1000, move || {
                if game.borrow().countdown_gen == generation {
                    set_countdown_number(label);
                }
            });
        }
        let finish = game.clone();
        set_timeout(4000, move || {
            let mut g = finish.borrow_mut();
            if g.countdown_gen != generation {
                return;
            }
            set_display("countdownOverlay", "none");
            g.state.begin_running();
        });
    }

    fn toggle_pause(game: &Rc<RefCell<Game>>) {
        let phase = game.borrow().state.phase;
        match phase {
            GamePhase::Running => {
                game.borrow_mut().state.pause(false);
                set_display("pauseMenu", "flex");
            }
            GamePhase::Paused { .. } => resume(game),
            _ => {}
        }
    }

    fn resume(game: &Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            if !matches!(g.state.phase, GamePhase::Paused { .. }) {
                return;
            }
            g.state.resume();
        }
        set_display("pauseMenu", "none");
        set_display("bgPauseIndicator", "none");
        run_countdown(game.clone());
    }

    // ---- DOM wiring -------------------------------------------------------

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Keyboard steer + pause
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                match event.key().as_str() {
                    "ArrowLeft" | "a" => game.borrow_mut().input_dir = -1,
                    "ArrowRight" | "d" => game.borrow_mut().input_dir = 1,
                    "Escape" | "p" => toggle_pause(&game),
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if matches!(event.key().as_str(), "ArrowLeft" | "a" | "ArrowRight" | "d") {
                    game.borrow_mut().input_dir = 0;
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch: left half steers left, right half steers right
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let half = web_sys::window()
                        .and_then(|w| w.inner_width().ok())
                        .and_then(|v| v.as_f64())
                        .unwrap_or(0.0)
                        / 2.0;
                    game.borrow_mut().input_dir =
                        if (touch.client_x() as f64) < half { -1 } else { 1 };
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                game.borrow_mut().input_dir = 0;
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse halves mirror the touch controls
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = canvas_clone.get_bounding_client_rect();
                let x = event.client_x() as f64 - rect.left();
                let half = canvas_clone.width() as f64 / 2.0;
                game.borrow_mut().input_dir = if x < half { -1 } else { 1 };
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input_dir = 0;
            });
            let _ = window
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_menu_buttons(game: Rc<RefCell<Game>>) {
        // Start box -> car selection
        {
            let game = game.clone();
            on_click("startBtn", move || {
                set_display("startBox", "none");
                set_display("gameOverBox", "none");
                render_car_select(&game);
                set_display("carSelectBox", "flex");
            });
        }
        // Quick start with the current selection
        {
            let game = game.clone();
            on_click("quickStartBtn", move || start_session(&game));
        }
        {
            let game = game.clone();
            on_click("carConfirmBtn", move || start_session(&game));
        }
        on_click("carBackBtn", || {
            set_display("carSelectBox", "none");
            set_display("startBox", "flex");
        });

        // Pause menu
        {
            let game = game.clone();
            on_click("pauseBtn", move || toggle_pause(&game));
        }
        {
            let game = game.clone();
            on_click("resumeBtn", move || resume(&game));
        }
        {
            let game = game.clone();
            on_click("quitBtn", move || {
                {
                    let mut g = game.borrow_mut();
                    g.countdown_gen += 1; // cancel any countdown in flight
                    g.state.quit_to_menu();
                    g.messages.clear();
                }
                set_display("pauseMenu", "none");
                set_display("bgPauseIndicator", "none");
                set_display("countdownOverlay", "none");
                set_display("pauseBtn", "none");
                set_display("startBox", "flex");
            });
        }

        // Game over
        {
            let game = game.clone();
            on_click("restartBtn", move || start_session(&game));
        }
        on_click("menuBtn", || {
            set_display("gameOverBox", "none");
            set_display("startBox", "flex");
        });

        // Music preference (persisted; playback handled by the page)
        {
            let game = game.clone();
            on_click("musicToggle", move || {
                let mut g = game.borrow_mut();
                g.settings.music_enabled = !g.settings.music_enabled;
                g.settings.save();
                set_text("musicToggle", music_label(g.settings.music_enabled));
            });
        }
    }

    /// Rebuild the vehicle grid from the catalog and the unlock state
    fn render_car_select(game: &Rc<RefCell<Game>>) {
        let document = document();
        let Some(grid) = document.get_element_by_id("carGrid") else {
            return;
        };
        grid.set_inner_html("");

        let (selected, unlocked): (usize, Vec<bool>) = {
            let g = game.borrow();
            (
                g.state.vehicle,
                (0..CATALOG.len()).map(|i| g.profile.is_unlocked(i)).collect(),
            )
        };

        for (i, vehicle) in CATALOG.iter().enumerate() {
            let option = document.create_element("div").unwrap();
            let mut class = String::from("car-option");
            if !unlocked[i] {
                class.push_str(" locked");
            }
            if i == selected {
                class.push_str(" selected");
            }
            let _ = option.set_attribute("class", &class);

            let unlock_note = if unlocked[i] {
                String::new()
            } else {
                format!(
                    "<div class=\"car-unlock-req\">{}</div>",
                    vehicle.unlock.describe()
                )
            };
            option.set_inner_html(&format!(
                "<img src=\"{}\" class=\"car-preview\" alt=\"{}\">\
                 <div class=\"car-name\">{}</div>\
                 <div class=\"car-simple-stats\">Speed: {}/10<br>{}</div>{}",
                vehicle.image, vehicle.name, vehicle.name, vehicle.speed,
                vehicle.description, unlock_note
            ));

            if unlocked[i] {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    game.borrow_mut().state.vehicle = i;
                    render_car_select(&game);
                });
                let _ = option
                    .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }

            let _ = grid.append_child(&option);
        }

        if let Some(preview) = document.get_element_by_id("selectedCarPreview") {
            let _ = preview.set_attribute("src", CATALOG[selected].image);
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Tab hidden / minimized: pause with the background indicator
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    auto_pause(&game);
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                auto_pause(&game);
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn auto_pause(game: &Rc<RefCell<Game>>) {
        let mut g = game.borrow_mut();
        if g.state.phase == GamePhase::Running {
            g.state.pause(true);
            log::info!("Auto-paused (lost visibility)");
            set_display("bgPauseIndicator", "block");
        }
    }

    // ---- small DOM helpers --------------------------------------------------

    fn document() -> web_sys::Document {
        web_sys::window().unwrap().document().unwrap()
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = document().get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_display(id: &str, value: &str) {
        set_style(id, "display", value);
    }

    fn set_style(id: &str, property: &str, value: &str) {
        if let Some(el) = document().get_element_by_id(id) {
            if let Ok(el) = el.dyn_into::<HtmlElement>() {
                let _ = el.style().set_property(property, value);
            }
        }
    }

    fn set_countdown_number(text: &str) {
        if let Ok(Some(el)) = document().query_selector("#countdownOverlay .countdown-number") {
            el.set_text_content(Some(text));
        }
    }

    fn on_click(id: &str, mut handler: impl FnMut() + 'static) {
        if let Some(el) = document().get_element_by_id(id) {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| handler());
            let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn set_timeout(ms: i32, f: impl FnOnce() + 'static) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(f);
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            ms,
        );
        closure.forget();
    }

    fn music_label(enabled: bool) -> &'static str {
        if enabled { "MUSIC: ON" } else { "MUSIC: OFF" }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use retro_rush::consts::*;
    use retro_rush::sim::{GamePhase, GameState, TickInput, tick};

    env_logger::init();
    log::info!("Retro Rush (native) starting headless demo...");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xC0FFEE);

    let mut state = GameState::new(seed, 0);
    state.start();
    state.begin_running();

    let mut ticks = 0u32;
    while state.phase == GamePhase::Running && ticks < 36_000 {
        let input = TickInput {
            steer: dodge(&state),
        };
        tick(&mut state, &input);
        ticks += 1;
    }

    println!(
        "demo session (seed {seed}): {} points over {} ticks ({:.0}s at {} Hz), top speed {:.1}",
        state.score,
        ticks,
        ticks as f32 / TICK_HZ as f32,
        TICK_HZ,
        state.speed,
    );
}

/// Trivial demo pilot: steer away from the closest oncoming car that
/// shares the player's column.
#[cfg(not(target_arch = "wasm32"))]
fn dodge(state: &retro_rush::sim::GameState) -> i8 {
    use retro_rush::consts::{CAR_H, CAR_W, PLAYER_Y};

    let px = state.player.pos.x;
    let threat = state
        .enemies
        .iter()
        .filter(|e| e.pos.y > 200.0 && e.pos.y < PLAYER_Y + CAR_H)
        .filter(|e| (e.pos.x - px).abs() < CAR_W)
        .max_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    match threat {
        Some(enemy) if enemy.pos.x >= px => -1,
        Some(_) => 1,
        None => 0,
    }
}

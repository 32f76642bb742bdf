//! Lifter Arcade entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        Document, Element, HtmlCanvasElement, HtmlElement, HtmlInputElement, KeyboardEvent,
        PointerEvent, Window,
    };

    use lifter_arcade::platform::{Joystick, KeyAction, apply_key, map_key};
    use lifter_arcade::renderer::{RenderState, scene};
    use lifter_arcade::sim::World;
    use lifter_arcade::{
        GameEvent, GameLoop, Hud, LocalLeaderboard, ScoreRecord, ScoreSink, Settings, Tuning,
    };

    /// How often a held joystick re-asserts its vector
    const KEEP_ALIVE_MS: i32 = 50;

    /// Touch buttons: element id and the key action they stand in for
    const TOUCH_BUTTONS: [(&str, KeyAction); 5] = [
        ("btn-left", KeyAction::Left),
        ("btn-right", KeyAction::Right),
        ("btn-up", KeyAction::Up),
        ("btn-down", KeyAction::Down),
        ("btn-vacuum", KeyAction::ToggleVacuum),
    ];

    fn js_err(e: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&e.to_string())
    }

    fn window() -> Result<Window, JsValue> {
        web_sys::window().ok_or_else(|| js_err("no window"))
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let classes = el.class_list();
            let _ = if hidden {
                classes.add_1("hidden")
            } else {
                classes.remove_1("hidden")
            };
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn input_value(document: &Document, id: &str) -> String {
        document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .map(|input| input.value())
            .unwrap_or_default()
    }

    /// Size the canvas backing store for the device pixel ratio.
    /// Returns (css width, css height, physical width, physical height).
    fn fit_canvas(window: &Window, canvas: &HtmlCanvasElement) -> (f32, f32, u32, u32) {
        let dpr = window.device_pixel_ratio().max(1.0);
        let css_w = canvas.client_width().max(1);
        let css_h = canvas.client_height().max(1);
        let phys_w = (css_w as f64 * dpr).round() as u32;
        let phys_h = (css_h as f64 * dpr).round() as u32;
        canvas.set_width(phys_w);
        canvas.set_height(phys_h);
        (css_w as f32, css_h as f32, phys_w, phys_h)
    }

    /// Game instance holding all state
    struct Game {
        game: GameLoop,
        render_state: Option<RenderState>,
        settings: Settings,
        leaderboard: LocalLeaderboard,
        /// Final score waiting for the submit form; taken on submission
        pending_score: Option<i64>,
        last_hud: Option<Hud>,
        /// Handle of the scheduled animation frame
        raf_handle: Option<i32>,
        stopped: bool,
        // Joystick drag
        joystick: Option<Joystick>,
        stick_pointer: Option<i32>,
        stick_vector: Vec2,
        /// Interval handle and the callback it runs; both released together
        keep_alive: Option<(i32, Closure<dyn FnMut()>)>,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(world: World, settings: Settings) -> Self {
            Self {
                game: GameLoop::new(world),
                render_state: None,
                settings,
                leaderboard: LocalLeaderboard::load(),
                pending_score: None,
                last_hud: None,
                raf_handle: None,
                stopped: false,
                joystick: None,
                stick_pointer: None,
                stick_vector: Vec2::ZERO,
                keep_alive: None,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// One display frame: step, draw, refresh the HUD
        fn frame(&mut self, document: &Document, time: f64) {
            if let Some(GameEvent::RoundEnded { score }) = self.game.frame(time) {
                self.pending_score = Some(score);
                self.show_round_end(document, score);
            }
            self.render();
            self.track_fps(time);
            self.update_hud(document);
        }

        fn render(&mut self) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            let vertices = scene::build(&self.game.world);
            match render_state.render(&vertices) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let (w, h) = render_state.size;
                    let view = render_state.view;
                    render_state.resize(w, h, view);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        fn track_fps(&mut self, time: f64) {
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % self.frame_times.len();

            // Oldest sample is the one about to be overwritten
            let oldest = self.frame_times[self.frame_index];
            if oldest > 0.0 && time > oldest {
                self.fps = (60000.0 / (time - oldest)).round() as u32;
            }
        }

        fn update_hud(&mut self, document: &Document) {
            if self.settings.show_fps {
                set_text(document, "hud-fps", &self.fps.to_string());
            }

            let hud = self.game.hud();
            if self.last_hud == Some(hud) {
                return;
            }
            set_text(document, "hud-score", &hud.score.to_string());
            set_text(document, "hud-time", &hud.seconds_left.to_string());
            set_text(
                document,
                "hud-held",
                hud.held.map(|k| k.label()).unwrap_or("-"),
            );
            set_hidden(document, "pause-menu", !hud.paused);
            set_hidden(document, "demo-badge", !self.game.demo);
            self.last_hud = Some(hud);
        }

        fn show_round_end(&self, document: &Document, score: i64) {
            set_text(document, "final-score", &score.to_string());
            set_text(document, "submit-error", "");
            if let Some(input) = document
                .get_element_by_id("player-name")
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            {
                input.set_value(&self.settings.player_name);
            }
            if let Some(input) = document
                .get_element_by_id("company-name")
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            {
                input.set_value(&self.settings.company_name);
            }
            set_hidden(document, "submit-form", false);
            set_hidden(document, "game-over", false);
            self.show_leaderboard(document);
        }

        fn show_leaderboard(&self, document: &Document) {
            let Some(list) = document.get_element_by_id("leaderboard") else {
                return;
            };
            list.set_text_content(None);
            for (rank, record) in self.leaderboard.records.iter().enumerate() {
                let Ok(row) = document.create_element("li") else {
                    continue;
                };
                let company = if record.company.is_empty() {
                    String::new()
                } else {
                    format!(" ({})", record.company)
                };
                row.set_text_content(Some(&format!(
                    "{}. {}{} - {}",
                    rank + 1,
                    record.name,
                    company,
                    record.score
                )));
                let _ = list.append_child(&row);
            }
        }

        /// Submit the pending score with the names from the form
        fn submit(&mut self, document: &Document) {
            let Some(score) = self.pending_score else {
                return;
            };
            let name = input_value(document, "player-name");
            let company = input_value(document, "company-name");

            let result = ScoreRecord::new(&name, &company, score, js_sys::Date::now())
                .and_then(|record| self.leaderboard.submit(record));
            match result {
                Ok(()) => {
                    self.pending_score = None;
                    if self.settings.remember_names(&name, &company) {
                        self.settings.save();
                    }
                    set_text(document, "submit-error", "");
                    set_hidden(document, "submit-form", true);
                    self.show_leaderboard(document);
                }
                Err(e) => set_text(document, "submit-error", &e.to_string()),
            }
        }

        fn restart(&mut self, document: &Document) {
            let seed = js_sys::Date::now() as u64;
            self.game.restart(seed);
            self.game.world.fullscreen = self.settings.fullscreen;
            self.pending_score = None;
            self.last_hud = None;
            self.release_stick(document);
            set_hidden(document, "game-over", true);
            log::info!("Round restarted with seed: {}", seed);
        }

        fn start_keep_alive(&mut self, game: &Rc<RefCell<Game>>) {
            if self.keep_alive.is_some() {
                return;
            }
            let Some(window) = web_sys::window() else {
                return;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut()>::new(move || {
                if let Ok(mut g) = game.try_borrow_mut() {
                    if g.stick_pointer.is_some() {
                        let v = g.stick_vector;
                        g.game.input.analog = Some(v);
                    }
                }
            });
            match window.set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                KEEP_ALIVE_MS,
            ) {
                Ok(handle) => self.keep_alive = Some((handle, closure)),
                Err(e) => log::warn!("Joystick keep-alive failed: {:?}", e),
            }
        }

        /// Clear the interval, then drop its closure
        fn stop_keep_alive(&mut self) {
            let Some((handle, closure)) = self.keep_alive.take() else {
                return;
            };
            if let Some(window) = web_sys::window() {
                window.clear_interval_with_handle(handle);
            }
            drop(closure);
        }

        /// End any joystick drag and zero the analog vector
        fn release_stick(&mut self, document: &Document) {
            self.stop_keep_alive();
            self.stick_pointer = None;
            self.stick_vector = Vec2::ZERO;
            self.game.input.analog = None;
            move_knob(document, Vec2::ZERO);
        }

        /// Stop everything scheduled; the game cannot resume after this
        fn teardown(&mut self, window: &Window, document: &Document) {
            self.stopped = true;
            if let Some(handle) = self.raf_handle.take() {
                let _ = window.cancel_animation_frame(handle);
            }
            self.release_stick(document);
            self.game.input.release_directions();
            log::info!("Game torn down");
        }
    }

    fn move_knob(document: &Document, offset: Vec2) {
        if let Some(knob) = document
            .get_element_by_id("joystick-knob")
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            let _ = knob.style().set_property(
                "transform",
                &format!("translate({}px, {}px)", offset.x, offset.y),
            );
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).map_err(js_err)?;

        log::info!("Lifter Arcade starting...");

        let window = window()?;
        let document = window.document().ok_or_else(|| js_err("no document"))?;

        set_hidden(&document, "loading", true);

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| js_err("no canvas"))?
            .dyn_into()
            .map_err(|_| js_err("#canvas is not a canvas"))?;

        let (css_w, css_h, phys_w, phys_h) = fit_canvas(&window, &canvas);

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let mut world = World::new(Tuning::default(), css_w, css_h, seed);
        world.fullscreen = settings.fullscreen;
        let view = (world.layout.width, world.layout.height);
        let game = Rc::new(RefCell::new(Game::new(world, settings)));

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(js_err)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(js_err)?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, phys_w, phys_h, view)
            .await
            .map_err(js_err)?;
        game.borrow_mut().render_state = Some(render_state);

        setup_keyboard(&window, game.clone())?;
        setup_touch_buttons(&document, game.clone())?;
        setup_joystick(&document, game.clone())?;
        setup_buttons(&document, game.clone())?;
        setup_auto_pause(&window, &document, game.clone())?;
        setup_resize(&window, &canvas, game.clone())?;
        setup_teardown(&window, game.clone())?;

        set_hidden(&document, "hud", false);
        set_hidden(&document, "hud-fps", !game.borrow().settings.show_fps);

        request_animation_frame(game);

        log::info!("Lifter Arcade running!");
        Ok(())
    }

    /// Keys typed into the score form must not drive the lifter
    fn is_form_field(event: &web_sys::Event) -> bool {
        event
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
            .is_some()
    }

    fn setup_keyboard(window: &Window, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if is_form_field(&event) {
                    return;
                }
                let Some(action) = map_key(&event.key()) else {
                    return;
                };
                event.prevent_default();
                if event.repeat() {
                    return;
                }
                let mut g = game.borrow_mut();
                if !apply_key(&mut g.game.input, action, true) {
                    match action {
                        KeyAction::Pause => g.game.toggle_pause(),
                        KeyAction::Demo => g.game.toggle_demo(),
                        _ => {}
                    }
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if is_form_field(&event) {
                return;
            }
            if let Some(action) = map_key(&event.key()) {
                apply_key(&mut game.borrow_mut().game.input, action, false);
            }
        });
        window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_touch_buttons(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        for (id, action) in TOUCH_BUTTONS {
            let Some(button) = document.get_element_by_id(id) else {
                continue;
            };
            {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                    event.prevent_default();
                    apply_key(&mut game.borrow_mut().game.input, action, true);
                });
                button.add_event_listener_with_callback(
                    "pointerdown",
                    closure.as_ref().unchecked_ref(),
                )?;
                closure.forget();
            }
            for release in ["pointerup", "pointerleave", "pointercancel"] {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                    apply_key(&mut game.borrow_mut().game.input, action, false);
                });
                button.add_event_listener_with_callback(release, closure.as_ref().unchecked_ref())?;
                closure.forget();
            }
        }
        Ok(())
    }

    fn stick_geometry(base: &Element) -> Joystick {
        let rect = base.get_bounding_client_rect();
        Joystick::new(
            Vec2::new(
                (rect.left() + rect.width() * 0.5) as f32,
                (rect.top() + rect.height() * 0.5) as f32,
            ),
            (rect.width().min(rect.height()) * 0.5) as f32,
        )
    }

    fn pointer_pos(event: &PointerEvent) -> Vec2 {
        Vec2::new(event.client_x() as f32, event.client_y() as f32)
    }

    fn setup_joystick(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let Some(base) = document.get_element_by_id("joystick") else {
            return Ok(());
        };

        // Press: capture the pointer and start re-asserting the vector
        {
            let game = game.clone();
            let base_clone = base.clone();
            let document = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                let _ = base_clone.set_pointer_capture(event.pointer_id());
                let stick = stick_geometry(&base_clone);
                let v = stick.vector(pointer_pos(&event));
                {
                    let mut g = game.borrow_mut();
                    g.joystick = Some(stick);
                    g.stick_pointer = Some(event.pointer_id());
                    g.stick_vector = v;
                    g.game.input.analog = Some(v);
                    g.start_keep_alive(&game);
                }
                move_knob(&document, stick.knob_offset(pointer_pos(&event)));
            });
            base.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Drag
        {
            let game = game.clone();
            let document = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut g = game.borrow_mut();
                if g.stick_pointer != Some(event.pointer_id()) {
                    return;
                }
                let Some(stick) = g.joystick else {
                    return;
                };
                let v = stick.vector(pointer_pos(&event));
                g.stick_vector = v;
                g.game.input.analog = Some(v);
                move_knob(&document, stick.knob_offset(pointer_pos(&event)));
            });
            base.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Release
        for release in ["pointerup", "pointercancel", "lostpointercapture"] {
            let game = game.clone();
            let document = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut g = game.borrow_mut();
                if g.stick_pointer == Some(event.pointer_id()) {
                    g.release_stick(&document);
                }
            });
            base.add_event_listener_with_callback(release, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn on_click(
        document: &Document,
        id: &str,
        mut handler: impl FnMut(&Document) + 'static,
    ) -> Result<(), JsValue> {
        let Some(el) = document.get_element_by_id(id) else {
            return Ok(());
        };
        let doc = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            handler(&doc);
        });
        el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        {
            let game = game.clone();
            on_click(document, "submit-btn", move |doc| game.borrow_mut().submit(doc))?;
        }
        {
            let game = game.clone();
            on_click(document, "restart-btn", move |doc| game.borrow_mut().restart(doc))?;
        }
        {
            let game = game.clone();
            on_click(document, "pause-btn", move |_| game.borrow_mut().game.toggle_pause())?;
        }
        {
            let game = game.clone();
            on_click(document, "resume-btn", move |_| {
                game.borrow_mut().game.set_paused(false)
            })?;
        }
        on_click(document, "fullscreen-btn", move |doc| {
            let mut g = game.borrow_mut();
            g.settings.fullscreen = !g.settings.fullscreen;
            g.game.world.fullscreen = g.settings.fullscreen;
            g.settings.save();
            let result = if g.settings.fullscreen {
                doc.document_element()
                    .map(|el| el.request_fullscreen())
                    .unwrap_or(Ok(()))
            } else {
                doc.exit_fullscreen();
                Ok(())
            };
            if result.is_err() {
                log::warn!("Fullscreen request refused");
            }
            log::info!("Fullscreen: {}", g.settings.fullscreen);
        })
    }

    fn setup_auto_pause(
        window: &Window,
        document: &Document,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    g.release_stick(&document_clone);
                    g.game.set_paused(true);
                }
            });
            document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }

        // Window blur (click outside)
        let document = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            let mut g = game.borrow_mut();
            g.release_stick(&document);
            g.game.set_paused(true);
        });
        window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_resize(
        window: &Window,
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let (css_w, css_h, phys_w, phys_h) = fit_canvas(&window, &canvas);
            let mut g = game.borrow_mut();
            g.game.world.resize(css_w, css_h);
            let view = (g.game.world.layout.width, g.game.world.layout.height);
            if let Some(rs) = g.render_state.as_mut() {
                rs.resize(phys_w, phys_h, view);
            }
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_teardown(window: &Window, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let Some(document) = window.document() else {
                return;
            };
            game.borrow_mut().teardown(&window, &document);
        });
        window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if game.borrow().stopped {
            return;
        }
        let game_clone = game.clone();
        let closure = Closure::once(move |time: f64| {
            game_loop(game_clone, time);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(handle) => game.borrow_mut().raf_handle = Some(handle),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.raf_handle = None;
            if g.stopped {
                return;
            }
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.frame(&document, time);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

/// Headless demo round: the autopilot plays one round and the result is logged
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use lifter_arcade::consts::FRAME_DT;
    use lifter_arcade::sim::World;
    use lifter_arcade::{GameEvent, GameLoop, LocalLeaderboard, ScoreRecord, ScoreSink, Tuning};

    env_logger::init();
    log::info!("Lifter Arcade (native) starting...");
    log::info!("Native mode runs a headless demo round - run with `trunk serve` for web version");

    // Optional tuning file as the first argument
    let tuning = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Ignoring tuning file {}: {}", path, e);
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };

    let mut game = GameLoop::new(World::new(tuning, 1280.0, 720.0, 0x5eed));
    game.toggle_demo();

    let frame_ms = FRAME_DT as f64 * 1000.0;
    let mut time = 0.0;
    let score = loop {
        if let Some(GameEvent::RoundEnded { score }) = game.frame(time) {
            break score;
        }
        time += frame_ms;
    };

    let stats = &game.world.stats;
    println!(
        "Demo round: score {} | spawned {} | grabs {} | matches {} | mismatches {} | returned {} | despawned {}",
        score,
        stats.spawned,
        stats.grabs,
        stats.matches,
        stats.mismatches,
        stats.returned_to_belt,
        stats.despawned
    );

    let mut board = LocalLeaderboard::load();
    let submitted = ScoreRecord::new("Autopilot", "", score, 0.0)
        .and_then(|record| board.submit(record));
    if let Err(e) = submitted {
        log::warn!("Score not recorded: {}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

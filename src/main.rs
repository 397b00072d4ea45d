//! Disc Rush entry point
//!
//! Browser: wires the canvas, buttons and HUD elements to the simulation and
//! runs the frame loop. Native: plays one headless round with a scripted
//! player and prints the final score.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlCanvasElement, HtmlElement, MouseEvent, TouchEvent};

    use disc_rush::Tuning;
    use disc_rush::consts::MAX_CLOCK_STEP_MS;
    use disc_rush::renderer::{CanvasSurface, FrameStatus, Surface, colors, frame};
    use disc_rush::sim::{Arena, DiscColor, PointerKind, RoundPhase, RoundState};
    use disc_rush::ui::{HudSink, apply_events};
    use glam::Vec2;

    /// Look up a required page element, reporting it once if missing
    fn lookup(document: &Document, id: &str) -> Option<Element> {
        let el = document.get_element_by_id(id);
        if el.is_none() {
            log::error!("Element #{} not found!", id);
        }
        el
    }

    fn set_display(el: &Element, value: &str) {
        if let Some(html) = el.dyn_ref::<HtmlElement>() {
            let _ = html.style().set_property("display", value);
        }
    }

    /// HUD backed by DOM elements
    struct DomHud {
        document: Document,
        container: Option<Element>,
        timer: Option<Element>,
        score: Option<Element>,
        final_score: Option<Element>,
        start_button: Option<Element>,
        restart_button: Option<Element>,
        instructions: Option<Element>,
        /// (banner, swatch, text)
        bonus: Option<(Element, Element, Element)>,
    }

    impl DomHud {
        fn new(document: &Document) -> Self {
            Self {
                document: document.clone(),
                container: lookup(document, "gameContainer"),
                timer: lookup(document, "timer"),
                score: lookup(document, "score"),
                final_score: lookup(document, "finalScore"),
                start_button: lookup(document, "startButton"),
                restart_button: lookup(document, "restartButton"),
                instructions: lookup(document, "instructions"),
                bonus: None,
            }
        }

        /// Create the bonus banner on first use
        fn bonus_banner(&mut self) -> Option<&(Element, Element, Element)> {
            if self.bonus.is_none() {
                let container = self.container.as_ref()?;
                let banner = self.document.create_element("div").ok()?;
                banner.set_id("bonusDisplay");
                let _ = banner.set_attribute(
                    "style",
                    "position:absolute; top:50px; left:50%; transform:translateX(-50%); \
                     background-color:rgba(0,0,0,0.7); color:white; padding:10px 20px; \
                     border-radius:5px; z-index:100; display:flex; align-items:center; \
                     gap:10px; pointer-events:none;",
                );
                let swatch = self.document.create_element("div").ok()?;
                let text = self.document.create_element("div").ok()?;
                banner.append_child(&swatch).ok()?;
                banner.append_child(&text).ok()?;
                container.append_child(&banner).ok()?;
                self.bonus = Some((banner, swatch, text));
            }
            self.bonus.as_ref()
        }
    }

    impl HudSink for DomHud {
        fn set_timer(&mut self, text: &str) {
            if let Some(el) = &self.timer {
                el.set_text_content(Some(text));
            }
        }

        fn set_score(&mut self, text: &str) {
            if let Some(el) = &self.score {
                el.set_text_content(Some(text));
            }
        }

        fn show_bonus(&mut self, color: DiscColor, text: &str) {
            if let Some((_, swatch, label)) = self.bonus_banner() {
                let _ = swatch.set_attribute(
                    "style",
                    &format!(
                        "width:30px; height:30px; border-radius:6px; border:2px solid white; \
                         background-color:{};",
                        colors::css(colors::disc(color))
                    ),
                );
                label.set_text_content(Some(text));
            }
        }

        fn hide_bonus(&mut self) {
            if let Some((banner, _, _)) = self.bonus.take() {
                banner.remove();
            }
        }

        fn round_started(&mut self) {
            if let Some(el) = &self.start_button {
                set_display(el, "none");
            }
            if let Some(el) = &self.final_score {
                set_display(el, "none");
            }
            if let Some(el) = &self.instructions {
                let _ = el.class_list().add_1("game-started");
            }
        }

        fn show_final_score(&mut self, text: &str) {
            if let Some(el) = &self.final_score {
                el.set_text_content(Some(text));
                set_display(el, "block");
            }
            if let Some(el) = &self.restart_button {
                set_display(el, "block");
            }
            if let Some(el) = &self.instructions {
                let _ = el.class_list().remove_1("game-started");
            }
        }

        fn dismiss_end_screen(&mut self) {
            if let Some(el) = &self.restart_button {
                set_display(el, "none");
            }
        }

        fn show_hit_marker(&mut self, position: Vec2, text: &str, positive: bool) {
            let Some(container) = &self.container else {
                return;
            };
            let Ok(marker) = self.document.create_element("div") else {
                return;
            };
            marker.set_class_name("floating-score");
            marker.set_text_content(Some(text));
            let color = if positive { "#4CAF50" } else { "#FF5252" };
            let _ = marker.set_attribute(
                "style",
                &format!("left:{}px; top:{}px; color:{};", position.x, position.y, color),
            );
            if container.append_child(&marker).is_err() {
                return;
            }

            // Remove after the float animation
            let cleanup = Closure::once_into_js(move || marker.remove());
            if let Some(window) = web_sys::window() {
                let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                    cleanup.unchecked_ref(),
                    1000,
                );
            }
        }

        fn round_halted(&mut self) {
            log::error!("Canvas or context not available in game loop");
        }
    }

    /// Game instance holding all state
    struct Game {
        state: RoundState,
        surface: Option<CanvasSurface>,
        hud: DomHud,
        last_time: f64,
        loop_active: bool,
    }

    impl Game {
        fn flush_hud(&mut self) {
            let events = self.state.drain_events();
            apply_events(&mut self.hud, events);
        }

        /// Run timers and draw one frame
        fn update(&mut self, time: f64) -> FrameStatus {
            let dt = if self.last_time > 0.0 {
                (time - self.last_time).clamp(0.0, MAX_CLOCK_STEP_MS)
            } else {
                0.0
            };
            self.last_time = time;

            self.state.advance_clock(dt);
            let status = match self.surface.as_mut() {
                Some(surface) => {
                    let status = frame(&mut self.state, surface);
                    // Round over: wipe the field under the end screen
                    if self.state.phase == RoundPhase::Ended {
                        if let Err(e) = surface.clear() {
                            log::warn!("Could not clear canvas after round end: {}", e);
                        }
                    }
                    status
                }
                None => {
                    self.state.halt("no drawable surface");
                    FrameStatus::Stop
                }
            };
            self.flush_hud();
            status
        }

        fn shoot(&mut self, x: f32, y: f32, pointer: PointerKind) {
            if self.state.resolve_shot(Vec2::new(x, y), pointer).is_some() {
                self.flush_hud();
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Disc Rush starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        let canvas: Option<HtmlCanvasElement> = lookup(&document, "gameCanvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok());
        let surface = canvas.as_ref().and_then(|canvas| {
            match CanvasSurface::new(canvas.clone()) {
                Ok(surface) => {
                    surface.fit_to_container();
                    Some(surface)
                }
                Err(e) => {
                    log::error!("Canvas context: {}", e);
                    None
                }
            }
        });

        let arena = surface
            .as_ref()
            .map(|s| {
                let (w, h) = s.size();
                Arena::new(w, h)
            })
            .unwrap_or(Arena::new(800.0, 600.0));

        let seed = js_sys::Date::now() as u64;
        let tuning = Tuning::load();
        let game = Rc::new(RefCell::new(Game {
            state: RoundState::new(arena, tuning, seed),
            surface,
            hud: DomHud::new(&document),
            last_time: 0.0,
            loop_active: false,
        }));

        log::info!("Game initialized with seed: {}", seed);

        if let Some(canvas) = canvas.as_ref() {
            setup_input_handlers(canvas, game.clone());
            setup_resize_handler(game.clone());
        }
        setup_buttons(&document, game);

        log::info!("Disc Rush ready");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse click
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let x = event.offset_x() as f32;
                let y = event.offset_y() as f32;
                game.borrow_mut().shoot(x, y, PointerKind::Mouse);
            });
            let _ = canvas
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start (shot with touch forgiveness)
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let rect = canvas_clone.get_bounding_client_rect();
                    let x = touch.client_x() as f32 - rect.left() as f32;
                    let y = touch.client_y() as f32 - rect.top() as f32;
                    game.borrow_mut().shoot(x, y, PointerKind::Touch);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move: keep the page from scrolling
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut g = game.borrow_mut();
            let size = g.surface.as_ref().map(|surface| {
                surface.fit_to_container();
                surface.size()
            });
            if let Some((w, h)) = size {
                g.state.resize(w, h);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("startButton") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                start_round(&game, false);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("restartButton") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                start_round(&game, true);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn start_round(game: &Rc<RefCell<Game>>, restart: bool) {
        let needs_loop = {
            let mut g = game.borrow_mut();
            if restart {
                g.state.restart();
            } else {
                g.state.start();
            }
            g.last_time = 0.0;
            g.flush_hud();
            let needs_loop = !g.loop_active;
            g.loop_active = true;
            needs_loop
        };

        if needs_loop {
            request_animation_frame(game.clone());
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let status = {
            let mut g = game.borrow_mut();
            let status = g.update(time);
            if status == FrameStatus::Stop {
                log::info!("Game loop stopped");
                g.loop_active = false;
            }
            status
        };

        if status == FrameStatus::Continue {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;

    use disc_rush::Tuning;
    use disc_rush::consts::NOMINAL_FRAME_MS;
    use disc_rush::renderer::{FrameStatus, RecordingSurface, frame};
    use disc_rush::sim::{Arena, DiscColor, PointerKind, RoundState, hit_test};
    use disc_rush::ui::{HudSink, apply_events};

    /// Frames between scripted shots
    const SHOT_EVERY_FRAMES: u64 = 24;

    /// HUD that writes to the log
    struct LogHud;

    impl HudSink for LogHud {
        fn set_timer(&mut self, text: &str) {
            log::debug!("{}", text);
        }

        fn set_score(&mut self, text: &str) {
            log::debug!("{}", text);
        }

        fn show_bonus(&mut self, color: DiscColor, text: &str) {
            log::debug!("[{}] {}", color.as_str(), text);
        }

        fn hide_bonus(&mut self) {}

        fn round_started(&mut self) {
            log::info!("Round started");
        }

        fn show_final_score(&mut self, text: &str) {
            log::info!("{}", text.replace('\n', " "));
        }

        fn dismiss_end_screen(&mut self) {}
    }

    /// Aim at the disc worth the most right now (newest on ties), never a trap.
    /// Discs whose center is covered by a newer disc are skipped, since a shot
    /// there would hit the newer one.
    fn pick_target(state: &RoundState) -> Option<Vec2> {
        state
            .discs
            .iter()
            .enumerate()
            .filter(|(_, d)| !d.color.is_trap())
            .filter(|(i, d)| hit_test(&state.discs, d.pos, PointerKind::Mouse) == Some(*i))
            .max_by_key(|(_, d)| d.color.points() * state.bonus.multiplier_for(d.color))
            .map(|(_, d)| d.pos)
    }

    /// Play one full round at the nominal frame rate; returns the final score
    pub fn play_round(tuning: Tuning, seed: u64) -> i64 {
        let arena = Arena::new(800.0, 600.0);
        let mut state = RoundState::new(arena, tuning, seed);
        let mut surface = RecordingSurface::new(arena.width, arena.height);
        let mut hud = LogHud;

        state.start();
        let mut frame_index: u64 = 0;
        loop {
            state.advance_clock(NOMINAL_FRAME_MS);
            let status = frame(&mut state, &mut surface);

            if frame_index % SHOT_EVERY_FRAMES == 0 {
                if let Some(target) = pick_target(&state) {
                    state.resolve_shot(target, PointerKind::Mouse);
                }
            }
            apply_events(&mut hud, state.drain_events());

            if status == FrameStatus::Stop {
                break;
            }
            frame_index += 1;
        }

        log::info!(
            "Headless round finished after {} frames ({} drawn)",
            frame_index,
            surface.frames()
        );
        state.score
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use disc_rush::sim::Disc;

        fn round_with(discs: &[(f32, f32, DiscColor)]) -> RoundState {
            let mut state = RoundState::new(Arena::new(800.0, 600.0), Tuning::default(), 1);
            state.start();
            for &(x, y, color) in discs {
                let id = state.next_entity_id();
                state
                    .discs
                    .push(Disc::new(id, Vec2::new(x, y), Vec2::ZERO, 20.0, color));
            }
            state
        }

        #[test]
        fn test_skips_disc_covered_by_newer_trap() {
            let state = round_with(&[
                (100.0, 100.0, DiscColor::Yellow),
                (120.0, 100.0, DiscColor::Trap),
            ]);
            assert_eq!(pick_target(&state), None);
        }

        #[test]
        fn test_aims_at_best_reachable_disc() {
            let mut state = round_with(&[
                (100.0, 100.0, DiscColor::Yellow),
                (120.0, 100.0, DiscColor::Trap),
                (500.0, 400.0, DiscColor::Red),
            ]);
            let target = pick_target(&state).expect("red disc is reachable");
            assert_eq!(target, Vec2::new(500.0, 400.0));

            let hit = state
                .resolve_shot(target, PointerKind::Mouse)
                .expect("shot lands");
            assert_eq!(hit.color, DiscColor::Red);
            assert_eq!(state.score, 10);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Disc Rush (native) starting...");
    log::info!("Native mode plays a headless round - run with `trunk serve` for the web version");

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let score = headless::play_round(disc_rush::Tuning::load(), seed);
    println!("Final score: {}", score);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

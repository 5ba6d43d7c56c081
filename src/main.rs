//! Neon Arcade entry point
//!
//! The wasm build wires a game core to a canvas 2D context, DOM events,
//! and the animation-frame loop. The native build runs a short headless
//! demo of both cores (mainly useful with RUST_LOG=info).

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, HtmlCanvasElement, KeyboardEvent, MouseEvent,
        TouchEvent,
    };

    use glam::Vec2;
    use neon_arcade::atom::{self, AtomState};
    use neon_arcade::audio::AudioManager;
    use neon_arcade::consts::{VIEW_HEIGHT, VIEW_WIDTH};
    use neon_arcade::gallery::{self, GalleryEvent, GalleryState};
    use neon_arcade::input::{FrameInput, InputEvent};
    use neon_arcade::scene::{Color, Primitive, Scene};
    use neon_arcade::Settings;

    /// Which game this page hosts
    enum Session {
        Atom(AtomState),
        Gallery(GalleryState),
    }

    impl Session {
        fn from_page(document: &Document, seed: u64) -> Self {
            let kind = document
                .body()
                .and_then(|b| b.get_attribute("data-game"))
                .unwrap_or_default();
            match kind.as_str() {
                "gallery" => Session::Gallery(GalleryState::new(seed)),
                // Unknown values fall back to the atom builder
                _ => Session::Atom(AtomState::new(seed)),
            }
        }

        fn set_reduced_motion(&mut self, reduced: bool) {
            match self {
                Session::Atom(s) => s.reduced_motion = reduced,
                Session::Gallery(s) => s.reduced_motion = reduced,
            }
        }

        fn tick(&mut self, input: &FrameInput) {
            match self {
                Session::Atom(s) => atom::tick(s, input),
                Session::Gallery(s) => gallery::tick(s, input),
            }
        }

        fn scene(&self) -> Scene {
            match self {
                Session::Atom(s) => atom::scene::build(s),
                Session::Gallery(s) => gallery::scene::build(s),
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        session: Session,
        input: FrameInput,
        settings: Settings,
        audio: AudioManager,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(session: Session, settings: Settings) -> Self {
            let mut audio = AudioManager::new();
            audio.set_enabled(settings.sound);
            Self {
                session,
                input: FrameInput::default(),
                settings,
                audio,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// One frame: consume the accumulated input, advance the core,
        /// react to its events
        fn update(&mut self, time: f64) {
            let frame = self.input.take();
            self.session.tick(&frame);

            if let Session::Gallery(state) = &mut self.session {
                for event in state.drain_events() {
                    match event {
                        GalleryEvent::ShotFired => self.audio.play_shot(),
                        GalleryEvent::SpecialComplete | GalleryEvent::AllClear => {}
                    }
                }
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Update HUD elements in the DOM (existing nodes only)
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            match &self.session {
                Session::Atom(state) => {
                    for level in 0..4 {
                        let id = format!("level{}-info", level + 1);
                        if let Some(el) = document.get_element_by_id(&id) {
                            el.set_text_content(Some(&state.count_on_level(level).to_string()));
                        }
                    }
                    if let Some(el) = document.get_element_by_id("electron-counter") {
                        el.set_text_content(Some(&state.free_count().to_string()));
                    }
                    if let Some(el) = document.get_element_by_id("done-btn") {
                        let _ = el.class_list().toggle_with_force("shake", state.shake_ticks > 0);
                    }
                }
                Session::Gallery(state) => {
                    if let Some(el) = document.get_element_by_id("score") {
                        el.set_text_content(Some(&state.score.to_string()));
                    }
                    if let Some(el) = document.get_element_by_id("total") {
                        el.set_text_content(Some(&state.balls.len().to_string()));
                    }
                    if let Some(el) = document.get_element_by_id("winModal") {
                        let _ = el.class_list().toggle_with_force("show", state.dialog_open);
                    }
                }
            }

            if self.settings.show_fps {
                if let Some(el) = document.get_element_by_id("hud-fps") {
                    el.set_text_content(Some(&self.fps.to_string()));
                }
            }
        }
    }

    /// Paint a display list onto the 2D context (logical coordinates;
    /// the context is already DPR-scaled)
    fn paint(ctx: &CanvasRenderingContext2d, scene: &Scene) {
        ctx.clear_rect(0.0, 0.0, VIEW_WIDTH as f64, VIEW_HEIGHT as f64);

        for primitive in &scene.primitives {
            match primitive {
                Primitive::Disc {
                    center,
                    radius,
                    color,
                    glow,
                } => {
                    ctx.begin_path();
                    let _ = ctx.arc(
                        center.x as f64,
                        center.y as f64,
                        *radius as f64,
                        0.0,
                        std::f64::consts::TAU,
                    );
                    ctx.set_fill_style_str(&color.to_css());
                    set_glow(ctx, *glow, *color);
                    ctx.fill();
                    clear_glow(ctx);
                }
                Primitive::GlowDisc {
                    center,
                    radius,
                    inner,
                    outer,
                } => {
                    let (cx, cy, r) = (center.x as f64, center.y as f64, *radius as f64);
                    if let Ok(gradient) =
                        ctx.create_radial_gradient(cx, cy, 0.0, cx, cy, r * 1.5)
                    {
                        let _ = gradient.add_color_stop(0.0, &inner.to_css());
                        let _ = gradient.add_color_stop(0.7, &outer.to_css());
                        let _ = gradient.add_color_stop(1.0, &outer.with_alpha(0.0).to_css());
                        ctx.begin_path();
                        let _ = ctx.arc(cx, cy, r, 0.0, std::f64::consts::TAU);
                        ctx.set_fill_style_canvas_gradient(&gradient);
                        set_glow(ctx, 15.0, *inner);
                        ctx.fill();
                        clear_glow(ctx);
                    }
                }
                Primitive::Ring {
                    center,
                    radius,
                    color,
                    width,
                    dashed,
                    glow,
                } => {
                    if *dashed {
                        set_dash(ctx, 5.0, 10.0);
                    }
                    ctx.begin_path();
                    let _ = ctx.arc(
                        center.x as f64,
                        center.y as f64,
                        *radius as f64,
                        0.0,
                        std::f64::consts::TAU,
                    );
                    ctx.set_stroke_style_str(&color.to_css());
                    ctx.set_line_width(*width as f64);
                    set_glow(ctx, *glow, *color);
                    ctx.stroke();
                    clear_glow(ctx);
                    clear_dash(ctx);
                }
                Primitive::RectOutline {
                    rect,
                    color,
                    dashed,
                } => {
                    if *dashed {
                        set_dash(ctx, 5.0, 5.0);
                    }
                    ctx.set_stroke_style_str(&color.to_css());
                    ctx.set_line_width(1.0);
                    ctx.stroke_rect(
                        rect.x as f64,
                        rect.y as f64,
                        rect.width as f64,
                        rect.height as f64,
                    );
                    clear_dash(ctx);
                }
                Primitive::Line {
                    from,
                    to,
                    color,
                    width,
                } => {
                    ctx.begin_path();
                    ctx.move_to(from.x as f64, from.y as f64);
                    ctx.line_to(to.x as f64, to.y as f64);
                    ctx.set_stroke_style_str(&color.to_css());
                    ctx.set_line_width(*width as f64);
                    ctx.stroke();
                }
                Primitive::Text {
                    pos,
                    text,
                    color,
                    size,
                    centered,
                } => {
                    ctx.set_font(&format!("{}px Arial", size));
                    ctx.set_text_align(if *centered { "center" } else { "left" });
                    ctx.set_fill_style_str(&color.to_css());
                    let _ = ctx.fill_text(text, pos.x as f64, pos.y as f64);
                }
            }
        }
    }

    fn set_glow(ctx: &CanvasRenderingContext2d, blur: f32, color: Color) {
        if blur > 0.0 {
            ctx.set_shadow_blur(blur as f64);
            ctx.set_shadow_color(&color.to_css());
        }
    }

    fn clear_glow(ctx: &CanvasRenderingContext2d) {
        ctx.set_shadow_blur(0.0);
    }

    fn set_dash(ctx: &CanvasRenderingContext2d, on: f64, off: f64) {
        let segments = js_sys::Array::of2(&JsValue::from_f64(on), &JsValue::from_f64(off));
        let _ = ctx.set_line_dash(&segments);
    }

    fn clear_dash(ctx: &CanvasRenderingContext2d) {
        let _ = ctx.set_line_dash(&js_sys::Array::new());
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Neon Arcade starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Backing store at device resolution, drawing in logical units
        let dpr = window.device_pixel_ratio();
        canvas.set_width((VIEW_WIDTH as f64 * dpr) as u32);
        canvas.set_height((VIEW_HEIGHT as f64 * dpr) as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .expect("get_context failed")
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");
        let _ = ctx.scale(dpr, dpr);

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let mut session = Session::from_page(&document, seed);
        session.set_reduced_motion(settings.reduced_motion);

        log::info!("Session initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game::new(session, settings)));

        setup_pointer_handlers(&canvas, game.clone());
        setup_keyboard_handlers(game.clone());
        setup_buttons(&document, game.clone());

        request_animation_frame(game, ctx);

        log::info!("Neon Arcade running!");
    }

    /// Map a client-space position to logical canvas coordinates
    fn to_logical(canvas: &HtmlCanvasElement, client_x: f32, client_y: f32) -> Vec2 {
        let rect = canvas.get_bounding_client_rect();
        let sx = VIEW_WIDTH / rect.width() as f32;
        let sy = VIEW_HEIGHT / rect.height() as f32;
        Vec2::new(
            (client_x - rect.left() as f32) * sx,
            (client_y - rect.top() as f32) * sy,
        )
    }

    fn setup_pointer_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse
        for (name, make) in [
            ("mousedown", InputEvent::PointerDown as fn(Vec2) -> InputEvent),
            ("mousemove", InputEvent::PointerMove),
            ("mouseup", InputEvent::PointerUp),
        ] {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let p = to_logical(
                    &canvas_clone,
                    event.client_x() as f32,
                    event.client_y() as f32,
                );
                game.borrow_mut().input.events.push(make(p));
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch, treated as a single pointer
        for (name, make) in [
            ("touchstart", InputEvent::PointerDown as fn(Vec2) -> InputEvent),
            ("touchmove", InputEvent::PointerMove),
            ("touchend", InputEvent::PointerUp),
        ] {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                // touchend reports the finger in changedTouches
                let touch = event
                    .touches()
                    .get(0)
                    .or_else(|| event.changed_touches().get(0));
                if let Some(touch) = touch {
                    let p = to_logical(
                        &canvas_clone,
                        touch.client_x() as f32,
                        touch.client_y() as f32,
                    );
                    game.borrow_mut().input.events.push(make(p));
                }
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_keyboard_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.code().as_str() {
                    "Space" => {
                        event.prevent_default();
                        // Holding the key auto-repeats; only the first
                        // press starts an aim
                        if !event.repeat() {
                            g.input.events.push(InputEvent::AimPressed);
                        }
                    }
                    "ArrowUp" => g.input.held.up = true,
                    "ArrowDown" => g.input.held.down = true,
                    "ArrowLeft" => g.input.held.left = true,
                    "ArrowRight" => g.input.held.right = true,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.code().as_str() {
                    "Space" => {
                        event.prevent_default();
                        g.input.events.push(InputEvent::AimReleased);
                    }
                    "ArrowUp" => g.input.held.up = false,
                    "ArrowDown" => g.input.held.down = false,
                    "ArrowLeft" => g.input.held.left = false,
                    "ArrowRight" => g.input.held.right = false,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("done-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.events.push(InputEvent::CheckRequested);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("finishBtn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.events.push(InputEvent::Dismiss);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>, ctx: CanvasRenderingContext2d) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, ctx, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, ctx: CanvasRenderingContext2d, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            paint(&ctx, &g.session.scene());
            g.update_hud();
        }

        request_animation_frame(game, ctx);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec2;
    use neon_arcade::atom::{self, state::CENTER, AtomState, ElectronState};
    use neon_arcade::gallery::{self, GalleryState};
    use neon_arcade::input::{FrameInput, InputEvent};

    env_logger::init();
    log::info!("Neon Arcade (native) - headless demo");

    // Atom: drag the first free electron onto level 1
    let mut state = AtomState::new(2024);
    let index = state
        .electrons
        .iter()
        .position(|e| e.state == ElectronState::Free)
        .expect("session starts with free electrons");
    let start = state.electrons[index].pos;
    let frame = |events: Vec<InputEvent>| FrameInput {
        events,
        ..Default::default()
    };
    atom::tick(&mut state, &frame(vec![InputEvent::PointerDown(start)]));
    atom::tick(
        &mut state,
        &frame(vec![InputEvent::PointerUp(CENTER + Vec2::new(0.0, 80.0))]),
    );
    println!(
        "atom: config {:?} after one placement, {} free electrons left",
        state.current_config(),
        state.free_count()
    );

    // Gallery: aim at ball 1 and fire
    let mut state = GalleryState::new(2024);
    gallery::tick(&mut state, &frame(vec![InputEvent::AimPressed]));
    state.reticle = state.balls[0].pos;
    gallery::tick(&mut state, &frame(vec![InputEvent::AimReleased]));
    println!(
        "gallery: score {}/{} after one shot",
        state.score,
        state.balls.len()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

//! Mathfall entry point
//!
//! Wasm builds wire the game to a canvas, the speech/chime outputs and the
//! operator's control socket. Native builds run a short headless autoplay,
//! useful as a smoke check of the sim without a browser.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlImageElement, MessageEvent, MouseEvent, WebSocket};

    use mathfall::audio::{ChimePlayer, SpeechAnnouncer};
    use mathfall::control::{self, ControlMessage};
    use mathfall::render::canvas::CanvasRenderer;
    use mathfall::sim::Clock;
    use mathfall::{Game, MathfallGame, Settings};

    const BACKGROUND_SRC: &str = "assets/background.png";
    const CONTROL_URL: &str = "ws://localhost:5000/game";

    /// Everything the frame loop touches
    struct Host {
        game: MathfallGame,
        clock: Clock,
        renderer: CanvasRenderer,
        chimes: ChimePlayer,
        /// Control messages received since the last frame; drained and
        /// applied whole between ticks
        pending_control: VecDeque<ControlMessage>,
    }

    type SharedHost = Rc<RefCell<Host>>;

    /// The operator's start/stop channel. Owned by the composition root;
    /// decoded messages land in the host's queue.
    struct ControlChannel {
        _ws: WebSocket,
    }

    impl ControlChannel {
        fn connect(url: &str, host: SharedHost) -> Result<Self, JsValue> {
            let ws = WebSocket::new(url)?;

            {
                let onopen = Closure::<dyn FnMut()>::new(move || {
                    log::info!("control channel connected");
                });
                ws.set_onopen(Some(onopen.as_ref().unchecked_ref()));
                onopen.forget();
            }

            {
                let host = host.clone();
                let onmessage = Closure::<dyn FnMut(_)>::new(move |event: MessageEvent| {
                    let Some(text) = event.data().as_string() else {
                        return;
                    };
                    match decode_frame(&text) {
                        Ok(msg) => host.borrow_mut().pending_control.push_back(msg),
                        Err(err) => log::warn!("ignoring control frame: {err}"),
                    }
                });
                ws.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));
                onmessage.forget();
            }

            {
                let onclose = Closure::<dyn FnMut()>::new(move || {
                    log::warn!("control channel closed");
                });
                ws.set_onclose(Some(onclose.as_ref().unchecked_ref()));
                onclose.forget();
            }

            Ok(Self { _ws: ws })
        }
    }

    /// Wire frame: `{"event": "start", "payload": {"rounds": 3}}`
    fn decode_frame(text: &str) -> Result<ControlMessage, String> {
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|e| e.to_string())?;
        let event = value
            .get("event")
            .and_then(|e| e.as_str())
            .ok_or("frame without event name")?;
        let payload = value.get("payload").map(|p| p.to_string());
        control::decode(event, payload.as_deref()).map_err(|e| e.to_string())
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("failed to init logger");

        log::info!("mathfall starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        fit_canvas(&canvas);

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let chimes = ChimePlayer::new(if settings.chimes { settings.volume } else { 0.0 });
        let mut game = MathfallGame::new(seed, settings, Box::new(SpeechAnnouncer));
        game.set_playfield(canvas.width() as f32, canvas.height() as f32);
        game.start();

        let renderer = CanvasRenderer::new(canvas.clone()).expect("no 2d context");

        let host = Rc::new(RefCell::new(Host {
            game,
            clock: Clock::new(),
            renderer,
            chimes,
            pending_control: VecDeque::new(),
        }));

        log::info!("game initialized with seed {seed}");

        load_background(host.clone());
        setup_resize(&canvas, host.clone());
        setup_click(&canvas, host.clone());

        match ControlChannel::connect(CONTROL_URL, host.clone()) {
            // Keep the socket alive for the page's lifetime
            Ok(channel) => std::mem::forget(channel),
            Err(err) => log::warn!("control channel unavailable: {err:?}"),
        }

        request_animation_frame(host);
        log::info!("mathfall running");
    }

    fn fit_canvas(canvas: &HtmlCanvasElement) {
        let window = web_sys::window().unwrap();
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        canvas.set_width(w as u32);
        canvas.set_height(h as u32);
    }

    /// Kick off the async background load; rendering falls back to a flat
    /// fill until the image arrives.
    fn load_background(host: SharedHost) {
        let Ok(image) = HtmlImageElement::new() else {
            return;
        };
        {
            let host = host.clone();
            let image_for_cb = image.clone();
            let onload = Closure::<dyn FnMut()>::new(move || {
                let mut h = host.borrow_mut();
                h.renderer.set_background(image_for_cb.clone());
                h.game.set_background_loaded(true);
                log::info!("background art loaded");
            });
            image.set_onload(Some(onload.as_ref().unchecked_ref()));
            onload.forget();
        }
        image.set_src(BACKGROUND_SRC);
    }

    fn setup_resize(canvas: &HtmlCanvasElement, host: SharedHost) {
        let window = web_sys::window().unwrap();
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_: web_sys::Event| {
            fit_canvas(&canvas);
            host.borrow_mut()
                .game
                .set_playfield(canvas.width() as f32, canvas.height() as f32);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_click(canvas: &HtmlCanvasElement, host: SharedHost) {
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let rect = canvas_clone.get_bounding_client_rect();
            let x = event.client_x() as f32 - rect.left() as f32;
            let y = event.client_y() as f32 - rect.top() as f32;
            let mut h = host.borrow_mut();
            h.game.on_click(x, y);
            play_chimes(&mut h);
        });
        let _ = canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(host: SharedHost) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            frame(host, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame(host: SharedHost, timestamp_ms: f64) {
        {
            let mut h = host.borrow_mut();

            // Apply operator commands whole, before this frame's tick
            while let Some(msg) = h.pending_control.pop_front() {
                match msg {
                    ControlMessage::Start { rounds } => h.game.external_start(rounds),
                    ControlMessage::Stop => h.game.external_stop(),
                }
                play_chimes(&mut h);
            }

            let time = h.clock.update(timestamp_ms);
            h.game.update(time);
            play_chimes(&mut h);

            let scene = h.game.scene();
            h.renderer.render(&scene);
        }

        request_animation_frame(host);
    }

    fn play_chimes(h: &mut Host) {
        for event in h.game.last_events() {
            h.chimes.play(event);
        }
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
    use glam::Vec2;
    use mathfall::announce::LogAnnouncer;
    use mathfall::sim::{GamePhase, Time};
    use mathfall::{Game, MathfallGame, Settings};

    env_logger::init();
    log::info!("mathfall (headless) starting...");

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let mut game = MathfallGame::new(seed, Settings::default(), Box::new(LogAnnouncer));
    game.set_playfield(1280.0, 720.0);
    game.start();
    game.external_start(3);

    // Autoplay: step at a synthetic 60 fps and click the correct digit
    // whenever one is on screen
    let dt = 1.0 / 60.0;
    for frame in 0..(60 * 60) {
        game.update(Time {
            time: frame as f32 * dt,
            delta_time: dt,
        });

        if game.state().phase == GamePhase::GameOver {
            break;
        }

        let answer = game.state().problem.map(|p| p.answer);
        let target: Option<Vec2> = game
            .state()
            .digits
            .iter()
            .find(|d| Some(d.value) == answer && d.pos.y > 0.0)
            .map(|d| d.pos);
        if let Some(pos) = target {
            game.on_click(pos.x, pos.y);
        }
    }

    log::info!(
        "headless run done: score {}, rounds {}/{}, final phase {:?}",
        game.state().score,
        game.state().rounds_played,
        game.state().max_rounds,
        game.state().phase
    );
}

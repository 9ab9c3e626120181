use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, TouchEvent};
use yew::prelude::*;

use crate::game::{self, DinoGame};
use crate::intro::{IntroPhase, IntroSequence, STAGE_TICK_MS};

const SPEED_LINE_COUNT: usize = 20;

#[derive(Properties, PartialEq, Clone)]
pub struct IntroViewProps {
    /// Fired once when the sequence reaches `Done`; the parent unmounts the
    /// overlay in response.
    pub on_done: Callback<()>,
}

#[function_component(IntroView)]
pub fn intro_view(props: &IntroViewProps) -> Html {
    let canvas_ref = use_node_ref();
    let phase = use_state_eq(|| IntroPhase::WaitingForInput);
    let seq = use_mut_ref(IntroSequence::new);
    let game = use_mut_ref(|| None::<DinoGame>);
    let speed_lines = use_state(Vec::<(f64, f64)>::new);

    // Mount effect: canvas sizing, frame loop, stage driver, input listeners.
    {
        let canvas_ref = canvas_ref.clone();
        let phase_handle = phase.clone();
        let seq = seq.clone();
        let game = game.clone();
        let speed_lines_handle = speed_lines.clone();
        let on_done = props.on_done.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window().expect("window");
            let document = window.document().expect("document");
            let canvas: HtmlCanvasElement = canvas_ref.cast().expect("canvas");

            let apply_canvas_size = {
                let canvas = canvas.clone();
                let window = window.clone();
                move || {
                    let width = window
                        .inner_width()
                        .ok()
                        .and_then(|v| v.as_f64())
                        .unwrap_or(800.0);
                    let height = window
                        .inner_height()
                        .ok()
                        .and_then(|v| v.as_f64())
                        .unwrap_or(600.0);
                    canvas.set_width(width.max(0.0) as u32);
                    canvas.set_height(height.max(0.0) as u32);
                }
            };
            apply_canvas_size();

            let resize_cb = {
                let apply_canvas_size = apply_canvas_size.clone();
                Closure::wrap(Box::new(move |_e: web_sys::Event| {
                    apply_canvas_size();
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())
                .unwrap();

            // Frame loop: advance and paint the game while it runs.
            let raf_id = Rc::new(RefCell::new(None));
            let raf_closure: Rc<RefCell<Option<Closure<dyn FnMut()>>>> =
                Rc::new(RefCell::new(None));
            {
                let raf_id_loop = raf_id.clone();
                let raf_closure_loop = raf_closure.clone();
                let window_loop = window.clone();
                let canvas_loop = canvas.clone();
                let game_loop = game.clone();
                *raf_closure.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                    if let Some(g) = game_loop.borrow_mut().as_mut() {
                        if g.running {
                            g.step();
                            draw_frame(&canvas_loop, g);
                        }
                    }
                    if let Some(cb) = raf_closure_loop.borrow().as_ref() {
                        if let Ok(id) =
                            window_loop.request_animation_frame(cb.as_ref().unchecked_ref())
                        {
                            *raf_id_loop.borrow_mut() = Some(id);
                        }
                    }
                })
                    as Box<dyn FnMut()>));
                if let Some(cb) = raf_closure.borrow().as_ref() {
                    if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                        *raf_id.borrow_mut() = Some(id);
                    }
                }
            }

            // Speed-up ramp; started on entering SpeedingUp, cancels itself
            // at the ceiling, and is force-cleared on teardown.
            let ramp_interval_id: Rc<RefCell<Option<i32>>> = Rc::new(RefCell::new(None));
            let ramp_closure: Rc<RefCell<Option<Closure<dyn FnMut()>>>> =
                Rc::new(RefCell::new(None));

            // Stage driver: one interval advances the sequence and applies
            // each transition's side effects.
            let stage_tick = {
                let window = window.clone();
                let canvas = canvas.clone();
                let seq = seq.clone();
                let game = game.clone();
                let phase_handle = phase_handle.clone();
                let speed_lines_handle = speed_lines_handle.clone();
                let ramp_interval_id = ramp_interval_id.clone();
                let ramp_closure = ramp_closure.clone();
                let on_done = on_done.clone();
                Closure::wrap(Box::new(move || {
                    let Some(next) = seq.borrow_mut().tick(STAGE_TICK_MS as f64) else {
                        return;
                    };
                    phase_handle.set(next);
                    match next {
                        IntroPhase::Running => {
                            let w = canvas.width() as f64;
                            let h = canvas.height() as f64;
                            let mut g = DinoGame::new(w, h, js_sys::Date::now() as u64);
                            g.start();
                            *game.borrow_mut() = Some(g);
                        }
                        IntroPhase::SpeedingUp => {
                            speed_lines_handle.set(make_speed_lines());
                            let ramp_cb = {
                                let window = window.clone();
                                let game = game.clone();
                                let ramp_interval_id = ramp_interval_id.clone();
                                Closure::wrap(Box::new(move || {
                                    let done = game
                                        .borrow_mut()
                                        .as_mut()
                                        .map(|g| g.speed_tick())
                                        .unwrap_or(true);
                                    if done {
                                        if let Some(id) = ramp_interval_id.borrow_mut().take() {
                                            window.clear_interval_with_handle(id);
                                        }
                                    }
                                })
                                    as Box<dyn FnMut()>)
                            };
                            if let Ok(id) = window
                                .set_interval_with_callback_and_timeout_and_arguments_0(
                                    ramp_cb.as_ref().unchecked_ref(),
                                    game::SPEED_RAMP_INTERVAL_MS,
                                )
                            {
                                *ramp_interval_id.borrow_mut() = Some(id);
                            }
                            *ramp_closure.borrow_mut() = Some(ramp_cb);
                        }
                        IntroPhase::Revealing => {
                            window.scroll_to_with_x_and_y(0.0, 0.0);
                        }
                        IntroPhase::Done => {
                            if let Some(g) = game.borrow_mut().as_mut() {
                                g.stop();
                            }
                            on_done.emit(());
                        }
                        _ => {}
                    }
                }) as Box<dyn FnMut()>)
            };
            let stage_interval_id = window
                .set_interval_with_callback_and_timeout_and_arguments_0(
                    stage_tick.as_ref().unchecked_ref(),
                    STAGE_TICK_MS,
                )
                .unwrap();

            // Entry + jump input. The first accepted input starts the
            // sequence; afterwards the same inputs feed jump requests, which
            // are guarded no-ops until the game exists.
            let key_cb = {
                let seq = seq.clone();
                let game = game.clone();
                let phase_handle = phase_handle.clone();
                Closure::wrap(Box::new(move |e: KeyboardEvent| {
                    let code = e.code();
                    if code != "Space" && code != "ArrowUp" {
                        return;
                    }
                    e.prevent_default();
                    if seq.borrow_mut().begin() {
                        phase_handle.set(IntroPhase::Starting);
                    } else if let Some(g) = game.borrow_mut().as_mut() {
                        g.jump();
                    }
                }) as Box<dyn FnMut(_)>)
            };
            document
                .add_event_listener_with_callback("keydown", key_cb.as_ref().unchecked_ref())
                .unwrap();

            let click_cb = {
                let seq = seq.clone();
                let game = game.clone();
                let phase_handle = phase_handle.clone();
                Closure::wrap(Box::new(move |e: web_sys::MouseEvent| {
                    e.prevent_default();
                    if seq.borrow_mut().begin() {
                        phase_handle.set(IntroPhase::Starting);
                    } else if let Some(g) = game.borrow_mut().as_mut() {
                        g.jump();
                    }
                }) as Box<dyn FnMut(_)>)
            };
            document
                .add_event_listener_with_callback("click", click_cb.as_ref().unchecked_ref())
                .unwrap();

            let touch_cb = {
                let seq = seq.clone();
                let game = game.clone();
                let phase_handle = phase_handle.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    e.prevent_default();
                    if seq.borrow_mut().begin() {
                        phase_handle.set(IntroPhase::Starting);
                    } else if let Some(g) = game.borrow_mut().as_mut() {
                        g.jump();
                    }
                }) as Box<dyn FnMut(_)>)
            };
            document
                .add_event_listener_with_callback("touchstart", touch_cb.as_ref().unchecked_ref())
                .ok();

            let window_clone = window.clone();
            move || {
                let _ = document.remove_event_listener_with_callback(
                    "keydown",
                    key_cb.as_ref().unchecked_ref(),
                );
                let _ = document.remove_event_listener_with_callback(
                    "click",
                    click_cb.as_ref().unchecked_ref(),
                );
                let _ = document.remove_event_listener_with_callback(
                    "touchstart",
                    touch_cb.as_ref().unchecked_ref(),
                );
                let _ = window_clone.remove_event_listener_with_callback(
                    "resize",
                    resize_cb.as_ref().unchecked_ref(),
                );
                window_clone.clear_interval_with_handle(stage_interval_id);
                if let Some(id) = ramp_interval_id.borrow_mut().take() {
                    window_clone.clear_interval_with_handle(id);
                }
                if let Some(id) = raf_id.borrow_mut().take() {
                    let _ = window_clone.cancel_animation_frame(id);
                }
                raf_closure.borrow_mut().take();
                ramp_closure.borrow_mut().take();
                drop(stage_tick);
                drop(key_cb);
                drop(click_cb);
                drop(touch_cb);
                drop(resize_cb);
            }
        });
    }

    let p = *phase;
    let waiting = p == IntroPhase::WaitingForInput;
    let canvas_active = p >= IntroPhase::Running;
    let lines_active = p >= IntroPhase::SpeedingUp;
    let glitch_active = p >= IntroPhase::Glitching;
    let hidden = p >= IntroPhase::Revealing;

    html! {
        <div id="intro-overlay" class={classes!("intro-overlay", hidden.then_some("hidden"))}>
            <div class={classes!("error-screen", (!waiting).then_some("hidden"))}>
                <h1 class="error-code">{"404"}</h1>
                <p class="error-message">{"PORTFOLIO NOT FOUND"}</p>
                <p class="error-hint">{"PRESS SPACE OR TAP TO CONTINUE"}</p>
            </div>
            <canvas
                ref={canvas_ref}
                id="dino-canvas"
                class={classes!("dino-canvas", canvas_active.then_some("active"))}
            ></canvas>
            <div class={classes!("speed-lines", lines_active.then_some("active"))}>
                { for speed_lines.iter().map(|(top, delay)| html! {
                    <div
                        class="speed-line"
                        style={format!("top:{top:.1}%; animation-delay:{delay:.2}s;")}
                    ></div>
                }) }
            </div>
            <div class={classes!("glitch-overlay", glitch_active.then_some("active"))}></div>
        </div>
    }
}

fn make_speed_lines() -> Vec<(f64, f64)> {
    (0..SPEED_LINE_COUNT)
        .map(|_| {
            (
                js_sys::Math::random() * 100.0,
                js_sys::Math::random() * 0.5,
            )
        })
        .collect()
}

fn draw_frame(canvas: &HtmlCanvasElement, g: &DinoGame) {
    if !canvas.is_connected() {
        return;
    }
    let ctx = match canvas.get_context("2d").ok().flatten() {
        Some(c) => match c.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        None => return,
    };
    let w = canvas.width() as f64;
    let h = canvas.height() as f64;

    ctx.set_fill_style_str("#0a0e27");
    ctx.fill_rect(0.0, 0.0, w, h);

    ctx.set_fill_style_str("#1a1f3a");
    for c in &g.clouds {
        ctx.fill_rect(c.x, c.y, c.width, c.height);
    }

    ctx.set_stroke_style_str("#00ff9f");
    ctx.set_line_width(3.0);
    ctx.begin_path();
    ctx.move_to(0.0, g.ground);
    ctx.line_to(w, g.ground);
    ctx.stroke();

    draw_dino(&ctx, g);

    ctx.set_fill_style_str("#ff00ff");
    for o in &g.obstacles {
        ctx.fill_rect(o.x, o.y, o.width, o.height);
    }

    ctx.set_fill_style_str("#00ff9f");
    ctx.set_font("20px \"Press Start 2P\", monospace");
    ctx.fill_text(&g.score_label(), w - 200.0, 50.0).ok();
}

/// Pixel-art dino assembled from fixed-size blocks, with a two-frame leg
/// cycle driven by the frame counter.
fn draw_dino(ctx: &CanvasRenderingContext2d, g: &DinoGame) {
    let x = g.dino.x;
    let y = g.dino.y;
    let s = 10.0;

    ctx.set_fill_style_str("#00ff9f");

    // Head
    ctx.fill_rect(x + s * 3.0, y, s, s);
    ctx.fill_rect(x + s * 4.0, y, s, s);

    // Eye
    ctx.set_fill_style_str("#0a0e27");
    ctx.fill_rect(x + s * 4.0, y, s / 2.0, s / 2.0);
    ctx.set_fill_style_str("#00ff9f");

    // Body
    ctx.fill_rect(x + s * 2.0, y + s, s * 3.0, s);
    ctx.fill_rect(x + s, y + s * 2.0, s * 4.0, s);
    ctx.fill_rect(x, y + s * 3.0, s * 4.0, s);

    // Legs
    if g.leg_frame() == 0 {
        ctx.fill_rect(x + s, y + s * 4.0, s, s);
        ctx.fill_rect(x + s * 3.0, y + s * 4.0, s, s);
    } else {
        ctx.fill_rect(x, y + s * 4.0, s, s);
        ctx.fill_rect(x + s * 2.0, y + s * 4.0, s, s);
    }

    // Tail
    ctx.fill_rect(x, y + s * 2.0, s, s);
}

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

use crate::state::ParticleField;

#[function_component(CursorTrail)]
pub fn cursor_trail() -> Html {
    let canvas_ref = use_node_ref();
    let field = use_mut_ref(|| ParticleField::new(js_sys::Date::now() as u64));

    {
        let canvas_ref = canvas_ref.clone();
        let field = field.clone();
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

            let mousemove_cb = {
                let field = field.clone();
                Closure::wrap(Box::new(move |e: web_sys::MouseEvent| {
                    field
                        .borrow_mut()
                        .emit(e.client_x() as f64, e.client_y() as f64);
                }) as Box<dyn FnMut(_)>)
            };
            document
                .add_event_listener_with_callback(
                    "mousemove",
                    mousemove_cb.as_ref().unchecked_ref(),
                )
                .unwrap();

            let resize_cb = {
                let apply_canvas_size = apply_canvas_size.clone();
                Closure::wrap(Box::new(move |_e: web_sys::Event| {
                    apply_canvas_size();
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())
                .unwrap();

            // Self-rescheduling draw loop.
            let raf_id = Rc::new(RefCell::new(None));
            let closure_cell: Rc<RefCell<Option<Closure<dyn FnMut()>>>> =
                Rc::new(RefCell::new(None));
            {
                let raf_id_loop = raf_id.clone();
                let closure_cell_loop = closure_cell.clone();
                let window_loop = window.clone();
                let canvas_loop = canvas.clone();
                let field_loop = field.clone();
                *closure_cell.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                    {
                        let mut f = field_loop.borrow_mut();
                        f.step();
                        draw_trail(&canvas_loop, &f);
                    }
                    if let Some(cb) = closure_cell_loop.borrow().as_ref() {
                        if let Ok(id) =
                            window_loop.request_animation_frame(cb.as_ref().unchecked_ref())
                        {
                            *raf_id_loop.borrow_mut() = Some(id);
                        }
                    }
                })
                    as Box<dyn FnMut()>));
                if let Some(cb) = closure_cell.borrow().as_ref() {
                    if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                        *raf_id.borrow_mut() = Some(id);
                    }
                }
            }

            let window_clone = window.clone();
            move || {
                let _ = document.remove_event_listener_with_callback(
                    "mousemove",
                    mousemove_cb.as_ref().unchecked_ref(),
                );
                let _ = window_clone.remove_event_listener_with_callback(
                    "resize",
                    resize_cb.as_ref().unchecked_ref(),
                );
                if let Some(id) = raf_id.borrow_mut().take() {
                    let _ = window_clone.cancel_animation_frame(id);
                }
                closure_cell.borrow_mut().take();
                drop(mousemove_cb);
                drop(resize_cb);
            }
        });
    }

    html! {
        <canvas
            ref={canvas_ref}
            id="cursor-canvas"
            style="position:fixed; inset:0; pointer-events:none; z-index:30;"
        ></canvas>
    }
}

fn draw_trail(canvas: &HtmlCanvasElement, field: &ParticleField) {
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
    ctx.clear_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
    for p in field.particles() {
        ctx.set_fill_style_str(p.color);
        ctx.set_global_alpha(p.alpha());
        ctx.begin_path();
        ctx.arc(p.x, p.y, p.size, 0.0, std::f64::consts::PI * 2.0).ok();
        ctx.fill();
    }
    ctx.set_global_alpha(1.0);
}

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use yew::prelude::*;

use crate::util::scroll_fraction;

#[derive(Properties, PartialEq, Clone)]
pub struct ProgressBarProps {
    /// Reports the scroll fraction (0..1) on every scroll event.
    pub on_progress: Callback<f64>,
}

#[function_component(ProgressBar)]
pub fn progress_bar(props: &ProgressBarProps) -> Html {
    let fraction = use_state_eq(|| 0.0f64);

    {
        let fraction = fraction.clone();
        let on_progress = props.on_progress.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window().expect("window");
            let scroll_cb = {
                let window = window.clone();
                Closure::wrap(Box::new(move |_e: web_sys::Event| {
                    let document_height = window
                        .document()
                        .and_then(|d| d.document_element())
                        .map(|el| el.scroll_height() as f64)
                        .unwrap_or(0.0);
                    let viewport = window
                        .inner_height()
                        .ok()
                        .and_then(|v| v.as_f64())
                        .unwrap_or(0.0);
                    let top = window.scroll_y().unwrap_or(0.0);
                    let f = scroll_fraction(top, document_height, viewport);
                    fraction.set(f);
                    on_progress.emit(f);
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("scroll", scroll_cb.as_ref().unchecked_ref())
                .unwrap();
            let window_clone = window.clone();
            move || {
                let _ = window_clone.remove_event_listener_with_callback(
                    "scroll",
                    scroll_cb.as_ref().unchecked_ref(),
                );
                drop(scroll_cb);
            }
        });
    }

    html! {
        <div class="progress-track" style="position:fixed; top:0; left:0; width:100%; height:4px; z-index:70;">
            <div
                id="progress-bar"
                class="progress-bar"
                style={format!("width:{:.2}%; height:100%;", *fraction * 100.0)}
            ></div>
        </div>
    }
}

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use yew::prelude::*;

use crate::state::typing::{TYPE_INTERVAL_MS, TypingEffect};

const TITLE: &str = "ANKIT MAHADANI";
const SUBTITLE: &str = "Computer Science Student & AI/ML Developer";
const GLITCH_INTERVAL_MS: i32 = 2_000;
const GLITCH_REVERT_MS: i32 = 100;
/// Roll above this on each interval to trigger a flicker.
const GLITCH_CHANCE: f64 = 0.95;

#[derive(Properties, PartialEq, Clone)]
pub struct HeroProps {
    pub intro_done: bool,
}

#[function_component(Hero)]
pub fn hero(props: &HeroProps) -> Html {
    let typed = use_state(String::new);
    let glitch_shadow = use_state(|| None::<String>);

    // Type out the subtitle once the intro releases the page.
    {
        let typed = typed.clone();
        use_effect_with(props.intro_done, move |done| {
            if !*done {
                return Box::new(|| {}) as Box<dyn FnOnce()>;
            }
            let window = web_sys::window().expect("window");
            let effect = Rc::new(RefCell::new(TypingEffect::new(SUBTITLE)));
            let interval_id: Rc<RefCell<Option<i32>>> = Rc::new(RefCell::new(None));
            let tick = {
                let window = window.clone();
                let interval_id = interval_id.clone();
                Closure::wrap(Box::new(move || {
                    let mut fx = effect.borrow_mut();
                    let more = fx.tick();
                    typed.set(fx.visible());
                    if !more {
                        if let Some(id) = interval_id.borrow_mut().take() {
                            window.clear_interval_with_handle(id);
                        }
                    }
                }) as Box<dyn FnMut()>)
            };
            if let Ok(id) = window.set_interval_with_callback_and_timeout_and_arguments_0(
                tick.as_ref().unchecked_ref(),
                TYPE_INTERVAL_MS,
            ) {
                *interval_id.borrow_mut() = Some(id);
            }
            Box::new(move || {
                if let Some(id) = interval_id.borrow_mut().take() {
                    window.clear_interval_with_handle(id);
                }
                drop(tick);
            }) as Box<dyn FnOnce()>
        });
    }

    // Occasional glitch flicker on the title.
    {
        let glitch_shadow = glitch_shadow.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window().expect("window");
            let flicker = Closure::wrap(Box::new(move || {
                if js_sys::Math::random() > GLITCH_CHANCE {
                    let jitter = || js_sys::Math::random() * 5.0 - 2.0;
                    glitch_shadow.set(Some(format!(
                        "{:.1}px {:.1}px 0 var(--secondary), {:.1}px {:.1}px 0 var(--accent)",
                        jitter(),
                        jitter(),
                        jitter(),
                        jitter()
                    )));
                }
            }) as Box<dyn FnMut()>);
            let id = window
                .set_interval_with_callback_and_timeout_and_arguments_0(
                    flicker.as_ref().unchecked_ref(),
                    GLITCH_INTERVAL_MS,
                )
                .unwrap();
            let window_clone = window.clone();
            move || {
                window_clone.clear_interval_with_handle(id);
                drop(flicker);
            }
        });
    }

    // Revert each flicker shortly after it lands.
    {
        let glitch_shadow = glitch_shadow.clone();
        let dep = (*glitch_shadow).clone();
        use_effect_with(dep, move |shadow| {
            if shadow.is_none() {
                return Box::new(|| {}) as Box<dyn FnOnce()>;
            }
            let window = web_sys::window().expect("window");
            let revert = Closure::wrap(Box::new(move || {
                glitch_shadow.set(None);
            }) as Box<dyn FnMut()>);
            let id = window
                .set_timeout_with_callback_and_timeout_and_arguments_0(
                    revert.as_ref().unchecked_ref(),
                    GLITCH_REVERT_MS,
                )
                .ok();
            Box::new(move || {
                if let Some(id) = id {
                    window.clear_timeout_with_handle(id);
                }
                drop(revert);
            }) as Box<dyn FnOnce()>
        });
    }

    let title_style = (*glitch_shadow)
        .clone()
        .map(|s| format!("text-shadow:{s};"))
        .unwrap_or_default();

    html! {
        <section id="home" class="hero">
            <h1 class="glitch-text" data-text={TITLE} style={title_style}>{ TITLE }</h1>
            <p class="typing-text">
                { (*typed).clone() }
                <span class="cursor-blink">{"▌"}</span>
            </p>
            <p class="hero-hint">{"Scroll down to explore, or open the terminal with Ctrl+`"}</p>
        </section>
    }
}

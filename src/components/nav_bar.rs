use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{HtmlElement, ScrollBehavior, ScrollToOptions};
use yew::prelude::*;

/// Section ids in page order, paired with the label shown in the menu.
pub const NAV_ITEMS: &[(&str, &str)] = &[
    ("home", "Home"),
    ("about", "About"),
    ("projects", "Projects"),
    ("skills", "Skills"),
    ("achievements", "Achievements"),
    ("contact", "Contact"),
];

/// Height of the fixed header, subtracted from scroll targets.
const HEADER_OFFSET: f64 = 80.0;

fn section_element(id: &str) -> Option<HtmlElement> {
    web_sys::window()?
        .document()?
        .get_element_by_id(id)?
        .dyn_into::<HtmlElement>()
        .ok()
}

#[function_component(NavBar)]
pub fn nav_bar() -> Html {
    let active = use_state_eq(|| "home".to_string());

    // Follow the scroll position to highlight the section under the header.
    {
        let active = active.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window().expect("window");
            let scroll_cb = {
                let window = window.clone();
                Closure::wrap(Box::new(move |_e: web_sys::Event| {
                    let scroll_y = window.scroll_y().unwrap_or(0.0);
                    for (id, _) in NAV_ITEMS {
                        if let Some(el) = section_element(id) {
                            let top = el.offset_top() as f64 - HEADER_OFFSET - 20.0;
                            let bottom = top + el.offset_height() as f64;
                            if scroll_y >= top && scroll_y < bottom {
                                active.set((*id).to_string());
                            }
                        }
                    }
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

    let nav_click = |id: &'static str| {
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            if let Some(el) = section_element(id) {
                if let Some(window) = web_sys::window() {
                    let target = (el.offset_top() as f64 - HEADER_OFFSET).max(0.0);
                    let opts = ScrollToOptions::new();
                    opts.set_top(target);
                    opts.set_behavior(ScrollBehavior::Smooth);
                    window.scroll_to_with_scroll_to_options(&opts);
                }
            }
        })
    };

    html! {
        <nav id="top-bar" class="nav-bar">
            <div class="nav-logo">{"<AM />"}</div>
            <ul class="nav-menu">
                { for NAV_ITEMS.iter().map(|(id, label)| html! {
                    <li>
                        <a
                            href={format!("#{id}")}
                            class={classes!((*active == *id).then_some("active"))}
                            onclick={nav_click(id)}
                        >
                            { *label }
                        </a>
                    </li>
                }) }
            </ul>
        </nav>
    }
}

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::KeyboardEvent;
use yew::prelude::*;

use super::{
    achievement_toasts::{AchievementToasts, ToastList, ToastsAction},
    cursor_trail::CursorTrail,
    hero::Hero,
    intro_view::IntroView,
    nav_bar::NavBar,
    progress_bar::ProgressBar,
    sections::Sections,
    sound_toggle::SoundToggle,
    terminal_modal::TerminalModal,
    theme_switcher::ThemeSwitcher,
};
use crate::achievements::{
    FIRST_VISIT_DELAY_MS, Ledger, SCROLL_MASTER_FRACTION, TOAST_DURATION_MS, achievement,
};
use crate::theme::Theme;

const SOUND_STORAGE_KEY: &str = "sound-enabled";

#[cfg(target_arch = "wasm32")]
fn load_sound_enabled() -> bool {
    crate::util::local_storage()
        .and_then(|s| s.get_item(SOUND_STORAGE_KEY).ok().flatten())
        .map(|v| v != "false")
        .unwrap_or(true)
}

#[cfg(target_arch = "wasm32")]
fn save_sound_enabled(enabled: bool) {
    if let Some(store) = crate::util::local_storage() {
        let _ = store.set_item(SOUND_STORAGE_KEY, if enabled { "true" } else { "false" });
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_sound_enabled() -> bool {
    true
}

#[cfg(not(target_arch = "wasm32"))]
fn save_sound_enabled(_enabled: bool) {}

#[function_component(App)]
pub fn app() -> Html {
    let intro_done = use_state_eq(|| false);
    let theme = use_state_eq(Theme::load);
    let sound_enabled = use_state_eq(load_sound_enabled);
    let ledger = use_mut_ref(Ledger::load);
    let toasts = use_reducer(ToastList::default);
    let toast_seq = use_mut_ref(|| 0u32);
    let terminal_open = use_state_eq(|| false);
    // Mirrors for mount-time listeners, refreshed as the states change.
    let intro_done_flag = use_mut_ref(|| false);
    let terminal_open_flag = use_mut_ref(|| false);

    // Apply + persist the theme whenever it changes.
    {
        let current = *theme;
        use_effect_with(current, move |t| {
            t.apply();
            t.save();
            || ()
        });
    }

    // Persist the sound flag.
    {
        let enabled = *sound_enabled;
        use_effect_with(enabled, move |e| {
            save_sound_enabled(*e);
            || ()
        });
    }

    {
        let flag = intro_done_flag.clone();
        let done = *intro_done;
        use_effect_with(done, move |_| {
            *flag.borrow_mut() = done;
            || ()
        });
    }
    {
        let flag = terminal_open_flag.clone();
        let open = *terminal_open;
        use_effect_with(open, move |_| {
            *flag.borrow_mut() = open;
            || ()
        });
    }

    // Idempotent unlock: first time only, persist the set and raise one
    // toast that dismisses itself.
    let unlock: Callback<&'static str> = {
        let ledger = ledger.clone();
        let toasts = toasts.dispatcher();
        let toast_seq = toast_seq.clone();
        Callback::from(move |key: &'static str| {
            let newly = ledger.borrow_mut().unlock(key);
            if !newly {
                return;
            }
            ledger.borrow().save();
            let Some(def) = achievement(key) else {
                return;
            };
            log::info!("achievement unlocked: {key}");
            let id = {
                let mut seq = toast_seq.borrow_mut();
                *seq += 1;
                *seq
            };
            toasts.dispatch(ToastsAction::Push { id, def });
            if let Some(window) = web_sys::window() {
                let dismiss = {
                    let toasts = toasts.clone();
                    Closure::wrap(Box::new(move || {
                        toasts.dispatch(ToastsAction::Dismiss { id });
                    }) as Box<dyn FnMut()>)
                };
                let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                    dismiss.as_ref().unchecked_ref(),
                    TOAST_DURATION_MS,
                );
                dismiss.forget();
            }
        })
    };

    // First-visit unlock, a moment after load.
    {
        let unlock = unlock.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window();
            let cb = Closure::wrap(Box::new(move || {
                unlock.emit("firstVisit");
            }) as Box<dyn FnMut()>);
            let id = window.as_ref().and_then(|w| {
                w.set_timeout_with_callback_and_timeout_and_arguments_0(
                    cb.as_ref().unchecked_ref(),
                    FIRST_VISIT_DELAY_MS,
                )
                .ok()
            });
            move || {
                if let (Some(w), Some(id)) = (window, id) {
                    w.clear_timeout_with_handle(id);
                }
                drop(cb);
            }
        });
    }

    // Ctrl+` toggles the terminal once the intro is over.
    {
        let terminal_open = terminal_open.clone();
        let unlock = unlock.clone();
        let intro_done_flag = intro_done_flag.clone();
        let terminal_open_flag = terminal_open_flag.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window().expect("window");
            let key_cb = Closure::wrap(Box::new(move |e: KeyboardEvent| {
                if e.ctrl_key() && e.key() == "`" {
                    e.prevent_default();
                    if !*intro_done_flag.borrow() {
                        return;
                    }
                    let now_open = !*terminal_open_flag.borrow();
                    terminal_open.set(now_open);
                    if now_open {
                        unlock.emit("terminalUser");
                    }
                }
            }) as Box<dyn FnMut(_)>);
            window
                .add_event_listener_with_callback("keydown", key_cb.as_ref().unchecked_ref())
                .unwrap();
            move || {
                let _ = window
                    .remove_event_listener_with_callback("keydown", key_cb.as_ref().unchecked_ref());
                drop(key_cb);
            }
        });
    }

    let on_intro_done = {
        let intro_done = intro_done.clone();
        Callback::from(move |_| intro_done.set(true))
    };
    let set_theme = {
        let theme = theme.clone();
        let unlock = unlock.clone();
        Callback::from(move |t: Theme| {
            theme.set(t);
            unlock.emit("themeChanger");
        })
    };
    let toggle_sound = {
        let sound_enabled = sound_enabled.clone();
        Callback::from(move |_| sound_enabled.set(!*sound_enabled))
    };
    let on_progress = {
        let unlock = unlock.clone();
        Callback::from(move |fraction: f64| {
            if fraction >= SCROLL_MASTER_FRACTION {
                unlock.emit("scrollMaster");
            }
        })
    };
    let open_terminal = {
        let terminal_open = terminal_open.clone();
        let unlock = unlock.clone();
        Callback::from(move |_: MouseEvent| {
            terminal_open.set(true);
            unlock.emit("terminalUser");
        })
    };
    let close_terminal = {
        let terminal_open = terminal_open.clone();
        Callback::from(move |_| terminal_open.set(false))
    };

    html! {
        <>
            { if !*intro_done {
                html! { <IntroView on_done={on_intro_done} /> }
            } else {
                html! {}
            } }
            <ProgressBar {on_progress} />
            <NavBar />
            <main>
                <Hero intro_done={*intro_done} />
                <Sections unlock={unlock.clone()} intro_done={*intro_done} />
            </main>
            <ThemeSwitcher current={*theme} on_select={set_theme.clone()} />
            <SoundToggle enabled={*sound_enabled} on_toggle={toggle_sound} />
            { if *intro_done {
                html! {
                    <button
                        id="terminal-trigger"
                        class="terminal-trigger"
                        style="position:fixed; bottom:64px; right:16px; z-index:40;"
                        title="Open terminal (Ctrl+`)"
                        onclick={open_terminal}
                    >
                        { ">_" }
                    </button>
                }
            } else {
                html! {}
            } }
            <TerminalModal
                open={*terminal_open}
                on_close={close_terminal}
                ledger={ledger.clone()}
                on_set_theme={set_theme}
            />
            <AchievementToasts toasts={toasts.items.clone()} />
            <CursorTrail />
        </>
    }
}

use std::cell::RefCell;
use std::rc::Rc;
use web_sys::{HtmlElement, HtmlInputElement};
use yew::prelude::*;

use crate::achievements::Ledger;
use crate::terminal::{Line, LineKind, Outcome, dispatch};
use crate::theme::Theme;

#[derive(Properties, PartialEq, Clone)]
pub struct TerminalModalProps {
    pub open: bool,
    pub on_close: Callback<()>,
    pub ledger: Rc<RefCell<Ledger>>,
    pub on_set_theme: Callback<Theme>,
}

fn welcome_lines() -> Vec<Line> {
    vec![
        Line::success("Welcome to the interactive terminal!"),
        Line::plain("Type 'help' to see available commands."),
    ]
}

#[function_component(TerminalModal)]
pub fn terminal_modal(props: &TerminalModalProps) -> Html {
    let lines = use_state(welcome_lines);
    let input_ref = use_node_ref();
    let output_ref = use_node_ref();

    // Focus the input whenever the modal opens.
    {
        let input_ref = input_ref.clone();
        use_effect_with(props.open, move |open| {
            if *open {
                if let Some(input) = input_ref.cast::<HtmlInputElement>() {
                    let _ = input.focus();
                }
            }
            || ()
        });
    }

    // Keep the log scrolled to the newest line.
    {
        let output_ref = output_ref.clone();
        use_effect_with(lines.len(), move |_| {
            if let Some(el) = output_ref.cast::<HtmlElement>() {
                el.set_scroll_top(el.scroll_height());
            }
            || ()
        });
    }

    let on_keydown = {
        let lines = lines.clone();
        let input_ref = input_ref.clone();
        let ledger = props.ledger.clone();
        let on_set_theme = props.on_set_theme.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() != "Enter" {
                return;
            }
            let Some(input) = input_ref.cast::<HtmlInputElement>() else {
                return;
            };
            let command = input.value();
            let command = command.trim();
            if command.is_empty() {
                return;
            }
            input.set_value("");

            let mut log = (*lines).clone();
            log.push(Line::echo(command.to_string()));
            let outcome = dispatch(command, &ledger.borrow());
            match outcome {
                Outcome::Print(mut out) => log.append(&mut out),
                Outcome::OpenExternal { url, mut lines } => {
                    if let Some(window) = web_sys::window() {
                        let _ = window.open_with_url_and_target(url, "_blank");
                    }
                    log.append(&mut lines);
                }
                Outcome::SetTheme { theme, mut lines } => {
                    on_set_theme.emit(theme);
                    log.append(&mut lines);
                }
                Outcome::Clear => {
                    log = vec![Line::plain("Terminal cleared")];
                }
            }
            lines.set(log);
        })
    };

    let on_backdrop_click = {
        let cb = props.on_close.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let swallow_click = Callback::from(|e: MouseEvent| e.stop_propagation());
    let on_close_click = {
        let cb = props.on_close.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };

    if !props.open {
        return html! {};
    }

    html! {
        <div
            class="terminal-backdrop"
            style="position:fixed; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.65); z-index:50;"
            onclick={on_backdrop_click}
        >
            <div
                class="terminal-window"
                style="width:min(640px, 92vw); height:min(420px, 80vh); display:flex; flex-direction:column; border:1px solid var(--border-color); border-radius:10px;"
                onclick={swallow_click}
            >
                <div class="terminal-titlebar" style="display:flex; justify-content:space-between; align-items:center; padding:8px 12px;">
                    <span>{"visitor@portfolio:~"}</span>
                    <button onclick={on_close_click}>{"×"}</button>
                </div>
                <div ref={output_ref} class="terminal-output" style="flex:1; overflow-y:auto; padding:10px 12px;">
                    { for lines.iter().map(render_line) }
                </div>
                <div class="terminal-input-row" style="display:flex; gap:8px; padding:8px 12px; align-items:center;">
                    <span class="prompt">{"$"}</span>
                    <input
                        ref={input_ref}
                        class="terminal-input"
                        type="text"
                        spellcheck="false"
                        autocomplete="off"
                        placeholder="type a command"
                        onkeydown={on_keydown}
                        style="flex:1;"
                    />
                </div>
            </div>
        </div>
    }
}

fn render_line(line: &Line) -> Html {
    match line.kind {
        LineKind::Echo => html! {
            <p class="terminal-line">
                <span class="prompt">{"$ "}</span>
                { line.text.clone() }
            </p>
        },
        LineKind::Plain => html! { <p class="terminal-line">{ line.text.clone() }</p> },
        LineKind::Success => html! { <p class="terminal-line success">{ line.text.clone() }</p> },
        LineKind::Error => html! { <p class="terminal-line error">{ line.text.clone() }</p> },
    }
}

use crate::theme::Theme;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ThemeSwitcherProps {
    pub current: Theme,
    pub on_select: Callback<Theme>,
}

#[function_component(ThemeSwitcher)]
pub fn theme_switcher(props: &ThemeSwitcherProps) -> Html {
    html! {
        <div class="theme-switcher" style="position:fixed; bottom:16px; left:16px; display:flex; gap:6px; z-index:40;">
            { for Theme::ALL.iter().map(|t| {
                let theme = *t;
                let onclick = {
                    let cb = props.on_select.clone();
                    Callback::from(move |_: MouseEvent| cb.emit(theme))
                };
                html! {
                    <button
                        class={classes!("theme-btn", (props.current == theme).then_some("active"))}
                        {onclick}
                    >
                        { theme.as_str() }
                    </button>
                }
            }) }
        </div>
    }
}

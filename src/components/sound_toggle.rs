use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct SoundToggleProps {
    pub enabled: bool,
    pub on_toggle: Callback<()>,
}

#[function_component(SoundToggle)]
pub fn sound_toggle(props: &SoundToggleProps) -> Html {
    let onclick = {
        let cb = props.on_toggle.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    html! {
        <button
            id="sound-toggle"
            class="sound-toggle"
            style="position:fixed; bottom:16px; right:16px; z-index:40;"
            title={ if props.enabled { "Sound on" } else { "Sound off" } }
            {onclick}
        >
            { if props.enabled { "🔊" } else { "🔇" } }
        </button>
    }
}

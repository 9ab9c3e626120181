mod achievements;
mod components;
mod game;
mod intro;
mod state;
mod stats;
mod terminal;
mod theme;
mod util;

use components::app::App;

fn main() {
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
    }
    log::info!("RETRO PORTFOLIO LOADED! Press SPACE to start the intro.");
    yew::Renderer::<App>::new().render();
}

use std::cell::RefCell;
use std::rc::Rc;
use yew::prelude::*;

use crate::stats::{ContestStats, GfgStats, GithubStats, SourceState, StatsSnapshot};

#[function_component(StatsPanel)]
pub fn stats_panel() -> Html {
    let gfg = use_state(|| SourceState::<GfgStats>::Loading);
    let codeforces = use_state(|| SourceState::<ContestStats>::Loading);
    let github = use_state(|| SourceState::<GithubStats>::Loading);
    let snapshot = use_mut_ref(StatsSnapshot::default);

    {
        let gfg = gfg.clone();
        let codeforces = codeforces.clone();
        let github = github.clone();
        let snapshot = snapshot.clone();
        use_effect_with((), move |_| {
            refresh(false, gfg, codeforces, github, snapshot);
            || ()
        });
    }

    let on_refresh = {
        let gfg = gfg.clone();
        let codeforces = codeforces.clone();
        let github = github.clone();
        let snapshot = snapshot.clone();
        Callback::from(move |_: MouseEvent| {
            refresh(
                true,
                gfg.clone(),
                codeforces.clone(),
                github.clone(),
                snapshot.clone(),
            );
        })
    };

    let gfg_body = match &*gfg {
        SourceState::Loading => loading_body(),
        SourceState::Failed => failed_body(),
        SourceState::Ready(s) => html! {
            <>
                { stat_row("Coding Score", s.coding_score.to_string()) }
                { stat_row("Problems Solved", s.total_solved.to_string()) }
            </>
        },
    };
    let codeforces_body = match &*codeforces {
        SourceState::Loading => loading_body(),
        SourceState::Failed => failed_body(),
        SourceState::Ready(s) => html! {
            <>
                { stat_row("Rating", s.rating.clone()) }
                { stat_row("Max Rating", s.max_rating.clone()) }
                { stat_row("Rank", s.rank.clone()) }
            </>
        },
    };
    let github_body = match &*github {
        SourceState::Loading => loading_body(),
        SourceState::Failed => failed_body(),
        SourceState::Ready(s) => html! {
            <>
                { stat_row("Name", s.name.clone()) }
                { stat_row("Public Repos", s.public_repos.to_string()) }
                { stat_row("Followers", s.followers.to_string()) }
            </>
        },
    };

    html! {
        <div id="profile-stats" class="stats-panel">
            <div style="display:flex; justify-content:space-between; align-items:center; margin-bottom:10px;">
                <h3 style="margin:0;">{"Live Profile Stats"}</h3>
                <button onclick={on_refresh}>{"Refresh"}</button>
            </div>
            <div class="stats-grid" style="display:flex; gap:14px; flex-wrap:wrap;">
                { source_card("GeeksforGeeks", gfg_body) }
                { source_card("Codeforces", codeforces_body) }
                { source_card("GitHub", github_body) }
            </div>
        </div>
    }
}

fn source_card(title: &'static str, body: Html) -> Html {
    html! {
        <div class="stats-card" style="border:1px solid var(--border-color); border-radius:8px; padding:10px 14px; min-width:200px; display:flex; flex-direction:column; gap:8px; font-size:14px;">
            <h4 style="margin:0;">{ title }</h4>
            { body }
        </div>
    }
}

fn stat_row(label: &'static str, value: String) -> Html {
    html! {
        <div style="display:flex; align-items:center; gap:8px;">
            <span style="flex:1; font-weight:500;">{ label }</span>
            <span style="min-width:70px; text-align:right; font-variant-numeric:tabular-nums; font-weight:600;">{ value }</span>
        </div>
    }
}

fn loading_body() -> Html {
    html! { <div class="stats-loading" style="opacity:0.7;">{"Loading..."}</div> }
}

fn failed_body() -> Html {
    html! { <div class="stats-error">{"failed to load"}</div> }
}

/// Populate the three panels, preferring a fresh cache unless forced. Each
/// source resolves on its own; a success is merged into the shared snapshot
/// and persisted right away, so only successes are ever cached.
#[cfg(target_arch = "wasm32")]
fn refresh(
    force: bool,
    gfg: UseStateHandle<SourceState<GfgStats>>,
    codeforces: UseStateHandle<SourceState<ContestStats>>,
    github: UseStateHandle<SourceState<GithubStats>>,
    snapshot: Rc<RefCell<StatsSnapshot>>,
) {
    use crate::stats::{
        CODEFORCES_STATS_URL, CachedStats, GFG_STATS_URL, GITHUB_STATS_URL, parse_codeforces,
        parse_gfg, parse_github,
    };

    let now = js_sys::Date::now();
    if !force {
        if let Some(snap) = CachedStats::load(now) {
            gfg.set(match snap.gfg.clone() {
                Some(s) => SourceState::Ready(s),
                None => SourceState::Failed,
            });
            codeforces.set(match snap.codeforces.clone() {
                Some(s) => SourceState::Ready(s),
                None => SourceState::Failed,
            });
            github.set(match snap.github.clone() {
                Some(s) => SourceState::Ready(s),
                None => SourceState::Failed,
            });
            *snapshot.borrow_mut() = snap;
            return;
        }
    }

    gfg.set(SourceState::Loading);
    codeforces.set(SourceState::Loading);
    github.set(SourceState::Loading);
    *snapshot.borrow_mut() = StatsSnapshot::default();

    fetch_source(GFG_STATS_URL, parse_gfg, gfg, snapshot.clone(), |snap, v| {
        snap.gfg = Some(v)
    });
    fetch_source(
        CODEFORCES_STATS_URL,
        parse_codeforces,
        codeforces,
        snapshot.clone(),
        |snap, v| snap.codeforces = Some(v),
    );
    fetch_source(GITHUB_STATS_URL, parse_github, github, snapshot, |snap, v| {
        snap.github = Some(v)
    });
}

#[cfg(target_arch = "wasm32")]
fn fetch_source<T, P, M>(
    url: &'static str,
    parse: P,
    state: UseStateHandle<SourceState<T>>,
    snapshot: Rc<RefCell<StatsSnapshot>>,
    merge: M,
) where
    T: Clone + 'static,
    P: Fn(&str) -> Result<T, serde_json::Error> + 'static,
    M: Fn(&mut StatsSnapshot, T) + 'static,
{
    use crate::stats::{CachedStats, fetch_text};

    wasm_bindgen_futures::spawn_local(async move {
        let parsed = match fetch_text(url).await {
            Ok(body) => match parse(&body) {
                Ok(value) => Some(value),
                Err(err) => {
                    log::warn!("{url}: malformed payload: {err}");
                    None
                }
            },
            Err(err) => {
                log::warn!("{url}: fetch failed: {err:?}");
                None
            }
        };
        match parsed {
            Some(value) => {
                let merged = {
                    let mut snap = snapshot.borrow_mut();
                    merge(&mut snap, value.clone());
                    snap.clone()
                };
                CachedStats::store(&merged, js_sys::Date::now());
                state.set(SourceState::Ready(value));
            }
            None => state.set(SourceState::Failed),
        }
    });
}

#[cfg(not(target_arch = "wasm32"))]
fn refresh(
    _force: bool,
    _gfg: UseStateHandle<SourceState<GfgStats>>,
    _codeforces: UseStateHandle<SourceState<ContestStats>>,
    _github: UseStateHandle<SourceState<GithubStats>>,
    _snapshot: Rc<RefCell<StatsSnapshot>>,
) {
}

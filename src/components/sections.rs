use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use yew::prelude::*;

use super::stats_panel::StatsPanel;
use crate::achievements::{SECTION_VISIBILITY_THRESHOLD, SectionTracker};

/// Count-up duration for the achievement counters.
const COUNTER_DURATION_MS: f64 = 2_000.0;
const COUNTER_TICK_MS: i32 = 16;

struct Project {
    name: &'static str,
    blurb: &'static str,
    tags: &'static str,
}

const PROJECTS: &[Project] = &[
    Project {
        name: "AI Health Symptom Intelligence System",
        blurb: "Symptom triage with explainable ML models.",
        tags: "Python · ML",
    },
    Project {
        name: "AI CRM Automation Agents",
        blurb: "Agent workflows that keep CRMs up to date on their own.",
        tags: "n8n · LLMs",
    },
    Project {
        name: "Voice AI Bot Workflow System",
        blurb: "Voice-driven task automation pipelines.",
        tags: "Python · NLP",
    },
    Project {
        name: "Cancer Detection using Deep Learning",
        blurb: "CNN classifier for medical imaging.",
        tags: "TensorFlow",
    },
    Project {
        name: "Handwriting Improvement App",
        blurb: "Computer-vision feedback on handwriting practice.",
        tags: "OpenCV",
    },
];

#[derive(Properties, PartialEq, Clone)]
pub struct SectionsProps {
    pub unlock: Callback<&'static str>,
    pub intro_done: bool,
}

#[function_component(Sections)]
pub fn sections(props: &SectionsProps) -> Html {
    let counters_started = use_state_eq(|| false);
    let tracker = use_mut_ref(SectionTracker::default);

    // Observe section visibility once the intro releases the page.
    {
        let unlock = props.unlock.clone();
        let counters_started = counters_started.clone();
        let tracker = tracker.clone();
        use_effect_with(props.intro_done, move |done| {
            if !*done {
                return Box::new(|| {}) as Box<dyn FnOnce()>;
            }
            let document = web_sys::window()
                .expect("window")
                .document()
                .expect("document");
            let observe_cb = Closure::wrap(Box::new(
                move |entries: js_sys::Array, _obs: web_sys::IntersectionObserver| {
                    for entry in entries.iter() {
                        let entry: web_sys::IntersectionObserverEntry = entry.unchecked_into();
                        if !entry.is_intersecting() {
                            continue;
                        }
                        let id = entry.target().id();
                        if id.is_empty() {
                            continue;
                        }
                        if id == "achievements" {
                            counters_started.set(true);
                        }
                        for key in tracker.borrow_mut().record(&id) {
                            unlock.emit(key);
                        }
                    }
                },
            )
                as Box<dyn FnMut(js_sys::Array, web_sys::IntersectionObserver)>);

            let init = web_sys::IntersectionObserverInit::new();
            init.set_threshold(&wasm_bindgen::JsValue::from(SECTION_VISIBILITY_THRESHOLD));
            let observer = web_sys::IntersectionObserver::new_with_options(
                observe_cb.as_ref().unchecked_ref(),
                &init,
            )
            .expect("intersection observer");

            if let Ok(list) = document.query_selector_all("section[id]") {
                for i in 0..list.length() {
                    if let Some(node) = list.item(i) {
                        if let Ok(el) = node.dyn_into::<web_sys::Element>() {
                            observer.observe(&el);
                        }
                    }
                }
            }

            Box::new(move || {
                observer.disconnect();
                drop(observe_cb);
            }) as Box<dyn FnOnce()>
        });
    }

    let run_counters = *counters_started;
    html! {
        <>
            <section id="about" class="section">
                <h2 class="section-title">{"// About"}</h2>
                <p>{"Computer Science student at VIT Bhopal, specializing in AI, ML, and full-stack development."}</p>
                <p>{"Technical Co-Lead at the Stats-O-Locked Club. 500+ DSA problems solved and counting."}</p>
            </section>

            <section id="projects" class="section">
                <h2 class="section-title">{"// Projects"}</h2>
                <div class="project-grid">
                    { for PROJECTS.iter().map(|p| html! {
                        <div class="project-card">
                            <h3>{ p.name }</h3>
                            <p>{ p.blurb }</p>
                            <span class="project-tags">{ p.tags }</span>
                        </div>
                    }) }
                </div>
            </section>

            <section id="skills" class="section">
                <h2 class="section-title">{"// Skills"}</h2>
                <ul class="skills-list">
                    <li>{"Languages: Python, C++, Java, JavaScript, Rust"}</li>
                    <li>{"AI/ML: Machine Learning, Deep Learning, NLP, Computer Vision"}</li>
                    <li>{"Tools: React.js, n8n, Git, Firebase, REST APIs"}</li>
                </ul>
            </section>

            <section id="achievements" class="section">
                <h2 class="section-title">{"// Achievements"}</h2>
                <div class="counter-grid">
                    <Counter label="DSA Problems" target={500} run={run_counters} />
                    <Counter label="Projects Shipped" target={12} run={run_counters} />
                    <Counter label="Contests Entered" target={67} run={run_counters} />
                </div>
                <StatsPanel />
            </section>

            <section id="contact" class="section">
                <h2 class="section-title">{"// Contact"}</h2>
                <ul class="contact-list">
                    <li>{"GitHub: github.com/Ankit-Mahadani"}</li>
                    <li>{"GeeksforGeeks: geeksforgeeks.org/profile/ankitmahadani"}</li>
                    <li>{"Codeforces: codeforces.com/profile/ankitmahadani181"}</li>
                </ul>
            </section>
        </>
    }
}

#[derive(Properties, PartialEq, Clone)]
struct CounterProps {
    label: &'static str,
    target: u32,
    run: bool,
}

/// Counts up to its target over a fixed duration, starting when `run` first
/// turns true. The interval cancels itself once the target is reached.
#[function_component(Counter)]
fn counter(props: &CounterProps) -> Html {
    let shown = use_state_eq(|| 0u32);
    let target = props.target;

    {
        let shown = shown.clone();
        use_effect_with(props.run, move |run| {
            if !*run {
                return Box::new(|| {}) as Box<dyn FnOnce()>;
            }
            let window = web_sys::window().expect("window");
            let accumulated = Rc::new(RefCell::new(0.0f64));
            let interval_id: Rc<RefCell<Option<i32>>> = Rc::new(RefCell::new(None));
            let step = target as f64 / (COUNTER_DURATION_MS / COUNTER_TICK_MS as f64);
            let tick = {
                let window = window.clone();
                let interval_id = interval_id.clone();
                Closure::wrap(Box::new(move || {
                    let mut acc = accumulated.borrow_mut();
                    *acc += step;
                    if *acc >= target as f64 {
                        shown.set(target);
                        if let Some(id) = interval_id.borrow_mut().take() {
                            window.clear_interval_with_handle(id);
                        }
                    } else {
                        shown.set(*acc as u32);
                    }
                }) as Box<dyn FnMut()>)
            };
            if let Ok(id) = window.set_interval_with_callback_and_timeout_and_arguments_0(
                tick.as_ref().unchecked_ref(),
                COUNTER_TICK_MS,
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

    html! {
        <div class="counter-card">
            <div class="counter-value">{ format!("{}+", *shown) }</div>
            <div class="counter-label">{ props.label }</div>
        </div>
    }
}

use crate::achievements::AchievementDef;
use std::rc::Rc;
use yew::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub def: &'static AchievementDef,
}

/// The stack of visible unlock notifications. Kept in a reducer so pushes
/// and timed dismissals always see the current stack.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastList {
    pub items: Vec<Toast>,
}

pub enum ToastsAction {
    Push { id: u32, def: &'static AchievementDef },
    Dismiss { id: u32 },
}

impl Reducible for ToastList {
    type Action = ToastsAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut new = (*self).clone();
        match action {
            ToastsAction::Push { id, def } => new.items.push(Toast { id, def }),
            ToastsAction::Dismiss { id } => new.items.retain(|t| t.id != id),
        }
        Rc::new(new)
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct AchievementToastsProps {
    pub toasts: Vec<Toast>,
}

#[function_component(AchievementToasts)]
pub fn achievement_toasts(props: &AchievementToastsProps) -> Html {
    html! {
        <div
            id="achievement-container"
            style="position:fixed; top:80px; right:16px; display:flex; flex-direction:column; gap:10px; z-index:60;"
        >
            { for props.toasts.iter().map(|t| html! {
                <div key={t.id} class="achievement-notification">
                    <img src={t.def.icon} class="achievement-icon" alt="achievement" />
                    <div class="achievement-text">
                        <h4>{ t.def.title }</h4>
                        <p>{ t.def.desc }</p>
                    </div>
                </div>
            }) }
        </div>
    }
}

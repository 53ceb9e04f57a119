//! Travel-advisor chat widget.
//!
//! Replies come from `util::advisor::advise`, seeded per message so the
//! conversation varies while each reply stays reproducible.

#[cfg(test)]
#[path = "advisor_panel_test.rs"]
mod advisor_panel_test;

use leptos::prelude::*;

use crate::util::advisor::{AdvisorInput, Season, TimeOfDay, advise};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Speaker {
    Operator,
    Advisor,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ChatLine {
    pub speaker: Speaker,
    pub text: String,
}

/// Season, time of day and a per-message seed from the browser clock.
fn clock_context(turn: u64) -> (Season, TimeOfDay, u64) {
    #[cfg(feature = "csr")]
    {
        let now = js_sys::Date::new_0();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let millis = now.get_time() as u64;
        (Season::from_month(now.get_month() + 1), TimeOfDay::from_hour(now.get_hours()), millis ^ turn)
    }
    #[cfg(not(feature = "csr"))]
    {
        (Season::Summer, TimeOfDay::Afternoon, turn)
    }
}

/// Append the operator's message and the advisor's reply. Blank messages
/// are ignored.
pub(crate) fn exchange(lines: &mut Vec<ChatLine>, message: &str, season: Season, time_of_day: TimeOfDay, seed: u64) {
    let message = message.trim();
    if message.is_empty() {
        return;
    }
    let reply = advise(AdvisorInput { message, season, time_of_day, seed });
    lines.push(ChatLine { speaker: Speaker::Operator, text: message.to_owned() });
    lines.push(ChatLine { speaker: Speaker::Advisor, text: reply });
}

#[component]
pub fn AdvisorPanel() -> impl IntoView {
    let open = RwSignal::new(false);
    let draft = RwSignal::new(String::new());
    let lines = RwSignal::new(Vec::<ChatLine>::new());

    let send = move || {
        let message = draft.get_untracked();
        let turn = lines.with_untracked(|l| l.len() as u64);
        let (season, time_of_day, seed) = clock_context(turn);
        lines.update(|l| exchange(l, &message, season, time_of_day, seed));
        draft.set(String::new());
    };

    view! {
        <aside class="advisor">
            <button class="btn advisor__toggle" on:click=move |_| open.update(|o| *o = !*o)>
                {move || if open.get() { "Close advisor" } else { "Travel advisor" }}
            </button>
            <Show when=move || open.get()>
                <div class="advisor__log">
                    {move || {
                        lines
                            .get()
                            .into_iter()
                            .map(|line| {
                                let class = match line.speaker {
                                    Speaker::Operator => "advisor__line advisor__line--operator",
                                    Speaker::Advisor => "advisor__line advisor__line--advisor",
                                };
                                view! { <p class=class>{line.text}</p> }
                            })
                            .collect::<Vec<_>>()
                    }}
                </div>
                <input
                    class="advisor__input"
                    type="text"
                    placeholder="Ask about beaches, mountains, food..."
                    prop:value=move || draft.get()
                    on:input=move |ev| draft.set(event_target_value(&ev))
                    on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                        if ev.key() == "Enter" {
                            ev.prevent_default();
                            send();
                        }
                    }
                />
                <button class="btn btn--primary" on:click=move |_| send()>
                    "Ask"
                </button>
            </Show>
        </aside>
    }
}

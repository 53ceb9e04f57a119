//! Dismissible success/failure notice.
//!
//! Server payloads go in a collapsed details block so the headline stays
//! readable.

#[cfg(test)]
#[path = "notice_banner_test.rs"]
mod notice_banner_test;

use entities::{Notice, NoticeKind};
use leptos::prelude::*;

fn kind_class(kind: NoticeKind) -> &'static str {
    match kind {
        NoticeKind::Success => "notice notice--success",
        NoticeKind::Partial => "notice notice--warning",
        NoticeKind::Error => "notice notice--error",
    }
}

#[component]
pub fn NoticeBanner(#[prop(into)] notice: Signal<Option<Notice>>, on_dismiss: Callback<()>) -> impl IntoView {
    move || {
        notice.get().map(|notice| {
            let details = notice.details.clone();
            view! {
                <div class=kind_class(notice.kind) role="status">
                    <strong class="notice__title">{notice.title.clone()}</strong>
                    <span class="notice__message">{notice.message.clone()}</span>
                    {details.map(|details| {
                        view! {
                            <details class="notice__details">
                                <summary>"Details"</summary>
                                <pre>{details}</pre>
                            </details>
                        }
                    })}
                    <button class="btn notice__dismiss" on:click=move |_| on_dismiss.run(()) title="Dismiss">
                        "×"
                    </button>
                </div>
            }
        })
    }
}

//! Toast-style banner for the current notice.

use leptos::prelude::*;

use crate::state::notice::{NoticeKind, NoticeState};

#[cfg(feature = "csr")]
const NOTICE_TIMEOUT_MS: u64 = 4_000;

#[component]
pub fn NoticeBanner() -> impl IntoView {
    let notices = expect_context::<RwSignal<NoticeState>>();

    move || {
        notices.with(|n| n.current.clone()).map(|notice| {
            let class = match notice.kind {
                NoticeKind::Info => "notice notice--info",
                NoticeKind::Warning => "notice notice--warning",
            };
            let id = notice.id;
            view! {
                <div class=class role="status">
                    <span class="notice__message">{notice.message}</span>
                    <button class="notice__close" on:click=move |_| notices.update(|n| n.dismiss(id))>
                        "×"
                    </button>
                </div>
            }
        })
    }
}

/// Post the "not authorized" notice and schedule its dismissal.
pub fn post_not_authorized(notices: RwSignal<NoticeState>) {
    let Some(id) = notices.try_update(NoticeState::not_authorized) else {
        return;
    };
    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        gloo_timers::future::sleep(std::time::Duration::from_millis(NOTICE_TIMEOUT_MS)).await;
        notices.try_update(|n| n.dismiss(id));
    });
    #[cfg(not(feature = "csr"))]
    let _ = id;
}

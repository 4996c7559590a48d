use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::components::nav::NavBar;

#[component]
pub fn SettingsPage() -> impl IntoView {
    let api = use_api();
    let (api_key, set_api_key) = signal(String::new());
    let (is_checking, set_is_checking) = signal(false);
    let (status, set_status) = signal(Option::<(String, bool)>::None); // 消息内容, 是否出错

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let key = api_key.get().trim().to_string();
        if key.is_empty() {
            set_status.set(Some(("请输入 API Key".to_string(), true)));
            return;
        }

        let api = api.clone();
        set_is_checking.set(true);
        set_status.set(None);
        spawn_local(async move {
            let outcome = match api.validate_api_key(&key).await {
                Ok(v) if v.success => (
                    v.message.unwrap_or_else(|| "API Key 有效".to_string()),
                    false,
                ),
                Ok(v) => (
                    v.error
                        .or(v.message)
                        .unwrap_or_else(|| "API Key 无效".to_string()),
                    true,
                ),
                Err(e) => (format!("验证失败: {}", e), true),
            };
            set_status.set(Some(outcome));
            set_is_checking.set(false);
        });
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-7xl mx-auto space-y-8">
                <NavBar />
                <div class="card bg-base-100 shadow max-w-md">
                    <form class="card-body" on:submit=on_submit>
                        <h2 class="card-title">"Gemini API Key"</h2>
                        {move || {
                            status
                                .get()
                                .map(|(msg, is_err)| {
                                    let class = if is_err {
                                        "alert alert-error text-sm py-2"
                                    } else {
                                        "alert alert-success text-sm py-2"
                                    };
                                    view! {
                                        <div role="alert" class=class>
                                            {msg}
                                        </div>
                                    }
                                })
                        }}
                        <input
                            type="password"
                            placeholder="AIza..."
                            on:input=move |ev| set_api_key.set(event_target_value(&ev))
                            prop:value=api_key
                            class="input input-bordered"
                        />
                        <button class="btn btn-primary" disabled=move || is_checking.get()>
                            {move || {
                                if is_checking.get() {
                                    view! { <span class="loading loading-spinner"></span> "验证中..." }
                                        .into_any()
                                } else {
                                    "验证".into_any()
                                }
                            }}
                        </button>
                    </form>
                </div>
            </div>
        </div>
    }
}

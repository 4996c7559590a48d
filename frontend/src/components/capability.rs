use gemini_vision_client::{AppRoute, RequestOverrides, ResponseData};
use gemini_vision_shared::{Operation, PayloadKind};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::components::image_qa::ImageQaPanel;
use crate::components::nav::NavBar;

pub fn render_data(data: &ResponseData) -> String {
    match data {
        ResponseData::Json(value) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
        ResponseData::Text(text) => text.clone(),
    }
}

fn payload_label(kind: PayloadKind) -> &'static str {
    match kind {
        PayloadKind::Empty => "-",
        PayloadKind::Structured => "JSON",
        PayloadKind::Multipart => "multipart",
    }
}

/// 能力页面：列出该页面使用的后端接口
#[component]
pub fn CapabilityPage(route: AppRoute) -> impl IntoView {
    let descriptor = route.descriptor();
    let rows = route
        .operations()
        .map(|op| view! { <OperationRow op=*op /> })
        .collect_view();

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-7xl mx-auto space-y-8">
                <NavBar />
                <h1 class="text-3xl font-bold">{descriptor.title.unwrap_or(descriptor.name)}</h1>
                {(route == AppRoute::ImageQa).then(|| view! { <ImageQaPanel /> })}
                <div class="card bg-base-100 shadow">
                    <div class="card-body">
                        <h2 class="card-title">"接口"</h2>
                        <table class="table">
                            <thead>
                                <tr>
                                    <th>"方法"</th>
                                    <th>"路径"</th>
                                    <th>"请求体"</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>{rows}</tbody>
                        </table>
                    </div>
                </div>
            </div>
        </div>
    }
}

/// 单个接口；查询类接口可直接加载并查看响应
#[component]
fn OperationRow(op: Operation) -> impl IntoView {
    let api = use_api();
    let (result, set_result) = signal(Option::<Result<String, String>>::None);
    let (loading, set_loading) = signal(false);

    let on_load = move |_| {
        let api = api.clone();
        set_loading.set(true);
        spawn_local(async move {
            let outcome = api
                .request(op.path, None, RequestOverrides::method(op.method))
                .await
                .map(|envelope| render_data(&envelope.data))
                .map_err(|e| e.to_string());
            set_result.set(Some(outcome));
            set_loading.set(false);
        });
    };

    view! {
        <tr>
            <td>
                <span class="badge badge-outline">{op.method.as_str()}</span>
            </td>
            <td class="font-mono">{op.path}</td>
            <td>{payload_label(op.payload)}</td>
            <td>
                {(op.payload == PayloadKind::Empty)
                    .then(|| {
                        view! {
                            <button
                                class="btn btn-xs"
                                on:click=on_load
                                disabled=move || loading.get()
                            >
                                "加载"
                            </button>
                        }
                    })}
            </td>
        </tr>
        {move || {
            result
                .get()
                .map(|outcome| match outcome {
                    Ok(text) => {
                        view! {
                            <tr>
                                <td colspan="4">
                                    <pre class="bg-base-200 rounded p-2 text-xs overflow-x-auto">
                                        {text}
                                    </pre>
                                </td>
                            </tr>
                        }
                            .into_any()
                    }
                    Err(e) => {
                        view! {
                            <tr>
                                <td colspan="4">
                                    <div role="alert" class="alert alert-error text-sm py-2">
                                        {e}
                                    </div>
                                </td>
                            </tr>
                        }
                            .into_any()
                    }
                })
        }}
    }
}

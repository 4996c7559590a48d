use gemini_vision_shared::ImageQaForm;
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::web::file::read_selected_file;

/// 上传图像并提问
#[component]
pub fn ImageQaPanel() -> impl IntoView {
    let api = use_api();
    let file_input: NodeRef<html::Input> = NodeRef::new();
    let (question, set_question) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (answer, set_answer) = signal(Option::<Result<String, String>>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(input) = file_input.get() else {
            return;
        };

        let api = api.clone();
        let question = question.get();
        set_is_submitting.set(true);
        set_answer.set(None);

        spawn_local(async move {
            let outcome = match read_selected_file(&input).await {
                Ok(Some(image)) => api
                    .image_qa(ImageQaForm {
                        image,
                        question,
                        model: None,
                    })
                    .await
                    .map_err(|e| e.to_string())
                    .and_then(|result| {
                        if result.success {
                            Ok(result.answer.unwrap_or_default())
                        } else {
                            Err(result.error.unwrap_or_else(|| "处理失败".to_string()))
                        }
                    }),
                Ok(None) => Err("请选择图像".to_string()),
                Err(e) => Err(e),
            };
            set_answer.set(Some(outcome));
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="card bg-base-100 shadow">
            <form class="card-body" on:submit=on_submit>
                <h2 class="card-title">"提问"</h2>
                <input
                    type="file"
                    accept="image/*"
                    node_ref=file_input
                    class="file-input file-input-bordered"
                />
                <input
                    type="text"
                    placeholder="图片里有什么？"
                    on:input=move |ev| set_question.set(event_target_value(&ev))
                    prop:value=question
                    class="input input-bordered"
                />
                <button class="btn btn-primary" disabled=move || is_submitting.get()>
                    {move || {
                        if is_submitting.get() {
                            view! { <span class="loading loading-spinner"></span> "处理中..." }
                                .into_any()
                        } else {
                            "提交".into_any()
                        }
                    }}
                </button>
                {move || {
                    answer
                        .get()
                        .map(|outcome| match outcome {
                            Ok(text) => view! { <p class="whitespace-pre-wrap">{text}</p> }.into_any(),
                            Err(e) => {
                                view! {
                                    <div role="alert" class="alert alert-error text-sm py-2">
                                        {e}
                                    </div>
                                }
                                    .into_any()
                            }
                        })
                }}
            </form>
        </div>
    }
}

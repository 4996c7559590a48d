use gemini_vision_client::{AppRoute, ROUTES};
use leptos::prelude::*;

use crate::components::nav::NavBar;
use crate::web::router::Link;

#[component]
pub fn HomePage() -> impl IntoView {
    let cards = ROUTES
        .iter()
        .filter(|r| r.route.operations().next().is_some())
        .map(|r| {
            let count = r.route.operations().count();
            view! {
                <Link to=r.path class="card bg-base-100 shadow hover:shadow-lg transition-shadow">
                    <div class="card-body">
                        <h2 class="card-title">{r.title.unwrap_or(r.name)}</h2>
                        <p class="text-base-content/70">{format!("{} 个接口", count)}</p>
                    </div>
                </Link>
            }
        })
        .collect_view();

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-7xl mx-auto space-y-8">
                <NavBar />
                <div class="grid grid-cols-1 md:grid-cols-3 gap-4">{cards}</div>
                <div class="text-sm text-base-content/50">
                    "API Key 可在"
                    <Link to=AppRoute::Settings.to_path() class="link">"设置"</Link>
                    "页面中验证。"
                </div>
            </div>
        </div>
    }
}

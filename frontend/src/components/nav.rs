use gemini_vision_client::{AppRoute, ROUTES};
use leptos::prelude::*;

use crate::web::router::{Link, use_router};

/// 顶部导航栏
///
/// 路由出口在每次导航时重新渲染页面，这里只需读取一次当前路由。
#[component]
pub fn NavBar() -> impl IntoView {
    let current = use_router().current_route().get_untracked();

    let links = ROUTES
        .iter()
        .filter(|r| r.route != AppRoute::NotFound)
        .map(|r| {
            let class = if r.route == current {
                "btn btn-ghost btn-sm btn-active"
            } else {
                "btn btn-ghost btn-sm"
            };
            view! {
                <li>
                    <Link to=r.path class=class>
                        {r.title.unwrap_or(r.name)}
                    </Link>
                </li>
            }
        })
        .collect_view();

    view! {
        <div class="navbar bg-base-100 rounded-box shadow">
            <div class="flex-1 px-2 font-bold">"Gemini图像处理应用"</div>
            <ul class="menu menu-horizontal gap-1">{links}</ul>
        </div>
    }
}

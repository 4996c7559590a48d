//! Gemini 图像处理应用 - 浏览器前端
//!
//! 核心逻辑位于 `gemini-vision-client`，本 crate 只负责浏览器绑定：
//! - `web::http`: 基于 fetch 的传输原语
//! - `web::router`: History API 路由服务
//! - `web::title`: 文档标题写入
//! - `web::console`: tracing 输出到浏览器控制台
//! - `components`: UI 组件层

mod api;
mod components {
    pub mod capability;
    pub mod home;
    mod image_qa;
    mod nav;
    pub mod settings;
}

use crate::components::capability::CapabilityPage;
use crate::components::home::HomePage;
use crate::components::settings::SettingsPage;

use gemini_vision_client::AppRoute;
use leptos::prelude::*;

// 原生 Web API 封装模块
pub(crate) mod web {
    pub mod console;
    pub mod file;
    mod http;
    pub mod router;
    mod title;

    pub use http::FetchClient;
}

pub use web::console::init_logging;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Settings => view! { <SettingsPage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"页面未找到"</p>
                </div>
            </div>
        }
        .into_any(),
        route => view! { <CapabilityPage route=route /> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 提供 API 客户端
    api::provide_api();

    view! {
        // 2. 路由器组件：首屏导航同样经过守卫
        <Router>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}

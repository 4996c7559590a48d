//! 导航守卫与导航状态机
//!
//! 守卫只有一个副作用：根据目标路由的标题设置文档标题。
//! 它从不阻止或重定向导航。文档标题的写入方式由 [`TitleSink`] 注入，
//! 浏览器实现位于 frontend crate。

use crate::route::{RouteDescriptor, RouteTable};
use std::cell::Cell;
use std::rc::Rc;

/// 应用名称，作为所有页面标题的后缀
pub const APP_TITLE: &str = "Gemini图像处理应用";

/// 页面标题格式：`{title} - Gemini图像处理应用`
pub fn page_title(title: &str) -> String {
    format!("{} - {}", title, APP_TITLE)
}

/// 文档标题的写入端
pub trait TitleSink {
    fn set_title(&self, title: &str);
}

impl<T: TitleSink + ?Sized> TitleSink for &T {
    fn set_title(&self, title: &str) {
        (**self).set_title(title)
    }
}

impl<T: TitleSink + ?Sized> TitleSink for Rc<T> {
    fn set_title(&self, title: &str) {
        (**self).set_title(title)
    }
}

/// 全局前置守卫
#[derive(Debug, Clone, Copy, Default)]
pub struct NavigationGuard<S> {
    sink: S,
}

impl<S: TitleSink> NavigationGuard<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// 每次导航前调用，目标没有标题时不做任何事
    pub fn before_each(&self, to: &RouteDescriptor, _from: &RouteDescriptor) {
        if let Some(title) = to.title {
            self.sink.set_title(&page_title(title));
        }
    }
}

/// 导航状态机
///
/// 初始位于 `/`，每次导航先执行守卫再提交目标，没有终止状态。
pub struct Navigator<S> {
    guard: NavigationGuard<S>,
    current: Cell<&'static RouteDescriptor>,
}

impl<S: TitleSink> Navigator<S> {
    pub fn new(sink: S) -> Self {
        Self {
            guard: NavigationGuard::new(sink),
            current: Cell::new(RouteTable::resolve("/")),
        }
    }

    pub fn guard(&self) -> &NavigationGuard<S> {
        &self.guard
    }

    pub fn current(&self) -> &'static RouteDescriptor {
        self.current.get()
    }

    /// 导航到 `path`，返回最终提交的路由
    pub fn navigate(&self, path: &str) -> &'static RouteDescriptor {
        let from = self.current.get();
        let to = RouteTable::resolve(path);

        self.guard.before_each(to, from);
        self.current.set(to);

        tracing::debug!(from = from.path, to = to.path, requested = path, "navigated");
        to
    }
}

//! 路由定义模块 - 领域模型
//!
//! 纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 路由表在编译期确定，运行期间不可修改。

use gemini_vision_shared::Operation;
use gemini_vision_shared::protocol::{OPERATIONS, UPSCALE_IMAGE};
use std::fmt::Display;

/// 应用路由枚举（路由对应的页面组件）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppRoute {
    /// 首页 (默认路由)
    #[default]
    Home,
    ImageQa,
    ImageGeneration,
    ImageEditing,
    ObjectDetection,
    ImageSegmentation,
    VideoGeneration,
    Settings,
    /// 页面未找到
    NotFound,
}

/// 路由表中的一条声明
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub path: &'static str,
    pub name: &'static str,
    pub route: AppRoute,
    /// 页面标题，缺省时导航不修改文档标题
    pub title: Option<&'static str>,
}

const fn route(
    path: &'static str,
    name: &'static str,
    route: AppRoute,
    title: &'static str,
) -> RouteDescriptor {
    RouteDescriptor {
        path,
        name,
        route,
        title: Some(title),
    }
}

/// 全部路由声明
pub static ROUTES: &[RouteDescriptor] = &[
    route("/", "Home", AppRoute::Home, "首页"),
    route("/image-qa", "ImageQA", AppRoute::ImageQa, "图像问答"),
    route(
        "/image-generation",
        "ImageGeneration",
        AppRoute::ImageGeneration,
        "图像生成",
    ),
    route(
        "/image-editing",
        "ImageEditing",
        AppRoute::ImageEditing,
        "图像编辑",
    ),
    route(
        "/object-detection",
        "ObjectDetection",
        AppRoute::ObjectDetection,
        "目标检测",
    ),
    route(
        "/image-segmentation",
        "ImageSegmentation",
        AppRoute::ImageSegmentation,
        "图像分割",
    ),
    route(
        "/video-generation",
        "VideoGeneration",
        AppRoute::VideoGeneration,
        "视频生成",
    ),
    route("/settings", "Settings", AppRoute::Settings, "设置"),
    route("/404", "NotFound", AppRoute::NotFound, "页面未找到"),
];

/// 路由表查询
pub struct RouteTable;

impl RouteTable {
    pub fn routes() -> &'static [RouteDescriptor] {
        ROUTES
    }

    /// 把 URL 解析为路由声明
    ///
    /// 忽略查询串、片段和末尾的 `/`，路径大小写不敏感。
    /// 未声明的路径解析为未找到页面。
    pub fn resolve(path: &str) -> &'static RouteDescriptor {
        let path = normalize_path(path);
        ROUTES
            .iter()
            .find(|r| r.path.eq_ignore_ascii_case(path))
            .unwrap_or_else(Self::not_found)
    }

    pub fn by_name(name: &str) -> Option<&'static RouteDescriptor> {
        ROUTES.iter().find(|r| r.name == name)
    }

    pub fn by_route(route: AppRoute) -> &'static RouteDescriptor {
        ROUTES
            .iter()
            .find(|r| r.route == route)
            .unwrap_or_else(Self::not_found)
    }

    fn not_found() -> &'static RouteDescriptor {
        // 表中最后一条为 NotFound
        &ROUTES[ROUTES.len() - 1]
    }
}

fn normalize_path(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = path[..end].trim_end_matches('/');
    if path.is_empty() { "/" } else { path }
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        RouteTable::resolve(path).route
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        self.descriptor().path
    }

    pub fn descriptor(&self) -> &'static RouteDescriptor {
        RouteTable::by_route(*self)
    }

    /// 该页面使用的后端能力
    ///
    /// 按路径前缀归属；超分辨率接口不在编辑路径下，单独归入图像编辑。
    pub fn operations(&self) -> impl Iterator<Item = &'static Operation> + use<> {
        let prefix = match self {
            Self::Home | Self::Settings | Self::NotFound => None,
            _ => Some(self.to_path()),
        };
        let route = *self;
        OPERATIONS.iter().filter(move |op| {
            let under_prefix = prefix.is_some_and(|p| {
                op.path == p || op.path.strip_prefix(p).is_some_and(|rest| rest.starts_with('/'))
            });
            under_prefix || (route == Self::ImageEditing && op.path == UPSCALE_IMAGE.operation.path)
        })
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_paths_and_names_are_unique() {
        let paths: HashSet<_> = ROUTES.iter().map(|r| r.path).collect();
        let names: HashSet<_> = ROUTES.iter().map(|r| r.name).collect();
        let routes: HashSet<_> = ROUTES.iter().map(|r| r.route).collect();
        assert_eq!(paths.len(), ROUTES.len());
        assert_eq!(names.len(), ROUTES.len());
        assert_eq!(routes.len(), ROUTES.len());
    }

    #[test]
    fn test_not_found_is_last_entry() {
        assert_eq!(ROUTES.last().map(|r| r.route), Some(AppRoute::NotFound));
    }

    #[test]
    fn test_resolve_declared_paths() {
        for r in ROUTES {
            assert_eq!(RouteTable::resolve(r.path), r);
            assert_eq!(AppRoute::from_path(r.path), r.route);
            assert_eq!(r.route.to_path(), r.path);
        }
    }

    #[test]
    fn test_resolve_ignores_query_fragment_and_trailing_slash() {
        assert_eq!(AppRoute::from_path("/image-qa/"), AppRoute::ImageQa);
        assert_eq!(AppRoute::from_path("/image-qa?model=x"), AppRoute::ImageQa);
        assert_eq!(AppRoute::from_path("/settings#key"), AppRoute::Settings);
        assert_eq!(AppRoute::from_path("/Image-QA"), AppRoute::ImageQa);
        assert_eq!(AppRoute::from_path(""), AppRoute::Home);
        assert_eq!(AppRoute::from_path("/?tab=1"), AppRoute::Home);
    }

    #[test]
    fn test_undeclared_path_resolves_to_not_found() {
        for path in ["/does-not-exist", "/image-qa/extra", "no-slash", "/图像"] {
            let r = RouteTable::resolve(path);
            assert_eq!(r.route, AppRoute::NotFound, "{}", path);
            assert_eq!(r.title, Some("页面未找到"));
        }
    }

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(
            RouteTable::by_name("ImageQA").map(|r| r.path),
            Some("/image-qa")
        );
        assert!(RouteTable::by_name("imageqa").is_none());
    }

    #[test]
    fn test_operations_grouped_by_page() {
        let paths = |route: AppRoute| route.operations().map(|op| op.path).collect::<Vec<_>>();

        assert_eq!(paths(AppRoute::ImageQa), vec!["/image-qa", "/image-qa/models"]);
        assert!(paths(AppRoute::ImageEditing).contains(&"/image-upscale"));
        assert!(paths(AppRoute::ObjectDetection).contains(&"/object-detection/opencv"));
        assert!(paths(AppRoute::ImageSegmentation).contains(&"/image-segmentation/opencv"));
        assert!(paths(AppRoute::Settings).is_empty());
        assert!(paths(AppRoute::Home).is_empty());

        // 除工具类接口外，每个后端能力恰好属于一个页面
        let mut covered: Vec<&str> = ROUTES
            .iter()
            .flat_map(|r| r.route.operations().map(|op| op.name))
            .collect();
        let total = covered.len();
        covered.sort_unstable();
        covered.dedup();
        assert_eq!(covered.len(), total);
        assert_eq!(total, OPERATIONS.len() - 3);
    }

    #[test]
    fn test_display_is_path() {
        assert_eq!(AppRoute::VideoGeneration.to_string(), "/video-generation");
        assert_eq!(AppRoute::default(), AppRoute::Home);
    }
}

pub mod animation;
pub mod app;
pub mod canvas;
pub mod constants;
pub mod document;
pub mod error;
pub mod gallery;
pub mod input;
pub mod media;
pub mod navigation;
pub mod page;
pub mod scene_graph;
pub mod scroll;
pub mod template;
pub mod tween;
pub mod viewport;

pub use app::{navigate, App, NavigationOutcome, NavigationRequest, PageSource};
pub use canvas::Renderer;
pub use document::{is_internal_link, ContentFragment, Document, Rgb, Style, Theme};
pub use error::NavigationError;
pub use input::{normalize_wheel, WheelDelta};
pub use scene_graph::{DrawItem, SceneGraph};
pub use template::Template;
pub use viewport::{Camera, Rect, ScreenSize};

// Shaders bundled as string constants
pub static PLANE_WGSL: &str = include_str!("../shaders/plane.wgsl");

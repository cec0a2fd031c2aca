// Shared fixtures for the host-side tests.
// The main crate is wasm-only, so the pure core modules are included directly
// and wired to an in-memory document, page source and renderer.

#![allow(dead_code)]

pub mod constants {
    include!("../../src/core/constants.rs");
}
pub mod scroll {
    include!("../../src/core/scroll.rs");
}
pub mod input {
    include!("../../src/core/input.rs");
}
pub mod viewport {
    include!("../../src/core/viewport.rs");
}
pub mod scene_graph {
    include!("../../src/core/scene_graph.rs");
}
pub mod error {
    include!("../../src/core/error.rs");
}
pub mod template {
    include!("../../src/core/template.rs");
}
pub mod document {
    include!("../../src/core/document.rs");
}
pub mod tween {
    include!("../../src/core/tween.rs");
}
pub mod animation {
    include!("../../src/core/animation.rs");
}
pub mod media {
    include!("../../src/core/media.rs");
}
pub mod gallery {
    include!("../../src/core/gallery.rs");
}
pub mod page {
    include!("../../src/core/page.rs");
}
pub mod navigation {
    include!("../../src/core/navigation.rs");
}
pub mod canvas {
    include!("../../src/core/canvas.rs");
}
pub mod app {
    include!("../../src/core/app.rs");
}

use app::{App, PageSource};
use canvas::Renderer;
use document::{ContentFragment, Document, Style, Theme};
use error::NavigationError;
use futures_util::FutureExt;
use scene_graph::SceneGraph;
use std::cell::{Ref, RefCell, RefMut};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};
use viewport::{Camera, Rect, ScreenSize};

pub const FRAME: f64 = 1.0 / 60.0;
pub const ORIGIN: &str = "https://vitrine.test";

pub type NodeId = usize;

pub fn rect(left: f64, top: f64, width: f64, height: f64) -> Rect {
    Rect {
        left,
        top,
        width,
        height,
    }
}

#[derive(Clone, Debug, Default)]
pub struct Node {
    pub selectors: Vec<String>,
    pub parent: Option<NodeId>,
    pub attrs: HashMap<String, String>,
    pub rect: Rect,
    pub client_height: f64,
    pub alive: bool,
}

type PageBuilder = fn(&mut MockDom, NodeId);

/// In-memory DOM: nodes match the selectors they were created with.
pub struct MockDom {
    pub nodes: Vec<Node>,
    pub screen: ScreenSize,
    pub content: NodeId,
    pub builders: HashMap<String, PageBuilder>,
    pub styles: Vec<(NodeId, Style)>,
    pub themes: Vec<Theme>,
    pub history: Vec<String>,
    pub binds: Vec<usize>,
    pub swaps: Vec<String>,
}

impl MockDom {
    pub fn add(&mut self, parent: Option<NodeId>, selectors: &[&str]) -> NodeId {
        self.nodes.push(Node {
            selectors: selectors.iter().map(|s| s.to_string()).collect(),
            parent,
            alive: true,
            ..Node::default()
        });
        self.nodes.len() - 1
    }

    pub fn add_at(&mut self, parent: Option<NodeId>, selectors: &[&str], r: Rect) -> NodeId {
        let id = self.add(parent, selectors);
        self.nodes[id].rect = r;
        id
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        self.nodes[id].attrs.insert(name.to_string(), value.to_string());
    }

    pub fn is_within(&self, id: NodeId, root: NodeId) -> bool {
        let mut cursor = self.nodes[id].parent;
        while let Some(p) = cursor {
            if p == root {
                return true;
            }
            cursor = self.nodes[p].parent;
        }
        false
    }

    fn matching(&self, selector: &str) -> impl Iterator<Item = NodeId> + '_ {
        let selector = selector.to_string();
        self.nodes
            .iter()
            .enumerate()
            .filter(move |(_, n)| n.alive && n.selectors.iter().any(|s| *s == selector))
            .map(|(i, _)| i)
    }

    pub fn first(&self, selector: &str) -> Option<NodeId> {
        self.matching(selector).next()
    }

    pub fn all(&self, selector: &str) -> Vec<NodeId> {
        self.matching(selector).collect()
    }

    /// Last style of the given kind written to `id`.
    pub fn last_style(&self, id: NodeId, pick: fn(&Style) -> bool) -> Option<Style> {
        self.styles
            .iter()
            .rev()
            .find(|(n, s)| *n == id && pick(s))
            .map(|(_, s)| *s)
    }

    pub fn opacity(&self, id: NodeId) -> Option<f64> {
        match self.last_style(id, |s| matches!(s, Style::Opacity(_))) {
            Some(Style::Opacity(v)) => Some(v),
            _ => None,
        }
    }

    fn clear_content(&mut self) {
        let content = self.content;
        for id in 0..self.nodes.len() {
            if self.is_within(id, content) {
                self.nodes[id].alive = false;
            }
        }
    }
}

pub fn home_page(dom: &mut MockDom, content: NodeId) {
    let root = dom.add(Some(content), &[".home"]);
    dom.set_attr(root, "data-background", "#c97164");
    dom.set_attr(root, "data-color", "#37384c");
    let gallery = dom.add_at(Some(root), &[".home__gallery"], rect(0.0, 0.0, 1200.0, 1000.0));
    for (i, left) in [50.0, 350.0, 650.0, 950.0].into_iter().enumerate() {
        let top = 100.0 + 250.0 * (i % 2) as f64;
        dom.add_at(
            Some(gallery),
            &[".home__gallery__media__image"],
            rect(left, top, 200.0, 300.0),
        );
    }
    let title = dom.add(Some(root), &[r#"[data-animations="title"]"#]);
    for top in [100.0, 100.0, 140.0] {
        dom.add_at(Some(title), &["span span"], rect(0.0, top, 80.0, 40.0));
    }
    let link = dom.add(Some(root), &["a"]);
    dom.set_attr(link, "href", "/about");
}

pub fn about_page(dom: &mut MockDom, content: NodeId) {
    let root = dom.add(Some(content), &[".about"]);
    dom.set_attr(root, "data-background", "#b1aea7");
    dom.set_attr(root, "data-color", "#37384c");
    let wrapper = dom.add(Some(root), &[".about__wrapper"]);
    dom.nodes[wrapper].client_height = 2400.0;
    for g in 0..2 {
        let top = 600.0 + 700.0 * g as f64;
        let strip = dom.add(Some(wrapper), &[".about__gallery"]);
        let inner = dom.add_at(
            Some(strip),
            &[".about__gallery__wrapper"],
            rect(0.0, top, 1500.0, 400.0),
        );
        for i in 0..3 {
            dom.add_at(
                Some(inner),
                &[".about__gallery__media"],
                rect(100.0 + 500.0 * i as f64, top, 300.0, 400.0),
            );
        }
    }
    let paragraph = dom.add(Some(wrapper), &[r#"[data-animations="paragraph"]"#]);
    for top in [300.0, 300.0, 330.0, 360.0] {
        dom.add_at(Some(paragraph), &["span span"], rect(0.0, top, 60.0, 24.0));
    }
    dom.add(Some(wrapper), &[r#"[data-animations="label"]"#]);
    let link = dom.add(Some(wrapper), &["a"]);
    dom.set_attr(link, "href", "/");
}

pub fn collections_page(dom: &mut MockDom, content: NodeId) {
    let root = dom.add(Some(content), &[".collections"]);
    let wrapper = dom.add(Some(root), &[".collections__wrapper"]);
    dom.nodes[wrapper].client_height = 1600.0;
    dom.add(Some(wrapper), &[r#"[data-animations="highlight"]"#]);
}

pub fn detail_page(dom: &mut MockDom, content: NodeId) {
    let root = dom.add(Some(content), &[".detail"]);
    let wrapper = dom.add(Some(root), &[".detail__wrapper"]);
    dom.nodes[wrapper].client_height = 900.0;
}

/// Server response for `template`; the inner markup names the fixture
/// builder the mock installs on swap.
pub fn page_markup(template: &str) -> String {
    format!(
        r#"<html><body><nav class="navigation"></nav><div class="content" data-template="{template}">{template}</div></body></html>"#
    )
}

pub struct MockDocument {
    dom: RefCell<MockDom>,
}

impl MockDocument {
    /// Site chrome (navigation, outside links) plus `template` in `.content`.
    pub fn new(template: &str) -> Self {
        let mut dom = MockDom {
            nodes: Vec::new(),
            screen: ScreenSize::new(1000.0, 800.0),
            content: 0,
            builders: HashMap::new(),
            styles: Vec::new(),
            themes: Vec::new(),
            history: Vec::new(),
            binds: Vec::new(),
            swaps: Vec::new(),
        };
        dom.builders.insert("home".to_string(), home_page as PageBuilder);
        dom.builders.insert("about".to_string(), about_page as PageBuilder);
        dom.builders
            .insert("collections".to_string(), collections_page as PageBuilder);
        dom.builders.insert("detail".to_string(), detail_page as PageBuilder);

        let nav = dom.add(None, &[".navigation"]);
        for href in ["/collections", "/about"] {
            let item = dom.add(Some(nav), &[".navigation__list__item"]);
            let link = dom.add(Some(item), &["a"]);
            dom.set_attr(link, "href", href);
        }
        let external = dom.add(None, &["a"]);
        dom.set_attr(external, "href", "https://elsewhere.example/");

        let content = dom.add(None, &[".content"]);
        dom.content = content;
        dom.set_attr(content, "data-template", template);
        if let Some(build) = dom.builders.get(template).copied() {
            build(&mut dom, content);
        }
        Self {
            dom: RefCell::new(dom),
        }
    }

    pub fn dom(&self) -> Ref<'_, MockDom> {
        self.dom.borrow()
    }

    pub fn dom_mut(&self) -> RefMut<'_, MockDom> {
        self.dom.borrow_mut()
    }
}

impl Document for MockDocument {
    type Element = NodeId;

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        self.dom().all(selector)
    }

    fn query_in(&self, root: &NodeId, selector: &str) -> Vec<NodeId> {
        let dom = self.dom();
        dom.all(selector)
            .into_iter()
            .filter(|id| dom.is_within(*id, *root))
            .collect()
    }

    fn attribute(&self, element: &NodeId, name: &str) -> Option<String> {
        self.dom().nodes[*element].attrs.get(name).cloned()
    }

    fn bounds(&self, element: &NodeId) -> Rect {
        self.dom().nodes[*element].rect
    }

    fn client_height(&self, element: &NodeId) -> f64 {
        self.dom().nodes[*element].client_height
    }

    fn screen(&self) -> ScreenSize {
        self.dom().screen
    }

    fn apply_style(&self, element: &NodeId, style: Style) {
        self.dom_mut().styles.push((*element, style));
    }

    fn apply_theme(&self, theme: &Theme) {
        self.dom_mut().themes.push(theme.clone());
    }

    fn content_template(&self) -> Option<String> {
        let dom = self.dom();
        dom.nodes[dom.content].attrs.get("data-template").cloned()
    }

    fn parse_content(&self, markup: &str) -> Option<ContentFragment> {
        let start = markup.find(r#"class="content""#)?;
        let rest = &markup[start..];
        let template = rest
            .split("data-template=\"")
            .nth(1)
            .and_then(|t| t.split('"').next())
            .unwrap_or_default()
            .to_string();
        let open = rest.find('>')? + 1;
        let close = rest[open..].find("</div>")? + open;
        Some(ContentFragment {
            template,
            inner_html: rest[open..close].to_string(),
        })
    }

    fn swap_content(&self, fragment: &ContentFragment) {
        let mut dom = self.dom_mut();
        dom.clear_content();
        let content = dom.content;
        dom.set_attr(content, "data-template", &fragment.template);
        dom.swaps.push(fragment.template.clone());
        if let Some(build) = dom.builders.get(&fragment.inner_html).copied() {
            build(&mut dom, content);
        }
    }

    fn push_history(&self, url: &str) {
        self.dom_mut().history.push(url.to_string());
    }

    fn bind_links(&self) {
        let mut dom = self.dom_mut();
        let bound = dom
            .all("a")
            .into_iter()
            .filter(|id| {
                let href = dom.nodes[*id].attrs.get("href").cloned().unwrap_or_default();
                document::is_internal_link(&href, ORIGIN, None)
            })
            .count();
        dom.binds.push(bound);
    }
}

#[derive(Default)]
struct GateState {
    open: bool,
    waker: Option<Waker>,
}

/// Holds a mock fetch in flight until opened.
#[derive(Clone, Default)]
pub struct Gate {
    state: Rc<RefCell<GateState>>,
}

impl Gate {
    pub fn open(&self) {
        let waker = {
            let mut state = self.state.borrow_mut();
            state.open = true;
            state.waker.take()
        };
        if let Some(waker) = waker {
            waker.wake();
        }
    }
}

impl Future for Gate {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let mut state = self.state.borrow_mut();
        if state.open {
            Poll::Ready(())
        } else {
            state.waker = Some(cx.waker().clone());
            Poll::Pending
        }
    }
}

/// url -> (status, body) table standing in for the site backend.
#[derive(Clone, Default)]
pub struct MockSource {
    routes: Rc<RefCell<HashMap<String, (u16, String)>>>,
    gates: Rc<RefCell<HashMap<String, Gate>>>,
    requests: Rc<RefCell<Vec<String>>>,
}

impl MockSource {
    pub fn route(self, url: &str, status: u16, body: impl Into<String>) -> Self {
        self.routes
            .borrow_mut()
            .insert(url.to_string(), (status, body.into()));
        self
    }

    pub fn page(self, url: &str, template: &str) -> Self {
        self.route(url, 200, page_markup(template))
    }

    /// The next fetch of `url` waits until the returned gate opens.
    pub fn hold(&self, url: &str) -> Gate {
        let gate = Gate::default();
        self.gates.borrow_mut().insert(url.to_string(), gate.clone());
        gate
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl PageSource for MockSource {
    async fn fetch(&self, url: &str) -> Result<String, NavigationError> {
        self.requests.borrow_mut().push(url.to_string());
        let gate = self.gates.borrow_mut().remove(url);
        if let Some(gate) = gate {
            gate.await;
        }
        let route = self.routes.borrow().get(url).cloned();
        match route {
            Some((200, body)) => Ok(body),
            Some((status, _)) => Err(NavigationError::Status {
                url: url.to_string(),
                status,
            }),
            None => Err(NavigationError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

#[derive(Debug, Default)]
pub struct CountingRenderer {
    pub resizes: usize,
    pub renders: usize,
    pub last_meshes: usize,
}

impl Renderer for CountingRenderer {
    fn resize(&mut self, _screen: ScreenSize) {
        self.resizes += 1;
    }

    fn render(&mut self, graph: &SceneGraph, _camera: &Camera) {
        self.renders += 1;
        self.last_meshes = graph.draw_list().len();
    }
}

pub type TestApp = App<MockDocument, MockSource, CountingRenderer>;

pub fn test_app(template: &str, source: MockSource) -> Rc<RefCell<TestApp>> {
    let app = App::new(
        MockDocument::new(template),
        source,
        CountingRenderer::default(),
        7,
    )
    .expect("fixture template is valid");
    Rc::new(RefCell::new(app))
}

pub fn run_frames(app: &Rc<RefCell<TestApp>>, frames: usize) {
    for _ in 0..frames {
        app.borrow_mut().update(FRAME);
    }
}

/// Poll `fut` once per animation frame, the way the browser interleaves
/// awaits with requestAnimationFrame.
pub fn drive<F>(app: &Rc<RefCell<TestApp>>, fut: &mut F, max_frames: usize) -> Option<F::Output>
where
    F: Future + Unpin,
{
    for _ in 0..max_frames {
        if let Some(out) = FutureExt::now_or_never(&mut *fut) {
            return Some(out);
        }
        app.borrow_mut().update(FRAME);
    }
    None
}

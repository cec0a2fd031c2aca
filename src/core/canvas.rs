use super::document::Document;
use super::gallery::{Axes, Gallery};
use super::input::{PointerTracker, WheelDelta};
use super::scene_graph::SceneGraph;
use super::template::Template;
use super::viewport::{Camera, ScreenSize, Viewport};
use glam::DVec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Draws the whole scene graph once per frame.
pub trait Renderer {
    fn resize(&mut self, screen: ScreenSize);
    fn render(&mut self, graph: &SceneGraph, camera: &Camera);
}

/// Several horizontal strips that also follow the page's DOM scroll.
pub struct AboutScene<E> {
    galleries: Vec<Gallery<E>>,
    anchor_scroll: f64,
    per_pixel_y: f64,
}

impl<E: Clone> AboutScene<E> {
    fn new<D>(document: &D, graph: &mut SceneGraph) -> Self
    where
        D: Document<Element = E>,
    {
        let galleries = document
            .query_all(".about__gallery")
            .into_iter()
            .filter_map(|strip| {
                let wrapper = document.select_in(&strip, ".about__gallery__wrapper");
                let Some(wrapper) = wrapper.first().cloned() else {
                    log::warn!("[canvas] about gallery without wrapper skipped");
                    return None;
                };
                let media = document.query_in(&strip, ".about__gallery__media");
                Some(Gallery::new(graph, wrapper, media, Axes::Horizontal))
            })
            .collect();
        Self {
            galleries,
            anchor_scroll: 0.0,
            per_pixel_y: 0.0,
        }
    }

    pub fn galleries(&self) -> &[Gallery<E>] {
        &self.galleries
    }
}

/// The scene that belongs to the active template. Templates without a
/// gallery have no module at all.
pub enum SceneModule<E> {
    Home(Gallery<E>),
    About(AboutScene<E>),
}

impl<E: Clone> SceneModule<E> {
    fn build<D>(template: Template, document: &D, graph: &mut SceneGraph) -> Option<Self>
    where
        D: Document<Element = E>,
    {
        match template {
            Template::Home => {
                let Some(wrapper) = document.select(".home__gallery").first().cloned() else {
                    log::warn!("[canvas] home has no .home__gallery");
                    return None;
                };
                let media = document.query_in(&wrapper, ".home__gallery__media__image");
                Some(SceneModule::Home(Gallery::new(graph, wrapper, media, Axes::Both)))
            }
            Template::About => Some(SceneModule::About(AboutScene::new(document, graph))),
            Template::Detail | Template::Collections => None,
        }
    }

    pub fn template(&self) -> Template {
        match self {
            SceneModule::Home(_) => Template::Home,
            SceneModule::About(_) => Template::About,
        }
    }

    fn on_resize<D>(
        &mut self,
        viewport: Viewport,
        document: &D,
        graph: &mut SceneGraph,
        page_scroll: f64,
    ) where
        D: Document<Element = E>,
    {
        match self {
            SceneModule::Home(gallery) => gallery.on_resize(viewport, document, graph),
            SceneModule::About(about) => {
                about.anchor_scroll = page_scroll;
                about.per_pixel_y = viewport.per_pixel(document.screen()).1;
                for gallery in &mut about.galleries {
                    gallery.on_resize(viewport, document, graph);
                    gallery.set_offset(graph, DVec3::ZERO);
                }
            }
        }
    }

    fn galleries_mut(&mut self) -> &mut [Gallery<E>] {
        match self {
            SceneModule::Home(gallery) => std::slice::from_mut(gallery),
            SceneModule::About(about) => &mut about.galleries,
        }
    }

    fn update<R: Rng>(&mut self, graph: &mut SceneGraph, rng: &mut R, page_scroll: f64) {
        match self {
            SceneModule::Home(gallery) => gallery.update(graph, rng),
            SceneModule::About(about) => {
                let offset = (page_scroll - about.anchor_scroll) * about.per_pixel_y;
                for gallery in &mut about.galleries {
                    gallery.update(graph, rng);
                    gallery.set_offset(graph, DVec3::new(0.0, offset, 0.0));
                }
            }
        }
    }

    fn destroy(self, graph: &mut SceneGraph) -> usize {
        match self {
            SceneModule::Home(gallery) => gallery.destroy(graph),
            SceneModule::About(about) => about
                .galleries
                .into_iter()
                .map(|gallery| gallery.destroy(graph))
                .sum(),
        }
    }
}

/// Owns the renderer, camera and scene graph, plus at most one scene module.
pub struct Canvas<E, R> {
    renderer: R,
    camera: Camera,
    graph: SceneGraph,
    screen: ScreenSize,
    viewport: Viewport,
    pointer: PointerTracker,
    module: Option<SceneModule<E>>,
    rng: StdRng,
    activations: u64,
}

impl<E: Clone, R: Renderer> Canvas<E, R> {
    pub fn new(mut renderer: R, screen: ScreenSize, seed: u64) -> Self {
        let mut camera = Camera::default();
        camera.set_aspect(screen);
        renderer.resize(screen);
        Self {
            renderer,
            viewport: camera.viewport(),
            camera,
            graph: SceneGraph::new(),
            screen,
            pointer: PointerTracker::default(),
            module: None,
            rng: StdRng::seed_from_u64(seed),
            activations: 0,
        }
    }

    /// Tear down the current module, then build the one for `template`.
    ///
    /// A freshly built module is measured right away against page scroll 0,
    /// which is where a newly created page starts.
    pub fn on_change<D>(&mut self, template: Template, document: &D)
    where
        D: Document<Element = E>,
    {
        if let Some(previous) = self.module.take() {
            let from = previous.template();
            let released = previous.destroy(&mut self.graph);
            log::info!("[canvas] released {} meshes of {}", released, from);
        }

        self.module = SceneModule::build(template, document, &mut self.graph);
        if let Some(module) = &mut self.module {
            module.on_resize(self.viewport, document, &mut self.graph, 0.0);
            self.activations += 1;
            log::info!(
                "[canvas] scene {} ({} meshes)",
                template,
                self.graph.mesh_count()
            );
        }
    }

    pub fn on_resize<D>(&mut self, document: &D, page_scroll: f64)
    where
        D: Document<Element = E>,
    {
        self.screen = document.screen();
        self.renderer.resize(self.screen);
        self.camera.set_aspect(self.screen);
        self.viewport = self.camera.viewport();
        if let Some(module) = &mut self.module {
            module.on_resize(self.viewport, document, &mut self.graph, page_scroll);
        }
    }

    pub fn on_touch_down(&mut self, x: f64, y: f64) {
        let pointer = self.pointer.down(x, y);
        if let Some(module) = &mut self.module {
            for gallery in module.galleries_mut() {
                gallery.on_touch_down(&pointer);
            }
        }
    }

    pub fn on_touch_move(&mut self, x: f64, y: f64) {
        let Some(pointer) = self.pointer.moved(x, y) else {
            return;
        };
        if let Some(module) = &mut self.module {
            for gallery in module.galleries_mut() {
                gallery.on_touch_move(&pointer);
            }
        }
    }

    pub fn on_touch_up(&mut self, x: f64, y: f64) {
        self.pointer.up(x, y);
    }

    /// Only the home strip takes the wheel; about scrolls its DOM instead.
    pub fn on_wheel(&mut self, delta: &WheelDelta) {
        if let Some(SceneModule::Home(gallery)) = &mut self.module {
            gallery.on_wheel(delta);
        }
    }

    pub fn update(&mut self, page_scroll: f64) {
        if let Some(module) = &mut self.module {
            module.update(&mut self.graph, &mut self.rng, page_scroll);
        }
        self.renderer.render(&self.graph, &self.camera);
    }

    pub fn active_template(&self) -> Option<Template> {
        self.module.as_ref().map(SceneModule::template)
    }

    pub fn module(&self) -> Option<&SceneModule<E>> {
        self.module.as_ref()
    }

    /// Number of scene modules built over the session.
    pub fn activations(&self) -> u64 {
        self.activations
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}

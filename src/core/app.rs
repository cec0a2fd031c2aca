use super::canvas::{Canvas, Renderer};
use super::document::Document;
use super::error::NavigationError;
use super::input::WheelDelta;
use super::navigation::Navigation;
use super::page::PageController;
use super::template::Template;
use super::tween::{Animator, Completion};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationRequest {
    pub url: String,
    /// Push `url` onto the browser history once the page arrives.
    pub push: bool,
}

impl NavigationRequest {
    /// A click on an intercepted anchor.
    pub fn link(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            push: true,
        }
    }

    /// Back/forward; the browser already moved the history cursor.
    pub fn history(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            push: false,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NavigationPhase {
    #[default]
    Idle,
    Hiding,
    Fetching,
    Swapping,
    Activating,
}

#[derive(Clone, Debug, PartialEq)]
pub enum NavigationOutcome {
    Completed(Template),
    /// The transition stopped; the previous page stays hidden.
    Failed(NavigationError),
    /// A newer request took over while this one was waiting.
    Superseded,
}

/// Where page markup comes from.
#[allow(async_fn_in_trait)]
pub trait PageSource: Clone {
    /// Body of a successful (200) response for `url`.
    async fn fetch(&self, url: &str) -> Result<String, NavigationError>;
}

/// Application root: owns the document handle, the scene, the navigation
/// bar, the tween scheduler and one page controller per template.
pub struct App<D: Document, S, R> {
    document: D,
    source: S,
    canvas: Canvas<D::Element, R>,
    navigation: Navigation<D::Element>,
    animator: Animator<D::Element>,
    pages: [PageController<D::Element>; 4],
    template: Template,
    phase: NavigationPhase,
    generation: u64,
}

impl<D, S, R> App<D, S, R>
where
    D: Document,
    S: PageSource,
    R: Renderer,
{
    /// Reads the initial template from the live `.content`, creates its
    /// page and scene, and routes the document's links through navigation.
    pub fn new(document: D, source: S, renderer: R, seed: u64) -> Result<Self, NavigationError> {
        let template: Template = document.content_template().unwrap_or_default().parse()?;

        let mut animator = Animator::new();
        let mut navigation = Navigation::new(&document);
        navigation.on_change(template, &mut animator);

        let mut canvas = Canvas::new(renderer, document.screen(), seed);
        canvas.on_change(template, &document);

        let mut pages = Template::ALL.map(PageController::new);
        pages[template.index()].create(&document, &mut animator);

        document.bind_links();
        log::info!("[app] started on {}", template);

        Ok(Self {
            document,
            source,
            canvas,
            navigation,
            animator,
            pages,
            template,
            phase: NavigationPhase::Idle,
            generation: 0,
        })
    }

    /// First layout pass and entry animation, once assets are ready.
    pub fn boot(&mut self) -> Completion {
        self.on_resize();
        self.pages[self.template.index()].show(&self.document, &mut self.animator)
    }

    pub fn on_resize(&mut self) {
        let page = &mut self.pages[self.template.index()];
        page.on_resize(&self.document);
        self.canvas.on_resize(&self.document, page.scroll_offset());
    }

    pub fn on_wheel(&mut self, delta: WheelDelta) {
        self.pages[self.template.index()].on_wheel(&delta);
        self.canvas.on_wheel(&delta);
    }

    pub fn on_touch_down(&mut self, x: f64, y: f64) {
        self.canvas.on_touch_down(x, y);
    }

    pub fn on_touch_move(&mut self, x: f64, y: f64) {
        self.canvas.on_touch_move(x, y);
    }

    pub fn on_touch_up(&mut self, x: f64, y: f64) {
        self.canvas.on_touch_up(x, y);
    }

    /// One animation frame: tweens, then the active page, then the scene.
    pub fn update(&mut self, dt: f64) {
        let document = &self.document;
        self.animator
            .tick(dt, |element, style| document.apply_style(element, style));

        let page = &mut self.pages[self.template.index()];
        page.update(document);
        self.canvas.update(page.scroll_offset());
    }

    /// Start a transition: take a fresh token and hide the current page.
    /// Hiding again kills any older hide still in flight.
    pub fn begin(&mut self, request: &NavigationRequest) -> (u64, Completion) {
        self.generation += 1;
        self.phase = NavigationPhase::Hiding;
        log::info!(
            "[nav] #{} {} -> {}",
            self.generation,
            self.template,
            request.url
        );
        let hidden = self.pages[self.template.index()].hide(&mut self.animator);
        (self.generation, hidden)
    }

    pub fn is_current(&self, token: u64) -> bool {
        token == self.generation
    }

    pub fn mark_fetching(&mut self, token: u64) {
        if self.is_current(token) {
            self.phase = NavigationPhase::Fetching;
        }
    }

    /// Apply a fetch result, unless a newer request has taken over.
    pub fn finish(
        &mut self,
        token: u64,
        request: &NavigationRequest,
        result: Result<String, NavigationError>,
    ) -> NavigationOutcome {
        if !self.is_current(token) {
            log::info!("[nav] #{} {} superseded", token, request.url);
            return NavigationOutcome::Superseded;
        }

        match self.activate(request, result) {
            Ok(template) => {
                self.phase = NavigationPhase::Idle;
                log::info!("[nav] #{} now on {}", token, template);
                NavigationOutcome::Completed(template)
            }
            Err(err) => {
                self.phase = NavigationPhase::Idle;
                log::error!("[nav] #{} {}", token, err);
                NavigationOutcome::Failed(err)
            }
        }
    }

    fn activate(
        &mut self,
        request: &NavigationRequest,
        result: Result<String, NavigationError>,
    ) -> Result<Template, NavigationError> {
        let markup = result?;
        self.phase = NavigationPhase::Swapping;

        let fragment =
            self.document
                .parse_content(&markup)
                .ok_or_else(|| NavigationError::MissingContent {
                    url: request.url.clone(),
                })?;
        let template: Template = fragment.template.parse()?;

        if request.push {
            self.document.push_history(&request.url);
        }
        self.navigation.on_change(template, &mut self.animator);
        self.document.swap_content(&fragment);
        self.canvas.on_change(template, &self.document);

        self.phase = NavigationPhase::Activating;
        self.template = template;
        self.pages[template.index()].create(&self.document, &mut self.animator);
        self.on_resize();
        self.pages[template.index()].show(&self.document, &mut self.animator);
        self.document.bind_links();
        Ok(template)
    }

    pub fn template(&self) -> Template {
        self.template
    }

    pub fn phase(&self) -> NavigationPhase {
        self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn page(&self) -> &PageController<D::Element> {
        &self.pages[self.template.index()]
    }

    pub fn page_for(&self, template: Template) -> &PageController<D::Element> {
        &self.pages[template.index()]
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn canvas(&self) -> &Canvas<D::Element, R> {
        &self.canvas
    }

    pub fn navigation(&self) -> &Navigation<D::Element> {
        &self.navigation
    }

    pub fn animator(&self) -> &Animator<D::Element> {
        &self.animator
    }
}

/// Runs one navigation: hide, fetch, swap, activate.
///
/// The app is only borrowed between awaits, so input handlers and the frame
/// loop keep running while the hide tween plays and the fetch is in flight.
pub async fn navigate<D, S, R>(
    app: &Rc<RefCell<App<D, S, R>>>,
    request: NavigationRequest,
) -> NavigationOutcome
where
    D: Document,
    S: PageSource,
    R: Renderer,
{
    let (token, hidden) = app.borrow_mut().begin(&request);
    hidden.await;

    let source = {
        let mut app = app.borrow_mut();
        if !app.is_current(token) {
            log::info!("[nav] #{} {} superseded", token, request.url);
            return NavigationOutcome::Superseded;
        }
        app.mark_fetching(token);
        app.source.clone()
    };

    let result = source.fetch(&request.url).await;
    app.borrow_mut().finish(token, &request, result)
}

use super::animation::{Animation, AnimationKind};
use super::constants::{PAGE_FADE_SECS, PAGE_SCROLL_LERP};
use super::document::{Document, Style, Theme};
use super::input::WheelDelta;
use super::scroll::PageScroll;
use super::template::Template;
use super::tween::{Animator, Completion, Property, Tween};

/// Per-template DOM selectors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageSpec {
    pub template: Template,
    pub root: &'static str,
    /// Content wrapper translated by the page's DOM scroll.
    pub wrapper: Option<&'static str>,
}

/// Indexed by `Template::index`.
pub const PAGE_SPECS: [PageSpec; 4] = [
    PageSpec {
        template: Template::Home,
        root: ".home",
        wrapper: None,
    },
    PageSpec {
        template: Template::About,
        root: ".about",
        wrapper: Some(".about__wrapper"),
    },
    PageSpec {
        template: Template::Detail,
        root: ".detail",
        wrapper: Some(".detail__wrapper"),
    },
    PageSpec {
        template: Template::Collections,
        root: ".collections",
        wrapper: Some(".collections__wrapper"),
    },
];

impl PageSpec {
    pub fn for_template(template: Template) -> &'static PageSpec {
        &PAGE_SPECS[template.index()]
    }
}

#[derive(Clone, Debug, Default)]
pub enum PagePhase {
    #[default]
    Uninitialized,
    Created,
    Showing(Completion),
    Shown,
    Hiding(Completion),
    Hidden,
}

/// DOM side of one template: root fade, child animations and the wrapper's
/// smoothed wheel scroll.
///
/// Controllers live for the whole session; `create` re-binds them to fresh
/// markup after every swap.
#[derive(Debug)]
pub struct PageController<E> {
    spec: &'static PageSpec,
    root: Option<E>,
    wrapper: Option<E>,
    animations: Vec<Animation<E>>,
    scroll: PageScroll,
    phase: PagePhase,
    listening: bool,
    shows: u32,
}

impl<E: Clone + PartialEq> PageController<E> {
    pub fn new(template: Template) -> Self {
        Self {
            spec: PageSpec::for_template(template),
            root: None,
            wrapper: None,
            animations: Vec::new(),
            scroll: PageScroll::default(),
            phase: PagePhase::Uninitialized,
            listening: false,
            shows: 0,
        }
    }

    pub fn create<D>(&mut self, document: &D, animator: &mut Animator<E>)
    where
        D: Document<Element = E>,
    {
        // the previous markup is gone after a swap
        if let Some(root) = self.root.take() {
            animator.forget(&root);
        }
        for animation in &self.animations {
            animation.forget(animator);
        }

        self.root = document.select(self.spec.root).first().cloned();
        self.wrapper = self
            .spec
            .wrapper
            .and_then(|selector| document.select(selector).first().cloned());

        self.animations.clear();
        if let Some(root) = &self.root {
            for kind in AnimationKind::ALL {
                for element in document.select_in(root, kind.selector()).iter() {
                    self.animations
                        .push(Animation::new(kind, element.clone(), document));
                }
            }
        } else {
            log::warn!(
                "[page] {} has no {} element",
                self.spec.template,
                self.spec.root
            );
        }
        for animation in &self.animations {
            animation.animate_out(animator);
        }

        self.scroll = PageScroll::default();
        self.listening = false;
        self.phase = PagePhase::Created;
        log::info!(
            "[page] {} created ({} animations)",
            self.spec.template,
            self.animations.len()
        );
    }

    /// Theme, fade in and run child animations. Wheel input is only accepted
    /// once the fade has completed.
    pub fn show<D>(&mut self, document: &D, animator: &mut Animator<E>) -> Completion
    where
        D: Document<Element = E>,
    {
        if let Some(root) = &self.root {
            document.apply_theme(&Theme {
                background: document.attribute(root, "data-background"),
                color: document.attribute(root, "data-color"),
            });
        }

        let completion = match &self.root {
            Some(root) => animator.play(
                Tween::from_to(root.clone(), Property::Opacity, 0.0, 1.0).duration(PAGE_FADE_SECS),
            ),
            None => Completion::resolved(),
        };
        for animation in &self.animations {
            animation.animate_in(animator);
        }

        self.shows += 1;
        self.phase = PagePhase::Showing(completion.clone());
        log::info!("[page] {} show", self.spec.template);
        completion
    }

    /// Stop listening, then fade out.
    pub fn hide(&mut self, animator: &mut Animator<E>) -> Completion {
        self.destroy();
        let completion = match &self.root {
            Some(root) => animator.play(
                Tween::to(root.clone(), Property::Opacity, 0.0).duration(PAGE_FADE_SECS),
            ),
            None => Completion::resolved(),
        };
        self.phase = PagePhase::Hiding(completion.clone());
        log::info!("[page] {} hide", self.spec.template);
        completion
    }

    pub fn update<D>(&mut self, document: &D)
    where
        D: Document<Element = E>,
    {
        let next = match &self.phase {
            PagePhase::Showing(done) if done.is_done() => Some(PagePhase::Shown),
            PagePhase::Hiding(done) if done.is_done() => Some(PagePhase::Hidden),
            _ => None,
        };
        if let Some(next) = next {
            self.listening = matches!(next, PagePhase::Shown);
            self.phase = next;
        }

        let offset = self.scroll.update(PAGE_SCROLL_LERP);
        if let Some(wrapper) = &self.wrapper {
            document.apply_style(wrapper, Style::TranslateYPx(-offset));
        }
    }

    pub fn on_resize<D>(&mut self, document: &D)
    where
        D: Document<Element = E>,
    {
        if let Some(wrapper) = &self.wrapper {
            self.scroll
                .set_limit(document.client_height(wrapper), document.screen().height);
        }
        for animation in &mut self.animations {
            animation.on_resize(document);
        }
    }

    pub fn on_wheel(&mut self, delta: &WheelDelta) {
        if self.listening {
            self.scroll.on_wheel(delta.pixel_y);
        }
    }

    /// Only detaches input; DOM belongs to the navigation orchestrator.
    pub fn destroy(&mut self) {
        self.listening = false;
    }

    pub fn template(&self) -> Template {
        self.spec.template
    }

    pub fn phase(&self) -> &PagePhase {
        &self.phase
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// How many times `show` has run over the session.
    pub fn shows(&self) -> u32 {
        self.shows
    }

    pub fn scroll(&self) -> &PageScroll {
        &self.scroll
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll.current
    }

    pub fn root(&self) -> Option<&E> {
        self.root.as_ref()
    }

    pub fn wrapper(&self) -> Option<&E> {
        self.wrapper.as_ref()
    }

    pub fn animations(&self) -> &[Animation<E>] {
        &self.animations
    }
}

use super::constants::{
    ANIMATION_IN_DELAY_SECS, LABEL_FADE_SECS, LINE_SLIDE_SECS, PARAGRAPH_LINE_STAGGER_SECS,
    TITLE_LINE_STAGGER_SECS,
};
use super::document::Document;
use super::tween::{Animator, Completion, Ease, Property, Tween};
use smallvec::SmallVec;

/// Tops closer than this (CSS px) belong to the same visual line.
const LINE_TOLERANCE: f64 = 1.0;

pub type Line<E> = SmallVec<[E; 8]>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationKind {
    Title,
    Paragraph,
    Label,
    Highlight,
}

impl AnimationKind {
    pub const ALL: [AnimationKind; 4] = [
        AnimationKind::Highlight,
        AnimationKind::Title,
        AnimationKind::Paragraph,
        AnimationKind::Label,
    ];

    pub fn selector(self) -> &'static str {
        match self {
            AnimationKind::Title => r#"[data-animations="title"]"#,
            AnimationKind::Paragraph => r#"[data-animations="paragraph"]"#,
            AnimationKind::Label => r#"[data-animations="label"]"#,
            AnimationKind::Highlight => r#"[data-animations="highlight"]"#,
        }
    }

    fn splits_lines(self) -> bool {
        matches!(self, AnimationKind::Title | AnimationKind::Paragraph)
    }
}

/// Groups spans into visual lines by their top offset, keeping DOM order.
pub fn group_lines<E: Clone>(spans: &[(E, f64)]) -> Vec<Line<E>> {
    let mut lines: Vec<Line<E>> = Vec::new();
    let mut line_top = f64::NAN;
    for (span, top) in spans {
        match lines.last_mut() {
            Some(line) if (top - line_top).abs() < LINE_TOLERANCE => line.push(span.clone()),
            _ => {
                line_top = *top;
                let mut line = Line::new();
                line.push(span.clone());
                lines.push(line);
            }
        }
    }
    lines
}

/// Entry animation of one text or element block inside a page.
#[derive(Debug)]
pub struct Animation<E> {
    kind: AnimationKind,
    element: E,
    spans: Vec<E>,
    lines: Vec<Line<E>>,
}

impl<E: Clone + PartialEq> Animation<E> {
    /// Title and paragraph blocks arrive pre-split into `span span` words.
    pub fn new<D>(kind: AnimationKind, element: E, document: &D) -> Self
    where
        D: Document<Element = E>,
    {
        let spans = if kind.splits_lines() {
            document.query_in(&element, "span span")
        } else {
            Vec::new()
        };
        Self {
            kind,
            element,
            spans,
            lines: Vec::new(),
        }
    }

    pub fn on_resize<D>(&mut self, document: &D)
    where
        D: Document<Element = E>,
    {
        if self.spans.is_empty() {
            return;
        }
        let measured: Vec<(E, f64)> = self
            .spans
            .iter()
            .map(|span| (span.clone(), document.bounds(span).top))
            .collect();
        self.lines = group_lines(&measured);
    }

    pub fn animate_in(&self, animator: &mut Animator<E>) -> Completion {
        let mut tweens = Vec::new();
        match self.kind {
            AnimationKind::Title | AnimationKind::Paragraph => {
                tweens.push(
                    Tween::to(self.element.clone(), Property::Opacity, 1.0)
                        .duration(0.0)
                        .delay(ANIMATION_IN_DELAY_SECS),
                );
                let stagger = if self.kind == AnimationKind::Title {
                    TITLE_LINE_STAGGER_SECS
                } else {
                    PARAGRAPH_LINE_STAGGER_SECS
                };
                for (index, line) in self.lines.iter().enumerate() {
                    let delay = ANIMATION_IN_DELAY_SECS + index as f64 * stagger;
                    for span in line {
                        tweens.push(
                            Tween::from_to(span.clone(), Property::TranslateYPercent, 100.0, 0.0)
                                .delay(delay)
                                .duration(LINE_SLIDE_SECS)
                                .ease(Ease::ExpoOut),
                        );
                        if self.kind == AnimationKind::Paragraph {
                            tweens.push(
                                Tween::from_to(span.clone(), Property::Opacity, 0.0, 1.0)
                                    .delay(delay)
                                    .duration(LINE_SLIDE_SECS)
                                    .ease(Ease::ExpoOut),
                            );
                        }
                    }
                }
            }
            AnimationKind::Label => {
                tweens.push(
                    Tween::to(self.element.clone(), Property::Opacity, 1.0)
                        .duration(LABEL_FADE_SECS)
                        .delay(ANIMATION_IN_DELAY_SECS),
                );
            }
            AnimationKind::Highlight => {
                tweens.push(
                    Tween::from_to(self.element.clone(), Property::Opacity, 0.0, 1.0)
                        .duration(LINE_SLIDE_SECS)
                        .delay(ANIMATION_IN_DELAY_SECS)
                        .ease(Ease::ExpoOut),
                );
                tweens.push(
                    Tween::from_to(self.element.clone(), Property::Scale, 1.2, 1.0)
                        .duration(LINE_SLIDE_SECS)
                        .delay(ANIMATION_IN_DELAY_SECS)
                        .ease(Ease::ExpoOut),
                );
            }
        }
        animator.play_all(tweens)
    }

    /// Hide instantly; the next `animate_in` starts from scratch.
    pub fn animate_out(&self, animator: &mut Animator<E>) {
        animator.kill(&self.element);
        for span in &self.spans {
            animator.kill(span);
        }
        animator.set(self.element.clone(), Property::Opacity, 0.0);
    }

    /// Release the element and its spans before the markup is replaced.
    pub fn forget(&self, animator: &mut Animator<E>) {
        animator.forget(&self.element);
        for span in &self.spans {
            animator.forget(span);
        }
    }

    pub fn kind(&self) -> AnimationKind {
        self.kind
    }

    pub fn element(&self) -> &E {
        &self.element
    }

    pub fn lines(&self) -> &[Line<E>] {
        &self.lines
    }
}

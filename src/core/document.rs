use super::viewport::{Rect, ScreenSize};
use std::fmt;

/// Result of a selector query.
///
/// Zero matches are an explicit `Absent` (the feature is off for this
/// template), exactly one match collapses to `One`. `iter` walks all shapes
/// the same way.
#[derive(Clone, Debug, PartialEq)]
pub enum Selection<E> {
    Absent,
    One(E),
    Many(Vec<E>),
}

impl<E> Default for Selection<E> {
    fn default() -> Self {
        Selection::Absent
    }
}

impl<E> Selection<E> {
    pub fn from_vec(mut items: Vec<E>) -> Self {
        match items.len() {
            0 => Selection::Absent,
            1 => items.pop().map_or(Selection::Absent, Selection::One),
            _ => Selection::Many(items),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Selection::Absent)
    }

    pub fn len(&self) -> usize {
        match self {
            Selection::Absent => 0,
            Selection::One(_) => 1,
            Selection::Many(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn first(&self) -> Option<&E> {
        match self {
            Selection::Absent => None,
            Selection::One(e) => Some(e),
            Selection::Many(v) => v.first(),
        }
    }

    pub fn as_slice(&self) -> &[E] {
        match self {
            Selection::Absent => &[],
            Selection::One(e) => std::slice::from_ref(e),
            Selection::Many(v) => v,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.as_slice().iter()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub fn mix(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mut out = [0u8; 3];
        for (i, channel) in out.iter_mut().enumerate() {
            let a = self.0[i] as f64;
            let b = other.0[i] as f64;
            *channel = (a + (b - a) * t).round() as u8;
        }
        Rgb(out)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.0[0], self.0[1], self.0[2])
    }
}

/// A single style write produced by a tween or a scroll update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Style {
    /// Opacity plus `visibility: hidden` at zero.
    Opacity(f64),
    TranslateYPercent(f64),
    TranslateYPx(f64),
    Scale(f64),
    Color(Rgb),
}

/// Page-level colours from `data-background` / `data-color`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Theme {
    pub background: Option<String>,
    pub color: Option<String>,
}

/// The `.content` container pulled out of fetched markup.
#[derive(Clone, Debug, PartialEq)]
pub struct ContentFragment {
    pub template: String,
    pub inner_html: String,
}

/// Everything the core needs from the browser document and window.
///
/// Element handles are cheap clones that reference, never own, DOM nodes.
pub trait Document {
    type Element: Clone + PartialEq + fmt::Debug;

    fn query_all(&self, selector: &str) -> Vec<Self::Element>;
    fn query_in(&self, root: &Self::Element, selector: &str) -> Vec<Self::Element>;
    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;
    fn bounds(&self, element: &Self::Element) -> Rect;
    fn client_height(&self, element: &Self::Element) -> f64;
    fn screen(&self) -> ScreenSize;

    fn apply_style(&self, element: &Self::Element, style: Style);
    fn apply_theme(&self, theme: &Theme);

    /// `data-template` of the live `.content` container.
    fn content_template(&self) -> Option<String>;
    fn parse_content(&self, markup: &str) -> Option<ContentFragment>;
    fn swap_content(&self, fragment: &ContentFragment);

    fn push_history(&self, url: &str);
    /// Route every in-page anchor through the navigation orchestrator.
    fn bind_links(&self);

    fn select(&self, selector: &str) -> Selection<Self::Element> {
        Selection::from_vec(self.query_all(selector))
    }

    fn select_in(&self, root: &Self::Element, selector: &str) -> Selection<Self::Element> {
        Selection::from_vec(self.query_in(root, selector))
    }
}

/// Whether an anchor should be handled in-page instead of by the browser.
pub fn is_internal_link(href: &str, origin: &str, target: Option<&str>) -> bool {
    if matches!(target, Some(t) if t.eq_ignore_ascii_case("_blank")) {
        return false;
    }
    if href.is_empty() || href.starts_with('#') {
        return false;
    }
    if href.starts_with("mailto:") || href.starts_with("tel:") {
        return false;
    }
    if href.starts_with('/') && !href.starts_with("//") {
        return true;
    }
    match href.strip_prefix(origin) {
        Some(rest) => rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'),
        None => false,
    }
}

use super::constants::{
    COLOR_BRIGHT_GREY, COLOR_WHITE, NAVIGATION_COLOR_SECS, NAVIGATION_ITEM_SECS,
};
use super::document::{Document, Rgb};
use super::template::Template;
use super::tween::{Animator, Property, Tween};

const ROOT: &str = ".navigation";
const ITEMS: &str = ".navigation__list__item";

/// The persistent site navigation bar.
///
/// Item 0 links to collections, item 1 to about; whichever page is not
/// current stays visible.
#[derive(Debug)]
pub struct Navigation<E> {
    element: Option<E>,
    items: Vec<E>,
    color: Rgb,
}

impl<E: Clone + PartialEq> Navigation<E> {
    pub fn new<D>(document: &D) -> Self
    where
        D: Document<Element = E>,
    {
        let element = document.select(ROOT).first().cloned();
        let items = match &element {
            Some(root) => document.query_in(root, ITEMS),
            None => {
                log::warn!("[navigation] no {} element", ROOT);
                Vec::new()
            }
        };
        Self {
            element,
            items,
            color: Rgb(COLOR_WHITE),
        }
    }

    pub fn on_change(&mut self, template: Template, animator: &mut Animator<E>) {
        let (color, visible, hidden) = if template == Template::About {
            (Rgb(COLOR_BRIGHT_GREY), 0, 1)
        } else {
            (Rgb(COLOR_WHITE), 1, 0)
        };

        if let Some(element) = &self.element {
            animator.play(
                Tween::from_to(
                    element.clone(),
                    Property::Color {
                        from: self.color,
                        to: color,
                    },
                    0.0,
                    1.0,
                )
                .duration(NAVIGATION_COLOR_SECS),
            );
        }
        self.color = color;

        if let Some(item) = self.items.get(visible) {
            animator.play(
                Tween::to(item.clone(), Property::Opacity, 1.0)
                    .delay(NAVIGATION_ITEM_SECS)
                    .duration(NAVIGATION_ITEM_SECS),
            );
        }
        if let Some(item) = self.items.get(hidden) {
            animator.play(
                Tween::to(item.clone(), Property::Opacity, 0.0).duration(NAVIGATION_ITEM_SECS),
            );
        }
        log::info!("[navigation] {} -> {}", template, color);
    }

    /// Colour the bar is heading to.
    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn items(&self) -> &[E] {
        &self.items
    }
}

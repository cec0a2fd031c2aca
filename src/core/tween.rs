use super::constants::DEFAULT_TWEEN_SECS;
use super::document::{Rgb, Style};
use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Ease {
    Linear,
    /// Quadratic ease-out, the default curve.
    #[default]
    Power1Out,
    ExpoOut,
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power1Out => 1.0 - (1.0 - t) * (1.0 - t),
            Ease::ExpoOut => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2f64.powf(-10.0 * t)
                }
            }
        }
    }
}

/// An animatable style channel. `Color` tweens a 0..1 mix between two colours.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Property {
    Opacity,
    TranslateYPercent,
    TranslateYPx,
    Scale,
    Color { from: Rgb, to: Rgb },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Channel {
    Opacity,
    TranslateYPercent,
    TranslateYPx,
    Scale,
    Color,
}

impl Property {
    fn channel(&self) -> Channel {
        match self {
            Property::Opacity => Channel::Opacity,
            Property::TranslateYPercent => Channel::TranslateYPercent,
            Property::TranslateYPx => Channel::TranslateYPx,
            Property::Scale => Channel::Scale,
            Property::Color { .. } => Channel::Color,
        }
    }

    /// Value assumed when nothing has been written to this channel yet.
    fn rest_value(&self) -> f64 {
        match self {
            Property::Opacity | Property::Scale => 1.0,
            Property::TranslateYPercent | Property::TranslateYPx => 0.0,
            Property::Color { .. } => 0.0,
        }
    }

    pub fn style(&self, value: f64) -> Style {
        match *self {
            Property::Opacity => Style::Opacity(value.clamp(0.0, 1.0)),
            Property::TranslateYPercent => Style::TranslateYPercent(value),
            Property::TranslateYPx => Style::TranslateYPx(value),
            Property::Scale => Style::Scale(value),
            Property::Color { from, to } => Style::Color(from.mix(to, value)),
        }
    }
}

/// Description of one property animation on one target.
#[derive(Clone, Debug)]
pub struct Tween<E> {
    target: E,
    property: Property,
    from: Option<f64>,
    to: f64,
    duration: f64,
    delay: f64,
    ease: Ease,
}

impl<E> Tween<E> {
    /// Animate from whatever was last written to the channel.
    pub fn to(target: E, property: Property, to: f64) -> Self {
        Self {
            target,
            property,
            from: None,
            to,
            duration: DEFAULT_TWEEN_SECS,
            delay: 0.0,
            ease: Ease::default(),
        }
    }

    /// Animate from an explicit start value, written on the next tick even
    /// while the delay is still running.
    pub fn from_to(target: E, property: Property, from: f64, to: f64) -> Self {
        Self {
            from: Some(from),
            ..Self::to(target, property, to)
        }
    }

    pub fn duration(mut self, secs: f64) -> Self {
        self.duration = secs.max(0.0);
        self
    }

    pub fn delay(mut self, secs: f64) -> Self {
        self.delay = secs.max(0.0);
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn target(&self) -> &E {
        &self.target
    }

    /// Seconds from `play` until the tween settles.
    pub fn total(&self) -> f64 {
        self.delay + self.duration
    }
}

#[derive(Debug, Default)]
struct CompletionState {
    pending: usize,
    waker: Option<Waker>,
}

/// Resolves once every tween it tracks has finished or been killed.
///
/// Single-threaded: cloned handles share the same counter.
#[derive(Clone, Debug)]
pub struct Completion {
    state: Rc<RefCell<CompletionState>>,
}

impl Completion {
    fn new(pending: usize) -> Self {
        Self {
            state: Rc::new(RefCell::new(CompletionState {
                pending,
                waker: None,
            })),
        }
    }

    /// An already finished completion.
    pub fn resolved() -> Self {
        Self::new(0)
    }

    pub fn is_done(&self) -> bool {
        self.state.borrow().pending == 0
    }

    fn settle_one(&self) {
        let waker = {
            let mut state = self.state.borrow_mut();
            if state.pending == 0 {
                return;
            }
            state.pending -= 1;
            if state.pending > 0 {
                return;
            }
            state.waker.take()
        };
        if let Some(waker) = waker {
            waker.wake();
        }
    }
}

impl Future for Completion {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let mut state = self.state.borrow_mut();
        if state.pending == 0 {
            Poll::Ready(())
        } else {
            state.waker = Some(cx.waker().clone());
            Poll::Pending
        }
    }
}

#[derive(Debug)]
struct Running<E> {
    tween: Tween<E>,
    start: Option<f64>,
    elapsed: f64,
    completion: Completion,
}

/// Frame-driven tween scheduler.
///
/// Starting a tween on a (target, channel) pair that is already animating
/// kills the older tween first; killed tweens settle their completion
/// without writing their end value.
#[derive(Debug)]
pub struct Animator<E> {
    running: Vec<Running<E>>,
    queued: Vec<(E, Property, f64)>,
    last: Vec<(E, Channel, f64)>,
}

impl<E> Default for Animator<E> {
    fn default() -> Self {
        Self {
            running: Vec::new(),
            queued: Vec::new(),
            last: Vec::new(),
        }
    }
}

impl<E: Clone + PartialEq> Animator<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn play(&mut self, tween: Tween<E>) -> Completion {
        let completion = Completion::new(1);
        self.start(tween, completion.clone());
        completion
    }

    /// One completion for a whole batch; resolves when the last one settles.
    pub fn play_all(&mut self, tweens: Vec<Tween<E>>) -> Completion {
        let completion = Completion::new(tweens.len());
        for tween in tweens {
            self.start(tween, completion.clone());
        }
        completion
    }

    /// Immediate write, applied on the next tick. Kills a running tween on
    /// the same channel.
    pub fn set(&mut self, target: E, property: Property, value: f64) {
        self.kill_channel(&target, property.channel());
        self.queued.push((target, property, value));
    }

    /// Stop every tween on `target`.
    pub fn kill(&mut self, target: &E) {
        let mut i = 0;
        while i < self.running.len() {
            if self.running[i].tween.target == *target {
                let killed = self.running.remove(i);
                killed.completion.settle_one();
            } else {
                i += 1;
            }
        }
    }

    /// Kill `target` and drop its queued writes and remembered values. Used
    /// when its element is about to leave the document.
    pub fn forget(&mut self, target: &E) {
        self.kill(target);
        self.queued.retain(|(t, _, _)| t != target);
        self.last.retain(|(t, _, _)| t != target);
    }

    /// Number of (target, channel) values kept for `Tween::to` starts.
    pub fn remembered(&self) -> usize {
        self.last.len()
    }

    pub fn is_animating(&self, target: &E) -> bool {
        self.running.iter().any(|r| r.tween.target == *target)
    }

    pub fn active(&self) -> usize {
        self.running.len()
    }

    /// Advance every tween by `dt` seconds and hand each written style to
    /// `apply`.
    pub fn tick<F>(&mut self, dt: f64, mut apply: F)
    where
        F: FnMut(&E, Style),
    {
        let dt = dt.max(0.0);

        for (target, property, value) in std::mem::take(&mut self.queued) {
            apply(&target, property.style(value));
            self.remember(&target, property.channel(), value);
        }

        let mut finished = Vec::new();
        for (i, running) in self.running.iter_mut().enumerate() {
            let explicit = running.tween.from;
            running.elapsed += dt;
            let local = running.elapsed - running.tween.delay;

            if local < 0.0 {
                // fromTo renders its start state right away
                if let (Some(from), None) = (explicit, running.start) {
                    running.start = Some(from);
                    apply(&running.tween.target, running.tween.property.style(from));
                    remember(
                        &mut self.last,
                        &running.tween.target,
                        running.tween.property.channel(),
                        from,
                    );
                }
                continue;
            }

            let start = match running.start {
                Some(start) => start,
                None => {
                    let property = &running.tween.property;
                    let start = explicit.unwrap_or_else(|| {
                        recall(&self.last, &running.tween.target, property.channel())
                            .unwrap_or_else(|| property.rest_value())
                    });
                    running.start = Some(start);
                    start
                }
            };

            let progress = if running.tween.duration <= 0.0 {
                1.0
            } else {
                (local / running.tween.duration).min(1.0)
            };
            let eased = running.tween.ease.apply(progress);
            let value = if progress >= 1.0 {
                running.tween.to
            } else {
                start + (running.tween.to - start) * eased
            };

            apply(&running.tween.target, running.tween.property.style(value));
            remember(
                &mut self.last,
                &running.tween.target,
                running.tween.property.channel(),
                value,
            );

            if progress >= 1.0 {
                finished.push(i);
            }
        }

        for i in finished.into_iter().rev() {
            let done = self.running.remove(i);
            done.completion.settle_one();
        }
    }

    fn start(&mut self, tween: Tween<E>, completion: Completion) {
        self.kill_channel(&tween.target, tween.property.channel());
        self.running.push(Running {
            tween,
            start: None,
            elapsed: 0.0,
            completion,
        });
    }

    fn kill_channel(&mut self, target: &E, channel: Channel) {
        let mut i = 0;
        while i < self.running.len() {
            let tween = &self.running[i].tween;
            if tween.target == *target && tween.property.channel() == channel {
                let killed = self.running.remove(i);
                killed.completion.settle_one();
            } else {
                i += 1;
            }
        }
    }

    fn remember(&mut self, target: &E, channel: Channel, value: f64) {
        remember(&mut self.last, target, channel, value);
    }
}

fn recall<E: PartialEq>(last: &[(E, Channel, f64)], target: &E, channel: Channel) -> Option<f64> {
    last.iter()
        .find(|(t, c, _)| t == target && *c == channel)
        .map(|(_, _, v)| *v)
}

fn remember<E: Clone + PartialEq>(
    last: &mut Vec<(E, Channel, f64)>,
    target: &E,
    channel: Channel,
    value: f64,
) {
    match last.iter_mut().find(|(t, c, _)| t == target && *c == channel) {
        Some(entry) => entry.2 = value,
        None => last.push((target.clone(), channel, value)),
    }
}

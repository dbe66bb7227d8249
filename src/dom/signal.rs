//! Discrete inputs delivered to behaviors.

use super::element::ElementId;

/// One page-level notification.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    /// Initial content is in place.
    Ready,
    Scroll,
    Resize,
    /// A media condition may have flipped (viewport class, hover capability).
    MediaChange,
    /// The reduced-motion preference changed.
    ReducedMotionChange,
    Click { target: ElementId },
    KeyDown { key: String },
    PointerEnter { target: ElementId },
    FocusIn { target: ElementId },
    AnimationEnd { target: ElementId, name: String },
    TransitionEnd { target: ElementId },
    /// A disclosure element was opened or closed.
    DetailsToggle { target: ElementId },
    /// The class list of `target` changed.
    ClassMutation { target: ElementId },
    /// Elements were added to the page.
    DomChange,
}

/// Discriminant used for subscription interests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
    Ready,
    Scroll,
    Resize,
    MediaChange,
    ReducedMotionChange,
    Click,
    KeyDown,
    PointerEnter,
    FocusIn,
    AnimationEnd,
    TransitionEnd,
    DetailsToggle,
    ClassMutation,
    DomChange,
}

impl Signal {
    pub fn kind(&self) -> SignalKind {
        match self {
            Signal::Ready => SignalKind::Ready,
            Signal::Scroll => SignalKind::Scroll,
            Signal::Resize => SignalKind::Resize,
            Signal::MediaChange => SignalKind::MediaChange,
            Signal::ReducedMotionChange => SignalKind::ReducedMotionChange,
            Signal::Click { .. } => SignalKind::Click,
            Signal::KeyDown { .. } => SignalKind::KeyDown,
            Signal::PointerEnter { .. } => SignalKind::PointerEnter,
            Signal::FocusIn { .. } => SignalKind::FocusIn,
            Signal::AnimationEnd { .. } => SignalKind::AnimationEnd,
            Signal::TransitionEnd { .. } => SignalKind::TransitionEnd,
            Signal::DetailsToggle { .. } => SignalKind::DetailsToggle,
            Signal::ClassMutation { .. } => SignalKind::ClassMutation,
            Signal::DomChange => SignalKind::DomChange,
        }
    }
}

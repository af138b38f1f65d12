//! User interaction mapping
//!
//! Translates raw input (key names, clicked element attributes, pointer
//! events) into [`Action`]s, and declares the table of DOM listeners the
//! widget installs on mount.

use crate::data::ProductId;

/// `data-action` value of the previous button
pub const ACTION_PREVIOUS: &str = "prev";
/// `data-action` value of the next button
pub const ACTION_NEXT: &str = "next";
/// `data-action` value of a dot
pub const ACTION_GO_TO: &str = "goto";
/// `data-action` value of a favorite button
pub const ACTION_FAVORITE: &str = "favorite";
/// `data-action` value of a call-to-action button
pub const ACTION_OPEN: &str = "open";

/// Something the user (or the timer) asked the carousel to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Go back one slide
    Previous,
    /// Go forward one slide
    Next,
    /// Jump to a slide
    GoTo(usize),
    /// Flip a product's favorite state
    ToggleFavorite(ProductId),
    /// Open a product page in a new browsing context
    OpenProduct(String),
    /// Pointer entered the carousel
    PauseAutoAdvance,
    /// Pointer left the carousel
    ResumeAutoAdvance,
}

/// Maps a `KeyboardEvent.key` value to an action
///
/// Only the horizontal arrow keys are handled.
pub fn action_for_key(key: &str) -> Option<Action> {
    match key {
        "ArrowLeft" => Some(Action::Previous),
        "ArrowRight" => Some(Action::Next),
        _ => None,
    }
}

/// Attributes read from the clicked element carrying `data-action`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickTarget {
    /// Value of `data-action`
    pub action: String,
    /// Value of `data-index`, if any
    pub index: Option<String>,
    /// Value of `data-product-id`, if any
    pub product_id: Option<String>,
    /// Value of `data-url`, if any
    pub url: Option<String>,
}

/// Resolves a clicked element to an action
///
/// Returns `None` for unknown actions or missing/malformed attributes.
pub fn resolve_click(target: &ClickTarget) -> Option<Action> {
    match target.action.as_str() {
        ACTION_PREVIOUS => Some(Action::Previous),
        ACTION_NEXT => Some(Action::Next),
        ACTION_GO_TO => {
            let index = target.index.as_deref()?.trim().parse().ok()?;
            Some(Action::GoTo(index))
        }
        ACTION_FAVORITE => {
            let id = target.product_id.as_deref()?.trim().parse().ok()?;
            Some(Action::ToggleFavorite(ProductId(id)))
        }
        ACTION_OPEN => {
            let url = target.url.as_deref()?.trim();
            (!url.is_empty()).then(|| Action::OpenProduct(url.to_string()))
        }
        _ => None,
    }
}

/// Where a listener is attached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingTarget {
    /// The host document
    Document,
    /// The carousel wrapper element
    Wrapper,
}

/// What a listener does with its event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    /// Arrow-key navigation
    Keyboard,
    /// Delegated clicks on `data-action` elements
    Click,
    /// Broken product image
    ImageError,
    /// Pause auto-advance
    PointerEnter,
    /// Restart auto-advance
    PointerLeave,
}

/// One row of the event-binding table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    /// Element the listener is attached to
    pub target: BindingTarget,
    /// DOM event name
    pub event: &'static str,
    /// Whether to listen in the capture phase
    pub capture: bool,
    /// Handler invoked for the event
    pub handler: Handler,
}

/// Listeners installed on mount and removed on unmount
///
/// Image `error` events do not bubble, so that row listens in the capture
/// phase to catch them on the wrapper.
pub const BINDINGS: &[Binding] = &[
    Binding {
        target: BindingTarget::Document,
        event: "keydown",
        capture: false,
        handler: Handler::Keyboard,
    },
    Binding {
        target: BindingTarget::Wrapper,
        event: "click",
        capture: false,
        handler: Handler::Click,
    },
    Binding {
        target: BindingTarget::Wrapper,
        event: "error",
        capture: true,
        handler: Handler::ImageError,
    },
    Binding {
        target: BindingTarget::Wrapper,
        event: "mouseenter",
        capture: false,
        handler: Handler::PointerEnter,
    },
    Binding {
        target: BindingTarget::Wrapper,
        event: "mouseleave",
        capture: false,
        handler: Handler::PointerLeave,
    },
];

/// Attaches every binding in table order
///
/// If one fails, the listeners attached before it are detached again and
/// the error is returned.
pub fn attach_all<L, E>(
    bindings: &[Binding],
    mut attach: impl FnMut(&Binding) -> Result<L, E>,
    detach: impl Fn(&L),
) -> Result<Vec<L>, E> {
    let mut attached = Vec::with_capacity(bindings.len());

    for binding in bindings {
        match attach(binding) {
            Ok(listener) => attached.push(listener),
            Err(error) => {
                attached.iter().for_each(&detach);
                return Err(error);
            }
        }
    }

    Ok(attached)
}

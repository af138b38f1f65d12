//! Browser mounting
//!
//! Injects the stylesheet and container next to the page's hero banner,
//! renders the cards, binds the listeners from [`BINDINGS`] and drives the
//! auto-advance interval. Only compiled for `wasm32`; the ordering rules it
//! follows live in [`crate::lifecycle`].

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;
use tracing::{debug, error, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlButtonElement, HtmlElement, HtmlImageElement,
    KeyboardEvent, Window,
};

use crate::app::{CarouselWidget, Effect};
use crate::cache::LocalStore;
use crate::carousel::Position;
use crate::config::CarouselConfig;
use crate::data::{FeedError, HttpFeed, ProductId};
use crate::interaction::{
    attach_all, resolve_click, Action, BindingTarget, ClickTarget, Handler, BINDINGS,
};
use crate::lifecycle::{Interval, MountSlot, MountTicket, Scheduler, Teardown, ViewGuard};
use crate::logging;
use crate::page::{find_anchor, is_homepage, MountError};
use crate::view::{
    container_markup, fallback_image, SeededRatings, ACTION_ATTR, ACTIVE_CLASS, CONTAINER_CLASS,
    DOT_CLASS, FAVORITE_CLASS, INDEX_ATTR, NAV_CLASS, PRODUCT_ID_ATTR, STYLESHEET, STYLE_CLASS,
    TRACK_CLASS, URL_ATTR, WRAPPER_CLASS,
};

type Widget = CarouselWidget<LocalStore, HttpFeed>;

/// Errors that abort initialization
#[derive(Debug, Error)]
pub enum InitError {
    /// The page cannot host the widget
    #[error(transparent)]
    Mount(#[from] MountError),

    /// The product list could not be loaded
    #[error("Failed to load products: {0}")]
    Feed(#[from] FeedError),

    /// A newer mount or an unmount happened while products were loading
    #[error("Mount superseded while loading products")]
    Superseded,
}

pub(crate) fn js_value_message(error: JsValue, fallback: &str) -> String {
    error.as_string().unwrap_or_else(|| fallback.to_string())
}

fn dom_error(error: JsValue, fallback: &str) -> MountError {
    MountError::Dom(js_value_message(error, fallback))
}

/// Removes every element matching `selector`
fn remove_all(document: &Document, selector: &str) {
    let Ok(nodes) = document.query_selector_all(selector) else {
        return;
    };

    for index in 0..nodes.length() {
        let Some(node) = nodes.item(index) else {
            continue;
        };

        if let Ok(element) = node.dyn_into::<Element>() {
            element.remove();
        }
    }
}

/// Toggles `class` on `element`, logging a refused change
fn toggle_class(element: &Element, class: &str, on: bool) {
    if let Err(error) = element.class_list().toggle_with_force(class, on) {
        warn!(class, error = %js_value_message(error, "classList.toggle failed"), "Failed to update class");
    }
}

/// Elements of one mounted instance
struct MountedView {
    window: Window,
    container: Element,
    style: Element,
}

impl MountedView {
    /// Injects the style block and an empty container after the anchor
    ///
    /// Nothing is injected when no anchor matches.
    fn mount(window: &Window, document: &Document, config: &CarouselConfig) -> Result<Self, MountError> {
        let anchor = find_anchor(&config.anchor_selectors, |selector| {
            document.query_selector(selector).ok().flatten()
        })
        .ok_or(MountError::AnchorNotFound)?;

        let head = document
            .head()
            .ok_or_else(|| MountError::Dom("Document head is unavailable".to_string()))?;

        let style = document
            .create_element("style")
            .map_err(|error| dom_error(error, "Failed to create style element"))?;
        style.set_class_name(STYLE_CLASS);
        style.set_text_content(Some(STYLESHEET));
        head.append_child(&style)
            .map_err(|error| dom_error(error, "Failed to inject style element"))?;

        let container = match document.create_element("div") {
            Ok(container) => container,
            Err(error) => {
                style.remove();
                return Err(dom_error(error, "Failed to create container"));
            }
        };
        container.set_class_name(CONTAINER_CLASS);
        container.set_inner_html(&container_markup(config));

        if let Err(error) = anchor.insert_adjacent_element("afterend", &container) {
            style.remove();
            return Err(dom_error(error, "Failed to insert container"));
        }

        Ok(Self {
            window: window.clone(),
            container,
            style,
        })
    }

    fn query(&self, selector: &str) -> Option<Element> {
        self.container.query_selector(selector).ok().flatten()
    }

    fn wrapper(&self) -> Result<Element, MountError> {
        self.query(&format!(".{WRAPPER_CLASS}"))
            .ok_or_else(|| MountError::Dom("Carousel wrapper is missing".to_string()))
    }

    fn render_body(&self, html: &str) -> Result<(), MountError> {
        self.wrapper()?.set_inner_html(html);
        Ok(())
    }

    fn set_button_disabled(&self, direction: &str, disabled: bool) {
        let button = self
            .query(&format!(".{NAV_CLASS}.{direction}"))
            .and_then(|element| element.dyn_into::<HtmlButtonElement>().ok());

        if let Some(button) = button {
            button.set_disabled(disabled);
        }
    }

    fn apply_position(&self, position: &Position) {
        let track = self
            .query(&format!(".{TRACK_CLASS}"))
            .and_then(|element| element.dyn_into::<HtmlElement>().ok());

        if let Some(track) = track {
            if let Err(error) = track.style().set_property("transform", &position.transform()) {
                warn!(error = %js_value_message(error, "setProperty failed"), "Failed to move track");
            }
        }

        if let Ok(dots) = self.container.query_selector_all(&format!(".{DOT_CLASS}")) {
            for index in 0..dots.length() {
                let Some(node) = dots.item(index) else {
                    continue;
                };

                let Ok(dot) = node.dyn_into::<Element>() else {
                    continue;
                };

                let is_active = usize::try_from(index).is_ok_and(|index| index == position.index);
                toggle_class(&dot, ACTIVE_CLASS, is_active);
            }
        }

        self.set_button_disabled("prev", position.prev_disabled);
        self.set_button_disabled("next", position.next_disabled);
    }

    fn set_favorite(&self, id: ProductId, active: bool) {
        let selector = format!("[{PRODUCT_ID_ATTR}=\"{id}\"] .{FAVORITE_CLASS}");
        let Some(button) = self.query(&selector) else {
            return;
        };

        toggle_class(&button, ACTIVE_CLASS, active);
        let pressed = if active { "true" } else { "false" };
        if let Err(error) = button.set_attribute("aria-pressed", pressed) {
            warn!(%id, error = %js_value_message(error, "setAttribute failed"), "Failed to update favorite state");
        }
    }

    fn open_url(&self, url: &str) {
        if let Err(error) = self.window.open_with_url_and_target(url, "_blank") {
            warn!(url, error = %js_value_message(error, "window.open failed"), "Failed to open product");
        }
    }

    fn is_connected(&self) -> bool {
        self.container.is_connected()
    }
}

impl Teardown for MountedView {
    fn teardown(&self) {
        self.container.remove();
        self.style.remove();
    }
}

/// `setInterval` on the window, calling the widget's tick
struct WindowScheduler {
    window: Window,
    tick: Option<Closure<dyn FnMut()>>,
}

impl Scheduler for WindowScheduler {
    type Handle = i32;

    fn schedule(&mut self, interval_ms: i32) -> Option<i32> {
        let tick = self.tick.as_ref()?;

        match self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(tick.as_ref().unchecked_ref(), interval_ms)
        {
            Ok(handle) => Some(handle),
            Err(error) => {
                warn!(error = %js_value_message(error, "setInterval failed"), "Auto-advance disabled");
                None
            }
        }
    }

    fn cancel(&mut self, handle: i32) {
        self.window.clear_interval_with_handle(handle);
    }
}

/// Shared state reachable from every listener
struct Context {
    widget: RefCell<Widget>,
    view: ViewGuard<MountedView>,
    timer: RefCell<Interval<WindowScheduler>>,
}

impl Context {
    fn apply(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::UpdatePosition(position) => self.view.apply_position(&position),
                Effect::SetFavorite { id, active } => self.view.set_favorite(id, active),
                Effect::OpenUrl(url) => self.view.open_url(&url),
                Effect::StartTimer => self.timer.borrow_mut().start(),
                Effect::StopTimer => self.timer.borrow_mut().stop(),
            }
        }
    }

    fn run(&self, action: Action) {
        let effects = self.widget.borrow_mut().handle(action);
        self.apply(effects);
    }

    fn tick(&self) {
        let effects = self.widget.borrow_mut().tick();
        self.apply(effects);
    }

    fn dispatch(&self, handler: Handler, event: &Event) {
        match handler {
            Handler::Keyboard => {
                if !self.view.is_connected() {
                    return;
                }

                let Some(key_event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };

                let effects = self.widget.borrow_mut().handle_key(&key_event.key());
                if let Some(effects) = effects {
                    event.prevent_default();
                    self.apply(effects);
                }
            }
            Handler::Click => {
                let Some(action) = click_target(event).as_ref().and_then(resolve_click) else {
                    return;
                };

                if matches!(action, Action::ToggleFavorite(_)) {
                    event.stop_propagation();
                }
                self.run(action);
            }
            Handler::ImageError => {
                let image = event
                    .target()
                    .and_then(|target| target.dyn_into::<HtmlImageElement>().ok());

                if let Some(image) = image {
                    if let Some(placeholder) = fallback_image(&image.src()) {
                        image.set_src(placeholder);
                    }
                }
            }
            Handler::PointerEnter => self.run(Action::PauseAutoAdvance),
            Handler::PointerLeave => self.run(Action::ResumeAutoAdvance),
        }
    }
}

/// Reads the action attributes of the closest `data-action` ancestor
fn click_target(event: &Event) -> Option<ClickTarget> {
    let element = event.target()?.dyn_into::<Element>().ok()?;
    let actionable = element.closest(&format!("[{ACTION_ATTR}]")).ok().flatten()?;

    Some(ClickTarget {
        action: actionable.get_attribute(ACTION_ATTR)?,
        index: actionable.get_attribute(INDEX_ATTR),
        product_id: actionable.get_attribute(PRODUCT_ID_ATTR),
        url: actionable.get_attribute(URL_ATTR),
    })
}

/// An attached DOM listener
struct Listener {
    target: EventTarget,
    event: &'static str,
    capture: bool,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn detach(&self) {
        if let Err(error) = self.target.remove_event_listener_with_callback_and_bool(
            self.event,
            self.callback.as_ref().unchecked_ref(),
            self.capture,
        ) {
            warn!(event = self.event, error = %js_value_message(error, "removeEventListener failed"), "Failed to detach listener");
        }
    }
}

/// Attaches every row of the binding table to `context`
fn bind(context: &Rc<Context>, document: &Document) -> Result<Vec<Listener>, MountError> {
    let wrapper = context.view.wrapper()?;

    attach_all(
        BINDINGS,
        |binding| {
            let target: EventTarget = match binding.target {
                BindingTarget::Document => document.clone().into(),
                BindingTarget::Wrapper => wrapper.clone().into(),
            };

            let handler = binding.handler;
            let handler_context = Rc::clone(context);
            let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                handler_context.dispatch(handler, &event);
            });

            target
                .add_event_listener_with_callback_and_bool(
                    binding.event,
                    callback.as_ref().unchecked_ref(),
                    binding.capture,
                )
                .map_err(|error| dom_error(error, "Failed to add event listener"))?;

            Ok(Listener {
                target,
                event: binding.event,
                capture: binding.capture,
                callback,
            })
        },
        Listener::detach,
    )
}

/// A live carousel instance
struct Mounted {
    context: Rc<Context>,
    listeners: Vec<Listener>,
}

impl Teardown for Mounted {
    /// Stops the timer, removes listeners and deletes the injected elements
    ///
    /// Dropping the tick closure breaks its reference back to the context.
    fn teardown(&self) {
        {
            let mut timer = self.context.timer.borrow_mut();
            timer.stop();
            timer.scheduler_mut().tick = None;
        }

        for listener in &self.listeners {
            listener.detach();
        }

        self.context.view.teardown();
        info!("Carousel unmounted");
    }
}

thread_local! {
    static SLOT: RefCell<MountSlot<Mounted>> = const { RefCell::new(MountSlot::new()) };
}

/// Tears down the live instance and cancels any mount still loading
pub fn unmount_active() {
    SLOT.with(|slot| slot.borrow_mut().clear());
}

fn is_current(ticket: MountTicket) -> bool {
    SLOT.with(|slot| slot.borrow().is_current(ticket))
}

async fn try_mount(config: CarouselConfig) -> Result<(MountTicket, Mounted), InitError> {
    let window =
        web_sys::window().ok_or_else(|| MountError::Dom("Window is unavailable".to_string()))?;
    let document = window
        .document()
        .ok_or_else(|| MountError::Dom("Document is unavailable".to_string()))?;

    let path = window
        .location()
        .pathname()
        .map_err(|error| dom_error(error, "Location is unavailable"))?;
    if !is_homepage(&path, &config.homepage_paths) {
        return Err(MountError::NotHomepage(path).into());
    }

    let ticket = SLOT.with(|slot| slot.borrow_mut().begin());
    remove_all(&document, &format!(".{CONTAINER_CLASS}"));
    remove_all(&document, &format!(".{STYLE_CLASS}"));

    let view = ViewGuard::new(MountedView::mount(&window, &document, &config)?);

    let interval_ms = i32::try_from(config.auto_advance_interval.as_millis()).unwrap_or(i32::MAX);
    let store = LocalStore::open(&window);
    let feed = HttpFeed::new(config.feed_url.clone());
    // Ratings are decorative; a time seed varies them per page load
    let seed = js_sys::Date::now() as u64;
    let mut widget = CarouselWidget::new(config, store, feed).with_ratings(SeededRatings::new(seed));

    widget.load().await?;

    // Another mount may have replaced this view while the fetch was pending
    if !is_current(ticket) || !view.is_connected() {
        return Err(InitError::Superseded);
    }

    view.render_body(&widget.render_body())?;
    view.apply_position(&widget.position());

    let scheduler = WindowScheduler {
        window,
        tick: None,
    };
    let context = Rc::new(Context {
        widget: RefCell::new(widget),
        view,
        timer: RefCell::new(Interval::new(scheduler, interval_ms)),
    });

    let listeners = bind(&context, &document)?;

    let tick_context = Rc::clone(&context);
    {
        let mut timer = context.timer.borrow_mut();
        timer.scheduler_mut().tick = Some(Closure::new(move || tick_context.tick()));
        timer.start();
    }

    Ok((ticket, Mounted { context, listeners }))
}

/// Mounts the carousel on the current page, replacing any previous instance
///
/// Every failure is logged and swallowed; the host page never sees an error.
pub async fn mount() {
    logging::init();

    match try_mount(CarouselConfig::default()).await {
        Ok((ticket, mounted)) => {
            if SLOT.with(|slot| slot.borrow_mut().commit(ticket, mounted)) {
                info!("Ebebek carousel initialized successfully!");
            } else {
                debug!("Discarded carousel from a superseded mount");
            }
        }
        Err(InitError::Mount(MountError::NotHomepage(path))) => {
            info!(%path, "wrong page");
        }
        Err(InitError::Mount(MountError::AnchorNotFound)) => {
            info!("Hero banner element not found, carousel not loaded");
        }
        Err(InitError::Superseded) => {
            debug!("Carousel mount superseded while loading");
        }
        Err(error) => {
            error!(%error, "Failed to initialize ebebek carousel");
        }
    }
}

/// JS entry point: (re)initializes the carousel
#[wasm_bindgen(js_name = mountCarousel)]
pub fn mount_carousel() {
    wasm_bindgen_futures::spawn_local(mount());
}

/// JS entry point: removes the carousel and all of its listeners
#[wasm_bindgen(js_name = unmountCarousel)]
pub fn unmount_carousel() {
    unmount_active();
}

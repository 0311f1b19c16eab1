//! Browser bindings: web-sys host implementations and the wasm entry point.
//!
//! Mirrors the split between a browser-free core and a thin wrapper that owns
//! DOM handles: [`ThemeController`] does all the work, [`ThemeSwitcher`] only
//! wires `click` listeners and hands event targets over.
//!
//! TRADE-OFFS
//! ==========
//! Listener closures are leaked with `forget()`. The controller lives for the
//! lifetime of the page and there is no teardown contract.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, NodeList, Storage, Window};

use crate::config::ThemeConfig;
use crate::controller::ThemeController;
use crate::error::{ConfigError, StorageError};
use crate::host::{Document, PreferenceStore};

/// Failure mounting the theme manager in the page.
#[derive(Debug, thiserror::Error)]
pub enum MountError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("overrides are not valid JSON: {0}")]
    Overrides(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<MountError> for JsValue {
    fn from(err: MountError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

// =============================================================================
// Host implementations
// =============================================================================

pub struct WebDocument {
    window: Window,
    document: web_sys::Document,
}

impl WebDocument {
    pub fn new(window: Window) -> Result<Self, MountError> {
        let document = window.document().ok_or(MountError::NoDocument)?;
        Ok(Self { window, document })
    }
}

fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length()).filter_map(|i| list.get(i)?.dyn_into::<Element>().ok()).collect()
}

impl Document for WebDocument {
    type Element = Element;

    fn root(&self) -> Option<Element> {
        self.document.document_element()
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        match self.document.query_selector_all(selector) {
            Ok(list) => elements(&list),
            Err(_) => Vec::new(),
        }
    }

    fn query_all_within(&self, scope: &Element, selector: &str) -> Vec<Element> {
        match scope.query_selector_all(selector) {
            Ok(list) => elements(&list),
            Err(_) => Vec::new(),
        }
    }

    fn query(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn classes(&self, element: &Element) -> Vec<String> {
        let list = element.class_list();
        (0..list.length()).filter_map(|i| list.item(i)).collect()
    }

    fn has_class(&self, element: &Element, class: &str) -> bool {
        element.class_list().contains(class)
    }

    fn add_class(&self, element: &Element, class: &str) {
        let _ = element.class_list().add_1(class);
    }

    fn remove_class(&self, element: &Element, class: &str) {
        let _ = element.class_list().remove_1(class);
    }

    fn replace_class(&self, element: &Element, old: &str, new: &str) -> bool {
        element.class_list().replace(old, new).unwrap_or(false)
    }

    fn attribute(&self, element: &Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn closest(&self, element: &Element, selector: &str) -> Option<Element> {
        element.closest(selector).ok().flatten()
    }

    fn contains(&self, scope: &Element, element: &Element) -> bool {
        let node: &web_sys::Node = element;
        scope.contains(Some(node))
    }

    fn matches_media(&self, query: &str) -> bool {
        self.window
            .match_media(query)
            .ok()
            .flatten()
            .map_or(false, |mq| mq.matches())
    }
}

/// `window.localStorage`, when the browser exposes it.
pub struct LocalStorage {
    storage: Option<Storage>,
}

impl LocalStorage {
    #[must_use]
    pub fn new(window: &Window) -> Self {
        Self { storage: window.local_storage().ok().flatten() }
    }
}

impl PreferenceStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = self.storage.as_ref().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|err| StorageError::Write(format!("{err:?}")))
    }
}

// =============================================================================
// Switcher
// =============================================================================

type SharedController = Rc<RefCell<ThemeController<WebDocument, LocalStorage>>>;

/// A controller mounted in the page with its click listeners attached.
pub struct ThemeSwitcher {
    controller: SharedController,
}

impl ThemeSwitcher {
    pub fn mount(config: ThemeConfig) -> Result<Self, MountError> {
        let window = web_sys::window().ok_or(MountError::NoWindow)?;
        let store = LocalStorage::new(&window);
        let document = WebDocument::new(window)?;
        let seed = random_seed();

        let mut controller = ThemeController::new(config, document, store, seed)?;
        controller.initialize();

        let controller = Rc::new(RefCell::new(controller));
        attach_listeners(&controller);
        Ok(Self { controller })
    }

    /// Run `f` against the controller unless a click handler is mid-flight.
    pub fn with<R>(&self, f: impl FnOnce(&mut ThemeController<WebDocument, LocalStorage>) -> R) -> Option<R> {
        self.controller.try_borrow_mut().ok().map(|mut controller| f(&mut *controller))
    }
}

fn attach_listeners(controller: &SharedController) {
    let targets: Vec<(usize, Element)> = controller
        .borrow()
        .listener_targets()
        .map(|(binding, element)| (binding, element.clone()))
        .collect();

    for (binding, element) in targets {
        let handle = Rc::clone(controller);
        let callback = Closure::wrap(Box::new(move |event: Event| {
            let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            if let Ok(mut controller) = handle.try_borrow_mut() {
                controller.handle_click(binding, &target);
            }
        }) as Box<dyn FnMut(Event)>);

        if element
            .add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())
            .is_ok()
        {
            callback.forget();
        } else {
            log::warn!("failed to attach theme click listener for binding {binding}");
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn random_seed() -> u64 {
    (js_sys::Math::random() * u64::MAX as f64) as u64 ^ js_sys::Date::now() as u64
}

fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

fn overrides_from_js(overrides: &JsValue) -> Result<Value, MountError> {
    if overrides.is_undefined() || overrides.is_null() {
        return Ok(Value::Null);
    }
    let text: String = js_sys::JSON::stringify(overrides)
        .map_err(|err| MountError::Overrides(format!("{err:?}")))?
        .into();
    serde_json::from_str(&text).map_err(|err| MountError::Overrides(err.to_string()))
}

// =============================================================================
// JavaScript API
// =============================================================================

/// Theme manager handle exported to JavaScript.
///
/// ```js
/// const manager = new ThemeManager({ themes: ["dark-theme", "light-theme", "pink-theme"] });
/// manager.selectNext();
/// ```
#[wasm_bindgen]
pub struct ThemeManager {
    switcher: ThemeSwitcher,
}

#[wasm_bindgen]
impl ThemeManager {
    /// Merge `overrides` over the defaults, validate, and mount in the page.
    #[wasm_bindgen(constructor)]
    pub fn new(overrides: JsValue) -> Result<ThemeManager, JsValue> {
        init_logging();
        let raw = overrides_from_js(&overrides)?;
        let config = ThemeConfig::from_overrides(&raw).map_err(MountError::from)?;
        let switcher = ThemeSwitcher::mount(config)?;
        Ok(Self { switcher })
    }

    #[wasm_bindgen(js_name = selectNext)]
    pub fn select_next(&self) -> bool {
        self.switcher.with(ThemeController::select_next).unwrap_or(false)
    }

    #[wasm_bindgen(js_name = selectPrevious)]
    pub fn select_previous(&self) -> bool {
        self.switcher.with(ThemeController::select_previous).unwrap_or(false)
    }

    #[wasm_bindgen(js_name = selectRandom)]
    pub fn select_random(&self) -> bool {
        self.switcher.with(ThemeController::select_random).unwrap_or(false)
    }

    pub fn select(&self, id: &str) -> bool {
        self.switcher.with(|controller| controller.select_by_identifier(id)).unwrap_or(false)
    }

    #[wasm_bindgen(js_name = activeTheme)]
    pub fn active_theme(&self) -> Option<String> {
        self.switcher.with(|controller| controller.active_theme().map(str::to_owned)).flatten()
    }
}

//! Theme controller: initial resolution, selection operations, DOM sync.
//!
//! DESIGN
//! ======
//! All state lives on one [`ThemeController`] instance: the validated theme
//! set, the active index, and the elements resolved from the configured
//! bindings. The host (browser glue or a test) owns the instance and routes
//! clicks into [`ThemeController::handle_click`]. Every operation runs to
//! completion synchronously and funnels through [`ThemeController::update_theme`],
//! so the root element never carries more than one theme class.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::action::Action;
use crate::config::ThemeConfig;
use crate::error::ConfigError;
use crate::host::{ColorScheme, Document, PreferenceStore, THEME_ATTRIBUTE};
use crate::theme::{ActiveTheme, ThemeSet};

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

/// Key of the persisted theme preference.
pub const STORAGE_KEY: &str = "theme-preference";

/// Which rule picked the initial theme.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The persisted preference named a known theme.
    Persisted,
    /// The OS/browser color-scheme preference mapped onto a theme.
    SystemPreference(ColorScheme),
    /// The configured default theme.
    Default,
    /// Nothing resolved; no new theme class was applied.
    Unresolved,
}

#[derive(Clone, Debug)]
enum BindingTarget<E> {
    Delegated { wrapper: E, button_selector: String },
    Direct { element: E },
}

#[derive(Clone, Debug)]
struct ResolvedBinding<E> {
    target: BindingTarget<E>,
    action: Action,
}

pub struct ThemeController<D: Document, S: PreferenceStore> {
    config: ThemeConfig,
    themes: ThemeSet,
    active: ActiveTheme,
    bindings: Vec<ResolvedBinding<D::Element>>,
    bound_buttons: Vec<D::Element>,
    document: D,
    store: S,
    rng: StdRng,
}

impl<D: Document, S: PreferenceStore> ThemeController<D, S> {
    /// Validate `config` and build a controller. Nothing touches the document
    /// until [`initialize`](Self::initialize).
    pub fn new(config: ThemeConfig, document: D, store: S, seed: u64) -> Result<Self, ConfigError> {
        let themes = ThemeSet::try_from(&config)?;
        Ok(Self {
            config,
            themes,
            active: ActiveTheme::Unset,
            bindings: Vec::new(),
            bound_buttons: Vec::new(),
            document,
            store,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Detect the current root theme, resolve bindings, and apply the initial theme.
    pub fn initialize(&mut self) -> Resolution {
        self.active = self.detect_existing_theme();
        self.resolve_bindings();

        let (resolution, index) = self.resolve_initial_theme();
        if let Some(index) = index {
            self.update_theme(index);
        }
        self.sync_buttons();

        log::info!(
            "theme manager initialized: {} themes, {} bindings, active {:?} ({resolution:?})",
            self.themes.len(),
            self.bindings.len(),
            self.active_theme(),
        );
        resolution
    }

    // --- Operations ---

    pub fn select_next(&mut self) -> bool {
        self.update_theme(self.themes.next_index(self.active))
    }

    pub fn select_previous(&mut self) -> bool {
        self.update_theme(self.themes.previous_index(self.active))
    }

    /// Pick uniformly among the themes other than the active one.
    pub fn select_random(&mut self) -> bool {
        let count = self.themes.len();
        if count < 2 {
            return false;
        }
        let index = match self.active {
            ActiveTheme::Unset => self.rng.random_range(0..count),
            ActiveTheme::Active(current) => {
                let pick = self.rng.random_range(0..count - 1);
                if pick >= current { pick + 1 } else { pick }
            }
        };
        self.update_theme(index)
    }

    /// Select a theme by identifier. Unknown identifiers are ignored.
    pub fn select_by_identifier(&mut self, id: &str) -> bool {
        match self.themes.position(id) {
            Some(index) => self.update_theme(index),
            None => {
                log::debug!("ignoring selection of unknown theme {id:?}");
                false
            }
        }
    }

    /// Select the theme named by the button enclosing `target`.
    pub fn select_by_button(&mut self, target: &D::Element, button_selector: &str) -> bool {
        match self.document.closest(target, button_selector) {
            Some(button) => self.select_from_element(&button),
            None => false,
        }
    }

    /// Run an action that needs no originating element.
    pub fn perform(&mut self, action: Action) -> bool {
        match action {
            Action::Next => self.select_next(),
            Action::Previous => self.select_previous(),
            Action::Random => self.select_random(),
            Action::SelectById => {
                log::debug!("{action} needs a clicked button; ignoring");
                false
            }
        }
    }

    /// Route a click delivered to the listener of `binding`.
    ///
    /// `target` is the event's originating element. Delegated bindings fire
    /// only when the target sits inside a matching button within the wrapper.
    pub fn handle_click(&mut self, binding: usize, target: &D::Element) -> bool {
        let Some(resolved) = self.bindings.get(binding).cloned() else {
            return false;
        };
        match resolved.target {
            BindingTarget::Direct { element } => match resolved.action {
                Action::SelectById => self.select_from_element(&element),
                action => self.perform(action),
            },
            BindingTarget::Delegated { wrapper, button_selector } => {
                let Some(button) = self.document.closest(target, &button_selector) else {
                    return false;
                };
                if !self.document.contains(&wrapper, &button) {
                    return false;
                }
                match resolved.action {
                    Action::SelectById => self.select_from_element(&button),
                    action => self.perform(action),
                }
            }
        }
    }

    /// Apply the theme at `new_index`.
    ///
    /// Returns `false` without touching anything when the index is out of
    /// range or already active.
    pub fn update_theme(&mut self, new_index: usize) -> bool {
        let Some(new_theme) = self.themes.get(new_index) else {
            return false;
        };
        if self.active == ActiveTheme::Active(new_index) {
            return false;
        }

        if let Some(root) = self.document.root() {
            match self.active.index().and_then(|i| self.themes.get(i)) {
                Some(old_theme) => {
                    if !self.document.replace_class(&root, old_theme, new_theme) {
                        self.document.add_class(&root, new_theme);
                    }
                }
                None => self.document.add_class(&root, new_theme),
            }
        }

        if let Err(err) = self.store.set(STORAGE_KEY, new_theme) {
            log::debug!("theme preference not persisted: {err}");
        }

        log::debug!("theme changed to {new_theme}");
        self.active = ActiveTheme::Active(new_index);
        self.sync_buttons();
        true
    }

    // --- Queries ---

    #[must_use]
    pub fn active(&self) -> ActiveTheme {
        self.active
    }

    #[must_use]
    pub fn active_theme(&self) -> Option<&str> {
        self.active.index().and_then(|i| self.themes.get(i))
    }

    #[must_use]
    pub fn themes(&self) -> &ThemeSet {
        &self.themes
    }

    #[must_use]
    pub fn config(&self) -> &ThemeConfig {
        &self.config
    }

    #[must_use]
    pub fn document(&self) -> &D {
        &self.document
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Buttons whose active marker the controller keeps in sync.
    #[must_use]
    pub fn bound_buttons(&self) -> &[D::Element] {
        &self.bound_buttons
    }

    /// Elements the host must attach a click listener to, keyed by binding index.
    pub fn listener_targets(&self) -> impl Iterator<Item = (usize, &D::Element)> {
        self.bindings.iter().enumerate().map(|(i, binding)| match &binding.target {
            BindingTarget::Delegated { wrapper, .. } => (i, wrapper),
            BindingTarget::Direct { element } => (i, element),
        })
    }

    // --- Internals ---

    fn select_from_element(&mut self, element: &D::Element) -> bool {
        match self.document.attribute(element, THEME_ATTRIBUTE) {
            Some(id) => self.select_by_identifier(&id),
            None => false,
        }
    }

    /// First theme class already on the root; extra theme classes are stripped.
    fn detect_existing_theme(&self) -> ActiveTheme {
        let Some(root) = self.document.root() else {
            return ActiveTheme::Unset;
        };
        let mut found = ActiveTheme::Unset;
        for class in self.document.classes(&root) {
            let Some(index) = self.themes.position(&class) else {
                continue;
            };
            if found.is_unset() {
                found = ActiveTheme::Active(index);
            } else {
                log::debug!("removing extra theme class {class} from root");
                self.document.remove_class(&root, &class);
            }
        }
        found
    }

    fn resolve_bindings(&mut self) {
        let mut bindings = Vec::new();
        let mut buttons: Vec<D::Element> = Vec::new();

        for wrapper in &self.config.button_wrappers {
            let Some(element) = self.document.query(&wrapper.wrapper_selector) else {
                log::debug!("no element matches wrapper selector {:?}", wrapper.wrapper_selector);
                continue;
            };
            for button in self.document.query_all_within(&element, &wrapper.button_selector) {
                if !buttons.contains(&button) {
                    buttons.push(button);
                }
            }
            bindings.push(ResolvedBinding {
                target: BindingTarget::Delegated { wrapper: element, button_selector: wrapper.button_selector.clone() },
                action: wrapper.action,
            });
        }

        for button in &self.config.buttons {
            let Some(element) = self.document.query(&button.selector) else {
                log::debug!("no element matches button selector {:?}", button.selector);
                continue;
            };
            if !buttons.contains(&element) {
                buttons.push(element.clone());
            }
            bindings.push(ResolvedBinding { target: BindingTarget::Direct { element }, action: button.action });
        }

        self.bindings = bindings;
        self.bound_buttons = buttons;
    }

    fn resolve_initial_theme(&self) -> (Resolution, Option<usize>) {
        if let Some(saved) = self.store.get(STORAGE_KEY) {
            if let Some(index) = self.themes.position(&saved) {
                return (Resolution::Persisted, Some(index));
            }
            log::debug!("ignoring persisted theme {saved:?}: not a configured theme");
        }

        for scheme in ColorScheme::ALL {
            if self.document.matches_media(scheme.media_query()) {
                if let Some(index) = self.scheme_theme(scheme) {
                    return (Resolution::SystemPreference(scheme), Some(index));
                }
            }
        }

        if let Some(index) = self.themes.position(&self.config.default_theme) {
            return (Resolution::Default, Some(index));
        }

        log::warn!(
            "could not resolve an initial theme (default {:?} is not configured); leaving theme unchanged",
            self.config.default_theme
        );
        (Resolution::Unresolved, None)
    }

    /// Theme for a color scheme: the explicit mapping when configured,
    /// otherwise the first theme whose name carries the scheme's token.
    fn scheme_theme(&self, scheme: ColorScheme) -> Option<usize> {
        if let Some(id) = self.config.color_scheme_themes.get(scheme) {
            return self.themes.position(id);
        }
        self.themes.iter().position(|theme| {
            theme
                .split(|c: char| c == '-' || c == '_' || c.is_whitespace())
                .any(|word| word.eq_ignore_ascii_case(scheme.token()))
        })
    }

    fn sync_buttons(&self) {
        let class = &self.config.active_class_name;
        let active = self.active_theme();
        for button in &self.bound_buttons {
            self.document.remove_class(button, class);
        }
        let Some(active) = active else {
            return;
        };
        for button in &self.bound_buttons {
            if self.document.attribute(button, THEME_ATTRIBUTE).as_deref() == Some(active) {
                self.document.add_class(button, class);
            }
        }
    }
}

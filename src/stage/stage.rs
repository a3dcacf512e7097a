use std::collections::BTreeMap;

use crate::{
    animation::tween::Tween,
    foundation::{
        core::{ElementId, Point, Style, Vec2, Viewport},
        error::{MotionError, MotionResult},
    },
    motion::{
        context::MotionCtx,
        parallax::{Direction, Parallax, ParallaxConfig},
        progress::ProgressWatch,
        reveal::{Reveal, RevealConfig, RevealPhase},
        text::{TextReveal, TextRevealConfig, WordTree},
    },
    platform::{capability::Platform, document::Document, storage::Storage},
    pointer::{
        cursor::{Cursor, CursorConfig, HoverState},
        follower::PointerService,
        magnetic::{Magnetic, MagneticConfig},
    },
    scroll::{
        clock::{ScrollClock, ScrollConfig, ScrollFrame, ScrollTarget, ScrollToOptions},
        trigger::{ScrollTriggerRegistry, TriggerEvent, TriggerId},
    },
    site::{
        boundary::{ErrorBoundary, Fallback, Rendered},
        contact::{ContactForm, ContactSubmission, SubmitState},
        nav::NavState,
        routes::Route,
    },
    stage::scope::Scope,
    theme::{
        ripple::RippleFrame,
        theme::{Theme, ThemeConfig, ThemeController, ThemeEvent},
    },
    transition::page::{PageTransition, TransitionConfig, TransitionEvent, TransitionLayers},
};

/// Tunables for every subsystem a [`Stage`] owns.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StageConfig {
    pub scroll: ScrollConfig,
    pub cursor: CursorConfig,
    pub transition: TransitionConfig,
    pub theme: ThemeConfig,
    /// Seconds the simulated contact submission stays pending.
    pub contact_delay: f64,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            scroll: ScrollConfig::default(),
            cursor: CursorConfig::default(),
            transition: TransitionConfig::default(),
            theme: ThemeConfig::default(),
            contact_delay: 1.5,
        }
    }
}

impl StageConfig {
    pub fn validate(&self) -> MotionResult<()> {
        self.scroll.validate()?;
        self.cursor.validate()?;
        self.transition.validate()?;
        self.theme.validate()?;
        Tween::new(0.0, 1.0, self.contact_delay).validate()
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct BindingId(pub u64);

/// Declarative request for one motion primitive.
///
/// Generic over how the target element is named so scenes can refer to elements by key and
/// resolve them later with [`BindingSpec::resolve`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BindingSpec<E = ElementId> {
    Reveal {
        element: E,
        #[serde(default)]
        config: RevealConfig,
    },
    LazyReveal {
        element: E,
    },
    TextReveal {
        element: E,
        #[serde(default)]
        config: TextRevealConfig,
    },
    SplitText {
        element: E,
    },
    Parallax {
        element: E,
        #[serde(default)]
        config: ParallaxConfig,
    },
    Column {
        element: E,
        #[serde(default)]
        direction: Direction,
        speed: f64,
    },
    Drift {
        element: E,
        #[serde(default)]
        direction: Direction,
        amount: f64,
    },
    ParallaxImage {
        element: E,
        intensity: f64,
    },
    Progress {
        element: E,
    },
    Magnetic {
        element: E,
        #[serde(default)]
        config: MagneticConfig,
    },
}

impl<E> BindingSpec<E> {
    pub fn element(&self) -> &E {
        match self {
            Self::Reveal { element, .. }
            | Self::LazyReveal { element }
            | Self::TextReveal { element, .. }
            | Self::SplitText { element }
            | Self::Parallax { element, .. }
            | Self::Column { element, .. }
            | Self::Drift { element, .. }
            | Self::ParallaxImage { element, .. }
            | Self::Progress { element }
            | Self::Magnetic { element, .. } => element,
        }
    }

    /// Reject timings no tween can play. Presets are always valid.
    pub fn validate(&self) -> MotionResult<()> {
        match self {
            Self::Reveal { config, .. } => config.validate(),
            Self::TextReveal { config, .. } => config.validate(),
            Self::Magnetic { config, .. } => config.validate(),
            Self::Column { speed: v, .. }
            | Self::Drift { amount: v, .. }
            | Self::ParallaxImage { intensity: v, .. }
                if !v.is_finite() =>
            {
                Err(MotionError::validation("parallax magnitude must be finite"))
            }
            _ => Ok(()),
        }
    }

    /// Swap the element reference, e.g. a scene key for a document id.
    pub fn resolve<F>(self, f: impl FnOnce(&E) -> Result<F, MotionError>) -> MotionResult<BindingSpec<F>> {
        let element = f(self.element())?;
        Ok(match self {
            Self::Reveal { config, .. } => BindingSpec::Reveal { element, config },
            Self::LazyReveal { .. } => BindingSpec::LazyReveal { element },
            Self::TextReveal { config, .. } => BindingSpec::TextReveal { element, config },
            Self::SplitText { .. } => BindingSpec::SplitText { element },
            Self::Parallax { config, .. } => BindingSpec::Parallax { element, config },
            Self::Column {
                direction, speed, ..
            } => BindingSpec::Column {
                element,
                direction,
                speed,
            },
            Self::Drift {
                direction, amount, ..
            } => BindingSpec::Drift {
                element,
                direction,
                amount,
            },
            Self::ParallaxImage { intensity, .. } => BindingSpec::ParallaxImage { element, intensity },
            Self::Progress { .. } => BindingSpec::Progress { element },
            Self::Magnetic { config, .. } => BindingSpec::Magnetic { element, config },
        })
    }
}

#[derive(Debug)]
enum Binding {
    Reveal(Reveal),
    Text(TextReveal),
    Parallax(Parallax),
    Progress(ProgressWatch),
    Magnetic(Magnetic),
}

impl Binding {
    fn mount(cx: &mut MotionCtx<'_>, spec: BindingSpec) -> Option<Self> {
        match spec {
            BindingSpec::Reveal { element, config } => {
                Reveal::mount(cx, element, config).map(Self::Reveal)
            }
            BindingSpec::LazyReveal { element } => {
                Reveal::mount(cx, element, RevealConfig::lazy()).map(Self::Reveal)
            }
            BindingSpec::TextReveal { element, config } => {
                TextReveal::mount(cx, element, config).map(Self::Text)
            }
            BindingSpec::SplitText { element } => {
                TextReveal::mount(cx, element, TextRevealConfig::split()).map(Self::Text)
            }
            BindingSpec::Parallax { element, config } => {
                Parallax::mount(cx, element, config).map(Self::Parallax)
            }
            BindingSpec::Column {
                element,
                direction,
                speed,
            } => Parallax::mount(cx, element, ParallaxConfig::column(direction, speed))
                .map(Self::Parallax),
            BindingSpec::Drift {
                element,
                direction,
                amount,
            } => Parallax::mount(cx, element, ParallaxConfig::drift(direction, amount))
                .map(Self::Parallax),
            BindingSpec::ParallaxImage { element, intensity } => {
                Parallax::mount(cx, element, ParallaxConfig::image(intensity)).map(Self::Parallax)
            }
            BindingSpec::Progress { element } => {
                ProgressWatch::mount(cx, element).map(Self::Progress)
            }
            BindingSpec::Magnetic { element, config } => {
                Magnetic::mount(cx, element, config).map(Self::Magnetic)
            }
        }
    }

    fn update(&mut self, cx: &mut MotionCtx<'_>, pointer: Option<Point>) {
        match self {
            Self::Reveal(b) => b.update(cx),
            Self::Text(b) => b.update(cx),
            Self::Parallax(b) => b.update(cx),
            Self::Progress(b) => b.update(cx),
            Self::Magnetic(b) => b.update(cx, pointer),
        }
    }

    /// Nothing left to write. Text keeps its word tree for snapshots until it is detached.
    fn is_spent(&self) -> bool {
        match self {
            Self::Reveal(b) => matches!(b.phase(), RevealPhase::Revealed | RevealPhase::Disposed),
            Self::Text(b) => b.is_disposed(),
            Self::Parallax(b) => !b.is_active(),
            Self::Progress(b) => !b.is_active(),
            Self::Magnetic(b) => !b.is_active(),
        }
    }

    fn dispose(&mut self, cx: &mut MotionCtx<'_>) {
        match self {
            Self::Reveal(b) => b.dispose(cx),
            Self::Text(b) => b.dispose(cx),
            Self::Parallax(b) => b.dispose(cx),
            Self::Progress(b) => b.dispose(cx),
            Self::Magnetic(b) => b.dispose(cx),
        }
    }
}

/// Something observable that happened during one [`Stage::tick`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StageEvent {
    TriggerFired { trigger: TriggerId },
    PageSwapped { from: String, to: String },
    PageSettled { route: String },
    ThemeSwapped { theme: Theme },
    RippleCleared { ripple: u64 },
    Contact { state: SubmitState },
    /// The theme toggle was abandoned because the new value could not be persisted.
    ThemeNotSaved { theme: Theme, reason: String },
}

/// Result of one [`Stage::tick`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct StageFrame {
    pub now: f64,
    /// `None` outside a rendering environment.
    pub scroll: Option<ScrollFrame>,
    pub events: Vec<StageEvent>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ElementSnapshot {
    pub id: ElementId,
    /// The element's `id` attribute, if any.
    pub name: Option<String>,
    pub tag: String,
    pub style: Style,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct WordsSnapshot {
    pub element: ElementId,
    pub words: WordTree,
}

/// Everything a [`Stage`] has written, in a serializable form.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct StageSnapshot {
    pub now: f64,
    pub route: String,
    pub not_found: bool,
    pub rendering: bool,
    pub scroll_offset: f64,
    pub scroll_limit: f64,
    pub theme: Theme,
    pub ripple: Option<RippleFrame>,
    pub nav: NavState,
    pub contact: SubmitState,
    pub cursor: Option<HoverState>,
    pub native_cursor: bool,
    pub bindings: usize,
    pub triggers: usize,
    pub fallback: Option<Fallback>,
    pub elements: Vec<ElementSnapshot>,
    pub words: Vec<WordsSnapshot>,
}

/// Composition root for one page lifetime.
///
/// Owns the single scroll clock, the trigger registry and every mounted primitive, and drives
/// them in a fixed order on each [`Stage::tick`]: clock, triggers, bindings, pointer followers,
/// transition, theme. Outside a rendering environment every motion call is a no-op and only
/// routing state moves.
pub struct Stage {
    platform: Box<dyn Platform>,
    storage: Box<dyn Storage>,
    config: StageConfig,
    doc: Document,
    clock: Option<ScrollClock>,
    triggers: ScrollTriggerRegistry,
    bindings: BTreeMap<BindingId, Binding>,
    next_binding: u64,
    pointer: PointerService,
    cursor: Option<Cursor>,
    nav_trigger: Option<ElementId>,
    transition: Option<PageTransition>,
    route: Route,
    pending_route: Option<Route>,
    nav: NavState,
    theme: ThemeController,
    contact: ContactSubmission,
    boundary: ErrorBoundary,
    /// Events raised between ticks, delivered by the next one.
    queued: Vec<StageEvent>,
    now: f64,
}

impl std::fmt::Debug for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stage")
            .field("viewport", &self.platform.viewport())
            .field("route", &self.route.path())
            .field("bindings", &self.bindings.len())
            .field("triggers", &self.triggers.len())
            .field("now", &self.now)
            .finish_non_exhaustive()
    }
}

impl Stage {
    pub fn new(platform: Box<dyn Platform>, storage: Box<dyn Storage>, config: StageConfig) -> Self {
        Self {
            platform,
            storage,
            config,
            doc: Document::new(),
            clock: None,
            triggers: ScrollTriggerRegistry::new(),
            bindings: BTreeMap::new(),
            next_binding: 0,
            pointer: PointerService::new(),
            cursor: None,
            nav_trigger: None,
            transition: None,
            route: Route::Home,
            pending_route: None,
            nav: NavState::new(),
            theme: ThemeController::new(config.theme),
            contact: ContactSubmission::new(config.contact_delay),
            boundary: ErrorBoundary::new(),
            queued: Vec::new(),
            now: 0.0,
        }
    }

    pub fn with_route(mut self, path: &str) -> Self {
        self.route = Route::parse(path);
        self.nav.on_route(&self.route);
        self
    }

    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Layout edits should be followed by [`Self::refresh_layout`].
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.platform.viewport()
    }

    pub fn is_rendering(&self) -> bool {
        self.platform.is_rendering()
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Route the current navigation will land on once the page is covered.
    pub fn pending_route(&self) -> Option<&Route> {
        self.pending_route.as_ref()
    }

    pub fn nav(&self) -> &NavState {
        &self.nav
    }

    pub fn nav_mut(&mut self) -> &mut NavState {
        &mut self.nav
    }

    pub fn theme(&self) -> &ThemeController {
        &self.theme
    }

    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    pub fn contact(&self) -> SubmitState {
        self.contact.state()
    }

    pub fn boundary(&self) -> &ErrorBoundary {
        &self.boundary
    }

    pub fn pointer(&self) -> &PointerService {
        &self.pointer
    }

    pub fn cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }

    pub fn transition(&self) -> Option<&PageTransition> {
        self.transition.as_ref()
    }

    pub fn triggers(&self) -> &ScrollTriggerRegistry {
        &self.triggers
    }

    pub fn scroll_clock(&self) -> Option<&ScrollClock> {
        self.clock.as_ref()
    }

    pub fn scroll_offset(&self) -> f64 {
        self.clock.as_ref().map_or(0.0, ScrollClock::offset)
    }

    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    pub fn contains(&self, id: BindingId) -> bool {
        self.bindings.contains_key(&id)
    }

    /// Create the page's scroll clock. Later calls return the existing one; the clock lives
    /// across navigations. `None` when nothing is rendered.
    pub fn initialize_scroll(&mut self) -> Option<&mut ScrollClock> {
        let viewport = self.platform.viewport()?;
        let limit = (self.doc.content_height() - viewport.height).max(0.0);
        let config = self.config.scroll;
        let clock = self.clock.get_or_insert_with(|| {
            tracing::debug!(limit, "scroll clock initialized");
            ScrollClock::new(config)
        });
        clock.set_limit(limit);
        Some(clock)
    }

    /// Re-measure the scroll extent and every trigger after layout or viewport changes.
    pub fn refresh_layout(&mut self) {
        let Some(viewport) = self.platform.viewport() else {
            return;
        };
        if let Some(clock) = &mut self.clock {
            clock.set_limit((self.doc.content_height() - viewport.height).max(0.0));
        }
        self.triggers.refresh(&self.doc, viewport);
    }

    fn next_id(&mut self) -> BindingId {
        self.next_binding += 1;
        BindingId(self.next_binding)
    }

    fn insert_binding(&mut self, binding: Binding) -> BindingId {
        let id = self.next_id();
        self.bindings.insert(id, binding);
        id
    }

    fn with_cx<R>(&mut self, f: impl FnOnce(&mut MotionCtx<'_>) -> R) -> Option<R> {
        let viewport = self.platform.viewport()?;
        let offset = self.scroll_offset();
        let mut cx = MotionCtx {
            doc: &mut self.doc,
            triggers: &mut self.triggers,
            viewport,
            offset,
            now: self.now,
        };
        Some(f(&mut cx))
    }

    /// Mount one primitive. `None` outside a rendering environment or when the target element is
    /// not attached; the caller then holds nothing that needs disposing.
    pub fn mount(&mut self, spec: BindingSpec) -> Option<BindingId> {
        if !self.is_rendering() {
            tracing::debug!(kind = ?spec, "not rendering; binding inert");
            return None;
        }
        self.initialize_scroll();
        let element = *spec.element();
        let Some(binding) = self.with_cx(|cx| Binding::mount(cx, spec)).flatten() else {
            tracing::debug!(?element, "target missing; binding inert");
            return None;
        };
        Some(self.insert_binding(binding))
    }

    /// Progress watcher with a callback, invoked whenever the element's scroll progress changes.
    pub fn watch_progress(
        &mut self,
        element: ElementId,
        on_progress: impl FnMut(f64) + 'static,
    ) -> Option<BindingId> {
        if !self.is_rendering() {
            return None;
        }
        self.initialize_scroll();
        let watch = self
            .with_cx(|cx| ProgressWatch::mount(cx, element))
            .flatten()?
            .on_progress(on_progress);
        Some(self.insert_binding(Binding::Progress(watch)))
    }

    /// Restore the element and release the binding's trigger. Idempotent.
    pub fn dispose(&mut self, id: BindingId) -> bool {
        let Some(mut binding) = self.bindings.remove(&id) else {
            return false;
        };
        let disposed = self.with_cx(|cx| binding.dispose(cx));
        if disposed.is_none() {
            tracing::debug!(?id, "disposed without a viewport");
        }
        true
    }

    pub fn dispose_all(&mut self) {
        let ids: Vec<_> = self.bindings.keys().copied().collect();
        for id in ids {
            self.dispose(id);
        }
    }

    /// Mount a group of bindings as a unit. When `f` fails, everything it mounted so far is
    /// disposed before the error is returned.
    pub fn mount_scope<T>(
        &mut self,
        f: impl FnOnce(&mut Scope<'_>) -> MotionResult<T>,
    ) -> MotionResult<(T, Vec<BindingId>)> {
        let mut scope = Scope::new(self);
        let value = f(&mut scope)?;
        Ok((value, scope.commit()))
    }

    /// Mount a page's bindings behind the error boundary. A failure leaves nothing mounted and
    /// shows the fallback screen.
    pub fn render_page<T>(
        &mut self,
        f: impl FnOnce(&mut Scope<'_>) -> MotionResult<T>,
    ) -> Rendered<T> {
        let result = self.mount_scope(f).map(|(value, _)| value);
        self.boundary.render(|| result)
    }

    pub fn mount_cursor(&mut self, ring: ElementId, dot: ElementId) -> MotionResult<bool> {
        if !self.is_rendering() {
            return Ok(false);
        }
        if let Some(mut old) = self.cursor.take() {
            old.dispose(&mut self.doc, &mut self.pointer);
        }
        let coarse = self.platform.coarse_pointer();
        let cursor = Cursor::mount(
            &mut self.doc,
            &mut self.pointer,
            ring,
            dot,
            self.config.cursor,
            coarse,
        )?;
        self.cursor = Some(cursor);
        Ok(true)
    }

    pub fn mount_transition(&mut self, layers: TransitionLayers) -> bool {
        if !self.is_rendering() {
            return false;
        }
        self.transition = Some(PageTransition::mount(
            &mut self.doc,
            layers,
            self.route.path(),
            self.config.transition,
        ));
        true
    }

    /// The floating menu trigger whose scale follows pointer proximity.
    pub fn set_nav_trigger(&mut self, element: Option<ElementId>) {
        self.nav_trigger = element;
    }

    pub fn hydrate_theme(&mut self) -> MotionResult<Theme> {
        self.theme.hydrate(self.storage.as_ref())
    }

    pub fn set_theme(&mut self, theme: Theme) -> MotionResult<()> {
        self.theme.set_theme(theme, self.storage.as_mut())
    }

    /// Start a theme ripple. No-op outside a rendering environment.
    pub fn toggle_theme(&mut self, origin: Option<Point>) -> MotionResult<Option<Theme>> {
        let Some(viewport) = self.platform.viewport() else {
            tracing::debug!("not rendering; theme toggle ignored");
            return Ok(None);
        };
        let ripple = self.theme.toggle(self.now, origin, viewport)?;
        Ok(Some(ripple.to))
    }

    pub fn submit_contact(&mut self, form: &ContactForm) -> MotionResult<()> {
        self.contact.submit(form, self.now)
    }

    pub fn on_wheel(&mut self, delta: Vec2) {
        if let Some(clock) = self.initialize_scroll() {
            clock.on_wheel(delta);
        }
    }

    pub fn on_touch(&mut self, delta: Vec2) {
        if let Some(clock) = self.initialize_scroll() {
            clock.on_touch(delta);
        }
    }

    pub fn on_native_scroll(&mut self, offset: f64) {
        if let Some(clock) = self.initialize_scroll() {
            clock.on_native_scroll(offset);
        }
    }

    /// Resolve a target against the document and hand it to the clock. Missing elements are
    /// ignored.
    pub fn scroll_to(&mut self, target: ScrollTarget, opts: ScrollToOptions) {
        let offset = match target {
            ScrollTarget::Offset(offset) => offset,
            ScrollTarget::Top => 0.0,
            ScrollTarget::Bottom => f64::INFINITY,
            ScrollTarget::Element(id) => match self.doc.rect(id) {
                Some(rect) => rect.y0,
                None => {
                    tracing::debug!(element = ?id, "scroll target missing");
                    return;
                }
            },
        };
        if let Some(clock) = self.initialize_scroll() {
            let offset = offset.min(clock.limit());
            clock.scroll_to(offset, opts);
        }
    }

    /// Pointer moved in client coordinates. `over` is the element under the pointer.
    pub fn on_pointer_move(&mut self, p: Point, over: Option<ElementId>) {
        self.pointer.on_move(p);
        if let Some(cursor) = &mut self.cursor {
            cursor.pointer_over(&self.doc, over, self.now);
        }
        let trigger = self.nav_trigger.and_then(|id| self.doc.rect(id));
        if let Some(rect) = trigger {
            let center = rect.center() - Vec2::new(0.0, self.scroll_offset());
            self.nav.on_pointer_distance(p.distance(center));
        }
    }

    pub fn set_input_mode(&mut self, coarse: bool) {
        self.platform.set_coarse_pointer(coarse);
        if let Some(cursor) = &mut self.cursor {
            cursor.set_input_mode(&mut self.doc, &mut self.pointer, coarse);
        }
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.platform.resize(viewport);
        self.refresh_layout();
    }

    /// Route change. With a transition mounted the swap happens once the old page is covered;
    /// otherwise immediately, and the next tick reports it.
    #[tracing::instrument(skip(self))]
    pub fn navigate(&mut self, path: &str) {
        let route = Route::parse(path);
        self.nav.close();
        let now = self.now;
        let rendering = self.platform.is_rendering();
        if let Some(transition) = self.transition.as_mut().filter(|_| rendering) {
            if transition.navigate(route.path(), now) {
                self.pending_route = Some(route);
            }
            return;
        }
        if route != self.route {
            let from = self.route.path();
            self.swap_page(route);
            self.queued.push(StageEvent::PageSwapped {
                from,
                to: self.route.path(),
            });
        }
    }

    fn swap_page(&mut self, route: Route) {
        tracing::debug!(from = %self.route.path(), to = %route.path(), "swapping page");
        self.dispose_all();
        self.nav.on_route(&route);
        self.route = route;
        if let Some(clock) = &mut self.clock {
            clock.scroll_to(
                0.0,
                ScrollToOptions {
                    immediate: true,
                    ..ScrollToOptions::default()
                },
            );
        }
    }

    /// Advance every subsystem to `now` (seconds).
    #[tracing::instrument(skip(self))]
    pub fn tick(&mut self, now: f64) -> MotionResult<StageFrame> {
        self.now = now;
        let mut events = std::mem::take(&mut self.queued);

        let scroll = self.initialize_scroll().map(|clock| clock.tick(now));

        if let Some(frame) = &scroll {
            self.nav.on_scroll(frame.offset);
            for TriggerEvent::Fired(trigger) in self.triggers.update(frame) {
                events.push(StageEvent::TriggerFired { trigger });
            }

            let pointer = if self.platform.coarse_pointer() {
                None
            } else {
                self.pointer.position()
            };
            let mut bindings = std::mem::take(&mut self.bindings);
            self.with_cx(|cx| {
                for binding in bindings.values_mut() {
                    binding.update(cx, pointer);
                }
            });
            bindings.retain(|id, binding| {
                let spent = binding.is_spent();
                if spent {
                    tracing::trace!(?id, "binding finished");
                }
                !spent
            });
            self.bindings = bindings;

            self.pointer.tick(&mut self.doc);
            if let Some(cursor) = &mut self.cursor {
                cursor.update(&mut self.doc, now);
            }

            let transition = self
                .transition
                .as_mut()
                .and_then(|t| t.update(&mut self.doc, now));
            match transition {
                Some(TransitionEvent::Swapped { from, to }) => {
                    let route = self
                        .pending_route
                        .take()
                        .unwrap_or_else(|| Route::parse(&to));
                    self.swap_page(route);
                    events.push(StageEvent::PageSwapped { from, to });
                }
                Some(TransitionEvent::Settled(route)) => {
                    events.push(StageEvent::PageSettled { route });
                }
                None => {}
            }
        }

        let target = self.theme.target();
        match self.theme.update(now, self.storage.as_mut()) {
            Ok(theme_events) => events.extend(theme_events.into_iter().map(|event| match event {
                ThemeEvent::Swapped(theme) => StageEvent::ThemeSwapped { theme },
                ThemeEvent::RippleCleared(ripple) => StageEvent::RippleCleared { ripple },
            })),
            Err(err) => {
                tracing::warn!(%err, theme = %target, "theme not persisted");
                events.push(StageEvent::ThemeNotSaved {
                    theme: target,
                    reason: err.to_string(),
                });
            }
        }
        if let Some(state) = self.contact.update(now) {
            events.push(StageEvent::Contact { state });
        }

        Ok(StageFrame {
            now,
            scroll,
            events,
        })
    }

    pub fn snapshot(&self) -> MotionResult<StageSnapshot> {
        let ripple = match self.theme.ripple() {
            Some(r) => Some(r.frame(self.now)?),
            None => None,
        };
        let elements = self
            .doc
            .ids()
            .filter_map(|id| {
                let e = self.doc.get(id)?;
                Some(ElementSnapshot {
                    id,
                    name: e.attrs.get("id").cloned(),
                    tag: e.tag.clone(),
                    style: e.style,
                })
            })
            .collect();
        let words = self
            .bindings
            .values()
            .filter_map(|b| match b {
                Binding::Text(t) => Some(WordsSnapshot {
                    element: t.element(),
                    words: t.words().clone(),
                }),
                _ => None,
            })
            .collect();
        Ok(StageSnapshot {
            now: self.now,
            route: self.route.path(),
            not_found: self.route.is_not_found(),
            rendering: self.is_rendering(),
            scroll_offset: self.scroll_offset(),
            scroll_limit: self.clock.as_ref().map_or(0.0, ScrollClock::limit),
            theme: self.theme.theme(),
            ripple,
            nav: self.nav.clone(),
            contact: self.contact.state(),
            cursor: self.cursor.as_ref().map(|c| c.hover().clone()),
            native_cursor: self.doc.native_cursor(),
            bindings: self.bindings.len(),
            triggers: self.triggers.len(),
            fallback: self.boundary.fallback().cloned(),
            elements,
            words,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/stage.rs"]
mod tests;

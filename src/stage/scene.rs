use std::{collections::BTreeMap, path::Path};

use anyhow::Context;

use crate::{
    foundation::{
        core::{ElementId, Fps, FrameIndex, Point, Vec2, Viewport},
        error::{MotionError, MotionResult},
    },
    platform::{
        capability::{Headless, Platform, Window},
        document::{Bounds, ElementSpec},
        storage::Storage,
    },
    scroll::clock::{ScrollTarget, ScrollToOptions},
    site::{contact::ContactForm, routes::Route},
    stage::stage::{BindingSpec, Stage, StageConfig, StageEvent, StageSnapshot},
    transition::page::TransitionLayers,
};

/// Element declared by a scene. Parents must be declared before their children.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneElement {
    pub key: String,
    #[serde(default = "default_tag")]
    pub tag: String,
    #[serde(default)]
    pub bounds: Option<Bounds>,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
    #[serde(default)]
    pub text: Option<String>,
}

fn default_tag() -> String {
    "div".to_string()
}

fn default_route() -> String {
    "/".to_string()
}

fn default_duration() -> f64 {
    3.0
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CursorParts {
    pub ring: String,
    pub dot: String,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneLayers {
    pub overlay: String,
    pub depth: String,
    pub content: String,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneTarget {
    Offset(f64),
    Top,
    Bottom,
    Element(String),
}

/// Input the runner injects between frames.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SceneEvent {
    Wheel {
        #[serde(default)]
        dx: f64,
        #[serde(default)]
        dy: f64,
    },
    Touch {
        #[serde(default)]
        dx: f64,
        #[serde(default)]
        dy: f64,
    },
    NativeScroll {
        offset: f64,
    },
    ScrollTo {
        target: SceneTarget,
        #[serde(default)]
        options: ScrollToOptions,
    },
    PointerMove {
        x: f64,
        y: f64,
        #[serde(default)]
        over: Option<String>,
    },
    Navigate {
        path: String,
    },
    ToggleTheme {
        #[serde(default)]
        x: Option<f64>,
        #[serde(default)]
        y: Option<f64>,
    },
    ToggleNav,
    Submit {
        form: ContactForm,
    },
    Resize {
        width: f64,
        height: f64,
    },
    InputMode {
        coarse: bool,
    },
    /// Remove an element (and its subtree) from the document.
    Detach {
        element: String,
    },
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimedEvent {
    pub at: f64,
    pub event: SceneEvent,
}

/// A declarative page: layout, the bindings each route mounts, and a timeline of input.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scene {
    /// Omit to simulate a non-rendering environment.
    #[serde(default)]
    pub viewport: Option<Viewport>,
    #[serde(default)]
    pub coarse_pointer: bool,
    #[serde(default = "default_route")]
    pub route: String,
    #[serde(default)]
    pub config: StageConfig,
    #[serde(default)]
    pub elements: Vec<SceneElement>,
    /// Bindings mounted whenever the keyed route becomes the current page.
    #[serde(default)]
    pub pages: BTreeMap<String, Vec<BindingSpec<String>>>,
    #[serde(default)]
    pub cursor: Option<CursorParts>,
    #[serde(default)]
    pub transition: Option<SceneLayers>,
    #[serde(default)]
    pub nav_trigger: Option<String>,
    #[serde(default)]
    pub events: Vec<TimedEvent>,
    /// Seconds simulated when no frame count is given.
    #[serde(default = "default_duration")]
    pub duration: f64,
}

/// Scene element keys resolved to document ids.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct SceneKeys(BTreeMap<String, ElementId>);

impl SceneKeys {
    pub fn get(&self, key: &str) -> MotionResult<ElementId> {
        self.0
            .get(key)
            .copied()
            .ok_or_else(|| MotionError::validation(format!("unknown element key `{key}`")))
    }
}

/// A built scene ready to be stepped.
#[derive(Debug)]
pub struct SceneStage {
    pub stage: Stage,
    pub keys: SceneKeys,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LoggedEvent {
    pub frame: FrameIndex,
    pub at: f64,
    #[serde(flatten)]
    pub event: StageEvent,
}

/// Scene input the stage refused, e.g. an invalid form submission.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Rejected {
    pub at: f64,
    pub reason: String,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SceneRun {
    pub fps: Fps,
    pub frames: u64,
    pub events: Vec<LoggedEvent>,
    pub rejected: Vec<Rejected>,
    pub snapshot: StageSnapshot,
}

impl Scene {
    pub fn from_json(json: &str) -> MotionResult<Self> {
        let scene: Self = serde_json::from_str(json)?;
        scene.validate()?;
        Ok(scene)
    }

    pub fn load(path: &Path) -> MotionResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read scene {}", path.display()))?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> MotionResult<()> {
        if !(self.duration.is_finite() && self.duration >= 0.0) {
            return Err(MotionError::validation("scene duration must be finite and >= 0"));
        }
        if let Some(e) = self.events.iter().find(|e| !e.at.is_finite() || e.at < 0.0) {
            return Err(MotionError::validation(format!(
                "event time {} must be finite and >= 0",
                e.at
            )));
        }
        if let Some(v) = self.viewport {
            Viewport::new(v.width, v.height)?;
        }
        self.config.validate()?;
        for (page, specs) in &self.pages {
            for spec in specs {
                spec.validate().map_err(|err| {
                    MotionError::validation(format!("page {page}, element `{}`: {err}", spec.element()))
                })?;
            }
        }
        Ok(())
    }

    fn platform(&self) -> Box<dyn Platform> {
        match self.viewport {
            Some(viewport) if self.coarse_pointer => Box::new(Window::touch(viewport)),
            Some(viewport) => Box::new(Window::new(viewport)),
            None => Box::new(Headless),
        }
    }

    /// Populate the document, wire the cursor and transition, and mount the initial page.
    pub fn build(&self, storage: Box<dyn Storage>) -> MotionResult<SceneStage> {
        let mut stage = Stage::new(self.platform(), storage, self.config).with_route(&self.route);
        let mut keys = SceneKeys::default();
        for el in &self.elements {
            if keys.0.contains_key(&el.key) {
                return Err(MotionError::validation(format!(
                    "duplicate element key `{}`",
                    el.key
                )));
            }
            let mut attrs = el.attrs.clone();
            attrs.entry("id".to_string()).or_insert_with(|| el.key.clone());
            let spec = ElementSpec {
                tag: el.tag.clone(),
                bounds: el.bounds,
                parent: el.parent.as_deref().map(|p| keys.get(p)).transpose()?,
                attrs,
                text: el.text.clone(),
            };
            let id = stage.document_mut().insert(spec);
            keys.0.insert(el.key.clone(), id);
        }

        stage.hydrate_theme()?;
        if let Some(parts) = &self.cursor {
            stage.mount_cursor(keys.get(&parts.ring)?, keys.get(&parts.dot)?)?;
        }
        if let Some(layers) = &self.transition {
            stage.mount_transition(TransitionLayers {
                overlay: keys.get(&layers.overlay)?,
                depth: keys.get(&layers.depth)?,
                content: keys.get(&layers.content)?,
            });
        }
        if let Some(trigger) = &self.nav_trigger {
            stage.set_nav_trigger(Some(keys.get(trigger)?));
        }
        stage.initialize_scroll();

        let mut built = SceneStage { stage, keys };
        let route = built.stage.route().path();
        self.mount_page(&mut built, &route);
        Ok(built)
    }

    fn page(&self, path: &str) -> &[BindingSpec<String>] {
        self.pages
            .iter()
            .find(|(key, _)| Route::parse(key).path() == path)
            .map(|(_, specs)| specs.as_slice())
            .unwrap_or_default()
    }

    /// Mount a route's bindings behind the error boundary. An unknown key fails the whole page.
    pub fn mount_page(&self, built: &mut SceneStage, path: &str) {
        let specs = self.page(path);
        let keys = &built.keys;
        let rendered = built.stage.render_page(|scope| {
            for spec in specs {
                scope.mount(spec.clone().resolve(|key| keys.get(key))?);
            }
            Ok(scope.acquired().len())
        });
        if let Some(count) = rendered.content() {
            tracing::debug!(%path, count, "page mounted");
        }
    }

    fn apply(&self, built: &mut SceneStage, event: &SceneEvent) -> MotionResult<()> {
        let stage = &mut built.stage;
        match event {
            SceneEvent::Wheel { dx, dy } => stage.on_wheel(Vec2::new(*dx, *dy)),
            SceneEvent::Touch { dx, dy } => stage.on_touch(Vec2::new(*dx, *dy)),
            SceneEvent::NativeScroll { offset } => stage.on_native_scroll(*offset),
            SceneEvent::ScrollTo { target, options } => {
                let target = match target {
                    SceneTarget::Offset(v) => ScrollTarget::Offset(*v),
                    SceneTarget::Top => ScrollTarget::Top,
                    SceneTarget::Bottom => ScrollTarget::Bottom,
                    SceneTarget::Element(key) => ScrollTarget::Element(built.keys.get(key)?),
                };
                stage.scroll_to(target, *options);
            }
            SceneEvent::PointerMove { x, y, over } => {
                let over = over.as_deref().map(|k| built.keys.get(k)).transpose()?;
                stage.on_pointer_move(Point::new(*x, *y), over);
            }
            SceneEvent::Navigate { path } => stage.navigate(path),
            SceneEvent::ToggleTheme { x, y } => {
                let origin = x.zip(*y).map(|(x, y)| Point::new(x, y));
                stage.toggle_theme(origin)?;
            }
            SceneEvent::ToggleNav => stage.nav_mut().toggle(),
            SceneEvent::Submit { form } => stage.submit_contact(form)?,
            SceneEvent::Resize { width, height } => stage.resize(Viewport::new(*width, *height)?),
            SceneEvent::InputMode { coarse } => stage.set_input_mode(*coarse),
            SceneEvent::Detach { element } => {
                let id = built.keys.get(element)?;
                stage.document_mut().remove(id);
                stage.refresh_layout();
            }
        }
        Ok(())
    }

    /// Step the scene at `fps`. Events apply before the first frame at or after their time.
    #[tracing::instrument(skip(self, storage))]
    pub fn run(&self, fps: Fps, frames: Option<u64>, storage: Box<dyn Storage>) -> MotionResult<SceneRun> {
        let mut built = self.build(storage)?;
        let frames = frames.unwrap_or_else(|| fps.secs_to_frames_floor(self.duration) + 1);

        let mut timeline: Vec<&TimedEvent> = self.events.iter().collect();
        timeline.sort_by(|a, b| a.at.total_cmp(&b.at));
        let mut pending = timeline.into_iter().peekable();

        let mut events = Vec::new();
        let mut rejected = Vec::new();
        for frame in (0..frames).map(FrameIndex) {
            let now = fps.frames_to_secs(frame.0);
            while let Some(next) = pending.next_if(|e| e.at <= now) {
                if let Err(err) = self.apply(&mut built, &next.event) {
                    tracing::warn!(at = next.at, %err, "scene event rejected");
                    rejected.push(Rejected {
                        at: next.at,
                        reason: err.to_string(),
                    });
                }
            }
            let out = built.stage.tick(now)?;
            for event in out.events {
                if let StageEvent::PageSwapped { to, .. } = &event {
                    let to = to.clone();
                    self.mount_page(&mut built, &to);
                }
                events.push(LoggedEvent {
                    frame,
                    at: now,
                    event,
                });
            }
        }

        Ok(SceneRun {
            fps,
            frames,
            events,
            rejected,
            snapshot: built.stage.snapshot()?,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/scene.rs"]
mod tests;

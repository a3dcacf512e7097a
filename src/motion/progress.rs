use std::fmt;

use crate::{
    foundation::core::ElementId,
    motion::context::MotionCtx,
    scroll::trigger::{Scrub, TriggerId, TriggerSpec},
};

type ProgressFn = Box<dyn FnMut(f64)>;

/// Read-only progress of an element's pass through the viewport, `top bottom` to `bottom top`.
pub struct ProgressWatch {
    element: ElementId,
    trigger: Option<TriggerId>,
    last: Option<f64>,
    on_progress: Option<ProgressFn>,
}

impl fmt::Debug for ProgressWatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressWatch")
            .field("element", &self.element)
            .field("trigger", &self.trigger)
            .field("last", &self.last)
            .field("callback", &self.on_progress.is_some())
            .finish()
    }
}

impl ProgressWatch {
    pub fn mount(cx: &mut MotionCtx<'_>, element: ElementId) -> Option<Self> {
        let spec = TriggerSpec::scrub(element, Scrub::Instant);
        let trigger = cx.triggers.register(spec, cx.doc, cx.viewport, cx.offset)?;
        Some(Self {
            element,
            trigger: Some(trigger),
            last: None,
            on_progress: None,
        })
    }

    /// Called whenever progress changes, including once on the first update.
    pub fn on_progress(mut self, f: impl FnMut(f64) + 'static) -> Self {
        self.on_progress = Some(Box::new(f));
        self
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn progress(&self) -> Option<f64> {
        self.last
    }

    /// `false` once the trigger is gone.
    pub fn is_active(&self) -> bool {
        self.trigger.is_some()
    }

    pub fn update(&mut self, cx: &mut MotionCtx<'_>) {
        let Some(id) = self.trigger else {
            return;
        };
        let Some(p) = cx.triggers.progress(id) else {
            self.trigger = None;
            return;
        };
        if self.last == Some(p) {
            return;
        }
        self.last = Some(p);
        if let Some(f) = &mut self.on_progress {
            f(p);
        }
    }

    pub fn dispose(&mut self, cx: &mut MotionCtx<'_>) {
        if let Some(id) = self.trigger.take() {
            cx.triggers.remove(id);
        }
        self.on_progress = None;
    }
}

use crate::foundation::core::Viewport;

/// What the host environment can do. Injected once when a stage is built so that no primitive
/// has to sniff its environment.
pub trait Platform {
    /// `None` outside a rendering environment; every primitive becomes a no-op.
    fn viewport(&self) -> Option<Viewport>;

    /// Coarse pointer (touch) input. Pointer followers disable themselves while this holds.
    fn coarse_pointer(&self) -> bool;

    fn resize(&mut self, _viewport: Viewport) {}

    fn set_coarse_pointer(&mut self, _coarse: bool) {}

    fn is_rendering(&self) -> bool {
        self.viewport().is_some()
    }
}

/// No DOM, no pointer: server-side or test contexts with nothing to draw.
#[derive(Clone, Copy, Debug, Default)]
pub struct Headless;

impl Platform for Headless {
    fn viewport(&self) -> Option<Viewport> {
        None
    }

    fn coarse_pointer(&self) -> bool {
        false
    }
}

/// A rendering window with a fixed-size viewport and a switchable input mode.
#[derive(Clone, Copy, Debug)]
pub struct Window {
    viewport: Viewport,
    coarse_pointer: bool,
}

impl Window {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            coarse_pointer: false,
        }
    }

    pub fn touch(viewport: Viewport) -> Self {
        Self {
            viewport,
            coarse_pointer: true,
        }
    }
}

impl Platform for Window {
    fn viewport(&self) -> Option<Viewport> {
        Some(self.viewport)
    }

    fn coarse_pointer(&self) -> bool {
        self.coarse_pointer
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn set_coarse_pointer(&mut self, coarse: bool) {
        self.coarse_pointer = coarse;
    }
}

use crate::{
    foundation::core::ElementId,
    stage::stage::{BindingId, BindingSpec, Stage},
};

/// Scoped acquisition of bindings.
///
/// Everything mounted through a scope is disposed when the scope is dropped uncommitted, which
/// covers early returns, `?` propagation and unwinding alike.
pub struct Scope<'s> {
    stage: &'s mut Stage,
    acquired: Vec<BindingId>,
    committed: bool,
}

impl<'s> Scope<'s> {
    pub(crate) fn new(stage: &'s mut Stage) -> Self {
        Self {
            stage,
            acquired: Vec::new(),
            committed: false,
        }
    }

    /// Mount one binding. A missing element yields `None` and nothing to clean up.
    pub fn mount(&mut self, spec: BindingSpec<ElementId>) -> Option<BindingId> {
        let id = self.stage.mount(spec)?;
        self.acquired.push(id);
        Some(id)
    }

    /// Read access to the stage the scope mounts into.
    pub fn stage(&self) -> &Stage {
        self.stage
    }

    pub fn acquired(&self) -> &[BindingId] {
        &self.acquired
    }

    pub(crate) fn commit(mut self) -> Vec<BindingId> {
        self.committed = true;
        std::mem::take(&mut self.acquired)
    }
}

impl Drop for Scope<'_> {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        if !self.acquired.is_empty() {
            tracing::debug!(count = self.acquired.len(), "releasing partially mounted scope");
        }
        for id in self.acquired.drain(..) {
            self.stage.dispose(id);
        }
    }
}

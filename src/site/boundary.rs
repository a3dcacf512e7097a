use crate::foundation::error::{MotionError, MotionResult};

/// Generic screen shown in place of a page tree that failed to render.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Fallback {
    pub label: &'static str,
    pub title: &'static str,
    pub body: &'static str,
    pub action: &'static str,
    pub href: &'static str,
    /// Display form of the error that was caught.
    pub cause: String,
}

impl Fallback {
    fn from_error(err: &MotionError) -> Self {
        Self {
            label: "Error",
            title: "Something went wrong",
            body: "An unexpected error has occurred.",
            action: "Return home",
            href: "/",
            cause: err.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Rendered<T> {
    Content(T),
    Fallback(Fallback),
}

impl<T> Rendered<T> {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }

    pub fn content(self) -> Option<T> {
        match self {
            Self::Content(t) => Some(t),
            Self::Fallback(_) => None,
        }
    }
}

/// Top-level catch for page render errors. Retrying simply renders the subtree again.
#[derive(Clone, Debug, Default)]
pub struct ErrorBoundary {
    fallback: Option<Fallback>,
    caught: usize,
}

impl ErrorBoundary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render<T>(&mut self, f: impl FnOnce() -> MotionResult<T>) -> Rendered<T> {
        match f() {
            Ok(value) => {
                self.fallback = None;
                Rendered::Content(value)
            }
            Err(err) => {
                tracing::warn!(%err, "page render failed; showing fallback");
                let fallback = Fallback::from_error(&err);
                self.caught += 1;
                self.fallback = Some(fallback.clone());
                Rendered::Fallback(fallback)
            }
        }
    }

    /// Same as [`Self::render`]; named for the fallback's retry affordance.
    pub fn retry<T>(&mut self, f: impl FnOnce() -> MotionResult<T>) -> Rendered<T> {
        self.render(f)
    }

    pub fn fallback(&self) -> Option<&Fallback> {
        self.fallback.as_ref()
    }

    pub fn is_tripped(&self) -> bool {
        self.fallback.is_some()
    }

    /// Errors caught over the boundary's lifetime.
    pub fn caught(&self) -> usize {
        self.caught
    }
}

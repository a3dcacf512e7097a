use std::{fmt, str::FromStr};

use crate::{
    animation::tween::Tween,
    foundation::{
        core::{Point, Viewport},
        error::{MotionError, MotionResult},
    },
    platform::storage::Storage,
    theme::ripple::{Ripple, cover_radius, default_origin},
};

/// Durable storage key holding `"dark"` or `"light"`.
pub const STORAGE_KEY: &str = "aarohan-theme";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn opposite(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    /// Caption flashed under the ripple.
    pub fn label(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            other => Err(MotionError::validation(format!("unknown theme '{other}'"))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Seconds after the toggle at which the new theme takes effect and is persisted.
    pub swap_at: f64,
    /// Seconds after the toggle at which the ripple is cleared.
    pub clear_at: f64,
    pub radius_factor: f64,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            swap_at: 0.4,
            clear_at: 0.8,
            radius_factor: 1.2,
        }
    }
}

impl ThemeConfig {
    pub fn validate(&self) -> MotionResult<()> {
        Tween::new(0.0, 1.0, self.clear_at).validate()?;
        if !(0.0..=self.clear_at).contains(&self.swap_at) {
            return Err(MotionError::animation(
                "theme swap must land within the ripple",
            ));
        }
        if !self.radius_factor.is_finite() || self.radius_factor <= 0.0 {
            return Err(MotionError::validation("ripple radius factor must be > 0"));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeEvent {
    Swapped(Theme),
    RippleCleared(u64),
}

/// `{dark, light}` plus the transient ripple sub-state.
#[derive(Clone, Debug, Default)]
pub struct ThemeController {
    config: ThemeConfig,
    theme: Theme,
    hydrated: bool,
    ripple: Option<Ripple>,
    swapped: bool,
    next_ripple: u64,
}

impl ThemeController {
    pub fn new(config: ThemeConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    pub fn ripple(&self) -> Option<&Ripple> {
        self.ripple.as_ref()
    }

    /// Theme the page will end up in once any ripple has finished.
    pub fn target(&self) -> Theme {
        match &self.ripple {
            Some(r) if !self.swapped => r.to,
            _ => self.theme,
        }
    }

    /// Adopt the persisted theme. Unreadable or unknown values leave the default in place.
    pub fn hydrate(&mut self, storage: &dyn Storage) -> MotionResult<Theme> {
        self.hydrated = true;
        match storage.get(STORAGE_KEY)? {
            Some(raw) => match raw.parse::<Theme>() {
                Ok(theme) => self.theme = theme,
                Err(err) => tracing::debug!(%err, "ignoring stored theme"),
            },
            None => tracing::debug!("no stored theme; keeping default"),
        }
        Ok(self.theme)
    }

    /// Switch without animating.
    pub fn set_theme(&mut self, theme: Theme, storage: &mut dyn Storage) -> MotionResult<()> {
        storage.set(STORAGE_KEY, theme.as_str())?;
        self.ripple = None;
        self.theme = theme;
        Ok(())
    }

    /// Start a ripple toward the opposite of [`Self::target`]. A toggle during a ripple replaces
    /// it, so the last toggle wins.
    pub fn toggle(&mut self, now: f64, origin: Option<Point>, viewport: Viewport) -> MotionResult<&Ripple> {
        let to = self.target().opposite();
        let origin = origin.unwrap_or_else(|| default_origin(viewport));
        self.next_ripple += 1;
        let radius = cover_radius(viewport, self.config.radius_factor);
        let ripple = Ripple::new(self.next_ripple, origin, to, now, radius)?;
        self.swapped = false;
        tracing::debug!(id = ripple.id, %to, x = origin.x, y = origin.y, "theme ripple");
        Ok(self.ripple.insert(ripple))
    }

    /// Swaps and persists partway through the ripple, clears it at the end. The new theme is only
    /// adopted once stored; a failed write abandons the ripple and keeps the current theme.
    pub fn update(&mut self, now: f64, storage: &mut dyn Storage) -> MotionResult<Vec<ThemeEvent>> {
        let mut events = Vec::new();
        let Some(ripple) = &self.ripple else {
            return Ok(events);
        };
        let (id, to, elapsed) = (ripple.id, ripple.to, ripple.elapsed(now));

        if !self.swapped && elapsed >= self.config.swap_at {
            if let Err(err) = storage.set(STORAGE_KEY, to.as_str()) {
                self.ripple = None;
                return Err(err);
            }
            self.theme = to;
            self.swapped = true;
            events.push(ThemeEvent::Swapped(to));
        }
        if elapsed >= self.config.clear_at {
            self.ripple = None;
            events.push(ThemeEvent::RippleCleared(id));
        }
        Ok(events)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/theme/theme.rs"]
mod tests;

use crate::foundation::error::{MotionError, MotionResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    BrandStrategy,
    VisualIdentity,
    DigitalExperience,
    Development,
    FullScope,
}

impl ProjectType {
    pub const ALL: [Self; 5] = [
        Self::BrandStrategy,
        Self::VisualIdentity,
        Self::DigitalExperience,
        Self::Development,
        Self::FullScope,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::BrandStrategy => "Brand Strategy",
            Self::VisualIdentity => "Visual Identity",
            Self::DigitalExperience => "Digital Experience",
            Self::Development => "Development",
            Self::FullScope => "Full Scope",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetRange {
    From25kTo50k,
    From50kTo100k,
    From100kTo250k,
    Over250k,
}

impl BudgetRange {
    pub const ALL: [Self; 4] = [
        Self::From25kTo50k,
        Self::From50kTo100k,
        Self::From100kTo250k,
        Self::Over250k,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::From25kTo50k => "$25k – $50k",
            Self::From50kTo100k => "$50k – $100k",
            Self::From100kTo250k => "$100k – $250k",
            Self::Over250k => "$250k+",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub project_type: Option<ProjectType>,
    pub budget: Option<BudgetRange>,
    pub message: String,
}

impl ContactForm {
    /// Required-field checks only; nothing is sent anywhere.
    pub fn validate(&self) -> MotionResult<()> {
        for (field, value) in [
            ("name", &self.name),
            ("email", &self.email),
            ("message", &self.message),
        ] {
            if value.trim().is_empty() {
                return Err(MotionError::validation(format!("{field} is required")));
            }
        }
        if !self.email.contains('@') {
            return Err(MotionError::validation("email must contain '@'"));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum SubmitState {
    #[default]
    Idle,
    Submitting {
        since: f64,
    },
    Success,
}

/// Simulated submission: `idle -> submitting -> success` after a fixed delay.
#[derive(Clone, Debug)]
pub struct ContactSubmission {
    delay: f64,
    state: SubmitState,
}

impl Default for ContactSubmission {
    fn default() -> Self {
        Self::new(1.5)
    }
}

impl ContactSubmission {
    pub fn new(delay: f64) -> Self {
        Self {
            delay,
            state: SubmitState::Idle,
        }
    }

    pub fn state(&self) -> SubmitState {
        self.state
    }

    /// Only accepted from `Idle`; a second submit while one is pending is rejected.
    pub fn submit(&mut self, form: &ContactForm, now: f64) -> MotionResult<()> {
        if self.state != SubmitState::Idle {
            return Err(MotionError::validation("form already submitted"));
        }
        form.validate()?;
        self.state = SubmitState::Submitting { since: now };
        Ok(())
    }

    /// Returns the new state when it changed.
    pub fn update(&mut self, now: f64) -> Option<SubmitState> {
        match self.state {
            SubmitState::Submitting { since } if now - since >= self.delay => {
                self.state = SubmitState::Success;
                Some(self.state)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/site/contact.rs"]
mod tests;

//! Filter state machine
//!
//! Every change to the selection goes through [`Selection::apply`], which
//! enforces the cascading resets:
//! - changing the company clears the model
//! - choosing a state or a country replaces the other kind of region
//!
//! Rejected actions leave the selection untouched.

use crate::core::{Region, Selection, SelectionError, WORKLOAD_PRESETS};

/// A single user action on the filter controls
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetCompany(String),
    SetModel(String),
    SetCountry(String),
    SetState(String),
    SetDailyHours(u32),
    SetWorkload(f64),
}

impl Selection {
    /// Apply one action atomically
    pub fn apply(&mut self, action: Action) -> Result<(), SelectionError> {
        match action {
            Action::SetCompany(company) => {
                self.gpu_company = company;
                self.gpu_model.clear();
            }
            Action::SetModel(model) => self.gpu_model = model,
            Action::SetCountry(country) => self.region = Region::country(&country),
            Action::SetState(state) => self.region = Region::state(&state),
            Action::SetDailyHours(hours) => {
                if !(1..=24).contains(&hours) {
                    return Err(SelectionError::DailyHours(hours));
                }
                self.daily_hours = hours;
            }
            Action::SetWorkload(factor) => {
                if !is_workload_preset(factor) {
                    return Err(SelectionError::Workload(factor));
                }
                self.workload_factor = factor;
            }
        }
        Ok(())
    }

    /// Apply actions in order, stopping at the first rejected one
    pub fn apply_all(&mut self, actions: impl IntoIterator<Item = Action>) -> Result<(), SelectionError> {
        for action in actions {
            log::debug!("Applying {:?}", action);
            self.apply(action)?;
        }
        Ok(())
    }
}

fn is_workload_preset(factor: f64) -> bool {
    WORKLOAD_PRESETS.iter().any(|p| (p - factor).abs() < f64::EPSILON)
}

//! Scenario definitions and reply templates.

mod scenario;
mod templates;

pub use scenario::{PlanVocabulary, Scenario, ScenarioKind, COVERAGE_INQUIRY, PLAN_STATUS};
pub use templates::{farewell, generation_prompt, opening_line, render, GENERATION_INSTRUCTION};

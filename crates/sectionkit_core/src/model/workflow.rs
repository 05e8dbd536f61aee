//! Editorial workflow schema model.

use crate::model::sidebar::SidebarActionSchema;
use serde::{Deserialize, Serialize};

/// Lifecycle stage a workflow step represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStatus {
    Draft,
    Review,
    Publish,
}

/// One step of an editorial workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowStepSchema {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub status: WorkflowStatus,
    /// Condition ids that block leaving this step.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blockers: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<SidebarActionSchema>,
}

/// Ordered editorial workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowSchema {
    pub id: String,
    pub title: String,
    pub steps: Vec<WorkflowStepSchema>,
    pub default_step_id: String,
}

impl WorkflowSchema {
    /// Returns one step by id.
    pub fn step(&self, step_id: &str) -> Option<&WorkflowStepSchema> {
        self.steps.iter().find(|step| step.id == step_id)
    }

    /// Returns the step named by `default_step_id`, if it exists.
    pub fn default_step(&self) -> Option<&WorkflowStepSchema> {
        self.step(&self.default_step_id)
    }
}

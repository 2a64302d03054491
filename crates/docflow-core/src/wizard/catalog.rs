//! Step catalogs for the two wizard modes.
//!
//! A catalog is static data: an ordered list of step descriptors. It is
//! chosen once when the wizard starts and never changes for that session.

use docflow_types::wizard::{StepId, WizardMode};

/// One step of a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepDescriptor {
    pub id: StepId,
    pub title: &'static str,
    /// Name of the UI component that renders this step.
    pub component_ref: &'static str,
}

const ADVANCED_STEPS: &[StepDescriptor] = &[
    StepDescriptor {
        id: StepId::Basics,
        title: "Basics",
        component_ref: "BasicsStep",
    },
    StepDescriptor {
        id: StepId::TriggerSelection,
        title: "Choose a trigger",
        component_ref: "TriggerSelectionStep",
    },
    StepDescriptor {
        id: StepId::TriggerConfig,
        title: "Configure the trigger",
        component_ref: "TriggerConfigStep",
    },
    StepDescriptor {
        id: StepId::ActionSelection,
        title: "Choose actions",
        component_ref: "ActionSelectionStep",
    },
    StepDescriptor {
        id: StepId::ActionConfig,
        title: "Configure actions",
        component_ref: "ActionConfigStep",
    },
    StepDescriptor {
        id: StepId::Review,
        title: "Review",
        component_ref: "ReviewStep",
    },
];

const SIMPLE_STEPS: &[StepDescriptor] = &[
    StepDescriptor {
        id: StepId::Basics,
        title: "Name and trigger",
        component_ref: "SimpleBasicsStep",
    },
    StepDescriptor {
        id: StepId::TriggerConfig,
        title: "Trigger details",
        component_ref: "SimpleTriggerConfigStep",
    },
    StepDescriptor {
        id: StepId::Actions,
        title: "Actions and folders",
        component_ref: "SimpleActionsStep",
    },
    StepDescriptor {
        id: StepId::Reviewers,
        title: "Reviewers",
        component_ref: "SimpleReviewersStep",
    },
    StepDescriptor {
        id: StepId::Preview,
        title: "Preview",
        component_ref: "SimplePreviewStep",
    },
];

/// The fixed, ordered step list for a wizard mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepCatalog {
    mode: WizardMode,
    steps: &'static [StepDescriptor],
}

impl StepCatalog {
    pub fn for_mode(mode: WizardMode) -> Self {
        let steps = match mode {
            WizardMode::Simple => SIMPLE_STEPS,
            WizardMode::Advanced => ADVANCED_STEPS,
        };
        Self { mode, steps }
    }

    pub fn mode(&self) -> WizardMode {
        self.mode
    }

    pub fn steps(&self) -> &'static [StepDescriptor] {
        self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'static StepDescriptor> {
        self.steps.get(index)
    }

    pub fn index_of(&self, id: StepId) -> Option<usize> {
        self.steps.iter().position(|step| step.id == id)
    }

    pub fn contains(&self, id: StepId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn first(&self) -> &'static StepDescriptor {
        &self.steps[0]
    }

    pub fn last(&self) -> &'static StepDescriptor {
        &self.steps[self.steps.len() - 1]
    }

    pub fn ids(&self) -> impl Iterator<Item = StepId> + 'static {
        self.steps.iter().map(|step| step.id)
    }
}

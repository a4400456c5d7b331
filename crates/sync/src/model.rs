use std::path::PathBuf;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

/// One change requested from the host, derived from one CSV row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Mutation {
    /// Row name matches no existing parameter.
    Create {
        name: String,
        expression: String,
        unit: String,
        comment: String,
    },
    /// Row name matches an existing parameter; the name itself never changes.
    Update {
        name: String,
        unit: String,
        expression: String,
        comment: String,
        /// The parameter already holds exactly these values.
        unchanged: bool,
    },
}

impl Mutation {
    pub fn name(&self) -> &str {
        match self {
            Self::Create { name, .. } | Self::Update { name, .. } => name,
        }
    }

    pub fn is_create(&self) -> bool {
        matches!(self, Self::Create { .. })
    }

    /// An update that sets every field to its current value.
    pub fn is_noop(&self) -> bool {
        matches!(self, Self::Update { unchanged: true, .. })
    }
}

impl std::fmt::Display for Mutation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Create { name, expression, unit, .. } => {
                write!(f, "create {name} = {expression}")?;
                if !unit.is_empty() {
                    write!(f, " [{unit}]")?;
                }
                Ok(())
            }
            Self::Update { name, unchanged: true, .. } => write!(f, "keep   {name}"),
            Self::Update { name, expression, unit, .. } => {
                write!(f, "update {name} = {expression}")?;
                if !unit.is_empty() {
                    write!(f, " [{unit}]")?;
                }
                Ok(())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Plan + Summary
// ---------------------------------------------------------------------------

/// Mutations for one CSV file, in file row order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportPlan {
    pub mutations: Vec<Mutation>,
}

impl ImportPlan {
    pub fn creates(&self) -> impl Iterator<Item = &Mutation> {
        self.mutations.iter().filter(|m| m.is_create())
    }

    pub fn updates(&self) -> impl Iterator<Item = &Mutation> {
        self.mutations.iter().filter(|m| !m.is_create())
    }

    /// True when applying the plan would change nothing.
    pub fn is_noop(&self) -> bool {
        self.mutations.iter().all(Mutation::is_noop)
    }

    pub fn summary(&self) -> ImportSummary {
        let mut summary = ImportSummary::default();
        for m in &self.mutations {
            summary.record(m);
        }
        summary
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub created: usize,
    /// Updates that changed at least one field.
    pub updated: usize,
    /// Updates that set fields to their current values.
    pub unchanged: usize,
}

impl ImportSummary {
    pub(crate) fn record(&mut self, mutation: &Mutation) {
        match mutation {
            Mutation::Create { .. } => self.created += 1,
            Mutation::Update { unchanged: true, .. } => self.unchanged += 1,
            Mutation::Update { .. } => self.updated += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.created + self.updated + self.unchanged
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    pub path: PathBuf,
    /// File name without its directory, for confirmation messages.
    pub file_name: String,
    pub parameters: usize,
}

//! Pipeline context model: project / entity / task scope identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference to a pipeline entity (shot, asset, sequence, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    /// Entity kind, e.g. "Shot" or "Asset".
    pub kind: String,
    /// Entity name, e.g. "sh010".
    pub name: String,
}

impl EntityRef {
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The pipeline scope a session is working in.
///
/// A context is an immutable value: the engine replaces its active context
/// wholesale on every successful switch and never mutates one in place.
/// Equality is structural over the project/entity/task triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Context {
    /// Project name. Always present.
    pub project: String,
    /// Entity scope, when the context is narrower than a whole project.
    pub entity: Option<EntityRef>,
    /// Task or pipeline step, when the context is narrower than an entity.
    pub task: Option<String>,
}

impl Context {
    /// A context scoped to a whole project.
    pub fn for_project(project: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            entity: None,
            task: None,
        }
    }

    /// Narrows the context to an entity.
    pub fn with_entity(mut self, entity: EntityRef) -> Self {
        self.entity = Some(entity);
        self
    }

    /// Narrows the context to a task.
    pub fn with_task(mut self, task: impl Into<String>) -> Self {
        self.task = Some(task.into());
        self
    }

    /// The entity portion of this context, if any.
    ///
    /// Used for degraded fallback resolution: when a path cannot be
    /// template-matched, a coarser context is rebuilt from this reference
    /// alone, dropping task specificity.
    pub fn entity_scope(&self) -> Option<&EntityRef> {
        self.entity.as_ref()
    }

    /// Drops task specificity, keeping project and entity scope.
    pub fn without_task(&self) -> Self {
        Self {
            project: self.project.clone(),
            entity: self.entity.clone(),
            task: None,
        }
    }
}

impl fmt::Display for Context {
    /// Human-readable scope label, used as the context submenu subtitle.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.project)?;
        if let Some(entity) = &self.entity {
            write!(f, " > {}", entity.name)?;
        }
        if let Some(task) = &self.task {
            write!(f, " > {}", task)?;
        }
        Ok(())
    }
}

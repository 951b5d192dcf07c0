//! Script component

use crate::ecs::{Component, ComponentKind};
use crate::scripting::{ClassHandle, InstanceHandle, ScriptValueType};
use serde::{Serialize, Deserialize};
use std::path::PathBuf;

/// A variable declared on a script component
///
/// The value stays a string until bind time, where it is parsed per `ty`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptVariable {
    /// Field name on the script class
    pub name: String,

    /// Declared type
    #[serde(rename = "type")]
    pub ty: ScriptValueType,

    /// Authored value
    pub user_value: String,
}

impl ScriptVariable {
    /// Declare a variable
    pub fn new(name: impl Into<String>, ty: ScriptValueType, user_value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty,
            user_value: user_value.into(),
        }
    }
}

/// Attaches a script class to an object
///
/// `class` is `None` until the scene starts, and stays `None` for the session
/// when the class fails to resolve. `instance` is only set while playing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScriptComponent {
    /// Script source file
    pub path: PathBuf,

    /// Declared variables in authoring order
    #[serde(default)]
    pub variables: Vec<ScriptVariable>,

    #[serde(skip)]
    pub(crate) class: Option<ClassHandle>,

    #[serde(skip)]
    pub(crate) instance: Option<InstanceHandle>,
}

impl Component for ScriptComponent {
    const KIND: ComponentKind = ComponentKind::Script;
}

impl ScriptComponent {
    /// Script backed by a source file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Builder pattern: Declare a variable
    #[must_use]
    pub fn with_variable(mut self, name: impl Into<String>, ty: ScriptValueType, value: impl Into<String>) -> Self {
        self.variables.push(ScriptVariable::new(name, ty, value));
        self
    }

    /// Resolved class, if any
    pub fn class(&self) -> Option<ClassHandle> {
        self.class
    }

    /// Live instance, if bound
    pub fn instance(&self) -> Option<InstanceHandle> {
        self.instance
    }

    /// Whether an instance is live
    pub fn is_bound(&self) -> bool {
        self.instance.is_some()
    }

    /// Drop session handles
    pub(crate) fn unbind(&mut self) {
        self.class = None;
        self.instance = None;
    }
}

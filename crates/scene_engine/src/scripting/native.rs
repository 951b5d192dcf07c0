//! In-process script classes written as Rust closures
//!
//! [`NativeScriptHost`] is a complete [`ScriptBridge`]: classes are registered
//! up front and resolved by the stem of the script path, so `scripts/Player.cs`
//! resolves the class registered as `Player`.

use super::{ClassHandle, FieldHandle, InstanceHandle, ScriptBridge, ScriptError, ScriptValue};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// A method body: receives the instance and the call arguments
pub type NativeMethod = Box<dyn FnMut(&mut NativeInstance, &[ScriptValue]) -> Option<ScriptValue>>;

/// Class definition: typed fields with defaults and named methods
pub struct NativeClass {
    name: String,
    fields: Vec<(String, ScriptValue)>,
    methods: HashMap<String, NativeMethod>,
}

impl NativeClass {
    /// Start a class definition
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            methods: HashMap::new(),
        }
    }

    /// Builder pattern: Declare a field; the default also fixes its type
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, default: ScriptValue) -> Self {
        self.fields.push((name.into(), default));
        self
    }

    /// Builder pattern: Define a method
    #[must_use]
    pub fn with_method(
        mut self,
        name: impl Into<String>,
        method: impl FnMut(&mut NativeInstance, &[ScriptValue]) -> Option<ScriptValue> + 'static,
    ) -> Self {
        self.methods.insert(name.into(), Box::new(method));
        self
    }

    /// Class name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for NativeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeClass")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// State of one live instance
#[derive(Debug, Clone, PartialEq)]
pub struct NativeInstance {
    class: ClassHandle,
    ctor_args: Vec<ScriptValue>,
    fields: Vec<(String, ScriptValue)>,
}

impl NativeInstance {
    /// Class this instance was created from
    pub fn class(&self) -> ClassHandle {
        self.class
    }

    /// Arguments passed at construction
    pub fn ctor_args(&self) -> &[ScriptValue] {
        &self.ctor_args
    }

    /// Read a field
    pub fn get(&self, name: &str) -> Option<&ScriptValue> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Write a field, keeping its declared type
    pub fn set(&mut self, name: &str, value: ScriptValue) -> Result<(), ScriptError> {
        let slot = self
            .fields
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
            .ok_or_else(|| ScriptError::Vm(format!("no field `{name}`")))?;
        assign(slot, value)
    }
}

fn assign(slot: &mut ScriptValue, value: ScriptValue) -> Result<(), ScriptError> {
    if slot.value_type() != value.value_type() {
        return Err(ScriptError::FieldType {
            expected: slot.value_type(),
            actual: value.value_type(),
        });
    }
    *slot = value;
    Ok(())
}

/// Script bridge hosting [`NativeClass`]es
#[derive(Debug, Default)]
pub struct NativeScriptHost {
    classes: Vec<NativeClass>,
    instances: HashMap<u64, NativeInstance>,
    next_instance: u64,
    running: bool,
}

impl NativeScriptHost {
    /// Create an empty host
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class, replacing any class of the same name
    pub fn register(&mut self, class: NativeClass) -> ClassHandle {
        if let Some(index) = self.classes.iter().position(|c| c.name == class.name) {
            log::debug!("Replacing native script class {}", class.name);
            self.classes[index] = class;
            return ClassHandle(index as u64);
        }
        self.classes.push(class);
        ClassHandle(self.classes.len() as u64 - 1)
    }

    /// Number of live instances
    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    /// Inspect a live instance
    pub fn instance(&self, handle: InstanceHandle) -> Option<&NativeInstance> {
        self.instances.get(&handle.0)
    }

    /// Read a field of a live instance
    pub fn field_value(&self, handle: InstanceHandle, name: &str) -> Option<&ScriptValue> {
        self.instance(handle)?.get(name)
    }

    /// Whether the scene is in play mode from the host's point of view
    pub fn is_running(&self) -> bool {
        self.running
    }

    fn class(&self, handle: ClassHandle) -> Result<&NativeClass, ScriptError> {
        usize::try_from(handle.0)
            .ok()
            .and_then(|index| self.classes.get(index))
            .ok_or(ScriptError::InvalidHandle(handle.0))
    }
}

impl ScriptBridge for NativeScriptHost {
    fn scene_start(&mut self) {
        self.running = true;
    }

    fn scene_end(&mut self) {
        log::debug!("Releasing {} native script instances", self.instances.len());
        self.instances.clear();
        self.running = false;
    }

    fn resolve(&mut self, script_path: &Path) -> Option<ClassHandle> {
        let stem = script_path.file_stem()?.to_str()?;
        self.classes
            .iter()
            .position(|c| c.name == stem)
            .map(|index| ClassHandle(index as u64))
    }

    fn create_instance(&mut self, class: ClassHandle, ctor_args: &[ScriptValue]) -> Result<InstanceHandle, ScriptError> {
        let fields = self.class(class)?.fields.clone();
        let handle = self.next_instance;
        self.next_instance += 1;
        self.instances.insert(
            handle,
            NativeInstance {
                class,
                ctor_args: ctor_args.to_vec(),
                fields,
            },
        );
        Ok(InstanceHandle(handle))
    }

    fn field(&self, class: ClassHandle, name: &str) -> Option<FieldHandle> {
        self.class(class)
            .ok()?
            .fields
            .iter()
            .position(|(n, _)| n == name)
            .map(|index| FieldHandle(index as u64))
    }

    fn set_field(&mut self, instance: InstanceHandle, field: FieldHandle, value: ScriptValue) -> Result<(), ScriptError> {
        let state = self
            .instances
            .get_mut(&instance.0)
            .ok_or(ScriptError::InvalidHandle(instance.0))?;
        let slot = usize::try_from(field.0)
            .ok()
            .and_then(|index| state.fields.get_mut(index))
            .ok_or(ScriptError::InvalidHandle(field.0))?;
        assign(&mut slot.1, value)
    }

    fn invoke_method(
        &mut self,
        instance: InstanceHandle,
        method: &str,
        args: &[ScriptValue],
    ) -> Result<Option<ScriptValue>, ScriptError> {
        let state = self
            .instances
            .get_mut(&instance.0)
            .ok_or(ScriptError::InvalidHandle(instance.0))?;
        let class = usize::try_from(state.class.0)
            .ok()
            .and_then(|index| self.classes.get_mut(index))
            .ok_or(ScriptError::InvalidHandle(state.class.0))?;
        let body = class.methods.get_mut(method).ok_or_else(|| ScriptError::NoSuchMethod {
            method: method.to_string(),
        })?;
        Ok(body(state, args))
    }
}

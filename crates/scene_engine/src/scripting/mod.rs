//! Scripting bridge
//!
//! The scene drives script classes through the narrow [`ScriptBridge`]
//! contract: resolve a class from a script file, instantiate it, push typed
//! field values, invoke named methods. The VM behind the bridge is opaque.
//!
//! Two bridges ship with the crate:
//! - [`NoScripting`] resolves nothing, for drivers without a VM
//! - [`NativeScriptHost`] hosts classes written as Rust closures

mod binding;
mod native;
mod value;

pub use binding::{bind_script, BindReport};
pub use native::{NativeClass, NativeInstance, NativeMethod, NativeScriptHost};
pub use value::{ScriptValue, ScriptValueType};

use std::path::Path;
use thiserror::Error;

/// Method invoked once after fields are bound
pub const ON_START: &str = "OnStart";

/// Method invoked every runtime frame
pub const ON_UPDATE: &str = "OnUpdate";

/// Handle to a resolved script class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassHandle(pub u64);

/// Handle to a live script instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceHandle(pub u64);

/// Handle to a field of a script class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldHandle(pub u64);

/// Scripting errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScriptError {
    /// The instance has no method with this name
    #[error("no method `{method}` on script instance")]
    NoSuchMethod {
        /// Method name
        method: String,
    },

    /// An authored value does not parse as its declared type
    #[error("`{value}` is not a valid {expected}")]
    InvalidValue {
        /// Declared type
        expected: ScriptValueType,
        /// Authored string
        value: String,
    },

    /// A declared variable could not be pushed into its field
    #[error("binding variable `{variable}` failed: {source}")]
    Binding {
        /// Variable name
        variable: String,
        /// Underlying failure
        #[source]
        source: Box<ScriptError>,
    },

    /// A value of the wrong type was assigned to a field
    #[error("field expects {expected}, got {actual}")]
    FieldType {
        /// Field type
        expected: ScriptValueType,
        /// Assigned value type
        actual: ScriptValueType,
    },

    /// Unknown type name in authored data
    #[error("unknown script variable type `{0}`")]
    UnknownType(String),

    /// A class, instance or field handle the bridge does not know
    #[error("invalid script handle {0}")]
    InvalidHandle(u64),

    /// Failure raised inside the VM
    #[error("script VM error: {0}")]
    Vm(String),
}

/// Contract between the scene and a scripting VM
///
/// All calls are synchronous; a bridge that never returns stalls the frame.
pub trait ScriptBridge {
    /// The scene is entering play mode
    fn scene_start(&mut self) {}

    /// The scene left play mode; every instance handle is now dead
    fn scene_end(&mut self) {}

    /// Resolve the class defined by a script file
    fn resolve(&mut self, script_path: &Path) -> Option<ClassHandle>;

    /// Create an instance, passing constructor arguments
    fn create_instance(&mut self, class: ClassHandle, ctor_args: &[ScriptValue]) -> Result<InstanceHandle, ScriptError>;

    /// Look up a field of a class by name
    fn field(&self, class: ClassHandle, name: &str) -> Option<FieldHandle>;

    /// Assign a field on an instance
    fn set_field(&mut self, instance: InstanceHandle, field: FieldHandle, value: ScriptValue) -> Result<(), ScriptError>;

    /// Invoke a method by name
    ///
    /// Returns [`ScriptError::NoSuchMethod`] when the class does not define it.
    fn invoke_method(
        &mut self,
        instance: InstanceHandle,
        method: &str,
        args: &[ScriptValue],
    ) -> Result<Option<ScriptValue>, ScriptError>;
}

/// Bridge for drivers without a scripting VM: nothing resolves
#[derive(Debug, Default, Clone, Copy)]
pub struct NoScripting;

impl ScriptBridge for NoScripting {
    fn resolve(&mut self, _script_path: &Path) -> Option<ClassHandle> {
        None
    }

    fn create_instance(&mut self, class: ClassHandle, _ctor_args: &[ScriptValue]) -> Result<InstanceHandle, ScriptError> {
        Err(ScriptError::InvalidHandle(class.0))
    }

    fn field(&self, _class: ClassHandle, _name: &str) -> Option<FieldHandle> {
        None
    }

    fn set_field(&mut self, instance: InstanceHandle, _field: FieldHandle, _value: ScriptValue) -> Result<(), ScriptError> {
        Err(ScriptError::InvalidHandle(instance.0))
    }

    fn invoke_method(
        &mut self,
        instance: InstanceHandle,
        _method: &str,
        _args: &[ScriptValue],
    ) -> Result<Option<ScriptValue>, ScriptError> {
        Err(ScriptError::InvalidHandle(instance.0))
    }
}

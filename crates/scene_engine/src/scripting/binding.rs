//! Binding of script components to live instances

use super::{ScriptBridge, ScriptError, ScriptValue, ON_START};
use crate::ecs::components::ScriptComponent;
use uuid::Uuid;

/// Outcome of binding one script component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindReport {
    /// The class did not resolve; the component is inert for the session
    Unresolved,
    /// The class resolved but no instance could be created
    InstantiationFailed,
    /// An instance is live
    Bound {
        /// Variables pushed into their field
        fields_set: usize,
        /// Variables that failed to parse or assign and kept their default
        fields_failed: usize,
    },
}

impl BindReport {
    /// Whether an instance is live
    pub fn is_bound(self) -> bool {
        matches!(self, Self::Bound { .. })
    }
}

/// Resolve, instantiate and initialise the script of one object
///
/// The owner's UUID is the single constructor argument. Declared variables are
/// parsed per their type and pushed into the field of the same name; names the
/// class does not declare are skipped silently and failures are logged without
/// aborting the binding. `OnStart` is invoked last when the class defines it.
pub fn bind_script(script: &mut ScriptComponent, owner: Uuid, bridge: &mut dyn ScriptBridge) -> BindReport {
    script.unbind();

    let Some(class) = bridge.resolve(&script.path) else {
        log::warn!("Failed to load script [{}]", script.path.display());
        return BindReport::Unresolved;
    };
    script.class = Some(class);

    let instance = match bridge.create_instance(class, &[ScriptValue::String(owner.to_string())]) {
        Ok(instance) => instance,
        Err(e) => {
            log::warn!("Failed to instantiate script [{}]: {e}", script.path.display());
            return BindReport::InstantiationFailed;
        }
    };
    script.instance = Some(instance);

    let mut fields_set = 0;
    let mut fields_failed = 0;
    for variable in &script.variables {
        let Some(field) = bridge.field(class, &variable.name) else {
            log::trace!("Script [{}] has no field `{}`", script.path.display(), variable.name);
            continue;
        };
        let result = variable
            .ty
            .parse_value(&variable.user_value)
            .and_then(|value| bridge.set_field(instance, field, value))
            .map_err(|e| ScriptError::Binding {
                variable: variable.name.clone(),
                source: Box::new(e),
            });
        match result {
            Ok(()) => fields_set += 1,
            Err(e) => {
                log::warn!("Script [{}]: {e}", script.path.display());
                fields_failed += 1;
            }
        }
    }

    match bridge.invoke_method(instance, ON_START, &[]) {
        Ok(_) | Err(ScriptError::NoSuchMethod { .. }) => {}
        Err(e) => log::warn!("Script [{}] {ON_START} failed: {e}", script.path.display()),
    }

    BindReport::Bound { fields_set, fields_failed }
}

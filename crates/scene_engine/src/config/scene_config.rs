//! Scene-level configuration

use serde::{Serialize, Deserialize};

use crate::config::Config;
use crate::render::Color;

/// Settings that shape object management and the editor overlay pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Name given to objects created with an empty name
    pub default_object_name: String,

    /// Suffix appended to the name of duplicated objects
    pub duplicate_suffix: String,

    /// Colors and spacing used by the editor draw pass
    pub editor: EditorStyle,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            default_object_name: "NewGameObject".to_string(),
            duplicate_suffix: "_dup".to_string(),
            editor: EditorStyle::default(),
        }
    }
}

impl Config for SceneConfig {}

/// Editor overlay style
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorStyle {
    /// Background grid cell size in world units
    pub grid_spacing: f32,

    /// Outline drawn around the selected object
    pub selection_color: Color,

    /// Frustum outline of unselected cameras
    pub camera_frustum_color: Color,

    /// Gizmo tint for the selected camera
    pub gizmo_active_color: Color,

    /// Gizmo tint for every other camera
    pub gizmo_inactive_color: Color,

    /// Collider overlay color; its alpha is replaced by `collider_alpha` / 1.0
    pub collider_color: Color,

    /// Collider overlay alpha for unselected objects
    pub collider_alpha: f32,
}

impl Default for EditorStyle {
    fn default() -> Self {
        Self {
            grid_spacing: 1.0,
            selection_color: Color::new(1.0, 0.5, 0.0, 1.0),
            camera_frustum_color: Color::new(0.6, 0.6, 0.6, 1.0),
            gizmo_active_color: Color::new(1.0, 1.0, 1.0, 1.0),
            gizmo_inactive_color: Color::new(0.6, 0.6, 0.6, 0.6),
            collider_color: Color::new(0.0, 1.0, 0.0, 1.0),
            collider_alpha: 0.33,
        }
    }
}

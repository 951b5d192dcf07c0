//! Project and editor context
//!
//! [`EditorContext`] is the one place that knows which project is open, which
//! scene is active and what is selected. It is passed explicitly to whatever
//! needs it; there are no process-wide globals.

use crate::config::Config;
use crate::render::{Renderer2D, SceneCamera};
use crate::scene::{EditorView, Object, Scene, SceneError};
use serde::{Serialize, Deserialize};
use std::path::PathBuf;

/// Project descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    /// Display name
    pub name: String,
    /// Root directory of the project's assets
    pub directory: PathBuf,
}

impl Default for Project {
    fn default() -> Self {
        Self {
            name: "Untitled".to_string(),
            directory: PathBuf::from("."),
        }
    }
}

impl Config for Project {}

impl Project {
    /// Create a project descriptor
    pub fn new(name: impl Into<String>, directory: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            directory: directory.into(),
        }
    }
}

/// Editor session state
pub struct EditorContext {
    project: Option<Project>,
    scene: Option<Scene>,
    selected: Object,
    camera: SceneCamera,
    draw_grid: bool,
}

impl EditorContext {
    /// Empty context: no project, no scene, grid on
    pub fn new() -> Self {
        Self {
            project: None,
            scene: None,
            selected: Object::NULL,
            camera: SceneCamera::default(),
            draw_grid: true,
        }
    }

    /// Open a project, closing the previous one and its scene
    pub fn open_project(&mut self, project: Project) -> Option<Project> {
        log::info!("Opening project `{}` at {}", project.name, project.directory.display());
        self.scene = None;
        self.selected = Object::NULL;
        self.project.replace(project)
    }

    /// Close the open project and its scene
    pub fn close_project(&mut self) -> Option<Project> {
        self.scene = None;
        self.selected = Object::NULL;
        self.project.take()
    }

    /// Open project
    pub fn project(&self) -> Option<&Project> {
        self.project.as_ref()
    }

    /// Make `scene` the active scene, returning the previous one
    ///
    /// Rejected with [`SceneError::NoActiveProject`] when no project is open.
    /// The selection is cleared.
    pub fn set_active_scene(&mut self, scene: Scene) -> Result<Option<Scene>, SceneError> {
        if self.project.is_none() {
            return Err(SceneError::NoActiveProject);
        }
        log::info!("Active scene is now `{}`", scene.name());
        self.selected = Object::NULL;
        Ok(self.scene.replace(scene))
    }

    /// Remove the active scene
    pub fn clear_active_scene(&mut self) -> Option<Scene> {
        self.selected = Object::NULL;
        self.scene.take()
    }

    /// Active scene
    pub fn active_scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    /// Mutable active scene
    pub fn active_scene_mut(&mut self) -> Option<&mut Scene> {
        self.scene.as_mut()
    }

    /// Select an object of the active scene; the null object clears the selection
    pub fn select(&mut self, object: Object) -> Result<(), SceneError> {
        if !object.is_null() && !self.scene.as_ref().is_some_and(|scene| scene.is_valid(object)) {
            return Err(SceneError::InvalidHandle(object));
        }
        self.selected = object;
        Ok(())
    }

    /// Current selection; null once the selected object is deleted
    pub fn selected(&self) -> Object {
        match &self.scene {
            Some(scene) if scene.is_valid(self.selected) => self.selected,
            _ => Object::NULL,
        }
    }

    /// Editor viewport camera
    pub fn editor_camera(&self) -> &SceneCamera {
        &self.camera
    }

    /// Mutable editor viewport camera
    pub fn editor_camera_mut(&mut self) -> &mut SceneCamera {
        &mut self.camera
    }

    /// Whether the background grid is drawn
    pub fn draw_grid(&self) -> bool {
        self.draw_grid
    }

    /// Toggle the background grid
    pub fn set_draw_grid(&mut self, draw_grid: bool) {
        self.draw_grid = draw_grid;
    }

    /// Draw the active scene through the editor camera
    ///
    /// Returns `false` when there is no active scene.
    pub fn render_editor_frame(&mut self, dt: f32, renderer: &mut dyn Renderer2D) -> bool {
        let (width, height) = renderer.render_target_size();
        self.camera.set_viewport_size(width, height);
        let selected = self.selected();

        let Some(scene) = &self.scene else {
            return false;
        };
        let view = EditorView {
            camera: &self.camera,
            draw_grid: self.draw_grid,
            selected,
        };
        scene.on_update_editor(dt, renderer, &view);
        true
    }
}

impl Default for EditorContext {
    fn default() -> Self {
        Self::new()
    }
}

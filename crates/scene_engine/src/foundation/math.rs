//! Math utilities and types
//!
//! Provides the math types used by the 2D scene graph. Everything is stored as
//! `f32` and composed as 4x4 matrices so transforms can be handed straight to a
//! renderer.

pub use nalgebra::{
    Vector2, Vector3, Vector4,
    Matrix4,
};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Build a translation * rotation(Z) * scale matrix for a 2D transform
pub fn trs_2d(translation: Vec2, rotation: f32, scale: Vec2) -> Mat4 {
    Mat4::new_translation(&Vec3::new(translation.x, translation.y, 0.0))
        * Mat4::new_rotation(Vec3::new(0.0, 0.0, rotation))
        * Mat4::new_nonuniform_scaling(&Vec3::new(scale.x, scale.y, 1.0))
}

/// Apply a 4x4 transform to a point in the XY plane
pub fn transform_point_2d(matrix: &Mat4, point: Vec2) -> Vec2 {
    let p = matrix.transform_point(&Point3::new(point.x, point.y, 0.0));
    Vec2::new(p.x, p.y)
}

/// Extract the XY translation of a transform matrix
pub fn translation_2d(matrix: &Mat4) -> Vec2 {
    Vec2::new(matrix.m14, matrix.m24)
}

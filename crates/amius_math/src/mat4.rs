//! 4x4 Matrix utilities for 3D transformations
//!
//! Matrices are column-major (`m[column][row]`). Every builder that takes an
//! input matrix right-multiplies onto it, so `rotate_x(translate(m, p), a)`
//! yields `m * T(p) * Rx(a)`: in world space the rotation is applied first,
//! then the translation, then whatever `m` already did.

use crate::Vec3;

/// 4x4 matrix type (column-major)
pub type Mat4 = [[f32; 4]; 4];

/// Identity matrix
pub const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Multiply two 4x4 matrices: result = a * b
///
/// In column-major convention, this applies b first, then a.
#[allow(clippy::needless_range_loop)]
pub fn mul(a: Mat4, b: Mat4) -> Mat4 {
    let mut result = [[0.0f32; 4]; 4];

    for i in 0..4 {
        for j in 0..4 {
            for k in 0..4 {
                result[i][j] += a[k][j] * b[i][k];
            }
        }
    }

    result
}

/// Right-multiply a translation onto `m`
pub fn translate(m: Mat4, v: Vec3) -> Mat4 {
    let mut result = m;
    for row in 0..4 {
        result[3][row] = m[0][row] * v.x + m[1][row] * v.y + m[2][row] * v.z + m[3][row];
    }
    result
}

/// Right-multiply a rotation about the X axis onto `m`
pub fn rotate_x(m: Mat4, angle: f32) -> Mat4 {
    let (sn, cs) = angle.sin_cos();
    mul(m, [
        [1.0, 0.0, 0.0, 0.0],
        [0.0, cs, sn, 0.0],
        [0.0, -sn, cs, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Right-multiply a rotation about the Y axis onto `m`
pub fn rotate_y(m: Mat4, angle: f32) -> Mat4 {
    let (sn, cs) = angle.sin_cos();
    mul(m, [
        [cs, 0.0, -sn, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [sn, 0.0, cs, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Right-multiply a rotation about the Z axis onto `m`
pub fn rotate_z(m: Mat4, angle: f32) -> Mat4 {
    let (sn, cs) = angle.sin_cos();
    mul(m, [
        [cs, sn, 0.0, 0.0],
        [-sn, cs, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Right-multiply a non-uniform scale onto `m`
pub fn scale(m: Mat4, v: Vec3) -> Mat4 {
    let mut result = m;
    for row in 0..4 {
        result[0][row] *= v.x;
        result[1][row] *= v.y;
        result[2][row] *= v.z;
    }
    result
}

/// Apply translation, then rotation X, Y, Z onto `base`
///
/// `base * T(position) * Rx * Ry * Rz`
pub fn translate_rotate(base: Mat4, position: Vec3, rotation: Vec3) -> Mat4 {
    let m = translate(base, position);
    let m = rotate_x(m, rotation.x);
    let m = rotate_y(m, rotation.y);
    rotate_z(m, rotation.z)
}

/// Apply translation, rotation X, Y, Z and scale onto `base`
///
/// This is the local-to-parent composition used by scene objects:
/// `base * T(position) * Rx * Ry * Rz * S(scale)`
pub fn translate_rotate_scale(base: Mat4, position: Vec3, rotation: Vec3, scaling: Vec3) -> Mat4 {
    scale(translate_rotate(base, position, rotation), scaling)
}

/// Transform a point (w = 1) by an affine matrix
pub fn transform_point(m: Mat4, p: Vec3) -> Vec3 {
    Vec3::new(
        m[0][0] * p.x + m[1][0] * p.y + m[2][0] * p.z + m[3][0],
        m[0][1] * p.x + m[1][1] * p.y + m[2][1] * p.z + m[3][1],
        m[0][2] * p.x + m[1][2] * p.y + m[2][2] * p.z + m[3][2],
    )
}

/// Invert a general 4x4 matrix
///
/// Returns `None` if the matrix is singular.
pub fn inverse(m: Mat4) -> Option<Mat4> {
    // Cofactor expansion over the flat element list. The algorithm does not
    // care whether the layout is row- or column-major since (M^T)^-1 = (M^-1)^T.
    let a: [f32; 16] = [
        m[0][0], m[0][1], m[0][2], m[0][3],
        m[1][0], m[1][1], m[1][2], m[1][3],
        m[2][0], m[2][1], m[2][2], m[2][3],
        m[3][0], m[3][1], m[3][2], m[3][3],
    ];
    let mut inv = [0.0f32; 16];

    inv[0] = a[5] * a[10] * a[15] - a[5] * a[11] * a[14] - a[9] * a[6] * a[15]
        + a[9] * a[7] * a[14] + a[13] * a[6] * a[11] - a[13] * a[7] * a[10];
    inv[4] = -a[4] * a[10] * a[15] + a[4] * a[11] * a[14] + a[8] * a[6] * a[15]
        - a[8] * a[7] * a[14] - a[12] * a[6] * a[11] + a[12] * a[7] * a[10];
    inv[8] = a[4] * a[9] * a[15] - a[4] * a[11] * a[13] - a[8] * a[5] * a[15]
        + a[8] * a[7] * a[13] + a[12] * a[5] * a[11] - a[12] * a[7] * a[9];
    inv[12] = -a[4] * a[9] * a[14] + a[4] * a[10] * a[13] + a[8] * a[5] * a[14]
        - a[8] * a[6] * a[13] - a[12] * a[5] * a[10] + a[12] * a[6] * a[9];
    inv[1] = -a[1] * a[10] * a[15] + a[1] * a[11] * a[14] + a[9] * a[2] * a[15]
        - a[9] * a[3] * a[14] - a[13] * a[2] * a[11] + a[13] * a[3] * a[10];
    inv[5] = a[0] * a[10] * a[15] - a[0] * a[11] * a[14] - a[8] * a[2] * a[15]
        + a[8] * a[3] * a[14] + a[12] * a[2] * a[11] - a[12] * a[3] * a[10];
    inv[9] = -a[0] * a[9] * a[15] + a[0] * a[11] * a[13] + a[8] * a[1] * a[15]
        - a[8] * a[3] * a[13] - a[12] * a[1] * a[11] + a[12] * a[3] * a[9];
    inv[13] = a[0] * a[9] * a[14] - a[0] * a[10] * a[13] - a[8] * a[1] * a[14]
        + a[8] * a[2] * a[13] + a[12] * a[1] * a[10] - a[12] * a[2] * a[9];
    inv[2] = a[1] * a[6] * a[15] - a[1] * a[7] * a[14] - a[5] * a[2] * a[15]
        + a[5] * a[3] * a[14] + a[13] * a[2] * a[7] - a[13] * a[3] * a[6];
    inv[6] = -a[0] * a[6] * a[15] + a[0] * a[7] * a[14] + a[4] * a[2] * a[15]
        - a[4] * a[3] * a[14] - a[12] * a[2] * a[7] + a[12] * a[3] * a[6];
    inv[10] = a[0] * a[5] * a[15] - a[0] * a[7] * a[13] - a[4] * a[1] * a[15]
        + a[4] * a[3] * a[13] + a[12] * a[1] * a[7] - a[12] * a[3] * a[5];
    inv[14] = -a[0] * a[5] * a[14] + a[0] * a[6] * a[13] + a[4] * a[1] * a[14]
        - a[4] * a[2] * a[13] - a[12] * a[1] * a[6] + a[12] * a[2] * a[5];
    inv[3] = -a[1] * a[6] * a[11] + a[1] * a[7] * a[10] + a[5] * a[2] * a[11]
        - a[5] * a[3] * a[10] - a[9] * a[2] * a[7] + a[9] * a[3] * a[6];
    inv[7] = a[0] * a[6] * a[11] - a[0] * a[7] * a[10] - a[4] * a[2] * a[11]
        + a[4] * a[3] * a[10] + a[8] * a[2] * a[7] - a[8] * a[3] * a[6];
    inv[11] = -a[0] * a[5] * a[11] + a[0] * a[7] * a[9] + a[4] * a[1] * a[11]
        - a[4] * a[3] * a[9] - a[8] * a[1] * a[7] + a[8] * a[3] * a[5];
    inv[15] = a[0] * a[5] * a[10] - a[0] * a[6] * a[9] - a[4] * a[1] * a[10]
        + a[4] * a[2] * a[9] + a[8] * a[1] * a[6] - a[8] * a[2] * a[5];

    let det = a[0] * inv[0] + a[1] * inv[4] + a[2] * inv[8] + a[3] * inv[12];
    if det == 0.0 || !det.is_finite() {
        return None;
    }
    let inv_det = 1.0 / det;

    let mut result = [[0.0f32; 4]; 4];
    for (i, value) in inv.iter().enumerate() {
        result[i / 4][i % 4] = value * inv_det;
    }
    Some(result)
}

/// Right-handed perspective projection with a [-1, 1] depth range
///
/// `fov_y` is the vertical field of view in radians.
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let f = 1.0 / (fov_y * 0.5).tan();
    let depth = far - near;
    [
        [f / aspect, 0.0, 0.0, 0.0],
        [0.0, f, 0.0, 0.0],
        [0.0, 0.0, -(far + near) / depth, -1.0],
        [0.0, 0.0, -(2.0 * far * near) / depth, 0.0],
    ]
}

/// Get the translation column of an affine matrix
pub fn get_translation(m: Mat4) -> Vec3 {
    Vec3::new(m[3][0], m[3][1], m[3][2])
}

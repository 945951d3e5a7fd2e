/// Number of faces in a cube cookie
pub const CUBE_FACE_COUNT: usize = 6;

/// Per-face sign applied to the (u, v, 1) face direction before remapping.
/// Faces are ordered +X, -X, +Y, -Y, +Z, -Z.
pub const CUBE_FACE_SIGNS: [[f32; 3]; CUBE_FACE_COUNT] = [
    [-1.0, -1.0, 1.0],  // +X
    [1.0, -1.0, -1.0],  // -X
    [1.0, 1.0, 1.0],    // +Y
    [1.0, -1.0, -1.0],  // -Y
    [1.0, -1.0, 1.0],   // +Z
    [-1.0, -1.0, -1.0], // -Z
];

/// Per-face destination axis for the signed (u, v, 1) components.
/// `world[CUBE_FACE_REMAP[face][i]] = signed[i]`
pub const CUBE_FACE_REMAP: [[usize; 3]; CUBE_FACE_COUNT] = [
    [2, 1, 0], // u -> Z, v -> Y, 1 -> X
    [2, 1, 0],
    [0, 2, 1], // u -> X, v -> Z, 1 -> Y
    [0, 2, 1],
    [0, 1, 2], // u -> X, v -> Y, 1 -> Z
    [0, 1, 2],
];

/// File suffix for each face, in face order
pub const CUBE_FACE_NAMES: [&str; CUBE_FACE_COUNT] = ["px", "nx", "py", "ny", "pz", "nz"];

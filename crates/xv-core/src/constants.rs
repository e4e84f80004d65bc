//! Global constants for xv-core

/// Displacement, in model units, of a part at explosion factor 1.0
pub const EXPLOSION_SCALE: f32 = 30.0;

/// Explosion vectors shorter than this are treated as degenerate
pub const DEGENERATE_EPSILON: f32 = 1e-3;

/// Showcase metallic gray (#aaaaaa, RGBA)
pub const METALLIC_GRAY: [f32; 4] = [0.667, 0.667, 0.667, 1.0];

/// Catalog palette (#4facfe, #667eea, #f093fb, #43e97b, #ffd89b as RGBA)
pub const CATALOG_PALETTE: [[f32; 4]; 5] = [
    [0.310, 0.675, 0.996, 1.0],
    [0.400, 0.494, 0.918, 1.0],
    [0.941, 0.576, 0.984, 1.0],
    [0.263, 0.914, 0.482, 1.0],
    [1.000, 0.847, 0.608, 1.0],
];

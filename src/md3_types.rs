// https://icculus.org/homepages/phaethon/q3a/formats/md3format.html

pub const MD3_MAGIC: [u8; 4] = *b"IDP3";
pub const MD3_VERSION: i32 = 15;

/// Width of path-like name fields (model, tag, surface, shader names).
pub const MAX_QPATH: usize = 64;
/// Width of the per-frame name field.
pub const FRAME_NAME_LEN: usize = 16;

#[derive(Debug, Clone, PartialEq)]
pub struct Md3Model {
    pub name: String,
    pub flags: i32,
    /// Declared skin count; never used by the codec, copied through.
    pub num_skins: i32,
    pub frames: Vec<Md3Frame>,
    pub tags: Vec<Md3Tag>,
    pub surfaces: Vec<Md3Surface>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Md3Frame {
    pub min_bounds: [f32; 3],
    pub max_bounds: [f32; 3],
    pub origin: [f32; 3],
    pub radius: f32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Md3Tag {
    pub name: String,
    pub origin: [f32; 3],
    pub axis: [[f32; 3]; 3],
}

#[derive(Debug, Clone, PartialEq)]
pub struct Md3Surface {
    /// Surface magic; not validated, copied through.
    pub ident: i32,
    pub name: String,
    pub flags: i32,
    /// Kept on the surface because the vertex block is a flat
    /// `num_frames * num_verts` sequence and the frame count cannot be
    /// recovered from the vecs alone.
    pub num_frames: i32,
    pub shaders: Vec<Md3Shader>,
    pub triangles: Vec<[i32; 3]>,
    pub texcoords: Vec<[f32; 2]>,
    /// Compressed position/normal, one `[i16; 4]` per (frame, vertex) pair.
    /// Opaque to this tool.
    pub vertices: Vec<[i16; 4]>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Md3Shader {
    pub name: String,
    pub shader_index: i32,
}

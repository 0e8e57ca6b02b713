use crate::error::Result;
use crate::md3_types::{FRAME_NAME_LEN, MAX_QPATH, MD3_MAGIC, MD3_VERSION, Md3Model, Md3Surface};
use crate::wire::{write_fixed_string, write_vec3};
use byteorder::{LittleEndian, WriteBytesExt};

pub const HEADER_SIZE: usize = 108;
pub const SURFACE_HEADER_SIZE: usize = 108;
pub const FRAME_SIZE: usize = 12 + 12 + 12 + 4 + 16;
pub const TAG_SIZE: usize = 64 + 12 + 36;
pub const SHADER_SIZE: usize = 64 + 4;
pub const TRIANGLE_SIZE: usize = 3 * 4;
pub const TEXCOORD_SIZE: usize = 2 * 4;
pub const VERTEX_SIZE: usize = 4 * 2;

/// Serialize a model, recomputing every count and offset field from the
/// current contents. Stored offsets from the source file are never copied
/// forward; mutating a model and re-encoding always yields consistent
/// offsets.
pub fn write_md3(model: &Md3Model) -> Result<Vec<u8>> {
    let mut surfaces = Vec::new();
    for surface in &model.surfaces {
        write_surface(&mut surfaces, surface)?;
    }

    let mut frames = Vec::new();
    for frame in &model.frames {
        write_vec3(&mut frames, frame.min_bounds);
        write_vec3(&mut frames, frame.max_bounds);
        write_vec3(&mut frames, frame.origin);
        frames.write_f32::<LittleEndian>(frame.radius)?;
        write_fixed_string(&mut frames, &frame.name, FRAME_NAME_LEN)?;
    }

    let mut tags = Vec::new();
    for tag in &model.tags {
        write_fixed_string(&mut tags, &tag.name, MAX_QPATH)?;
        write_vec3(&mut tags, tag.origin);
        for row in tag.axis {
            write_vec3(&mut tags, row);
        }
    }

    let ofs_frames = HEADER_SIZE;
    let ofs_tags = ofs_frames + frames.len();
    let ofs_surfaces = ofs_tags + tags.len();
    let ofs_eof = ofs_surfaces + surfaces.len();

    let mut raw = Vec::with_capacity(ofs_eof);
    raw.extend_from_slice(&MD3_MAGIC);
    raw.write_i32::<LittleEndian>(MD3_VERSION)?;
    write_fixed_string(&mut raw, &model.name, MAX_QPATH)?;
    raw.write_i32::<LittleEndian>(model.flags)?;
    raw.write_i32::<LittleEndian>(model.frames.len() as i32)?;
    raw.write_i32::<LittleEndian>(model.tags.len() as i32)?;
    raw.write_i32::<LittleEndian>(model.surfaces.len() as i32)?;
    raw.write_i32::<LittleEndian>(model.num_skins)?;
    raw.write_i32::<LittleEndian>(ofs_frames as i32)?;
    raw.write_i32::<LittleEndian>(ofs_tags as i32)?;
    raw.write_i32::<LittleEndian>(ofs_surfaces as i32)?;
    raw.write_i32::<LittleEndian>(ofs_eof as i32)?;
    raw.extend_from_slice(&frames);
    raw.extend_from_slice(&tags);
    raw.extend_from_slice(&surfaces);

    Ok(raw)
}

fn write_surface(buf: &mut Vec<u8>, surface: &Md3Surface) -> Result<()> {
    let size_shaders = SHADER_SIZE * surface.shaders.len();
    let size_triangles = TRIANGLE_SIZE * surface.triangles.len();
    let size_texcoords = TEXCOORD_SIZE * surface.texcoords.len();
    let size_vertices = VERTEX_SIZE * surface.vertices.len();

    // The header declares ofs_triangles before ofs_shaders, but the shader
    // block is physically written first. Quake 3's own exports lay surfaces
    // out this way, so the asymmetry is kept as-is.
    let ofs_shaders = SURFACE_HEADER_SIZE;
    let ofs_triangles = ofs_shaders + size_shaders;
    let ofs_st = ofs_triangles + size_triangles;
    let ofs_xyznormal = ofs_st + size_texcoords;
    let ofs_end = ofs_xyznormal + size_vertices;

    buf.write_i32::<LittleEndian>(surface.ident)?;
    write_fixed_string(buf, &surface.name, MAX_QPATH)?;
    buf.write_i32::<LittleEndian>(surface.flags)?;
    buf.write_i32::<LittleEndian>(surface.num_frames)?;
    buf.write_i32::<LittleEndian>(surface.shaders.len() as i32)?;
    buf.write_i32::<LittleEndian>(surface.texcoords.len() as i32)?;
    buf.write_i32::<LittleEndian>(surface.triangles.len() as i32)?;
    buf.write_i32::<LittleEndian>(ofs_triangles as i32)?;
    buf.write_i32::<LittleEndian>(ofs_shaders as i32)?;
    buf.write_i32::<LittleEndian>(ofs_st as i32)?;
    buf.write_i32::<LittleEndian>(ofs_xyznormal as i32)?;
    buf.write_i32::<LittleEndian>(ofs_end as i32)?;

    for shader in &surface.shaders {
        write_fixed_string(buf, &shader.name, MAX_QPATH)?;
        buf.write_i32::<LittleEndian>(shader.shader_index)?;
    }

    for triangle in &surface.triangles {
        for &index in triangle {
            buf.write_i32::<LittleEndian>(index)?;
        }
    }

    for st in &surface.texcoords {
        buf.write_f32::<LittleEndian>(st[0])?;
        buf.write_f32::<LittleEndian>(st[1])?;
    }

    for vertex in &surface.vertices {
        for &component in vertex {
            buf.write_i16::<LittleEndian>(component)?;
        }
    }

    Ok(())
}

// https://icculus.org/homepages/phaethon/q3a/formats/md3format.html
use crate::error::{Md3Error, Result};
use crate::md3_types::{
    FRAME_NAME_LEN, MAX_QPATH, MD3_MAGIC, MD3_VERSION, Md3Frame, Md3Model, Md3Shader, Md3Surface,
    Md3Tag,
};
use crate::wire::{read_f32, read_fixed_string, read_i16, read_i32, read_len, read_vec3, truncated};
use std::io::{Cursor, Read};

pub fn parse_md3(data: &[u8]) -> Result<Md3Model> {
    let mut cursor = Cursor::new(data);

    let mut magic = [0u8; 4];
    cursor
        .read_exact(&mut magic)
        .map_err(|_| truncated("file header"))?;
    if magic != MD3_MAGIC {
        return Err(Md3Error::UnsupportedFormat(magic));
    }

    let version = read_i32(&mut cursor, "version")?;
    if version != MD3_VERSION {
        return Err(Md3Error::UnsupportedVersion(version));
    }

    let name = read_fixed_string(&mut cursor, MAX_QPATH, "model name")?;
    let flags = read_i32(&mut cursor, "flags")?;
    let num_frames = read_len(&mut cursor, "num_frames")?;
    let num_tags = read_len(&mut cursor, "num_tags")?;
    let num_surfaces = read_len(&mut cursor, "num_surfaces")?;
    let num_skins = read_i32(&mut cursor, "num_skins")?;
    let ofs_frames = read_len(&mut cursor, "ofs_frames")?;
    let ofs_tags = read_len(&mut cursor, "ofs_tags")?;
    let ofs_surfaces = read_len(&mut cursor, "ofs_surfaces")?;
    let _ofs_eof = read_len(&mut cursor, "ofs_eof")?;

    // Sections are located by their declared offsets, never by assuming they
    // follow each other contiguously.
    cursor.set_position(ofs_frames as u64);
    let mut frames = Vec::with_capacity(num_frames);
    for _ in 0..num_frames {
        frames.push(read_frame(&mut cursor)?);
    }

    cursor.set_position(ofs_tags as u64);
    let mut tags = Vec::with_capacity(num_tags);
    for _ in 0..num_tags {
        tags.push(read_tag(&mut cursor)?);
    }

    cursor.set_position(ofs_surfaces as u64);
    let mut surfaces = Vec::with_capacity(num_surfaces);
    for _ in 0..num_surfaces {
        surfaces.push(read_surface(&mut cursor)?);
    }

    Ok(Md3Model {
        name,
        flags,
        num_skins,
        frames,
        tags,
        surfaces,
    })
}

fn read_frame(cursor: &mut Cursor<&[u8]>) -> Result<Md3Frame> {
    Ok(Md3Frame {
        min_bounds: read_vec3(cursor, "frame bounds")?,
        max_bounds: read_vec3(cursor, "frame bounds")?,
        origin: read_vec3(cursor, "frame origin")?,
        radius: read_f32(cursor, "frame radius")?,
        name: read_fixed_string(cursor, FRAME_NAME_LEN, "frame name")?,
    })
}

fn read_tag(cursor: &mut Cursor<&[u8]>) -> Result<Md3Tag> {
    Ok(Md3Tag {
        name: read_fixed_string(cursor, MAX_QPATH, "tag name")?,
        origin: read_vec3(cursor, "tag origin")?,
        axis: [
            read_vec3(cursor, "tag axis")?,
            read_vec3(cursor, "tag axis")?,
            read_vec3(cursor, "tag axis")?,
        ],
    })
}

fn read_surface(cursor: &mut Cursor<&[u8]>) -> Result<Md3Surface> {
    // Local offsets in the surface header are relative to this position, not
    // to the start of the file.
    let surface_start = cursor.position();

    let ident = read_i32(cursor, "surface ident")?;
    let name = read_fixed_string(cursor, MAX_QPATH, "surface name")?;
    let flags = read_i32(cursor, "surface flags")?;
    let num_frames = read_len(cursor, "surface num_frames")?;
    let num_shaders = read_len(cursor, "num_shaders")?;
    let num_verts = read_len(cursor, "num_verts")?;
    let num_triangles = read_len(cursor, "num_triangles")?;
    let ofs_triangles = read_len(cursor, "ofs_triangles")?;
    let ofs_shaders = read_len(cursor, "ofs_shaders")?;
    let ofs_st = read_len(cursor, "ofs_st")?;
    let ofs_xyznormal = read_len(cursor, "ofs_xyznormal")?;
    let ofs_end = read_len(cursor, "ofs_end")?;

    cursor.set_position(surface_start + ofs_shaders as u64);
    let mut shaders = Vec::with_capacity(num_shaders);
    for _ in 0..num_shaders {
        shaders.push(Md3Shader {
            name: read_fixed_string(cursor, MAX_QPATH, "shader name")?,
            shader_index: read_i32(cursor, "shader index")?,
        });
    }

    cursor.set_position(surface_start + ofs_triangles as u64);
    let mut triangles = Vec::with_capacity(num_triangles);
    for _ in 0..num_triangles {
        triangles.push([
            read_i32(cursor, "triangle index")?,
            read_i32(cursor, "triangle index")?,
            read_i32(cursor, "triangle index")?,
        ]);
    }

    cursor.set_position(surface_start + ofs_st as u64);
    let mut texcoords = Vec::with_capacity(num_verts);
    for _ in 0..num_verts {
        texcoords.push([
            read_f32(cursor, "texcoord")?,
            read_f32(cursor, "texcoord")?,
        ]);
    }

    let num_vertex_records = num_frames
        .checked_mul(num_verts)
        .ok_or_else(|| Md3Error::Malformed("vertex block size overflows".to_string()))?;
    cursor.set_position(surface_start + ofs_xyznormal as u64);
    let mut vertices = Vec::with_capacity(num_vertex_records);
    for _ in 0..num_vertex_records {
        vertices.push([
            read_i16(cursor, "vertex")?,
            read_i16(cursor, "vertex")?,
            read_i16(cursor, "vertex")?,
            read_i16(cursor, "vertex")?,
        ]);
    }

    // Land on the declared end so the next surface parses correctly even if
    // this one left gaps or stored its blocks out of order.
    cursor.set_position(surface_start + ofs_end as u64);

    Ok(Md3Surface {
        ident,
        name,
        flags,
        num_frames: num_frames as i32,
        shaders,
        triangles,
        texcoords,
        vertices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::md3_types::fixtures;
    use crate::ser::write_md3;

    #[test]
    fn decode_rejects_bad_magic() {
        let mut bytes = write_md3(&fixtures::small_model()).unwrap();
        bytes[..4].copy_from_slice(b"IDP2");
        assert!(matches!(
            parse_md3(&bytes),
            Err(Md3Error::UnsupportedFormat(m)) if &m == b"IDP2"
        ));
    }

    #[test]
    fn decode_rejects_bad_version() {
        let mut bytes = write_md3(&fixtures::small_model()).unwrap();
        bytes[4..8].copy_from_slice(&16i32.to_le_bytes());
        assert!(matches!(
            parse_md3(&bytes),
            Err(Md3Error::UnsupportedVersion(16))
        ));
    }

    #[test]
    fn decode_rejects_truncated_data() {
        let bytes = write_md3(&fixtures::small_model()).unwrap();
        for cut in [3, 60, 108, bytes.len() - 1] {
            assert!(
                matches!(parse_md3(&bytes[..cut]), Err(Md3Error::Malformed(_))),
                "no error at cut {}",
                cut
            );
        }
    }

    #[test]
    fn decode_rejects_negative_counts() {
        let mut bytes = write_md3(&fixtures::small_model()).unwrap();
        // num_frames sits right after magic, version, name and flags.
        bytes[76..80].copy_from_slice(&(-1i32).to_le_bytes());
        assert!(matches!(parse_md3(&bytes), Err(Md3Error::Malformed(_))));
    }

    #[test]
    fn decode_follows_declared_offsets_across_gaps() {
        // Rebuild the encoded file with four junk bytes wedged between the
        // header and the frames section, patching every file-level offset.
        let model = fixtures::small_model();
        let bytes = write_md3(&model).unwrap();

        let mut padded = bytes[..108].to_vec();
        padded.extend_from_slice(&[0xAA; 4]);
        padded.extend_from_slice(&bytes[108..]);
        for field in [92usize, 96, 100, 104] {
            let old = i32::from_le_bytes(padded[field..field + 4].try_into().unwrap());
            padded[field..field + 4].copy_from_slice(&(old + 4).to_le_bytes());
        }

        let reparsed = parse_md3(&padded).unwrap();
        assert_eq!(reparsed, model);
    }

    #[test]
    fn full_width_name_is_accepted_on_decode() {
        let mut bytes = write_md3(&fixtures::small_model()).unwrap();
        // Overwrite the 64-byte model name field with no NUL anywhere.
        bytes[8..72].fill(b'x');
        let model = parse_md3(&bytes).unwrap();
        assert_eq!(model.name.len(), 64);
        assert_eq!(model.name, "x".repeat(64));
    }
}

use crate::error::{Md3Error, Result};
use crate::md3::parse_md3;
use crate::md3_types::MAX_QPATH;
use crate::ser::write_md3;

/// Collect every shader name in the model, numbered 1..=N across all
/// surfaces in file order.
pub fn list_shaders(data: &[u8]) -> Result<Vec<(usize, String)>> {
    let model = parse_md3(data)?;
    Ok(model
        .surfaces
        .iter()
        .flat_map(|surface| &surface.shaders)
        .enumerate()
        .map(|(i, shader)| (i + 1, shader.name.clone()))
        .collect())
}

/// Replace the name of shader `number` (1-based, as printed by
/// `list_shaders`) and re-encode the whole file with fresh offsets.
pub fn rename_shader(data: &[u8], number: usize, new_name: &str) -> Result<Vec<u8>> {
    // The terminator has to fit inside the fixed field, so a 64-byte name is
    // already too long even though decode would accept one.
    if new_name.len() >= MAX_QPATH {
        return Err(Md3Error::FieldTooLong {
            name: new_name.to_string(),
            width: MAX_QPATH,
        });
    }

    let mut model = parse_md3(data)?;
    let total = model
        .surfaces
        .iter()
        .map(|surface| surface.shaders.len())
        .sum();
    if number == 0 || number > total {
        return Err(Md3Error::OutOfRange { number, total });
    }

    if let Some(shader) = model
        .surfaces
        .iter_mut()
        .flat_map(|surface| &mut surface.shaders)
        .nth(number - 1)
    {
        println!(
            "[shaders::rename] shader {}: {} => {}",
            number, shader.name, new_name
        );
        shader.name = new_name.to_string();
    }

    write_md3(&model)
}

use constants::cubemap::CUBE_FACE_COUNT;
use ddsfile::{AlphaMode, D3D10ResourceDimension, Dds, DxgiFormat, NewDxgiParams};
use ies_photometry::PixelBuffer;
use std::path::Path;

fn cookie_params(size: (u32, u32), is_cubemap: bool) -> NewDxgiParams {
    NewDxgiParams {
        height: size.1,
        width: size.0,
        depth: None,
        format: DxgiFormat::R8G8B8A8_UNorm,
        mipmap_levels: Some(1),
        array_layers: Some(if is_cubemap { CUBE_FACE_COUNT as u32 } else { 1 }),
        caps2: None,
        is_cubemap,
        resource_dimension: D3D10ResourceDimension::Texture2D,
        alpha_mode: AlphaMode::Unknown,
    }
}

pub fn write_cookie_dds(
    path: &Path,
    buffer: &PixelBuffer,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut dds = Dds::new_dxgi(cookie_params((buffer.width(), buffer.height()), false))?;
    dds.data = buffer.as_bytes().to_vec();
    dds.write(&mut std::fs::File::create(path)?)?;
    Ok(())
}

/// Faces are stored back to back in +X, -X, +Y, -Y, +Z, -Z order.
pub fn write_cubemap_dds(
    path: &Path,
    faces: &[PixelBuffer; CUBE_FACE_COUNT],
) -> Result<(), Box<dyn std::error::Error>> {
    let size = (faces[0].width(), faces[0].height());
    if faces.iter().any(|face| (face.width(), face.height()) != size) {
        return Err("Cube faces differ in size".into());
    }

    let mut bytes = Vec::with_capacity(faces.iter().map(|face| face.as_bytes().len()).sum());
    for face in faces {
        bytes.extend_from_slice(face.as_bytes());
    }

    let mut dds = Dds::new_dxgi(cookie_params(size, true))?;
    dds.data = bytes;
    dds.write(&mut std::fs::File::create(path)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    fn gradient(size: u32) -> PixelBuffer {
        let mut buffer = PixelBuffer::new(size, size);
        for y in 0..size {
            for x in 0..size {
                buffer.set_intensity(x, y, (x * 16 + y) as u8);
            }
        }
        buffer
    }

    #[test]
    fn test_cookie_round_trip() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("spot.dds");
        let buffer = gradient(16);

        write_cookie_dds(&path, &buffer).unwrap();

        let dds = Dds::read(&mut File::open(&path).unwrap()).unwrap();
        assert_eq!(dds.get_width(), 16);
        assert_eq!(dds.get_height(), 16);
        assert_eq!(dds.get_dxgi_format(), Some(DxgiFormat::R8G8B8A8_UNorm));
        assert_eq!(dds.data, buffer.as_bytes());
    }

    #[test]
    fn test_cubemap_stores_six_faces() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("point.dds");
        let faces: [PixelBuffer; CUBE_FACE_COUNT] = std::array::from_fn(|face| {
            let mut buffer = PixelBuffer::new(8, 8);
            buffer.set_intensity(0, 0, face as u8 * 40);
            buffer
        });

        write_cubemap_dds(&path, &faces).unwrap();

        let dds = Dds::read(&mut File::open(&path).unwrap()).unwrap();
        assert_eq!(dds.get_width(), 8);
        assert_eq!(dds.data.len(), 6 * 8 * 8 * 4);
        // first byte of the -Z face
        assert_eq!(dds.data[5 * 8 * 8 * 4], 200);
    }

    #[test]
    fn test_cubemap_rejects_mismatched_faces() {
        let directory = tempfile::tempdir().unwrap();
        let mut faces: [PixelBuffer; CUBE_FACE_COUNT] =
            std::array::from_fn(|_| PixelBuffer::new(8, 8));
        faces[3] = PixelBuffer::new(4, 4);

        assert!(write_cubemap_dds(&directory.path().join("bad.dds"), &faces).is_err());
    }
}

use constants::texture::COOKIE_RESOLUTIONS;
use ies_photometry::{PhotometricProfile, PixelBuffer};
use std::path::PathBuf;

fn load(name: &str) -> PhotometricProfile {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    PhotometricProfile::from_file(path).unwrap()
}

fn is_grey_with_matching_alpha(buffer: &PixelBuffer) -> bool {
    buffer
        .as_bytes()
        .chunks_exact(4)
        .all(|pixel| pixel.iter().all(|&channel| channel == pixel[0]))
}

fn brightest(buffer: &PixelBuffer) -> u8 {
    buffer.as_bytes().iter().copied().max().unwrap_or(0)
}

#[test]
fn test_every_fixture_builds_every_projection() {
    let fixtures = [
        "recessed_downlight.ies",
        "pathway_type_a.ies",
        "wall_wash_type_b.ies",
        "legacy_1986.ies",
        "lm63_2019_quadrant.ies",
    ];

    for name in fixtures {
        let profile = load(name);

        let cylindrical = profile.build_cylindrical(64);
        assert_eq!((cylindrical.width(), cylindrical.height()), (128, 64));
        assert!(is_grey_with_matching_alpha(&cylindrical), "{}", name);
        assert!(brightest(&cylindrical) >= 240, "{} peak {}", name, brightest(&cylindrical));

        let gnomonic = profile.build_gnomonic(120.0, 64, true);
        assert_eq!((gnomonic.width(), gnomonic.height()), (64, 64));
        assert!(is_grey_with_matching_alpha(&gnomonic), "{}", name);

        let faces = profile.build_cubemap(32);
        for face in &faces {
            assert_eq!((face.width(), face.height()), (32, 32));
            assert!(is_grey_with_matching_alpha(face), "{}", name);
        }
    }
}

#[test]
fn test_downlight_peak_sits_at_the_texture_centre() {
    let profile = load("recessed_downlight.ies");
    let buffer = profile.build_cylindrical(128);

    // nadir: u = 0, v = 0
    let centre = buffer.intensity(128, 64);
    assert!(centre >= 250, "centre = {}", centre);
    // zenith wraps to the left and right edges
    assert_eq!(buffer.intensity(0, 64), 0);
    assert_eq!(buffer.intensity(255, 64), 0);
}

#[test]
fn test_downlight_spot_cookie_fades_outwards() {
    let profile = load("recessed_downlight.ies");
    let size = 67;
    let buffer = profile.build_gnomonic(120.0, size, false);

    let centre = size / 2;
    let mut previous = u8::MAX;
    for x in centre..size - 1 {
        let value = buffer.intensity(x, centre);
        assert!(value <= previous, "x = {}: {} > {}", x, value, previous);
        previous = value;
    }
    assert_eq!(buffer.intensity(centre, centre), 255);
    assert_eq!(buffer.intensity(size - 1, centre), 0);
}

#[test]
fn test_builds_are_deterministic() {
    let profile = load("wall_wash_type_b.ies");

    assert_eq!(profile.build_cylindrical(32), profile.build_cylindrical(32));
    assert_eq!(
        profile.build_gnomonic(90.0, 32, true),
        profile.build_gnomonic(90.0, 32, true)
    );
    assert_eq!(profile.build_cubemap(16), profile.build_cubemap(16));
}

#[test]
fn test_supported_resolutions() {
    let profile = load("legacy_1986.ies");

    for &resolution in COOKIE_RESOLUTIONS.iter().take_while(|&&r| r <= 256) {
        let buffer = profile.build_gnomonic(60.0, resolution, true);
        assert_eq!(buffer.as_bytes().len(), (resolution * resolution * 4) as usize);
    }
}

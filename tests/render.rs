use std::num::NonZeroUsize;
use std::path::PathBuf;

use text2png::{
    blank_canvas, rasterize, render, run, tone_map, Error, Face, FontSource, Hinting, Layout, RenderConfig, ToneMode,
    DEFAULT_FONT,
};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("text2png-it-{}-{name}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn config(text: &str, tone: ToneMode) -> RenderConfig {
    RenderConfig {
        text: text.to_owned(),
        tone,
        ..RenderConfig::default()
    }
}

#[test]
fn single_glyph_into_missing_directory() {
    let dir = scratch_dir("single");
    let config = RenderConfig {
        dst: dir.join("nested"),
        ..config("A", ToneMode::gamma(1.0).unwrap())
    };

    let path = run(&config).unwrap();
    assert_eq!(path, dir.join("nested/output_16pt_92dpi_gamma_1_dejavusans.png"));

    let entries: Vec<_> = std::fs::read_dir(dir.join("nested"))
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(entries, vec!["output_16pt_92dpi_gamma_1_dejavusans.png"]);

    let written = image::open(&path).unwrap().into_luma8();
    let rendered = render(&config).unwrap();
    assert_eq!(written, rendered.image);

    let (width, height) = written.dimensions();
    for (x, y) in [(0, 0), (width - 1, 0), (0, height - 1), (width - 1, height - 1)] {
        assert_eq!(written.get_pixel(x, y).0[0], 255);
    }
    assert!(written.pixels().any(|p| p.0[0] < 128), "no dark pixels for glyph");

    std::fs::remove_dir_all(dir).unwrap();
}

#[test]
fn zero_gamma_aborts_before_writing() {
    let dir = scratch_dir("zero-gamma");
    let config = RenderConfig {
        dst: dir.clone(),
        ..config("A", ToneMode::Gamma(0.0))
    };

    assert!(matches!(run(&config), Err(Error::InvalidGamma(_))));
    assert!(!dir.exists());
}

#[test]
fn empty_text_is_white_margin() {
    let rendered = render(&config("", ToneMode::Identity)).unwrap();
    let layout = rendered.layout;

    assert_eq!(layout.margin, 21);
    assert_eq!(layout.width, 2 * layout.margin);
    assert!(layout.height > 2 * layout.margin);
    assert_eq!(rendered.image.dimensions(), (layout.width, layout.height));
    assert!(rendered.image.pixels().all(|p| p.0[0] == 255));
}

#[test]
fn reruns_are_identical() {
    let config = config("This is a test", ToneMode::Srgb);
    let a = render(&config).unwrap();
    let b = render(&config).unwrap();
    assert_eq!(a.layout, b.layout);
    assert_eq!(a.image, b.image);
    assert_eq!(config.file_name(), "output_16pt_92dpi_srgb_dejavusans.png");
}

#[test]
fn unit_gamma_equals_identity() {
    let identity = render(&config("Gamma", ToneMode::Identity)).unwrap();
    let gamma = render(&config("Gamma", ToneMode::Gamma(1.0))).unwrap();
    assert_eq!(identity.image, gamma.image);
}

#[test]
fn tone_modes_share_geometry_and_background() {
    let identity = render(&config("Wig", ToneMode::Identity)).unwrap();
    for tone in [ToneMode::Srgb, ToneMode::Gamma(2.2), ToneMode::Gamma(0.45)] {
        let other = render(&config("Wig", tone)).unwrap();
        assert_eq!(other.layout, identity.layout);
        assert_eq!(other.image.get_pixel(0, 0).0[0], 255);
        assert!(other.image.pixels().any(|p| p.0[0] < 255), "{tone} drew nothing");
    }
}

#[test]
fn pipeline_stages_compose_to_render() {
    let config = RenderConfig {
        hinting: Hinting::None,
        parallelism: NonZeroUsize::new(3).unwrap(),
        ..config("Kerning AV", ToneMode::Gamma(2.2))
    };

    let face = Face::new(config.font.load().unwrap(), config.point_size, config.dpi, config.hinting).unwrap();
    let layout = Layout::compute(config.point_size, config.dpi, &face, &config.text).unwrap();
    let mut canvas = blank_canvas(&layout);
    rasterize(&mut canvas, &face, &layout, &config.text);

    for (x, y, p) in tone_map(&canvas, config.tone, config.parallelism).enumerate_pixels() {
        assert_eq!(p.0[0], config.tone.encode(canvas.get_pixel(x, y).0[0]));
    }
    assert_eq!(render(&config).unwrap().image, tone_map(&canvas, config.tone, config.parallelism));
}

#[test]
fn larger_size_gives_larger_image() {
    let small = render(&config("abc", ToneMode::Identity)).unwrap().layout;
    let large = render(&RenderConfig {
        point_size: 32.0,
        ..config("abc", ToneMode::Identity)
    })
    .unwrap()
    .layout;
    assert!(large.width > small.width);
    assert!(large.height > small.height);
    assert_eq!(large.margin, 41);
}

#[test]
fn font_file_names_the_output() {
    let dir = scratch_dir("font-file");
    std::fs::create_dir_all(&dir).unwrap();
    let font_path = dir.join("MyFont.ttf");
    std::fs::write(&font_path, DEFAULT_FONT).unwrap();

    let from_file = RenderConfig {
        font: FontSource::File(font_path),
        dst: dir.join("out"),
        ..config("Hi", ToneMode::Identity)
    };
    let embedded = render(&config("Hi", ToneMode::Identity)).unwrap();

    let path = run(&from_file).unwrap();
    assert_eq!(path.file_name().unwrap(), "output_16pt_92dpi_gamma_1_MyFont.png");
    assert_eq!(image::open(&path).unwrap().into_luma8(), embedded.image);

    std::fs::remove_dir_all(dir).unwrap();
}

#[test]
fn font_errors() {
    let dir = scratch_dir("font-errors");
    std::fs::create_dir_all(&dir).unwrap();
    let garbage = dir.join("garbage.ttf");
    std::fs::write(&garbage, b"definitely not a font").unwrap();

    let missing = RenderConfig {
        font: FontSource::File(dir.join("missing.ttf")),
        ..RenderConfig::default()
    };
    assert!(matches!(render(&missing), Err(Error::FontRead { .. })));

    let unparsable = RenderConfig {
        font: FontSource::File(garbage),
        ..RenderConfig::default()
    };
    assert!(matches!(render(&unparsable), Err(Error::FontParse { .. })));

    std::fs::remove_dir_all(dir).unwrap();
}

#[test]
fn non_positive_size_is_rejected() {
    let config = RenderConfig {
        point_size: 0.0,
        ..RenderConfig::default()
    };
    assert!(matches!(
        render(&config),
        Err(Error::InvalidParameter { name: "point size", .. })
    ));
}

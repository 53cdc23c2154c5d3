// tests/convert.rs
//
// End-to-end checks of the conversion pipeline, reading the compacted SVG
// back and comparing it with the source pixels.

use anyhow::Result;
use image::{Rgba, RgbaImage};
use rectsvg::color::Rgb;
use rectsvg::{Config, ConvertError, Converter};

/// A rectangle recovered from a compacted document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Sampled {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    fill: Rgb,
}

fn attribute<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    let key = format!(" {}=\"", name);
    let start = tag.find(&key)? + key.len();
    let len = tag[start..].find('"')?;
    Some(&tag[start..start + len])
}

fn parse_color(value: &str) -> Rgb {
    match value {
        "red" => Rgb::new(255, 0, 0),
        "white" => Rgb::new(255, 255, 255),
        "black" => Rgb::new(0, 0, 0),
        hex => Rgb::from_hex(hex).unwrap_or_else(|| panic!("bad color {:?}", hex)),
    }
}

/// Parses `<g fill="..."><rect .../>...</g>` groups. Missing numeric
/// attributes default to zero, as in SVG.
fn sample_document(document: &str) -> Vec<Sampled> {
    let mut rects = Vec::new();
    let mut fill = None;
    for tag in document.split('<').filter(|t| !t.is_empty()) {
        let tag = format!("<{}", tag);
        if tag.starts_with("<g ") {
            fill = attribute(&tag, "fill").map(parse_color);
        } else if tag.starts_with("</g") {
            fill = None;
        } else if tag.starts_with("<rect") {
            let number = |name: &str| {
                attribute(&tag, name).map_or(0, |v| v.parse::<u32>().expect("number"))
            };
            rects.push(Sampled {
                x: number("x"),
                y: number("y"),
                width: number("width"),
                height: number("height"),
                fill: attribute(&tag, "fill")
                    .map(parse_color)
                    .or(fill)
                    .expect("rect without fill"),
            });
        }
    }
    rects
}

fn sample_at(rects: &[Sampled], x: u32, y: u32) -> Vec<Rgb> {
    rects
        .iter()
        .filter(|r| x >= r.x && x < r.x + r.width && y >= r.y && y < r.y + r.height)
        .map(|r| r.fill)
        .collect()
}

/// Blocky test picture: colored bands, a transparent corner, some noise.
fn picture(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        if x < 3 && y < 2 {
            Rgba([0, 0, 0, 0])
        } else if (x * 7 + y * 3) % 13 == 0 {
            Rgba([0x12, 0x34, 0x56, 255])
        } else if y < height / 2 {
            Rgba([255, 0, 0, 255])
        } else if x % 4 < 2 {
            Rgba([255, 255, 255, 200])
        } else {
            Rgba([0, 0, 0, 255])
        }
    })
}

#[test_log::test]
fn compacted_documents_round_trip_every_opaque_pixel() {
    let image = picture(20, 12);
    let conversion = Converter::new(Config::default()).convert_image(&image);
    let rects = sample_document(conversion.document());
    assert_eq!(rects.len(), conversion.rects().len());

    for (x, y, px) in image.enumerate_pixels() {
        let hits = sample_at(&rects, x, y);
        if px[3] == 0 {
            assert!(hits.is_empty(), "transparent pixel ({}, {}) was drawn", x, y);
        } else {
            assert_eq!(hits, vec![Rgb::new(px[0], px[1], px[2])], "pixel ({}, {})", x, y);
        }
    }
}

#[test]
fn a_two_pixel_red_image_becomes_one_rectangle() {
    let image = RgbaImage::from_pixel(2, 1, Rgba([255, 0, 0, 255]));
    let conversion = Converter::new(Config::default()).convert_image(&image);
    assert_eq!(
        sample_document(conversion.document()),
        vec![Sampled {
            x: 0,
            y: 0,
            width: 2,
            height: 1,
            fill: Rgb::new(255, 0, 0)
        }]
    );
    assert!(conversion.document().contains("<g fill=\"red\">"));
}

#[test]
fn a_transparent_image_yields_a_well_formed_empty_document() {
    let image = RgbaImage::new(3, 3);
    let conversion = Converter::new(Config::default()).convert_image(&image);
    assert_eq!(conversion.stats().rectangles, 0);
    assert!(conversion.document().contains("<svg xmlns=\"http://www.w3.org/2000/svg\""));
    assert!(conversion.document().ends_with("</svg>"));
}

#[test]
fn single_pixel_mode_emits_one_rectangle_per_opaque_pixel() {
    let image = picture(9, 6);
    let opaque = image.pixels().filter(|p| p[3] != 0).count();
    let config = Config {
        single_pixel: true,
        ..Config::default()
    };
    let conversion = Converter::new(config).convert_image(&image);
    let rects = sample_document(conversion.document());
    assert_eq!(rects.len(), opaque);
    assert!(rects.iter().all(|r| r.width == 1 && r.height == 1));
}

#[test]
fn pink_mode_overrides_single_pixel_mode() {
    let image = RgbaImage::from_pixel(4, 4, Rgba([10, 20, 30, 255]));
    let config = Config {
        single_pixel: true,
        pink: true,
        ..Config::default()
    };
    let conversion = Converter::new(config).convert_image(&image);
    assert_eq!(conversion.rects().len(), 1);
    assert_eq!(conversion.rects()[0].fill, rectsvg::color::PINK);
}

#[test]
fn quantized_documents_use_at_most_4096_colors() {
    let image = RgbaImage::from_fn(64, 64, |x, y| Rgba([(x * 4) as u8, (y * 4) as u8, 77, 255]));
    let config = Config {
        quantize: true,
        ..Config::default()
    };
    let conversion = Converter::new(config).convert_image(&image);
    let rects = sample_document(conversion.document());
    for r in &rects {
        assert!(r.fill.has_shorthand(), "{:?} is not a palette color", r.fill);
    }
    // 64 distinct x values fall into 16 buckets, likewise for y.
    assert!(rects.len() <= 16 * 16, "got {} rectangles", rects.len());
}

#[test]
fn it_should_convert_a_png_file() -> Result<()> {
    let dir = std::env::temp_dir();
    let input = dir.join(format!("rectsvg-in-{}.png", std::process::id()));
    let output = dir.join(format!("rectsvg-out-{}.svg", std::process::id()));
    picture(8, 8).save(&input)?;

    let config = Config {
        output: output.to_string_lossy().into_owned(),
        ..Config::default()
    };
    let stats = Converter::new(config).run(&input)?;
    let written = std::fs::read_to_string(&output)?;
    std::fs::remove_file(&input)?;
    std::fs::remove_file(&output)?;

    assert_eq!(sample_document(&written).len(), stats.rectangles);
    assert!(!written.contains('\n'));
    Ok(())
}

#[test]
fn undecodable_input_is_a_decode_error() -> Result<()> {
    let input = std::env::temp_dir().join(format!("rectsvg-bad-{}.png", std::process::id()));
    std::fs::write(&input, b"definitely not a png")?;
    let err = Converter::new(Config::default()).run(&input).unwrap_err();
    std::fs::remove_file(&input)?;
    assert!(matches!(err, ConvertError::Decode { .. }));
    Ok(())
}

#[test]
fn missing_input_is_a_decode_error() {
    let err = Converter::new(Config::default())
        .convert_file(std::path::Path::new("/no/such/rectsvg/input.png"))
        .unwrap_err();
    assert!(matches!(err, ConvertError::Decode { .. }));
}

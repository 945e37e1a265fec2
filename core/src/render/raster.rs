use crate::math::PitchPoint;
use crate::prelude::{CoreError, CoreResult};
use crate::render::scene::{Anchor, Baseline, Label, PitchScene, StatMarker};
use crate::render::style::Rgb;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::f64::consts::PI;

/// File name the shot map is offered under.
pub const IMAGE_FILE_NAME: &str = "PlayerShots.png";
/// Resolution of the exported image.
pub const EXPORT_DPI: u32 = 300;

/// Visible window in pitch units. The lateral window is mirrored.
const VIEW_LATERAL: (f64, f64) = (108.0, -8.0);
const VIEW_DEPTH: (f64, f64) = (112.0, 45.0);
const PX_PER_UNIT: f64 = 16.0;

const SHOT_RADIUS_PX: f64 = 12.0;
const MARKER_RADIUS_PX: f64 = 90.0;
const LINE_WIDTH_PX: u32 = 4;
const METRES_PER_INCH: f64 = 0.0254;

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

fn render_err<E: std::fmt::Display>(err: E) -> CoreError {
    CoreError::Render(err.to_string())
}

/// Pixel size of the exported image.
pub fn canvas_size() -> (u32, u32) {
    let width = (VIEW_LATERAL.0 - VIEW_LATERAL.1) * PX_PER_UNIT;
    let height = (VIEW_DEPTH.0 - VIEW_DEPTH.1) * PX_PER_UNIT;
    (width.round() as u32, height.round() as u32)
}

fn to_px(point: PitchPoint) -> (i32, i32) {
    let px = (VIEW_LATERAL.0 - point.y) * PX_PER_UNIT;
    let py = (VIEW_DEPTH.0 - point.x) * PX_PER_UNIT;
    (px.round() as i32, py.round() as i32)
}

fn points_to_px(size: f64) -> f64 {
    size * EXPORT_DPI as f64 / 72.0
}

fn color(rgb: Rgb) -> RGBColor {
    RGBColor(rgb.r, rgb.g, rgb.b)
}

fn stroke(rgb: Rgb, alpha: f64, width: u32) -> ShapeStyle {
    ShapeStyle {
        color: color(rgb).mix(alpha),
        filled: false,
        stroke_width: width,
    }
}

fn fill(rgb: Rgb, alpha: f64) -> ShapeStyle {
    ShapeStyle {
        color: color(rgb).mix(alpha),
        filled: true,
        stroke_width: 1,
    }
}

/// Points along a circular arc in pitch units; angle 0 points toward goal.
fn arc(centre: PitchPoint, radius: f64, from: f64, to: f64, steps: usize) -> Vec<PitchPoint> {
    let steps = steps.max(1);
    (0..=steps)
        .map(|i| {
            let angle = from + (to - from) * i as f64 / steps as f64;
            PitchPoint::new(
                centre.x + radius * angle.cos(),
                centre.y + radius * angle.sin(),
            )
        })
        .collect()
}

/// Draws `scene` and returns PNG bytes tagged with [`EXPORT_DPI`].
pub fn render_png(scene: &PitchScene) -> CoreResult<Vec<u8>> {
    let (width, height) = canvas_size();
    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        draw_scene(&root, scene)?;
        root.present().map_err(render_err)?;
    }
    encode_png(width, height, &buffer, EXPORT_DPI)
}

/// RGB buffer to PNG with physical pixel density metadata.
pub fn encode_png(width: u32, height: u32, rgb: &[u8], dpi: u32) -> CoreResult<Vec<u8>> {
    let mut bytes = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut bytes, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let per_metre = (dpi as f64 / METRES_PER_INCH).round() as u32;
        encoder.set_pixel_dims(Some(png::PixelDimensions {
            xppu: per_metre,
            yppu: per_metre,
            unit: png::Unit::Meter,
        }));
        let mut writer = encoder.write_header().map_err(render_err)?;
        writer.write_image_data(rgb).map_err(render_err)?;
        writer.finish().map_err(render_err)?;
    }
    Ok(bytes)
}

fn draw_scene(root: &Area<'_>, scene: &PitchScene) -> CoreResult<()> {
    let foreground = scene.style.theme.foreground();
    let background = scene.style.theme.background();
    root.fill(&color(background)).map_err(render_err)?;
    draw_pitch(root, foreground)?;

    let Some(overlays) = &scene.overlays else {
        return Ok(());
    };

    for shot in scene.shots.iter().filter(|shot| !shot.goal) {
        draw_shot(root, shot.at, foreground, 0.15, false)?;
    }
    for shot in scene.shots.iter().filter(|shot| shot.goal) {
        draw_shot(root, shot.at, scene.style.player_color, 0.5, true)?;
    }

    let ring = &overlays.ring;
    let outline = arc(ring.centre, ring.radius, 0.0, 2.0 * PI, 180);
    for segment in outline.chunks(2).step_by(2) {
        let path: Vec<(i32, i32)> = segment.iter().map(|p| to_px(*p)).collect();
        root.draw(&PathElement::new(path, stroke(foreground, 0.5, LINE_WIDTH_PX)))
            .map_err(render_err)?;
    }
    draw_arrow(root, ring.arrow_from, ring.arrow_to, scene.style.player_color)?;
    draw_label(root, &ring.value)?;
    draw_label(root, &ring.caption)?;

    for marker in &overlays.markers {
        draw_marker(root, marker, foreground, background)?;
    }

    draw_label(root, &overlays.title)?;
    draw_label(root, &overlays.subtitle)?;
    draw_label(root, &overlays.credit)?;
    Ok(())
}

fn draw_pitch(root: &Area<'_>, line: Rgb) -> CoreResult<()> {
    let style = stroke(line, 0.5, LINE_WIDTH_PX);
    let boxes = [
        (PitchPoint::new(50.0, 0.0), PitchPoint::new(100.0, 100.0)),
        (PitchPoint::new(83.0, 21.1), PitchPoint::new(100.0, 78.9)),
        (PitchPoint::new(94.2, 36.8), PitchPoint::new(100.0, 63.2)),
        (PitchPoint::new(100.0, 45.2), PitchPoint::new(101.9, 54.8)),
    ];
    for (low, high) in boxes {
        root.draw(&Rectangle::new([to_px(high), to_px(low)], style))
            .map_err(render_err)?;
    }

    let spot = PitchPoint::new(88.5, 50.0);
    root.draw(&Circle::new(to_px(spot), 5u32, fill(line, 0.5)))
        .map_err(render_err)?;

    let centre_arc = arc(PitchPoint::new(50.0, 50.0), 9.15, -PI / 2.0, PI / 2.0, 60);
    let cutoff = ((83.0 - 88.5) / 9.15f64).acos();
    let penalty_arc = arc(spot, 9.15, cutoff, 2.0 * PI - cutoff, 60);
    for curve in [centre_arc, penalty_arc] {
        let path: Vec<(i32, i32)> = curve.into_iter().map(to_px).collect();
        root.draw(&PathElement::new(path, style)).map_err(render_err)?;
    }
    Ok(())
}

/// Open circle; goals get diagonal hatching inside the outline.
fn draw_shot(
    root: &Area<'_>,
    at: PitchPoint,
    rgb: Rgb,
    alpha: f64,
    hatched: bool,
) -> CoreResult<()> {
    let (cx, cy) = to_px(at);
    root.draw(&Circle::new(
        (cx, cy),
        SHOT_RADIUS_PX as u32,
        stroke(rgb, alpha, 2),
    ))
    .map_err(render_err)?;

    if hatched {
        let diag = std::f64::consts::FRAC_1_SQRT_2;
        for step in -3..=3 {
            let offset = step as f64 * SHOT_RADIUS_PX / 4.0;
            let half = (SHOT_RADIUS_PX.powi(2) - offset.powi(2)).max(0.0).sqrt();
            let (ox, oy) = (cx as f64 + offset * diag, cy as f64 + offset * diag);
            let from = ((ox - half * diag).round() as i32, (oy + half * diag).round() as i32);
            let to = ((ox + half * diag).round() as i32, (oy - half * diag).round() as i32);
            root.draw(&PathElement::new(vec![from, to], stroke(rgb, alpha, 1)))
                .map_err(render_err)?;
        }
    }
    Ok(())
}

fn draw_arrow(root: &Area<'_>, from: PitchPoint, to: PitchPoint, rgb: Rgb) -> CoreResult<()> {
    let (x0, y0) = to_px(from);
    let (x1, y1) = to_px(to);
    let length = (((x1 - x0).pow(2) + (y1 - y0).pow(2)) as f64).sqrt();
    if length < 1.0 {
        return Ok(());
    }
    let (ux, uy) = ((x1 - x0) as f64 / length, (y1 - y0) as f64 / length);

    let dash = 24.0;
    let mut travelled = 0.0;
    while travelled < length {
        let end = (travelled + dash * 0.6).min(length);
        let a = (x0 + (ux * travelled) as i32, y0 + (uy * travelled) as i32);
        let b = (x0 + (ux * end) as i32, y0 + (uy * end) as i32);
        root.draw(&PathElement::new(vec![a, b], stroke(rgb, 1.0, 3)))
            .map_err(render_err)?;
        travelled += dash;
    }

    let head = 28.0;
    let base = (x1 as f64 - ux * head, y1 as f64 - uy * head);
    let wing = head * 0.4;
    let left = ((base.0 - uy * wing) as i32, (base.1 + ux * wing) as i32);
    let right = ((base.0 + uy * wing) as i32, (base.1 - ux * wing) as i32);
    root.draw(&PathElement::new(
        vec![left, (x1, y1), right, left],
        stroke(rgb, 1.0, 3),
    ))
    .map_err(render_err)?;
    Ok(())
}

fn draw_marker(
    root: &Area<'_>,
    marker: &StatMarker,
    line: Rgb,
    background: Rgb,
) -> CoreResult<()> {
    let (cx, cy) = to_px(marker.at);
    let hexagon: Vec<(i32, i32)> = (0..6)
        .map(|i| {
            let angle = PI / 2.0 + i as f64 * PI / 3.0;
            (
                cx + (MARKER_RADIUS_PX * angle.cos()).round() as i32,
                cy - (MARKER_RADIUS_PX * angle.sin()).round() as i32,
            )
        })
        .collect();

    root.draw(&Polygon::new(hexagon.clone(), fill(background, 1.0)))
        .map_err(render_err)?;
    for i in 0..6 {
        let a = hexagon[i];
        let b = hexagon[(i + 1) % 6];
        let mid = ((a.0 + b.0) / 2, (a.1 + b.1) / 2);
        root.draw(&PathElement::new(vec![a, mid], stroke(line, 0.5, 3)))
            .map_err(render_err)?;
    }

    draw_label(root, &marker.value)?;
    draw_label(root, &marker.caption)
}

fn draw_label(root: &Area<'_>, label: &Label) -> CoreResult<()> {
    let size = points_to_px(label.size);
    let anchor = match label.anchor {
        Anchor::Left => HPos::Left,
        Anchor::Centre => HPos::Center,
        Anchor::Right => HPos::Right,
    };
    let (x, y) = to_px(label.at);
    let lines: Vec<&str> = label.text.lines().collect();
    let line_height = (size * 1.2).round() as i32;
    let first_y = match label.baseline {
        Baseline::Top => y,
        Baseline::Middle => y - line_height * (lines.len() as i32 - 1) / 2,
    };
    let vpos = match label.baseline {
        Baseline::Top => VPos::Top,
        Baseline::Middle => VPos::Center,
    };

    for (row, text) in lines.iter().enumerate() {
        let style = FontDesc::new(FontFamily::SansSerif, size, FontStyle::Bold)
            .color(&color(label.color))
            .pos(Pos::new(anchor, vpos));
        root.draw(&Text::new(
            text.to_string(),
            (x, first_y + line_height * row as i32),
            style,
        ))
        .map_err(render_err)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::style::{RenderStyle, Theme};
    use crate::shots::fixtures::{at, goal, shot};
    use crate::shots::ShotEvent;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn goal_centre_sits_on_the_top_edge_of_the_pitch() {
        let (x, y) = to_px(PitchPoint::new(100.0, 50.0));
        let (width, _) = canvas_size();
        assert_eq!(x, (58.0 * PX_PER_UNIT) as i32);
        assert_eq!(y, (12.0 * PX_PER_UNIT) as i32);
        assert!(x > 0 && (x as u32) < width);
    }

    #[test]
    fn lateral_axis_is_mirrored() {
        let (left, _) = to_px(PitchPoint::new(60.0, 90.0));
        let (right, _) = to_px(PitchPoint::new(60.0, 10.0));
        assert!(left < right);
    }

    #[test]
    fn empty_scene_renders_a_png() {
        let scene = PitchScene::empty(RenderStyle::new(
            crate::render::style::DEFAULT_PLAYER_COLOR,
            Theme::Light,
        ));
        let bytes = render_png(&scene).unwrap();
        assert_eq!(&bytes[..8], &PNG_SIGNATURE);
    }

    #[test]
    fn encoded_png_carries_300_dpi() {
        let bytes = encode_png(2, 1, &[0, 0, 0, 255, 255, 255], EXPORT_DPI).unwrap();
        let decoder = png::Decoder::new(bytes.as_slice());
        let reader = decoder.read_info().unwrap();
        let dims = reader.info().pixel_dims.unwrap();
        assert_eq!(dims.xppu, 11811);
        assert_eq!(dims.unit, png::Unit::Meter);
        assert_eq!(reader.info().width, 2);
    }

    fn decode(bytes: &[u8]) -> (u32, u32, u32) {
        let reader = png::Decoder::new(bytes).read_info().unwrap();
        let info = reader.info();
        (info.width, info.height, info.pixel_dims.unwrap().xppu)
    }

    #[test]
    fn scene_with_shots_and_overlays_renders_at_canvas_size() {
        let shots: Vec<ShotEvent> = vec![
            at(shot(2097, 2018, "Drawing"), 0.88, 0.42),
            at(goal(2097, 2019, "Winning"), 0.93, 0.55),
            at(shot(2097, 2019, "Losing"), 0.76, 0.61),
        ];
        let view: Vec<&ShotEvent> = shots.iter().collect();
        let scene = PitchScene::build(&view, RenderStyle::default()).unwrap();
        assert!(scene.overlays.is_some());

        let bytes = render_png(&scene).unwrap();
        assert_eq!(&bytes[..8], &PNG_SIGNATURE);
        let (width, height) = canvas_size();
        assert_eq!(decode(&bytes), (width, height, 11811));
    }

    #[test]
    fn ring_larger_than_the_view_still_renders() {
        let shots: Vec<ShotEvent> = vec![at(shot(2097, 2018, "Drawing"), 0.0, 0.0)];
        let view: Vec<&ShotEvent> = shots.iter().collect();
        let style = RenderStyle::new(crate::render::style::DEFAULT_PLAYER_COLOR, Theme::Light);
        let scene = PitchScene::build(&view, style).unwrap();

        let bytes = render_png(&scene).unwrap();
        let (width, height) = canvas_size();
        assert_eq!(decode(&bytes), (width, height, 11811));
    }
}

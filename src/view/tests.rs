use super::*;
use crate::config::toml::parse_from_str;
use crate::shape::ShapeMode;
use image::Rgba;
use resvg::usvg::fontdb;
use std::path::Path;
use std::sync::Arc;

const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
const GREEN: Rgba<u8> = Rgba([0, 255, 0, 255]);
const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

fn test_view(raw: &str) -> AvatarView {
    let config: ViewConfig =
        parse_from_str(Path::new("test.toml"), raw).expect("test config should parse");
    let text = TextRasterizer::new(Arc::new(fontdb::Database::new()));
    AvatarView::with_text_rasterizer(&config, text).expect("view should build")
}

fn solid(color: Rgba<u8>) -> RgbaImage {
    RgbaImage::from_pixel(16, 16, color)
}

#[test]
fn single_avatar_fills_the_circle() {
    let mut view = test_view("");
    assert_eq!(view.avatars_count(), 1);
    assert!(view.add_bitmap(solid(GREEN)));
    assert!(view.raster().pixels().all(|pixel| *pixel == GREEN));

    let snapshot = view.snapshot().expect("snapshot should render");
    assert_eq!(snapshot.dimensions(), (100, 100));
    assert_eq!(*snapshot.get_pixel(50, 50), GREEN);
    assert_eq!(snapshot.get_pixel(1, 1)[3], 0);
}

#[test]
fn three_avatars_scenario() {
    let mut view = test_view("avatars_count = 3\nshape = \"rounded_rect\"\ncorner_radius = 0\n");
    assert!(!view.add_bitmap_at(0, solid(RED)));
    assert!(!view.add_bitmap_at(1, solid(GREEN)));
    assert!(view.add_bitmap_at(2, solid(BLUE)));
    assert_eq!(view.render_count(), 1);

    let snapshot = view.snapshot().expect("snapshot should render");
    assert_eq!(*snapshot.get_pixel(0, 0), RED);
    assert_eq!(*snapshot.get_pixel(25, 99), RED);
    assert_eq!(*snapshot.get_pixel(75, 25), GREEN);
    assert_eq!(*snapshot.get_pixel(75, 75), BLUE);
    assert_eq!(*snapshot.get_pixel(50, 25), WHITE);
    assert_eq!(*snapshot.get_pixel(75, 50), WHITE);
}

#[test]
fn render_marks_the_view_for_redraw() {
    let mut view = test_view("avatars_count = 2");
    assert!(!view.take_invalidation());
    view.add_bitmap_at(0, solid(RED));
    assert!(!view.take_invalidation());
    view.add_bitmap_at(1, solid(BLUE));
    assert!(view.take_invalidation());
    assert!(!view.take_invalidation());
}

#[test]
fn duplicate_key_does_not_render_early() {
    let mut view = test_view("avatars_count = 2");
    view.add_bitmap(solid(RED));
    view.add_bitmap(solid(GREEN));
    assert_eq!(view.render_count(), 0);
    view.add_bitmap_at(3, solid(GREEN));
    assert_eq!(view.render_count(), 1);
    assert_eq!(*view.raster().get_pixel(50, 50), RED);
}

#[test]
fn clear_resets_slots_and_status_but_keeps_the_raster() {
    let mut view = test_view("online = true\nwith_status = true\n");
    assert!(view.online());
    view.add_bitmap(solid(RED));
    view.take_invalidation();

    view.clear();
    assert!(!view.online());
    assert!(view.take_invalidation());
    assert_eq!(*view.raster().get_pixel(10, 10), RED);

    assert!(view.add_bitmap(solid(BLUE)));
    assert_eq!(view.render_count(), 2);
    assert_eq!(*view.raster().get_pixel(10, 10), BLUE);
}

#[test]
fn status_color_is_the_only_difference_between_online_and_offline() {
    let mut view = test_view("density = 4\nwith_status = true\n");
    view.add_bitmap(solid(BLUE));

    view.set_online(true);
    let online = view.snapshot().expect("online snapshot");
    view.set_online(false);
    let offline = view.snapshot().expect("offline snapshot");

    let (x, y) = view.status_position();
    let (cx, cy) = (x as u32, y as u32);
    assert_eq!(*online.get_pixel(cx, cy), GREEN);
    assert_eq!(*offline.get_pixel(cx, cy), Rgba([0x88, 0x88, 0x88, 0xff]));

    // Stroke band beyond the fill radius (20 px at density 4).
    for (px, py) in [(cx + 21, cy), (cx - 21, cy), (cx, cy - 21)] {
        assert_eq!(online.get_pixel(px, py), offline.get_pixel(px, py));
    }
    // Far from the dot nothing changes.
    assert_eq!(online.get_pixel(200, 200), offline.get_pixel(200, 200));
}

#[test]
fn status_toggle_does_not_touch_the_raster() {
    let mut view = test_view("");
    view.add_bitmap(solid(RED));
    let before = view.raster().clone();
    let renders = view.render_count();

    view.set_with_status(true);
    assert!(view.take_invalidation());
    view.set_online(true);
    assert!(view.take_invalidation());

    assert_eq!(*view.raster(), before);
    assert_eq!(view.render_count(), renders);
}

#[test]
fn hidden_status_is_not_drawn() {
    let mut view = test_view("density = 4\n");
    view.add_bitmap(solid(BLUE));
    let (x, y) = view.status_position();
    let hidden = view.snapshot().expect("snapshot");
    view.set_with_status(true);
    let shown = view.snapshot().expect("snapshot");
    assert_ne!(
        hidden.get_pixel(x as u32, y as u32),
        shown.get_pixel(x as u32, y as u32)
    );
}

#[test]
fn measure_moves_the_status_dot() {
    let mut view = test_view("margin = 5\n");
    let expected = 90.0 * crate::status::STATUS_POSITION_RATIO;
    assert_eq!(view.status_position(), (expected, expected));

    view.measure(210, 110);
    assert_eq!(view.size(), (210, 110));
    assert_eq!(
        view.status_position(),
        (
            200.0 * crate::status::STATUS_POSITION_RATIO,
            100.0 * crate::status::STATUS_POSITION_RATIO
        )
    );
}

#[test]
fn avatars_count_setter_clamps() {
    let mut view = test_view("");
    view.set_avatars_count(Some(12));
    assert_eq!(view.avatars_count(), 4);
    view.set_avatars_count(None);
    assert_eq!(view.avatars_count(), 1);
}

#[test]
fn text_avatar_uses_the_background_color() {
    let mut view = test_view("margin = 10\n");
    let rendered = view
        .add_text_bitmap("JD", BLUE)
        .expect("text avatar should render");
    assert!(rendered);
    assert_eq!(view.raster().dimensions(), (80, 80));
    assert_eq!(*view.raster().get_pixel(1, 1), BLUE);
}

#[test]
fn arc_shape_hides_the_right_half() {
    let mut view = test_view("shape = \"arc\"\n");
    assert_eq!(view.background().style().shape, ShapeMode::Arc);
    view.add_bitmap(solid(RED));
    let snapshot = view.snapshot().expect("snapshot");
    assert_eq!(*snapshot.get_pixel(25, 50), RED);
    assert_eq!(snapshot.get_pixel(75, 50)[3], 0);
}

#[test]
fn huge_configured_size_is_an_error() {
    let config: ViewConfig = parse_from_str(Path::new("huge.toml"), "width = 1e12\nheight = 1e12\n")
        .expect("huge size should still parse");
    let text = TextRasterizer::new(Arc::new(fontdb::Database::new()));
    let err = AvatarView::with_text_rasterizer(&config, text).expect_err("huge view should fail");
    assert!(err.to_string().contains("composite raster"), "{err}");
}

#[test]
fn hidden_background_still_shows_the_status_dot() {
    let mut view = test_view("with_status = true\nonline = true\n");
    view.add_bitmap(solid(RED));
    view.background_mut().set_alpha(0);

    let snapshot = view.snapshot().expect("snapshot should render");
    let (x, y) = view.status_position();
    assert_eq!(snapshot.get_pixel(50, 50)[3], 0);
    assert_eq!(*snapshot.get_pixel(x as u32, y as u32), GREEN);
}

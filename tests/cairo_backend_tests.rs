#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use futures::executor::block_on;
use theft_chart::ChartError;
use theft_chart::api::{ChartConfig, ChartController};
use theft_chart::data::StaticFetcher;
use theft_chart::render::{CairoRenderer, Color, RenderFrame};

fn buffalo_body() -> String {
    let mut body = String::from("ct,month\n");
    for index in 0..24_u32 {
        let year = 2020 + index / 12;
        let month = index % 12 + 1;
        body.push_str(&format!("{},{year}-{month:02}-01T00:00:00.000\n", 30 + index));
    }
    body
}

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 300).expect_err("invalid width must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn cairo_renderer_draws_chart_frame() {
    let config = ChartConfig::default();
    let buffalo_url = config
        .cities
        .iter()
        .find(|city| city.id.as_str() == "buffalo")
        .map(|city| city.url.clone())
        .expect("buffalo source");
    let fetcher = StaticFetcher::new().with_body(buffalo_url, buffalo_body());

    let renderer = CairoRenderer::new(960, 300).expect("renderer");
    let mut controller = ChartController::new(renderer, config).expect("controller init");
    block_on(controller.start(&fetcher)).expect("start");

    let frame = controller.last_frame().expect("frame").clone();
    let stats = controller.into_renderer().last_stats();
    assert_eq!(stats.polylines_drawn, 1);
    assert_eq!(stats.rects_drawn, 3);
    assert_eq!(stats.lines_drawn, frame.lines.len());
    assert_eq!(stats.texts_drawn, frame.texts.len());
}

#[test]
fn cairo_renderer_draws_on_external_context() {
    let surface = ImageSurface::create(Format::ARgb32, 200, 100).expect("surface");
    let context = Context::new(&surface).expect("context");
    let mut renderer = CairoRenderer::new(200, 100).expect("renderer");

    let frame = RenderFrame::new(theft_chart::core::Viewport::new(200, 100));
    renderer
        .render_on_context(&context, &frame)
        .expect("render on context");
    assert_eq!(renderer.last_stats().polylines_drawn, 0);
}

#[test]
fn cairo_renderer_rejects_invalid_background() {
    let mut renderer = CairoRenderer::new(200, 100).expect("renderer");
    assert!(renderer.set_background(Color::rgb(2.0, 0.0, 0.0)).is_err());
    assert!(renderer.set_background(Color::rgb(0.1, 0.1, 0.1)).is_ok());
}

use theft_chart::api::{ChartConfig, ChartController};
use theft_chart::data::HttpFetcher;
use theft_chart::render::NullRenderer;
use theft_chart::telemetry::init_default_tracing;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = init_default_tracing();

    let config = match std::env::args().nth(1) {
        Some(path) => ChartConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        None => ChartConfig::default(),
    };
    let fetcher = HttpFetcher::new(config.request_timeout())?;
    let mut chart = ChartController::new(NullRenderer::default(), config)?;

    chart.start(&fetcher).await?;
    for (city, load) in chart.cache().iter() {
        println!("{city}: settled={} ready={}", load.is_settled(), load.series().is_some());
    }

    chart.shift_year(2)?;
    chart.toggle_city("norfolk")?;
    chart.toggle_per_capita()?;

    let controls = chart.controls();
    println!("{}", controls.title);
    if let Some(domains) = chart.domains() {
        println!("value domain: {:?}", domains.value_domain());
    }
    if let Some(frame) = chart.last_frame() {
        println!(
            "frame primitives: polylines={} lines={} rects={} texts={}",
            frame.polylines.len(),
            frame.lines.len(),
            frame.rects.len(),
            frame.texts.len()
        );
    }

    Ok(())
}

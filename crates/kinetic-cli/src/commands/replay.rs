use std::path::Path;

use anyhow::{Context, Result};

use kinetic_core::{AppConfig, Frame, GestureTrace, Replayer};

pub async fn run(
    config: &AppConfig,
    trace_path: &Path,
    fps: u32,
    json: bool,
    realtime: bool,
) -> Result<()> {
    let trace = GestureTrace::load(trace_path)
        .with_context(|| format!("Failed to load trace {}", trace_path.display()))?;

    let replayer = Replayer::new(fps);
    let mut interval = realtime.then(|| tokio::time::interval(replayer.frame_interval()));

    if !json {
        println!("{:>9}  {:>10}  {:<9}  {:>4}", "time(ms)", "offset", "state", "page");
    }

    let mut last: Option<Frame> = None;
    let mut count = 0usize;
    for frame in replayer.session(&trace, &config.scroll) {
        if let Some(interval) = interval.as_mut() {
            interval.tick().await;
        }

        if json {
            println!("{}", serde_json::to_string(&frame)?);
        } else {
            println!(
                "{:>9.1}  {:>10.2}  {:<9}  {:>4}",
                frame.at_ms,
                frame.offset,
                frame.state.as_str(),
                frame.page
            );
        }

        count += 1;
        last = Some(frame);
    }

    if !json {
        if let Some(frame) = last {
            println!(
                "\n{} frames at {} fps, settled at offset {:.2} on page {} ({})",
                count,
                replayer.fps(),
                frame.offset,
                frame.page,
                frame.state.as_str()
            );
        }
    }

    Ok(())
}

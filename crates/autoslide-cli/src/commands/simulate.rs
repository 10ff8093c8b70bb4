//! Implementation of the `autoslide simulate` command.

use autoslide_adapters::{Script, ScriptAction, ScrollCommand, Simulation, SimulationReport};
use autoslide_core::domain::{CarouselConfig, SlideSet};
use tracing::{debug, instrument};

use crate::{
    cli::{ReportFormat, SimulateArgs},
    commands::report_format,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(slides = args.slides.len()))]
pub fn execute(args: SimulateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let carousel = resolve_config(&args, &config)?;
    let script = build_script(&args)?;
    debug!(actions = script.len(), ?carousel, "Script built");

    let slides = SlideSet::new(args.slides.iter().map(|s| s.trim()).filter(|s| !s.is_empty()));
    let mut simulation =
        Simulation::new(slides, carousel, args.width)?.reject_offsets(args.reject_offsets);
    for &index in &args.reject_index {
        simulation = simulation.reject_index(index);
    }

    let report = simulation.run(&script, args.until)?;

    match report_format(args.format, &output) {
        ReportFormat::Json => output.json(&report)?,
        ReportFormat::Table => render_table(&report, &args, &output)?,
    }
    Ok(())
}

/// Config file and environment values, then per-run flag overrides.
fn resolve_config(args: &SimulateArgs, config: &AppConfig) -> CliResult<CarouselConfig> {
    let mut builder = config.carousel.builder();
    if let Some(tick) = args.tick {
        builder = builder.tick_interval(tick);
    }
    if let Some(cooldown) = args.cooldown {
        builder = builder.cooldown(cooldown);
    }
    if let Some(settle) = args.settle_delay {
        builder = builder.settle_delay(settle);
    }
    Ok(builder.build()?)
}

fn build_script(args: &SimulateArgs) -> CliResult<Script> {
    let mut script = Script::new();
    for drag in &args.drags {
        script = script.drag(drag.start, drag.end, drag.to_index)?;
    }
    for reset in &args.resets {
        script.push(reset.at, ScriptAction::ReplaceSlides(reset.slides.clone()));
    }
    for layout in &args.layouts {
        script.push(
            layout.at,
            ScriptAction::Layout {
                slide_width: layout.slide_width,
            },
        );
    }
    if let Some(at) = args.unmount_at {
        script.push(at, ScriptAction::Unmount);
    }
    Ok(script)
}

fn render_table(report: &SimulationReport, args: &SimulateArgs, output: &OutputManager) -> CliResult<()> {
    output.header(&format!(
        "Timeline ({} slides, {}px, until {})",
        report.timeline.first().map_or(0, |e| e.snapshot.slide_count),
        args.width,
        format_ms(args.until.as_millis() as u64),
    ))?;

    for entry in &report.timeline {
        let snap = &entry.snapshot;
        let line = format!(
            "{:>9}  {:<15} {}  {:<13} {}",
            format_ms(snap.at_ms),
            entry.trigger,
            dots(snap.current_index, snap.dot_count()),
            snap.interaction.to_string(),
            snap.current_slide.as_deref().unwrap_or("-"),
        );
        output.print(&line)?;
    }

    if args.show_commands {
        output.header("Scroll commands")?;
        for command in &report.commands {
            let line = match command {
                ScrollCommand::ToIndex {
                    index,
                    animated,
                    accepted,
                } => format!("  to-index  {index:<8} animated={animated:<5} accepted={accepted}"),
                ScrollCommand::ToOffset {
                    offset,
                    animated,
                    accepted,
                } => format!("  to-offset {offset:<8} animated={animated:<5} accepted={accepted}"),
            };
            if command.accepted() {
                output.print(&line)?;
            } else {
                output.dim(&line)?;
            }
        }
    }

    let last = &report.final_snapshot;
    output.info(&format!(
        "Final index {} of {} ({}), ticker {}",
        last.current_index,
        last.slide_count,
        last.current_slide.as_deref().unwrap_or("no slides"),
        if last.ticker_armed { "armed" } else { "idle" },
    ))?;
    output.dim(&format!(
        "timers: {} armed, {} cancelled, {} fired, at most {} repeating",
        report.stats.armed,
        report.stats.cancelled,
        report.stats.fired,
        report.stats.max_live_repeating,
    ))?;
    Ok(())
}

/// `12.5s`-style stamp with millisecond precision.
fn format_ms(ms: u64) -> String {
    format!("{}.{:03}s", ms / 1_000, ms % 1_000)
}

/// Pagination dots; the current page is filled.
fn dots(current: usize, count: usize) -> String {
    (0..count)
        .map(|i| if i == current { '●' } else { '○' })
        .collect()
}

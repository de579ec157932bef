use std::fs;
use std::path::{Path, PathBuf};

use classroom_charts::api::{
    DashboardSnapshot, DisasterTimelineView, LeaderDashboard, LeaderDashboardConfig, TrialsView,
    ViewId,
};
use classroom_charts::charts::{
    ChartConfig, ChartConfigOverrides, DisasterTimeline, TimelineOptions, TrialScatterplot,
};
use classroom_charts::data::{load_disasters, load_leaders, load_trials};
use classroom_charts::render::{RenderFrame, Renderer, SvgRenderer};
use classroom_charts::telemetry::init_default_tracing;
use indexmap::IndexMap;
use tracing::{error, info};

const USAGE: &str = "usage: render_exercise <trials|timeline|leaders> --input <csv> --output <dir> [--config <json>] [--group <name>] [--json]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Exercise {
    Trials,
    Timeline,
    Leaders,
}

#[derive(Debug)]
struct CliArgs {
    exercise: Exercise,
    input: PathBuf,
    output: PathBuf,
    config: Option<PathBuf>,
    group: Option<String>,
    json: bool,
}

/// Per-view config overrides, keyed by view name (`trials`, `bar_chart`, ...).
type ConfigFile = IndexMap<ViewId, ChartConfigOverrides>;

fn main() {
    let _ = init_default_tracing();
    if let Err(err) = run() {
        error!(error = %err, "render_exercise failed");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let overrides = match &args.config {
        Some(path) => read_config(path)?,
        None => ConfigFile::new(),
    };
    let resolve = |view: ViewId, defaults: ChartConfig| match overrides.get(&view) {
        Some(entry) => entry.resolve(defaults),
        None => defaults,
    };

    let (frames, snapshot) = match args.exercise {
        Exercise::Trials => {
            let records = load_trials(&args.input).map_err(|err| load_error(&args.input, &err))?;
            let config = resolve(ViewId::Trials, TrialScatterplot::default_config());
            let view = TrialsView::with_config(config, records).map_err(|err| err.to_string())?;
            (
                vec![(ViewId::Trials, view.frame().clone())],
                view.snapshot(),
            )
        }
        Exercise::Timeline => {
            let records =
                load_disasters(&args.input).map_err(|err| load_error(&args.input, &err))?;
            let config = resolve(ViewId::Timeline, DisasterTimeline::default_config());
            let view = DisasterTimelineView::with_config(config, records, TimelineOptions::default())
                .map_err(|err| err.to_string())?;
            (
                vec![(ViewId::Timeline, view.frame().clone())],
                view.snapshot(),
            )
        }
        Exercise::Leaders => {
            let records = load_leaders(&args.input).map_err(|err| load_error(&args.input, &err))?;
            let defaults = LeaderDashboardConfig::default();
            let config = LeaderDashboardConfig {
                group: args.group.clone().unwrap_or(defaults.group),
                bar_chart: resolve(ViewId::BarChart, defaults.bar_chart),
                scatterplot: resolve(ViewId::Scatterplot, defaults.scatterplot),
                lexis: resolve(ViewId::Lexis, defaults.lexis),
            };
            let dashboard =
                LeaderDashboard::with_config(config, records).map_err(|err| err.to_string())?;
            let frames = dashboard
                .frames()
                .into_iter()
                .map(|(view, frame)| (view, frame.clone()))
                .collect();
            (frames, dashboard.snapshot())
        }
    };

    fs::create_dir_all(&args.output)
        .map_err(|err| format!("failed to create `{}`: {err}", args.output.display()))?;
    for (view, frame) in &frames {
        write_svg(&args.output, *view, frame)?;
    }
    if args.json {
        write_snapshot(&args.output, &snapshot)?;
    }
    Ok(())
}

fn load_error(path: &Path, err: &classroom_charts::ChartError) -> String {
    format!("failed to load `{}`: {err}", path.display())
}

fn read_config(path: &Path) -> Result<ConfigFile, String> {
    let raw = fs::read_to_string(path)
        .map_err(|err| format!("failed to read `{}`: {err}", path.display()))?;
    serde_json::from_str(&raw).map_err(|err| format!("invalid config json: {err}"))
}

fn write_svg(dir: &Path, view: ViewId, frame: &RenderFrame) -> Result<(), String> {
    let mut renderer = SvgRenderer::default();
    renderer.render(frame).map_err(|err| err.to_string())?;
    let path = dir.join(format!("{}.svg", view.as_str()));
    fs::write(&path, renderer.document())
        .map_err(|err| format!("failed to write `{}`: {err}", path.display()))?;
    info!(
        view = view.as_str(),
        marks = frame.marks.len(),
        skipped = renderer.skipped_marks(),
        path = %path.display(),
        "wrote svg"
    );
    Ok(())
}

fn write_snapshot(dir: &Path, snapshot: &DashboardSnapshot) -> Result<(), String> {
    let json = snapshot
        .to_json_contract_v1_pretty()
        .map_err(|err| err.to_string())?;
    let path = dir.join("snapshot.json");
    fs::write(&path, json).map_err(|err| format!("failed to write `{}`: {err}", path.display()))?;
    info!(path = %path.display(), "wrote snapshot");
    Ok(())
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let exercise = match args.next().as_deref() {
        Some("trials") => Exercise::Trials,
        Some("timeline") => Exercise::Timeline,
        Some("leaders") => Exercise::Leaders,
        _ => return Err(USAGE.to_owned()),
    };

    let mut input = None::<PathBuf>;
    let mut output = None::<PathBuf>;
    let mut config = None::<PathBuf>;
    let mut group = None::<String>;
    let mut json = false;

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--input" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --input".to_owned())?;
                input = Some(PathBuf::from(value));
            }
            "--output" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output".to_owned())?;
                output = Some(PathBuf::from(value));
            }
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --config".to_owned())?;
                config = Some(PathBuf::from(value));
            }
            "--group" => {
                group = Some(
                    args.next()
                        .ok_or_else(|| "missing value for --group".to_owned())?,
                );
            }
            "--json" => json = true,
            "--help" | "-h" => return Err(USAGE.to_owned()),
            other => return Err(format!("unknown argument `{other}`\n{USAGE}")),
        }
    }

    Ok(CliArgs {
        exercise,
        input: input.ok_or_else(|| format!("missing --input\n{USAGE}"))?,
        output: output.ok_or_else(|| format!("missing --output\n{USAGE}"))?,
        config,
        group,
        json,
    })
}

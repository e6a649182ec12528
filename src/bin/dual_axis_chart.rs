use std::fs;
use std::path::PathBuf;

use dual_axis_chart::api::{
    ALL_BUTTON_LABEL, ChartView, FetchConfig, FileDatasetSource, HttpDatasetSource, LoadOutcome,
};
use dual_axis_chart::interaction::ToggleTarget;
use dual_axis_chart::render::SvgRenderer;
use dual_axis_chart::telemetry::init_default_tracing;

const DEFAULT_OUTPUT_PATH: &str = "chart.svg";

#[derive(Debug)]
struct CliArgs {
    fetch: FetchConfig,
    input_path: Option<PathBuf>,
    output_path: PathBuf,
    snapshot_path: Option<PathBuf>,
    toggles: Vec<ToggleTarget>,
}

fn main() {
    let _ = init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| format!("failed to start runtime: {err}"))?;

    let mut view = ChartView::new();
    let outcome = match &args.input_path {
        Some(path) => runtime.block_on(view.mount(&FileDatasetSource::new(path.clone()))),
        None => {
            let source = HttpDatasetSource::new(args.fetch.clone()).map_err(|err| err.to_string())?;
            runtime.block_on(view.mount(&source))
        }
    };

    let controls = view.controls();
    if let Some(placeholder) = controls.placeholder {
        println!("{placeholder}");
    }
    let labels: Vec<&str> = controls.buttons.iter().map(|b| b.label.as_str()).collect();
    println!("controls: {}", labels.join(" "));

    let Some(scene) = view.scene_mut() else {
        return Err(match outcome {
            LoadOutcome::Applied { record_count, .. } => {
                format!("no chart drawn for {record_count} record(s)")
            }
            LoadOutcome::Failed | LoadOutcome::Discarded => "dataset unavailable".to_owned(),
        });
    };

    for target in &args.toggles {
        if scene.toggle(target).is_none() {
            eprintln!("warning: unknown id in --toggle {target:?}");
        }
    }

    let mut renderer = SvgRenderer::new();
    scene.render(&mut renderer).map_err(|err| err.to_string())?;
    fs::write(&args.output_path, renderer.document())
        .map_err(|err| format!("failed to write `{}`: {err}", args.output_path.display()))?;
    println!(
        "wrote {} ({} record(s))",
        args.output_path.display(),
        scene.records().len()
    );

    if let Some(path) = &args.snapshot_path {
        let json = scene
            .snapshot_json_contract_v1_pretty()
            .map_err(|err| err.to_string())?;
        fs::write(path, json)
            .map_err(|err| format!("failed to write `{}`: {err}", path.display()))?;
    }

    Ok(())
}

fn parse_args() -> Result<CliArgs, String> {
    let mut fetch = FetchConfig::default();
    let mut input_path: Option<PathBuf> = None;
    let mut output_path = PathBuf::from(DEFAULT_OUTPUT_PATH);
    let mut snapshot_path: Option<PathBuf> = None;
    let mut toggles = Vec::new();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--url" => {
                fetch.base_url = args
                    .next()
                    .ok_or_else(|| "missing value for --url".to_owned())?;
            }
            "--path" => {
                fetch.path = args
                    .next()
                    .ok_or_else(|| "missing value for --path".to_owned())?;
            }
            "--input" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --input".to_owned())?;
                input_path = Some(PathBuf::from(value));
            }
            "--output" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output".to_owned())?;
                output_path = PathBuf::from(value);
            }
            "--snapshot" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --snapshot".to_owned())?;
                snapshot_path = Some(PathBuf::from(value));
            }
            "--toggle" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --toggle".to_owned())?;
                toggles.push(if value == ALL_BUTTON_LABEL {
                    ToggleTarget::All
                } else {
                    ToggleTarget::Individual(value)
                });
            }
            "-h" | "--help" => {
                println!(
                    "Usage: dual_axis_chart [--url <base>] [--path <path>] [--input <file.json>] [--output <file.svg>] [--snapshot <file.json>] [--toggle <id|ALL>]..."
                );
                std::process::exit(0);
            }
            _ => {
                return Err(format!("unknown argument `{arg}`"));
            }
        }
    }

    Ok(CliArgs {
        fetch,
        input_path,
        output_path,
        snapshot_path,
        toggles,
    })
}

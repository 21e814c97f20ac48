use narwhal::layout::{Algorithm, RoutedEdge, Viewport};
use narwhal::{Engine, Size, StoryConfig, View, WorkingActor, Workspace, WorkspaceError};
use serde::Serialize;
use std::io::{Read, Write};
use tracing_subscriber::filter::LevelFilter;

#[derive(Debug)]
enum CliError {
    Usage(String),
    Io(std::io::Error),
    Story(narwhal::Error),
    Workspace(WorkspaceError),
    Json(serde_json::Error),
    /// `summary` of a story with line errors; the summary line has already been printed.
    StoryErrors,
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Story(err) => write!(f, "{err}"),
            CliError::Workspace(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::StoryErrors => write!(f, "story has errors"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<narwhal::Error> for CliError {
    fn from(value: narwhal::Error) -> Self {
        Self::Story(value)
    }
}

impl From<WorkspaceError> for CliError {
    fn from(value: WorkspaceError) -> Self {
        Self::Workspace(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Command {
    #[default]
    Parse,
    Layout,
    Outline,
    Summary,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    verbosity: u8,
    view: View,
    layout: Option<String>,
    config: Option<String>,
    canvas_width: Option<f64>,
    canvas_height: Option<f64>,
    viewport_width: f64,
    viewport_height: f64,
}

#[derive(Serialize)]
struct LayoutOut<'a> {
    view: View,
    algorithm: Option<&'a str>,
    actors: Vec<&'a WorkingActor>,
    edges: Vec<RoutedEdge>,
    viewport: Viewport,
}

fn usage() -> String {
    "narwhal-cli\n\
\n\
USAGE:\n\
  narwhal-cli [parse] [--pretty] [--config <file.json>] [<path>|-]\n\
  narwhal-cli layout [--pretty] [--view all|<index>] [--layout radial|grid|flow|force] [--canvas-width <w>] [--canvas-height <h>] [--viewport-width <w>] [--viewport-height <h>] [--config <file.json>] [<path>|-]\n\
  narwhal-cli outline [--view all|<index>] [<path>|-]\n\
  narwhal-cli summary [<path>|-]\n\
\n\
OPTIONS:\n\
  -v, --verbose   log to stderr (repeat for more detail)\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - parse prints {domains, errors}; story errors do not change the exit status.\n\
  - summary exits with status 1 when the story has errors.\n\
"
    .to_string()
}

fn positive(value: Option<&String>) -> Result<f64, CliError> {
    let Some(raw) = value else {
        return Err(CliError::Usage(usage()));
    };
    let v = raw.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
    if !(v.is_finite() && v > 0.0) {
        return Err(CliError::Usage(usage()));
    }
    Ok(v)
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        viewport_width: 800.0,
        viewport_height: 600.0,
        ..Default::default()
    };

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "parse" => args.command = Command::Parse,
            "layout" => args.command = Command::Layout,
            "outline" => args.command = Command::Outline,
            "summary" => args.command = Command::Summary,
            "--pretty" => args.pretty = true,
            "-v" | "--verbose" => args.verbosity = args.verbosity.saturating_add(1),
            "-vv" => args.verbosity = args.verbosity.saturating_add(2),
            "--view" => {
                let Some(raw) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.view = raw.parse().map_err(|e: narwhal::Error| {
                    CliError::Usage(format!("{e}\n\n{}", usage()))
                })?;
            }
            "--layout" => {
                let Some(name) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.layout = Some(name.clone());
            }
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--canvas-width" => args.canvas_width = Some(positive(it.next())?),
            "--canvas-height" => args.canvas_height = Some(positive(it.next())?),
            "--viewport-width" => args.viewport_width = positive(it.next())?,
            "--viewport-height" => args.viewport_height = positive(it.next())?,
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(format!("unknown option: {other}\n\n{}", usage())));
            }
            other => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(other.to_string());
            }
        }
    }

    Ok(args)
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    let mut out = std::io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut out, value)?;
    } else {
        serde_json::to_writer(&mut out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

fn build_engine(config: Option<&str>) -> Result<Engine, CliError> {
    let Some(path) = config else {
        return Ok(Engine::new());
    };
    let text = std::fs::read_to_string(path)?;
    let overrides = StoryConfig::from_json_overrides(&text)?;
    Ok(Engine::new().with_config(overrides))
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let engine = build_engine(args.config.as_deref())?;
    tracing::debug!(
        command = ?args.command,
        input = args.input.as_deref().unwrap_or("-"),
        bytes = text.len(),
        "read story"
    );

    match args.command {
        Command::Parse => {
            let story = engine.parse_story(&text);
            write_json(&story, args.pretty)
        }
        Command::Layout => {
            let mut ws = Workspace::new(engine);
            let defaults = ws.layout_options().canvas;
            let canvas = Size::new(
                args.canvas_width.unwrap_or(defaults.width),
                args.canvas_height.unwrap_or(defaults.height),
            );
            ws = ws.with_canvas(canvas);
            let algorithm = args
                .layout
                .as_deref()
                .map(|name| Algorithm::from_name(name, ws.engine().config()))
                .transpose()
                .map_err(WorkspaceError::from)?;

            ws.update_text(&text);
            ws.set_view(args.view);
            if let Some(algorithm) = &algorithm {
                ws.apply_layout(algorithm)?;
            }
            let viewport = ws.fit_viewport(Size::new(args.viewport_width, args.viewport_height));
            let edges = ws.routed_edges();
            let out = LayoutOut {
                view: ws.view(),
                algorithm: algorithm.as_ref().map(Algorithm::name),
                actors: ws.graph().actors.values().collect(),
                edges,
                viewport,
            };
            write_json(&out, args.pretty)
        }
        Command::Outline => {
            let mut ws = Workspace::new(engine);
            ws.update_text(&text);
            ws.set_view(args.view);
            print!("{}", ws.outline());
            Ok(())
        }
        Command::Summary => {
            let mut ws = Workspace::new(engine);
            ws.update_text(&text);
            let summary = ws.summary();
            println!("{summary}");
            if summary.is_failing() {
                return Err(CliError::StoryErrors);
            }
            Ok(())
        }
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };
    init_tracing(args.verbosity);

    match run(args) {
        Ok(()) => {}
        Err(CliError::StoryErrors) => std::process::exit(1),
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}

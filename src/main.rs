//! symbios-turtle CLI: expand and draw L-Systems.
//!
//! Usage:
//!   symbios-turtle presets
//!   symbios-turtle expand --preset "Dragon Curve" --generations 6
//!   symbios-turtle draw --preset "Barnsley Fern" --svg fern.svg
//!   symbios-turtle animate --axiom F --rule F=F+G --rule G=F-G --angle 90 --svg dragon.svg

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;
use symbios_turtle::{
    Driver, PRESETS, Palette, Precision, Preset, Surface, SvgRenderer, SystemConfig,
    TurtleInterpreter, expand_in_background, parse_rules,
};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "symbios-turtle", version, about = "Grow L-Systems and draw them with a turtle")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the bundled presets
    Presets,
    /// Print the expanded program string
    Expand {
        #[command(flatten)]
        source: Source,
        /// Also print the grammar's alphabet
        #[arg(long)]
        alphabet: bool,
    },
    /// Interpret the whole program at once and write the result
    Draw {
        #[command(flatten)]
        source: Source,
        #[command(flatten)]
        output: Output,
    },
    /// Interpret one symbol per tick, reporting progress as the figure grows
    Animate {
        #[command(flatten)]
        source: Source,
        #[command(flatten)]
        output: Output,
        /// Milliseconds between ticks
        #[arg(long, default_value = "100")]
        interval_ms: u64,
    },
}

/// Where the figure comes from. Individual flags override the preset or file.
#[derive(Args)]
struct Source {
    /// Start from a bundled preset
    #[arg(short, long, conflicts_with = "config")]
    preset: Option<String>,
    /// Start from a JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Axiom (initial symbol string)
    #[arg(long)]
    axiom: Option<String>,
    /// Production rule, e.g. `F=F+G`; repeat for more rules
    #[arg(short, long = "rule")]
    rules: Vec<String>,
    /// Generation count (1 = the axiom itself)
    #[arg(short, long)]
    generations: Option<u32>,
    /// Turn angle in degrees
    #[arg(short, long)]
    angle: Option<f64>,
    /// Step length in surface units
    #[arg(short, long)]
    step: Option<f64>,
    /// Track exact positions instead of snapping to whole pixels
    #[arg(long)]
    exact: bool,
}

#[derive(Args)]
struct Output {
    /// Write an SVG rendering here
    #[arg(long)]
    svg: Option<PathBuf>,
    /// Write the primitive list as JSON here
    #[arg(long)]
    json: Option<PathBuf>,
}

impl Source {
    fn resolve(&self) -> Result<SystemConfig> {
        let mut config = match (&self.preset, &self.config) {
            (Some(name), _) => Preset::find(name)?.to_config(),
            (None, Some(path)) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                SystemConfig::from_json(&text)?
            }
            (None, None) => SystemConfig::default(),
        };

        if let Some(axiom) = &self.axiom {
            config.axiom = axiom.clone();
        }
        if !self.rules.is_empty() {
            config.rules = parse_rules(&self.rules)?;
        }
        if let Some(generations) = self.generations {
            config.generations = generations;
        }
        if let Some(angle) = self.angle {
            config.turn_angle = angle;
        }
        if let Some(step) = self.step {
            config.step_length = step;
        }
        if self.exact {
            config.precision = Precision::Exact;
        }

        config.validate()?;
        Ok(config)
    }
}

impl Output {
    fn write(&self, surface: &Surface) -> Result<()> {
        if let Some(path) = &self.svg {
            let mut svg = SvgRenderer::new(Palette::default());
            surface.replay(&mut svg);
            fs::write(path, svg.into_document())
                .with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "Wrote SVG");
        }
        if let Some(path) = &self.json {
            let json = serde_json::to_string_pretty(surface.primitives())?;
            fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "Wrote primitives");
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("symbios_turtle=info"));
    fmt().with_env_filter(filter).with_target(false).compact().init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Presets => {
            for preset in &PRESETS {
                let rules: Vec<String> = preset
                    .rules
                    .iter()
                    .map(|(symbol, replacement)| format!("{symbol}={replacement}"))
                    .collect();
                println!(
                    "{:<20} axiom={:<6} angle={:<5} rules: {}",
                    preset.name,
                    preset.axiom,
                    preset.turn_angle,
                    rules.join(" ")
                );
            }
        }
        Commands::Expand { source, alphabet } => {
            let config = source.resolve()?;
            let grammar = config.grammar();
            if alphabet {
                println!("alphabet: {}", grammar.alphabet());
            }
            println!("{}", grammar.expand());
        }
        Commands::Draw { source, output } => {
            let config = source.resolve()?;
            let program = config.grammar().expand();

            let mut interpreter = TurtleInterpreter::new();
            interpreter.reset(config.width, config.height);
            interpreter.configure(&program, config.turtle_config()?);
            let drawn = interpreter.run_to_end()?;

            let surface = interpreter.surface();
            info!(
                symbols = program.chars().count(),
                drawn,
                segments = surface.segment_count(),
                markers = surface.circle_count(),
                "Drew figure"
            );
            output.write(surface)?;
        }
        Commands::Animate {
            source,
            output,
            interval_ms,
        } => {
            let config = source.resolve()?;
            let program = expand_in_background(config.grammar())?
                .join()
                .map_err(|_| anyhow::anyhow!("expansion worker panicked"))?;

            let mut driver = Driver::new(TurtleInterpreter::new())
                .with_interval(Duration::from_millis(interval_ms));
            driver.restart(&program, config.turtle_config()?, config.width, config.height);
            let view = driver.surface();
            let total = program.chars().count();

            let worker = thread::Builder::new()
                .name("turtle-driver".into())
                .spawn(move || driver.run(|_| {}))?;

            // Stand-in display loop: sample the published surface once per tick.
            let poll = Duration::from_millis(interval_ms.max(1));
            while !worker.is_finished() {
                let drawn = view.with(Surface::len);
                println!("drawn {drawn} primitives ({total} symbols)");
                thread::sleep(poll);
            }
            let executed = worker
                .join()
                .map_err(|_| anyhow::anyhow!("turtle driver panicked"))??;

            let surface = view.snapshot();
            info!(executed, drawn = surface.len(), "Animation finished");
            output.write(&surface)?;
        }
    }

    Ok(())
}

#[cfg(feature = "mimalloc-global")]
#[global_allocator]
static GLOBAL_ALLOCATOR: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::time::Instant;

use anyhow::{Context, bail};
use log::info;
use torus_life::torus::{Grid, Simulation, StepMode, TorusLife, TorusLifeConfig};

const DEFAULT_GENERATIONS: u64 = 500;
const DEFAULT_REPORT_EVERY: u64 = 100;
const USAGE: &str = "usage: torus-life [WIDTH HEIGHT] [--generations N] [--report-every N] \
                     [--seed S] [--parallel] [--threads N] [--paused] [--print]";

struct MainArgs {
    config: TorusLifeConfig,
    generations: u64,
    report_every: u64,
    paused: bool,
    print: bool,
}

fn parse_args() -> anyhow::Result<MainArgs> {
    let args: Vec<String> = std::env::args().collect();
    let mut config = TorusLifeConfig::default();
    let mut generations = DEFAULT_GENERATIONS;
    let mut report_every = DEFAULT_REPORT_EVERY;
    let mut paused = false;
    let mut print = false;
    let mut positional = Vec::new();

    let next_arg = |i: usize, flag: &str| -> anyhow::Result<&str> {
        args.get(i)
            .map(String::as_str)
            .with_context(|| format!("{flag} requires a value\n{USAGE}"))
    };
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--generations" => {
                i += 1;
                generations = next_arg(i, "--generations")?
                    .parse()
                    .context("--generations requires a non-negative integer")?;
            }
            "--report-every" => {
                i += 1;
                report_every = next_arg(i, "--report-every")?
                    .parse()
                    .context("--report-every requires a non-negative integer")?;
            }
            "--seed" => {
                i += 1;
                let seed = next_arg(i, "--seed")?;
                let seed = match seed.strip_prefix("0x") {
                    Some(hex) => u64::from_str_radix(hex, 16),
                    None => seed.parse(),
                }
                .context("--seed requires an integer (decimal or 0x-prefixed hex)")?;
                config = config.seed(seed);
            }
            "--parallel" => {
                config = config.step_mode(StepMode::Parallel);
            }
            "--threads" => {
                i += 1;
                let n: usize = next_arg(i, "--threads")?
                    .parse()
                    .context("--threads requires a positive integer")?;
                config = config.step_mode(StepMode::Parallel).thread_count(n);
            }
            "--paused" => paused = true,
            "--print" => print = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            flag if flag.starts_with("--") => bail!("unknown argument: {flag}\n{USAGE}"),
            value => positional.push(value.to_owned()),
        }
        i += 1;
    }

    match positional.as_slice() {
        [] => {}
        [width, height] => {
            let width = width.parse().context("WIDTH must be a positive integer")?;
            let height = height.parse().context("HEIGHT must be a positive integer")?;
            config = config.dimensions(width, height);
        }
        _ => bail!("expected both WIDTH and HEIGHT or neither\n{USAGE}"),
    }

    Ok(MainArgs {
        config,
        generations,
        report_every,
        paused,
        print,
    })
}

/// Text rendering driven by the redraw spans: `#` for a live cell, `+` for a
/// cell that died in the last transition, blank elsewhere.
fn render(grid: &Grid) -> String {
    let mut out = String::with_capacity((grid.width() + 1) * grid.height());
    for spans in grid.draw_spans() {
        let row = grid.row(spans.row());
        let mut line = vec![' '; grid.width()];
        for span in spans {
            for col in span {
                line[col] = if row[col].alive { '#' } else { '+' };
            }
        }
        out.extend(line);
        out.push('\n');
    }
    out
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = parse_args()?;

    let (width, height) = (args.config.width, args.config.height);
    let engine = TorusLife::random(args.config).context("failed to build the board")?;
    info!(
        "{width}x{height} board, initial population {}",
        engine.population()
    );

    let mut sim = Simulation::new(engine);
    sim.set_paused(args.paused);

    let start = Instant::now();
    for tick in 1..=args.generations {
        sim.tick();
        if args.report_every > 0 && tick % args.report_every == 0 {
            info!(
                "tick {tick}: generation {} population {}",
                sim.engine().generation(),
                sim.engine().population()
            );
        }
    }
    let elapsed = start.elapsed();

    let engine = sim.into_engine();
    if args.print {
        print!("{}", render(engine.current()));
    }

    let total_ms = elapsed.as_secs_f64() * 1000.0;
    let avg_ms = if args.generations > 0 {
        total_ms / args.generations as f64
    } else {
        0.0
    };
    println!(
        "Generation: {} | population {} | {total_ms:.3} ms total, {avg_ms:.6} ms/tick",
        engine.generation(),
        engine.population()
    );
    Ok(())
}

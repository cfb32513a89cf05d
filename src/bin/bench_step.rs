//! Sequential vs partitioned-parallel step timing across board sizes.
//!
//! Use with `--release` for meaningful numbers.

#[cfg(feature = "mimalloc-global")]
#[global_allocator]
static GLOBAL_ALLOCATOR: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::time::Instant;

use torus_life::torus::{StepMode, TorusLife, TorusLifeConfig};

const SEED: u64 = 0x5EED_1234_ABCD_EF01;

fn bench(size: usize, mode: StepMode, iterations: u64) -> anyhow::Result<(f64, usize)> {
    let config = TorusLifeConfig::default()
        .dimensions(size, size)
        .seed(SEED)
        .step_mode(mode);
    let mut engine = TorusLife::random(config)?;

    let start = Instant::now();
    engine.step_n(iterations);
    let total_ms = start.elapsed().as_secs_f64() * 1000.0;
    Ok((total_ms, engine.population()))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let scales: &[(usize, u64)] = &[(256, 400), (512, 200), (1024, 100), (2048, 40)];

    println!(
        "{:<10} {:>8} {:>14} {:>14} {:>9} {:>10}",
        "Grid", "Iters", "Seq avg(ms)", "Par avg(ms)", "Speedup", "Pop match"
    );
    println!("{}", "-".repeat(70));

    for &(size, iters) in scales {
        let (seq_ms, seq_pop) = bench(size, StepMode::Sequential, iters)?;
        let (par_ms, par_pop) = bench(size, StepMode::Parallel, iters)?;
        println!(
            "{:<10} {:>8} {:>14.4} {:>14.4} {:>8.2}x {:>10}",
            format!("{size}x{size}"),
            iters,
            seq_ms / iters as f64,
            par_ms / iters as f64,
            seq_ms / par_ms,
            if seq_pop == par_pop { "MATCH" } else { "MISMATCH" }
        );
    }
    Ok(())
}

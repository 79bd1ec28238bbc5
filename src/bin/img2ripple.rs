// img2ripple - Render water ripple frames over a still image
//
// Usage: cargo run --bin img2ripple -- <image> [--ticks N] [--drops N]
//                                              [--every K] [--out DIR]
//                                              [--radius N] [--depth N] [--damping N]
//
// Drops are scattered over the first half of the run; frames are written as
// PNGs until the requested tick count is reached or the water settles.

use std::env;
use std::path::{Path, PathBuf};

use ripple_engine::{RippleConfig, RippleWorld};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

// ============================================================================
// Random drop placement (xorshift32)
// ============================================================================

fn rand(rng: &mut u32) -> f32 {
    *rng ^= *rng << 13;
    *rng ^= *rng >> 17;
    *rng ^= *rng << 5;
    (*rng >> 8) as f32 * (1.0 / 16777216.0)
}

// ============================================================================
// Frame output
// ============================================================================

fn save_frame(world: &RippleWorld, dir: &Path, frame: usize) {
    let buffer = image::RgbaImage::from_raw(world.width(), world.height(), world.pixels().to_vec())
        .expect("frame buffer");
    let path = dir.join(format!("frame_{:04}.png", frame));
    buffer.save(&path).expect("write frame");
}

// ============================================================================
// Main
// ============================================================================

fn main() {
    TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .ok();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!(
            "Usage: {} <image> [--ticks N] [--drops N] [--every K] [--out DIR]",
            args[0]
        );
        std::process::exit(1);
    }

    let image_path = &args[1];
    let mut ticks = 400usize;
    let mut drops = 5usize;
    let mut every = 4usize;
    let mut out = PathBuf::from("frames");
    let mut config = RippleConfig::default();

    let mut i = 2;
    while i < args.len() {
        let number = args.get(i + 1).and_then(|s| s.parse::<f64>().ok());
        match args[i].as_str() {
            "--ticks" => { ticks = number.unwrap_or(400.0) as usize; i += 2; }
            "--drops" => { drops = number.unwrap_or(5.0) as usize; i += 2; }
            "--every" => { every = (number.unwrap_or(4.0) as usize).max(1); i += 2; }
            "--out" => { out = args.get(i + 1).map(PathBuf::from).unwrap_or(out); i += 2; }
            "--radius" => { config.set("dropRadius", number.unwrap_or(-1.0)); i += 2; }
            "--depth" => { config.set("dropDepth", number.unwrap_or(-1.0)); i += 2; }
            "--damping" => { config.set("dampingShift", number.unwrap_or(-1.0)); i += 2; }
            _ => i += 1,
        }
    }

    println!("Rippling {} ({} drops, {} ticks)...", image_path, drops, ticks);

    let img = image::open(image_path).expect("open image").to_rgba8();
    let (width, height) = img.dimensions();
    let mut world =
        RippleWorld::new(width, height, img.into_raw(), config).expect("build world");

    std::fs::create_dir_all(&out).expect("create output dir");
    println!("  Surface {}x{}, writing every {} ticks to {}", width, height, every, out.display());

    // Scatter the drops across the first half of the run
    let drop_spacing = ((ticks / 2).max(1) / drops.max(1)).max(1);
    let mut rng = 0xDEADBEEFu32;
    let mut injected = 0usize;
    let mut frames = 0usize;

    for tick in 0..ticks {
        if injected < drops && tick % drop_spacing == 0 {
            let x = (rand(&mut rng) * width as f32) as i32;
            let y = (rand(&mut rng) * height as f32) as i32;
            world.add_drop(x, y);
            injected += 1;
            println!("  Drop {} at ({}, {})", injected, x, y);
        }

        world.tick();

        if tick % every == 0 {
            save_frame(&world, &out, frames);
            frames += 1;
        }

        if injected == drops && !world.is_active() {
            println!("  Settled after {} ticks", tick + 1);
            break;
        }
    }

    // Final frame shows the fully settled surface
    save_frame(&world, &out, frames);
    frames += 1;

    println!("Done! {} frames", frames);
}

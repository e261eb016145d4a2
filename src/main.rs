use log::{debug, error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::process;
use std::thread;
use std::time::{Duration, Instant};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use plantmorph::export;
use plantmorph::logging;
use plantmorph::playback::{Driver, PlaybackState};
use plantmorph::settings::Settings;
use plantmorph::{LifecycleMorpher, Result};

fn main() {
    logging::init();
    if let Err(err) = run() {
        error!("{}", err);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    let started = OffsetDateTime::now_utc();
    info!(
        "starting at {} with {} points per stage",
        started
            .format(&Rfc3339)
            .unwrap_or_else(|_| started.unix_timestamp().to_string()),
        settings.point_count
    );

    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let morpher = LifecycleMorpher::generate(settings.point_count, &mut rng);

    if let Some(dir) = &settings.export_dir {
        export::write_stages(dir, &morpher)?;
    }
    if let Some(dir) = &settings.frame_dir {
        fs::create_dir_all(dir)?;
    }

    let mut playback = PlaybackState::new(settings.autoplay_rate, settings.speed);
    playback.set_autoplay(settings.autoplay);
    let mut driver = Driver::new(morpher, playback, settings.width, settings.height);

    let interval = Duration::from_millis(settings.tick_interval_ms);
    let begin = Instant::now();

    for tick in 0..settings.ticks {
        let frame_start = Instant::now();

        for input in settings.inputs_at(tick) {
            driver.apply(input);
        }
        driver.tick();

        if let Some(dir) = &settings.frame_dir {
            if tick % settings.frame_every == 0 {
                let path = dir.join(format!("frame_{:05}.png", tick));
                driver.render().save(&path)?;
                debug!("saved {}", path.display());
            }
        }

        // Add delay
        if let Some(rest) = interval.checked_sub(frame_start.elapsed()) {
            thread::sleep(rest);
        }
    }

    if let Some(dir) = &settings.export_dir {
        export::write_point_set(dir.join("final.csv"), &driver.state().points)?;
    }

    info!(
        "ran {} ticks in {:.2?}, stopped at p = {:.3} ({})",
        driver.ticks(),
        begin.elapsed(),
        driver.playback().parameter(),
        driver.playback().stage_info().name
    );
    Ok(())
}

//! Orpheus: a day of Bitcoin blocks on a drifting 3D stage.

use bevy::app::AppExit;
use block_stage::config;
use block_stage::sdk::StageBuilder;

fn main() -> AppExit {
    let _ = dotenvy::dotenv();

    let stage_config = match config::stage_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("orpheus: {err}");
            return AppExit::error();
        }
    };
    let start_day = match config::start_day() {
        Ok(day) => day,
        Err(err) => {
            eprintln!("orpheus: {err}");
            return AppExit::error();
        }
    };

    let mut builder = StageBuilder::new().config(stage_config);
    if let Some(day) = start_day {
        builder = builder.start_day(day);
    }

    match builder.build() {
        Ok(mut app) => app.run(),
        Err(err) => {
            eprintln!("orpheus: failed to load blocks: {err}");
            AppExit::error()
        }
    }
}

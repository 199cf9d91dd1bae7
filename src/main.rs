//! Galaxy Shooter - headless runner
//!
//! Plays a seeded session on autopilot and logs what happened.
//!
//! ```text
//! RUST_LOG=info galaxy-shooter [settings.json]
//! ```

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use galaxy_shooter::Settings;
    use galaxy_shooter::audio::{AudioManager, dispatch};
    use galaxy_shooter::consts::TICKS_PER_SECOND;
    use galaxy_shooter::sim::{GameEvent, GameState, TickInput, tick};
    use galaxy_shooter::ui::{Hud, LogRenderer, Renderer};

    env_logger::init();
    log::info!("Galaxy Shooter (headless) starting...");

    let mut settings = match std::env::args().nth(1) {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };
    let seed = *settings.seed.get_or_insert_with(rand::random::<u64>);
    log::info!("Seed {seed}, {} ticks", settings.headless_ticks);

    let mut state = GameState::with_settings(&settings);
    let mut audio = AudioManager::new();
    audio.set_muted(!settings.sound_enabled);
    let mut renderer = LogRenderer::default();

    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    let mut deaths = 0u32;
    let mut bosses_defeated = 0u32;
    let mut best_level = 1u32;

    for t in 0..settings.headless_ticks {
        let now_ms = t as f64 * 1000.0 / TICKS_PER_SECOND as f64;
        tick(&mut state, &input, now_ms);

        let events = state.drain_events();
        dispatch(&events, &mut audio);
        audio.drain();

        for event in &events {
            match event {
                GameEvent::GameOver { .. } => deaths += 1,
                GameEvent::BossDefeated { .. } => bosses_defeated += 1,
                GameEvent::LevelStarted { level } => best_level = best_level.max(*level),
                _ => {}
            }
        }
        if events.iter().any(|e| matches!(e, GameEvent::HudChanged)) {
            renderer.render(&state);
        }
    }

    let seconds = settings.headless_ticks as f64 / TICKS_PER_SECOND as f64;
    log::info!("Simulated {seconds:.1}s of play");
    log::info!("Final: {}", Hud::from_state(&state));
    log::info!(
        "Best level {best_level}, {bosses_defeated} bosses defeated, {deaths} deaths, {} sound cues",
        audio.played()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless runner on the web; hosts drive `sim::tick` themselves
}

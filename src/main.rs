//! Ballthrow - windowed app
//!
//! Main entry point: app setup and system registration. The simulation steps
//! in FixedUpdate at the configured tick rate; input is buffered in Update.

use ballthrow::generate::{self, BALL_TEXTURE_FILE, BallTextureConfig};
use ballthrow::{
    BallSimulation, BallSprite, Bounds, ConfigWatcher, InitSettings, PendingShellEvents,
    config_watcher, constants::*, input, tuning, window_to_world,
};
use bevy::prelude::*;
use bevy::window::WindowResolution;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::Path;

fn main() {
    // Load persistent settings (uses defaults if file doesn't exist)
    let settings = InitSettings::load();

    // Save settings on first run to ensure file exists
    if let Err(e) = settings.save() {
        warn!("Failed to save initial settings: {}", e);
    }

    if !Path::new(BALL_TEXTURE_FILE).exists()
        && let Err(e) = generate::run(BALL_TEXTURE_FILE, &BallTextureConfig::default())
    {
        warn!("Could not generate ball texture: {}", e);
    }

    let tuning = tuning::load_ball_tuning();
    let bounds = Bounds::new(settings.window_width, settings.window_height);
    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let sim = BallSimulation::spawn(bounds, tuning, &mut rng);

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                // Set scale_factor_override to 1.0 so window pixels match simulation pixels
                resolution: WindowResolution::new(
                    settings.window_width as u32,
                    settings.window_height as u32,
                )
                .with_scale_factor_override(1.0),
                title: settings.title.clone(),
                resizable: false,
                ..default()
            }),
            // Closing the window goes through the simulation's Quit
            close_when_requested: false,
            ..default()
        }))
        .insert_resource(ClearColor(BACKGROUND_COLOR))
        .insert_resource(Time::<Fixed>::from_seconds(settings.tick_secs()))
        .insert_resource(sim)
        .init_resource::<PendingShellEvents>()
        .init_resource::<ConfigWatcher>()
        .add_systems(Startup, setup)
        .add_systems(
            Update,
            (input::capture_input, config_watcher::check_config_changes),
        )
        .add_systems(
            FixedUpdate,
            (simulation_tick, sync_ball_sprite, log_ball_events).chain(),
        )
        .run();
}

/// Setup camera and the ball sprite
fn setup(mut commands: Commands, asset_server: Res<AssetServer>, sim: Res<BallSimulation>) {
    commands.spawn(Camera2d);

    let ball = sim.ball();
    let translation = window_to_world(&ball.bounding_box(), &sim.bounds());
    commands.spawn((
        Sprite {
            image: asset_server.load(BALL_TEXTURE_FILE.trim_start_matches("assets/")),
            custom_size: Some(Vec2::splat(ball.size as f32)),
            ..default()
        },
        Transform::from_translation(translation.extend(0.0)),
        BallSprite,
    ));

    info!(
        "Ball spawned at ({:.0}, {:.0}) with velocity ({:.2}, {:.2})",
        ball.position.x, ball.position.y, ball.velocity.x, ball.velocity.y
    );
}

/// One simulation tick on the buffered input; quitting exits the app
fn simulation_tick(
    mut sim: ResMut<BallSimulation>,
    mut pending: ResMut<PendingShellEvents>,
    mut exit: MessageWriter<AppExit>,
) {
    let events = pending.take();
    let pointer = pending.pointer();
    sim.tick(&events, pointer);

    if sim.is_finished() {
        exit.write(AppExit::Success);
    }
}

/// Draw: move the sprite to the ball's bounding box
fn sync_ball_sprite(
    sim: Res<BallSimulation>,
    mut sprites: Query<&mut Transform, With<BallSprite>>,
) {
    let center = window_to_world(&sim.ball().bounding_box(), &sim.bounds());
    for mut transform in &mut sprites {
        transform.translation.x = center.x;
        transform.translation.y = center.y;
    }
}

fn log_ball_events(mut sim: ResMut<BallSimulation>) {
    let bus = sim.bus_mut();
    for event in bus.drain() {
        debug!("[tick {}] {}", event.tick, event.event);
    }
}

use anyhow::Result;
use log::info;
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

mod core;
mod engine;
mod game;

use engine::game_loop::GameLoop;
use engine::input::InputManager;
use game::tuning::WardConfig;
use game::Game;

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Vampire Ward...");

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Vampire Ward")
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720))
        .with_resizable(true)
        .build(&event_loop)?;

    info!("Window created successfully");

    let mut input = InputManager::new();
    let mut game_loop = GameLoop::new();
    let mut game = Game::new(WardConfig::default(), &game_loop.frame_tick());

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } => {
                input.process_keyboard_event(&event);
            }
            Event::WindowEvent {
                event: WindowEvent::Focused(focused),
                ..
            } => {
                if focused {
                    game_loop.resume();
                } else {
                    // Key releases are lost while unfocused
                    input.reset();
                    game_loop.pause();
                }
            }
            Event::WindowEvent {
                event: WindowEvent::Resized(physical_size),
                ..
            } => {
                info!("Window resized to {:?}", physical_size);
            }
            Event::AboutToWait => {
                let steps = game_loop.begin_frame();
                for _ in 0..steps {
                    let tick = game_loop.fixed_tick();
                    game.fixed_update(&tick, input.player_mut());
                    input.end_fixed_step();
                }

                let tick = game_loop.frame_tick();
                game.frame_update(&tick, input.player());
                game.late_update(&tick);
                input.end_frame();

                if game.should_quit() {
                    info!(
                        "Shutting down after {} frames ({:.1} fps)",
                        game_loop.frame_count(),
                        game_loop.fps()
                    );
                    elwt.exit();
                    return;
                }
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}

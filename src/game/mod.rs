// Game layer
//
// Everything specific to the vampire ward lives here:
// - `tuning`: actor stats and the ward layout
// - `sprites`: named frame strips for every actor
// - `world`: bodies, straight-line pathing and contact tracking
// - `vampire`, `hunter`, `patient`, `door`, `ambient`: the actors
// - `ward`: one run of the game, owning all actors
// - `title`: the title screen
// - `hud`: sliders, score and the restart panel
//
// `Game` switches between the title screen and the ward.

pub mod ambient;
pub mod door;
pub mod hud;
pub mod hunter;
pub mod patient;
pub mod sprites;
pub mod title;
pub mod tuning;
pub mod vampire;
pub mod ward;
pub mod world;

use crate::engine::entity::EntityId;
use crate::engine::game_loop::Tick;
use crate::engine::input::PlayerInput;

use title::TitleScreen;
use tuning::WardConfig;
use ward::Ward;

/// Recoverable game-level failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("No free bed for a new patient")]
    NoFreeBed,

    #[error("Unknown entity {0}")]
    UnknownEntity(EntityId),
}

/// What a scene asks of the game after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneRequest {
    Stay,
    StartGame,
    Restart,
    MainMenu,
    Quit,
}

/// The active scene
#[derive(Debug)]
pub enum Scene {
    Title(TitleScreen),
    Ward(Box<Ward>),
}

/// Owns the active scene and applies scene requests
#[derive(Debug)]
pub struct Game {
    config: WardConfig,
    scene: Scene,
    /// Ward runs started so far; varies the seed between runs
    runs: u64,
    quit: bool,
}

impl Game {
    /// Start on the title screen
    pub fn new(config: WardConfig, tick: &Tick) -> Self {
        let scene = Scene::Title(TitleScreen::new(&config, tick));
        Self {
            config,
            scene,
            runs: 0,
            quit: false,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn fixed_update(&mut self, tick: &Tick, input: &mut PlayerInput) {
        if let Scene::Ward(ward) = &mut self.scene {
            ward.fixed_update(tick, input);
        }
    }

    pub fn frame_update(&mut self, tick: &Tick, input: &PlayerInput) {
        let request = match &mut self.scene {
            Scene::Title(title) => title.update(tick, input),
            Scene::Ward(ward) => ward.frame_update(tick, input),
        };
        self.apply(request, tick);
    }

    pub fn late_update(&mut self, tick: &Tick) {
        if let Scene::Ward(ward) = &mut self.scene {
            ward.late_update(tick);
        }
    }

    fn apply(&mut self, request: SceneRequest, tick: &Tick) {
        match request {
            SceneRequest::Stay => {}
            SceneRequest::StartGame | SceneRequest::Restart => self.load_ward(tick),
            SceneRequest::MainMenu => {
                log::info!("Back to the title screen");
                self.scene = Scene::Title(TitleScreen::new(&self.config, tick));
            }
            SceneRequest::Quit => {
                log::info!("Quit requested");
                self.quit = true;
            }
        }
    }

    fn load_ward(&mut self, tick: &Tick) {
        let seed = self.config.seed.wrapping_add(self.runs);
        self.runs += 1;
        log::info!("Starting run {}", self.runs);
        self.scene = Scene::Ward(Box::new(Ward::new(self.config.clone(), seed, tick)));
    }
}

// Title screen: looping artwork and three menu panels

use glam::Vec2;

use super::ambient::AmbientAnimation;
use super::sprites::PropSprites;
use super::tuning::WardConfig;
use super::SceneRequest;
use crate::engine::game_loop::Tick;
use crate::engine::input::{Action, PlayerInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TitlePanel {
    #[default]
    Main,
    HowTo,
    Credits,
}

#[derive(Debug)]
pub struct TitleScreen {
    panel: TitlePanel,
    artwork: AmbientAnimation,
}

impl TitleScreen {
    pub fn new(config: &WardConfig, tick: &Tick) -> Self {
        let sprites = PropSprites::standard(config.title_animation_speed);
        Self {
            panel: TitlePanel::Main,
            artwork: AmbientAnimation::new("title artwork", Vec2::ZERO, sprites.title, tick),
        }
    }

    pub fn panel(&self) -> TitlePanel {
        self.panel
    }

    pub fn artwork(&self) -> &AmbientAnimation {
        &self.artwork
    }

    pub fn start_game(&self) -> SceneRequest {
        SceneRequest::StartGame
    }

    pub fn how_to_play(&mut self) {
        self.panel = TitlePanel::HowTo;
    }

    pub fn credits(&mut self) {
        self.panel = TitlePanel::Credits;
    }

    pub fn return_to_main(&mut self) {
        self.panel = TitlePanel::Main;
    }

    pub fn exit_game(&self) -> SceneRequest {
        SceneRequest::Quit
    }

    /// Per-frame step: animate and follow the menu keys
    pub fn update(&mut self, tick: &Tick, input: &PlayerInput) -> SceneRequest {
        self.artwork.update(tick);

        if input.just_pressed(Action::Quit) {
            return self.exit_game();
        }

        match self.panel {
            TitlePanel::Main => {
                if input.just_pressed(Action::Confirm) {
                    return self.start_game();
                }
                if input.just_pressed(Action::HowToPlay) {
                    self.how_to_play();
                } else if input.just_pressed(Action::Credits) {
                    self.credits();
                }
            }
            TitlePanel::HowTo | TitlePanel::Credits => {
                if input.just_pressed(Action::Back) {
                    self.return_to_main();
                }
            }
        }
        SceneRequest::Stay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pressing(action: Action) -> PlayerInput {
        let mut input = PlayerInput::new();
        input.press(action);
        input
    }

    fn title() -> TitleScreen {
        TitleScreen::new(&WardConfig::default(), &Tick::at(0.0))
    }

    #[test]
    fn test_panels() {
        let mut title = title();
        assert_eq!(title.panel(), TitlePanel::Main);

        title.update(&Tick::at(0.1), &pressing(Action::HowToPlay));
        assert_eq!(title.panel(), TitlePanel::HowTo);

        // Confirm does nothing off the main panel
        let request = title.update(&Tick::at(0.2), &pressing(Action::Confirm));
        assert_eq!(request, SceneRequest::Stay);

        title.update(&Tick::at(0.3), &pressing(Action::Back));
        assert_eq!(title.panel(), TitlePanel::Main);

        title.update(&Tick::at(0.4), &pressing(Action::Credits));
        assert_eq!(title.panel(), TitlePanel::Credits);
    }

    #[test]
    fn test_start_and_exit() {
        let mut title = title();
        assert_eq!(
            title.update(&Tick::at(0.1), &pressing(Action::Confirm)),
            SceneRequest::StartGame
        );
        assert_eq!(
            title.update(&Tick::at(0.2), &pressing(Action::Quit)),
            SceneRequest::Quit
        );
    }

    #[test]
    fn test_artwork_animates() {
        let mut title = title();
        title.update(&Tick::at(0.5), &PlayerInput::new());
        assert!(title.artwork().sprite().sprite().is_some());
    }
}

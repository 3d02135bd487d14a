// Heads-up display model: sliders, score and the end-of-run panel
//
// The host draws whatever this holds; the ward refreshes it every frame.

use crate::core::math::unit_fraction;

/// Fill colour of a slider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SliderColor {
    #[default]
    Green,
    Red,
}

/// Which ward panel is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WardPanel {
    #[default]
    InGame,
    Restart,
}

#[derive(Debug, Clone, Default)]
pub struct Hud {
    /// Health fill in [0, 1]
    pub health: f32,
    /// Bat points fill in [0, 1]
    pub bat: f32,
    /// Wolf cooldown fill in [0, 1]
    pub wolf: f32,
    /// Green when wolves can be summoned
    pub wolf_color: SliderColor,
    pub score_text: String,
    /// Text of the restart panel, e.g. "Score 3"
    pub restart_text: String,
    pub panel: WardPanel,
}

impl Hud {
    pub fn new() -> Self {
        Self {
            score_text: "0".to_string(),
            ..Self::default()
        }
    }

    pub fn set_health(&mut self, health: i32, max_health: i32) {
        self.health = unit_fraction(health as f32, max_health as f32);
    }

    pub fn set_bat_points(&mut self, points: i32, total: i32) {
        self.bat = unit_fraction(points as f32, total as f32);
    }

    pub fn set_wolf_cooldown(&mut self, elapsed: f32, cooldown: f32) {
        self.wolf = unit_fraction(elapsed, cooldown);
        self.wolf_color = if elapsed >= cooldown {
            SliderColor::Green
        } else {
            SliderColor::Red
        };
    }

    pub fn set_score(&mut self, score: u32) {
        self.score_text = score.to_string();
    }

    /// Hide the in-game HUD and show the restart panel
    pub fn show_restart(&mut self, score: u32) {
        self.restart_text = format!("Score {}", score);
        self.panel = WardPanel::Restart;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sliders_are_fractions() {
        let mut hud = Hud::new();
        hud.set_health(50, 100);
        hud.set_bat_points(150, 100);
        assert_relative_eq!(hud.health, 0.5);
        assert_relative_eq!(hud.bat, 1.0);
    }

    #[test]
    fn test_wolf_slider_colour() {
        let mut hud = Hud::new();
        hud.set_wolf_cooldown(3.0, 15.0);
        assert_eq!(hud.wolf_color, SliderColor::Red);
        assert_relative_eq!(hud.wolf, 0.2);

        hud.set_wolf_cooldown(20.0, 15.0);
        assert_eq!(hud.wolf_color, SliderColor::Green);
        assert_relative_eq!(hud.wolf, 1.0);
    }

    #[test]
    fn test_restart_panel() {
        let mut hud = Hud::new();
        assert_eq!(hud.panel, WardPanel::InGame);
        assert_eq!(hud.score_text, "0");

        hud.show_restart(7);
        assert_eq!(hud.panel, WardPanel::Restart);
        assert_eq!(hud.restart_text, "Score 7");
    }
}

// Game action definitions and default key bindings

use winit::keyboard::KeyCode;

/// Represents all possible in-game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,

    // Vampire abilities
    Metamorphosis,
    SummonWolves,
    Bite,

    // Menus
    Confirm,
    HowToPlay,
    Credits,
    Back,
    Restart,
    MainMenu,
    Quit,
}

impl Action {
    /// The four directional actions
    pub const DIRECTIONS: [Action; 4] = [
        Action::MoveDown,
        Action::MoveUp,
        Action::MoveRight,
        Action::MoveLeft,
    ];

    /// Check if this is a movement action
    pub fn is_direction(&self) -> bool {
        matches!(
            self,
            Self::MoveUp | Self::MoveDown | Self::MoveLeft | Self::MoveRight
        )
    }

    /// Vampire abilities, handled on the fixed step
    pub fn is_ability(&self) -> bool {
        matches!(self, Self::Metamorphosis | Self::SummonWolves | Self::Bite)
    }
}

/// Represents an input source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Keyboard(KeyCode),
}

impl InputSource {
    /// Create a keyboard input source
    pub fn key(code: KeyCode) -> Self {
        Self::Keyboard(code)
    }
}

/// Default keyboard bindings
pub fn default_bindings() -> Vec<(InputSource, Action)> {
    vec![
        // Movement (arrow keys)
        (InputSource::key(KeyCode::ArrowUp), Action::MoveUp),
        (InputSource::key(KeyCode::ArrowDown), Action::MoveDown),
        (InputSource::key(KeyCode::ArrowLeft), Action::MoveLeft),
        (InputSource::key(KeyCode::ArrowRight), Action::MoveRight),
        // Abilities
        (InputSource::key(KeyCode::KeyA), Action::Metamorphosis),
        (InputSource::key(KeyCode::KeyS), Action::SummonWolves),
        (InputSource::key(KeyCode::KeyD), Action::Bite),
        // Menus
        (InputSource::key(KeyCode::Enter), Action::Confirm),
        (InputSource::key(KeyCode::KeyH), Action::HowToPlay),
        (InputSource::key(KeyCode::KeyC), Action::Credits),
        (InputSource::key(KeyCode::Backspace), Action::Back),
        (InputSource::key(KeyCode::KeyR), Action::Restart),
        (InputSource::key(KeyCode::KeyM), Action::MainMenu),
        (InputSource::key(KeyCode::Escape), Action::Quit),
    ]
}

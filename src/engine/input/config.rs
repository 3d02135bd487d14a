// Key binding configuration and remapping

use super::action::{default_bindings, Action, InputSource};
use std::collections::HashMap;

/// Maps input sources (keys) to game actions
///
/// One source drives at most one action; one action may have several sources.
#[derive(Debug, Clone)]
pub struct InputConfig {
    bindings: HashMap<InputSource, Action>,
}

impl InputConfig {
    /// Create a configuration with no bindings
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Create a configuration from a list of bindings
    pub fn from_bindings(bindings: Vec<(InputSource, Action)>) -> Self {
        let mut config = Self::empty();
        for (source, action) in bindings {
            config.bind(source, action);
        }
        config
    }

    /// Bind a source to an action, replacing whatever the source drove before
    pub fn bind(&mut self, source: InputSource, action: Action) {
        if let Some(previous) = self.bindings.insert(source, action) {
            if previous != action {
                log::debug!("Rebound {:?}: {:?} -> {:?}", source, previous, action);
            }
        }
    }

    /// Get the action bound to an input source
    pub fn action_for(&self, source: InputSource) -> Option<Action> {
        self.bindings.get(&source).copied()
    }

}

impl Default for InputConfig {
    fn default() -> Self {
        Self::from_bindings(default_bindings())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::KeyCode;

    #[test]
    fn test_defaults_bind_arrows() {
        let config = InputConfig::default();
        assert_eq!(
            config.action_for(InputSource::key(KeyCode::ArrowUp)),
            Some(Action::MoveUp)
        );
        assert_eq!(
            config.action_for(InputSource::key(KeyCode::KeyA)),
            Some(Action::Metamorphosis)
        );
    }

    #[test]
    fn test_rebind_source() {
        let mut config = InputConfig::empty();
        let source = InputSource::key(KeyCode::KeyW);

        config.bind(source, Action::MoveUp);
        config.bind(source, Action::Bite);

        assert_eq!(config.action_for(source), Some(Action::Bite));
    }

    #[test]
    fn test_several_keys_per_action() {
        let config = InputConfig::from_bindings(vec![
            (InputSource::key(KeyCode::ArrowLeft), Action::MoveLeft),
            (InputSource::key(KeyCode::KeyJ), Action::MoveLeft),
        ]);
        assert_eq!(
            config.action_for(InputSource::key(KeyCode::KeyJ)),
            Some(Action::MoveLeft)
        );
        assert_eq!(
            config.action_for(InputSource::key(KeyCode::ArrowLeft)),
            Some(Action::MoveLeft)
        );
    }
}

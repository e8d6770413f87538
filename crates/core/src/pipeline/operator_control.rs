use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatorCommand {
    /// Forget every tracked identity.
    Reset,
    /// Stop the frame loop.
    Quit,
}

/// Source of operator input, polled once after each frame is rendered.
pub trait OperatorControl: Send {
    fn poll(&mut self, frame_index: usize) -> Option<OperatorCommand>;
}

/// Operator that never issues commands.
pub struct NoOperatorControl;

impl OperatorControl for NoOperatorControl {
    fn poll(&mut self, _frame_index: usize) -> Option<OperatorCommand> {
        None
    }
}

/// Issues pre-recorded commands after specific frames.
pub struct ScriptedOperatorControl {
    commands: HashMap<usize, OperatorCommand>,
}

impl ScriptedOperatorControl {
    pub fn new(commands: HashMap<usize, OperatorCommand>) -> Self {
        Self { commands }
    }
}

impl OperatorControl for ScriptedOperatorControl {
    fn poll(&mut self, frame_index: usize) -> Option<OperatorCommand> {
        self.commands.remove(&frame_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_operator_never_commands() {
        let mut control = NoOperatorControl;
        assert!((0..10).all(|i| control.poll(i).is_none()));
    }

    #[test]
    fn test_scripted_fires_once_at_frame() {
        let mut control =
            ScriptedOperatorControl::new(HashMap::from([(2, OperatorCommand::Reset)]));
        assert_eq!(control.poll(1), None);
        assert_eq!(control.poll(2), Some(OperatorCommand::Reset));
        assert_eq!(control.poll(2), None);
    }

    #[test]
    fn test_command_serde_names() {
        let cmd: OperatorCommand = serde_json::from_str(r#""quit""#).unwrap();
        assert_eq!(cmd, OperatorCommand::Quit);
    }
}

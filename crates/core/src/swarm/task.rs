//! # Atomic Tasks
//!
//! One file, one agent, one session. The instruction text is the only place
//! the save-tool requirement is stated to the model; the executor checks the
//! tool's write ledger afterwards.

use crate::blueprint::TaskSpec;
use crate::error::PathError;
use crate::skills::tools::file_tools::FILE_WRITER_DISPLAY_NAME;
use crate::workspace;
use serde::Serialize;

/// A single file-build assignment handed to a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AtomicTask {
    /// File name as the planner wrote it
    pub name: String,
    /// Canonical `/`-separated path inside the workspace
    pub file_name: String,
    /// Full instruction given to the agent
    pub instruction: String,
    /// What a completed session must produce
    pub expected_output: String,
}

impl AtomicTask {
    pub fn from_spec(spec: &TaskSpec) -> Result<Self, PathError> {
        let file_name = workspace::canonical_name(&spec.name)?;

        let instruction = format!(
            "GOAL: {description}\n\n\
             CRITICAL REQUIREMENT: You MUST use the '{tool}' tool to save your code. \
             Do not simply output code in the chat. If you don't use the tool, you fail.\n\
             Save as: {file_name}",
            description = spec.description.trim(),
            tool = FILE_WRITER_DISPLAY_NAME,
            file_name = file_name,
        );

        let expected_output = format!(
            "A confirmation message from the {} tool that {} was saved.",
            FILE_WRITER_DISPLAY_NAME, file_name
        );

        Ok(Self {
            name: spec.name.clone(),
            file_name,
            instruction,
            expected_output,
        })
    }

    /// The prompt sent to the session: instruction plus expected output
    pub fn prompt(&self) -> String {
        format!(
            "{}\n\nEXPECTED OUTPUT: {}",
            self.instruction, self.expected_output
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_names_file_and_tool() {
        let spec = TaskSpec::new("./src/alerts.py", "Send SMS alerts via Twilio", "Coder");
        let task = AtomicTask::from_spec(&spec).unwrap();

        assert_eq!(task.file_name, "src/alerts.py");
        assert!(task.instruction.starts_with("GOAL: Send SMS alerts via Twilio"));
        assert!(task.instruction.contains("MUST use the 'Advanced FileWriter' tool"));
        assert!(task.instruction.contains("If you don't use the tool, you fail."));
        assert!(task.instruction.ends_with("Save as: src/alerts.py"));
        assert!(task.expected_output.contains("src/alerts.py was saved"));
        assert!(task.prompt().contains("EXPECTED OUTPUT:"));
    }

    #[test]
    fn test_rejects_escaping_name() {
        let spec = TaskSpec::new("../x.py", "nope", "Coder");
        assert!(AtomicTask::from_spec(&spec).is_err());
    }
}

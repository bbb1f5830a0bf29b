//! Tool descriptor types shared with the surrounding execution engine

use serde::{Deserialize, Serialize};

/// A tool as the execution engine describes it to a runtime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tool {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub source: ToolSource,
}

/// Where the tool's source came from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<GitRepo>,
}

impl ToolSource {
    pub fn is_git(&self) -> bool {
        self.repo.is_some()
    }
}

/// A git checkout: repository root URL plus the checked-out revision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitRepo {
    pub root: String,
    #[serde(default)]
    pub revision: String,
}

impl Tool {
    /// Convenience constructor for a git-sourced tool.
    pub fn from_git(name: impl Into<String>, root: impl Into<String>, revision: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: ToolSource {
                repo: Some(GitRepo {
                    root: root.into(),
                    revision: revision.into(),
                }),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tool_is_not_git() {
        assert!(!Tool::default().source.is_git());
    }

    #[test]
    fn git_tool_is_git() {
        let tool = Tool::from_git("t", "https://github.com/acme/tool", "deadbeef");
        assert!(tool.source.is_git());
        assert_eq!(tool.source.repo.unwrap().revision, "deadbeef");
    }

    #[test]
    fn deserializes_without_repo() {
        let tool: Tool = serde_json::from_str(r#"{"name":"t","source":{}}"#).unwrap();
        assert!(!tool.source.is_git());
    }
}

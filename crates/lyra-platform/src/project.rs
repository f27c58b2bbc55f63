//! Managed-project detection.
//!
//! A directory is "managed" when it carries `.planning/STATE.md`. The router
//! only consumes the boolean; the context hook additionally surfaces the
//! first lines of the state file and any open debug sessions under
//! `.planning/debug/`.

use std::path::{Path, PathBuf};

/// Directory holding planning state.
pub const PLANNING_DIR: &str = ".planning";
/// State marker file inside [`PLANNING_DIR`].
pub const STATE_FILE: &str = "STATE.md";
/// Debug-session directory inside [`PLANNING_DIR`].
pub const DEBUG_DIR: &str = "debug";

const SNIPPET_LINES: usize = 25;
const LISTED_SESSIONS: usize = 3;

/// Snapshot of the planning state found in a project directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectState {
    /// Whether the state marker exists.
    pub has_managed_project: bool,

    /// First lines of the state file, when readable.
    pub state_snippet: Option<String>,

    /// Debug session file names (`*.md`), sorted.
    pub debug_sessions: Vec<String>,
}

impl ProjectState {
    /// Cheap existence check used by the router. I/O errors read as `false`.
    pub fn is_managed(dir: &Path) -> bool {
        state_path(dir).is_file()
    }

    /// Read the full snapshot. Unreadable pieces are simply left empty.
    pub fn read(dir: &Path) -> Self {
        let state = state_path(dir);
        let has_managed_project = state.is_file();

        let state_snippet = if has_managed_project {
            match std::fs::read_to_string(&state) {
                Ok(content) => Some(
                    content
                        .lines()
                        .take(SNIPPET_LINES)
                        .collect::<Vec<_>>()
                        .join("\n"),
                ),
                Err(e) => {
                    tracing::debug!(path = %state.display(), error = %e, "state file unreadable");
                    None
                }
            }
        } else {
            None
        };

        Self {
            has_managed_project,
            state_snippet,
            debug_sessions: debug_sessions(dir),
        }
    }

    /// Render the snapshot as context lines. Empty when there is nothing to say.
    pub fn render(&self) -> Vec<String> {
        let mut lines = Vec::new();

        if let Some(ref snippet) = self.state_snippet {
            lines.push("[GSD Project State]".to_string());
            lines.push(snippet.clone());
            lines.push(String::new());
        }

        if !self.debug_sessions.is_empty() {
            lines.push(format!(
                "[Active Debug Sessions: {}]",
                self.debug_sessions.len()
            ));
            for session in self.debug_sessions.iter().take(LISTED_SESSIONS) {
                lines.push(format!("  - {session}"));
            }
            lines.push(String::new());
        }

        lines
    }
}

fn state_path(dir: &Path) -> PathBuf {
    dir.join(PLANNING_DIR).join(STATE_FILE)
}

fn debug_sessions(dir: &Path) -> Vec<String> {
    let debug_dir = dir.join(PLANNING_DIR).join(DEBUG_DIR);
    let Ok(entries) = std::fs::read_dir(&debug_dir) else {
        return Vec::new();
    };

    let mut sessions: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.ends_with(".md"))
        .collect();
    sessions.sort();
    sessions
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn managed_dir(state: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let planning = dir.path().join(PLANNING_DIR);
        fs::create_dir_all(&planning).unwrap();
        fs::write(planning.join(STATE_FILE), state).unwrap();
        dir
    }

    #[test]
    fn empty_dir_is_not_managed() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!ProjectState::is_managed(dir.path()));
        let state = ProjectState::read(dir.path());
        assert_eq!(state, ProjectState::default());
        assert!(state.render().is_empty());
    }

    #[test]
    fn missing_dir_is_not_managed() {
        assert!(!ProjectState::is_managed(Path::new("/nonexistent/lyra/project")));
    }

    #[test]
    fn state_file_marks_managed() {
        let dir = managed_dir("# State\nphase: 2\n");
        assert!(ProjectState::is_managed(dir.path()));
        let state = ProjectState::read(dir.path());
        assert!(state.has_managed_project);
        assert_eq!(state.state_snippet.as_deref(), Some("# State\nphase: 2"));
    }

    #[test]
    fn snippet_is_truncated() {
        let body: String = (1..=40).map(|i| format!("line {i}\n")).collect();
        let dir = managed_dir(&body);
        let state = ProjectState::read(dir.path());
        let snippet = state.state_snippet.unwrap();
        assert_eq!(snippet.lines().count(), SNIPPET_LINES);
        assert!(snippet.ends_with("line 25"));
    }

    #[test]
    fn debug_sessions_listed_and_capped() {
        let dir = managed_dir("state");
        let debug = dir.path().join(PLANNING_DIR).join(DEBUG_DIR);
        fs::create_dir_all(&debug).unwrap();
        for name in ["d.md", "a.md", "c.md", "b.md", "notes.txt"] {
            fs::write(debug.join(name), "").unwrap();
        }

        let state = ProjectState::read(dir.path());
        assert_eq!(state.debug_sessions, vec!["a.md", "b.md", "c.md", "d.md"]);

        let lines = state.render();
        assert!(lines.contains(&"[Active Debug Sessions: 4]".to_string()));
        assert!(lines.contains(&"  - c.md".to_string()));
        assert!(!lines.contains(&"  - d.md".to_string()));
    }

    #[test]
    fn render_includes_state_header() {
        let dir = managed_dir("phase: 1");
        let lines = ProjectState::read(dir.path()).render();
        assert_eq!(lines[0], "[GSD Project State]");
        assert_eq!(lines[1], "phase: 1");
    }
}

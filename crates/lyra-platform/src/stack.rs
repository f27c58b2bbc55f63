//! Technology stack detection from manifest files.
//!
//! Purely informational: the labels are printed by the context hook and
//! never feed into routing.

use std::path::Path;

use serde_json::Value;

/// npm dependency name -> display label.
const NPM_LABELS: &[(&str, &str)] = &[
    // Frontend
    ("react", "React"),
    ("next", "Next.js"),
    ("vue", "Vue"),
    ("svelte", "Svelte"),
    ("angular", "Angular"),
    ("solid-js", "SolidJS"),
    ("astro", "Astro"),
    ("remix", "Remix"),
    ("nuxt", "Nuxt"),
    // Mobile
    ("expo", "Expo"),
    ("react-native", "React Native"),
    // Backend
    ("express", "Express"),
    ("fastify", "Fastify"),
    ("hono", "Hono"),
    ("@nestjs/core", "NestJS"),
    ("koa", "Koa"),
    // Data
    ("@supabase/supabase-js", "Supabase"),
    ("firebase", "Firebase"),
    ("prisma", "Prisma"),
    ("@prisma/client", "Prisma"),
    ("drizzle-orm", "Drizzle"),
    ("mongoose", "MongoDB"),
    ("pg", "PostgreSQL"),
    ("mysql2", "MySQL"),
    ("redis", "Redis"),
    // API
    ("graphql", "GraphQL"),
    ("@trpc/server", "tRPC"),
    ("trpc", "tRPC"),
    // State
    ("@tanstack/react-query", "TanStack Query"),
    ("zustand", "Zustand"),
    // Styling
    ("tailwindcss", "Tailwind"),
    // Testing
    ("vitest", "Vitest"),
    ("jest", "Jest"),
    ("@playwright/test", "Playwright"),
    // Language
    ("typescript", "TypeScript"),
    // Realtime
    ("socket.io", "Socket.IO"),
    ("ws", "WebSocket"),
    // 3D / games
    ("three", "Three.js"),
    ("@dimforge/rapier3d-compat", "Rapier3D"),
    ("babylonjs", "Babylon.js"),
    ("phaser", "Phaser"),
    // AI SDKs
    ("@anthropic-ai/sdk", "Anthropic SDK"),
    ("openai", "OpenAI SDK"),
    ("@google/generative-ai", "Gemini AI"),
];

/// Marker files -> label, for ecosystems detected by presence alone.
const MARKER_LABELS: &[(&[&str], &str)] = &[
    (&["requirements.txt", "pyproject.toml"], "Python"),
    (&["go.mod"], "Go"),
    (&["Cargo.toml"], "Rust"),
    (&["pom.xml", "build.gradle"], "Java/Kotlin"),
];

/// Stack labels for one directory, split the way the context hook prints
/// them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stack {
    /// Labels from `package.json` dependencies, deduplicated.
    pub packages: Vec<&'static str>,
    /// Ecosystems detected from marker files.
    pub ecosystems: Vec<&'static str>,
}

impl Stack {
    /// One `[Stack: ...]` line for all package labels, then one line per
    /// ecosystem.
    pub fn render(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.ecosystems.len() + 1);
        if !self.packages.is_empty() {
            lines.push(format!("[Stack: {}]", self.packages.join(", ")));
        }
        lines.extend(self.ecosystems.iter().map(|label| format!("[Stack: {label}]")));
        lines
    }
}

/// Detect the stack of `dir`.
pub fn detect_stack(dir: &Path) -> Stack {
    let mut packages = Vec::new();
    for label in npm_labels(dir) {
        if !packages.contains(&label) {
            packages.push(label);
        }
    }

    let ecosystems = MARKER_LABELS
        .iter()
        .filter(|(markers, _)| markers.iter().any(|m| dir.join(m).is_file()))
        .map(|(_, label)| *label)
        .collect();

    Stack {
        packages,
        ecosystems,
    }
}

fn npm_labels(dir: &Path) -> Vec<&'static str> {
    let path = dir.join("package.json");
    let Ok(contents) = std::fs::read_to_string(&path) else {
        return Vec::new();
    };
    let manifest: Value = match serde_json::from_str(&contents) {
        Ok(v) => v,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "package.json unparseable");
            return Vec::new();
        }
    };

    let has_dep = |name: &str| {
        ["dependencies", "devDependencies"]
            .iter()
            .any(|section| manifest.get(section).and_then(|d| d.get(name)).is_some())
    };

    NPM_LABELS
        .iter()
        .filter(|(dep, _)| has_dep(dep))
        .map(|(_, label)| *label)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn empty_dir_has_no_stack() {
        let dir = tempfile::tempdir().unwrap();
        let stack = detect_stack(dir.path());
        assert_eq!(stack, Stack::default());
        assert!(stack.render().is_empty());
    }

    #[test]
    fn npm_dependencies_and_dev_dependencies() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{
                "dependencies": { "next": "14", "react": "18", "@prisma/client": "5" },
                "devDependencies": { "prisma": "5", "vitest": "1" }
            }"#,
        )
        .unwrap();

        let stack = detect_stack(dir.path());
        assert_eq!(stack.packages, vec!["React", "Next.js", "Prisma", "Vitest"]);
        assert_eq!(stack.render(), vec!["[Stack: React, Next.js, Prisma, Vitest]"]);
    }

    #[test]
    fn each_marker_ecosystem_gets_its_own_line() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Cargo.toml"), "[package]").unwrap();
        fs::write(dir.path().join("pyproject.toml"), "").unwrap();
        fs::write(dir.path().join("requirements.txt"), "").unwrap();

        let stack = detect_stack(dir.path());
        assert_eq!(stack.ecosystems, vec!["Python", "Rust"]);
        assert_eq!(stack.render(), vec!["[Stack: Python]", "[Stack: Rust]"]);
    }

    #[test]
    fn packages_line_precedes_ecosystems() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{ "devDependencies": { "typescript": "5" } }"#,
        )
        .unwrap();
        fs::write(dir.path().join("go.mod"), "module x").unwrap();
        assert_eq!(
            detect_stack(dir.path()).render(),
            vec!["[Stack: TypeScript]", "[Stack: Go]"]
        );
    }

    #[test]
    fn malformed_package_json_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("package.json"), "{ broken").unwrap();
        fs::write(dir.path().join("go.mod"), "module x").unwrap();
        let stack = detect_stack(dir.path());
        assert!(stack.packages.is_empty());
        assert_eq!(stack.ecosystems, vec!["Go"]);
    }
}

//! Router configuration schema.
//!
//! The whole rule table is plain data: categories, their signal rules, the
//! fast-exit word lists and the decision thresholds. Operators can replace it
//! with a `lyra-config.json` (or `.toml`) file; when no file is present the
//! built-in table from [`RouterConfig::default`] is used.
//!
//! All structs accept both `snake_case` and `camelCase` field names via
//! `#[serde(alias)]`. Unknown fields are ignored.
//!
//! Legacy hook configs that only carry `route`, `description` and `examples`
//! per category still load: the id is derived from the route and a category
//! without signals inherits the built-in signals of the same id.
//!
//! # Configuration format
//!
//! ```json
//! {
//!   "confidenceFloor": 3,
//!   "categories": [
//!     {
//!       "id": "debug",
//!       "route": "/gsd:debug",
//!       "signals": [
//!         { "pattern": { "regex": "\\bdebug(?:ging)?\\b" }, "weight": 3, "negatable": true },
//!         { "pattern": { "distinct_terms": { "terms": ["error", "crash"], "at_least": 2 } }, "weight": 3 }
//!       ]
//!     }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

// ── Root config ──────────────────────────────────────────────────────────

/// Root configuration for the router.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Token printed before the route in hook output (`Lyra -> /gsd:debug`).
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Prompts shorter than this (in characters) are never routed.
    #[serde(default = "default_min_length", alias = "minLength")]
    pub min_length: usize,

    /// Prompts that open like a question and are shorter than this are
    /// treated as informational.
    #[serde(default = "default_question_max_length", alias = "questionMaxLength")]
    pub question_max_length: usize,

    /// Minimum winning score required to route.
    #[serde(default = "default_confidence_floor", alias = "confidenceFloor")]
    pub confidence_floor: u32,

    /// Number of characters inspected before a negatable match.
    #[serde(default = "default_negation_window", alias = "negationWindow")]
    pub negation_window: usize,

    /// Command prefixes that mark operational input (`git ...`).
    #[serde(default = "default_vcs_prefixes", alias = "vcsPrefixes")]
    pub vcs_prefixes: Vec<String>,

    /// Words that, at the start of a prompt, mark a conversational
    /// continuation rather than a new intent.
    #[serde(default = "default_acknowledgements")]
    pub acknowledgements: Vec<String>,

    /// Words that, at the start of a prompt, mark a question.
    #[serde(default = "default_question_openers", alias = "questionOpeners")]
    pub question_openers: Vec<String>,

    /// Cues that cancel a negatable signal when found just before it.
    #[serde(default = "default_negation_cues", alias = "negationCues")]
    pub negation_cues: Vec<String>,

    /// Weight of the phrase signal compiled from each category example.
    /// 0 disables example matching.
    #[serde(default = "default_example_weight", alias = "exampleWeight")]
    pub example_weight: u32,

    /// Redirect applied when the working directory already holds a managed
    /// project. `None` disables the override.
    #[serde(default = "default_managed_redirect", alias = "managedRedirect")]
    pub managed_redirect: Option<RedirectConfig>,

    /// Routing categories, evaluated independently.
    #[serde(default = "default_categories")]
    pub categories: Vec<CategoryConfig>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            min_length: default_min_length(),
            question_max_length: default_question_max_length(),
            confidence_floor: default_confidence_floor(),
            negation_window: default_negation_window(),
            vcs_prefixes: default_vcs_prefixes(),
            acknowledgements: default_acknowledgements(),
            question_openers: default_question_openers(),
            negation_cues: default_negation_cues(),
            example_weight: default_example_weight(),
            managed_redirect: default_managed_redirect(),
            categories: default_categories(),
        }
    }
}

/// Category redirect used for the managed-project override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectConfig {
    /// Category whose win triggers the redirect.
    pub from: String,
    /// Category routed to instead.
    pub to: String,
}

// ── Categories & signals ─────────────────────────────────────────────────

/// A routing destination and the signals that point at it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryConfig {
    /// Unique identifier (`"debug"`, `"new-project"`). When blank it is
    /// derived from `route`, see [`CategoryConfig::resolved_id`].
    #[serde(default)]
    pub id: String,

    /// Surface form printed in hook output (`"/gsd:debug"`).
    pub route: String,

    /// Human-readable description, shown by `lyra categories`.
    #[serde(default)]
    pub description: String,

    /// Sample prompts that should land here.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,

    /// Weighted signal rules.
    #[serde(default)]
    pub signals: Vec<SignalSpec>,
}

impl CategoryConfig {
    /// Create an empty category.
    pub fn new(id: impl Into<String>, route: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            route: route.into(),
            description: String::new(),
            examples: Vec::new(),
            signals: Vec::new(),
        }
    }

    /// Set the description.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Append an example prompt.
    pub fn example(mut self, example: impl Into<String>) -> Self {
        self.examples.push(example.into());
        self
    }

    /// Append a signal rule.
    pub fn signal(mut self, signal: SignalSpec) -> Self {
        self.signals.push(signal);
        self
    }

    /// The configured id, or one derived from the route by dropping the
    /// leading `/` and a `gsd:` namespace (`/gsd:debug` -> `debug`).
    pub fn resolved_id(&self) -> String {
        let id = self.id.trim();
        if !id.is_empty() {
            return id.to_string();
        }
        let route = self.route.trim();
        let route = route.strip_prefix('/').unwrap_or(route);
        route.strip_prefix("gsd:").unwrap_or(route).to_string()
    }

    /// Signals to compile. A category that declares none inherits the
    /// built-in signals of the category with the same id, if any.
    pub fn resolved_signals(&self) -> Vec<SignalSpec> {
        if !self.signals.is_empty() {
            return self.signals.clone();
        }
        let id = self.resolved_id();
        default_categories()
            .into_iter()
            .find(|c| c.id == id)
            .map(|c| c.signals)
            .unwrap_or_default()
    }
}

/// How a signal recognises its cue in the prompt.
///
/// Serialized externally tagged: `{ "phrase": "from scratch" }`,
/// `{ "min_length": 300 }`, `{ "distinct_terms": { "terms": [...], "at_least": 2 } }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternSpec {
    /// Plain substring.
    Literal(String),
    /// Phrase bounded by word boundaries on both sides.
    Phrase(String),
    /// Regular expression over the lowercased prompt.
    Regex(String),
    /// Holistic: prompt is at least this many characters long.
    #[serde(alias = "minLength")]
    MinLength(usize),
    /// Holistic: at least `at_least` distinct terms occur, each matched at a
    /// word start.
    #[serde(alias = "distinctTerms")]
    DistinctTerms {
        /// Candidate terms.
        terms: Vec<String>,
        /// How many distinct terms must be present.
        #[serde(alias = "atLeast")]
        at_least: usize,
    },
}

/// One weighted signal rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalSpec {
    /// The cue to look for.
    pub pattern: PatternSpec,

    /// Evidence contributed when the rule fires. Must be positive.
    #[serde(default = "default_weight")]
    pub weight: u32,

    /// Whether a negation cue just before the match cancels it.
    #[serde(default)]
    pub negatable: bool,

    /// Only applies to prompts at least this long.
    #[serde(default, alias = "minLength", skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,

    /// Companion patterns that must all be present somewhere in the prompt.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requires: Vec<PatternSpec>,
}

impl SignalSpec {
    /// Signal from an arbitrary pattern.
    pub fn new(pattern: PatternSpec, weight: u32) -> Self {
        Self {
            pattern,
            weight,
            negatable: false,
            min_length: None,
            requires: Vec::new(),
        }
    }

    /// Substring signal.
    pub fn literal(text: impl Into<String>, weight: u32) -> Self {
        Self::new(PatternSpec::Literal(text.into()), weight)
    }

    /// Word-boundary phrase signal.
    pub fn phrase(text: impl Into<String>, weight: u32) -> Self {
        Self::new(PatternSpec::Phrase(text.into()), weight)
    }

    /// Regular-expression signal.
    pub fn regex(pattern: impl Into<String>, weight: u32) -> Self {
        Self::new(PatternSpec::Regex(pattern.into()), weight)
    }

    /// Mark the signal as cancellable by a preceding negation cue.
    pub fn negatable(mut self) -> Self {
        self.negatable = true;
        self
    }

    /// Restrict the signal to prompts of at least `len` characters.
    pub fn min_length(mut self, len: usize) -> Self {
        self.min_length = Some(len);
        self
    }

    /// Require a companion pattern.
    pub fn requires(mut self, pattern: PatternSpec) -> Self {
        self.requires.push(pattern);
        self
    }
}

// ── Defaults ─────────────────────────────────────────────────────────────

fn default_prefix() -> String {
    "Lyra ->".into()
}
fn default_min_length() -> usize {
    30
}
fn default_question_max_length() -> usize {
    100
}
fn default_confidence_floor() -> u32 {
    3
}
fn default_negation_window() -> usize {
    15
}
fn default_weight() -> u32 {
    1
}
fn default_example_weight() -> u32 {
    1
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn default_vcs_prefixes() -> Vec<String> {
    strings(&["git "])
}

fn default_acknowledgements() -> Vec<String> {
    strings(&[
        "yes", "no", "ok", "sure", "thanks", "done", "stop", "cancel", "continue", "go ahead",
        "looks good", "commit", "push", "pull", "merge", "deploy",
    ])
}

/// Trailing spaces are significant: `"do "` opens a question, `"don't"` does not.
fn default_question_openers() -> Vec<String> {
    strings(&[
        "what", "how", "why", "where", "when", "who", "can", "does", "is ", "are ", "do ",
        "did ", "should", "could", "would", "which", "explain", "show", "list", "tell",
        "describe", "find", "get", "read",
    ])
}

fn default_negation_cues() -> Vec<String> {
    strings(&[
        "don't", "don\u{2019}t", "dont", "do not", "no", "never", "stop", "cancel", "without",
    ])
}

fn default_managed_redirect() -> Option<RedirectConfig> {
    Some(RedirectConfig {
        from: "new-project".into(),
        to: "plan-phase".into(),
    })
}

const BUILD_VERBS: &str =
    r"\b(?:build|create|scaffold|bootstrap|spin up|make (?:me )?an?|start an?)\b";
const PROJECT_NOUNS: &str = r"\b(?:apps?|application|website|site|web app|dashboard|game|tool|platform|service|api|saas|cli|bot|extension|plugin|project|system|module|tracker|landing page)\b";
const FEATURE_VERBS: &str = r"\b(?:add|implement|integrate|create)\b";
const FEATURE_NOUNS: &str =
    r"\b(?:features?|support|integration|endpoints?|page|screen|flow|workflow)\b";
/// A write verb whose object is a test (`add tests`, `create unit tests`).
const TEST_REQUEST: &str = r"\b(?:write|add|create|generate)\s+(?:(?:some|more|the|a|an|new|missing|unit|integration|e2e|end-to-end|regression|failing)\s+){0,3}(?:tests?|specs?|test cases?|test suite)\b";
const BUG_WORDS: &str =
    r"\b(?:bugs?|crash\w*|errors?|exceptions?|broken|failing|fails|issue|stack ?trace)\b";

fn bug_terms() -> Vec<String> {
    strings(&[
        "error",
        "crash",
        "bug",
        "exception",
        "broken",
        "fail",
        "stack trace",
        "traceback",
        "regression",
        "not working",
        "segfault",
        "panic",
        "undefined",
    ])
}

/// The built-in routing table.
pub fn default_categories() -> Vec<CategoryConfig> {
    vec![
        CategoryConfig::new("new-project", "/gsd:new-project")
            .describe("Start a brand-new project from scratch")
            .example("build a dashboard to track my monthly expenses")
            .example("create a saas app for invoicing freelancers")
            .signal(
                SignalSpec::regex(BUILD_VERBS, 3)
                    .negatable()
                    .requires(PatternSpec::Regex(PROJECT_NOUNS.into())),
            )
            .signal(SignalSpec::regex(BUILD_VERBS, 1).negatable())
            .signal(SignalSpec::phrase("new project", 3).negatable())
            .signal(SignalSpec::phrase("from scratch", 2))
            .signal(SignalSpec::regex(r"\b(?:mvp|prototype|greenfield)\b", 2).min_length(60))
            .signal(SignalSpec::new(PatternSpec::MinLength(300), 1)),
        CategoryConfig::new("plan-phase", "/gsd:plan-phase")
            .describe("Plan the next phase or feature of an existing project")
            .example("plan the next phase: add stripe billing support")
            .example("implement the export feature for the reports page")
            .signal(SignalSpec::regex(
                r"\b(?:(?:next|new|upcoming|plan(?: the)?) phase|phase \d+)\b",
                3,
            ))
            .signal(
                SignalSpec::regex(FEATURE_VERBS, 3)
                    .negatable()
                    .requires(PatternSpec::Regex(FEATURE_NOUNS.into())),
            )
            .signal(SignalSpec::regex(r"\b(?:roadmap|milestones?)\b", 2))
            .signal(SignalSpec::regex(
                r"\b(?:to|in|into) (?:the|this|our|my) (?:existing )?(?:app|project|codebase)\b",
                2,
            )),
        CategoryConfig::new("debug", "/gsd:debug")
            .describe("Investigate and fix a bug, crash or failure")
            .example("the checkout page shows an error and then the app crashes")
            .example("debug why the websocket drops after a minute")
            .signal(SignalSpec::regex(r"\bdebug(?:ging)?\b", 3).negatable())
            .signal(
                SignalSpec::new(
                    PatternSpec::DistinctTerms {
                        terms: bug_terms(),
                        at_least: 2,
                    },
                    3,
                )
                .negatable(),
            )
            .signal(
                SignalSpec::regex(r"\b(?:bugs?|crash\w*|errors?|exceptions?|broken)\b", 1)
                    .negatable(),
            )
            .signal(
                SignalSpec::regex(r"\bfix(?:ing)?\b", 2)
                    .negatable()
                    .requires(PatternSpec::Regex(BUG_WORDS.into())),
            ),
        CategoryConfig::new("security-review", "/security-review")
            .describe("Audit code or infrastructure for security problems")
            .example("run a security review of the auth middleware")
            .example("check the upload handler for xss and sql injection")
            .signal(SignalSpec::regex(r"\bsecurity (?:review|audit|scan|check)\b", 3))
            .signal(SignalSpec::regex(r"\bvulnerab\w*", 3))
            .signal(SignalSpec::regex(
                r"\b(?:owasp|xss|csrf|ssrf|sql injection|penetration test|pentest|cve-\d+)\b",
                3,
            ))
            .signal(
                SignalSpec::regex(
                    r"\b(?:secure|security|auth|authentication|secrets?|leak\w*)\b",
                    1,
                )
                .negatable(),
            )
            .signal(SignalSpec::phrase("audit", 1)),
        CategoryConfig::new("code-review", "/code-review")
            .describe("Review existing changes for quality and correctness")
            .example("review my changes on this branch before I open the pr")
            .signal(SignalSpec::phrase("code review", 3))
            .signal(
                SignalSpec::phrase("review", 2).negatable().requires(PatternSpec::Regex(
                    r"\b(?:code|changes|diff|pr|pull request|commits?|branch|implementation)\b"
                        .into(),
                )),
            )
            .signal(SignalSpec::phrase("review", 1).negatable())
            .signal(SignalSpec::regex(r"\b(?:pull request|pr|diff)\b", 1)),
        CategoryConfig::new("tdd", "/tdd")
            .describe("Write tests first, or add missing test coverage")
            .example("write unit tests for the invoice calculator")
            .signal(SignalSpec::regex(r"\b(?:tdd|test[- ]driven)\b", 3))
            .signal(
                SignalSpec::regex(r"\b(?:write|add|create|generate)\b", 3)
                    .negatable()
                    .requires(PatternSpec::Regex(
                        r"\b(?:tests?|specs?|test cases?|test suite)\b".into(),
                    )),
            )
            .signal(SignalSpec::regex(TEST_REQUEST, 2).negatable())
            .signal(SignalSpec::regex(
                r"\b(?:coverage|unit tests?|integration tests?)\b",
                1,
            )),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_thresholds() {
        let cfg = RouterConfig::default();
        assert_eq!(cfg.prefix, "Lyra ->");
        assert_eq!(cfg.min_length, 30);
        assert_eq!(cfg.question_max_length, 100);
        assert_eq!(cfg.confidence_floor, 3);
        assert_eq!(cfg.negation_window, 15);
    }

    #[test]
    fn default_categories_have_unique_ids() {
        let cfg = RouterConfig::default();
        let mut ids: Vec<&str> = cfg.categories.iter().map(|c| c.id.as_str()).collect();
        let before = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), before);
        assert_eq!(before, 6);
    }

    #[test]
    fn default_redirect_targets_exist() {
        let cfg = RouterConfig::default();
        let redirect = cfg.managed_redirect.clone().unwrap();
        let ids: Vec<String> = cfg.categories.iter().map(|c| c.resolved_id()).collect();
        assert!(ids.contains(&redirect.from));
        assert!(ids.contains(&redirect.to));
    }

    #[test]
    fn default_weights_are_positive() {
        let cfg = RouterConfig::default();
        for cat in &cfg.categories {
            assert!(!cat.signals.is_empty(), "{} has no signals", cat.id);
            for sig in &cat.signals {
                assert!(sig.weight > 0, "{} has a zero-weight signal", cat.id);
            }
        }
    }

    #[test]
    fn empty_json_yields_defaults() {
        let cfg: RouterConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.confidence_floor, 3);
        assert_eq!(cfg.categories.len(), 6);
        assert!(cfg.managed_redirect.is_some());
    }

    #[test]
    fn camel_case_aliases_accepted() {
        let json = r#"{
            "confidenceFloor": 5,
            "minLength": 10,
            "questionMaxLength": 40,
            "negationWindow": 8,
            "managedRedirect": null
        }"#;
        let cfg: RouterConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.confidence_floor, 5);
        assert_eq!(cfg.min_length, 10);
        assert_eq!(cfg.question_max_length, 40);
        assert_eq!(cfg.negation_window, 8);
        assert!(cfg.managed_redirect.is_none());
    }

    #[test]
    fn pattern_spec_externally_tagged() {
        let json = r#"[
            { "phrase": "from scratch" },
            { "min_length": 300 },
            { "distinct_terms": { "terms": ["error", "crash"], "at_least": 2 } }
        ]"#;
        let patterns: Vec<PatternSpec> = serde_json::from_str(json).unwrap();
        assert_eq!(patterns[0], PatternSpec::Phrase("from scratch".into()));
        assert_eq!(patterns[1], PatternSpec::MinLength(300));
        assert_eq!(
            patterns[2],
            PatternSpec::DistinctTerms {
                terms: vec!["error".into(), "crash".into()],
                at_least: 2,
            }
        );
    }

    #[test]
    fn signal_weight_defaults_to_one() {
        let sig: SignalSpec =
            serde_json::from_str(r#"{ "pattern": { "literal": "owasp" } }"#).unwrap();
        assert_eq!(sig.weight, 1);
        assert!(!sig.negatable);
        assert!(sig.min_length.is_none());
        assert!(sig.requires.is_empty());
    }

    #[test]
    fn category_without_optional_fields() {
        let cat: CategoryConfig =
            serde_json::from_str(r#"{ "id": "docs", "route": "/docs" }"#).unwrap();
        assert_eq!(cat.id, "docs");
        assert!(cat.description.is_empty());
        assert!(cat.signals.is_empty());
    }

    #[test]
    fn id_defaults_from_route() {
        let cat: CategoryConfig = serde_json::from_str(
            r#"{ "route": "/gsd:new-project", "description": "Start fresh" }"#,
        )
        .unwrap();
        assert!(cat.id.is_empty());
        assert_eq!(cat.resolved_id(), "new-project");
        assert_eq!(CategoryConfig::new("", "/tdd").resolved_id(), "tdd");
        assert_eq!(CategoryConfig::new(" docs ", "/gsd:x").resolved_id(), "docs");
    }

    #[test]
    fn signal_less_category_inherits_builtin_signals() {
        let legacy = CategoryConfig::new("", "/gsd:debug");
        let builtin = default_categories().remove(2);
        assert_eq!(builtin.id, "debug");
        assert_eq!(legacy.resolved_signals(), builtin.signals);

        let custom = CategoryConfig::new("", "/docs");
        assert!(custom.resolved_signals().is_empty());

        let own = CategoryConfig::new("debug", "/debug").signal(SignalSpec::phrase("oops", 3));
        assert_eq!(own.resolved_signals().len(), 1);
    }

    #[test]
    fn example_weight_is_configurable() {
        assert_eq!(RouterConfig::default().example_weight, 1);
        let cfg: RouterConfig = serde_json::from_str(r#"{ "exampleWeight": 0 }"#).unwrap();
        assert_eq!(cfg.example_weight, 0);
    }

    #[test]
    fn signal_builder_chains() {
        let sig = SignalSpec::phrase("build", 3)
            .negatable()
            .min_length(40)
            .requires(PatternSpec::Literal("app".into()));
        assert!(sig.negatable);
        assert_eq!(sig.min_length, Some(40));
        assert_eq!(sig.requires.len(), 1);
    }

    #[test]
    fn serialize_roundtrip_preserves_categories() {
        let cfg = RouterConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: RouterConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.categories.len(), cfg.categories.len());
        assert_eq!(back.categories[0].signals, cfg.categories[0].signals);
    }
}

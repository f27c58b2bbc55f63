//! `lyra explain` -- show how a prompt is classified.
//!
//! Runs the full pipeline on a prompt given on the command line and prints
//! the fast-exit reason, or the per-category scores, the rules that fired
//! or were negated, and the final decision.
//!
//! # Examples
//!
//! ```text
//! lyra explain "the checkout page shows an error and then the app crashes"
//! lyra explain --managed-project --json "build a reporting module for this app"
//! ```

use clap::Args;
use comfy_table::{Table, presets::UTF8_FULL};

use lyra_core::Explanation;
use lyra_types::routing::PromptContext;

/// Arguments for `lyra explain`.
#[derive(Args)]
pub struct ExplainArgs {
    /// Prompt text to classify.
    pub prompt: String,

    /// Classify as if the project were managed.
    #[arg(long)]
    pub managed_project: bool,

    /// Emit the trace as JSON.
    #[arg(long)]
    pub json: bool,

    /// Config file path (overrides auto-discovery).
    #[arg(short, long)]
    pub config: Option<String>,
}

/// Run `lyra explain`.
pub fn run(args: ExplainArgs) -> anyhow::Result<()> {
    let cfg = super::load_config(args.config.as_deref())?;
    let classifier = super::build_classifier(&cfg)?;
    let explanation = classifier.explain(&PromptContext::new(&args.prompt, args.managed_project));

    if args.json {
        println!("{}", serde_json::to_string_pretty(&explanation)?);
    } else {
        print!("{}", render(&explanation));
    }
    Ok(())
}

/// Human-readable trace.
pub fn render(e: &Explanation) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "prompt: {:?} ({} chars, managed project: {})\n",
        e.prompt, e.length, e.has_managed_project
    ));

    if let Some(exit) = e.fast_exit {
        out.push_str(&format!("fast exit: {exit}\n"));
        out.push_str("decision: NONE\n");
        return out;
    }

    let mut scores = Table::new();
    scores.load_preset(UTF8_FULL);
    scores.set_header(vec!["Category", "Score"]);
    for (id, score) in e.scores.iter() {
        scores.add_row(vec![id.to_string(), score.to_string()]);
    }
    out.push_str(&format!("{scores}\n"));

    if !e.matched.is_empty() || !e.negated.is_empty() {
        let mut rules = Table::new();
        rules.load_preset(UTF8_FULL);
        rules.set_header(vec!["Category", "Signal", "Weight", "Status"]);
        for ev in &e.matched {
            rules.add_row(vec![
                ev.category.clone(),
                ev.signal.clone(),
                ev.weight.to_string(),
                "matched".to_string(),
            ]);
        }
        for ev in &e.negated {
            rules.add_row(vec![
                ev.category.clone(),
                ev.signal.clone(),
                ev.weight.to_string(),
                "negated".to_string(),
            ]);
        }
        out.push_str(&format!("{rules}\n"));
    }

    let decision = &e.decision;
    match &decision.redirected_from {
        Some(from) => out.push_str(&format!(
            "decision: {} (score {}, redirected from {from})\n",
            decision.label(),
            decision.score
        )),
        None => out.push_str(&format!(
            "decision: {} (score {})\n",
            decision.label(),
            decision.score
        )),
    }
    if let Some(ref line) = e.output {
        out.push_str(&format!("output: {line}\n"));
    }
    out
}

//! HTML pages
//!
//! Pages are Tera templates compiled into the binary. Every template ends
//! in `.html`, so interpolated values are autoescaped.

use std::sync::OnceLock;

use axum::http::StatusCode;
use newsdesk_core::domain::run::RunStep;
use newsdesk_runner::Completion;
use tera::{Context, Tera};

static TEMPLATES: OnceLock<Tera> = OnceLock::new();

fn templates() -> &'static Tera {
    TEMPLATES.get_or_init(|| {
        let mut tera = Tera::default();
        if let Err(e) = tera.add_raw_templates(vec![
            ("base.html", include_str!("../../templates/base.html")),
            ("form.html", include_str!("../../templates/form.html")),
            ("index.html", include_str!("../../templates/index.html")),
            ("summary.html", include_str!("../../templates/summary.html")),
            ("error.html", include_str!("../../templates/error.html")),
        ]) {
            tracing::error!("Failed to parse page templates: {e}");
        }
        tera
    })
}

/// The topic form
pub fn index() -> Result<String, tera::Error> {
    templates().render("index.html", &Context::new())
}

/// Summary text followed by the raw run-step trace
pub fn summary(
    topic: &str,
    completion: &Completion,
    steps: &[RunStep],
) -> Result<String, tera::Error> {
    let trace = steps
        .iter()
        .map(|step| serde_json::to_string_pretty(step).unwrap_or_else(|_| format!("{:?}", step)))
        .collect::<Vec<_>>()
        .join("\n");

    let mut context = Context::new();
    context.insert("topic", topic);
    context.insert("run_id", &completion.run_id);
    context.insert("elapsed", &completion.elapsed_display());
    context.insert("text", &completion.text);
    context.insert("trace", &trace);

    templates().render("summary.html", &context)
}

/// Error page for a failed request or an unfinished run
pub fn error(status: StatusCode, message: &str) -> Result<String, tera::Error> {
    let mut context = Context::new();
    context.insert("status", &status.as_u16());
    context.insert("reason", status.canonical_reason().unwrap_or("Error"));
    context.insert("message", message);

    templates().render("error.html", &context)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completion(text: &str) -> Completion {
        Completion {
            run_id: "run_1".to_string(),
            text: text.to_string(),
            elapsed: chrono::TimeDelta::seconds(75),
        }
    }

    #[test]
    fn test_index_page_has_empty_form() {
        let page = index().unwrap();
        assert!(page.contains("<form method=\"post\" action=\"/summarize\">"));
        assert!(page.contains("value=\"\""));
    }

    #[test]
    fn test_summary_page_escapes_model_output() {
        let page = summary("bitcoin", &completion("Prices <b>rose</b>\nThen fell"), &[]).unwrap();

        assert!(page.contains("Prices &lt;b&gt;rose"));
        assert!(!page.contains("<b>rose"));
        assert!(page.contains("Run run_1 completed in 00:01:15"));
        assert!(page.contains("value=\"bitcoin\""));
    }

    #[test]
    fn test_summary_page_escapes_topic_in_form() {
        let page = summary("\"><script>", &completion("ok"), &[]).unwrap();
        assert!(!page.contains("<script>"));
        assert!(page.contains("&quot;&gt;&lt;script&gt;"));
    }

    #[test]
    fn test_error_page_shows_status() {
        let page = error(StatusCode::GATEWAY_TIMEOUT, "Run run_1 did not finish").unwrap();
        assert!(page.contains("504 Gateway Timeout"));
        assert!(page.contains("Run run_1 did not finish"));
    }
}

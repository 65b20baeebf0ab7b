//! System instruction sent ahead of every alert conversation.

use crate::core::alerts::Alert;
use crate::core::errors::ChatError;
use minijinja::{Environment, context};

pub const ALERT_CONTEXT_START: &str = "<ALERT_CONTEXT>";
pub const ALERT_CONTEXT_END: &str = "</ALERT_CONTEXT>";

const SYSTEM_PROMPT_TEMPLATE: &str = r#"You are a senior cybersecurity analyst.
Your job is to produce precise, technically sound and well structured answers in modern Markdown.

FORMATTING RULES:
- Organise every answer with clear headings and subheadings.
- Use **bold** and *italic* for emphasis where it helps the reader.
- Use bullet points, numbered lists, tables and callouts (> **Note:**) when appropriate.
- Link to authoritative references (RFCs, MITRE ATT&CK, NIST, OWASP) when relevant.
- Keep explanations concise and high-signal, with no filler.
- Keep a professional tone suited to SOC, DFIR and threat-intel work.
- Give actionable steps, remediation paths and root-cause insight when needed.
- When naming an attack technique, include its MITRE ID (for example `T1059`).

CONTEXT:
Analyse and answer strictly based on the alert data below.

{{ start_marker }}
{{ alert_context }}
{{ end_marker }}"#;

/// Renders the analyst instruction with the whole alert embedded verbatim.
pub fn render_system_prompt(alert: &Alert) -> Result<String, ChatError> {
    let alert_context = alert.to_pretty_json()?;

    let env = Environment::new();
    let template = env.template_from_str(SYSTEM_PROMPT_TEMPLATE)?;
    let prompt = template.render(context! {
        start_marker => ALERT_CONTEXT_START,
        end_marker => ALERT_CONTEXT_END,
        alert_context => alert_context,
    })?;

    Ok(prompt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_alert() -> Alert {
        let value = json!({
            "rule": "Suspicious PowerShell <encoded> & download",
            "host": "ws-042",
            "timestamp": "2024-05-01T12:00:00Z"
        });
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_prompt_embeds_alert_between_markers() {
        let alert = sample_alert();
        let prompt = render_system_prompt(&alert).unwrap();

        let start = prompt.find(ALERT_CONTEXT_START).unwrap() + ALERT_CONTEXT_START.len();
        let end = prompt.find(ALERT_CONTEXT_END).unwrap();
        assert_eq!(prompt[start..end].trim(), alert.to_pretty_json().unwrap());
    }

    #[test]
    fn test_prompt_does_not_escape_alert_content() {
        let prompt = render_system_prompt(&sample_alert()).unwrap();
        assert!(prompt.contains("<encoded> & download"));
    }

    #[test]
    fn test_prompt_sets_persona_and_formatting_rules() {
        let prompt = render_system_prompt(&sample_alert()).unwrap();
        assert!(prompt.starts_with("You are a senior cybersecurity analyst."));
        assert!(prompt.contains("MITRE ATT&CK"));
        assert!(prompt.contains("`T1059`"));
        assert!(prompt.trim_end().ends_with(ALERT_CONTEXT_END));
    }
}

use super::args::OutputFormat;
use super::driver::RelationOutcome;
use super::reporter::Reporter;
use crate::solver::RelationKind;

fn outcome(holds: bool) -> RelationOutcome {
    RelationOutcome {
        relation: RelationKind::Subtype,
        subject: "list[bool]".to_string(),
        target: "Sequence[int]".to_string(),
        holds,
    }
}

#[test]
fn renders_plain_text() {
    let reporter = Reporter::new(OutputFormat::Text, false);
    assert_eq!(reporter.render(&outcome(true)), "true\n");
    assert_eq!(reporter.render(&outcome(false)), "false\n");
}

#[test]
fn renders_json_report() {
    let reporter = Reporter::new(OutputFormat::Json, true);
    let line = reporter.render(&outcome(true));
    assert!(line.ends_with('\n'));

    let report: serde_json::Value = serde_json::from_str(&line).expect("valid JSON");
    assert_eq!(
        report,
        serde_json::json!({
            "relation": "subtype",
            "subject": "list[bool]",
            "target": "Sequence[int]",
            "holds": true,
        })
    );
}

#[test]
fn renders_errors_with_context() {
    let err = anyhow::anyhow!("unknown name `Frob` at offset 0").context("failed to parse type `Frob`");

    let text = Reporter::new(OutputFormat::Text, false).render_error(&err);
    assert_eq!(
        text,
        "error: failed to parse type `Frob`: unknown name `Frob` at offset 0\n"
    );

    let json = Reporter::new(OutputFormat::Json, false).render_error(&err);
    let report: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
    assert_eq!(
        report["error"],
        "failed to parse type `Frob`: unknown name `Frob` at offset 0"
    );
}

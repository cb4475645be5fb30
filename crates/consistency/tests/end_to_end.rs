use consistency::{
    render_batch_report, to_json, validate_batch, validate_consistency, ConsistencyPolicy,
    ConsistencyValidator,
};

const REPORT: &str = r#"
<h1>Quarterly Report</h1>
<p>Revenue grew across every region this quarter.</p>
<h2>Highlights</h2>
<ul>
  <li>New customers in three markets</li>
  <li>Support response time halved</li>
</ul>
<div style="page-break-after: always"></div>
<h2>Outlook</h2>
<ol>
  <li>Expand the partner program</li>
  <li>Ship the mobile client</li>
</ol>
<img src="chart.png" alt="Revenue chart">
"#;

#[tokio::test]
async fn report_renders_consistently() {
    let report = validate_consistency(REPORT, "Quarterly Report").await;

    assert!(report.is_consistent, "errors: {:?}", report.errors);
    assert!(report.errors.is_empty());
    assert!(report.structure.has_title);
    assert_eq!(report.structure.heading_count, 2);
    assert_eq!(report.structure.list_count, 2);
    assert_eq!(report.structure.list_item_count, 4);
    assert_eq!(report.structure.page_break_count, 1);
    assert_eq!(report.structure.image_count, 1);

    let pdf = report.pdf_inspection.expect("pdf inspected");
    let docx = report.docx_inspection.expect("docx inspected");
    assert!(pdf.page_count >= 2);
    assert!(docx.has_document);
    assert_eq!(docx.page_break_count, 1);
    assert!(!report.warnings.iter().any(|w| w.contains("page break")));
}

#[tokio::test]
async fn page_break_before_document_is_consistent() {
    let html = "<h1>Report</h1><p>Intro text.</p><ul><li>One</li><li>Two</li></ul>\
                <div style=\"page-break-before: always;\"></div><h2>Next</h2>";
    let report = validate_consistency(html, "Report").await;

    assert!(report.is_consistent, "errors: {:?}", report.errors);
    assert_eq!(report.errors.len(), 0);
    assert_eq!(report.structure.heading_count, 1);
    assert_eq!(report.structure.list_item_count, 2);
    assert_eq!(report.structure.page_break_count, 1);

    let pdf = report.pdf_inspection.expect("pdf inspected");
    let docx = report.docx_inspection.expect("docx inspected");
    assert!(pdf.page_count >= 2);
    assert_eq!(docx.page_break_count, 1);
}

#[tokio::test]
async fn control_characters_are_dropped_from_output() {
    let report = validate_consistency("<p>Total&#1;due\u{2}now</p>", "Inv\u{7}oice").await;

    assert!(report.is_consistent, "errors: {:?}", report.errors);
    let docx = report.docx_inspection.expect("docx inspected");
    assert!(docx.has_document);
    assert_eq!(docx.paragraph_count, 2);
}

#[tokio::test]
async fn hierarchy_skip_is_a_warning_only() {
    let report = validate_consistency("<h1>A</h1><h3>B</h3><p>text</p>", "Doc").await;

    assert!(report.is_consistent);
    assert_eq!(report.structure.hierarchy_skips.len(), 1);
    assert!(report
        .warnings
        .iter()
        .any(|w| w.contains("H3 follows H1")));
}

#[tokio::test]
async fn empty_content_still_renders() {
    let report = validate_consistency("", "Blank").await;

    assert!(report.is_consistent, "errors: {:?}", report.errors);
    assert!(report.structure.is_empty);
    assert!(report.warnings.iter().any(|w| w == "Input: Content is empty"));
    assert!(report.warnings.iter().any(|w| w == "Document has no content"));
}

#[tokio::test]
async fn policy_bounds_size_warning() {
    let policy = ConsistencyPolicy::new().with_max_size_ratio(1_000_000.0);
    let validator = ConsistencyValidator::with_policy(policy);
    let report = validator.validate("<p>Body</p>", "Timed").await;

    assert!(report.is_consistent);
    assert!(!report
        .warnings
        .iter()
        .any(|w| w.starts_with("Output size ratio")));

    let strict = ConsistencyValidator::with_policy(ConsistencyPolicy::new().with_max_size_ratio(1.0));
    let report = strict.validate("<p>Body</p>", "Timed").await;
    assert!(report.is_consistent);
    assert!(report
        .warnings
        .iter()
        .any(|w| w.starts_with("Output size ratio")));
}

#[tokio::test]
async fn batch_runs_every_document() {
    let documents = vec![
        ("<p>One</p>", "First"),
        ("<h2>Two</h2><p>More</p>", "Second"),
        (REPORT, "Quarterly Report"),
    ];
    let batch = validate_batch(&documents).await;

    assert_eq!(batch.total, 3);
    assert_eq!(batch.consistent, 3);
    assert_eq!(batch.consistency_rate, 1.0);
    assert_eq!(batch.reports[1].title, "Second");

    let text = render_batch_report(&batch);
    assert!(text.ends_with("3/3 documents consistent (100.0%)\n"));
}

#[tokio::test]
async fn empty_batch_is_fully_consistent() {
    let documents: Vec<(String, String)> = Vec::new();
    let batch = validate_batch(&documents).await;

    assert_eq!(batch.total, 0);
    assert_eq!(batch.consistency_rate, 1.0);
    assert!(to_json(&batch).unwrap().contains("\"consistencyRate\": 1.0"));
}

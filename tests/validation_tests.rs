//! End-to-end pipeline tests
//!
//! Builds small but realistic uploads and runs them through `validate`.

use argos_shield::{
    DEFAULT_MAX_SIZE_BYTES, FileType, Stage, ValidationError, ValidationOptions, scan_content,
    validate, validate_as,
};
use rstest::*;
use std::collections::BTreeSet;

fn create_test_jpeg() -> Vec<u8> {
    let mut jpeg = Vec::new();

    jpeg.extend_from_slice(&[0xFF, 0xD8, 0xFF, 0xE0]);
    jpeg.extend_from_slice(&[0x00, 0x10]);
    jpeg.extend_from_slice(b"JFIF\x00");
    jpeg.extend_from_slice(&[0x01, 0x01, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00]);

    jpeg.extend_from_slice(&[0xFF, 0xDB, 0x00, 0x43, 0x00]);
    for i in 0u8..64 {
        jpeg.push(i.wrapping_mul(37) | 0x80);
    }

    jpeg.extend_from_slice(&[0xFF, 0xDA, 0x00, 0x08]);
    while jpeg.len() < 4096 {
        let idx = jpeg.len();
        jpeg.push(((idx.wrapping_mul(131).wrapping_add(17)) % 120) as u8 + 0x80);
    }

    jpeg.extend_from_slice(&[0xFF, 0xD9]);
    jpeg
}

fn create_test_pdf(body: &str) -> Vec<u8> {
    format!(
        "%PDF-1.4\n1 0 obj\n<< /Type /Catalog /Pages 2 0 R {} >>\nendobj\n\
         2 0 obj\n<< /Type /Pages /Kids [] /Count 0 >>\nendobj\n\
         trailer\n<< /Root 1 0 R >>\n%%EOF\n",
        body
    )
    .into_bytes()
}

const CLEAN_SVG: &str = r#"<?xml version="1.0"?><svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><rect width="10" height="10" fill="red"/></svg>"#;

#[fixture]
fn defaults() -> ValidationOptions {
    ValidationOptions::default()
}

fn whitelist(ids: &[&str]) -> ValidationOptions {
    ValidationOptions::default().with_whitelist(ids.iter().copied())
}

// ============================================================================
// Reference scenarios
// ============================================================================

#[rstest]
fn test_clean_jpeg_passes(defaults: ValidationOptions) {
    let verdict = validate(&create_test_jpeg(), "jpeg", &defaults).unwrap();
    assert!(verdict.passed, "{}", verdict.message);
}

#[rstest]
fn test_jpeg_with_script_fails(defaults: ValidationOptions) {
    let mut data = vec![0xFF, 0xD8, 0xFF, 0xE0];
    data.extend_from_slice(b"<script>alert(1)</script>");

    let verdict = validate(&data, "jpeg", &defaults).unwrap();
    assert!(!verdict.passed);
    assert_eq!(verdict.stage, Some(Stage::Content));
    assert!(verdict.message.contains("script"));
}

#[rstest]
fn test_pdf_metadata_needs_whitelist(defaults: ValidationOptions) {
    let pdf = create_test_pdf("/Metadata 3 0 R");

    let allowed = validate(&pdf, "pdf", &whitelist(&["Metadata"])).unwrap();
    assert!(allowed.passed, "{}", allowed.message);

    let rejected = validate(&pdf, "pdf", &defaults).unwrap();
    assert!(!rejected.passed);
    assert!(rejected.message.contains("Metadata"));
}

#[rstest]
fn test_svg_with_and_without_handler(defaults: ValidationOptions) {
    let verdict = validate(CLEAN_SVG.as_bytes(), "svg", &defaults).unwrap();
    assert!(verdict.passed, "{}", verdict.message);

    let hostile = CLEAN_SVG.replace("<svg ", r#"<svg onload="alert(document.domain)" "#);
    let verdict = validate(hostile.as_bytes(), "svg", &defaults).unwrap();
    assert!(!verdict.passed);
    assert_eq!(verdict.stage, Some(Stage::Content));
}

#[rstest]
fn test_six_mib_buffer_exceeds_default_limit(defaults: ValidationOptions) {
    let mut data = create_test_jpeg();
    data.resize(6 * 1024 * 1024, 0x80);

    let verdict = validate(&data, "jpeg", &defaults).unwrap();
    assert!(!verdict.passed);
    assert_eq!(verdict.stage, Some(Stage::Size));
    assert!(verdict.message.contains("5MB"));
}

#[rstest]
fn test_unknown_type_is_an_error(defaults: ValidationOptions) {
    let result = validate(b"anything", "unknownformat", &defaults);
    assert_eq!(
        result,
        Err(ValidationError::UnsupportedType("unknownformat".to_string()))
    );
}

// ============================================================================
// Size stage
// ============================================================================

#[rstest]
#[case(1024, 1024, true)]
#[case(1024, 1025, false)]
#[case(1, 0, true)]
fn test_size_boundary(#[case] limit: u64, #[case] len: usize, #[case] passes_size: bool) {
    let options = ValidationOptions::default()
        .with_max_size(limit)
        .with_content_check(false);
    let data = vec![0u8; len];

    let verdict = validate_as(&data, FileType::Png, &options);
    assert_eq!(verdict.stage == Some(Stage::Size), !passes_size);
}

#[rstest]
fn test_default_limit_boundary() {
    let mut data = create_test_jpeg();
    data.resize(DEFAULT_MAX_SIZE_BYTES as usize, 0x80);
    let at_limit = validate(&data, "jpg", &ValidationOptions::default()).unwrap();
    assert!(at_limit.passed, "{}", at_limit.message);

    data.push(0x80);
    let over = validate(&data, "jpg", &ValidationOptions::default()).unwrap();
    assert_eq!(over.stage, Some(Stage::Size));
}

// ============================================================================
// Signature and structure stage
// ============================================================================

#[rstest]
#[case::gif_as_png(b"GIF89a\x01\x00\x01\x00".as_slice(), "png")]
#[case::text_as_jpeg(b"hello world".as_slice(), "jpeg")]
#[case::empty_as_gif(b"".as_slice(), "gif")]
#[case::pdf_without_trailer(b"%PDF-1.4\n1 0 obj << >> endobj\n".as_slice(), "pdf")]
#[case::html_as_svg(b"<html><svg></svg></html>".as_slice(), "svg")]
fn test_signature_mismatch(#[case] data: &[u8], #[case] declared: &str, defaults: ValidationOptions) {
    let verdict = validate(data, declared, &defaults).unwrap();
    assert!(!verdict.passed);
    assert_eq!(verdict.stage, Some(Stage::Signature));
    assert!(verdict.message.starts_with("Invalid file signature"));
}

#[rstest]
fn test_svg_without_prologue_signature_is_accepted(defaults: ValidationOptions) {
    let svg = format!("\n\n   {}", CLEAN_SVG.trim_start_matches(r#"<?xml version="1.0"?>"#));
    let verdict = validate(svg.as_bytes(), "svg", &defaults).unwrap();
    assert!(verdict.passed, "{}", verdict.message);
}

#[rstest]
fn test_declared_type_accepts_extension_forms(defaults: ValidationOptions) {
    let jpeg = create_test_jpeg();
    for declared in ["jpeg", "JPG", ".jpg", "jpe"] {
        assert!(validate(&jpeg, declared, &defaults).unwrap().passed, "{declared}");
    }
}

// ============================================================================
// Content stage
// ============================================================================

#[rstest]
#[case("/OpenAction 4 0 R", "OpenAction")]
#[case("/AA << /O << /S /JavaScript >> >>", "JavaScript")]
#[case("/Launch << /F (cmd.exe) >>", "Launch")]
#[case("/Names << /EmbeddedFiles 5 0 R >>", "EmbeddedFile")]
#[case("/AcroForm << /XFA 6 0 R >>", "XFA")]
#[case("/Annots [7 0 R]", "Annots")]
fn test_pdf_rules_name_their_identifier(
    #[case] body: &str,
    #[case] id: &str,
    defaults: ValidationOptions,
) {
    let verdict = validate(&create_test_pdf(body), "pdf", &defaults).unwrap();
    assert!(!verdict.passed);
    assert!(verdict.message.contains(id), "{}", verdict.message);
}

#[rstest]
fn test_whitelist_only_helps_when_every_hit_is_whitelisted() {
    let pdf = create_test_pdf("/Metadata 3 0 R /OpenAction 4 0 R");

    let partial = validate(&pdf, "pdf", &whitelist(&["Metadata"])).unwrap();
    assert!(!partial.passed);
    assert!(partial.message.contains("OpenAction"));

    let full = validate(&pdf, "pdf", &whitelist(&["Metadata", "OpenAction"])).unwrap();
    assert!(full.passed, "{}", full.message);
}

#[rstest]
fn test_javascript_action_needs_both_identifiers() {
    let pdf = create_test_pdf("/OpenAction << /S /JavaScript /JS (app.alert(1)) >>");
    let options = whitelist(&["OpenAction", "JavaScript"]);

    let verdict = validate(&pdf, "pdf", &options).unwrap();
    assert!(!verdict.passed);
    assert!(verdict.message.contains("'JS'"));

    let verdict = validate(&pdf, "pdf", &whitelist(&["OpenAction", "JavaScript", "JS"])).unwrap();
    assert!(verdict.passed, "{}", verdict.message);
}

#[rstest]
fn test_whitelist_does_not_touch_generic_rules() {
    let pdf = create_test_pdf("/URI (javascript:alert(1))");
    let everything = whitelist(&[
        "Metadata",
        "OpenAction",
        "JS",
        "JavaScript",
        "Launch",
        "EmbeddedFile",
        "XFA",
        "Annots",
    ]);
    let verdict = validate(&pdf, "pdf", &everything).unwrap();
    assert!(!verdict.passed);
    assert!(verdict.message.contains("javascript:"));
}

#[rstest]
#[case::foreign_object(r#"<foreignObject><body xmlns="http://www.w3.org/1999/xhtml"/></foreignObject>"#)]
#[case::data_href(r#"<a href="data:image/svg+xml;base64,PHN2Zz4="><text>x</text></a>"#)]
#[case::entity("<!ENTITY xxe SYSTEM \"file:///etc/passwd\">")]
#[case::handler(r#"<circle r="4" onmouseover="steal()"/>"#)]
#[case::set_handler(r#"<set attributeName="onclick" to="x()"/>"#)]
fn test_svg_active_content(#[case] fragment: &str, defaults: ValidationOptions) {
    let svg = CLEAN_SVG.replace("</svg>", &format!("{}</svg>", fragment));
    let verdict = validate(svg.as_bytes(), "svg", &defaults).unwrap();
    assert!(!verdict.passed, "{fragment}");
    assert_eq!(verdict.stage, Some(Stage::Content));
}

#[rstest]
fn test_svg_rules_do_not_apply_to_other_types(defaults: ValidationOptions) {
    let mut data = b"GIF89a\x01\x00\x01\x00".to_vec();
    data.extend_from_slice(b"<foreignObject>");
    assert!(validate(&data, "gif", &defaults).unwrap().passed);
}

#[rstest]
fn test_invalid_utf8_never_panics(defaults: ValidationOptions) {
    let mut data = vec![0xFF, 0xD8, 0xFF, 0xE1];
    data.extend((0..2048u32).map(|i| (i % 256) as u8));
    let first = validate(&data, "jpeg", &defaults).unwrap();
    let second = validate(&data, "jpeg", &defaults).unwrap();
    assert_eq!(first, second);
}

#[rstest]
#[case::leading_whitespace("\n  ")]
#[case::byte_order_mark("\u{feff}")]
fn test_scan_content_agrees_with_validate_on_prefixed_svg(
    #[case] prefix: &str,
    defaults: ValidationOptions,
) {
    let svg = format!(
        r#"{}<svg xmlns="http://www.w3.org/2000/svg"><foreignObject><p>x</p></foreignObject></svg>"#,
        prefix
    );

    let scanned = scan_content(svg.as_bytes(), &BTreeSet::new());
    let validated = validate(svg.as_bytes(), "svg", &defaults).unwrap();
    assert!(!scanned.passed, "{}", scanned.message);
    assert!(!validated.passed);
    assert_eq!(scanned.stage, validated.stage);
}

#[rstest]
fn test_scan_content_entry_point() {
    let svg = CLEAN_SVG.replace("<rect", r#"<rect onclick="x()""#);
    assert!(!scan_content(svg.as_bytes(), &BTreeSet::new()).passed);
    assert!(scan_content(CLEAN_SVG.as_bytes(), &BTreeSet::new()).passed);
}

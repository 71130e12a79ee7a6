//! Round-trip tests for the markup emitter.
//!
//! Gold-standard guarantee: `parse(emit(parse(input)))` produces the same
//! document as `parse(input)`. The reverse direction is deliberately lossy
//! for the two screen-only fields (text bold, barcode display width), which
//! is also pinned down here.

use label_designer_core::{
    Document, ElementKind, ElementPatch, ElementType, EmitConfig, Layout, emit_markup, parse_str,
};

/// Assert that emitting and re-parsing reproduces the same document.
fn assert_roundtrip(input: &str) {
    let first = parse_str(input);
    let markup = emit_markup(&first.document, &EmitConfig::default());
    let second = parse_str(&markup);
    assert_eq!(
        first.document, second.document,
        "\n--- Round-trip failed ---\nInput:\n{input}\nEmitted:\n{markup}\n"
    );
}

// ── Document round-trips ────────────────────────────────────────────────

#[test]
fn text_roundtrip() {
    assert_roundtrip("^XA^FO50,100^A0N,30,30^FDHello^FS^XZ");
}

#[test]
fn styled_text_roundtrip() {
    assert_roundtrip("^XA^FO10,10^A0N,48,24^FR^FB320,1,0,R,0^FDStyled^FS^XZ");
}

#[test]
fn barcode_roundtrip() {
    assert_roundtrip("^XA^FO20,30^BY3,2,64^BCN,64,N,N,N^FD0123456789^FS^XZ");
}

#[test]
fn box_roundtrip() {
    assert_roundtrip("^XA^FO0,0^GB250,120,4,B,0^FS^XZ");
}

#[test]
fn mixed_elements_preserve_order() {
    let input = "^XA^PW640^LL480\
                 ^FO10,10^FDtitle^FS\
                 ^FO10,60^BCN,50,N,N,N^FDcode^FS\
                 ^FO5,5^GB630,470,2,B,0^FS^XZ";
    let result = parse_str(input);
    let kinds: Vec<_> = result
        .document
        .elements()
        .iter()
        .map(|e| match e.kind {
            ElementKind::Text { .. } => "text",
            ElementKind::Barcode { .. } => "barcode",
            ElementKind::Box { .. } => "box",
        })
        .collect();
    assert_eq!(kinds, ["text", "barcode", "box"]);
    assert_roundtrip(input);
}

#[test]
fn empty_document_roundtrip() {
    assert_roundtrip("^XA^PW300^LL200^XZ");
}

// ── Output shape ────────────────────────────────────────────────────────

#[test]
fn emission_is_deterministic() {
    let doc = parse_str("^XA^FO1,2^FDa^FS^FO3,4^GB9,9,1^FS^XZ").document;
    let a = emit_markup(&doc, &EmitConfig::default());
    let b = emit_markup(&doc, &EmitConfig::default());
    assert_eq!(a, b);
}

#[test]
fn exact_output_for_default_text() {
    let mut doc = Document::default();
    doc.create(ElementType::Text, 10, 20, ElementPatch::default());
    let markup = emit_markup(&doc, &EmitConfig::default());
    assert_eq!(
        markup,
        "^XA^PW800^LL600\n^FO10,20^A0N,30,30^FDText^FS\n^XZ\n"
    );
}

#[test]
fn block_only_emitted_when_meaningful() {
    let mut doc = Document::default();
    doc.create(ElementType::Text, 0, 0, ElementPatch::default());
    doc.create(
        ElementType::Text,
        0,
        50,
        ElementPatch {
            align: Some(label_designer_core::Align::Center),
            ..ElementPatch::default()
        },
    );
    let markup = emit_markup(&doc, &EmitConfig::default());
    let lines: Vec<&str> = markup.lines().collect();
    assert!(
        !lines[1].contains("^FB"),
        "default block must be omitted: {}",
        lines[1]
    );
    assert!(
        lines[2].contains("^FB0,1,0,C,0"),
        "non-default alignment forces a block: {}",
        lines[2]
    );
}

#[test]
fn compact_and_lines_layouts_parse_identically() {
    let doc = parse_str("^XA^FO1,1^FDx^FS^FO2,2^BCN,40,N,N,N^FDy^FS^XZ").document;
    let lines = emit_markup(&doc, &EmitConfig::default());
    let compact = emit_markup(
        &doc,
        &EmitConfig {
            layout: Layout::Compact,
        },
    );
    assert!(!compact.contains('\n'));
    assert_eq!(parse_str(&lines).document, parse_str(&compact).document);
}

// ── Deliberate loss ─────────────────────────────────────────────────────

#[test]
fn bold_does_not_survive_markup() {
    let mut doc = Document::default();
    doc.create(
        ElementType::Text,
        0,
        0,
        ElementPatch {
            bold: Some(true),
            ..ElementPatch::default()
        },
    );
    let markup = emit_markup(&doc, &EmitConfig::default());
    let reparsed = parse_str(&markup).document;
    match &reparsed.elements()[0].kind {
        ElementKind::Text { bold, .. } => assert!(!bold),
        other => panic!("expected text, got {other:?}"),
    }
}

#[test]
fn barcode_display_width_does_not_survive_markup() {
    let mut doc = Document::default();
    doc.create(
        ElementType::Barcode,
        0,
        0,
        ElementPatch {
            width: Some(180),
            module_height: Some(40),
            ..ElementPatch::default()
        },
    );
    let markup = emit_markup(&doc, &EmitConfig::default());
    assert!(!markup.contains("180"), "width hint leaked into markup: {markup}");
    let reparsed = parse_str(&markup).document;
    match &reparsed.elements()[0].kind {
        ElementKind::Barcode {
            width,
            module_height,
            ..
        } => {
            assert_eq!(*width, 0);
            assert_eq!(*module_height, 40, "real fields still round-trip");
        }
        other => panic!("expected barcode, got {other:?}"),
    }
}

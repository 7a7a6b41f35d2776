//! Cross-reference table and object reference integrity.

use regex::bytes::Regex;
use tinypdf::api::{markdown, MarkdownOptions};
use tinypdf::writer::{LinkOptions, PdfWriter, PdfWriterConfig, TextOptions};

fn sample_document(compress: bool) -> Vec<u8> {
    let jpeg = vec![
        0xFF, 0xD8, 0xFF, 0xC0, 0x00, 0x11, 0x08, 0x00, 0x10, 0x00, 0x20, 0x03, 0xFF, 0xD9,
    ];
    let config = PdfWriterConfig::default()
        .with_compress(compress)
        .with_title("Integrity");
    let mut pdf = PdfWriter::with_config(config);
    pdf.letter_page(|ctx| {
        ctx.text("First page", 72.0, 720.0, 14.0, &TextOptions::default())
            .link("https://example.com/a", 72.0, 700.0, 80.0, 12.0, &LinkOptions::default())
            .image(jpeg.clone(), 72.0, 500.0, 64.0, 32.0);
    })
    .unwrap();
    pdf.letter_page(|ctx| {
        ctx.link("https://example.com/b", 72.0, 700.0, 80.0, 12.0, &LinkOptions::default())
            .image(jpeg, 72.0, 500.0, 64.0, 32.0);
    })
    .unwrap();
    pdf.build().unwrap()
}

fn parse_usize(bytes: &[u8]) -> usize {
    std::str::from_utf8(bytes).unwrap().parse().unwrap()
}

/// Offsets listed in the xref table, in object order.
fn xref_offsets(pdf: &[u8]) -> Vec<usize> {
    let header = Regex::new(r"xref\n0 (\d+)\n0000000000 65535 f \n").unwrap();
    let caps = header.captures(pdf).expect("xref header");
    let count = parse_usize(&caps[1]);
    let start = caps.get(0).unwrap().end();

    let entry = Regex::new(r"^(\d{10}) 00000 n \n").unwrap();
    let mut offsets = Vec::new();
    let mut pos = start;
    for _ in 1..count {
        let m = entry.captures(&pdf[pos..]).expect("xref entry");
        offsets.push(parse_usize(&m[1]));
        pos += 20;
    }
    offsets
}

fn check_integrity(pdf: &[u8]) {
    let offsets = xref_offsets(pdf);
    assert!(!offsets.is_empty());

    for (i, offset) in offsets.iter().enumerate() {
        let expected = format!("{} 0 obj\n", i + 1);
        assert!(
            pdf[*offset..].starts_with(expected.as_bytes()),
            "xref entry for object {} points at wrong offset {}",
            i + 1,
            offset
        );
    }

    let size = Regex::new(r"/Size (\d+)").unwrap();
    let size = parse_usize(&size.captures(pdf).unwrap()[1]);
    assert_eq!(size, offsets.len() + 1);

    let startxref = Regex::new(r"startxref\n(\d+)\n%%EOF\n$").unwrap();
    let xref_at = parse_usize(&startxref.captures(pdf).unwrap()[1]);
    assert!(pdf[xref_at..].starts_with(b"xref\n"));

    let reference = Regex::new(r"(\d+) 0 R").unwrap();
    for caps in reference.captures_iter(pdf) {
        let id = parse_usize(&caps[1]);
        assert!(id >= 1 && id <= offsets.len(), "dangling reference {} 0 R", id);
    }
}

#[test]
fn test_uncompressed_document() {
    check_integrity(&sample_document(false));
}

#[test]
fn test_compressed_document() {
    check_integrity(&sample_document(true));
}

#[test]
fn test_empty_document() {
    let mut pdf = PdfWriter::new();
    check_integrity(&pdf.build().unwrap());
}

#[test]
fn test_markdown_document() {
    let source: String = (0..120)
        .map(|i| match i % 4 {
            0 => format!("## Section {}", i),
            1 => format!("- bullet with `code` {}", i),
            2 => "---".to_string(),
            _ => format!("Paragraph **{}** with _style_", i),
        })
        .collect::<Vec<_>>()
        .join("\n");
    for compress in [false, true] {
        let opts = MarkdownOptions::default().with_compress(compress);
        check_integrity(&markdown(&source, &opts).unwrap());
    }
}

#[test]
fn test_stream_lengths_match() {
    let pdf = sample_document(true);
    let stream = Regex::new(r"(?s)/Length (\d+)\n>>\nstream\n").unwrap();
    let mut checked = 0;
    for caps in stream.captures_iter(&pdf) {
        let length = parse_usize(&caps[1]);
        let data_start = caps.get(0).unwrap().end();
        assert!(pdf[data_start + length..].starts_with(b"\nendstream\n"));
        checked += 1;
    }
    assert!(checked >= 4);
}

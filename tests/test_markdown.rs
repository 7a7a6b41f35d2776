//! Integration tests for markdown conversion.

use tinypdf::api::{markdown, MarkdownOptions, Pdf, PdfBuilder};
use tinypdf::writer::PageSize;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn render(source: &str) -> String {
    init_logger();
    let opts = MarkdownOptions::default().with_compress(false);
    String::from_utf8_lossy(&markdown(source, &opts).unwrap()).to_string()
}

fn page_count(out: &str) -> usize {
    out.matches("/Type /Page\n").count()
}

mod block_tests {
    use super::*;

    #[test]
    fn test_heading() {
        let out = render("# Header");
        assert!(out.contains("/F1 22.00 Tf"));
        assert!(out.contains("(Header) Tj"));
    }

    #[test]
    fn test_heading_levels() {
        let out = render("# A\n## B\n### C");
        assert!(out.contains("/F1 22.00 Tf"));
        assert!(out.contains("/F1 16.00 Tf"));
        assert!(out.contains("/F1 13.00 Tf"));
    }

    #[test]
    fn test_bullet_list() {
        let out = render("- Item 1\n- Item 2");
        assert!(out.contains("(- ) Tj"));
        assert!(out.contains("(Item 1) Tj"));
        assert!(out.contains("(Item 2) Tj"));
        // list bodies are indented 12pt past the margin
        assert!(out.contains("84.00 720.00 Td\n(- ) Tj"));
    }

    #[test]
    fn test_ordered_list() {
        let out = render("1. First\n2. Second");
        assert!(out.contains("(1. ) Tj"));
        assert!(out.contains("(2. ) Tj"));
        assert!(out.contains("(First) Tj"));
    }

    #[test]
    fn test_horizontal_rule() {
        let out = render("above\n\n---\n\nbelow");
        assert!(out.contains("0.50 w\n0.878 0.878 0.878 RG\n72.00 "));
        assert!(out.contains("540.00 "));
        assert!(out.contains("(above) Tj"));
        assert!(out.contains("(below) Tj"));
    }

    #[test]
    fn test_paragraph_color() {
        let out = render("plain text");
        assert!(out.contains("0.067 0.067 0.067 rg"));
        assert!(out.contains("(plain text) Tj"));
    }
}

mod inline_tests {
    use super::*;

    #[test]
    fn test_inline_code_uses_courier() {
        let out = render("Run `cargo test` now");
        assert!(out.contains("/F3 11.00 Tf"));
        assert!(out.contains("(cargo test) Tj"));
        assert!(!out.contains('`'));
    }

    #[test]
    fn test_bold_is_larger() {
        let out = render("a **strong** word");
        assert!(out.contains("/F1 11.55 Tf"));
        assert!(out.contains("(strong) Tj"));
    }

    #[test]
    fn test_italic_markers_removed() {
        let out = render("an _emphasized_ word");
        assert!(out.contains("(emphasized) Tj"));
        assert!(!out.contains("(_"));
    }
}

mod pagination_tests {
    use super::*;

    #[test]
    fn test_long_document_spans_pages() {
        let source: String = (1..=100).map(|i| format!("Line number {}\n", i)).collect();
        let out = render(&source);
        assert!(page_count(&out) > 1);
        assert!(out.contains("(Line number 1) Tj"));
        assert!(out.contains("(Line number 100) Tj"));
    }

    #[test]
    fn test_empty_input() {
        let out = render("");
        assert_eq!(page_count(&out), 0);
        assert!(out.contains("/Count 0"));
    }

    #[test]
    fn test_blank_only_input() {
        let out = render("\n\n\n");
        assert_eq!(page_count(&out), 0);
    }

    #[test]
    fn test_smaller_page_needs_more_pages() {
        let source: String = (0..60).map(|i| format!("Row {}\n", i)).collect();
        let letter = PdfBuilder::new().compress(false).from_markdown(&source).unwrap();
        let small = PdfBuilder::new()
            .compress(false)
            .page_size(PageSize::Custom(300.0, 400.0))
            .margin(36.0)
            .from_markdown(&source)
            .unwrap();
        let letter_pages = page_count(&String::from_utf8_lossy(letter.as_bytes()));
        let small_pages = page_count(&String::from_utf8_lossy(small.as_bytes()));
        assert!(small_pages > letter_pages);
    }
}

mod api_tests {
    use super::*;

    #[test]
    fn test_pdf_from_markdown_compressed() {
        init_logger();
        let pdf = Pdf::from_markdown("# Title\n\nSome text.").unwrap();
        let out = String::from_utf8_lossy(pdf.as_bytes());
        assert!(out.starts_with("%PDF-1.4"));
        assert!(out.contains("/Filter /FlateDecode"));
    }

    #[test]
    fn test_builder_metadata() {
        let pdf = PdfBuilder::new()
            .title("Guide")
            .author("Docs Team")
            .from_markdown("body")
            .unwrap();
        let out = String::from_utf8_lossy(pdf.as_bytes());
        assert!(out.contains("/Title (Guide)"));
        assert!(out.contains("/Author (Docs Team)"));
    }
}

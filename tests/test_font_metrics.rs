//! Property tests for text measurement and wrapping.

use proptest::prelude::*;
use tinypdf::writer::{measure_text, Font, TextLayout};

fn any_font() -> impl Strategy<Value = Font> {
    prop_oneof![Just(Font::Helvetica), Just(Font::Times), Just(Font::Courier)]
}

#[test]
fn test_known_width() {
    // sum of Helvetica widths for "Hello World" is 5167
    let width = measure_text("Hello World", 12.0, Font::Helvetica);
    assert!((width - 62.004).abs() < 1e-9);
}

proptest! {
    #[test]
    fn prop_empty_measures_zero(size in 0.0f64..200.0, font in any_font()) {
        prop_assert_eq!(measure_text("", size, font), 0.0);
    }

    #[test]
    fn prop_width_scales_with_size(text in "[ -~]{0,40}", size in 1.0f64..100.0, font in any_font()) {
        let single = measure_text(&text, size, font);
        let double = measure_text(&text, size * 2.0, font);
        prop_assert!((double - 2.0 * single).abs() < 1e-6);
    }

    #[test]
    fn prop_courier_is_monospaced(text in "[ -~]{0,40}", size in 1.0f64..50.0) {
        let width = measure_text(&text, size, Font::Courier);
        let expected = text.len() as f64 * 600.0 * size / 1000.0;
        prop_assert!((width - expected).abs() < 1e-6);
    }

    #[test]
    fn prop_wrap_keeps_every_word(words in prop::collection::vec("[a-z]{1,12}", 1..30), max in 30.0f64..400.0) {
        let text = words.join(" ");
        let lines = TextLayout::new(Font::Helvetica, 11.0).wrap(&text, max);
        let rejoined: Vec<&str> = lines.iter().flat_map(|l| l.text.split(' ')).collect();
        prop_assert_eq!(rejoined, words.iter().map(String::as_str).collect::<Vec<_>>());
    }
}

use carousel_common::{limits, Payload, SlideType};
use carousel_core::{ContentMapper, ResponseParser, Tier};
use proptest::prelude::*;

fn assert_shape(payload: &Payload) {
    let slides = &payload.slides;
    assert!(!slides.is_empty());
    // a lone slide is both first and last; the closing rule wins
    if slides.len() >= 2 {
        assert_eq!(slides[0].slide_type, SlideType::Title);
    }
    assert_eq!(slides[slides.len() - 1].slide_type, SlideType::Cta);
    if slides.len() > 2 {
        for s in &slides[1..slides.len() - 1] {
            assert!(!matches!(s.slide_type, SlideType::Title | SlideType::Cta));
        }
    }
    for window in slides.windows(4) {
        let same = window.iter().all(|s| s.slide_type == window[0].slide_type);
        let interior = !matches!(window[0].slide_type, SlideType::Title | SlideType::Cta);
        assert!(!(same && interior), "run of four {:?}", window[0].slide_type);
    }
    assert!(payload.title.chars().count() <= limits::TITLE);
    for s in slides {
        assert!(!s.heading.is_empty());
        assert!(s.heading.chars().count() <= limits::HEADING);
        assert!(s.subheading.chars().count() <= limits::SUBHEADING);
        assert!(s.body.chars().count() <= limits::BODY);
        assert!(s.button_text.chars().count() <= limits::BUTTON_TEXT);
    }
}

#[test]
fn clean_input_round_trips() {
    let p = ResponseParser::parse(
        r#"{"title":"T","slides":[{"type":"TITLE","heading":"H"},{"type":"CTA","heading":"E","buttonText":"Go"}]}"#,
    );
    assert_eq!(p.title, "T");
    assert_eq!(p.slides.len(), 2);
    assert_eq!(p.slides[0].slide_type, SlideType::Title);
    assert_eq!(p.slides[1].slide_type, SlideType::Cta);
    assert_eq!(p.slides[1].button_text, "Go");
}

#[test]
fn markdown_fences_are_stripped() {
    let p = ResponseParser::parse(
        "```json\n{\"title\":\"X\",\"slides\":[{\"type\":\"TITLE\",\"heading\":\"Hi\"},{\"type\":\"CTA\",\"heading\":\"Bye\",\"buttonText\":\"Go\"}]}\n```",
    );
    assert_eq!(p.title, "X");
    assert_eq!(p.slides.len(), 2);
}

#[test]
fn trailing_commas_are_tolerated() {
    let p = ResponseParser::parse(r#"{"title":"Test","slides":[{"type":"TITLE","heading":"Hi",},]}"#);
    assert_eq!(p.title, "Test");
    assert_eq!(p.slides.len(), 1);
    assert_eq!(p.slides[0].heading, "Hi");
    assert_eq!(p.slides[0].slide_type, SlideType::Cta);
}

#[test]
fn long_headings_are_truncated() {
    let raw = format!(
        r#"{{"title":"T","slides":[{{"type":"TITLE","heading":"{}"}},{{"type":"CTA","heading":"E"}}]}}"#,
        "A".repeat(200)
    );
    let p = ResponseParser::parse(&raw);
    assert!(p.slides[0].heading.chars().count() <= 60);
    assert!(p.slides[0].heading.starts_with("AAAA"));
}

#[test]
fn unclosed_braces_are_repaired() {
    let report = ResponseParser::parse_with_report(
        r#"{"title": "Repair Test", "slides": [{"type": "TITLE", "heading": "Incomplete""#,
    );
    assert_eq!(report.tier, Tier::Repaired);
    assert_eq!(report.payload.title, "Repair Test");
    assert_eq!(report.payload.slides[0].heading, "Incomplete");
}

#[test]
fn brace_span_drops_a_truncated_trailing_slide() {
    let p = ResponseParser::parse(
        r#"{"title": "Cut", "slides": [{"type": "TITLE", "heading": "Start"}, {"type": "CONTENT", "heading": "Mid", "body": "The model ran out of tok"#,
    );
    assert_eq!(p.title, "Cut");
    assert_eq!(p.slides.len(), 1);
    assert_eq!(p.slides[0].heading, "Start");
    assert_eq!(p.slides[0].slide_type, SlideType::Cta);
}

#[test]
fn truncated_string_is_closed() {
    let report = ResponseParser::parse_with_report(
        r#"{"title": "Cut", "slides": [{"type": "CONTENT", "heading": "Mid", "body": "The model ran out of tok"#,
    );
    assert_eq!(report.tier, Tier::Repaired);
    assert_eq!(report.payload.title, "Cut");
    assert_eq!(report.payload.slides.len(), 1);
    assert_eq!(report.payload.slides[0].heading, "Mid");
    assert_eq!(report.payload.slides[0].body, "The model ran out of tok");
}

#[test]
fn prose_around_json_is_discarded() {
    let p = ResponseParser::parse(
        r#"Preamble { "title": "Inner", "slides":[{"type":"TITLE","heading":"H"},{"type":"CTA","heading":"E","buttonText":"Go"}] } Postamble"#,
    );
    assert_eq!(p.title, "Inner");
}

#[test]
fn comparison_sides_are_synthesized() {
    let p = ResponseParser::parse(
        r#"{"title":"C","slides":[{"type":"TITLE","heading":"Start"},{"type":"COMPARISON","heading":"Pick","body":"Option A vs Option B"},{"type":"CTA","heading":"End"}]}"#,
    );
    let cmp = &p.slides[1];
    assert_eq!(cmp.slide_type, SlideType::Comparison);
    assert!(cmp.left_content.contains("Option A"));
    assert!(cmp.right_content.contains("Option B"));
}

#[test]
fn fourth_consecutive_content_becomes_heading() {
    let p = ResponseParser::parse(
        r#"{"title":"Run","slides":[
            {"type":"TITLE","heading":"T"},
            {"type":"CONTENT","heading":"1"},
            {"type":"CONTENT","heading":"2"},
            {"type":"CONTENT","heading":"3"},
            {"type":"CONTENT","heading":"4"},
            {"type":"CTA","heading":"E"}
        ]}"#,
    );
    let types: Vec<SlideType> = p.slides.iter().map(|s| s.slide_type).collect();
    assert_eq!(
        types,
        vec![
            SlideType::Title,
            SlideType::Content,
            SlideType::Content,
            SlideType::Content,
            SlideType::Heading,
            SlideType::Cta,
        ]
    );
}

#[test]
fn sloppy_model_output_is_cleaned() {
    let raw = r#"Here is your carousel:
```json
{
  title: "ignored",
  'slides': [
    {type: "title", heading: "Hello"},
    {type: "numbered", heading: "Steps", body: "Plan it. Build it. Ship it."},
    "...",
    {type: "image-text", heading: "See", imagePlaceholder: "A chart", hasGlassOverlay: false},
    {type: "cta", heading: "Bye",}, // closing slide
  ],
  /* [Exactly 4 slides] */
}
```
Let me know if you need changes!"#;
    let report = ResponseParser::parse_with_report(raw);
    assert_ne!(report.tier, Tier::Fallback);
    let p = report.payload;
    assert_eq!(p.title, "ignored");
    assert_eq!(p.slides.len(), 4);
    assert_eq!(p.slides[1].items, vec!["Plan it", "Build it", "Ship it"]);
    assert_eq!(p.slides[2].slide_type, SlideType::ImageText);
    assert!(p.slides[2].has_glass_overlay);
    assert_eq!(p.slides[3].button_text, "Learn More");
    assert_shape(&p);
}

#[test]
fn plain_prose_uses_heuristic_fallback() {
    let report = ResponseParser::parse_with_report(
        "Slide 1: Why Rust\nFast and safe.\nSlide 2: Ownership\nOne owner per value.\nSlide 3: Borrowing\nShared or mutable.\nSlide 4: Get started\nInstall rustup.",
    );
    assert_eq!(report.tier, Tier::Fallback);
    let p = report.payload;
    assert_eq!(p.title, "Why Rust");
    assert_eq!(p.slides.len(), 4);
    assert_eq!(p.slides[2].heading, "Borrowing");
    assert_shape(&p);
}

#[test]
fn garbage_yields_generation_failed_pair() {
    let p = ResponseParser::parse("{{{{ ]]]] ,,,");
    assert_eq!(p.slides.len(), 2);
    assert_eq!(p.slides[0].heading, "Generation Failed");
    assert_eq!(p.slides[1].button_text, "Regenerate");
    assert_shape(&p);
}

#[test]
fn parsed_payload_maps_to_project() {
    let p = ResponseParser::parse(
        r#"{"title":"Deck","slides":[{"type":"TITLE","heading":"Hi"},{"type":"NUMBERED","heading":"Steps","items":["a","b"]},{"type":"CTA","heading":"Bye"}]}"#,
    );
    let project = ContentMapper::create_project_from_ai(&p);
    assert_eq!(project.title, "Deck");
    assert_eq!(project.slides.len(), 3);
    let json = serde_json::to_value(&project).unwrap();
    assert_eq!(json["aspectRatio"], "1:1");
    assert_eq!(json["slides"][1]["layoutType"], "numbered");
}

proptest! {
    #[test]
    fn parse_is_total_on_arbitrary_text(raw in any::<String>()) {
        assert_shape(&ResponseParser::parse(&raw));
    }

    #[test]
    fn parse_is_total_on_json_like_noise(raw in r#"[{}\[\]":,'a-zA-Z0-9 \\./*\n]{0,120}"#) {
        assert_shape(&ResponseParser::parse(&raw));
    }

    #[test]
    fn slide_lists_keep_their_shape(types in proptest::collection::vec(0usize..9, 1..12)) {
        let slides: Vec<String> = types
            .iter()
            .enumerate()
            .map(|(i, t)| format!(r#"{{"type":"{}","heading":"S{i}"}}"#, SlideType::ALL[*t]))
            .collect();
        let raw = format!(r#"{{"title":"P","slides":[{}]}}"#, slides.join(","));
        let p = ResponseParser::parse(&raw);
        prop_assert_eq!(p.slides.len(), types.len());
        assert_shape(&p);
        if types.len() == 1 {
            prop_assert_eq!(p.slides[0].slide_type, SlideType::Cta);
        } else {
            prop_assert_eq!(p.slides[0].slide_type, SlideType::Title);
        }
    }
}

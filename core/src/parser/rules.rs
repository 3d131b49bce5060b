//! Stage 6: ordering rules every payload leaves the parser with.

use carousel_common::{limits, Payload, SlideType};

use super::text::clip;

pub const ENFORCED_CTA_BUTTON: &str = "Get Started";
pub const ENFORCED_CTA_SUBTEXT: &str = "Follow for more insights like this";
const MAX_RUN: usize = 3;

/// Opens with TITLE, closes with CTA, keeps both out of the interior and
/// breaks up runs of more than three same-typed interior slides.
/// A single-slide payload ends up CTA, since the closing rule runs last.
pub fn enforce_slide_rules(payload: &mut Payload) {
    let n = payload.slides.len();
    if n == 0 {
        return;
    }

    let first = &mut payload.slides[0];
    if first.slide_type != SlideType::Title {
        tracing::debug!(from = %first.slide_type, "coercing first slide to TITLE");
        first.slide_type = SlideType::Title;
        if first.subheading.is_empty() && !first.body.is_empty() {
            first.subheading = clip(&first.body, limits::SUBHEADING);
        }
    }

    let last = &mut payload.slides[n - 1];
    if last.slide_type != SlideType::Cta {
        tracing::debug!(from = %last.slide_type, "coercing last slide to CTA");
        last.slide_type = SlideType::Cta;
        if last.button_text.is_empty() {
            last.button_text = ENFORCED_CTA_BUTTON.to_string();
        }
        if last.subtext.is_empty() {
            last.subtext = ENFORCED_CTA_SUBTEXT.to_string();
        }
    }

    if n < 3 {
        return;
    }
    let interior = &mut payload.slides[1..n - 1];

    for slide in interior.iter_mut() {
        if matches!(slide.slide_type, SlideType::Title | SlideType::Cta) {
            slide.slide_type = SlideType::Content;
        }
    }

    let mut run_type = interior[0].slide_type;
    let mut run_len = 0;
    for slide in interior.iter_mut() {
        if slide.slide_type == run_type {
            run_len += 1;
        } else {
            run_type = slide.slide_type;
            run_len = 1;
        }
        if run_len > MAX_RUN {
            // a run of HEADING slides cannot be broken by another HEADING
            let replacement = if run_type == SlideType::Heading {
                SlideType::Content
            } else {
                SlideType::Heading
            };
            tracing::debug!(from = %run_type, to = %replacement, "breaking up repeated slide type");
            slide.slide_type = replacement;
            run_type = replacement;
            run_len = 1;
        }
    }
}

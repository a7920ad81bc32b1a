//! Page-content features computed from a fetched response.
//!
//! Each signal takes the optional fetch result; when the fetch failed the
//! signal takes its fallback value. Polarities differ per signal and must not
//! be unified: the classifier was trained on exactly these.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::FeaturePolicy;
use crate::fetch::PageFetchResult;

use super::flag;

// Static patterns are compile-time constants; failure indicates a programming error.
#[allow(clippy::expect_used)]
static IFRAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<iframe|<frameBorder").expect("Failed to compile iframe regex")
});

#[allow(clippy::expect_used)]
static MOUSE_OVER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script>.+onmouseover.+</script>")
        .expect("Failed to compile mouse-over regex")
});

#[allow(clippy::expect_used)]
static RIGHT_CLICK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"event.button ?== ?2").expect("Failed to compile right-click regex")
});

/// `iFrame`: 0 if an `<iframe` or `<frameBorder` tag is present, else 1.
///
/// Fallback: 1.
pub fn iframe(page: Option<&PageFetchResult>) -> u32 {
    match page {
        Some(page) => flag(!IFRAME_PATTERN.is_match(&page.text)),
        None => 1,
    }
}

/// `Mouse_Over`: 1 if a script block contains an `onmouseover` handler, else 0.
///
/// Fallback: 1.
pub fn mouse_over(page: Option<&PageFetchResult>) -> u32 {
    match page {
        Some(page) => flag(MOUSE_OVER_PATTERN.is_match(&page.text)),
        None => 1,
    }
}

/// `Right_Click`: 0 if the page checks for a right-button event, else 1.
///
/// Fallback: 1.
pub fn right_click(page: Option<&PageFetchResult>) -> u32 {
    match page {
        Some(page) => flag(!RIGHT_CLICK_PATTERN.is_match(&page.text)),
        None => 1,
    }
}

/// `Web_Forwards`: 1 if the fetch followed more than `policy.max_web_forwards` redirects.
///
/// Fallback: 1.
pub fn web_forwards(page: Option<&PageFetchResult>, policy: &FeaturePolicy) -> u32 {
    match page {
        Some(page) => flag(page.history.len() > policy.max_web_forwards),
        None => 1,
    }
}

/// `Web_Traffic`: 1 if the rank is worse than `policy.traffic_rank_threshold`, else 0.
///
/// Fallback (ranking unavailable or site unranked): 1.
pub fn web_traffic(rank: Option<u64>, policy: &FeaturePolicy) -> u32 {
    match rank {
        Some(rank) => flag(rank > policy.traffic_rank_threshold),
        None => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(text: &str, redirects: usize) -> PageFetchResult {
        PageFetchResult {
            final_url: "https://example.com/".to_string(),
            status: 200,
            text: text.to_string(),
            history: (0..redirects)
                .map(|i| format!("https://example.com/hop{i}"))
                .collect(),
        }
    }

    #[test]
    fn test_absent_page_falls_back_to_suspicious() {
        let policy = FeaturePolicy::default();
        assert_eq!(iframe(None), 1);
        assert_eq!(mouse_over(None), 1);
        assert_eq!(right_click(None), 1);
        assert_eq!(web_forwards(None, &policy), 1);
    }

    #[test]
    fn test_iframe() {
        assert_eq!(iframe(Some(&page("<html><IFRAME src=x></iframe>", 0))), 0);
        assert_eq!(iframe(Some(&page("<frameborder='0'>", 0))), 0);
        assert_eq!(iframe(Some(&page("<html><body>hi</body></html>", 0))), 1);
    }

    #[test]
    fn test_mouse_over() {
        let spoof = "<script>\nwindow.onmouseover = function() {\n window.status='x' }\n</script>";
        assert_eq!(mouse_over(Some(&page(spoof, 0))), 1);
        assert_eq!(
            mouse_over(Some(&page("<a onmouseover=\"x()\">link</a>", 0))),
            0
        );
        assert_eq!(mouse_over(Some(&page("<html></html>", 0))), 0);
    }

    #[test]
    fn test_right_click() {
        assert_eq!(
            right_click(Some(&page("if (event.button == 2) { return false; }", 0))),
            0
        );
        assert_eq!(right_click(Some(&page("if(event.button==2){}", 0))), 0);
        assert_eq!(right_click(Some(&page("<html></html>", 0))), 1);
    }

    #[test]
    fn test_web_forwards() {
        let policy = FeaturePolicy::default();
        assert_eq!(web_forwards(Some(&page("", 0)), &policy), 0);
        assert_eq!(web_forwards(Some(&page("", 2)), &policy), 0);
        assert_eq!(web_forwards(Some(&page("", 3)), &policy), 1);
    }

    #[test]
    fn test_web_traffic() {
        let policy = FeaturePolicy::default();
        assert_eq!(web_traffic(None, &policy), 1);
        assert_eq!(web_traffic(Some(42), &policy), 0);
        assert_eq!(web_traffic(Some(100_000), &policy), 0);
        assert_eq!(web_traffic(Some(100_001), &policy), 1);
    }
}

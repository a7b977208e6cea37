//! Conversion options and the page-range grammar.
//!
//! Everything a client can pass alongside the upload lives here:
//! the page-range string for PDF→Word, and the page-size / orientation /
//! image-quality knobs. Options are parsed once per request and immutable
//! afterwards.
//!
//! The page-range grammar is strict: a malformed token fails the whole parse
//! with the offending token named, never a silently-empty result. Page size
//! and orientation go the other way — an unrecognised value falls back to the
//! default rather than failing the request.

use crate::error::ConvertError;
use serde::{Deserialize, Serialize};

/// Per-request conversion options, immutable once parsed.
#[derive(Debug, Clone, Default)]
pub struct ConversionOptions {
    /// Pages to convert (1-based, encounter order, duplicates preserved).
    /// `None` means the full document.
    pub pages: Option<Vec<u32>>,
    /// Image handling hint for the PDF→Word path.
    pub image_quality: ImageQuality,
    /// Target page size for the Word→PDF path.
    pub page_size: PageSize,
    /// Target page orientation for the Word→PDF path.
    pub orientation: Orientation,
}

/// Parse a page-range string like `"1-5,7,9-12"`.
///
/// Grammar: `range_list := range (',' range)*`, `range := INT | INT '-' INT`.
///
/// * Empty or all-whitespace input ⇒ `Ok(None)` — convert all pages.
/// * A bare token must parse as a whole number.
/// * `A-B` expands inclusively, appended in encounter order. A descending
///   range (`A > B`) is rejected rather than expanding to nothing.
/// * No deduplication, no sorting: `"2,2"` stays `[2, 2]`.
///
/// Any malformed token fails with [`ConvertError::InvalidPageRange`] naming
/// that token; no partial result escapes.
pub fn parse_page_range(input: &str) -> Result<Option<Vec<u32>>, ConvertError> {
    if input.trim().is_empty() {
        return Ok(None);
    }

    let mut pages = Vec::new();
    for token in input.split(',') {
        let token = token.trim();
        match token.split_once('-') {
            Some((start, end)) => {
                let start = parse_page_number(start, token)?;
                let end = parse_page_number(end, token)?;
                if start > end {
                    return Err(ConvertError::InvalidPageRange {
                        token: token.to_string(),
                    });
                }
                pages.extend(start..=end);
            }
            None => pages.push(parse_page_number(token, token)?),
        }
    }
    Ok(Some(pages))
}

/// Parse one side of a range, reporting the full token on failure.
fn parse_page_number(s: &str, token: &str) -> Result<u32, ConvertError> {
    s.trim()
        .parse::<u32>()
        .map_err(|_| ConvertError::InvalidPageRange {
            token: token.to_string(),
        })
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Image handling hint for the PDF→Word path.
///
/// `Low` disables the converter's page-rotation analysis, trading fidelity
/// for speed; `Medium` (default) leaves it on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageQuality {
    Low,
    #[default]
    Medium,
}

impl ImageQuality {
    /// Look up a client-supplied value; unrecognised values mean the default.
    pub fn parse_or_default(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "low" => ImageQuality::Low,
            _ => ImageQuality::Medium,
        }
    }
}

/// Target page size for the Word→PDF path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    #[default]
    A4,
    Letter,
    Legal,
}

impl PageSize {
    /// Look up a client-supplied value; unrecognised values mean A4.
    pub fn parse_or_default(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "letter" => PageSize::Letter,
            "legal" => PageSize::Legal,
            "a4" => PageSize::A4,
            _ => PageSize::A4,
        }
    }

    /// Portrait dimensions in PDF points (width, height).
    pub fn points(self) -> (f64, f64) {
        match self {
            PageSize::A4 => (595.0, 842.0),
            PageSize::Letter => (612.0, 792.0),
            PageSize::Legal => (612.0, 1008.0),
        }
    }

    /// Lowercase name as accepted on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            PageSize::A4 => "a4",
            PageSize::Letter => "letter",
            PageSize::Legal => "legal",
        }
    }
}

/// Target page orientation for the Word→PDF path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    /// Look up a client-supplied value; unrecognised values mean portrait.
    pub fn parse_or_default(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "landscape" => Orientation::Landscape,
            _ => Orientation::Portrait,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }
}

/// Page size and orientation resolved to concrete dimensions.
#[derive(Debug, Clone, Copy)]
pub struct PageLayout {
    pub size: PageSize,
    pub orientation: Orientation,
}

impl PageLayout {
    /// Final page dimensions in PDF points; landscape swaps width and height.
    pub fn dimensions(self) -> (f64, f64) {
        let (w, h) = self.size.points();
        match self.orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_list_expands_in_encounter_order() {
        assert_eq!(
            parse_page_range("1-3,5").unwrap(),
            Some(vec![1, 2, 3, 5])
        );
        assert_eq!(
            parse_page_range("9-12,1-2,7").unwrap(),
            Some(vec![9, 10, 11, 12, 1, 2, 7])
        );
    }

    #[test]
    fn empty_input_means_all_pages() {
        assert_eq!(parse_page_range("").unwrap(), None);
        assert_eq!(parse_page_range("   ").unwrap(), None);
    }

    #[test]
    fn duplicates_are_preserved() {
        assert_eq!(parse_page_range("2,2").unwrap(), Some(vec![2, 2]));
    }

    #[test]
    fn tokens_are_trimmed() {
        assert_eq!(
            parse_page_range(" 1 , 3 - 4 ").unwrap(),
            Some(vec![1, 3, 4])
        );
    }

    #[test]
    fn malformed_tokens_fail_and_name_the_token() {
        for bad in ["a-b", "3-", "x", "1,,3", "-2", "1-2-3"] {
            let err = parse_page_range(bad).unwrap_err();
            match err {
                ConvertError::InvalidPageRange { token } => {
                    assert!(bad.contains(token.trim()), "token {token:?} for input {bad:?}")
                }
                other => panic!("expected InvalidPageRange, got {other}"),
            }
        }
    }

    #[test]
    fn descending_range_is_rejected() {
        let err = parse_page_range("5-3").unwrap_err();
        assert!(matches!(err, ConvertError::InvalidPageRange { ref token } if token == "5-3"));
    }

    #[test]
    fn no_partial_result_on_failure() {
        // the leading valid token must not leak out
        assert!(parse_page_range("1-3,oops").is_err());
    }

    #[test]
    fn unrecognised_option_values_fall_back() {
        assert_eq!(PageSize::parse_or_default("tabloid"), PageSize::A4);
        assert_eq!(Orientation::parse_or_default("sideways"), Orientation::Portrait);
        assert_eq!(ImageQuality::parse_or_default("ultra"), ImageQuality::Medium);
    }

    #[test]
    fn option_values_are_case_insensitive() {
        assert_eq!(PageSize::parse_or_default("Letter"), PageSize::Letter);
        assert_eq!(PageSize::parse_or_default("LEGAL"), PageSize::Legal);
        assert_eq!(
            Orientation::parse_or_default("Landscape"),
            Orientation::Landscape
        );
        assert_eq!(ImageQuality::parse_or_default("LOW"), ImageQuality::Low);
    }

    #[test]
    fn layout_dimensions_swap_in_landscape() {
        let layout = PageLayout {
            size: PageSize::Letter,
            orientation: Orientation::Landscape,
        };
        assert_eq!(layout.dimensions(), (792.0, 612.0));

        let layout = PageLayout {
            size: PageSize::A4,
            orientation: Orientation::Portrait,
        };
        assert_eq!(layout.dimensions(), (595.0, 842.0));
    }
}

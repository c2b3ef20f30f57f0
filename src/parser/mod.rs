pub mod detail;
pub mod list;

use scraper::ElementRef;

/// Collect an element's visible text with embedded whitespace collapsed:
/// every run of whitespace (non-breaking spaces included) becomes a single
/// space, ends trimmed. Used for descriptions and table values.
pub(crate) fn element_text(el: ElementRef) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Concatenate an element's text nodes without a separator, each node
/// trimmed. Titles and labels split across inline tags must come out as
/// one token ("신청<span>자격</span>" is "신청자격", not "신청 자격") or
/// question matching misses them.
pub(crate) fn compact_text(el: ElementRef) -> String {
    el.text().map(str::trim).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    #[test]
    fn element_text_collapses_nodes_and_nbsp() {
        let doc = Html::parse_fragment("<p>  월&nbsp;최대 <b>20만원</b>\n 지원 </p>");
        let sel = Selector::parse("p").unwrap();
        let p = doc.select(&sel).next().unwrap();
        assert_eq!(element_text(p), "월 최대 20만원 지원");
    }

    #[test]
    fn compact_text_joins_inline_tags_without_spaces() {
        let doc = Html::parse_fragment("<strong>신청<span>자격</span></strong>");
        let sel = Selector::parse("strong").unwrap();
        let el = doc.select(&sel).next().unwrap();
        assert_eq!(compact_text(el), "신청자격");
    }

    #[test]
    fn compact_text_keeps_interior_spaces_of_one_node() {
        let doc = Html::parse_fragment("<strong> 청년 월세 지원 </strong>");
        let sel = Selector::parse("strong").unwrap();
        let el = doc.select(&sel).next().unwrap();
        assert_eq!(compact_text(el), "청년 월세 지원");
    }
}

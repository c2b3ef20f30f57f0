use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::warn;

use super::{compact_text, element_text};

static ITEM_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("ul.policy-list li").unwrap());
static CATEGORY_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span.bg-blue").unwrap());
static TITLE_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a.tit.txt-over1").unwrap());
static DESC_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("em.txt-over1").unwrap());

// Inline view handler on each listing anchor: onclick="goView('<id>');"
static VIEW_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"goView\('([^']*)'\)").unwrap());

/// One item of the policy listing, in page order.
#[derive(Debug, Clone)]
pub struct PolicyItem {
    pub category: String,
    pub title: String,
    /// Empty when the anchor has no recognizable view handler.
    pub policy_id: String,
    pub link_classes: Vec<String>,
    pub description: String,
}

/// Parse one listing page into policy items, preserving page order.
/// Items missing a required element are logged and dropped.
pub fn parse_policy_list(html: &str) -> Vec<PolicyItem> {
    let doc = Html::parse_document(html);
    let mut items = Vec::new();
    for li in doc.select(&ITEM_SEL) {
        match parse_item(li) {
            Some(item) => items.push(item),
            None => warn!("Skipping listing item with missing fields"),
        }
    }
    items
}

fn parse_item(li: ElementRef) -> Option<PolicyItem> {
    let category = li.select(&CATEGORY_SEL).next().map(compact_text)?;
    let anchor = li.select(&TITLE_SEL).next()?;
    let description = li.select(&DESC_SEL).next().map(element_text)?;

    let onclick = anchor.value().attr("onclick").unwrap_or("");
    let policy_id = VIEW_RE
        .captures(onclick)
        .map(|c| c[1].trim().to_string())
        .unwrap_or_default();

    Some(PolicyItem {
        category,
        title: compact_text(anchor),
        policy_id,
        link_classes: anchor.value().classes().map(str::to_string).collect(),
        description,
    })
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_fixture_parses_in_page_order() {
        let html = std::fs::read_to_string("tests/fixtures/list_page.html").unwrap();
        let items = parse_policy_list(&html);
        assert_eq!(items.len(), 2);

        assert_eq!(items[0].category, "주거");
        assert_eq!(items[0].title, "청년 월세 지원");
        assert_eq!(items[0].policy_id, "PLCY2025001");
        assert_eq!(items[0].description, "무주택 청년에게 월세를 지원합니다");
        assert!(items[0].link_classes.contains(&"tit".to_string()));

        assert_eq!(items[1].title, "청년 교통비 지원");
        assert_eq!(items[1].policy_id, "PLCY2025002");
    }

    #[test]
    fn item_without_category_is_dropped() {
        let html = r#"
            <ul class="policy-list">
              <li>
                <a class="tit txt-over1" onclick="goView('X1');">이름만 있는 항목</a>
                <em class="txt-over1">설명</em>
              </li>
            </ul>"#;
        assert!(parse_policy_list(html).is_empty());
    }

    #[test]
    fn missing_view_handler_yields_empty_id() {
        let html = r##"
            <ul class="policy-list">
              <li>
                <span class="bg-blue">금융</span>
                <a class="tit txt-over1" href="#">핸들러 없는 정책</a>
                <em class="txt-over1">설명</em>
              </li>
            </ul>"##;
        let items = parse_policy_list(html);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].policy_id, "");
    }

    #[test]
    fn empty_listing_parses_to_no_items() {
        let html = r#"<html><body><ul class="policy-list"></ul></body></html>"#;
        assert!(parse_policy_list(html).is_empty());
    }
}

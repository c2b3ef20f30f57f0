use std::sync::LazyLock;

use anyhow::{anyhow, Result};
use scraper::{ElementRef, Html, Selector};

use super::{compact_text, element_text};

static TITLE_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("strong.title").unwrap());
// Section headings and their data tables, matched together so document
// order is preserved across both.
static SECTION_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("strong.tit, table.form-table.form-resp-table").unwrap());
static ROW_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());
static LABEL_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("th").unwrap());
static VALUE_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());

/// One titled label/value block of a detail page, in document order.
#[derive(Debug, Clone)]
pub struct Section {
    pub title: String,
    pub fields: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
pub struct DetailPage {
    pub title: String,
    pub sections: Vec<Section>,
}

/// Parse a policy detail page into its title and sections. A page with no
/// title element is an error; the caller skips that policy.
pub fn parse_detail(html: &str) -> Result<DetailPage> {
    let doc = Html::parse_document(html);
    let title = doc
        .select(&TITLE_SEL)
        .next()
        .map(compact_text)
        .ok_or_else(|| anyhow!("detail page has no title element"))?;
    Ok(DetailPage {
        title,
        sections: parse_sections(&doc),
    })
}

/// Pair every section heading with the next data table in document order.
/// A heading with no following table contributes no section.
fn parse_sections(doc: &Html) -> Vec<Section> {
    let nodes: Vec<ElementRef> = doc.select(&SECTION_SEL).collect();
    let mut sections = Vec::new();
    for (i, el) in nodes.iter().enumerate() {
        if el.value().name() != "strong" {
            continue;
        }
        let Some(table) = nodes[i + 1..].iter().find(|n| n.value().name() == "table") else {
            continue;
        };
        sections.push(Section {
            title: compact_text(*el),
            fields: parse_rows(*table),
        });
    }
    sections
}

/// Pair each row's label cells with its value cells positionally, by index
/// within the row. Rows with mismatched cell counts are truncated to the
/// shorter side.
fn parse_rows(table: ElementRef) -> Vec<(String, String)> {
    let mut fields = Vec::new();
    for row in table.select(&ROW_SEL) {
        let labels: Vec<ElementRef> = row.select(&LABEL_SEL).collect();
        let values: Vec<ElementRef> = row.select(&VALUE_SEL).collect();
        for (th, td) in labels.iter().zip(values.iter()) {
            fields.push((compact_text(*th), element_text(*td)));
        }
    }
    fields
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_fixture_sections_follow_document_order() {
        let html = std::fs::read_to_string("tests/fixtures/detail_page.html").unwrap();
        let page = parse_detail(&html).unwrap();

        assert_eq!(page.title, "청년 월세 지원");
        let titles: Vec<&str> = page.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["사업개요", "신청자격", "신청방법"]);

        let overview = &page.sections[0];
        assert_eq!(
            overview.fields[0],
            ("지원내용".to_string(), "월 최대 20만원 지원".to_string())
        );
    }

    #[test]
    fn mismatched_row_is_truncated_to_shorter_side() {
        let html = r#"
            <strong class="title">T</strong>
            <strong class="tit">신청자격</strong>
            <table class="form-table form-resp-table">
              <tr><th>연령</th><th>거주지</th><td>만 19~39세</td></tr>
            </table>"#;
        let page = parse_detail(html).unwrap();
        assert_eq!(page.sections.len(), 1);
        assert_eq!(
            page.sections[0].fields,
            vec![("연령".to_string(), "만 19~39세".to_string())]
        );
    }

    #[test]
    fn heading_without_table_contributes_no_section() {
        let html = r#"
            <strong class="title">T</strong>
            <strong class="tit">기타</strong>
            <p>표가 없는 섹션</p>"#;
        let page = parse_detail(html).unwrap();
        assert!(page.sections.is_empty());
    }

    #[test]
    fn values_normalize_nonbreaking_spaces() {
        let html = r#"
            <strong class="title">T</strong>
            <strong class="tit">사업개요</strong>
            <table class="form-table form-resp-table">
              <tr><th>기간</th><td>2025.&nbsp;01&nbsp;~&nbsp;12</td></tr>
            </table>"#;
        let page = parse_detail(html).unwrap();
        assert_eq!(page.sections[0].fields[0].1, "2025. 01 ~ 12");
    }

    #[test]
    fn heading_split_across_inline_tags_is_one_token() {
        let html = r#"
            <strong class="title">T</strong>
            <strong class="tit">신청<span>자격</span></strong>
            <table class="form-table form-resp-table">
              <tr><th>연령</th><td>만 19~39세</td></tr>
            </table>"#;
        let page = parse_detail(html).unwrap();
        assert_eq!(page.sections[0].title, "신청자격");
    }

    #[test]
    fn missing_title_is_an_error() {
        assert!(parse_detail("<html><body><p>no title</p></body></html>").is_err());
    }
}

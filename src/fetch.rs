use anyhow::{Context, Result};
use tracing::debug;

const LIST_ENDPOINT: &str = "https://youth.seoul.go.kr/infoData/plcyInfo/ctList.do";
const DETAIL_ENDPOINT: &str = "https://youth.seoul.go.kr/infoData/plcyInfo/view.do";
const PORTAL_KEY: &str = "2309150002";

/// Listing endpoint URL for one page, newest policies first.
pub fn list_url(page: u32) -> String {
    format!(
        "{LIST_ENDPOINT}?sprtInfoId=&plcyBizId=&key={PORTAL_KEY}&sc_detailAt=\
         &pageIndex={page}&orderBy=regYmd+desc&blueWorksYn=N&tabKind=002&sw=\
         &sc_rcritCurentSitu=001&sc_rcritCurentSitu=002"
    )
}

/// Detail endpoint URL for one policy id.
pub fn detail_url(policy_id: &str) -> String {
    format!("{DETAIL_ENDPOINT}?plcyBizId={policy_id}&tab=001&key={PORTAL_KEY}")
}

/// Fetch a portal page and return its markup, decoded as UTF-8 regardless
/// of the declared charset.
pub async fn fetch_page(client: &reqwest::Client, url: &str) -> Result<String> {
    debug!("GET {}", url);
    let bytes = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to fetch {}", url))?
        .bytes()
        .await
        .with_context(|| format!("Failed to read body of {}", url))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

// ── Tests ──

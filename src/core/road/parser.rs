use scraper::{ElementRef, Html, Selector};

use super::RoadError;

/// 默认选择器：珠盘路里的每个子元素
pub const DEFAULT_MARKER_SELECTOR: &str = ".bead-road *";

/// 从房间渲染后的 HTML 中按文档顺序取出标记标识
pub fn markers_from_html(html: &str, selector: &str) -> Result<Vec<String>, RoadError> {
    let selector = parse_selector(selector)?;
    Ok(select_markers(html, &selector))
}

pub fn parse_selector(selector: &str) -> Result<Selector, RoadError> {
    Selector::parse(selector).map_err(|e| RoadError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

pub fn select_markers(html: &str, selector: &Selector) -> Vec<String> {
    let document = Html::parse_document(html);
    document.select(selector).map(marker_identifier).collect()
}

/// 标识优先取 class，没有则依次取 src、alt
fn marker_identifier(element: ElementRef<'_>) -> String {
    let value = element.value();
    ["class", "src", "alt"]
        .iter()
        .filter_map(|attr| value.attr(attr))
        .map(str::trim)
        .find(|v| !v.is_empty())
        .unwrap_or_default()
        .to_string()
}

use crate::view::{DETAIL_REPOSITORIES, DashboardView, share_series, top_points};

const START_Y: i32 = 30;
const LINE_HEIGHT: i32 = 20;
const LEFT_PADDING: f32 = 15.0;
const RIGHT_PADDING: f32 = 30.0;
const CHAR_WIDTH: f32 = 9.6;
const MIN_COL_CHARS: usize = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

pub struct ThemeColors {
    pub bg: &'static str,
    pub text: &'static str,
    pub key: &'static str,
    pub value: &'static str,
    pub cc: &'static str,
}

impl Theme {
    pub fn colors(self) -> ThemeColors {
        match self {
            Theme::Dark => ThemeColors {
                bg: "#161b22",
                text: "#c9d1d9",
                key: "#ffa657",
                value: "#a5d6ff",
                cc: "#616e7f",
            },
            Theme::Light => ThemeColors {
                bg: "#ffffff",
                text: "#24292f",
                key: "#d73a49",
                value: "#0366d6",
                cc: "#6a737d",
            },
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Theme::Dark => "dark_mode.svg",
            Theme::Light => "light_mode.svg",
        }
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Split a row into `key: `, dot leader, value so every value ends in the
/// same column.
pub fn build_stat_row(key: &str, value: &str, align_width: usize) -> (String, String, String) {
    let key_part = format!("{key}: ");
    let base_len = key_part.chars().count() + value.chars().count();
    let available = align_width.saturating_sub(base_len);

    let dots = match available {
        0 => "".to_string(),
        1 => " ".to_string(),
        2 => ". ".to_string(),
        n => ".".repeat(n),
    };

    (key_part, dots, value.to_string())
}

fn build_header_line(label: &str, align_width: usize) -> String {
    let base = format!("{label} ");
    let dash_count = align_width.saturating_sub(base.chars().count()) + 2;
    format!("{base}{}", "-".repeat(dash_count))
}

enum Line {
    Header(String),
    Blank,
    Stat(String, String),
}

fn card_lines(view: &DashboardView, updated_label: &str) -> Vec<Line> {
    let mut lines = vec![Line::Header("GitHub Activity".to_string())];

    for tile in &view.tiles {
        lines.push(Line::Stat(tile.title.to_string(), tile.value.clone()));
    }

    if !view.languages.is_empty() {
        lines.push(Line::Blank);
        lines.push(Line::Header("- Languages".to_string()));
        for point in &view.languages {
            let unit = if point.value == 1 { "repo" } else { "repos" };
            lines.push(Line::Stat(point.label.clone(), format!("{} {unit}", point.value)));
        }
    }

    let top = top_points(&view.ranked, DETAIL_REPOSITORIES);
    if !top.is_empty() {
        lines.push(Line::Blank);
        lines.push(Line::Header("- Top Repositories".to_string()));
        // shares are relative to every repository, not just the ones listed
        let shares = share_series(&view.ranked);
        for share in shares.iter().take(top.len()) {
            lines.push(Line::Stat(
                share.label.clone(),
                format!("{} commits ({}%)", share.value, share.percent),
            ));
        }
    }

    lines.push(Line::Blank);
    lines.push(Line::Stat("Last updated".to_string(), updated_label.to_string()));
    lines
}

// Renders the card body and returns (tspans, width, height)
fn build_column(lines: &[Line]) -> (String, f32, f32) {
    let align_width = lines
        .iter()
        .map(|line| match line {
            Line::Stat(k, v) => k.chars().count() + 2 + v.chars().count(),
            _ => 0,
        })
        .max()
        .unwrap_or(0)
        .max(MIN_COL_CHARS);

    let mut tspans = String::new();
    for (i, line) in lines.iter().enumerate() {
        let y = START_Y + (i as i32) * LINE_HEIGHT;

        match line {
            Line::Blank => {}
            Line::Header(text) => {
                tspans.push_str(&format!(
                    r#"<tspan x="{LEFT_PADDING}" y="{y}">{}</tspan>
"#,
                    escape_xml(&build_header_line(text, align_width))
                ));
            }
            Line::Stat(key, value) => {
                let (k, d, v) = build_stat_row(key, value, align_width);
                tspans.push_str(&format!(
                    r#"<tspan x="{LEFT_PADDING}" y="{y}" class="cc">. </tspan>
<tspan class="key">{}</tspan><tspan class="cc">{}</tspan><tspan class="value">{}</tspan>
"#,
                    escape_xml(&k),
                    escape_xml(&d),
                    escape_xml(&v)
                ));
            }
        }
    }

    let width = LEFT_PADDING + (align_width as f32 + 2.0) * CHAR_WIDTH + RIGHT_PADDING;
    let height = lines.len() as f32 * LINE_HEIGHT as f32 + START_Y as f32 + 30.0;

    (tspans, width, height)
}

/// Render the dashboard summary as a themed SVG card.
pub fn generate_svg(view: &DashboardView, updated_label: &str, theme: Theme) -> String {
    let colors = theme.colors();
    let lines = card_lines(view, updated_label);
    let (body, w, h) = build_column(&lines);

    format!(
        r#"<?xml version='1.0' encoding='UTF-8'?>
<svg xmlns="http://www.w3.org/2000/svg"
     width="{w}px" height="{h}px"
     font-family="ConsolasFallback,Consolas,monospace"
     font-size="16px">

<style>
.key      {{ fill: {key}; }}
.value    {{ fill: {value}; }}
.cc       {{ fill: {cc}; }}
</style>

<rect width="{w}px" height="{h}px" fill="{bg}" rx="15"/>

<text fill="{text}">
{body}
</text>

</svg>
"#,
        w = w,
        h = h,
        bg = colors.bg,
        text = colors.text,
        key = colors.key,
        value = colors.value,
        cc = colors.cc,
        body = body
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RepositoryRecord;
    use crate::view::{CommitOrder, ViewOptions, assemble};
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn view() -> DashboardView {
        let records = vec![
            RepositoryRecord {
                name: "api<v2>".to_string(),
                commit_count: 30,
                languages: "Rust".to_string(),
                ..Default::default()
            },
            RepositoryRecord {
                name: "site".to_string(),
                commit_count: 10,
                languages: "N/A".to_string(),
                ..Default::default()
            },
        ];
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        assemble(&records, at, &ViewOptions::default())
    }

    #[test]
    fn test_stat_row_alignment() {
        let (k, d, v) = build_stat_row("Stars", "12", 20);
        assert_eq!(k, "Stars: ");
        assert_eq!(k.len() + d.len() + v.len(), 20);
        assert_eq!(build_stat_row("Stars", "12", 10).1, " ");
    }

    #[test]
    fn test_header_line() {
        assert_eq!(build_header_line("- Languages", 14), "- Languages ----");
    }

    #[test]
    fn test_svg_contains_escaped_content() {
        let svg = generate_svg(&view(), "just now", Theme::Dark);

        assert!(svg.contains("api&lt;v2&gt;"));
        assert!(!svg.contains("api<v2>"));
        assert!(svg.contains("30 commits (75%)"));
        assert!(svg.contains("1 repo"));
        assert!(svg.contains("#161b22"));
    }

    #[test]
    fn test_light_theme() {
        let svg = generate_svg(&view(), "just now", Theme::Light);
        assert!(svg.contains("#ffffff"));
        assert_eq!(Theme::Light.file_name(), "light_mode.svg");
    }

    #[test]
    fn test_top_repositories_ranked_when_ordered_by_name() {
        let mut records: Vec<RepositoryRecord> = (1..=6)
            .map(|i| RepositoryRecord {
                name: format!("a{i}"),
                commit_count: i - 1,
                ..Default::default()
            })
            .collect();
        records.push(RepositoryRecord {
            name: "zzz-busiest".to_string(),
            commit_count: 999,
            ..Default::default()
        });
        let options = ViewOptions {
            commit_order: CommitOrder::ByName,
            language_top_n: None,
        };
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();

        let svg = generate_svg(&assemble(&records, at, &options), "just now", Theme::Dark);

        assert!(svg.contains("zzz-busiest"));
        assert!(svg.contains("999 commits"));
        assert!(!svg.contains(">a1: <"));
        assert!(svg.contains(">a6: <"));
    }
}

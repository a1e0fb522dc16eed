//! Turns censuses into aligned text columns.
//!
//! Every rendering follows [`LAYOUT`] row for row, so a label column and any
//! number of value columns line up positionally.

use std::cmp::Ordering;
use std::fmt;

use chrono::TimeDelta;

use crate::census::{Metric, ResourceCensus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row {
    Time,
    Blank,
    Metric(Metric),
}

pub const LAYOUT: [Row; 22] = [
    Row::Time,
    Row::Blank,
    Row::Metric(Metric::UsedHeap),
    Row::Metric(Metric::MonoHeap),
    Row::Metric(Metric::MonoUsed),
    Row::Metric(Metric::TotalReserved),
    Row::Metric(Metric::TotalUnusedReserved),
    Row::Blank,
    Row::Metric(Metric::CurrentTextureMemory),
    Row::Metric(Metric::NonStreamingTextureCount),
    Row::Metric(Metric::NonStreamingTextureMemory),
    Row::Metric(Metric::TextureCount),
    Row::Metric(Metric::TextureMemory),
    Row::Blank,
    Row::Metric(Metric::MaterialCount),
    Row::Metric(Metric::MaterialMemory),
    Row::Blank,
    Row::Metric(Metric::MeshCount),
    Row::Metric(Metric::MeshMemory),
    Row::Blank,
    Row::Metric(Metric::ObjectCount),
    Row::Metric(Metric::AudioClipCount),
];

const TIME_LABEL: &str = "Time";

/// Direction of a value relative to its baseline. Carries no judgement of
/// which direction is good.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Low,
    Neutral,
    High,
}

impl Tone {
    pub fn compare(value: i64, baseline: i64) -> Self {
        match value.cmp(&baseline) {
            Ordering::Less => Tone::Low,
            Ordering::Equal => Tone::Neutral,
            Ordering::Greater => Tone::High,
        }
    }
}

/// Hex colors for the three tones, `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TonePalette {
    pub low: String,
    pub neutral: String,
    pub high: String,
}

impl TonePalette {
    pub fn color(&self, tone: Tone) -> &str {
        match tone {
            Tone::Low => &self.low,
            Tone::Neutral => &self.neutral,
            Tone::High => &self.high,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    pub text: String,
    pub tone: Option<Tone>,
}

impl RenderedLine {
    fn plain(text: impl Into<String>) -> Self {
        RenderedLine {
            text: text.into(),
            tone: None,
        }
    }
}

/// One column of rendered rows, in [`LAYOUT`] order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedColumn {
    pub lines: Vec<RenderedLine>,
}

impl RenderedColumn {
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Rich-text form: toned cells wrapped in `<color=..>` tags.
    pub fn markup(&self, palette: &TonePalette) -> String {
        self.lines
            .iter()
            .map(|line| match line.tone {
                Some(tone) => format!("<color={}>{}</color>", palette.color(tone), line.text),
                None => line.text.clone(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for RenderedColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(&line.text)?;
        }
        Ok(())
    }
}

pub fn labels() -> Vec<&'static str> {
    LAYOUT
        .iter()
        .map(|row| match row {
            Row::Time => TIME_LABEL,
            Row::Blank => "",
            Row::Metric(metric) => metric.label(),
        })
        .collect()
}

/// Values of one census, toned against `baseline` when given.
pub fn render_absolute(
    census: &ResourceCensus,
    baseline: Option<&ResourceCensus>,
) -> RenderedColumn {
    let lines = LAYOUT
        .iter()
        .map(|row| match row {
            Row::Time => {
                RenderedLine::plain(census.captured_at.format("%H:%M:%S").to_string())
            }
            Row::Blank => RenderedLine::plain(""),
            Row::Metric(metric) => {
                let value = census.value(*metric);
                RenderedLine {
                    text: with_unit(*metric, value),
                    tone: baseline.map(|b| Tone::compare(value, b.value(*metric))),
                }
            }
        })
        .collect();
    RenderedColumn { lines }
}

/// `newer - older` per metric, headed by the elapsed time between them.
///
/// Values were truncated to megabytes at capture, so a real change under a
/// megabyte can show as `0 MB`.
pub fn render_delta(newer: &ResourceCensus, older: &ResourceCensus) -> RenderedColumn {
    let lines = LAYOUT
        .iter()
        .map(|row| match row {
            Row::Time => {
                RenderedLine::plain(format_elapsed(newer.captured_at - older.captured_at))
            }
            Row::Blank => RenderedLine::plain(""),
            Row::Metric(metric) => {
                let delta = newer.value(*metric).saturating_sub(older.value(*metric));
                RenderedLine::plain(with_unit(*metric, delta))
            }
        })
        .collect();
    RenderedColumn { lines }
}

/// `m:ss`, with a leading `-` for negative spans.
pub fn format_elapsed(elapsed: TimeDelta) -> String {
    let seconds = elapsed.num_seconds();
    let sign = if seconds < 0 { "-" } else { "" };
    let total = seconds.unsigned_abs();
    format!("{sign}{}:{:02}", total / 60, total % 60)
}

fn with_unit(metric: Metric, value: i64) -> String {
    format!("{value}{}", metric.unit().suffix())
}

#[cfg(test)]
mod tests {
    use chrono::Local;

    use super::*;
    use crate::census::MetricValues;

    fn census_at(offset_secs: i64, values: MetricValues) -> ResourceCensus {
        ResourceCensus::from_values(Local::now() + TimeDelta::seconds(offset_secs), values)
    }

    #[test]
    fn layout_lists_every_metric_once_in_schema_order() {
        let metrics: Vec<Metric> = LAYOUT
            .iter()
            .filter_map(|row| match row {
                Row::Metric(m) => Some(*m),
                _ => None,
            })
            .collect();
        assert_eq!(metrics, Metric::ALL.to_vec());
    }

    #[test]
    fn blank_rows_separate_groups() {
        let mut previous_group = None;
        for pair in LAYOUT.windows(2) {
            if let (Row::Metric(a), Row::Metric(b)) = (pair[0], pair[1]) {
                assert_eq!(a.group(), b.group(), "{a:?} and {b:?} need a separator");
            }
            if let (Row::Blank, Row::Metric(m)) = (pair[0], pair[1]) {
                assert_ne!(previous_group, Some(m.group()));
                previous_group = Some(m.group());
            }
        }
    }

    #[test]
    fn delta_reports_mono_heap_growth() {
        let a = census_at(0, MetricValues::default().with(Metric::MonoHeap, 120));
        let b = census_at(5, MetricValues::default().with(Metric::MonoHeap, 135));

        let delta = render_delta(&b, &a);
        let texts: Vec<&str> = delta.lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts[0], "0:05");
        let after_time: Vec<&str> = texts[1..]
            .iter()
            .copied()
            .filter(|t| !t.is_empty())
            .collect();
        assert_eq!(after_time[1], "15 MB");
        assert!(delta.lines.iter().all(|l| l.tone.is_none()));
    }

    #[test]
    fn delta_against_newer_census_goes_negative() {
        let a = census_at(0, MetricValues::default().with(Metric::MeshCount, 10));
        let b = census_at(75, MetricValues::default().with(Metric::MeshCount, 4));

        let delta = render_delta(&a, &b);
        assert_eq!(delta.lines[0].text, "-1:15");
        assert!(delta.lines.iter().any(|l| l.text == "6"));
        assert_eq!(delta.len(), labels().len());
    }

    #[test]
    fn absolute_tones_follow_baseline() {
        let baseline = census_at(0, MetricValues::default().with(Metric::MonoHeap, 100));
        let tones: Vec<Tone> = [90, 100, 110]
            .into_iter()
            .map(|v| {
                let census = census_at(1, MetricValues::default().with(Metric::MonoHeap, v));
                render_absolute(&census, Some(&baseline)).lines[3]
                    .tone
                    .expect("metric rows are toned")
            })
            .collect();
        assert_eq!(tones, vec![Tone::Low, Tone::Neutral, Tone::High]);
    }

    #[test]
    fn absolute_without_baseline_is_untoned() {
        let census = census_at(0, MetricValues::default().with(Metric::TextureCount, 12));
        let column = render_absolute(&census, None);
        assert!(column.lines.iter().all(|l| l.tone.is_none()));
        assert_eq!(column.lines[11].text, "12");
        assert_eq!(column.lines[3].text, "0 MB");
        assert_eq!(column.len(), LAYOUT.len());
    }

    #[test]
    fn markup_tags_only_toned_cells() {
        let palette = TonePalette {
            low: "#00ff00".to_string(),
            neutral: "#ffffff".to_string(),
            high: "#ff0000".to_string(),
        };
        let baseline = census_at(0, MetricValues::default().with(Metric::UsedHeap, 50));
        let census = census_at(1, MetricValues::default().with(Metric::UsedHeap, 60));
        let markup = render_absolute(&census, Some(&baseline)).markup(&palette);
        let lines: Vec<&str> = markup.split('\n').collect();

        assert_eq!(lines.len(), LAYOUT.len());
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "<color=#ff0000>60 MB</color>");
        assert_eq!(lines[3], "<color=#ffffff>0 MB</color>");
        assert!(!lines[0].contains("<color"));
    }

    #[test]
    fn elapsed_formatting() {
        assert_eq!(format_elapsed(TimeDelta::zero()), "0:00");
        assert_eq!(format_elapsed(TimeDelta::seconds(59)), "0:59");
        assert_eq!(format_elapsed(TimeDelta::seconds(61)), "1:01");
        assert_eq!(format_elapsed(TimeDelta::seconds(-5)), "-0:05");
        assert_eq!(format_elapsed(TimeDelta::milliseconds(1_999)), "0:01");
    }

    #[test]
    fn display_joins_plain_text() {
        let census = census_at(0, MetricValues::default());
        let text = render_absolute(&census, None).to_string();
        assert_eq!(text.lines().count(), LAYOUT.len());
    }
}

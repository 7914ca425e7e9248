// Chart option builder - View models to declarative chart configuration
use crate::domain::chart::{
    AreaStyle, Axis, AxisLabel, ChartOption, Grid, InRange, Series, SeriesDatum, SeriesKind,
    Title, Tooltip, Trigger, VisualMap,
};
use crate::domain::dashboard::{HistorySeries, RegionView};

const HISTORY_TITLE: &str = "Histórico de Potência Ativa";
const MAP_TITLE: &str = "Potência Ativa por Estado";
const NO_DATA: &str = "Nenhum dado disponível";
const POWER_AXIS_NAME: &str = "Potência (MW)";
const SERIES_NAME: &str = "Potência Ativa";
const MAP_NAME: &str = "BR";
const LABEL_ROTATION: i32 = 45;
const MAX_VISIBLE_LABELS: usize = 10;

fn title(text: &str, subtext: Option<&str>) -> Title {
    Title {
        text: text.to_string(),
        subtext: subtext.map(str::to_string),
        left: "center".to_string(),
    }
}

/// Line chart of aggregate active power over time.
pub fn build(series: &HistorySeries) -> ChartOption {
    if series.is_empty() {
        return build_empty();
    }

    let interval = label_interval(series.len());

    ChartOption {
        title: title(HISTORY_TITLE, None),
        tooltip: Some(Tooltip {
            trigger: Trigger::Axis,
            formatter: "{b}: {c} MW".to_string(),
        }),
        grid: Some(Grid {
            left: "3%".to_string(),
            right: "4%".to_string(),
            bottom: "15%".to_string(),
            contain_label: true,
        }),
        x_axis: Some(Axis {
            boundary_gap: Some(false),
            axis_label: Some(AxisLabel {
                rotate: LABEL_ROTATION,
                interval,
            }),
            ..Axis::category(series.timestamps.clone())
        }),
        y_axis: Some(Axis::value(POWER_AXIS_NAME)),
        visual_map: None,
        series: vec![Series {
            name: SERIES_NAME.to_string(),
            kind: SeriesKind::Line,
            map: None,
            smooth: Some(true),
            area_style: Some(AreaStyle { opacity: Some(0.3) }),
            data: series
                .active_power
                .iter()
                .cloned()
                .map(SeriesDatum::Label)
                .collect(),
        }],
    }
}

/// Well-formed history chart with no data.
pub fn build_empty() -> ChartOption {
    ChartOption {
        title: title(HISTORY_TITLE, Some(NO_DATA)),
        tooltip: None,
        grid: None,
        x_axis: Some(Axis::category(Vec::new())),
        y_axis: Some(Axis::value(POWER_AXIS_NAME)),
        visual_map: None,
        series: Vec::new(),
    }
}

/// Choropleth of active power (MW) per region.
pub fn build_map(regions: &[RegionView]) -> ChartOption {
    let max = regions.iter().map(|r| r.value).fold(0.0_f64, f64::max);
    let subtext = regions.is_empty().then_some(NO_DATA);

    ChartOption {
        title: title(MAP_TITLE, subtext),
        tooltip: Some(Tooltip {
            trigger: Trigger::Item,
            formatter: "{b}: {c} MW".to_string(),
        }),
        grid: None,
        x_axis: None,
        y_axis: None,
        visual_map: Some(VisualMap {
            min: 0.0,
            max,
            text: ["Alto".to_string(), "Baixo".to_string()],
            calculable: true,
            in_range: InRange {
                color: vec![
                    "#e0f3f8".to_string(),
                    "#abd9e9".to_string(),
                    "#74add1".to_string(),
                    "#4575b4".to_string(),
                    "#313695".to_string(),
                ],
            },
        }),
        series: vec![Series {
            name: SERIES_NAME.to_string(),
            kind: SeriesKind::Map,
            map: Some(MAP_NAME.to_string()),
            smooth: None,
            area_style: None,
            data: regions
                .iter()
                .map(|r| SeriesDatum::Named {
                    name: r.name.clone(),
                    value: r.value,
                })
                .collect(),
        }],
    }
}

/// Category label interval so that roughly ten labels stay visible.
fn label_interval(count: usize) -> usize {
    count / MAX_VISIBLE_LABELS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(n: usize) -> HistorySeries {
        let mut s = HistorySeries::default();
        for i in 0..n {
            s.push(format!("01/01/2025 {:02}:00", i % 24), format!("{}.00", i));
        }
        s
    }

    #[test]
    fn test_build_empty() {
        let option = build_empty();
        assert!(option.series.is_empty());
        assert_eq!(option.x_axis.as_ref().unwrap().data, Some(Vec::new()));
        assert_eq!(option.title.subtext.as_deref(), Some(NO_DATA));
        assert_eq!(option.y_axis.as_ref().unwrap().name.as_deref(), Some(POWER_AXIS_NAME));
    }

    #[test]
    fn test_build_with_empty_series_is_empty_chart() {
        assert_eq!(build(&HistorySeries::default()), build_empty());
    }

    #[test]
    fn test_build_line_chart() {
        let input = series(3);
        let option = build(&input);

        assert!(option.title.subtext.is_none());
        let x_axis = option.x_axis.as_ref().unwrap();
        assert_eq!(x_axis.data.as_ref().unwrap(), &input.timestamps);
        assert_eq!(x_axis.axis_label.as_ref().unwrap().interval, 0);
        assert_eq!(x_axis.axis_label.as_ref().unwrap().rotate, LABEL_ROTATION);

        assert_eq!(option.series.len(), 1);
        let line = &option.series[0];
        assert_eq!(line.kind, SeriesKind::Line);
        assert_eq!(line.smooth, Some(true));
        assert!(line.area_style.is_some());
        assert_eq!(line.data[2], SeriesDatum::Label("2.00".to_string()));
        assert_eq!(option.tooltip.unwrap().formatter, "{b}: {c} MW");
    }

    #[test]
    fn test_label_interval() {
        assert_eq!(label_interval(0), 0);
        assert_eq!(label_interval(9), 0);
        assert_eq!(label_interval(10), 1);
        assert_eq!(label_interval(105), 10);

        let option = build(&series(57));
        assert_eq!(option.x_axis.unwrap().axis_label.unwrap().interval, 5);
    }

    #[test]
    fn test_build_serializes_stable_keys() {
        let json = serde_json::to_value(build(&series(2))).unwrap();
        for key in ["title", "tooltip", "xAxis", "yAxis", "series", "grid"] {
            assert!(json.get(key).is_some(), "missing key {}", key);
        }
        assert_eq!(json["series"][0]["type"], "line");
        assert_eq!(json["series"][0]["data"][1], "1.00");
    }

    #[test]
    fn test_build_map() {
        let regions = vec![
            RegionView {
                name: "São Paulo".to_string(),
                value: 3.0,
                active_power: 3_000_000.0,
                total_power: 0.0,
                active_power_rate: 75.0,
            },
            RegionView {
                name: "Acre".to_string(),
                value: 1.0,
                active_power: 1_000_000.0,
                total_power: 0.0,
                active_power_rate: 25.0,
            },
        ];
        let option = build_map(&regions);

        assert_eq!(option.visual_map.as_ref().unwrap().max, 3.0);
        assert_eq!(option.series[0].kind, SeriesKind::Map);
        assert_eq!(option.series[0].data.len(), 2);
        assert!(option.title.subtext.is_none());

        let empty = build_map(&[]);
        assert!(empty.series[0].data.is_empty());
        assert_eq!(empty.visual_map.unwrap().max, 0.0);
        assert_eq!(empty.title.subtext.as_deref(), Some(NO_DATA));
    }
}

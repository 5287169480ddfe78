use chapter_charts::core::{ChartConfig, ChartTheme, SectionKind, merge};
use serde_json::{Value, json};

fn base_theme() -> ChartConfig {
    ChartConfig::from_value(json!({
        "chart": {
            "fontFamily": "Inter",
            "background": "transparent",
            "toolbar": { "show": true }
        },
        "grid": { "borderColor": "rgba(255,255,255,0.04)", "strokeDashArray": 4 },
        "xaxis": { "labels": { "style": { "colors": "#888" } }, "axisTicks": { "show": false } },
        "yaxis": { "labels": { "style": { "colors": "#888" } } },
        "tooltip": { "theme": "dark" },
        "legend": { "labels": { "colors": "#888" } },
        "dataLabels": { "enabled": false }
    }))
}

#[test]
fn override_wins_on_nested_label_color_and_other_sections_stay_from_base() {
    let base = ChartConfig::from_value(json!({
        "xaxis": { "labels": { "style": { "colors": "#888" } } }
    }));
    let overrides = ChartConfig::from_value(json!({
        "xaxis": { "labels": { "style": { "colors": "#fff" } } },
        "dataLabels": { "enabled": true }
    }));

    let merged = merge(&base, &overrides);
    assert_eq!(merged.lookup("xaxis.labels.style.colors"), Some(&json!("#fff")));
    assert_eq!(merged.lookup("dataLabels.enabled"), Some(&json!(true)));

    let themed = merge(&base_theme(), &overrides);
    assert_eq!(themed.lookup("xaxis.labels.style.colors"), Some(&json!("#fff")));
    assert_eq!(themed.lookup("dataLabels.enabled"), Some(&json!(true)));
    for kind in [
        SectionKind::Grid,
        SectionKind::YAxis,
        SectionKind::Tooltip,
        SectionKind::Legend,
    ] {
        assert_eq!(themed.section(kind), base_theme().section(kind), "{}", kind.key());
    }
}

#[test]
fn section_merge_is_shallow_and_keeps_unmentioned_base_keys() {
    let overrides = ChartConfig::from_value(json!({
        "chart": { "type": "area", "height": 250, "toolbar": { "tools": { "zoom": false } } }
    }));

    let merged = merge(&base_theme(), &overrides);
    assert_eq!(merged.lookup("chart.type"), Some(&json!("area")));
    assert_eq!(merged.lookup("chart.height"), Some(&json!(250)));
    assert_eq!(merged.lookup("chart.fontFamily"), Some(&json!("Inter")));
    assert_eq!(merged.lookup("chart.background"), Some(&json!("transparent")));
    // nested objects are replaced, not merged
    assert_eq!(merged.lookup("chart.toolbar.show"), None);
    assert_eq!(merged.lookup("chart.toolbar.tools.zoom"), Some(&json!(false)));
}

#[test]
fn non_object_section_override_replaces_section_outright() {
    let overrides = ChartConfig::from_value(json!({
        "yaxis": [
            { "title": { "text": "left" } },
            { "opposite": true }
        ],
        "legend": "hidden"
    }));

    let merged = merge(&base_theme(), &overrides);
    assert_eq!(
        merged.section(SectionKind::YAxis),
        Some(&json!([{ "title": { "text": "left" } }, { "opposite": true }]))
    );
    assert_eq!(merged.lookup("yaxis.1.opposite"), Some(&json!(true)));
    assert_eq!(merged.section(SectionKind::Legend), Some(&json!("hidden")));
}

#[test]
fn null_section_in_override_counts_as_absent() {
    let overrides =
        ChartConfig::from_value(json!({ "grid": null, "tooltip": { "theme": "light" } }));
    assert!(overrides.section(SectionKind::Grid).is_none());

    let merged = merge(&base_theme(), &overrides);
    assert_eq!(merged.section(SectionKind::Grid), base_theme().section(SectionKind::Grid));
    assert_eq!(merged.lookup("tooltip.theme"), Some(&json!("light")));
}

#[test]
fn passthrough_keys_are_copied_and_replace_base_keys() {
    let base = base_theme().with("colors", json!(["#0071e3"]));
    let overrides = ChartConfig::from_value(json!({
        "colors": ["#ff3b30", "#34c759"],
        "series": [{ "name": "Population", "data": [33.8, 35.5] }],
        "stroke": { "curve": "smooth" }
    }));

    let merged = merge(&base, &overrides);
    assert_eq!(merged.extra("colors"), Some(&json!(["#ff3b30", "#34c759"])));
    assert_eq!(merged.lookup("series.0.name"), Some(&json!("Population")));
    assert_eq!(merged.lookup("stroke.curve"), Some(&json!("smooth")));
    assert_eq!(
        merged.extra_keys().collect::<Vec<_>>(),
        vec!["colors", "series", "stroke"]
    );
}

#[test]
fn merge_leaves_both_inputs_untouched() {
    let base = base_theme();
    let overrides = ChartConfig::from_value(json!({
        "grid": { "strokeDashArray": 0 },
        "markers": { "size": 4 }
    }));
    let base_before = base.clone();
    let overrides_before = overrides.clone();

    let _ = merge(&base, &overrides);

    assert_eq!(base, base_before);
    assert_eq!(overrides, overrides_before);
}

#[test]
fn empty_override_reproduces_base() {
    let base = base_theme();
    assert_eq!(merge(&base, &ChartConfig::new()), base);
}

#[test]
fn non_object_document_yields_empty_config() {
    assert!(ChartConfig::from_value(json!("oops")).is_empty());
    assert!(ChartConfig::from_value(json!([1, 2, 3])).is_empty());
    assert!(ChartConfig::from_value(json!(null)).is_empty());

    let parsed: ChartConfig = serde_json::from_str("42").expect("permissive parse");
    assert!(parsed.is_empty());
}

#[test]
fn json_round_trip_keeps_sections_and_passthrough_keys() {
    let config = base_theme().with("series", json!([{ "name": "ES", "data": [1.0] }]));
    let text = serde_json::to_string(&config).expect("serialize config");
    let parsed: ChartConfig = serde_json::from_str(&text).expect("parse config");

    assert_eq!(parsed, config);
    assert_eq!(config.to_value()["dataLabels"], json!({ "enabled": false }));
    assert_eq!(config.to_value()["series"][0]["name"], json!("ES"));
}

#[test]
fn setting_a_section_key_routes_to_the_section_slot() {
    let config = ChartConfig::new()
        .with("dataLabels", json!({ "enabled": true }))
        .with("fill", json!({ "type": "gradient" }));

    assert_eq!(
        config.section(SectionKind::DataLabels),
        Some(&json!({ "enabled": true }))
    );
    assert_eq!(config.extra("dataLabels"), None);
    assert_eq!(config.extra("fill"), Some(&json!({ "type": "gradient" })));

    let cleared = config.with("fill", json!(null));
    assert_eq!(cleared.extra("fill"), Some(&Value::Null));
}

#[test]
fn null_passthrough_override_replaces_the_base_value() {
    let base = ChartConfig::from_value(json!({
        "colors": ["#ff3b30"],
        "fill": { "type": "solid" }
    }));
    let overrides = ChartConfig::from_value(json!({ "colors": null }));

    let merged = merge(&base, &overrides);

    assert_eq!(merged.extra("colors"), Some(&Value::Null));
    assert_eq!(merged.extra("fill"), Some(&json!({ "type": "solid" })));
    assert_eq!(
        merged.to_value(),
        json!({ "colors": null, "fill": { "type": "solid" } })
    );
}

#[test]
fn deep_dive_theme_carries_toolbar_exports_and_disabled_data_labels() {
    let theme = ChartTheme::deep_dive();
    let config = theme.config(&ChartConfig::from_value(json!({
        "chart": { "type": "line", "height": 320 }
    })));

    assert_eq!(config.lookup("chart.type"), Some(&json!("line")));
    assert_eq!(config.lookup("chart.toolbar.show"), Some(&json!(true)));
    assert_eq!(
        config.lookup("chart.toolbar.export.csv.filename"),
        Some(&json!("deep-dive-data"))
    );
    assert_eq!(config.lookup("dataLabels.enabled"), Some(&json!(false)));
    assert_eq!(config.lookup("tooltip.theme"), Some(&json!("dark")));
    assert_eq!(config.lookup("xaxis.labels.style.colors"), Some(&json!("#888")));
}

#[test]
fn light_theme_hides_toolbar() {
    let config = ChartTheme::light().config(&ChartConfig::new());
    assert_eq!(config.lookup("chart.toolbar.show"), Some(&json!(false)));
    assert_eq!(config.lookup("tooltip.theme"), Some(&json!("light")));
    assert_eq!(config.lookup("yaxis.labels.style.colors"), Some(&json!("#86868b")));
}

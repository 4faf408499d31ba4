use house_price_maps::format::{format_price, format_si_price};
use house_price_maps::viz::build_legend;
use house_price_maps::{Color, MapConfig, MapError, ThresholdScale};

#[test]
fn england_legend_ticks_and_swatches() {
    let cfg = MapConfig::england();
    let scale = cfg.scale().unwrap();
    let legend = build_legend(&scale, &cfg.domain, 200.0);

    let labels: Vec<&str> = legend.ticks.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(
        labels,
        ["£200k", "£250k", "£300k", "£350k", "£400k", "£450k", "£500k", "£550k"]
    );
    assert_eq!(legend.entries.len(), scale.range().len());
    // top tick sits at 0, bottom tick at the full height
    assert_eq!(legend.ticks.first().unwrap().y, 200.0);
    assert_eq!(legend.ticks.last().unwrap().y, 0.0);

    let inner: f64 = legend.entries.iter().map(|e| e.height).sum();
    assert!((inner - 200.0).abs() < 1e-9);
    assert_eq!(legend.entries.first().unwrap().height, 0.0);
    assert_eq!(legend.entries.last().unwrap().height, 0.0);
}

#[test]
fn every_value_gets_exactly_one_bucket() {
    let scale = MapConfig::england().scale().unwrap();
    for v in [0.0, 199999.0, 200000.0, 320000.0, 549999.99, 550000.0, 9e9] {
        let color = scale.color_for(v);
        let extent = scale.invert_extent(&color).unwrap();
        assert!(extent.lower.is_none_or(|lo| lo <= v), "{v} below {extent:?}");
        assert!(extent.upper.is_none_or(|hi| v < hi), "{v} above {extent:?}");
    }
    assert_eq!(scale.color_for(199999.0), "#f7fbff".parse::<Color>().unwrap());
    assert_eq!(scale.color_for(550000.0), "#08306b".parse::<Color>().unwrap());
}

#[test]
fn mismatched_palettes_are_rejected() {
    let black = Color::new(0, 0, 0);
    assert_eq!(
        ThresholdScale::new(vec![1.0, 2.0], vec![black; 2]),
        Err(MapError::RangeLength { domain: 2, range: 2 })
    );
    assert_eq!(ThresholdScale::new(vec![], vec![black]), Err(MapError::EmptyDomain));
}

#[test]
fn price_formats() {
    assert_eq!(format_price(500000.0), "£500,000");
    assert_eq!(format_price(1234567.4), "£1,234,567");
    assert_eq!(format_si_price(450000.0), "£450k");
    assert_eq!(format_si_price(1000000.0), "£1.0M");
}

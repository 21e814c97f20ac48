use crate::*;
use serde_json::json;

#[test]
fn config_defaults_are_readable_by_dotted_path() {
    let cfg = StoryConfig::default();
    assert_eq!(cfg.get_f64("layout.padding"), Some(150.0));
    assert_eq!(cfg.get_usize("layout.force.iterations"), Some(80));
    assert_eq!(cfg.default_domain_title(), "Domain Story");
    assert_eq!(cfg.domain_color(6), cfg.domain_color(0));
}

#[test]
fn palette_cycles_and_falls_back_when_empty() {
    let fallback = crate::config::FLOW_COLORS;
    let custom = ["#111111", "#222222"];
    assert_eq!(crate::config::cycle_color(&custom[..], 3, fallback), "#222222");
    assert_eq!(crate::config::cycle_color::<&str>(&[], 9, fallback), "#ef4444");

    let cfg = StoryConfig::from_json_overrides(r#"{ "palette": { "domains": [] } }"#).unwrap();
    assert_eq!(cfg.domain_color(1), crate::config::DOMAIN_COLORS[1]);
}

#[test]
fn config_overrides_deep_merge_onto_defaults() {
    let cfg = StoryConfig::from_json_overrides(
        r##"{ "layout": { "padding": 40 }, "palette": { "domains": ["#000000"] } }"##,
    )
    .unwrap();
    assert_eq!(cfg.get_f64("layout.padding"), Some(40.0));
    assert_eq!(cfg.get_f64("layout.seedRadiusFactor"), Some(0.6));
    assert_eq!(cfg.domain_color(3), "#000000");

    assert!(matches!(
        StoryConfig::from_json_overrides("[1, 2]"),
        Err(Error::InvalidConfig { .. })
    ));
    assert!(matches!(
        StoryConfig::from_json_overrides("{"),
        Err(Error::ConfigJson(_))
    ));
}

#[test]
fn engine_with_config_changes_default_domain_title() {
    let overrides =
        StoryConfig::from_value(json!({ "story": { "defaultDomainTitle": "Untitled story" } }));
    let engine = Engine::new().with_config(overrides);
    let story = engine.parse_story("@A (person)\n");
    assert_eq!(story.domains[0].title, "Untitled story");
    assert_eq!(engine.config().get_f64("canvas.width"), Some(1600.0));
}

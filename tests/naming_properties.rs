//! Integration tests for pattern rendering and name generation

use std::collections::HashMap;

use chrono::{Local, TimeZone};
use name_patterns::{
    generate_name, render, token_dictionary, Creature, CustomReplacements, NamingConfig,
    NamingContext, RenderMode, TokenKey,
};
use pretty_assertions::assert_eq;

fn rex(id: u64) -> Creature {
    Creature::new(id, "Rex")
}

fn render_for(pattern: &str, creature: &Creature) -> String {
    let siblings = vec![creature.clone()];
    let ctx = NamingContext::new(creature, &siblings);
    render(pattern, &ctx)
}

#[test]
fn test_plain_text_renders_unchanged() {
    let creature = rex(1);
    for pattern in ["", "Big Rex", "a|b:c}", "50% off", "}}{"] {
        assert_eq!(render_for(pattern, &creature), pattern);
    }
}

#[test]
fn test_text_functions() {
    let creature = rex(1);
    let cases = [
        ("{{#substring: Allosaurus | 0 | 4}}", "Allo"),
        ("{{#replace: Allosaurus | Allo | Ab}}", "Absaurus"),
        ("{{#indexof: hello | ll}}", "2"),
        ("{{#indexof: hello | zz}}", ""),
        ("{{#substring: {species} | 0 | 2}}", "Re"),
    ];
    for (pattern, expected) in cases {
        assert_eq!(render_for(pattern, &creature), expected, "pattern {}", pattern);
    }
}

#[test]
fn test_ifexpr_on_stat_level() {
    let pattern = "{{#ifexpr: {hp} > 30 | High | Low}}";
    assert_eq!(render_for(pattern, &rex(1).with_levels(vec![35])), "High");
    assert_eq!(render_for(pattern, &rex(1).with_levels(vec![20])), "Low");
}

#[test]
fn test_unknown_names_render_empty() {
    assert_eq!(render_for("a{nope}b{{#frob: x}}c", &rex(1)), "abc");
}

#[test]
fn test_unique_number_skips_taken_names() {
    let siblings = vec![rex(1).with_name("Rex_1"), rex(2)];
    let ctx = NamingContext::new(&siblings[1], &siblings);
    let outcome = generate_name("Rex_{n}", &ctx);
    assert_eq!(outcome.name, "Rex_2");
    assert_eq!(outcome.unique_number, Some(2));
}

#[test]
fn test_unique_number_without_siblings() {
    let creature = rex(1);
    let ctx = NamingContext::new(&creature, &[]);
    assert_eq!(generate_name("Rex_{n}", &ctx).name, "Rex_1");
}

#[test]
fn test_unique_number_is_smallest_free_suffix() {
    let siblings = vec![
        rex(1).with_name("Rex_1"),
        rex(2).with_name("Rex_3"),
        rex(3),
    ];
    let ctx = NamingContext::new(&siblings[2], &siblings);
    assert_eq!(generate_name("{species}_{n}", &ctx).name, "Rex_2");
}

#[test]
fn test_own_name_does_not_block_candidate() {
    let siblings = vec![rex(1).with_name("Rex_1")];
    let ctx = NamingContext::new(&siblings[0], &siblings);
    assert_eq!(generate_name("Rex_{n}", &ctx).name, "Rex_1");
}

#[test]
fn test_preview_placeholder_when_search_disabled() {
    let creature = rex(1);
    let config = NamingConfig::default()
        .with_preview_search_limit(0)
        .with_preview_placeholder("?");
    let ctx = NamingContext::new(&creature, &[])
        .with_config(&config)
        .with_mode(RenderMode::Preview);
    assert_eq!(generate_name("Rex_{n}", &ctx).name, "Rex_?");
}

#[test]
fn test_customreplace() {
    let replacements = CustomReplacements::from_map(HashMap::from([(
        "Allosaurus".to_string(),
        "Allo".to_string(),
    )]));
    let creature = rex(1);
    let ctx = NamingContext::new(&creature, &[]).with_replacements(&replacements);

    assert_eq!(render("{{#customreplace: Allosaurus}}", &ctx), "Allo");
    assert_eq!(render("{{#customreplace: Rex}}", &ctx), "Rex");
    assert_eq!(render("{{#customreplace: Rex | Unknown}}", &ctx), "Unknown");
}

#[test]
fn test_rendering_is_repeatable() {
    let creature = rex(1)
        .with_name("Chomper")
        .with_levels(vec![35, 20, 10, 15]);
    let siblings = vec![creature.clone(), rex(2).with_levels(vec![30, 25, 10, 20])];
    let now = Local.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let ctx = NamingContext::new(&creature, &siblings).with_now(now);

    let pattern = "{species}_{hp}{{#if: {isTophp} | T | }}_{oldname}_{{#time: yyyy}}";
    let first = render(pattern, &ctx);
    assert_eq!(first, "Rex_35T_Chomper_2024");
    assert_eq!(render(pattern, &ctx), first);
}

#[test]
fn test_unterminated_call_is_literal() {
    let creature = rex(1);
    let pattern = "{{#substring: {species";
    assert_eq!(render_for(pattern, &creature), pattern);
    assert_eq!(render_for("{{#substring: {species}", &creature), "{{#substring: Rex");
}

#[test]
fn test_function_error_is_local_to_call() {
    let rendered = render_for("a_{{#div: 1 | 0}}_{species}", &rex(1));
    assert!(rendered.starts_with("a_#div: "));
    assert!(rendered.ends_with("_Rex"));
}

#[test]
fn test_preview_searches_within_its_limit() {
    let siblings = vec![
        rex(1).with_name("Rex_1"),
        rex(2).with_name("Rex_2"),
        rex(3),
    ];
    let config = NamingConfig::default().with_preview_search_limit(5);
    let ctx = NamingContext::new(&siblings[2], &siblings)
        .with_config(&config)
        .with_mode(RenderMode::Preview);
    let outcome = generate_name("Rex_{n}", &ctx);
    assert_eq!(outcome.name, "Rex_3");
    assert_eq!(outcome.unique_number, Some(3));
    assert!(!outcome.exhausted);

    let config = NamingConfig::default().with_preview_search_limit(1);
    let ctx = NamingContext::new(&siblings[2], &siblings)
        .with_config(&config)
        .with_mode(RenderMode::Preview);
    let outcome = generate_name("Rex_{n}", &ctx);
    assert_eq!(outcome.name, "Rex_1");
    assert!(outcome.exhausted);
}

#[test]
fn test_token_dictionary_lists_every_token() {
    let creature = rex(1).with_name("Chomper").with_levels(vec![35, 20]);
    let siblings = vec![creature.clone()];
    let config = NamingConfig::default().with_preview_placeholder("#");
    let ctx = NamingContext::new(&creature, &siblings).with_config(&config);

    let entries = token_dictionary(&ctx);
    assert_eq!(entries.len(), TokenKey::catalog().len());

    let value = |name: &str| {
        entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.value.as_str())
    };
    assert_eq!(value("species"), Some("Rex"));
    assert_eq!(value("n"), Some("#"));
    assert_eq!(value("hp"), Some("35"));
    assert_eq!(value("oldname"), Some("Chomper"));
    assert!(entries.iter().all(|e| !e.description.is_empty()));
}

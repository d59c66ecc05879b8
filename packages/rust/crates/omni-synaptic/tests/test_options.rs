//! Option block parsing through the public API.

use omni_synaptic::{
    ChartKind, RenderKind, SynapticError, SynapticRouteOptions, Theme, parse_option_block,
    validate_options,
};

#[test]
fn test_every_field_round_trips_through_block_syntax() -> Result<(), SynapticError> {
    let mut renders = vec![RenderKind::WordCloud, RenderKind::Table];
    renders.extend(ChartKind::ALL.map(RenderKind::Chart));

    for render in renders {
        let options = SynapticRouteOptions {
            render,
            ..SynapticRouteOptions::default()
        };
        assert_eq!(SynapticRouteOptions::parse(&options.to_block())?, options);
    }
    for theme in Theme::ALL {
        let options = SynapticRouteOptions {
            theme,
            ..SynapticRouteOptions::default()
        };
        assert_eq!(SynapticRouteOptions::parse(&options.to_block())?, options);
    }
    for global in [true, false] {
        let options = SynapticRouteOptions {
            global,
            ..SynapticRouteOptions::default()
        };
        assert_eq!(SynapticRouteOptions::parse(&options.to_block())?, options);
    }
    for count in [1, 7, 30, u32::MAX] {
        let options = SynapticRouteOptions {
            max_item: count,
            max_random_item: count,
            ..SynapticRouteOptions::default()
        };
        assert_eq!(SynapticRouteOptions::parse(&options.to_block())?, options);
    }
    Ok(())
}

#[test]
fn test_unknown_key_alongside_valid_key_fails_wholesale() {
    let result = SynapticRouteOptions::parse("foo: bar\ntype: chart");
    let Err(SynapticError::Syntax(errors)) = &result else {
        panic!("expected syntax failure, got {result:?}");
    };
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].key, "foo");
    assert_eq!(errors[0].value, "bar");
    assert_eq!(
        errors[0].message,
        "Invalid key. Valid keys are: 'type', 'charttype', 'global', 'maxitem', 'maxrandomitem', 'theme'"
    );
}

#[test]
fn test_every_unknown_key_is_named() {
    let raw = parse_option_block("zeta: 1\nalpha: 2\ntheme: dark");
    let result = validate_options(&raw);
    let keys: Vec<String> = result
        .as_ref()
        .err()
        .and_then(SynapticError::syntax_errors)
        .unwrap_or_default()
        .iter()
        .map(|error| error.key.clone())
        .collect();
    assert_eq!(keys, vec!["alpha", "zeta"]);
}

#[test]
fn test_table_global_block() -> Result<(), SynapticError> {
    let options = SynapticRouteOptions::parse("type: Table\nGlobal: true")?;
    assert_eq!(options.render, RenderKind::Table);
    assert!(options.global);
    assert_eq!(options.theme, Theme::Default);
    Ok(())
}

#[test]
fn test_integers_are_strict() {
    for raw in ["maxitem: 10px", "maxitem: 1.5", "maxitem: 0", "maxrandomitem: -1"] {
        assert!(
            SynapticRouteOptions::parse(raw).is_err(),
            "{raw} should be rejected"
        );
    }
}

use rebag::{
    Argument, ArgumentConfig, ArgumentRegistry, ArgsSource, Bag, HelpDoc, OptionKey,
    OptionValue, Origin, OriginSet, RequestNormalizer, StaticSource, ValidationRejected,
    Value,
};

fn registry() -> ArgumentRegistry {
    let mut registry = ArgumentRegistry::new();
    registry
        .define(Argument::new("h").long("help").doc("Show this help document."))
        .unwrap();
    registry
        .define(Argument::new("b").long("beta").doc("A simple presence flag."))
        .unwrap();
    registry
        .define(
            Argument::new("d")
                .long("delta")
                .doc("A repeatable value option.")
                .option(OptionKey::ValueExpected, true)
                .option(OptionKey::MultipleExpected, true),
        )
        .unwrap();
    registry
        .define(
            Argument::new("g")
                .long("gamma")
                .doc("Requires a non-empty value.")
                .option(OptionKey::ValueExpected, true)
                .option(
                    OptionKey::MustValidate,
                    OptionValue::predicate(|_short, value| {
                        value.as_text().map(|text| !text.is_empty()).unwrap_or(false)
                    }),
                ),
        )
        .unwrap();
    registry
}

#[test]
fn cli_round_trip() {
    let registry = registry();
    let source = ArgsSource::new(vec!["-h", "-b", "--delta=1", "-d=2", "--gamma=ok"]);
    let mut normalizer = RequestNormalizer::new(&registry, Box::new(source));

    assert_eq!(normalizer.get("help").unwrap(), Some(&Value::Bool(true)));
    assert_eq!(normalizer.get("-b").unwrap(), Some(&Value::Bool(true)));
    // '--delta=1' and '-d=2' arrive under separate raw keys; both resolve to 'delta' and
    // the later one wins the slot, while each contributes its own sequence.
    assert_eq!(
        normalizer.get("delta").unwrap(),
        Some(&Value::Many(vec![Value::from("2")]))
    );
    assert_eq!(normalizer.get("gamma").unwrap(), Some(&Value::from("ok")));
}

#[test]
fn cli_validation_failure() {
    let registry = registry();
    let source = ArgsSource::new(vec!["--gamma="]);
    let mut normalizer = RequestNormalizer::new(&registry, Box::new(source));

    let error = normalizer.request().unwrap_err();
    assert_eq!(
        error,
        ValidationRejected {
            name: "gamma".to_string(),
            doc: "Requires a non-empty value.".to_string(),
        }
    );
    assert_eq!(
        error.to_string(),
        "an invalid value was given for argument 'gamma'. Requires a non-empty value."
    );
}

#[test]
fn http_round_trip() {
    let registry = registry();
    let mut decoded = Bag::default();
    decoded.insert("beta".to_string(), Value::from(""));
    decoded.insert(
        "d".to_string(),
        Value::Many(vec![Value::from("1"), Value::from("2")]),
    );
    decoded.insert("unrelated".to_string(), Value::from("x"));
    let source = StaticSource::default().with(Origin::Post, decoded);
    let mut normalizer = RequestNormalizer::new(&registry, Box::new(source))
        .origin(Origin::Post)
        .accept(OriginSet::ALL);

    let request = normalizer.request().unwrap().clone();
    assert_eq!(request.get("beta"), Some(&Value::Bool(true)));
    assert_eq!(
        request.get("delta"),
        Some(&Value::Many(vec![Value::from("1"), Value::from("2")]))
    );
    // Undeclared fields are dropped, not errors.
    assert_eq!(request.get("unrelated"), None);
    assert_eq!(request.len(), 2);
}

#[test]
fn rejected_origin_yields_empty_request() {
    let registry = registry();
    let mut decoded = Bag::default();
    decoded.insert("beta".to_string(), Value::from(""));
    let source = StaticSource::default().with(Origin::Get, decoded);
    let mut normalizer = RequestNormalizer::new(&registry, Box::new(source))
        .origin(Origin::Get)
        .accept(Origin::Cli | Origin::Post);

    assert!(normalizer.is_empty().unwrap());
    assert_eq!(normalizer.get("beta").unwrap(), None);
}

#[test]
fn config_driven_setup() {
    let mut registry = ArgumentRegistry::new();
    registry
        .extend_from_config(vec![
            ArgumentConfig {
                short_name: "h".to_string(),
                long_name: Some("help".to_string()),
                doc: "Show this help document.".to_string(),
                options: vec![],
            },
            ArgumentConfig {
                short_name: "d".to_string(),
                long_name: Some("delta".to_string()),
                doc: "A repeatable value option.".to_string(),
                options: vec![("MULTIPLE_EXPECTED".to_string(), OptionValue::Flag(true))],
            },
        ])
        .unwrap();

    // The escalation invariant applies through the config path too.
    assert!(registry.get("delta").unwrap().options().value_expected());

    let source = ArgsSource::new(vec!["--delta=5"]);
    let mut normalizer = RequestNormalizer::new(&registry, Box::new(source));
    assert_eq!(
        normalizer.get("d").unwrap(),
        Some(&Value::Many(vec![Value::from("5")]))
    );
}

#[test]
fn help_document() {
    let registry = registry();
    let rendered = HelpDoc::terminal("program", &registry).render();

    assert!(rendered.starts_with("usage: program [-h] [-b] [-d=..] [-g=..]"));
    assert!(rendered.contains("-h, --help"));
    assert!(rendered.contains("-d, --delta"));
    assert!(rendered.contains("A repeatable value option."));
}

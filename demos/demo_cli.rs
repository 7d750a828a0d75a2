use rebag::{
    Argument, ArgumentRegistry, ArgsSource, ConsoleInterface, HelpDoc, OptionKey, OptionValue,
    RequestNormalizer, UserInterface, Value,
};

/// Try the following:
/// ```console
/// demo_cli -h
/// demo_cli -b --delta=1 -d=2
/// demo_cli --gamma=
/// ```
fn main() {
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

    let interface = ConsoleInterface::default();
    let mut normalizer =
        RequestNormalizer::new(&registry, Box::new(ArgsSource::from_env()));

    let request = match normalizer.request() {
        Ok(request) => request.clone(),
        Err(error) => {
            interface.print_error(error.to_string());
            std::process::exit(1);
        }
    };

    if request.is_empty() || request.get("help") == Some(&Value::Bool(true)) {
        HelpDoc::terminal("demo_cli", &registry).print(&interface);
        return;
    }

    for (name, value) in &request {
        interface.print(format!("{name}: {value:?}"));
    }
}

use rebag::{
    ArgumentConfig, ArgumentRegistry, Bag, OptionValue, Origin, OriginSet, RequestNormalizer,
    StaticSource, Value,
};

/// Normalizes a form-decoded bag, the way an HTTP host would after decoding its
/// query/body fields for the request's verb.
fn main() {
    let mut registry = ArgumentRegistry::new();
    registry
        .extend_from_config(vec![
            ArgumentConfig {
                short_name: "u".to_string(),
                long_name: Some("user".to_string()),
                doc: "The acting user.".to_string(),
                options: vec![("VALUE_EXPECTED".to_string(), OptionValue::Flag(true))],
            },
            ArgumentConfig {
                short_name: "t".to_string(),
                long_name: Some("tag".to_string()),
                doc: "Tags to apply.".to_string(),
                options: vec![("MULTIPLE_EXPECTED".to_string(), OptionValue::Flag(true))],
            },
            ArgumentConfig {
                short_name: "f".to_string(),
                long_name: Some("force".to_string()),
                doc: "Skip confirmation.".to_string(),
                options: vec![],
            },
        ])
        .unwrap();

    // Stand-in for this host's decoded POST body.
    let mut decoded = Bag::default();
    decoded.insert("user".to_string(), Value::from("hugh"));
    decoded.insert("t".to_string(), Value::from("alpha"));
    decoded.insert("force".to_string(), Value::from(""));
    decoded.insert("csrf_token".to_string(), Value::from("ignored"));

    let source = StaticSource::default().with(Origin::Post, decoded);
    let mut normalizer = RequestNormalizer::new(&registry, Box::new(source))
        .origin(Origin::Post)
        .accept(OriginSet::ALL);

    match normalizer.request() {
        Ok(request) => {
            for (name, value) in request {
                println!("{name}: {value:?}");
            }
        }
        Err(error) => {
            eprintln!("{error}");
            std::process::exit(1);
        }
    }
}
